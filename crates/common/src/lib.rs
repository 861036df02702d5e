//! Common types for the Mercadia SDK

mod secret;

pub use secret::Secret;
