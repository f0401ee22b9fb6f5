//! Error handling for azprov

pub mod types;

pub use types::AzError;
