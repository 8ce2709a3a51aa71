//! Configuration module
//!
//! - XDG-compliant path resolution
//! - User settings persistence, including the local profile

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{LocalProfile, Settings};
