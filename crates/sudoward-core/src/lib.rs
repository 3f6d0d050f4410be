//! # sudoward-core
//!
//! Core crate for Sudoward. Contains the host-collaborator traits,
//! configuration schemas, the principal/session/audit domain types,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Sudoward crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
