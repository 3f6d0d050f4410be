//! # sudoward-api
//!
//! HTTP control surface for Sudoward built on Axum.
//!
//! Exposes the grant, revoke and inspection endpoints, the request logging
//! and CORS middleware, and the server bootstrap that wires the host
//! collaborators, the engines and the expiry sweeper together.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
