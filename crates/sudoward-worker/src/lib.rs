//! Background work for Sudoward.
//!
//! The expiry sweeper revokes grants whose time is up, on a fixed interval,
//! without any request driving it.

pub mod runner;
pub mod sweeper;

pub use runner::SweeperHandle;
pub use sweeper::{ExpirySweeper, SweepReport};
