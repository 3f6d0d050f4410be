//! Host account probes.

pub mod passwd;

pub use passwd::PasswdProbe;
