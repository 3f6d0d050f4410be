//! # sudoward-host
//!
//! Production implementations of the host collaborators consumed by the
//! privilege engines:
//!
//! - [`PasswdProbe`] reads the passwd and group databases
//! - [`SudoersArtifactWriter`] manages one sudoers drop-in per principal
//!
//! With the `fake` feature, in-memory doubles of both are available for
//! deterministic tests that need no host privileges.

pub mod artifact;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod probe;

pub use artifact::SudoersArtifactWriter;
pub use probe::PasswdProbe;
