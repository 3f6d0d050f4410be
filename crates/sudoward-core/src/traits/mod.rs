//! Collaborator traits defined in `sudoward-core` and implemented by other crates.

pub mod artifact;
pub mod audit;
pub mod clock;
pub mod probe;

pub use artifact::ArtifactWriter;
pub use audit::AuditSink;
pub use clock::{Clock, ManualClock, SystemClock};
pub use probe::SystemProbe;
