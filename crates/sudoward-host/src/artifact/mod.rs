//! Privilege artifact writers.

pub mod sudoers;

pub use sudoers::SudoersArtifactWriter;
