pub mod local;
pub mod runner;

pub use local::LocalModel;
pub use runner::{RunArtifacts, Runner};
