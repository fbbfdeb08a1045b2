mod artifact_app;
mod operation;

pub use artifact_app::ArtifactApp;
pub use operation::ArtifactOperation;
