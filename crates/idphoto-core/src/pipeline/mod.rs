pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{process_file, process_file_reported, process_photo};
pub use types::{NoOpReporter, PhotoOutput, PipelineStage, ProgressReporter};
