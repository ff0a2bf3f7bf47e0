/// Runtime orchestrator module - Gateway

mod non_interactive;
mod orchestrator;

pub use non_interactive::{ExecutionMetadata, NonInteractiveRunner, RouteResult};
pub use orchestrator::Orchestrator;
