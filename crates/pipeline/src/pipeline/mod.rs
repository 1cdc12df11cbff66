pub mod bundle;
pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod plan;

pub use context::PlanContext;
pub use orchestrator::PipelinePlanner;
pub use phase_trait::PlanPhase;
