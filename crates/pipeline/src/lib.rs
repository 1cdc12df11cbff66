pub mod pipeline;

pub use pipeline::bundle::ModelBundle;
pub use pipeline::context::{ArtifactNames, PlanContext};
pub use pipeline::orchestrator::PipelinePlanner;
pub use pipeline::phase_trait::PlanPhase;
pub use pipeline::plan::{Plan, PlannedStep};
