use super::context::PlanContext;
use anyhow::Result;

/// One stretch of the pipeline. Phases read the artifacts earlier phases
/// recorded on the context and append their own steps.
pub trait PlanPhase: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this phase contributes anything for the given context.
    fn applies(&self, _context: &PlanContext) -> bool {
        true
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()>;
}
