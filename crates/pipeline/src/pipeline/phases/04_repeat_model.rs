use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_stages::repeat_model;

pub struct RepeatModelPhase;

impl PlanPhase for RepeatModelPhase {
    fn name(&self) -> &'static str {
        "RepeatModelPhase"
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let names = &context.artifacts;
        let result = repeat_model(&names.phased_bed, &names.phased_ext, &context.config)?;

        context.repeat_model = Some(result.model);
        context.push(self.name(), "repeat_model", result.command);
        Ok(())
    }
}
