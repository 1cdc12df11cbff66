use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_stages::bedtools_subtract;

/// Regions left over after phasing. Writes the whole-genome bed into scratch
/// when no regions are configured.
pub struct RegionSubtractPhase;

impl PlanPhase for RegionSubtractPhase {
    fn name(&self) -> &'static str {
        "RegionSubtractPhase"
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let names = &context.artifacts;
        let subtract = bedtools_subtract(
            context.config.regions.as_ref(),
            &names.phased_bed,
            &names.unphased_bed,
            &context.config,
            &context.scratch,
            context.fs.as_ref(),
        )?;

        context.push(self.name(), "bedtools_subtract", subtract);
        Ok(())
    }
}
