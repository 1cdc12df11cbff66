use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_stages::variant_phaser;

pub struct PhasePhase;

impl PlanPhase for PhasePhase {
    fn name(&self) -> &'static str {
        "PhasePhase"
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let names = &context.artifacts;
        let cmd = variant_phaser(
            &names.diploid_vcf,
            &names.phased_bed,
            &names.phased_vcf,
            &names.phased_ext,
            &context.config,
        )?;

        context.push(self.name(), "variant_phaser", cmd);
        Ok(())
    }
}
