use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_stages::gvcf_combine;

/// Folds the diploid gVCF into the final VCF and writes the output gVCF.
pub struct GvcfCombinePhase;

impl PlanPhase for GvcfCombinePhase {
    fn name(&self) -> &'static str {
        "GvcfCombinePhase"
    }

    fn applies(&self, context: &PlanContext) -> bool {
        context.emit_gvcf
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let line = gvcf_combine(
            &context.artifacts.diploid_gvcf,
            &context.output_vcf,
            &context.config,
        )?;

        context.push(self.name(), "gvcf_combine", line);
        Ok(())
    }
}
