use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_stages::{dnascope, model_apply};

/// Diploid DNAscope over the configured regions, then the diploid model
/// applied to the raw calls.
pub struct DiploidCallPhase;

impl PlanPhase for DiploidCallPhase {
    fn name(&self) -> &'static str {
        "DiploidCallPhase"
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let model = context.bundle.diploid();
        let names = &context.artifacts;
        let gvcf = context.emit_gvcf.then_some(names.diploid_gvcf.as_path());

        let call = dnascope(
            &model,
            &names.diploid_tmp_vcf,
            &context.config,
            context.config.regions.as_ref(),
            gvcf,
        )?;
        let apply = model_apply(
            &model,
            &names.diploid_tmp_vcf,
            &names.diploid_vcf,
            &context.config,
        )?;

        context.push(self.name(), "dnascope", call);
        context.push(self.name(), "model_apply", apply);
        Ok(())
    }
}
