use super::haploid::HAPLOTYPES;
use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_stages::{haploid_patch, model_apply};

/// Patches each haplotype's DNAscope calls with its DNAscopeHP calls, then
/// rescores the patched calls with the haploid model.
pub struct HaploidPatchPhase;

impl PlanPhase for HaploidPatchPhase {
    fn name(&self) -> &'static str {
        "HaploidPatchPhase"
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let names = context.artifacts.clone();
        let patch = haploid_patch(
            &names.hap_patch(1),
            &names.hap_patch(2),
            &names.hap_pattern,
            context.tech,
            Some(names.phased_vcf.as_path()),
            &context.config,
        )?;
        context.push(self.name(), "haploid_patch", patch);

        let model = context.bundle.haploid();
        for hap in HAPLOTYPES {
            let apply = model_apply(
                &model,
                &names.hap_patch(hap),
                &names.hap_final(hap),
                &context.config,
            )?;
            context.push(self.name(), format!("model_apply_hap{}", hap), apply);
        }
        Ok(())
    }
}
