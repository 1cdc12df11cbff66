use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_core::{ArgBuilder, PathLike, Technology};
use phasecall_stages::{dnascope, dnascope_hp, model_apply, vcf_mod_patch};

/// Diploid calling over whatever phasing left behind: DNAscope and
/// DNAscopeHP in one driver, the two merged, then the unphased model applied.
pub struct UnphasedCallPhase;

impl PlanPhase for UnphasedCallPhase {
    fn name(&self) -> &'static str {
        "UnphasedCallPhase"
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let repeat_model = context.require_repeat_model()?.to_path_buf();
        let names = context.artifacts.clone();
        let interval = PathLike::from(names.unphased_bed.as_path());
        let model = context.bundle.diploid_unphased();
        let hp_model = match context.tech {
            Technology::HiFi => Some(context.bundle.diploid_hp()),
            Technology::Ont => None,
        };

        let call = dnascope(
            &model,
            &names.unphased_nohp_vcf,
            &context.config,
            Some(&interval),
            None,
        )?
        .extend(dnascope_hp(
            hp_model.as_deref(),
            &repeat_model,
            &names.unphased_hp_vcf,
            &context.config,
        ));
        let patch = vcf_mod_patch(
            &names.unphased_patch_vcf,
            &names.unphased_nohp_vcf,
            &names.unphased_hp_vcf,
            &context.config,
        )?;
        let apply = model_apply(
            &model,
            &names.unphased_patch_vcf,
            &names.unphased_vcf,
            &context.config,
        )?;

        context.push(self.name(), "dnascope_unphased", call);
        context.push(self.name(), "patch", patch);
        context.push(self.name(), "model_apply", apply);
        Ok(())
    }
}
