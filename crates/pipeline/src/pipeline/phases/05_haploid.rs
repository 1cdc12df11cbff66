use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_core::{ArgBuilder, PathLike, PipelineConfig, Technology};
use phasecall_stages::{dnascope, dnascope_hp};
use std::path::Path;

pub const HAPLOTYPES: [u8; 2] = [1, 2];

/// Read filter keeping only reads assigned to `hap`.
pub fn phased_read_filter(phased_ext: &Path, hap: u8) -> String {
    format!(
        "PhasedReadFilter,phased_vcf={},phase_select={}",
        phased_ext.display(),
        hap
    )
}

/// One DNAscope + DNAscopeHP driver per haplotype, restricted to the phased
/// regions and to reads of that haplotype.
pub struct HaploidCallPhase;

impl PlanPhase for HaploidCallPhase {
    fn name(&self) -> &'static str {
        "HaploidCallPhase"
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let repeat_model = context.require_repeat_model()?.to_path_buf();
        let names = context.artifacts.clone();
        let interval = PathLike::from(names.phased_bed.as_path());
        let model = context.bundle.haploid();
        let hp_model = match context.tech {
            Technology::HiFi => Some(context.bundle.haploid_hp()),
            Technology::Ont => None,
        };

        for hap in HAPLOTYPES {
            let config: PipelineConfig = context
                .config
                .clone()
                .with_read_filter(phased_read_filter(&names.phased_ext, hap));

            let cmd = dnascope(
                &model,
                &names.hap_pattern.nohp(hap),
                &config,
                Some(&interval),
                None,
            )?
            .extend(dnascope_hp(
                hp_model.as_deref(),
                &repeat_model,
                &names.hap_pattern.hp(hap),
                &config,
            ));

            context.push(self.name(), format!("dnascope_hap{}", hap), cmd);
        }
        Ok(())
    }
}
