//! DNAscope and DNAscopeHP variant calling clauses.

use crate::driver::sentieon_driver;
use phasecall_core::{ArgBuilder, Command, CommandError, Fragment, PathLike, PipelineConfig};
use std::path::Path;
use tracing::debug;

const HP_MIN_REPEAT_COUNT: u32 = 6;

/// Driver plus `--algo DNAscope`, optionally preceded by a gVCF-emitting
/// DNAscope pass that uses `<model_bundle>/gvcf_model`.
///
/// DNAscopeHP is not part of this command; append [`dnascope_hp`] when the
/// stage needs it.
pub fn dnascope(
    model: &Path,
    out_vcf: &Path,
    config: &PipelineConfig,
    interval: Option<&PathLike>,
    gvcf: Option<&Path>,
) -> Result<Command, CommandError> {
    let mut cmd = sentieon_driver(config, interval, false)?;

    if let Some(gvcf) = gvcf {
        let gvcf_model = config.require_model_bundle()?.join("gvcf_model");
        cmd = cmd
            .arg("--algo")
            .arg("DNAscope")
            .opt("--model", &gvcf_model)
            .opt("--emit_mode", "gvcf")
            .arg(gvcf);
    }

    let cmd = cmd
        .arg("--algo")
        .arg("DNAscope")
        .opt_some("--dbsnp", config.dbsnp.as_ref())
        .opt("--model", model)
        .arg(out_vcf);

    debug!(command = %cmd, "Built DNAscope command");
    Ok(cmd)
}

/// `--algo DNAscopeHP` clause, to be appended onto an existing driver command.
///
/// `model` is `None` for ONT data, which has no haploid HP model.
pub fn dnascope_hp(
    model: Option<&Path>,
    repeat_model: &Path,
    hp_vcf: &Path,
    config: &PipelineConfig,
) -> Fragment {
    Fragment::new()
        .arg("--algo")
        .arg("DNAscopeHP")
        .opt_some("--dbsnp", config.dbsnp.as_ref())
        .opt_some("--model", model)
        .opt("--pcr_indel_model", repeat_model)
        .opt("--min_repeat_count", &HP_MIN_REPEAT_COUNT)
        .arg(hp_vcf)
}
