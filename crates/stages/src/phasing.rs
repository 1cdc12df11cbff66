use crate::driver::sentieon_driver;
use phasecall_core::{ArgBuilder, Command, CommandError, PipelineConfig};
use std::path::Path;
use tracing::debug;

/// `--algo VariantPhaser` over the full sample.
///
/// Phases `vcf` and writes the phased VCF, the phased-region bed and the
/// extension VCF consumed by the per-haplotype read filters.
pub fn variant_phaser(
    vcf: &Path,
    phased_bed: &Path,
    phased_vcf: &Path,
    phased_ext: &Path,
    config: &PipelineConfig,
) -> Result<Command, CommandError> {
    let cmd = sentieon_driver(config, None, false)?
        .arg("--algo")
        .arg("VariantPhaser")
        .opt("-v", vcf)
        .opt("--max_depth", &config.phase_max_depth)
        .opt("--out_bed", phased_bed)
        .opt("--out_ext", phased_ext)
        .arg(phased_vcf);

    debug!(command = %cmd, "Built VariantPhaser command");
    Ok(cmd)
}
