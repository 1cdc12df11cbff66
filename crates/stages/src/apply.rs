use crate::driver::sentieon_driver;
use phasecall_core::{ArgBuilder, Command, CommandError, PipelineConfig};
use std::path::Path;
use tracing::debug;

/// `--algo DNAModelApply`: rescores `inp_vcf` with a trained model. Reads are
/// not needed, so the driver is built without sample input.
pub fn model_apply(
    model: &Path,
    inp_vcf: &Path,
    out_vcf: &Path,
    config: &PipelineConfig,
) -> Result<Command, CommandError> {
    let cmd = sentieon_driver(config, None, true)?
        .arg("--algo")
        .arg("DNAModelApply")
        .opt("--model", model)
        .opt("-v", inp_vcf)
        .arg(out_vcf);

    debug!(command = %cmd, "Built DNAModelApply command");
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_apply_skips_sample_input() {
        let config = PipelineConfig::new(4, "ref.fa").with_sample_input("s.bam");
        let cmd = model_apply(
            Path::new("diploid_model"),
            Path::new("tmp.vcf.gz"),
            Path::new("out.vcf.gz"),
            &config,
        )
        .unwrap();

        assert_eq!(
            cmd.to_string(),
            "sentieon driver -t 4 -r ref.fa --algo DNAModelApply --model diploid_model \
             -v tmp.vcf.gz out.vcf.gz"
        );
    }

    #[test]
    fn test_model_apply_works_without_sample() {
        let config = PipelineConfig::new(2, "ref.fa");
        assert!(model_apply(Path::new("m"), Path::new("i"), Path::new("o"), &config).is_ok());
    }

    #[test]
    fn test_model_apply_keeps_read_filter() {
        let config = PipelineConfig::new(2, "ref.fa").with_read_filter("F,x=1");
        let cmd = model_apply(Path::new("m"), Path::new("i"), Path::new("o"), &config).unwrap();
        assert_eq!(cmd.value_of("--read_filter"), Some("F,x=1"));
    }
}
