use super::bundle::ModelBundle;
use super::plan::PlannedStep;
use anyhow::{anyhow, Result};
use phasecall_core::{CommandError, FileSystem, PipelineConfig, ScratchScope, ShellLine, Technology};
use phasecall_stages::HaplotypePattern;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Intermediate file names, all under the scratch directory. The planner
/// owns these; stage builders only thread them through.
#[derive(Debug, Clone)]
pub struct ArtifactNames {
    pub diploid_tmp_vcf: PathBuf,
    pub diploid_vcf: PathBuf,
    pub diploid_gvcf: PathBuf,
    pub phased_bed: PathBuf,
    pub phased_vcf: PathBuf,
    pub phased_ext: PathBuf,
    pub unphased_bed: PathBuf,
    pub hap_pattern: HaplotypePattern,
    pub unphased_nohp_vcf: PathBuf,
    pub unphased_hp_vcf: PathBuf,
    pub unphased_patch_vcf: PathBuf,
    pub unphased_vcf: PathBuf,
}

impl ArtifactNames {
    pub fn new(tmp_base: &Path) -> Result<Self, CommandError> {
        let file = |name: &str| tmp_base.join(name);
        let pattern = tmp_base.join("out_hap{hap}_{tag}tmp.vcf.gz");

        Ok(Self {
            diploid_tmp_vcf: file("out_diploid_tmp.vcf.gz"),
            diploid_vcf: file("out_diploid.vcf.gz"),
            diploid_gvcf: file("out_diploid.g.vcf.gz"),
            phased_bed: file("out_diploid_phased.bed"),
            phased_vcf: file("out_diploid_phased.vcf.gz"),
            phased_ext: file("out_diploid_phased.ext.vcf.gz"),
            unphased_bed: file("out_diploid_unphased.bed"),
            hap_pattern: HaplotypePattern::new(pattern.to_string_lossy())?,
            unphased_nohp_vcf: file("out_unphased_nohp.vcf.gz"),
            unphased_hp_vcf: file("out_unphased_hp.vcf.gz"),
            unphased_patch_vcf: file("out_unphased_patch.vcf.gz"),
            unphased_vcf: file("out_unphased.vcf.gz"),
        })
    }

    /// Output of the haploid patch for one haplotype.
    pub fn hap_patch(&self, hap: u8) -> PathBuf {
        self.hap_pattern.render(hap, "patch_")
    }

    /// Model-applied calls for one haplotype.
    pub fn hap_final(&self, hap: u8) -> PathBuf {
        self.hap_pattern.render(hap, "final_")
    }
}

pub struct PlanContext {
    pub config: PipelineConfig,
    pub tech: Technology,
    pub bundle: ModelBundle,
    pub output_vcf: PathBuf,
    pub emit_gvcf: bool,
    pub scratch: ScratchScope,
    pub fs: Arc<dyn FileSystem>,
    pub artifacts: ArtifactNames,

    pub repeat_model: Option<PathBuf>,
    pub steps: Vec<PlannedStep>,
}

impl PlanContext {
    /// Fails when the config lacks what every plan needs: sample input,
    /// a model bundle and a scratch directory.
    pub fn new(
        config: PipelineConfig,
        tech: Technology,
        output_vcf: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
    ) -> Result<Self> {
        config.validate()?;
        config.require_sample_input()?;
        let bundle = ModelBundle::new(config.require_model_bundle()?);
        let tmp_base = config.require_tmp_base()?.to_path_buf();

        Ok(Self {
            tech,
            bundle,
            output_vcf: output_vcf.into(),
            emit_gvcf: false,
            scratch: ScratchScope::new(&tmp_base),
            fs,
            artifacts: ArtifactNames::new(&tmp_base)?,
            repeat_model: None,
            steps: Vec::new(),
            config,
        })
    }

    pub fn with_gvcf(mut self, emit_gvcf: bool) -> Self {
        self.emit_gvcf = emit_gvcf;
        self
    }

    pub fn with_scratch(mut self, scratch: ScratchScope) -> Self {
        self.scratch = scratch;
        self
    }

    pub fn push(
        &mut self,
        phase: &'static str,
        name: impl Into<String>,
        command: impl Into<ShellLine>,
    ) {
        self.steps.push(PlannedStep {
            phase,
            name: name.into(),
            command: command.into(),
        });
    }

    pub fn require_repeat_model(&self) -> Result<&Path> {
        self.repeat_model
            .as_deref()
            .ok_or_else(|| anyhow!("Repeat model must be planned before it is used"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasecall_core::{CommandError, MockFileSystem};

    fn config() -> PipelineConfig {
        PipelineConfig::new(4, "ref.fa")
            .with_sample_input("s.bam")
            .with_model_bundle("/models/b")
            .with_tmp_base("/tmp/run")
    }

    #[test]
    fn test_artifact_names() {
        let names = ArtifactNames::new(Path::new("/tmp/run")).unwrap();
        assert_eq!(names.diploid_vcf, PathBuf::from("/tmp/run/out_diploid.vcf.gz"));
        assert_eq!(names.hap_pattern.nohp(2), PathBuf::from("/tmp/run/out_hap2_nohp_tmp.vcf.gz"));
        assert_eq!(names.hap_patch(1), PathBuf::from("/tmp/run/out_hap1_patch_tmp.vcf.gz"));
        assert_eq!(names.hap_final(2), PathBuf::from("/tmp/run/out_hap2_final_tmp.vcf.gz"));
    }

    fn context(config: PipelineConfig) -> Result<PlanContext> {
        PlanContext::new(config, Technology::HiFi, "out.vcf.gz", Arc::new(MockFileSystem::new()))
    }

    #[test]
    fn test_context_scratch_under_tmp_base() {
        let context = context(config()).unwrap();
        assert_eq!(context.scratch.base(), Path::new("/tmp/run"));
        assert!(!context.emit_gvcf);
        assert!(context.steps.is_empty());
    }

    #[test]
    fn test_context_requires_tmp_base() {
        let config = PipelineConfig {
            tmp_base: None,
            ..config()
        };
        let err = context(config).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<CommandError>(),
            Some(CommandError::MissingConfig { key: "tmp_base" })
        ));
    }

    #[test]
    fn test_context_rejects_invalid_config() {
        let config = PipelineConfig { cores: 0, ..config() };
        assert!(context(config).is_err());
    }
}
