//! `sentieon pyexec` stages that patch, merge and combine VCFs.

use crate::SENTIEON;
use phasecall_core::{ArgBuilder, Command, CommandError, PipelineConfig, ShellLine, Technology};
use std::path::{Path, PathBuf};
use tracing::debug;

const NOHP_TAG: &str = "nohp_";
const VCF_SUFFIX: &str = ".vcf.gz";
const GVCF_SUFFIX: &str = ".g.vcf.gz";

fn pyexec(script: &Path, config: &PipelineConfig) -> Result<Command, CommandError> {
    config.validate()?;

    Ok(Command::new(SENTIEON)
        .arg("pyexec")
        .arg(script)
        .opt("-t", &config.cores))
}

/// Per-haplotype output name template with `{hap}` and `{tag}` placeholders,
/// e.g. `out_hap{hap}_{tag}tmp.vcf.gz`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HaplotypePattern(String);

impl HaplotypePattern {
    pub fn new(template: impl Into<String>) -> Result<Self, CommandError> {
        let template = template.into();
        for placeholder in ["{hap}", "{tag}"] {
            if !template.contains(placeholder) {
                return Err(CommandError::InvalidArtifact {
                    name: "haplotype pattern",
                    reason: format!("'{}' has no {} placeholder", template, placeholder),
                });
            }
        }
        Ok(Self(template))
    }

    pub fn render(&self, hap: u8, tag: &str) -> PathBuf {
        PathBuf::from(
            self.0
                .replace("{hap}", &hap.to_string())
                .replace("{tag}", tag),
        )
    }

    /// Output of the haploid DNAscope pass (before the HP patch).
    pub fn nohp(&self, hap: u8) -> PathBuf {
        self.render(hap, NOHP_TAG)
    }

    /// Output of the haploid DNAscopeHP pass.
    pub fn hp(&self, hap: u8) -> PathBuf {
        self.render(hap, "")
    }
}

/// Merges DNAscope and DNAscopeHP haploid calls.
///
/// HiFi patches against the per-haplotype non-HP calls; ONT patches against
/// the phased VCF, which is then required.
pub fn haploid_patch(
    hap1_patch: &Path,
    hap2_patch: &Path,
    pattern: &HaplotypePattern,
    tech: Technology,
    phased_vcf: Option<&Path>,
    config: &PipelineConfig,
) -> Result<Command, CommandError> {
    let mut cmd = pyexec(config.require_vcf_mod_py()?, config)?
        .arg("haploid_patch")
        .opt("--patch1", hap1_patch)
        .opt("--patch2", hap2_patch);

    cmd = match tech {
        Technology::HiFi => cmd
            .opt("--hap1", &pattern.nohp(1))
            .opt("--hap2", &pattern.nohp(2)),
        Technology::Ont => {
            let phased = phased_vcf.ok_or(CommandError::MissingArtifact { name: "phased_vcf" })?;
            cmd.opt("--phased", phased)
        }
    };

    let cmd = cmd
        .opt("--hap1_hp", &pattern.hp(1))
        .opt("--hap2_hp", &pattern.hp(2));

    debug!(command = %cmd, tech = %tech, "Built haploid_patch command");
    Ok(cmd)
}

/// Patches a DNAscope VCF with the matching DNAscopeHP VCF.
pub fn vcf_mod_patch(
    out_vcf: &Path,
    vcf: &Path,
    vcf_hp: &Path,
    config: &PipelineConfig,
) -> Result<Command, CommandError> {
    let cmd = pyexec(config.require_vcf_mod_py()?, config)?
        .arg("patch")
        .opt("--vcf", vcf)
        .opt("--vcf_hp", vcf_hp)
        .arg(out_vcf);

    debug!(command = %cmd, "Built patch command");
    Ok(cmd)
}

/// Path of the compressed gVCF written next to `out_vcf`.
pub fn gvcf_path_for(out_vcf: &Path) -> Result<PathBuf, CommandError> {
    let text = out_vcf.to_string_lossy();
    let stem = text
        .strip_suffix(VCF_SUFFIX)
        .ok_or_else(|| CommandError::InvalidArtifact {
            name: "out_vcf",
            reason: format!("'{}' does not end in {}", text, VCF_SUFFIX),
        })?;
    Ok(PathBuf::from(format!("{}{}", stem, GVCF_SUFFIX)))
}

/// Combines a gVCF into `out_vcf` and pipes the stream through
/// `vcfconvert` to also write the compressed gVCF.
pub fn gvcf_combine(
    gvcf: &Path,
    out_vcf: &Path,
    config: &PipelineConfig,
) -> Result<ShellLine, CommandError> {
    let out_gvcf = gvcf_path_for(out_vcf)?;

    let line = pyexec(config.require_gvcf_combine_py()?, config)?
        .arg(gvcf)
        .arg(out_vcf)
        .arg("-")
        .pipe(
            Command::new(SENTIEON)
                .arg("util")
                .arg("vcfconvert")
                .arg("-")
                .arg(&out_gvcf),
        );

    debug!(command = %line, "Built gVCF combine command");
    Ok(line)
}

/// Merges both haplotypes and the unphased calls into the final VCF.
pub fn vcf_mod_merge(
    hap1_vcf: &Path,
    hap2_vcf: &Path,
    unphased_vcf: &Path,
    phased_vcf: &Path,
    phased_bed: &Path,
    out_vcf: &Path,
    config: &PipelineConfig,
) -> Result<Command, CommandError> {
    let cmd = pyexec(config.require_vcf_mod_py()?, config)?
        .arg("merge")
        .opt("--hap1", hap1_vcf)
        .opt("--hap2", hap2_vcf)
        .opt("--unphased", unphased_vcf)
        .opt("--phased", phased_vcf)
        .opt("--bed", phased_bed)
        .arg(out_vcf);

    debug!(command = %cmd, "Built merge command");
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn config() -> PipelineConfig {
        PipelineConfig::new(2, "ref.fa")
            .with_vcf_mod_py("vcf_mod.py")
            .with_gvcf_combine_py("gvcf_combine.py")
    }

    fn pattern() -> HaplotypePattern {
        HaplotypePattern::new("out_hap{hap}_{tag}tmp.vcf.gz").unwrap()
    }

    #[test]
    fn test_pattern_rendering() {
        let pattern = pattern();
        assert_eq!(pattern.nohp(1), PathBuf::from("out_hap1_nohp_tmp.vcf.gz"));
        assert_eq!(pattern.hp(2), PathBuf::from("out_hap2_tmp.vcf.gz"));
    }

    #[parameterized(
        no_hap = { "out_{tag}.vcf.gz" },
        no_tag = { "out_hap{hap}.vcf.gz" },
        neither = { "out.vcf.gz" },
    )]
    fn test_pattern_requires_placeholders(template: &str) {
        assert!(matches!(
            HaplotypePattern::new(template),
            Err(CommandError::InvalidArtifact { .. })
        ));
    }

    #[test]
    fn test_haploid_patch_hifi() {
        let cmd = haploid_patch(
            Path::new("h1.vcf.gz"),
            Path::new("h2.vcf.gz"),
            &pattern(),
            Technology::HiFi,
            None,
            &config(),
        )
        .unwrap();

        assert_eq!(
            cmd.to_string(),
            "sentieon pyexec vcf_mod.py -t 2 haploid_patch --patch1 h1.vcf.gz --patch2 h2.vcf.gz \
             --hap1 out_hap1_nohp_tmp.vcf.gz --hap2 out_hap2_nohp_tmp.vcf.gz \
             --hap1_hp out_hap1_tmp.vcf.gz --hap2_hp out_hap2_tmp.vcf.gz"
        );
        assert!(!cmd.contains("--phased"));
    }

    #[test]
    fn test_haploid_patch_ont() {
        let cmd = haploid_patch(
            Path::new("h1.vcf.gz"),
            Path::new("h2.vcf.gz"),
            &pattern(),
            Technology::Ont,
            Some(Path::new("ph.vcf")),
            &config(),
        )
        .unwrap();

        assert!(!cmd.contains("--hap1"));
        assert!(!cmd.contains("--hap2"));
        assert_eq!(cmd.value_of("--phased"), Some("ph.vcf"));
        assert_eq!(cmd.value_of("--hap1_hp"), Some("out_hap1_tmp.vcf.gz"));
        assert_eq!(cmd.value_of("--hap2_hp"), Some("out_hap2_tmp.vcf.gz"));
    }

    #[test]
    fn test_haploid_patch_ont_needs_phased_vcf() {
        let err = haploid_patch(
            Path::new("h1"),
            Path::new("h2"),
            &pattern(),
            Technology::Ont,
            None,
            &config(),
        )
        .unwrap_err();

        assert!(matches!(err, CommandError::MissingArtifact { name: "phased_vcf" }));
    }

    #[test]
    fn test_haploid_patch_from_tag() {
        let tech: Result<Technology, _> = "Illumina".parse();
        assert!(tech.is_err());

        let tech: Technology = "HiFi".parse().unwrap();
        let cmd = haploid_patch(Path::new("a"), Path::new("b"), &pattern(), tech, None, &config())
            .unwrap();
        assert!(cmd.contains("--hap1"));
    }

    #[test]
    fn test_vcf_mod_requires_script() {
        let config = PipelineConfig::new(2, "ref.fa");
        let err =
            vcf_mod_patch(Path::new("o"), Path::new("v"), Path::new("h"), &config).unwrap_err();
        assert!(matches!(err, CommandError::MissingConfig { key: "vcf_mod_py" }));
    }

    #[test]
    fn test_zero_cores_rejected_by_every_pyexec_stage() {
        let config = PipelineConfig { cores: 0, ..config() };
        let (a, b) = (Path::new("a.vcf.gz"), Path::new("b.vcf.gz"));

        let results = [
            haploid_patch(a, b, &pattern(), Technology::HiFi, None, &config).map(|_| ()),
            vcf_mod_patch(a, a, b, &config).map(|_| ()),
            gvcf_combine(a, b, &config).map(|_| ()),
            vcf_mod_merge(a, b, a, b, a, b, &config).map(|_| ()),
        ];
        for result in results {
            assert!(matches!(result, Err(CommandError::Config(_))));
        }
    }

    #[test]
    fn test_patch_command() {
        let cmd = vcf_mod_patch(
            Path::new("patched.vcf.gz"),
            Path::new("ds.vcf.gz"),
            Path::new("hp.vcf.gz"),
            &config(),
        )
        .unwrap();

        assert_eq!(
            cmd.to_string(),
            "sentieon pyexec vcf_mod.py -t 2 patch --vcf ds.vcf.gz --vcf_hp hp.vcf.gz patched.vcf.gz"
        );
    }

    #[test]
    fn test_gvcf_combine_single_pipe() {
        let line = gvcf_combine(
            Path::new("tmp.g.vcf.gz"),
            Path::new("/out/sample.vcf.gz"),
            &config(),
        )
        .unwrap();

        assert_eq!(line.pipe_count(), 1);
        assert_eq!(line.to_string().matches('|').count(), 1);
        assert_eq!(
            line.to_string(),
            "sentieon pyexec gvcf_combine.py -t 2 tmp.g.vcf.gz /out/sample.vcf.gz - \
             | sentieon util vcfconvert - /out/sample.g.vcf.gz"
        );
    }

    #[test]
    fn test_gvcf_path_only_replaces_suffix() {
        assert_eq!(
            gvcf_path_for(Path::new("/data/x.vcf.gz.d/out.vcf.gz")).unwrap(),
            PathBuf::from("/data/x.vcf.gz.d/out.g.vcf.gz")
        );
        assert!(gvcf_path_for(Path::new("out.vcf")).is_err());
    }

    #[test]
    fn test_gvcf_combine_requires_script() {
        let config = PipelineConfig::new(2, "ref.fa");
        let err = gvcf_combine(Path::new("g"), Path::new("o.vcf.gz"), &config).unwrap_err();
        assert!(matches!(err, CommandError::MissingConfig { key: "gvcf_combine_py" }));
    }

    #[test]
    fn test_merge_command() {
        let cmd = vcf_mod_merge(
            Path::new("h1.vcf.gz"),
            Path::new("h2.vcf.gz"),
            Path::new("unphased.vcf.gz"),
            Path::new("phased.vcf.gz"),
            Path::new("phased.bed"),
            Path::new("out.vcf.gz"),
            &config(),
        )
        .unwrap();

        assert_eq!(
            cmd.to_string(),
            "sentieon pyexec vcf_mod.py -t 2 merge --hap1 h1.vcf.gz --hap2 h2.vcf.gz \
             --unphased unphased.vcf.gz --phased phased.vcf.gz --bed phased.bed out.vcf.gz"
        );
    }
}
