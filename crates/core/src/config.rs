use crate::error::CommandError;
use crate::fs::FileSystem;
use crate::path::PathLike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const DEFAULT_PHASE_MAX_DEPTH: u32 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    #[error("Invalid sequencing technology: {0}. Valid options: HiFi, ONT")]
    InvalidTechnology(String),

    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}

/// Shared parameters every stage builder reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Thread count handed to every tool
    pub cores: u32,

    /// Reference FASTA; `<reference>.fai` must sit next to it
    pub reference: PathLike,

    /// Aligned reads (BAM/CRAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_input: Option<PathLike>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbsnp: Option<PathLike>,

    /// Directory holding the model files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_bundle: Option<PathBuf>,

    /// Scratch directory for derived files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmp_base: Option<PathBuf>,

    /// Region-of-interest bed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<PathLike>,

    /// Passed verbatim to `--read_filter`
    #[serde(
        default,
        rename = "read-filter",
        alias = "read_filter",
        skip_serializing_if = "Option::is_none"
    )]
    pub read_filter: Option<String>,

    #[serde(default = "default_phase_max_depth")]
    pub phase_max_depth: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcf_mod_py: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gvcf_combine_py: Option<PathBuf>,
}

fn default_phase_max_depth() -> u32 {
    DEFAULT_PHASE_MAX_DEPTH
}

impl PipelineConfig {
    pub fn new(cores: u32, reference: impl Into<PathLike>) -> Self {
        Self {
            cores,
            reference: reference.into(),
            sample_input: None,
            dbsnp: None,
            model_bundle: None,
            tmp_base: None,
            regions: None,
            read_filter: None,
            phase_max_depth: DEFAULT_PHASE_MAX_DEPTH,
            vcf_mod_py: None,
            gvcf_combine_py: None,
        }
    }

    pub fn with_sample_input(mut self, sample_input: impl Into<PathLike>) -> Self {
        self.sample_input = Some(sample_input.into());
        self
    }

    pub fn with_dbsnp(mut self, dbsnp: impl Into<PathLike>) -> Self {
        self.dbsnp = Some(dbsnp.into());
        self
    }

    pub fn with_model_bundle(mut self, model_bundle: impl Into<PathBuf>) -> Self {
        self.model_bundle = Some(model_bundle.into());
        self
    }

    pub fn with_tmp_base(mut self, tmp_base: impl Into<PathBuf>) -> Self {
        self.tmp_base = Some(tmp_base.into());
        self
    }

    pub fn with_regions(mut self, regions: impl Into<PathLike>) -> Self {
        self.regions = Some(regions.into());
        self
    }

    pub fn with_read_filter(mut self, read_filter: impl Into<String>) -> Self {
        self.read_filter = Some(read_filter.into());
        self
    }

    pub fn without_read_filter(mut self) -> Self {
        self.read_filter = None;
        self
    }

    pub fn with_phase_max_depth(mut self, depth: u32) -> Self {
        self.phase_max_depth = depth;
        self
    }

    pub fn with_vcf_mod_py(mut self, script: impl Into<PathBuf>) -> Self {
        self.vcf_mod_py = Some(script.into());
        self
    }

    pub fn with_gvcf_combine_py(mut self, script: impl Into<PathBuf>) -> Self {
        self.gvcf_combine_py = Some(script.into());
        self
    }

    /// Load configuration from a YAML file. Not validated, so environment
    /// overrides can still be applied before [`PipelineConfig::validate`].
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            field: "config".to_string(),
            error: e.to_string(),
        })
    }

    /// Overrides fields from `PHASECALL_*` environment variables when set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(cores) = env::var("PHASECALL_CORES") {
            self.cores = cores.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::ParseError {
                    field: "PHASECALL_CORES".to_string(),
                    error: e.to_string(),
                }
            })?;
            debug!(cores = self.cores, "Thread count overridden from PHASECALL_CORES");
        }

        if let Ok(tmp_base) = env::var("PHASECALL_TMP_BASE") {
            debug!(tmp_base = %tmp_base, "Scratch directory overridden from PHASECALL_TMP_BASE");
            self.tmp_base = Some(PathBuf::from(tmp_base));
        }

        if let Ok(read_filter) = env::var("PHASECALL_READ_FILTER") {
            debug!(read_filter = %read_filter, "Read filter overridden from PHASECALL_READ_FILTER");
            self.read_filter = Some(read_filter);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cores == 0 {
            return Err(ConfigError::ValidationFailed(
                "cores must be at least 1".to_string(),
            ));
        }

        if self.reference.resolve().as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "reference must not be empty".to_string(),
            ));
        }

        if self.phase_max_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "phase_max_depth must be at least 1".to_string(),
            ));
        }

        if let Some(filter) = &self.read_filter {
            if filter.split_whitespace().count() > 1 {
                return Err(ConfigError::ValidationFailed(format!(
                    "read-filter must be a single token, got '{}'",
                    filter
                )));
            }
        }

        Ok(())
    }

    /// `<reference>.fai`
    pub fn reference_index(&self) -> PathBuf {
        let mut index = OsString::from(self.reference.resolve().as_os_str());
        index.push(".fai");
        PathBuf::from(index)
    }

    /// Input files that should exist before a run but do not: the reference,
    /// its index, the sample input and the model bundle directory.
    pub fn missing_inputs(&self, fs: &dyn FileSystem) -> Vec<PathBuf> {
        let mut files = vec![self.reference.resolve().to_path_buf(), self.reference_index()];
        if let Some(sample) = &self.sample_input {
            files.push(sample.resolve().to_path_buf());
        }

        let mut missing: Vec<PathBuf> = files.into_iter().filter(|f| !fs.is_file(f)).collect();
        if let Some(bundle) = &self.model_bundle {
            if !fs.is_dir(bundle) {
                missing.push(bundle.clone());
            }
        }
        missing
    }

    /// Read filter, treating an empty string as absent.
    pub fn read_filter(&self) -> Option<&str> {
        self.read_filter.as_deref().filter(|f| !f.is_empty())
    }

    pub fn require_sample_input(&self) -> Result<&PathLike, CommandError> {
        self.sample_input
            .as_ref()
            .ok_or(CommandError::MissingConfig { key: "sample_input" })
    }

    pub fn require_model_bundle(&self) -> Result<&Path, CommandError> {
        self.model_bundle
            .as_deref()
            .ok_or(CommandError::MissingConfig { key: "model_bundle" })
    }

    pub fn require_tmp_base(&self) -> Result<&Path, CommandError> {
        self.tmp_base
            .as_deref()
            .ok_or(CommandError::MissingConfig { key: "tmp_base" })
    }

    pub fn require_vcf_mod_py(&self) -> Result<&Path, CommandError> {
        self.vcf_mod_py
            .as_deref()
            .ok_or(CommandError::MissingConfig { key: "vcf_mod_py" })
    }

    pub fn require_gvcf_combine_py(&self) -> Result<&Path, CommandError> {
        self.gvcf_combine_py
            .as_deref()
            .ok_or(CommandError::MissingConfig {
                key: "gvcf_combine_py",
            })
    }

    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();

        map.insert("cores".to_string(), self.cores.to_string());
        map.insert(
            "reference".to_string(),
            self.reference.display().to_string(),
        );
        if let Some(ref sample) = self.sample_input {
            map.insert("sample_input".to_string(), sample.display().to_string());
        }
        if let Some(ref dbsnp) = self.dbsnp {
            map.insert("dbsnp".to_string(), dbsnp.display().to_string());
        }
        if let Some(ref bundle) = self.model_bundle {
            map.insert("model_bundle".to_string(), bundle.display().to_string());
        }
        if let Some(ref tmp) = self.tmp_base {
            map.insert("tmp_base".to_string(), tmp.display().to_string());
        }
        if let Some(ref regions) = self.regions {
            map.insert("regions".to_string(), regions.display().to_string());
        }
        if let Some(filter) = self.read_filter() {
            map.insert("read-filter".to_string(), filter.to_string());
        }
        map.insert(
            "phase_max_depth".to_string(),
            self.phase_max_depth.to_string(),
        );

        map
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        for (key, value) in self.to_display_map() {
            writeln!(f, "  {}: {}", key, value)?;
        }
        Ok(())
    }
}
