//! Output formatting for plans and configurations
//!
//! JSON and YAML serialize the plan as-is, with every command rendered to its
//! shell string. `Script` emits a runnable bash script; `Human` groups steps
//! by phase.

use anyhow::{Context, Result};
use phasecall_core::PipelineConfig;
use phasecall_pipeline::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    Yaml,
    /// Human-readable formatted text
    Human,
    /// Bash script, one command per step
    Script,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_plan(&self, plan: &Plan) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(plan).context("Failed to serialize plan to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(plan).context("Failed to serialize plan to YAML")
            }
            OutputFormat::Human => Ok(self.format_plan_human(plan)),
            OutputFormat::Script => Ok(plan.to_script()),
        }
    }

    pub fn format_config(&self, config: &PipelineConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(config)
                .context("Failed to serialize configuration to JSON"),
            OutputFormat::Yaml | OutputFormat::Script => {
                serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")
            }
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_plan_human(&self, plan: &Plan) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "DNAscope {} plan: {} steps\n",
            plan.technology,
            plan.len()
        ));
        output.push_str(&format!("Output VCF:  {}\n", plan.output_vcf.display()));
        if let Some(gvcf) = &plan.output_gvcf {
            output.push_str(&format!("Output gVCF: {}\n", gvcf.display()));
        }

        let mut current_phase = "";
        for (i, step) in plan.steps.iter().enumerate() {
            if step.phase != current_phase {
                current_phase = step.phase;
                output.push_str(&format!("\n{}\n", current_phase));
            }
            output.push_str(&format!("  {:>2}. {}\n", i + 1, step.name));
            output.push_str(&format!("      {}\n", step.command));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasecall_core::{ArgBuilder, Command, Technology};
    use phasecall_pipeline::PlannedStep;
    use std::path::PathBuf;

    fn plan() -> Plan {
        let combine = Command::new("sentieon")
            .arg("pyexec")
            .arg("gvcf_combine.py")
            .pipe(Command::new("sentieon").arg("util").arg("vcfconvert"));

        Plan {
            technology: Technology::Ont,
            output_vcf: PathBuf::from("out.vcf.gz"),
            output_gvcf: Some(PathBuf::from("out.g.vcf.gz")),
            steps: vec![
                PlannedStep {
                    phase: "DiploidCallPhase",
                    name: "dnascope".to_string(),
                    command: Command::new("sentieon").arg("driver").into(),
                },
                PlannedStep {
                    phase: "GvcfCombinePhase",
                    name: "gvcf_combine".to_string(),
                    command: combine,
                },
            ],
        }
    }

    #[test]
    fn test_human_plan() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_plan(&plan())
            .unwrap();

        assert!(output.starts_with("DNAscope ONT plan: 2 steps\n"));
        assert!(output.contains("Output gVCF: out.g.vcf.gz"));
        assert!(output.contains("\nDiploidCallPhase\n   1. dnascope\n      sentieon driver\n"));
        assert!(output.contains("sentieon pyexec gvcf_combine.py | sentieon util vcfconvert"));
    }

    #[test]
    fn test_json_plan() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_plan(&plan())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["technology"], "ONT");
        assert_eq!(value["output_gvcf"], "out.g.vcf.gz");
        assert_eq!(value["steps"][0]["command"], "sentieon driver");
    }

    #[test]
    fn test_yaml_plan() {
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format_plan(&plan())
            .unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(value["steps"][1]["phase"].as_str(), Some("GvcfCombinePhase"));
    }

    #[test]
    fn test_script_plan() {
        let output = OutputFormatter::new(OutputFormat::Script)
            .format_plan(&plan())
            .unwrap();
        assert!(output.starts_with("#!/usr/bin/env bash"));
        assert!(output.contains("\nsentieon driver\n"));
    }

    #[test]
    fn test_config_formats() {
        let config = PipelineConfig::new(8, "/ref/hg38.fa").with_read_filter("F,x=1");

        let human = OutputFormatter::new(OutputFormat::Human)
            .format_config(&config)
            .unwrap();
        assert!(human.starts_with("Pipeline Configuration:"));
        assert!(human.contains("cores: 8"));

        let yaml = OutputFormatter::new(OutputFormat::Yaml)
            .format_config(&config)
            .unwrap();
        assert_eq!(PipelineConfig::from_yaml_str(&yaml).unwrap(), config);

        let json = OutputFormatter::new(OutputFormat::Json)
            .format_config(&config)
            .unwrap();
        assert!(json.contains("\"read-filter\": \"F,x=1\""));
    }
}
