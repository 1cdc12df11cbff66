use phasecall_core::{ShellLine, Technology};
use serde::Serialize;
use std::path::PathBuf;

/// One shell line of the plan, tagged with the phase that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
    pub phase: &'static str,
    pub name: String,
    pub command: ShellLine,
}

/// Ordered shell lines that turn the configured sample into the output VCF.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub technology: Technology,
    pub output_vcf: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_gvcf: Option<PathBuf>,
    pub steps: Vec<PlannedStep>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps_in(&self, phase: &str) -> impl Iterator<Item = &PlannedStep> + '_ {
        let phase = phase.to_string();
        self.steps.iter().filter(move |step| step.phase == phase)
    }

    /// The plan as a shell script, one line per step.
    pub fn to_script(&self) -> String {
        let mut script = String::from("#!/usr/bin/env bash\nset -euo pipefail\n");
        for step in &self.steps {
            script.push_str(&format!("\n# {}: {}\n{}\n", step.phase, step.name, step.command));
        }
        script
    }
}
