use super::context::PlanContext;
use super::phase_trait::PlanPhase;
use super::phases::{
    diploid::DiploidCallPhase, gvcf_combine::GvcfCombinePhase, haploid::HaploidCallPhase,
    haploid_patch::HaploidPatchPhase, merge::MergePhase, phase::PhasePhase,
    regions::RegionSubtractPhase, repeat_model::RepeatModelPhase, unphased::UnphasedCallPhase,
};
use super::plan::Plan;
use anyhow::{Context, Result};
use phasecall_stages::gvcf_path_for;
use std::time::Instant;
use tracing::{debug, info};

pub struct PipelinePlanner {
    phases: Vec<Box<dyn PlanPhase>>,
}

impl Default for PipelinePlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelinePlanner {
    pub fn new() -> Self {
        Self {
            phases: vec![
                Box::new(DiploidCallPhase),
                Box::new(PhasePhase),
                Box::new(RegionSubtractPhase),
                Box::new(RepeatModelPhase),
                Box::new(HaploidCallPhase),
                Box::new(HaploidPatchPhase),
                Box::new(UnphasedCallPhase),
                Box::new(MergePhase),
                Box::new(GvcfCombinePhase),
            ],
        }
    }

    pub fn phase_names(&self) -> Vec<&'static str> {
        self.phases.iter().map(|phase| phase.name()).collect()
    }

    /// Runs every applicable phase against `context` and collects the steps
    /// they recorded. Nothing is executed.
    pub fn plan(&self, context: &mut PlanContext) -> Result<Plan> {
        let start = Instant::now();
        info!(
            technology = %context.tech,
            output = %context.output_vcf.display(),
            gvcf = context.emit_gvcf,
            "Starting pipeline planning"
        );

        let output_gvcf = if context.emit_gvcf {
            Some(gvcf_path_for(&context.output_vcf).context("Invalid output VCF name")?)
        } else {
            None
        };

        for phase in &self.phases {
            let phase_name = phase.name();
            if !phase.applies(context) {
                debug!(phase = %phase_name, "Skipping phase");
                continue;
            }

            info!(phase = %phase_name, "Starting phase");
            let before = context.steps.len();
            phase
                .plan(context)
                .with_context(|| format!("Phase {} failed", phase_name))?;

            info!(
                phase = %phase_name,
                steps = context.steps.len() - before,
                "Phase complete"
            );
        }

        info!(
            steps = context.steps.len(),
            total_time_ms = start.elapsed().as_millis(),
            "Planning complete"
        );

        Ok(Plan {
            technology: context.tech,
            output_vcf: context.output_vcf.clone(),
            output_gvcf,
            steps: std::mem::take(&mut context.steps),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phasecall_core::{MockFileSystem, PipelineConfig, ScratchScope, Technology};
    use std::path::Path;
    use std::sync::Arc;

    const FAI: &str = "chr1\t248956422\t112\t70\t71\nchr2\t242193529\t252513167\t70\t71\n";

    fn config() -> PipelineConfig {
        PipelineConfig::new(16, "/ref/hg38.fa")
            .with_sample_input("/data/sample.bam")
            .with_model_bundle("/models/lr.bundle")
            .with_tmp_base("/scratch")
            .with_vcf_mod_py("/opt/vcf_mod.py")
            .with_gvcf_combine_py("/opt/gvcf_combine.py")
    }

    fn fs() -> Arc<MockFileSystem> {
        let fs = MockFileSystem::new();
        fs.add_file("/ref/hg38.fa.fai", FAI);
        fs.add_dir("/scratch");
        Arc::new(fs)
    }

    fn context(config: PipelineConfig, tech: Technology, gvcf: bool) -> PlanContext {
        PlanContext::new(config, tech, "/out/sample.vcf.gz", fs())
            .unwrap()
            .with_gvcf(gvcf)
            .with_scratch(ScratchScope::with_tag("/scratch", "run1"))
    }

    fn phases(plan: &Plan) -> Vec<&'static str> {
        let mut seen: Vec<&'static str> = Vec::new();
        for step in &plan.steps {
            if seen.last() != Some(&step.phase) {
                seen.push(step.phase);
            }
        }
        seen
    }

    #[test]
    fn test_phase_order() {
        let plan = PipelinePlanner::new()
            .plan(&mut context(config(), Technology::HiFi, true))
            .unwrap();

        assert_eq!(phases(&plan), PipelinePlanner::new().phase_names());
        assert_eq!(
            plan.output_gvcf.as_deref(),
            Some(Path::new("/out/sample.g.vcf.gz"))
        );
    }

    #[test]
    fn test_gvcf_phase_skipped_without_gvcf() {
        let plan = PipelinePlanner::new()
            .plan(&mut context(config(), Technology::HiFi, false))
            .unwrap();

        assert_eq!(plan.steps_in("GvcfCombinePhase").count(), 0);
        assert!(plan.output_gvcf.is_none());
        assert!(!plan.to_script().contains("--emit_mode gvcf"));
        let last = plan.steps.last().unwrap();
        assert_eq!(last.phase, "MergePhase");
        assert_eq!(
            last.command.first().args().last().map(String::as_str),
            Some("/out/sample.vcf.gz")
        );
    }

    #[test]
    fn test_gvcf_needs_vcf_gz_output() {
        let mut context = PlanContext::new(config(), Technology::HiFi, "/out/sample.vcf", fs())
            .unwrap()
            .with_gvcf(true);
        assert!(PipelinePlanner::new().plan(&mut context).is_err());
    }

    #[test]
    fn test_failing_phase_is_named() {
        let config = config().with_regions("/data/roi.bed");
        let mut context = PlanContext::new(
            PipelineConfig {
                vcf_mod_py: None,
                ..config
            },
            Technology::Ont,
            "/out/sample.vcf.gz",
            fs(),
        )
        .unwrap();

        let err = PipelinePlanner::new().plan(&mut context).unwrap_err();
        assert_eq!(err.to_string(), "Phase HaploidPatchPhase failed");
    }

    #[test]
    fn test_context_drained_after_planning() {
        let mut context = context(config(), Technology::Ont, false);
        let plan = PipelinePlanner::new().plan(&mut context).unwrap();
        assert!(!plan.is_empty());
        assert!(context.steps.is_empty());
    }
}
