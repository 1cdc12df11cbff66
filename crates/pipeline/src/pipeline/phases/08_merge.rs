use crate::pipeline::context::PlanContext;
use crate::pipeline::phase_trait::PlanPhase;
use anyhow::Result;
use phasecall_stages::vcf_mod_merge;

pub struct MergePhase;

impl PlanPhase for MergePhase {
    fn name(&self) -> &'static str {
        "MergePhase"
    }

    fn plan(&self, context: &mut PlanContext) -> Result<()> {
        let names = &context.artifacts;
        let cmd = vcf_mod_merge(
            &names.hap_final(1),
            &names.hap_final(2),
            &names.unphased_vcf,
            &names.phased_vcf,
            &names.phased_bed,
            &context.output_vcf,
            &context.config,
        )?;

        context.push(self.name(), "merge", cmd);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::phases::test_support::context;
    use phasecall_core::Technology;

    #[test]
    fn test_merge_writes_output() {
        let mut context = context(Technology::HiFi);
        MergePhase.plan(&mut context).unwrap();

        assert_eq!(
            context.steps[0].command.to_string(),
            "sentieon pyexec /opt/vcf_mod.py -t 8 merge --hap1 /tmp/run/out_hap1_final_tmp.vcf.gz \
             --hap2 /tmp/run/out_hap2_final_tmp.vcf.gz --unphased /tmp/run/out_unphased.vcf.gz \
             --phased /tmp/run/out_diploid_phased.vcf.gz --bed /tmp/run/out_diploid_phased.bed \
             /out/final.vcf.gz"
        );
    }
}
