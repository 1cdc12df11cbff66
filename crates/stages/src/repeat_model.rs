use crate::driver::sentieon_driver;
use phasecall_core::{ArgBuilder, Command, CommandError, PathLike, PipelineConfig};
use std::path::{Path, PathBuf};
use tracing::debug;

const MIN_MAP_QUAL: u32 = 1;
const MIN_GROUP_COUNT: u32 = 10_000;
const REPEAT_EXTENSION: u32 = 5;
const MAX_REPEAT_UNIT_SIZE: u32 = 2;
const MIN_REPEAT_COUNT: u32 = 6;

#[derive(Debug, Clone)]
pub struct RepeatModelCommand {
    pub command: Command,
    /// Where the trained model lands, for DNAscopeHP's `--pcr_indel_model`.
    pub model: PathBuf,
}

/// `--algo RepeatModel` over phased reads inside the phased regions.
pub fn repeat_model(
    phased_bed: &Path,
    phased_ext: &Path,
    config: &PipelineConfig,
) -> Result<RepeatModelCommand, CommandError> {
    let model = config.require_tmp_base()?.join("out_repeat.model");
    let interval = PathLike::from(phased_bed);
    let phased_filter = format!(
        "PhasedReadFilter,phased_vcf={},phase_select=tag",
        phased_ext.display()
    );

    let command = sentieon_driver(config, Some(&interval), false)?
        .opt("--read_filter", &phased_filter)
        .arg("--algo")
        .arg("RepeatModel")
        .arg("--phased")
        .opt("--min_map_qual", &MIN_MAP_QUAL)
        .opt("--min_group_count", &MIN_GROUP_COUNT)
        .opt("--read_flag_mask", "drop=supplementary")
        .opt("--repeat_extension", &REPEAT_EXTENSION)
        .opt("--max_repeat_unit_size", &MAX_REPEAT_UNIT_SIZE)
        .opt("--min_repeat_count", &MIN_REPEAT_COUNT)
        .arg(&model);

    debug!(command = %command, model = %model.display(), "Built RepeatModel command");
    Ok(RepeatModelCommand { command, model })
}
