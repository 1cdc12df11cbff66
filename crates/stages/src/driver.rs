//! Common `sentieon driver` prefix shared by most stages.

use crate::SENTIEON;
use phasecall_core::{ArgBuilder, Command, CommandError, PathLike, PipelineConfig};
use tracing::debug;

/// Builds `sentieon driver -t <cores> -r <reference>` followed, in this
/// order, by `--interval <bed>`, `-i <sample>` and `--read_filter <spec>`.
///
/// `interval` is the region restriction the caller picked for this stage
/// (for example `config.regions` or a phased bed); `None` omits the clause.
/// The result still needs an `--algo` clause to be a useful invocation.
pub fn sentieon_driver(
    config: &PipelineConfig,
    interval: Option<&PathLike>,
    skip_sample_input: bool,
) -> Result<Command, CommandError> {
    config.validate()?;

    let mut cmd = Command::new(SENTIEON)
        .arg("driver")
        .opt("-t", &config.cores)
        .opt("-r", &config.reference)
        .opt_some("--interval", interval);

    if !skip_sample_input {
        cmd = cmd.opt("-i", config.require_sample_input()?);
    }

    let cmd = cmd.opt_some("--read_filter", config.read_filter());
    debug!(command = %cmd, "Built driver prefix");
    Ok(cmd)
}
