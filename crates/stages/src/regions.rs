//! Complement of the phased regions, for calling the unphased remainder.

use phasecall_core::{
    ArgBuilder, Command, CommandError, FileSystem, MaterializedFile, PathLike, PipelineConfig,
    ScratchScope,
};
use std::path::Path;
use tracing::{debug, info};

/// `bedtools subtract -a <regions> -b <phased_bed> > <unphased_bed>`
///
/// Without `regions_bed` the whole genome is used: one `[0, length)` row per
/// contig of `<reference>.fai`, written to a file named by `scratch`. The
/// scope must sit in the configured `tmp_base`.
pub fn bedtools_subtract(
    regions_bed: Option<&PathLike>,
    phased_bed: &Path,
    unphased_bed: &Path,
    config: &PipelineConfig,
    scratch: &ScratchScope,
    fs: &dyn FileSystem,
) -> Result<Command, CommandError> {
    let regions = match regions_bed {
        Some(bed) => bed.clone(),
        None => {
            let tmp_base = config.require_tmp_base()?;
            if scratch.base() != tmp_base {
                return Err(CommandError::InvalidArtifact {
                    name: "scratch",
                    reason: format!(
                        "{} is not the configured tmp_base {}",
                        scratch.base().display(),
                        tmp_base.display()
                    ),
                });
            }
            let target = scratch.path("reference", "bed");
            synthesize_genome_bed(&config.reference_index(), &target, fs)?.into()
        }
    };

    let command = Command::new("bedtools")
        .arg("subtract")
        .opt("-a", &regions)
        .opt("-b", phased_bed)
        .redirect_to(unphased_bed);

    debug!(command = %command, "Built bedtools subtract command");
    Ok(command)
}

/// Writes `name\t0\tlength` for every contig listed in a FASTA index.
pub fn synthesize_genome_bed(
    index: &Path,
    target: &Path,
    fs: &dyn FileSystem,
) -> Result<MaterializedFile, CommandError> {
    let content = fs
        .read_to_string(index)
        .map_err(|e| CommandError::io(index, e))?;

    let mut bed = String::with_capacity(content.len());
    let mut contigs = 0usize;
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let name = fields.next().unwrap_or_default();
        let length = fields
            .next()
            .ok_or_else(|| CommandError::InvalidIndex {
                path: index.to_path_buf(),
                line: line_no + 1,
                reason: "missing length column".to_string(),
            })?
            .parse::<u64>()
            .map_err(|e| CommandError::InvalidIndex {
                path: index.to_path_buf(),
                line: line_no + 1,
                reason: format!("bad contig length: {}", e),
            })?;

        bed.push_str(&format!("{}\t0\t{}\n", name, length));
        contigs += 1;
    }

    if contigs == 0 {
        return Err(CommandError::InvalidIndex {
            path: index.to_path_buf(),
            line: 0,
            reason: "index lists no contigs".to_string(),
        });
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent)
            .map_err(|e| CommandError::io(target, e))?;
    }
    fs.write(target, &bed)
        .map_err(|e| CommandError::io(target, e))?;

    info!(
        index = %index.display(),
        bed = %target.display(),
        contigs,
        "Synthesized whole-genome region file"
    );
    Ok(MaterializedFile::new(target))
}
