//! Stage builders for the DNAscope long-read pipeline.
//!
//! Every builder is a function of its artifact names and a [`PipelineConfig`];
//! none of them runs anything. Region subtraction is the only one that may
//! touch the filesystem, to write a whole-genome bed when no regions are given.
//!
//! [`PipelineConfig`]: phasecall_core::PipelineConfig

pub mod apply;
pub mod calling;
pub mod driver;
pub mod phasing;
pub mod regions;
pub mod repeat_model;
pub mod vcf_mod;

pub use apply::model_apply;
pub use calling::{dnascope, dnascope_hp};
pub use driver::sentieon_driver;
pub use phasing::variant_phaser;
pub use regions::{bedtools_subtract, synthesize_genome_bed};
pub use repeat_model::{repeat_model, RepeatModelCommand};
pub use vcf_mod::{
    gvcf_combine, gvcf_path_for, haploid_patch, vcf_mod_merge, vcf_mod_patch, HaplotypePattern,
};

pub const SENTIEON: &str = "sentieon";
