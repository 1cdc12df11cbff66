// Planning phases for the DNAscope long-read pipeline
//
// Phases run in file-number order. Each one appends its shell lines to the
// context and records the artifacts later phases depend on.

#[path = "01_diploid.rs"]
pub mod diploid;
#[path = "02_phase.rs"]
pub mod phase;
#[path = "03_regions.rs"]
pub mod regions;
#[path = "04_repeat_model.rs"]
pub mod repeat_model;
#[path = "05_haploid.rs"]
pub mod haploid;
#[path = "06_haploid_patch.rs"]
pub mod haploid_patch;
#[path = "07_unphased.rs"]
pub mod unphased;
#[path = "08_merge.rs"]
pub mod merge;
#[path = "09_gvcf_combine.rs"]
pub mod gvcf_combine;
