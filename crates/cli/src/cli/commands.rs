use clap::{Parser, Subcommand, ValueEnum};
use phasecall_core::Technology;
use std::path::PathBuf;

/// Command planner for the DNAscope long-read variant calling pipeline
#[derive(Parser, Debug)]
#[command(
    name = "phasecall",
    about = "Plan the shell commands of a DNAscope long-read variant calling run",
    version,
    long_about = "phasecall turns a pipeline configuration into the ordered sentieon, \
                  bedtools and pyexec command lines of a DNAscope HiFi or ONT run. \
                  Commands are printed, never executed."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Plan the pipeline commands",
        long_about = "Loads the configuration, applies PHASECALL_* environment overrides and \
                      prints every command of the run in order.\n\n\
                      Examples:\n  \
                      phasecall plan -c run.yaml -t HiFi -o sample.vcf.gz\n  \
                      phasecall plan -c run.yaml -t ONT -o sample.vcf.gz --gvcf --format script"
    )]
    Plan(PlanArgs),

    #[command(
        about = "Validate a configuration file",
        long_about = "Parses and validates the configuration and prints the resolved values.\n\n\
                      Examples:\n  \
                      phasecall validate -c run.yaml\n  \
                      phasecall validate -c run.yaml --format json"
    )]
    Validate(ValidateArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[arg(short = 'c', long, value_name = "FILE", help = "Pipeline configuration (YAML)")]
    pub config: PathBuf,

    #[arg(
        short = 't',
        long,
        value_name = "TECH",
        value_parser = parse_technology,
        help = "Sequencing technology: HiFi or ONT"
    )]
    pub tech: Technology,

    #[arg(short = 'o', long, value_name = "VCF", help = "Final output VCF (.vcf.gz)")]
    pub output_vcf: PathBuf,

    #[arg(long, help = "Also emit a gVCF next to the output VCF")]
    pub gvcf: bool,

    #[arg(long, value_name = "N", help = "Override the configured thread count")]
    pub cores: Option<u32>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "FILE", help = "Write output to file instead of stdout")]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(short = 'c', long, value_name = "FILE", help = "Pipeline configuration (YAML)")]
    pub config: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
    Script,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Script => super::output::OutputFormat::Script,
        }
    }
}

fn parse_technology(s: &str) -> Result<Technology, String> {
    s.parse::<Technology>().map_err(|e| e.to_string())
}
