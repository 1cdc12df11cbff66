use phasecall_cli::cli::commands::{CliArgs, Commands, PlanArgs, ValidateArgs};
use phasecall_cli::cli::output::{OutputFormat, OutputFormatter};
use phasecall_cli::{init_logging, parse_level, NAME, VERSION};
use phasecall_core::{PipelineConfig, RealFileSystem};
use phasecall_pipeline::{PipelinePlanner, PlanContext};

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging(log_level(&args));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Plan(plan_args) => handle_plan(plan_args, args.quiet),
        Commands::Validate(validate_args) => handle_validate(validate_args),
    };

    process::exit(exit_code);
}

fn log_level(args: &CliArgs) -> Level {
    if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("PHASECALL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    }
}

/// Config file first, then `PHASECALL_*` overrides. Callers validate.
fn load_config(path: &Path) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::from_yaml(path)
        .with_context(|| format!("Failed to read configuration {}", path.display()))?;

    config
        .apply_env_overrides()
        .context("Invalid environment override")?;
    Ok(config)
}

fn handle_plan(args: &PlanArgs, quiet: bool) -> i32 {
    info!(config = %args.config.display(), tech = %args.tech, "Planning pipeline");

    let mut config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return 1;
        }
    };
    if let Some(cores) = args.cores {
        debug!(cores, "Thread count overridden on the command line");
        config.cores = cores;
    }

    let mut context = match PlanContext::new(
        config,
        args.tech,
        &args.output_vcf,
        Arc::new(RealFileSystem::new()),
    ) {
        Ok(context) => context.with_gvcf(args.gvcf),
        Err(e) => {
            error!("Configuration error: {:#}", e);
            eprintln!("\nPlanning needs sample_input, model_bundle and tmp_base.");
            return 1;
        }
    };

    let plan = match PipelinePlanner::new().plan(&mut context) {
        Ok(plan) => plan,
        Err(e) => {
            error!("Planning failed: {:#}", e);
            return 1;
        }
    };

    let format: OutputFormat = args.format.into();
    let output = match OutputFormatter::new(format).format_plan(&plan) {
        Ok(out) => out,
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            return 1;
        }
    };

    write_output(&output, args.out.as_deref(), quiet)
}

fn handle_validate(args: &ValidateArgs) -> i32 {
    let config = match load_config(&args.config).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return 1;
        }
    };

    let missing = config.missing_inputs(&RealFileSystem::new());
    if !missing.is_empty() {
        for path in &missing {
            error!(path = %path.display(), "Input not found");
        }
        eprintln!("\n{} configured input(s) are missing.", missing.len());
        return 1;
    }
    info!(config = %args.config.display(), "Configuration is valid");

    match OutputFormatter::new(args.format.into()).format_config(&config) {
        Ok(output) => write_output(&output, None, false),
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}

fn write_output(output: &str, out: Option<&Path>, quiet: bool) -> i32 {
    let Some(output_file) = out else {
        println!("{}", output.trim_end());
        return 0;
    };

    match std::fs::write(output_file, output) {
        Ok(_) => {
            info!("Output written to: {}", output_file.display());
            if !quiet {
                println!("Output written to: {}", output_file.display());
            }
            0
        }
        Err(e) => {
            error!("Failed to write output to file: {}", e);
            1
        }
    }
}
