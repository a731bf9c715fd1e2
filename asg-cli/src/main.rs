mod input;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use crate::input::{InputFormat, load_groups};
use crate::render::{
    Filter, RenderConfig, Summary, render_instances, render_instances_json, render_states,
};

#[derive(Parser)]
#[command(name = "asg-inspect")]
#[command(about = "Inspect Auto Scaling group instances from saved API responses", long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List instances, one per line
    Instances {
        /// DescribeAutoScalingGroups response (stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Response encoding
        #[arg(long, value_enum, default_value = "auto")]
        format: InputFormat,

        /// Only instances in this lifecycle state (e.g., InService, Terminating:Wait)
        #[arg(long)]
        state: Option<String>,

        /// Only instances of this Auto Scaling group
        #[arg(long)]
        group: Option<String>,

        /// Output encoding
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,

        /// Omit the per-group header lines
        #[arg(long)]
        no_headers: bool,
    },
    /// Count instances per lifecycle state and health status
    Summary {
        /// DescribeAutoScalingGroups response (stdin if omitted or "-")
        file: Option<PathBuf>,

        /// Response encoding
        #[arg(long, value_enum, default_value = "auto")]
        format: InputFormat,
    },
    /// List every lifecycle state
    States,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = RenderConfig {
        color: !cli.no_color,
        ..Default::default()
    };

    let result = match cli.command {
        Commands::Instances {
            file,
            format,
            state,
            group,
            output,
            no_headers,
        } => {
            let config = RenderConfig {
                group_headers: !no_headers,
                ..config
            };
            run_instances(file, format, state.as_deref(), group, output, &config)
        }
        Commands::Summary { file, format } => run_summary(file, format, &config),
        Commands::States => {
            print!("{}", render_states(&config));
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_instances(
    file: Option<PathBuf>,
    format: InputFormat,
    state: Option<&str>,
    group: Option<String>,
    output: OutputFormat,
    config: &RenderConfig,
) -> Result<()> {
    let filter = Filter::from_args(state, group).context("Invalid --state")?;

    let groups = load_groups(file.as_deref(), format)?;
    let groups = filter.apply(&groups);
    log::info!("Selected {} groups", groups.len());

    match output {
        OutputFormat::Text => print!("{}", render_instances(&groups, config)),
        OutputFormat::Json => {
            let json = render_instances_json(&groups).context("Failed to serialize instances")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_summary(file: Option<PathBuf>, format: InputFormat, config: &RenderConfig) -> Result<()> {
    let groups = load_groups(file.as_deref(), format)?;
    print!("{}", Summary::from_groups(&groups).render(config));
    Ok(())
}
