use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use skelgraph::{InputPolicy, PipelineConfig};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "skelgraph")]
#[command(about = "Extract skeleton graphs from TIFF slice stacks into spreadsheets")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preprocess, skeletonize and export.
    #[command(name = "run")]
    Run(RunArgs),
    /// Print the effective configuration as JSON.
    #[command(name = "print-config")]
    PrintConfig(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    staging: Option<PathBuf>,
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    sigma: Option<f32>,
    #[arg(long)]
    threshold_low: Option<u8>,
    #[arg(long)]
    threshold_high: Option<u8>,
    /// Voxel spacing as `Z,Y,X`.
    #[arg(long, value_parser = parse_spacing)]
    spacing: Option<[f64; 3]>,
    /// Fail on input entries that are not TIFF files instead of skipping them.
    #[arg(long)]
    strict_inputs: bool,
    /// Also write the per-side node projection workbooks.
    #[arg(long)]
    node_projections: bool,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    #[command(flatten)]
    config: ConfigArgs,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Run(args) => run(args),
        Command::PrintConfig(args) => print_config(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    init_tracing(args.verbose);
    let cfg = effective_config(&args.config)?;

    tracing::info!("skelgraph v{}", env!("CARGO_PKG_VERSION"));
    let report = skelgraph::run(&cfg).context("running pipeline")?;

    for path in &report.written {
        println!("{}", path.display());
    }
    Ok(())
}

fn print_config(args: ConfigArgs) -> Result<()> {
    let cfg = effective_config(&args)?;
    let json = cfg.to_json_pretty().context("serializing config")?;
    println!("{json}");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = if verbose > 0 { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("skelgraph={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn effective_config(args: &ConfigArgs) -> Result<PipelineConfig> {
    let mut cfg = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(v) = &args.input {
        cfg.input_dir = v.clone();
    }
    if let Some(v) = &args.staging {
        cfg.staging_dir = v.clone();
    }
    if let Some(v) = &args.out {
        cfg.output_dir = v.clone();
    }
    if let Some(v) = args.sigma {
        cfg.smoothing_sigma = v;
    }
    if let Some(v) = args.threshold_low {
        cfg.threshold_low = v;
    }
    if let Some(v) = args.threshold_high {
        cfg.threshold_high = v;
    }
    if let Some(v) = args.spacing {
        cfg.spacing = v;
    }
    if args.strict_inputs {
        cfg.input_policy = InputPolicy::Abort;
    }
    if args.node_projections {
        cfg.write_node_projections = true;
    }

    cfg.validate().context("validating configuration")?;
    Ok(cfg)
}

fn parse_spacing(s: &str) -> Result<[f64; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("expected three comma-separated values Z,Y,X, got '{s}'");
    }

    let mut out = [0.0f64; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("invalid spacing component '{part}'"))?;
    }
    Ok(out)
}
