use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use adforge::pipeline::{GeneratedImageMode, RunConfig};
use adforge::{AdforgeError, ProviderKind};

#[derive(Parser, Debug)]
#[command(name = "adforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full creative pipeline for a campaign brief.
    Run(RunArgs),
    /// Run legal policy checks only (no image generation or file output).
    ValidateLegal(ValidateLegalArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProviderArg {
    /// Deterministic offline provider.
    Mock,
}

impl From<ProviderArg> for ProviderKind {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Mock => ProviderKind::Mock,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GeneratedImageModeArg {
    /// Always generate a fresh hero.
    New,
    /// Reuse the most recent stored generation, else generate.
    Last,
    /// Reuse the stored generation selected by --generated-image-id.
    Id,
}

impl From<GeneratedImageModeArg> for GeneratedImageMode {
    fn from(value: GeneratedImageModeArg) -> Self {
        match value {
            GeneratedImageModeArg::New => GeneratedImageMode::New,
            GeneratedImageModeArg::Last => GeneratedImageMode::Last,
            GeneratedImageModeArg::Id => GeneratedImageMode::Id,
        }
    }
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Path to the campaign brief (.yaml/.yml/.json).
    #[arg(long)]
    brief: PathBuf,

    /// Assets root folder.
    #[arg(long, default_value = "./assets")]
    assets: PathBuf,

    /// Output root folder.
    #[arg(long, default_value = "./output")]
    output: PathBuf,

    /// Provider mode.
    #[arg(long, value_enum, default_value_t = ProviderArg::Mock)]
    provider: ProviderArg,

    /// Optional single locale to append to the brief's locale list.
    #[arg(long)]
    locale: Option<String>,

    /// Enable localized outputs using the brief's locale list.
    #[arg(long, default_value_t = false)]
    localize: bool,

    /// Plan actions and skip image file writes.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Brand policy file; config/brand_policy.yaml is used when present.
    #[arg(long)]
    brand_policy: Option<PathBuf>,

    /// Fail the run when brand compliance violations are detected.
    #[arg(long, default_value_t = false)]
    strict_brand: bool,

    /// Legal policy file; config/legal_policy.yaml is used when present.
    #[arg(long)]
    legal_policy: Option<PathBuf>,

    /// Fail the run when blocked legal terms/expressions are detected.
    #[arg(long, default_value_t = false)]
    strict_legal: bool,

    /// Hero acquisition mode for products without reusable assets.
    #[arg(long, value_enum, default_value_t = GeneratedImageModeArg::New)]
    generated_image_mode: GeneratedImageModeArg,

    /// Stored image identifier for --generated-image-mode id.
    #[arg(long)]
    generated_image_id: Option<String>,

    /// Local storage root for generated images.
    #[arg(long, default_value = "./storage")]
    storage_root: PathBuf,

    /// Directory searched first for message typefaces.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ValidateLegalArgs {
    /// Path to the campaign brief (.yaml/.yml/.json).
    #[arg(long)]
    brief: PathBuf,

    /// Legal policy file; config/legal_policy.yaml is used when present.
    #[arg(long)]
    legal_policy: Option<PathBuf>,

    /// Fail when blocked legal terms/expressions are detected.
    #[arg(long, default_value_t = false)]
    strict_legal: bool,

    /// Include the brief's locale list in the checks.
    #[arg(long, default_value_t = false)]
    localize: bool,

    /// Optional single locale to append to the brief's locale list.
    #[arg(long)]
    locale: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::ValidateLegal(args) => cmd_validate_legal(args),
    }
}

fn run_config_from(args: &RunArgs) -> RunConfig {
    let mut config = RunConfig::new(&args.brief, &args.assets, &args.output);
    config.provider = args.provider.into();
    config.locale = args.locale.clone();
    config.localize = args.localize;
    config.dry_run = args.dry_run;
    config.brand_policy_path = args.brand_policy.clone();
    config.strict_brand = args.strict_brand;
    config.legal_policy_path = args.legal_policy.clone();
    config.strict_legal = args.strict_legal;
    config.generated_image_mode = args.generated_image_mode.into();
    config.generated_image_id = args.generated_image_id.clone();
    config.storage_root = args.storage_root.clone();
    config.fonts_dir = args.fonts_dir.clone();
    config
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let config = run_config_from(&args);
    let (_manifest, metrics) = adforge::run_pipeline(&config).map_err(describe_error)?;

    println!("Run metrics");
    println!("- Total products processed: {}", metrics.total_products_processed);
    println!("- Assets reused: {}", metrics.assets_reused);
    println!("- Assets generated: {}", metrics.assets_generated);
    println!("- Total variants produced: {}", metrics.total_variants_produced);
    println!("- Execution time (s): {}", metrics.execution_time_seconds);
    Ok(())
}

fn cmd_validate_legal(args: ValidateLegalArgs) -> anyhow::Result<()> {
    let mut config = RunConfig::new(&args.brief, "./assets", "./output");
    config.legal_policy_path = args.legal_policy.clone();
    config.strict_legal = args.strict_legal;
    config.localize = args.localize;
    config.locale = args.locale.clone();

    let summary = adforge::run_legal_validation_only(&config).map_err(describe_error)?;

    println!("Legal validation summary");
    println!("- Campaign: {}", summary.campaign_id);
    println!("- Checks executed: {}", summary.checks_executed);
    println!("- Checks flagged: {}", summary.checks_flagged);
    println!("- Checks blocked: {}", summary.checks_blocked);
    println!("- Locales checked: {}", summary.locales_checked.join(", "));
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary.checks_flagged == 0 {
        println!("No legal violations found.");
    } else {
        println!("Legal violations found: {}", summary.checks_flagged);
    }
    Ok(())
}

/// Keep violation details visible when a compliance gate stops the run.
fn describe_error(err: AdforgeError) -> anyhow::Error {
    match err {
        AdforgeError::Compliance {
            message,
            violations,
        } if !violations.is_empty() => {
            anyhow::anyhow!("{message}\n{}", violations.join("\n"))
        }
        other => anyhow::Error::new(other),
    }
}
