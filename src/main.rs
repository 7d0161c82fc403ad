use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use external_versions::component::site_packages::SitePackages;
use external_versions::config::Config;
use external_versions::version::VersionRegistry;
use external_versions::version::report::Indent;
use external_versions::version::resolver::VersionResolver;

#[derive(Parser)]
#[command(name = "external-versions")]
#[command(version, about = "Report versions of installed Python packages without importing them")]
struct Cli {
    /// Package directory to inspect, e.g. a site-packages directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// One entry per line, indented by a space or by the given string
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = " ")]
    indent: Option<String>,

    /// Text preceding the listing
    #[arg(long)]
    preamble: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Names of the modules to look up
    #[arg(required = true)]
    names: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(verbose: u8, json: bool) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
    .map_err(|e| anyhow::anyhow!(e))
    .context("Failed to install log subscriber")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json)?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(indent) = cli.indent {
        config.report.indent = Indent::from(indent);
    }
    if let Some(preamble) = cli.preamble {
        config.report.preamble = preamble;
    }

    let packages = Arc::new(SitePackages::new(cli.root.clone()));
    let registry = VersionRegistry::new(packages.clone(), packages)
        .with_resolver(VersionResolver::new(&config.resolver));

    for name in &cli.names {
        if registry.lookup(name).is_none() {
            warn!("Cannot load {} from {}", name, cli.root.display());
        }
    }

    match cli.format {
        Format::Text => {
            let report = registry.dumps_with(&config.report);
            if report.ends_with('\n') {
                print!("{report}");
            } else {
                println!("{report}");
            }
        }
        Format::Json => {
            let versions: BTreeMap<_, _> = registry.versions().into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&versions)?);
        }
    }

    Ok(())
}
