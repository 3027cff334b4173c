use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use wishtree::gui::{self, Settings};

#[derive(Parser)]
#[command(name = "wishtree")]
#[command(about = "Leave a wish on the Tatlong Hiling wish tree")]
struct Cli {
    /// Directory holding tree-illustration.png and its fallback
    #[arg(long, value_name = "DIR", default_value = "public")]
    assets: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log filter directive, overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(&args)?;

    tracing::info!(assets = %args.assets.display(), "starting wish tree");
    gui::run(Settings {
        assets_dir: args.assets,
    })?;

    Ok(())
}

fn init_tracing(args: &Cli) -> anyhow::Result<()> {
    let filter = match &args.log {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(args.verbose))),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}

/// Our own events at `info` (`debug` when verbose), dependencies at `warn`.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,wishtree=debug"
    } else {
        "warn,wishtree=info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_follows_verbose_flag() {
        assert_eq!(default_filter(false), "warn,wishtree=info");
        assert_eq!(default_filter(true), "warn,wishtree=debug");
        assert!(EnvFilter::try_new(default_filter(true)).is_ok());
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["wishtree", "-v"]).unwrap();
        assert_eq!(cli.assets, PathBuf::from("public"));
        assert!(cli.verbose);
        assert!(cli.log.is_none());
    }
}
