use bp_config::BrightConfig;
use clap::Parser;

/// Command-line flags for the `brightpath` binary. Anything not given here
/// comes from `BrightConfig` (TOML files and `BRIGHTPATH_*` env).
#[derive(Debug, Parser)]
#[command(name = "brightpath", version, about = "BrightPath school backend")]
pub struct Cli {
    /// Socket address to listen on (overrides `server.bind`)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Local database file (overrides `database.local_path`)
    #[arg(long)]
    pub database: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn apply(&self, config: &mut BrightConfig) {
        if let Some(bind) = &self.bind {
            config.server.bind.clone_from(bind);
        }
        if let Some(path) = &self.database {
            config.database.local_path.clone_from(path);
        }
    }

    /// Fallback `tracing` filter when `BRIGHTPATH_LOG` is unset.
    #[must_use]
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            configured
        }
    }
}
