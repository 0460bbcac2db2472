// ABOUTME: Main application orchestration for the signpost CLI
// ABOUTME: Coordinates between CLI arguments, configuration, and command execution

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use super::commands;
use super::{Args, Commands, Config};

pub struct Cli {
    config: Config,
}

impl Cli {
    /// Create a new CLI instance from a loaded configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load configuration from the given path (or the default locations)
    pub fn from_config(path: Option<std::path::PathBuf>) -> Result<Self> {
        Ok(Self::new(Config::load(path)?))
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self, verbose: bool, no_color: bool) -> Result<()> {
        let log_level = if verbose {
            "debug"
        } else {
            &self.config.logging.level
        };

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

        // Rendered output goes to stdout; logs stay on stderr.
        match self.config.logging.format.as_str() {
            "compact" => {
                tracing_subscriber::fmt()
                    .compact()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(!no_color)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }

        debug!("Logging initialized with level: {}", log_level);
        Ok(())
    }

    /// Run the application with parsed arguments
    pub fn run(&mut self, args: Args) -> Result<()> {
        self.init_logging(args.verbose, args.no_color)?;

        info!("Starting signpost v{}", env!("CARGO_PKG_VERSION"));
        debug!("Configuration loaded from: {:?}", args.config);

        // Merge command-specific variables into config; CLI values win.
        if let Commands::Render { vars, .. } = &args.command {
            let variables = Args::parse_variables(vars)?;
            self.config.merge_variables(variables);
        }

        match args.command {
            Commands::Render {
                template,
                string,
                output,
                ..
            } => commands::render(&template, string, output, &self.config),

            Commands::List => commands::list(&self.config),

            Commands::Check { template } => commands::check(&template, &self.config),
        }
    }
}
