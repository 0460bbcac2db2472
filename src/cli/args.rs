// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for signpost

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "signpost")]
#[command(about = "Resolve and render templates across an application and its plugins")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template by name, or literal source text with --string
    Render {
        #[arg(help = "Template name to resolve, or source text with --string")]
        template: String,

        #[arg(
            short = 'V',
            long = "var",
            help = "Override template variables (key=value)"
        )]
        vars: Vec<String>,

        #[arg(long, help = "Treat the template argument as literal source text")]
        string: bool,

        #[arg(short, long, help = "Write rendered output to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// List every template name visible across the application and plugins
    List,

    /// Resolve a template and check its syntax without rendering
    Check {
        #[arg(help = "Template name to resolve")]
        template: String,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse variables from key=value format
    pub fn parse_variables(
        vars: &[String],
    ) -> anyhow::Result<std::collections::HashMap<String, String>> {
        let mut variables = std::collections::HashMap::new();

        for var in vars {
            if let Some((key, value)) = var.split_once('=') {
                variables.insert(key.to_string(), value.to_string());
            } else {
                anyhow::bail!("invalid variable '{}': expected key=value", var);
            }
        }

        Ok(variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables_accepts_key_value_pairs() {
        let vars = vec!["name=World".to_string(), "count=3".to_string()];
        let parsed = Args::parse_variables(&vars).unwrap();

        assert_eq!(parsed.get("name"), Some(&"World".to_string()));
        assert_eq!(parsed.get("count"), Some(&"3".to_string()));
    }

    #[test]
    fn test_parse_variables_keeps_equals_in_value() {
        let vars = vec!["query=a=b".to_string()];
        let parsed = Args::parse_variables(&vars).unwrap();

        assert_eq!(parsed.get("query"), Some(&"a=b".to_string()));
    }

    #[test]
    fn test_parse_variables_rejects_malformed_pairs() {
        let vars = vec!["no_equals_sign".to_string()];
        assert!(Args::parse_variables(&vars).is_err());
    }
}
