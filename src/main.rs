use anyhow::Result;
use signpost::cli::{Args, Cli};

fn main() -> Result<()> {
    let args = Args::parse_args();
    let mut cli = Cli::from_config(args.config.clone())?;

    cli.run(args)?;

    Ok(())
}
