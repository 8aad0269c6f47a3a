use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use helm_embed::logging::setup_logging;
use helm_embed_cli::{Cli, run};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(
        cli.logging.log_level,
        cli.logging.log_format,
        cli.logging.color,
    )
    .wrap_err("failed to set up logging")?;

    let command = cli.command.name();
    run(cli).wrap_err_with(|| format!("helm-embed {command} failed"))?;
    Ok(())
}
