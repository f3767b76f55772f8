use anyhow::{Context, Result};
use gitshelf::{Config, generate_site, init_logging};

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(config.verbose, config.quiet)?;
    config.validate().context("Invalid configuration")?;

    let stats = generate_site(&config)?;

    if stats.skipped > 0 {
        tracing::warn!(skipped = stats.skipped, "Some files could not be rendered");
    }

    Ok(())
}
