//! `storefront config show|init`.

use anyhow::Result;

use super::Options;

pub fn show(opts: &Options) -> Result<()> {
    let config = opts.config()?;
    println!("# {}", opts.config_path.display());
    print!("{}", toml::to_string_pretty(&config)?);
    println!("# cart database: {}", config.cart_db_path().display());
    Ok(())
}

/// Write the effective config (file plus flags) back to the config path.
pub fn init(opts: &Options) -> Result<()> {
    let config = opts.config()?;
    config.save(&opts.config_path)?;
    println!("Wrote {}", opts.config_path.display());
    Ok(())
}
