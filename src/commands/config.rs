use anyhow::Result;
use clap::{builder::PossibleValuesParser, Subcommand};
use quickpreview::config::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default profile for this platform to disk
    Init,
    /// List every settable key with its current value
    Keys,
    /// Set a value, e.g. `tool.startup_timeout 3s` or `batch.exit_policy all`
    Set {
        #[arg(value_parser = PossibleValuesParser::new(Config::KEYS.iter().copied()))]
        key: String,
        value: String,
    },
    /// Get a value by dotted key
    Get {
        #[arg(value_parser = PossibleValuesParser::new(Config::KEYS.iter().copied()))]
        key: String,
    },
}

pub fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
        ConfigAction::Init => {
            let config = Config::default();
            config.save()?;
            println!(
                "Wrote {} profile to {}",
                config.tool.name,
                Config::path()?.display()
            );
        }
        ConfigAction::Keys => {
            let config = Config::load()?;
            let width = Config::KEYS.iter().map(|k| k.len()).max().unwrap_or(0);
            for key in Config::KEYS {
                println!("{key:<width$}  {}", config.get_value(key)?);
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set_value(&key, &value)?;
            config.save()?;
            println!("{key} = {}", config.get_value(&key)?);
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get_value(&key)?);
        }
    }
    Ok(())
}
