use clap::Subcommand;
use standup_core::{Config, ConfigFile};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "standup-extension.refreshTime")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let file = ConfigFile::open_default()?;
    match action {
        ConfigAction::Get { key } => {
            let config = file.load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = file.load()?;
            config.set(&key, &value)?;
            config.save_to(file.path())?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = file.load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            Config::default().save_to(file.path())?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
