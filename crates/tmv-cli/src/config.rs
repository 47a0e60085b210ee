//! `tmv config` — the settings panel.
//!
//! Every change is written straight to the vault's settings file.

use std::path::Path;

use anyhow::{Context, Result};

use tmv_core::{SettingKey, Settings, SettingsStore};

#[derive(clap::Subcommand)]
pub enum ConfigAction {
    /// Print the current settings
    Show,
    /// Change one setting
    Set {
        /// Setting name (e.g. propertyName, base-folder, useSubfolders)
        key: String,
        /// New value; toggles take true/false
        value: String,
    },
    /// Restore the default settings
    Reset,
}

pub fn run(vault: &Path, action: Option<ConfigAction>) -> Result<()> {
    let store = SettingsStore::new(vault);
    let mut settings = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;

    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {}
        ConfigAction::Set { key, value } => {
            let key: SettingKey = key.parse()?;
            settings.set(key, &value)?;
            store.save(&settings)?;
        }
        ConfigAction::Reset => {
            settings = Settings::default();
            store.save(&settings)?;
        }
    }

    print!("{}", render(&settings));
    Ok(())
}

fn render(settings: &Settings) -> String {
    let mut out = String::new();
    for key in settings.controls() {
        let value = settings.get(key);
        let shown = if value.is_empty() { "\"\"" } else { value.as_str() };
        out.push_str(&format!("{:<22} {:<12} # {}\n", key.as_str(), shown, key.description()));
    }
    out
}
