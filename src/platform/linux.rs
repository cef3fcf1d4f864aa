// InspireVault config path for Linux: ~/.config/inspirevault

use std::env;
use std::path::PathBuf;

/// Uses `$XDG_CONFIG_HOME/inspirevault` if set, otherwise `~/.config/inspirevault`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("inspirevault"),
        _ => {
            let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
            PathBuf::from(home).join(".config").join("inspirevault")
        }
    }
}
