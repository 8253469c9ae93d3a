use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub explorer: ExplorerSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExplorerSettings {
    pub scheme: Option<u8>,        // Default color scheme (0-4)
    pub line_char: Option<String>, // Glyph overriding per-slope segment chars
}

impl Settings {
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termorph")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_config() {
        let settings: Settings = toml::from_str("[explorer]\nscheme = 2\n").unwrap();
        assert_eq!(settings.explorer.scheme, Some(2));
        assert_eq!(settings.explorer.line_char, None);
    }

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.explorer.scheme, None);
    }
}
