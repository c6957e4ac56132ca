use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use smsledger_parser::ValidationRules;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_smsledger_home, smsledger_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub output: OutputSection,
    pub validation: ValidationRules,
    pub log: LogSection,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON document (an array for batches)
    #[default]
    Json,
    /// One compact JSON object per line
    Jsonl,
    /// Flattened rows with dotted column names
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSection {
    /// Filter used when RUST_LOG and --log-level are both absent
    pub level: String,
    pub json: bool,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// `--config` if given, else `~/.smsledger/config.toml`
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(smsledger_home()?.join("config.toml")),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = config_path(explicit)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, explicit: Option<&Path>) -> Result<PathBuf> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => ensure_smsledger_home()?.join("config.toml"),
    };
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = config_path(explicit)?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default(), explicit)?;
    println!("Wrote {}", written.display());
    Ok(())
}

pub fn show_config(explicit: Option<&Path>) -> Result<()> {
    let p = config_path(explicit)?;
    let cfg = load_config(explicit)?;
    let source = if p.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{}", p.display(), source);
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("[validation]"));
        assert!(text.contains(r#"format = "json""#));

        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [output]
            format = "csv"

            [validation]
            denied_keywords = ["reversal"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.output.format, OutputFormat::Csv);
        assert!(cfg.output.pretty);
        assert_eq!(cfg.validation.denied_keywords, vec!["reversal".to_string()]);
        assert_eq!(cfg.validation.min_length, 10);
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn test_explicit_path_is_used() {
        let dir = std::env::temp_dir().join(format!("smsledger-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());

        let mut cfg = Config::default();
        cfg.log.json = true;
        save_config(&cfg, Some(&path)).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), cfg);

        fs::remove_dir_all(&dir).unwrap();
    }
}
