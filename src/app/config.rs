use crate::app::cli::Cli;
use crate::app::models::{CleanConfig, DEFAULT_SAFE_LIMIT};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct PresetConfig {
    file_match: Option<Vec<String>>,
    dir_match: Option<Vec<String>>,
    safe_limit: Option<usize>,
    recursive: Option<bool>,
    safe: Option<bool>,
}

fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("cleanpath").join("presets.toml"))
}

fn load_presets_file(config_path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !config_path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(config_path)
        .context(format!("Failed to read config at {:?}", config_path))?;

    let parsed: PresetsFile = toml::from_str(&content).context("Failed to parse presets.toml")?;

    Ok(parsed.presets)
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

pub fn resolve_config(cli: Cli) -> Result<CleanConfig> {
    let presets = match presets_path() {
        Some(path) => load_presets_file(&path)?,
        None => {
            log::warn!("Could not determine home directory; presets disabled");
            HashMap::new()
        }
    };
    Ok(merge_config(cli, &presets))
}

fn merge_config(cli: Cli, presets: &HashMap<String, PresetConfig>) -> CleanConfig {
    // Preset to use: CLI flag > target directory name > None
    let dir_name = cli
        .path
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));
    let preset_key = cli.preset.clone().or(dir_name);
    let preset = match preset_key.as_deref().and_then(|k| presets.get(k)) {
        Some(found) => {
            log::debug!("Using preset {:?}", preset_key);
            found.clone()
        }
        None => {
            if let Some(name) = &cli.preset {
                log::warn!("Preset '{}' not found", name);
            }
            PresetConfig::default()
        }
    };

    let mut config = CleanConfig::new(cli.path);
    config.file_match = merge_vecs(preset.file_match, cli.file_match);
    config.dir_match = merge_vecs(preset.dir_match, cli.dir_match);
    config.recursive = cli.recursive || preset.recursive.unwrap_or(false);
    config.safe = cli.safe || preset.safe.unwrap_or(false);
    config.safe_limit = cli
        .safe_limit
        .or(preset.safe_limit)
        .unwrap_or(DEFAULT_SAFE_LIMIT);
    config.log_path = cli.log;
    config.backup_root = cli.backup;
    config.verbose = cli.verbose;
    config
}
