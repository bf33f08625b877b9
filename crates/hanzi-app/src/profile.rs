use std::fs;
use std::path::Path;

use hanzi_config::Config;

/// Load the config file if one was given, else defaults. Environment
/// overrides apply on top either way.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            let mut config = load_config_file(path)?;
            config.apply_env();
            config
        }
        None => Config::new(),
    };
    Ok(config)
}

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    let config = Config::from_json(&data)?;
    Ok(config)
}
