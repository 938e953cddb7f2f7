//! Relay configuration from the environment and `.env` files
//!
//! Precedence: process environment, then `.env.local`, then `.env`.
//! Files are read into a map; the process environment is never modified.

use liffpoints_core::{Error, RelayConfig, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Env files in precedence order
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load the relay configuration, looking for env files in `dir`
pub fn load_relay_config(dir: &Path) -> Result<RelayConfig> {
    layered_config(dir, |key| std::env::var(key).ok())
}

fn layered_config<F>(dir: &Path, env: F) -> Result<RelayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let file_values = read_env_files(dir)?;
    RelayConfig::from_lookup(|key| env(key).or_else(|| file_values.get(key).cloned()))
}

/// Collect `KEY=value` pairs from the env files in `dir`. Missing files are skipped.
fn read_env_files(dir: &Path) -> Result<HashMap<String, String>> {
    let mut values = HashMap::new();

    for name in ENV_FILES {
        let path = dir.join(name);
        let entries = match dotenvy::from_path_iter(&path) {
            Ok(entries) => entries,
            Err(e) if e.not_found() => continue,
            Err(e) => return Err(Error::Config(format!("{}: {}", path.display(), e))),
        };

        for entry in entries {
            let (key, value) =
                entry.map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
            values.entry(key).or_insert(value);
        }
        debug!("Loaded settings from {}", path.display());
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "liffpoints-relay-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_token_from_dotenv_file() {
        let dir = scratch_dir("dotenv");
        fs::write(
            dir.join(".env"),
            "# relay secrets\nLINE_CHANNEL_ACCESS_TOKEN=\"file-token\"\nRELAY_LISTEN_ADDR=127.0.0.1:4000\n",
        )
        .unwrap();

        let config = layered_config(&dir, no_env).unwrap();
        assert_eq!(config.channel_access_token, "file-token");
        assert_eq!(config.listen_addr.port(), 4000);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_precedence() {
        let dir = scratch_dir("precedence");
        fs::write(
            dir.join(".env"),
            "LINE_CHANNEL_ACCESS_TOKEN=from-env-file\nLINE_API_BASE=https://base.example\n",
        )
        .unwrap();
        fs::write(dir.join(".env.local"), "LINE_CHANNEL_ACCESS_TOKEN=from-local\n").unwrap();

        let config = layered_config(&dir, no_env).unwrap();
        assert_eq!(config.channel_access_token, "from-local");
        assert_eq!(config.line_api_base, "https://base.example");

        let config = layered_config(&dir, |key| {
            (key == "LINE_CHANNEL_ACCESS_TOKEN").then(|| "from-process".to_string())
        })
        .unwrap();
        assert_eq!(config.channel_access_token, "from-process");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_files_still_require_token() {
        let dir = scratch_dir("empty");

        assert!(read_env_files(&dir).unwrap().is_empty());
        let err = layered_config(&dir, no_env).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        fs::remove_dir_all(&dir).unwrap();
    }
}
