use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:7331".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.db.path.as_os_str().is_empty() {
        anyhow::bail!("db.path must not be empty");
    }
    if config.server.bind.is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_minimal_config() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[db]\npath = \"./data/catalog.sqlite\"\n\n[server]\nbind = \"127.0.0.1:0\"").unwrap();
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:0");
    }

    #[test]
    fn bind_defaults_when_omitted() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[db]\npath = \"catalog.sqlite\"\n\n[server]").unwrap();
        let cfg = load_config(f.path()).unwrap();
        assert_eq!(cfg.server.bind, "127.0.0.1:7331");
    }

    #[test]
    fn rejects_empty_db_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[db]\npath = \"\"\n\n[server]\nbind = \"127.0.0.1:0\"").unwrap();
        assert!(load_config(f.path()).is_err());
    }
}
