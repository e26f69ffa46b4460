use anyhow::Result;
use std::path::PathBuf;

/// Config directory override from the environment (REWIND_CONFIG_DIR)
pub fn config_dir_override() -> Option<PathBuf> {
    std::env::var("REWIND_CONFIG_DIR").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("rewind");

        Ok(Self::with_base(base_dir))
    }

    pub fn with_base(base_dir: PathBuf) -> Self {
        Self {
            log_dir: base_dir.join("logs"),
            config_dir: base_dir,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("rewind.log")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = config_dir_override() {
            return Self::with_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/rewind on Linux), falling back to the working directory
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".rewind")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_base() {
        let paths = PathManager::with_base(PathBuf::from("/tmp/rewind-test"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/rewind-test/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/tmp/rewind-test/credentials.toml"));
        assert_eq!(paths.default_log_file(), PathBuf::from("/tmp/rewind-test/logs/rewind.log"));
    }
}
