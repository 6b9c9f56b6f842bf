use std::path::{Path, PathBuf};

/// Environment variable overriding the sidecar directory
pub const INDEX_DIR_ENV: &str = "LINE_SEEK_INDEX_DIR";

/// Name of the default sidecar directory
const DEFAULT_INDEX_DIR: &str = "indexes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the `.idx` sidecar files
    pub index_dir: PathBuf,
}

impl Config {
    /// Uses `dir` as sidecar directory
    #[inline]
    pub fn with_index_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            index_dir: dir.into(),
        }
    }

    /// Like `Config::default` but honours `LINE_SEEK_INDEX_DIR` if set and not empty
    pub fn from_env() -> Self {
        match std::env::var_os(INDEX_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::with_index_dir(dir),
            _ => Self::default(),
        }
    }

    /// `indexes/` next to the running executable, or relative to the working directory if the
    /// executable path can't be determined.
    pub fn default_index_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .as_deref()
            .and_then(Path::parent)
            .map(|dir| dir.join(DEFAULT_INDEX_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_DIR))
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self::with_index_dir(Self::default_index_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dir_name() {
        let config = Config::default();
        assert!(config.index_dir.ends_with(DEFAULT_INDEX_DIR));
    }

    // Only test touching INDEX_DIR_ENV
    #[test]
    fn test_from_env() {
        std::env::set_var(INDEX_DIR_ENV, "/tmp/line-seek-indexes");
        assert_eq!(
            Config::from_env().index_dir,
            PathBuf::from("/tmp/line-seek-indexes")
        );

        std::env::set_var(INDEX_DIR_ENV, "");
        assert_eq!(Config::from_env(), Config::default());

        std::env::remove_var(INDEX_DIR_ENV);
        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    fn test_with_index_dir() {
        let config = Config::with_index_dir("/tmp/some/dir");
        assert_eq!(config.index_dir, PathBuf::from("/tmp/some/dir"));
    }
}
