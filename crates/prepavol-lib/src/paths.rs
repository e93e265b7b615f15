use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable naming the reference-data directory.
pub const DATA_DIR_ENV: &str = "PREPAVOL_DATA_DIR";
/// Environment variable overriding the fleet catalog file.
pub const FLEET_ENV: &str = "PREPAVOL_FLEET";
/// Environment variable overriding the fuel table file.
pub const FUELS_ENV: &str = "PREPAVOL_FUELS";
/// Environment variable overriding the airfield directory file.
pub const AIRFIELDS_ENV: &str = "PREPAVOL_AIRFIELDS";

const FLEET_FILENAME: &str = "fleet.json";
const FUELS_FILENAME: &str = "fuels.json";
const AIRFIELDS_FILENAME: &str = "airfields.csv";
const PERFORMANCE_DIRNAME: &str = "performance";

/// Absolute path to the checked-in fixture data, when available.
static FIXTURE_DATA_DIR: Lazy<Option<PathBuf>> = Lazy::new(|| {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures");
    path.canonicalize().ok()
});

/// Locations of every reference-data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePaths {
    pub root: PathBuf,
    pub fleet: PathBuf,
    pub fuels: PathBuf,
    pub airfields: PathBuf,
    /// Directory holding `<planetype>_<operation>.csv` handbook tables.
    pub performance: PathBuf,
}

impl ReferencePaths {
    /// Standard file layout under `root`, ignoring environment overrides.
    pub fn in_dir(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            fleet: root.join(FLEET_FILENAME),
            fuels: root.join(FUELS_FILENAME),
            airfields: root.join(AIRFIELDS_FILENAME),
            performance: root.join(PERFORMANCE_DIRNAME),
        }
    }

    /// Resolve the reference-data directory.
    ///
    /// The resolution order is:
    /// 1. Explicit `dir` argument when provided.
    /// 2. `PREPAVOL_DATA_DIR` environment variable.
    /// 3. Platform-specific project data directory.
    /// 4. The checked-in `docs/fixtures` directory (debug builds only).
    ///
    /// An explicit directory is authoritative: it is not silently replaced by
    /// a later candidate. Otherwise the first candidate holding a fleet
    /// catalog wins. `PREPAVOL_FLEET`, `PREPAVOL_FUELS` and
    /// `PREPAVOL_AIRFIELDS` override individual files.
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        if let Some(explicit) = dir {
            let paths = Self::in_dir(explicit).with_env_overrides();
            return paths.ensure_present(vec![explicit.to_path_buf()]);
        }

        let mut candidates = Vec::new();
        if let Some(env_dir) = env::var_os(DATA_DIR_ENV) {
            candidates.push(PathBuf::from(env_dir));
        }
        match default_data_dir() {
            Ok(dir) => candidates.push(dir),
            Err(err) => debug!(error = %err, "no platform data directory"),
        }
        if cfg!(debug_assertions) {
            if let Some(fixtures) = FIXTURE_DATA_DIR.as_ref() {
                candidates.push(fixtures.clone());
            }
        }

        for candidate in &candidates {
            let paths = Self::in_dir(candidate).with_env_overrides();
            if paths.fleet.is_file() {
                debug!(root = %paths.root.display(), "resolved reference data directory");
                return Ok(paths);
            }
        }

        Err(Error::ReferenceDataMissing {
            searched: candidates,
        })
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(path) = env::var_os(FLEET_ENV) {
            self.fleet = PathBuf::from(path);
        }
        if let Some(path) = env::var_os(FUELS_ENV) {
            self.fuels = PathBuf::from(path);
        }
        if let Some(path) = env::var_os(AIRFIELDS_ENV) {
            self.airfields = PathBuf::from(path);
        }
        self
    }

    fn ensure_present(self, searched: Vec<PathBuf>) -> Result<Self> {
        if self.fleet.is_file() {
            Ok(self)
        } else {
            Err(Error::ReferenceDataMissing { searched })
        }
    }
}

/// Resolve the default data location using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "prepavol", "prepavol").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Checked-in fixture directory, when the workspace sources are available.
pub fn fixture_data_dir() -> Option<&'static Path> {
    FIXTURE_DATA_DIR.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_under_root() {
        let paths = ReferencePaths::in_dir(Path::new("/data"));
        assert_eq!(paths.fleet, Path::new("/data/fleet.json"));
        assert_eq!(paths.airfields, Path::new("/data/airfields.csv"));
        assert_eq!(paths.performance, Path::new("/data/performance"));
    }

    #[test]
    fn explicit_directory_without_catalog_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferencePaths::resolve(Some(dir.path())).unwrap_err();
        match err {
            Error::ReferenceDataMissing { searched } => {
                assert_eq!(searched, vec![dir.path().to_path_buf()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn explicit_fixture_directory_resolves() {
        let fixtures = fixture_data_dir().expect("fixtures are checked in");
        let paths = ReferencePaths::resolve(Some(fixtures)).unwrap();
        assert_eq!(paths.root.as_path(), fixtures);
        assert!(paths.performance.is_dir());
    }
}
