use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Filename of the OpenFlights airport list.
pub const AIRPORTS_FILENAME: &str = "airports.dat";
/// Filename of the OpenFlights route list.
pub const ROUTES_FILENAME: &str = "routes.dat";

/// Upstream location of the OpenFlights data files.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data";

const DATA_DIR_ENV: &str = "AIRROUTE_DATA_DIR";
const DATASET_SOURCE_ENV: &str = "AIRROUTE_DATASET_SOURCE";
const BASE_URL_ENV: &str = "AIRROUTE_DATASET_BASE_URL";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Locations of the two dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub airports: PathBuf,
    pub routes: PathBuf,
}

impl DatasetPaths {
    /// Paths for the standard filenames inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            airports: dir.join(AIRPORTS_FILENAME),
            routes: dir.join(ROUTES_FILENAME),
        }
    }

    /// `true` when both files are present.
    pub fn exists(&self) -> bool {
        self.airports.exists() && self.routes.exists()
    }

    fn files(&self) -> [(&'static str, &Path); 2] {
        [
            (AIRPORTS_FILENAME, self.airports.as_path()),
            (ROUTES_FILENAME, self.routes.as_path()),
        ]
    }
}

/// Where missing dataset files are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Download over HTTPS from a base URL.
    Remote(String),
    /// Copy from a local directory holding both files.
    Local(PathBuf),
}

impl DatasetSource {
    /// Resolve the source from the environment.
    ///
    /// `AIRROUTE_DATASET_SOURCE` selects a local directory; otherwise files
    /// are downloaded from `AIRROUTE_DATASET_BASE_URL` or the OpenFlights
    /// repository.
    pub fn from_env() -> Self {
        if let Some(local) = env::var_os(DATASET_SOURCE_ENV) {
            return DatasetSource::Local(PathBuf::from(local));
        }

        let base = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        DatasetSource::Remote(base)
    }
}

/// Resolve the default dataset directory using platform-specific project
/// directories.
pub fn default_dataset_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "airroute", "airroute").ok_or(Error::DatasetDirUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Ensure both dataset files are available locally and return their paths.
///
/// The directory is resolved in order:
/// 1. Explicit `target` argument when provided.
/// 2. `AIRROUTE_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
///
/// Files already present are reused; missing ones are fetched from
/// [`DatasetSource::from_env`].
pub fn ensure_dataset(target: Option<&Path>) -> Result<DatasetPaths> {
    let dir = resolve_dataset_dir(target)?;
    ensure_dataset_from(&dir, &DatasetSource::from_env())
}

/// Same as [`ensure_dataset`] with an explicit directory and source. Tests use
/// this to avoid touching process-wide environment variables.
pub fn ensure_dataset_from(dir: &Path, source: &DatasetSource) -> Result<DatasetPaths> {
    let paths = DatasetPaths::in_dir(dir);
    if paths.exists() {
        debug!(dir = %dir.display(), "dataset already present");
        return Ok(paths);
    }

    fs::create_dir_all(dir)?;

    for (file_name, destination) in paths.files() {
        if destination.exists() {
            continue;
        }

        match source {
            DatasetSource::Local(source_dir) => {
                copy_from_local(source_dir, file_name, destination)?
            }
            DatasetSource::Remote(base_url) => {
                let url = format!("{}/{}", base_url.trim_end_matches('/'), file_name);
                download_file(&url, destination)?
            }
        }
    }

    Ok(paths)
}

fn resolve_dataset_dir(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(explicit.to_path_buf());
    }

    if let Some(env_path) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(env_path));
    }

    default_dataset_dir()
}

fn copy_from_local(source_dir: &Path, file_name: &'static str, destination: &Path) -> Result<()> {
    let source = source_dir.join(file_name);
    if !source.is_file() {
        return Err(Error::DatasetSourceIncomplete {
            path: source_dir.to_path_buf(),
            file: file_name,
        });
    }

    debug!(
        source = %source.display(),
        destination = %destination.display(),
        "copying dataset file from local source"
    );
    fs::copy(&source, destination)?;
    Ok(())
}

fn download_file(url: &str, destination: &Path) -> Result<()> {
    info!(url, destination = %destination.display(), "downloading dataset file");

    let client = Client::builder()
        .user_agent(concat!("airroute/", env!("CARGO_PKG_VERSION")))
        .timeout(DOWNLOAD_TIMEOUT)
        .build()?;

    let mut response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::DownloadFailed {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // Stage next to the destination so the final rename stays on one filesystem.
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(parent)?;
    let bytes = io::copy(&mut response, &mut staged)?;
    staged.persist(destination).map_err(|err| err.error)?;

    debug!(url, bytes, "dataset file downloaded");
    Ok(())
}
