use std::fs;
use std::path::{Path, PathBuf};

use dataset::DatasetIndex;
use scene::RegionGeometry;

use crate::dataset_csv::{DatasetLoadError, records_from_csv_str};
use crate::region_geojson::{RegionGeometryError, regions_from_geojson_str};

#[derive(Debug)]
pub enum InputLoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Regions {
        path: PathBuf,
        source: RegionGeometryError,
    },
    Dataset {
        path: PathBuf,
        source: DatasetLoadError,
    },
}

impl std::fmt::Display for InputLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputLoadError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            InputLoadError::Regions { path, source } => {
                write!(f, "failed to parse regions {}: {source}", path.display())
            }
            InputLoadError::Dataset { path, source } => {
                write!(f, "failed to parse dataset {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for InputLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputLoadError::Io { source, .. } => Some(source),
            InputLoadError::Regions { source, .. } => Some(source),
            InputLoadError::Dataset { source, .. } => Some(source),
        }
    }
}

fn read(path: &Path) -> Result<String, InputLoadError> {
    fs::read_to_string(path).map_err(|e| InputLoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn load_regions_file(path: impl AsRef<Path>) -> Result<Vec<RegionGeometry>, InputLoadError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading regions");
    let payload = read(path)?;
    regions_from_geojson_str(&payload).map_err(|e| InputLoadError::Regions {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn load_dataset_file(path: impl AsRef<Path>) -> Result<DatasetIndex, InputLoadError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading dataset");
    let payload = read(path)?;
    let records = records_from_csv_str(&payload).map_err(|e| InputLoadError::Dataset {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(DatasetIndex::build(records))
}

/// Startup inputs are never fatal: a failed load is logged and replaced by
/// an empty value so interaction keeps running.
pub fn or_empty<T: Default>(what: &str, result: Result<T, InputLoadError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(input = what, error = %e, "input load failed; continuing without it");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{InputLoadError, load_dataset_file, load_regions_file, or_empty};

    /// A file in its own temp directory, removed with the directory on drop.
    struct ScratchFile {
        dir: PathBuf,
        path: PathBuf,
    }

    impl ScratchFile {
        fn new(name: &str, contents: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("formats-loader-{}-{name}", std::process::id()));
            std::fs::create_dir_all(&dir).expect("tmp dir");
            let path = dir.join(name);
            std::fs::write(&path, contents).expect("write");
            Self { dir, path }
        }
    }

    impl Drop for ScratchFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let result = load_regions_file("/definitely/not/here.geojson");
        assert!(matches!(result, Err(InputLoadError::Io { .. })));
        let regions = or_empty("regions", result);
        assert!(regions.is_empty());
    }

    #[test]
    fn loads_dataset_into_an_index() {
        let csv = "code,name,total_net_migration\nMX,Mexico,-50000\n";
        let scratch = ScratchFile::new("db.csv", csv);
        let index = load_dataset_file(&scratch.path).expect("load");
        assert_eq!(index.len(), 1);
        assert!(index.lookup(Some("mx"), None).is_some());
    }

    #[test]
    fn malformed_regions_report_the_path() {
        let scratch = ScratchFile::new("bad.geojson", "{\"type\":\"Topology\"}");
        let err = load_regions_file(&scratch.path).expect_err("not a collection");
        assert!(err.to_string().contains("bad.geojson"));
    }

    #[test]
    fn scratch_files_are_removed_on_drop() {
        let scratch = ScratchFile::new("gone.csv", "code\n");
        let dir = scratch.dir.clone();
        assert!(scratch.path.exists());
        drop(scratch);
        assert!(!dir.exists());
    }
}
