use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::shapes::{shape_from_json, Shape, ShapeRecord, SkipReason};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} does not contain a JSON array of shapes")]
    NotAnArray { path: PathBuf },
    #[error("failed to serialize shapes: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Outcome of a successful load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Writes `shapes` as a pretty-printed JSON array in z-order, replacing any
/// existing file. Nothing is written if serialization fails.
pub fn save_document(path: impl AsRef<Path>, shapes: &[Shape]) -> StorageResult<()> {
    let path = path.as_ref();
    let records = shapes.iter().map(Shape::to_record).collect::<Vec<ShapeRecord>>();
    let contents = serde_json::to_string_pretty(&records).map_err(StorageError::Serialize)?;

    fs::write(path, contents).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), shapes = shapes.len(), "document saved");
    Ok(())
}

/// Reads a saved document. Elements that cannot become shapes are skipped and
/// counted in the report; only an unreadable file or a non-array top level fails.
pub fn load_document(path: impl AsRef<Path>) -> StorageResult<(Vec<Shape>, LoadReport)> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: Value = serde_json::from_str(&contents).map_err(|source| StorageError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(elements) = root else {
        return Err(StorageError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let mut report = LoadReport::default();
    let mut shapes = Vec::with_capacity(elements.len());
    for (index, element) in elements.iter().enumerate() {
        match shape_from_json(element) {
            Ok(shape) => {
                shapes.push(shape);
                report.loaded += 1;
            }
            Err(reason) => {
                report.skipped += 1;
                match reason {
                    SkipReason::UnknownType(_) => {
                        tracing::warn!(index, %reason, "skipping shape with unknown type");
                    }
                    _ => tracing::debug!(index, %reason, "skipping document element"),
                }
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped,
        "document loaded"
    );
    Ok((shapes, report))
}
