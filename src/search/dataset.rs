//! Read-only user data providers.
//!
//! A dataset file holds rows with `id`, `first_name`, `last_name`, `age`,
//! `about` and `gender`, either as a JSON array or as an XML document of
//! `<row>` elements under one root element. Files ending in `.xml` are read
//! as XML, everything else as JSON. Other row fields are ignored.
//! `Name` is built as `first_name + " " + last_name`.

use super::user::UserRecord;
use serde::Deserialize;
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open dataset file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error parsing dataset file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("error parsing XML dataset file {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },
}

/// Encoding of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Xml,
}

impl DatasetFormat {
    /// `.xml` (any case) is XML, anything else is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Self::Xml,
            _ => Self::Json,
        }
    }
}

/// Supplies the full, ordered set of users for a request.
pub trait UserSource: Debug + Send + Sync {
    /// # Errors
    /// Returns an error if the underlying data cannot be read.
    fn users(&self) -> Result<Arc<[UserRecord]>, DatasetError>;
}

#[derive(Deserialize)]
struct DatasetRow {
    id: i64,
    first_name: String,
    last_name: String,
    age: i64,
    about: String,
    gender: String,
}

#[derive(Deserialize)]
struct XmlDataset {
    #[serde(rename = "row", default)]
    rows: Vec<DatasetRow>,
}

impl From<DatasetRow> for UserRecord {
    fn from(row: DatasetRow) -> Self {
        Self {
            id: row.id,
            name: format!("{} {}", row.first_name, row.last_name),
            age: row.age,
            about: row.about,
            gender: row.gender,
        }
    }
}

/// Decode JSON dataset rows, keeping file order.
///
/// # Errors
/// Returns an error if `bytes` is not a JSON array of dataset rows.
pub fn parse(bytes: &[u8]) -> Result<Vec<UserRecord>, serde_json::Error> {
    let rows: Vec<DatasetRow> = serde_json::from_slice(bytes)?;
    Ok(rows.into_iter().map(UserRecord::from).collect())
}

/// Decode `<row>` elements of an XML dataset, keeping document order.
///
/// # Errors
/// Returns an error if `bytes` is not well-formed XML or a row is missing a field.
pub fn parse_xml(bytes: &[u8]) -> Result<Vec<UserRecord>, quick_xml::DeError> {
    let dataset: XmlDataset = quick_xml::de::from_reader(bytes)?;
    Ok(dataset.rows.into_iter().map(UserRecord::from).collect())
}

/// Read and decode `path`, picking the format from its extension.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
#[instrument]
pub fn load(path: &Path) -> Result<Vec<UserRecord>, DatasetError> {
    let bytes = fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = DatasetFormat::from_path(path);
    let users = match format {
        DatasetFormat::Json => parse(&bytes).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?,
        DatasetFormat::Xml => parse_xml(&bytes).map_err(|source| DatasetError::Xml {
            path: path.to_path_buf(),
            source,
        })?,
    };

    debug!("loaded {} users ({:?})", users.len(), format);

    Ok(users)
}

/// Users held in memory for the lifetime of the server.
#[derive(Debug, Clone)]
pub struct MemorySource {
    users: Arc<[UserRecord]>,
}

impl MemorySource {
    #[must_use]
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users: users.into(),
        }
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        load(path).map(Self::new)
    }
}

impl UserSource for MemorySource {
    fn users(&self) -> Result<Arc<[UserRecord]>, DatasetError> {
        Ok(Arc::clone(&self.users))
    }
}

/// Re-reads the dataset file on every call, so edits show up without a
/// restart.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserSource for FileSource {
    fn users(&self) -> Result<Arc<[UserRecord]>, DatasetError> {
        load(&self.path).map(Into::into)
    }
}
