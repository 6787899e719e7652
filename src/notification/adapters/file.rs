//! Marker store persisted as a small text file.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::warn;

use crate::notification::{
    domain::HourBucket,
    ports::{MarkerStore, MarkerStoreError, MarkerStoreResult},
};

/// File name of the persisted marker inside the marker directory.
pub const MARKER_FILE_NAME: &str = "last-notified-hour";

/// Marker store keeping the last notified hour in `last-notified-hour`.
///
/// File access is confined to the directory handed to [`Self::open`]. An
/// unparsable file reads as no marker and is replaced by the next record.
#[derive(Debug, Clone)]
pub struct FileMarkerStore {
    dir: Arc<Dir>,
}

impl FileMarkerStore {
    /// Opens the marker directory.
    ///
    /// # Errors
    ///
    /// Returns [`MarkerStoreError::Persistence`] when the directory cannot be
    /// opened.
    pub fn open(path: &Utf8Path) -> MarkerStoreResult<Self> {
        let dir =
            Dir::open_ambient_dir(path, ambient_authority()).map_err(MarkerStoreError::persistence)?;
        Ok(Self { dir: Arc::new(dir) })
    }

    async fn run_blocking<F, T>(&self, f: F) -> MarkerStoreResult<T>
    where
        F: FnOnce(&Dir) -> MarkerStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || f(&dir))
            .await
            .map_err(|err| MarkerStoreError::persistence(std::io::Error::other(err.to_string())))?
    }
}

#[async_trait]
impl MarkerStore for FileMarkerStore {
    async fn last_notified(&self) -> MarkerStoreResult<Option<HourBucket>> {
        self.run_blocking(|dir| {
            let contents = match dir.read_to_string(MARKER_FILE_NAME) {
                Ok(contents) => contents,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(MarkerStoreError::persistence(err)),
            };
            let value = contents.trim();
            if value.is_empty() {
                return Ok(None);
            }
            match value.parse::<HourBucket>() {
                Ok(bucket) => Ok(Some(bucket)),
                Err(err) => {
                    warn!(error = %err, "unreadable notification marker ignored");
                    Ok(None)
                }
            }
        })
        .await
    }

    async fn record(&self, bucket: HourBucket) -> MarkerStoreResult<()> {
        self.run_blocking(move |dir| {
            dir.write(MARKER_FILE_NAME, bucket.to_string())
                .map_err(MarkerStoreError::persistence)
        })
        .await
    }
}
