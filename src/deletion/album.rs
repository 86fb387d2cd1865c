//! Album deletion: one album and everything it owns.

use crate::annotations::SubjectType;
use crate::catalog::{Album, AlbumRepository, TrackRepository};
use crate::gc::GarbageCollector;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Deliberately opaque: callers only learn that the album was not fully
/// removed. The failing entity is named in the diagnostic log instead.
#[derive(Debug, Error)]
#[error("album was not fully removed")]
pub struct AlbumDeletionError;

pub trait AlbumDeleter: Send + Sync {
    /// Deletes the album and everything it owns. Partial state left behind
    /// by a mid-cascade failure is not rolled back.
    fn delete(&self, album: &Album) -> Result<(), AlbumDeletionError>;
}

/// Deletes an album's tracks one at a time, then the album row, then
/// reclaims annotation rows for every entity that was removed.
pub struct CascadingAlbumDeleter {
    tracks: Arc<dyn TrackRepository>,
    albums: Arc<dyn AlbumRepository>,
    collectors: Vec<Arc<dyn GarbageCollector>>,
}

impl CascadingAlbumDeleter {
    pub fn new(
        tracks: Arc<dyn TrackRepository>,
        albums: Arc<dyn AlbumRepository>,
        collectors: Vec<Arc<dyn GarbageCollector>>,
    ) -> Self {
        Self {
            tracks,
            albums,
            collectors,
        }
    }

    fn collect(&self, subject_type: SubjectType, subject_id: i64) {
        for collector in &self.collectors {
            collector.collect_garbage(subject_type, subject_id);
        }
    }
}

impl AlbumDeleter for CascadingAlbumDeleter {
    fn delete(&self, album: &Album) -> Result<(), AlbumDeletionError> {
        let track_ids = self.tracks.track_ids_by_album(album.id).map_err(|e| {
            error!(
                component = "album_deleter",
                "Failed to enumerate tracks of album {}: {:#}", album.id, e
            );
            AlbumDeletionError
        })?;

        for track_id in track_ids {
            match self.tracks.delete_track(track_id) {
                Ok(true) => self.collect(SubjectType::Track, track_id),
                Ok(false) => {
                    // A track enumerated moments ago has no row to delete:
                    // treat it like a failed delete and abort the cascade.
                    error!(
                        component = "album_deleter",
                        "Track {} of album {} was not removed", track_id, album.id
                    );
                    return Err(AlbumDeletionError);
                }
                Err(e) => {
                    error!(
                        component = "album_deleter",
                        "Error when deleting track {} of album {}: {:#}", track_id, album.id, e
                    );
                    return Err(AlbumDeletionError);
                }
            }
        }

        let deleted = self.albums.delete_album(album.id).map_err(|e| {
            error!(
                component = "album_deleter",
                "Error when deleting album row {}: {:#}", album.id, e
            );
            AlbumDeletionError
        })?;

        if deleted {
            self.collect(SubjectType::Album, album.id);
        } else {
            warn!(
                component = "album_deleter",
                "Album row {} was not removed, skipping garbage collection", album.id
            );
        }
        Ok(())
    }
}
