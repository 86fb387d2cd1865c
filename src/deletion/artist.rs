//! Artist deletion: the cascade orchestrator.
//!
//! An artist is removed only after every one of its albums has been
//! removed; annotation garbage collection runs only after the artist row
//! delete reports that a row was actually removed.

use super::album::AlbumDeleter;
use crate::annotations::SubjectType;
use crate::catalog::{AlbumRepository, Artist, ArtistRepository};
use crate::gc::GarbageCollector;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Deliberately opaque, like [`AlbumDeletionError`](super::AlbumDeletionError):
/// the caller learns the cascade failed, the log names the failing album.
#[derive(Debug, Error)]
#[error("artist was not fully removed")]
pub struct ArtistDeletionError;

pub struct ArtistDeleter {
    album_deleter: Arc<dyn AlbumDeleter>,
    artists: Arc<dyn ArtistRepository>,
    albums: Arc<dyn AlbumRepository>,
    collectors: Vec<Arc<dyn GarbageCollector>>,
}

impl ArtistDeleter {
    pub fn new(
        album_deleter: Arc<dyn AlbumDeleter>,
        artists: Arc<dyn ArtistRepository>,
        albums: Arc<dyn AlbumRepository>,
        collectors: Vec<Arc<dyn GarbageCollector>>,
    ) -> Self {
        Self {
            album_deleter,
            artists,
            albums,
            collectors,
        }
    }

    /// Removes the artist together with all of its albums.
    ///
    /// Albums are deleted strictly in sequence; the first failure aborts
    /// the whole operation and leaves the artist row plus all remaining
    /// albums untouched. Albums already deleted in this pass are not
    /// rolled back. Callers must serialize concurrent calls for the same
    /// artist; there is no cross-step transaction.
    pub fn remove(&self, artist: &Artist) -> Result<(), ArtistDeletionError> {
        let album_ids = self.albums.album_ids_by_artist(artist.id).map_err(|e| {
            error!(
                component = "artist_deleter",
                "Failed to enumerate albums of artist {}: {:#}", artist.id, e
            );
            ArtistDeletionError
        })?;

        for album_id in album_ids {
            let album = self.albums.load_album(album_id).map_err(|e| {
                error!(
                    component = "artist_deleter",
                    "Failed to load album {}: {:#}", album_id, e
                );
                ArtistDeletionError
            })?;

            if self.album_deleter.delete(&album).is_err() {
                error!(
                    component = "artist_deleter",
                    "Error when deleting the album `{}`", album_id
                );
                return Err(ArtistDeletionError);
            }
        }

        let deleted = self.artists.delete_artist(artist.id).map_err(|e| {
            error!(
                component = "artist_deleter",
                "Error when deleting artist row {}: {:#}", artist.id, e
            );
            ArtistDeletionError
        })?;

        if deleted {
            for collector in &self.collectors {
                collector.collect_garbage(SubjectType::Artist, artist.id);
            }
        } else {
            warn!(
                component = "artist_deleter",
                "Artist row {} was not removed, skipping garbage collection", artist.id
            );
        }
        Ok(())
    }
}
