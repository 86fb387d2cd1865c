mod album;
mod artist;

pub use album::{AlbumDeleter, AlbumDeletionError, CascadingAlbumDeleter};
pub use artist::{ArtistDeleter, ArtistDeletionError};
