mod models;
mod repository;
mod schema;
mod store;

pub use models::{Album, Artist, Track};
pub use repository::{AlbumRepository, ArtistRepository, TrackRepository};
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use store::SqliteCatalogStore;
