mod models;
mod repository;
mod schema;
mod store;

pub use models::{Art, Rating, Shout, SubjectType, UserActivity, UserFlag};
pub use repository::ShoutRepository;
pub use schema::ANNOTATION_VERSIONED_SCHEMAS;
pub use store::SqliteAnnotationStore;
