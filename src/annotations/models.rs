//! Auxiliary records attached to catalog entities.
//!
//! Every row carries a `(subject_type, subject_id)` pair referencing the
//! entity it annotates. The reference is a loose tag, not a foreign key:
//! when the subject is deleted the rows become orphans and are reclaimed
//! by the garbage collectors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of catalog entity an annotation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    Artist,
    Album,
    Track,
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Artist => "artist",
            SubjectType::Album => "album",
            SubjectType::Track => "track",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "artist" => Some(SubjectType::Artist),
            "album" => Some(SubjectType::Album),
            "track" => Some(SubjectType::Track),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cover or portrait art stored for a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Art {
    pub id: i64,
    pub subject_type: SubjectType,
    pub subject_id: i64,
    /// "default", "thumb", ...
    pub kind: String,
    pub mime: String,
    pub size_bytes: Option<i64>,
}

/// A user's score for a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub subject_type: SubjectType,
    pub subject_id: i64,
    pub score: u8,
    pub created: DateTime<Utc>,
}

/// A user's favorite marker on a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFlag {
    pub id: i64,
    pub user_id: i64,
    pub subject_type: SubjectType,
    pub subject_id: i64,
    pub created: DateTime<Utc>,
}

/// A comment posted on a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shout {
    pub id: i64,
    pub user_id: i64,
    pub subject_type: SubjectType,
    pub subject_id: i64,
    pub text: String,
    pub sticky: bool,
    pub created: DateTime<Utc>,
}

/// A row in the user activity feed ("played", "rated", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserActivity {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub subject_type: SubjectType,
    pub subject_id: i64,
    pub created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_type_string_roundtrip() {
        for subject_type in [SubjectType::Artist, SubjectType::Album, SubjectType::Track] {
            assert_eq!(
                SubjectType::parse(subject_type.as_str()),
                Some(subject_type)
            );
        }
        assert_eq!(SubjectType::parse("playlist"), None);
    }
}
