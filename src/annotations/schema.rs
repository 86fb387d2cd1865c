use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP};

// None of these tables carries a foreign key into the catalog: rows
// reference their subject by a loose (subject_type, subject_id) tag and
// are reclaimed by the garbage collectors after the subject is deleted.

/// V 1
const ART_TABLE_V_1: Table = Table {
    name: "art",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("subject_type", &SqlType::Text, non_null = true),
        sqlite_column!("subject_id", &SqlType::Integer, non_null = true),
        sqlite_column!("kind", &SqlType::Text, non_null = true),
        sqlite_column!("mime", &SqlType::Text, non_null = true),
        sqlite_column!("size_bytes", &SqlType::Integer),
    ],
    indices: &[("idx_art_subject_id", "subject_id")],
};

const RATING_TABLE_V_1: Table = Table {
    name: "rating",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("user_id", &SqlType::Integer, non_null = true),
        sqlite_column!("subject_type", &SqlType::Text, non_null = true),
        sqlite_column!("subject_id", &SqlType::Integer, non_null = true),
        sqlite_column!("score", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_rating_subject_id", "subject_id")],
};

const USER_FLAG_TABLE_V_1: Table = Table {
    name: "user_flag",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("user_id", &SqlType::Integer, non_null = true),
        sqlite_column!("subject_type", &SqlType::Text, non_null = true),
        sqlite_column!("subject_id", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_user_flag_subject_id", "subject_id")],
};

const SHOUT_TABLE_V_1: Table = Table {
    name: "shout",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("user_id", &SqlType::Integer, non_null = true),
        sqlite_column!("subject_type", &SqlType::Text, non_null = true),
        sqlite_column!("subject_id", &SqlType::Integer, non_null = true),
        sqlite_column!("text", &SqlType::Text, non_null = true),
        sqlite_column!(
            "sticky",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_shout_subject_id", "subject_id")],
};

const USER_ACTIVITY_TABLE_V_1: Table = Table {
    name: "user_activity",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!("user_id", &SqlType::Integer, non_null = true),
        sqlite_column!("action", &SqlType::Text, non_null = true),
        sqlite_column!("subject_type", &SqlType::Text, non_null = true),
        sqlite_column!("subject_id", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_user_activity_subject_id", "subject_id")],
};

pub const ANNOTATION_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[
        ART_TABLE_V_1,
        RATING_TABLE_V_1,
        USER_FLAG_TABLE_V_1,
        SHOUT_TABLE_V_1,
        USER_ACTIVITY_TABLE_V_1,
    ],
    migration: None,
}];
