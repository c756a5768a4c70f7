//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        username -> Varchar,
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notes; `author` is the owner's username copied at write time.
    notes (id) {
        id -> Int8,
        user_id -> Int8,
        title -> Varchar,
        text -> Text,
        author -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(notes -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, notes);
