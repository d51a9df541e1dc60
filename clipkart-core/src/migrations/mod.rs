//! User database migrations - embedded SQL files
//!
//! Each migration is a tuple of (name, sql_content), applied in order.
//! New migrations get the next NNN_ prefix and an entry at the end.

pub const MIGRATIONS: &[(&str, &str)] = &[
    ("000_migrations.sql", include_str!("000_migrations.sql")),
    ("001_users.sql", include_str!("001_users.sql")),
];
