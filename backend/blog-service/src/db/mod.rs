/// Database access layer
///
/// Repositories are free async functions over the SQLite pool; business
/// rules live one layer up in `services`. Migrations are embedded so the
/// binary and the test suite share one schema source.
pub mod comment_repo;
pub mod group_repo;
pub mod post_repo;
pub mod session_repo;
pub mod user_repo;

/// Embedded schema migrations, applied at startup and by test fixtures.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
