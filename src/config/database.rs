//! Database configuration module.
//!
//! Handles the `SQLite` connection for the local quote store and creates tables from the
//! entity definitions with `SeaORM`'s `Schema::create_table_from_entity`, so the schema always
//! matches the Rust structs without hand-written SQL.

use crate::entities::Quote;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/nerdhub_bot.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, or the default
/// local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// When the default URL is used, the `data/` directory is created first.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all(Path::new("data"))?;
    }

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables that do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut quote_table = schema.create_table_from_entity(Quote);
    quote_table.if_not_exists();

    db.execute(builder.build(&quote_table)).await?;

    Ok(())
}

/// Checks that the database still answers.
pub async fn is_connected(db: &DatabaseConnection) -> bool {
    db.ping().await.is_ok()
}
