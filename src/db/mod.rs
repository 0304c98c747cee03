//! SQLite persistence for enriched hotel records.
//!
//! Records are append-only. There is no uniqueness constraint, so asking for
//! the same city twice stores the hotels twice.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::models::Hotel;

#[derive(Clone)]
pub struct HotelStore {
    pool: SqlitePool,
}

impl HotelStore {
    /// Connect to `database_url`, creating the database file if needed.
    ///
    /// # Example URLs
    /// - `sqlite://hotels.db` - File-based database
    /// - `sqlite::memory:` - In-memory database (use [`HotelStore::in_memory`])
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid DATABASE_URL: {}", database_url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    ///
    /// Each SQLite connection gets its own memory database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS hotels (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                address TEXT NOT NULL,
                website_url TEXT NOT NULL DEFAULT '',
                rating REAL NOT NULL DEFAULT 0,
                place_id TEXT NOT NULL,
                photo_url TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT 'null',
                city TEXT NOT NULL,
                scraped_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_hotels_city ON hotels(city);
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create hotels table")?;

        Ok(())
    }

    /// Store one record and return its row id
    pub async fn insert(&self, hotel: &Hotel) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO hotels
                (name, address, website_url, rating, place_id, photo_url, email, city, scraped_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&hotel.name)
        .bind(&hotel.address)
        .bind(&hotel.website_url)
        .bind(hotel.rating)
        .bind(&hotel.place_id)
        .bind(&hotel.photo_url)
        .bind(&hotel.email)
        .bind(&hotel.city)
        .bind(hotel.scraped_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to save hotel {}", hotel.name))?;

        Ok(result.last_insert_rowid())
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hotels")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[cfg(test)]
    pub async fn list_by_city(&self, city: &str) -> Result<Vec<Hotel>> {
        let hotels = sqlx::query_as::<_, Hotel>(
            r#"
            SELECT name, address, website_url, rating, place_id, photo_url, email, city, scraped_at
            FROM hotels WHERE city = ? ORDER BY id
            "#,
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await?;
        Ok(hotels)
    }
}
