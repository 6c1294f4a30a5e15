//! Board record persistence.
//!
//! [`BoardStore`] owns the `PostgreSQL` pool and speaks one table,
//! `boards`, keyed by `board_id` with a descending `created_at` index.
//! The sparse live-cell list is stored as a JSONB array of `[row, col]`
//! pairs. Records are write-once: creation either fully succeeds or
//! leaves no trace.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time
//! checked) to avoid requiring a live database at build time. All
//! queries are parameterized.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use uuid::Uuid;

use lifeway_types::{BoardId, BoardRecord, Dimensions};

use crate::error::DbError;

/// Pool size. Board access is short point reads and single-row inserts,
/// so a small pool goes a long way even under many concurrent sessions.
const MAX_CONNECTIONS: u32 = 10;

/// How long a caller waits for a connection before the repository
/// surfaces a backend error.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Server-side ceiling per statement. Every query here touches at most
/// one row by primary key; anything slower means a stuck backend, and
/// the session is better served by an error than by waiting.
const STATEMENT_TIMEOUT: &str = "45s";

/// The durable store of record for uploaded seeds.
#[derive(Clone)]
pub struct BoardStore {
    pool: PgPool,
}

impl BoardStore {
    /// Connect to `PostgreSQL` and verify the connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    /// Returns [`DbError::Postgres`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let pool = Self::pool_options()
            .connect_with(Self::connect_options(url)?)
            .await?;

        tracing::info!(max_connections = MAX_CONNECTIONS, "Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Create a store without establishing a connection.
    ///
    /// Connections are opened on first use, so this never touches the
    /// network. Used by tests that exercise validation paths which fail
    /// before any query runs.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    pub fn connect_lazy(url: &str) -> Result<Self, DbError> {
        let pool = Self::pool_options().connect_lazy_with(Self::connect_options(url)?);
        Ok(Self { pool })
    }

    fn pool_options() -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
    }

    fn connect_options(url: &str) -> Result<PgConnectOptions, DbError> {
        let options: PgConnectOptions = url
            .parse()
            .map_err(|e: sqlx::Error| DbError::Config(format!("Invalid database URL: {e}")))?;
        Ok(options
            .application_name("lifeway")
            .options([("statement_timeout", STATEMENT_TIMEOUT)]))
    }

    /// Run all pending migrations from the `migrations/` directory.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Migration`] if any migration fails.
    pub async fn run_migrations(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Insert a freshly minted board record.
    ///
    /// Board IDs are never reused, so a conflicting insert indicates a
    /// caller bug and surfaces as a database error.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails, and
    /// [`DbError::Serialization`] if the cell list cannot be encoded.
    pub async fn insert_board(&self, record: &BoardRecord) -> Result<(), DbError> {
        let cells = serde_json::to_value(&record.cells)?;

        sqlx::query(
            r"INSERT INTO boards (board_id, state, grid_rows, grid_cols, created_at, updated_at)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.board_id.into_inner())
        .bind(cells)
        .bind(record.dimensions.rows)
        .bind(record.dimensions.cols)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(board_id = %record.board_id, "Inserted board record");
        Ok(())
    }

    /// Fetch a board record by ID. Returns `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails, and
    /// [`DbError::Serialization`] if the stored cell list is corrupt.
    pub async fn get_board(&self, board_id: BoardId) -> Result<Option<BoardRecord>, DbError> {
        let row = sqlx::query_as::<_, BoardRow>(
            r"SELECT board_id, state, grid_rows, grid_cols, created_at, updated_at
              FROM boards
              WHERE board_id = $1",
        )
        .bind(board_id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map(BoardRow::into_record).transpose()
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}

/// A row from the `boards` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BoardRow {
    /// The board identifier.
    pub board_id: Uuid,
    /// Sparse live-cell list as a JSONB array of `[row, col]` pairs.
    pub state: serde_json::Value,
    /// Number of rows.
    pub grid_rows: i64,
    /// Number of columns.
    pub grid_cols: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl BoardRow {
    /// Decode the row into the shared [`BoardRecord`] form.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialization`] if the stored cell list is not
    /// an array of pairs, or [`DbError::Config`] if the stored
    /// dimensions violate the schema's positivity constraint.
    pub fn into_record(self) -> Result<BoardRecord, DbError> {
        let cells: Vec<(i64, i64)> = serde_json::from_value(self.state)?;
        let dimensions = Dimensions::new(self.grid_rows, self.grid_cols).ok_or_else(|| {
            DbError::Config(format!(
                "board {} has non-positive dimensions {}x{}",
                self.board_id, self.grid_rows, self.grid_cols
            ))
        })?;

        Ok(BoardRecord {
            board_id: BoardId::from(self.board_id),
            cells,
            dimensions,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_decodes_into_record() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let row = BoardRow {
            board_id: id,
            state: serde_json::json!([[0, 1], [1, 1]]),
            grid_rows: 2,
            grid_cols: 2,
            created_at: now,
            updated_at: now,
        };
        let record = row.into_record().expect("decodes");
        assert_eq!(record.board_id.into_inner(), id);
        assert_eq!(record.cells, vec![(0, 1), (1, 1)]);
        assert_eq!(record.dimensions, Dimensions::new(2, 2).expect("valid"));
    }

    #[test]
    fn row_with_bad_dimensions_is_rejected() {
        let now = Utc::now();
        let row = BoardRow {
            board_id: Uuid::new_v4(),
            state: serde_json::json!([]),
            grid_rows: 0,
            grid_cols: 3,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(row.into_record(), Err(DbError::Config(_))));
    }

    #[test]
    fn row_with_corrupt_state_is_rejected() {
        let now = Utc::now();
        let row = BoardRow {
            board_id: Uuid::new_v4(),
            state: serde_json::json!({"not": "pairs"}),
            grid_rows: 2,
            grid_cols: 2,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(row.into_record(), Err(DbError::Serialization(_))));
    }

    #[test]
    fn bad_database_url_is_a_config_error() {
        assert!(matches!(
            BoardStore::connect_lazy("not a url"),
            Err(DbError::Config(_))
        ));
    }
}
