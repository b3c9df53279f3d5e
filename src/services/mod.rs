// Business logic services

pub mod event_service;
pub mod stats_service;
pub mod task_service;

pub use event_service::{week_bounds, EventService};
pub use stats_service::StatsService;
pub use task_service::TaskService;

use futures::{Stream, TryStreamExt};
use sqlx::{postgres::PgRow, FromRow};

/// Drain a row stream into `T`s. A row that fails to decode is logged and
/// skipped; a failure of the query itself is returned.
pub(crate) async fn collect_rows<T, S>(mut rows: S, kind: &str) -> anyhow::Result<Vec<T>>
where
    S: Stream<Item = Result<PgRow, sqlx::Error>> + Send + Unpin,
    T: for<'r> FromRow<'r, PgRow> + Send,
{
    let mut items = Vec::new();
    while let Some(row) = rows.try_next().await? {
        match T::from_row(&row) {
            Ok(item) => items.push(item),
            Err(err) => tracing::warn!("Skipping unreadable {} row: {}", kind, err),
        }
    }
    Ok(items)
}
