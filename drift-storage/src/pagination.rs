//! Keyset pagination over `id`-ordered tables.
//!
//! Offset-based `LIMIT/OFFSET` pagination degrades on the `functions`/
//! `call_edges`/`detections` tables once a scan has populated millions of
//! rows — the database still has to walk past every skipped row. Keyset
//! pagination instead carries the last-seen `id` as the cursor, so each
//! page is a single indexed range scan regardless of how deep into the
//! table it starts.

use drift_core::errors::StorageError;
use rusqlite::Connection;

use crate::queries::sqe;

/// One page of `id`-ordered rows plus the cursor to request the next one.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `Some(id)` of the last row in `items` if the page was full (there
    /// may be more), `None` once the table is exhausted.
    pub next_cursor: Option<i64>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// One page of rows from `table`, ordered by `id ASC`, starting strictly
/// after `after_id` (pass `None` for the first page). `map_row` returns
/// `(id, T)` so the cursor for the next page can be derived without a
/// separate id column accessor.
///
/// `table` and `select_columns` are trusted to come from this crate's own
/// query modules, never from external input — this is not a general SQL
/// builder, it only ever interpolates a fixed table name into the
/// `FROM`/`ORDER BY` clauses.
pub fn fetch_page_with_id<T>(
    conn: &Connection,
    table: &str,
    select_columns: &str,
    after_id: Option<i64>,
    page_size: usize,
    map_row: impl Fn(&rusqlite::Row<'_>) -> rusqlite::Result<(i64, T)>,
) -> Result<Page<T>, StorageError> {
    let sql = format!(
        "SELECT {select_columns} FROM {table} WHERE id > ?1 ORDER BY id ASC LIMIT ?2",
    );
    let mut stmt = conn.prepare(&sql).map_err(sqe)?;
    let rows = stmt
        .query_map(
            rusqlite::params![after_id.unwrap_or(0), (page_size + 1) as i64],
            &map_row,
        )
        .map_err(sqe)?;

    let mut keyed: Vec<(i64, T)> = Vec::with_capacity(page_size + 1);
    for row in rows {
        keyed.push(row.map_err(sqe)?);
    }

    let next_cursor = if keyed.len() > page_size {
        keyed.truncate(page_size);
        keyed.last().map(|(id, _)| *id)
    } else {
        None
    };

    Ok(Page { items: keyed.into_iter().map(|(_, item)| item).collect(), next_cursor })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DatabaseManager;

    #[test]
    fn pages_functions_by_id_with_cursor() {
        let db = DatabaseManager::open_in_memory().unwrap();
        db.with_reader(|conn| {
            for i in 0..5 {
                conn.execute(
                    "INSERT INTO functions (file, name, language, line, end_line, parameter_count, is_exported, is_async)
                     VALUES (?1, ?2, 'rust', 1, 2, 0, 0, 0)",
                    rusqlite::params![format!("f{i}.rs"), format!("fn{i}")],
                )
                .unwrap();
            }
            Ok(())
        })
        .unwrap();

        db.with_reader(|conn| {
            let page = fetch_page_with_id(
                conn,
                "functions",
                "id, name",
                None,
                3,
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .unwrap();
            assert_eq!(page.items.len(), 3);
            assert!(page.has_more());

            let next = fetch_page_with_id(
                conn,
                "functions",
                "id, name",
                page.next_cursor,
                3,
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .unwrap();
            assert_eq!(next.items.len(), 2);
            assert!(!next.has_more());
            Ok(())
        })
        .unwrap();
    }
}
