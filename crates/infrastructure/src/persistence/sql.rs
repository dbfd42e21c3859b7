//! SQL building blocks shared by the repositories

use application::ports::{PageRequest, SortOrder};
use chrono::{DateTime, SecondsFormat, Utc};
use domain::{BoundingBox, Coordinate};
use rusqlite::types::Value;
use rusqlite::{Connection, Row, TransactionBehavior, params_from_iter};

use super::error::conversion_error;

/// Dynamically assembled `WHERE` clause with positional parameters
#[derive(Debug, Default)]
pub struct SqlFilter {
    clauses: Vec<String>,
    values: Vec<Value>,
}

impl SqlFilter {
    fn bind(&mut self, value: impl Into<Value>) -> usize {
        self.values.push(value.into());
        self.values.len()
    }

    /// `column = value`
    pub fn eq(&mut self, column: &str, value: impl Into<Value>) {
        let idx = self.bind(value);
        self.clauses.push(format!("{column} = ?{idx}"));
    }

    /// Case-insensitive substring match on any of `columns`
    pub fn keyword(&mut self, columns: &[&str], keyword: &str) {
        let keyword = keyword.trim();
        if keyword.is_empty() || columns.is_empty() {
            return;
        }
        let idx = self.bind(format!("%{}%", escape_like(keyword)));
        let alternatives: Vec<String> = columns
            .iter()
            .map(|column| format!("{column} LIKE ?{idx} ESCAPE '\\'"))
            .collect();
        self.clauses.push(format!("({})", alternatives.join(" OR ")));
    }

    /// Rows whose `latitude`/`longitude` columns fall inside the box
    ///
    /// A box crossing the antimeridian becomes two longitude ranges.
    pub fn bounding_box(&mut self, bbox: &BoundingBox) {
        let min_lat = self.bind(bbox.min_lat);
        let max_lat = self.bind(bbox.max_lat);
        self.clauses
            .push(format!("latitude BETWEEN ?{min_lat} AND ?{max_lat}"));

        let ranges: Vec<String> = bbox
            .longitude_ranges()
            .into_iter()
            .map(|range| {
                let min = self.bind(range.min);
                let max = self.bind(range.max);
                format!("longitude BETWEEN ?{min} AND ?{max}")
            })
            .collect();
        self.clauses.push(format!("({})", ranges.join(" OR ")));
    }

    /// ` WHERE ...`, or an empty string without clauses
    pub fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Parameters for the `WHERE` clause
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// ` LIMIT ... OFFSET ...` bound after the filter parameters
    pub fn page_sql(&self, page: PageRequest, values: &mut Vec<Value>) -> String {
        values.extend_from_slice(&self.values);
        values.push(Value::Integer(i64::from(page.limit)));
        let limit = values.len();
        values.push(Value::Integer(i64::from(page.offset)));
        let offset = values.len();
        format!(" LIMIT ?{limit} OFFSET ?{offset}")
    }
}

/// Run `select` (which must end in an `ORDER BY`) in windows of `batch_size`
/// rows until a short window, returning every row
///
/// All windows are read inside one deferred transaction. With WAL journaling
/// that pins a single snapshot, so rows committed by other connections while
/// the windows are read cannot shift the offsets.
pub fn read_in_batches<T, F>(
    conn: &mut Connection,
    select: &str,
    filter: &SqlFilter,
    batch_size: u32,
    map: F,
) -> rusqlite::Result<Vec<T>>
where
    F: Fn(&Row<'_>) -> rusqlite::Result<T>,
{
    let batch_size = batch_size.max(1);
    let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
    let mut rows = Vec::new();

    {
        let mut values = Vec::new();
        let page_sql = filter.page_sql(PageRequest::batch(0, batch_size), &mut values);
        let offset_param = values.len() - 1;
        let mut stmt = tx.prepare(&format!("{select}{page_sql}"))?;

        let mut offset: u32 = 0;
        loop {
            values[offset_param] = Value::Integer(i64::from(offset));
            let before = rows.len();
            for row in stmt.query_map(params_from_iter(values.iter()), &map)? {
                rows.push(row?);
            }
            if rows.len() - before < batch_size as usize {
                break;
            }
            offset = offset.saturating_add(batch_size);
        }
    }

    tx.commit()?;
    Ok(rows)
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `ORDER BY` clause for a listing; `id` breaks ties so windows are stable
pub const fn order_by(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::NameAsc => " ORDER BY name COLLATE NOCASE ASC, id ASC",
        SortOrder::NameDesc => " ORDER BY name COLLATE NOCASE DESC, id ASC",
        SortOrder::OldestFirst => " ORDER BY created_at ASC, id ASC",
        // Distance is ranked in memory; the store only needs a stable order
        SortOrder::NewestFirst | SortOrder::Distance => " ORDER BY created_at DESC, id ASC",
    }
}

/// Fixed-width RFC 3339 so text ordering matches time ordering
pub fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

pub fn parse_coordinate(column: usize, latitude: f64, longitude: f64) -> rusqlite::Result<Coordinate> {
    Coordinate::new(latitude, longitude).map_err(|e| conversion_error(column, e))
}
