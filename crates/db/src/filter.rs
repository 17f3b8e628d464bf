//! Dynamic WHERE-clause builder for filtered list queries.
//!
//! List endpoints accept optional filters; each active filter adds one
//! condition with a positional placeholder and one typed bind value. The
//! same [`Filter`] binds both the page query and its `COUNT(*)` twin so
//! totals always agree with the returned items.

use serde::Serialize;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::{FromRow, PgPool, Postgres};
use wastewise_core::types::{Date, Timestamp};

use crate::models::page::Page;

/// Typed bind value for dynamically-built queries.
#[derive(Debug, Clone)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
    Bool(bool),
    Date(Date),
    Timestamp(Timestamp),
}

/// Accumulated conditions and their bind values.
#[derive(Debug, Default)]
pub struct Filter {
    conditions: Vec<String>,
    values: Vec<BindValue>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition. `{}` in `template` is replaced by the placeholder
    /// (`$n`) for `value`; use it more than once to reuse the same bind.
    pub fn push(&mut self, template: &str, value: BindValue) -> &mut Self {
        let placeholder = format!("${}", self.values.len() + 1);
        self.conditions.push(template.replace("{}", &placeholder));
        self.values.push(value);
        self
    }

    /// `column = value`, skipped when `value` is `None`.
    pub fn eq_opt(&mut self, column: &str, value: Option<BindValue>) -> &mut Self {
        if let Some(v) = value {
            self.push(&format!("{column} = {{}}"), v);
        }
        self
    }

    /// Case-insensitive substring match over any of `columns`. The needle is
    /// matched literally: `%`, `_` and `\` carry no pattern meaning.
    pub fn search_opt(&mut self, columns: &[&str], needle: Option<&str>) -> &mut Self {
        if let Some(n) = needle.map(str::trim).filter(|n| !n.is_empty()) {
            let clause = columns
                .iter()
                .map(|c| format!("{c} ILIKE {{}} ESCAPE '\\'"))
                .collect::<Vec<_>>()
                .join(" OR ");
            let pattern = format!("%{}%", escape_like(n));
            self.push(&format!("({clause})"), BindValue::Text(pattern));
        }
        self
    }

    /// `WHERE ...` or empty when there are no conditions.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Index of the next free placeholder (for LIMIT/OFFSET).
    pub fn next_index(&self) -> usize {
        self.values.len() + 1
    }

    /// Bind all values onto a row query.
    pub fn bind_as<'q, O>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for val in &self.values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Date(v) => q.bind(*v),
                BindValue::Timestamp(v) => q.bind(*v),
            };
        }
        q
    }

    /// Bind all values onto a scalar (`COUNT(*)`) query.
    pub fn bind_scalar<'q>(
        &'q self,
        mut q: QueryScalar<'q, Postgres, i64, PgArguments>,
    ) -> QueryScalar<'q, Postgres, i64, PgArguments> {
        for val in &self.values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Date(v) => q.bind(*v),
                BindValue::Timestamp(v) => q.bind(*v),
            };
        }
        q
    }
}

/// Escape LIKE metacharacters so `text` only matches itself.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Fetch one page of `table` rows matching `filter`, plus the total count.
///
/// `columns` and `order_by` are trusted SQL fragments owned by the calling
/// repository; only filter values are bound.
pub async fn fetch_page<O>(
    pool: &PgPool,
    table: &str,
    columns: &str,
    order_by: &str,
    filter: &Filter,
    limit: i64,
    offset: i64,
) -> Result<Page<O>, sqlx::Error>
where
    O: for<'r> FromRow<'r, PgRow> + Send + Unpin + Serialize,
{
    let where_clause = filter.where_clause();
    let idx = filter.next_index();

    let query = format!(
        "SELECT {columns} FROM {table} {where_clause} ORDER BY {order_by} \
         LIMIT ${idx} OFFSET ${}",
        idx + 1
    );
    let items = filter
        .bind_as(sqlx::query_as::<_, O>(&query))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let count_query = format!("SELECT COUNT(*)::BIGINT FROM {table} {where_clause}");
    let total = filter
        .bind_scalar(sqlx::query_scalar::<_, i64>(&count_query))
        .fetch_one(pool)
        .await?;

    Ok(Page {
        items,
        total,
        limit,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let f = Filter::new();
        assert_eq!(f.where_clause(), "");
        assert_eq!(f.next_index(), 1);
    }

    #[test]
    fn conditions_are_numbered_in_order() {
        let mut f = Filter::new();
        f.eq_opt("status", Some(BindValue::Text("Pending".into())))
            .eq_opt("user_id", None)
            .eq_opt("service_type", Some(BindValue::Text("bulk".into())));
        assert_eq!(f.where_clause(), "WHERE status = $1 AND service_type = $2");
        assert_eq!(f.next_index(), 3);
    }

    #[test]
    fn search_spans_columns_with_one_bind() {
        let mut f = Filter::new();
        f.search_opt(&["full_name", "email"], Some(" ada "));
        assert_eq!(
            f.where_clause(),
            r"WHERE (full_name ILIKE $1 ESCAPE '\' OR email ILIKE $1 ESCAPE '\')"
        );
        assert_eq!(f.next_index(), 2);
    }

    #[test]
    fn search_needle_is_matched_literally() {
        assert_eq!(escape_like("ada"), "ada");
        assert_eq!(escape_like("100%"), r"100\%");
        assert_eq!(escape_like("a_b"), r"a\_b");
        assert_eq!(escape_like(r"c:\x"), r"c:\\x");

        let mut f = Filter::new();
        f.search_opt(&["message"], Some("_"));
        match &f.values[0] {
            BindValue::Text(pattern) => assert_eq!(pattern, r"%\_%"),
            other => panic!("unexpected bind {other:?}"),
        }
    }

    #[test]
    fn blank_search_is_ignored() {
        let mut f = Filter::new();
        f.search_opt(&["message"], Some("   "));
        assert_eq!(f.where_clause(), "");
    }

    #[test]
    fn custom_template() {
        let mut f = Filter::new();
        f.push("created_at >= {}", BindValue::BigInt(0));
        assert_eq!(f.where_clause(), "WHERE created_at >= $1");
    }
}
