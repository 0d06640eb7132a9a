//! Builds the `moz_places` search statement.
//!
//! Every search term and the row limit are bound as parameters; only the
//! fixed column, grouping and ordering fragments are spliced into the text.

use rusqlite::types::Value;

use crate::config::{Order, SearchConfig};

use super::functions::HOSTNAME_FN;

/// A statement ready to run: SQL text plus positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Split a query on single spaces. Runs of spaces yield empty terms, which
/// match every row.
pub fn split_terms(query: &str) -> Vec<&str> {
    query.split(' ').collect()
}

/// Wrap a term for substring matching with `LIKE`
fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

/// Ranking expression for `order`, in its aggregate form when grouping by host
fn order_key(order: Order, aggregate: bool) -> String {
    match (order, aggregate) {
        (Order::Frecency, false) => "frecency".to_string(),
        (Order::Visit, false) => "visit_count".to_string(),
        (Order::Recent, false) => "last_visit_date".to_string(),
        (Order::Url, false) => "url".to_string(),
        (Order::Frecency, true) => "sum(frecency)".to_string(),
        (Order::Visit, true) => "sum(visit_count)".to_string(),
        (Order::Recent, true) => "max(last_visit_date)".to_string(),
        (Order::Url, true) => format!("{HOSTNAME_FN}(url)"),
    }
}

/// Compose the search statement for `query` under `config`
pub fn build_search(query: &str, config: &SearchConfig) -> SearchQuery {
    let host_expr = format!("{HOSTNAME_FN}(url)");
    let mut params = Vec::new();

    let mut sql = if config.aggregate {
        format!("SELECT {host_expr}, title FROM moz_places WHERE ")
    } else {
        "SELECT DISTINCT url, title FROM moz_places WHERE ".to_string()
    };

    let predicates: Vec<String> = split_terms(query)
        .into_iter()
        .map(|term| {
            params.push(Value::Text(like_pattern(term)));
            let n = params.len();
            format!("((url LIKE ?{n}) OR (title LIKE ?{n}))")
        })
        .collect();
    sql.push_str(&predicates.join(" AND "));

    if config.aggregate {
        sql.push_str(&format!(" GROUP BY {host_expr}"));
    }

    params.push(Value::Integer(config.limit));
    sql.push_str(&format!(
        " ORDER BY {} DESC LIMIT ?{}",
        order_key(config.order, config.aggregate),
        params.len()
    ));

    SearchQuery { sql, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(aggregate: bool, order: Order, limit: i64) -> SearchConfig {
        SearchConfig {
            aggregate,
            order,
            limit,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_split_terms_single_spaces() {
        assert_eq!(split_terms("mozilla firefox"), vec!["mozilla", "firefox"]);
        assert_eq!(split_terms(""), vec![""]);
        assert_eq!(split_terms(" "), vec!["", ""]);
        assert_eq!(split_terms("a  b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_build_plain_visit_query() {
        let query = build_search("mozilla firefox", &config(false, Order::Visit, 5));
        assert_eq!(
            query.sql,
            "SELECT DISTINCT url, title FROM moz_places WHERE \
             ((url LIKE ?1) OR (title LIKE ?1)) AND ((url LIKE ?2) OR (title LIKE ?2)) \
             ORDER BY visit_count DESC LIMIT ?3"
        );
        assert_eq!(
            query.params,
            vec![
                Value::Text("%mozilla%".to_string()),
                Value::Text("%firefox%".to_string()),
                Value::Integer(5),
            ]
        );
    }

    #[test]
    fn test_build_aggregate_query() {
        let query = build_search("docs", &config(true, Order::Frecency, 3));
        assert_eq!(
            query.sql,
            "SELECT hostname(url), title FROM moz_places WHERE \
             ((url LIKE ?1) OR (title LIKE ?1)) \
             GROUP BY hostname(url) ORDER BY sum(frecency) DESC LIMIT ?2"
        );
    }

    #[test]
    fn test_order_keys() {
        assert_eq!(order_key(Order::Frecency, false), "frecency");
        assert_eq!(order_key(Order::Visit, true), "sum(visit_count)");
        assert_eq!(order_key(Order::Recent, false), "last_visit_date");
        assert_eq!(order_key(Order::Recent, true), "max(last_visit_date)");
        assert_eq!(order_key(Order::Url, false), "url");
        assert_eq!(order_key(Order::Url, true), "hostname(url)");
    }

    #[test]
    fn test_terms_are_bound_not_spliced() {
        let hostile = "x\") OR 1=1; DROP TABLE moz_places; --";
        let query = build_search(hostile, &config(false, Order::Url, 10));
        assert!(!query.sql.contains("DROP"));
        assert!(!query.sql.contains('"'));
        assert_eq!(
            query.params[0],
            Value::Text("%x\")%".to_string())
        );
        // One parameter per space-separated term, plus the limit
        assert_eq!(query.params.len(), split_terms(hostile).len() + 1);
    }
}
