use std::cmp::Ordering;

use serde_json::Value;

/// A select or delete against one table: equality filters, an optional
/// ordering and an optional row limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

impl Query {
    pub fn table(name: &str) -> Self {
        Self {
            table: name.to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a row satisfies every equality filter.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters
            .iter()
            .all(|f| row.get(&f.column).unwrap_or(&Value::Null) == &f.value)
    }

    /// PostgREST query-string pairs: `select=*`, `col=eq.value`,
    /// `order=col.asc|desc`, `limit=n`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for filter in &self.filters {
            params.push((filter.column.clone(), format!("eq.{}", literal(&filter.value))));
        }
        if let Some(order) = &self.order {
            let dir = match order.direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{}.{dir}", order.column)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Column ordering the way the store sorts: numbers numerically, RFC 3339
/// instants chronologically, other strings lexically, nulls after
/// everything else.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            match (x.parse::<jiff::Timestamp>(), y.parse::<jiff::Timestamp>()) {
                (Ok(tx), Ok(ty)) => tx.cmp(&ty),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
