use serde_json::Value;

/// Equality filters plus an optional ascending sort, the only query
/// shapes the admin surface needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<(String, Value)>,
    order_by: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    pub fn order_asc(mut self, field: &str) -> Self {
        self.order_by = Some(field.to_string());
        self
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    /// Whether a JSON record satisfies every equality filter
    pub fn matches(&self, record: &Value) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| record.get(field).unwrap_or(&Value::Null) == expected)
    }

    /// Query-string parameters in the REST data API dialect
    /// (`field=eq.value`, `order=field.asc`).
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .filters
            .iter()
            .map(|(field, value)| (field.clone(), encode_filter(value)))
            .collect();

        if let Some(field) = &self.order_by {
            params.push(("order".to_string(), format!("{}.asc", field)));
        }

        params
    }
}

fn encode_filter(value: &Value) -> String {
    match value {
        Value::Null => "is.null".to_string(),
        Value::String(s) => format!("eq.{}", s),
        other => format!("eq.{}", other),
    }
}
