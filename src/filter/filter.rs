use serde_json::Value;

use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{FilterCondition, FilterOp, Page, SqlResult};

/// Equality filter over top-level document fields.
///
/// Every store lookup goes through this type: the memory store evaluates it with
/// [`DocFilter::matches`], Postgres renders it with [`DocFilter::to_where_sql`].
#[derive(Debug, Clone, Default)]
pub struct DocFilter {
    conditions: Vec<FilterCondition>,
}

impl DocFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_owner(owner_id: &str) -> Self {
        Self::new().eq("owner_id", owner_id)
    }

    pub fn by_id(id: &str) -> Self {
        Self::new().eq("id", id)
    }

    pub fn by_email(email: &str) -> Self {
        Self::new().eq("email", email)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(FilterCondition { field: field.into(), operator: FilterOp::Eq, data: value.into() });
        self
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }

    /// WHERE clause body with `$n` placeholders numbered after `starting_param_index`
    pub fn to_where_sql(&self, starting_param_index: usize) -> Result<SqlResult, FilterError> {
        for condition in &self.conditions {
            Self::validate_field(&condition.field)?;
        }
        let (query, params) = FilterWhere::generate(&self.conditions, starting_param_index);
        Ok(SqlResult { query, params })
    }

    fn validate_field(name: &str) -> Result<(), FilterError> {
        let mut chars = name.chars();
        let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidField(name.to_string()));
        }
        Ok(())
    }
}

impl Page {
    /// Build a page from query-string values, capping the limit at the configured maximum
    pub fn new(skip: Option<i64>, limit: Option<i64>) -> Result<Self, FilterError> {
        let skip = skip.unwrap_or(0);
        let limit = limit.unwrap_or(Page::DEFAULT_LIMIT as i64);
        if skip < 0 { return Err(FilterError::InvalidOffset("skip must be non-negative".to_string())); }
        if limit < 0 { return Err(FilterError::InvalidLimit("limit must be non-negative".to_string())); }

        let max_limit = crate::config::CONFIG.filter.max_limit.unwrap_or(usize::MAX);
        let limit = limit as usize;
        let applied_limit = if limit > max_limit {
            if crate::config::CONFIG.filter.debug_logging {
                tracing::warn!("Limit {} exceeds max {}, capping to max", limit, max_limit);
            }
            max_limit
        } else {
            limit
        };

        Ok(Self { skip: skip as usize, limit: applied_limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_all_conditions() {
        let doc = json!({"id": "p1", "owner_id": "o1"});
        assert!(DocFilter::by_owner("o1").eq("id", "p1").matches(&doc));
        assert!(!DocFilter::by_owner("o1").eq("id", "p2").matches(&doc));
        assert!(DocFilter::new().matches(&doc));
    }

    #[test]
    fn missing_field_compares_as_null() {
        let doc = json!({"id": "p1"});
        assert!(DocFilter::new().eq("status", Value::Null).matches(&doc));
        assert!(!DocFilter::new().eq("id", Value::Null).matches(&doc));
    }

    #[test]
    fn rejects_injection_in_field_names() {
        let filter = DocFilter::new().eq("id' OR '1'='1", "x");
        assert!(matches!(filter.to_where_sql(0), Err(FilterError::InvalidField(_))));
    }

    #[test]
    fn page_rejects_negative_values() {
        assert!(Page::new(Some(-1), None).is_err());
        assert!(Page::new(None, Some(-5)).is_err());
        assert_eq!(Page::new(None, None).unwrap(), Page::default());
    }
}
