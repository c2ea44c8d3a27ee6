use serde_json::Value;

use super::types::{FilterCondition, FilterOp};

/// Renders equality conditions as JSONB predicates over the `body` column.
///
/// Values are bound as `jsonb` parameters so `"owner_id" = "abc"` compares the
/// JSON string, not its text form.
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    pub fn generate(conditions: &[FilterCondition], starting_param_index: usize) -> (String, Vec<Value>) {
        let mut filter_where = Self::new(starting_param_index);
        filter_where.build(conditions)
    }

    fn build(&mut self, conditions: &[FilterCondition]) -> (String, Vec<Value>) {
        let sql_conditions: Vec<String> = conditions
            .iter()
            .map(|condition| self.build_sql_condition(condition))
            .collect();

        let where_clause = if sql_conditions.is_empty() { "1=1".to_string() } else { sql_conditions.join(" AND ") };
        (where_clause, std::mem::take(&mut self.param_values))
    }

    fn build_sql_condition(&mut self, condition: &FilterCondition) -> String {
        let path = format!("\"body\" -> '{}'", condition.field);
        match condition.operator {
            FilterOp::Eq => {
                if condition.data.is_null() {
                    format!("({path} IS NULL OR {path} = 'null'::jsonb)")
                } else {
                    format!("{} = {}", path, self.param(condition.data.clone()))
                }
            }
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eq(field: &str, data: Value) -> FilterCondition {
        FilterCondition { field: field.to_string(), operator: FilterOp::Eq, data }
    }

    #[test]
    fn numbers_params_from_offset() {
        let (sql, params) = FilterWhere::generate(&[eq("owner_id", json!("o1")), eq("id", json!("p1"))], 1);
        assert_eq!(sql, "\"body\" -> 'owner_id' = $2 AND \"body\" -> 'id' = $3");
        assert_eq!(params, vec![json!("o1"), json!("p1")]);
    }

    #[test]
    fn empty_conditions_match_everything() {
        let (sql, params) = FilterWhere::generate(&[], 0);
        assert_eq!(sql, "1=1");
        assert!(params.is_empty());
    }

    #[test]
    fn null_equality_does_not_bind() {
        let (sql, params) = FilterWhere::generate(&[eq("status", Value::Null)], 0);
        assert!(sql.contains("IS NULL"));
        assert!(params.is_empty());
    }
}
