use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
}

/// One condition on a top-level document field
#[derive(Debug, Clone)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOp,
    pub data: Value,
}

impl FilterCondition {
    /// Evaluate against an in-memory document. A missing field compares as `null`.
    pub fn matches(&self, doc: &Value) -> bool {
        let actual = doc.get(&self.field).unwrap_or(&Value::Null);
        match self.operator {
            FilterOp::Eq => actual == &self.data,
        }
    }
}

/// Skip/limit window for list reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Page {
    pub const DEFAULT_LIMIT: usize = 100;

    pub fn all() -> Self {
        Self { skip: 0, limit: usize::MAX }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: Self::DEFAULT_LIMIT }
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
