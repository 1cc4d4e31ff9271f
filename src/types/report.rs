use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeAction {
    Inserted,
    Updated,
}

impl std::fmt::Display for MergeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeAction::Inserted => write!(f, "inserted"),
            MergeAction::Updated => write!(f, "updated"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportSuccess {
    pub source: String,
    pub id: serde_json::Value,
    pub action: MergeAction,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportFailure {
    pub source: String,
    pub kind: String,
    pub message: String,
}

/// Outcome of one run over all sources, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub succeeded: Vec<ImportSuccess>,
    pub failed: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }
}
