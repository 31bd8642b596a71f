use std::collections::HashSet;

/// One submitted answer to one question, recorded once and never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptRecord {
    pub question_id: String,
    pub category: String,
    pub period: String,
    pub was_correct: bool,
}

/// Append-only log of attempts for the active session. Nothing here
/// survives the process; there are no delete or update operations.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<AttemptRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never rejects and never deduplicates: answering the same question
    /// twice produces two records, both counted in summaries.
    pub fn append(&mut self, record: AttemptRecord) {
        self.records.push(record);
    }

    /// All records in insertion (chronological) order.
    pub fn all(&self) -> &[AttemptRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_mistakes(&self) -> bool {
        self.records.iter().any(|r| !r.was_correct)
    }

    /// Ids of every question answered incorrectly so far.
    pub fn mistake_ids(&self) -> HashSet<&str> {
        self.records
            .iter()
            .filter(|r| !r.was_correct)
            .map(|r| r.question_id.as_str())
            .collect()
    }
}
