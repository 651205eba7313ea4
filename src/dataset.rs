//! The in-memory, load-ordered collection of records.

use crate::record::PassengerRecord;

/// Records in source row order. Built once by the loader, read-only after.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PassengerRecord>,
}

impl Dataset {
    pub fn records(&self) -> &[PassengerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PassengerRecord> {
        self.records.iter()
    }
}

impl From<Vec<PassengerRecord>> for Dataset {
    fn from(records: Vec<PassengerRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PassengerRecord;
    type IntoIter = std::slice::Iter<'a, PassengerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
