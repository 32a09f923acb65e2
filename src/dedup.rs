use std::collections::HashSet;

use tracing::debug;

use crate::record::EventRecord;

/// Drops records whose `(date, name, link)` was already seen during this run.
/// Admitted records keep their arrival order.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<EventRecord>,
    admitted: Vec<EventRecord>,
    duplicates: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the record was new and got admitted.
    pub fn admit(&mut self, record: EventRecord) -> bool {
        if self.seen.contains(&record) {
            debug!(
                date = %record.date,
                name = %record.name,
                link = %record.link,
                "duplicate event"
            );
            self.duplicates += 1;
            return false;
        }
        self.seen.insert(record.clone());
        self.admitted.push(record);
        true
    }

    pub fn admitted(&self) -> &[EventRecord] {
        &self.admitted
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn into_admitted(self) -> Vec<EventRecord> {
        self.admitted
    }
}

impl Extend<EventRecord> for Deduplicator {
    fn extend<I: IntoIterator<Item = EventRecord>>(&mut self, iter: I) {
        for record in iter {
            self.admit(record);
        }
    }
}
