use chrono::NaiveDate;
use url::Url;

/// The fetched listing page.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: Url,
    pub html: String,
}

/// A day header label plus the markup of every element that follows it, up to the next day header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub label: String,
    pub fragments: Vec<String>,
}

/// One scraped event. `(date, name, link)` is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub name: String,
    pub link: String,
}

impl EventRecord {
    /// ISO `YYYY-MM-DD` form of the date.
    pub fn iso_date(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub serial: usize,
    pub record: EventRecord,
}

/// The result of a run, numbered rows in admission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTable {
    rows: Vec<TableRow>,
}

impl OutputTable {
    pub const HEADERS: [&'static str; 4] = ["S.no", "Date", "Event name", "Event link"];

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Numbers the records `1..=N` in the order they were given.
pub fn assemble(records: Vec<EventRecord>) -> OutputTable {
    let rows = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| TableRow {
            serial: i + 1,
            record,
        })
        .collect();
    OutputTable { rows }
}
