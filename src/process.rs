use std::path::PathBuf;

use chrono::{Days, Local, NaiveDate};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{origin_of, Config};
use crate::dedup::Deduplicator;
use crate::export::{output_path, write_table};
use crate::extract::extract_events;
use crate::parse::{parse_day_groups, parse_page};
use crate::record::{assemble, DayGroup, EventRecord, OutputTable};
use crate::request::{build_client, fetch_page};
use crate::{date, info_time, Result};

/// One full run: fetch, parse, dedupe, export.
/// `anchor` is the day the run started, it resolves the year-less day labels
/// and dates the output file.
/// Returns the path of the written file.
pub async fn process_site(config: &Config, anchor: NaiveDate) -> Result<PathBuf> {
    let start_time = Local::now();
    info_time!("Started scraping {}", config.listing_url);

    let client = build_client(config)?;
    let page = fetch_page(&client, &config.listing_url).await?;
    let origin = origin_of(&page.url)?;

    let groups = parse_page(page).await?;
    let records = collect_records(groups, anchor, config.window_days, &origin)?;
    let table = assemble(records);
    log_table(&table);

    let path = output_path(&config.output_dir, &config.file_prefix, anchor);
    write_table(&table, &path).await?;
    info_time!(start_time, "Wrote {} events to {}", table.len(), path.display());

    Ok(path)
}

/// Everything between the raw HTML and the numbered table, no IO.
pub fn scrape_html(html: &str, anchor: NaiveDate, config: &Config) -> Result<OutputTable> {
    let origin = config.origin()?;
    let groups = parse_day_groups(html)?;
    let table = assemble(collect_records(groups, anchor, config.window_days, &origin)?);
    log_table(&table);
    Ok(table)
}

/// Resolves every day group, keeps those inside `[anchor, anchor + window_days]`,
/// extracts their events and dedupes them. Keeps page order.
/// A window reaching past the last representable date is open-ended.
pub fn collect_records(
    groups: Vec<DayGroup>,
    anchor: NaiveDate,
    window_days: u32,
    origin: &Url,
) -> Result<Vec<EventRecord>> {
    let window_end = anchor
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);
    let mut dedup = Deduplicator::new();

    for group in groups {
        let event_date = match date::resolve_day_label(&group.label, anchor) {
            Ok(d) => d,
            Err(e) => {
                warn!(day = %group.label, reason = %e, "skipping day group, can't parse its date");
                continue;
            }
        };
        if event_date > window_end {
            debug!(day = %group.label, %event_date, "skipping day group outside the window");
            continue;
        }

        let events = extract_events(&group, event_date, origin)?;
        debug!(day = %group.label, %event_date, events = events.len(), "processed day group");
        dedup.extend(events);
    }

    if dedup.duplicates() > 0 {
        info!(duplicates = dedup.duplicates(), "dropped duplicate events");
    }
    Ok(dedup.into_admitted())
}

fn log_table(table: &OutputTable) {
    if table.is_empty() {
        warn!("day headers were found but no events survived");
    } else {
        info!(events = table.len(), "assembled events table");
    }
}
