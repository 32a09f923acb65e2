use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};
use url::Url;

use crate::parse::{create_selector, element_text, EVENT_LINK_SELECTOR, EVENT_PATH_MARKER};
use crate::record::{DayGroup, EventRecord};
use crate::{Result, ValidationError};

/// Extracts the event records of one day group, in page order.
/// Malformed entries are logged and dropped, they never fail the group.
pub fn extract_events(
    group: &DayGroup,
    date: NaiveDate,
    origin: &Url,
) -> Result<Vec<EventRecord>> {
    let link_selector = create_selector(EVENT_LINK_SELECTOR)?;

    let mut records = Vec::new();
    for fragment in &group.fragments {
        let fragment = Html::parse_fragment(fragment);
        for anchor in fragment.select(&link_selector) {
            match extract_entry(anchor, date, origin) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => warn!(day = %group.label, %date, reason = %e, "skipping event entry"),
            }
        }
    }
    Ok(records)
}

/// Turns one anchor into a record.
/// `Ok(None)` means the anchor isn't an event entry at all (navigation, artist pages, ...).
pub fn extract_entry(
    anchor: ElementRef,
    date: NaiveDate,
    origin: &Url,
) -> core::result::Result<Option<EventRecord>, ValidationError> {
    let text = element_text(anchor);
    let href = match anchor.value().attr("href").map(str::trim) {
        Some(href) if !href.is_empty() => href,
        _ => return Err(ValidationError::MissingLink { name: text }),
    };
    if !href.contains(EVENT_PATH_MARKER) {
        debug!(href, "not an event link");
        return Ok(None);
    }

    let link = origin
        .join(href)
        .map_err(|reason| ValidationError::BadLink {
            href: href.to_string(),
            reason,
        })?
        .to_string();

    let name = strip_price(&text).to_string();
    if name.is_empty() {
        return Err(ValidationError::EmptyName { link });
    }

    Ok(Some(EventRecord { date, name, link }))
}

/// Cards end with the price, e.g. `"Night Fever 15 €"`. Keeps the text before the first `€`
/// and drops a trailing amount token made of digits, `.` and `,`.
pub fn strip_price(text: &str) -> &str {
    let before = text.split('€').next().unwrap_or_default().trim_end();
    if !text.contains('€') {
        return before.trim();
    }
    let is_amount = |token: &str| {
        token.chars().any(|c| c.is_ascii_digit())
            && token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    };
    match before.rsplit_once(char::is_whitespace) {
        Some((rest, last)) if is_amount(last) => rest.trim(),
        None if is_amount(before) => "",
        _ => before.trim(),
    }
}
