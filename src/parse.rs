//! Structural contract with the listing page. This is the only module that knows the page layout:
//!
//! - A **day header** is an `h2`/`h3`/`h4` element ([`DAY_HEADER_SELECTOR`]) whose text passes
//!   [`looks_like_day_header`]. Other headings are section titles and are skipped.
//! - A day group's **fragments** are the element siblings that follow its header, up to the next
//!   sibling that is itself a day header. Headers are expected to be siblings of their event lists.
//! - **Event entries** are `a` elements ([`EVENT_LINK_SELECTOR`]) inside a fragment whose target
//!   contains [`EVENT_PATH_MARKER`]. See [`crate::extract`].

use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;
use tracing::{debug, error, info};

use crate::date::looks_like_day_header;
use crate::record::{DayGroup, RawPage};
use crate::{Error, Result};

pub const DAY_HEADER_SELECTOR: &str = "h2, h3, h4";
pub const EVENT_LINK_SELECTOR: &str = "a";
pub const EVENT_PATH_MARKER: &str = "/events/";

const HEADER_TAGS: [&str; 3] = ["h2", "h3", "h4"];

/// Parses the page on the blocking pool, `Html` isn't `Send`.
pub async fn parse_page(page: RawPage) -> Result<Vec<DayGroup>> {
    let url = page.url;
    let html = page.html;
    let groups = spawn_blocking(move || parse_day_groups(&html)).await??;
    info!(%url, day_groups = groups.len(), "parsed listing page");
    Ok(groups)
}

/// Splits the document into day groups, in page order.
/// Fails with [`Error::NoDayHeaders`] when there isn't a single day header on the page.
pub fn parse_day_groups(html: &str) -> Result<Vec<DayGroup>> {
    let doc = Html::parse_document(html);
    let header_selector = create_selector(DAY_HEADER_SELECTOR)?;

    let mut groups = Vec::new();
    for header in doc.select(&header_selector) {
        let label = element_text(header);
        if !looks_like_day_header(&label) {
            debug!(heading = %label, "skipping non-day heading");
            continue;
        }

        let fragments = header
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .take_while(|sibling| !is_day_header(*sibling))
            .map(|sibling| sibling.html())
            .collect();

        groups.push(DayGroup { label, fragments });
    }

    if groups.is_empty() {
        error!("no day headers found, the page structure has probably changed");
        return Err(Error::NoDayHeaders);
    }
    Ok(groups)
}

#[inline]
pub(crate) fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

/// Visible text with every text node trimmed and joined by a single space.
pub(crate) fn element_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_day_header(el: ElementRef) -> bool {
    HEADER_TAGS.contains(&el.value().name()) && looks_like_day_header(&element_text(el))
}
