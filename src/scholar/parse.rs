//! HTML extraction for profile listings and publication detail pages.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::publication::Publication;

const PUBLICATION_TABLE: &str = "#gsc_a_b";
const PUBLICATION_ROW: &str = "tr.gsc_a_tr";
const ROW_TITLE: &str = "a.gsc_a_at";
const ROW_CITATIONS: &str = "a.gsc_a_ac";
const DETAIL_TITLE_LINK: &str = "a.gsc_oci_title_link";
const DETAIL_EPRINT_LINK: &str = ".gsc_oci_title_ggi a";

/// Links found on a publication detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DetailLinks {
    pub(crate) landing_page_url: Option<String>,
    pub(crate) eprint_url: Option<String>,
}

fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|error| format!("invalid selector '{css}': {error:?}"))
}

/// Parses one page of a profile's publication table.
///
/// `first_index` is the position of the first row in the whole listing; it
/// names untitled rows (`paper_<index>`).
pub(crate) fn parse_profile_rows(
    html: &str,
    page_url: &Url,
    first_index: usize,
) -> Result<Vec<Publication>, String> {
    let document = Html::parse_document(html);

    if document.select(&selector(PUBLICATION_TABLE)?).next().is_none() {
        return Err(
            "no publication table (unknown profile, or a consent/captcha page was served)"
                .to_string(),
        );
    }

    let row = selector(PUBLICATION_ROW)?;
    let title = selector(ROW_TITLE)?;
    let citations = selector(ROW_CITATIONS)?;

    Ok(document
        .select(&row)
        .enumerate()
        .map(|(offset, element)| {
            parse_row(element, page_url, first_index + offset, &title, &citations)
        })
        .collect())
}

fn parse_row(
    row: ElementRef<'_>,
    page_url: &Url,
    index: usize,
    title_selector: &Selector,
    citations_selector: &Selector,
) -> Publication {
    let title_link = row.select(title_selector).next();

    let title = title_link
        .map(element_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| format!("paper_{index}"));

    let citation_count = row
        .select(citations_selector)
        .next()
        .map_or(0, |cell| parse_citation_count(&element_text(cell)));

    let mut publication = Publication::new(title, citation_count);
    publication.detail_url = title_link
        .and_then(detail_href)
        .and_then(|href| page_url.join(href).ok())
        .map(String::from);
    publication
}

/// Row links carry the detail page in `data-href` on current layouts and in
/// `href` on older ones, where `href` may be a `javascript:` placeholder.
fn detail_href(link: ElementRef<'_>) -> Option<&str> {
    let element = link.value();
    element
        .attr("data-href")
        .or_else(|| element.attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.to_ascii_lowercase().starts_with("javascript:"))
}

/// Parses a citation cell. Empty cells mean zero; markers such as the
/// merged-citations asterisk and thousands separators are ignored.
pub(crate) fn parse_citation_count(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Extracts landing page and eprint links from a detail page.
pub(crate) fn parse_detail_links(html: &str, page_url: &Url) -> Result<DetailLinks, String> {
    let document = Html::parse_document(html);
    let first_link = |css: &str| -> Result<Option<String>, String> {
        let anchors = selector(css)?;
        Ok(document
            .select(&anchors)
            .filter_map(|anchor| anchor.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .find_map(|href| page_url.join(href).ok())
            .map(String::from))
    };

    Ok(DetailLinks {
        landing_page_url: first_link(DETAIL_TITLE_LINK)?,
        eprint_url: first_link(DETAIL_EPRINT_LINK)?,
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
