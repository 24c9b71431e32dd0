//! HTML fixtures shaped like the provider's profile and detail pages.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const AUTHOR: &str = "ABC123";

/// Profile page with one row per `(title, citations)`; row `i` links to
/// the detail page for `AUTHOR:i`.
#[must_use]
pub fn profile_page(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .enumerate()
        .map(|(i, (title, citations))| {
            format!(
                r#"<tr class="gsc_a_tr">
                     <td class="gsc_a_t">
                       <a href="javascript:void(0)" data-href="/citations?view_op=view_citation&amp;hl=en&amp;citation_for_view={AUTHOR}:{i}" class="gsc_a_at">{title}</a>
                     </td>
                     <td class="gsc_a_c"><a href="/scholar?cites={i}" class="gsc_a_ac gs_ibl">{citations}</a></td>
                   </tr>"#
            )
        })
        .collect();
    format!(r#"<html><body><table><tbody id="gsc_a_b">{body}</tbody></table></body></html>"#)
}

/// Detail page with optional publisher and eprint links.
#[must_use]
pub fn detail_page(landing: Option<&str>, eprint: Option<&str>) -> String {
    let title = landing.map_or_else(
        || "<div id=\"gsc_oci_title\">Untitled</div>".to_string(),
        |href| format!(r#"<a class="gsc_oci_title_link" href="{href}">Title</a>"#),
    );
    let ggi = eprint.map_or_else(String::new, |href| {
        format!(r#"<div class="gsc_oci_title_ggi"><a href="{href}">[PDF] example.org</a></div>"#)
    });
    format!("<html><body>{ggi}{title}</body></html>")
}

pub async fn mount_profile(server: &MockServer, rows: &[(&str, &str)], times: u64) {
    Mock::given(method("GET"))
        .and(path("/citations"))
        .and(query_param("user", AUTHOR))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(profile_page(rows), "text/html; charset=utf-8"),
        )
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_detail(server: &MockServer, row: usize, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path("/citations"))
        .and(query_param("citation_for_view", format!("{AUTHOR}:{row}")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html; charset=utf-8"))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_html(server: &MockServer, route: &str, html: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_pdf(server: &MockServer, route: &str, body: &[u8], times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/pdf")
                .set_body_bytes(body.to_vec()),
        )
        .expect(times)
        .mount(server)
        .await;
}
