//! Sitemap covering the fixed pages plus one report page per run.

use crate::ApiState;
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::DateTime;
use sanityboard_lib::{parse_run_date, RunStore};
use std::fmt::Write;

pub async fn sitemap(State(state): State<ApiState>) -> Response {
    let xml = build_sitemap(&state.store, &state.config.site_url);
    (
        [(header::CONTENT_TYPE, "application/xml".to_string())],
        xml,
    )
        .into_response()
}

/// One entry per static page, one per `/report/{id}` page, alpha-sorted by
/// id. `lastmod` comes from the run date when it parses; a run whose
/// documents fail to load still gets an entry, just without `lastmod`.
fn build_sitemap(store: &RunStore, site_url: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    push_entry(&mut xml, &format!("{site_url}/"), None);
    for id in store.list_run_ids() {
        let lastmod = store
            .load_run(&id)
            .ok()
            .and_then(|run| parse_run_date(&run.metadata.run_date))
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d").to_string());
        push_entry(
            &mut xml,
            &format!("{site_url}/report/{}", xml_escape(&id)),
            lastmod.as_deref(),
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_entry(xml: &mut String, loc: &str, lastmod: Option<&str>) {
    xml.push_str("  <url>\n");
    let _ = writeln!(xml, "    <loc>{loc}</loc>");
    if let Some(lastmod) = lastmod {
        let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
    }
    xml.push_str("    <changefreq>weekly</changefreq>\n");
    xml.push_str("    <priority>0.7</priority>\n");
    xml.push_str("  </url>\n");
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
