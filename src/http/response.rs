//! Response rendering.
//!
//! # Responsibilities
//! - Render a resolved Record as the go-import HTML page
//! - Map lookup outcomes to status codes (200, 404, 500)
//!
//! # Design Decisions
//! - Every interpolated value is HTML-escaped
//! - Bodies are small and fully buffered

use std::fmt::Write;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::Record;

/// Body returned for paths no rule covers.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Body returned by the liveness endpoint.
pub const PONG_BODY: &str = "pong";

/// Render the HTML page for `record`, with docs under `docs_base_url`.
pub fn render_page(record: &Record, docs_base_url: &str) -> Result<String, std::fmt::Error> {
    let docs_url = record.docs_url(docs_base_url);
    let link_text = docs_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(&docs_url);

    let mut page = String::with_capacity(512);
    writeln!(page, "<!DOCTYPE html>")?;
    writeln!(page, "<html>")?;
    writeln!(page, "<head>")?;
    writeln!(
        page,
        r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"/>"#
    )?;
    writeln!(
        page,
        r#"<meta name="go-import" content="{}">"#,
        escape(&record.go_import())
    )?;
    writeln!(
        page,
        r#"<meta http-equiv="refresh" content="0; url={}">"#,
        escape(&docs_url)
    )?;
    writeln!(page, "</head>")?;
    writeln!(page, "<body>")?;
    writeln!(
        page,
        r#"Redirecting to docs at <a href="{}">{}</a>..."#,
        escape(&docs_url),
        escape(link_text)
    )?;
    writeln!(page, "</body>")?;
    writeln!(page, "</html>")?;
    Ok(page)
}

/// 200 response carrying the rendered page, or 500 if rendering failed.
pub fn redirect_response(record: &Record, docs_base_url: &str) -> Response {
    match render_page(record, docs_base_url) {
        Ok(page) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            page,
        )
            .into_response(),
        Err(e) => error_response(&e.to_string()),
    }
}

pub fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        NOT_FOUND_BODY,
    )
        .into_response()
}

pub fn pong_response() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        PONG_BODY,
    )
        .into_response()
}

pub fn error_response(message: &str) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, message.to_string()).into_response()
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            import_root: "9fans.net/go".into(),
            vcs: "git".into(),
            vcs_root: "https://github.com/9fans/go".into(),
            suffix: "/acme/editinacme".into(),
        }
    }

    #[test]
    fn test_page_contains_tags() {
        let page = render_page(&record(), "https://godoc.org").unwrap();
        assert!(page.contains(
            r#"<meta name="go-import" content="9fans.net/go git https://github.com/9fans/go">"#
        ));
        assert!(page.contains(
            r#"<meta http-equiv="refresh" content="0; url=https://godoc.org/9fans.net/go/acme/editinacme">"#
        ));
        assert!(page.contains(
            r#"<a href="https://godoc.org/9fans.net/go/acme/editinacme">godoc.org/9fans.net/go/acme/editinacme</a>"#
        ));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut r = record();
        r.suffix = "/<script>\"x\"".into();
        let page = render_page(&r, "https://godoc.org").unwrap();
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;&#34;x&#34;"));
    }

    #[tokio::test]
    async fn test_status_codes() {
        assert_eq!(redirect_response(&record(), "https://godoc.org").status(), StatusCode::OK);
        assert_eq!(not_found_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(pong_response().status(), StatusCode::OK);
        assert_eq!(error_response("boom").status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
