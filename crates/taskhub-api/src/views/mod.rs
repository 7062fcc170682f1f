//! Server-rendered HTML pages.
//!
//! Pages are assembled with `format!`; every user-supplied value passes
//! through [`escape`] first.

pub mod auth;
pub mod error;
pub mod task;

use axum::response::Html;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Path of the login page.
pub const LOGIN_PATH: &str = "/prijava/";

/// Characters percent-encoded in the `next` query parameter.
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escape text for use in HTML content and quoted attributes.
pub fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Whether `next` is a local path that is safe to redirect to.
///
/// Only absolute paths on this host qualify: `//evil.example` and
/// backslash tricks are rejected. Browsers drop tab, CR and LF from URLs,
/// so any control character or whitespace rejects the value as well.
pub fn is_safe_next(next: &str) -> bool {
    next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && !next.chars().any(|c| c.is_control() || c.is_whitespace())
}

/// `next` if it is safe, otherwise the task list.
pub fn safe_next(next: Option<&str>) -> &str {
    next.filter(|n| is_safe_next(n)).unwrap_or("/")
}

/// Login page URL, carrying `next` when it is a safe local path.
pub fn login_url(next: Option<&str>) -> String {
    match next.filter(|n| is_safe_next(n)) {
        Some(next) => format!(
            "{LOGIN_PATH}?next={}",
            utf8_percent_encode(next, NEXT_ENCODE_SET)
        ),
        None => LOGIN_PATH.to_string(),
    }
}

/// Wrap page content in the common document shell.
pub fn layout(title: &str, user: Option<&str>, body: &str) -> Html<String> {
    let nav = match user {
        Some(username) => format!(
            r#"<span>Pozdravljen, {}</span>
      <a href="/spremeni-geslo/">Spremeni geslo</a>
      <form method="post" action="/odjava/" class="inline"><button type="submit">Odjava</button></form>"#,
            escape(username)
        ),
        None => r#"<a href="/prijava/">Prijava</a>
      <a href="/registracija/">Registracija</a>"#
            .to_string(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="sl">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | TaskHub</title>
  </head>
  <body>
    <header>
      <a href="/" class="brand">TaskHub</a>
      {nav}
    </header>
    <main>
{body}
    </main>
  </body>
</html>
"#,
        title = escape(title),
    ))
}

/// `<ul class="errorlist">` for a field, or nothing when there are no errors.
pub fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!(r#"<ul class="errorlist">{items}</ul>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/opravilo/4/")), "/opravilo/4/");
        assert_eq!(safe_next(Some("//evil.example/")), "/");
        assert_eq!(safe_next(Some("https://evil.example/")), "/");
        assert_eq!(safe_next(Some("/\\evil.example")), "/");
        assert_eq!(safe_next(Some("/\t/evil.example/")), "/");
        assert_eq!(safe_next(Some("/\r\n/evil.example/")), "/");
        assert_eq!(safe_next(Some("/ /evil.example/")), "/");
        assert_eq!(safe_next(Some("")), "/");
        assert_eq!(safe_next(None), "/");
    }

    #[test]
    fn test_login_url_encodes_next() {
        assert_eq!(login_url(Some("/")), "/prijava/?next=/");
        assert_eq!(
            login_url(Some("/opravilo/4/?a=1&b=č")),
            "/prijava/?next=/opravilo/4/%3Fa%3D1%26b%3D%C4%8D"
        );
        assert_eq!(login_url(Some("//evil.example")), "/prijava/");
        assert_eq!(login_url(None), "/prijava/");
    }

    #[test]
    fn test_error_list() {
        assert_eq!(error_list(&[]), "");
        assert_eq!(
            error_list(&["a<b".to_string()]),
            r#"<ul class="errorlist"><li>a&lt;b</li></ul>"#
        );
    }
}
