//! Error pages.

use axum::response::Html;

use super::{escape, layout};

/// 404 page.
pub fn not_found_page() -> Html<String> {
    layout(
        "Ni najdeno",
        None,
        r#"      <h1>Stran ne obstaja</h1>
      <p>Iskana stran ne obstaja ali do nje nimate dostopa.</p>
      <p><a href="/">Nazaj na seznam opravil</a></p>"#,
    )
}

/// Generic error page with a short explanation.
pub fn error_page(title: &str, message: &str) -> Html<String> {
    let body = format!(
        r#"      <h1>{}</h1>
      <p>{}</p>
      <p><a href="/">Nazaj na seznam opravil</a></p>"#,
        escape(title),
        escape(message)
    );
    layout(title, None, &body)
}
