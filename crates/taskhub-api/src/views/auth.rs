//! Login, registration, and password change pages.

use axum::response::Html;

use taskhub_service::form::FormErrors;

use super::{error_list, escape, layout};

/// Login form. Credential failures are listed under the `__all__` key.
pub fn login_page(username: &str, next: &str, errors: &FormErrors) -> Html<String> {
    let body = format!(
        r#"      <h1>Prijava</h1>
      {form_errors}
      <form method="post" action="/prijava/">
        <input type="hidden" name="next" value="{next}">
        <p>
          <label for="id_username">Uporabniško ime</label>
          <input type="text" name="username" id="id_username" value="{username}" maxlength="150" autofocus required>
          {username_errors}
        </p>
        <p>
          <label for="id_password">Geslo</label>
          <input type="password" name="password" id="id_password" required>
          {password_errors}
        </p>
        <button type="submit">Prijava</button>
      </form>
      <p>Še nimate računa? <a href="/registracija/">Registracija</a></p>"#,
        form_errors = error_list(errors.field("__all__")),
        next = escape(next),
        username = escape(username),
        username_errors = error_list(errors.field("username")),
        password_errors = error_list(errors.field("password")),
    );
    layout("Prijava", None, &body)
}

/// Registration form with per-field errors and the password rules.
pub fn register_page(username: &str, errors: &FormErrors, help_texts: &[String]) -> Html<String> {
    let body = format!(
        r#"      <h1>Registracija</h1>
      <form method="post" action="/registracija/">
        <p>
          <label for="id_username">Uporabniško ime</label>
          <input type="text" name="username" id="id_username" value="{username}" maxlength="150" autofocus required>
          {username_errors}
        </p>
        <p>
          <label for="id_password">Geslo</label>
          <input type="password" name="password" id="id_password" required>
          {password_errors}
          {help}
        </p>
        <p>
          <label for="id_password_confirmation">Potrditev gesla</label>
          <input type="password" name="password_confirmation" id="id_password_confirmation" required>
          {confirmation_errors}
        </p>
        <button type="submit">Registracija</button>
      </form>
      <p>Že imate račun? <a href="/prijava/">Prijava</a></p>"#,
        username = escape(username),
        username_errors = error_list(errors.field("username")),
        password_errors = error_list(errors.field("password")),
        confirmation_errors = error_list(errors.field("password_confirmation")),
        help = help_list(help_texts),
    );
    layout("Registracija", None, &body)
}

/// Password change form for a logged-in user.
pub fn password_change_page(user: &str, errors: &FormErrors, help_texts: &[String]) -> Html<String> {
    let body = format!(
        r#"      <h1>Sprememba gesla</h1>
      <form method="post" action="/spremeni-geslo/">
        <p>
          <label for="id_current_password">Trenutno geslo</label>
          <input type="password" name="current_password" id="id_current_password" autofocus required>
          {current_errors}
        </p>
        <p>
          <label for="id_password">Novo geslo</label>
          <input type="password" name="password" id="id_password" required>
          {password_errors}
          {help}
        </p>
        <p>
          <label for="id_password_confirmation">Potrditev novega gesla</label>
          <input type="password" name="password_confirmation" id="id_password_confirmation" required>
          {confirmation_errors}
        </p>
        <button type="submit">Shrani</button>
        <a href="/">Prekliči</a>
      </form>"#,
        current_errors = error_list(errors.field("current_password")),
        password_errors = error_list(errors.field("password")),
        confirmation_errors = error_list(errors.field("password_confirmation")),
        help = help_list(help_texts),
    );
    layout("Sprememba gesla", Some(user), &body)
}

fn help_list(help_texts: &[String]) -> String {
    if help_texts.is_empty() {
        return String::new();
    }
    let items: String = help_texts
        .iter()
        .map(|h| format!("<li>{}</li>", escape(h)))
        .collect();
    format!(r#"<ul class="helptext">{items}</ul>"#)
}
