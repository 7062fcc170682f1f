//! Task pages: list, detail, create/edit form, delete confirmation.

use axum::response::Html;

use taskhub_entity::task::{TITLE_MAX_LENGTH, Task};
use taskhub_service::form::FormErrors;
use taskhub_service::task::TaskOverview;

use super::{error_list, escape, layout};

const DATE_FORMAT: &str = "%d. %m. %Y %H:%M";

/// The requesting user's task list.
pub fn list_page(user: &str, overview: &TaskOverview) -> Html<String> {
    let rows: String = if overview.tasks.is_empty() {
        "        <li class=\"empty\">Ni opravil.</li>\n".to_string()
    } else {
        overview
            .tasks
            .iter()
            .map(|task| {
                format!(
                    r#"        <li class="{class}">
          <a href="/opravilo/{id}/">{title}</a>
          <a href="/posodobi-opravilo/{id}/">Uredi</a>
          <a href="/izbrisi-opravilo/{id}/">Izbriši</a>
        </li>
"#,
                    class = if task.completed { "done" } else { "open" },
                    id = task.id,
                    title = escape(task.display_title()),
                )
            })
            .collect()
    };

    let body = format!(
        r#"      <h1>Opravila</h1>
      <p class="summary">Nedokončana opravila: <strong>{incomplete}</strong></p>
      <p><a href="/ustvari-opravilo/">Dodaj opravilo</a></p>
      <ul class="tasks">
{rows}      </ul>"#,
        incomplete = overview.incomplete,
    );
    layout("Opravila", Some(user), &body)
}

/// One task.
pub fn detail_page(user: &str, task: &Task) -> Html<String> {
    let description = task
        .description
        .as_deref()
        .map(|d| format!("<p class=\"description\">{}</p>", escape(d)))
        .unwrap_or_default();
    let body = format!(
        r#"      <h1>{title}</h1>
      {description}
      <p>Stanje: {status}</p>
      <p>Ustvarjeno: {created}</p>
      <p>
        <a href="/posodobi-opravilo/{id}/">Uredi</a>
        <a href="/izbrisi-opravilo/{id}/">Izbriši</a>
        <a href="/">Nazaj</a>
      </p>"#,
        title = escape(task.display_title()),
        status = if task.completed { "opravljeno" } else { "odprto" },
        created = task.created_at.format(DATE_FORMAT),
        id = task.id,
    );
    layout(task.display_title(), Some(user), &body)
}

/// Values shown in the task form.
#[derive(Debug, Clone, Default)]
pub struct TaskFormView<'a> {
    /// Page heading.
    pub heading: &'a str,
    /// Form target.
    pub action: String,
    /// Title field.
    pub title: &'a str,
    /// Description field.
    pub description: &'a str,
    /// Completion checkbox.
    pub completed: bool,
}

/// Create or edit form, with inline errors.
pub fn form_page(user: &str, form: &TaskFormView<'_>, errors: &FormErrors) -> Html<String> {
    let body = format!(
        r#"      <h1>{heading}</h1>
      <form method="post" action="{action}">
        <p>
          <label for="id_title">Naslov</label>
          <input type="text" name="title" id="id_title" value="{title}" maxlength="{max}">
          {title_errors}
        </p>
        <p>
          <label for="id_description">Opis</label>
          <textarea name="description" id="id_description" rows="6">{description}</textarea>
          {description_errors}
        </p>
        <p>
          <label for="id_completed">Opravljeno</label>
          <input type="checkbox" name="completed" id="id_completed"{checked}>
        </p>
        <button type="submit">Shrani</button>
        <a href="/">Prekliči</a>
      </form>"#,
        heading = escape(form.heading),
        action = escape(&form.action),
        title = escape(form.title),
        max = TITLE_MAX_LENGTH,
        title_errors = error_list(errors.field("title")),
        description = escape(form.description),
        description_errors = error_list(errors.field("description")),
        checked = if form.completed { " checked" } else { "" },
    );
    layout(form.heading, Some(user), &body)
}

/// Delete confirmation.
pub fn delete_page(user: &str, task: &Task) -> Html<String> {
    let body = format!(
        r#"      <h1>Brisanje opravila</h1>
      <form method="post" action="/izbrisi-opravilo/{id}/">
        <p>Ali res želite izbrisati opravilo "{title}"?</p>
        <button type="submit">Izbriši</button>
        <a href="/">Prekliči</a>
      </form>"#,
        id = task.id,
        title = escape(task.display_title()),
    );
    layout("Brisanje opravila", Some(user), &body)
}
