//! Task handlers: list, detail, create, update, delete.

use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};

use taskhub_core::types::TaskId;
use taskhub_service::form::FormErrors;

use crate::dto::TaskForm;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::views;
use crate::views::task::TaskFormView;

use super::form_errors_or;

const NEW_TASK: &str = "Novo opravilo";
const EDIT_TASK: &str = "Urejanje opravila";

/// GET /
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<Response, ApiError> {
    let overview = state.task_service.list(auth.context()).await?;
    Ok(views::task::list_page(&auth.username, &overview).into_response())
}

/// GET /opravilo/{id}/
pub async fn detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Response, ApiError> {
    let task = state.task_service.get(auth.context(), id).await?;
    Ok(views::task::detail_page(&auth.username, &task).into_response())
}

/// GET /ustvari-opravilo/
pub async fn create_form(auth: AuthUser) -> Response {
    let view = TaskFormView {
        heading: NEW_TASK,
        action: "/ustvari-opravilo/".to_string(),
        ..Default::default()
    };
    views::task::form_page(&auth.username, &view, &FormErrors::new()).into_response()
}

/// POST /ustvari-opravilo/
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Form(form): Form<TaskForm>,
) -> Result<Response, ApiError> {
    match state
        .task_service
        .create(auth.context(), form.to_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(err) => {
            let errors = form_errors_or(err)?;
            let view = submitted(NEW_TASK, "/ustvari-opravilo/".to_string(), &form);
            Ok(views::task::form_page(&auth.username, &view, &errors).into_response())
        }
    }
}

/// GET /posodobi-opravilo/{id}/
pub async fn edit_form(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Response, ApiError> {
    let task = state.task_service.get(auth.context(), id).await?;
    let view = TaskFormView {
        heading: EDIT_TASK,
        action: edit_action(id),
        title: task.title.as_deref().unwrap_or_default(),
        description: task.description.as_deref().unwrap_or_default(),
        completed: task.completed,
    };
    Ok(views::task::form_page(&auth.username, &view, &FormErrors::new()).into_response())
}

/// POST /posodobi-opravilo/{id}/
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
    Form(form): Form<TaskForm>,
) -> Result<Response, ApiError> {
    // 404 for foreign tasks even when the submission is invalid.
    state.task_service.get(auth.context(), id).await?;

    match state
        .task_service
        .update(auth.context(), id, form.to_input())
        .await
    {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(err) => {
            let errors = form_errors_or(err)?;
            let view = submitted(EDIT_TASK, edit_action(id), &form);
            Ok(views::task::form_page(&auth.username, &view, &errors).into_response())
        }
    }
}

/// GET /izbrisi-opravilo/{id}/
pub async fn delete_form(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Response, ApiError> {
    let task = state.task_service.get(auth.context(), id).await?;
    Ok(views::task::delete_page(&auth.username, &task).into_response())
}

/// POST /izbrisi-opravilo/{id}/
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TaskId>,
) -> Result<Response, ApiError> {
    state.task_service.delete(auth.context(), id).await?;
    Ok(Redirect::to("/").into_response())
}

fn edit_action(id: TaskId) -> String {
    format!("/posodobi-opravilo/{id}/")
}

fn submitted<'a>(heading: &'a str, action: String, form: &'a TaskForm) -> TaskFormView<'a> {
    TaskFormView {
        heading,
        action,
        title: form.title.as_deref().unwrap_or_default(),
        description: form.description.as_deref().unwrap_or_default(),
        completed: form.completed.is_some(),
    }
}
