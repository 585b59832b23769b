//! Expense API endpoints

use api_types::{
    ValidationError,
    expense::{Expense, ExpenseInput, ExpenseListResponse},
    summary::ExpenseSummary,
};
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde_json::Value;

use crate::{ServerError, server::ServerState};

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/summary", get(summary))
        .route("/{id}", get(read).put(update).delete(remove))
}

/// Validate a JSON body. Bodies that are not JSON become a `body` validation
/// error; other rejections (e.g. size limit) keep their own status.
fn expense_input(payload: Result<Json<Value>, JsonRejection>) -> Result<ExpenseInput, ServerError> {
    let Json(raw) = payload.map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(_)
        | JsonRejection::JsonSyntaxError(_)
        | JsonRejection::MissingJsonContentType(_) => {
            ServerError::from(ValidationError::body(rejection.body_text()))
        }
        other => ServerError::Rejected {
            status: other.status(),
            message: other.body_text(),
        },
    })?;
    Ok(ExpenseInput::validate(&raw)?)
}

fn expense_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ServerError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ServerError::Generic(rejection.body_text()))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let input = expense_input(payload)?;
    let expense = state.engine.create_expense(input).await?;
    tracing::info!(id = expense.id, "expense created");
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list(State(state): State<ServerState>) -> Json<ExpenseListResponse> {
    let expenses = state.engine.list_expenses().await;
    Json(ExpenseListResponse { expenses })
}

pub async fn summary(
    State(state): State<ServerState>,
) -> Result<Json<ExpenseSummary>, ServerError> {
    Ok(Json(state.engine.summary().await?))
}

pub async fn read(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Expense>, ServerError> {
    let id = expense_id(path)?;
    Ok(Json(state.engine.expense(id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let id = expense_id(path)?;
    let input = expense_input(payload)?;
    let expense = state.engine.update_expense(id, input).await?;
    tracing::info!(id, "expense updated");
    Ok(Json(expense))
}

pub async fn remove(
    State(state): State<ServerState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let id = expense_id(path)?;
    state.engine.delete_expense(id).await?;
    tracing::info!(id, "expense deleted");
    Ok(StatusCode::NO_CONTENT)
}
