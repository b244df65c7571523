use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{Value};
use crate::borrowing::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest, BorrowBookCommandResponse};
use crate::borrowing::command::patron_status_cmd::{PatronStatusCommand, PatronStatusCommandRequest, PatronStatusCommandResponse};
use crate::borrowing::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::borrowing::domain::BorrowingService;
use crate::borrowing::factory;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};

fn build_service(state: &AppState) -> Box<dyn BorrowingService> {
    factory::create_borrowing_service(&state.config, &state.store)
}

pub(crate) async fn borrow_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<BorrowBookCommandResponse>, ServerError> {
    let req: BorrowBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = BorrowBookCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let req: ReturnBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = ReturnBookCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn patron_status(
    State(state): State<AppState>,
    Path(patron_id): Path<String>) -> Result<Json<PatronStatusCommandResponse>, ServerError> {
    let req = PatronStatusCommandRequest { patron_id };
    let res = PatronStatusCommand::new(build_service(&state)).execute(req).await?;
    Ok(Json(res))
}
