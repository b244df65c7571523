use axum::{
    extract::{Path, State},
    response::Json,
};
use crate::core::command::Command;
use crate::core::controller::{AppState, ServerError};
use crate::fees::command::calculate_fee_cmd::{CalculateFeeCommand, CalculateFeeCommandRequest, CalculateFeeCommandResponse};
use crate::fees::factory;

pub(crate) async fn calculate_late_fee(
    State(state): State<AppState>,
    Path((patron_id, book_id)): Path<(String, i64)>) -> Result<Json<CalculateFeeCommandResponse>, ServerError> {
    let req = CalculateFeeCommandRequest { patron_id, book_id };
    let svc = factory::create_fee_service(&state.config, &state.store);
    let res = CalculateFeeCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
