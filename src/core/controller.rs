use std::sync::Arc;
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RecordStore;
use crate::payments::gateway::PaymentGateway;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RecordStore,
    pub(crate) payment_gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(branch: &str, store: RecordStore, payment_gateway: Arc<dyn PaymentGateway>) -> AppState {
        AppState {
            config: Configuration::new(branch),
            store,
            payment_gateway,
        }
    }
}

// every failed request answers with the same {"success": false, "message": ...} body
pub(crate) type ServerError = (StatusCode, Json<Value>);

fn failure(status: StatusCode, message: &str) -> ServerError {
    (status, Json(json!({ "success": false, "message": message })))
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    failure(StatusCode::BAD_REQUEST, format!("{}", err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::Database { .. } => { StatusCode::INTERNAL_SERVER_ERROR }
            CommandError::Declined { .. } => { StatusCode::PAYMENT_REQUIRED }
            CommandError::DuplicateKey { .. } => { StatusCode::CONFLICT }
            CommandError::NotFound { .. } => { StatusCode::NOT_FOUND }
            CommandError::Runtime { retryable: true, .. } => { StatusCode::SERVICE_UNAVAILABLE }
            CommandError::Runtime { .. } => { StatusCode::INTERNAL_SERVER_ERROR }
            CommandError::Serialization { .. } => { StatusCode::BAD_REQUEST }
            CommandError::Validation { .. } => { StatusCode::BAD_REQUEST }
        };
        failure(status, err.message())
    }
}
