use std::sync::Arc;
use std::time::Duration;
use axum::{
    routing::{get, post},
    Router,
};
use crate::borrowing::controller::{borrow_book, patron_status, return_book};
use crate::catalog::controller::{add_book, find_book_by_id, get_all_books, search_books};
use crate::catalog::factory::{add_sample_books, create_catalog_service};
use crate::core::controller::AppState;
use crate::core::library::LibraryResult;
use crate::core::repository::RecordStore;
use crate::fees::controller::calculate_late_fee;
use crate::payments::controller::{pay_late_fees, refund_late_fee_payment, verify_payment};
use crate::payments::gateway::simulated::SimulatedPaymentGateway;

const SIMULATED_GATEWAY_LATENCY_MS: u64 = 250;

pub(crate) fn build_router(state: AppState) -> Router<(), lambda_http::Body> {
    Router::new()
        .route("/catalog", post(add_book).get(get_all_books))
        .route("/catalog/search", get(search_books))
        .route("/catalog/:id", get(find_book_by_id))
        .route("/borrow", post(borrow_book))
        .route("/return", post(return_book))
        .route("/patrons/:patron_id/status", get(patron_status))
        .route("/fees/pay", post(pay_late_fees))
        .route("/fees/refund", post(refund_late_fee_payment))
        .route("/fees/:patron_id/:book_id", get(calculate_late_fee))
        .route("/payments/:transaction_id", get(verify_payment))
        .with_state(state)
}

// build_app wires one record store and payment gateway for the whole process; the dev
// branch starts with the sample catalog.
pub async fn build_app(dev_mode: bool) -> LibraryResult<Router<(), lambda_http::Body>> {
    let branch = if dev_mode { "dev" } else { "prod" };
    let gateway = SimulatedPaymentGateway::new()
        .with_latency(Duration::from_millis(SIMULATED_GATEWAY_LATENCY_MS));
    let state = AppState::new(branch, RecordStore::new(), Arc::new(gateway));
    if dev_mode {
        let books = add_sample_books(create_catalog_service(&state.config, &state.store).as_ref()).await?;
        tracing::info!(branch, books = books.len(), "seeded sample catalog");
    }
    Ok(build_router(state))
}
