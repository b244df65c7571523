use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::payments::dto::{PaymentReceipt, RefundReceipt};
use crate::payments::gateway::PaymentStatus;

pub mod service;

#[async_trait]
pub(crate) trait PaymentService: Sync + Send {
    async fn pay_late_fees(&self, patron_id: &str, book_id: i64) -> LibraryResult<PaymentReceipt>;
    async fn refund_late_fee_payment(&self, transaction_id: &str, amount: f64) -> LibraryResult<RefundReceipt>;
    async fn verify_payment(&self, transaction_id: &str) -> LibraryResult<PaymentStatus>;
}
