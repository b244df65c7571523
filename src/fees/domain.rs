use async_trait::async_trait;
use crate::fees::dto::FeeQuote;

pub mod policy;
pub mod service;

#[async_trait]
pub(crate) trait FeeService: Sync + Send {
    // never fails; problems are reported through an error-status quote
    async fn calculate_late_fee(&self, patron_id: &str, book_id: i64) -> FeeQuote;
}
