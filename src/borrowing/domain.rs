use async_trait::async_trait;
use crate::borrowing::dto::{CirculationReceipt, PatronStatusReport};
use crate::core::library::LibraryResult;

pub mod model;
pub mod service;

#[async_trait]
pub(crate) trait BorrowingService: Sync + Send {
    async fn borrow(&self, patron_id: &str, book_id: i64) -> LibraryResult<CirculationReceipt>;
    async fn returned(&self, patron_id: &str, book_id: i64) -> LibraryResult<CirculationReceipt>;
    async fn patron_status(&self, patron_id: &str) -> LibraryResult<PatronStatusReport>;
}
