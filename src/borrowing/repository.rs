pub mod memory_borrow_repository;

use async_trait::async_trait;
use crate::borrowing::domain::model::BorrowRecordEntity;
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait BorrowRepository: Repository<BorrowRecordEntity> {
    // records of a patron for one book that have not been returned, earliest borrowed first
    async fn find_outstanding(&self, patron_id: &str, book_id: i64) -> LibraryResult<Vec<BorrowRecordEntity>>;

    // every record of a patron, most recently borrowed first
    async fn find_by_patron(&self, patron_id: &str) -> LibraryResult<Vec<BorrowRecordEntity>>;
}
