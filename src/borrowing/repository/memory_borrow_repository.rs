use std::collections::HashMap;

use async_trait::async_trait;

use crate::borrowing::domain::model::BorrowRecordEntity;
use crate::borrowing::repository::BorrowRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::memory::MemoryTable;

#[derive(Debug, Clone)]
pub struct MemoryBorrowRepository {
    table: MemoryTable<BorrowRecordEntity>,
}

impl MemoryBorrowRepository {
    pub(crate) fn new(table: MemoryTable<BorrowRecordEntity>) -> Self {
        Self {
            table,
        }
    }
}

fn oldest_first(mut records: Vec<BorrowRecordEntity>) -> Vec<BorrowRecordEntity> {
    records.sort_by(|a, b| a.borrowed_at.cmp(&b.borrowed_at).then(a.created_at.cmp(&b.created_at)));
    records
}

#[async_trait]
impl Repository<BorrowRecordEntity> for MemoryBorrowRepository {
    async fn create(&self, entity: &BorrowRecordEntity) -> LibraryResult<usize> {
        self.table.insert(entity).await
    }

    async fn update(&self, entity: &BorrowRecordEntity) -> LibraryResult<usize> {
        let existing = self.get(entity.borrow_id.as_str()).await?;
        if existing.patron_id != entity.patron_id || existing.book_id != entity.book_id {
            return Err(LibraryError::validation(
                format!("borrow record {} cannot move to another patron or book", entity.borrow_id).as_str(), None));
        }
        let mut updated = entity.clone();
        updated.created_at = existing.created_at;
        self.table.update(&updated).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BorrowRecordEntity> {
        self.table.get(id).await.map_err(|_| LibraryError::not_found(
            format!("borrow record not found for {}", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BorrowRecordEntity>> {
        self.table.query(predicate, page, page_size).await
    }
}

#[async_trait]
impl BorrowRepository for MemoryBorrowRepository {
    async fn find_outstanding(&self, patron_id: &str, book_id: i64) -> LibraryResult<Vec<BorrowRecordEntity>> {
        let records = self.table.scan(|record| {
            record.patron_id == patron_id && record.book_id == book_id && record.is_outstanding()
        }).await;
        Ok(oldest_first(records))
    }

    async fn find_by_patron(&self, patron_id: &str) -> LibraryResult<Vec<BorrowRecordEntity>> {
        let mut records = oldest_first(self.table.scan(|record| record.patron_id == patron_id).await);
        records.reverse();
        Ok(records)
    }
}
