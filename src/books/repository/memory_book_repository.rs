use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult, SearchKind};
use crate::core::repository::Repository;
use crate::utils::memory::MemoryTable;

#[derive(Debug, Clone)]
pub struct MemoryBookRepository {
    table: MemoryTable<BookEntity>,
    ids: Arc<AtomicI64>,
}

impl MemoryBookRepository {
    pub(crate) fn new(table: MemoryTable<BookEntity>, ids: Arc<AtomicI64>) -> Self {
        Self {
            table,
            ids,
        }
    }
}

fn sort_by_title(mut books: Vec<BookEntity>) -> Vec<BookEntity> {
    books.sort_by(|a, b| a.title.cmp(&b.title).then(a.book_id.cmp(&b.book_id)));
    books
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        if entity.book_id <= 0 {
            return Err(LibraryError::validation(
                format!("book id {} was not assigned by the store", entity.book_id).as_str(), None));
        }
        self.table.insert(entity).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let existing = self.table.get(entity.book_id.to_string().as_str()).await?;
        if entity.available_copies < 0 || entity.available_copies > entity.total_copies {
            return Err(LibraryError::validation(
                format!("book {} would have {} of {} copies available",
                        entity.book_id, entity.available_copies, entity.total_copies).as_str(), None));
        }
        let mut updated = entity.clone();
        updated.created_at = existing.created_at;
        self.table.update(&updated).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        self.table.get(id).await.map_err(|_| LibraryError::not_found(
            format!("book not found for {}", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        self.table.query(predicate, page, page_size).await
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn next_id(&self) -> LibraryResult<i64> {
        Ok(self.ids.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(sort_by_title(self.table.scan(|_| true).await))
    }

    async fn search(&self, term: &str, kind: SearchKind) -> LibraryResult<Vec<BookEntity>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(vec![]);
        }
        let needle = term.to_lowercase();
        let books = self.table.scan(|book| {
            match kind {
                SearchKind::Title => book.title.to_lowercase().contains(&needle),
                SearchKind::Author => book.author.to_lowercase().contains(&needle),
                SearchKind::Isbn => book.isbn == term,
            }
        }).await;
        Ok(sort_by_title(books))
    }
}
