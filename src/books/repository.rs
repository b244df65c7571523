pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::{LibraryResult, SearchKind};
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    // reserves the next store-assigned book id
    async fn next_id(&self) -> LibraryResult<i64>;

    // all books ordered by title
    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>>;

    // title and author match case-insensitive substrings, isbn matches exactly
    async fn search(&self, term: &str, kind: SearchKind) -> LibraryResult<Vec<BookEntity>>;
}
