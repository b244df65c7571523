use crate::books::repository::BookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::repository::RecordStore;

pub(crate) fn create_book_repository(store: &RecordStore) -> Box<dyn BookRepository> {
    Box::new(MemoryBookRepository::new(store.books.clone(), store.book_ids.clone()))
}
