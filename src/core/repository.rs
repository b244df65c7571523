use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use crate::books::domain::model::BookEntity;
use crate::borrowing::domain::model::BorrowRecordEntity;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::gateway::GatewayPublisherVia;
use crate::gateway::memory::publisher::EventLog;
use crate::utils::locks::KeyedLocks;
use crate::utils::memory::MemoryTable;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity, failing when entity carries a stale version
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // find by field equality
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;
}

// RecordStore owns all book and borrow-record state of one library process. It is built
// once at startup and cloned into every service; clones share the same tables and locks.
#[derive(Debug, Clone)]
pub(crate) struct RecordStore {
    pub(crate) books: MemoryTable<BookEntity>,
    pub(crate) book_ids: Arc<AtomicI64>,
    pub(crate) borrows: MemoryTable<BorrowRecordEntity>,
    pub(crate) book_locks: KeyedLocks,
    publisher_via: GatewayPublisherVia,
}

impl RecordStore {
    pub fn new() -> RecordStore {
        Self::build(GatewayPublisherVia::Logs)
    }

    // with_event_log keeps published domain events in memory so they can be inspected
    pub fn with_event_log(log: EventLog) -> RecordStore {
        Self::build(GatewayPublisherVia::Memory(log))
    }

    fn build(publisher_via: GatewayPublisherVia) -> RecordStore {
        RecordStore {
            books: MemoryTable::new("books"),
            book_ids: Arc::new(AtomicI64::new(0)),
            borrows: MemoryTable::new("borrow_records"),
            book_locks: KeyedLocks::new(),
            publisher_via,
        }
    }

    pub fn gateway_publisher(&self) -> GatewayPublisherVia {
        self.publisher_via.clone()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::repository::RecordStore;
    use crate::gateway::GatewayPublisherVia;
    use crate::gateway::memory::publisher::EventLog;

    #[tokio::test]
    async fn test_should_share_tables_between_clones() {
        let store = RecordStore::new();
        let other = store.clone();
        assert_eq!(GatewayPublisherVia::Logs, store.gateway_publisher());
        assert_eq!(0, other.books.len().await);
        assert_eq!(0, other.borrows.len().await);
    }

    #[tokio::test]
    async fn test_should_select_memory_publisher() {
        let store = RecordStore::with_event_log(EventLog::new());
        assert!(matches!(store.gateway_publisher(), GatewayPublisherVia::Memory(_)));
    }
}
