use chrono::Utc;
use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::borrowing::domain::BorrowingService;
use crate::borrowing::domain::model::BorrowRecordEntity;
use crate::borrowing::dto::{BorrowedBookDto, BorrowRecordDto, CirculationReceipt, PatronStatusReport};
use crate::borrowing::repository::BorrowRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{BorrowStatus, LibraryError, LibraryResult};
use crate::fees::domain::policy;
use crate::gateway::events::EventPublisher;
use crate::utils::locks::KeyedLocks;
use crate::utils::validation::{INVALID_PATRON_ID, validate_patron_id};

pub(crate) struct BorrowingServiceImpl {
    config: Configuration,
    borrow_repository: Box<dyn BorrowRepository>,
    catalog_service: Box<dyn CatalogService>,
    book_locks: KeyedLocks,
    events_publisher: Box<dyn EventPublisher>,
}

impl BorrowingServiceImpl {
    pub(crate) fn new(config: &Configuration, borrow_repository: Box<dyn BorrowRepository>,
                      catalog_service: Box<dyn CatalogService>, book_locks: KeyedLocks,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            borrow_repository,
            catalog_service,
            book_locks,
            events_publisher,
        }
    }

    // puts the copy count of an already updated book back to what it was before the update
    async fn restore_copies(&self, book: &BookDto, available_copies: i64) {
        let mut restored = book.clone();
        restored.available_copies = available_copies;
        if let Err(err) = self.catalog_service.update_book(&restored).await {
            tracing::error!(book_id = book.book_id, available_copies, error = %err,
                "failed to restore copy count");
        }
    }
}

fn invalid_patron() -> LibraryError {
    LibraryError::validation(INVALID_PATRON_ID, Some("400".to_string()))
}

#[async_trait]
impl BorrowingService for BorrowingServiceImpl {
    async fn borrow(&self, patron_id: &str, book_id: i64) -> LibraryResult<CirculationReceipt> {
        if !validate_patron_id(patron_id) {
            tracing::warn!(patron_id, book_id, "rejected borrow with invalid patron id");
            return Err(invalid_patron());
        }
        let _ = self.catalog_service.find_book_by_id(book_id).await?;
        let _guard = self.book_locks.lock(book_id.to_string().as_str()).await;
        let mut book = self.catalog_service.find_book_by_id(book_id).await?;
        let outstanding = self.borrow_repository.find_outstanding(patron_id, book_id).await?;
        if outstanding.len() >= self.config.max_copies_per_title {
            tracing::warn!(patron_id, book_id, outstanding = outstanding.len(), "borrow limit reached");
            return Err(LibraryError::validation(
                format!("You cannot borrow multiple copies of \"{}\": the limit is {} per patron.",
                        book.title, self.config.max_copies_per_title).as_str(), Some("400".to_string())));
        }
        let available_before = book.available_copies;
        if !book.checkout_copy() {
            tracing::warn!(patron_id, book_id, "no copies left to borrow");
            return Err(LibraryError::validation(
                format!("No copies available for \"{}\".", book.title).as_str(), Some("400".to_string())));
        }
        let book = self.catalog_service.update_book(&book).await?;
        let record = BorrowRecordDto::from_patron_book(
            self.config.branch_id.as_str(), patron_id, &book, self.config.book_loan_days);
        if let Err(err) = self.borrow_repository.create(&BorrowRecordEntity::from(&record)).await {
            self.restore_copies(&book, available_before).await;
            return Err(err);
        }
        self.events_publisher.publish(&DomainEvent::added(
            "book_borrowed", "borrowing", record.borrow_id.as_str(), self.config.branch_id.as_str(), &record)?).await?;
        tracing::info!(patron_id, book_id, borrow_id = record.borrow_id.as_str(),
            available_copies = book.available_copies, "book borrowed");
        Ok(CirculationReceipt::new(book, record, None))
    }

    async fn returned(&self, patron_id: &str, book_id: i64) -> LibraryResult<CirculationReceipt> {
        let _ = self.catalog_service.find_book_by_id(book_id).await?;
        let _guard = self.book_locks.lock(book_id.to_string().as_str()).await;
        let mut book = self.catalog_service.find_book_by_id(book_id).await?;
        if !validate_patron_id(patron_id) {
            tracing::warn!(patron_id, book_id, "rejected return with invalid patron id");
            return Err(invalid_patron());
        }
        let outstanding = self.borrow_repository.find_outstanding(patron_id, book_id).await?;
        let mut existing = match outstanding.into_iter().next() {
            Some(record) => record,
            None => {
                tracing::warn!(patron_id, book_id, "rejected return of a book that is not on loan");
                return Err(LibraryError::validation(
                    format!("\"{}\" was not borrowed by patron {}.", book.title, patron_id).as_str(),
                    Some("400".to_string())));
            }
        };
        let now = Utc::now().naive_utc();
        let late_fee = policy::assess(existing.borrowed_at, now, &self.config);
        existing.borrow_status = BorrowStatus::Returned;
        existing.returned_at = Some(now);
        existing.updated_at = now;

        let available_before = book.available_copies;
        book.return_copy();
        let book = self.catalog_service.update_book(&book).await?;
        if let Err(err) = self.borrow_repository.update(&existing).await {
            self.restore_copies(&book, available_before).await;
            return Err(err);
        }
        existing.version += 1;
        let record = BorrowRecordDto::from(&existing);
        self.events_publisher.publish(&DomainEvent::updated(
            "book_returned", "borrowing", record.borrow_id.as_str(), self.config.branch_id.as_str(), &record)?).await?;
        tracing::info!(patron_id, book_id, borrow_id = record.borrow_id.as_str(),
            days_overdue = late_fee.days_overdue, "book returned");
        Ok(CirculationReceipt::new(book, record, Some(late_fee)))
    }

    async fn patron_status(&self, patron_id: &str) -> LibraryResult<PatronStatusReport> {
        if !validate_patron_id(patron_id) {
            return Err(invalid_patron());
        }
        let history = self.borrow_repository.find_by_patron(patron_id).await?;
        let now = Utc::now().naive_utc();
        let mut borrowed_books = vec![];
        for record in history.iter().rev().filter(|r| r.is_outstanding()) {
            let book = self.catalog_service.find_book_by_id(record.book_id).await?;
            let fee = policy::assess(record.borrowed_at, now, &self.config);
            borrowed_books.push(BorrowedBookDto::new(record, &book, &fee));
        }
        let late_fees = policy::round_cents(borrowed_books.iter().map(|b| b.fee_amount).sum::<f64>());
        Ok(PatronStatusReport {
            patron_id: patron_id.to_string(),
            borrow_count: borrowed_books.len(),
            borrowed_books,
            late_fees,
            borrow_history: history.iter().map(BorrowRecordDto::from).collect(),
        })
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use crate::books::dto::BookDto;
    use crate::borrowing::domain::BorrowingService;
    use crate::borrowing::domain::model::BorrowRecordEntity;
    use crate::borrowing::domain::service::BorrowingServiceImpl;
    use crate::borrowing::factory::{create_borrow_repository, create_borrowing_service};
    use crate::borrowing::repository::BorrowRepository;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory::{add_sample_books, create_catalog_service};
    use crate::core::domain::Configuration;
    use crate::core::library::{BorrowStatus, LibraryError, LibraryResult, PaginatedResult};
    use crate::core::repository::{RecordStore, Repository};
    use crate::gateway::factory::create_publisher;
    use crate::gateway::memory::publisher::EventLog;

    async fn setup(store: &RecordStore) -> (Box<dyn BorrowingService>, Box<dyn CatalogService>) {
        let config = Configuration::new("test");
        let catalog = create_catalog_service(&config, store);
        let _ = add_sample_books(catalog.as_ref()).await.expect("should add samples");
        (create_borrowing_service(&config, store), create_catalog_service(&config, store))
    }

    async fn available(catalog: &dyn CatalogService, book_id: i64) -> i64 {
        catalog.find_book_by_id(book_id).await.expect("should find book").available_copies
    }

    #[tokio::test]
    async fn test_should_borrow_and_return() {
        let store = RecordStore::new();
        let (svc, catalog) = setup(&store).await;

        let before = available(catalog.as_ref(), 1).await;
        let borrowed = svc.borrow("123456", 1).await.expect("should borrow");
        assert_eq!(before - 1, borrowed.book.available_copies);
        assert_eq!(BorrowStatus::Borrowed, borrowed.record.borrow_status);
        assert_eq!(before - 1, available(catalog.as_ref(), 1).await);

        let returned = svc.returned("123456", 1).await.expect("should return");
        assert_eq!(borrowed.record.borrow_id, returned.record.borrow_id);
        assert_eq!(BorrowStatus::Returned, returned.record.borrow_status);
        assert!(returned.record.returned_at.is_some());
        assert_eq!(0.0, returned.late_fee.expect("should assess fee").fee_amount);
        assert_eq!(before, available(catalog.as_ref(), 1).await);
        let stored = store.borrows.get(returned.record.borrow_id.as_str()).await.expect("should keep record");
        assert_eq!(returned.record.version, stored.version);
        assert_eq!(1, stored.version);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_borrows() {
        let store = RecordStore::new();
        let (svc, catalog) = setup(&store).await;

        let err = svc.borrow("123", 1).await.expect_err("should reject patron");
        assert_eq!("Invalid patron ID. Must be exactly 6 digits.", err.message());
        let err = svc.borrow("123456", 20).await.expect_err("should reject book");
        assert_eq!("Book not found.", err.message());
        assert_eq!(0, store.borrows.len().await);
        assert_eq!(3, available(catalog.as_ref(), 1).await);
    }

    #[tokio::test]
    async fn test_should_cap_copies_per_patron() {
        let store = RecordStore::new();
        let (svc, catalog) = setup(&store).await;
        let book = catalog.add_book(&BookDto::new("R2_Test_Book", "Test Author", "1234567890144", 10))
            .await.expect("should add book");

        for _ in 0..5 {
            let _ = svc.borrow("654321", book.book_id).await.expect("should borrow");
        }
        let err = svc.borrow("654321", book.book_id).await.expect_err("should hit limit");
        assert!(err.message().contains("multiple copies"));
        assert_eq!(5, available(catalog.as_ref(), book.book_id).await);
        assert_eq!(5, store.borrows.len().await);

        let _ = svc.borrow("123456", book.book_id).await.expect("other patrons can still borrow");
    }

    #[tokio::test]
    async fn test_should_reject_when_no_copies_left() {
        let store = RecordStore::new();
        let (svc, catalog) = setup(&store).await;

        let _ = svc.borrow("123456", 3).await.expect("should borrow the only copy");
        let err = svc.borrow("654321", 3).await.expect_err("should have no copies");
        assert!(err.message().contains("No copies available"));
        assert!(!err.message().contains("multiple copies"));
        assert_eq!(0, available(catalog.as_ref(), 3).await);
        assert_eq!(1, store.borrows.len().await);
    }

    #[tokio::test]
    async fn test_should_reject_invalid_returns() {
        let store = RecordStore::new();
        let (svc, catalog) = setup(&store).await;
        let _ = svc.borrow("056124", 1).await.expect("should borrow");

        let err = svc.returned("333333", 1).await.expect_err("should not be borrowed");
        assert!(err.message().to_lowercase().contains("not borrowed"));
        let err = svc.returned("123456", 20).await.expect_err("should reject book");
        assert!(err.message().contains("Book not found"));
        let err = svc.returned("123", 1).await.expect_err("should reject patron");
        assert!(err.message().contains("6 digits"));
        assert_eq!(2, available(catalog.as_ref(), 1).await);
        let outstanding = store.borrows.scan(|r| r.is_outstanding()).await;
        assert_eq!(1, outstanding.len());
    }

    #[tokio::test]
    async fn test_should_not_retain_locks_for_unknown_books() {
        let store = RecordStore::new();
        let (svc, _) = setup(&store).await;

        for id in 0..500 {
            let _ = svc.borrow("123456", 1000 + id).await.expect_err("should not find book");
            let _ = svc.returned("123456", 100000 + id).await.expect_err("should not find book");
        }
        assert_eq!(0, store.book_locks.len());

        let _ = svc.borrow("123456", 1).await.expect("should borrow");
        let _ = svc.returned("123456", 1).await.expect("should return");
        assert_eq!(0, store.book_locks.len());
    }

    #[tokio::test]
    async fn test_should_return_oldest_record_first() {
        let store = RecordStore::new();
        let (svc, _) = setup(&store).await;
        let first = svc.borrow("123456", 1).await.expect("should borrow");
        let second = svc.borrow("123456", 1).await.expect("should borrow");

        let returned = svc.returned("123456", 1).await.expect("should return");
        assert_eq!(first.record.borrow_id, returned.record.borrow_id);
        let returned = svc.returned("123456", 1).await.expect("should return");
        assert_eq!(second.record.borrow_id, returned.record.borrow_id);
        assert!(svc.returned("123456", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_should_keep_copies_within_bounds() {
        let store = RecordStore::new();
        let (svc, catalog) = setup(&store).await;
        let patrons = ["100001", "100002", "100003"];
        for round in 0..4 {
            for patron in patrons {
                let _ = svc.borrow(patron, 2).await;
                if round % 2 == 1 {
                    let _ = svc.returned(patron, 2).await;
                }
                let book = catalog.find_book_by_id(2).await.expect("should find book");
                assert!(book.available_copies >= 0 && book.available_copies <= book.total_copies);
            }
        }
        for patron in patrons {
            while svc.returned(patron, 2).await.is_ok() {}
        }
        assert_eq!(2, available(catalog.as_ref(), 2).await);
    }

    #[tokio::test]
    async fn test_should_serialize_concurrent_borrows() {
        let store = RecordStore::new();
        let (_, catalog) = setup(&store).await;
        let mut handles = vec![];
        for i in 0..6 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let svc = create_borrowing_service(&Configuration::new("test"), &store);
                svc.borrow(format!("20000{}", i).as_str(), 1).await.is_ok()
            }));
        }
        let mut borrowed = 0;
        for handle in handles {
            if handle.await.expect("task should finish") {
                borrowed += 1;
            }
        }
        assert_eq!(3, borrowed);
        assert_eq!(0, available(catalog.as_ref(), 1).await);
        assert_eq!(3, store.borrows.len().await);
    }

    #[tokio::test]
    async fn test_should_report_patron_status() {
        let store = RecordStore::new();
        let (svc, _) = setup(&store).await;
        let _ = svc.borrow("123456", 2).await.expect("should borrow");
        let mut late = BorrowRecordEntity::new("test", "123456", 1, 14);
        late.borrowed_at = Utc::now().naive_utc() - Duration::days(25);
        late.due_at = late.borrowed_at + Duration::days(14);
        let _ = store.borrows.insert(&late).await.expect("should insert record");
        let _ = svc.borrow("123456", 3).await.expect("should borrow");
        let _ = svc.returned("123456", 3).await.expect("should return");

        let report = svc.patron_status("123456").await.expect("should report");
        assert_eq!(2, report.borrow_count);
        assert_eq!(5.50, report.late_fees);
        assert_eq!(3, report.borrow_history.len());
        assert_eq!("The Great Gatsby", report.borrowed_books[0].title.as_str());
        assert_eq!(11, report.borrowed_books[0].days_overdue);
        assert!(report.borrowed_books[0].is_overdue);
        assert!(!report.borrowed_books[1].is_overdue);
        assert!(report.borrow_history[0].borrowed_at >= report.borrow_history[1].borrowed_at);

        assert!(svc.patron_status("12345").await.is_err());
        let empty = svc.patron_status("999999").await.expect("should report");
        assert_eq!(0, empty.borrow_count);
        assert_eq!(0.0, empty.late_fees);
    }

    #[tokio::test]
    async fn test_should_publish_circulation_events() {
        let log = EventLog::new();
        let store = RecordStore::with_event_log(log.clone());
        let (svc, _) = setup(&store).await;
        let _ = svc.borrow("123456", 1).await.expect("should borrow");
        let _ = svc.returned("123456", 1).await.expect("should return");
        let names = log.names().await;
        assert_eq!(vec!["book_borrowed".to_string(), "book_returned".to_string()], names[3..].to_vec());
    }

    struct RejectingBorrowRepository {
        inner: Box<dyn BorrowRepository>,
    }

    #[async_trait]
    impl Repository<BorrowRecordEntity> for RejectingBorrowRepository {
        async fn create(&self, _entity: &BorrowRecordEntity) -> LibraryResult<usize> {
            Err(LibraryError::database("record store is read only", None, false))
        }

        async fn update(&self, _entity: &BorrowRecordEntity) -> LibraryResult<usize> {
            Err(LibraryError::database("record store is read only", None, false))
        }

        async fn get(&self, id: &str) -> LibraryResult<BorrowRecordEntity> {
            self.inner.get(id).await
        }

        async fn query(&self, predicate: &HashMap<String, String>,
                       page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BorrowRecordEntity>> {
            self.inner.query(predicate, page, page_size).await
        }
    }

    #[async_trait]
    impl BorrowRepository for RejectingBorrowRepository {
        async fn find_outstanding(&self, patron_id: &str, book_id: i64) -> LibraryResult<Vec<BorrowRecordEntity>> {
            self.inner.find_outstanding(patron_id, book_id).await
        }

        async fn find_by_patron(&self, patron_id: &str) -> LibraryResult<Vec<BorrowRecordEntity>> {
            self.inner.find_by_patron(patron_id).await
        }
    }

    #[tokio::test]
    async fn test_should_restore_copies_when_record_fails() {
        let store = RecordStore::new();
        let (working, catalog) = setup(&store).await;
        let config = Configuration::new("test");
        let svc = BorrowingServiceImpl::new(
            &config,
            Box::new(RejectingBorrowRepository { inner: create_borrow_repository(&store) }),
            create_catalog_service(&config, &store),
            store.book_locks.clone(),
            create_publisher(store.gateway_publisher()));

        assert!(matches!(svc.borrow("123456", 1).await, Err(LibraryError::Database { .. })));
        assert_eq!(3, available(catalog.as_ref(), 1).await);
        assert_eq!(0, store.borrows.len().await);

        let _ = working.borrow("123456", 1).await.expect("should borrow");
        assert!(matches!(svc.returned("123456", 1).await, Err(LibraryError::Database { .. })));
        assert_eq!(2, available(catalog.as_ref(), 1).await);
        assert_eq!(1, store.borrows.scan(|r| r.is_outstanding()).await.len());
    }
}
