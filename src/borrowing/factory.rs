use crate::borrowing::domain::BorrowingService;
use crate::borrowing::domain::service::BorrowingServiceImpl;
use crate::borrowing::repository::BorrowRepository;
use crate::borrowing::repository::memory_borrow_repository::MemoryBorrowRepository;
use crate::catalog::factory::create_catalog_service;
use crate::core::domain::Configuration;
use crate::core::repository::RecordStore;
use crate::gateway::factory::create_publisher;

pub(crate) fn create_borrow_repository(store: &RecordStore) -> Box<dyn BorrowRepository> {
    Box::new(MemoryBorrowRepository::new(store.borrows.clone()))
}

pub(crate) fn create_borrowing_service(config: &Configuration, store: &RecordStore) -> Box<dyn BorrowingService> {
    let borrow_repo = create_borrow_repository(store);
    let catalog_svc = create_catalog_service(config, store);
    let publisher = create_publisher(store.gateway_publisher());
    Box::new(BorrowingServiceImpl::new(config, borrow_repo, catalog_svc, store.book_locks.clone(), publisher))
}
