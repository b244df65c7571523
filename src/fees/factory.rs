use crate::borrowing::factory::create_borrow_repository;
use crate::catalog::factory::create_catalog_service;
use crate::core::domain::Configuration;
use crate::core::repository::RecordStore;
use crate::fees::domain::FeeService;
use crate::fees::domain::service::FeeServiceImpl;

pub(crate) fn create_fee_service(config: &Configuration, store: &RecordStore) -> Box<dyn FeeService> {
    let borrow_repo = create_borrow_repository(store);
    let catalog_svc = create_catalog_service(config, store);
    Box::new(FeeServiceImpl::new(config, borrow_repo, catalog_svc))
}
