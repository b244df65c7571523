use std::sync::Arc;
use crate::catalog::factory::create_catalog_service;
use crate::core::domain::Configuration;
use crate::core::repository::RecordStore;
use crate::fees::factory::create_fee_service;
use crate::gateway::factory::create_publisher;
use crate::payments::domain::PaymentService;
use crate::payments::domain::service::PaymentServiceImpl;
use crate::payments::gateway::PaymentGateway;

pub(crate) fn create_payment_service(config: &Configuration, store: &RecordStore,
                                     payment_gateway: Arc<dyn PaymentGateway>) -> Box<dyn PaymentService> {
    let fee_svc = create_fee_service(config, store);
    let catalog_svc = create_catalog_service(config, store);
    let publisher = create_publisher(store.gateway_publisher());
    Box::new(PaymentServiceImpl::new(config, fee_svc, catalog_svc, payment_gateway, publisher))
}
