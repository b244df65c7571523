use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::fees::domain::FeeService;
use crate::payments::domain::PaymentService;
use crate::payments::dto::{PaymentReceipt, RefundReceipt};
use crate::payments::gateway::{GatewayError, PaymentGateway, PaymentStatus};
use crate::gateway::events::EventPublisher;
use crate::utils::validation::{INVALID_PATRON_ID, validate_patron_id, validate_transaction_id};

pub(crate) struct PaymentServiceImpl {
    config: Configuration,
    fee_service: Box<dyn FeeService>,
    catalog_service: Box<dyn CatalogService>,
    payment_gateway: Arc<dyn PaymentGateway>,
    events_publisher: Box<dyn EventPublisher>,
}

impl PaymentServiceImpl {
    pub(crate) fn new(config: &Configuration, fee_service: Box<dyn FeeService>,
                      catalog_service: Box<dyn CatalogService>, payment_gateway: Arc<dyn PaymentGateway>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            config: config.clone(),
            fee_service,
            catalog_service,
            payment_gateway,
            events_publisher,
        }
    }

    // bounds a gateway call by the configured timeout, turning an elapsed timer into a fault
    async fn call_gateway<T, F>(&self, call: F) -> Result<T, GatewayError>
        where F: Future<Output=Result<T, GatewayError>> + Send {
        let timeout_ms = self.config.gateway_timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), call).await {
            Ok(res) => res,
            Err(_) => Err(GatewayError::timeout(
                format!("payment gateway did not respond within {} ms", timeout_ms).as_str())),
        }
    }
}

fn gateway_fault(prefix: &str, fault: &GatewayError) -> LibraryError {
    let message = format!("{}: {}", prefix, fault);
    if fault.retryable() {
        LibraryError::unavailable(message.as_str(), None, true)
    } else {
        LibraryError::runtime(message.as_str(), None)
    }
}

#[async_trait]
impl PaymentService for PaymentServiceImpl {
    async fn pay_late_fees(&self, patron_id: &str, book_id: i64) -> LibraryResult<PaymentReceipt> {
        if !validate_patron_id(patron_id) {
            return Err(LibraryError::validation(INVALID_PATRON_ID, Some("400".to_string())));
        }
        let quote = self.fee_service.calculate_late_fee(patron_id, book_id).await;
        if quote.is_error() {
            tracing::warn!(patron_id, book_id, reason = quote.message(), "late fee payment without a fee quote");
            return Err(LibraryError::validation(
                format!("Unable to calculate late fees: {}", quote.message()).as_str(), Some("400".to_string())));
        }
        if quote.fee_amount <= 0.0 {
            return Err(LibraryError::validation("No late fees to pay for this book.", Some("400".to_string())));
        }
        let book = self.catalog_service.find_book_by_id(book_id).await?;
        let description = format!("Late fees for '{}'", book.title);

        let res = self.call_gateway(
            self.payment_gateway.process_payment(patron_id, quote.fee_amount, description.as_str())).await;
        let payment = match res {
            Ok(payment) => payment,
            Err(fault) => {
                tracing::error!(patron_id, book_id, amount = quote.fee_amount, error = %fault, "payment gateway fault");
                return Err(gateway_fault("Payment processing error", &fault));
            }
        };
        if !payment.success {
            tracing::warn!(patron_id, book_id, amount = quote.fee_amount, reason = payment.message.as_str(),
                "payment declined");
            return Err(LibraryError::not_granted(
                format!("Payment failed: {}", payment.message).as_str(), Some("402".to_string())));
        }
        let receipt = PaymentReceipt {
            transaction_id: payment.transaction_id.to_string(),
            amount: quote.fee_amount,
            message: format!("Payment successful! {}", payment.message),
        };
        self.events_publisher.publish(&DomainEvent::added(
            "late_fee_paid", "payments", receipt.transaction_id.as_str(), self.config.branch_id.as_str(), &receipt)?).await?;
        tracing::info!(patron_id, book_id, transaction_id = receipt.transaction_id.as_str(),
            amount = receipt.amount, "late fees paid");
        Ok(receipt)
    }

    async fn refund_late_fee_payment(&self, transaction_id: &str, amount: f64) -> LibraryResult<RefundReceipt> {
        if !validate_transaction_id(transaction_id) {
            return Err(LibraryError::validation("Invalid transaction ID.", Some("400".to_string())));
        }
        if amount.is_nan() || amount <= 0.0 {
            return Err(LibraryError::validation("Refund amount must be greater than 0.", Some("400".to_string())));
        }
        if amount > self.config.max_late_fee {
            return Err(LibraryError::validation("Refund amount exceeds maximum late fee.", Some("400".to_string())));
        }

        let res = self.call_gateway(self.payment_gateway.refund_payment(transaction_id, amount)).await;
        let refund = match res {
            Ok(refund) => refund,
            Err(fault) => {
                tracing::error!(transaction_id, amount, error = %fault, "refund gateway fault");
                return Err(gateway_fault("Refund processing error", &fault));
            }
        };
        if !refund.success {
            tracing::warn!(transaction_id, amount, reason = refund.message.as_str(), "refund declined");
            return Err(LibraryError::not_granted(
                format!("Refund failed: {}", refund.message).as_str(), Some("402".to_string())));
        }
        let receipt = RefundReceipt {
            transaction_id: transaction_id.to_string(),
            amount,
            message: refund.message,
        };
        self.events_publisher.publish(&DomainEvent::updated(
            "late_fee_refunded", "payments", transaction_id, self.config.branch_id.as_str(), &receipt)?).await?;
        tracing::info!(transaction_id, amount, "late fee refunded");
        Ok(receipt)
    }

    async fn verify_payment(&self, transaction_id: &str) -> LibraryResult<PaymentStatus> {
        self.call_gateway(self.payment_gateway.verify_payment_status(transaction_id)).await
            .map_err(|fault| gateway_fault("Payment verification error", &fault))
    }
}
