use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tokio::sync::RwLock;
use crate::payments::gateway::{GatewayError, PaymentGateway, PaymentResponse, PaymentStatus, RefundResponse};
use crate::utils::date::serializer::time_to_json;
use crate::utils::validation::{validate_patron_id, validate_transaction_id};

pub const DEFAULT_API_KEY: &str = "test_key_12345";
pub const DEFAULT_BASE_URL: &str = "https://api.payment-gateway.example.com";
pub const PAYMENT_LIMIT: f64 = 1000.0;

#[derive(Debug, Clone)]
struct Charge {
    amount: f64,
    processed_at: NaiveDateTime,
}

// SimulatedPaymentGateway stands in for the external payment provider. It approves
// well-formed requests from a client with an api key after a configurable latency and
// remembers what it charged.
#[derive(Debug, Clone)]
pub(crate) struct SimulatedPaymentGateway {
    api_key: String,
    base_url: String,
    latency: Duration,
    sequence: Arc<AtomicU64>,
    ledger: Arc<RwLock<HashMap<String, Charge>>>,
}

impl SimulatedPaymentGateway {
    pub(crate) fn new() -> Self {
        Self::with_credentials(DEFAULT_API_KEY, DEFAULT_BASE_URL)
    }

    pub(crate) fn with_credentials(api_key: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            latency: Duration::ZERO,
            sequence: Arc::new(AtomicU64::new(1)),
            ledger: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    // waits out the simulated round trip and rejects clients without credentials
    async fn connect(&self) -> Result<(), GatewayError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.api_key.trim().is_empty() {
            tracing::error!(base_url = self.base_url.as_str(), "payment gateway called without an api key");
            return Err(GatewayError::other("Payment gateway rejected the request: missing API key"));
        }
        Ok(())
    }

    // suffix that keeps ids unique when two requests land in the same millisecond
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn process_payment(&self, patron_id: &str, amount: f64, description: &str) -> Result<PaymentResponse, GatewayError> {
        self.connect().await?;
        if amount.is_nan() || amount <= 0.0 {
            return Ok(PaymentResponse::declined("Invalid amount: must be greater than 0"));
        }
        if amount > PAYMENT_LIMIT {
            return Ok(PaymentResponse::declined("Payment declined: amount exceeds limit"));
        }
        if !validate_patron_id(patron_id) {
            return Ok(PaymentResponse::declined("Invalid patron ID format"));
        }
        let now = Utc::now();
        let transaction_id = format!("txn_{}_{}_{}", patron_id, now.timestamp_millis(), self.next_sequence());
        self.ledger.write().await.insert(
            transaction_id.to_string(), Charge { amount, processed_at: now.naive_utc() });
        tracing::info!(transaction_id = transaction_id.as_str(), amount, description,
            base_url = self.base_url.as_str(), "simulated payment processed");
        Ok(PaymentResponse::approved(
            transaction_id.as_str(), format!("Payment of ${:.2} processed successfully", amount).as_str()))
    }

    async fn refund_payment(&self, transaction_id: &str, amount: f64) -> Result<RefundResponse, GatewayError> {
        self.connect().await?;
        if !validate_transaction_id(transaction_id) {
            return Ok(RefundResponse::declined("Invalid transaction ID"));
        }
        if amount.is_nan() || amount <= 0.0 {
            return Ok(RefundResponse::declined("Invalid refund amount"));
        }
        let refund_id = format!("refund_{}_{}", transaction_id, Utc::now().timestamp_millis());
        tracing::info!(transaction_id, refund_id = refund_id.as_str(), amount, "simulated refund processed");
        Ok(RefundResponse::approved(
            format!("Refund of ${:.2} processed successfully. Refund ID: {}", amount, refund_id).as_str()))
    }

    async fn verify_payment_status(&self, transaction_id: &str) -> Result<PaymentStatus, GatewayError> {
        self.connect().await?;
        if !validate_transaction_id(transaction_id) {
            return Ok(PaymentStatus::not_found());
        }
        let charge = self.ledger.read().await.get(transaction_id).cloned();
        let (amount, processed_at) = match charge {
            Some(charge) => (charge.amount, charge.processed_at),
            None => (0.0, Utc::now().naive_utc()),
        };
        Ok(PaymentStatus::completed(transaction_id, amount, time_to_json(processed_at).as_str()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};
    use crate::payments::gateway::{GatewayError, PaymentGateway};
    use crate::payments::gateway::simulated::{DEFAULT_BASE_URL, SimulatedPaymentGateway};

    #[tokio::test]
    async fn test_should_process_payment() {
        let gateway = SimulatedPaymentGateway::new();
        let res = gateway.process_payment("123456", 10.50, "Late fees").await.expect("should answer");
        assert!(res.success);
        assert!(res.transaction_id.starts_with("txn_123456_"));
        assert!(res.message.contains("$10.50"));
    }

    #[tokio::test]
    async fn test_should_decline_invalid_payments() {
        let gateway = SimulatedPaymentGateway::new();
        let cases = vec![
            ("123456", 0.0, "Invalid amount: must be greater than 0"),
            ("123456", -5.0, "Invalid amount: must be greater than 0"),
            ("123456", 1000.01, "Payment declined: amount exceeds limit"),
            ("12345", 10.0, "Invalid patron ID format"),
        ];
        for (patron_id, amount, expected) in cases {
            let res = gateway.process_payment(patron_id, amount, "Late fees").await.expect("should answer");
            assert!(!res.success);
            assert_eq!("", res.transaction_id.as_str());
            assert_eq!(expected, res.message.as_str());
        }
        let res = gateway.process_payment("123456", 1000.0, "Late fees").await.expect("should answer");
        assert!(res.success);
    }

    #[tokio::test]
    async fn test_should_refund_payment() {
        let gateway = SimulatedPaymentGateway::new();
        let res = gateway.refund_payment("txn_123456_1700000000000", 5.0).await.expect("should answer");
        assert!(res.success);
        assert!(res.message.starts_with("Refund of $5.00 processed successfully. Refund ID: refund_txn_123456_1700000000000_"));

        let res = gateway.refund_payment("abc_123", 5.0).await.expect("should answer");
        assert_eq!("Invalid transaction ID", res.message.as_str());
        let res = gateway.refund_payment("txn_123456", 0.0).await.expect("should answer");
        assert!(!res.success);
        assert_eq!("Invalid refund amount", res.message.as_str());
    }

    #[tokio::test]
    async fn test_should_verify_payment_status() {
        let gateway = SimulatedPaymentGateway::new();
        let paid = gateway.process_payment("123456", 7.25, "Late fees").await.expect("should answer");

        let status = gateway.verify_payment_status(paid.transaction_id.as_str()).await.expect("should answer");
        assert_eq!("completed", status.status.as_str());
        assert_eq!(Some(7.25), status.amount);
        assert_eq!(Some(paid.transaction_id), status.transaction_id);
        assert!(status.timestamp.is_some());

        let unknown = gateway.verify_payment_status("txn_999999_1").await.expect("should answer");
        assert_eq!("completed", unknown.status.as_str());
        assert_eq!(Some(0.0), unknown.amount);

        let missing = gateway.verify_payment_status("bogus").await.expect("should answer");
        assert_eq!("not_found", missing.status.as_str());
        assert_eq!(Some("Transaction not found".to_string()), missing.message);
    }

    #[tokio::test]
    async fn test_should_simulate_latency() {
        let gateway = SimulatedPaymentGateway::new().with_latency(Duration::from_millis(30));
        let started = Instant::now();
        let _ = gateway.verify_payment_status("txn_1").await.expect("should answer");
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_should_keep_every_payment_in_the_same_millisecond() {
        let gateway = SimulatedPaymentGateway::new();
        let first = gateway.process_payment("123456", 2.50, "Late fees").await.expect("should answer");
        let second = gateway.process_payment("123456", 4.00, "Late fees").await.expect("should answer");
        assert_ne!(first.transaction_id, second.transaction_id);

        let status = gateway.verify_payment_status(first.transaction_id.as_str()).await.expect("should answer");
        assert_eq!(Some(2.50), status.amount);
        let status = gateway.verify_payment_status(second.transaction_id.as_str()).await.expect("should answer");
        assert_eq!(Some(4.00), status.amount);
    }

    #[tokio::test]
    async fn test_should_reject_calls_without_api_key() {
        let gateway = SimulatedPaymentGateway::with_credentials(" ", DEFAULT_BASE_URL);
        let err = gateway.process_payment("123456", 2.50, "Late fees").await.expect_err("should reject");
        assert!(matches!(err, GatewayError::Other { .. }));
        assert!(!err.retryable());
        let _ = gateway.refund_payment("txn_123456_1", 2.50).await.expect_err("should reject");
        let _ = gateway.verify_payment_status("txn_123456_1").await.expect_err("should reject");
    }
}
