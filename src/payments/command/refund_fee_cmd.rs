use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::payments::domain::PaymentService;
use crate::payments::dto::RefundReceipt;

pub(crate) struct RefundFeeCommand {
    payment_service: Box<dyn PaymentService>,
}

impl RefundFeeCommand {
    pub(crate) fn new(payment_service: Box<dyn PaymentService>) -> Self {
        Self {
            payment_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefundFeeCommandRequest {
    pub(crate) transaction_id: String,
    pub(crate) amount: f64,
}

impl RefundFeeCommandRequest {
    pub fn new(transaction_id: &str, amount: f64) -> Self {
        Self {
            transaction_id: transaction_id.to_string(),
            amount,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct RefundFeeCommandResponse {
    pub success: bool,
    pub message: String,
    pub transaction_id: String,
    pub amount: f64,
}

impl RefundFeeCommandResponse {
    pub fn new(receipt: RefundReceipt) -> Self {
        Self {
            success: true,
            message: receipt.message,
            transaction_id: receipt.transaction_id,
            amount: receipt.amount,
        }
    }
}

#[async_trait]
impl Command<RefundFeeCommandRequest, RefundFeeCommandResponse> for RefundFeeCommand {
    async fn execute(&self, req: RefundFeeCommandRequest) -> Result<RefundFeeCommandResponse, CommandError> {
        self.payment_service.refund_late_fee_payment(req.transaction_id.as_str(), req.amount)
            .await.map_err(CommandError::from).map(RefundFeeCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RecordStore;
    use crate::payments::command::refund_fee_cmd::{RefundFeeCommand, RefundFeeCommandRequest};
    use crate::payments::factory::create_payment_service;
    use crate::payments::gateway::simulated::SimulatedPaymentGateway;

    #[tokio::test]
    async fn test_should_run_refund_fee() {
        let store = RecordStore::new();
        let cmd = RefundFeeCommand::new(create_payment_service(
            &Configuration::new("test"), &store, Arc::new(SimulatedPaymentGateway::new())));

        let res = cmd.execute(RefundFeeCommandRequest::new("txn_123456_1700000000000", 5.0)).await.expect("should refund");
        assert!(res.success);
        assert!(res.message.contains("Refund of $5.00 processed successfully"));

        let err = cmd.execute(RefundFeeCommandRequest::new("txn_123456", 20.0)).await.expect_err("should exceed max");
        assert!(matches!(err, CommandError::Validation { .. }));
        assert_eq!("Refund amount exceeds maximum late fee.", err.message());
    }
}
