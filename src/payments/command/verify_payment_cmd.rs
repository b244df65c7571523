use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::payments::domain::PaymentService;
use crate::payments::gateway::PaymentStatus;

pub(crate) struct VerifyPaymentCommand {
    payment_service: Box<dyn PaymentService>,
}

impl VerifyPaymentCommand {
    pub(crate) fn new(payment_service: Box<dyn PaymentService>) -> Self {
        Self {
            payment_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyPaymentCommandRequest {
    pub(crate) transaction_id: String,
}

impl VerifyPaymentCommandRequest {
    pub fn new(transaction_id: &str) -> Self {
        Self {
            transaction_id: transaction_id.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct VerifyPaymentCommandResponse {
    pub payment: PaymentStatus,
}

impl VerifyPaymentCommandResponse {
    pub fn new(payment: PaymentStatus) -> Self {
        Self {
            payment,
        }
    }
}

#[async_trait]
impl Command<VerifyPaymentCommandRequest, VerifyPaymentCommandResponse> for VerifyPaymentCommand {
    async fn execute(&self, req: VerifyPaymentCommandRequest) -> Result<VerifyPaymentCommandResponse, CommandError> {
        self.payment_service.verify_payment(req.transaction_id.as_str())
            .await.map_err(CommandError::from).map(VerifyPaymentCommandResponse::new)
    }
}
