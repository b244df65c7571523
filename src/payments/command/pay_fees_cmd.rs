use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::payments::domain::PaymentService;
use crate::payments::dto::PaymentReceipt;

pub(crate) struct PayFeesCommand {
    payment_service: Box<dyn PaymentService>,
}

impl PayFeesCommand {
    pub(crate) fn new(payment_service: Box<dyn PaymentService>) -> Self {
        Self {
            payment_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayFeesCommandRequest {
    pub(crate) patron_id: String,
    pub(crate) book_id: i64,
}

impl PayFeesCommandRequest {
    pub fn new(patron_id: &str, book_id: i64) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct PayFeesCommandResponse {
    pub success: bool,
    pub message: String,
    pub transaction_id: String,
    pub amount: f64,
}

impl PayFeesCommandResponse {
    pub fn new(receipt: PaymentReceipt) -> Self {
        Self {
            success: true,
            message: receipt.message,
            transaction_id: receipt.transaction_id,
            amount: receipt.amount,
        }
    }
}

#[async_trait]
impl Command<PayFeesCommandRequest, PayFeesCommandResponse> for PayFeesCommand {
    async fn execute(&self, req: PayFeesCommandRequest) -> Result<PayFeesCommandResponse, CommandError> {
        self.payment_service.pay_late_fees(req.patron_id.as_str(), req.book_id)
            .await.map_err(CommandError::from).map(PayFeesCommandResponse::new)
    }
}
