use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::fees::domain::FeeService;
use crate::fees::dto::FeeQuote;

pub(crate) struct CalculateFeeCommand {
    fee_service: Box<dyn FeeService>,
}

impl CalculateFeeCommand {
    pub(crate) fn new(fee_service: Box<dyn FeeService>) -> Self {
        Self {
            fee_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalculateFeeCommandRequest {
    pub(crate) patron_id: String,
    pub(crate) book_id: i64,
}

impl CalculateFeeCommandRequest {
    pub fn new(patron_id: &str, book_id: i64) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id,
        }
    }
}

// the quote is returned as is, including error quotes
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct CalculateFeeCommandResponse {
    pub quote: FeeQuote,
}

impl CalculateFeeCommandResponse {
    pub fn new(quote: FeeQuote) -> Self {
        Self {
            quote,
        }
    }
}

#[async_trait]
impl Command<CalculateFeeCommandRequest, CalculateFeeCommandResponse> for CalculateFeeCommand {
    async fn execute(&self, req: CalculateFeeCommandRequest) -> Result<CalculateFeeCommandResponse, CommandError> {
        let quote = self.fee_service.calculate_late_fee(req.patron_id.as_str(), req.book_id).await;
        Ok(CalculateFeeCommandResponse::new(quote))
    }
}
