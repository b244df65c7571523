use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::borrowing::domain::BorrowingService;
use crate::borrowing::dto::{BorrowRecordDto, CirculationReceipt};
use crate::core::command::{Command, CommandError};
use crate::fees::dto::FeeQuote;

pub(crate) struct ReturnBookCommand {
    borrowing_service: Box<dyn BorrowingService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(borrowing_service: Box<dyn BorrowingService>) -> Self {
        Self {
            borrowing_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    pub(crate) patron_id: String,
    pub(crate) book_id: i64,
}

impl ReturnBookCommandRequest {
    pub fn new(patron_id: &str, book_id: i64) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    pub success: bool,
    pub message: String,
    pub book: BookDto,
    pub borrow: BorrowRecordDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_fee: Option<FeeQuote>,
}

impl ReturnBookCommandResponse {
    pub fn new(receipt: CirculationReceipt) -> Self {
        let mut message = format!("Successfully returned \"{}\".", receipt.book.title);
        if let Some(fee) = receipt.late_fee.as_ref().filter(|f| f.fee_amount > 0.0) {
            message.push_str(format!(" Late fee: ${:.2} ({} days overdue).", fee.fee_amount, fee.days_overdue).as_str());
        }
        Self {
            success: true,
            message,
            book: receipt.book,
            borrow: receipt.record,
            late_fee: receipt.late_fee,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.borrowing_service.returned(req.patron_id.as_str(), req.book_id)
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}
