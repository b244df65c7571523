use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::borrowing::domain::BorrowingService;
use crate::borrowing::dto::{BorrowRecordDto, CirculationReceipt};
use crate::core::command::{Command, CommandError};
use crate::utils::date::display_date;

pub(crate) struct BorrowBookCommand {
    borrowing_service: Box<dyn BorrowingService>,
}

impl BorrowBookCommand {
    pub(crate) fn new(borrowing_service: Box<dyn BorrowingService>) -> Self {
        Self {
            borrowing_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    pub(crate) patron_id: String,
    pub(crate) book_id: i64,
}

impl BorrowBookCommandRequest {
    pub fn new(patron_id: &str, book_id: i64) -> Self {
        Self {
            patron_id: patron_id.to_string(),
            book_id,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct BorrowBookCommandResponse {
    pub success: bool,
    pub message: String,
    pub book: BookDto,
    pub borrow: BorrowRecordDto,
}

impl BorrowBookCommandResponse {
    pub fn new(receipt: CirculationReceipt) -> Self {
        Self {
            success: true,
            message: format!("Successfully borrowed \"{}\". Due date: {}.",
                             receipt.book.title, display_date(receipt.record.due_at)),
            book: receipt.book,
            borrow: receipt.record,
        }
    }
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        self.borrowing_service.borrow(req.patron_id.as_str(), req.book_id)
            .await.map_err(CommandError::from).map(BorrowBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::borrowing::command::borrow_book_cmd::{BorrowBookCommand, BorrowBookCommandRequest};
    use crate::borrowing::factory::create_borrowing_service;
    use crate::catalog::factory::{add_sample_books, create_catalog_service};
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RecordStore;
    use crate::utils::date::display_date;

    #[tokio::test]
    async fn test_should_run_borrow_book() {
        let store = RecordStore::new();
        let config = Configuration::new("test");
        let _ = add_sample_books(create_catalog_service(&config, &store).as_ref()).await.expect("should add samples");
        let cmd = BorrowBookCommand::new(create_borrowing_service(&config, &store));

        let res = cmd.execute(BorrowBookCommandRequest::new("123456", 1)).await.expect("should borrow book");
        assert!(res.success);
        assert!(res.message.to_lowercase().contains("successfully borrowed"));
        assert!(res.message.contains(display_date(res.borrow.due_at).as_str()));
        assert_eq!(2, res.book.available_copies);

        let err = cmd.execute(BorrowBookCommandRequest::new("123", 1)).await.expect_err("should reject patron");
        assert!(matches!(err, CommandError::Validation { .. }));
        assert!(err.message().to_lowercase().contains("invalid patron id"));

        let err = cmd.execute(BorrowBookCommandRequest::new("123456", 20)).await.expect_err("should reject book");
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
