use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::borrowing::domain::BorrowingService;
use crate::borrowing::dto::PatronStatusReport;
use crate::core::command::{Command, CommandError};

pub(crate) struct PatronStatusCommand {
    borrowing_service: Box<dyn BorrowingService>,
}

impl PatronStatusCommand {
    pub(crate) fn new(borrowing_service: Box<dyn BorrowingService>) -> Self {
        Self {
            borrowing_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PatronStatusCommandRequest {
    pub(crate) patron_id: String,
}

impl PatronStatusCommandRequest {
    pub fn new(patron_id: &str) -> Self {
        Self {
            patron_id: patron_id.to_string(),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct PatronStatusCommandResponse {
    pub success: bool,
    pub report: PatronStatusReport,
}

impl PatronStatusCommandResponse {
    pub fn new(report: PatronStatusReport) -> Self {
        Self {
            success: true,
            report,
        }
    }
}

#[async_trait]
impl Command<PatronStatusCommandRequest, PatronStatusCommandResponse> for PatronStatusCommand {
    async fn execute(&self, req: PatronStatusCommandRequest) -> Result<PatronStatusCommandResponse, CommandError> {
        self.borrowing_service.patron_status(req.patron_id.as_str())
            .await.map_err(CommandError::from).map(PatronStatusCommandResponse::new)
    }
}
