use chrono::Utc;
use async_trait::async_trait;
use crate::borrowing::repository::BorrowRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::fees::domain::{FeeService, policy};
use crate::fees::dto::FeeQuote;
use crate::utils::validation::{INVALID_PATRON_ID, validate_patron_id};

pub(crate) struct FeeServiceImpl {
    config: Configuration,
    borrow_repository: Box<dyn BorrowRepository>,
    catalog_service: Box<dyn CatalogService>,
}

impl FeeServiceImpl {
    pub(crate) fn new(config: &Configuration, borrow_repository: Box<dyn BorrowRepository>,
                      catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            config: config.clone(),
            borrow_repository,
            catalog_service,
        }
    }

    async fn quote(&self, patron_id: &str, book_id: i64) -> LibraryResult<FeeQuote> {
        let book = self.catalog_service.find_book_by_id(book_id).await?;
        let outstanding = self.borrow_repository.find_outstanding(patron_id, book_id).await?;
        match outstanding.first() {
            Some(oldest) => Ok(policy::assess(oldest.borrowed_at, Utc::now().naive_utc(), &self.config)),
            None => Ok(FeeQuote::failed(
                format!("\"{}\" is not borrowed by patron {}.", book.title, patron_id).as_str())),
        }
    }
}

#[async_trait]
impl FeeService for FeeServiceImpl {
    async fn calculate_late_fee(&self, patron_id: &str, book_id: i64) -> FeeQuote {
        if !validate_patron_id(patron_id) {
            return FeeQuote::failed(INVALID_PATRON_ID);
        }
        match self.quote(patron_id, book_id).await {
            Ok(quote) => {
                tracing::debug!(patron_id, book_id, days_overdue = quote.days_overdue,
                    fee_amount = quote.fee_amount, status = ?quote.status, "calculated late fee");
                quote
            }
            Err(err) => {
                tracing::warn!(patron_id, book_id, error = %err, "could not calculate late fee");
                FeeQuote::failed(err.message())
            }
        }
    }
}
