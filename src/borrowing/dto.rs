use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::domain::Book;
use crate::books::dto::BookDto;
use crate::borrowing::domain::model::BorrowRecordEntity;
use crate::core::domain::Identifiable;
use crate::core::library::BorrowStatus;
use crate::fees::dto::FeeQuote;
use crate::utils::date::{opt_serializer, serializer};


// BorrowRecordDto is a data transfer object for the borrowing service
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BorrowRecordDto {
    pub borrow_id: String,
    pub version: i64,
    pub branch_id: String,
    pub patron_id: String,
    pub book_id: i64,
    pub borrow_status: BorrowStatus,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    #[serde(with = "opt_serializer")]
    pub returned_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BorrowRecordDto {
    pub fn from_patron_book(branch_id: &str, patron_id: &str, book: &dyn Book, loan_days: i64) -> Self {
        let now = Utc::now().naive_utc();
        BorrowRecordDto {
            borrow_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            patron_id: patron_id.to_string(),
            book_id: book.book_id(),
            borrow_status: BorrowStatus::Borrowed,
            borrowed_at: now,
            due_at: now + Duration::days(loan_days),
            returned_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for BorrowRecordDto {
    fn id(&self) -> String {
        self.borrow_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

impl From<&BorrowRecordEntity> for BorrowRecordDto {
    fn from(other: &BorrowRecordEntity) -> BorrowRecordDto {
        BorrowRecordDto {
            borrow_id: other.borrow_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            patron_id: other.patron_id.to_string(),
            book_id: other.book_id,
            borrow_status: other.borrow_status,
            borrowed_at: other.borrowed_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BorrowRecordDto> for BorrowRecordEntity {
    fn from(other: &BorrowRecordDto) -> BorrowRecordEntity {
        BorrowRecordEntity {
            borrow_id: other.borrow_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            patron_id: other.patron_id.to_string(),
            book_id: other.book_id,
            borrow_status: other.borrow_status,
            borrowed_at: other.borrowed_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

// CirculationReceipt is what a successful borrow or return hands back: the book with its
// updated copy count, the record that changed and, on return, the fee owed at return time.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub(crate) struct CirculationReceipt {
    pub book: BookDto,
    pub record: BorrowRecordDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_fee: Option<FeeQuote>,
}

impl CirculationReceipt {
    pub fn new(book: BookDto, record: BorrowRecordDto, late_fee: Option<FeeQuote>) -> Self {
        Self {
            book,
            record,
            late_fee,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub(crate) struct BorrowedBookDto {
    pub borrow_id: String,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    pub is_overdue: bool,
    pub days_overdue: i64,
    pub fee_amount: f64,
}

impl BorrowedBookDto {
    pub fn new(record: &BorrowRecordEntity, book: &BookDto, fee: &FeeQuote) -> Self {
        Self {
            borrow_id: record.borrow_id.to_string(),
            book_id: record.book_id,
            title: book.title.to_string(),
            author: book.author.to_string(),
            borrowed_at: record.borrowed_at,
            due_at: record.due_at,
            is_overdue: fee.days_overdue > 0,
            days_overdue: fee.days_overdue,
            fee_amount: fee.fee_amount,
        }
    }
}

// PatronStatusReport summarizes a patron's current loans, what they owe and their history.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub(crate) struct PatronStatusReport {
    pub patron_id: String,
    pub borrowed_books: Vec<BorrowedBookDto>,
    pub late_fees: f64,
    pub borrow_count: usize,
    pub borrow_history: Vec<BorrowRecordDto>,
}


#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crate::books::dto::BookDto;
    use crate::borrowing::domain::model::BorrowRecordEntity;
    use crate::borrowing::dto::{BorrowedBookDto, BorrowRecordDto};
    use crate::core::library::BorrowStatus;
    use crate::fees::dto::FeeQuote;

    #[tokio::test]
    async fn test_should_build_borrow_record() {
        let mut book = BookDto::new("1984", "George Orwell", "9780451524935", 1);
        book.book_id = 3;
        let record = BorrowRecordDto::from_patron_book("test", "123456", &book, 14);
        assert_eq!(3, record.book_id);
        assert_eq!("123456", record.patron_id.as_str());
        assert_eq!(BorrowStatus::Borrowed, record.borrow_status);
        assert_eq!(record.borrowed_at + Duration::days(14), record.due_at);

        let entity = BorrowRecordEntity::from(&record);
        assert_eq!(record, BorrowRecordDto::from(&entity));
    }

    #[tokio::test]
    async fn test_should_build_borrowed_book() {
        let mut book = BookDto::new("1984", "George Orwell", "9780451524935", 1);
        book.book_id = 3;
        let record = BorrowRecordEntity::new("test", "123456", 3, 14);
        let borrowed = BorrowedBookDto::new(&record, &book, &FeeQuote::assessed(2, 1.0));
        assert_eq!("George Orwell", borrowed.author.as_str());
        assert!(borrowed.is_overdue);
        assert_eq!(1.0, borrowed.fee_amount);
    }
}
