use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::BorrowStatus;
use crate::utils::date::{opt_serializer, serializer};

// BorrowRecordEntity abstracts a single copy of a book lent to a patron. Records are never
// deleted; a record is outstanding until returned_at is set.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BorrowRecordEntity {
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

impl BorrowRecordEntity {
    pub fn new(branch_id: &str, patron_id: &str, book_id: i64, loan_days: i64) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            borrow_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            patron_id: patron_id.to_string(),
            book_id,
            borrow_status: BorrowStatus::Borrowed,
            borrowed_at: now,
            due_at: now + Duration::days(loan_days),
            returned_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_outstanding(&self) -> bool {
        self.returned_at.is_none()
    }
}

impl Identifiable for BorrowRecordEntity {
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
