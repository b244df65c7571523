use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub book_id: i64,
    pub version: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub total_copies: i64,
    pub available_copies: i64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookDto {
    // builds a book that has not been assigned an id by the store yet
    pub fn new(title: &str, author: &str, isbn: &str, total_copies: i64) -> BookDto {
        BookDto {
            book_id: 0,
            version: 0,
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            total_copies,
            available_copies: total_copies,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // takes one copy off the shelf; false when none is left
    pub fn checkout_copy(&mut self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.available_copies -= 1;
        self.updated_at = Utc::now().naive_utc();
        true
    }

    // puts one copy back, never exceeding total_copies
    pub fn return_copy(&mut self) {
        self.available_copies = (self.available_copies + 1).min(self.total_copies);
        self.updated_at = Utc::now().naive_utc();
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

impl Book for BookDto {
    fn book_id(&self) -> i64 {
        self.book_id
    }

    fn title(&self) -> String {
        self.title.to_string()
    }

    fn total_copies(&self) -> i64 {
        self.total_copies
    }

    fn available_copies(&self) -> i64 {
        self.available_copies
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            version: other.version,
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
            total_copies: other.total_copies,
            available_copies: other.available_copies,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id,
            version: other.version,
            title: other.title.to_string(),
            author: other.author.to_string(),
            isbn: other.isbn.to_string(),
            total_copies: other.total_copies,
            available_copies: other.available_copies,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
