use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, SearchKind};
use crate::gateway::events::EventPublisher;
use crate::utils::validation::{MAX_STRING_LENGTH, validate_copies, validate_isbn, validate_string_length};

pub(crate) const MAX_TITLE_LENGTH: usize = 200;

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            events_publisher,
        }
    }
}

fn validate_book(book: &BookDto) -> LibraryResult<()> {
    let reason = Some("400".to_string());
    if book.title.trim().is_empty() {
        return Err(LibraryError::validation("Title is required.", reason));
    }
    if !validate_string_length(book.title.as_str(), MAX_TITLE_LENGTH) {
        return Err(LibraryError::validation(
            format!("Title must be less than {} characters.", MAX_TITLE_LENGTH).as_str(), reason));
    }
    if book.author.trim().is_empty() {
        return Err(LibraryError::validation("Author is required.", reason));
    }
    if !validate_string_length(book.author.as_str(), MAX_STRING_LENGTH) {
        return Err(LibraryError::validation(
            format!("Author must be less than {} characters.", MAX_STRING_LENGTH).as_str(), reason));
    }
    if !validate_isbn(book.isbn.as_str()) {
        return Err(LibraryError::validation("ISBN must be exactly 13 digits.", reason));
    }
    if !validate_copies(book.total_copies) {
        return Err(LibraryError::validation("Total copies must be a positive integer.", reason));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        if let Err(err) = validate_book(book) {
            tracing::warn!(isbn = book.isbn.as_str(), reason = err.message(), "rejected new book");
            return Err(err);
        }
        let mut book = book.clone();
        book.title = book.title.trim().to_string();
        book.author = book.author.trim().to_string();
        book.book_id = self.book_repository.next_id().await?;
        book.version = 0;
        book.available_copies = book.total_copies;
        self.book_repository.create(&BookEntity::from(&book)).await?;
        self.events_publisher.publish(&DomainEvent::added(
            "book_added", "catalog", book.book_id.to_string().as_str(), self.branch_id.as_str(), &book)?).await?;
        tracing::info!(book_id = book.book_id, title = book.title.as_str(), "added book to catalog");
        Ok(book)
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        self.book_repository.update(&BookEntity::from(book)).await?;
        let mut updated = book.clone();
        updated.version = book.version + 1;
        Ok(updated)
    }

    async fn find_book_by_id(&self, id: i64) -> LibraryResult<BookDto> {
        self.book_repository.get(id.to_string().as_str()).await
            .map(|b| BookDto::from(&b))
            .map_err(|err| match err {
                LibraryError::NotFound { .. } => LibraryError::not_found("Book not found."),
                other => other,
            })
    }

    async fn get_all_books(&self) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.find_all().await?;
        Ok(res.iter().map(BookDto::from).collect())
    }

    async fn search_books(&self, term: &str, kind: SearchKind) -> LibraryResult<Vec<BookDto>> {
        let res = self.book_repository.search(term, kind).await?;
        tracing::debug!(term, kind = %kind, matches = res.len(), "searched catalog");
        Ok(res.iter().map(BookDto::from).collect())
    }
}
