use crate::books::dto::BookDto;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::RecordStore;
use crate::gateway::factory::create_publisher;

pub(crate) fn create_catalog_service(config: &Configuration, store: &RecordStore) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(store);
    let publisher = create_publisher(store.gateway_publisher());
    Box::new(CatalogServiceImpl::new(config, book_repo, publisher))
}

// add_sample_books stocks an empty catalog with the titles the dev branch starts with
pub(crate) async fn add_sample_books(catalog_service: &dyn CatalogService) -> LibraryResult<Vec<BookDto>> {
    let samples = [
        ("The Great Gatsby", "F. Scott Fitzgerald", "9780743273565", 3),
        ("To Kill a Mockingbird", "Harper Lee", "9780061120084", 2),
        ("1984", "George Orwell", "9780451524935", 1),
    ];
    let mut books = vec![];
    for (title, author, isbn, copies) in samples {
        books.push(catalog_service.add_book(&BookDto::new(title, author, isbn, copies)).await?);
    }
    Ok(books)
}
