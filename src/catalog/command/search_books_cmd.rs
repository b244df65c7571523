use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::core::library::SearchKind;

// SearchBooksCommand lists the catalog, or searches it when a term is given.
pub(crate) struct SearchBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl SearchBooksCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchBooksCommandRequest {
    pub(crate) q: Option<String>,
    #[serde(rename = "type")]
    pub(crate) kind: Option<SearchKind>,
}

impl SearchBooksCommandRequest {
    pub fn new(q: &str, kind: SearchKind) -> Self {
        Self {
            q: Some(q.to_string()),
            kind: Some(kind),
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct SearchBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl SearchBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<SearchBooksCommandRequest, SearchBooksCommandResponse> for SearchBooksCommand {
    async fn execute(&self, req: SearchBooksCommandRequest) -> Result<SearchBooksCommandResponse, CommandError> {
        let res = match req.q {
            Some(q) => self.catalog_service.search_books(q.as_str(), req.kind.unwrap_or(SearchKind::Title)).await,
            None => self.catalog_service.get_all_books().await,
        };
        res.map_err(CommandError::from).map(SearchBooksCommandResponse::new)
    }
}
