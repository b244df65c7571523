pub mod domain;
pub mod factory;
pub mod controller;

pub mod command {
    pub mod add_book_cmd;
    pub mod get_book_cmd;
    pub mod search_books_cmd;
}
