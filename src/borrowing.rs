pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;
pub mod controller;

pub mod command {
    pub mod borrow_book_cmd;
    pub mod return_book_cmd;
    pub mod patron_status_cmd;
}
