pub mod books;
pub mod borrowing;
pub mod catalog;
pub mod core;
pub mod fees;
pub mod gateway;
pub mod library;
pub mod payments;
pub mod utils;
