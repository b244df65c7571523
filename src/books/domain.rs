use crate::core::domain::Identifiable;

pub mod model;

pub(crate) trait Book: Identifiable {
    fn book_id(&self) -> i64;
    fn title(&self) -> String;
    fn total_copies(&self) -> i64;
    fn available_copies(&self) -> i64;

    fn is_available(&self) -> bool {
        self.available_copies() > 0
    }
}
