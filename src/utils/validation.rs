// Pure predicates shared by the catalog, borrowing and payment services.

pub const PATRON_ID_LEN: usize = 6;
pub const ISBN_LEN: usize = 13;
pub const MAX_STRING_LENGTH: usize = 100;
pub const TRANSACTION_PREFIX: &str = "txn_";

pub const INVALID_PATRON_ID: &str = "Invalid patron ID. Must be exactly 6 digits.";

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

pub(crate) fn validate_patron_id(id: &str) -> bool {
    id.len() == PATRON_ID_LEN && all_digits(id)
}

pub(crate) fn validate_isbn(isbn: &str) -> bool {
    isbn.len() == ISBN_LEN && all_digits(isbn)
}

pub(crate) fn validate_copies(n: i64) -> bool {
    n >= 1
}

// true when s has fewer than max characters
pub(crate) fn validate_string_length(s: &str, max: usize) -> bool {
    s.chars().count() < max
}

// transaction ids look like txn_<digits>[_<digits>...], e.g. txn_123456_1700000000000
pub(crate) fn validate_transaction_id(id: &str) -> bool {
    match id.strip_prefix(TRANSACTION_PREFIX) {
        Some(rest) => rest.split('_').all(all_digits),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::validation::{MAX_STRING_LENGTH, validate_copies, validate_isbn, validate_patron_id, validate_string_length, validate_transaction_id};

    #[tokio::test]
    async fn test_should_validate_patron_id() {
        assert!(validate_patron_id("123456"));
        assert!(validate_patron_id("056124"));
        for id in ["12345", "1234567", "abc123", "", "12345a", "١٢٣٤٥٦"] {
            assert!(!validate_patron_id(id), "{} should be rejected", id);
        }
    }

    #[tokio::test]
    async fn test_should_validate_isbn() {
        assert!(validate_isbn("9780743273565"));
        assert!(!validate_isbn("123456789"));
        assert!(!validate_isbn("97807432735651"));
        assert!(!validate_isbn("978074327356X"));
    }

    #[tokio::test]
    async fn test_should_validate_copies() {
        assert!(validate_copies(1));
        assert!(validate_copies(10));
        assert!(!validate_copies(0));
        assert!(!validate_copies(-1));
    }

    #[tokio::test]
    async fn test_should_validate_string_length() {
        assert!(validate_string_length("Test Author", MAX_STRING_LENGTH));
        assert!(validate_string_length(&"a".repeat(99), MAX_STRING_LENGTH));
        assert!(!validate_string_length(&"a".repeat(100), MAX_STRING_LENGTH));
        assert!(!validate_string_length(&"a".repeat(112), MAX_STRING_LENGTH));
    }

    #[tokio::test]
    async fn test_should_validate_transaction_id() {
        for id in ["txn_98765", "txn_66666", "txn_123456_12345", "txn_123456_1700000000000"] {
            assert!(validate_transaction_id(id), "{} should be accepted", id);
        }
        for id in ["invalid", "123456", "", "trans_123", "txn_", "txn_12a", "txn_123__4"] {
            assert!(!validate_transaction_id(id), "{} should be rejected", id);
        }
    }
}
