use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};

// MemoryTable is a keyed, versioned in-memory table shared by clones of the same handle.
#[derive(Debug)]
pub(crate) struct MemoryTable<T> {
    table_name: String,
    rows: Arc<RwLock<BTreeMap<String, T>>>,
}

impl<T> Clone for MemoryTable<T> {
    fn clone(&self) -> Self {
        Self {
            table_name: self.table_name.to_string(),
            rows: self.rows.clone(),
        }
    }
}

impl<T: Identifiable + Clone + Serialize> MemoryTable<T> {
    pub(crate) fn new(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub(crate) async fn insert(&self, entity: &T) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        let id = entity.id();
        if rows.contains_key(&id) {
            return Err(LibraryError::duplicate_key(
                format!("{} already contains {}", self.table_name, id).as_str()));
        }
        rows.insert(id, entity.clone());
        Ok(1)
    }

    // update succeeds only when the caller holds the latest version, and bumps it
    pub(crate) async fn update(&self, entity: &T) -> LibraryResult<usize> {
        let mut rows = self.rows.write().await;
        let id = entity.id();
        let existing = rows.get(&id).ok_or_else(|| LibraryError::not_found(
            format!("{} item not found for {}", self.table_name, id).as_str()))?;
        if existing.version() != entity.version() {
            return Err(LibraryError::unavailable(
                format!("{} item {} was modified concurrently (version {} != {})",
                        self.table_name, id, entity.version(), existing.version()).as_str(),
                Some("409".to_string()), true));
        }
        let mut updated = entity.clone();
        updated.set_version(entity.version() + 1);
        rows.insert(id, updated);
        Ok(1)
    }

    pub(crate) async fn get(&self, id: &str) -> LibraryResult<T> {
        self.rows.read().await.get(id).cloned().ok_or_else(|| LibraryError::not_found(
            format!("{} item not found for {}", self.table_name, id).as_str()))
    }

    pub(crate) async fn scan<F>(&self, filter: F) -> Vec<T> where F: Fn(&T) -> bool {
        self.rows.read().await.values().filter(|row| filter(row)).cloned().collect()
    }

    pub(crate) async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    // query matches every predicate entry against the serialized field of the same name;
    // the page token is the offset of the first record to return.
    pub(crate) async fn query(&self, predicate: &HashMap<String, String>,
                              page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<T>> {
        let offset = match page {
            Some(token) => token.parse::<usize>().map_err(|err| LibraryError::validation(
                format!("invalid page token {} due to {}", token, err).as_str(), Some("400".to_string())))?,
            None => 0,
        };
        let rows = self.rows.read().await;
        let mut matched = vec![];
        for row in rows.values() {
            let value = serde_json::to_value(row)?;
            if matches_predicate(&value, predicate) {
                matched.push(row.clone());
            }
        }
        let total = matched.len();
        let records: Vec<T> = matched.into_iter().skip(offset).take(page_size).collect();
        let next_page = if offset + records.len() < total {
            Some((offset + records.len()).to_string())
        } else {
            None
        };
        Ok(PaginatedResult::new(page, page_size, next_page, records))
    }
}

fn matches_predicate(value: &Value, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, expected)| {
        match value.get(k) {
            Some(Value::String(s)) => s == expected,
            Some(Value::Number(n)) => n.to_string() == *expected,
            Some(Value::Bool(b)) => b.to_string() == *expected,
            Some(Value::Null) | None => expected.is_empty(),
            Some(_) => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use serde::Serialize;
    use crate::core::domain::Identifiable;
    use crate::core::library::LibraryError;
    use crate::utils::memory::MemoryTable;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Row {
        row_id: String,
        version: i64,
        color: String,
        count: i64,
        closed_at: Option<String>,
    }

    impl Row {
        fn new(id: &str, color: &str) -> Self {
            Self { row_id: id.to_string(), version: 0, color: color.to_string(), count: 1, closed_at: None }
        }
    }

    impl Identifiable for Row {
        fn id(&self) -> String {
            self.row_id.to_string()
        }

        fn version(&self) -> i64 {
            self.version
        }

        fn set_version(&mut self, version: i64) {
            self.version = version;
        }
    }

    #[tokio::test]
    async fn test_should_insert_and_get() {
        let table = MemoryTable::new("rows");
        let _ = table.insert(&Row::new("1", "red")).await.expect("should insert");
        let loaded = table.get("1").await.expect("should get");
        assert_eq!("red", loaded.color.as_str());
        assert!(matches!(table.get("2").await, Err(LibraryError::NotFound { .. })));
        assert!(matches!(table.insert(&Row::new("1", "blue")).await, Err(LibraryError::DuplicateKey { .. })));
    }

    #[tokio::test]
    async fn test_should_reject_stale_version() {
        let table = MemoryTable::new("rows");
        let row = Row::new("1", "red");
        let _ = table.insert(&row).await.expect("should insert");

        let mut first = table.get("1").await.expect("should get");
        let mut second = table.get("1").await.expect("should get");
        first.color = "green".to_string();
        let _ = table.update(&first).await.expect("should update");
        second.color = "blue".to_string();
        let res = table.update(&second).await;
        assert!(res.expect_err("stale update").retryable());

        let loaded = table.get("1").await.expect("should get");
        assert_eq!("green", loaded.color.as_str());
        assert_eq!(1, loaded.version);
    }

    #[tokio::test]
    async fn test_should_share_rows_between_clones() {
        let table = MemoryTable::new("rows");
        let other = table.clone();
        let _ = table.insert(&Row::new("1", "red")).await.expect("should insert");
        assert_eq!(1, other.len().await);
    }

    #[tokio::test]
    async fn test_should_query_with_predicate_and_pages() {
        let table = MemoryTable::new("rows");
        for i in 0..5 {
            let color = if i % 2 == 0 { "red" } else { "blue" };
            let _ = table.insert(&Row::new(i.to_string().as_str(), color)).await.expect("should insert");
        }
        let predicate = HashMap::from([("color".to_string(), "red".to_string())]);
        let first = table.query(&predicate, None, 2).await.expect("should query");
        assert_eq!(2, first.records.len());
        let next = first.next_page.expect("should have next page");
        let second = table.query(&predicate, Some(next.as_str()), 2).await.expect("should query");
        assert_eq!(1, second.records.len());
        assert!(second.next_page.is_none());

        let open = HashMap::from([("closed_at".to_string(), "".to_string()), ("count".to_string(), "1".to_string())]);
        assert_eq!(5, table.query(&open, None, 10).await.expect("should query").records.len());
        assert!(table.query(&predicate, Some("abc"), 2).await.is_err());
    }
}
