use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
    fn set_version(&mut self, version: i64);
}


// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    // outstanding copies of a single title a patron may hold at once
    pub max_copies_per_title: usize,
    // loan period; fees accrue for every whole day past it
    pub book_loan_days: i64,
    pub daily_late_fee: f64,
    // ceiling for a single late-fee refund
    pub max_late_fee: f64,
    pub gateway_timeout_ms: u64,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_copies_per_title: 5,
            book_loan_days: 14,
            daily_late_fee: 0.50,
            max_late_fee: 15.00,
            gateway_timeout_ms: 5_000,
        }
    }
}
