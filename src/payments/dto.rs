use serde::{Deserialize, Serialize};

// PaymentReceipt confirms a late-fee charge accepted by the gateway
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct PaymentReceipt {
    pub transaction_id: String,
    pub amount: f64,
    pub message: String,
}

// RefundReceipt confirms a refund accepted by the gateway
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct RefundReceipt {
    pub transaction_id: String,
    pub amount: f64,
    pub message: String,
}
