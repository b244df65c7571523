pub mod simulated;

use std::fmt;
use std::fmt::{Display, Formatter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// PaymentResponse is the gateway's answer to a charge; a decline is success == false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PaymentResponse {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
}

impl PaymentResponse {
    pub fn approved(transaction_id: &str, message: &str) -> Self {
        Self { success: true, transaction_id: transaction_id.to_string(), message: message.to_string() }
    }

    pub fn declined(message: &str) -> Self {
        Self { success: false, transaction_id: "".to_string(), message: message.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RefundResponse {
    pub success: bool,
    pub message: String,
}

impl RefundResponse {
    pub fn approved(message: &str) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn declined(message: &str) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PaymentStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PaymentStatus {
    pub fn completed(transaction_id: &str, amount: f64, timestamp: &str) -> Self {
        Self {
            transaction_id: Some(transaction_id.to_string()),
            status: "completed".to_string(),
            amount: Some(amount),
            timestamp: Some(timestamp.to_string()),
            message: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            transaction_id: None,
            status: "not_found".to_string(),
            amount: None,
            timestamp: None,
            message: Some("Transaction not found".to_string()),
        }
    }
}

// GatewayError is a fault raised while talking to the gateway, as opposed to a decline.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GatewayError {
    Network {
        message: String,
    },
    Timeout {
        message: String,
    },
    Other {
        message: String,
    },
}

impl GatewayError {
    pub fn network(message: &str) -> GatewayError {
        GatewayError::Network { message: message.to_string() }
    }

    pub fn timeout(message: &str) -> GatewayError {
        GatewayError::Timeout { message: message.to_string() }
    }

    pub fn other(message: &str) -> GatewayError {
        GatewayError::Other { message: message.to_string() }
    }

    pub fn retryable(&self) -> bool {
        match self {
            GatewayError::Network { .. } => { true }
            GatewayError::Timeout { .. } => { true }
            GatewayError::Other { .. } => { false }
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Network { message } => {
                write!(f, "{}", message)
            }
            GatewayError::Timeout { message } => {
                write!(f, "{}", message)
            }
            GatewayError::Other { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

#[async_trait]
pub(crate) trait PaymentGateway: Sync + Send {
    async fn process_payment(&self, patron_id: &str, amount: f64, description: &str) -> Result<PaymentResponse, GatewayError>;
    async fn refund_payment(&self, transaction_id: &str, amount: f64) -> Result<RefundResponse, GatewayError>;
    async fn verify_payment_status(&self, transaction_id: &str) -> Result<PaymentStatus, GatewayError>;
}
