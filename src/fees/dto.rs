use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FeeStatus {
    Implemented,
    Error,
}

// FeeQuote is a computed snapshot of what a patron owes for one borrowed title. It is never
// stored and failures are carried inside the quote instead of an error.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct FeeQuote {
    pub fee_amount: f64,
    pub days_overdue: i64,
    pub status: FeeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FeeQuote {
    pub fn assessed(days_overdue: i64, fee_amount: f64) -> Self {
        Self {
            fee_amount,
            days_overdue,
            status: FeeStatus::Implemented,
            message: None,
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            fee_amount: 0.0,
            days_overdue: 0,
            status: FeeStatus::Error,
            message: Some(message.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == FeeStatus::Error
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use crate::fees::dto::{FeeQuote, FeeStatus};

    #[tokio::test]
    async fn test_should_serialize_quotes() {
        let json = serde_json::to_value(FeeQuote::assessed(11, 5.5)).expect("should serialize");
        assert_eq!(5.5, json["fee_amount"]);
        assert_eq!(11, json["days_overdue"]);
        assert_eq!("implemented", json["status"]);
        assert!(json.get("message").is_none());

        let quote = FeeQuote::failed("Book not found.");
        assert!(quote.is_error());
        let json = serde_json::to_string(&quote).expect("should serialize");
        let parsed: FeeQuote = serde_json::from_str(json.as_str()).expect("should parse");
        assert_eq!(FeeStatus::Error, parsed.status);
        assert_eq!("Book not found.", parsed.message());
        assert_eq!(0.0, parsed.fee_amount);
    }
}
