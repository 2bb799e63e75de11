//! JSON bodies exchanged between the console and the backend.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/tables/{table}/count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub table: String,
    pub rows: u64,
}

/// Body of every non-2xx answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_body_shape() {
        let body = CountResponse {
            table: "deals".into(),
            rows: 42,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"table":"deals","rows":42}"#);
    }
}
