// Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

// POST /tools/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub k: Option<usize>,
}

// POST /tools/{name}/invoke
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvokeResponse {
    pub result: serde_json::Value,
}

// GET /tools
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolListResponse {
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_k_optional() {
        let request: SearchRequest = serde_json::from_value(json!({"query": "weather"})).unwrap();
        assert_eq!(request.query, "weather");
        assert_eq!(request.k, None);

        let request: SearchRequest =
            serde_json::from_value(json!({"query": "weather", "k": 3})).unwrap();
        assert_eq!(request.k, Some(3));
    }

    #[test]
    fn test_search_request_requires_query() {
        assert!(serde_json::from_value::<SearchRequest>(json!({"k": 3})).is_err());
    }

    #[test]
    fn test_invoke_response_serialization() {
        let response = InvokeResponse {
            result: json!("HELLO!"),
        };
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"result": "HELLO!"}));
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::new("Unknown tool: nope");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": "Unknown tool: nope"})
        );
    }
}
