//! Uniform `{status, message, data?}` result envelope.
//!
//! # Invariants
//! - Every workflow outcome, success or failure, maps to exactly one
//!   envelope; no workflow error escapes past this boundary.
//! - `data` is omitted from the JSON when absent.

use crate::service::error::{ServiceError, ServiceResult};
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// HTTP status code for the transport layer; never serialized.
    #[serde(skip)]
    pub http_status: u16,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: message.into(),
            data: Some(data),
            http_status: 200,
        }
    }

    pub fn failure(message: impl Into<String>, http_status: u16) -> Self {
        Self {
            status: false,
            message: message.into(),
            data: None,
            http_status,
        }
    }

    /// Wraps a workflow result that carries data on success.
    pub fn from_result(result: ServiceResult<T>, success_message: &str) -> Self {
        match result {
            Ok(data) => Self::success(success_message, data),
            Err(err) => Self::from_error(&err),
        }
    }

    fn from_error(err: &ServiceError) -> Self {
        debug!(
            "event=envelope module=response status=error code={} http_status={}",
            err.code(),
            err.http_status()
        );
        Self::failure(err.message(), err.http_status())
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Wraps a listing; an empty listing reports `status=false` with
    /// `empty_message` and an empty `data` array.
    pub fn from_listing(
        result: ServiceResult<Vec<T>>,
        found_message: &str,
        empty_message: &str,
    ) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self {
                status: false,
                message: empty_message.to_string(),
                data: Some(items),
                http_status: 200,
            },
            other => Self::from_result(other, found_message),
        }
    }
}

impl ApiResponse<()> {
    /// Wraps a workflow result with no payload: `{status, message}`.
    pub fn from_action<U>(result: ServiceResult<U>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self {
                status: true,
                message: success_message.to_string(),
                data: None,
                http_status: 200,
            },
            Err(err) => Self::from_error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiResponse;
    use crate::service::error::ServiceError;
    use serde_json::json;

    #[test]
    fn action_success_omits_data() {
        let response = ApiResponse::<()>::from_action(Ok::<_, ServiceError>(42), "done");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": true, "message": "done"})
        );
        assert_eq!(response.http_status, 200);
    }

    #[test]
    fn failure_carries_error_message_and_code() {
        let response = ApiResponse::<()>::from_action(
            Err::<(), _>(ServiceError::ReferentialGuard("in use".into())),
            "done",
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": false, "message": "in use"})
        );
        assert_eq!(response.http_status, 409);
    }

    #[test]
    fn empty_listing_reports_false_with_empty_array() {
        let response = ApiResponse::<Vec<String>>::from_listing(
            Ok(Vec::new()),
            "found",
            "nothing here",
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"status": false, "message": "nothing here", "data": []})
        );
    }

    #[test]
    fn listing_with_items_succeeds() {
        let response =
            ApiResponse::<Vec<String>>::from_listing(Ok(vec!["a".to_string()]), "found", "none");
        assert!(response.status);
        assert_eq!(response.data, Some(vec!["a".to_string()]));
    }
}
