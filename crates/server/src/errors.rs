use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{async_trait, Json};
use common::types::ErrorBody;
use serde_json::Value;
use service::product::validation::validate_payload;
use service::{ProductInput, ServiceError};
use tracing::{debug, error};

/// The handler an error came out of; picks the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Unable to create the product.",
            Operation::List => "Unable to fetch products.",
            Operation::Get => "Unable to fetch the product.",
            Operation::Update => "Unable to update the product.",
            Operation::Delete => "Unable to delete the product.",
        }
    }

    fn for_method(method: &Method) -> Self {
        if method == Method::POST {
            Operation::Create
        } else if method == Method::PUT {
            Operation::Update
        } else if method == Method::DELETE {
            Operation::Delete
        } else {
            Operation::Get
        }
    }
}

/// Status code for a failed operation. The only place this decision is made.
///
/// Create reports every failure as 400, store failures included.
pub fn status_for(op: Operation, err: &ServiceError) -> StatusCode {
    match (op, err) {
        (_, ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
        (_, ServiceError::Validation(_) | ServiceError::InvalidId(_)) => StatusCode::BAD_REQUEST,
        (Operation::Create, ServiceError::Store(_)) => StatusCode::BAD_REQUEST,
        (_, ServiceError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error response: status plus `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn from_service(op: Operation, err: ServiceError) -> Self {
        let status = status_for(op, &err);
        let message = match &err {
            ServiceError::NotFound(_) => "Product not found.".to_string(),
            ServiceError::InvalidId(raw) => format!("Invalid product id: {}", raw),
            ServiceError::Validation(_) | ServiceError::Store(_) => op.failure_message().to_string(),
        };
        if matches!(err, ServiceError::Store(_)) {
            error!(operation = ?op, error = %err, "product operation failed");
        } else {
            debug!(operation = ?op, error = %err, "product request rejected");
        }
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

pub trait OrApiError<T> {
    fn or_api(self, op: Operation) -> Result<T, ApiError>;
}

impl<T> OrApiError<T> for Result<T, ServiceError> {
    fn or_api(self, op: Operation) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::from_service(op, e))
    }
}

/// Request body run through the product validator.
///
/// Only bodies declared as JSON are parsed; a missing or non-JSON content type
/// and an empty body are read as `{}`. Malformed JSON and uncastable fields go
/// through [`ApiError`] like every other failure.
#[derive(Debug)]
pub struct ValidatedProduct(pub ProductInput);

#[async_trait]
impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let op = Operation::for_method(req.method());
        let json = is_json(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rej| ApiError::from_service(op, ServiceError::Validation(rej.body_text())))?;

        let value = if !json || bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Default::default())
        } else {
            serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| ApiError::from_service(op, ServiceError::Validation(e.to_string())))?
        };
        validate_payload(value).map(Self).or_api(op)
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(ct) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let op = Operation::Get;
        assert_eq!(status_for(op, &ServiceError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(op, &ServiceError::InvalidId("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(op, &ServiceError::not_found("product")), StatusCode::NOT_FOUND);
        assert_eq!(status_for(op, &ServiceError::Store("down".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn create_reports_store_failures_as_bad_request() {
        let e = ApiError::from_service(Operation::Create, ServiceError::Store("down".into()));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "Unable to create the product.");

        for op in [Operation::List, Operation::Get, Operation::Update, Operation::Delete] {
            assert_eq!(status_for(op, &ServiceError::Store("down".into())), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn store_failures_use_operation_message() {
        let e = ApiError::from_service(Operation::List, ServiceError::Store("down".into()));
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.message, "Unable to fetch products.");

        let e = ApiError::from_service(Operation::Delete, ServiceError::not_found("product"));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "Product not found.");
    }

    #[test]
    fn json_content_types() {
        let mut h = HeaderMap::new();
        assert!(!is_json(&h));
        h.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json(&h));
        h.insert(header::CONTENT_TYPE, "application/merge-patch+json".parse().unwrap());
        assert!(is_json(&h));
        h.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!is_json(&h));
    }
}
