//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use serde::de::DeserializeOwned;
use serde_json::Value;

use gateway_types::{
    AppError, CreatePaymentIntentRequest, ErrorResponse, HealthResponse, IdempotencyKey,
    PaymentIntentResponse, PaymentProvider, SaveTransactionRequest, SaveTransactionResponse,
    TransactionSink, ValidationError, validate,
};

use crate::{IntentGateway, TransactionRecorder};

/// Header carrying the caller's idempotency key for intent creation.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Application state shared across handlers.
pub struct AppState<P: PaymentProvider, S: TransactionSink> {
    pub gateway: IntentGateway<P>,
    pub recorder: TransactionRecorder<S>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError(AppError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Provider(err) => (StatusCode::BAD_GATEWAY, err.message),
            AppError::Internal(detail) => {
                tracing::error!("internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Decodes a request body that must be a JSON object.
///
/// Arrays and scalars are rejected up front: a derived struct decoder would
/// otherwise map array elements onto fields by position.
fn body<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ValidationError> {
    let Json(value) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;

    if !value.is_object() {
        return Err(ValidationError::MalformedBody("expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| ValidationError::MalformedBody(e.to_string()))
}

fn idempotency_key(headers: &HeaderMap) -> Result<Option<IdempotencyKey>, ValidationError> {
    headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| ValidationError::InvalidIdempotencyKey)
                .and_then(IdempotencyKey::parse)
        })
        .transpose()
}

/// Health check endpoint. Touches no collaborator.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Plain-text banner on the root path.
pub async fn banner() -> &'static str {
    "Payment intent gateway running"
}

/// Create a payment intent.
#[tracing::instrument(skip_all)]
pub async fn create_payment_intent<P: PaymentProvider, S: TransactionSink>(
    State(state): State<Arc<AppState<P, S>>>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: CreatePaymentIntentRequest = body(payload)?;
    let key = idempotency_key(&headers)?;
    let payment = validate(&req)?.with_idempotency_key(key);

    let intent = state.gateway.create_intent(payment).await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret().to_string(),
    }))
}

/// Record a client-reported transaction.
#[tracing::instrument(skip_all)]
pub async fn save_transaction<P: PaymentProvider, S: TransactionSink>(
    State(state): State<Arc<AppState<P, S>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: SaveTransactionRequest = body(payload)?;

    let record = state.recorder.record(req).await?;

    Ok(Json(SaveTransactionResponse {
        success: true,
        record,
    }))
}
