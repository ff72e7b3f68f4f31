use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hotel_allocator::{BookingError, Room, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Book,
    Reset,
    Random,
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub action: Action,
    // Any JSON value, so a malformed count is answered like an out of range one.
    pub count: Option<Value>,
    /// Only read by `random`; falls back to the configured occupancy.
    pub probability: Option<f64>,
}

impl BookingRequest {
    /// The requested room count, 0 when absent or not an integer.
    pub fn room_count(&self) -> i64 {
        self.count.as_ref().and_then(Value::as_i64).unwrap_or(0)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booked_room_ids: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<u32>,
    pub rooms: Vec<Room>,
}

impl BookingResponse {
    pub fn rooms(rooms: Vec<Room>, message: Option<String>) -> Self {
        Self {
            success: true,
            message,
            booked_room_ids: None,
            travel_time: None,
            rooms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Booking(BookingError::InvalidCount(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid room count (1-5).".to_string())
            }
            ApiError::Booking(
                BookingError::InsufficientRooms { .. } | BookingError::NoArrangement(_),
            ) => (
                StatusCode::BAD_REQUEST,
                "Not enough optimal rooms available.".to_string(),
            ),
            ApiError::Store(StoreError::InvalidProbability(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            // The allocator only hands back free rooms from the same snapshot,
            // so a failed commit is a bug rather than a bad request.
            ApiError::Booking(BookingError::Store(_)) | ApiError::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}
