use std::sync::Arc;

use axum::{extract::State, response::Json};
use hotel_allocator::{booking, RoomStore};
use tokio::sync::Mutex;
use tracing::info;

use crate::models::{Action, ApiError, BookingRequest, BookingResponse};

#[derive(Clone)]
pub struct AppState {
    // One lock around the store: a booking reads, allocates and commits
    // without another request interleaving.
    pub store: Arc<Mutex<RoomStore>>,
    pub random_occupancy: f64,
}

impl AppState {
    pub fn new(random_occupancy: f64) -> Self {
        Self {
            store: Arc::new(Mutex::new(RoomStore::new())),
            random_occupancy,
        }
    }
}

pub async fn get_rooms(State(state): State<AppState>) -> Json<BookingResponse> {
    let store = state.store.lock().await;
    Json(BookingResponse::rooms(store.list_all().to_vec(), None))
}

pub async fn post_rooms(
    State(state): State<AppState>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let mut store = state.store.lock().await;

    match payload.action {
        Action::Reset => {
            store.reset_all();
            Ok(Json(BookingResponse::rooms(
                store.list_all().to_vec(),
                Some("All rooms reset.".to_string()),
            )))
        }
        Action::Random => {
            let probability = payload.probability.unwrap_or(state.random_occupancy);
            store.randomize_occupancy(probability)?;
            Ok(Json(BookingResponse::rooms(
                store.list_all().to_vec(),
                Some("Random occupancy generated.".to_string()),
            )))
        }
        Action::Book => {
            let count = payload.room_count();
            let booking = booking::book(&mut store, count)?;
            info!(count, available = store.available_count(), "booking committed");
            Ok(Json(BookingResponse {
                success: true,
                message: Some(format!("Successfully booked {count} rooms.")),
                booked_room_ids: Some(booking.room_ids),
                travel_time: Some(booking.travel_time),
                rooms: store.list_all().to_vec(),
            }))
        }
    }
}
