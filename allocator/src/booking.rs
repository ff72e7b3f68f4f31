use thiserror::Error;
use tracing::{info, warn};

use crate::allocator::{self, MAX_ROOMS_PER_BOOKING, MIN_ROOMS_PER_BOOKING};
use crate::store::{RoomStore, StoreError};

#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("invalid room count {0}, expected 1-5")]
    InvalidCount(i64),
    #[error("requested {requested} rooms but only {available} are available")]
    InsufficientRooms { requested: usize, available: usize },
    #[error("no arrangement of {0} rooms found")]
    NoArrangement(usize),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A committed booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub room_ids: Vec<u32>,
    pub travel_time: u32,
}

/// Books `count` rooms with the lowest travel time and marks them in `store`.
///
/// Snapshot, allocation and commit all happen under the one `&mut` borrow,
/// so callers sharing a store behind a lock get an atomic booking as long as
/// the guard is held for the whole call. On error the store is unchanged.
pub fn book(store: &mut RoomStore, count: i64) -> Result<Booking, BookingError> {
    let required = usize::try_from(count)
        .ok()
        .filter(|n| (MIN_ROOMS_PER_BOOKING..=MAX_ROOMS_PER_BOOKING).contains(n))
        .ok_or_else(|| {
            warn!(count, "rejected booking with invalid room count");
            BookingError::InvalidCount(count)
        })?;

    let available = store.list_available();
    let selection = allocator::allocate(&available, required);

    if selection.len() != required {
        let err = if available.len() < required {
            BookingError::InsufficientRooms {
                requested: required,
                available: available.len(),
            }
        } else {
            BookingError::NoArrangement(required)
        };
        warn!(error = %err, "booking rejected");
        return Err(err);
    }

    store.mark_booked(&selection.room_ids)?;
    info!(
        rooms = ?selection.room_ids,
        travel_time = selection.cost,
        "rooms booked"
    );

    Ok(Booking {
        room_ids: selection.room_ids,
        travel_time: selection.cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn books_and_commits_the_selection() {
        let mut store = RoomStore::new();
        let booking = book(&mut store, 3).unwrap();
        assert_eq!(booking.room_ids, vec![101, 102, 103]);
        assert_eq!(booking.travel_time, 2);
        assert_eq!(store.booked_count(), 3);
        assert!(store.get(102).unwrap().is_booked);
    }

    #[test]
    fn consecutive_bookings_continue_along_the_floor() {
        let mut store = RoomStore::new();
        book(&mut store, 4).unwrap();
        let second = book(&mut store, 4).unwrap();
        assert_eq!(second.room_ids, vec![105, 106, 107, 108]);
        assert_eq!(second.travel_time, 3);

        // Floor 1 only has 109 and 110 left.
        let third = book(&mut store, 3).unwrap();
        assert_eq!(third.room_ids, vec![201, 202, 203]);
    }

    #[test]
    fn rejects_counts_outside_one_to_five() {
        let mut store = RoomStore::new();
        for count in [0, 6, -1, i64::MAX] {
            assert_eq!(book(&mut store, count), Err(BookingError::InvalidCount(count)));
        }
        assert_eq!(store.booked_count(), 0);
    }

    #[test]
    fn reports_insufficient_inventory() {
        let mut store = RoomStore::new();
        let all: Vec<u32> = store.list_all().iter().map(|r| r.id).skip(3).collect();
        store.mark_booked(&all).unwrap();

        let err = book(&mut store, 4).unwrap_err();
        assert_eq!(
            err,
            BookingError::InsufficientRooms {
                requested: 4,
                available: 3
            }
        );
        assert_eq!(store.available_count(), 3);

        let booking = book(&mut store, 3).unwrap();
        assert_eq!(booking.room_ids, vec![101, 102, 103]);
        assert_eq!(store.available_count(), 0);
    }

    #[test]
    fn repeated_bookings_never_share_a_room() {
        let mut store = RoomStore::new();
        store
            .randomize_occupancy_with(&mut StdRng::seed_from_u64(3), 0.4)
            .unwrap();

        let mut seen = HashSet::new();
        for count in [5, 1, 3, 2, 4].into_iter().cycle().take(40) {
            match book(&mut store, count) {
                Ok(booking) => {
                    assert_eq!(booking.room_ids.len(), count as usize);
                    for id in booking.room_ids {
                        assert!(seen.insert(id), "room {id} booked twice");
                    }
                }
                Err(BookingError::InsufficientRooms { available, .. }) => {
                    assert!(available < count as usize);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
    }
}
