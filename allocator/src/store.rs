use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::room::{self, Room, ROOMS_PER_FLOOR};

/// Share of rooms booked by a random occupancy run unless told otherwise.
pub const DEFAULT_OCCUPANCY: f64 = 0.4;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("room {0} does not exist")]
    UnknownRoom(u32),
    #[error("room {0} is already booked")]
    AlreadyBooked(u32),
    #[error("occupancy probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),
}

/// In-memory booking state of every room in the hotel.
#[derive(Debug, Clone)]
pub struct RoomStore {
    rooms: Vec<Room>,
}

impl Default for RoomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomStore {
    pub fn new() -> Self {
        Self {
            rooms: room::reference_layout(),
        }
    }

    pub fn list_all(&self) -> &[Room] {
        &self.rooms
    }

    pub fn list_available(&self) -> Vec<Room> {
        self.rooms.iter().filter(|r| !r.is_booked).copied().collect()
    }

    pub fn available_count(&self) -> usize {
        self.rooms.iter().filter(|r| !r.is_booked).count()
    }

    pub fn booked_count(&self) -> usize {
        self.rooms.len() - self.available_count()
    }

    pub fn get(&self, id: u32) -> Option<&Room> {
        self.slot(id).map(|slot| &self.rooms[slot])
    }

    /// Books every room in `ids`, or none of them if any id is unknown or
    /// already taken.
    pub fn mark_booked(&mut self, ids: &[u32]) -> Result<(), StoreError> {
        let mut slots = Vec::with_capacity(ids.len());
        for &id in ids {
            let slot = self.slot(id).ok_or(StoreError::UnknownRoom(id))?;
            if self.rooms[slot].is_booked || slots.contains(&slot) {
                return Err(StoreError::AlreadyBooked(id));
            }
            slots.push(slot);
        }

        for slot in slots {
            self.rooms[slot].is_booked = true;
        }
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for room in &mut self.rooms {
            room.is_booked = false;
        }
        info!("all rooms reset");
    }

    pub fn randomize_occupancy(&mut self, probability: f64) -> Result<(), StoreError> {
        self.randomize_occupancy_with(&mut rand::thread_rng(), probability)
    }

    /// Books each room independently with the given probability. Rooms that
    /// lose the draw become free, so earlier bookings do not survive.
    pub fn randomize_occupancy_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        probability: f64,
    ) -> Result<(), StoreError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(StoreError::InvalidProbability(probability));
        }
        for room in &mut self.rooms {
            room.is_booked = rng.gen_bool(probability);
        }
        info!(
            probability,
            booked = self.booked_count(),
            "random occupancy generated"
        );
        Ok(())
    }

    // Rooms are laid out floor by floor, so the slot follows from the id.
    fn slot(&self, id: u32) -> Option<usize> {
        let (floor, index) = room::locate(id)?;
        let slot = ((floor - 1) * ROOMS_PER_FLOOR + index - 1) as usize;
        self.rooms.get(slot).filter(|r| r.id == id).map(|_| slot)
    }
}
