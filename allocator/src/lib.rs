pub mod allocator;
pub mod booking;
pub mod room;
pub mod store;

pub use allocator::{allocate, Selection};
pub use booking::{book, Booking, BookingError};
pub use room::Room;
pub use store::{RoomStore, StoreError, DEFAULT_OCCUPANCY};
