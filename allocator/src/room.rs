use serde::{Deserialize, Serialize};

pub const FLOOR_COUNT: u32 = 10;
pub const ROOMS_PER_FLOOR: u32 = 10;
/// The top floor is smaller than the others.
pub const TOP_FLOOR_ROOMS: u32 = 7;

const TOP_FLOOR_ID_BASE: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u32,
    pub floor: u32,
    /// Distance from the elevator/stairs, 1 is the closest.
    pub index: u32,
    pub is_booked: bool,
}

impl Room {
    pub fn new(floor: u32, index: u32) -> Option<Self> {
        let id = room_id(floor, index)?;
        Some(Self {
            id,
            floor,
            index,
            is_booked: false,
        })
    }
}

pub fn rooms_on_floor(floor: u32) -> Option<u32> {
    match floor {
        FLOOR_COUNT => Some(TOP_FLOOR_ROOMS),
        1..FLOOR_COUNT => Some(ROOMS_PER_FLOOR),
        _ => None,
    }
}

/// Floor-prefixed id: floor 3 room 5 is 305. Floor 10 uses 1001..=1007
/// so it does not clash with 101..=110.
pub fn room_id(floor: u32, index: u32) -> Option<u32> {
    let count = rooms_on_floor(floor)?;
    if index == 0 || index > count {
        return None;
    }
    if floor == FLOOR_COUNT {
        Some(TOP_FLOOR_ID_BASE + index)
    } else {
        Some(floor * 100 + index)
    }
}

/// Inverse of [`room_id`].
pub fn locate(id: u32) -> Option<(u32, u32)> {
    let (floor, index) = if id > TOP_FLOOR_ID_BASE {
        (FLOOR_COUNT, id - TOP_FLOOR_ID_BASE)
    } else {
        (id / 100, id % 100)
    };
    room_id(floor, index).map(|_| (floor, index))
}

/// Every room of the hotel, ordered by floor then index, all unbooked.
pub fn reference_layout() -> Vec<Room> {
    (1..=FLOOR_COUNT)
        .flat_map(|floor| {
            let count = rooms_on_floor(floor).unwrap_or(0);
            (1..=count).filter_map(move |index| Room::new(floor, index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_layout_has_97_rooms() {
        let rooms = reference_layout();
        assert_eq!(rooms.len(), 97);
        assert_eq!(rooms.first().map(|r| r.id), Some(101));
        assert_eq!(rooms.last().map(|r| r.id), Some(1007));
        assert!(rooms.iter().all(|r| !r.is_booked));
        assert_eq!(rooms.iter().filter(|r| r.floor == 10).count(), 7);
    }

    #[test]
    fn ids_and_slots_are_a_bijection() {
        let rooms = reference_layout();
        for room in &rooms {
            assert_eq!(locate(room.id), Some((room.floor, room.index)));
        }
        let mut ids: Vec<u32> = rooms.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), rooms.len());
    }

    #[test]
    fn out_of_range_slots_have_no_id() {
        assert_eq!(room_id(0, 1), None);
        assert_eq!(room_id(3, 0), None);
        assert_eq!(room_id(3, 11), None);
        assert_eq!(room_id(10, 8), None);
        assert_eq!(room_id(11, 1), None);
        assert_eq!(room_id(9, 10), Some(910));
        assert_eq!(room_id(10, 7), Some(1007));
    }

    #[test]
    fn locate_rejects_ids_outside_the_layout() {
        assert_eq!(locate(100), None);
        assert_eq!(locate(111), None);
        assert_eq!(locate(1000), None);
        assert_eq!(locate(1008), None);
        assert_eq!(locate(1010), None);
        assert_eq!(locate(42), None);
        assert_eq!(locate(305), Some((3, 5)));
    }

    #[test]
    fn room_serializes_with_camel_case_fields() {
        let room = Room::new(3, 5).unwrap();
        let json = serde_json::to_value(room).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 305, "floor": 3, "index": 5, "isBooked": false})
        );
    }
}
