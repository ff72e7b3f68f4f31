use std::collections::BTreeMap;

use tracing::debug;

use crate::room::Room;

pub const VERTICAL_TIME_PER_FLOOR: u32 = 2;
pub const HORIZONTAL_TIME_PER_ROOM: u32 = 1;

pub const MIN_ROOMS_PER_BOOKING: usize = 1;
pub const MAX_ROOMS_PER_BOOKING: usize = 5;

/// Rooms picked for one request and their modeled travel time.
///
/// An empty selection means the request could not be placed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub room_ids: Vec<u32>,
    pub cost: u32,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.room_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.room_ids.len()
    }

    fn from_rooms<'a>(rooms: impl IntoIterator<Item = &'a Room>, cost: u32) -> Self {
        Self {
            room_ids: rooms.into_iter().map(|r| r.id).collect(),
            cost,
        }
    }
}

/// Picks `required` rooms out of `available` minimizing travel time.
///
/// A single floor is always preferred when one can hold the whole request,
/// even if a split across floors would be cheaper. Only when no floor has
/// enough free rooms does the multi-floor search run.
///
/// `available` must contain unbooked rooms only, without duplicates. Invalid
/// counts and unsatisfiable requests both yield [`Selection::empty`].
pub fn allocate(available: &[Room], required: usize) -> Selection {
    if !(MIN_ROOMS_PER_BOOKING..=MAX_ROOMS_PER_BOOKING).contains(&required) {
        return Selection::empty();
    }

    let floors = group_by_floor(available);

    if let Some(selection) = best_single_floor(&floors, required) {
        debug!(required, cost = selection.cost, "single-floor placement");
        return selection;
    }

    match best_multi_floor(&floors, required) {
        Some(selection) => {
            debug!(required, cost = selection.cost, "multi-floor placement");
            selection
        }
        None => {
            debug!(required, available = available.len(), "no placement");
            Selection::empty()
        }
    }
}

fn group_by_floor(available: &[Room]) -> BTreeMap<u32, Vec<&Room>> {
    let mut floors: BTreeMap<u32, Vec<&Room>> = BTreeMap::new();
    for room in available {
        floors.entry(room.floor).or_default().push(room);
    }
    for rooms in floors.values_mut() {
        rooms.sort_by_key(|r| r.index);
    }
    floors
}

// Windows are contiguous in the sorted list, not in index space, so booked
// rooms may sit inside a window.
fn best_single_floor(floors: &BTreeMap<u32, Vec<&Room>>, required: usize) -> Option<Selection> {
    let mut best: Option<(u32, &[&Room])> = None;

    for rooms in floors.values() {
        for window in rooms.windows(required) {
            let (first, last) = (window[0], window[window.len() - 1]);
            let cost = (last.index - first.index) * HORIZONTAL_TIME_PER_ROOM;
            if best.is_none_or(|(min, _)| cost < min) {
                best = Some((cost, window));
            }
        }
    }

    best.map(|(cost, window)| Selection::from_rooms(window.iter().copied(), cost))
}

fn best_multi_floor(floors: &BTreeMap<u32, Vec<&Room>>, required: usize) -> Option<Selection> {
    let active: Vec<u32> = floors.keys().copied().collect();
    let mut best: Option<Selection> = None;

    for (i, &f_start) in active.iter().enumerate() {
        for &f_end in &active[i + 1..] {
            // Vertical travel alone is a lower bound for this span.
            let vertical = (f_end - f_start) * VERTICAL_TIME_PER_FLOOR;
            if best.as_ref().is_some_and(|b| vertical >= b.cost) {
                continue;
            }

            let mut candidates: Vec<&Room> = floors
                .range(f_start..=f_end)
                .flat_map(|(_, rooms)| rooms.iter().copied())
                .collect();
            if candidates.len() < required {
                continue;
            }

            candidates.sort_by_key(|r| (r.index, r.floor));
            let selected = &candidates[..required];
            let cost = span_cost(selected);

            if best.as_ref().is_none_or(|b| cost < b.cost) {
                best = Some(Selection::from_rooms(selected.iter().copied(), cost));
            }
        }
    }

    best
}

/// Walk on the lowest and highest floor used plus the ride between them.
/// Floors strictly in between are not charged.
fn span_cost(selected: &[&Room]) -> u32 {
    let (Some(min_floor), Some(max_floor)) = (
        selected.iter().map(|r| r.floor).min(),
        selected.iter().map(|r| r.floor).max(),
    ) else {
        return 0;
    };

    let walk_on = |floor: u32| {
        selected
            .iter()
            .filter(|r| r.floor == floor)
            .map(|r| r.index * HORIZONTAL_TIME_PER_ROOM)
            .max()
            .unwrap_or(0)
    };

    walk_on(min_floor) + walk_on(max_floor) + (max_floor - min_floor) * VERTICAL_TIME_PER_FLOOR
}
