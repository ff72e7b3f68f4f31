use std::collections::BTreeMap;

use hotel_allocator::Room;

/// Text floor plan, top floor first, elevator on the left.
///
/// Free rooms show their id, booked rooms are masked and rooms from the last
/// booking are wrapped in `*`.
pub fn floor_plan(rooms: &[Room], highlight: &[u32]) -> String {
    let mut floors: BTreeMap<u32, Vec<&Room>> = BTreeMap::new();
    for room in rooms {
        floors.entry(room.floor).or_default().push(room);
    }

    let mut out = String::new();
    for (floor, rooms) in floors.iter_mut().rev() {
        rooms.sort_by_key(|r| r.index);
        out.push_str(&format!("F{floor:<2} |▮|"));
        for room in rooms.iter() {
            let cell = if highlight.contains(&room.id) {
                format!("*{:>4}*", room.id)
            } else if room.is_booked {
                " ---- ".to_string()
            } else {
                format!(" {:>4} ", room.id)
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }

    let booked = rooms.iter().filter(|r| r.is_booked).count();
    out.push_str(&format!("{} of {} rooms booked\n", booked, rooms.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotel_allocator::RoomStore;

    #[test]
    fn top_floor_is_printed_first() {
        let store = RoomStore::new();
        let plan = floor_plan(store.list_all(), &[]);
        let lines: Vec<&str> = plan.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("F10"));
        assert!(lines[9].starts_with("F1  |▮|  101   102 "));
        assert!(lines[0].contains("1007"));
        assert_eq!(lines[10], "0 of 97 rooms booked");
    }

    #[test]
    fn marks_booked_and_highlighted_rooms() {
        let mut store = RoomStore::new();
        store.mark_booked(&[101, 102, 205]).unwrap();
        let plan = floor_plan(store.list_all(), &[101, 102]);

        assert!(plan.contains("* 101*"));
        assert!(plan.contains("* 102*"));
        assert!(!plan.contains(" 205 "));
        assert!(plan.contains(" ---- "));
        assert!(plan.ends_with("3 of 97 rooms booked\n"));
    }
}
