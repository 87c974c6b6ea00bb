use std::mem;

use mira_reflect::EnumInfo;

#[allow(dead_code)]
enum Direction {
    North,
    South,
    East,
    West,
}

fn direction_info() -> EnumInfo {
    EnumInfo::with_values::<Direction>(
        "Direction",
        [("North", 0), ("South", 1), ("East", 2), ("West", 3)],
    )
}

#[test]
fn bidirectional_lookup() {
    let info = direction_info();

    assert_eq!(info.len(), 4);
    for (name, value) in [("North", 0), ("South", 1), ("East", 2), ("West", 3)] {
        assert_eq!(info.value_by_name(name), Some(value));
        assert_eq!(info.name_by_value(value), Some(name));
    }

    assert_eq!(info.value_by_name("Up"), None);
    assert_eq!(info.name_by_value(42), None);
}

#[test]
fn map_views_stay_in_sync() {
    let mut info = EnumInfo::of::<Direction>("Direction");
    assert!(info.is_empty());

    info.add_value("North", 0);
    assert_eq!(info.values().get("North"), Some(&0));
    assert_eq!(info.names().get(&0).map(String::as_str), Some("North"));
}

#[test]
fn duplicate_value_keeps_both_names() {
    let mut info = EnumInfo::of::<Direction>("Direction");
    info.add_value("North", 0);
    info.add_value("Up", 0);

    // Reverse map keeps the latest name; both forward entries remain.
    assert_eq!(info.name_by_value(0), Some("Up"));
    assert_eq!(info.value_by_name("North"), Some(0));
    assert_eq!(info.value_by_name("Up"), Some(0));
    assert_eq!(info.len(), 2);
}

#[test]
fn remapped_name_leaves_stale_reverse_entry() {
    let mut info = EnumInfo::of::<Direction>("Direction");
    info.add_value("North", 0);
    info.add_value("North", 5);

    assert_eq!(info.value_by_name("North"), Some(5));
    assert_eq!(info.name_by_value(5), Some("North"));
    // Documented divergence: the old reverse entry stays behind.
    assert_eq!(info.name_by_value(0), Some("North"));
}

#[test]
fn type_metadata() {
    let info = direction_info();

    assert_eq!(info.name(), "Direction");
    assert_eq!(info.size(), mem::size_of::<Direction>());
    assert!(info.is::<Direction>());
    assert!(!info.is::<u32>());
}
