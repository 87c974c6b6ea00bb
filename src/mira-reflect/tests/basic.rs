use std::any::TypeId;
use std::mem;

use mira_reflect::{field_info, ClassInfo};

#[derive(Debug, Default)]
struct Sample {
    a: i32,
    b: f32,
}

#[test]
fn field_descriptors_match_layout() {
    let a = field_info!(Sample, a);
    let b = field_info!(Sample, b);

    assert_eq!(a.name(), "a");
    assert_eq!(a.offset(), mem::offset_of!(Sample, a));
    assert_eq!(b.offset(), mem::offset_of!(Sample, b));
    assert_eq!(a.size(), mem::size_of::<i32>());
    assert_eq!(a.type_id(), TypeId::of::<i32>());
    assert_eq!(a.owner(), TypeId::of::<Sample>());
}

#[test]
fn known_layout_offsets() {
    #[repr(C)]
    #[allow(dead_code)]
    struct Pod {
        a: i32,
        b: f32,
    }

    let b = field_info!(Pod, b);
    assert_eq!(b.offset(), mem::size_of::<i32>());
}

#[test]
fn field_round_trip() {
    let mut info = ClassInfo::of::<Sample>("Sample");
    info.add_field(field_info!(Sample, a));

    let mut obj = Sample { a: 1, b: 0.0 };
    assert!(info.set_field_value(&mut obj, "a", 42_i32));
    assert_eq!(info.field_value::<i32>(&obj, "a"), Some(&42));
    assert_eq!(obj.a, 42);
}

#[test]
fn checked_access_rejects_mismatches() {
    let mut info = ClassInfo::of::<Sample>("Sample");
    info.add_field(field_info!(Sample, a));

    let mut obj = Sample { a: 7, b: 0.0 };

    // Wrong field type.
    assert_eq!(info.field_value::<f64>(&obj, "a"), None);
    assert!(!info.set_field_value(&mut obj, "a", 1.0_f64));
    assert_eq!(obj.a, 7);

    // Wrong owner.
    let other = 3_u32;
    assert_eq!(info.field_value::<i32>(&other, "a"), None);

    // Unknown name.
    assert_eq!(info.field_value::<i32>(&obj, "missing"), None);
    assert!(!info.set_field_value(&mut obj, "missing", 1_i32));
}

#[test]
fn soft_miss_returns_default() {
    let info = ClassInfo::of::<Sample>("Sample");
    let obj = Sample { a: 5, b: 0.0 };

    assert_eq!(info.field_value_or_default::<i32>(&obj, "missing"), 0);
}

#[test]
fn member_removal() {
    let mut info = ClassInfo::of::<Sample>("Sample");
    info.add_field(field_info!(Sample, a))
        .add_field(field_info!(Sample, b));

    assert!(info.remove_field("a").is_some());
    assert!(info.field("a").is_none());
    assert!(!info.fields().contains_key("a"));

    // Removing again is a no-op.
    assert!(info.remove_field("a").is_none());
    assert_eq!(info.fields().len(), 1);
}

#[test]
fn unchecked_access() {
    let a = field_info!(Sample, a);
    let mut obj = Sample { a: 9, b: 1.0 };

    // SAFETY: `obj` is a live `Sample` and `a` stores `i32`.
    unsafe {
        assert_eq!(*a.get_unchecked::<i32>((&obj as *const Sample).cast()), 9);
        *a.get_unchecked_mut::<i32>((&mut obj as *mut Sample).cast()) = 11;
    }

    assert_eq!(obj.a, 11);
}
