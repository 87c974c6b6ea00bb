use std::{any::TypeId, ptr};

use mira_reflect::{args, field_info, ClassInfo, EnumInfo, MethodInfo, Registry};

#[allow(dead_code)]
enum Color {
    Red,
    Green,
    Blue,
}

struct Point {
    x: i32,
    y: i32,
}

impl Point {
    fn sum(&self) -> i32 {
        self.x + self.y
    }
}

fn register_point(registry: &mut Registry) {
    let info = registry.class_entry::<Point>("Point");
    if info.fields().is_empty() {
        info.add_field(field_info!(Point, x))
            .add_field(field_info!(Point, y))
            .add_method(MethodInfo::new("sum", Point::sum));
    }
}

#[test]
fn end_to_end_scenario() {
    let mut registry = Registry::new();
    registry.register_enum(EnumInfo::with_values::<Color>(
        "Color",
        [("Red", 0), ("Green", 1), ("Blue", 2)],
    ));
    register_point(&mut registry);

    let colors = registry.enum_of::<Color>().unwrap();
    assert_eq!(colors.len(), 3);
    assert_eq!(colors.name_by_value(1), Some("Green"));

    let mut point = Point { x: 3, y: 4 };
    let info = registry.class_of::<Point>().unwrap();
    assert_eq!(info.field_value::<i32>(&point, "x"), Some(&3));

    let ret = info.invoke(&mut point, "sum", args![]).unwrap();
    assert_eq!(ret.take::<i32>().unwrap(), 7);
}

#[test]
fn entry_is_idempotent() {
    let mut registry = Registry::new();
    register_point(&mut registry);
    register_point(&mut registry);

    assert_eq!(registry.class_count(), 1);
    let info = registry.class_of::<Point>().unwrap();
    assert_eq!(info.fields().len(), 2);
    assert_eq!(info.methods().len(), 1);
}

#[test]
fn lookup_by_id_and_name() {
    let mut registry = Registry::new();
    register_point(&mut registry);

    let by_id = registry.class_info(TypeId::of::<Point>()).unwrap();
    let by_name = registry.class_by_name("Point").unwrap();
    assert!(ptr::eq(by_id, by_name));

    assert!(registry.class_by_name("Triangle").is_none());
    assert!(registry.enum_info(TypeId::of::<Color>()).is_none());
}

#[test]
fn removal_drops_subtree() {
    let mut registry = Registry::new();
    register_point(&mut registry);

    let removed = registry.remove_class(TypeId::of::<Point>()).unwrap();
    assert_eq!(removed.fields().len(), 2);
    assert_eq!(registry.class_count(), 0);
    assert!(registry.class_of::<Point>().is_none());

    assert!(registry.remove_class(TypeId::of::<Point>()).is_none());
}

#[test]
fn replacement_displaces_old_record() {
    let mut registry = Registry::new();
    register_point(&mut registry);

    let displaced = registry.register_class(ClassInfo::of::<Point>("Point2"));
    assert_eq!(displaced.unwrap().name(), "Point");
    assert_eq!(registry.class_count(), 1);
    assert_eq!(registry.class_of::<Point>().unwrap().name(), "Point2");
}

#[test]
fn iterators_cover_all_records() {
    let mut registry = Registry::new();
    registry.register_enum(EnumInfo::of::<Color>("Color"));
    register_point(&mut registry);

    assert_eq!(registry.enums().count(), 1);
    assert_eq!(registry.classes().count(), 1);
    assert_eq!(registry.enum_count(), 1);
}

// Sealing is process-global, so the whole lifecycle lives in one test.
#[test]
fn install_seals_the_registry() {
    assert!(Registry::global().is_none());

    let mut registry = Registry::new();
    register_point(&mut registry);

    let sealed = registry.install().expect("first install succeeds");
    assert!(ptr::eq(sealed, Registry::global().unwrap()));

    let mut point = Point { x: 1, y: 2 };
    let info = Registry::global().unwrap().class_of::<Point>().unwrap();
    let ret = info.invoke(&mut point, "sum", args![]).unwrap();
    assert_eq!(ret.take::<i32>().unwrap(), 3);

    let rejected = Registry::new().install().unwrap_err();
    assert_eq!(rejected.class_count(), 0);
}
