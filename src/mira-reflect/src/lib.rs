//! Runtime reflection over enums, classes, and their members.
//!
//! The engine is a passive, in-memory store of type metadata. For every
//! reflected type, a registration entry point builds an [`EnumInfo`] or
//! [`ClassInfo`] through the construction surface ([`EnumInfo::with_values`],
//! [`ClassInfo::of`], [`field_info!`], [`MethodInfo::new`]) and hands
//! ownership to a [`Registry`]. Application code then looks the metadata up
//! by [`TypeId`][std::any::TypeId] or by display name, and uses it to read,
//! write, or invoke members of live object instances supplied by the caller.
//!
//! A registry passes through two phases. While it is owned (or borrowed
//! mutably), registration may freely add and remove metadata. Once
//! [`Registry::install`] moves it into process-wide storage it is sealed:
//! read-only, and safe for lookups from any number of threads.
//!
//! ```
//! use mira_reflect::{args, field_info, MethodInfo, Registry};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Point {
//!     fn sum(&self) -> i32 {
//!         self.x + self.y
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry
//!     .class_entry::<Point>("Point")
//!     .add_field(field_info!(Point, x))
//!     .add_field(field_info!(Point, y))
//!     .add_method(MethodInfo::new("sum", Point::sum));
//!
//! let class = registry.class_of::<Point>().unwrap();
//! let mut point = Point { x: 3, y: 4 };
//!
//! class.set_field_value(&mut point, "x", 5_i32);
//! let sum = class.invoke(&mut point, "sum", args![]).unwrap();
//! assert_eq!(sum.take::<i32>().unwrap(), 9);
//! ```

#![deny(
    rust_2018_idioms,
    rustdoc::broken_intra_doc_links,
    unsafe_op_in_unsafe_fn
)]

pub mod registry;
pub mod type_info;
pub mod value;

pub use registry::Registry;
pub use type_info::{
    BoundMethod, ClassInfo, EnumInfo, FieldInfo, InvokeError, MethodInfo, TypeInfo,
};
pub use value::Value;
