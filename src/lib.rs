/*!
Runtime type information for Decima-style type descriptor graphs

Descriptors are registered once into a [`TypeRegistry`] and are read-only afterwards.
Everything else is a query over that graph: [`TypeRegistry::is_kind_of`] for is-a tests,
[`TypeRegistry::categorized_members`] for the flattened member layout of a class, and
[`TypeRegistry::cast`] for checked downcasts of objects that know their own descriptor.

# Examples
```
use decima_rtti::{MemberEntry, Rtti, RttiClass, RttiPrimitive, TypeIdentity, TypeRegistry};

# fn main() -> Result<(), decima_rtti::RttiError> {
let mut builder = TypeRegistry::builder();
let int = builder.register(Rtti::primitive(TypeIdentity::new(1, 1), RttiPrimitive::new("int")));
let base = builder.register(Rtti::class(
    TypeIdentity::new(2, 2),
    RttiClass::new("Base", 16, 8)
        .with_field(MemberEntry::new("a", int, 0x0))
        .with_field(MemberEntry::new("b", int, 0x8)),
)?);
let derived = builder.register(Rtti::class(
    TypeIdentity::new(3, 3),
    RttiClass::new("Derived", 32, 8).with_base(decima_rtti::InheritanceEntry::new(base, 0x10)),
)?);
let registry = builder.build()?;

assert!(registry.is_kind_of(Some(derived), Some(base)));

let layout = registry.categorized_members(derived)?;
let offsets = layout.iter().map(|entry| entry.offset).collect::<Vec<_>>();
assert_eq!(offsets, [0x10, 0x18]);
# Ok(())
# }
```
*/

pub use ::decima_rtti_core::*;

/// Derive-able implementation of [`RttiType`] and [`RttiObject`]
///
/// Accepts non-generic structs only
///
/// *Note*: fields marked `#[rtti(base)]` must themselves implement [`RttiObject`]
#[cfg(feature = "derive")]
pub use decima_rtti_macros::RttiObject;
