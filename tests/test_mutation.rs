mod common;

use decima_rtti::{RttiObject, TypeRegistry, WeakPtrTarget};

#[derive(decima_rtti::RttiObject, Default)]
pub struct CoreObject {
    #[rtti(base)]
    base: WeakPtrTarget,
    name: String,
}

#[derive(decima_rtti::RttiObject, Default)]
pub struct Entity {
    #[rtti(base)]
    core: CoreObject,
    health: f32,
}

pub fn rename_erased(registry: &TypeRegistry, obj: &mut dyn RttiObject) -> bool {
    match registry.cast_mut::<CoreObject>(obj) {
        Some(core) => {
            core.name = "Thunderjaw".to_owned();
            true
        }
        None => false,
    }
}

#[test]
pub fn test_erased_mutation() {
    let registry = common::fixture().registry;
    let mut entity = Entity::default();

    assert!(rename_erased(&registry, &mut entity));
    assert_eq!(entity.core.name, "Thunderjaw");
}

#[test]
pub fn test_mutation_through_nested_base() {
    let registry = common::fixture().registry;
    let mut entity = Entity::default();

    let weak = registry.cast_mut::<WeakPtrTarget>(&mut entity).unwrap();
    weak.track_weak_ref(7);
    weak.track_weak_ref(9);
    weak.release_weak_ref(7);

    assert_eq!(entity.core.base.weak_refs(), [9]);
    assert_eq!(entity.health, 0.0);
}

#[test]
pub fn test_unrelated_mutation_is_refused() {
    let registry = common::fixture().registry;
    let mut weak = WeakPtrTarget::default();

    assert!(!rename_erased(&registry, &mut weak));
}
