mod common;

use decima_rtti::{InheritanceEntry, Rtti, RttiClass, TypeIdentity, TypeRegistry};

#[test]
pub fn test_every_type_is_kind_of_itself() {
    let fx = common::fixture();

    for (handle, rtti) in fx.registry.iter() {
        assert!(
            fx.registry.is_exact_kind_of(Some(handle), Some(handle)),
            "{}",
            rtti.type_name()
        );
        assert!(fx.registry.is_kind_of(Some(handle), Some(handle)));
    }
}

#[test]
pub fn test_kind_of_is_transitive() {
    let fx = common::fixture();
    let registry = &fx.registry;

    assert!(registry.is_kind_of(Some(fx.entity), Some(fx.core_object)));
    assert!(registry.is_kind_of(Some(fx.core_object), Some(fx.weak_ptr_target)));
    assert!(registry.is_kind_of(Some(fx.entity), Some(fx.weak_ptr_target)));
    assert!(!registry.is_exact_kind_of(Some(fx.entity), Some(fx.weak_ptr_target)));
}

#[test]
pub fn test_kind_of_is_not_symmetric() {
    let fx = common::fixture();

    assert!(!fx.registry.is_kind_of(Some(fx.core_object), Some(fx.entity)));
    assert!(!fx.registry.is_kind_of(Some(fx.weak_ptr_target), Some(fx.resource)));
}

#[test]
pub fn test_unrelated_types_are_not_kind_of() {
    let fx = common::fixture();
    let registry = &fx.registry;

    assert!(!registry.is_kind_of(Some(fx.vec3), Some(fx.entity)));
    assert!(!registry.is_kind_of(Some(fx.entity), Some(fx.vec3)));
    // siblings share a base but are not related to each other
    assert!(!registry.is_kind_of(Some(fx.entity), Some(fx.resource)));
}

#[test]
pub fn test_member_and_container_edges_are_not_followed() {
    let fx = common::fixture();
    let registry = &fx.registry;

    // Entity holds a Ref<Resource>, Node holds a Ref<Node>
    assert!(!registry.is_kind_of(Some(fx.entity), Some(fx.ref_resource)));
    assert!(!registry.is_kind_of(Some(fx.ref_resource), Some(fx.resource)));
    assert!(!registry.is_kind_of(Some(fx.node), Some(fx.ref_node)));
    assert!(registry.is_kind_of(Some(fx.node), Some(fx.node)));
}

#[test]
pub fn test_non_class_kind_of_is_exact_match() {
    let fx = common::fixture();
    let registry = &fx.registry;

    // uint promotes to int, but promotion is not inheritance
    assert!(!registry.is_kind_of(Some(fx.uint), Some(fx.int)));
    assert!(!registry.is_kind_of(Some(fx.state), Some(fx.int)));
    assert!(registry.is_kind_of(Some(fx.pod), Some(fx.pod)));
}

#[test]
pub fn test_absent_types_are_never_related() {
    let fx = common::fixture();
    let registry = &fx.registry;

    assert!(!registry.is_exact_kind_of(None, None));
    assert!(!registry.is_exact_kind_of(Some(fx.entity), None));
    assert!(!registry.is_kind_of(None, Some(fx.entity)));
    assert!(!registry.is_kind_of(Some(fx.entity), None));
}

#[test]
pub fn test_foreign_handles_are_never_related() {
    let fx = common::fixture();

    let mut builder = TypeRegistry::builder();
    let lonely = builder.register(
        Rtti::class(TypeIdentity::new(1, 1), RttiClass::new("Lonely", 4, 4)).unwrap(),
    );
    let small = builder.build().unwrap();

    // #0 is in range here, but was issued by the fixture's registry
    assert_eq!(fx.int.index(), lonely.index());
    assert!(small.get(fx.int).is_none());
    assert!(!small.is_exact_kind_of(Some(fx.int), Some(lonely)));
    assert!(!small.is_kind_of(Some(lonely), Some(fx.int)));
    assert!(!fx.registry.is_exact_kind_of(Some(lonely), Some(fx.int)));

    assert!(!small.is_kind_of(Some(fx.state), Some(lonely)));
    assert!(!small.is_exact_kind_of(Some(lonely), Some(fx.state)));
}

#[test]
#[should_panic]
pub fn test_indexing_with_foreign_handle_panics() {
    let fx = common::fixture();
    let other = common::fixture();

    let _ = &fx.registry[other.int];
}

#[test]
pub fn test_multiple_inheritance_reaches_every_base() {
    let mut builder = TypeRegistry::builder();
    let left = builder.register(
        Rtti::class(TypeIdentity::new(1, 1), RttiClass::new("Left", 8, 8)).unwrap(),
    );
    let right = builder.register(
        Rtti::class(TypeIdentity::new(2, 2), RttiClass::new("Right", 8, 8)).unwrap(),
    );
    let both = builder.register(
        Rtti::class(
            TypeIdentity::new(3, 3),
            RttiClass::new("Both", 16, 8)
                .with_base(InheritanceEntry::new(left, 0))
                .with_base(InheritanceEntry::new(right, 8)),
        )
        .unwrap(),
    );
    let registry = builder.build().unwrap();

    assert!(registry.is_kind_of(Some(both), Some(left)));
    assert!(registry.is_kind_of(Some(both), Some(right)));
    assert!(!registry.is_kind_of(Some(left), Some(right)));
}
