#![allow(dead_code)]

use decima_rtti::{
    ClassFlags, InheritanceEntry, InheritedMessageEntry, LuaFunctionEntry, MemberEntry,
    MemberFlags, MessageHandlerEntry, Rtti, RttiClass, RttiContainer, RttiEnum, RttiPrimitive,
    TypeHandle, TypeIdentity, TypeRegistry,
};

/// Small game-like hierarchy:
///
/// ```text
/// WeakPtrTarget
/// └── CoreObject            General: Name
///     ├── Resource          handles MsgReadBinary
///     └── Entity            Combat: Health, Armor / Render: Mesh, SaveState
/// Vec3                      unrelated
/// Node                      Next: Ref<Node>
/// ```
pub struct Fixture {
    pub registry: TypeRegistry,
    pub int: TypeHandle,
    pub uint: TypeHandle,
    pub float: TypeHandle,
    pub string: TypeHandle,
    pub weak_ptr_target: TypeHandle,
    pub core_object: TypeHandle,
    pub resource: TypeHandle,
    pub entity: TypeHandle,
    pub vec3: TypeHandle,
    pub node: TypeHandle,
    pub ref_node: TypeHandle,
    pub ref_resource: TypeHandle,
    pub array_ref_resource: TypeHandle,
    pub cptr_int: TypeHandle,
    pub pod: TypeHandle,
    pub state: TypeHandle,
    pub msg_read_binary: TypeHandle,
    pub msg_init: TypeHandle,
}

pub fn fixture() -> Fixture {
    let mut builder = TypeRegistry::builder();

    let int = builder.register(Rtti::primitive(
        TypeIdentity::new(1, 1),
        RttiPrimitive::new("int"),
    ));
    let uint = builder.register(Rtti::primitive(
        TypeIdentity::new(2, 2),
        RttiPrimitive::new("uint").with_parent(int),
    ));
    let float = builder.register(Rtti::primitive(
        TypeIdentity::new(3, 3),
        RttiPrimitive::new("float"),
    ));
    let string = builder.register(Rtti::primitive(
        TypeIdentity::new(4, 4),
        RttiPrimitive::new("String"),
    ));

    let msg_read_binary = builder.register(
        Rtti::class(TypeIdentity::new(5, 5), RttiClass::new("MsgReadBinary", 8, 8)).unwrap(),
    );
    let msg_init = builder.register(
        Rtti::class(TypeIdentity::new(6, 6), RttiClass::new("MsgInit", 8, 8)).unwrap(),
    );

    let weak_ptr_target = builder.register(
        Rtti::class(TypeIdentity::new(7, 7), RttiClass::new("WeakPtrTarget", 0x10, 8)).unwrap(),
    );

    let core_object = builder.register(
        Rtti::class(
            TypeIdentity::new(8, 8),
            RttiClass::new("CoreObject", 0x28, 8)
                .with_base(InheritanceEntry::new(weak_ptr_target, 0))
                .with_category("General")
                .with_field(MemberEntry::new("Name", string, 0x20))
                .with_lua_function(LuaFunctionEntry {
                    return_type: 's',
                    name: "GetName".to_owned(),
                    arguments: String::new(),
                    function: None,
                })
                .with_message_handler(MessageHandlerEntry {
                    message: msg_init,
                    callback: None,
                }),
        )
        .unwrap(),
    );

    let resource = builder.declare();
    let ref_resource = builder.register(Rtti::reference(
        TypeIdentity::new(9, 9),
        RttiContainer::named(resource, "Ref"),
    ));
    builder
        .define(
            resource,
            Rtti::class(
                TypeIdentity::new(10, 10),
                RttiClass::new("Resource", 0x28, 8)
                    .with_flags(ClassFlags::POST_LOAD_CALLBACK)
                    .with_base(InheritanceEntry::new(core_object, 0))
                    .with_message_handler(MessageHandlerEntry {
                        message: msg_read_binary,
                        callback: None,
                    }),
            )
            .unwrap(),
        )
        .unwrap();

    let array_ref_resource = builder.register(Rtti::container(
        TypeIdentity::new(11, 11),
        RttiContainer::named(ref_resource, "Array"),
    ));

    let entity = builder.register(
        Rtti::class(
            TypeIdentity::new(12, 12),
            RttiClass::new("Entity", 0x48, 8)
                .with_base(InheritanceEntry::new(core_object, 0))
                .with_category("Combat")
                .with_field(MemberEntry::new("Health", float, 0x28))
                .with_field(MemberEntry::new("Armor", float, 0x2C))
                .with_category("Render")
                .with_field(MemberEntry::new("Mesh", ref_resource, 0x30))
                .with_field(
                    MemberEntry::new("SaveState", uint, 0x40)
                        .with_flags(MemberFlags::SAVE_STATE_ONLY),
                )
                .with_inherited_message(InheritedMessageEntry {
                    flag: true,
                    message: msg_read_binary,
                    owner: resource,
                })
                // Resource has no MsgInit handler of its own
                .with_inherited_message(InheritedMessageEntry {
                    flag: false,
                    message: msg_init,
                    owner: resource,
                }),
        )
        .unwrap(),
    );

    let vec3 = builder.register(
        Rtti::class(
            TypeIdentity::new(13, 13),
            RttiClass::new("Vec3", 12, 4)
                .with_field(MemberEntry::new("X", float, 0))
                .with_field(MemberEntry::new("Y", float, 4))
                .with_field(MemberEntry::new("Z", float, 8)),
        )
        .unwrap(),
    );

    let node = builder.declare();
    let ref_node = builder.register(Rtti::reference(
        TypeIdentity::new(14, 14),
        RttiContainer::named(node, "Ref"),
    ));
    builder
        .define(
            node,
            Rtti::class(
                TypeIdentity::new(15, 15),
                RttiClass::new("Node", 0x10, 8)
                    .with_field(MemberEntry::new("Value", int, 0))
                    .with_field(MemberEntry::new("Next", ref_node, 8)),
            )
            .unwrap(),
        )
        .unwrap();

    let cptr_int = builder.register(Rtti::reference(
        TypeIdentity::INVALID,
        RttiContainer::named(int, "cptr"),
    ));
    let pod = builder.register(Rtti::pod(TypeIdentity::INVALID, 12));

    let state = builder.register(
        Rtti::enumeration(
            TypeIdentity::new(16, 16),
            RttiEnum::new("EEntityState", 1)
                .with_value(0, "Idle")
                .with_value(1, "Alerted")
                .with_value(0, "Default"),
        )
        .unwrap(),
    );

    Fixture {
        registry: builder.build().unwrap(),
        int,
        uint,
        float,
        string,
        weak_ptr_target,
        core_object,
        resource,
        entity,
        vec3,
        node,
        ref_node,
        ref_resource,
        array_ref_resource,
        cptr_int,
        pod,
        state,
        msg_read_binary,
        msg_init,
    }
}
