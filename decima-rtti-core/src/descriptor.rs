//! Descriptor variants and their trailing tables
//!
//! Every descriptor is a common [`RttiHeader`] plus one [`RttiKind`] body. The header's
//! counts are derived from the body's tables when the descriptor is constructed, so a
//! count can never disagree with the table it describes.

use std::ops::BitOr;

use paste::paste;

use crate::hooks::{ClassHooks, OpaqueFn, PrimitiveHooks, PropertyValueFn};
use crate::{InfoType, RttiError, TypeHandle, TypeIdentity};

/// Per-member flag byte
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct MemberFlags(pub u8);

impl MemberFlags {
    /// Member belongs to save-game state only and is not part of the persisted schema
    pub const SAVE_STATE_ONLY: Self = Self(0x02);

    #[allow(missing_docs)]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[allow(missing_docs)]
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl BitOr for MemberFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Behaviour flags of a class
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ClassFlags(pub u16);

impl ClassFlags {
    /// Instances get a callback once deserialization has finished
    pub const POST_LOAD_CALLBACK: Self = Self(0x0001);

    #[allow(missing_docs)]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[allow(missing_docs)]
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl BitOr for ClassFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Counts stored in the header, interpreted according to the discriminant
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeaderCounts {
    /// Primitives, wrappers and plain data carry no counts
    None,
    #[allow(missing_docs)]
    Enum {
        /// Size in bytes of the underlying integer
        underlying_size: u8,
        value_count: u16,
    },
    #[allow(missing_docs)]
    Class {
        inheritance_count: u8,
        /// Includes category markers
        member_count: u8,
        lua_function_count: u8,
    },
}

/// Part of the descriptor shared by every kind
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RttiHeader {
    identity: TypeIdentity,
    info_type: InfoType,
    counts: HeaderCounts,
}

impl RttiHeader {
    #[allow(missing_docs)]
    pub fn identity(&self) -> TypeIdentity {
        self.identity
    }

    #[allow(missing_docs)]
    pub fn info_type(&self) -> InfoType {
        self.info_type
    }

    #[allow(missing_docs)]
    pub fn counts(&self) -> HeaderCounts {
        self.counts
    }

    /// Number of enum values, if this is an enum
    pub fn enum_value_count(&self) -> Option<u16> {
        match self.counts {
            HeaderCounts::Enum { value_count, .. } => Some(value_count),
            _ => None,
        }
    }

    /// Underlying integer size, if this is an enum
    pub fn enum_underlying_size(&self) -> Option<u8> {
        match self.counts {
            HeaderCounts::Enum {
                underlying_size, ..
            } => Some(underlying_size),
            _ => None,
        }
    }

    /// Number of base classes, if this is a class
    pub fn class_inheritance_count(&self) -> Option<u8> {
        match self.counts {
            HeaderCounts::Class {
                inheritance_count, ..
            } => Some(inheritance_count),
            _ => None,
        }
    }

    /// Number of declared member entries (category markers included), if this is a class
    pub fn class_member_count(&self) -> Option<u8> {
        match self.counts {
            HeaderCounts::Class { member_count, .. } => Some(member_count),
            _ => None,
        }
    }

    /// Number of scripting entry points, if this is a class
    pub fn class_lua_function_count(&self) -> Option<u8> {
        match self.counts {
            HeaderCounts::Class {
                lua_function_count, ..
            } => Some(lua_function_count),
            _ => None,
        }
    }
}

/// `float`, `int`, `String`...
#[derive(Clone, Debug)]
pub struct RttiPrimitive {
    #[allow(missing_docs)]
    pub name: String,
    /// Next primitive in the numeric promotion chain
    pub parent: Option<TypeHandle>,
    #[allow(missing_docs)]
    pub hooks: PrimitiveHooks,
}

impl RttiPrimitive {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            hooks: PrimitiveHooks::default(),
        }
    }

    #[allow(missing_docs)]
    pub fn with_parent(mut self, parent: TypeHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    #[allow(missing_docs)]
    pub fn with_hooks(mut self, hooks: PrimitiveHooks) -> Self {
        self.hooks = hooks;
        self
    }
}

/// Descriptive side table of a reference or container
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ContainerData {
    /// Name of the wrapper kind, e.g. `Array` or `Ref`
    pub name: String,
}

/// Reference or container of exactly one type
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RttiContainer {
    /// Target of a reference or element of a collection
    pub contained: TypeHandle,
    #[allow(missing_docs)]
    pub data: Option<ContainerData>,
}

impl RttiContainer {
    #[allow(missing_docs)]
    pub fn new(contained: TypeHandle) -> Self {
        Self {
            contained,
            data: None,
        }
    }

    #[allow(missing_docs)]
    pub fn named(contained: TypeHandle, name: impl Into<String>) -> Self {
        Self {
            contained,
            data: Some(ContainerData { name: name.into() }),
        }
    }

    /// Wrapper kind name, empty if the side table is missing
    pub fn name(&self) -> &str {
        self.data.as_ref().map_or("", |data| data.name.as_str())
    }
}

/// Named enum value
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EnumEntry {
    #[allow(missing_docs)]
    pub value: u32,
    #[allow(missing_docs)]
    pub name: String,
}

#[allow(missing_docs)]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RttiEnum {
    pub name: String,
    /// Size in bytes of the underlying integer
    pub underlying_size: u8,
    values: Vec<EnumEntry>,
}

impl RttiEnum {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>, underlying_size: u8) -> Self {
        Self {
            name: name.into(),
            underlying_size,
            values: Vec::new(),
        }
    }

    /// Appends a value; numeric duplicates are aliases and are kept
    pub fn with_value(mut self, value: u32, name: impl Into<String>) -> Self {
        self.values.push(EnumEntry {
            value,
            name: name.into(),
        });
        self
    }

    /// Values in declaration order
    pub fn values(&self) -> &[EnumEntry] {
        &self.values
    }

    /// Numeric value of the entry named `name`
    pub fn value_of(&self, name: &str) -> Option<u32> {
        self.values
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }

    /// Every name bound to `value`, aliases included, in declaration order
    pub fn names_of(&self, value: u32) -> impl Iterator<Item = &str> + '_ {
        self.values
            .iter()
            .filter(move |entry| entry.value == value)
            .map(|entry| entry.name.as_str())
    }
}

/// Base class and its position inside the derived layout
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InheritanceEntry {
    #[allow(missing_docs)]
    pub base: TypeHandle,
    /// Byte offset of the base sub-object
    pub offset: u32,
}

impl InheritanceEntry {
    #[allow(missing_docs)]
    pub const fn new(base: TypeHandle, offset: u32) -> Self {
        Self { base, offset }
    }
}

/// Real data member of a class
#[derive(Clone, Debug)]
pub struct MemberEntry {
    #[allow(missing_docs)]
    pub ty: TypeHandle,
    /// Byte offset inside the declaring class
    pub offset: u16,
    #[allow(missing_docs)]
    pub flags: MemberFlags,
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub getter: Option<PropertyValueFn>,
    #[allow(missing_docs)]
    pub setter: Option<PropertyValueFn>,
}

impl MemberEntry {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>, ty: TypeHandle, offset: u16) -> Self {
        Self {
            ty,
            offset,
            flags: MemberFlags::empty(),
            name: name.into(),
            getter: None,
            setter: None,
        }
    }

    #[allow(missing_docs)]
    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Turns the member into a property accessed through `getter` and `setter`
    pub fn with_accessors(
        mut self,
        getter: Option<PropertyValueFn>,
        setter: Option<PropertyValueFn>,
    ) -> Self {
        self.getter = getter;
        self.setter = setter;
        self
    }

    #[allow(missing_docs)]
    pub fn is_save_state_only(&self) -> bool {
        self.flags.contains(MemberFlags::SAVE_STATE_ONLY)
    }

    /// Member is read or written through accessors instead of raw memory
    pub fn is_property(&self) -> bool {
        self.getter.is_some() || self.setter.is_some()
    }
}

/// Entry of a class member table
#[derive(Clone, Debug)]
pub enum ClassMember {
    #[allow(missing_docs)]
    Field(MemberEntry),
    /// Group marker: following fields of the same class belong to this category
    Category(String),
}

impl ClassMember {
    #[allow(missing_docs)]
    pub fn as_field(&self) -> Option<&MemberEntry> {
        match self {
            Self::Field(entry) => Some(entry),
            Self::Category(_) => None,
        }
    }

    #[allow(missing_docs)]
    pub fn is_group_marker(&self) -> bool {
        matches!(self, Self::Category(_))
    }
}

/// Function exported to the scripting layer
#[derive(Clone, Debug)]
pub struct LuaFunctionEntry {
    /// Type code of the return value
    pub return_type: char,
    #[allow(missing_docs)]
    pub name: String,
    /// Encoded argument signature
    pub arguments: String,
    #[allow(missing_docs)]
    pub function: Option<OpaqueFn>,
}

/// Handler bound to a message type (`MsgReadBinary`, `MsgInit`...)
#[derive(Clone, Copy, Debug)]
pub struct MessageHandlerEntry {
    #[allow(missing_docs)]
    pub message: TypeHandle,
    #[allow(missing_docs)]
    pub callback: Option<OpaqueFn>,
}

/// Message whose handler is provided by another class of the hierarchy
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InheritedMessageEntry {
    #[allow(missing_docs)]
    pub flag: bool,
    #[allow(missing_docs)]
    pub message: TypeHandle,
    /// Class whose handler table holds the handler
    pub owner: TypeHandle,
}

/// Class declaration
#[derive(Clone, Debug)]
pub struct RttiClass {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub size: u32,
    #[allow(missing_docs)]
    pub alignment: u16,
    #[allow(missing_docs)]
    pub flags: ClassFlags,
    #[allow(missing_docs)]
    pub hooks: ClassHooks,
    inheritance: Vec<InheritanceEntry>,
    members: Vec<ClassMember>,
    lua_functions: Vec<LuaFunctionEntry>,
    message_handlers: Vec<MessageHandlerEntry>,
    inherited_messages: Vec<InheritedMessageEntry>,
}

macro_rules! class_tables {
    ($($(#[$doc:meta])* $table:ident: $entry:ty => $single:ident),* $(,)?) => {
        paste! {
            impl RttiClass {
                $(
                    $(#[$doc])*
                    pub fn $table(&self) -> &[$entry] {
                        &self.$table
                    }

                    #[doc = "Appends one entry to [`RttiClass::" $table "`]"]
                    pub fn [<with_ $single>](mut self, entry: $entry) -> Self {
                        self.$table.push(entry);
                        self
                    }
                )*
            }
        }
    };
}

class_tables! {
    /// Direct bases in declaration order
    inheritance: InheritanceEntry => base,
    /// Declared members and category markers in declaration order
    members: ClassMember => member,
    /// Scripting entry points
    lua_functions: LuaFunctionEntry => lua_function,
    /// Message handlers declared by this class
    message_handlers: MessageHandlerEntry => message_handler,
    /// Messages handled on behalf of this class by another class
    inherited_messages: InheritedMessageEntry => inherited_message,
}

impl RttiClass {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>, size: u32, alignment: u16) -> Self {
        Self {
            name: name.into(),
            size,
            alignment,
            flags: ClassFlags::empty(),
            hooks: ClassHooks::default(),
            inheritance: Vec::new(),
            members: Vec::new(),
            lua_functions: Vec::new(),
            message_handlers: Vec::new(),
            inherited_messages: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags = flags;
        self
    }

    #[allow(missing_docs)]
    pub fn with_hooks(mut self, hooks: ClassHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Appends a real data member
    pub fn with_field(self, entry: MemberEntry) -> Self {
        self.with_member(ClassMember::Field(entry))
    }

    /// Appends a group marker; fields declared after it belong to `label`
    pub fn with_category(self, label: impl Into<String>) -> Self {
        self.with_member(ClassMember::Category(label.into()))
    }

    /// Own data members without the category markers
    pub fn fields(&self) -> impl Iterator<Item = &MemberEntry> + '_ {
        self.members.iter().filter_map(ClassMember::as_field)
    }

    #[allow(missing_docs)]
    pub fn is_post_load_callback_enabled(&self) -> bool {
        self.flags.contains(ClassFlags::POST_LOAD_CALLBACK)
    }
}

/// Plain data synthesized at runtime; only its size is known
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RttiPod {
    #[allow(missing_docs)]
    pub size: u32,
}

/// Shape-specific part of a descriptor
#[derive(Clone, Debug)]
pub enum RttiKind {
    #[allow(missing_docs)]
    Primitive(RttiPrimitive),
    /// Body of both [`InfoType::Reference`] and [`InfoType::Container`]
    Container(RttiContainer),
    /// Body of both [`InfoType::Enum`] and [`InfoType::Enum2`]
    Enum(RttiEnum),
    #[allow(missing_docs)]
    Class(RttiClass),
    #[allow(missing_docs)]
    Pod(RttiPod),
}

/// Type descriptor
#[derive(Clone, Debug)]
pub struct Rtti {
    header: RttiHeader,
    kind: RttiKind,
}

fn count_u8(owner: &str, table: &'static str, len: usize) -> Result<u8, RttiError> {
    u8::try_from(len).map_err(|_| RttiError::TableOverflow {
        owner: owner.to_owned(),
        table,
        len,
        max: u8::MAX as usize,
    })
}

fn count_u16(owner: &str, table: &'static str, len: usize) -> Result<u16, RttiError> {
    u16::try_from(len).map_err(|_| RttiError::TableOverflow {
        owner: owner.to_owned(),
        table,
        len,
        max: u16::MAX as usize,
    })
}

impl Rtti {
    /// Builds a descriptor, checking that `kind` has the shape `info_type` demands
    /// and deriving the header counts from its tables
    pub fn new(
        identity: TypeIdentity,
        info_type: InfoType,
        kind: RttiKind,
    ) -> Result<Self, RttiError> {
        let counts = match (info_type, &kind) {
            (InfoType::Primitive, RttiKind::Primitive(_))
            | (InfoType::Reference | InfoType::Container, RttiKind::Container(_))
            | (InfoType::Pod, RttiKind::Pod(_)) => HeaderCounts::None,
            (InfoType::Enum | InfoType::Enum2, RttiKind::Enum(enumeration)) => {
                if !matches!(enumeration.underlying_size, 1 | 2 | 4 | 8) {
                    return Err(RttiError::InvalidUnderlyingSize {
                        name: enumeration.name.clone(),
                        size: enumeration.underlying_size,
                    });
                }

                HeaderCounts::Enum {
                    underlying_size: enumeration.underlying_size,
                    value_count: count_u16(
                        &enumeration.name,
                        "values",
                        enumeration.values.len(),
                    )?,
                }
            }
            (InfoType::Class, RttiKind::Class(class)) => {
                count_u8(&class.name, "message_handlers", class.message_handlers.len())?;
                count_u8(
                    &class.name,
                    "inherited_messages",
                    class.inherited_messages.len(),
                )?;

                HeaderCounts::Class {
                    inheritance_count: count_u8(
                        &class.name,
                        "inheritance",
                        class.inheritance.len(),
                    )?,
                    member_count: count_u8(&class.name, "members", class.members.len())?,
                    lua_function_count: count_u8(
                        &class.name,
                        "lua_functions",
                        class.lua_functions.len(),
                    )?,
                }
            }
            (expected, _) => return Err(RttiError::KindMismatch { expected }),
        };

        Ok(Self {
            header: RttiHeader {
                identity,
                info_type,
                counts,
            },
            kind,
        })
    }

    #[allow(missing_docs)]
    pub fn primitive(identity: TypeIdentity, primitive: RttiPrimitive) -> Self {
        Self::without_counts(identity, InfoType::Primitive, RttiKind::Primitive(primitive))
    }

    /// Pointer-like wrapper (`Ref<>`, `WeakPtr<>`...)
    pub fn reference(identity: TypeIdentity, reference: RttiContainer) -> Self {
        Self::without_counts(identity, InfoType::Reference, RttiKind::Container(reference))
    }

    /// Collection (`Array<>`...)
    pub fn container(identity: TypeIdentity, container: RttiContainer) -> Self {
        Self::without_counts(identity, InfoType::Container, RttiKind::Container(container))
    }

    #[allow(missing_docs)]
    pub fn enumeration(identity: TypeIdentity, enumeration: RttiEnum) -> Result<Self, RttiError> {
        Self::new(identity, InfoType::Enum, RttiKind::Enum(enumeration))
    }

    #[allow(missing_docs)]
    pub fn class(identity: TypeIdentity, class: RttiClass) -> Result<Self, RttiError> {
        Self::new(identity, InfoType::Class, RttiKind::Class(class))
    }

    #[allow(missing_docs)]
    pub fn pod(identity: TypeIdentity, size: u32) -> Self {
        Self::without_counts(identity, InfoType::Pod, RttiKind::Pod(RttiPod { size }))
    }

    fn without_counts(identity: TypeIdentity, info_type: InfoType, kind: RttiKind) -> Self {
        Self {
            header: RttiHeader {
                identity,
                info_type,
                counts: HeaderCounts::None,
            },
            kind,
        }
    }

    #[allow(missing_docs)]
    pub fn header(&self) -> &RttiHeader {
        &self.header
    }

    #[allow(missing_docs)]
    pub fn identity(&self) -> TypeIdentity {
        self.header.identity
    }

    #[allow(missing_docs)]
    pub fn info_type(&self) -> InfoType {
        self.header.info_type
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> &RttiKind {
        &self.kind
    }

    #[allow(missing_docs)]
    pub fn as_primitive(&self) -> Option<&RttiPrimitive> {
        match &self.kind {
            RttiKind::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    /// Reference or container body
    pub fn as_container(&self) -> Option<&RttiContainer> {
        match &self.kind {
            RttiKind::Container(container) => Some(container),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_enum(&self) -> Option<&RttiEnum> {
        match &self.kind {
            RttiKind::Enum(enumeration) => Some(enumeration),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_class(&self) -> Option<&RttiClass> {
        match &self.kind {
            RttiKind::Class(class) => Some(class),
            _ => None,
        }
    }

    #[allow(missing_docs)]
    pub fn as_pod(&self) -> Option<&RttiPod> {
        match &self.kind {
            RttiKind::Pod(pod) => Some(pod),
            _ => None,
        }
    }

    /// Target of a reference or element of a container
    pub fn contained_type(&self) -> Option<TypeHandle> {
        self.as_container().map(|container| container.contained)
    }

    /// Stored display name
    ///
    /// Wrappers answer with their kind name (`Array`, `Ref`...), see
    /// [`crate::TypeRegistry::full_type_name`] for the composed form
    pub fn type_name(&self) -> &str {
        match &self.kind {
            RttiKind::Primitive(primitive) => &primitive.name,
            RttiKind::Container(container) => container.name(),
            RttiKind::Enum(enumeration) => &enumeration.name,
            RttiKind::Class(class) => &class.name,
            RttiKind::Pod(_) => "POD",
        }
    }

    /// Name registered for lookup; wrappers and plain data are anonymous
    pub(crate) fn lookup_name(&self) -> Option<&str> {
        match &self.kind {
            RttiKind::Primitive(primitive) => Some(&primitive.name),
            RttiKind::Enum(enumeration) => Some(&enumeration.name),
            RttiKind::Class(class) => Some(&class.name),
            RttiKind::Container(_) | RttiKind::Pod(_) => None,
        }
    }

    /// Every handle this descriptor refers to
    pub(crate) fn edges(&self) -> Vec<TypeHandle> {
        match &self.kind {
            RttiKind::Primitive(primitive) => primitive.parent.into_iter().collect(),
            RttiKind::Container(container) => vec![container.contained],
            RttiKind::Enum(_) | RttiKind::Pod(_) => Vec::new(),
            RttiKind::Class(class) => {
                let bases = class.inheritance.iter().map(|entry| entry.base);
                let members = class.fields().map(|entry| entry.ty);
                let handlers = class.message_handlers.iter().map(|entry| entry.message);
                let inherited = class
                    .inherited_messages
                    .iter()
                    .flat_map(|entry| [entry.message, entry.owner]);

                bases
                    .chain(members)
                    .chain(handlers)
                    .chain(inherited)
                    .collect()
            }
        }
    }
}
