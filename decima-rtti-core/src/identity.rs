use std::fmt;

use crate::RttiError;

/// Runtime-assigned numeric type id
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RuntimeTypeId(pub u16);

impl RuntimeTypeId {
    /// Reserved sentinel for ids that were never assigned
    pub const INVALID: Self = Self(0xFFFF);

    #[allow(missing_docs)]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }
}

impl Default for RuntimeTypeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Pair of runtime ids that identifies a type across sessions
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TypeIdentity {
    #[allow(missing_docs)]
    pub primary: RuntimeTypeId,
    #[allow(missing_docs)]
    pub secondary: RuntimeTypeId,
}

impl TypeIdentity {
    /// Identity of a type that hasn't been assigned ids yet
    pub const INVALID: Self = Self {
        primary: RuntimeTypeId::INVALID,
        secondary: RuntimeTypeId::INVALID,
    };

    #[allow(missing_docs)]
    pub const fn new(primary: u16, secondary: u16) -> Self {
        Self {
            primary: RuntimeTypeId(primary),
            secondary: RuntimeTypeId(secondary),
        }
    }

    /// Both halves carry an assigned id
    pub const fn is_valid(&self) -> bool {
        self.primary.is_valid() && self.secondary.is_valid()
    }
}

/// Discriminant selecting the shape of a descriptor
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum InfoType {
    /// `float`, `int`, `bool`, `String`...
    Primitive = 0,
    /// `Ref<>`, `StreamingRef<>`, `UUIDRef<>`, `WeakPtr<>`...
    Reference = 1,
    /// `Array<>`, `HashMap<>`...
    Container = 2,
    #[allow(missing_docs)]
    Enum = 3,
    #[allow(missing_docs)]
    Class = 4,
    /// Second enum flavour, same shape as [`InfoType::Enum`]
    Enum2 = 5,
    /// Plain data synthesized at runtime by coalescing fields of another class
    Pod = 6,
}

impl InfoType {
    #[allow(missing_docs)]
    pub const fn is_enum(self) -> bool {
        matches!(self, Self::Enum | Self::Enum2)
    }

    /// Reference or container, both wrapping a single contained type
    pub const fn is_wrapper(self) -> bool {
        matches!(self, Self::Reference | Self::Container)
    }
}

impl TryFrom<u8> for InfoType {
    type Error = RttiError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => Self::Primitive,
            1 => Self::Reference,
            2 => Self::Container,
            3 => Self::Enum,
            4 => Self::Class,
            5 => Self::Enum2,
            6 => Self::Pod,
            other => return Err(RttiError::InvalidInfoType(other)),
        })
    }
}

impl From<InfoType> for u8 {
    fn from(info: InfoType) -> Self {
        info as u8
    }
}

/// Stable index of a descriptor inside a [`crate::TypeRegistry`]
///
/// Handles are the only way descriptors refer to each other, so the graph can be cyclic
/// without any descriptor owning another one. Each handle remembers the registry that
/// issued it and never resolves in any other one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TypeHandle {
    registry: u32,
    index: u32,
}

impl TypeHandle {
    pub(crate) const fn new(registry: u32, index: u32) -> Self {
        Self { registry, index }
    }

    /// Position of the descriptor inside the registry arena
    pub const fn index(self) -> usize {
        self.index as usize
    }

    pub(crate) const fn registry(self) -> u32 {
        self.registry
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
