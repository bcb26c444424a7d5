use crate::{InfoType, TypeHandle};

/// Failures raised while constructing descriptors, building a registry, or
/// querying a registry with a handle it cannot answer for
///
/// Kind-of tests never fail and casts across unrelated types return [`Option::None`],
/// so neither shows up here.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RttiError {
    /// Raw discriminant byte is outside of the known set
    #[error("Invalid info type discriminant {0:#04x}")]
    InvalidInfoType(u8),

    /// Descriptor body doesn't have the shape its discriminant requires
    #[error("Descriptor body doesn't match info type {expected:?}")]
    KindMismatch {
        #[allow(missing_docs)]
        expected: InfoType,
    },

    /// Trailing table doesn't fit into its count field
    #[error("Table `{table}` of `{owner}` has {len} entries, at most {max} are allowed")]
    TableOverflow {
        /// Name of the type that owns the table
        owner: String,
        #[allow(missing_docs)]
        table: &'static str,
        #[allow(missing_docs)]
        len: usize,
        #[allow(missing_docs)]
        max: usize,
    },

    /// Enum storage is not one of the integer widths 1, 2, 4 or 8
    #[error("Enum `{name}` has invalid underlying size {size}")]
    InvalidUnderlyingSize {
        #[allow(missing_docs)]
        name: String,
        #[allow(missing_docs)]
        size: u8,
    },

    /// Handle doesn't belong to this registry
    #[error("Handle {0} doesn't resolve to a type")]
    UnknownHandle(TypeHandle),

    /// Handle was already bound to a descriptor
    #[error("Handle {0} is already defined")]
    AlreadyDefined(TypeHandle),

    /// Handle was declared but never defined before building
    #[error("Handle {0} was declared but never defined")]
    UndefinedType(TypeHandle),

    /// Edge of a descriptor points outside of the registry
    #[error("`{from}` references handle {target} which doesn't exist")]
    DanglingHandle {
        /// Name of the type that owns the edge
        from: String,
        #[allow(missing_docs)]
        target: TypeHandle,
    },

    /// Inheritance entry refers to something other than a class
    #[error("Base `{base}` of `{class}` is not a class")]
    BaseNotClass {
        #[allow(missing_docs)]
        class: String,
        #[allow(missing_docs)]
        base: String,
    },

    /// Class reaches itself through its own inheritance list
    #[error("Class `{0}` inherits from itself")]
    InheritanceCycle(String),

    /// Container element or primitive parent chain never terminates
    #[error("Type `{0}` contains or extends itself")]
    RecursiveChain(String),

    /// Two named types share the same display name
    #[error("Type name `{0}` is registered twice")]
    DuplicateName(String),

    /// Two types share the same valid runtime identity pair
    #[error("Runtime identity ({primary}, {secondary}) is registered twice")]
    DuplicateIdentity {
        #[allow(missing_docs)]
        primary: u16,
        #[allow(missing_docs)]
        secondary: u16,
    },

    /// Operation requires a class descriptor
    #[error("`{0}` is not a class")]
    NotAClass(String),

    /// Absolute member offset doesn't fit into 32 bits
    #[error("Offset of member `{member}` overflows while flattening `{class}`")]
    OffsetOverflow {
        #[allow(missing_docs)]
        class: String,
        #[allow(missing_docs)]
        member: String,
    },

    /// Process-global registry was already installed
    #[error("Global type registry is already installed")]
    AlreadyInstalled,
}
