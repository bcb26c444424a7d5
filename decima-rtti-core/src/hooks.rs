//! Capability slots carried by descriptors
//!
//! Other subsystems (serializers, the engine allocator) invoke these. The type system only
//! stores and exposes them.

use std::ffi::c_void;

/// Slot whose signature is only known to the subsystem that calls it
pub type OpaqueFn = unsafe extern "C" fn();

/// Placement-constructs an instance: `(allocator, memory) -> object`
pub type ConstructFn = unsafe extern "C" fn(*mut c_void, *mut c_void) -> *mut c_void;

/// Destroys an instance in place: `(allocator, object)`
pub type DestructFn = unsafe extern "C" fn(*mut c_void, *mut c_void);

/// Reads or writes a property through its accessor: `(object, value)`
pub type PropertyValueFn = unsafe extern "C" fn(*mut c_void, *mut c_void);

/// Behaviour table of a primitive type
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimitiveHooks {
    #[allow(missing_docs)]
    pub construct: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub destruct: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub serialize_string: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub deserialize_string: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub swap_values: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub test_equality: Option<OpaqueFn>,
    /// Byte-swaps a value for the opposite endianness
    pub swap_endianness: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub assign: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub get_size: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub compare_by_strings: Option<OpaqueFn>,
}

/// Behaviour table of a class type
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassHooks {
    #[allow(missing_docs)]
    pub construct: Option<ConstructFn>,
    #[allow(missing_docs)]
    pub destruct: Option<DestructFn>,
    #[allow(missing_docs)]
    pub deserialize_string: Option<OpaqueFn>,
    #[allow(missing_docs)]
    pub serialize_string: Option<OpaqueFn>,
    /// Returns the descriptor whose symbols this class exports
    pub exported_symbols: Option<OpaqueFn>,
}
