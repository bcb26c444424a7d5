#![warn(missing_docs)]

//! Runtime type information for Decima-style descriptor graphs
//!
//! Descriptors ([`Rtti`]) live in a [`TypeRegistry`] arena and refer to each other
//! through [`TypeHandle`]s. Once the registry is built it is read-only; kind-of tests,
//! member flattening, table enumeration and casts are pure queries over it.

mod descriptor;
mod error;
pub mod hooks;
mod identity;
mod kind_of;
mod layout;
mod messages;
mod naming;
mod object;
mod registry;

pub use descriptor::{
    ClassFlags, ClassMember, ContainerData, EnumEntry, HeaderCounts, InheritanceEntry,
    InheritedMessageEntry, LuaFunctionEntry, MemberEntry, MemberFlags, MessageHandlerEntry,
    Rtti, RttiClass, RttiContainer, RttiEnum, RttiHeader, RttiKind, RttiPod, RttiPrimitive,
};
pub use error::RttiError;
pub use identity::{InfoType, RuntimeTypeId, TypeHandle, TypeIdentity};
pub use layout::{CategorizedLayout, CategoryBoundary, LayoutEntry};
pub use object::{RttiObject, RttiType, WeakPtrTarget};
pub use registry::{RegistryBuilder, TypeRegistry};

#[allow(dead_code)]
mod __thread_safety_check {
    use super::{RttiObject, TypeRegistry, WeakPtrTarget};

    fn __check_is_object_safe() -> Box<dyn RttiObject> {
        Box::new(WeakPtrTarget::default())
    }

    fn __check_registry_is_shareable() {
        fn shareable<T: Send + Sync>() {}
        shareable::<TypeRegistry>();
    }
}
