//! Objects that know their own descriptor, and casts between them
//!
//! Rust has no struct inheritance, so a "derived" object embeds its bases as fields
//! marked `#[rtti(base)]`. [`RttiObject::view`] walks those fields to hand out a
//! reference to the requested base, and [`TypeRegistry::cast`] only does so when the
//! descriptor graph agrees that the object is kind-of the target.

use std::any::{Any, TypeId};

use crate::{TypeHandle, TypeRegistry};

/// Type that can be named in code and has a registered descriptor
pub trait RttiType: Any {
    /// Name the descriptor is registered under
    const TYPE_NAME: &'static str;
}

/// Object-safe identity capability
///
/// Usually implemented through `#[derive(RttiObject)]`
pub trait RttiObject: Any {
    /// Descriptor name of the most derived type of this object
    fn type_name(&self) -> &'static str;

    /// This object, or one of its embedded bases, whose Rust type is `target`
    fn view(&self, target: TypeId) -> Option<&dyn Any>;

    /// Same as [`RttiObject::view`], except that returned reference is mutable
    fn view_mut(&mut self, target: TypeId) -> Option<&mut dyn Any>;

    /// Descriptor of this object inside `registry`
    fn rtti(&self, registry: &TypeRegistry) -> Option<TypeHandle> {
        registry.find(self.type_name())
    }
}

/// Marker base of every object that can be the target of a weak reference
#[derive(Debug, Default)]
pub struct WeakPtrTarget {
    weak_refs: Vec<usize>,
}

impl WeakPtrTarget {
    /// Ids of weak references currently pointing at this object
    pub fn weak_refs(&self) -> &[usize] {
        &self.weak_refs
    }

    #[allow(missing_docs)]
    pub fn track_weak_ref(&mut self, id: usize) {
        self.weak_refs.push(id);
    }

    #[allow(missing_docs)]
    pub fn release_weak_ref(&mut self, id: usize) {
        self.weak_refs.retain(|tracked| *tracked != id);
    }
}

impl RttiType for WeakPtrTarget {
    const TYPE_NAME: &'static str = "WeakPtrTarget";
}

impl RttiObject for WeakPtrTarget {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn view(&self, target: TypeId) -> Option<&dyn Any> {
        (target == TypeId::of::<Self>()).then_some(self as &dyn Any)
    }

    fn view_mut(&mut self, target: TypeId) -> Option<&mut dyn Any> {
        if target == TypeId::of::<Self>() {
            return Some(self);
        }
        None
    }
}

impl TypeRegistry {
    /// Borrows `value` as `T` if its descriptor is kind-of `T`'s descriptor
    ///
    /// Returns [`Option::None`] for unrelated types and for types that aren't registered
    pub fn cast<'a, T: RttiType>(&self, value: &'a dyn RttiObject) -> Option<&'a T> {
        if !self.related::<T>(value.type_name()) {
            return None;
        }
        value.view(TypeId::of::<T>())?.downcast_ref::<T>()
    }

    /// Same as [`TypeRegistry::cast`], except that returned reference is mutable
    pub fn cast_mut<'a, T: RttiType>(&self, value: &'a mut dyn RttiObject) -> Option<&'a mut T> {
        if !self.related::<T>(value.type_name()) {
            return None;
        }
        value.view_mut(TypeId::of::<T>())?.downcast_mut::<T>()
    }

    fn related<T: RttiType>(&self, source: &str) -> bool {
        let related = self.is_kind_of(self.find(source), self.find(T::TYPE_NAME));
        if !related {
            log::trace!("`{}` is not kind of `{}`", source, T::TYPE_NAME);
        }
        related
    }
}
