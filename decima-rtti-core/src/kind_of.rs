use crate::{TypeHandle, TypeRegistry};

impl TypeRegistry {
    /// `a` and `b` denote the same type
    ///
    /// Absent or foreign handles are never equal to anything
    pub fn is_exact_kind_of(&self, a: Option<TypeHandle>, b: Option<TypeHandle>) -> bool {
        let (Some(a), Some(b)) = (a, b) else {
            return false;
        };
        let (Some(lhs), Some(rhs)) = (self.get(a), self.get(b)) else {
            return false;
        };

        a == b || (lhs.identity().is_valid() && lhs.identity() == rhs.identity())
    }

    /// `a` is `b` or inherits from it at any depth
    ///
    /// Only base-class edges are followed. For anything but classes this is
    /// [`TypeRegistry::is_exact_kind_of`].
    pub fn is_kind_of(&self, a: Option<TypeHandle>, b: Option<TypeHandle>) -> bool {
        if self.is_exact_kind_of(a, b) {
            return true;
        }

        match (a, b) {
            (Some(a), Some(b)) if self.get(b).is_some() => self.inherits_from(a, b),
            _ => false,
        }
    }

    fn inherits_from(&self, class: TypeHandle, ancestor: TypeHandle) -> bool {
        let Some(class) = self.get(class).and_then(|rtti| rtti.as_class()) else {
            return false;
        };

        class.inheritance().iter().any(|entry| {
            self.is_exact_kind_of(Some(entry.base), Some(ancestor))
                || self.inherits_from(entry.base, ancestor)
        })
    }
}
