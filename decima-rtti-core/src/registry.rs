//! Arena owning every descriptor
//!
//! Descriptors are registered through [`RegistryBuilder`], validated once in
//! [`RegistryBuilder::build`] and immutable afterwards. Queries never re-check what the
//! builder already proved: edges resolve, bases are classes, inheritance is acyclic and
//! wrapper chains terminate.

use std::collections::HashMap;
use std::ops::Index;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use crate::{Rtti, RttiClass, RttiError, RttiKind, TypeHandle, TypeIdentity};

static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();

static NEXT_REGISTRY_ID: AtomicU32 = AtomicU32::new(1);

/// Collects descriptors before they are frozen into a [`TypeRegistry`]
#[derive(Debug)]
pub struct RegistryBuilder {
    id: u32,
    slots: Vec<Option<Rtti>>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
        }
    }

    fn handle(&self, index: usize) -> TypeHandle {
        TypeHandle::new(self.id, index as u32)
    }

    /// Reserves a handle to be defined later
    ///
    /// Needed whenever descriptors refer to each other before all of them exist, e.g. a
    /// class holding a reference to itself
    pub fn declare(&mut self) -> TypeHandle {
        let handle = self.handle(self.slots.len());
        self.slots.push(None);
        handle
    }

    /// Binds a descriptor to a previously declared handle
    pub fn define(&mut self, handle: TypeHandle, rtti: Rtti) -> Result<(), RttiError> {
        if handle.registry() != self.id {
            return Err(RttiError::UnknownHandle(handle));
        }
        let slot = self
            .slots
            .get_mut(handle.index())
            .ok_or(RttiError::UnknownHandle(handle))?;

        if slot.is_some() {
            return Err(RttiError::AlreadyDefined(handle));
        }

        log::trace!("Defining {} as `{}`", handle, rtti.type_name());
        *slot = Some(rtti);
        Ok(())
    }

    /// Declares and defines in one step
    pub fn register(&mut self, rtti: Rtti) -> TypeHandle {
        let handle = self.handle(self.slots.len());
        log::trace!("Defining {} as `{}`", handle, rtti.type_name());
        self.slots.push(Some(rtti));
        handle
    }

    /// Validates the collected graph and freezes it
    pub fn build(self) -> Result<TypeRegistry, RttiError> {
        let id = self.id;
        let types = self
            .slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or(RttiError::UndefinedType(TypeHandle::new(id, index as u32)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut registry = TypeRegistry {
            id,
            types,
            by_name: HashMap::new(),
            by_identity: HashMap::new(),
        };

        registry.check_edges()?;
        registry.check_inheritance()?;
        registry.check_chains()?;
        registry.build_indices()?;

        log::debug!(
            "Built type registry: {} types, {} named",
            registry.types.len(),
            registry.by_name.len()
        );
        Ok(registry)
    }
}

/// Immutable, validated descriptor graph
///
/// `Send + Sync`, so it can be shared between any number of reader threads once built
#[derive(Debug)]
pub struct TypeRegistry {
    id: u32,
    types: Vec<Rtti>,
    by_name: HashMap<String, TypeHandle>,
    by_identity: HashMap<TypeIdentity, TypeHandle>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    InProgress,
    Done,
}

impl TypeRegistry {
    #[allow(missing_docs)]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Descriptor behind `handle`, `None` if the handle belongs to another registry
    pub fn get(&self, handle: TypeHandle) -> Option<&Rtti> {
        if handle.registry() != self.id {
            return None;
        }
        self.types.get(handle.index())
    }

    /// Same as [`TypeRegistry::get`], but reports foreign handles as an error
    pub fn try_get(&self, handle: TypeHandle) -> Result<&Rtti, RttiError> {
        self.get(handle).ok_or(RttiError::UnknownHandle(handle))
    }

    /// Primitive, enum or class registered under `name`
    pub fn find(&self, name: &str) -> Option<TypeHandle> {
        self.by_name.get(name).copied()
    }

    /// Type carrying the given valid runtime identity
    pub fn find_by_identity(&self, identity: TypeIdentity) -> Option<TypeHandle> {
        self.by_identity.get(&identity).copied()
    }

    /// Every descriptor with its handle, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (TypeHandle, &Rtti)> + '_ {
        self.types
            .iter()
            .enumerate()
            .map(|(index, rtti)| (self.handle(index), rtti))
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Class body behind `handle`
    pub fn class(&self, handle: TypeHandle) -> Result<&RttiClass, RttiError> {
        let rtti = self.try_get(handle)?;
        rtti.as_class()
            .ok_or_else(|| RttiError::NotAClass(rtti.type_name().to_owned()))
    }

    /// Publishes this registry process-wide
    ///
    /// Readers on other threads observe the fully built registry through
    /// [`TypeRegistry::global`]. Only the first install succeeds.
    pub fn install(self) -> Result<&'static TypeRegistry, RttiError> {
        let mut installed = false;
        let registry = GLOBAL.get_or_init(|| {
            installed = true;
            self
        });

        if !installed {
            return Err(RttiError::AlreadyInstalled);
        }

        log::debug!("Installed global type registry ({} types)", registry.len());
        Ok(registry)
    }

    /// Registry published by [`TypeRegistry::install`]
    pub fn global() -> Option<&'static TypeRegistry> {
        GLOBAL.get()
    }

    fn handle(&self, index: usize) -> TypeHandle {
        TypeHandle::new(self.id, index as u32)
    }

    pub(crate) fn name_of(&self, handle: TypeHandle) -> String {
        self.get(handle)
            .map_or_else(|| handle.to_string(), |rtti| rtti.type_name().to_owned())
    }

    fn check_edges(&self) -> Result<(), RttiError> {
        for (_, rtti) in self.iter() {
            if let Some(target) = rtti.edges().into_iter().find(|edge| self.get(*edge).is_none()) {
                return Err(RttiError::DanglingHandle {
                    from: rtti.type_name().to_owned(),
                    target,
                });
            }

            let Some(class) = rtti.as_class() else {
                continue;
            };

            for entry in class.inheritance() {
                if self.types[entry.base.index()].as_class().is_none() {
                    return Err(RttiError::BaseNotClass {
                        class: class.name.clone(),
                        base: self.name_of(entry.base),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_inheritance(&self) -> Result<(), RttiError> {
        let mut state = vec![Visit::Pending; self.types.len()];
        for index in 0..self.types.len() {
            self.visit_bases(self.handle(index), &mut state)?;
        }
        Ok(())
    }

    fn visit_bases(&self, handle: TypeHandle, state: &mut [Visit]) -> Result<(), RttiError> {
        match state[handle.index()] {
            Visit::Done => return Ok(()),
            Visit::InProgress => return Err(RttiError::InheritanceCycle(self.name_of(handle))),
            Visit::Pending => {}
        }

        state[handle.index()] = Visit::InProgress;
        if let Some(class) = self.types[handle.index()].as_class() {
            for entry in class.inheritance() {
                self.visit_bases(entry.base, state)?;
            }
        }
        state[handle.index()] = Visit::Done;
        Ok(())
    }

    fn chain_next(&self, handle: TypeHandle) -> Option<TypeHandle> {
        match self.types[handle.index()].kind() {
            RttiKind::Container(container) => Some(container.contained),
            RttiKind::Primitive(primitive) => primitive.parent,
            RttiKind::Enum(_) | RttiKind::Class(_) | RttiKind::Pod(_) => None,
        }
    }

    // Wrapper and promotion chains are walked by naming; they must end somewhere
    fn check_chains(&self) -> Result<(), RttiError> {
        'types: for (start, _) in self.iter() {
            let mut current = start;
            for _ in 0..=self.types.len() {
                match self.chain_next(current) {
                    Some(next) => current = next,
                    None => continue 'types,
                }
            }
            return Err(RttiError::RecursiveChain(self.name_of(start)));
        }
        Ok(())
    }

    fn build_indices(&mut self) -> Result<(), RttiError> {
        for (index, rtti) in self.types.iter().enumerate() {
            let handle = self.handle(index);

            if let Some(name) = rtti.lookup_name() {
                if self.by_name.insert(name.to_owned(), handle).is_some() {
                    return Err(RttiError::DuplicateName(name.to_owned()));
                }
            }

            let identity = rtti.identity();
            if identity.is_valid() && self.by_identity.insert(identity, handle).is_some() {
                return Err(RttiError::DuplicateIdentity {
                    primary: identity.primary.0,
                    secondary: identity.secondary.0,
                });
            }
        }
        Ok(())
    }
}

impl Index<TypeHandle> for TypeRegistry {
    type Output = Rtti;

    /// # Panics
    ///
    /// If `handle` was issued by a different registry
    fn index(&self, handle: TypeHandle) -> &Rtti {
        match self.get(handle) {
            Some(rtti) => rtti,
            None => panic!("type handle {handle} does not belong to this registry"),
        }
    }
}
