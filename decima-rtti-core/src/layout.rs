//! Flattening of declared and inherited class members
//!
//! Bases are visited before the class itself, in declaration order, so the resulting
//! sequence reads like the in-memory layout of the most derived object. Shared bases of
//! a diamond are emitted once per inheritance path.

use indexmap::{IndexMap, IndexSet};

use crate::{ClassMember, MemberEntry, RttiError, TypeHandle, TypeRegistry};

/// Member of the flattened layout
#[derive(Clone, Copy, Debug)]
pub struct LayoutEntry<'r> {
    #[allow(missing_docs)]
    pub member: &'r MemberEntry,
    /// Label of the last group marker seen in the declaring class, empty if none
    pub category: &'r str,
    /// Offset from the start of the flattened class
    pub offset: u32,
    /// Visit order; bases come before derived classes
    pub decl_order: usize,
    /// Declared by the flattened class itself rather than inherited
    pub top_level: bool,
    /// Class that declares the member
    pub owner: TypeHandle,
}

impl PartialEq for LayoutEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.member, other.member)
            && self.category == other.category
            && self.offset == other.offset
            && self.decl_order == other.decl_order
            && self.top_level == other.top_level
            && self.owner == other.owner
    }
}

impl Eq for LayoutEntry<'_> {}

/// Position where a group marker switched the active category
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CategoryBoundary<'r> {
    #[allow(missing_docs)]
    pub label: &'r str,
    /// Class that declares the marker
    pub owner: TypeHandle,
    /// Index of the first entry emitted after the marker
    pub start: usize,
}

/// Result of [`TypeRegistry::categorized_members`]
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CategorizedLayout<'r> {
    entries: Vec<LayoutEntry<'r>>,
    boundaries: Vec<CategoryBoundary<'r>>,
}

impl<'r> CategorizedLayout<'r> {
    /// Fields in visit order
    pub fn entries(&self) -> &[LayoutEntry<'r>] {
        &self.entries
    }

    /// Group markers in visit order
    pub fn boundaries(&self) -> &[CategoryBoundary<'r>] {
        &self.boundaries
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[allow(missing_docs)]
    pub fn iter(&self) -> std::slice::Iter<'_, LayoutEntry<'r>> {
        self.entries.iter()
    }

    /// Entries ordered by absolute offset, ties broken by visit order
    pub fn sorted_by_offset(&self) -> Vec<LayoutEntry<'r>> {
        let mut sorted = self.entries.clone();
        sorted.sort_by_key(|entry| (entry.offset, entry.decl_order));
        sorted
    }

    /// Distinct category labels in the order they first appear
    ///
    /// Labels of markers that aren't followed by any field are included
    pub fn categories(&self) -> Vec<&'r str> {
        let mut seen = IndexSet::new();
        let mut markers = self.boundaries.iter().peekable();

        for (index, entry) in self.entries.iter().enumerate() {
            while let Some(marker) = markers.next_if(|marker| marker.start <= index) {
                seen.insert(marker.label);
            }
            seen.insert(entry.category);
        }
        seen.extend(markers.map(|marker| marker.label));

        seen.into_iter().collect()
    }

    /// Entries grouped by category, groups in first-seen order
    pub fn by_category(&self) -> IndexMap<&'r str, Vec<&LayoutEntry<'r>>> {
        let mut groups: IndexMap<&'r str, Vec<&LayoutEntry<'r>>> = IndexMap::new();
        for entry in &self.entries {
            groups.entry(entry.category).or_default().push(entry);
        }
        groups
    }

    /// Entries that are part of the persisted schema
    pub fn persisted(&self) -> impl Iterator<Item = &LayoutEntry<'r>> + '_ {
        self.entries
            .iter()
            .filter(|entry| !entry.member.is_save_state_only())
    }
}

impl<'r> IntoIterator for CategorizedLayout<'r> {
    type Item = LayoutEntry<'r>;
    type IntoIter = std::vec::IntoIter<LayoutEntry<'r>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, 'r> IntoIterator for &'a CategorizedLayout<'r> {
    type Item = &'a LayoutEntry<'r>;
    type IntoIter = std::slice::Iter<'a, LayoutEntry<'r>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl TypeRegistry {
    /// Every member of `class`, inherited ones included, with absolute offsets and
    /// the category each one was declared under
    pub fn categorized_members(
        &self,
        class: TypeHandle,
    ) -> Result<CategorizedLayout<'_>, RttiError> {
        let mut layout = CategorizedLayout::default();
        self.flatten(class, 0, true, &mut layout)?;
        Ok(layout)
    }

    fn flatten<'r>(
        &'r self,
        handle: TypeHandle,
        offset: u32,
        top_level: bool,
        layout: &mut CategorizedLayout<'r>,
    ) -> Result<(), RttiError> {
        let class = self.class(handle)?;
        log::trace!(
            "Flattening `{}` at {:#x} ({} bases)",
            class.name,
            offset,
            class.inheritance().len()
        );

        for entry in class.inheritance() {
            let base_offset =
                offset
                    .checked_add(entry.offset)
                    .ok_or_else(|| RttiError::OffsetOverflow {
                        class: class.name.clone(),
                        member: self.name_of(entry.base),
                    })?;

            self.flatten(entry.base, base_offset, false, layout)
                .map_err(|err| match err {
                    RttiError::NotAClass(base) => RttiError::BaseNotClass {
                        class: class.name.clone(),
                        base,
                    },
                    other => other,
                })?;
        }

        let mut category = "";
        for member in class.members() {
            let member = match member {
                ClassMember::Category(label) => {
                    category = label.as_str();
                    layout.boundaries.push(CategoryBoundary {
                        label: label.as_str(),
                        owner: handle,
                        start: layout.entries.len(),
                    });
                    continue;
                }
                ClassMember::Field(member) => member,
            };

            let absolute = offset
                .checked_add(u32::from(member.offset))
                .ok_or_else(|| RttiError::OffsetOverflow {
                    class: class.name.clone(),
                    member: member.name.clone(),
                })?;

            layout.entries.push(LayoutEntry {
                member,
                category,
                offset: absolute,
                decl_order: layout.entries.len(),
                top_level,
                owner: handle,
            });
        }
        Ok(())
    }
}
