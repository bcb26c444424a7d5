use crate::{MessageHandlerEntry, TypeHandle, TypeRegistry};

impl TypeRegistry {
    /// Handler that `class` runs for `message`
    ///
    /// Looks at the class's own handlers, then at messages it inherits from a named owner,
    /// then at its bases in declaration order. `None` for non-class handles.
    pub fn find_message_handler(
        &self,
        class: TypeHandle,
        message: TypeHandle,
    ) -> Option<&MessageHandlerEntry> {
        let rtti = self.get(class)?.as_class()?;

        if let Some(handler) = self.own_handler(class, message) {
            return Some(handler);
        }

        let inherited = rtti
            .inherited_messages()
            .iter()
            .filter(|entry| self.is_exact_kind_of(Some(entry.message), Some(message)))
            .find_map(|entry| self.own_handler(entry.owner, message));
        if inherited.is_some() {
            return inherited;
        }

        rtti.inheritance()
            .iter()
            .find_map(|entry| self.find_message_handler(entry.base, message))
    }

    /// `class` or one of its bases reacts to `message`
    pub fn handles_message(&self, class: TypeHandle, message: TypeHandle) -> bool {
        self.find_message_handler(class, message).is_some()
    }

    fn own_handler(&self, class: TypeHandle, message: TypeHandle) -> Option<&MessageHandlerEntry> {
        self.get(class)?
            .as_class()?
            .message_handlers()
            .iter()
            .find(|entry| self.is_exact_kind_of(Some(entry.message), Some(message)))
    }
}
