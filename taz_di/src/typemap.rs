use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// Cache of a [`Provider`](crate::Provider), holding at most one built
/// instance per service type. A second `provide` of e.g. the contact feature
/// hands out a clone of the cached instance, so both share the same form
/// state.
#[derive(Debug, Default)]
pub struct TypeMap(HashMap<TypeId, Box<dyn Any>>);

impl TypeMap {
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.0
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref())
    }

    /// Store `value`, replacing any previous value of the same type.
    pub fn insert<T: 'static>(&mut self, value: T) {
        self.0.insert(TypeId::of::<T>(), Box::new(value));
    }
}
