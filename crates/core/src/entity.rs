//! Records addressed by a stable id.

pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    fn id(&self) -> &Self::Id;

    /// Whether this entity is addressed by the given external key.
    ///
    /// Lookups coming from URLs or UI controls carry the id as text, so the
    /// comparison is done on the rendered form.
    fn has_key(&self, key: &str) -> bool {
        self.id().to_string() == key.trim()
    }
}
