use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of identifiers for generated tasks and groups.
///
/// Expanders never mint identifiers themselves; they ask the generator they
/// were constructed with, which keeps every expansion replayable in tests.
pub trait IdGenerator {
    /// A fresh, globally unique task identifier.
    fn new_id(&self) -> String;

    /// A fresh group identifier, shared by every instance of one batch.
    fn new_group_id(&self) -> String {
        self.new_id()
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for &T {
    fn new_id(&self) -> String {
        (**self).new_id()
    }

    fn new_group_id(&self) -> String {
        (**self).new_group_id()
    }
}

impl<T: IdGenerator + ?Sized> IdGenerator for std::sync::Arc<T> {
    fn new_id(&self) -> String {
        (**self).new_id()
    }

    fn new_group_id(&self) -> String {
        (**self).new_group_id()
    }
}

/// Random UUIDv4 identifiers. The leading characters are random, so short
/// prefixes stay distinguishable inside one batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic identifiers of the form `{prefix}-{n}`, with group ids
/// prefixed by `group-`.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("task")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn new_id(&self) -> String {
        format!("{}-{}", self.prefix, self.bump())
    }

    fn new_group_id(&self) -> String {
        format!("group-{}-{}", self.prefix, self.bump())
    }
}
