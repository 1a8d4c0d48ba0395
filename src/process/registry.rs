/*!
 * Process Registry
 * Maps stable type tags to process constructors
 *
 * The registry lets the kernel rebuild polymorphic process instances from
 * the type tag stored in the persisted table. It is populated once at
 * startup, before any kernel exists, and only read while scheduling.
 */

use super::traits::{Process, ProcessKind};
use super::types::ProcessInit;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Constructor closure stored for each type tag
pub type Constructor = dyn Fn(ProcessInit) -> Box<dyn Process> + Send + Sync;

/// A registered process kind
pub struct ProcessFactory {
    type_tag: Arc<str>,
    construct: Box<Constructor>,
}

impl ProcessFactory {
    pub fn new<F>(type_tag: impl Into<Arc<str>>, construct: F) -> Self
    where
        F: Fn(ProcessInit) -> Box<dyn Process> + Send + Sync + 'static,
    {
        Self {
            type_tag: type_tag.into(),
            construct: Box::new(construct),
        }
    }

    /// Factory for a kind with a static tag
    pub fn of<K: ProcessKind>() -> Self {
        Self::new(K::TYPE_TAG, |init| Box::new(K::create(init)) as Box<dyn Process>)
    }

    #[inline]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Shared handle to the tag, cloned into each process's identity
    #[inline]
    pub fn type_tag_arc(&self) -> Arc<str> {
        Arc::clone(&self.type_tag)
    }

    #[inline]
    pub fn construct(&self, init: ProcessInit) -> Box<dyn Process> {
        (self.construct)(init)
    }
}

impl fmt::Debug for ProcessFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessFactory")
            .field("type_tag", &self.type_tag)
            .finish_non_exhaustive()
    }
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Type tag → factory table
#[derive(Default)]
pub struct Registry {
    entries: RwLock<AHashMap<String, Arc<ProcessFactory>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first use
    pub fn global() -> &'static Registry {
        GLOBAL_REGISTRY.get_or_init(Registry::new)
    }

    /// Register a constructor under `type_tag`. Re-registering a tag replaces
    /// the previous factory; the collision is logged since it indicates a
    /// naming bug.
    pub fn register<F>(&self, type_tag: &str, construct: F) -> Arc<ProcessFactory>
    where
        F: Fn(ProcessInit) -> Box<dyn Process> + Send + Sync + 'static,
    {
        self.register_factory(ProcessFactory::new(type_tag, construct))
    }

    /// Register a kind by its static tag
    pub fn register_kind<K: ProcessKind>(&self) -> Arc<ProcessFactory> {
        self.register_factory(ProcessFactory::of::<K>())
    }

    pub fn register_factory(&self, factory: ProcessFactory) -> Arc<ProcessFactory> {
        let factory = Arc::new(factory);
        let previous = self
            .entries
            .write()
            .insert(factory.type_tag().to_string(), Arc::clone(&factory));

        if previous.is_some() {
            warn!(
                type_tag = factory.type_tag(),
                "Process type tag registered twice; last registration wins"
            );
        } else {
            debug!(type_tag = factory.type_tag(), "Process kind registered");
        }
        factory
    }

    pub fn fetch(&self, type_tag: &str) -> Option<Arc<ProcessFactory>> {
        self.entries.read().get(type_tag).cloned()
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.entries.read().contains_key(type_tag)
    }

    /// All registered tags, sorted
    pub fn registrations(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.entries.read().keys().cloned().collect();
        tags.sort();
        tags
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("registrations", &self.registrations())
            .finish()
    }
}
