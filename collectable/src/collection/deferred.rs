use std::fmt::{Debug, Formatter};
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::errors::{CollectionError, CollectionResult, ErrorKind};

/// Producer of a store, invoked on first access.
pub type Factory<S> = Rc<dyn Fn() -> CollectionResult<S>>;

/// Replayable access to a store, handed to derived collections.
pub type Source<S> = Rc<dyn Fn() -> CollectionResult<Rc<S>>>;

/// Lazily populated, memoized store shared by every collection variant.
///
/// The factory runs the first time the store is read and its result is cached for
/// every later access. A failing factory caches nothing: the error is returned and
/// the next access runs the factory again.
///
/// The materialized store lives behind an [Rc]; mutation goes through
/// [Rc::make_mut], so snapshots handed out by [DeferredStore::source] are never
/// affected by later changes.
pub struct DeferredStore<S> {
    factory: Factory<S>,
    store: OnceCell<Rc<S>>,
}

impl<S: 'static> DeferredStore<S> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> CollectionResult<S> + 'static,
    {
        DeferredStore {
            factory: Rc::new(factory),
            store: OnceCell::new(),
        }
    }

    /// Creates a store whose factory hands out copies of `store`.
    pub fn replay(store: S) -> Self
    where
        S: Clone,
    {
        let captured = Rc::new(store);
        DeferredStore::new(move || Ok((*captured).clone()))
    }

    /// Creates a store reading from another store's [Source].
    pub fn derived<F>(source: Source<S>, transform: F) -> Self
    where
        F: Fn(&S) -> CollectionResult<S> + 'static,
    {
        DeferredStore::new(move || {
            let items = source()?;
            transform(&items)
        })
    }

    pub fn is_materialized(&self) -> bool {
        self.store.get().is_some()
    }

    /// Returns the store, running the factory on first access.
    ///
    /// # Errors
    ///
    /// Returns the error of the factory.
    pub fn get(&self) -> CollectionResult<&S> {
        let store = self.store.get_or_try_init(|| {
            let store = (self.factory)()?;
            log::trace!("Deferred store materialized");
            Ok::<_, CollectionError>(Rc::new(store))
        })?;
        Ok(store.as_ref())
    }

    /// Returns the store mutably, running the factory on first access.
    /// The factory never runs again once the store is materialized.
    pub fn get_mut(&mut self) -> CollectionResult<&mut S>
    where
        S: Clone,
    {
        self.get()?;
        match self.store.get_mut() {
            Some(store) => Ok(Rc::make_mut(store)),
            None => {
                log::error!("Materialized store is not reachable");
                Err(CollectionError::new(
                    "Materialized store is not reachable",
                    ErrorKind::InvalidAttribute,
                ))
            }
        }
    }

    /// Returns a replayable source: a snapshot of the store once materialized,
    /// otherwise the factory itself.
    pub fn source(&self) -> Source<S> {
        match self.store.get() {
            Some(store) => {
                let snapshot = Rc::clone(store);
                Rc::new(move || Ok(Rc::clone(&snapshot)))
            }
            None => {
                let factory = Rc::clone(&self.factory);
                Rc::new(move || factory().map(Rc::new))
            }
        }
    }
}

impl<S> Clone for DeferredStore<S> {
    fn clone(&self) -> Self {
        DeferredStore {
            factory: Rc::clone(&self.factory),
            store: self.store.clone(),
        }
    }
}

impl<S: Debug> Debug for DeferredStore<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.store.get() {
            Some(store) => write!(f, "{:?}", store),
            None => write!(f, "<unmaterialized>"),
        }
    }
}
