use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Handle returned by every `subscribe` call.
///
/// Ids are unique across all observer lists in the process, so a single id
/// can be used to unsubscribe without knowing which list it belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn next() -> Self {
        Self(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Typed subscriber list for one notification kind.
///
/// Handlers are stored behind `Rc` so callers can take a [`snapshot`] and
/// invoke it after releasing whatever borrow guards the list. A handler may
/// therefore subscribe or unsubscribe while an event is being delivered; the
/// change takes effect on the next emit.
///
/// [`snapshot`]: Observers::snapshot
pub struct Observers<E> {
    entries: Vec<(SubscriptionId, Rc<dyn Fn(&E)>)>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl Fn(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.entries.push((id, Rc::new(handler)));
        id
    }

    /// Returns `true` if `id` was registered here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handlers in subscription order.
    pub fn snapshot(&self) -> Vec<Rc<dyn Fn(&E)>> {
        self.entries
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect()
    }
}

/// Delivers `event` to a previously taken snapshot.
pub fn deliver<E>(handlers: &[Rc<dyn Fn(&E)>], event: &E) {
    for handler in handlers {
        handler(event);
    }
}
