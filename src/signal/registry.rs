/*!
 * Signal Registry
 *
 * Ordered registry of weak handler references. Registration hands the
 * caller the only strong reference; notification upgrades each weak entry
 * for the duration of one invocation attempt and never blocks on a busy
 * slot.
 */

use super::connection::{Connection, PinnedConnection};
use super::erased::ErasedSignal;
use super::slot::SlotCell;
use crate::sync::{BusyFlag, BusyGuard, SpinConfig};
use log::{debug, trace};
use std::any::{type_name, Any, TypeId};
use std::marker::PhantomData;
use std::mem;
use std::sync::{Arc, Weak};

/// Registry of handlers for one callable signature.
///
/// `Args` is the notification payload: handlers receive `&Args` and write
/// back through interior mutability where they need to. Use a tuple for
/// multi-argument signatures.
///
/// The registry holds no strong references; every handler's storage is
/// owned by the handle returned at registration, and entries whose handle
/// is gone are pruned on the next registration.
///
/// # Performance
///
/// - `connect` is O(n) in registered entries (opportunistic pruning)
/// - `notify` snapshots the entry list under a brief lock, then invokes
///   outside it, so handlers may re-enter `connect` and concurrent
///   `connect`/`notify` from other threads never deadlock
///
/// # Examples
///
/// ```
/// use sigslot::Signal;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let sig = Signal::<i32>::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// let observer = seen.clone();
/// let mut conn = sig.connect(move |value: &i32| {
///     observer.store(*value as usize, Ordering::SeqCst);
/// });
///
/// sig.notify(&7);
/// assert_eq!(seen.load(Ordering::SeqCst), 7);
///
/// conn.disconnect();
/// sig.notify(&9);
/// assert_eq!(seen.load(Ordering::SeqCst), 7);
/// ```
#[repr(transparent)]
pub struct Signal<Args: 'static> {
    raw: ErasedSignal,
    _signature: PhantomData<fn(&Args)>,
}

impl<Args: 'static> Signal<Args> {
    // Erasure requires the typed registry to add no state of its own.
    const LAYOUT: () = assert!(
        mem::size_of::<Signal<Args>>() == mem::size_of::<ErasedSignal>()
            && mem::align_of::<Signal<Args>>() == mem::align_of::<ErasedSignal>()
    );

    /// A registry with the default spin policy.
    pub fn new() -> Self {
        Self::with_config(SpinConfig::default())
    }

    /// A registry whose slots use `config` for the blocking disconnect
    /// path.
    pub fn with_config(config: SpinConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::LAYOUT;
        Self {
            raw: ErasedSignal::with_signature(
                TypeId::of::<Args>(),
                type_name::<Args>(),
                config,
            ),
            _signature: PhantomData,
        }
    }

    /// Register a capturing callable. Returns the pinned handle variant:
    /// handlers that carry bound state should not have their handle's
    /// identity transferred casually ([`PinnedConnection::release`] is the
    /// sanctioned path).
    pub fn connect<F>(&self, func: F) -> PinnedConnection
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        PinnedConnection::from_slot(self.connect_slot(Box::new(func)))
    }

    /// Register a plain function pointer. Capture-free closures coerce, so
    /// stateless handlers get the movable [`Connection`] variant.
    pub fn connect_fn(&self, func: fn(&Args)) -> Connection {
        Connection::from_slot(self.connect_slot(Box::new(func)))
    }

    fn connect_slot(&self, func: Box<dyn Fn(&Args) + Send + Sync>) -> Arc<SlotCell<Args>> {
        let cell = Arc::new(SlotCell {
            busy: BusyFlag::new(),
            spin: self.raw.spin,
            func,
        });
        let entry: Arc<dyn Any + Send + Sync> = cell.clone();

        let mut connections = self.raw.connections.lock();
        let before = connections.len();
        connections.retain(|weak| weak.strong_count() > 0);
        let pruned = before - connections.len();
        if pruned > 0 {
            trace!("pruned {pruned} expired handler entries");
        }
        connections.push(Arc::downgrade(&entry));
        drop(connections);

        debug!("registered handler for {}", self.raw.signature_name);
        cell
    }

    /// Invoke every live, non-busy handler in registration order.
    ///
    /// Expired entries and entries whose busy flag is held (an in-flight
    /// invocation on another thread, a disconnect in progress, or a
    /// detached slot) are silently skipped; this round makes no second
    /// attempt. A panic from a handler propagates to the caller and aborts
    /// the remaining handlers of the round; the slot's flag is released on
    /// unwind.
    ///
    /// A handler registered while a round is in flight is not seen by that
    /// round.
    pub fn notify(&self, args: &Args) {
        let snapshot: Vec<Weak<dyn Any + Send + Sync>> = self.raw.connections.lock().clone();
        for weak in snapshot {
            let Some(entry) = weak.upgrade() else {
                continue;
            };
            let Ok(cell) = entry.downcast::<SlotCell<Args>>() else {
                // Foreign signature reached through the unchecked erasure
                // path; fail closed.
                trace!("skipping entry with foreign signature");
                continue;
            };
            if cell.busy.try_enter() {
                let _entered = BusyGuard::new(&cell.busy);
                (cell.func)(args);
            } else {
                trace!("skipping busy handler");
            }
        }
    }

    /// Stored entry count, including expired entries not yet pruned.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Erase the signature for homogeneous storage. Recover with
    /// [`ErasedSignal::downcast_ref`] or the unchecked
    /// [`ErasedSignal::reinterpret_ref`].
    pub fn into_erased(self) -> ErasedSignal {
        self.raw
    }

    pub fn as_erased(&self) -> &ErasedSignal {
        &self.raw
    }

    pub fn as_erased_mut(&mut self) -> &mut ErasedSignal {
        &mut self.raw
    }
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> From<Signal<Args>> for ErasedSignal {
    fn from(signal: Signal<Args>) -> Self {
        signal.into_erased()
    }
}

impl<Args: 'static> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("signature", &self.raw.signature_name)
            .field("entries", &self.len())
            .finish()
    }
}
