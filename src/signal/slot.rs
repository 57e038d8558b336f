/*!
 * Handler Slot
 *
 * Storage for one registered callable and its busy flag. A slot has
 * exactly one strong owner (the connection handed back by the registry)
 * and at most one weak observer (the registry entry).
 */

use crate::sync::{BusyFlag, SpinConfig};

/// One registered handler: the callable, the busy flag guarding it, and
/// the spin policy of the registry that created it.
///
/// The callable is invoked only between a successful `try_enter` and the
/// matching `exit` on `busy`, and only through a strong reference, so a
/// notifier can never observe a freed or half-destroyed handler.
pub(crate) struct SlotCell<Args: 'static> {
    pub(crate) busy: BusyFlag,
    pub(crate) spin: SpinConfig,
    pub(crate) func: Box<dyn Fn(&Args) + Send + Sync>,
}

/// Signature-blind face of a slot, kept by connections.
///
/// A connection only ever touches the flag and the spin policy; invoking
/// the callable stays with the registry, which knows the concrete `Args`.
pub(crate) trait SlotControl: Send + Sync {
    fn busy(&self) -> &BusyFlag;
    fn spin(&self) -> &SpinConfig;
}

impl<Args: 'static> SlotControl for SlotCell<Args> {
    fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    fn spin(&self) -> &SpinConfig {
        &self.spin
    }
}
