/*!
 * Type-Erased Registry
 *
 * Signature-erased form of a registry, for storing signals of
 * heterogeneous callable signatures in one homogeneous container.
 * `Signal<Args>` is a transparent wrapper over this type and adds no
 * state, which the registry asserts at compile time.
 */

use super::registry::Signal;
use crate::errors::{SignalError, SignalResult};
use crate::sync::SpinConfig;
use parking_lot::Mutex;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Weak;

/// A registry with its callable signature erased.
///
/// Produced by [`Signal::into_erased`]; there is no way to build one
/// directly. Registration and notification require recovering the typed
/// view first.
///
/// Recovery is memory-safe on every path: slot entries are stored as
/// `Weak<dyn Any>`, and notification re-checks each slot's concrete type,
/// so even a wrong [`reinterpret_ref`](Self::reinterpret_ref) can only
/// misdeliver (nothing matches), never touch a foreign handler.
pub struct ErasedSignal {
    pub(crate) connections: Mutex<Vec<Weak<dyn Any + Send + Sync>>>,
    pub(crate) signature: TypeId,
    pub(crate) signature_name: &'static str,
    pub(crate) spin: SpinConfig,
}

impl ErasedSignal {
    pub(crate) fn with_signature(
        signature: TypeId,
        signature_name: &'static str,
        spin: SpinConfig,
    ) -> Self {
        Self {
            connections: Mutex::new(Vec::new()),
            signature,
            signature_name,
            spin,
        }
    }

    /// Recover the typed registry, verifying the stored signature.
    pub fn downcast_ref<Args: 'static>(&self) -> SignalResult<&Signal<Args>> {
        if self.signature == TypeId::of::<Args>() {
            Ok(self.reinterpret_ref())
        } else {
            Err(SignalError::SignatureMismatch {
                expected: self.signature_name,
                requested: type_name::<Args>(),
            })
        }
    }

    /// Recover the typed registry mutably, verifying the stored signature.
    pub fn downcast_mut<Args: 'static>(&mut self) -> SignalResult<&mut Signal<Args>> {
        if self.signature == TypeId::of::<Args>() {
            Ok(self.reinterpret_mut())
        } else {
            Err(SignalError::SignatureMismatch {
                expected: self.signature_name,
                requested: type_name::<Args>(),
            })
        }
    }

    /// Recover the typed registry on the caller's own bookkeeping, with no
    /// runtime check.
    ///
    /// A wrong `Args` is not undefined behavior here: notifications
    /// through the mishandled view find no matching slots and deliver
    /// nothing, and handlers registered through it are invisible to the
    /// correctly typed view. It is still a logic error; prefer
    /// [`downcast_ref`](Self::downcast_ref).
    pub fn reinterpret_ref<Args: 'static>(&self) -> &Signal<Args> {
        // Sound: Signal<Args> is #[repr(transparent)] over ErasedSignal.
        unsafe { &*(self as *const Self as *const Signal<Args>) }
    }

    /// Mutable counterpart of [`reinterpret_ref`](Self::reinterpret_ref).
    pub fn reinterpret_mut<Args: 'static>(&mut self) -> &mut Signal<Args> {
        unsafe { &mut *(self as *mut Self as *mut Signal<Args>) }
    }

    /// Name of the erased signature type, for diagnostics.
    pub fn signature_name(&self) -> &'static str {
        self.signature_name
    }

    /// Stored entry count, including expired entries not yet pruned.
    pub fn len(&self) -> usize {
        self.connections.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.lock().is_empty()
    }
}

impl fmt::Debug for ErasedSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedSignal")
            .field("signature", &self.signature_name)
            .field("entries", &self.len())
            .finish()
    }
}
