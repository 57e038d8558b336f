/*!
 * Spin Configuration
 *
 * Policy for the blocking enter path of the busy flag
 */

/// Spin policy used while waiting for a slot's busy flag.
///
/// The blocking path (disconnect, release) spins on the flag with
/// [`std::hint::spin_loop`] and periodically yields to the scheduler so a
/// long-running handler on a loaded machine cannot starve the waiter's core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinConfig {
    /// Failed spin iterations between scheduler yields. `0` never yields.
    pub yield_every: u32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self { yield_every: 64 }
    }
}

impl SpinConfig {
    /// Policy for waits expected to be very short (handlers in the
    /// microsecond range): spin longer before giving up the core.
    pub const fn low_latency() -> Self {
        Self { yield_every: 512 }
    }

    /// Policy for waits that may overlap slow handlers: yield early and
    /// often instead of burning the core.
    pub const fn cooperative() -> Self {
        Self { yield_every: 8 }
    }
}
