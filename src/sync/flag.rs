/*!
 * Busy Flag
 *
 * Try-lock/blocking-lock pair over a single atomic bit. Notifiers use the
 * try path and skip on failure; disconnection uses the blocking path and
 * spins until the in-flight invocation (if any) has finished.
 */

use super::config::SpinConfig;
use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Per-slot busy/disconnecting flag.
///
/// Invariant: no two `try_enter` calls succeed without an intervening
/// `exit`. Entry is an acquire operation, exit a release, so everything a
/// handler wrote is visible to whoever enters the flag next.
pub(crate) struct BusyFlag {
    state: AtomicBool,
}

impl BusyFlag {
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicBool::new(false),
        }
    }

    /// Attempt to take the flag. Never blocks.
    pub(crate) fn try_enter(&self) -> bool {
        self.state
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// Take the flag, spinning until it is free.
    pub(crate) fn enter(&self, config: &SpinConfig) {
        let mut spins: u32 = 0;
        while !self.try_enter() {
            spins = spins.wrapping_add(1);
            if config.yield_every != 0 && spins % config.yield_every == 0 {
                thread::yield_now();
            } else {
                hint::spin_loop();
            }
        }
    }

    pub(crate) fn exit(&self) {
        self.state.store(false, Ordering::Release);
    }

    #[cfg(test)]
    fn is_held(&self) -> bool {
        self.state.load(Ordering::Relaxed)
    }
}

/// Scoped hold of a [`BusyFlag`]: releases on drop, including unwind, so a
/// panicking handler cannot leave its slot permanently busy.
pub(crate) struct BusyGuard<'a> {
    flag: &'a BusyFlag,
}

impl<'a> BusyGuard<'a> {
    /// Caller must already have entered `flag`.
    pub(crate) fn new(flag: &'a BusyFlag) -> Self {
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.exit();
    }
}
