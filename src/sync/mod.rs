/*!
 * Synchronization Primitives
 *
 * The per-slot busy flag and its spin policy. The flag is the single
 * synchronization primitive of the crate: a try-lock/blocking-lock pair
 * over one atomic bit with acquire/release ordering.
 */

mod config;
mod flag;

pub use config::SpinConfig;

pub(crate) use flag::{BusyFlag, BusyGuard};
