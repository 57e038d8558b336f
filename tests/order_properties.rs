/*!
 * Delivery Order Properties
 *
 * Registration order survives arbitrary disconnect patterns
 */

use proptest::collection::vec;
use proptest::prelude::*;
use sigslot::Signal;
use std::sync::{Arc, Mutex};

proptest! {
    #[test]
    fn delivery_follows_registration_order(drops in vec(any::<bool>(), 1..24)) {
        let sig = Signal::<()>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut conns = Vec::new();
        for idx in 0..drops.len() {
            let log = seen.clone();
            conns.push(sig.connect(move |_| log.lock().unwrap().push(idx)));
        }

        let mut expected = Vec::new();
        for (idx, conn) in conns.iter_mut().enumerate() {
            if drops[idx] {
                conn.disconnect();
            } else {
                expected.push(idx);
            }
        }

        sig.notify(&());
        prop_assert_eq!(&*seen.lock().unwrap(), &expected);
    }

    #[test]
    fn pruning_never_loses_live_handlers(live in 1usize..16, dead in 0usize..16) {
        let sig = Signal::<()>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut kept = Vec::new();
        for idx in 0..live {
            let log = seen.clone();
            kept.push(sig.connect(move |_| log.lock().unwrap().push(idx)));
        }
        for _ in 0..dead {
            drop(sig.connect(|_| {}));
        }

        // Registration prunes the dead entries; live ones must survive.
        let log = seen.clone();
        let _last = sig.connect(move |_| log.lock().unwrap().push(usize::MAX));
        prop_assert_eq!(sig.len(), live + 1);

        sig.notify(&());
        let mut expected: Vec<usize> = (0..live).collect();
        expected.push(usize::MAX);
        prop_assert_eq!(&*seen.lock().unwrap(), &expected);
    }
}
