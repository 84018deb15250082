//! Property-based tests for the window controller.
//!
//! Uses proptest to check the reveal-count invariants over arbitrary
//! collection sizes, page sizes and request sequences.

use std::time::Duration;

use chatlens::view::WindowController;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// After initialization, the reveal count is one clamped page.
    #[test]
    fn init_reveals_one_clamped_page(total in 0usize..10_000, page in 1usize..500) {
        let mut w = WindowController::new(page, Duration::ZERO);
        w.initialize(total, page);
        prop_assert_eq!(w.reveal_count(), page.min(total));
    }

    /// The reveal count never leaves `0..=total`, growth is monotonic,
    /// and exhaustion is a steady state.
    #[test]
    fn growth_stays_in_range(
        total in 0usize..10_000,
        page in 0usize..500,
        requests in 0usize..200,
    ) {
        let mut w = WindowController::new(page, Duration::ZERO);
        w.initialize(total, page);

        let mut previous = w.reveal_count();
        for _ in 0..requests {
            let grew = w.request_growth();
            let current = w.reveal_count();
            prop_assert!(current <= total);
            if grew {
                prop_assert!(current > previous);
            } else {
                prop_assert_eq!(current, previous);
            }
            previous = current;
        }

        if page > 0 && requests * page >= total {
            prop_assert!(!w.has_more());
            prop_assert!(!w.request_growth());
        }
    }

    /// Re-initializing with a new total re-clamps; a stale larger reveal
    /// count never survives a shrink.
    #[test]
    fn reinit_after_shrink_clamps(
        total in 1usize..10_000,
        shrunk in 0usize..100,
        page in 1usize..500,
    ) {
        // An unchanged size is the idempotent no-op case, not a shrink.
        prop_assume!(shrunk != total);

        let mut w = WindowController::new(page, Duration::ZERO);
        w.initialize(total, page);
        while w.request_growth() {}

        w.initialize(shrunk, page);
        prop_assert!(w.reveal_count() <= shrunk);
        prop_assert_eq!(w.reveal_count(), page.min(shrunk));
    }

    /// While the cool-down is pending, repeated requests change nothing.
    #[test]
    fn pending_requests_are_noops(total in 2usize..10_000, extra in 1usize..20) {
        let page = 1;
        let mut w = WindowController::new(page, Duration::from_secs(600));
        w.initialize(total, page);

        prop_assert!(w.request_growth());
        let after_first = w.reveal_count();
        for _ in 0..extra {
            prop_assert!(!w.request_growth());
            prop_assert_eq!(w.reveal_count(), after_first);
        }
    }
}
