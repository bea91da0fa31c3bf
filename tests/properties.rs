//! Property-based invariant tests for the range calculator and height cache.
//!
//! 1. The window never moves backwards as `scroll_top` grows.
//! 2. The window covers the whole viewport.
//! 3. Clamping is idempotent and always lands inside `[0, max]`.
//! 4. Re-reporting an identical height changes nothing.
//! 5. A uniform list windows exactly like the closed-form estimate.

use proptest::prelude::*;
use virtual_list::{HeightCache, compute_range, keep_in_range};

// ── Helpers ─────────────────────────────────────────────────────────────

fn heights(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1u32..=200, 1..=max_len)
}

fn cache_from(values: &[u32]) -> HeightCache<usize> {
    let mut cache = HeightCache::new();
    cache.import(values.iter().enumerate().map(|(i, h)| (i, f64::from(*h))));
    cache
}

fn key(i: &usize) -> usize {
    *i
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Monotonicity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn window_is_monotone_in_scroll_top(
        values in heights(300),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0,
        viewport in 1.0f64..1000.0,
    ) {
        let data: Vec<usize> = (0..values.len()).collect();
        let cache = cache_from(&values);
        let total: f64 = values.iter().map(|h| f64::from(*h)).sum();
        // Past the end the window resets to the top, so only in-range offsets are ordered.
        let (lo, hi) = if a <= b { (a * total, b * total) } else { (b * total, a * total) };

        let r1 = compute_range(&data, &key, &cache, 50.0, lo, viewport);
        let r2 = compute_range(&data, &key, &cache, 50.0, hi, viewport);
        prop_assert!(r1.start <= r2.start, "start {} > {}", r1.start, r2.start);
        prop_assert!(r1.end <= r2.end, "end {} > {}", r1.end, r2.end);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn window_covers_viewport(
        values in heights(300),
        frac in 0.0f64..=1.0,
        viewport in 1.0f64..1000.0,
    ) {
        let data: Vec<usize> = (0..values.len()).collect();
        let cache = cache_from(&values);
        let total: f64 = values.iter().map(|h| f64::from(*h)).sum();
        let scroll_top = (total - viewport).max(0.0) * frac;

        let r = compute_range(&data, &key, &cache, 50.0, scroll_top, viewport);
        let offset = r.offset.unwrap_or(0.0);
        prop_assert_eq!(r.scroll_height, Some(total));
        prop_assert!(r.start <= r.end && r.end <= data.len());

        let tops: Vec<f64> = values
            .iter()
            .scan(0.0, |acc, h| {
                let top = *acc;
                *acc += f64::from(*h);
                Some(top)
            })
            .collect();
        prop_assert_eq!(offset, tops[r.start]);
        prop_assert!(offset <= scroll_top);
        prop_assert!(offset + f64::from(values[r.start]) >= scroll_top);

        // The rendered slice reaches the viewport bottom (or the end of the list).
        let last = r.end.min(data.len() - 1);
        let rendered_bottom = tops[last] + f64::from(values[last]);
        prop_assert!(rendered_bottom >= (scroll_top + viewport).min(total));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Clamp
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_is_idempotent(value in any::<f64>(), max in proptest::option::of(any::<f64>())) {
        let once = keep_in_range(value, max);
        prop_assert!(!once.is_nan());
        prop_assert!(once >= 0.0);
        if let Some(m) = max.filter(|m| !m.is_nan() && *m >= 0.0) {
            prop_assert!(once <= m);
        }
        prop_assert_eq!(keep_in_range(once, max), once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Report idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeated_report_is_a_noop(
        reports in proptest::collection::vec((0usize..20, 0.0f64..500.0), 1..50),
    ) {
        let mut cache = HeightCache::new();
        for (k, h) in &reports {
            cache.report(*k, *h);
        }
        let version = cache.version();
        let snapshot: Vec<Option<f64>> = (0..20).map(|k| cache.get(&k)).collect();

        for k in 0..20 {
            if let Some(h) = cache.get(&k) {
                prop_assert!(!cache.report(k, h));
            }
        }
        prop_assert_eq!(cache.version(), version);
        let after: Vec<Option<f64>> = (0..20).map(|k| cache.get(&k)).collect();
        prop_assert_eq!(after, snapshot);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Uniform estimate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn uniform_list_matches_closed_form(
        len in 20usize..2000,
        item in 1u32..100,
        rows_per_view in 2u32..20,
        frac in 0.0f64..=1.0,
    ) {
        let item = f64::from(item);
        let viewport = item * f64::from(rows_per_view);
        let total = item * len as f64;
        prop_assume!(total > viewport);

        // Integer offsets keep the closed form exact.
        let scroll_top = ((total - viewport) * frac).floor();
        let data: Vec<usize> = (0..len).collect();
        let r = compute_range(&data, &key, &HeightCache::new(), item, scroll_top, viewport);

        // first row whose bottom reaches scroll_top
        let start = ((scroll_top / item).ceil() as usize).saturating_sub(1);
        prop_assert_eq!(r.start, start);
        prop_assert_eq!(r.offset, Some(start as f64 * item));
        prop_assert_eq!(r.scroll_height, Some(total));
    }
}
