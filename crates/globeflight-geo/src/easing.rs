//! Easing curves.

/// Cubic ease-in-out: accelerates through the first half, decelerates through
/// the second. Input is clamped to [0, 1].
#[inline]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let u = t - 2.0;
        (u * u * u + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(ease_cubic_in_out(-0.3), 0.0);
        assert_eq!(ease_cubic_in_out(1.7), 1.0);
    }

    #[test]
    fn test_symmetry_and_range() {
        for i in 0..=1000 {
            let t = i as f64 / 1000.0;
            let e = ease_cubic_in_out(t);
            assert!((0.0..=1.0).contains(&e), "ease({t}) = {e}");
            let mirrored = ease_cubic_in_out(1.0 - t);
            assert!((e + mirrored - 1.0).abs() < 1e-12, "asymmetric at t={t}");
        }
    }

    #[test]
    fn test_monotonic() {
        let mut prev = 0.0;
        for i in 1..=1000 {
            let e = ease_cubic_in_out(i as f64 / 1000.0);
            assert!(e >= prev);
            prev = e;
        }
    }

    #[test]
    fn test_slow_start() {
        // Cubic in: a quarter of the way in, only 1/16 of the distance is covered.
        assert!((ease_cubic_in_out(0.25) - 0.0625).abs() < 1e-12);
    }
}
