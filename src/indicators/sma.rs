// =============================================================================
// Trailing Simple Moving Average (SMA)
// =============================================================================
//
// The smoothed trend reference for the momentum panel:
//   MA_i = mean(close[i-w+1 ..= i])
//
// Output is index-aligned with the input: positions with fewer than `window`
// prior closes are `None` rather than being dropped, so downstream columns
// can be merged without re-indexing.
// =============================================================================

/// Compute the trailing `window`-period moving average of `closes`.
///
/// The returned vector has the same length as `closes`; element `i` is
/// `Some(mean)` for `i >= window - 1` and `None` before that.
///
/// # Edge cases
/// - `window == 0` => all `None` (callers reject this before computing;
///   the guard keeps the function total).
/// - `closes.len() < window` => all `None`.
pub fn moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if window == 0 || closes.len() < window {
        return result;
    }

    // Rolling sum: add the entering close, subtract the leaving one.
    let mut sum: f64 = closes[..window].iter().sum();
    result[window - 1] = Some(sum / window as f64);

    for i in window..closes.len() {
        sum += closes[i] - closes[i - window];
        result[i] = Some(sum / window as f64);
    }

    result
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_empty_input() {
        assert!(moving_average(&[], 5).iter().all(Option::is_none));
    }

    #[test]
    fn sma_window_zero_is_all_none() {
        let out = moving_average(&[1.0, 2.0, 3.0], 0);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn sma_insufficient_data() {
        let out = moving_average(&[1.0, 2.0], 5);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn sma_undefined_prefix_then_exact_means() {
        // 21 closes 10..=30, window 5 — the scenario series.
        let closes: Vec<f64> = (10..=30).map(|x| x as f64).collect();
        let out = moving_average(&closes, 5);
        assert_eq!(out.len(), 21);

        // First window-1 positions undefined.
        for v in &out[..4] {
            assert!(v.is_none());
        }

        // Position 4 = mean(10..14) = 12.
        assert!((out[4].unwrap() - 12.0).abs() < 1e-12);

        // Every defined position equals the exact mean of its window.
        for i in 4..closes.len() {
            let expected: f64 = closes[i - 4..=i].iter().sum::<f64>() / 5.0;
            assert!((out[i].unwrap() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn sma_window_equals_length() {
        let out = moving_average(&[2.0, 4.0, 6.0], 3);
        assert_eq!(out, vec![None, None, Some(4.0)]);
    }

    #[test]
    fn sma_window_one_is_identity() {
        let closes = [3.0, 1.0, 4.0];
        let out = moving_average(&closes, 1);
        assert_eq!(out, vec![Some(3.0), Some(1.0), Some(4.0)]);
    }
}
