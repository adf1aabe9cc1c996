// =============================================================================
// Relative Strength Index (RSI) — simple rolling-mean form
// =============================================================================
//
// Step 1 — Compute period-over-period deltas from consecutive closes.
// Step 2 — Over a trailing `period`-delta window:
//            avg_gain = mean of positive deltas (others contribute 0)
//            avg_loss = mean of |negative deltas| (others contribute 0)
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// This is the plain rolling-average variant (both averages are simple means
// over the window), not Wilder's exponential smoothing.
//
// Saturation: a window with gains and no losses has an infinite RS; the
// series reports exactly 100.0 there instead of an undefined value. A window
// with no movement at all reports 50.0 (neutral), and an all-loss window
// falls out of the formula as exactly 0.0.
// =============================================================================

/// Compute the `period`-window RSI series for `closes`.
///
/// The returned vector is index-aligned with `closes`; element `i` is `None`
/// until `period` prior deltas exist (`i < period`) and `Some(rsi)` from then
/// on, with `rsi` always in `[0, 100]`.
///
/// # Edge cases
/// - `period == 0` => all `None`.
/// - `closes.len() <= period` => all `None` (not enough deltas).
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return result;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // Position i consumes the deltas ending at close i, i.e. deltas[i-period..i].
    for i in period..closes.len() {
        let window = &deltas[i - period..i];

        let (sum_gain, sum_loss) = window.iter().fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l + d.abs())
            }
        });

        let period_f = period as f64;
        result[i] = Some(rsi_from_averages(sum_gain / period_f, sum_loss / period_f));
    }

    result
}

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// - Both averages zero => 50.0 (no movement, neutral).
/// - Average loss zero  => 100.0 (strong-uptrend saturation).
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_input() {
        assert!(rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_period_zero_is_all_none() {
        let out = rsi(&[1.0, 2.0, 3.0], 0);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_insufficient_data() {
        // 14 closes give only 13 deltas — nothing is defined yet.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        assert!(rsi(&closes, 14).iter().all(Option::is_none));
    }

    #[test]
    fn rsi_undefined_for_first_period_positions() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let out = rsi(&closes, 14);
        for v in &out[..14] {
            assert!(v.is_none());
        }
        for v in &out[14..] {
            assert!(v.is_some());
        }
    }

    #[test]
    fn rsi_all_gains_saturates_to_100() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let out = rsi(&closes, 14);
        for v in out.iter().flatten() {
            assert_eq!(*v, 100.0);
        }
    }

    #[test]
    fn rsi_all_losses_is_exactly_0() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let out = rsi(&closes, 14);
        for v in out.iter().flatten() {
            assert_eq!(*v, 0.0);
        }
    }

    #[test]
    fn rsi_flat_market_is_neutral() {
        let closes = vec![100.0; 30];
        let out = rsi(&closes, 14);
        for v in out.iter().flatten() {
            assert_eq!(*v, 50.0);
        }
    }

    #[test]
    fn rsi_rising_run_then_flat_close_stays_100() {
        // 14 strictly increasing closes then one flat close: the first
        // defined position sees 13 gains + 1 zero delta — still no losses.
        let mut closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        closes.push(14.0);
        let out = rsi(&closes, 14);

        assert!(out[..14].iter().all(Option::is_none));
        assert_eq!(out[14], Some(100.0));
    }

    #[test]
    fn rsi_known_mixed_window() {
        // period 2 over [1, 2, 1, 3]:
        //   deltas = [1, -1, 2]
        //   i=2: gain 1/2, loss 1/2 => RS 1 => RSI 50
        //   i=3: gain 2/2, loss 1/2 => RS 2 => RSI 100 - 100/3
        let out = rsi(&[1.0, 2.0, 1.0, 3.0], 2);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!((out[2].unwrap() - 50.0).abs() < 1e-12);
        assert!((out[3].unwrap() - (100.0 - 100.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn rsi_range_check() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let out = rsi(&closes, 14);
        for v in out.iter().flatten() {
            assert!((0.0..=100.0).contains(v), "RSI {v} out of range");
        }
    }
}
