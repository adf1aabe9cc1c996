// =============================================================================
// Normalized Momentum Ratio
// =============================================================================
//
// Dimensionless deviation of price from its trend reference:
//   momentum_i = (close_i - MA_i) / MA_i
//
// Defined only where the moving average is defined and non-zero. A zero MA
// yields `None`, never a division error.
// =============================================================================

/// Compute the momentum ratio for each position, given the close prices and
/// the index-aligned moving average from [`super::sma::moving_average`].
///
/// The output is aligned with `closes`. Element `i` is `None` wherever
/// `ma[i]` is `None` or zero.
pub fn momentum_ratio(closes: &[f64], ma: &[Option<f64>]) -> Vec<Option<f64>> {
    closes
        .iter()
        .zip(ma.iter())
        .map(|(&close, &ma)| match ma {
            Some(m) if m != 0.0 => Some((close - m) / m),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::sma::moving_average;

    #[test]
    fn momentum_undefined_where_ma_undefined() {
        let closes: Vec<f64> = (10..=30).map(|x| x as f64).collect();
        let ma = moving_average(&closes, 5);
        let mom = momentum_ratio(&closes, &ma);

        for v in &mom[..4] {
            assert!(v.is_none());
        }
        for v in &mom[4..] {
            assert!(v.is_some());
        }
    }

    #[test]
    fn momentum_exact_value_at_first_defined_position() {
        // close[4] = 14, ma[4] = 12 => (14 - 12) / 12 = 1/6.
        let closes: Vec<f64> = (10..=30).map(|x| x as f64).collect();
        let ma = moving_average(&closes, 5);
        let mom = momentum_ratio(&closes, &ma);
        assert!((mom[4].unwrap() - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn momentum_none_on_zero_ma() {
        // Symmetric closes around zero give a zero mean at position 1.
        let closes = [1.0, -1.0];
        let ma = moving_average(&closes, 2);
        assert_eq!(ma[1], Some(0.0));

        let mom = momentum_ratio(&closes, &ma);
        assert!(mom[1].is_none());
    }

    #[test]
    fn momentum_matches_formula_everywhere_defined() {
        let closes = [5.0, 7.0, 6.0, 9.0, 8.0, 10.0];
        let ma = moving_average(&closes, 3);
        let mom = momentum_ratio(&closes, &ma);

        for i in 0..closes.len() {
            match (ma[i], mom[i]) {
                (Some(m), Some(v)) => {
                    assert!((v - (closes[i] - m) / m).abs() < 1e-12);
                }
                (None, None) => {}
                other => panic!("misaligned momentum/ma at {i}: {other:?}"),
            }
        }
    }
}
