use crate::error::Result;
use crate::series::{Column, PriceSeries};

use super::{IndicatorSeries, rolling::rolling_mean, working_column};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Relative Strength Index of `column` over `window` bars.
///
/// Average gain and average loss are plain rolling means of the per-bar gains
/// and losses, not Wilder's exponential smoothing:
///
/// ```text
/// delta[i] = value[i] - value[i - 1]
/// gain[i]  = max(delta[i], 0)        loss[i] = max(-delta[i], 0)
/// rs[i]    = mean(gain, window) / mean(loss, window)
/// rsi[i]   = 100 - 100 / (1 + rs[i])
/// ```
///
/// The first delta needs a previous bar, so the earliest point is at index
/// `window`. A window with gains and no losses saturates at 100. A window with
/// neither (flat prices) has no defined RSI and is left out, as is any window
/// touching a `NaN` value.
pub fn relative_strength_index(
    series: &PriceSeries,
    window: usize,
    column: Column,
) -> Result<IndicatorSeries> {
    let values = working_column(series, window, column)?;

    let mut gains = Vec::with_capacity(values.len());
    let mut losses = Vec::with_capacity(values.len());
    gains.push(f64::NAN);
    losses.push(f64::NAN);
    for pair in values.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(if delta.is_nan() { f64::NAN } else { delta.max(0.0) });
        losses.push(if delta.is_nan() { f64::NAN } else { (-delta).max(0.0) });
    }

    let avg_gain = rolling_mean(&gains, window);
    let avg_loss = rolling_mean(&losses, window);

    let rsi: Vec<Option<f64>> = avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(gain, loss)| match (gain, loss) {
            (Some(gain), Some(loss)) => rsi_from_averages(*gain, *loss),
            _ => None,
        })
        .collect();

    Ok(IndicatorSeries::from_aligned(&series.dates(), &rsi))
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return (avg_gain > 0.0).then_some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::indicators::tests::series_from;

    #[test]
    fn rising_prices_saturate_at_100() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let rsi = relative_strength_index(&series_from(&closes), 14, Column::Close).unwrap();

        assert_eq!(rsi.len(), closes.len() - 14);
        for v in rsi.values() {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn falling_prices_sit_at_0() {
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let rsi = relative_strength_index(&series_from(&closes), 14, Column::Close).unwrap();

        assert!(!rsi.is_empty());
        for v in rsi.values() {
            assert!(v.abs() < 1e-10, "expected 0.0, got {v}");
        }
    }

    #[test]
    fn flat_prices_have_no_points() {
        let rsi = relative_strength_index(&series_from(&[100.0; 30]), 14, Column::Close).unwrap();
        assert!(rsi.is_empty());
    }

    #[test]
    fn flat_run_is_dropped_but_surroundings_kept() {
        let closes = [1.0, 2.0, 2.0, 2.0, 2.0, 3.0];
        let series = series_from(&closes);
        let rsi = relative_strength_index(&series, 2, Column::Close).unwrap();

        let dates: Vec<_> = rsi.points().iter().map(|p| p.date).collect();
        let bars = series.bars();
        assert_eq!(dates, vec![bars[2].date, bars[5].date]);
        assert_eq!(rsi.values(), vec![100.0, 100.0]);
    }

    #[test]
    fn matches_hand_computed_values() {
        // deltas: +2, -1, +3, -2
        let series = series_from(&[10.0, 12.0, 11.0, 14.0, 12.0]);
        let rsi = relative_strength_index(&series, 2, Column::Close).unwrap();

        // gains/losses over each window of two deltas
        let expected = [
            100.0 - 100.0 / (1.0 + (2.0 / 2.0) / (1.0 / 2.0)),
            100.0 - 100.0 / (1.0 + (3.0 / 2.0) / (1.0 / 2.0)),
            100.0 - 100.0 / (1.0 + (3.0 / 2.0) / (2.0 / 2.0)),
        ];
        let got = rsi.values();
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-10, "expected {e}, got {g}");
        }
    }

    #[test]
    fn values_stay_in_range() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let rsi = relative_strength_index(&series_from(&closes), 14, Column::Close).unwrap();
        assert_eq!(rsi.len(), closes.len() - 14);
        for v in rsi.values() {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn nan_value_drops_windows_touching_it() {
        let closes = [1.0, 2.0, 3.0, f64::NAN, 5.0, 6.0, 7.0];
        let rsi = relative_strength_index(&series_from(&closes), 2, Column::Close).unwrap();
        // deltas at 3 and 4 are undefined; windows ending at 2 and 6 survive
        assert_eq!(rsi.len(), 2);
    }

    #[test]
    fn rejects_bad_input() {
        let series = series_from(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            relative_strength_index(&series, 0, Column::Close),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            relative_strength_index(&PriceSeries::default(), 14, Column::Close),
            Err(Error::EmptySeries)
        ));
    }

    #[test]
    fn short_series_yields_nothing() {
        let rsi = relative_strength_index(&series_from(&[1.0, 2.0, 3.0]), 14, Column::Close).unwrap();
        assert!(rsi.is_empty());
    }
}
