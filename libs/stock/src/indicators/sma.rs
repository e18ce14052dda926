use crate::error::Result;
use crate::series::{Column, PriceSeries};

use super::{IndicatorSeries, rolling::rolling_mean, working_column};

/// Simple moving average of `column` over a trailing `window`.
///
/// The first `window - 1` bars have no value and are left out, so a series of
/// `n >= window` bars yields `n - window + 1` points.
pub fn simple_moving_average(
    series: &PriceSeries,
    window: usize,
    column: Column,
) -> Result<IndicatorSeries> {
    let values = working_column(series, window, column)?;
    let means = rolling_mean(&values, window);
    Ok(IndicatorSeries::from_aligned(&series.dates(), &means))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::indicators::tests::series_from;

    #[test]
    fn two_bar_example() {
        let series = series_from(&[90.0, 100.0]);
        let sma = simple_moving_average(&series, 2, Column::Close).unwrap();

        assert_eq!(sma.len(), 1);
        assert_eq!(sma.points()[0].date, series.bars()[1].date);
        assert!((sma.points()[0].value - 95.0).abs() < 1e-12);
    }

    #[test]
    fn point_count_and_values_match_slices() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let series = series_from(&closes);

        for window in [1, 3, 10, 40] {
            let sma = simple_moving_average(&series, window, Column::Close).unwrap();
            assert_eq!(sma.len(), closes.len() - window + 1);

            for (k, point) in sma.points().iter().enumerate() {
                let slice = &closes[k..k + window];
                let expected = slice.iter().sum::<f64>() / window as f64;
                assert!((point.value - expected).abs() < 1e-9);
                assert_eq!(point.date, series.bars()[k + window - 1].date);
            }
        }
    }

    #[test]
    fn window_longer_than_series_is_empty() {
        let series = series_from(&[1.0, 2.0]);
        let sma = simple_moving_average(&series, 5, Column::Close).unwrap();
        assert!(sma.is_empty());
    }

    #[test]
    fn zero_window_is_rejected() {
        let series = series_from(&[1.0, 2.0]);
        assert!(matches!(
            simple_moving_average(&series, 0, Column::Close),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(
            simple_moving_average(&PriceSeries::default(), 3, Column::Close),
            Err(Error::EmptySeries)
        ));
    }

    #[test]
    fn nan_close_drops_covering_points() {
        let series = series_from(&[1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0]);
        let sma = simple_moving_average(&series, 2, Column::Close).unwrap();
        assert_eq!(sma.values(), vec![1.5, 4.5, 5.5]);
        assert_eq!(sma.points()[1].date, series.bars()[4].date);
    }

    #[test]
    fn input_series_is_untouched() {
        let series = series_from(&[3.0, 1.0, 2.0]);
        let before = series.clone();
        let _ = simple_moving_average(&series, 2, Column::Close).unwrap();
        assert_eq!(series, before);
    }
}
