/// Trailing arithmetic mean over `window` samples.
///
/// The result is aligned with `values`: index `i` holds the mean of
/// `values[i + 1 - window..=i]`, or `None` while the window is still filling or
/// when any sample inside it is `NaN`. `window` must be non-zero.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    for (i, slice) in values.windows(window).enumerate() {
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[i + window - 1] = Some(slice.iter().sum::<f64>() / window as f64);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_after_warmup() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(out, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
    }

    #[test]
    fn short_input_is_all_none() {
        assert_eq!(rolling_mean(&[1.0, 2.0], 3), vec![None, None]);
    }

    #[test]
    fn nan_poisons_only_windows_containing_it() {
        let out = rolling_mean(&[1.0, f64::NAN, 3.0, 5.0, 7.0], 2);
        assert_eq!(out, vec![None, None, None, Some(4.0), Some(6.0)]);
    }

    #[test]
    fn window_of_one_is_identity() {
        assert_eq!(
            rolling_mean(&[4.0, 8.0], 1),
            vec![Some(4.0), Some(8.0)]
        );
    }
}
