/// Squared-error measures between a prediction and its expected output.
pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Gradient of ½·Σ(predicted - expected)² per output: predicted - expected
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect()
    }

    /// Largest per-output absolute error. NaN if any output is NaN.
    pub fn max_abs_error(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, |acc, e| if acc.is_nan() || e.is_nan() { f64::NAN } else { acc.max(e) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn loss_and_gradient() {
        let predicted = [0.5, 1.0];
        let expected = [1.0, 0.0];
        assert_relative_eq!(MseLoss::loss(&predicted, &expected), (0.25 + 1.0) / 2.0);
        assert_eq!(MseLoss::derivative(&predicted, &expected), vec![-0.5, 1.0]);
        assert_relative_eq!(MseLoss::max_abs_error(&predicted, &expected), 1.0);
    }

    #[test]
    fn nan_output_is_never_within_any_error() {
        let err = MseLoss::max_abs_error(&[0.5, f64::NAN], &[0.5, 1.0]);
        assert!(err.is_nan());
        assert!(MseLoss::max_abs_error(&[f64::NAN, 0.5], &[1.0, 0.5]).is_nan());
        assert_eq!(MseLoss::max_abs_error(&[f64::INFINITY], &[1.0]), f64::INFINITY);
    }

    #[test]
    fn empty_output_has_no_loss() {
        assert_eq!(MseLoss::loss(&[], &[]), 0.0);
    }
}
