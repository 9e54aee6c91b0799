use serde::{Serialize, Deserialize};
use std::f64::consts::E;
use std::str::FromStr;

use crate::errors::NetworkError;

/// Slope used when `leaky_relu` is selected by name.
pub const DEFAULT_LEAKY_ALPHA: f64 = 0.01;

/// Scalar nonlinearity bound to a network for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Sigmoid,
    Tanh,
    ReLU,
    LeakyReLU { alpha: f64 },
    Identity,
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Identity => x,
        }
    }

    /// Derivative with respect to the pre-activation `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
            ActivationFunction::Identity => 1.0,
        }
    }
}

impl FromStr for ActivationFunction {
    type Err = NetworkError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(ActivationFunction::Sigmoid),
            "tanh" => Ok(ActivationFunction::Tanh),
            "relu" => Ok(ActivationFunction::ReLU),
            "leaky_relu" | "leakyrelu" => Ok(ActivationFunction::LeakyReLU { alpha: DEFAULT_LEAKY_ALPHA }),
            "identity" | "linear" => Ok(ActivationFunction::Identity),
            other => Err(NetworkError::invalid(format!("unknown activation function `{other}`"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const ALL: [ActivationFunction; 5] = [
        ActivationFunction::Sigmoid,
        ActivationFunction::Tanh,
        ActivationFunction::ReLU,
        ActivationFunction::LeakyReLU { alpha: 0.1 },
        ActivationFunction::Identity,
    ];

    #[test]
    fn sigmoid_values() {
        let f = ActivationFunction::Sigmoid;
        assert_relative_eq!(f.function(0.0), 0.5);
        assert_relative_eq!(f.derivative(0.0), 0.25);
        assert!(f.function(10.0) > 0.9999);
        assert!(f.function(-10.0) < 0.0001);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for f in ALL {
            // stay away from the ReLU kink at 0
            for &x in &[-1.3, -0.4, 0.7, 2.1] {
                let numeric = (f.function(x + h) - f.function(x - h)) / (2.0 * h);
                assert_abs_diff_eq!(f.derivative(x), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn resolves_by_name() {
        assert_eq!("Sigmoid".parse::<ActivationFunction>().unwrap(), ActivationFunction::Sigmoid);
        assert_eq!(
            "leaky_relu".parse::<ActivationFunction>().unwrap(),
            ActivationFunction::LeakyReLU { alpha: DEFAULT_LEAKY_ALPHA }
        );
        assert!(matches!(
            "softplus".parse::<ActivationFunction>(),
            Err(NetworkError::InvalidConfiguration { .. })
        ));
    }
}
