//! Gaussian belief in canonical (precision) form
//!
//! Products and quotients of Gaussians are exact in this form: precisions
//! and precision-adjusted means simply add or subtract.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Div, Mul};

/// Normal distribution over one scalar, stored as precision `pi = 1/σ²`
/// and precision-adjusted mean `tau = μ·pi`.
///
/// `pi == 0` is the "no information" belief every variable starts from.
/// Quotients may go to `pi <= 0` transiently inside factor updates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gaussian {
    pi: f64,
    tau: f64,
}

impl Gaussian {
    /// The uniform (no information) belief
    pub const UNIFORM: Gaussian = Gaussian { pi: 0.0, tau: 0.0 };

    pub fn from_mean_std_dev(mean: f64, std_dev: f64) -> Self {
        let pi = 1.0 / (std_dev * std_dev);
        Self { pi, tau: pi * mean }
    }

    pub fn from_precision(pi: f64, tau: f64) -> Self {
        Self { pi, tau }
    }

    pub fn precision(&self) -> f64 {
        self.pi
    }

    pub fn precision_mean(&self) -> f64 {
        self.tau
    }

    /// Mean; zero for the uniform belief
    pub fn mean(&self) -> f64 {
        if self.pi == 0.0 {
            0.0
        } else {
            self.tau / self.pi
        }
    }

    /// Variance; infinite unless the precision is positive
    pub fn variance(&self) -> f64 {
        if self.pi > 0.0 {
            1.0 / self.pi
        } else {
            f64::INFINITY
        }
    }

    /// Standard deviation; infinite unless the precision is positive
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn is_uniform(&self) -> bool {
        self.pi == 0.0
    }

    /// How far `other` has moved from `self`: absolute mean change plus
    /// absolute standard deviation change.
    pub fn delta(&self, other: &Gaussian) -> f64 {
        if self.pi <= 0.0 || other.pi <= 0.0 {
            return if self.pi == other.pi && self.tau == other.tau {
                0.0
            } else {
                f64::INFINITY
            };
        }

        (self.mean() - other.mean()).abs() + (self.std_dev() - other.std_dev()).abs()
    }

    /// Log of the normalizer of `left * right`, i.e. the log density of
    /// the mean difference under the summed variance. Zero if either side
    /// carries no information.
    pub fn log_product_normalization(left: &Gaussian, right: &Gaussian) -> f64 {
        if left.pi == 0.0 || right.pi == 0.0 {
            return 0.0;
        }

        let variance_sum = left.variance() + right.variance();
        let mean_difference = left.mean() - right.mean();
        -(2.0 * PI).sqrt().ln()
            - variance_sum.ln() / 2.0
            - mean_difference * mean_difference / (2.0 * variance_sum)
    }

    /// Log of the normalizer of `numerator / denominator`. Zero if either
    /// side carries no information, or if the quotient itself is uniform
    /// (both sides share a precision).
    pub fn log_ratio_normalization(numerator: &Gaussian, denominator: &Gaussian) -> f64 {
        if numerator.pi == 0.0 || denominator.pi == 0.0 || numerator.pi == denominator.pi {
            return 0.0;
        }

        let variance_difference = denominator.variance() - numerator.variance();
        let mean_difference = numerator.mean() - denominator.mean();
        denominator.variance().ln() + (2.0 * PI).sqrt().ln()
            - variance_difference.ln() / 2.0
            + mean_difference * mean_difference / (2.0 * variance_difference)
    }
}

impl Mul for Gaussian {
    type Output = Gaussian;

    fn mul(self, rhs: Gaussian) -> Gaussian {
        Gaussian {
            pi: self.pi + rhs.pi,
            tau: self.tau + rhs.tau,
        }
    }
}

impl Div for Gaussian {
    type Output = Gaussian;

    fn div(self, rhs: Gaussian) -> Gaussian {
        Gaussian {
            pi: self.pi - rhs.pi,
            tau: self.tau - rhs.tau,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_std_dev_round_trip() {
        let g = Gaussian::from_mean_std_dev(25.0, 25.0 / 3.0);
        assert_relative_eq!(g.mean(), 25.0, epsilon = 1e-12);
        assert_relative_eq!(g.std_dev(), 25.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(g.precision(), 9.0 / 625.0, epsilon = 1e-15);
    }

    #[test]
    fn test_uniform() {
        let g = Gaussian::UNIFORM;
        assert!(g.is_uniform());
        assert_eq!(g.mean(), 0.0);
        assert_eq!(g.std_dev(), f64::INFINITY);
        assert_eq!(g, Gaussian::default());
    }

    #[test]
    fn test_multiply() {
        // Product of N(1, 1) and N(3, 1) is N(2, 1/2)
        let a = Gaussian::from_mean_std_dev(1.0, 1.0);
        let b = Gaussian::from_mean_std_dev(3.0, 1.0);
        let product = a * b;
        assert_relative_eq!(product.mean(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(product.variance(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_divide_undoes_multiply() {
        let a = Gaussian::from_mean_std_dev(10.0, 2.0);
        let b = Gaussian::from_mean_std_dev(-4.0, 5.0);
        let back = (a * b) / b;
        assert_relative_eq!(back.mean(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(back.std_dev(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_divide_may_go_negative() {
        let wide = Gaussian::from_mean_std_dev(0.0, 4.0);
        let narrow = Gaussian::from_mean_std_dev(0.0, 1.0);
        let quotient = wide / narrow;
        assert!(quotient.precision() < 0.0);
        assert_eq!(quotient.std_dev(), f64::INFINITY);
    }

    #[test]
    fn test_delta() {
        let a = Gaussian::from_mean_std_dev(1.0, 2.0);
        let b = Gaussian::from_mean_std_dev(1.5, 1.75);
        assert_relative_eq!(a.delta(&b), 0.75, epsilon = 1e-12);
        assert_eq!(a.delta(&a), 0.0);
        assert_eq!(Gaussian::UNIFORM.delta(&a), f64::INFINITY);
        assert_eq!(Gaussian::UNIFORM.delta(&Gaussian::UNIFORM), 0.0);
    }

    #[test]
    fn test_log_product_normalization() {
        // Density of N(0, 2) at 0
        let a = Gaussian::from_mean_std_dev(0.0, 1.0);
        let expected = -(2.0 * PI * 2.0).sqrt().ln();
        assert_relative_eq!(
            Gaussian::log_product_normalization(&a, &a),
            expected,
            epsilon = 1e-12
        );
        assert_eq!(
            Gaussian::log_product_normalization(&a, &Gaussian::UNIFORM),
            0.0
        );
    }

    #[test]
    fn test_log_ratio_normalization_uniform() {
        let a = Gaussian::from_mean_std_dev(3.0, 1.0);
        assert_eq!(
            Gaussian::log_ratio_normalization(&Gaussian::UNIFORM, &a),
            0.0
        );
    }

    #[test]
    fn test_log_ratio_normalization_of_identical_beliefs() {
        // A marginal made of one message: the quotient carries nothing
        let a = Gaussian::from_mean_std_dev(-75.0, 4.2);
        let ratio = Gaussian::log_ratio_normalization(&a, &a);
        assert_eq!(ratio, 0.0);

        let narrower = Gaussian::from_mean_std_dev(-74.0, 3.0);
        assert!(Gaussian::log_ratio_normalization(&narrower, &a).is_finite());
    }
}
