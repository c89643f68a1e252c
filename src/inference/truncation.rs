//! Correction functions for truncated Gaussians
//!
//! Observing "A beat B" or "A drew with B" restricts the performance
//! difference to a half-line or an interval. The first two moments of the
//! truncated Gaussian follow from the additive correction `v` and the
//! multiplicative correction `w`, both functions of the normalized mean
//! difference `t` and normalized draw margin `e`.

use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{PI, SQRT_2};

/// Largest multiplicative correction handed back; keeps `1 - w` positive
pub const MAX_W: f64 = 1.0 - f64::EPSILON;

/// Standard normal cumulative distribution function
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal density
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal quantile function
pub fn inverse_normal_cdf(p: f64) -> f64 {
    -SQRT_2 * erfc_inv(2.0 * p)
}

/// Mean shift for a decisive outcome (difference > margin)
pub fn v_win(t: f64, e: f64) -> f64 {
    let x = t - e;
    let denom = normal_cdf(x);
    if denom > 0.0 {
        normal_pdf(x) / denom
    } else {
        -x
    }
}

/// Variance scaling for a decisive outcome, in [0, 1)
pub fn w_win(t: f64, e: f64) -> f64 {
    let x = t - e;
    if normal_cdf(x) == 0.0 {
        return MAX_W;
    }

    let v = v_win(t, e);
    (v * (v + x)).clamp(0.0, MAX_W)
}

/// Mean shift for a draw (|difference| <= margin)
pub fn v_draw(t: f64, e: f64) -> f64 {
    let abs_t = t.abs();
    let a = e - abs_t;
    let b = -e - abs_t;
    let denom = normal_cdf(a) - normal_cdf(b);

    let v = if denom > 0.0 {
        (normal_pdf(b) - normal_pdf(a)) / denom
    } else {
        a
    };

    if t < 0.0 {
        -v
    } else {
        v
    }
}

/// Variance scaling for a draw, in [0, 1)
pub fn w_draw(t: f64, e: f64) -> f64 {
    let abs_t = t.abs();
    let a = e - abs_t;
    let b = -e - abs_t;
    let denom = normal_cdf(a) - normal_cdf(b);
    if denom <= 0.0 {
        return MAX_W;
    }

    let v = v_draw(abs_t, e);
    (v * v + (a * normal_pdf(a) - b * normal_pdf(b)) / denom).clamp(0.0, MAX_W)
}
