//! Posterior normalization in linear and log domains.
//!
//! These helpers turn unnormalized tallies (or log tallies) into proper
//! probability vectors. They are used by hd-core's accumulators so that
//! normalization and degenerate-mass handling are centralized.

use super::stable::log_sum_exp;

/// Normalize a vector of log-probabilities into log posteriors.
///
/// Returns a vector of log-probabilities that sum to 1 in probability space.
/// A vector with no mass (all `-inf`) stays all `-inf`.
pub fn normalize_log_probs(logp: &[f64]) -> Vec<f64> {
    if logp.is_empty() {
        return Vec::new();
    }
    if logp.iter().any(|v| v.is_nan()) {
        return vec![f64::NAN; logp.len()];
    }
    let z = log_sum_exp(logp);
    if z.is_nan() {
        return vec![f64::NAN; logp.len()];
    }
    if z == f64::NEG_INFINITY {
        return vec![f64::NEG_INFINITY; logp.len()];
    }
    logp.iter().map(|v| v - z).collect()
}

/// Compute posterior probabilities from normalized log posteriors.
pub fn posterior_probs(log_posterior: &[f64]) -> Vec<f64> {
    if log_posterior.is_empty() {
        return Vec::new();
    }
    if log_posterior.iter().any(|v| v.is_nan()) {
        return vec![f64::NAN; log_posterior.len()];
    }
    log_posterior.iter().map(|v| v.exp()).collect()
}

/// Stable softmax returning probabilities directly from log-probabilities.
///
/// Returns `None` when the vector carries no mass at all, so callers can
/// report a degenerate posterior instead of dividing by zero.
pub fn stable_softmax(logp: &[f64]) -> Option<Vec<f64>> {
    if logp.is_empty() {
        return Some(Vec::new());
    }
    let log_posterior = normalize_log_probs(logp);
    if log_posterior.iter().any(|v| v.is_nan())
        || log_posterior.iter().all(|v| *v == f64::NEG_INFINITY)
    {
        return None;
    }
    Some(posterior_probs(&log_posterior))
}

/// Divide a vector of non-negative masses by its sum.
///
/// Returns `None` when the sum is exactly zero or not finite.
pub fn normalize_probs(mass: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = mass.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    Some(mass.iter().map(|v| v / total).collect())
}
