//! Centralized validation of matching configuration.
//!
//! Out-of-range values are rejected at call time, never clamped.

/// Configuration error raised before any matching work is done
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid threshold {0}: must be within [0, 1]")]
    InvalidThreshold(f64),
    #[error("Invalid max results: must be at least 1")]
    InvalidMaxResults,
    #[error("Invalid weight {name}={value}: must be finite and non-negative")]
    InvalidWeight { name: &'static str, value: f64 },
}

/// Validate a similarity threshold.
///
/// # Examples
///
/// ```
/// use skin_solver::utils::validation::validate_threshold;
///
/// assert!(validate_threshold(0.4).is_ok());
/// assert!(validate_threshold(1.0).is_ok());
/// assert!(validate_threshold(1.2).is_err());
/// assert!(validate_threshold(f64::NAN).is_err());
/// ```
///
/// # Errors
///
/// Returns `ConfigError::InvalidThreshold` if the value is NaN or outside [0, 1].
pub fn validate_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

/// Validate the number of results requested.
///
/// # Errors
///
/// Returns `ConfigError::InvalidMaxResults` if `max_results` is 0.
pub fn validate_max_results(max_results: usize) -> Result<usize, ConfigError> {
    if max_results == 0 {
        Err(ConfigError::InvalidMaxResults)
    } else {
        Ok(max_results)
    }
}

/// Validate a tunable scoring weight.
///
/// # Errors
///
/// Returns `ConfigError::InvalidWeight` if the value is negative, NaN or infinite.
pub fn validate_weight(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidWeight { name, value })
    }
}
