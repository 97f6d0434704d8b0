use crate::error::*;

/// Relaxation is configurable.
/// These are all the parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SorParameters {
    /// Relaxation factor, over-relaxation for values in (1, 2).
    pub omega: f64,

    /// Stop once the mean absolute correction per cell is at or below this.
    pub tolerance: f64,

    /// Workers for the threaded strategies.
    pub threads: usize,

    /// Tile side for the cache-blocked strategies.
    /// The interior dimension has to be a multiple of it.
    pub block_size: usize,

    /// Range the initial values were drawn from.
    /// The probe cell leaving `10 * (max - min)` counts as divergence.
    pub value_range: (f64, f64),
}

impl std::default::Default for SorParameters {
    fn default() -> Self {
        SorParameters {
            omega: 1.58,
            tolerance: 1.0e-5,
            threads: 4,
            block_size: 8,
            value_range: (0.0, 10.0),
        }
    }
}

impl SorParameters {
    pub fn validate(&self) -> Result<()> {
        if !self.omega.is_finite() {
            return Err(invalid(
                "omega",
                format!("{} is not finite", self.omega),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(invalid(
                "tolerance",
                format!("{} is not a positive number", self.tolerance),
            ));
        }
        if self.threads == 0 {
            return Err(invalid(
                "threads",
                "need at least one worker".to_owned(),
            ));
        }
        if self.block_size == 0 {
            return Err(invalid("block_size", "must be at least 1".to_owned()));
        }
        let (min, max) = self.value_range;
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(invalid(
                "value_range",
                format!("({min}, {max}) is not an ordered finite range"),
            ));
        }
        Ok(())
    }

    /// Probe cell magnitude above which a solve is abandoned.
    pub fn divergence_limit(&self) -> f64 {
        let (min, max) = self.value_range;
        10.0 * (max - min)
    }
}

fn invalid(name: &'static str, reason: String) -> SorError {
    SorError::InvalidParameter { name, reason }
}
