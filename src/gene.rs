use rand::Rng;
use std::fmt;
use thiserror::Error;

/// Errors raised when a gene is constructed with nonsensical bounds.
/// All gene shapes are compile-time constants, so these only ever fire
/// at startup.
#[derive(Debug, Error, PartialEq)]
pub enum GeneError {
    #[error("gene `{name}`: minimum {min} must be less than maximum {max}")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("gene `{name}`: needs at least 2 steps, got {steps}")]
    InvalidStepCount { name: &'static str, steps: u32 },
}

/// A bounded, discretized, wrapping scalar control.
///
/// A gene with minimum 0, maximum 10 and 6 steps can take the values
/// 0, 2, 4, 6, 8, 10. Only the discrete index is mutable; the name and
/// bounds are fixed at construction.
#[derive(Debug, Clone)]
pub struct Gene {
    name: &'static str,
    min: f64,
    max: f64,
    steps: u32,
    step_size: f64,
    index: u32,
}

impl Gene {
    pub fn new(name: &'static str, min: f64, max: f64, steps: u32) -> Result<Self, GeneError> {
        if min >= max {
            return Err(GeneError::InvalidRange { name, min, max });
        }
        if steps <= 1 {
            return Err(GeneError::InvalidStepCount { name, steps });
        }

        Ok(Self {
            name,
            min,
            max,
            steps,
            step_size: (max - min) / (steps - 1) as f64,
            index: 0,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Continuous value at the current index, always within [min, max].
    pub fn value(&self) -> f64 {
        self.min + self.index as f64 * self.step_size
    }

    /// Draw a uniformly random index. The draw is clamped to the valid
    /// range [0, steps-1]; see DESIGN.md for the boundary decision.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.index = rng.gen_range(0..self.steps);
    }

    /// Step the index up, wrapping past the last step back to 0.
    pub fn increment(&mut self) {
        if self.index < self.steps - 1 {
            self.index += 1;
        } else {
            self.index = 0;
        }
    }

    /// Step the index down, wrapping below 0 to the last step.
    pub fn decrement(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        } else {
            self.index = self.steps - 1;
        }
    }

    /// Copy the discrete index from another gene of the same shape.
    /// Bounds are not re-checked; callers only pair genes built from the
    /// same constants.
    pub fn copy_index_from(&mut self, other: &Gene) {
        self.index = other.index;
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:6.3}", self.name, self.value())
    }
}
