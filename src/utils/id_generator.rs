//! Numeric short id generation.
//!
//! Ids are drawn at random from a fixed-width decimal range (5 digits by default,
//! `10000..=99999`). A candidate is accepted once the supplied existence check
//! reports it unused. Each width gets a bounded number of draws; when they are
//! all taken the range grows by one digit, so generation always terminates.

use rand::Rng;
use std::future::Future;

use crate::error::AppError;

/// Largest width whose range still fits in an `i64`.
const MAX_SUPPORTED_DIGITS: u32 = 18;

/// Shape of the id namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSpace {
    /// Width of the first range tried.
    pub min_digits: u32,
    /// Widest range tried before giving up.
    pub max_digits: u32,
    /// Random draws per width before widening.
    pub attempts_per_width: usize,
}

impl Default for IdSpace {
    fn default() -> Self {
        Self {
            min_digits: 5,
            max_digits: 12,
            attempts_per_width: 8,
        }
    }
}

impl IdSpace {
    /// Checks that the widths are usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.min_digits == 0 {
            return Err("min_digits must be at least 1".to_string());
        }
        if self.max_digits < self.min_digits {
            return Err(format!(
                "max_digits ({}) must be >= min_digits ({})",
                self.max_digits, self.min_digits
            ));
        }
        if self.max_digits > MAX_SUPPORTED_DIGITS {
            return Err(format!(
                "max_digits must be at most {MAX_SUPPORTED_DIGITS}, got {}",
                self.max_digits
            ));
        }
        if self.attempts_per_width == 0 {
            return Err("attempts_per_width must be at least 1".to_string());
        }
        Ok(())
    }

    /// Inclusive bounds of the range for ids of `digits` width.
    ///
    /// One-digit ids start at 0; wider ones have no leading zero.
    pub fn bounds(digits: u32) -> (i64, i64) {
        let upper = 10_i64.pow(digits) - 1;
        let lower = if digits == 1 { 0 } else { 10_i64.pow(digits - 1) };
        (lower, upper)
    }

    /// Upper bound on the number of existence checks for one `generate` call.
    pub fn max_attempts(&self) -> usize {
        (self.max_digits - self.min_digits + 1) as usize * self.attempts_per_width
    }
}

/// Random short id generator with bounded collision retry.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    space: IdSpace,
}

impl IdGenerator {
    pub fn new(space: IdSpace) -> Self {
        Self { space }
    }

    pub fn space(&self) -> IdSpace {
        self.space
    }

    /// Draws one candidate of the given width.
    pub fn candidate(digits: u32) -> i64 {
        let (lower, upper) = IdSpace::bounds(digits);
        rand::rng().random_range(lower..=upper)
    }

    /// Generates an id for which `exists` returns `false`.
    ///
    /// `exists` is called once per candidate, typically backed by
    /// [`crate::domain::repositories::MappingRepository::exists_by_short_id`].
    /// The returned id is only free at the time of the check; the store's unique
    /// constraint still decides the race against concurrent creators.
    ///
    /// # Errors
    ///
    /// Propagates errors from `exists`. Returns [`AppError::IdSpaceExhausted`] once
    /// every width up to `max_digits` has used its attempts.
    pub async fn generate<F, Fut>(&self, mut exists: F) -> Result<i64, AppError>
    where
        F: FnMut(i64) -> Fut,
        Fut: Future<Output = Result<bool, AppError>>,
    {
        for digits in self.space.min_digits..=self.space.max_digits {
            for _ in 0..self.space.attempts_per_width {
                let candidate = Self::candidate(digits);

                if !exists(candidate).await? {
                    return Ok(candidate);
                }

                tracing::debug!(candidate, digits, "Short id collision");
            }

            if digits < self.space.max_digits {
                tracing::warn!(
                    digits,
                    attempts = self.space.attempts_per_width,
                    "Short id space saturated, widening by one digit"
                );
            }
        }

        Err(AppError::IdSpaceExhausted {
            attempts: self.space.max_attempts(),
        })
    }
}
