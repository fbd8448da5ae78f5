use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use serde::{Deserialize, Serialize};

/// Currency amount.
///
/// Kept at full precision internally, rounded to cents only when displayed.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Sub,
    derive_more::Sum,
)]
pub struct Money(pub f64);

impl Money {
    pub const ZERO: Self = Self(0.0);

    #[must_use]
    pub fn round_to_cents(self) -> Self {
        Self((self.0 * 100.0).round() / 100.0)
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.round_to_cents().0)
    }
}

impl Debug for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}$", self.0)
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * f64::from(rhs))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_round_to_cents() {
        assert_abs_diff_eq!(Money(10.005_1).round_to_cents().0, 10.01);
        assert_abs_diff_eq!(Money(99.994).round_to_cents().0, 99.99);
    }

    #[test]
    fn test_display_rounds_only_for_output() {
        let price = Money(33.333_333) * 3;
        assert_eq!(price.to_string(), "$100.00");
        assert_abs_diff_eq!(price.0, 99.999_999, epsilon = 1e-9);
    }
}
