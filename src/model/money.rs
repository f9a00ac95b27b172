use rust_decimal::Decimal;
use std::fmt;

/// Display wrapper for amounts in reais: `R$ 45.90`.
///
/// Values are only rounded for display; arithmetic always happens on the raw
/// [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Money(pub Decimal);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.0.round_dp(2))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_display_digits() {
        assert_eq!(Money(Decimal::new(519, 1)).to_string(), "R$ 51.90");
        assert_eq!(Money(Decimal::new(5, 0)).to_string(), "R$ 5.00");
        assert_eq!(Money(Decimal::ZERO).to_string(), "R$ 0.00");
    }
}
