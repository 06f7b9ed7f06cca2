//!
//! The contract constructor arguments.
//!

use web3::ethabi::Token;
use web3::types::U256;

use crate::error::Error;

///
/// The contract constructor arguments.
///
/// Each rate is a fixed-point integer in the token smallest unit, kept as the
/// exact decimal string it has been configured with.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorArguments {
    /// The monthly subscription rate.
    pub monthly: &'static str,
    /// The quarterly subscription rate.
    pub quarterly: &'static str,
    /// The yearly subscription rate.
    pub yearly: &'static str,
}

impl ConstructorArguments {
    /// The bundled subscription rates.
    pub const AGROP: Self = Self {
        monthly: "5000000000000000",
        quarterly: "14250000000000000",
        yearly: "58200000000000000",
    };

    /// The number of decimals of the fixed-point representation.
    pub const DECIMALS: usize = 18;

    ///
    /// Returns the arguments in constructor order.
    ///
    pub fn ordered(&self) -> [(&'static str, &'static str); 3] {
        [
            ("monthly", self.monthly),
            ("quarterly", self.quarterly),
            ("yearly", self.yearly),
        ]
    }

    ///
    /// Returns the decimal strings in constructor order.
    ///
    pub fn values(&self) -> Vec<String> {
        self.ordered()
            .into_iter()
            .map(|(_, value)| value.to_owned())
            .collect()
    }

    ///
    /// Converts the arguments into ABI `uint256` tokens, in constructor order.
    ///
    pub fn tokens(&self) -> Result<Vec<Token>, Error> {
        self.ordered()
            .into_iter()
            .map(|(name, value)| Self::parse(name, value).map(Token::Uint))
            .collect()
    }

    ///
    /// Checks that every argument is an exact non-negative `uint256`.
    ///
    pub fn validate(&self) -> Result<(), Error> {
        self.tokens().map(|_| ())
    }

    ///
    /// Renders a smallest-unit value as a decimal number of whole units.
    ///
    /// The conversion works on the digits, so it is exact for any length. Anything but
    /// decimal digits is rendered as is.
    ///
    pub fn display_units(value: &str, decimals: usize) -> String {
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return value.to_owned();
        }
        let digits = value.trim_start_matches('0');
        let padded = format!("{digits:0>width$}", width = decimals + 1);
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_owned()
        } else {
            format!("{whole}.{fraction}")
        }
    }

    ///
    /// Parses a single argument without any scaling.
    ///
    fn parse(name: &str, value: &str) -> Result<U256, Error> {
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(Error::submission(format!(
                "constructor argument `{name}` = `{value}` is not a non-negative decimal integer"
            )));
        }
        U256::from_dec_str(value).map_err(|error| {
            Error::submission(format!(
                "constructor argument `{name}` = `{value}` does not fit into uint256: {error:?}"
            ))
        })
    }
}

impl Default for ConstructorArguments {
    fn default() -> Self {
        Self::AGROP
    }
}

impl std::fmt::Display for ConstructorArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, (name, value)) in self.ordered().into_iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{name} = {} ({value})",
                Self::display_units(value, Self::DECIMALS)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use web3::ethabi::Token;
    use web3::types::U256;

    use crate::error::Error;

    use super::ConstructorArguments;

    #[test]
    fn tokens_keep_order_and_value() {
        let tokens = ConstructorArguments::AGROP
            .tokens()
            .expect("Bundled arguments must be valid");

        assert_eq!(
            tokens,
            vec![
                Token::Uint(U256::from(5_000_000_000_000_000u64)),
                Token::Uint(U256::from(14_250_000_000_000_000u64)),
                Token::Uint(U256::from(58_200_000_000_000_000u64)),
            ]
        );
    }

    #[test]
    fn values_in_order() {
        assert_eq!(
            ConstructorArguments::AGROP.values(),
            vec![
                "5000000000000000".to_owned(),
                "14250000000000000".to_owned(),
                "58200000000000000".to_owned(),
            ]
        );
    }

    #[test]
    fn display_units() {
        assert_eq!(ConstructorArguments::display_units("5000000000000000", 18), "0.005");
        assert_eq!(ConstructorArguments::display_units("14250000000000000", 18), "0.01425");
        assert_eq!(ConstructorArguments::display_units("58200000000000000", 18), "0.0582");
        assert_eq!(ConstructorArguments::display_units("1000000000000000000", 18), "1");
        assert_eq!(ConstructorArguments::display_units("0", 18), "0");
    }

    #[test]
    fn display_units_not_a_number() {
        assert_eq!(ConstructorArguments::display_units("ü5000", 18), "ü5000");
        assert_eq!(ConstructorArguments::display_units("0.005", 18), "0.005");
        assert_eq!(ConstructorArguments::display_units("", 18), "");
    }

    #[test]
    fn display_invalid_arguments() {
        let arguments = ConstructorArguments {
            monthly: "пять",
            ..ConstructorArguments::AGROP
        };

        assert!(arguments
            .to_string()
            .starts_with("monthly = пять (пять), quarterly = 0.01425"));
    }

    #[test]
    fn display() {
        assert_eq!(
            ConstructorArguments::AGROP.to_string(),
            "monthly = 0.005 (5000000000000000), quarterly = 0.01425 (14250000000000000), yearly = 0.0582 (58200000000000000)"
        );
    }

    #[test]
    fn max_uint256() {
        let arguments = ConstructorArguments {
            monthly: "115792089237316195423570985008687907853269984665640564039457584007913129639935",
            ..ConstructorArguments::AGROP
        };

        assert!(arguments.validate().is_ok());
    }

    #[test]
    fn error_negative() {
        let arguments = ConstructorArguments {
            quarterly: "-1",
            ..ConstructorArguments::AGROP
        };

        assert!(matches!(arguments.validate(), Err(Error::Submission { .. })));
    }

    #[test]
    fn error_scaled() {
        for value in ["0.005", "5e15", "", " 5", "+5"] {
            let arguments = ConstructorArguments {
                yearly: value,
                ..ConstructorArguments::AGROP
            };

            assert!(arguments.validate().is_err(), "`{value}` must be rejected");
        }
    }

    #[test]
    fn error_overflow() {
        let arguments = ConstructorArguments {
            monthly: "115792089237316195423570985008687907853269984665640564039457584007913129639936",
            ..ConstructorArguments::AGROP
        };

        assert!(matches!(arguments.validate(), Err(Error::Submission { .. })));
    }
}
