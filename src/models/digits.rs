use crate::error::EncodeError;
use std::fmt;
use std::str::FromStr;

/// Number of bars (and digits) in every symbol
pub const DIGIT_COUNT: usize = 23;

/// Positions of the reference bars, in the order they are reported: first, last, middle
pub const REFERENCE_POSITIONS: [usize; 3] = [0, 22, 11];

/// Values the reference bars must carry, paired with [`REFERENCE_POSITIONS`]
pub const REFERENCE_VALUES: [u8; 3] = [1, 1, 9];

/// A validated 23-digit payload.
///
/// Every value is in `0..=9` and the reference positions hold `1, 1, 9`.
/// The only ways to obtain one are parsing ([`FromStr`]), [`TryFrom`] on a
/// digit array, or a successful decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitString {
    digits: [u8; DIGIT_COUNT],
}

impl DigitString {
    /// Digits as numeric values (not ASCII)
    pub fn digits(&self) -> &[u8; DIGIT_COUNT] {
        &self.digits
    }

    /// Digit at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<u8> {
        self.digits.get(index).copied()
    }

    /// Reference digits in reporting order (positions 0, 22, 11)
    pub fn reference_digits(&self) -> [u8; 3] {
        reference_digits_of(&self.digits)
    }

    /// Consume into the raw digit array
    pub fn into_inner(self) -> [u8; DIGIT_COUNT] {
        self.digits
    }
}

pub(crate) fn reference_digits_of(digits: &[u8; DIGIT_COUNT]) -> [u8; 3] {
    REFERENCE_POSITIONS.map(|pos| digits[pos])
}

impl TryFrom<[u8; DIGIT_COUNT]> for DigitString {
    type Error = EncodeError;

    fn try_from(digits: [u8; DIGIT_COUNT]) -> Result<Self, Self::Error> {
        if let Some(position) = digits.iter().position(|&d| d > 9) {
            // numeric values past 9 have no symbol of their own
            return Err(EncodeError::InvalidAlphabet {
                position,
                found: char::REPLACEMENT_CHARACTER,
            });
        }
        let found = reference_digits_of(&digits);
        if found != REFERENCE_VALUES {
            return Err(EncodeError::InvalidReferenceBars { found });
        }
        Ok(Self { digits })
    }
}

impl FromStr for DigitString {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.chars().count();
        if length != DIGIT_COUNT {
            return Err(EncodeError::InvalidLength { found: length });
        }

        let mut digits = [0u8; DIGIT_COUNT];
        for (position, ch) in s.chars().enumerate() {
            match ch.to_digit(10) {
                Some(d) => digits[position] = d as u8,
                None => return Err(EncodeError::InvalidAlphabet { position, found: ch }),
            }
        }

        Self::try_from(digits)
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.digits {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for DigitString {
    fn as_ref(&self) -> &[u8] {
        &self.digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "10123456789987654321101";

    #[test]
    fn test_parse_and_display() {
        let digits: DigitString = SCENARIO.parse().unwrap();
        assert_eq!(digits.to_string(), SCENARIO);
        assert_eq!(digits.get(11), Some(9));
        assert_eq!(digits.get(23), None);
        assert_eq!(digits.reference_digits(), [1, 1, 9]);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(
            "1012345678998765432110".parse::<DigitString>(),
            Err(EncodeError::InvalidLength { found: 22 })
        );
        assert_eq!(
            "101234567899876543211011".parse::<DigitString>(),
            Err(EncodeError::InvalidLength { found: 24 })
        );
        assert_eq!(
            "".parse::<DigitString>(),
            Err(EncodeError::InvalidLength { found: 0 })
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 22 ASCII digits plus one two-byte character: still 23 symbols
        let input = "1012345678998765432110é";
        assert_eq!(
            input.parse::<DigitString>(),
            Err(EncodeError::InvalidAlphabet {
                position: 22,
                found: 'é'
            })
        );
    }

    #[test]
    fn test_rejects_non_digit() {
        assert_eq!(
            "10123a56789987654321101".parse::<DigitString>(),
            Err(EncodeError::InvalidAlphabet {
                position: 5,
                found: 'a'
            })
        );
    }

    #[test]
    fn test_rejects_bad_reference_bars() {
        for (input, found) in [
            ("20123456789987654321101", [2, 1, 9]),
            ("10123456789987654321102", [1, 2, 9]),
            ("10123456789887654321101", [1, 1, 8]),
        ] {
            assert_eq!(
                input.parse::<DigitString>(),
                Err(EncodeError::InvalidReferenceBars { found })
            );
        }
    }

    #[test]
    fn test_try_from_array() {
        let mut raw = [0u8; DIGIT_COUNT];
        raw[0] = 1;
        raw[22] = 1;
        raw[11] = 9;
        let digits = DigitString::try_from(raw).unwrap();
        assert_eq!(digits.into_inner(), raw);

        raw[3] = 10;
        assert!(matches!(
            DigitString::try_from(raw),
            Err(EncodeError::InvalidAlphabet { position: 3, .. })
        ));
    }
}
