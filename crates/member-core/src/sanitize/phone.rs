//! Phone number validation and canonicalization

use std::fmt;
use std::str::FromStr;

use phonenumber::{country, Mode, PhoneNumber};

/// Region used to interpret numbers written without a country prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhoneRegion(country::Id);

impl PhoneRegion {
    pub const SINGAPORE: Self = Self(country::Id::SG);

    pub const fn new(id: country::Id) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> country::Id {
        self.0
    }
}

impl Default for PhoneRegion {
    fn default() -> Self {
        Self::SINGAPORE
    }
}

impl fmt::Display for PhoneRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Region ids are named after their ISO 3166-1 alpha-2 codes
        write!(f, "{:?}", self.0)
    }
}

/// Unknown region code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown phone region: {0}")]
pub struct PhoneRegionError(pub String);

impl FromStr for PhoneRegion {
    type Err = PhoneRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .to_ascii_uppercase()
            .parse::<country::Id>()
            .map(Self)
            .map_err(|_| PhoneRegionError(s.to_string()))
    }
}

/// Check whether a phone number is acceptable
///
/// Empty input is valid (the field is optional). Otherwise the number must
/// parse as a valid number either in `region` or in international form,
/// where a leading `00` dialling prefix stands in for `+`.
pub fn validate_phone_number(phone: &str, region: PhoneRegion) -> bool {
    phone.is_empty() || canonicalize(phone, region).is_some()
}

/// Canonicalize a phone number to E.164
///
/// Valid numbers come back as `+<country code><national number>`. Anything
/// else is reduced to its ASCII digits, keeping a leading `+` if the input
/// had one. Empty input is returned unchanged. The result is stable under
/// re-application.
pub fn sanitize_phone_number(phone: &str, region: PhoneRegion) -> String {
    if phone.is_empty() {
        return String::new();
    }

    if let Some(e164) = canonicalize(phone, region) {
        return e164;
    }

    let cleaned = strip_to_digits(&fold_full_width(phone));
    // Stray characters can be the only thing keeping a number from parsing
    canonicalize(&cleaned, region).unwrap_or(cleaned)
}

fn canonicalize(phone: &str, region: PhoneRegion) -> Option<String> {
    let phone = fold_full_width(phone);
    let region = Some(region.id());

    parse_valid(&phone, region)
        .or_else(|| parse_valid(&phone, None))
        .or_else(|| {
            // `00` is the international call prefix in most of the world;
            // region metadata can claim a wider pattern and misread it
            let rest = phone.trim_start().strip_prefix("00")?;
            parse_valid(&format!("+{rest}"), region)
        })
        .map(|number| number.format().mode(Mode::E164).to_string())
}

/// Map full-width digits and plus (as typed with CJK input methods) to ASCII
fn fold_full_width(phone: &str) -> String {
    phone
        .chars()
        .map(|c| match c {
            '\u{FF10}'..='\u{FF19}' => char::from_digit(u32::from(c) - 0xFF10, 10).unwrap_or(c),
            '\u{FF0B}' => '+',
            other => other,
        })
        .collect()
}

fn parse_valid(phone: &str, region: Option<country::Id>) -> Option<PhoneNumber> {
    phonenumber::parse(region, phone)
        .ok()
        .filter(|number| phonenumber::is_valid(number))
}

fn strip_to_digits(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if phone.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SG: PhoneRegion = PhoneRegion::SINGAPORE;

    #[test]
    fn test_local_number_gets_country_code() {
        assert_eq!(sanitize_phone_number("9123 4567", SG), "+6591234567");
        assert_eq!(sanitize_phone_number("91234567", SG), "+6591234567");
    }

    #[test]
    fn test_separator_variants_agree() {
        let variants = [
            "9123 4567",
            "9123-4567",
            "+65 9123 4567",
            "+65-9123-4567",
            "+6591234567",
            " 9123  4567 ",
        ];

        for variant in variants {
            assert_eq!(sanitize_phone_number(variant, SG), "+6591234567", "{variant:?}");
        }
    }

    #[test]
    fn test_international_number_keeps_its_country() {
        assert_eq!(sanitize_phone_number("+1 650-253-0000", SG), "+16502530000");
        assert!(validate_phone_number("+1 650-253-0000", SG));
    }

    #[test]
    fn test_double_zero_dialling_prefix() {
        assert_eq!(sanitize_phone_number("0065 9123 4567", SG), "+6591234567");
        assert_eq!(sanitize_phone_number("001 650 253 0000", SG), "+16502530000");
        assert!(validate_phone_number("0065 9123 4567", SG));
        assert!(validate_phone_number("001 650 253 0000", SG));
    }

    #[test]
    fn test_full_width_digits() {
        assert_eq!(sanitize_phone_number("９１２３４５６７", SG), "+6591234567");
        assert_eq!(sanitize_phone_number("＋６５ ９１２３ ４５６７", SG), "+6591234567");
        assert!(validate_phone_number("９１２３４５６７", SG));
        assert_eq!(sanitize_phone_number("１２-３４５", SG), "12345");
    }

    #[test]
    fn test_empty_is_valid_and_unchanged() {
        assert!(validate_phone_number("", SG));
        assert_eq!(sanitize_phone_number("", SG), "");
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(!validate_phone_number("not-a-phone", SG));
        assert!(!validate_phone_number("12345", SG));
        assert!(!validate_phone_number("   ", SG));
    }

    #[test]
    fn test_fallback_keeps_digits_and_plus() {
        assert_eq!(sanitize_phone_number("not-a-phone", SG), "");
        assert_eq!(sanitize_phone_number("12-345", SG), "12345");
        assert_eq!(sanitize_phone_number("+12 (3)", SG), "+123");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "9123 4567",
            "+1 650-253-0000",
            "not-a-phone",
            "12-345",
            "+12 (3)",
            "9123\u{0}4567",
            "0065 9123 4567",
            "00 12",
            "９１２３４５６７",
            "91234567 91234567",
            "",
        ];

        for input in inputs {
            let once = sanitize_phone_number(input, SG);
            let twice = sanitize_phone_number(&once, SG);
            assert_eq!(once, twice, "{input:?}");
        }
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!("sg".parse::<PhoneRegion>().unwrap(), SG);
        assert_eq!(" US ".parse::<PhoneRegion>().unwrap().to_string(), "US");
        assert!("XX1".parse::<PhoneRegion>().is_err());
        assert_eq!(PhoneRegion::default().to_string(), "SG");
    }
}
