//! Client-side form validation
//!
//! Pure and synchronous. Runs before any network call is made.

use url::Url;

use crate::core::{Field, FieldErrors, FormInput, BASE_UNITS_PER_TOKEN};

/// Validate every field of the form, collecting one message per failing field
pub fn validate(input: &FormInput) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    // Whitespace is not trimmed: only the empty string is rejected
    if input.token_name.is_empty() {
        errors.insert(Field::TokenName, "Token name is required");
    }
    if input.token_symbol.is_empty() {
        errors.insert(Field::TokenSymbol, "Token symbol is required");
    }
    if Url::parse(&input.image_url).is_err() {
        errors.insert(Field::ImageUrl, "Image URL must be a valid absolute URL");
    }
    if !is_whole_number(&input.initial_supply) {
        errors.insert(
            Field::InitialSupply,
            "Initial supply must be a whole number (digits only)",
        );
    } else if base_units(&input.initial_supply).is_none() {
        errors.insert(Field::InitialSupply, "Initial supply is too large");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True for a non-empty run of ASCII digits
pub fn is_whole_number(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Initial supply scaled to base units, `None` if not a whole number or
/// the scaled amount overflows `u64`
pub fn base_units(initial_supply: &str) -> Option<u64> {
    if !is_whole_number(initial_supply) {
        return None;
    }
    initial_supply
        .parse::<u64>()
        .ok()?
        .checked_mul(BASE_UNITS_PER_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> FormInput {
        FormInput::new("Foo", "FOO", "https://x.test/i.png", "1000")
    }

    #[test]
    fn test_well_formed_input_is_valid() {
        assert_eq!(validate(&valid_input()), Ok(()));

        let zero_supply = FormInput {
            initial_supply: "0".into(),
            ..valid_input()
        };
        assert_eq!(validate(&zero_supply), Ok(()));

        // Untrimmed whitespace counts as a value
        let spaced = FormInput {
            token_name: " ".into(),
            token_symbol: "  ".into(),
            ..valid_input()
        };
        assert_eq!(validate(&spaced), Ok(()));
    }

    #[test]
    fn test_each_failing_field_is_reported_alone() {
        let cases = [
            (Field::TokenName, FormInput { token_name: String::new(), ..valid_input() }),
            (Field::TokenSymbol, FormInput { token_symbol: String::new(), ..valid_input() }),
            (Field::ImageUrl, FormInput { image_url: "not a url".into(), ..valid_input() }),
            (Field::InitialSupply, FormInput { initial_supply: "12.5".into(), ..valid_input() }),
        ];

        for (field, input) in cases {
            let errors = validate(&input).unwrap_err();
            assert_eq!(errors.len(), 1, "only {} should fail", field);
            assert!(!errors.get(field).unwrap().is_empty());
        }
    }

    #[test]
    fn test_all_failing_fields_are_collected() {
        let errors = validate(&FormInput::default()).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), Field::ALL.to_vec());
    }

    #[test]
    fn test_image_url_requires_absolute_url() {
        for bad in ["", "x.test/i.png", "/images/i.png", "https://"] {
            let input = FormInput { image_url: bad.into(), ..valid_input() };
            assert!(validate(&input).unwrap_err().contains(Field::ImageUrl), "{bad}");
        }
        for good in ["https://x.test/i.png", "http://localhost:8080/a.jpg", "ipfs://bafy/meta.json"] {
            let input = FormInput { image_url: good.into(), ..valid_input() };
            assert_eq!(validate(&input), Ok(()), "{good}");
        }
    }

    #[test]
    fn test_initial_supply_rejects_non_integer_literals() {
        for bad in ["", "-5", "+5", "1.0", "1,000", "1_000", " 5", "5 ", "1e3", "abc"] {
            let input = FormInput { initial_supply: bad.into(), ..valid_input() };
            let errors = validate(&input).unwrap_err();
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::InitialSupply], "{bad:?}");
        }
    }

    #[test]
    fn test_base_units_scaling() {
        assert_eq!(base_units("5"), Some(5_000_000_000));
        assert_eq!(base_units("0"), Some(0));
        assert_eq!(base_units("007"), Some(7_000_000_000));
        assert_eq!(base_units("18446744073"), Some(18_446_744_073_000_000_000));
        assert_eq!(base_units("18446744074"), None);
        assert_eq!(base_units("-1"), None);
    }

    #[test]
    fn test_supply_overflow_is_a_field_error() {
        let input = FormInput { initial_supply: "99999999999999999999999".into(), ..valid_input() };
        let errors = validate(&input).unwrap_err();
        assert_eq!(errors.get(Field::InitialSupply), Some("Initial supply is too large"));
    }
}
