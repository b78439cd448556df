use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ChainageError {
    #[error("chainage {input:?} is not a number")]
    NotANumber { input: String },
}

/// Formats a distance along a road, in meters, as `<km>+<mmm>`.
///
/// The value is rounded to the nearest meter (halves away from zero) and its
/// sign dropped. Callers are expected to pass finite, non-negative values.
pub fn format_chainage(meters: f64) -> String {
    let digits = format!("{}", meters.round().abs());
    let padded = format!("{:0>3}", digits);
    let (km, m) = padded.split_at(padded.len() - 3);

    let km = if km.is_empty() { "0" } else { km };

    format!("{}+{}", km, m)
}

/// Parses textual chainage before formatting it, rejecting anything that is
/// not a finite number.
pub fn parse_and_format_chainage(input: &str) -> Result<String, ChainageError> {
    let meters = input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ChainageError::NotANumber {
            input: input.to_string(),
        })?;

    Ok(format_chainage(meters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(format_chainage(0.0), "0+000");
        assert_eq!(format_chainage(45.0), "0+045");
        assert_eq!(format_chainage(12345.0), "12+345");
        assert_eq!(format_chainage(1000000.0), "1000+000");
    }

    #[test]
    fn test_exact_kilometer() {
        assert_eq!(format_chainage(1000.0), "1+000");
        assert_eq!(format_chainage(999.0), "0+999");
    }

    #[test]
    fn test_rounds_to_nearest_meter() {
        assert_eq!(format_chainage(12344.5), "12+345");
        assert_eq!(format_chainage(12345.49), "12+345");
        assert_eq!(format_chainage(999.6), "1+000");
        assert_eq!(format_chainage(0.4), "0+000");
    }

    #[test]
    fn test_sign_is_dropped() {
        assert_eq!(format_chainage(-12345.0), "12+345");
        assert_eq!(format_chainage(-0.0), "0+000");
    }

    #[test]
    fn test_single_precision_chainage() {
        let start: f32 = 2750.0;
        assert_eq!(format_chainage(start as f64), "2+750");
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(parse_and_format_chainage("12345").unwrap(), "12+345");
        assert_eq!(parse_and_format_chainage(" 45.2 ").unwrap(), "0+045");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_and_format_chainage("twelve"),
            Err(ChainageError::NotANumber {
                input: "twelve".to_string()
            })
        );
        assert!(parse_and_format_chainage("NaN").is_err());
        assert!(parse_and_format_chainage("inf").is_err());
        assert!(parse_and_format_chainage("").is_err());
    }
}
