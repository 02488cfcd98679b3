//! Best-effort typing of raw query string literals.
//!
//! Query strings only ever carry text, but stored documents hold numbers and booleans.
//! [`infer_value`] decides the most specific type a literal can be read as, in a fixed
//! priority order: number, then boolean, then string.

use bson::Bson;

/// Infers the typed value of a single raw literal.
///
/// - Anything that reads as a finite decimal number becomes `Int64` when it is an
///   integer in range, `Double` otherwise.
/// - Numbers are read from the trimmed literal, so `" 12 "` is `Int64(12)`, the same
///   reading JavaScript's `Number()` gives. Callers that need exact literals must
///   check for whitespace themselves.
/// - Exactly `true` / `false` (case-sensitive, untrimmed) become booleans.
/// - Everything else, including the empty string, stays a string, untouched.
pub fn infer_value(raw: &str) -> Bson {
    if let Some(number) = parse_number(raw) {
        return number;
    }

    match raw {
        "true" => Bson::Boolean(true),
        "false" => Bson::Boolean(false),
        _ => Bson::String(raw.to_string()),
    }
}

fn parse_number(raw: &str) -> Option<Bson> {
    let trimmed = raw.trim();

    // `f64::from_str` also accepts words like "inf" and "NaN"; requiring a digit
    // keeps those as plain strings.
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(Bson::Int64(int));
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .map(Bson::Double)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_each_kind() {
        assert_eq!(infer_value("42"), Bson::Int64(42));
        assert_eq!(infer_value("true"), Bson::Boolean(true));
        assert_eq!(infer_value("false"), Bson::Boolean(false));
        assert_eq!(infer_value("abc"), Bson::String("abc".into()));
    }

    #[test]
    fn numbers_cover_floats_signs_and_exponents() {
        assert_eq!(infer_value("-7"), Bson::Int64(-7));
        assert_eq!(infer_value("+3"), Bson::Int64(3));
        assert_eq!(infer_value("2.5"), Bson::Double(2.5));
        assert_eq!(infer_value("1e3"), Bson::Double(1000.0));
        assert_eq!(infer_value(" 12 "), Bson::Int64(12));
        assert_eq!(infer_value("99999999999999999999"), Bson::Double(1e20));
    }

    #[test]
    fn only_numbers_are_read_through_whitespace() {
        assert_eq!(infer_value("\t-4.5\n"), Bson::Double(-4.5));
        assert_eq!(infer_value(" true "), Bson::String(" true ".into()));
        assert_eq!(infer_value(" abc"), Bson::String(" abc".into()));
    }

    #[test]
    fn boolean_match_is_case_sensitive() {
        assert_eq!(infer_value("True"), Bson::String("True".into()));
        assert_eq!(infer_value("FALSE"), Bson::String("FALSE".into()));
    }

    #[test]
    fn non_numeric_words_stay_strings() {
        for raw in ["NaN", "inf", "-infinity", "", " ", "12abc", "1,2"] {
            assert_eq!(infer_value(raw), Bson::String(raw.into()), "{raw:?}");
        }
    }
}
