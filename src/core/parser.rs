use regex::Regex;
use std::sync::LazyLock;

/// Splits a raw quantity string into a leading numeric run and a trailing
/// unit token. The numeric run may contain digits, `.`, `,`, `/`,
/// whitespace and an optional leading `-`, and must contain at least one
/// digit ("1 1/2 cups" -> "1 1/2" + "cups").
static NUMERIC_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-?[\d\s.,/]*\d[\d\s.,/]*)(.*)$").unwrap());

/// Exactly one comma used as a thousands separator: "1,234" or "12,345,678"
/// style grouping with 3 digits per group.
static THOUSANDS_GROUPING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(,\d{3})+$").unwrap());

/// A quantity string split into its numeric value and raw unit token.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub value: f64,
    pub unit: String,
}

/// Parse a free-text quantity string ("1 1/2 cups", "1.234,56 g", "2 dozen").
///
/// Receipt OCR and LLM output are untrusted free text, so this never fails:
/// anything without a usable numeric run resolves to `1 count`.
pub fn parse_quantity(raw: &str) -> ParsedQuantity {
    let Some(captures) = NUMERIC_SPLIT.captures(raw) else {
        return ParsedQuantity {
            value: 1.0,
            unit: "count".to_string(),
        };
    };

    let numeric_run = captures.get(1).map_or("", |m| m.as_str()).trim();
    let unit_token = captures.get(2).map_or("", |m| m.as_str()).trim();

    let value = parse_numeric_run(numeric_run);
    let unit = if unit_token.is_empty() {
        "count".to_string()
    } else {
        unit_token.to_string()
    };

    ParsedQuantity { value, unit }
}

/// Resolve a numeric run to a float.
///
/// Runs containing `/` are summed as whitespace-separated mixed-number
/// tokens ("1 1/2" = 1.5, "3/4" = 0.75). Otherwise `,` and `.` are
/// disambiguated as decimal vs thousands separators before parsing.
fn parse_numeric_run(run: &str) -> f64 {
    if run.contains('/') {
        let total: f64 = run.split_whitespace().map(fraction_token_value).sum();
        // An all-zero or unparseable sum falls back to 1.
        if total == 0.0 {
            1.0
        } else {
            total
        }
    } else {
        resolve_separators(run).parse::<f64>().unwrap_or(1.0)
    }
}

/// Value of one whitespace-separated token within a fraction run.
/// "1/2" -> 0.5, "2" -> 2.0, a zero denominator contributes 0.
fn fraction_token_value(token: &str) -> f64 {
    if let Some((numerator, denominator)) = token.split_once('/') {
        let n = numerator.trim().parse::<f64>().unwrap_or(0.0);
        let d = denominator.trim().parse::<f64>().unwrap_or(0.0);
        if d == 0.0 {
            0.0
        } else {
            n / d
        }
    } else {
        token.parse::<f64>().unwrap_or(0.0)
    }
}

/// Disambiguate `,` vs `.` as decimal/thousands separators.
///
/// - "1,234.56" -> comma groups thousands, strip commas
/// - "1.234,56" -> dot groups thousands, comma is the decimal point
/// - "1,234,567" -> all commas are thousands separators
/// - "1,234" (3-digit grouping) -> thousands separator
/// - "1,5" -> a lone non-grouping comma is a decimal point
fn resolve_separators(run: &str) -> String {
    let comma = run.find(',');
    let dot = run.find('.');

    match (comma, dot) {
        (Some(c), Some(d)) if c < d => run.replace(',', ""),
        (Some(_), Some(_)) => run.replace('.', "").replace(',', "."),
        (Some(_), None) => {
            if run.matches(',').count() > 1 || THOUSANDS_GROUPING.is_match(run) {
                run.replace(',', "")
            } else {
                run.replace(',', ".")
            }
        }
        _ => run.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_integer() {
        let parsed = parse_quantity("2 cups");
        assert_eq!(parsed.value, 2.0);
        assert_eq!(parsed.unit, "cups");
    }

    #[test]
    fn test_mixed_number() {
        let parsed = parse_quantity("1 1/2 cups");
        assert!((parsed.value - 1.5).abs() < 1e-9);
        assert_eq!(parsed.unit, "cups");
    }

    #[test]
    fn test_bare_fraction() {
        let parsed = parse_quantity("3/4 tsp");
        assert!((parsed.value - 0.75).abs() < 1e-9);
        assert_eq!(parsed.unit, "tsp");
    }

    #[test]
    fn test_zero_denominator_falls_back() {
        // 1/0 contributes 0, and a zero total falls back to 1
        let parsed = parse_quantity("1/0 cups");
        assert_eq!(parsed.value, 1.0);
    }

    #[test]
    fn test_comma_thousands_with_dot_decimal() {
        let parsed = parse_quantity("1,234.56 g");
        assert!((parsed.value - 1234.56).abs() < 1e-9);
        assert_eq!(parsed.unit, "g");
    }

    #[test]
    fn test_dot_thousands_with_comma_decimal() {
        let parsed = parse_quantity("1.234,56 g");
        assert!((parsed.value - 1234.56).abs() < 1e-9);
    }

    #[test]
    fn test_multiple_commas_are_thousands() {
        let parsed = parse_quantity("1,234,567 g");
        assert_eq!(parsed.value, 1_234_567.0);
    }

    #[test]
    fn test_lone_comma_is_decimal() {
        let parsed = parse_quantity("1,5 kg");
        assert!((parsed.value - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_grouping_comma_is_thousands() {
        let parsed = parse_quantity("1,234 g");
        assert_eq!(parsed.value, 1234.0);
    }

    #[test]
    fn test_no_numeric_run() {
        let parsed = parse_quantity("a pinch of salt");
        assert_eq!(parsed.value, 1.0);
        assert_eq!(parsed.unit, "count");
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_quantity("");
        assert_eq!(parsed.value, 1.0);
        assert_eq!(parsed.unit, "count");
    }

    #[test]
    fn test_bare_number_defaults_unit_to_count() {
        let parsed = parse_quantity("3");
        assert_eq!(parsed.value, 3.0);
        assert_eq!(parsed.unit, "count");
    }

    #[test]
    fn test_negative_value_preserved() {
        let parsed = parse_quantity("-2 g");
        assert_eq!(parsed.value, -2.0);
        assert_eq!(parsed.unit, "g");
    }

    #[test]
    fn test_unit_token_trimmed() {
        let parsed = parse_quantity("2   fl oz");
        assert_eq!(parsed.value, 2.0);
        assert_eq!(parsed.unit, "fl oz");
    }
}
