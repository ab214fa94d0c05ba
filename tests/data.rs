use moviedb_init::{
    data::{NULL_LITERAL, coerce_literal, format_real, parse_integer, parse_real, quote_text},
    schema::SqlType,
};
use proptest::prelude::*;

/// Reads a single-quoted SQL string literal back into its value.
fn unquote_sql_literal(literal: &str) -> Option<String> {
    let inner = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\'' {
            if chars.next() != Some('\'') {
                return None;
            }
        }
        value.push(ch);
    }
    Some(value)
}

#[test]
fn quoted_text_round_trips_through_sql_rules() {
    let original = "It's a 'quoted' world''";
    let literal = quote_text(original);
    assert_eq!(literal, "'It''s a ''quoted'' world'''''");
    assert_eq!(unquote_sql_literal(&literal).as_deref(), Some(original));
}

#[test]
fn integer_columns_reject_fractions_and_words() {
    for raw in ["1.5", "one", "0x10", "1e3", " ", "--1"] {
        assert_eq!(coerce_literal(Some(raw), SqlType::Integer), NULL_LITERAL, "{raw}");
    }
}

#[test]
fn real_columns_accept_integers_and_exponents() {
    assert_eq!(coerce_literal(Some("5"), SqlType::Real), "5.0");
    assert_eq!(coerce_literal(Some("2.5e-1"), SqlType::Real), "0.25");
    assert_eq!(coerce_literal(Some(".5"), SqlType::Real), "0.5");
    assert_eq!(coerce_literal(Some("-0.5"), SqlType::Real), "-0.5");
}

#[test]
fn format_real_switches_to_exponent_for_extremes() {
    assert_eq!(format_real(1e20), "1e20");
    assert_eq!(format_real(1e-7), "1e-7");
    assert_eq!(parse_real(&format_real(1e20)), Some(1e20));
}

#[test]
fn parsers_report_absence_instead_of_failing() {
    assert_eq!(parse_integer("12abc"), None);
    assert_eq!(parse_real("NaN"), None);
    assert_eq!(parse_integer(" 12 "), Some(12));
}

proptest! {
    #[test]
    fn quote_text_round_trips(value in "[a-zA-Z0-9 ',.|\"\\\\-]{0,40}") {
        let literal = quote_text(&value);
        prop_assert_eq!(
            literal.matches('\'').count(),
            value.matches('\'').count() * 2 + 2
        );
        prop_assert_eq!(unquote_sql_literal(&literal), Some(value));
    }

    #[test]
    fn non_numeric_fields_become_null(value in "[a-zA-Z][a-zA-Z ]{0,12}") {
        prop_assert_eq!(coerce_literal(Some(value.as_str()), SqlType::Integer), "NULL");
        prop_assert_eq!(coerce_literal(Some(value.as_str()), SqlType::Real), "NULL");
    }

    #[test]
    fn integers_render_canonically(n in any::<i64>()) {
        prop_assert_eq!(coerce_literal(Some(n.to_string().as_str()), SqlType::Integer), n.to_string());
    }

    #[test]
    fn reals_read_back_exactly(x in -1.0e12f64..1.0e12) {
        let literal = coerce_literal(Some(x.to_string().as_str()), SqlType::Real);
        prop_assert_eq!(literal.parse::<f64>().ok(), Some(x));
    }
}
