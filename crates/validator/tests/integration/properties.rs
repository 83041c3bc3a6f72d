//! Engine-wide behaviour: short-circuiting, policies, fatal errors, lookups.

use mealdesk_validator::prelude::*;
use mealdesk_validator::rule::parse_rules;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use serde_json::json;

use crate::support::{BrokenLookup, FixedLookup, payload, run, store};

fn errors(pairs: &[(&str, &str)]) -> ErrorMap {
    pairs
        .iter()
        .map(|(field, message)| ((*field).to_owned(), vec![(*message).to_owned()]))
        .collect()
}

// ============================================================================
// SHORT-CIRCUIT
// ============================================================================

#[test]
fn absent_field_reports_only_required() {
    let result = run(&[("email", "required|email")], json!({}));
    assert_eq!(
        result.into_errors(),
        errors(&[("email", "The email field is required.")])
    );
}

#[test]
fn one_error_per_call_by_default() {
    let result = run(
        &[("name", "required|alpha"), ("cost", "required|positive")],
        json!({ "name": "R2D2", "cost": -3 }),
    );
    assert_eq!(
        result.into_errors(),
        errors(&[("name", "The name may contain only letters.")])
    );
}

#[test]
fn lookup_is_not_consulted_after_a_failure() {
    let spec = RuleSpec::parse([
        ("quantity", "required|integer"),
        ("menu_id", "required|integer|exists:Menu,id"),
    ])
    .unwrap();
    let lookup = FixedLookup::answering(true, true);
    let body = payload(json!({ "quantity": "two", "menu_id": 1 }));

    let result = evaluate(&spec, &body, &lookup).unwrap();
    assert!(result.fails());
    assert_eq!(lookup.calls(), 0);
}

// ============================================================================
// POLICY
// ============================================================================

#[test]
fn first_per_field_collects_every_field() {
    let spec = RuleSpec::parse([
        ("email", "required|email"),
        ("password", "required|string|least_string:6"),
        ("username", "required|alpha"),
    ])
    .unwrap();
    let body = payload(json!({ "email": "nope", "password": "abc", "username": "ada" }));

    let result = Validator::new()
        .with_policy(FailurePolicy::FirstPerField)
        .evaluate(&spec, &body, &NoLookup)
        .unwrap();

    assert_eq!(
        result.into_errors(),
        errors(&[
            ("email", "The email must be a valid email address."),
            ("password", "The password must be at least 6 characters."),
        ])
    );
}

// ============================================================================
// SPEC EXAMPLES
// ============================================================================

#[rstest]
#[case(json!({"password": "abc"}), Some("The password confirmation does not match."))]
#[case(json!({"password": "abc", "password_confirmation": "abc"}), None)]
#[case(json!({"password": "abc", "password_confirmation": "xyz"}), Some("The password confirmation does not match."))]
fn confirmation(#[case] body: serde_json::Value, #[case] expected: Option<&str>) {
    let result = run(&[("password", "confirmed")], body);
    assert_eq!(result.first_message(), expected);
}

#[rstest]
#[case(0, true)]
#[case(100, true)]
#[case(101, false)]
#[case(-1, false)]
fn between_numeric_is_inclusive(#[case] score: i64, #[case] passes: bool) {
    let result = run(&[("score", "between_numeric:0,100")], json!({ "score": score }));
    assert_eq!(result.passes(), passes);
}

#[rstest]
#[case("2002-02-10", Some("The start must be a date after 2008-01-10."))]
#[case("2009-01-10", None)]
#[case("hi", Some("The start is not a valid date."))]
fn date_ordering(#[case] start: &str, #[case] expected: Option<&str>) {
    let result = run(&[("start", "after:2008-01-10")], json!({ "start": start }));
    assert_eq!(result.first_message(), expected);
}

// ============================================================================
// FATAL ERRORS
// ============================================================================

#[test]
fn unknown_rule_is_fatal() {
    let err = validate([("name", "required|bogus_rule")], &Payload::new(), &NoLookup).unwrap_err();
    assert!(matches!(err, Error::UnknownRule { ref name } if name == "bogus_rule"));
    assert!(err.is_configuration());
}

#[test]
fn unknown_rule_is_fatal_even_for_absent_fields() {
    assert!(validate([("img_url", "bogus_rule")], &Payload::new(), &NoLookup).is_err());
}

#[rstest]
#[case("after:2008-13-01")]
#[case("before:last week")]
#[case("between_numeric:100,0")]
#[case("least_string:-1")]
#[case("exists:Dish,id")]
#[case("regex:[unclosed")]
#[case("required_with")]
fn malformed_parameters_are_fatal(#[case] rule: &str) {
    let err = RuleSpec::parse([("field", rule)]).unwrap_err();
    assert!(err.is_configuration(), "{rule}: {err}");
}

#[test]
fn lookup_failures_propagate() {
    let spec = RuleSpec::parse([("email", "required|unique:User,email")]).unwrap();
    let body = payload(json!({ "email": "ada@example.com" }));
    let err = evaluate(&spec, &body, &BrokenLookup).unwrap_err();
    assert!(matches!(err, Error::Lookup { rule: RuleKind::Unique, .. }));
    assert!(std::error::Error::source(&err).is_some());
}

// ============================================================================
// LOOKUPS
// ============================================================================

#[rstest]
#[case(true, true, None)]
#[case(false, true, Some("The selected meal id is invalid."))]
#[case(true, false, Some("The meal id is already taken."))]
fn fake_lookup_drives_exists_and_unique(
    #[case] exists: bool,
    #[case] unique: bool,
    #[case] expected: Option<&str>,
) {
    let spec = RuleSpec::parse([("meal_id", "exists:Meal,id|unique:Meal,id")]).unwrap();
    let lookup = FixedLookup::answering(exists, unique);
    let result = evaluate(&spec, &payload(json!({ "meal_id": 4 })), &lookup).unwrap();
    assert_eq!(result.first_message(), expected);
}

// ============================================================================
// PROPERTIES
// ============================================================================

fn scalar() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        (-1.0e6..1.0e6f64).prop_map(serde_json::Value::from),
        ".{0,12}".prop_map(serde_json::Value::from),
    ]
}

proptest! {
    #[test]
    fn evaluation_is_idempotent(name in scalar(), cost in scalar(), menu_id in scalar()) {
        let spec = RuleSpec::parse([
            ("name", "required|alpha|least_string:3"),
            ("cost", "required|positive|between_numeric:0,100"),
            ("menu_id", "integer|exists:Menu,id"),
        ])
        .unwrap();
        let body = payload(json!({ "name": name, "cost": cost, "menu_id": menu_id }));
        let lookup = store();
        let validator = Validator::new().with_policy(FailurePolicy::FirstPerField);

        let first = validator.evaluate(&spec, &body, &lookup).unwrap();
        let second = validator.evaluate(&spec, &body, &lookup).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn at_most_one_message_per_field(value in scalar()) {
        let spec = RuleSpec::parse([("f", "required|numeric|integer|between_numeric:0,10|digits:1")]).unwrap();
        let result = Validator::new()
            .with_policy(FailurePolicy::FirstPerField)
            .evaluate(&spec, &payload(json!({ "f": value })), &NoLookup)
            .unwrap();
        prop_assert!(result.errors().values().all(|messages| messages.len() == 1));
    }

    #[test]
    fn rule_parser_never_panics(input in ".{0,40}") {
        let _ = parse_rules(&input);
    }

    #[test]
    fn default_policy_reports_at_most_one_error(a in scalar(), b in scalar()) {
        let result = run(
            &[("a", "required|integer"), ("b", "required|alpha")],
            json!({ "a": a, "b": b }),
        );
        prop_assert!(result.errors().len() <= 1);
    }
}
