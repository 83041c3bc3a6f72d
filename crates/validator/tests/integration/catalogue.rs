//! Every rule with one passing and one failing payload.

use rstest::rstest;
use serde_json::{Value, json};

use crate::support::run;

#[rstest]
#[case::required("required", json!({"field_name": "x"}), json!({}), "The field name field is required.")]
#[case::accepted("accepted", json!({"field_name": "yes"}), json!({"field_name": "no"}), "must be accepted")]
#[case::boolean("boolean", json!({"field_name": "false"}), json!({"field_name": "maybe"}), "either true or false")]
#[case::string("string", json!({"field_name": "a"}), json!({"field_name": 5}), "must be a string")]
#[case::integer("integer", json!({"field_name": "42"}), json!({"field_name": "4.2"}), "must be an integer")]
#[case::numeric("numeric", json!({"field_name": "4.2"}), json!({"field_name": "four"}), "must be a number")]
#[case::positive("positive", json!({"field_name": 0}), json!({"field_name": -1}), "must be a positive number")]
#[case::alpha("alpha", json!({"field_name": "Jollof Rice"}), json!({"field_name": "R2D2"}), "may contain only letters.")]
#[case::alpha_num("alpha_num", json!({"field_name": "R2D2"}), json!({"field_name": "R2-D2"}), "only letters and numbers")]
#[case::alpha_dash("alpha_dash", json!({"field_name": "R2-D2"}), json!({"field_name": "R2_D2"}), "and dashes")]
#[case::email("email", json!({"field_name": "ada@example.com"}), json!({"field_name": "ada@example"}), "valid email address")]
#[case::url("url", json!({"field_name": "http://example.com/a b"}), json!({"field_name": "ftp:/x"}), "format is invalid")]
#[case::json("json", json!({"field_name": "[1, 2]"}), json!({"field_name": "[1,"}), "valid json format")]
#[case::date("date", json!({"field_name": "2020-02-29"}), json!({"field_name": "2021-02-29"}), "is not a valid date")]
#[case::after("after:2008-01-10", json!({"field_name": "2009-01-10"}), json!({"field_name": "2002-02-10"}), "a date after 2008-01-10")]
#[case::before("before:2008-01-10", json!({"field_name": "2002-02-10"}), json!({"field_name": "2009-01-10"}), "a date before 2008-01-10")]
#[case::digits("digits:4", json!({"field_name": "1234"}), json!({"field_name": "123"}), "must be 4 digits")]
#[case::digits_between("digits_between:2,4", json!({"field_name": 123}), json!({"field_name": 12345}), "between 2 and 4 digits")]
#[case::size_string("size_string:3", json!({"field_name": "abc"}), json!({"field_name": "abcd"}), "must be 3 characters")]
#[case::size_numeric("size_numeric:10", json!({"field_name": 10.005}), json!({"field_name": 11}), "must be 10.")]
#[case::least_string("least_string:3", json!({"field_name": "abc"}), json!({"field_name": "ab"}), "at least 3 characters")]
#[case::most_string("most_string:3", json!({"field_name": "abc"}), json!({"field_name": "abcd"}), "not be greater than 3 characters")]
#[case::least_numeric("least_numeric:5", json!({"field_name": 5}), json!({"field_name": 4}), "at least 5.")]
#[case::most_numeric("most_numeric:30", json!({"field_name": 30}), json!({"field_name": 31}), "not be greater than 30.")]
#[case::between_string("between_string:2,4", json!({"field_name": "abc"}), json!({"field_name": "a"}), "between 2 and 4 characters")]
#[case::between_numeric("between_numeric:0,100", json!({"field_name": 100}), json!({"field_name": 101}), "between 0 and 100.")]
#[case::confirmed(
    "confirmed",
    json!({"field_name": "abc", "field_name_confirmation": "abc"}),
    json!({"field_name": "abc", "field_name_confirmation": "xyz"}),
    "confirmation does not match"
)]
#[case::same("same:other_field", json!({"field_name": 1, "other_field": 1}), json!({"field_name": 1, "other_field": 2}), "and other field must match")]
#[case::different("different:other_field", json!({"field_name": 1, "other_field": 2}), json!({"field_name": 1, "other_field": 1}), "and other field must be different")]
#[case::found_in("found_in:1,2,3", json!({"field_name": 2}), json!({"field_name": 4}), "The selected field name is invalid.")]
#[case::not_in("not_in:1,2,3", json!({"field_name": 4}), json!({"field_name": "2"}), "The selected field name is invalid.")]
#[case::regex(r"regex:[A-Z]{3}\d", json!({"field_name": "ABC1-x"}), json!({"field_name": "xABC1"}), "format is invalid")]
#[case::required_with("required_with:other_field", json!({}), json!({"other_field": 1}), "required when other field is present")]
#[case::required_without("required_without:other_field", json!({"other_field": 1}), json!({}), "required when other field is not present")]
#[case::required_if("required_if:role,1", json!({"role": 2}), json!({"role": 1}), "required when role is 1")]
#[case::exists("exists:Meal,id", json!({"field_name": 1}), json!({"field_name": 2}), "The selected field name is invalid.")]
#[case::unique("unique:User,email", json!({"field_name": "bob@example.com"}), json!({"field_name": "ADA@example.com"}), "is already taken")]
fn rule_catalogue(#[case] rule: &str, #[case] passing: Value, #[case] failing: Value, #[case] keyword: &str) {
    let rules = [("field_name", rule)];

    let result = run(&rules, passing);
    assert!(result.passes(), "{rule}: {:?}", result.errors());
    assert!(result.errors().is_empty());

    let result = run(&rules, failing);
    assert!(result.fails(), "{rule} should fail");
    let message = result.errors()["field_name"][0].as_str();
    assert!(message.contains(keyword), "{rule}: `{message}` lacks `{keyword}`");
}
