//! The API's endpoint contracts, validated end to end.

use mealdesk_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

struct RegisterRequest;

impl FormRequest for RegisterRequest {
    fn rules(&self) -> Result<RuleSpec, Error> {
        RuleSpec::parse([
            ("email", "required|email|unique:User,email"),
            ("password", "required|string|confirmed|least_string:6"),
            ("username", "required|alpha|least_string:3"),
        ])
    }
}

struct PostOrderRequest;

impl FormRequest for PostOrderRequest {
    fn rules(&self) -> Result<RuleSpec, Error> {
        RuleSpec::parse([
            ("quantity", "required|integer|positive"),
            ("user_id", "required|integer|positive|exists:User,id"),
            ("menu_item_id", "required|integer|positive|exists:MenuItem,id"),
        ])
    }
}

/// Admins may also move an order through its states.
struct PutOrderRequest {
    admin: bool,
}

impl FormRequest for PutOrderRequest {
    fn rules(&self) -> Result<RuleSpec, Error> {
        let builder = RuleSpec::builder()
            .field("quantity", "integer|positive")?
            .field("menu_item_id", "integer|positive|exists:MenuItem,id")?;
        let builder = if self.admin {
            builder.field("status", "integer|found_in:1,2,3")?
        } else {
            builder
        };
        Ok(builder.build())
    }

    fn validator(&self) -> Validator {
        Validator::new().with_policy(FailurePolicy::FirstPerField)
    }
}

fn records() -> InMemoryLookup {
    InMemoryLookup::new()
        .with_record(Collection::User, [("id", Value::from(1)), ("email", Value::from("ada@example.com"))])
        .with_record(Collection::MenuItem, [("id", Value::from(10))])
}

fn rejection(err: FormError) -> ErrorMap {
    match err {
        FormError::Rejected(errors) => errors,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test]
fn register_accepts_a_clean_body() {
    let body = json!({
        "email": "grace@example.com",
        "password": "hunter22",
        "password_confirmation": "hunter22",
        "username": " Grace ",
        "role": 1,
    });
    let payload = RegisterRequest.validate(body, &records()).unwrap();
    assert_eq!(payload.get("username"), Some(&Value::from("Grace")));
    assert!(!payload.contains("role"));
}

#[test]
fn register_rejects_a_taken_email() {
    let body = json!({
        "email": "Ada@Example.com",
        "password": "hunter22",
        "password_confirmation": "hunter22",
        "username": "Ada",
    });
    let errors = rejection(RegisterRequest.validate(body, &records()).unwrap_err());
    assert_eq!(errors["email"], ["The email is already taken."]);
}

#[test]
fn order_references_must_exist() {
    let body = json!({ "quantity": 2, "user_id": 1, "menu_item_id": 11 });
    let errors = rejection(PostOrderRequest.validate(body, &records()).unwrap_err());
    assert_eq!(errors["menu_item_id"], ["The selected menu item id is invalid."]);

    let body = json!({ "quantity": 2, "user_id": 1, "menu_item_id": 10 });
    assert!(PostOrderRequest.validate(body, &records()).is_ok());
}

#[test]
fn only_admins_may_set_status() {
    let body = json!({ "quantity": "lots", "status": 9 });

    let errors = rejection(PutOrderRequest { admin: true }.validate(body.clone(), &records()).unwrap_err());
    let fields: Vec<_> = errors.keys().map(String::as_str).collect();
    assert_eq!(fields, ["quantity", "status"]);

    let errors = rejection(PutOrderRequest { admin: false }.validate(body, &records()).unwrap_err());
    assert!(!errors.contains_key("status"));
}

#[test]
fn rejections_render_the_http_envelope() {
    let err = PostOrderRequest.validate(json!({}), &records()).unwrap_err();
    let envelope = err.envelope().unwrap();
    assert_eq!(ErrorEnvelope::STATUS, 400);
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
        json!({
            "success": false,
            "message": "Validation error.",
            "errors": { "quantity": ["The quantity field is required."] }
        })
    );
}
