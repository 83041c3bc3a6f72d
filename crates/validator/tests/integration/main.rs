//! Integration tests for mealdesk-validator.

mod catalogue;
mod forms;
mod properties;
mod support;
