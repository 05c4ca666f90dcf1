//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection becomes an [`Error`] with `ErrorCode::InvalidRequest` and a
//! `details` object naming the offending field and a stable code.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{CustomerName, Error, ItemName, OrderId, OrderValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    Empty,
    InvalidUuid,
    MalformedBody,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::Empty => "empty",
            Self::InvalidUuid => "invalid_uuid",
            Self::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: impl Into<String>, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ValidationCode::MissingField,
    )
}

fn order_validation_error(error: &OrderValidationError) -> Error {
    let code = match error {
        OrderValidationError::InvalidId => ValidationCode::InvalidUuid,
        OrderValidationError::EmptyCustomerName | OrderValidationError::EmptyItem => {
            ValidationCode::Empty
        }
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_customer_name(value: Option<String>) -> Result<CustomerName, Error> {
    let value = value.ok_or_else(|| missing_field_error(FieldName::new("customer_name")))?;
    CustomerName::new(value).map_err(|err| order_validation_error(&err))
}

pub(crate) fn parse_item(value: Option<String>) -> Result<ItemName, Error> {
    let value = value.ok_or_else(|| missing_field_error(FieldName::new("item")))?;
    ItemName::new(value).map_err(|err| order_validation_error(&err))
}

pub(crate) fn parse_order_id(value: &str) -> Result<OrderId, Error> {
    value.parse::<OrderId>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": err.field(),
            "value": value,
            "code": ValidationCode::InvalidUuid.as_str(),
        }))
    })
}

/// JSON extractor configuration turning body errors into domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid JSON body: {inner}"),
        other => format!("invalid request body: {other}"),
    };
    Error::invalid_request(message)
        .with_details(json!({
            "field": "body",
            "code": ValidationCode::MalformedBody.as_str(),
        }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn missing_customer_name_reports_field() {
        let err = parse_customer_name(None).expect_err("missing field");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "customer_name", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn blank_items_are_rejected(#[case] value: Option<String>) {
        let err = parse_item(value).expect_err("blank item");
        assert_eq!(err.details(), Some(&json!({"field": "item", "code": "empty"})));
    }

    #[rstest]
    fn valid_text_is_kept_verbatim() {
        let name = parse_customer_name(Some(" Ada ".to_owned())).expect("valid name");
        assert_eq!(name.as_ref(), " Ada ");
    }

    #[rstest]
    fn malformed_ids_echo_the_value() {
        let err = parse_order_id("abc").expect_err("bad uuid");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "id", "value": "abc", "code": "invalid_uuid"}))
        );
    }

    #[rstest]
    fn well_formed_ids_parse() {
        let id = parse_order_id("00000000-0000-0000-0000-000000000001").expect("valid uuid");
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000000000001");
    }
}
