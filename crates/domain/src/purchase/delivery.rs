//! Delivery details collected before a purchase is committed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where and when a purchase should be delivered.
///
/// All fields are free-form text. Presence is checked by [`DeliveryForm`];
/// formats are not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub expected_date: String,
}

impl DeliveryDetails {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        expected_date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            expected_date: expected_date.into(),
        }
    }
}

/// Delivery form as submitted, before the presence check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeliveryForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "delivery_date")]
    pub expected_date: Option<String>,
}

/// The delivery form is incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing delivery details: {}", .missing.join(", "))]
pub struct DeliveryFormError {
    /// Names of the blank or absent fields, in form order.
    pub missing: Vec<&'static str>,
}

impl DeliveryForm {
    /// Checks that every field is present and non-blank.
    ///
    /// Values are trimmed; nothing else about them is checked.
    pub fn validate(self) -> Result<DeliveryDetails, DeliveryFormError> {
        let mut missing = Vec::new();
        let details = DeliveryDetails {
            name: required(self.name, "name", &mut missing),
            address: required(self.address, "address", &mut missing),
            phone: required(self.phone, "phone", &mut missing),
            expected_date: required(self.expected_date, "expected_date", &mut missing),
        };

        if missing.is_empty() {
            Ok(details)
        } else {
            Err(DeliveryFormError { missing })
        }
    }
}

fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> DeliveryForm {
        DeliveryForm {
            name: Some("Ann".into()),
            address: Some("1 Rd".into()),
            phone: Some("555".into()),
            expected_date: Some("2024-01-01".into()),
        }
    }

    #[test]
    fn test_complete_form_validates() {
        let details = complete_form().validate().unwrap();
        assert_eq!(details, DeliveryDetails::new("Ann", "1 Rd", "555", "2024-01-01"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let form = DeliveryForm {
            name: Some("  Ann ".into()),
            ..complete_form()
        };
        assert_eq!(form.validate().unwrap().name, "Ann");
    }

    #[test]
    fn test_missing_and_blank_fields_reported_in_order() {
        let form = DeliveryForm {
            name: Some("   ".into()),
            phone: None,
            ..complete_form()
        };

        let err = form.validate().unwrap_err();
        assert_eq!(err.missing, vec!["name", "phone"]);
        assert_eq!(err.to_string(), "Missing delivery details: name, phone");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let err = DeliveryForm::default().validate().unwrap_err();
        assert_eq!(err.missing.len(), 4);
    }

    #[test]
    fn test_form_accepts_delivery_date_alias() {
        let form: DeliveryForm = serde_json::from_str(
            r#"{"name":"Ann","address":"1 Rd","phone":"555","delivery_date":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(form.validate().unwrap().expected_date, "2024-01-01");
    }
}
