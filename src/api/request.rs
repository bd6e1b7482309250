//! Request schemas
//!
//! Bodies deserialize into typed requests whose fields are all optional, so
//! that validation can name every missing field at once instead of failing
//! on the first. `validate`/`into_patch` turn them into the store's
//! `NewRecord`/`RecordPatch`; nothing reaches the store unvalidated.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

use crate::store::{NewRecord, RecordPatch};

use super::errors::{ApiError, ApiResult};

/// Longest accepted `name` or `category`, in characters
pub const MAX_TEXT_LEN: usize = 120;

/// An `amount` as sent by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum AmountInput {
    Number(f64),
    Text(String),
    /// Boolean, object or array; never a valid amount
    Other,
}

impl AmountInput {
    fn is_blank(&self) -> bool {
        matches!(self, AmountInput::Text(s) if s.is_empty())
    }

    /// Coerce to a non-negative finite float
    pub fn resolve(&self) -> ApiResult<f64> {
        let value = match self {
            AmountInput::Number(n) => *n,
            AmountInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| not_a_number())?,
            AmountInput::Other => return Err(not_a_number()),
        };

        if !value.is_finite() || value < 0.0 {
            return Err(ApiError::Validation(
                "amount must be a non-negative finite number".to_string(),
            ));
        }
        // -0.0 is stored and echoed as 0.0
        if value == 0.0 {
            return Ok(0.0);
        }
        Ok(value)
    }
}

impl<'de> Deserialize<'de> for AmountInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = AmountInput;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(AmountInput::Number(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(AmountInput::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(AmountInput::Number(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(AmountInput::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(AmountInput::Text(v))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
                Ok(AmountInput::Other)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(AmountInput::Other)
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                while map
                    .next_entry::<de::IgnoredAny, de::IgnoredAny>()?
                    .is_some()
                {}
                Ok(AmountInput::Other)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

fn not_a_number() -> ApiError {
    ApiError::Validation("amount must be a number".to_string())
}

/// Body of `POST /records`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecordRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount: Option<AmountInput>,
}

impl CreateRecordRequest {
    /// Check required fields, then coerce and bound-check them
    pub fn validate(self) -> ApiResult<NewRecord> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.category) {
            missing.push("category");
        }
        if self.amount.as_ref().map_or(true, AmountInput::is_blank) {
            missing.push("amount");
        }

        match (self.name, self.category, self.amount) {
            (Some(name), Some(category), Some(amount)) if missing.is_empty() => {
                check_length("name", &name)?;
                check_length("category", &category)?;
                Ok(NewRecord {
                    amount: amount.resolve()?,
                    name,
                    category,
                })
            }
            _ => Err(ApiError::Validation(format!(
                "missing: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Body of `PUT /records/{id}`
///
/// A field is applied only if present and, for strings, non-empty, and,
/// for `amount`, non-null. Everything else leaves the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecordRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount: Option<AmountInput>,
}

impl UpdateRecordRequest {
    pub fn into_patch(self) -> ApiResult<RecordPatch> {
        let name = non_empty(self.name);
        let category = non_empty(self.category);

        if let Some(name) = &name {
            check_length("name", name)?;
        }
        if let Some(category) = &category {
            check_length("category", category)?;
        }

        let amount = self.amount.as_ref().map(AmountInput::resolve).transpose()?;

        Ok(RecordPatch {
            name,
            category,
            amount,
        })
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn check_length(field: &str, value: &str) -> ApiResult<()> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ApiError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> ApiResult<NewRecord> {
        serde_json::from_value::<CreateRecordRequest>(body)
            .unwrap()
            .validate()
    }

    fn patch(body: serde_json::Value) -> ApiResult<RecordPatch> {
        serde_json::from_value::<UpdateRecordRequest>(body)
            .unwrap()
            .into_patch()
    }

    #[test]
    fn test_create_valid() {
        let record = create(json!({"name": "Ada", "category": "Eng", "amount": 1200})).unwrap();
        assert_eq!(record.name, "Ada");
        assert_eq!(record.category, "Eng");
        assert_eq!(record.amount, 1200.0);
    }

    #[test]
    fn test_create_lists_every_missing_field_in_order() {
        let err = create(json!({"category": ""})).unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation("missing: name, category, amount".to_string())
        );

        let err = create(json!({"name": "Ada", "category": "Eng", "amount": null})).unwrap_err();
        assert_eq!(err, ApiError::Validation("missing: amount".to_string()));
    }

    #[test]
    fn test_create_empty_amount_string_is_missing() {
        let err = create(json!({"name": "Ada", "category": "Eng", "amount": ""})).unwrap_err();
        assert_eq!(err, ApiError::Validation("missing: amount".to_string()));
    }

    #[test]
    fn test_create_coerces_numeric_string() {
        let record = create(json!({"name": "Ada", "category": "Eng", "amount": " 99.5 "})).unwrap();
        assert_eq!(record.amount, 99.5);
    }

    #[test]
    fn test_create_rejects_non_numeric_amount() {
        let err = create(json!({"name": "Ada", "category": "Eng", "amount": "lots"})).unwrap_err();
        assert_eq!(err, ApiError::Validation("amount must be a number".to_string()));
    }

    #[test]
    fn test_create_rejects_negative_and_infinite_amount() {
        for amount in [json!(-1), json!("inf"), json!("NaN")] {
            let err = create(json!({"name": "Ada", "category": "Eng", "amount": amount}))
                .unwrap_err();
            assert_eq!(
                err,
                ApiError::Validation("amount must be a non-negative finite number".to_string())
            );
        }
    }

    #[test]
    fn test_create_rejects_long_name() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let err = create(json!({"name": long, "category": "Eng", "amount": 1})).unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation("name must be at most 120 characters".to_string())
        );
    }

    #[test]
    fn test_amount_wrong_json_type_is_not_a_number() {
        for amount in [json!(true), json!({"value": 1}), json!([1, 2])] {
            let err = create(json!({"name": "Ada", "category": "Eng", "amount": amount}))
                .unwrap_err();
            assert_eq!(err, ApiError::Validation("amount must be a number".to_string()));

            let err = patch(json!({"amount": amount})).unwrap_err();
            assert_eq!(err, ApiError::Validation("amount must be a number".to_string()));
        }
    }

    #[test]
    fn test_negative_zero_amount_normalized() {
        let record = create(json!({"name": "Ada", "category": "Eng", "amount": -0.0})).unwrap();
        assert!(record.amount.is_sign_positive());

        let patch = patch(json!({"amount": "-0"})).unwrap();
        assert!(patch.amount.unwrap().is_sign_positive());
    }

    #[test]
    fn test_patch_skips_empty_and_null() {
        let patch = patch(json!({"name": "", "category": null, "amount": null})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_patch_only_amount() {
        let patch = patch(json!({"amount": "2500"})).unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.category, None);
        assert_eq!(patch.amount, Some(2500.0));
    }

    #[test]
    fn test_patch_validates_amount() {
        let err = patch(json!({"amount": "abc"})).unwrap_err();
        assert_eq!(err, ApiError::Validation("amount must be a number".to_string()));
    }

    #[test]
    fn test_patch_ignores_unknown_fields() {
        let patch = patch(json!({"name": "Grace", "department": "ignored"})).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Grace"));
    }
}
