//! Segment Predictor
//!
//! Form state for the six spending categories and the single-profile
//! prediction call. The form only ever submits one profile even though the
//! endpoint accepts a batch.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::{FormError, Result};
use crate::models::CustomerProfile;

/// Spending categories the segmentation model was trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpendingCategory {
    Utilities,
    Groceries,
    Transport,
    Shopping,
    Dining,
    Other,
}

impl SpendingCategory {
    pub const ALL: [SpendingCategory; 6] = [
        SpendingCategory::Utilities,
        SpendingCategory::Groceries,
        SpendingCategory::Transport,
        SpendingCategory::Shopping,
        SpendingCategory::Dining,
        SpendingCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SpendingCategory::Utilities => "Utilities",
            SpendingCategory::Groceries => "Groceries",
            SpendingCategory::Transport => "Transport",
            SpendingCategory::Shopping => "Shopping",
            SpendingCategory::Dining => "Dining",
            SpendingCategory::Other => "Other",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Raw input of the predictor form, one string per category.
///
/// Values are kept as typed so the inputs round-trip what the user sees;
/// they are parsed only on [`SpendingForm::profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendingForm {
    values: [String; 6],
}

impl Default for SpendingForm {
    fn default() -> Self {
        Self {
            values: std::array::from_fn(|_| "0".to_string()),
        }
    }
}

impl SpendingForm {
    pub fn value(&self, category: SpendingCategory) -> &str {
        &self.values[category.index()]
    }

    pub fn set(&mut self, category: SpendingCategory, raw: impl Into<String>) {
        self.values[category.index()] = raw.into();
    }

    /// Parse one field: required, numeric, not negative
    pub fn amount(&self, category: SpendingCategory) -> std::result::Result<f64, FormError> {
        let field = category.label();
        let raw = self.value(category).trim();
        if raw.is_empty() {
            return Err(FormError::Missing { field });
        }

        let amount: f64 = raw.parse().map_err(|_| FormError::NotANumber {
            field,
            value: raw.to_string(),
        })?;
        if !amount.is_finite() {
            return Err(FormError::NotANumber {
                field,
                value: raw.to_string(),
            });
        }
        if amount < 0.0 {
            return Err(FormError::Negative { field });
        }
        Ok(amount)
    }

    pub fn is_valid(&self) -> bool {
        SpendingCategory::ALL.iter().all(|c| self.amount(*c).is_ok())
    }

    /// Validate every field and build the profile to submit
    pub fn profile(&self) -> std::result::Result<CustomerProfile, FormError> {
        let text = |category| self.amount(category).map(format_amount);
        Ok(CustomerProfile {
            utilities: text(SpendingCategory::Utilities)?,
            groceries: text(SpendingCategory::Groceries)?,
            transport: text(SpendingCategory::Transport)?,
            shopping: text(SpendingCategory::Shopping)?,
            dining: text(SpendingCategory::Dining)?,
            other: text(SpendingCategory::Other)?,
        })
    }
}

/// Shortest decimal form of an amount: `50.0` -> `"50"`, `12.5` -> `"12.5"`.
pub fn format_amount(amount: f64) -> String {
    // -0 would otherwise print with its sign
    let amount = if amount == 0.0 { 0.0 } else { amount };
    amount.to_string()
}

/// Submit one profile and return the segment assigned to it.
///
/// `Ok(None)` means the service answered with an empty prediction list.
pub async fn predict_first(client: &ApiClient, profile: CustomerProfile) -> Result<Option<u32>> {
    let response = client.predict_segment(std::slice::from_ref(&profile)).await?;
    debug!(predictions = ?response.predictions, "Prediction received");
    Ok(response.first_segment())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(values: [&str; 6]) -> SpendingForm {
        let mut form = SpendingForm::default();
        for (category, value) in SpendingCategory::ALL.iter().zip(values) {
            form.set(*category, value);
        }
        form
    }

    #[test]
    fn test_profile_keeps_plain_decimal_strings() {
        let profile = form(["50", "120", "0", "30", "15", "5"]).profile().unwrap();
        let json = serde_json::to_string(&[profile]).unwrap();
        assert_eq!(
            json,
            r#"[{"Utilities":"50","Groceries":"120","Transport":"0","Shopping":"30","Dining":"15","Other":"5"}]"#
        );
    }

    #[test]
    fn test_fractional_amounts() {
        let profile = form(["12.5", "0.10", "3", "4.75", "1e2", "-0"]).profile().unwrap();
        assert_eq!(profile.utilities, "12.5");
        assert_eq!(profile.groceries, "0.1");
        assert_eq!(profile.shopping, "4.75");
        assert_eq!(profile.dining, "100");
        assert_eq!(profile.other, "0");
    }

    #[test]
    fn test_default_form_is_all_zero() {
        let form = SpendingForm::default();
        assert!(form.is_valid());
        assert_eq!(form.value(SpendingCategory::Dining), "0");
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = form(["50", "", "0", "30", "15", "5"]).profile().unwrap_err();
        assert_eq!(err, FormError::Missing { field: "Groceries" });
    }

    #[test]
    fn test_negative_field_rejected() {
        let err = form(["50", "1", "-2", "30", "15", "5"]).profile().unwrap_err();
        assert_eq!(err, FormError::Negative { field: "Transport" });
    }

    #[test]
    fn test_non_numeric_field_rejected() {
        let f = form(["50", "1", "2", "lots", "15", "NaN"]);
        assert!(!f.is_valid());
        assert!(matches!(
            f.amount(SpendingCategory::Shopping),
            Err(FormError::NotANumber { field: "Shopping", .. })
        ));
        assert!(f.amount(SpendingCategory::Other).is_err());
    }
}
