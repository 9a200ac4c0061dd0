use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::arrangement::Arrangement;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub country: String,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub accept_terms: bool,
}

/// Body of `POST /api/reservations/book`, forwarded to the PMS once valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub customer: CustomerData,
    pub selected_arrangement: Arrangement,
    /// Transaction id handed out by the payment provider after tokenization.
    pub transaction_id: String,
}

/// Field name to message, serialized as-is for the booking form.
pub type FieldErrors = BTreeMap<String, String>;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9 ()\-/]{6,20}$";

fn matches(pattern: &str, value: &str) -> bool {
    Regex::new(pattern)
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let customer = &self.customer;

        if customer.first_name.trim().is_empty() {
            errors.insert("firstName".into(), "First name is required".into());
        }
        if customer.last_name.trim().is_empty() {
            errors.insert("lastName".into(), "Last name is required".into());
        }
        if customer.email.trim().is_empty() {
            errors.insert("email".into(), "Email is required".into());
        } else if !matches(EMAIL_PATTERN, customer.email.trim()) {
            errors.insert("email".into(), "Email address is invalid".into());
        }
        if customer.phone.trim().is_empty() {
            errors.insert("phone".into(), "Phone number is required".into());
        } else if !matches(PHONE_PATTERN, customer.phone.trim()) {
            errors.insert("phone".into(), "Phone number is invalid".into());
        }
        if customer.country.trim().is_empty() {
            errors.insert("country".into(), "Country is required".into());
        }
        if !customer.accept_terms {
            errors.insert(
                "acceptTerms".into(),
                "The terms and conditions must be accepted".into(),
            );
        }
        if self.transaction_id.trim().is_empty() {
            errors.insert("transactionId".into(), "Payment has not been completed".into());
        }

        let nights = &self.selected_arrangement.nights;
        if nights.is_empty() || nights.iter().any(|night| night.guest_count() == 0) {
            errors.insert(
                "selectedArrangement".into(),
                "Every night needs at least one occupied room".into(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> BookingRequest {
        serde_json::from_value(json!({
            "customer": {
                "firstName": "Anna",
                "lastName": "Jansen",
                "email": "anna@example.com",
                "phone": "+31 6 1234 5678",
                "country": "NL",
                "acceptTerms": true
            },
            "selectedArrangement": {
                "length": 3,
                "travel_mode": "walking",
                "nights": [{
                    "date": "2025-06-01",
                    "hotel": "hotel1",
                    "board": "B&B",
                    "rooms": [{ "category_id": "double", "occupant_adults": 2 }]
                }]
            },
            "transactionId": "dt-123"
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_field_errors_are_collected() {
        let mut request = request();
        request.customer.first_name = "  ".into();
        request.customer.email = "anna.example.com".into();
        request.customer.phone = "call me".into();
        request.customer.accept_terms = false;

        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors["email"], "Email address is invalid");
        assert!(errors.contains_key("firstName"));
        assert!(errors.contains_key("phone"));
        assert!(errors.contains_key("acceptTerms"));
    }

    #[test]
    fn test_unoccupied_night_is_rejected() {
        let mut request = request();
        request.selected_arrangement.nights[0].rooms[0].occupant_adults = 0;
        request.transaction_id = String::new();

        let errors = request.validate().unwrap_err();
        assert!(errors.contains_key("selectedArrangement"));
        assert!(errors.contains_key("transactionId"));
    }
}
