//! Form input and validation
//!
//! Everything here runs before any network call.

use crate::error::{ClientError, ClientResult};
use crate::identity::{Credentials, validate_pin};

/// Harvest form as filled in by the farmer
#[derive(Debug, Clone)]
pub struct HarvestForm {
    pub credentials: Credentials,
    pub plot_location: String,
    pub crop_type: String,
    /// None when the weight field was left empty
    pub weight_kg: Option<f64>,
}

impl HarvestForm {
    pub fn new(
        credentials: Credentials,
        plot_location: impl Into<String>,
        crop_type: impl Into<String>,
        weight_kg: Option<f64>,
    ) -> Self {
        Self {
            credentials,
            plot_location: plot_location.into(),
            crop_type: crop_type.into(),
            weight_kg,
        }
    }

    /// Validate the form and return the weight
    pub fn validate(&self) -> ClientResult<f64> {
        let weight = match self.weight_kg {
            Some(w)
                if !self.credentials.phone_number.is_empty()
                    && !self.credentials.pin().is_empty()
                    && !self.plot_location.is_empty()
                    && !self.crop_type.is_empty() =>
            {
                w
            }
            _ => return Err(ClientError::validation("All fields are required.")),
        };

        if !weight.is_finite() || weight <= 0.0 {
            return Err(ClientError::validation(
                "Harvest weight must be a positive number.",
            ));
        }

        validate_pin(self.credentials.pin())?;
        Ok(weight)
    }
}

/// Validate login input
pub fn validate_login(credentials: &Credentials) -> ClientResult<()> {
    if credentials.phone_number.is_empty() || credentials.pin().is_empty() {
        return Err(ClientError::validation(
            "Please enter both phone number and PIN",
        ));
    }
    validate_pin(credentials.pin())
}

/// Sign-up form
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub full_name: String,
    pub credentials: Credentials,
    pub confirm_pin: String,
}

impl SignUpForm {
    pub fn new(
        full_name: impl Into<String>,
        credentials: Credentials,
        confirm_pin: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            credentials,
            confirm_pin: confirm_pin.into(),
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        if self.full_name.is_empty()
            || self.credentials.phone_number.is_empty()
            || self.credentials.pin().is_empty()
            || self.confirm_pin.is_empty()
        {
            return Err(ClientError::validation("Please fill in all fields"));
        }
        validate_pin(self.credentials.pin())?;
        if self.credentials.pin() != self.confirm_pin {
            return Err(ClientError::validation("PINs do not match"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pin: &str, weight: Option<f64>) -> HarvestForm {
        HarvestForm::new(
            Credentials::new("+254700000001", pin),
            "North Field - Section A",
            "Maize",
            weight,
        )
    }

    #[test]
    fn test_valid_form() {
        assert_eq!(form("123456", Some(50.0)).validate().unwrap(), 50.0);
    }

    #[test]
    fn test_short_pin_rejected() {
        let err = form("12345", Some(50.0)).validate().unwrap_err();
        assert_eq!(err.to_string(), "PIN must be exactly 6 digits.");
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        for weight in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = form("123456", Some(weight)).validate().unwrap_err();
            assert_eq!(err.to_string(), "Harvest weight must be a positive number.");
        }
    }

    #[test]
    fn test_missing_fields_rejected_first() {
        let err = form("12345", None).validate().unwrap_err();
        assert_eq!(err.to_string(), "All fields are required.");

        let mut f = form("123456", Some(1.0));
        f.crop_type.clear();
        assert_eq!(f.validate().unwrap_err().to_string(), "All fields are required.");
    }

    #[test]
    fn test_login_validation() {
        assert!(validate_login(&Credentials::new("+1", "123456")).is_ok());
        assert_eq!(
            validate_login(&Credentials::new("", "123456")).unwrap_err().to_string(),
            "Please enter both phone number and PIN"
        );
        assert_eq!(
            validate_login(&Credentials::new("+1", "12")).unwrap_err().to_string(),
            "PIN must be exactly 6 digits."
        );
    }

    #[test]
    fn test_sign_up_validation() {
        let ok = SignUpForm::new("Wanjiru", Credentials::new("+1", "123456"), "123456");
        assert!(ok.validate().is_ok());

        let mismatch = SignUpForm::new("Wanjiru", Credentials::new("+1", "123456"), "654321");
        assert_eq!(mismatch.validate().unwrap_err().to_string(), "PINs do not match");

        let empty = SignUpForm::new("", Credentials::new("+1", "123456"), "123456");
        assert_eq!(empty.validate().unwrap_err().to_string(), "Please fill in all fields");
    }
}
