//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use member_core::{validate_phone_number, PhoneRegion};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

/// Member registration request
///
/// Length limits apply to the raw input; names are truncated further by the
/// sanitizer.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "First name must be 1-255 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "Last name must be 1-255 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub phone: Option<String>,

    #[validate(range(min = 0, message = "Age must not be negative"))]
    pub age: Option<i32>,

    #[serde(default)]
    pub is_employee: bool,
}

impl CreateMemberRequest {
    /// Run the schema checks plus phone validation for `region`
    ///
    /// The phone check needs the configured default region, so it cannot be
    /// expressed as a field attribute.
    pub fn validate_for_region(&self, region: PhoneRegion) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_default();

        if let Some(phone) = &self.phone {
            if !validate_phone_number(phone, region) {
                errors.add(
                    "phone",
                    ValidationError::new("phone").with_message("Invalid phone number format".into()),
                );
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
