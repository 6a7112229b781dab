//! Input validation functions
//!
//! Only presence is checked: a field must exist and contain something other
//! than whitespace. Format rules (email syntax, password strength) are not
//! enforced.

use secrecy::SecretString;
use validator::{Validate, ValidationError};

use crate::errors::MalformedInput;
use crate::types::{Credentials, CredentialsRequest};

/// Fields reported in this order when several are missing
const CREDENTIAL_FIELDS: [&str; 2] = ["email", "password"];

/// Reject empty or whitespace-only values
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = MalformedInput;

    fn try_from(request: CredentialsRequest) -> Result<Self, Self::Error> {
        if let Err(errors) = request.validate() {
            let field_errors = errors.field_errors();
            let missing = CREDENTIAL_FIELDS
                .iter()
                .find(|field| field_errors.get(**field).is_some())
                .copied()
                .unwrap_or("body");
            return Err(MalformedInput::field(
                missing,
                format!("{} is required", missing),
            ));
        }

        Ok(Credentials {
            email: request.email.trim().to_string(),
            password: SecretString::new(request.password),
        })
    }
}
