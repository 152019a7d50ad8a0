use garde::Validate;

use crate::error::{AppError, Result};

/// Longest name the identity service accepts.
const NAME_MAX_CHARS: usize = 128;
/// Password length bounds of the identity service.
const PASSWORD_MIN_CHARS: usize = 8;
const PASSWORD_MAX_CHARS: usize = 256;

/// Validates a display name.
///
/// # Arguments
///
/// * `name` - The name to validate, already trimmed.
///
/// # Returns
///
/// A `Result<()>` indicating whether the name is valid.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    if name.chars().count() > NAME_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Name must be at most {} characters",
            NAME_MAX_CHARS
        )));
    }

    Ok(())
}

/// An email address checked with garde's email rule.
#[derive(Validate)]
struct EmailAddress {
    #[garde(email)]
    email: String,
}

/// Validates an email address.
///
/// Only the shape is checked; the identity service has the final word on
/// whether the address is usable. Hosts without a dot are refused.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let address = EmailAddress {
        email: email.to_string(),
    };
    let has_dotted_host = email
        .rsplit_once('@')
        .is_some_and(|(_, host)| host.contains('.') && !host.ends_with('.'));

    if address.validate().is_err() || !has_dotted_host {
        return Err(AppError::Validation(
            "Email must be a valid email address".to_string(),
        ));
    }

    Ok(())
}

/// Validates a password.
///
/// # Arguments
///
/// * `password` - The password to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the password is valid.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let length = password.chars().count();

    if length < PASSWORD_MIN_CHARS {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_CHARS
        )));
    }

    if length > PASSWORD_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Password must be at most {} characters",
            PASSWORD_MAX_CHARS
        )));
    }

    Ok(())
}
