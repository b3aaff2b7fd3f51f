use std::fmt;

use crate::domain::backend::LoginCredentials;

const MIN_PASSWORD_LEN: usize = 4;

// Form-level problems found before any backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsError {
    EmailRequired,
    EmailInvalid,
    PasswordRequired,
    PasswordTooShort,
}

impl CredentialsError {
    pub fn field(&self) -> &'static str {
        match self {
            CredentialsError::EmailRequired | CredentialsError::EmailInvalid => "email",
            CredentialsError::PasswordRequired | CredentialsError::PasswordTooShort => "password",
        }
    }
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialsError::EmailRequired => write!(f, "Email is required"),
            CredentialsError::EmailInvalid => write!(f, "Email is invalid"),
            CredentialsError::PasswordRequired => write!(f, "Password is required"),
            CredentialsError::PasswordTooShort => {
                write!(f, "Password must be at least {MIN_PASSWORD_LEN} characters")
            }
        }
    }
}

// Validate the login form, reporting every failing field at once.
pub fn validate_credentials(credentials: &LoginCredentials) -> Result<(), Vec<CredentialsError>> {
    let mut errors = Vec::new();

    if credentials.email.is_empty() {
        errors.push(CredentialsError::EmailRequired);
    } else if !looks_like_email(&credentials.email) {
        errors.push(CredentialsError::EmailInvalid);
    }

    if credentials.password.is_empty() {
        errors.push(CredentialsError::PasswordRequired);
    } else if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(CredentialsError::PasswordTooShort);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// Loose `something@something.something` check; the backend owns real validation.
fn looks_like_email(value: &str) -> bool {
    value.split_whitespace().any(|word| {
        word.match_indices('@')
            .any(|(at, _)| at > 0 && has_inner_dot(&word[at + 1..]))
    })
}

// A dot with at least one character on each side.
fn has_inner_dot(domain: &str) -> bool {
    domain
        .match_indices('.')
        .any(|(dot, _)| dot > 0 && dot + 1 < domain.len())
}
