use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("email is required")]
    MissingEmail,
    #[error("{0} is not a valid email")]
    InvalidEmail(String),
    #[error("password is required")]
    MissingPassword,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

/// Signup credentials that passed validation. The password is still plaintext here.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(email: Option<String>, password: Option<String>) -> Result<Self, CredentialsError> {
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or(CredentialsError::MissingEmail)?;
        if !EMAIL_RE.is_match(&email) {
            return Err(CredentialsError::InvalidEmail(email));
        }
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or(CredentialsError::MissingPassword)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::PasswordTooShort);
        }
        Ok(Self { email, password })
    }
}
