//! Optional password supplied for encrypted containers.

use std::fmt;

/// A password used to unlock an encrypted container for a single call.
///
/// The value is never printed: `Debug` is redacted and there is no
/// `Display` implementation, so a credential cannot leak into logs or
/// error messages by accident.
///
/// An empty credential is distinct from an absent one (`Option::None`).
/// Only the 7z driver treats both the same way.
///
/// # Examples
///
/// ```
/// use arcx_core::Credential;
///
/// let credential = Credential::new("secret");
/// assert_eq!(credential.expose(), "secret");
/// assert_eq!(format!("{credential:?}"), "Credential(<redacted>)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a password.
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Returns the password text for handing to a codec.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the password is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<&str> for Credential {
    fn from(password: &str) -> Self {
        Self::new(password)
    }
}

impl From<String> for Credential {
    fn from(password: String) -> Self {
        Self(password)
    }
}
