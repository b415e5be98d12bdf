//! Field predicates and tri-state field validity.

/// Minimum number of characters (after trimming) a password must exceed.
pub const PASSWORD_MIN_EXCLUSIVE: usize = 6;

/// Validity of a single input field.
///
/// `Unknown` means the field has never lost focus, so no error may be shown
/// yet. It is kept distinct from `Invalid` on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldValidity {
    /// Field has not been blurred yet.
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl FieldValidity {
    pub fn from_bool(valid: bool) -> Self {
        if valid {
            FieldValidity::Valid
        } else {
            FieldValidity::Invalid
        }
    }

    /// Returns true only for a field that was evaluated and failed.
    pub fn is_invalid(self) -> bool {
        matches!(self, FieldValidity::Invalid)
    }
}

/// An email is accepted when it contains an `@`.
pub fn email_is_valid(email: &str) -> bool {
    email.contains('@')
}

/// A password is accepted when its trimmed length exceeds six characters.
pub fn password_is_valid(password: &str) -> bool {
    password.trim().chars().count() > PASSWORD_MIN_EXCLUSIVE
}

/// Both predicates combined, as used for submit-enablement.
pub fn credentials_are_valid(email: &str, password: &str) -> bool {
    email_is_valid(email) && password_is_valid(password)
}
