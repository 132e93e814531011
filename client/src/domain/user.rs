//! Marketplace users and the forms that create or edit them.
//!
//! Users are owned by the backend; the client only holds copies. Profile
//! and sign-up forms are checked locally before submission so obviously
//! incomplete input never reaches the network.

use std::fmt;
use std::path::PathBuf;

use zeroize::Zeroizing;

use super::rating::Rating;
use super::university::{University, UniversityId};
use super::validation::FieldErrors;

/// Message reported when a profile form lacks a required field.
pub const PROFILE_REQUIRED_MESSAGE: &str =
    "Name, university, profile image, and phone number are required.";

/// Field key under which whole-form messages are grouped.
pub const FORM_FIELD: &str = "form";

/// Backend identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

impl UserId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A marketplace user as reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Display name, usually `first_name last_name`.
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    /// Phone verification flag. Unverified users cannot reach the marketplace.
    pub is_verified: bool,
    /// URL of the profile picture.
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub university: Option<University>,
    pub seller_rating: Rating,
    pub buyer_rating: Rating,
}

impl User {
    /// Name to show for the user, falling back to the username when the
    /// backend left the display name blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.username.as_str()
        } else {
            self.name.as_str()
        }
    }
}

/// Raw profile form input.
///
/// Shared by sign-up and profile editing. `profile_image` is a local file
/// uploaded alongside the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub university: Option<UniversityId>,
    pub phone_number: String,
    pub profile_image: Option<PathBuf>,
}

/// Profile fields that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSubmission {
    pub first_name: String,
    pub last_name: String,
    pub university: UniversityId,
    pub phone_number: String,
    pub profile_image: PathBuf,
}

impl ProfileForm {
    /// Check that every required field is present.
    ///
    /// A single whole-form message is reported under [`FORM_FIELD`],
    /// whichever fields are missing.
    ///
    /// # Examples
    /// ```
    /// use mycollegebook::domain::{ProfileForm, PROFILE_REQUIRED_MESSAGE, FORM_FIELD};
    ///
    /// let errors = ProfileForm::default().validate().unwrap_err();
    /// assert_eq!(errors.first_of(&[FORM_FIELD]), Some(PROFILE_REQUIRED_MESSAGE));
    /// ```
    pub fn validate(self) -> Result<ProfileSubmission, FieldErrors> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let phone_number = self.phone_number.trim();
        match (self.university, self.profile_image) {
            (Some(university), Some(profile_image))
                if !first_name.is_empty() && !last_name.is_empty() && !phone_number.is_empty() =>
            {
                Ok(ProfileSubmission {
                    first_name: first_name.to_owned(),
                    last_name: last_name.to_owned(),
                    university,
                    phone_number: phone_number.to_owned(),
                    profile_image,
                })
            }
            _ => {
                let mut errors = FieldErrors::new();
                errors.push(FORM_FIELD, PROFILE_REQUIRED_MESSAGE);
                Err(errors)
            }
        }
    }
}

/// Raw sign-up input: a profile plus login details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAccount {
    pub profile: ProfileForm,
    pub email: String,
    pub username: String,
    pub password: Zeroizing<String>,
}

/// Sign-up input that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSubmission {
    pub profile: ProfileSubmission,
    pub email: String,
    pub username: String,
    pub password: Zeroizing<String>,
}

impl NewAccount {
    /// Validate the profile part and require login details.
    ///
    /// Email, username and password are otherwise left to the backend,
    /// which reports duplicates and malformed addresses per field.
    pub fn validate(self) -> Result<AccountSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = self.email.trim().to_owned();
        let username = self.username.trim().to_owned();
        if email.is_empty() {
            errors.push("email", "Email is required.");
        }
        if username.is_empty() {
            errors.push("username", "Username is required.");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required.");
        }

        let profile = match self.profile.validate() {
            Ok(profile) => Some(profile),
            Err(profile_errors) => {
                for message in profile_errors.messages() {
                    errors.push(FORM_FIELD, message);
                }
                None
            }
        };

        match profile {
            Some(profile) if errors.is_empty() => Ok(AccountSubmission {
                profile,
                email,
                username,
                password: self.password,
            }),
            _ => Err(errors),
        }
    }
}
