//! Multipart bodies for uploads that carry an image.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use reqwest::multipart::{Form, Part};

use crate::domain::ports::ApiError;
use crate::domain::{AccountSubmission, ListingSubmission, ProfileSubmission};

const IMAGE_FILE_NAME: &str = "photo.jpg";
const IMAGE_MIME: &str = "image/jpeg";

fn read_image(path: &Path) -> io::Result<Vec<u8>> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "image path has no file name")
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.read(Path::new(file_name))
}

/// File part for the image at `path`.
///
/// The backend stores uploads under its own names, so every image goes out
/// as `photo.jpg` with a JPEG content type whatever the source file is.
pub(super) fn image_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = read_image(path).map_err(|err| {
        ApiError::invalid_request(format!("could not read image {}: {err}", path.display()))
    })?;
    Part::bytes(bytes)
        .file_name(IMAGE_FILE_NAME)
        .mime_str(IMAGE_MIME)
        .map_err(|err| ApiError::invalid_request(err.to_string()))
}

pub(super) fn listing_form(listing: &ListingSubmission) -> Result<Form, ApiError> {
    Ok(Form::new()
        .text("name", listing.name.clone())
        .text("edition", listing.edition.to_string())
        .text("author", listing.author.clone())
        .text("condition", listing.condition.clone())
        .text("price", listing.price.to_string())
        .text("professor", listing.professor.clone())
        .text("class_number", listing.class_number.clone())
        .part("image", image_part(&listing.image)?))
}

fn with_profile(form: Form, profile: &ProfileSubmission) -> Result<Form, ApiError> {
    Ok(form
        .text("first_name", profile.first_name.clone())
        .text("last_name", profile.last_name.clone())
        .text("university", profile.university.to_string())
        .text("phone_number", profile.phone_number.clone())
        .part("profile_picture", image_part(&profile.profile_image)?))
}

pub(super) fn account_form(account: &AccountSubmission) -> Result<Form, ApiError> {
    let form = Form::new()
        .text("email", account.email.clone())
        .text("username", account.username.clone())
        .text("password", account.password.as_str().to_owned())
        .text("is_active", "true");
    with_profile(form, &account.profile)
}

pub(super) fn profile_form(profile: &ProfileSubmission) -> Result<Form, ApiError> {
    with_profile(Form::new(), profile)
}
