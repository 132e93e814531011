//! Fixture data and file helpers shared by the unit tests and the
//! integration suites (which enable the `test-support` feature).

use crate::domain::{
    BookListing, BookListingId, ListingStatus, Price, Rating, University, UniversityId, User,
    UserId,
};

/// A verified user with predictable fields derived from `id`.
pub fn sample_user(id: u64) -> User {
    User {
        id: UserId::new(id),
        username: format!("student{id}"),
        email: format!("student{id}@gatech.edu"),
        name: format!("Student {id}"),
        first_name: "Student".to_owned(),
        last_name: id.to_string(),
        is_verified: true,
        profile_picture: None,
        phone_number: Some("4045550100".to_owned()),
        university: Some(sample_university(1)),
        seller_rating: Rating::score(9.0),
        buyer_rating: Rating::NoRatings,
    }
}

/// Same as [`sample_user`] but awaiting phone verification.
pub fn unverified_user(id: u64) -> User {
    User {
        is_verified: false,
        ..sample_user(id)
    }
}

pub fn sample_university(id: u64) -> University {
    University {
        id: UniversityId::new(id),
        name: "Georgia Institute of Technology".to_owned(),
        country: Some("United States".to_owned()),
        alpha_two_code: Some("US".to_owned()),
    }
}

/// An ownerless active listing priced at `price_cents`.
pub fn sample_listing(id: u64, price_cents: u64) -> BookListing {
    BookListing {
        id: BookListingId::new(id),
        owner: None,
        buyer: None,
        name: format!("Textbook {id}"),
        author: "Stewart".to_owned(),
        image: Some(format!("http://localhost:8000/media/{id}.jpg")),
        price: Price::from_cents(price_cents),
        edition: 3,
        condition: "Good".to_owned(),
        class_number: Some("MATH 1552".to_owned()),
        professor: None,
        status: ListingStatus::Active,
    }
}

/// File helpers for tests that go through `cap_std` like the token store.
pub mod cap_fs {
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    fn split(path: &Path) -> io::Result<(Dir, &Path)> {
        let name = path
            .file_name()
            .map(Path::new)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no file name"))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Ok((Dir::open_ambient_dir(parent, ambient_authority())?, name))
    }

    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let (dir, name) = split(path)?;
        dir.read_to_string(name)
    }

    /// Create or truncate `path`; its directory must already exist.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (dir, name) = split(path)?;
        dir.write(name, contents)
    }

    /// False when the file or any parent directory is missing.
    pub fn path_exists(path: &Path) -> bool {
        split(path).is_ok_and(|(dir, name)| dir.exists(name))
    }
}
