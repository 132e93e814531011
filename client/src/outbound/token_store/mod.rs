//! Token storage adapters.
//!
//! - [`FileTokenStore`]: JSON file in a configured directory, the default
//!   for the command-line client.
//! - [`InMemoryTokenStore`]: process-local storage for tests and
//!   short-lived embedders.

mod file;
mod memory;

pub use file::{FileTokenStore, TOKEN_FILE_NAME};
pub use memory::InMemoryTokenStore;
