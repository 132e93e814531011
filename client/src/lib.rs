//! MyCollegeBook client core.
//!
//! A session manager and typed API client for the used-textbook
//! marketplace backend, laid out as a hexagon: `domain` holds entities,
//! state and ports; `outbound` implements the ports over HTTP and local
//! storage; `inbound` drives the library from the command line.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
