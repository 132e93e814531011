//! Inbound adapters that translate external input into domain calls while
//! keeping framework details at the edge.
//!
//! The command line under [`cli`] stands in for the marketplace screens.

pub mod cli;
