//! ICS file generation and parsing.
//!
//! Each event in a [`crate::store::DirStore`] calendar is one .ics file
//! holding a single VEVENT (RFC 5545).

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::parse_event;
