//! Parsers for the delimited tables the pipeline consumes.
//!
//! Two formats are read:
//!
//! - **Location tables** ([`locations`]): one row per CDS observation, with
//!   genome identifier, sequence identifier, and start/end coordinates.
//!   Produced by the annotation-extraction collaborator; rows with missing
//!   coordinates are expected and silently filtered.
//! - **Pair tables** ([`pairs`]): one row per sequence pairing with its
//!   genome distance, as written by the `pair` and `candidates` subcommands
//!   and read back by `report`.
//!
//! Both parsers accept tab- or comma-delimited text, skip blank lines and
//! `#` comments, and detect an optional header on the first data line.

pub mod locations;
pub mod pairs;

pub use locations::{parse_location_file, parse_location_text, ParseError};
pub use pairs::{parse_pair_file, parse_pair_text};
