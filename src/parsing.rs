//! # Parsing
//! Coordinates, pieces and board placements are parsable from raw strings using
//! the standard Rust [`FromStr`](std::str::FromStr) trait.
//!
//! On top of that, types that appear inside larger inputs (protocol commands,
//! for example) implement the [`PartialFromStr`] trait. This trait implements
//! *parser combinators*.
//!
//! Unlike [`FromStr`](std::str::FromStr), the `Ok` variant returned by
//! [`PartialFromStr`] contains two values:
//! - The parsed value
//! - A suffix of the input that was not part of the parsed value.
//!
//! A string like "3,4 rest" would return `Ok((Coord(3, 4), " rest"))` when parsed.

pub trait PartialFromStr: Sized {
    type Err;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err>;
}
