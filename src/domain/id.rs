//! Identifier classification
//!
//! Connect ids are 26 character lowercase base32-ish strings. Anything else
//! handed to a lookup is treated as a human title (vault name, item title).

/// Length of a Connect object id
pub const ID_LENGTH: usize = 26;

/// Returns true when `s` has the shape of a Connect id.
pub fn is_id(s: &str) -> bool {
    s.len() == ID_LENGTH && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// A vault or item reference, classified as an id or a title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    Id(&'a str),
    Title(&'a str),
}

impl<'a> Reference<'a> {
    pub fn classify(s: &'a str) -> Self {
        if is_id(s) {
            Reference::Id(s)
        } else {
            Reference::Title(s)
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Reference::Id(s) | Reference::Title(s) => s,
        }
    }
}
