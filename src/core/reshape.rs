//! Reshaping of scraped listing blobs into export rows.
//!
//! A blob looks like `Name · 4.8(52) · Category · 098 765 4321 · Open`.
//! The first field carries the name plus review text; the digit runs of
//! the later fields carry the contact number.

use crate::domain::model::{ExportRow, RawListing};
use crate::utils::error::Result;
use regex::Regex;

/// Digit strings shorter than this are not phone numbers.
pub const CONTACT_MIN_DIGITS: usize = 10;
/// Longer runs are capped to their trailing digits.
const CONTACT_MAX_DIGITS: usize = 12;

pub struct Reshaper {
    digits: Regex,
}

impl Reshaper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            digits: Regex::new(r"[0-9]+")?,
        })
    }

    /// Reshape one listing, or None when neither contact field holds a
    /// plausible phone number.
    pub fn reshape(&self, listing: &RawListing, short_names: &[String]) -> Option<ExportRow> {
        let fields: Vec<&str> = listing.blob.split('·').map(str::trim).collect();

        let name_review = fields.first().copied().unwrap_or("").to_string();
        let first_contact = self.digit_run(fields.get(2).copied());
        let second_contact = self.digit_run(fields.get(3).copied());

        if first_contact.len() < CONTACT_MIN_DIGITS && second_contact.len() < CONTACT_MIN_DIGITS {
            return None;
        }

        let name = short_names
            .iter()
            .find(|short| listing.blob.contains(short.as_str()))
            .cloned()
            .unwrap_or_default();

        Some(ExportRow {
            link: listing.link.clone(),
            name,
            name_review,
            contact: contact_details(&first_contact, &second_contact),
        })
    }

    /// Concatenated digit runs of a field; empty when the field is
    /// missing or holds no digits.
    fn digit_run(&self, field: Option<&str>) -> String {
        match field {
            Some(text) => self.digits.find_iter(text).map(|m| m.as_str()).collect(),
            None => String::new(),
        }
    }
}

/// Combine the two candidate digit strings into one contact value.
/// Runs shorter than the phone threshold count as zero, longer runs are
/// capped to their last digits before the numeric sum.
pub fn contact_details(first: &str, second: &str) -> String {
    (contact_value(first) + contact_value(second)).to_string()
}

fn contact_value(digits: &str) -> u64 {
    if digits.len() < CONTACT_MIN_DIGITS {
        return 0;
    }
    // ASCII digits only, so byte indexing is safe.
    let tail = &digits[digits.len().saturating_sub(CONTACT_MAX_DIGITS)..];
    tail.parse().unwrap_or(0)
}
