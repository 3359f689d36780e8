//! Grading: field-by-field and whole-submission comparison.
//!
//! Comparison is plain string equality after per-field normalization:
//! yes/no fields are uppercased, value fields compare case-insensitively
//! (hex digits may be typed in either case). A whole submission is correct
//! when every mandatory field matches and every optional field either
//! matches or was never touched; an untouched empty input must not count
//! as correct merely because the key happens to be empty, as it does for
//! the optional fields in a page-fault exercise.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::exercise::scenario::AnswerKey;

/// The quiz fields, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    /// The generated virtual address (binary).
    VirtualAddress,
    /// Virtual page number.
    Vpn,
    /// TLB index.
    Tlbi,
    /// TLB tag.
    Tlbt,
    /// TLB hit verdict (Y/N).
    TlbHit,
    /// Page fault verdict (Y/N).
    PageFault,
    /// Physical page number (optional: empty on a fault).
    Ppn,
    /// Physical address (optional: empty on a fault).
    PhysicalAddress,
    /// Reserved (always empty).
    PageHit,
}

impl Field {
    /// All fields, in presentation order.
    pub const ALL: [Self; 9] = [
        Self::VirtualAddress,
        Self::Vpn,
        Self::Tlbi,
        Self::Tlbt,
        Self::TlbHit,
        Self::PageFault,
        Self::Ppn,
        Self::PhysicalAddress,
        Self::PageHit,
    ];

    /// Whether this field is only graded once the user has touched it.
    ///
    /// `Ppn` and `PhysicalAddress` are empty in the answer key of a
    /// page-fault exercise; `PageHit` is reserved and always empty.
    pub fn is_optional(self) -> bool {
        matches!(self, Self::Ppn | Self::PhysicalAddress | Self::PageHit)
    }

    /// Whether this field holds a Y/N verdict rather than a value.
    pub fn is_yes_no(self) -> bool {
        matches!(self, Self::TlbHit | Self::PageFault | Self::PageHit)
    }

    /// Human-readable label for prompts and verdict lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::VirtualAddress => "Virtual address",
            Self::Vpn => "VPN",
            Self::Tlbi => "TLB index",
            Self::Tlbt => "TLB tag",
            Self::TlbHit => "TLB hit (Y/N)",
            Self::PageFault => "Page fault (Y/N)",
            Self::Ppn => "PPN",
            Self::PhysicalAddress => "Physical address",
            Self::PageHit => "Page hit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl AnswerKey {
    /// Returns the key's value for `field`.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::VirtualAddress => &self.virtual_address,
            Field::Vpn => &self.vpn,
            Field::Tlbi => &self.tlbi,
            Field::Tlbt => &self.tlbt,
            Field::TlbHit => &self.tlb_hit,
            Field::PageFault => &self.page_fault,
            Field::Ppn => &self.ppn,
            Field::PhysicalAddress => &self.physical_address,
            Field::PageHit => &self.page_hit,
        }
    }
}

/// A user's entered answers, with touched-field tracking.
///
/// Entering a value (even an empty one) marks the field as touched; fields
/// never entered stay untouched and read as empty.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    entries: HashMap<Field, String>,
}

impl Submission {
    /// Creates an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the user's value for `field`, marking it touched.
    pub fn enter(&mut self, field: Field, value: impl Into<String>) {
        let _ = self.entries.insert(field, value.into());
    }

    /// Whether the user has interacted with `field`.
    pub fn touched(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    /// The entered value for `field`; empty when untouched.
    pub fn value(&self, field: Field) -> &str {
        self.entries.get(&field).map_or("", String::as_str)
    }
}

/// Grades a single field against the answer key.
pub fn is_correct(field: Field, user_value: &str, key: &AnswerKey) -> bool {
    let expected = key.field(field);
    if field.is_yes_no() {
        user_value.to_ascii_uppercase() == expected
    } else {
        user_value.eq_ignore_ascii_case(expected)
    }
}

/// Grades a whole submission against the answer key.
///
/// Mandatory fields are always graded (an untouched mandatory field reads
/// as empty and fails). Optional fields are only graded once touched.
pub fn is_submission_correct(submission: &Submission, key: &AnswerKey) -> bool {
    Field::ALL.iter().all(|&field| {
        if field.is_optional() && !submission.touched(field) {
            return true;
        }
        is_correct(field, submission.value(field), key)
    })
}
