//! Booking query types.
//!
//! A `BookingQuery` is assembled incrementally across the turns of one
//! session: each message may contribute dates, guests, or a room type, and
//! the router keeps merging until enough is known to price the stay.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum age at which a child counts as a paying guest.
pub const CHILD_PAYING_AGE: u8 = 4;

/// Whether a guest is an adult or a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestKind {
    Adult,
    Child,
}

/// A single guest in a booking query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub kind: GuestKind,
    /// Only meaningful for children; adults never carry an age.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
}

impl Guest {
    /// An adult placeholder (the extractor's default unit).
    pub fn adult() -> Self {
        Self {
            kind: GuestKind::Adult,
            age: None,
        }
    }

    /// A child of the given age.
    pub fn child(age: u8) -> Self {
        Self {
            kind: GuestKind::Child,
            age: Some(age),
        }
    }

    /// Whether this guest counts toward room capacity and pricing.
    ///
    /// Adults always pay. Children pay from age 4; a child with no recorded
    /// age is counted as paying so capacity is never silently understated.
    pub fn is_paying(&self) -> bool {
        match self.kind {
            GuestKind::Adult => true,
            GuestKind::Child => self.age.is_none_or(|a| a >= CHILD_PAYING_AGE),
        }
    }
}

/// An inclusive check-in / exclusive check-out stay range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    /// Build a range, enforcing `check_out > check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Option<Self> {
        (check_out > check_in).then_some(Self {
            check_in,
            check_out,
        })
    }

    /// Number of nights in the stay.
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }
}

/// A booking query under construction for one session.
///
/// Lives only in memory for the session's lifetime; the router merges each
/// turn's extractions into it until both `dates` and `guests` are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,
    #[serde(default)]
    pub guests: Vec<Guest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    /// Last raw message that contributed to this query. Used by the
    /// allocator for floor-preference and multi-room detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_message: Option<String>,
}

impl BookingQuery {
    /// Number of paying guests.
    pub fn paying_guests(&self) -> u32 {
        self.guests.iter().filter(|g| g.is_paying()).count() as u32
    }

    /// Whether the query holds enough information to be priced.
    pub fn is_complete(&self) -> bool {
        self.dates.is_some() && !self.guests.is_empty()
    }

    /// Merge another turn's extractions into this query.
    ///
    /// Present fields in `other` overwrite; absent fields leave the
    /// accumulated state untouched.
    pub fn merge(&mut self, other: BookingQuery) {
        if other.dates.is_some() {
            self.dates = other.dates;
        }
        if !other.guests.is_empty() {
            self.guests = other.guests;
        }
        if other.room_type.is_some() {
            self.room_type = other.room_type;
        }
        if other.raw_message.is_some() {
            self.raw_message = other.raw_message;
        }
    }
}

/// One room in a multi-room guest distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomAllocation {
    /// 1-based room number within the distribution.
    pub room_number: u32,
    pub guests: Vec<Guest>,
}
