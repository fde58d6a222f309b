//! Spanish-pattern intent extraction.
//!
//! Every extractor is a pure function over the raw message that returns
//! `None`/empty on a miss -- a miss is normal conversation, never an error.
//! The patterns cover a fixed set of Spanish shapes (see each submodule);
//! linguistic coverage beyond them is explicitly out of scope.

mod classify;
mod dates;
mod guests;
mod rooms;

pub use classify::{MessageClass, SpeakerSide, classify_message, classify_message_for};
pub use dates::{extract_dates, extract_dates_from};
pub use guests::extract_guests;
pub use rooms::{extract_room_distribution, extract_room_type, is_multi_room_query};
