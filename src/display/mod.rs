//! Display helpers for the flow diagram.
//!
//! Nothing here changes which messages are visible; these helpers order
//! the visible list and describe how each message is presented.
//!
//! - [`sort`] - display ordering (`sortoption`)
//! - [`row`] - one diagram row per message
//! - [`tone`] - theme tone per SIP method
//! - [`detail`] - attribute entries for the inspect view
//! - [`timestamp`] - timestamp parsing and formatting

pub mod detail;
pub mod row;
pub mod sort;
pub mod timestamp;
pub mod tone;

pub use detail::{detail_entries, DetailEntry, DetailKind};
pub use row::{rows, FlowRow};
pub use sort::sort_messages;
pub use timestamp::{format_time_of_day, parse_timestamp};
pub use tone::MethodTone;
