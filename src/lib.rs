//! epochctl - convert between Unix timestamps and ISO 8601 dates
//!
//! * [`interpret`] - seconds/milliseconds timestamp to UTC and local time
//! * [`offset`] - timestamps a fixed duration before "now"
//! * [`zone`] - the host offset captured at startup
//! * [`menu`] - interactive loop and per-action entry points
//! * [`display`] - console and JSON rendering

pub mod display;
pub mod error;
pub mod interpret;
pub mod logger;
pub mod menu;
pub mod offset;
pub mod zone;

pub use error::{InvalidChoice, ParseError};
pub use interpret::{interpret, Interpretation, TimestampUnit, MILLIS_THRESHOLD};
pub use offset::{current, generate, Clock, FixedClock, Generated, OffsetChoice, SystemClock};
pub use zone::LocalOffset;
