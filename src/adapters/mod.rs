//! Port implementations.
//!
//! - `live`: real clock, disk and network.
//! - `recording`: wrap another adapter and capture every call into a cassette.
//! - `replaying`: serve previously captured calls from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
