//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system (time, filesystem, HTTP). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod http;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use http::{HttpClient, HttpFuture, HttpRequest, HttpResponse};
