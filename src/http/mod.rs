//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (assign/propagate request ID)
//!     → middleware/redirect.rs (routing decision)
//!         → RedirectTo: response.rs builds the 301
//!         → PassThrough: health handler, upstream.rs, or 404
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
