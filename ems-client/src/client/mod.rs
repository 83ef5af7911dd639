//! Client module - HTTP transport.
//!
//! `HttpClient` is the seam between the employee/auth services and the
//! network; `NetworkHttpClient` talks to the real backend over reqwest.

pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export main types
pub use http::{HttpClient, NetworkHttpClient};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockHttpClient, MockReply, RecordedRequest};
