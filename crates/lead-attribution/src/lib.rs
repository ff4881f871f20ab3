//! Lead Attribution
//!
//! Campaign attribution for the landing page:
//! - **AttributionParams**: the five `utm_*` values, empty when absent
//! - **AttributionCapture**: one read of the page location, injected as a [`PageLocation`]
//! - **SessionStorage**: persistence of captured params across reloads in one session
//! - **EventTracker**: analytics events such as `page_view`
//!
//! Nothing in this crate fails loudly. Unreadable locations, malformed query
//! strings and storage failures all degrade to empty values and a log line.
//!
//! # Example
//!
//! ```rust
//! use lead_attribution::{AttributionCapture, StaticLocation};
//!
//! let capture = AttributionCapture::new(StaticLocation::new(
//!     "https://example.com/?utm_source=google&utm_medium=cpc",
//! ));
//! let params = capture.capture();
//! assert_eq!(params.utm_source, "google");
//! assert_eq!(params.utm_term, "");
//! ```

#![warn(missing_docs)]

pub mod analytics;
pub mod capture;
pub mod error;
pub mod params;
pub mod storage;

// Re-exports
pub use analytics::{AnalyticsEvent, EventTracker, NoopTracker, TracingTracker};
pub use capture::{parse_query, AttributionCapture, PageLocation, StaticLocation};
pub use error::StorageError;
pub use params::AttributionParams;
pub use storage::{load_stored_params, store_params, MemorySessionStorage, SessionStorage, STORAGE_KEY};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
