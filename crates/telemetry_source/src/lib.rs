//! # Telemetry Source
//!
//! Offline lap providers implementing the `LapSource` contract.
//!
//! Responsibilities:
//! - Serve recorded laps from a recording directory (`ReplayLapSource`)
//! - Generate deterministic synthetic laps for tests and development
//!   (`MockLapSource`)
//!
//! Network fetching and provider-side caching live entirely behind the
//! external provider; neither is implemented here.
//!
//! ## Usage Example
//!
//! ```ignore
//! use telemetry_source::MockLapSource;
//! use contracts::{LapQuery, LapSource, SessionType};
//!
//! let source = MockLapSource::street_circuit();
//! let lap = source.fetch_lap(&query).await?;
//! ```

mod error;
mod mock;
mod replay;

// Re-exports
pub use contracts::{LapQuery, LapSource, LapTelemetry};
pub use error::{Result, SourceError};
pub use mock::{MockLapConfig, MockLapSource};
pub use replay::ReplayLapSource;
