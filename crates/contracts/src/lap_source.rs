//! LapSource trait - Lap telemetry provider abstraction
//!
//! Defines a unified interface for lap providers, decoupling the engine from
//! concrete telemetry backends. Supports unified handling of recorded-lap
//! replay and synthetic mock providers; a networked provider would implement
//! the same trait and own its cache lifecycle entirely on its side.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ContractError, DriverCode, LapTelemetry, SessionType};

/// One driver's fastest-lap request within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapQuery {
    /// Season year
    pub year: u16,

    /// Grand Prix name (e.g., "Monaco")
    pub event: String,

    /// Session within the event
    pub session: SessionType,

    /// Driver abbreviation
    pub driver: DriverCode,
}

impl fmt::Display for LapQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.year, self.event, self.session, self.driver
        )
    }
}

/// Lap provider trait
///
/// All lap providers implement this trait.
#[trait_variant::make(LapSource: Send)]
pub trait LocalLapSource {
    /// Provider name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Fetch one driver's fastest lap for a session
    ///
    /// Must return a non-empty, distance-sorted trace.
    ///
    /// # Errors
    /// `ContractError::Provider` when the session or driver cannot be
    /// served. Callers treat this as unrecoverable for the current
    /// comparison and do not retry.
    async fn fetch_lap(&self, query: &LapQuery) -> Result<LapTelemetry, ContractError>;
}
