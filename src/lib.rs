//! # devlink
//!
//! A client for the DeviceLink UDP text protocol of the IL-2 flight
//! simulator:
//! - Bounded request/answer exchanges with explicit timeouts
//! - One in-flight request per session, enforced by a real lock
//! - Last-known-value cache with range-checked readings
//! - Typed accessors generated from declarative field tables
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       DeviceLink                             │
//! │     (TelemetrySource / Controllable / Toggleable)            │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌────────────────────────┐        ┌─────────────────┐
//!   │        Session         │        │   StateCache    │
//!   │ (Mutex, one in flight) │        │    (RwLock)     │
//!   └───────────┬────────────┘        └─────────────────┘
//!               │
//!      ┌────────┴────────┐
//!      │                 │
//!      ▼                 ▼
//! ┌──────────┐    ┌─────────────┐
//! │  Codec   │    │  Transport  │
//! │ (R/A/\)  │    │    (UDP)    │
//! └──────────┘    └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod transport;
pub mod session;
pub mod fields;
pub mod cache;
pub mod device;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LinkError, Result};
pub use config::Config;
pub use protocol::{Code, Frame};
pub use session::{ReadState, Session};
pub use fields::{Action, Control, EngineField, EngineMetric, Gear, Instrument, Switch, Weapon};
pub use cache::{EngineRecord, Snapshot, StateCache};
pub use device::{Controllable, DeviceLink, TelemetrySource, Toggleable};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of devlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
