//! Device Module
//!
//! Typed access to the simulator on top of a [`Session`].
//!
//! ## Responsibilities
//! - Read fields through their table codes and range-check the result
//! - Store accepted readings in the [`StateCache`]
//! - Send set and toggle commands for writable fields
//!
//! Readings are stored while the session still serialises exchanges, so the
//! cache always ends on the reading of the most recent exchange.
//!
//! ## Capability Traits
//! A field type gains an operation by implementing the matching trait for
//! `DeviceLink`, so one method name covers every table:
//!
//! ```text
//! link.observe(Instrument::Altitude)?      TelemetrySource
//! link.get(Switch::Canopy)                  TelemetrySource (cache only)
//! link.set(Control::Flaps, 0.5)?           Controllable
//! link.toggle(Action::NavLights)?          Toggleable
//! ```

mod aircraft;

use crate::cache::{EngineRecord, Snapshot, StateCache};
use crate::config::Config;
use crate::error::{LinkError, Result};
use crate::fields::{
    check_engine, Action, Bounds, Control, EngineField, EngineMetric, Instrument, Switch, Weapon,
};
use crate::protocol::{self, Code, Frame, SKIP_INDEXED, SKIP_PLAIN};
use crate::session::{ReadState, Session};
use crate::transport::{Transport, UdpTransport};

// =============================================================================
// Capability Traits
// =============================================================================

/// Fields that can be read from the simulator
pub trait TelemetrySource<F> {
    type Value;

    /// Query the simulator, update the cache and return the fresh value
    ///
    /// A failed or out-of-range reading leaves the cache untouched.
    fn observe(&self, field: F) -> Result<Self::Value>;

    /// Last cached value, no network traffic
    fn get(&self, field: F) -> Self::Value;
}

/// Fields that accept a value
pub trait Controllable<F> {
    type Value;

    fn set(&self, field: F, value: Self::Value) -> Result<()>;
}

/// Fields and commands driven by a single code
pub trait Toggleable<F> {
    fn toggle(&self, field: F) -> Result<()>;
}

// =============================================================================
// DeviceLink
// =============================================================================

/// A session plus the cache of everything read through it
pub struct DeviceLink<T: Transport = UdpTransport> {
    session: Session<T>,
    cache: StateCache,
}

impl DeviceLink<UdpTransport> {
    /// Create an unconnected link; call [`DeviceLink::initialize`] next
    pub fn new(config: Config) -> Self {
        Self::from_session(Session::new(config))
    }

    /// Open (or reopen) the UDP transport
    pub fn initialize(&self) -> Result<()> {
        self.session.initialize()
    }
}

impl<T: Transport> DeviceLink<T> {
    /// Create a link over an already open transport
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self::from_session(Session::with_transport(config, transport))
    }

    pub fn from_session(session: Session<T>) -> Self {
        Self {
            session,
            cache: StateCache::new(),
        }
    }

    /// Drop the transport; cached values stay readable
    pub fn shutdown(&self) -> Option<T> {
        tracing::info!("DeviceLink session closed");
        self.session.detach()
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn cache(&self) -> &StateCache {
        &self.cache
    }

    pub fn snapshot(&self) -> Snapshot {
        self.cache.snapshot()
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_initialized()
    }

    pub fn has_data(&self) -> bool {
        self.session.has_data()
    }

    pub fn read_state(&self) -> ReadState {
        self.session.read_state()
    }

    // =========================================================================
    // Raw Access
    // =========================================================================

    pub fn query(&self, codes: &[Code]) -> Result<Frame> {
        self.session.query(codes)
    }

    pub fn query_float(&self, code: &Code) -> f32 {
        self.session.query_float(code)
    }

    pub fn query_int(&self, code: &Code) -> i32 {
        self.session.query_int(code)
    }

    pub fn set_value(&self, code: &Code, value: f32) -> Result<()> {
        self.session.set_value(code, value)
    }

    // =========================================================================
    // Composite Refresh
    // =========================================================================

    /// Refresh every instrument with one round trip
    ///
    /// Each reading is decoded and range-checked on its own; rejected ones
    /// are logged and skipped. Returns how many were stored.
    pub fn observe_instruments(&self) -> Result<usize> {
        let codes: Vec<Code> = Instrument::ALL.iter().map(|f| f.spec().get.clone()).collect();

        let stored = self.session.query_with(&codes, |frame| {
            let mut stored = 0;
            for &field in Instrument::ALL {
                let spec = field.spec();
                match decode_checked(frame, spec.name, &spec.get, SKIP_PLAIN, spec.bounds) {
                    Ok(value) => {
                        self.cache.store_instrument(field, value);
                        stored += 1;
                    }
                    Err(e) => tracing::warn!("instrument {} skipped: {}", spec.name, e),
                }
            }
            stored
        })?;

        tracing::debug!("observed {}/{} instruments", stored, Instrument::COUNT);
        Ok(stored)
    }

    /// Refresh the telemetry metrics of one engine with one round trip
    ///
    /// Returns how many metrics were stored.
    pub fn observe_engine(&self, engine: usize) -> Result<usize> {
        let engine = check_engine(engine)?;
        let fields = EngineMetric::TELEMETRY
            .iter()
            .map(|&metric| EngineField::new(engine, metric))
            .collect::<Result<Vec<_>>>()?;
        let codes: Vec<Code> = fields.iter().map(EngineField::get_code).collect();

        self.session.query_with(&codes, |frame| {
            let mut stored = 0;
            for (field, code) in fields.into_iter().zip(&codes) {
                let spec = field.metric().spec();
                match decode_checked(frame, spec.name, code, SKIP_INDEXED, spec.bounds) {
                    Ok(value) => {
                        self.cache.store_engine_metric(field, value);
                        stored += 1;
                    }
                    Err(e) => tracing::warn!("engine {} {} skipped: {}", engine, spec.name, e),
                }
            }
            stored
        })
    }

    /// Cached record of one engine
    pub fn engine(&self, engine: usize) -> Result<EngineRecord> {
        self.cache.engine(engine)
    }

    // -------------------------------------------------------------------------
    // Single-field helpers
    // -------------------------------------------------------------------------

    /// Read and range-check a float that is not cached
    fn read_checked(&self, name: &'static str, code: &Code, skip: usize, bounds: Bounds) -> Result<f32> {
        let value = self.session.read_float(code, skip)?;
        bounds.check(name, value).map_err(reject)
    }

    /// Read, range-check and `store` a float within one exchange
    fn observe_float(
        &self,
        name: &'static str,
        code: &Code,
        skip: usize,
        bounds: Bounds,
        store: impl FnOnce(&StateCache, f32),
    ) -> Result<f32> {
        self.session.query_with(std::slice::from_ref(code), |frame| -> Result<f32> {
            let value = protocol::to_float(protocol::decode_value(frame, code, skip)?)?;
            let value = bounds.check(name, value).map_err(reject)?;
            store(&self.cache, value);
            Ok(value)
        })?
    }

    fn observe_flag(&self, name: &'static str, code: &Code, store: impl FnOnce(&StateCache, bool)) -> Result<bool> {
        self.session.query_with(std::slice::from_ref(code), |frame| -> Result<bool> {
            let value = protocol::to_int(protocol::decode_value(frame, code, SKIP_PLAIN)?)?;
            Bounds::FLAG.check(name, value as f32).map_err(reject)?;
            let on = value == 1;
            store(&self.cache, on);
            Ok(on)
        })?
    }
}

fn decode_checked(frame: &Frame, name: &'static str, code: &Code, skip: usize, bounds: Bounds) -> Result<f32> {
    let value = protocol::to_float(protocol::decode_value(frame, code, skip)?)?;
    bounds.check(name, value)
}

fn reject(e: LinkError) -> LinkError {
    tracing::warn!("reading rejected: {}", e);
    e
}

fn check_setpoint(name: &'static str, bounds: Bounds, value: f32) -> Result<f32> {
    if bounds.contains(value) {
        Ok(value)
    } else {
        Err(LinkError::InvalidArgument(format!(
            "{} must be within {}..={}, got {}",
            name, bounds.min, bounds.max, value
        )))
    }
}

// =============================================================================
// Telemetry
// =============================================================================

impl<T: Transport> TelemetrySource<Instrument> for DeviceLink<T> {
    type Value = f32;

    fn observe(&self, field: Instrument) -> Result<f32> {
        let spec = field.spec();
        self.observe_float(spec.name, &spec.get, SKIP_PLAIN, spec.bounds, |cache, value| {
            cache.store_instrument(field, value)
        })
    }

    fn get(&self, field: Instrument) -> f32 {
        self.cache.instrument(field)
    }
}

impl<T: Transport> TelemetrySource<Control> for DeviceLink<T> {
    type Value = f32;

    fn observe(&self, field: Control) -> Result<f32> {
        let spec = field.spec();
        self.observe_float(spec.name, &spec.get, SKIP_PLAIN, spec.bounds, |cache, value| {
            cache.store_control(field, value)
        })
    }

    fn get(&self, field: Control) -> f32 {
        self.cache.control(field)
    }
}

impl<T: Transport> TelemetrySource<Switch> for DeviceLink<T> {
    type Value = bool;

    fn observe(&self, field: Switch) -> Result<bool> {
        let spec = field.spec();
        self.observe_flag(spec.name, &spec.get, |cache, on| cache.store_switch(field, on))
    }

    fn get(&self, field: Switch) -> bool {
        self.cache.switch(field)
    }
}

impl<T: Transport> TelemetrySource<Weapon> for DeviceLink<T> {
    type Value = bool;

    fn observe(&self, field: Weapon) -> Result<bool> {
        let spec = field.spec();
        self.observe_flag(spec.name, &spec.get, |cache, firing| {
            cache.store_weapon(field, firing)
        })
    }

    fn get(&self, field: Weapon) -> bool {
        self.cache.weapon(field)
    }
}

impl<T: Transport> TelemetrySource<EngineField> for DeviceLink<T> {
    type Value = f32;

    fn observe(&self, field: EngineField) -> Result<f32> {
        let spec = field.metric().spec();
        self.observe_float(spec.name, &field.get_code(), SKIP_INDEXED, spec.bounds, |cache, value| {
            cache.store_engine_metric(field, value)
        })
    }

    fn get(&self, field: EngineField) -> f32 {
        self.cache.engine_metric(field)
    }
}

// =============================================================================
// Commands
// =============================================================================

// Setting a value never touches the cache; the next observe reports what
// the simulator actually applied.

impl<T: Transport> Controllable<Control> for DeviceLink<T> {
    type Value = f32;

    fn set(&self, field: Control, value: f32) -> Result<()> {
        let spec = field.spec();
        let value = check_setpoint(spec.name, spec.bounds, value)?;
        self.session.set_value(spec.set_code()?, value)
    }
}

impl<T: Transport> Controllable<Weapon> for DeviceLink<T> {
    type Value = bool;

    fn set(&self, field: Weapon, firing: bool) -> Result<()> {
        self.session.set_int(field.spec().set_code()?, i32::from(firing))
    }
}

impl<T: Transport> Controllable<EngineField> for DeviceLink<T> {
    type Value = f32;

    fn set(&self, field: EngineField, value: f32) -> Result<()> {
        let code = field.set_code()?;
        let spec = field.metric().spec();
        let value = check_setpoint(spec.name, spec.bounds, value)?;
        self.session.set_value(&code, value)
    }
}

impl<T: Transport> Toggleable<Switch> for DeviceLink<T> {
    fn toggle(&self, field: Switch) -> Result<()> {
        self.session.toggle(field.spec().set_code()?)
    }
}

impl<T: Transport> Toggleable<Action> for DeviceLink<T> {
    fn toggle(&self, action: Action) -> Result<()> {
        self.session.toggle(&action.code())
    }
}

impl<'a, T: Transport> Toggleable<&'a Code> for DeviceLink<T> {
    fn toggle(&self, code: &'a Code) -> Result<()> {
        self.session.toggle(code)
    }
}
