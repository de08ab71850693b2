//! StateCache implementation
//!
//! Fixed arrays behind parking_lot RwLocks.

use parking_lot::RwLock;

use crate::error::Result;
use crate::fields::{check_engine, Control, EngineField, Instrument, Switch, Weapon, ENGINE_COUNT};
use super::EngineRecord;

/// Last-known-value store
///
/// Every entry starts at zero / false and changes only through the
/// `store_*` methods, which the accessor layer calls after a successful,
/// range-checked reading.
pub struct StateCache {
    instruments: RwLock<[f32; Instrument::COUNT]>,
    controls: RwLock<[f32; Control::COUNT]>,
    switches: RwLock<[bool; Switch::COUNT]>,
    weapons: RwLock<[bool; Weapon::COUNT]>,
    engines: RwLock<[EngineRecord; ENGINE_COUNT]>,
}

/// Point-in-time copy of the whole cache
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub instruments: [f32; Instrument::COUNT],
    pub controls: [f32; Control::COUNT],
    pub switches: [bool; Switch::COUNT],
    pub weapons: [bool; Weapon::COUNT],
    pub engines: [EngineRecord; ENGINE_COUNT],
}

impl Snapshot {
    pub fn instrument(&self, field: Instrument) -> f32 {
        self.instruments[field.index()]
    }

    pub fn control(&self, field: Control) -> f32 {
        self.controls[field.index()]
    }

    pub fn switch(&self, field: Switch) -> bool {
        self.switches[field.index()]
    }

    pub fn weapon(&self, field: Weapon) -> bool {
        self.weapons[field.index()]
    }
}

impl StateCache {
    /// Create a cache with every value zeroed
    pub fn new() -> Self {
        Self {
            instruments: RwLock::new([0.0; Instrument::COUNT]),
            controls: RwLock::new([0.0; Control::COUNT]),
            switches: RwLock::new([false; Switch::COUNT]),
            weapons: RwLock::new([false; Weapon::COUNT]),
            engines: RwLock::new([EngineRecord::default(); ENGINE_COUNT]),
        }
    }

    // -------------------------------------------------------------------------
    // Reads (shared lock)
    // -------------------------------------------------------------------------

    pub fn instrument(&self, field: Instrument) -> f32 {
        self.instruments.read()[field.index()]
    }

    pub fn control(&self, field: Control) -> f32 {
        self.controls.read()[field.index()]
    }

    pub fn switch(&self, field: Switch) -> bool {
        self.switches.read()[field.index()]
    }

    pub fn weapon(&self, field: Weapon) -> bool {
        self.weapons.read()[field.index()]
    }

    pub fn engine_metric(&self, field: EngineField) -> f32 {
        self.engines.read()[field.engine()].get(field.metric())
    }

    /// Copy of one engine's record
    pub fn engine(&self, engine: usize) -> Result<EngineRecord> {
        let engine = check_engine(engine)?;
        Ok(self.engines.read()[engine])
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            instruments: *self.instruments.read(),
            controls: *self.controls.read(),
            switches: *self.switches.read(),
            weapons: *self.weapons.read(),
            engines: *self.engines.read(),
        }
    }

    // -------------------------------------------------------------------------
    // Writes (exclusive lock, one field at a time)
    // -------------------------------------------------------------------------

    pub fn store_instrument(&self, field: Instrument, value: f32) {
        self.instruments.write()[field.index()] = value;
    }

    pub fn store_control(&self, field: Control, value: f32) {
        self.controls.write()[field.index()] = value;
    }

    pub fn store_switch(&self, field: Switch, value: bool) {
        self.switches.write()[field.index()] = value;
    }

    pub fn store_weapon(&self, field: Weapon, value: bool) {
        self.weapons.write()[field.index()] = value;
    }

    pub fn store_engine_metric(&self, field: EngineField, value: f32) {
        self.engines.write()[field.engine()].set(field.metric(), value);
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::new()
    }
}
