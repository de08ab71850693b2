//! State Cache Module
//!
//! Last-known values read from the simulator.
//!
//! ## Responsibilities
//! - Hold one value per instrument, control, switch, weapon and engine metric
//! - Many concurrent readers, atomic per-field writes
//! - Keep the previous value until a new reading is stored
//!
//! ## Data Structure Choice
//! Fixed arrays indexed by the field enums, one RwLock per group:
//! - No allocation after construction
//! - Reads never wait on the network, only on a concurrent store

mod store;

pub use store::{Snapshot, StateCache};

use crate::fields::EngineMetric;

/// Last known readings of one engine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineRecord {
    pub rpm: f32,
    pub manifold: f32,
    pub temp_oil_in: f32,
    pub temp_oil_out: f32,
    pub temp_water: f32,
    pub temp_cylinders: f32,
    pub power: f32,
    pub prop_pitch: f32,
}

impl EngineRecord {
    pub fn get(&self, metric: EngineMetric) -> f32 {
        match metric {
            EngineMetric::Rpm => self.rpm,
            EngineMetric::Manifold => self.manifold,
            EngineMetric::OilIn => self.temp_oil_in,
            EngineMetric::OilOut => self.temp_oil_out,
            EngineMetric::Water => self.temp_water,
            EngineMetric::Cylinders => self.temp_cylinders,
            EngineMetric::Power => self.power,
            EngineMetric::PropPitch => self.prop_pitch,
        }
    }

    pub fn set(&mut self, metric: EngineMetric, value: f32) {
        let slot = match metric {
            EngineMetric::Rpm => &mut self.rpm,
            EngineMetric::Manifold => &mut self.manifold,
            EngineMetric::OilIn => &mut self.temp_oil_in,
            EngineMetric::OilOut => &mut self.temp_oil_out,
            EngineMetric::Water => &mut self.temp_water,
            EngineMetric::Cylinders => &mut self.temp_cylinders,
            EngineMetric::Power => &mut self.power,
            EngineMetric::PropPitch => &mut self.prop_pitch,
        };
        *slot = value;
    }
}
