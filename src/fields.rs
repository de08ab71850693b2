//! Field tables
//!
//! Declarative description of every cached value: which code reads it,
//! which code writes it, and the physical range a reading must fall in.
//! The accessor layer is implemented once over these tables instead of one
//! method per instrument.

use crate::error::{LinkError, Result};
use crate::protocol::codes;
use crate::protocol::Code;

/// Number of engines tracked by the state cache
pub const ENGINE_COUNT: usize = 4;

/// Inclusive physical range of a reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const UNBOUNDED: Bounds = Bounds::new(f32::NEG_INFINITY, f32::INFINITY);
    pub const NON_NEGATIVE: Bounds = Bounds::new(0.0, f32::INFINITY);
    pub const AXIS: Bounds = Bounds::new(-1.0, 1.0);
    pub const FLAG: Bounds = Bounds::new(0.0, 1.0);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Reject `value` with an `OutOfRange` error naming `field`
    pub fn check(&self, field: &'static str, value: f32) -> Result<f32> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(LinkError::OutOfRange {
                field,
                value: value as f64,
                min: self.min as f64,
                max: self.max as f64,
            })
        }
    }
}

/// One row of a field table
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,

    /// Code that reads the value
    pub get: Code,

    /// Code that sets or toggles the value, if the simulator allows it
    pub set: Option<Code>,

    pub bounds: Bounds,
}

impl FieldSpec {
    const fn new(name: &'static str, get: Code, set: Option<Code>, bounds: Bounds) -> Self {
        Self {
            name,
            get,
            set,
            bounds,
        }
    }

    /// The set code, or an error if this field is read-only
    pub fn set_code(&self) -> Result<&Code> {
        self.set
            .as_ref()
            .ok_or_else(|| LinkError::InvalidArgument(format!("{} is read-only", self.name)))
    }
}

macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $table:ident {
            $( $variant:ident => ($label:literal, $get:expr, $set:expr, $bounds:expr) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        static $table: &[FieldSpec] = &[
            $( FieldSpec::new($label, $get, $set, $bounds) ),+
        ];

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];
            pub const COUNT: usize = $name::ALL.len();

            /// Position of this field in cache arrays
            pub fn index(self) -> usize {
                self as usize
            }

            pub fn spec(self) -> &'static FieldSpec {
                &$table[self.index()]
            }

            pub fn name(self) -> &'static str {
                self.spec().name
            }
        }
    };
}

field_enum! {
    /// Flight instruments (float readings)
    Instrument, INSTRUMENTS {
        Ias => ("ias", codes::GET_IAS, None, Bounds::NON_NEGATIVE),
        Vario => ("vario", codes::GET_VARIO, None, Bounds::UNBOUNDED),
        Slip => ("slip", codes::GET_SLIP, None, Bounds::new(-45.0, 45.0)),
        Turn => ("turn", codes::GET_TURN, None, Bounds::AXIS),
        AngularSpeed => ("angular_speed", codes::GET_ANG_SPD, None, Bounds::UNBOUNDED),
        Altitude => ("altitude", codes::GET_ALT, None, Bounds::NON_NEGATIVE),
        Azimuth => ("azimuth", codes::GET_AZI, None, Bounds::new(0.0, 359.99)),
        BeaconAzimuth => ("beacon_azimuth", codes::GET_BEACON_AZI, None, Bounds::new(0.0, 359.99)),
        Roll => ("roll", codes::GET_ROLL, None, Bounds::new(-180.0, 180.0)),
        Pitch => ("pitch", codes::GET_PITCH, None, Bounds::new(-90.0, 90.0)),
        Fuel => ("fuel", codes::GET_FUEL, None, Bounds::NON_NEGATIVE),
    }
}

field_enum! {
    /// Control surfaces and brakes (normalized axes)
    Control, CONTROLS {
        Aileron => ("aileron", codes::GET_AILERON, Some(codes::SET_AILERON), Bounds::AXIS),
        Elevator => ("elevator", codes::GET_ELV, Some(codes::SET_ELV), Bounds::AXIS),
        Rudder => ("rudder", codes::GET_RUDDER, Some(codes::SET_RUDDER), Bounds::AXIS),
        Brakes => ("brakes", codes::GET_BRAKES, Some(codes::SET_BRAKES), Bounds::AXIS),
        AileronTrim => ("aileron_trim", codes::GET_AIL_TRIM, Some(codes::SET_AIL_TRIM), Bounds::AXIS),
        ElevatorTrim => ("elevator_trim", codes::GET_ELV_TRIM, Some(codes::SET_ELV_TRIM), Bounds::AXIS),
        RudderTrim => ("rudder_trim", codes::GET_RUDDER_TRIM, Some(codes::SET_RUDDER_TRIM), Bounds::AXIS),
        Flaps => ("flaps", codes::GET_FLAPS_POS, Some(codes::SET_FLAPS_POS), Bounds::AXIS),
    }
}

field_enum! {
    /// Two-state aircraft systems; the set code toggles them
    Switch, SWITCHES {
        LevelStabilizer => ("level_stabilizer", codes::GET_LVL_STAB, Some(codes::TOGGLE_STAB), Bounds::FLAG),
        Airbrakes => ("airbrakes", codes::GET_AIRBRK, Some(codes::TOGGLE_AIRBRK), Bounds::FLAG),
        Tailwheel => ("tailwheel", codes::GET_TAILWHEEL, Some(codes::TOGGLE_TAILWHEEL), Bounds::FLAG),
        WingFold => ("wing_fold", codes::GET_WING_FOLD, Some(codes::TOGGLE_WING_FOLD), Bounds::FLAG),
        Canopy => ("canopy", codes::GET_CANOPY, Some(codes::TOGGLE_CANOPY), Bounds::FLAG),
        TailHook => ("tail_hook", codes::GET_HOOK, Some(codes::TOGGLE_HOOK), Bounds::FLAG),
        Chocks => ("chocks", codes::GET_CHOCKS, Some(codes::TOGGLE_CHOCKS), Bounds::FLAG),
        GunPods => ("gun_pods", codes::GET_GUNPOD, Some(codes::SET_GUNPOD), Bounds::FLAG),
        Gunner => ("gunner", codes::GET_GUNNER, None, Bounds::FLAG),
    }
}

field_enum! {
    /// Weapon trigger groups (0 = released, 1 = firing)
    Weapon, WEAPONS {
        MachineGun => ("machine_gun", codes::GET_WEAP1, Some(codes::SET_WEAP1), Bounds::FLAG),
        Cannon => ("cannon", codes::GET_WEAP2, Some(codes::SET_WEAP2), Bounds::FLAG),
        Rockets => ("rockets", codes::GET_WEAP3, Some(codes::SET_WEAP3), Bounds::FLAG),
        Bombs => ("bombs", codes::GET_WEAP4, Some(codes::SET_WEAP4), Bounds::FLAG),
        Combined => ("combined", codes::GET_WEAP1_2, Some(codes::SET_WEAP1_2), Bounds::FLAG),
    }
}

field_enum! {
    /// Per-engine readings; all codes take the engine index as argument
    EngineMetric, ENGINE_METRICS {
        Rpm => ("rpm", codes::GET_RPM, None, Bounds::UNBOUNDED),
        Manifold => ("manifold", codes::GET_MANIFOLD, None, Bounds::UNBOUNDED),
        OilIn => ("temp_oil_in", codes::GET_TEMP_OILIN, None, Bounds::UNBOUNDED),
        OilOut => ("temp_oil_out", codes::GET_TEMP_OILOUT, None, Bounds::UNBOUNDED),
        Water => ("temp_water", codes::GET_TEMP_WATER, None, Bounds::UNBOUNDED),
        Cylinders => ("temp_cylinders", codes::GET_TEMP_CYL, None, Bounds::UNBOUNDED),
        Power => ("power", codes::GET_POWER, Some(codes::SET_POWER), Bounds::AXIS),
        PropPitch => ("prop_pitch", codes::GET_PROP_PITCH, Some(codes::SET_PROP_PITCH), Bounds::AXIS),
    }
}

impl EngineMetric {
    /// Metrics refreshed by one composite engine query
    pub const TELEMETRY: [EngineMetric; 6] = [
        EngineMetric::Rpm,
        EngineMetric::Manifold,
        EngineMetric::OilIn,
        EngineMetric::OilOut,
        EngineMetric::Water,
        EngineMetric::Cylinders,
    ];
}

/// One metric of one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineField {
    engine: usize,
    metric: EngineMetric,
}

impl EngineField {
    /// Engine indices run 0..=3
    pub fn new(engine: usize, metric: EngineMetric) -> Result<Self> {
        check_engine(engine)?;
        Ok(Self { engine, metric })
    }

    pub fn engine(&self) -> usize {
        self.engine
    }

    pub fn metric(&self) -> EngineMetric {
        self.metric
    }

    /// The indexed read code (`64\2`)
    pub fn get_code(&self) -> Code {
        self.metric.spec().get.with_arg(self.engine)
    }

    /// The indexed set code (`81\2`)
    pub fn set_code(&self) -> Result<Code> {
        Ok(self.metric.spec().set_code()?.with_arg(self.engine))
    }
}

pub(crate) fn check_engine(engine: usize) -> Result<usize> {
    if engine < ENGINE_COUNT {
        Ok(engine)
    } else {
        Err(LinkError::InvalidEngine(engine))
    }
}

/// Stateless commands: the simulator keeps no readable value for these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleGear,
    ManualGearUp,
    ManualGearDown,
    NavLights,
    CockpitLights,
    LandingLights,
    Smoke,
    Gunsight,
    Autopilot,
    LevelAutopilot,
    Bailout,
    TintReticle,
    Map,
    Chat,
    OnlineRating,
    SpeedBar,
    Icons,
    Mirrors,
    SaveTrack,
    AccelerateTime,
    NormalTime,
    DecelerateTime,
    Pause,
    CowlFlaps,
    DropTanks,
    AttachPlane,
    FireExtinguisher,
    Wep,
    Feather,
    SuperchargerNext,
    SuperchargerPrevious,
    SelectAllEngines,
    UnselectAllEngines,
    SelectLeftEngines,
    SelectRightEngines,
    SelectEngine1,
    SelectEngine2,
    SelectEngine3,
    SelectEngine4,
    ToggleEngine1Selection,
    ToggleEngine2Selection,
    ToggleEngine3Selection,
    ToggleEngine4Selection,
    ToggleAllEngines,
    ToggleLeftEngines,
    ToggleRightEngines,
    BombSightAuto,
    SightDistanceUp,
    SightDistanceDown,
    SightRight,
    SightLeft,
    SightAltitudeUp,
    SightAltitudeDown,
    SightVelocityUp,
    SightVelocityDown,
    CockpitView,
    NoCockpitView,
    ExternalView,
    NextFriend,
    NextEnemy,
    Flyby,
    ChaseView,
    ChaseFriend,
    ChaseEnemy,
    PadlockEnemy,
    PadlockFriend,
    PadlockNext,
    PadlockPrevious,
    PadlockFront,
    ToggleFov,
    IncreaseFov,
    DecreaseFov,
}

impl Action {
    /// Select engine `engine` (0-based) alone
    pub fn select_engine(engine: usize) -> Result<Action> {
        const SELECT: [Action; ENGINE_COUNT] = [
            Action::SelectEngine1,
            Action::SelectEngine2,
            Action::SelectEngine3,
            Action::SelectEngine4,
        ];
        Ok(SELECT[check_engine(engine)?])
    }

    /// Add engine `engine` (0-based) to, or remove it from, the selection
    pub fn toggle_engine_selection(engine: usize) -> Result<Action> {
        const TOGGLE: [Action; ENGINE_COUNT] = [
            Action::ToggleEngine1Selection,
            Action::ToggleEngine2Selection,
            Action::ToggleEngine3Selection,
            Action::ToggleEngine4Selection,
        ];
        Ok(TOGGLE[check_engine(engine)?])
    }

    pub fn code(self) -> Code {
        use Action::*;
        match self {
            ToggleGear => codes::SET_GEAR_STATUS,
            ManualGearUp => codes::RAISE_GEAR_MAN,
            ManualGearDown => codes::LOWER_GEAR_MAN,
            NavLights => codes::TOGGLE_NAV_LTS,
            CockpitLights => codes::TOGGLE_COCKPIT_LTS,
            LandingLights => codes::TOGGLE_LND_LTS,
            Smoke => codes::TOGGLE_SMOKE,
            Gunsight => codes::TOGGLE_GUNSIGHT,
            Autopilot => codes::TOGGLE_AUTOPILOT,
            LevelAutopilot => codes::TOGGLE_LVL_AUTOPILOT,
            Bailout => codes::BAILOUT,
            TintReticle => codes::TINT_RETICLE,
            Map => codes::TOGGLE_MAP,
            Chat => codes::TOGGLE_CHAT,
            OnlineRating => codes::TOGGLE_ONLINE_RATE,
            SpeedBar => codes::TOGGLE_SPEED_BAR,
            Icons => codes::TOGGLE_ICONS,
            Mirrors => codes::TOGGLE_MIRRORS,
            SaveTrack => codes::TOGGLE_SAVE_TRACK,
            AccelerateTime => codes::TOGGLE_ACCEL_TIME,
            NormalTime => codes::TOGGLE_NORMAL_TIME,
            DecelerateTime => codes::TOGGLE_DEC_TIME,
            Pause => codes::TOGGLE_PAUSE,
            CowlFlaps => codes::SET_COWL_FLAPS,
            DropTanks => codes::SET_DROP_TANKS,
            AttachPlane => codes::TOGGLE_ATTACH_PLANE,
            FireExtinguisher => codes::SET_FIRE_EXT,
            Wep => codes::TOGGLE_WEP,
            Feather => codes::TOGGLE_FEATHER,
            SuperchargerNext => codes::SET_CHRG_NXT,
            SuperchargerPrevious => codes::SET_CHRG_PREV,
            SelectAllEngines => codes::SELECT_ENG_ALL,
            UnselectAllEngines => codes::UNSELECT_ENG_ALL,
            SelectLeftEngines => codes::SELECT_ENG_LEFT,
            SelectRightEngines => codes::SELECT_ENG_RIGHT,
            SelectEngine1 => codes::SELECT_ENG_1,
            SelectEngine2 => codes::SELECT_ENG_2,
            SelectEngine3 => codes::SELECT_ENG_3,
            SelectEngine4 => codes::SELECT_ENG_4,
            ToggleEngine1Selection => codes::TOGGLE_ENG1_SELECT,
            ToggleEngine2Selection => codes::TOGGLE_ENG2_SELECT,
            ToggleEngine3Selection => codes::TOGGLE_ENG3_SELECT,
            ToggleEngine4Selection => codes::TOGGLE_ENG4_SELECT,
            ToggleAllEngines => codes::TOGGLE_ENGINES_ALL,
            ToggleLeftEngines => codes::TOGGLE_ENGINES_LEFT,
            ToggleRightEngines => codes::TOGGLE_ENGINES_RIGHT,
            BombSightAuto => codes::TOGGLE_SIGHT_AUTO,
            SightDistanceUp => codes::INC_SIGHT,
            SightDistanceDown => codes::DEC_SIGHT,
            SightRight => codes::RIGHT_SIGHT,
            SightLeft => codes::LEFT_SIGHT,
            SightAltitudeUp => codes::INC_SIGHT_ALT,
            SightAltitudeDown => codes::DEC_SIGHT_ALT,
            SightVelocityUp => codes::INC_SIGHT_VEL,
            SightVelocityDown => codes::DEC_SIGHT_VEL,
            CockpitView => codes::COCKPIT_VIEW,
            NoCockpitView => codes::NO_COCKPIT_VIEW,
            ExternalView => codes::EXT_VIEW,
            NextFriend => codes::NEXT_FRIEND,
            NextEnemy => codes::NEXT_ENEMY,
            Flyby => codes::FLYBY,
            ChaseView => codes::CHASE_VIEW,
            ChaseFriend => codes::CHASE_VIEW_FRIEND,
            ChaseEnemy => codes::CHASE_VIEW_ENEMY,
            PadlockEnemy => codes::PAD_ENEMY,
            PadlockFriend => codes::PAD_FRIEND,
            PadlockNext => codes::PAD_NEXT,
            PadlockPrevious => codes::PAD_PREV,
            PadlockFront => codes::PAD_VIEW_FRONT,
            ToggleFov => codes::TOGGLE_FOV,
            IncreaseFov => codes::INC_FOV,
            DecreaseFov => codes::DEC_FOV,
        }
    }
}

/// Landing gear legs with an individual position reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gear {
    Left,
    Right,
    Center,
}

impl Gear {
    pub fn code(self) -> Code {
        match self {
            Gear::Left => codes::GET_LEFT_GEAR_POS,
            Gear::Right => codes::GET_RIGHT_GEAR_POS,
            Gear::Center => codes::GET_CENTER_GEAR_POS,
        }
    }
}
