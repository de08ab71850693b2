//! Aircraft-level queries and command sequences that do not fit a field table

use crate::error::{LinkError, Result};
use crate::fields::{check_engine, Action, Bounds, Gear};
use crate::protocol::{codes, Code, SKIP_INDEXED, SKIP_PLAIN};
use crate::transport::Transport;
use super::{reject, DeviceLink};

/// Highest engine count the simulator reports
const MAX_ENGINES: i32 = 8;

impl<T: Transport> DeviceLink<T> {
    // =========================================================================
    // Identification
    // =========================================================================

    /// DeviceLink protocol version string
    pub fn version(&self) -> Result<String> {
        self.session.read_value(&codes::GET_VERSION, SKIP_PLAIN)
    }

    /// Aircraft type name (`P-51`)
    pub fn aircraft_id(&self) -> Result<String> {
        self.session.read_value(&codes::GET_PLANE, SKIP_PLAIN)
    }

    /// Mission time of day
    pub fn time_of_day(&self) -> Result<f32> {
        self.read_checked("time_of_day", &codes::TIME_OF_DAY, SKIP_PLAIN, Bounds::NON_NEGATIVE)
    }

    pub fn cockpit_count(&self) -> Result<i32> {
        self.session.read_int(&codes::GET_COCKPITS, SKIP_PLAIN)
    }

    pub fn current_cockpit(&self) -> Result<i32> {
        self.session.read_int(&codes::GET_CUR_COCKPIT, SKIP_PLAIN)
    }

    /// Number of engines fitted, 1..=8
    pub fn engine_count(&self) -> Result<u8> {
        let count = self.session.read_int(&codes::GET_ENGINES, SKIP_PLAIN)?;
        if (1..=MAX_ENGINES).contains(&count) {
            Ok(count as u8)
        } else {
            Err(reject(LinkError::OutOfRange {
                field: "engine_count",
                value: count as f64,
                min: 1.0,
                max: MAX_ENGINES as f64,
            }))
        }
    }

    // =========================================================================
    // Airframe
    // =========================================================================

    /// Magneto switch position of one engine (0 = off, 3 = both)
    pub fn magnetos(&self, engine: usize) -> Result<i32> {
        let engine = check_engine(engine)?;
        let value = self
            .session
            .read_int(&codes::GET_MAG.with_arg(engine), SKIP_INDEXED)?;
        Bounds::new(0.0, 3.0).check("magnetos", value as f32).map_err(reject)?;
        Ok(value)
    }

    /// G load on the airframe
    pub fn overload(&self) -> Result<f32> {
        self.read_checked("overload", &codes::GET_OVERLOAD, SKIP_PLAIN, Bounds::UNBOUNDED)
    }

    /// Airframe shake intensity, 0..=1
    pub fn shake_level(&self) -> Result<f32> {
        self.read_checked("shake_level", &codes::GET_SHAKE, SKIP_PLAIN, Bounds::FLAG)
    }

    /// Extension of one gear leg, 0 = retracted
    pub fn gear_position(&self, gear: Gear) -> Result<f32> {
        self.read_checked("gear_position", &gear.code(), SKIP_PLAIN, Bounds::NON_NEGATIVE)
    }

    /// True when the gear lever is in the up position
    pub fn is_gear_up(&self) -> Result<bool> {
        let status = self.read_checked(
            "gear_status",
            &codes::GET_GEAR_STATUS,
            SKIP_PLAIN,
            Bounds::NON_NEGATIVE,
        )?;
        Ok(status == 0.0)
    }

    /// Move the gear lever to the requested position
    ///
    /// The simulator only offers a toggle, so the current state is read
    /// first. Returns `true` if a toggle was sent.
    pub fn set_gear(&self, up: bool) -> Result<bool> {
        if self.is_gear_up()? == up {
            return Ok(false);
        }
        self.session.toggle(&codes::SET_GEAR_STATUS)?;
        tracing::debug!("gear lever moved {}", if up { "up" } else { "down" });
        Ok(true)
    }

    // =========================================================================
    // Engines
    // =========================================================================

    /// Start or stop one engine
    ///
    /// Selects the engine, toggles it and reselects all engines, all in one
    /// datagram so no other command can land in between.
    pub fn start_engine(&self, engine: usize) -> Result<()> {
        let select = Action::select_engine(engine)?.code();
        self.session
            .send_codes(&[select, codes::TOGGLE_ENGINE, codes::SELECT_ENG_ALL])
    }

    /// Make `engine` the only selected engine
    pub fn select_engine(&self, engine: usize) -> Result<()> {
        self.session.toggle(&Action::select_engine(engine)?.code())
    }

    /// Add `engine` to the selection, or remove it if already selected
    pub fn toggle_engine_selection(&self, engine: usize) -> Result<()> {
        self.session.toggle(&Action::toggle_engine_selection(engine)?.code())
    }

    /// Toggle propeller feathering, but only while the simulator reports
    /// feathering available (162 reads 1)
    ///
    /// Returns `true` if the toggle was sent.
    pub fn feather(&self) -> Result<bool> {
        if self.session.read_int(&codes::GET_FEATHER, SKIP_PLAIN)? != 1 {
            return Ok(false);
        }
        self.session.toggle(&codes::TOGGLE_FEATHER)?;
        Ok(true)
    }

    /// True while war emergency power is engaged
    pub fn is_wep_engaged(&self) -> Result<bool> {
        Ok(self.session.read_int(&codes::GET_WEP, SKIP_PLAIN)? == 1)
    }

    // =========================================================================
    // Crew
    // =========================================================================

    /// Move the player to cockpit position 1..=10
    pub fn jump_to_cockpit(&self, position: usize) -> Result<()> {
        let code = position
            .checked_sub(1)
            .and_then(|i| codes::JUMP_TO_POS.get(i))
            .ok_or_else(|| {
                LinkError::InvalidArgument(format!(
                    "cockpit position {} outside 1..={}",
                    position,
                    codes::JUMP_TO_POS.len()
                ))
            })?;
        self.session.toggle(code)
    }

    /// Order the AI gunner to hold or open fire
    pub fn set_gunner(&self, firing: bool) -> Result<()> {
        self.session.set_int(&codes::SET_GUNNER, i32::from(firing))
    }

    // =========================================================================
    // Access Rights
    // =========================================================================

    /// True if the server allows reading `code`
    pub fn is_get_allowed(&self, code: &Code) -> Result<bool> {
        self.access_check(&codes::ACCESS_GET, code)
    }

    /// True if the server allows sending `code`
    pub fn is_set_allowed(&self, code: &Code) -> Result<bool> {
        self.access_check(&codes::ACCESS_SET, code)
    }

    /// The server echoes the code back only when access is granted
    fn access_check(&self, access: &Code, code: &Code) -> Result<bool> {
        match self.session.read_value(&access.with_arg(code), SKIP_PLAIN) {
            Ok(_) => Ok(true),
            Err(LinkError::NoMatchingCode(_)) | Err(LinkError::EmptyValue(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
