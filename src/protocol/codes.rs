//! DeviceLink vocabulary
//!
//! Every code the simulator understands. Even codes read a value, the
//! following odd code sets or toggles it.

use super::Code;

// =============================================================================
// Session
// =============================================================================

/// Answers the running DeviceLink version string
pub const GET_VERSION: Code = Code::new("2");
/// `4\<code>` answers whether a read of `<code>` is permitted
pub const ACCESS_GET: Code = Code::new("4");
/// `6\<code>` answers whether a write of `<code>` is permitted
pub const ACCESS_SET: Code = Code::new("6");

// =============================================================================
// Aircraft
// =============================================================================

/// Time of day in hours (float)
pub const TIME_OF_DAY: Code = Code::new("20");
/// Aircraft identifier (text)
pub const GET_PLANE: Code = Code::new("22");
/// Number of cockpits (int)
pub const GET_COCKPITS: Code = Code::new("24");
/// Current cockpit, 0 = pilot, -1 = external (int)
pub const GET_CUR_COCKPIT: Code = Code::new("26");
/// Number of engines (int)
pub const GET_ENGINES: Code = Code::new("28");
pub const GET_OVERLOAD: Code = Code::new("52");
/// Shake level 0..1 (float)
pub const GET_SHAKE: Code = Code::new("54");

// =============================================================================
// Flight Instruments
// =============================================================================

pub const GET_IAS: Code = Code::new("30");
pub const GET_VARIO: Code = Code::new("32");
pub const GET_SLIP: Code = Code::new("34");
pub const GET_TURN: Code = Code::new("36");
pub const GET_ANG_SPD: Code = Code::new("38");
pub const GET_ALT: Code = Code::new("40");
pub const GET_AZI: Code = Code::new("42");
pub const GET_BEACON_AZI: Code = Code::new("44");
pub const GET_ROLL: Code = Code::new("46");
pub const GET_PITCH: Code = Code::new("48");
pub const GET_FUEL: Code = Code::new("50");

// =============================================================================
// Engines (indexed with `\<engine>`)
// =============================================================================

pub const GET_MAG: Code = Code::new("62");
pub const GET_RPM: Code = Code::new("64");
pub const GET_MANIFOLD: Code = Code::new("66");
pub const GET_TEMP_OILIN: Code = Code::new("68");
pub const GET_TEMP_OILOUT: Code = Code::new("70");
pub const GET_TEMP_WATER: Code = Code::new("72");
pub const GET_TEMP_CYL: Code = Code::new("74");

pub const GET_POWER: Code = Code::new("80");
pub const SET_POWER: Code = Code::new("81");
pub const GET_PROP_PITCH: Code = Code::new("92");
pub const SET_PROP_PITCH: Code = Code::new("93");

pub const TOGGLE_ENGINE: Code = Code::new("103");
pub const GET_WEP: Code = Code::new("104");
pub const TOGGLE_WEP: Code = Code::new("105");
pub const SET_CHRG_NXT: Code = Code::new("111");
pub const SET_CHRG_PREV: Code = Code::new("113");
pub const SELECT_ENG_ALL: Code = Code::new("115");
pub const UNSELECT_ENG_ALL: Code = Code::new("117");
pub const SELECT_ENG_LEFT: Code = Code::new("119");
pub const SELECT_ENG_RIGHT: Code = Code::new("121");
pub const SELECT_ENG_1: Code = Code::new("123");
pub const SELECT_ENG_2: Code = Code::new("125");
pub const SELECT_ENG_3: Code = Code::new("127");
pub const SELECT_ENG_4: Code = Code::new("129");
pub const TOGGLE_ENGINES_ALL: Code = Code::new("139");
pub const TOGGLE_ENGINES_LEFT: Code = Code::new("141");
pub const TOGGLE_ENGINES_RIGHT: Code = Code::new("143");
pub const TOGGLE_ENG1_SELECT: Code = Code::new("145");
pub const TOGGLE_ENG2_SELECT: Code = Code::new("147");
pub const TOGGLE_ENG3_SELECT: Code = Code::new("149");
pub const TOGGLE_ENG4_SELECT: Code = Code::new("151");
pub const SET_FIRE_EXT: Code = Code::new("161");
pub const GET_FEATHER: Code = Code::new("162");
pub const TOGGLE_FEATHER: Code = Code::new("163");
pub const SET_COWL_FLAPS: Code = Code::new("171");

/// Codes refreshed together by a composite engine query, in request order
pub const ENGINE_METRICS: [Code; 6] = [
    GET_RPM,
    GET_MANIFOLD,
    GET_TEMP_OILIN,
    GET_TEMP_OILOUT,
    GET_TEMP_WATER,
    GET_TEMP_CYL,
];

// =============================================================================
// Landing Gear
// =============================================================================

pub const GET_LEFT_GEAR_POS: Code = Code::new("56");
pub const GET_RIGHT_GEAR_POS: Code = Code::new("58");
pub const GET_CENTER_GEAR_POS: Code = Code::new("60");
pub const GET_GEAR_STATUS: Code = Code::new("164");
pub const SET_GEAR_STATUS: Code = Code::new("165");
pub const RAISE_GEAR_MAN: Code = Code::new("167");
pub const LOWER_GEAR_MAN: Code = Code::new("169");

// =============================================================================
// Control Surfaces (float -1.0..=1.0)
// =============================================================================

pub const GET_FLAPS_POS: Code = Code::new("82");
pub const SET_FLAPS_POS: Code = Code::new("83");
pub const GET_AILERON: Code = Code::new("84");
pub const SET_AILERON: Code = Code::new("85");
pub const GET_ELV: Code = Code::new("86");
pub const SET_ELV: Code = Code::new("87");
pub const GET_RUDDER: Code = Code::new("88");
pub const SET_RUDDER: Code = Code::new("89");
pub const GET_BRAKES: Code = Code::new("90");
pub const SET_BRAKES: Code = Code::new("91");
pub const GET_AIL_TRIM: Code = Code::new("94");
pub const SET_AIL_TRIM: Code = Code::new("95");
pub const GET_ELV_TRIM: Code = Code::new("96");
pub const SET_ELV_TRIM: Code = Code::new("97");
pub const GET_RUDDER_TRIM: Code = Code::new("98");
pub const SET_RUDDER_TRIM: Code = Code::new("99");

// =============================================================================
// Switches (int 0/1)
// =============================================================================

pub const GET_LVL_STAB: Code = Code::new("100");
pub const TOGGLE_STAB: Code = Code::new("101");
pub const GET_AIRBRK: Code = Code::new("172");
pub const TOGGLE_AIRBRK: Code = Code::new("173");
pub const GET_TAILWHEEL: Code = Code::new("174");
pub const TOGGLE_TAILWHEEL: Code = Code::new("175");
pub const SET_DROP_TANKS: Code = Code::new("177");
pub const TOGGLE_ATTACH_PLANE: Code = Code::new("179");
pub const GET_WING_FOLD: Code = Code::new("210");
pub const TOGGLE_WING_FOLD: Code = Code::new("211");
pub const GET_CANOPY: Code = Code::new("212");
pub const TOGGLE_CANOPY: Code = Code::new("213");
pub const GET_HOOK: Code = Code::new("214");
pub const TOGGLE_HOOK: Code = Code::new("215");
pub const GET_CHOCKS: Code = Code::new("216");
pub const TOGGLE_CHOCKS: Code = Code::new("217");
pub const GET_GUNNER: Code = Code::new("220");
pub const SET_GUNNER: Code = Code::new("221");

// =============================================================================
// Weapons (int 0/1, set with `\<0|1>`)
// =============================================================================

pub const GET_WEAP1: Code = Code::new("180");
pub const SET_WEAP1: Code = Code::new("181");
pub const GET_WEAP2: Code = Code::new("182");
pub const SET_WEAP2: Code = Code::new("183");
pub const GET_WEAP3: Code = Code::new("184");
pub const SET_WEAP3: Code = Code::new("185");
pub const GET_WEAP4: Code = Code::new("186");
pub const SET_WEAP4: Code = Code::new("187");
pub const GET_WEAP1_2: Code = Code::new("188");
pub const SET_WEAP1_2: Code = Code::new("189");
pub const GET_GUNPOD: Code = Code::new("190");
pub const SET_GUNPOD: Code = Code::new("191");

// =============================================================================
// Bomb Sight
// =============================================================================

pub const TOGGLE_SIGHT_AUTO: Code = Code::new("193");
pub const INC_SIGHT: Code = Code::new("195");
pub const DEC_SIGHT: Code = Code::new("197");
pub const RIGHT_SIGHT: Code = Code::new("199");
pub const LEFT_SIGHT: Code = Code::new("201");
pub const INC_SIGHT_ALT: Code = Code::new("203");
pub const DEC_SIGHT_ALT: Code = Code::new("205");
pub const INC_SIGHT_VEL: Code = Code::new("207");
pub const DEC_SIGHT_VEL: Code = Code::new("209");

// =============================================================================
// Cockpit Positions & Views
// =============================================================================

pub const GET_GUNNER_POS: Code = Code::new("300");
pub const SET_GUNNER_POS: Code = Code::new("301");

/// Jump targets for cockpit positions 1..=10
pub static JUMP_TO_POS: [Code; 10] = [
    Code::new("303"),
    Code::new("305"),
    Code::new("307"),
    Code::new("309"),
    Code::new("311"),
    Code::new("313"),
    Code::new("315"),
    Code::new("317"),
    Code::new("319"),
    Code::new("321"),
];

pub const GET_FOV: Code = Code::new("348");
pub const TOGGLE_FOV: Code = Code::new("349");
pub const INC_FOV: Code = Code::new("351");
pub const DEC_FOV: Code = Code::new("353");
pub const COCKPIT_VIEW: Code = Code::new("355");
pub const NO_COCKPIT_VIEW: Code = Code::new("357");
pub const EXT_VIEW: Code = Code::new("359");
pub const NEXT_FRIEND: Code = Code::new("361");
pub const NEXT_ENEMY: Code = Code::new("363");
pub const FLYBY: Code = Code::new("365");
pub const PAD_ENEMY: Code = Code::new("367");
pub const PAD_FRIEND: Code = Code::new("369");
pub const PAD_ENEMY_GRND: Code = Code::new("371");
pub const PAD_FRIEND_GRND: Code = Code::new("373");
pub const PAD_NEXT: Code = Code::new("375");
pub const PAD_PREV: Code = Code::new("377");
pub const PAD_EXT_ENEMY: Code = Code::new("381");
pub const PAD_EXT_FRIEND: Code = Code::new("383");
pub const PAD_EXT_CLOSE_ENEMY: Code = Code::new("385");
pub const PAD_EXT_ENEMY_GRND: Code = Code::new("387");
pub const PAD_EXT_FRIEND_GRND: Code = Code::new("389");
pub const PAD_EXT_CLOSE_ENEMY_GRND: Code = Code::new("391");
pub const CHASE_VIEW: Code = Code::new("393");
pub const CHASE_VIEW_FRIEND: Code = Code::new("395");
pub const CHASE_VIEW_ENEMY: Code = Code::new("397");
pub const PAD_VIEW_FRONT: Code = Code::new("479");

// =============================================================================
// Misc Toggles
// =============================================================================

pub const TOGGLE_GUNSIGHT: Code = Code::new("399");
pub const TOGGLE_AUTOPILOT: Code = Code::new("401");
pub const TOGGLE_LVL_AUTOPILOT: Code = Code::new("403");
pub const BAILOUT: Code = Code::new("405");
pub const TINT_RETICLE: Code = Code::new("407");
pub const TOGGLE_COCKPIT_LTS: Code = Code::new("409");
pub const TOGGLE_NAV_LTS: Code = Code::new("411");
pub const TOGGLE_LND_LTS: Code = Code::new("413");
pub const TOGGLE_SMOKE: Code = Code::new("415");
pub const TOGGLE_MAP: Code = Code::new("417");
pub const TOGGLE_CHAT: Code = Code::new("419");
pub const TOGGLE_ONLINE_RATE: Code = Code::new("421");
pub const TOGGLE_SPEED_BAR: Code = Code::new("423");
pub const TOGGLE_ICONS: Code = Code::new("425");
pub const TOGGLE_MIRRORS: Code = Code::new("427");
pub const TOGGLE_SAVE_TRACK: Code = Code::new("429");
pub const TOGGLE_ACCEL_TIME: Code = Code::new("435");
pub const TOGGLE_NORMAL_TIME: Code = Code::new("437");
pub const TOGGLE_DEC_TIME: Code = Code::new("439");
pub const TOGGLE_PAUSE: Code = Code::new("441");
