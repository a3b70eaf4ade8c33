/***************************************/
/*        3rd party libraries          */
/***************************************/
use driver_rust::elevio::elev::{DIRN_DOWN, DIRN_STOP, DIRN_UP};

/***************************************/
/*             Public API              */
/***************************************/

/// Direction of travel, or the absence of one.
///
/// Mirrors the hardware's three motor states (up, down, stopped) but is kept
/// as its own tagged enum rather than a signed integer: negation is the only
/// arithmetic this type needs, and a dedicated `negate` keeps callers from
/// reaching for `-1`/`0`/`1` comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    None,
    Up,
}

impl Default for Direction {
    fn default() -> Direction {
        Direction::None
    }
}

impl Direction {
    /// Down <-> Up; None is its own negation.
    pub fn negate(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::None => Direction::None,
        }
    }

    pub fn to_motor_command(self) -> u8 {
        match self {
            Direction::Up => DIRN_UP,
            Direction::Down => DIRN_DOWN,
            Direction::None => DIRN_STOP,
        }
    }
}

impl From<u8> for Direction {
    fn from(value: u8) -> Direction {
        match value {
            DIRN_UP => Direction::Up,
            DIRN_DOWN => Direction::Down,
            DIRN_STOP => Direction::None,
            _ => Direction::None,
        }
    }
}
