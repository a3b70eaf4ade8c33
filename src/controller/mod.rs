/**
 * The scheduling/dispatch core: owns the two pending-request queues and
 * decides the next motion command.
 *
 * Implements a SCAN-style ("elevator algorithm") dispatch discipline,
 * refined by a caller-directional hint and a fairness counter for
 * requests made while the system is fully idle. This is the only part of
 * the elevator with real design tension -- everything else (physical
 * motion, door timing, floor sensing) is the `HardwareElevator`'s job.
 *
 * # Fields
 * - `min_floor`, `max_floor`:  Immutable bounds, fixed at construction.
 * - `hw`:                      The sole collaborator: commands and queries
 *                              the physical/simulated elevator.
 * - `passengers`:              In-cabin destinations.
 * - `callers`:                 External hall calls with direction hints.
 * - `doors_closed`:            False between a `stop_and_open_doors` command
 *                              and the matching `doorsClosed` event.
 * - `last_direction`:          The sweep direction being honored; `None`
 *                              once the Controller has decided there is
 *                              nothing to do.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::direction::Direction;
use crate::hardware::HardwareElevator;
use crate::queue::{CallersQueue, PassengersQueue};

/***************************************/
/*             Public API              */
/***************************************/
pub struct Controller<H: HardwareElevator> {
    min_floor: u8,
    max_floor: u8,
    hw: H,
    passengers: PassengersQueue,
    callers: CallersQueue,
    doors_closed: bool,
    last_direction: Direction,
}

impl<H: HardwareElevator> Controller<H> {
    /// Both queues start empty, doors are considered closed and the cabin
    /// has no sweep direction to honor.
    pub fn new(min_floor: u8, max_floor: u8, hw: H) -> Controller<H> {
        Controller {
            min_floor,
            max_floor,
            hw,
            passengers: PassengersQueue::new(),
            callers: CallersQueue::new(),
            doors_closed: true,
            last_direction: Direction::None,
        }
    }

    /// Releases the hardware handle. The core has no subscription state of
    /// its own to tear down -- whoever wired the hardware's event channels
    /// to this Controller's handler methods drops those channel ends
    /// instead -- so this is just ownership transfer back to the caller.
    pub fn destroy(self) -> H {
        self.hw
    }

    /// External hall call.
    pub fn floor_button_pressed(&mut self, floor: u8, direction: Direction) {
        let direction = self.correct_boundary_direction(floor, direction);

        let revised = match self.callers.get_floor_direction(floor) {
            Some(existing) if existing != direction => {
                debug!("caller at floor {} revised direction to {:?}", floor, direction);
                self.callers.change_direction(floor, direction);
                true
            }
            _ => false,
        };

        let current_floor = self.hw.current_floor();
        let current_direction = self.hw.current_direction();

        if floor == current_floor && (direction == current_direction || current_direction == Direction::None) {
            self.stop();
        } else {
            if !revised {
                debug!("caller queued at floor {} wanting {:?}", floor, direction);
                self.callers.append(floor, direction);
            }
            if self.doors_closed && current_direction == Direction::None {
                self.move_next(current_floor);
            }
        }
    }

    /// In-cabin destination selection.
    pub fn cabin_button_pressed(&mut self, floor: u8) {
        if !self.in_bounds(floor) {
            return;
        }

        let current_floor = self.hw.current_floor();
        if self.passengers.contains(floor) {
            debug!("cabin request for floor {} cancelled", floor);
            self.passengers.remove(floor);
        } else if floor == current_floor {
            self.stop();
        } else {
            debug!("cabin request queued for floor {}", floor);
            self.passengers.insert(floor);
            if self.doors_closed && self.hw.current_direction() == Direction::None {
                self.move_next(current_floor);
            }
        }
    }

    /// Invoked by the hardware once doors have finished cycling.
    pub fn on_doors_closed(&mut self, floor: u8) {
        self.doors_closed = true;
        self.move_next(floor);
    }

    /// Invoked by the hardware shortly before arriving at `floor` while
    /// travelling in `direction`.
    pub fn on_before_floor(&mut self, floor: u8, direction: Direction) {
        if self.passengers.contains(floor) {
            self.passengers.remove(floor);
            self.stop();
        }

        if self.callers.get_floor_direction(floor) == Some(direction) {
            self.callers.remove(floor);
            self.stop();
        }
    }

    /// If (floor==min_floor, Down) or (floor==max_floor, Up), the hint is
    /// physically impossible and gets rewritten.
    fn correct_boundary_direction(&self, floor: u8, direction: Direction) -> Direction {
        let impossible = (floor == self.min_floor && direction == Direction::Down)
            || (floor == self.max_floor && direction == Direction::Up);
        if impossible {
            direction.negate()
        } else {
            direction
        }
    }

    fn in_bounds(&self, floor: u8) -> bool {
        floor >= self.min_floor && floor <= self.max_floor
    }

    /// Dispatch decision, consulted after doors close or when a request
    /// arrives while the cabin is idle with doors closed. The first
    /// matching clause commits a motion command; if none does,
    /// `last_direction` is reset to `None`.
    fn move_next(&mut self, from_floor: u8) {
        let has_up = self.passengers.has_up(from_floor);
        let has_down = self.passengers.has_down(from_floor);

        if self.last_direction == Direction::Up && has_up {
            self.move_up();
        } else if self.last_direction == Direction::Down && has_down {
            self.move_down();
        } else if has_up {
            self.move_up();
        } else if has_down {
            self.move_down();
        } else if self.callers.is_empty() {
            // Nothing pending anywhere; stay idle without touching
            // last_direction.
        } else if self.last_direction == Direction::None {
            // Cold start: go toward the oldest call, direction hint unused.
            let next_floor = self.callers.get_first();
            if next_floor < from_floor {
                self.move_down();
            } else {
                self.move_up();
            }
        } else {
            let above_up = self.callers.has_above(from_floor, Direction::Up);
            let above_down = self.callers.has_above(from_floor, Direction::Down);
            let below_up = self.callers.has_below(from_floor, Direction::Up);
            let below_down = self.callers.has_below(from_floor, Direction::Down);

            let next = match self.last_direction {
                Direction::Up if above_up || above_down => Some(Direction::Up),
                Direction::Up if below_up || below_down => Some(Direction::Down),
                Direction::Down if below_down || below_up => Some(Direction::Down),
                Direction::Down if above_up || above_down => Some(Direction::Up),
                _ => None,
            };

            match next {
                Some(Direction::Up) => self.move_up(),
                Some(Direction::Down) => self.move_down(),
                _ => self.last_direction = Direction::None,
            }
        }
    }

    fn move_up(&mut self) {
        info!("move up from floor (commanded)");
        self.hw.move_up();
        self.last_direction = Direction::Up;
    }

    fn move_down(&mut self) {
        info!("move down (commanded)");
        self.hw.move_down();
        self.last_direction = Direction::Down;
    }

    /// A no-op if doors are already open -- this is what prevents a
    /// passenger drop-off and a same-direction pickup at the same floor
    /// from issuing `stop_and_open_doors` twice.
    fn stop(&mut self) {
        if self.doors_closed {
            info!("stop and open doors");
            self.doors_closed = false;
            self.hw.stop_and_open_doors();
        }
    }
}

/***************************************/
/*             Test API                */
/***************************************/
