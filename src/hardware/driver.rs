/**
 * Adapter over `driver-rust`'s `Elevator` handle.
 *
 * The Controller commands (`move_up`/`move_down`/`stop_and_open_doors`) and
 * queries (`current_floor`/`current_direction`) this type directly and
 * synchronously, on its own thread. A background polling thread
 * (`spawn_poll_thread`) turns physical sensor state into the two
 * `HardwareEvent`s and the raw button presses, debounces button lights, and
 * owns door timing -- none of which the Controller has any say over.
 * Obstruction handling and the stop button are out of scope entirely.
 */

/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use driver_rust::elevio::elev::{Elevator, CAB, HALL_DOWN, HALL_UP};
use log::debug;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use super::{HardwareElevator, HardwareEvent};
use crate::config::HardwareConfig;
use crate::direction::Direction;
use crate::unwrap_or_exit;

/// Sentinel for "no floor sensor reading has arrived yet".
const NO_FLOOR: u8 = u8::MAX;

/***************************************/
/*             Public API              */
/***************************************/
pub struct DriverHardware {
    elevator: Elevator,
    last_floor: Arc<AtomicU8>,
    last_direction: Arc<Mutex<Direction>>,
    door_open: Arc<AtomicBool>,
    clear_buttons_tx: cbc::Sender<u8>,
    clear_buttons_rx: cbc::Receiver<u8>,
}

impl DriverHardware {
    pub fn new(config: &HardwareConfig, n_floors: u8) -> DriverHardware {
        let address = format!("{}:{}", config.driver_address, config.driver_port);
        let elevator = unwrap_or_exit!(Elevator::init(&address, n_floors));
        let (clear_buttons_tx, clear_buttons_rx) = cbc::unbounded();
        DriverHardware {
            elevator,
            last_floor: Arc::new(AtomicU8::new(NO_FLOOR)),
            last_direction: Arc::new(Mutex::new(Direction::None)),
            door_open: Arc::new(AtomicBool::new(false)),
            clear_buttons_tx,
            clear_buttons_rx,
        }
    }

    /// Spawns the polling thread that feeds `hw_event_tx` and the two
    /// button-press channels, sharing this adapter's floor/direction/door
    /// bookkeeping. Returns the thread handle plus the receivers to wire
    /// into the Controller's `run()` loop.
    pub fn spawn_poll_thread(
        &self,
        config: &HardwareConfig,
        n_floors: u8,
        terminate_rx: cbc::Receiver<()>,
    ) -> (
        JoinHandle<()>,
        cbc::Receiver<HardwareEvent>,
        cbc::Receiver<(u8, Direction)>,
        cbc::Receiver<u8>,
    ) {
        let (hw_event_tx, hw_event_rx) = cbc::unbounded();
        let (hall_button_tx, hall_button_rx) = cbc::unbounded();
        let (cab_button_tx, cab_button_rx) = cbc::unbounded();

        let elevator = self.elevator.clone();
        let last_floor = self.last_floor.clone();
        let last_direction = self.last_direction.clone();
        let door_open = self.door_open.clone();
        let clear_buttons_rx = self.clear_buttons_rx.clone();
        let sleep_time = Duration::from_millis(config.hw_thread_sleep_time);
        let door_open_time = Duration::from_secs(config.door_open_time);

        let handle = thread::spawn(move || {
            poll_loop(
                elevator,
                n_floors,
                last_floor,
                last_direction,
                door_open,
                sleep_time,
                door_open_time,
                hw_event_tx,
                hall_button_tx,
                cab_button_tx,
                clear_buttons_rx,
                terminate_rx,
            )
        });

        (handle, hw_event_rx, hall_button_rx, cab_button_rx)
    }
}

impl HardwareElevator for DriverHardware {
    fn move_up(&mut self) {
        self.elevator.motor_direction(Direction::Up.to_motor_command());
        *self.last_direction.lock().unwrap() = Direction::Up;
    }

    fn move_down(&mut self) {
        self.elevator
            .motor_direction(Direction::Down.to_motor_command());
        *self.last_direction.lock().unwrap() = Direction::Down;
    }

    fn stop_and_open_doors(&mut self) {
        self.elevator
            .motor_direction(Direction::None.to_motor_command());
        self.elevator.door_light(true);
        self.door_open.store(true, Ordering::SeqCst);
        *self.last_direction.lock().unwrap() = Direction::None;
        // The floor being serviced re-arms its call buttons once the poll
        // thread has cleared their lights -- see `poll_loop`.
        let _ = self.clear_buttons_tx.send(self.current_floor());
    }

    fn current_floor(&self) -> u8 {
        match self.last_floor.load(Ordering::SeqCst) {
            NO_FLOOR => 0,
            floor => floor,
        }
    }

    fn current_direction(&self) -> Direction {
        *self.last_direction.lock().unwrap()
    }
}

/***************************************/
/*          Polling thread             */
/***************************************/
#[allow(clippy::too_many_arguments)]
fn poll_loop(
    elevator: Elevator,
    n_floors: u8,
    last_floor: Arc<AtomicU8>,
    last_direction: Arc<Mutex<Direction>>,
    door_open: Arc<AtomicBool>,
    sleep_time: Duration,
    door_open_time: Duration,
    hw_event_tx: cbc::Sender<HardwareEvent>,
    hall_button_tx: cbc::Sender<(u8, Direction)>,
    cab_button_tx: cbc::Sender<u8>,
    clear_buttons_rx: cbc::Receiver<u8>,
    terminate_rx: cbc::Receiver<()>,
) {
    let mut pressed = vec![[false; 3]; n_floors as usize];
    let mut door_timer: Option<Instant> = None;

    for floor in 0..n_floors {
        elevator.call_button_light(floor, HALL_UP, false);
        elevator.call_button_light(floor, HALL_DOWN, false);
        elevator.call_button_light(floor, CAB, false);
    }

    loop {
        if terminate_rx.try_recv().is_ok() {
            break;
        }

        while let Ok(floor) = clear_buttons_rx.try_recv() {
            for button in [HALL_UP, HALL_DOWN, CAB] {
                elevator.call_button_light(floor, button, false);
                pressed[floor as usize][button as usize] = false;
            }
        }

        if let Some(floor) = elevator.floor_sensor() {
            if last_floor.swap(floor, Ordering::SeqCst) != floor {
                let direction = *last_direction.lock().unwrap();
                if direction != Direction::None {
                    debug!("before floor {} heading {:?}", floor, direction);
                    let _ = hw_event_tx.send(HardwareEvent::BeforeFloor(floor, direction));
                }
            }
        }

        for floor in 0..n_floors {
            if !pressed[floor as usize][HALL_UP as usize] && elevator.call_button(floor, HALL_UP) {
                pressed[floor as usize][HALL_UP as usize] = true;
                elevator.call_button_light(floor, HALL_UP, true);
                let _ = hall_button_tx.send((floor, Direction::Up));
            }
            if !pressed[floor as usize][HALL_DOWN as usize] && elevator.call_button(floor, HALL_DOWN) {
                pressed[floor as usize][HALL_DOWN as usize] = true;
                elevator.call_button_light(floor, HALL_DOWN, true);
                let _ = hall_button_tx.send((floor, Direction::Down));
            }
            if !pressed[floor as usize][CAB as usize] && elevator.call_button(floor, CAB) {
                pressed[floor as usize][CAB as usize] = true;
                elevator.call_button_light(floor, CAB, true);
                let _ = cab_button_tx.send(floor);
            }
        }

        if door_open.load(Ordering::SeqCst) {
            let opened_at = *door_timer.get_or_insert_with(Instant::now);
            if opened_at.elapsed() >= door_open_time {
                elevator.door_light(false);
                door_open.store(false, Ordering::SeqCst);
                door_timer = None;
                let floor = last_floor.load(Ordering::SeqCst);
                let _ = hw_event_tx.send(HardwareEvent::DoorsClosed(floor));
            }
        } else {
            door_timer = None;
        }

        thread::sleep(sleep_time);
    }
}
