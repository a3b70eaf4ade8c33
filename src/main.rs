/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::Parser;
use crossbeam_channel as cbc;

/***************************************/
/*             Modules                 */
/***************************************/
mod cli;
mod config;
mod controller;
mod direction;
#[macro_use]
mod macros;
mod hardware;
mod queue;

use cli::Cli;
use controller::Controller;
use direction::Direction;
use hardware::driver::DriverHardware;
use hardware::HardwareEvent;

/***************************************/
/*                Main                 */
/***************************************/
fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .init();

    let config = config::load_config(&cli.config);
    let n_floors = config.elevator.n_floors();

    let hw = DriverHardware::new(&config.hardware, n_floors);

    let (_terminate_tx, terminate_rx) = cbc::unbounded::<()>();
    let (_poll_handle, hw_event_rx, hall_button_rx, cab_button_rx) =
        hw.spawn_poll_thread(&config.hardware, n_floors, terminate_rx);

    let mut controller = Controller::new(config.elevator.min_floor, config.elevator.max_floor, hw);

    log::info!(
        "controller ready: floors {}..={}",
        config.elevator.min_floor,
        config.elevator.max_floor
    );

    run(&mut controller, &hw_event_rx, &hall_button_rx, &cab_button_rx);
}

/// The single-threaded, run-to-completion event loop: at most one of these
/// three channels yields an event per iteration, and the Controller fully
/// finishes reacting to it (including any motion command) before the next
/// `select!` resolves.
fn run<H: hardware::HardwareElevator>(
    controller: &mut Controller<H>,
    hw_event_rx: &cbc::Receiver<HardwareEvent>,
    hall_button_rx: &cbc::Receiver<(u8, Direction)>,
    cab_button_rx: &cbc::Receiver<u8>,
) {
    loop {
        cbc::select! {
            recv(hw_event_rx) -> event => match event {
                Ok(HardwareEvent::BeforeFloor(floor, direction)) => {
                    controller.on_before_floor(floor, direction);
                }
                Ok(HardwareEvent::DoorsClosed(floor)) => {
                    controller.on_doors_closed(floor);
                }
                Err(_) => {
                    log::error!("hardware event channel closed");
                    return;
                }
            },
            recv(hall_button_rx) -> press => match press {
                Ok((floor, direction)) => controller.floor_button_pressed(floor, direction),
                Err(_) => {
                    log::error!("hall button channel closed");
                    return;
                }
            },
            recv(cab_button_rx) -> press => match press {
                Ok(floor) => controller.cabin_button_pressed(floor),
                Err(_) => {
                    log::error!("cab button channel closed");
                    return;
                }
            },
        }
    }
}
