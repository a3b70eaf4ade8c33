/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub elevator: ElevatorConfig,
    pub hardware: HardwareConfig,
}

/// Bounds the Controller is constructed with: configured once and
/// immutable for the Controller's lifetime.
#[derive(Deserialize, Clone, Debug)]
pub struct ElevatorConfig {
    pub min_floor: u8,
    pub max_floor: u8,
}

impl ElevatorConfig {
    pub fn n_floors(&self) -> u8 {
        self.max_floor - self.min_floor + 1
    }
}

/// Driver-adapter settings. Door timing lives here rather than on the
/// Controller: door timing is entirely the hardware adapter's
/// responsibility.
#[derive(Deserialize, Clone, Debug)]
pub struct HardwareConfig {
    pub driver_address: String,
    pub driver_port: u16,
    pub hw_thread_sleep_time: u64,
    pub door_open_time: u64,
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> Config {
    let config_str = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read config file {}: {}", path, e));
    toml::from_str(&config_str)
        .unwrap_or_else(|e| panic!("failed to parse config file {}: {}", path, e))
}
