pub mod callers;
pub mod passengers;

pub use callers::{Caller, CallersQueue};
pub use passengers::PassengersQueue;
