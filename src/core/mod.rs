pub mod config;
pub mod errors;
mod gates;
mod input;
pub(crate) mod state;
pub mod utils;

pub use config::{GateConvention, RegisterConfig};
pub use gates::{DEFAULT_TARGET, Gate, GateKind, UNITARITY_TOLERANCE};
pub use input::IntoStateMatrix;
pub use state::QubitRegister;
