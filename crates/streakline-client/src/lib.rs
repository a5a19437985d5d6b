pub mod activity;
pub mod commands;
pub mod contracts;
pub mod dates;
pub mod error;
pub mod migrations;
pub mod profiles;
pub mod setup;
pub mod state;

pub use activity::clock::{Clock, FixedClock, LocalClock};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
