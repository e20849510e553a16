pub mod exit;
mod io_pump;
mod process;
mod runtime;
pub mod types;

mod run;
mod traits;

pub use exit::ChildExit;
pub use io_pump::pump;
pub use process::ProcessRunner;
pub use run::{run_relay, start_session, RunRelayArgs};
pub use traits::{RunnerPlugin, RunnerSession};
pub use types::{RelayOptions, RelayOutcome, RunnerStartArgs};
