// The boy's four behaviour states

mod auto_run;
mod idle;
mod run;
mod sleep;

pub use auto_run::AutoRun;
pub use idle::Idle;
pub use run::Run;
pub use sleep::Sleep;
