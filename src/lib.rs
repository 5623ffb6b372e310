//! Ferry battery planning: size an electric ferry's battery and trace its
//! state of charge across a day of scheduled crossings.
//!
//! The member crates do the work; this crate re-exports them so the
//! command-line front-ends (and any other front-end) share one entry point.

pub use ferry_config as config;
pub use ferry_core as core;
pub use ferry_export as export;
pub use ferry_planner as planner;
pub use ferry_route as route;
pub use ferry_sizing as sizing;
pub use ferry_trajectory as trajectory;

pub use ferry_planner::{DayPlan, PlanError, plan_day};

pub mod logging {
    use tracing_subscriber::EnvFilter;

    /// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
    pub fn init() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
