pub mod live_loop;
pub mod monitor_session;
pub mod scenario;


pub use live_loop::run_live;
pub use monitor_session::MonitorSession;
pub use scenario::ScenarioKey;
