mod monitor;

pub use monitor::{
    detect_transitions,
    BuildMonitor,
    CycleOutcome,
    MonitorSettings,
};
