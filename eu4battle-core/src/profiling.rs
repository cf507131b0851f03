//! Tracy profiling support.
//!
//! With the `tracy` feature enabled, `tracing` spans from the battle loop are
//! reported to Tracy and every combat day ends with a frame marker.
//!
//! ## Usage
//!
//! 1. Enable the feature: `cargo build -p eu4battle --features tracy`
//! 2. Call [`init_tracy()`] early in main
//! 3. Connect the Tracy GUI or capture tool

/// Trace level for Tracy profiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraceLevel {
    /// Only INFO spans (lowest overhead)
    #[default]
    Info,
    Debug,
    Trace,
}

impl std::str::FromStr for TraceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(TraceLevel::Info),
            "debug" => Ok(TraceLevel::Debug),
            "trace" => Ok(TraceLevel::Trace),
            _ => Err(format!(
                "Invalid trace level: {}. Use info, debug, or trace.",
                s
            )),
        }
    }
}

/// Installs the Tracy subscriber.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
#[cfg(feature = "tracy")]
pub fn init_tracy(level: TraceLevel) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let filter = match level {
        TraceLevel::Info => LevelFilter::INFO,
        TraceLevel::Debug => LevelFilter::DEBUG,
        TraceLevel::Trace => LevelFilter::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_tracy::TracyLayer::default())
        .with(filter)
        .init();
}

/// No-op when tracy feature is disabled.
#[cfg(not(feature = "tracy"))]
pub fn init_tracy(_level: TraceLevel) {}

/// Marks the end of one combat day in Tracy's timeline.
#[cfg(feature = "tracy")]
#[inline]
pub fn frame_mark_battle_day() {
    tracy_client::secondary_frame_mark!("battle_day");
}

/// No-op when tracy feature is disabled.
#[cfg(not(feature = "tracy"))]
#[inline]
pub fn frame_mark_battle_day() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_level_parse() {
        assert_eq!("DEBUG".parse::<TraceLevel>(), Ok(TraceLevel::Debug));
        assert_eq!("info".parse::<TraceLevel>(), Ok(TraceLevel::Info));
        assert!("loud".parse::<TraceLevel>().is_err());
    }
}
