#![forbid(unsafe_code)]

//! Command-line options for the demo dashboard.
//!
//! Every flag has a `TOURKIT_*` environment fallback; explicit flags win.
//! The log filter follows `RUST_LOG`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tourkit_widgets::tour::{Motion, SpotlightConfig, TourConfig};

const AFTER_HELP: &str = "\
KEYBINDINGS:
    t               Start the guided tour
    Tab             Switch between Orders and Inventory
    s               Sort orders by the next column
    f               Cycle the shop filter
    q / Ctrl+C      Quit

DURING THE TOUR:
    Right / Enter   Next step (Finish on the last one)
    Left            Previous step
    Esc             End the tour
    Mouse           Click Back, Next, a progress dot, or the close mark";

/// How the spotlight travels between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MotionArg {
    /// Damped spring per edge.
    #[default]
    Spring,
    /// Eased 250ms tween.
    Tween,
    /// No animation.
    Instant,
}

impl From<MotionArg> for Motion {
    fn from(arg: MotionArg) -> Self {
        match arg {
            MotionArg::Spring => Motion::SPRING,
            MotionArg::Tween => Motion::TWEEN,
            MotionArg::Instant => Motion::Instant,
        }
    }
}

/// Parsed command-line options.
#[derive(Debug, Clone, Parser)]
#[command(name = "tourkit-demo", version)]
#[command(about = "Order and inventory dashboard with a guided onboarding tour")]
#[command(after_help = AFTER_HELP)]
pub struct Opts {
    /// Start the tour as soon as the dashboard opens
    #[arg(long, env = "TOURKIT_START_TOUR")]
    pub start_tour: bool,

    /// Spotlight motion between steps
    #[arg(long, value_enum, default_value_t = MotionArg::Spring, env = "TOURKIT_MOTION")]
    pub motion: MotionArg,

    /// Cells of space between a target and the spotlight edge
    #[arg(long, default_value_t = 1, env = "TOURKIT_PADDING")]
    pub padding: u16,

    /// Follow targets that move while a step is showing
    #[arg(long, env = "TOURKIT_TRACK_LAYOUT")]
    pub track_layout: bool,

    /// Disable mouse capture
    #[arg(long, env = "TOURKIT_NO_MOUSE")]
    pub no_mouse: bool,

    /// Write logs to this file (nothing is logged without it)
    #[arg(long, env = "TOURKIT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directives
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_filter: String,

    /// Quit after this many milliseconds; 0 runs until asked to quit
    #[arg(long, default_value_t = 0, env = "TOURKIT_EXIT_AFTER_MS")]
    pub exit_after_ms: u64,
}

impl Opts {
    /// Parse from the process arguments and environment.
    pub fn from_env() -> Self {
        Self::parse()
    }

    /// Whether mouse events are captured.
    pub fn mouse(&self) -> bool {
        !self.no_mouse
    }

    /// Auto-quit deadline, if any.
    pub fn exit_after(&self) -> Option<Duration> {
        (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms))
    }

    /// Tour configuration these options describe.
    pub fn tour_config(&self) -> TourConfig {
        TourConfig::default()
            .motion(self.motion.into())
            .spotlight(SpotlightConfig::default().target_padding(self.padding))
            .track_layout(self.track_layout)
            .mouse(self.mouse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Opts {
        let mut argv = vec!["tourkit-demo"];
        argv.extend_from_slice(args);
        Opts::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let opts = parse(&[]);
        assert_eq!(opts.motion, MotionArg::Spring);
        assert_eq!(opts.padding, 1);
        assert!(opts.mouse());
        assert_eq!(opts.exit_after(), None);
    }

    #[test]
    fn flags_reach_tour_config() {
        let opts = parse(&[
            "--motion",
            "instant",
            "--padding",
            "3",
            "--track-layout",
            "--no-mouse",
        ]);
        let config = opts.tour_config();
        assert_eq!(config.motion, Motion::Instant);
        assert_eq!(config.spotlight.target_padding, 3);
        assert!(config.track_layout);
        assert!(!config.mouse);
    }

    #[test]
    fn exit_after_ms() {
        let opts = parse(&["--exit-after-ms", "250"]);
        assert_eq!(opts.exit_after(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn rejects_unknown_motion() {
        assert!(Opts::try_parse_from(["tourkit-demo", "--motion", "teleport"]).is_err());
    }

    #[test]
    fn help_lists_tour_keys() {
        assert!(AFTER_HELP.contains("Esc"));
        assert!(AFTER_HELP.contains("Start the guided tour"));
        assert!(AFTER_HELP.contains("Cycle the shop filter"));
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Opts::command().debug_assert();
    }
}
