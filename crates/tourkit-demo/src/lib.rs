#![forbid(unsafe_code)]

//! tourkit demo: a mock order and inventory dashboard with a guided tour.
//!
//! The binary is a thin wrapper over [`run`]; everything else is public so
//! tests can drive the dashboard without a terminal.

pub mod app;
pub mod cli;
pub mod data;
pub mod error;
pub mod logging;
pub mod terminal;

use std::io;
use std::time::{Duration, Instant};

use tourkit_core::event::Event;
use tourkit_render::frame::Frame;
use tourkit_render::presenter::Presenter;

use crate::app::DemoApp;
use crate::cli::Opts;
use crate::error::DemoError;
use crate::terminal::{SessionOptions, TerminalSession};

/// Poll interval while the spotlight is moving.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
/// Poll interval at rest; still short enough for the sync clock.
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Run the dashboard until the user quits or `--exit-after-ms` elapses.
///
/// # Errors
///
/// Logging setup and terminal I/O failures.
pub fn run(opts: &Opts) -> Result<(), DemoError> {
    logging::init(opts.log_file.as_deref(), &opts.log_filter)?;
    tracing::info!(
        motion = ?opts.motion,
        padding = opts.padding,
        mouse = opts.mouse(),
        start_tour = opts.start_tour,
        "dashboard starting"
    );

    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: opts.mouse(),
    })?;
    let mut presenter = Presenter::new(io::stdout());
    presenter.hide_cursor()?;

    let mut app = DemoApp::new(opts.tour_config());
    if opts.start_tour {
        app.start_tour();
    }

    let deadline = opts.exit_after();
    let started = Instant::now();
    let mut last = started;
    let (mut width, mut height) = session.size()?;

    loop {
        let now = Instant::now();
        app.tick(now.duration_since(last));
        last = now;

        let mut frame = Frame::with_hit_grid(width, height);
        app.view(&mut frame);
        presenter.present(&frame.buffer)?;

        if app.should_quit() {
            break;
        }
        if deadline.is_some_and(|limit| started.elapsed() >= limit) {
            tracing::info!("exit deadline reached");
            break;
        }

        let timeout = if app.is_animating() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        if !session.poll_event(timeout)? {
            continue;
        }
        match session.read_event()? {
            Some(Event::Resize { width: w, height: h }) => {
                tracing::debug!(width = w, height = h, "resize");
                width = w;
                height = h;
                presenter.invalidate();
            }
            Some(event) => app.handle_event(&event),
            None => {}
        }
    }

    presenter.show_cursor()?;
    drop(session);
    tracing::info!(tour_seen = app.dashboard().tour_seen, "dashboard closed");
    Ok(())
}
