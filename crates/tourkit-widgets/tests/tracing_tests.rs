#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Diagnostics enabled:
//!   cargo test -p tourkit-widgets --features tracing --test tracing_tests
//!
//! Without the feature only the silent-path test runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tourkit_core::event::{Event, KeyCode, KeyEvent};
use tourkit_core::geometry::Rect;
use tourkit_widgets::tour::{
    ActiveIndex, HostCallbacks, KeyboardHub, Motion, OnboardingTour, TargetId, TargetRegistry,
    TourConfig, TourState, TourStep,
};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// A captured event or span.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Captured {
    kind: &'static str,
    target: String,
    name: String,
    fields: HashMap<String, String>,
}

struct Capture {
    records: Arc<Mutex<Vec<Captured>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.records.lock().unwrap().push(Captured {
            kind: "span",
            target: attrs.metadata().target().to_string(),
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let fields: HashMap<String, String> = visitor.0.into_iter().collect();
        self.records.lock().unwrap().push(Captured {
            kind: "event",
            target: event.metadata().target().to_string(),
            name: fields.get("message").cloned().unwrap_or_default(),
            fields,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<Captured> {
    let records = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        records: Arc::clone(&records),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let out = records.lock().unwrap().clone();
    out
}

fn run_tour() {
    let steps = vec![
        TourStep::new(TargetId::new(1), "One", "First."),
        TourStep::new(TargetId::new(2), "Two", "Second."),
    ];
    let mut registry = TargetRegistry::new();
    registry.register(TargetId::new(1), Rect::new(0, 0, 4, 1));
    registry.register(TargetId::new(2), Rect::new(10, 0, 4, 1));
    let hub = KeyboardHub::new();
    let mut tour = OnboardingTour::new(TourConfig::default().motion(Motion::Instant));

    let mut active = ActiveIndex::at(0);
    let mut finished = false;
    tour.sync(&TourState::new(&steps, active), &registry, &hub);
    for _ in 0..2 {
        let state = TourState::new(&steps, active);
        let mut host = HostCallbacks::new(|i| active = ActiveIndex::at(i), || finished = true);
        tour.handle_event(&state, &Event::Key(KeyEvent::new(KeyCode::Right)), &mut host);
        drop(host);
        if finished {
            active = ActiveIndex::NONE;
        }
        tour.sync(&TourState::new(&steps, active), &registry, &hub);
    }
    assert!(finished);
}

#[test]
#[cfg(feature = "tracing")]
fn navigation_is_logged() {
    let records = capture(run_tour);
    let nav: Vec<_> = records
        .iter()
        .filter(|r| r.kind == "event" && r.name.contains("tour navigation"))
        .collect();
    assert_eq!(nav.len(), 2, "records: {records:#?}");
    assert!(nav.iter().all(|r| r.target == "tourkit::tour"));
    assert_eq!(nav[0].fields.get("transition").map(String::as_str), Some("Goto(1)"));
    assert_eq!(nav[1].fields.get("transition").map(String::as_str), Some("Finish"));
}

#[test]
#[cfg(feature = "tracing")]
fn lifecycle_is_logged() {
    let records = capture(run_tour);
    let messages: Vec<&str> = records
        .iter()
        .filter(|r| r.kind == "event")
        .map(|r| r.name.as_str())
        .collect();
    for expected in ["tour started", "keys attached", "keys detached", "tour ended"] {
        assert!(
            messages.iter().any(|m| m.contains(expected)),
            "missing {expected:?} in {messages:?}"
        );
    }
    assert!(
        records
            .iter()
            .any(|r| r.kind == "span" && r.name == "tour.sync" && r.fields.contains_key("active"))
    );
}

#[test]
#[cfg(feature = "tracing")]
fn bounds_recompute_is_traced_once_per_step() {
    let records = capture(run_tour);
    let recomputes = records
        .iter()
        .filter(|r| r.name.contains("tour bounds recomputed"))
        .count();
    assert_eq!(recomputes, 2);
}

#[test]
fn silent_without_feature() {
    let records = capture(run_tour);
    if cfg!(not(feature = "tracing")) {
        assert!(records.iter().all(|r| !r.target.starts_with("tourkit")));
    }
}
