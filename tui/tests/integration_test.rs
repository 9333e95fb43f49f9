//! Integration tests for the dashboard event loop
//!
//! Drives [`Dashboard::run`] with a `TestBackend` terminal and a scripted
//! event stream, then inspects the panels and the drawn buffer.

use std::io;
use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use futures::stream;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use simlife_tui::bindings::{Binding, HandlerError, Target};
use simlife_tui::layout::{self, panels, LayoutPlan};
use simlife_tui::{default_bindings, Dashboard, DashboardConfig, DashboardError};
use universe_core::{Area, LifeUniverse, Observer, Options, Status, Universe, UniverseConfig};

// ============================================================================
// Test Universe
// ============================================================================

/// Records every command and keeps a tiny mutable grid
struct MockUniverse {
    calls: Mutex<Vec<String>>,
    area: Mutex<Area>,
    status: Mutex<Status>,
    observer: Mutex<Option<Observer>>,
}

impl MockUniverse {
    fn new(area: Area) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            area: Mutex::new(area),
            status: Mutex::new(Status::default()),
            observer: Mutex::new(None),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn command(&self, name: String) {
        self.calls.lock().push(name);
        if let Some(observer) = self.observer.lock().as_ref() {
            observer();
        }
    }
}

impl Universe for MockUniverse {
    fn area(&self) -> Area {
        self.area.lock().clone()
    }
    fn status(&self) -> Status {
        self.status.lock().clone()
    }
    fn options(&self) -> Options {
        Options::default()
    }
    fn step(&self) {
        self.status.lock().iteration += 1;
        self.command("step".into());
    }
    fn run(&self) {
        self.command("run".into());
    }
    fn stop(&self) {
        self.command("stop".into());
    }
    fn clear(&self) {
        self.command("clear".into());
    }
    fn settle_with_random_data(&self) {
        self.command("random".into());
    }
    fn inverse_cell(&self, x: usize, y: usize) {
        {
            let mut area = self.area.lock();
            if let Some(cell) = area.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = !*cell;
            }
        }
        self.command(format!("inverse {x} {y}"));
    }
    fn set_observer(&self, observer: Observer) {
        *self.observer.lock() = Some(observer);
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn ctrl_c() -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn script(events: Vec<Event>) -> impl futures::Stream<Item = io::Result<Event>> + Unpin {
    stream::iter(events.into_iter().map(Ok))
}

fn terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

/// Dashboard whose universe repaints it on every command
fn wired(universe: &Arc<MockUniverse>) -> Dashboard {
    let dyn_universe: Arc<dyn Universe> = universe.clone();
    let dashboard = Dashboard::new(dyn_universe, DashboardConfig::plain()).unwrap();
    let refresh = dashboard.refresh_handle();
    universe.set_observer(Box::new(move || refresh.refresh()));
    dashboard
}

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
}

fn empty_grid(width: usize, height: usize) -> Area {
    Area::from_rows(vec![vec![false; width]; height])
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_global_keys_then_quit() {
    let universe = MockUniverse::new(empty_grid(3, 3));
    let mut dashboard = wired(&universe);
    let mut term = terminal(80, 24);

    let events = vec![
        key('n'),
        key('r'),
        key('s'),
        key('c'),
        key('w'),
        key('x'),
        ctrl_c(),
        key('n'),
    ];
    dashboard.run(&mut term, script(events)).await.unwrap();

    assert_eq!(universe.calls(), vec!["step", "run", "stop", "clear", "random"]);
}

#[tokio::test]
async fn test_click_is_scoped_to_battlefield() {
    let universe = MockUniverse::new(empty_grid(5, 5));
    let mut dashboard = wired(&universe);
    let mut term = terminal(80, 24);

    // Battlefield frame starts at (29, 3), so content (2, 1) is at (32, 5)
    let events = vec![
        click(32, 5),
        // Status panel
        click(5, 14),
        // Battlefield frame
        click(29, 10),
        // Header
        click(40, 1),
    ];
    dashboard.run(&mut term, script(events)).await.unwrap();

    assert_eq!(universe.calls(), vec!["inverse 2 1"]);
    assert_eq!(
        dashboard
            .toolkit()
            .panel(panels::BATTLEFIELD)
            .unwrap()
            .plain_text(),
        "░░░░░\n░░█░░\n░░░░░\n░░░░░\n░░░░░"
    );
}

#[tokio::test]
async fn test_click_beyond_grid_is_forwarded_verbatim() {
    let universe = MockUniverse::new(empty_grid(2, 2));
    let mut dashboard = wired(&universe);
    let mut term = terminal(80, 24);

    dashboard.run(&mut term, script(vec![click(70, 15)])).await.unwrap();
    assert_eq!(universe.calls(), vec!["inverse 40 11"]);
}

#[tokio::test]
async fn test_step_repaints_status() {
    let universe = MockUniverse::new(empty_grid(2, 2));
    let mut dashboard = wired(&universe);
    let mut term = terminal(80, 24);

    dashboard
        .run(&mut term, script(vec![key('n'), key('n')]))
        .await
        .unwrap();

    let status = dashboard.toolkit().panel(panels::STATUS).unwrap().plain_text();
    assert!(status.starts_with(" Step: 2\n"), "{status}");
    assert!(row_text(&term, 13).contains("Step: 2"));
}

#[tokio::test]
async fn test_failing_handler_ends_loop_with_error() {
    fn explode(_: &dyn Universe, _: &Target) -> Result<(), HandlerError> {
        Err(anyhow::anyhow!("handler exploded").into())
    }

    let universe = MockUniverse::new(empty_grid(2, 2));
    let mut bindings = default_bindings();
    bindings.push(Binding::key(
        KeyCode::Char('e'),
        KeyModifiers::NONE,
        "E",
        "Explode",
        explode,
    ));
    let dyn_universe: Arc<dyn Universe> = universe.clone();
    let mut dashboard =
        Dashboard::with_bindings(dyn_universe, DashboardConfig::plain(), bindings).unwrap();
    let mut term = terminal(80, 24);

    let result = dashboard
        .run(&mut term, script(vec![key('e'), key('n')]))
        .await;

    match result {
        Err(DashboardError::Handler(err)) => assert_eq!(err.to_string(), "handler exploded"),
        other => panic!("expected handler error, got {other:?}"),
    }
    assert!(universe.calls().is_empty());
}

#[tokio::test]
async fn test_input_error_ends_loop() {
    let universe = MockUniverse::new(empty_grid(2, 2));
    let mut dashboard = wired(&universe);
    let mut term = terminal(80, 24);

    let events = stream::iter(vec![Err(io::Error::new(io::ErrorKind::Other, "tty gone"))]);
    let result = dashboard.run(&mut term, events).await;
    assert!(matches!(result, Err(DashboardError::Terminal(_))));
}

#[tokio::test]
async fn test_initial_screen() {
    let universe = MockUniverse::new(Area::from_rows(vec![vec![true, false, true]]));
    let mut dashboard = wired(&universe);
    let mut term = terminal(80, 24);

    dashboard.run(&mut term, script(Vec::new())).await.unwrap();

    assert!(row_text(&term, 1).contains("This is \"The Life\" game simulation"));
    let row3 = row_text(&term, 3);
    assert!(row3.starts_with("┌Configuration"), "{row3}");
    assert!(row3.contains("┌Battle Field"), "{row3}");
    assert!(row_text(&term, 4).contains("│█░█"));
    assert!(row_text(&term, 22).starts_with("KEYBINDINGS: ^C: Exit, N: Next step"));
}

#[tokio::test]
async fn test_resize_below_minimum_and_back() {
    let universe = MockUniverse::new(empty_grid(4, 4));
    let mut dashboard = wired(&universe);
    let mut term = terminal(80, 24);

    let shrink = Event::Resize(80, 15);
    dashboard.run(&mut term, script(vec![shrink.clone()])).await.unwrap();

    let names: Vec<&str> = dashboard.toolkit().panel_names().collect();
    assert_eq!(names, vec![panels::HEADER]);
    assert!(row_text(&term, 7).contains("Terminal height too small"));

    // Commands still reach the universe while only the header is shown
    dashboard
        .run(&mut term, script(vec![shrink, key('n'), Event::Resize(100, 30)]))
        .await
        .unwrap();
    assert_eq!(universe.calls(), vec!["step"]);

    let LayoutPlan::Full(expected) = layout::plan(100, 30, &DashboardConfig::plain()) else {
        panic!("100x30 should get the full layout");
    };
    let toolkit = dashboard.toolkit();
    assert_eq!(toolkit.panel_names().count(), panels::ALL.len());
    assert_eq!(toolkit.panel(panels::HEADER).unwrap().bounds, expected.header);
    assert_eq!(toolkit.panel(panels::CONFIGURATION).unwrap().bounds, expected.configuration);
    assert_eq!(toolkit.panel(panels::STATUS).unwrap().bounds, expected.status);
    assert_eq!(toolkit.panel(panels::BATTLEFIELD).unwrap().bounds, expected.battlefield);
    assert_eq!(toolkit.panel(panels::HELP).unwrap().bounds, expected.help);
    // Recreated panels get fresh content
    assert!(toolkit
        .panel(panels::STATUS)
        .unwrap()
        .plain_text()
        .starts_with(" Step: 1"));
}

#[tokio::test]
async fn test_life_universe_blinker() {
    let mut config = UniverseConfig::default();
    config.width = 5;
    config.height = 5;
    config.max_steps = 10;
    let universe = Arc::new(LifeUniverse::new(config).unwrap());
    universe.seed(&Area::from_rows(vec![
        vec![false; 5],
        vec![false; 5],
        vec![false, true, true, true, false],
        vec![false; 5],
        vec![false; 5],
    ]));

    let dyn_universe: Arc<dyn Universe> = universe.clone();
    let mut dashboard = Dashboard::new(dyn_universe, DashboardConfig::plain()).unwrap();
    let refresh = dashboard.refresh_handle();
    universe.set_observer(Box::new(move || refresh.refresh()));

    let mut term = terminal(80, 24);
    dashboard.run(&mut term, script(vec![key('n')])).await.unwrap();

    let toolkit = dashboard.toolkit();
    assert_eq!(
        toolkit.panel(panels::BATTLEFIELD).unwrap().plain_text(),
        "░░░░░\n░░█░░\n░░█░░\n░░█░░\n░░░░░"
    );
    let status = toolkit.panel(panels::STATUS).unwrap().plain_text();
    assert!(status.contains("Step: 1"), "{status}");
    assert!(status.contains("Live Cells: 3"), "{status}");
    assert!(status.ends_with("Mode: waiting"), "{status}");
}
