#![forbid(unsafe_code)]

//! Dashboard host for the onboarding tour.
//!
//! Two pages over mock shop data. While a page is drawn, every element a
//! tour step points at is registered in the [`TargetRegistry`], and elements
//! that are not on screen are removed. Each step remembers which page its
//! target lives on, so moving to a step switches to that page first.
//!
//! The tour is synced inside [`DemoApp::view`], after the page has
//! registered its targets, and never from the event path.

use std::time::Duration;

use tourkit_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use tourkit_core::geometry::Rect;
use tourkit_render::buffer::Buffer;
use tourkit_render::cell::{Cell, PackedRgba, StyleFlags};
use tourkit_render::display_width;
use tourkit_render::drawing::Draw;
use tourkit_render::frame::{Frame, HitGrid, HitId, HitRegion};
use tourkit_widgets::Widget;
use tourkit_widgets::tour::{
    ActiveIndex, KeyboardHub, OnboardingTour, TargetId, TargetRegistry, TourConfig, TourHost,
    TourState, TourStep,
};

use crate::data::{self, SHOPS, SortKey, Status};

pub const NAV: TargetId = TargetId::new(1);
pub const SHOP_PICKER: TargetId = TargetId::new(2);
pub const ORDER_COLUMNS: TargetId = TargetId::new(3);
pub const STOCK_ALERTS: TargetId = TargetId::new(4);
pub const SYNC_STATUS: TargetId = TargetId::new(5);
pub const TOUR_BADGE: TargetId = TargetId::new(6);

const TARGETS: [TargetId; 6] = [
    NAV,
    SHOP_PICKER,
    ORDER_COLUMNS,
    STOCK_ALERTS,
    SYNC_STATUS,
    TOUR_BADGE,
];

/// Smallest terminal the dashboard lays out in.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 10;

const PAGE_TABS: HitId = HitId::new(1);
const SHOP_BUTTON: HitId = HitId::new(2);
const TOUR_BUTTON: HitId = HitId::new(3);

const SYNC_PERIOD: Duration = Duration::from_secs(60);

const BG: PackedRgba = PackedRgba::rgb(22, 24, 29);
const BAR_BG: PackedRgba = PackedRgba::rgb(33, 37, 46);
const FG: PackedRgba = PackedRgba::rgb(220, 223, 228);
const MUTED: PackedRgba = PackedRgba::rgb(130, 137, 151);
const ACCENT: PackedRgba = PackedRgba::rgb(97, 175, 239);
const WARN: PackedRgba = PackedRgba::rgb(229, 192, 123);
const BAD: PackedRgba = PackedRgba::rgb(224, 108, 117);
const GOOD: PackedRgba = PackedRgba::rgb(152, 195, 121);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Orders,
    Inventory,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Orders, Page::Inventory];

    pub fn title(self) -> &'static str {
        match self {
            Self::Orders => "Orders",
            Self::Inventory => "Inventory",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Orders => Self::Inventory,
            Self::Inventory => Self::Orders,
        }
    }
}

struct StepDef {
    target: TargetId,
    /// Page the target is drawn on; `None` for chrome visible on both.
    page: Option<Page>,
    title: &'static str,
    content: &'static str,
}

const STEPS: [StepDef; 6] = [
    StepDef {
        target: NAV,
        page: None,
        title: "Pages",
        content: "Orders and Inventory live on separate pages. Press Tab or click a tab to switch.",
    },
    StepDef {
        target: SHOP_PICKER,
        page: None,
        title: "Shop filter",
        content: "Everything below is scoped to one shop. Press f or click here to cycle through them.",
    },
    StepDef {
        target: ORDER_COLUMNS,
        page: Some(Page::Orders),
        title: "Order list",
        content: "Newest orders come first. Press s to sort by total or by status instead.",
    },
    StepDef {
        target: STOCK_ALERTS,
        page: Some(Page::Inventory),
        title: "Low stock",
        content: "SKUs with less than a week of cover at current sales are listed here.",
    },
    StepDef {
        target: SYNC_STATUS,
        page: None,
        title: "Sync status",
        content: "Orders and stock refresh from your shops every minute.",
    },
    StepDef {
        target: TOUR_BADGE,
        page: None,
        title: "That's it",
        content: "Press t or click here to take this tour again.",
    },
];

/// The dashboard's tour, in order.
pub fn tour_steps() -> Vec<TourStep> {
    STEPS
        .iter()
        .map(|s| TourStep::new(s.target, s.title, s.content))
        .collect()
}

/// Page state. The tour reports navigation back into it.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub page: Page,
    pub shop: usize,
    pub sort: SortKey,
    pub tour_index: ActiveIndex,
    /// Set once a tour has been finished this session.
    pub tour_seen: bool,
    pub quit: bool,
    since_sync: Duration,
}

impl Dashboard {
    /// Whole seconds since the last mock sync.
    pub fn sync_age(&self) -> u64 {
        self.since_sync.as_secs()
    }
}

impl TourHost for Dashboard {
    fn set_active_index(&mut self, index: usize) {
        if let Some(page) = STEPS.get(index).and_then(|s| s.page) {
            self.page = page;
        }
        self.tour_index = ActiveIndex::at(index);
    }

    fn on_finish(&mut self) {
        tracing::info!(at = ?self.tour_index.get(), "tour finished");
        self.tour_index = ActiveIndex::NONE;
        self.tour_seen = true;
    }
}

/// The demo application: dashboard, tour, and the glue between them.
#[derive(Debug)]
pub struct DemoApp {
    dash: Dashboard,
    steps: Vec<TourStep>,
    registry: TargetRegistry,
    hub: KeyboardHub,
    tour: OnboardingTour,
    hits: Option<HitGrid>,
}

impl DemoApp {
    pub fn new(config: TourConfig) -> Self {
        Self {
            dash: Dashboard::default(),
            steps: tour_steps(),
            registry: TargetRegistry::new(),
            hub: KeyboardHub::new(),
            tour: OnboardingTour::new(config),
            hits: None,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dash
    }

    pub fn tour(&self) -> &OnboardingTour {
        &self.tour
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn hub(&self) -> &KeyboardHub {
        &self.hub
    }

    /// Start (or replay) the tour from its first step.
    pub fn start_tour(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        tracing::info!(replay = self.dash.tour_seen, "tour requested");
        self.dash.set_active_index(0);
    }

    pub fn tour_running(&self) -> bool {
        TourState::new(&self.steps, self.dash.tour_index).is_running()
    }

    pub fn should_quit(&self) -> bool {
        self.dash.quit
    }

    /// Whether the next frame should come quickly.
    pub fn is_animating(&self) -> bool {
        self.tour.is_animating()
    }

    /// Advance clocks by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.dash.since_sync += dt;
        if self.dash.since_sync >= SYNC_PERIOD {
            self.dash.since_sync = Duration::ZERO;
            tracing::debug!("mock sync");
        }
        self.tour.tick(dt);
    }

    /// Draw the dashboard and the tour over it.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.bounds();
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            self.registry.clear();
            draw_too_small(&mut frame.buffer, area);
        } else {
            let targets = self.draw_page(frame, area);
            for id in TARGETS {
                match targets.iter().find(|(t, _)| *t == id) {
                    Some(&(_, rect)) => self.registry.register(id, rect),
                    None => {
                        self.registry.remove(id);
                    }
                }
            }
        }

        let state = TourState::new(&self.steps, self.dash.tour_index);
        self.tour.sync(&state, &self.registry, &self.hub);
        self.tour.render(area, frame);
        self.hits = frame.hit_grid.clone();
    }

    /// Route an input event. The tour sees it first.
    pub fn handle_event(&mut self, event: &Event) {
        if let Some(key) = event.key_press()
            && key.ctrl()
            && key.is_char('c')
        {
            self.dash.quit = true;
            return;
        }

        let state = TourState::new(&self.steps, self.dash.tour_index);
        let running = state.is_running();
        if self.tour.handle_event(&state, event, &mut self.dash) || running {
            return;
        }

        match event {
            Event::Key(_) => {
                if let Some(key) = event.key_press() {
                    self.page_key(*key);
                }
            }
            Event::Mouse(mouse) if mouse.is_left_click() => self.click(mouse.x, mouse.y),
            _ => {}
        }
    }

    fn page_key(&mut self, key: KeyEvent) {
        if !key.modifiers.difference(Modifiers::SHIFT).is_empty() {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.dash.quit = true,
            KeyCode::Char('t') => self.start_tour(),
            KeyCode::Char('s') => self.dash.sort = self.dash.sort.next(),
            KeyCode::Char('f') => self.next_shop(),
            KeyCode::Tab | KeyCode::BackTab => self.dash.page = self.dash.page.toggle(),
            _ => {}
        }
    }

    fn click(&mut self, x: u16, y: u16) {
        let Some((id, _, data)) = self.hits.as_ref().and_then(|g| g.hit_test(x, y)) else {
            return;
        };
        match id {
            PAGE_TABS => {
                if let Some(page) = Page::ALL.get(data as usize) {
                    self.dash.page = *page;
                }
            }
            SHOP_BUTTON => self.next_shop(),
            TOUR_BUTTON => self.start_tour(),
            _ => {}
        }
    }

    fn next_shop(&mut self) {
        self.dash.shop = (self.dash.shop + 1) % SHOPS.len();
        tracing::debug!(shop = SHOPS[self.dash.shop], "shop filter changed");
    }

    /// Draw the page; returns the targets that ended up on screen.
    fn draw_page(&self, frame: &mut Frame, area: Rect) -> Vec<(TargetId, Rect)> {
        let mut targets = Vec::with_capacity(TARGETS.len());
        let buf = &mut frame.buffer;
        buf.fill(area, blank(FG, BG));

        // Top bar: brand, page tabs, tour badge, sync clock.
        let top = area.y;
        let max_x = area.right().saturating_sub(1);
        buf.fill(Rect::new(area.x, top, area.width, 1), blank(FG, BAR_BG));
        let brand = blank(ACCENT, BAR_BG).with_flags(StyleFlags::BOLD);
        let start = buf.print_text_clipped(area.x + 1, top, "◆ Acme Supply", brand, max_x) + 2;

        let mut x = start;
        for (i, page) in Page::ALL.into_iter().enumerate() {
            if i > 0 {
                x = frame
                    .buffer
                    .print_text_clipped(x, top, "│", blank(MUTED, BAR_BG), max_x);
            }
            let label = format!(" {} ", page.title());
            let cell = if page == self.dash.page {
                blank(BG, ACCENT).with_flags(StyleFlags::BOLD)
            } else {
                blank(FG, BAR_BG)
            };
            let end = frame.buffer.print_text_clipped(x, top, &label, cell, max_x);
            frame.register_hit(
                Rect::new(x, top, end - x, 1),
                PAGE_TABS,
                HitRegion::Button,
                i as u64,
            );
            x = end;
        }
        if x > start {
            targets.push((NAV, Rect::new(start, top, x - start, 1)));
        }

        let badge = if self.dash.tour_seen { " ✓ Tour " } else { " ? Tour " };
        if let Some(rect) = place(x + 3, top, badge, max_x) {
            frame
                .buffer
                .print_text_clipped(rect.x, rect.y, badge, blank(WARN, BAR_BG), max_x);
            frame.register_hit(rect, TOUR_BUTTON, HitRegion::Button, 0);
            targets.push((TOUR_BADGE, rect));
            x = rect.right();
        }

        let sync = format!("⟳ synced {:>2}s ago", self.dash.sync_age());
        if let Some(rect) = place(x + 3, top, &sync, max_x) {
            frame
                .buffer
                .print_text_clipped(rect.x, rect.y, &sync, blank(MUTED, BAR_BG), max_x);
            targets.push((SYNC_STATUS, rect));
        }

        // Filter row
        let row = area.y + 1;
        let x = frame.buffer.print_text_clipped(
            area.x + 1,
            row,
            "Filter by shop ",
            blank(MUTED, BG),
            max_x,
        );
        let picker = format!("[ {:<11} ▾ ]", SHOPS[self.dash.shop]);
        if let Some(rect) = place(x, row, &picker, max_x) {
            frame
                .buffer
                .print_text_clipped(rect.x, rect.y, &picker, blank(FG, BAR_BG), max_x);
            frame.register_hit(rect, SHOP_BUTTON, HitRegion::Button, 0);
            targets.push((SHOP_PICKER, rect));
        }

        let buf = &mut frame.buffer;
        let rule = "─".repeat(area.width as usize);
        buf.print_text_clipped(area.x, area.y + 2, &rule, blank(MUTED, BG), area.right());

        let body = Rect::new(area.x + 1, area.y + 3, area.width - 2, area.height - 4);
        match self.dash.page {
            Page::Orders => {
                if let Some(rect) = self.draw_orders(buf, body) {
                    targets.push((ORDER_COLUMNS, rect));
                }
            }
            Page::Inventory => {
                if let Some(rect) = self.draw_inventory(buf, body) {
                    targets.push((STOCK_ALERTS, rect));
                }
            }
        }

        // Footer
        let footer = area.bottom() - 1;
        buf.fill(Rect::new(area.x, footer, area.width, 1), blank(MUTED, BAR_BG));
        let hint = if self.tour_running() {
            "←/→ move · Enter next · Esc end tour"
        } else {
            "Tab pages · f shop · s sort · t tour · q quit"
        };
        buf.print_text_clipped(area.x + 1, footer, hint, blank(MUTED, BAR_BG), max_x);

        targets
    }

    /// Returns the column header row.
    fn draw_orders(&self, buf: &mut Buffer, body: Rect) -> Option<Rect> {
        let orders = data::orders(self.dash.shop, self.dash.sort);
        let max_x = body.right();
        let total: u64 = orders.iter().map(|o| o.total_cents).sum();
        let pending = orders.iter().filter(|o| o.status == Status::Pending).count();
        let summary = format!(
            "{} orders · {} · {} pending · sorted by {}",
            orders.len(),
            data::money(total),
            pending,
            self.dash.sort.label()
        );
        buf.print_text_clipped(body.x, body.y, &summary, blank(MUTED, BG), max_x);

        let header = format!(
            "{:<7}{:<13}{:<14}{:>5}{:>12}  {:<9}{:>4}",
            "ORDER", "SHOP", "CUSTOMER", "ITEMS", "TOTAL", "STATUS", "AGE"
        );
        let columns = place(body.x, body.y + 1, &header, max_x)
            .or_else(|| (body.width > 0).then(|| Rect::new(body.x, body.y + 1, body.width, 1)));
        buf.print_text_clipped(
            body.x,
            body.y + 1,
            &header,
            blank(FG, BG).with_flags(StyleFlags::BOLD),
            max_x,
        );

        for (order, y) in orders.iter().zip(body.y + 2..body.bottom()) {
            let line = format!(
                "#{:<6}{:<13}{:<14}{:>5}{:>12}  ",
                order.id,
                SHOPS[order.shop],
                order.customer,
                order.items,
                data::money(order.total_cents)
            );
            let x = buf.print_text_clipped(body.x, y, &line, blank(FG, BG), max_x);
            let color = match order.status {
                Status::Pending => WARN,
                Status::Packed => ACCENT,
                Status::Shipped => GOOD,
                Status::Refunded => BAD,
            };
            let x = buf.print_text_clipped(
                x,
                y,
                &format!("{:<9}", order.status.label()),
                blank(color, BG),
                max_x,
            );
            buf.print_text_clipped(
                x,
                y,
                &format!("{:>4}", data::ago(order.placed_min_ago)),
                blank(MUTED, BG),
                max_x,
            );
        }
        columns
    }

    /// Returns the alert strip.
    fn draw_inventory(&self, buf: &mut Buffer, body: Rect) -> Option<Rect> {
        let skus = data::skus(self.dash.shop);
        let max_x = body.right();
        let low: Vec<&str> = skus.iter().filter(|s| s.is_low()).map(|s| s.code).collect();
        let (alert, color) = if low.is_empty() {
            ("✓ Stock levels healthy".to_string(), GOOD)
        } else {
            (
                format!(
                    "⚠ {} under {} days of cover: {}",
                    low.len(),
                    data::LOW_STOCK_DAYS,
                    low.join(", ")
                ),
                WARN,
            )
        };
        buf.print_text_clipped(body.x, body.y, &alert, blank(color, BG), max_x);
        let strip = place(body.x, body.y, &alert, max_x)
            .or_else(|| (body.width > 0).then(|| Rect::new(body.x, body.y, body.width, 1)));

        let header = format!(
            "{:<11}{:<24}{:>8}{:>9}{:>7}",
            "SKU", "PRODUCT", "ON HAND", "PER DAY", "COVER"
        );
        buf.print_text_clipped(
            body.x,
            body.y + 1,
            &header,
            blank(FG, BG).with_flags(StyleFlags::BOLD),
            max_x,
        );

        for (sku, y) in skus.iter().zip(body.y + 2..body.bottom()) {
            let line = format!(
                "{:<11}{:<24}{:>8}{:>9}",
                sku.code, sku.name, sku.on_hand, sku.daily_sales
            );
            let x = buf.print_text_clipped(body.x, y, &line, blank(FG, BG), max_x);
            let (cover, color) = match sku.days_of_cover() {
                Some(days) if sku.is_low() => (format!("{days}d"), BAD),
                Some(days) => (format!("{days}d"), FG),
                None => ("∞".to_string(), MUTED),
            };
            buf.print_text_clipped(x, y, &format!("{cover:>7}"), blank(color, BG), max_x);
        }
        strip
    }
}

fn blank(fg: PackedRgba, bg: PackedRgba) -> Cell {
    Cell::from_char(' ').with_fg(fg).with_bg(bg)
}

/// Rect `text` occupies at (x, y) if it fits entirely before `max_x`.
fn place(x: u16, y: u16, text: &str, max_x: u16) -> Option<Rect> {
    let width = u16::try_from(display_width(text)).ok()?;
    (width > 0 && x.checked_add(width)? <= max_x).then(|| Rect::new(x, y, width, 1))
}

fn draw_too_small(buf: &mut Buffer, area: Rect) {
    buf.fill(area, blank(FG, BG));
    let message = format!("Terminal too small (need {MIN_WIDTH}x{MIN_HEIGHT})");
    let width = display_width(&message) as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height / 2;
    buf.print_text_clipped(x, y, &message, blank(WARN, BG), area.right());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourkit_core::event::{MouseButton, MouseEvent, MouseEventKind};
    use tourkit_widgets::tour::Motion;

    fn app() -> DemoApp {
        DemoApp::new(TourConfig::default().motion(Motion::Instant))
    }

    fn frame(app: &mut DemoApp) -> Frame {
        let mut frame = Frame::with_hit_grid(100, 30);
        app.view(&mut frame);
        frame
    }

    fn press(app: &mut DemoApp, code: KeyCode) {
        app.handle_event(&Event::Key(KeyEvent::new(code)));
        frame(app);
    }

    fn click(app: &mut DemoApp, x: u16, y: u16) {
        app.handle_event(&Event::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            x,
            y,
        )));
        frame(app);
    }

    // ── layout ──────────────────────────────────────────────────────────

    #[test]
    fn orders_page_registers_its_targets() {
        let mut app = app();
        frame(&mut app);
        for id in [NAV, SHOP_PICKER, ORDER_COLUMNS, SYNC_STATUS, TOUR_BADGE] {
            assert!(app.registry().get(id).is_some(), "{id} missing");
        }
        assert_eq!(app.registry().get(STOCK_ALERTS), None);
    }

    #[test]
    fn switching_page_swaps_targets() {
        let mut app = app();
        frame(&mut app);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.dashboard().page, Page::Inventory);
        assert!(app.registry().get(STOCK_ALERTS).is_some());
        assert_eq!(app.registry().get(ORDER_COLUMNS), None);
    }

    #[test]
    fn too_small_clears_targets() {
        let mut app = app();
        frame(&mut app);
        let mut small = Frame::new(MIN_WIDTH - 1, MIN_HEIGHT);
        app.view(&mut small);
        assert!(app.registry().is_empty());
        assert!(small.buffer.to_text().contains("too small"));
    }

    #[test]
    fn narrow_header_drops_what_does_not_fit() {
        let mut app = app();
        let mut narrow = Frame::new(MIN_WIDTH, MIN_HEIGHT);
        app.view(&mut narrow);
        assert!(app.registry().get(NAV).is_some());
        assert!(app.registry().get(SHOP_PICKER).is_some());
        assert_eq!(app.registry().get(TOUR_BADGE), None);
        assert_eq!(app.registry().get(SYNC_STATUS), None);
    }

    // ── page input ──────────────────────────────────────────────────────

    #[test]
    fn page_keys() {
        let mut app = app();
        frame(&mut app);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.dashboard().sort, SortKey::Total);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.dashboard().shop, 1);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn clicking_a_tab_switches_page() {
        let mut app = app();
        frame(&mut app);
        // " Orders " spans x 16..24, the divider sits at 24.
        click(&mut app, 27, 0);
        assert_eq!(app.dashboard().page, Page::Inventory);
        click(&mut app, 17, 0);
        assert_eq!(app.dashboard().page, Page::Orders);
    }

    #[test]
    fn sync_clock_wraps() {
        let mut app = app();
        app.tick(Duration::from_secs(42));
        assert_eq!(app.dashboard().sync_age(), 42);
        app.tick(Duration::from_secs(18));
        assert_eq!(app.dashboard().sync_age(), 0);
    }

    // ── tour ────────────────────────────────────────────────────────────

    #[test]
    fn tour_highlights_first_target() {
        let mut app = app();
        app.start_tour();
        frame(&mut app);
        assert!(app.tour_running());
        assert!(app.hub().is_claimed());
        assert_eq!(app.tour().bounds(), app.registry().get(NAV));
    }

    #[test]
    fn stepping_to_inventory_target_switches_page() {
        let mut app = app();
        app.start_tour();
        frame(&mut app);
        for _ in 0..3 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.dashboard().tour_index.get(), Some(3));
        assert_eq!(app.dashboard().page, Page::Inventory);
        assert!(app.tour().bounds().is_some());
        assert_eq!(app.tour().bounds(), app.registry().get(STOCK_ALERTS));

        press(&mut app, KeyCode::Left);
        assert_eq!(app.dashboard().page, Page::Orders);
        assert_eq!(app.tour().bounds(), app.registry().get(ORDER_COLUMNS));
    }

    #[test]
    fn page_keys_are_ignored_during_tour() {
        let mut app = app();
        app.start_tour();
        frame(&mut app);
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Tab);
        assert!(!app.should_quit());
        assert_eq!(app.dashboard().page, Page::Orders);

        app.handle_event(&Event::Key(
            KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL),
        ));
        assert!(app.should_quit());
    }

    #[test]
    fn finishing_marks_seen_and_frees_keys() {
        let mut app = app();
        app.start_tour();
        frame(&mut app);
        press(&mut app, KeyCode::Escape);
        assert!(!app.tour_running());
        assert!(app.dashboard().tour_seen);
        assert!(!app.hub().is_claimed());
        assert_eq!(app.tour().cutout(), None);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.dashboard().page, Page::Inventory);
    }

    #[test]
    fn running_off_the_end_finishes() {
        let mut app = app();
        app.start_tour();
        frame(&mut app);
        for _ in 0..STEPS.len() {
            press(&mut app, KeyCode::Enter);
        }
        assert!(!app.tour_running());
        assert!(app.dashboard().tour_seen);
    }

    #[test]
    fn tour_badge_replays() {
        let mut app = app();
        frame(&mut app);
        let badge = app.registry().get(TOUR_BADGE).unwrap();
        click(&mut app, badge.x, badge.y);
        assert_eq!(app.dashboard().tour_index.get(), Some(0));
    }

    #[test]
    fn every_step_fits_on_a_roomy_terminal() {
        let mut app = app();
        app.start_tour();
        frame(&mut app);
        for i in 0..STEPS.len() {
            assert_eq!(app.dashboard().tour_index.get(), Some(i));
            assert!(app.tour().bounds().is_some(), "step {i} has no target");
            let tooltip = app.tour().tooltip().unwrap();
            let (x, _) = tooltip.origin();
            assert!(x >= 0, "step {i} tooltip starts off screen");
            assert!(x + i32::from(tooltip.size().width) <= 100, "step {i} tooltip runs off screen");
            press(&mut app, KeyCode::Right);
        }
    }
}
