use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use parallax_core::animation::{AnimationLoop, FrameControl, LoopState};
use parallax_core::detail::{DetailLevel, DeviceProfile};
use parallax_core::listener::{ScrollEvent, ScrollSignal, SignalKind, Subscription};
use parallax_core::particles::ParticleField;
use parallax_core::random::SeededRandom;
use parallax_core::scan::ScanDemo;
use parallax_core::section::{InViewTracker, NavState, NavTracker};
use parallax_core::stepper::Stepper;
use parallax_core::throttle::{Clock, SystemClock};
use parallax_core::{AppConfig, GeometrySnapshot, Progress, ScrollEngine, SectionSample};
use tracing::{debug, info};

use crate::input::Action;
use crate::page::{Page, PageViewport, PX_PER_ROW};
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Rows taken by the navbar and status bar
pub const CHROME_ROWS: u16 = 2;

/// Sections linked from the navbar, in page order
pub const NAV_SECTIONS: [&str; 5] = ["about", "experience", "projects", "certifications", "contact"];

/// Section hosting the scan demo
pub const SCAN_SECTION: &str = "fingerprint-auth";

/// Scan canvas size in particle-field units
pub const SCAN_CANVAS: (f64, f64) = (300.0, 150.0);

/// Latest engine output for the whole page
#[derive(Debug, Clone, Default)]
pub struct PageSamples {
    pub page_progress: Progress,
    /// Per-section samples in page order
    pub sections: Vec<(&'static str, SectionSample)>,
    pub nav: NavState,
    /// Latched once the scan section has been seen
    pub scanner_revealed: bool,
    pub samples_taken: u64,
}

impl PageSamples {
    /// Neutral when the section has not been sampled
    pub fn section(&self, id: &str) -> SectionSample {
        self.sections
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, s)| *s)
            .unwrap_or(SectionSample::NEUTRAL)
    }
}

/// State behind the sampler subscriptions
struct Sampler {
    engine: ScrollEngine,
    nav: NavTracker,
    scanner_view: InViewTracker,
    out: PageSamples,
}

impl Sampler {
    fn sample(&mut self, viewport: &PageViewport) {
        self.out.page_progress = self.engine.page_progress(viewport);
        self.out.sections = viewport
            .page()
            .sections()
            .iter()
            .map(|placed| {
                let id = placed.section.id;
                (id, self.engine.sample(viewport, id))
            })
            .collect();
        self.nav.update(viewport);
        self.out.nav = self.nav.state().clone();
        let scan_section = GeometrySnapshot::capture(viewport, SCAN_SECTION);
        if self.scanner_view.update(scan_section.as_ref()) {
            debug!("Scan section revealed");
        }
        self.out.scanner_revealed = self.scanner_view.in_view();
        self.out.samples_taken += 1;
    }
}

pub struct App {
    pub config: AppConfig,
    pub theme: Theme,
    pub detail: DetailLevel,
    pub animator: ScrollAnimator,
    pub scan: ScanDemo<SeededRandom>,
    pub loading: Stepper,
    pub should_quit: bool,
    viewport: Rc<RefCell<PageViewport>>,
    sampler: Rc<RefCell<Sampler>>,
    signal: ScrollSignal,
    subscriptions: Vec<Subscription>,
    scan_loop: AnimationLoop,
    particles: ParticleField,
    particle_rng: SeededRandom,
    scan_elapsed: Duration,
    loading_elapsed: Duration,
    last_frame: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Build and mount the app; `clock` drives the sampler throttles
    pub fn with_clock<C>(config: AppConfig, clock: C) -> Self
    where
        C: Clock + Clone + 'static,
    {
        let page = Page::case_study();
        let nav_sections = NAV_SECTIONS
            .iter()
            .filter(|id| page.section(id).is_some())
            .map(|id| id.to_string())
            .collect();
        let nav = NavTracker::new(
            nav_sections,
            config.engine.active_probe_offset / PX_PER_ROW,
            config.engine.scrolled_threshold / PX_PER_ROW,
        );
        let engine = ScrollEngine::new(&config.engine);
        let scanner_view = InViewTracker::new(config.engine.visibility_threshold).once();

        let detail = DeviceProfile::detect().detail_level();
        let seed = config.demo.seed;
        let scan = ScanDemo::with_settings(
            SeededRandom::from_option(seed),
            config.demo.scan_tick(),
            config.demo.success_probability,
        );
        let particle_seed = seed.map(|s| s.wrapping_add(1));

        let mut app = Self {
            animator: ScrollAnimator::new(config.scroll.clone()),
            theme: Theme::default(),
            detail,
            scan,
            loading: Stepper::loading(),
            should_quit: false,
            viewport: Rc::new(RefCell::new(PageViewport::new(page))),
            sampler: Rc::new(RefCell::new(Sampler {
                engine,
                nav,
                scanner_view,
                out: PageSamples::default(),
            })),
            signal: ScrollSignal::new(),
            subscriptions: Vec::new(),
            scan_loop: AnimationLoop::new(),
            particles: ParticleField::new(0, SCAN_CANVAS.0, SCAN_CANVAS.1, &mut SeededRandom::from_seed(0)),
            particle_rng: SeededRandom::from_option(particle_seed),
            scan_elapsed: Duration::ZERO,
            loading_elapsed: Duration::ZERO,
            last_frame: None,
            config,
        };
        app.mount(clock);
        app
    }

    fn mount<C: Clock + Clone + 'static>(&mut self, clock: C) {
        self.viewport.borrow_mut().mount();
        let interval = self.config.engine.interval();
        for kind in [SignalKind::Scroll, SignalKind::Resize] {
            let viewport = self.viewport.clone();
            let sampler = self.sampler.clone();
            let sub = self.signal.subscribe_throttled(kind, interval, clock.clone(), move |_| {
                sampler.borrow_mut().sample(&viewport.borrow());
            });
            self.subscriptions.push(sub);
        }
        info!(
            interval_ms = interval.as_millis() as u64,
            particles = self.detail.particle_count,
            "Page mounted"
        );
    }

    /// Remove listeners and stop the scan loop
    pub fn unmount(&mut self) {
        self.subscriptions.clear();
        self.viewport.borrow_mut().unmount();
        self.scan_loop.unmount();
        self.particles.clear();
        debug!("Page unmounted");
    }

    pub fn viewport(&self) -> Ref<'_, PageViewport> {
        self.viewport.borrow()
    }

    pub fn samples(&self) -> Ref<'_, PageSamples> {
        Ref::map(self.sampler.borrow(), |s| &s.out)
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn scan_loop_state(&self) -> LoopState {
        self.scan_loop.state()
    }

    pub fn listener_count(&self) -> usize {
        self.signal.listener_count()
    }

    pub fn is_loading(&self) -> bool {
        !self.loading.is_complete()
    }

    /// Whether the next frame should come at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.animator.needs_update() || self.scan.is_scanning() || self.is_loading()
    }

    /// Terminal resized to `height` rows
    pub fn resize(&mut self, height: u16) {
        let body = height.saturating_sub(CHROME_ROWS);
        let (scroll, max) = {
            let mut viewport = self.viewport.borrow_mut();
            viewport.resize(body);
            (viewport.scroll_row(), viewport.max_scroll())
        };
        if scroll > max {
            self.animator.set_scroll(max);
            self.viewport.borrow_mut().set_scroll(max);
        }
        let event = ScrollEvent::resize(self.animator.current_scroll() as f64, body as f64);
        self.signal.dispatch(event);
    }

    pub fn handle_action(&mut self, action: Action) {
        let (height, max) = {
            let viewport = self.viewport.borrow();
            (viewport.height_rows(), viewport.max_scroll())
        };
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.animator.scroll_down(max),
            Action::ScrollUp => self.animator.scroll_up(max),
            Action::HalfPageDown => self.animator.scroll_half_page_down(height, max),
            Action::HalfPageUp => self.animator.scroll_half_page_up(height, max),
            Action::PageDown => self.animator.scroll_full_page_down(height, max),
            Action::PageUp => self.animator.scroll_full_page_up(height, max),
            Action::Top => self.animator.scroll_to(0, max),
            Action::Bottom => self.animator.scroll_to(max, max),
            Action::NextSection => {
                if let Some(top) = self.adjacent_section_top(true) {
                    self.animator.scroll_to(top, max);
                }
            }
            Action::PrevSection => {
                if let Some(top) = self.adjacent_section_top(false) {
                    self.animator.scroll_to(top, max);
                }
            }
            Action::StartScan => self.start_scan(),
            Action::ResetScan => self.reset_scan(),
        }
    }

    fn adjacent_section_top(&self, forward: bool) -> Option<u16> {
        let target = self.animator.target_scroll();
        let viewport = self.viewport.borrow();
        let tops = viewport.page().sections().iter().map(|s| s.top);
        if forward {
            tops.filter(|&top| top > target).min()
        } else {
            tops.filter(|&top| top < target).max()
        }
    }

    /// No-op once the page is unmounted
    pub fn start_scan(&mut self) {
        if self.scan_loop.state() == LoopState::Stopped {
            return;
        }
        self.scan.start();
        self.scan_elapsed = Duration::ZERO;
        let count = self.config.demo.particle_count.min(self.detail.particle_count);
        self.particles = ParticleField::new(count, SCAN_CANVAS.0, SCAN_CANVAS.1, &mut self.particle_rng);
        self.scan_loop.start();
    }

    pub fn reset_scan(&mut self) {
        self.scan.reset();
        self.scan_loop.reset();
        self.particles.clear();
    }

    /// Advance animations to `now` and resample
    pub fn on_frame(&mut self, now: Instant) {
        let elapsed = self
            .last_frame
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);

        if self.is_loading() {
            for _ in 0..drain_ticks(&mut self.loading_elapsed, elapsed, self.loading.tick_interval()) {
                self.loading.advance();
            }
        }

        let max = self.viewport.borrow().max_scroll();
        let row = self.animator.update(max);
        let height = {
            let mut viewport = self.viewport.borrow_mut();
            viewport.set_scroll(row);
            viewport.height_rows()
        };
        self.signal.dispatch(ScrollEvent::scroll(row as f64, height as f64));

        if self.scan.is_scanning() && self.scan_loop.state() != LoopState::Stopped {
            let tick = self.scan.tick_interval();
            for _ in 0..drain_ticks(&mut self.scan_elapsed, elapsed, tick) {
                if self.scan.tick().is_some() {
                    break;
                }
            }
        }

        let scanning = self.scan.is_scanning();
        let particles = &mut self.particles;
        let rng = &mut self.particle_rng;
        self.scan_loop.frame(|_| {
            particles.step(rng);
            if scanning {
                FrameControl::Continue
            } else {
                FrameControl::Finish
            }
        });
    }
}

/// Whole ticks contained in the accumulated time; the remainder carries over
fn drain_ticks(acc: &mut Duration, elapsed: Duration, tick: Duration) -> u32 {
    if tick.is_zero() {
        return 0;
    }
    *acc += elapsed;
    let ticks = (acc.as_nanos() / tick.as_nanos()) as u32;
    *acc -= tick * ticks;
    ticks
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_core::scan::ScanState;
    use parallax_core::throttle::ManualClock;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.scroll.smooth_enabled = false;
        config.demo.seed = Some(7);
        config
    }

    fn app() -> (App, ManualClock) {
        let clock = ManualClock::new();
        let mut app = App::with_clock(test_config(), clock.clone());
        app.resize(32);
        (app, clock)
    }

    #[test]
    fn test_mount_registers_listeners() {
        let (app, _) = app();
        assert_eq!(app.listener_count(), 2);
        assert_eq!(app.viewport().height_rows(), 30);
    }

    #[test]
    fn test_frame_samples_sections() {
        let (mut app, clock) = app();
        clock.advance(Duration::from_millis(20));
        app.on_frame(Instant::now());

        let samples = app.samples();
        assert!(samples.samples_taken >= 1);
        assert_eq!(samples.sections.len(), app.viewport().page().sections().len());
        assert_eq!(samples.page_progress, Progress::ZERO);
        assert!(samples.section("hero").in_view);
        assert!(!samples.nav.scrolled);
    }

    #[test]
    fn test_scrolling_updates_nav() {
        let (mut app, clock) = app();
        let top = app.viewport().page().section("projects").unwrap().top;
        let max = app.viewport().max_scroll();
        app.animator.scroll_to(top, max);

        clock.advance(Duration::from_millis(20));
        app.on_frame(Instant::now());

        let samples = app.samples();
        assert!(samples.nav.scrolled);
        assert_eq!(samples.nav.active.as_deref(), Some("projects"));
        assert!(samples.page_progress.value() > 0.0);
    }

    #[test]
    fn test_burst_inside_window_is_dropped() {
        let (mut app, clock) = app();
        clock.advance(Duration::from_millis(20));
        app.on_frame(Instant::now());
        let taken = app.samples().samples_taken;

        app.handle_action(Action::ScrollDown);
        app.on_frame(Instant::now());
        assert_eq!(app.samples().samples_taken, taken);

        clock.advance(Duration::from_millis(20));
        app.on_frame(Instant::now());
        assert_eq!(app.samples().samples_taken, taken + 1);
    }

    #[test]
    fn test_unmount_stops_sampling() {
        let (mut app, clock) = app();
        app.unmount();
        assert_eq!(app.listener_count(), 0);

        clock.advance(Duration::from_millis(50));
        let taken = app.samples().samples_taken;
        app.on_frame(Instant::now());
        assert_eq!(app.samples().samples_taken, taken);
        assert_eq!(app.scan_loop_state(), LoopState::Stopped);
    }

    #[test]
    fn test_scan_runs_on_frames() {
        let (mut app, _) = app();
        let start = Instant::now();
        app.on_frame(start);
        app.handle_action(Action::StartScan);
        assert_eq!(app.scan_loop_state(), LoopState::Running);
        assert!(!app.particles().is_empty());
        assert!(app.needs_fast_update());

        app.on_frame(start + Duration::from_millis(300));
        assert_eq!(app.scan.progress(), 10);

        app.on_frame(start + Duration::from_secs(5));
        assert!(matches!(app.scan.state(), ScanState::Success | ScanState::Error));
        assert_eq!(app.scan_loop_state(), LoopState::Idle);

        app.handle_action(Action::ResetScan);
        assert_eq!(app.scan.state(), ScanState::Idle);
        assert!(app.particles().is_empty());
    }

    #[test]
    fn test_scan_ignored_after_unmount() {
        let (mut app, _) = app();
        let start = Instant::now();
        app.on_frame(start);
        app.unmount();

        app.handle_action(Action::StartScan);
        assert_eq!(app.scan.state(), ScanState::Idle);
        app.on_frame(start + Duration::from_millis(300));
        assert_eq!(app.scan.progress(), 0);
        assert_eq!(app.scan_loop_state(), LoopState::Stopped);
    }

    #[test]
    fn test_scanner_stays_revealed() {
        let (mut app, clock) = app();
        assert!(!app.samples().scanner_revealed);

        let top = app.viewport().page().section(SCAN_SECTION).unwrap().top;
        let max = app.viewport().max_scroll();
        app.animator.scroll_to(top, max);
        clock.advance(Duration::from_millis(20));
        app.on_frame(Instant::now());
        assert!(app.samples().scanner_revealed);

        app.handle_action(Action::Top);
        clock.advance(Duration::from_millis(20));
        app.on_frame(Instant::now());
        let samples = app.samples();
        assert!(!samples.section(SCAN_SECTION).in_view);
        assert!(samples.scanner_revealed);
    }

    #[test]
    fn test_next_section_jumps() {
        let (mut app, _) = app();
        app.handle_action(Action::NextSection);
        let about = app.viewport().page().section("about").unwrap().top;
        assert_eq!(app.animator.current_scroll(), about);

        app.handle_action(Action::PrevSection);
        assert_eq!(app.animator.current_scroll(), 0);
    }

    #[test]
    fn test_loading_finishes_after_two_seconds() {
        let (mut app, _) = app();
        let start = Instant::now();
        app.on_frame(start);
        assert!(app.is_loading());

        app.on_frame(start + Duration::from_millis(1050));
        assert_eq!(app.loading.value(), 50);

        app.on_frame(start + Duration::from_millis(2000));
        assert!(!app.is_loading());
    }

    #[test]
    fn test_drain_ticks_carries_remainder() {
        let tick = Duration::from_millis(30);
        let mut acc = Duration::ZERO;
        assert_eq!(drain_ticks(&mut acc, Duration::from_millis(20), tick), 0);
        assert_eq!(drain_ticks(&mut acc, Duration::from_millis(20), tick), 1);
        assert_eq!(acc, Duration::from_millis(10));
        assert_eq!(drain_ticks(&mut acc, Duration::from_millis(100), tick), 3);
        assert_eq!(drain_ticks(&mut acc, Duration::from_millis(5), Duration::ZERO), 0);
    }

    #[test]
    fn test_quit() {
        let (mut app, _) = app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
