//! Deterministic host for a [`Carousel`].
//!
//! Plays the part of the browser: keeps the real scroll offset, clamps it to
//! the scrollable range, runs smooth scrolls as eased tweens, fires scroll
//! notifications back into the controller, delivers animation frames every
//! 16ms and fires the settle timer once its deadline passes. Time only moves
//! when [`HeadlessCarousel::advance`] is called, so tests and the demo replay
//! exactly.

use std::collections::VecDeque;
use web_time::{Duration, Instant};

use crate::animation::{AnimatedValue, AnimationSpec, Clock, ManualClock};
use crate::config::CarouselConfig;
use crate::controller::{Carousel, Command, Response};
use crate::geometry::Layout;
use crate::input::{Key, PointerId, PointerInput, WheelInput};
use crate::sequence::{Band, TileFlags};
use crate::task::TaskToken;

pub const FRAME: Duration = Duration::from_millis(16);

pub struct HeadlessCarousel<T> {
    carousel: Carousel<T>,
    layout: Layout,
    clock: ManualClock,
    offset: f32,
    smooth: Option<AnimatedValue>,
    smooth_spec: AnimationSpec,
    frame_pending: Option<TaskToken>,
    settle_due: Option<(TaskToken, Instant)>,
    scales: Vec<f32>,
    dragging: bool,
    captured: Option<PointerId>,
}

impl<T: Clone> HeadlessCarousel<T> {
    /// Equal-width tiles with equal margins, laid out as one strip.
    pub fn uniform(
        originals: Vec<T>,
        initial: Option<usize>,
        config: CarouselConfig,
        tile_width: f32,
        margin: f32,
        viewport_width: f32,
    ) -> Self {
        let widths = vec![tile_width; originals.len() * 3];
        let layout = Layout::strip(viewport_width, &widths, margin);
        Self::new(
            Carousel::new(originals, initial, config),
            layout,
            ManualClock::new(),
        )
    }
}

impl<T> HeadlessCarousel<T> {
    pub fn new(carousel: Carousel<T>, layout: Layout, clock: ManualClock) -> Self {
        let n = layout.tiles.len();
        Self {
            carousel,
            layout,
            clock,
            offset: 0.0,
            smooth: None,
            smooth_spec: AnimationSpec::default(),
            frame_pending: None,
            settle_due: None,
            scales: vec![1.0; n],
            dragging: false,
            captured: None,
        }
    }

    pub fn with_smooth_spec(mut self, spec: AnimationSpec) -> Self {
        self.smooth_spec = spec;
        self
    }

    pub fn init(&mut self) {
        let r = self.carousel.init(self.layout.clone());
        self.apply(r);
    }

    pub fn resize(&mut self, layout: Layout) {
        self.layout = layout;
        self.scales.resize(self.layout.tiles.len(), 1.0);
        let r = self.carousel.on_resize(self.layout.clone());
        self.apply(r);
    }

    /// Returns whether the default action would be prevented.
    pub fn wheel(&mut self, wheel: WheelInput) -> bool {
        let r = self.carousel.on_wheel(wheel);
        self.apply(r)
    }

    pub fn pointer(&mut self, p: PointerInput) {
        let r = self.carousel.on_pointer(p);
        self.apply(r);
    }

    /// Press, move to `x0 + dx` in `steps` moves, release.
    pub fn drag(&mut self, x0: f32, dx: f32, steps: usize) {
        self.pointer(PointerInput::down(x0));
        let steps = steps.max(1);
        for i in 1..=steps {
            self.pointer(PointerInput::moved(x0 + dx * i as f32 / steps as f32));
        }
        self.pointer(PointerInput::up(x0 + dx));
    }

    /// Delivers a click. Returns false when the controller swallowed it.
    pub fn click(&self) -> bool {
        !self.carousel.should_suppress_click()
    }

    pub fn key(&mut self, key: Key) -> bool {
        let r = self.carousel.on_key(&key);
        self.apply(r)
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        let r = self.carousel.set_reduced_motion(reduced);
        self.apply(r);
    }

    /// Moves time forward in frame-sized steps.
    pub fn advance(&mut self, by: Duration) {
        let mut left = by;
        while !left.is_zero() {
            let step = left.min(FRAME);
            self.clock.advance(step);
            left -= step;
            self.tick();
        }
    }

    /// Runs frames until no smooth scroll, frame or settle is pending.
    pub fn settle(&mut self) {
        // bounded: a settle that keeps rescheduling itself would be a bug
        for _ in 0..10_000 {
            if self.is_idle() {
                return;
            }
            self.advance(FRAME);
        }
        log::warn!("headless: did not settle");
    }

    pub fn is_idle(&self) -> bool {
        self.smooth.is_none() && self.frame_pending.is_none() && self.settle_due.is_none()
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    pub fn carousel(&self) -> &Carousel<T> {
        &self.carousel
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn active(&self) -> Option<usize> {
        self.carousel.active()
    }

    /// Tile whose center is closest to the viewport center right now.
    pub fn centered(&self) -> Option<usize> {
        self.layout.nearest_to_center(self.offset)
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn captured(&self) -> Option<PointerId> {
        self.captured
    }

    /// One char per tile, bands split by `|`: `A` active, `*` initial, `.` other.
    pub fn markers(&self) -> String {
        let seq = self.carousel.sequence();
        let mut s = String::with_capacity(seq.len() + 2);
        let mut band = None;
        for t in seq.iter() {
            if band.is_some_and(|b: Band| b != t.band) {
                s.push('|');
            }
            band = Some(t.band);
            s.push(if t.flags.contains(TileFlags::ACTIVE) {
                'A'
            } else if t.flags.contains(TileFlags::INITIAL) {
                '*'
            } else {
                '.'
            });
        }
        s
    }

    fn tick(&mut self) {
        let now = self.clock.now();
        if let Some(anim) = &self.smooth {
            let (v, running) = anim.sample(now);
            if !running {
                self.smooth = None;
            }
            self.scroll_container_to(v);
        }
        if let Some(token) = self.frame_pending.take() {
            let r = self.carousel.on_frame(token);
            self.apply(r);
        }
        if let Some((token, due)) = self.settle_due
            && now >= due
        {
            self.settle_due = None;
            let r = self.carousel.on_settle(token);
            self.apply(r);
        }
    }

    fn max_offset(&self) -> f32 {
        (self.layout.content_width - self.layout.viewport_width).max(0.0)
    }

    /// Sets the container offset; like a browser, only a real change emits
    /// a scroll notification.
    fn scroll_container_to(&mut self, left: f32) {
        let left = left.clamp(0.0, self.max_offset());
        if left != self.offset {
            self.offset = left;
            let r = self.carousel.on_scroll(left);
            self.apply(r);
        }
    }

    fn apply(&mut self, response: Response) -> bool {
        let mut queue: VecDeque<Command> = response.commands.into_iter().collect();
        while let Some(cmd) = queue.pop_front() {
            match cmd {
                Command::ScrollTo { left, smooth } if smooth => {
                    let target = left.clamp(0.0, self.max_offset());
                    self.smooth = Some(AnimatedValue::new(
                        self.offset,
                        target,
                        self.smooth_spec,
                        self.clock.now(),
                    ));
                }
                Command::ScrollTo { left, .. } => {
                    self.smooth = None;
                    let left = left.clamp(0.0, self.max_offset());
                    if left != self.offset {
                        self.offset = left;
                        let r = self.carousel.on_scroll(left);
                        queue.extend(r.commands);
                    }
                }
                Command::SetActive { previous, next } => {
                    log::debug!("headless: active {previous:?} -> {next}");
                }
                Command::SetDragging(on) => self.dragging = on,
                Command::CapturePointer(id) => self.captured = Some(id),
                Command::ReleasePointer(_) => self.captured = None,
                Command::SetScales(scales) => self.scales = scales,
                Command::ClearScales => self.scales.iter_mut().for_each(|s| *s = 1.0),
                Command::RequestFrame(token) => self.frame_pending = Some(token),
                Command::ArmSettle { token, delay } => {
                    self.settle_due = Some((token, self.clock.now() + delay));
                }
                Command::CancelSettle => self.settle_due = None,
            }
        }
        response.consumed
    }
}
