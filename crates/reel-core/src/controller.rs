//! # Carousel controller
//!
//! `Carousel<T>` owns everything the loop needs: the tripled tile sequence,
//! the latest measured layout, the loop scroll state, the wheel lock, the
//! drag tracker and the two task slots (frame and settle).
//!
//! It never touches a platform. Each `on_*` handler mutates the controller and
//! returns a [`Response`]: whether the event was consumed (the host should
//! `preventDefault`) and the [`Command`]s the host must apply, in order.
//!
//! Event flow, roughly as a browser delivers it:
//!
//! - `init` once the tiles are in place and measured; `on_resize` re-runs it.
//! - `on_scroll` for every scroll event; coalesces into one `RequestFrame`.
//! - `on_frame` normalizes, refreshes scales and (re)arms the settle timer.
//!   A smooth scroll still in flight is re-targeted by the same whole sets.
//! - `on_settle` normalizes once more, resolves the centred tile and releases
//!   the wheel lock.
//! - `on_wheel`, `on_pointer`, `on_key` translate input into scrolling.
//!
//! Hosts feed scroll offsets they applied back through `on_scroll`, the same
//! way a scroll container fires `scroll` after `scrollTo`.

use smallvec::SmallVec;
use web_time::Duration;

use crate::config::{CarouselConfig, CarouselMode};
use crate::geometry::{Layout, emphasis_scale};
use crate::input::{Key, PointerEventKind, PointerId, PointerInput, WheelInput};
use crate::scroll::LoopScroll;
use crate::sequence::TileSequence;
use crate::task::{TaskSlot, TaskToken};

/// Side effect requested from the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    ScrollTo { left: f32, smooth: bool },
    SetActive { previous: Option<usize>, next: usize },
    SetDragging(bool),
    CapturePointer(PointerId),
    ReleasePointer(PointerId),
    /// One scale per tile, in sequence order.
    SetScales(Vec<f32>),
    ClearScales,
    RequestFrame(TaskToken),
    /// Replaces any settle timer that is still pending.
    ArmSettle { token: TaskToken, delay: Duration },
    CancelSettle,
}

pub type Commands = SmallVec<[Command; 4]>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub consumed: bool,
    pub commands: Commands,
}

impl Response {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed(commands: Commands) -> Self {
        Self {
            consumed: true,
            commands,
        }
    }

    fn passive(commands: Commands) -> Self {
        Self {
            consumed: false,
            commands,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Drag {
    pointer: PointerId,
    start_x: f32,
    start_offset: f32,
}

pub struct Carousel<T> {
    config: CarouselConfig,
    sequence: TileSequence<T>,
    layout: Layout,
    scroll: LoopScroll,
    reduced_motion: bool,
    frame: TaskSlot,
    settle: TaskSlot,
    wheel_lock: bool,
    drag: Option<Drag>,
    /// Last press travelled past the drag threshold; swallows its click.
    moved: bool,
    /// Target of the smooth scroll we started, until it settles. Loop
    /// correction shifts it along with the offset.
    glide: Option<f32>,
}

impl<T: Clone> Carousel<T> {
    /// Triples `originals` and waits for a layout. `initial` indexes
    /// `originals`.
    pub fn new(originals: Vec<T>, initial: Option<usize>, config: CarouselConfig) -> Self {
        Self::from_sequence(TileSequence::tripled(originals, initial), config)
    }
}

impl<T> Carousel<T> {
    pub fn from_sequence(sequence: TileSequence<T>, config: CarouselConfig) -> Self {
        Self {
            config,
            sequence,
            layout: Layout::default(),
            scroll: LoopScroll::new(),
            reduced_motion: false,
            frame: TaskSlot::new(),
            settle: TaskSlot::new(),
            wheel_lock: false,
            drag: None,
            moved: false,
            glide: None,
        }
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn sequence(&self) -> &TileSequence<T> {
        &self.sequence
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn active(&self) -> Option<usize> {
        self.sequence.active()
    }

    pub fn offset(&self) -> f32 {
        self.scroll.get()
    }

    pub fn set_width(&self) -> f32 {
        self.scroll.set_width()
    }

    pub fn is_wheel_locked(&self) -> bool {
        self.wheel_lock
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// The layout must describe every tile of the sequence.
    fn ready(&self) -> bool {
        !self.sequence.is_empty() && self.layout.tiles.len() == self.sequence.len()
    }

    fn apply_layout(&mut self, layout: Layout) {
        self.scroll.set_viewport_width(layout.viewport_width);
        self.scroll.set_content_width(layout.content_width);
        self.scroll
            .set_set_width(layout.span_width(self.sequence.middle()));
        self.layout = layout;
    }

    /// Positions the strip on the middle copy, centres the start tile without
    /// animation and marks the centred tile active.
    pub fn init(&mut self, layout: Layout) -> Response {
        self.apply_layout(layout);
        self.glide = None;
        let mut out = Commands::new();
        if !self.ready() {
            log::debug!(
                "carousel: layout has {} tiles for a sequence of {}; not initializing",
                self.layout.tiles.len(),
                self.sequence.len()
            );
            return Response::ignored();
        }
        let Some(start) = self.sequence.start_index() else {
            return Response::ignored();
        };

        let left = self.layout.center_offset(&self.layout.tiles[start]);
        self.scroll.set_offset(left);
        self.scroll.normalize();
        out.push(Command::ScrollTo {
            left: self.scroll.get(),
            smooth: false,
        });
        self.activate_nearest(&mut out);
        self.push_scales(&mut out);

        log::info!(
            "carousel: {} tiles ({} originals), set width {:.1}px, start tile {}, offset {:.1}",
            self.sequence.len(),
            self.sequence.original_len(),
            self.scroll.set_width(),
            start,
            self.scroll.get()
        );
        Response::passive(out)
    }

    /// Viewport size changed: re-measure and re-run initialization.
    pub fn on_resize(&mut self, layout: Layout) -> Response {
        self.init(layout)
    }

    /// Geometry changed without a resize (e.g. the active tile grew its
    /// margins). Updates the loop metrics only.
    pub fn on_layout(&mut self, layout: Layout) {
        self.apply_layout(layout);
    }

    /// The host's scroll container moved to `offset`.
    pub fn on_scroll(&mut self, offset: f32) -> Response {
        self.scroll.set_offset(offset);
        let mut out = Commands::new();
        if let Some(token) = self.frame.request() {
            out.push(Command::RequestFrame(token));
        }
        Response::passive(out)
    }

    /// Animation frame requested by `on_scroll`. Stale tokens are ignored.
    pub fn on_frame(&mut self, token: TaskToken) -> Response {
        if !self.frame.fire(token) {
            return Response::ignored();
        }
        let mut out = Commands::new();
        self.normalize(&mut out);
        self.push_scales(&mut out);
        self.arm_settle(&mut out);
        Response::passive(out)
    }

    /// Scrolling has been quiet for the settle delay.
    pub fn on_settle(&mut self, token: TaskToken) -> Response {
        if !self.settle.fire(token) {
            return Response::ignored();
        }
        self.glide = None;
        let mut out = Commands::new();
        if self.ready() {
            self.normalize(&mut out);
            self.activate_nearest(&mut out);
            self.push_scales(&mut out);
        }
        if self.wheel_lock {
            log::debug!("carousel: settled, wheel unlocked");
        }
        self.wheel_lock = false;
        Response::passive(out)
    }

    pub fn on_wheel(&mut self, wheel: WheelInput) -> Response {
        // ctrl + wheel is the browser's zoom gesture
        if wheel.modifiers.ctrl || !self.scroll.overflows() || !self.ready() {
            return Response::ignored();
        }
        let delta = wheel.dominant_px(self.config.line_height, self.scroll.viewport_width());
        if delta == 0.0 {
            return Response::ignored();
        }

        let mut out = Commands::new();
        match self.config.mode {
            CarouselMode::Snap => {
                if self.wheel_lock {
                    return Response::consumed(out);
                }
                self.wheel_lock = true;

                if self.sequence.active().is_none() {
                    self.activate_nearest(&mut out);
                }
                let from = self.sequence.active().unwrap_or(0);
                let next = self.sequence.step_from(from, if delta > 0.0 { 1 } else { -1 });
                log::debug!("carousel: wheel {delta:+.1}px, step {from} -> {next}");

                self.activate(next, &mut out);
                self.center_on(next, true, &mut out);
                self.arm_settle(&mut out);
            }
            CarouselMode::Scale => {
                self.glide = None;
                self.scroll.set_offset(self.scroll.get() + delta);
                out.push(Command::ScrollTo {
                    left: self.scroll.get(),
                    smooth: false,
                });
                if let Some(token) = self.frame.request() {
                    out.push(Command::RequestFrame(token));
                }
            }
        }
        Response::consumed(out)
    }

    pub fn on_pointer(&mut self, p: PointerInput) -> Response {
        let mut out = Commands::new();
        match p.event {
            PointerEventKind::Down => {
                self.drag = Some(Drag {
                    pointer: p.id,
                    start_x: p.x,
                    start_offset: self.scroll.get(),
                });
                self.moved = false;
                self.glide = None;
                out.push(Command::SetDragging(true));
                out.push(Command::CapturePointer(p.id));
            }
            PointerEventKind::Move => {
                let Some(drag) = self.drag else {
                    return Response::ignored();
                };
                let dx = p.x - drag.start_x;
                if dx.abs() > self.config.drag_threshold {
                    self.moved = true;
                }
                self.scroll.set_offset(drag.start_offset - dx);
                out.push(Command::ScrollTo {
                    left: self.scroll.get(),
                    smooth: false,
                });
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let Some(drag) = self.drag.take() else {
                    return Response::ignored();
                };
                out.push(Command::SetDragging(false));
                out.push(Command::ReleasePointer(drag.pointer));

                if self.config.mode == CarouselMode::Snap && self.ready() {
                    if let Some(idx) = self.layout.nearest_to_center(self.scroll.get()) {
                        self.activate(idx, &mut out);
                        self.center_on(idx, true, &mut out);
                    }
                }
                if let Some(token) = self.frame.request() {
                    out.push(Command::RequestFrame(token));
                }
            }
        }
        Response::passive(out)
    }

    /// Whether the click that follows the last press should be swallowed.
    pub fn should_suppress_click(&self) -> bool {
        self.moved
    }

    pub fn on_key(&mut self, key: &Key) -> Response {
        let step = match key {
            Key::ArrowLeft => -1,
            Key::ArrowRight => 1,
            Key::Other(_) => return Response::ignored(),
        };
        if !self.ready() {
            return Response::ignored();
        }
        let mut out = Commands::new();
        // a held key lands here between frames; step from an in-band offset
        self.glide = None;
        self.normalize(&mut out);
        let from = self.layout.nearest_to_center(self.scroll.get()).unwrap_or(0);
        let next = self.sequence.step_from(from, step);
        self.center_on(next, true, &mut out);
        self.activate(next, &mut out);
        Response::consumed(out)
    }

    /// Platform reduced-motion preference changed.
    pub fn set_reduced_motion(&mut self, reduced: bool) -> Response {
        self.reduced_motion = reduced;
        let mut out = Commands::new();
        if reduced && self.config.mode == CarouselMode::Scale {
            out.push(Command::ClearScales);
        }
        if let Some(token) = self.frame.request() {
            out.push(Command::RequestFrame(token));
        }
        Response::passive(out)
    }

    /// Cancels outstanding timers; the host drops its listeners afterwards.
    pub fn teardown(&mut self) -> Response {
        let mut out = Commands::new();
        self.frame.cancel();
        if self.settle.cancel() {
            out.push(Command::CancelSettle);
        }
        if let Some(drag) = self.drag.take() {
            out.push(Command::SetDragging(false));
            out.push(Command::ReleasePointer(drag.pointer));
        }
        self.wheel_lock = false;
        self.glide = None;
        Response::passive(out)
    }

    /// Center-weighted scale of every tile at the current offset.
    pub fn scales(&self) -> Vec<f32> {
        let half = self.layout.viewport_width / 2.0;
        self.layout
            .distances_from_center(self.scroll.get())
            .map(|d| emphasis_scale(d, half, self.config.scale_gain))
            .collect()
    }

    /// Folds the offset back into the middle band. A drag in progress and a
    /// glide in flight move with it, so neither jumps back out.
    fn normalize(&mut self, out: &mut Commands) {
        let before = self.scroll.get();
        let Some(shift) = self.scroll.fold_shift() else {
            return;
        };
        let left = before + shift;
        self.scroll.set_offset(left);
        log::debug!("carousel: loop {before:.1} -> {left:.1}");
        out.push(Command::ScrollTo {
            left,
            smooth: false,
        });
        if let Some(drag) = &mut self.drag {
            drag.start_offset += shift;
        }
        if let Some(target) = self.glide {
            let mut moved = self.scroll;
            moved.set_offset(target + shift);
            self.glide = Some(moved.get());
            out.push(Command::ScrollTo {
                left: moved.get(),
                smooth: true,
            });
        }
    }

    fn activate(&mut self, index: usize, out: &mut Commands) {
        if let Some(previous) = self.sequence.set_active(index) {
            out.push(Command::SetActive {
                previous,
                next: index,
            });
        }
    }

    fn activate_nearest(&mut self, out: &mut Commands) {
        if let Some(idx) = self.layout.nearest_to_center(self.scroll.get()) {
            self.activate(idx, out);
        }
    }

    /// Scrolls so tile `index` sits on the viewport center. Instant moves are
    /// recorded right away; smooth ones arrive later through `on_scroll`.
    fn center_on(&mut self, index: usize, smooth: bool, out: &mut Commands) {
        let Some(tile) = self.layout.tiles.get(index) else {
            return;
        };
        let smooth = smooth && !self.reduced_motion;
        let mut target = self.scroll;
        target.set_offset(self.layout.center_offset(tile));
        if !smooth {
            self.scroll = target;
        } else if target.get() != self.scroll.get() {
            self.glide = Some(target.get());
        }
        out.push(Command::ScrollTo {
            left: target.get(),
            smooth,
        });
    }

    fn arm_settle(&mut self, out: &mut Commands) {
        let token = self.settle.schedule();
        out.push(Command::ArmSettle {
            token,
            delay: self.config.settle_delay,
        });
    }

    fn push_scales(&self, out: &mut Commands) {
        if self.config.mode == CarouselMode::Scale && !self.reduced_motion {
            out.push(Command::SetScales(self.scales()));
        }
    }
}
