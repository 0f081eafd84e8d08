//! DOM binding (wasm32).
//!
//! Finds the container, triples its tiles in place, measures them and routes
//! DOM events into a [`Carousel`]. Commands come back out as `scrollTo`,
//! class toggles, a scale custom property, `requestAnimationFrame` and
//! `setTimeout`.
use crate::dom;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use reel_core::{
    CarouselConfig, CarouselMode, Command, Hooks, Layout, Modifiers, PointerEventKind, PointerId,
    PointerInput, ReelError, Response, TileBox, WheelInput, controller::Carousel,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent,
    MediaQueryList, PointerEvent, ScrollBehavior, ScrollToOptions, WheelEvent, Window,
};

thread_local! {
    static MOUNTED: RefCell<Vec<CarouselHandle>> = const { RefCell::new(Vec::new()) };
}

#[wasm_bindgen]
pub struct WebOptions {
    container_id: Option<String>,
    scale: bool,
}

#[wasm_bindgen]
impl WebOptions {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: Option<String>) -> Self {
        Self {
            container_id,
            scale: false,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn container_id(&self) -> Option<String> {
        self.container_id.clone()
    }

    /// Continuous center scaling instead of one-tile snapping.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> bool {
        self.scale
    }

    #[wasm_bindgen(setter)]
    pub fn set_scale(&mut self, v: bool) {
        self.scale = v;
    }
}

impl WebOptions {
    fn config(&self) -> CarouselConfig {
        let mut cfg = CarouselConfig::default();
        if let Some(id) = &self.container_id {
            cfg.hooks.container_id = id.clone();
        }
        if self.scale {
            cfg = cfg.mode(CarouselMode::Scale);
        }
        cfg
    }
}

/// Page entry point: installs logging and mounts the carousel once the
/// document has been parsed.
#[wasm_bindgen]
pub fn start_carousel(options: Option<WebOptions>) {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let _ = console_log::init_with_level(log::Level::Info);

    let config = options.map(|o| o.config()).unwrap_or_default();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let cb = Closure::once_into_js(move || mount(&config));
        let _ = document.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref());
    } else {
        mount(&config);
    }
}

fn mount(config: &CarouselConfig) {
    if let Some(handle) = attach(config) {
        MOUNTED.with(|m| m.borrow_mut().push(handle));
    }
}

/// Mounts a carousel on the configured container. `None` when the page has
/// no such container or the configuration is unusable; the page is left as is.
pub fn attach(config: &CarouselConfig) -> Option<CarouselHandle> {
    match try_attach(config) {
        Ok(handle) => Some(handle),
        Err(ReelError::MissingContainer(id)) => {
            log::debug!("reel: no #{id} on this page");
            None
        }
        Err(e) => {
            log::warn!("reel: not attached: {e}");
            None
        }
    }
}

struct Binding {
    carousel: Carousel<()>,
    window: Window,
    container: HtmlElement,
    tiles: Vec<HtmlElement>,
    clones: Vec<Element>,
    hooks: Hooks,
    settle_timer: Option<i32>,
    this: Weak<RefCell<Binding>>,
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(Event)>,
}

/// Keeps a mounted carousel alive; dropping it removes every listener and
/// puts the container back the way it was found.
pub struct CarouselHandle {
    binding: Rc<RefCell<Binding>>,
    listeners: Vec<Listener>,
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        for l in self.listeners.drain(..) {
            let _ = l.target.remove_event_listener_with_callback_and_bool(
                l.kind,
                l.closure.as_ref().unchecked_ref(),
                l.capture,
            );
        }
        let r = self.binding.borrow_mut().carousel.teardown();
        Binding::apply(&self.binding, r);
        self.binding.borrow().restore();
    }
}

fn try_attach(config: &CarouselConfig) -> Result<CarouselHandle, ReelError> {
    config.validate()?;
    let hooks = config.hooks.clone();
    let window = web_sys::window().ok_or_else(|| ReelError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| ReelError::Dom("no document".into()))?;
    let container = document
        .get_element_by_id(&hooks.container_id)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| ReelError::MissingContainer(hooks.container_id.clone()))?;

    let originals = query_tiles(&container, &dom::originals_selector(&hooks.tile_selector))?;
    if originals.is_empty() {
        return Err(ReelError::NoTiles(hooks.tile_selector.clone()));
    }
    let initial = originals
        .iter()
        .position(|el| dom::is_initial(el.get_attribute(&hooks.initial_attr).as_deref()));
    let clones = triple_in_place(&document, &container, &originals, &hooks.initial_attr)?;
    let tiles = query_tiles(&container, &hooks.tile_selector)?;

    let reduced_query = window.match_media(dom::REDUCED_MOTION_QUERY).ok().flatten();
    let reduced = reduced_query.as_ref().is_some_and(MediaQueryList::matches);

    let carousel = Carousel::new(vec![(); originals.len()], initial, config.clone())
        .with_reduced_motion(reduced);
    let binding = Rc::new_cyclic(|this| {
        RefCell::new(Binding {
            carousel,
            window: window.clone(),
            container: container.clone(),
            tiles,
            clones,
            hooks,
            settle_timer: None,
            this: this.clone(),
        })
    });

    let mut handle = CarouselHandle {
        binding: binding.clone(),
        listeners: Vec::new(),
    };
    handle.listen_all(&window, &container, reduced_query)?;

    let layout = binding.borrow().measure();
    let r = binding.borrow_mut().carousel.init(layout);
    Binding::apply(&binding, r);
    Ok(handle)
}

fn query_tiles(container: &HtmlElement, selector: &str) -> Result<Vec<HtmlElement>, ReelError> {
    let list = container
        .query_selector_all(selector)
        .map_err(|e| ReelError::Dom(format!("bad selector `{selector}`: {e:?}")))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// `[clones | originals | clones]`, clones tagged with [`dom::CLONE_ATTR`]
/// and without the initial marker. Returns the inserted clones.
fn triple_in_place(
    document: &Document,
    container: &HtmlElement,
    originals: &[HtmlElement],
    initial_attr: &str,
) -> Result<Vec<Element>, ReelError> {
    let mut clones = Vec::with_capacity(originals.len() * 2);
    let mut clone_set = || -> Result<web_sys::DocumentFragment, ReelError> {
        let frag = document.create_document_fragment();
        for el in originals {
            let node = el
                .clone_node_with_deep(true)
                .map_err(|e| ReelError::Dom(format!("clone failed: {e:?}")))?;
            if let Some(el) = node.dyn_ref::<Element>() {
                let _ = el.remove_attribute(initial_attr);
                let _ = el.set_attribute(dom::CLONE_ATTR, "");
                clones.push(el.clone());
            }
            frag.append_child(&node)
                .map_err(|e| ReelError::Dom(format!("append failed: {e:?}")))?;
        }
        Ok(frag)
    };
    let before = clone_set()?;
    let after = clone_set()?;
    container
        .prepend_with_node_1(&before)
        .and_then(|_| container.append_with_node_1(&after))
        .map_err(|e| ReelError::Dom(format!("insert failed: {e:?}")))?;
    Ok(clones)
}

impl CarouselHandle {
    fn on(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        capture: bool,
        f: impl FnMut(Event) + 'static,
    ) -> Result<(), ReelError> {
        let closure = Closure::<dyn FnMut(Event)>::new(f);
        let opts = AddEventListenerOptions::new();
        opts.set_capture(capture);
        if let Some(p) = passive {
            opts.set_passive(p);
        }
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(|e| ReelError::Dom(format!("listen {kind}: {e:?}")))?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            capture,
            closure,
        });
        Ok(())
    }

    fn listen_all(
        &mut self,
        window: &Window,
        container: &HtmlElement,
        reduced_query: Option<MediaQueryList>,
    ) -> Result<(), ReelError> {
        let weak = Rc::downgrade(&self.binding);
        let target: &EventTarget = container.as_ref();

        self.on(target, "scroll", Some(true), false, {
            let weak = weak.clone();
            move |_| {
                Binding::dispatch(&weak, |b| {
                    let offset = b.container.scroll_left() as f32;
                    b.carousel.on_scroll(offset)
                });
            }
        })?;

        self.on(target, "wheel", Some(false), false, {
            let weak = weak.clone();
            move |e| {
                let Some(w) = e.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let input = WheelInput {
                    delta_x: w.delta_x() as f32,
                    delta_y: w.delta_y() as f32,
                    mode: dom::delta_mode(w.delta_mode()),
                    modifiers: Modifiers { ctrl: w.ctrl_key() },
                };
                if Binding::dispatch(&weak, |b| b.carousel.on_wheel(input)) {
                    e.prevent_default();
                }
            }
        })?;

        for (kind, event) in [
            ("pointerdown", PointerEventKind::Down),
            ("pointermove", PointerEventKind::Move),
            ("pointerup", PointerEventKind::Up),
            ("pointercancel", PointerEventKind::Cancel),
        ] {
            self.on(target, kind, None, false, {
                let weak = weak.clone();
                move |e| {
                    let Some(p) = e.dyn_ref::<PointerEvent>() else {
                        return;
                    };
                    let input = PointerInput {
                        id: PointerId(p.pointer_id()),
                        event,
                        x: p.client_x() as f32,
                    };
                    Binding::dispatch(&weak, |b| b.carousel.on_pointer(input));
                }
            })?;
        }

        // capture phase, so tile links never see a click that ended a drag
        self.on(target, "click", None, true, {
            let weak = weak.clone();
            move |e| {
                let suppress = weak
                    .upgrade()
                    .is_some_and(|b| b.borrow().carousel.should_suppress_click());
                if suppress {
                    e.prevent_default();
                    e.stop_propagation();
                }
            }
        })?;

        self.on(target, "keydown", None, false, {
            let weak = weak.clone();
            move |e| {
                let Some(k) = e.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = dom::key(&k.key());
                if Binding::dispatch(&weak, |b| b.carousel.on_key(&key)) {
                    e.prevent_default();
                }
            }
        })?;

        self.on(window.as_ref(), "resize", None, false, {
            let weak = weak.clone();
            move |_| {
                let weak = weak.clone();
                Binding::request_frame(&weak, move || {
                    Binding::dispatch(&weak, |b| {
                        let layout = b.measure();
                        b.carousel.on_resize(layout)
                    });
                });
            }
        })?;

        if let Some(query) = reduced_query {
            let q = query.clone();
            self.on(query.as_ref(), "change", None, false, move |_| {
                let reduced = q.matches();
                Binding::dispatch(&weak, |b| b.carousel.set_reduced_motion(reduced));
            })?;
        }
        Ok(())
    }
}

impl Binding {
    /// Runs `f` against the live binding and applies its commands. Returns
    /// whether the event was consumed; false once the carousel is gone.
    fn dispatch(weak: &Weak<RefCell<Binding>>, f: impl FnOnce(&mut Binding) -> Response) -> bool {
        let Some(this) = weak.upgrade() else {
            return false;
        };
        let r = f(&mut this.borrow_mut());
        Binding::apply(&this, r)
    }

    fn request_frame(weak: &Weak<RefCell<Binding>>, f: impl FnOnce() + 'static) {
        let Some(this) = weak.upgrade() else {
            return;
        };
        let cb = Closure::once_into_js(f);
        let _ = this
            .borrow()
            .window
            .request_animation_frame(cb.unchecked_ref());
    }

    fn apply(this: &Rc<RefCell<Binding>>, response: Response) -> bool {
        let mut b = this.borrow_mut();
        for cmd in response.commands {
            match cmd {
                Command::ScrollTo { left, smooth } => b.scroll_to(left, smooth),
                Command::SetActive { previous, next } => {
                    let class = b.hooks.active_class.clone();
                    if let Some(el) = previous.and_then(|i| b.tiles.get(i)) {
                        let _ = el.class_list().remove_1(&class);
                    }
                    if let Some(el) = b.tiles.get(next) {
                        let _ = el.class_list().add_1(&class);
                    }
                    // the active tile may change its margins
                    let layout = b.measure();
                    b.carousel.on_layout(layout);
                }
                Command::SetDragging(on) => {
                    let class = &b.hooks.dragging_class;
                    let list = b.container.class_list();
                    let _ = if on {
                        list.add_1(class)
                    } else {
                        list.remove_1(class)
                    };
                }
                Command::CapturePointer(PointerId(id)) => {
                    let _ = b.container.set_pointer_capture(id);
                }
                Command::ReleasePointer(PointerId(id)) => {
                    let _ = b.container.release_pointer_capture(id);
                }
                Command::SetScales(scales) => {
                    for (el, s) in b.tiles.iter().zip(scales) {
                        let _ = el
                            .style()
                            .set_property(&b.hooks.scale_var, &dom::format_scale(s));
                    }
                }
                Command::ClearScales => {
                    for el in &b.tiles {
                        let _ = el.style().remove_property(&b.hooks.scale_var);
                    }
                }
                Command::RequestFrame(token) => {
                    let weak = b.this.clone();
                    let cb = Closure::once_into_js(move || {
                        Binding::dispatch(&weak, |b| b.carousel.on_frame(token));
                    });
                    let _ = b.window.request_animation_frame(cb.unchecked_ref());
                }
                Command::ArmSettle { token, delay } => {
                    if let Some(t) = b.settle_timer.take() {
                        b.window.clear_timeout_with_handle(t);
                    }
                    let weak = b.this.clone();
                    let cb = Closure::once_into_js(move || {
                        Binding::dispatch(&weak, |b| {
                            b.settle_timer = None;
                            b.carousel.on_settle(token)
                        });
                    });
                    b.settle_timer = b
                        .window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            cb.unchecked_ref(),
                            delay.as_millis() as i32,
                        )
                        .ok();
                }
                Command::CancelSettle => {
                    if let Some(t) = b.settle_timer.take() {
                        b.window.clear_timeout_with_handle(t);
                    }
                }
            }
        }
        response.consumed
    }

    /// Removes the clones and every class or property the carousel set.
    fn restore(&self) {
        for el in &self.clones {
            el.remove();
        }
        let _ = self
            .container
            .class_list()
            .remove_1(&self.hooks.dragging_class);
        for el in &self.tiles {
            let _ = el.class_list().remove_1(&self.hooks.active_class);
            let _ = el.style().remove_property(&self.hooks.scale_var);
        }
        log::debug!("reel: detached, {} clones removed", self.clones.len());
    }

    fn scroll_to(&self, left: f32, smooth: bool) {
        let opts = ScrollToOptions::new();
        opts.set_left(left as f64);
        opts.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        });
        self.container.scroll_to_with_scroll_to_options(&opts);
    }

    /// Content-space geometry of every tile, from layout offsets and
    /// computed margins.
    fn measure(&self) -> Layout {
        let container: &Element = self.container.as_ref();
        let tiles = self
            .tiles
            .iter()
            .map(|el| {
                // offsetLeft is relative to the offset parent; rebase when the
                // container itself is not positioned
                let base = match el.offset_parent() {
                    Some(p) if p.is_same_node(Some(container.as_ref())) => 0.0,
                    _ => self.container.offset_left() as f32,
                };
                let (ml, mr) = self
                    .window
                    .get_computed_style(el)
                    .ok()
                    .flatten()
                    .map(|cs| {
                        let px = |prop: &str| {
                            cs.get_property_value(prop)
                                .map(|v| dom::parse_px(&v))
                                .unwrap_or(0.0)
                        };
                        (px("margin-left"), px("margin-right"))
                    })
                    .unwrap_or((0.0, 0.0));
                TileBox::new(el.offset_left() as f32 - base, el.offset_width() as f32)
                    .with_margins(ml, mr)
            })
            .collect();
        Layout {
            viewport_width: self.container.client_width() as f32,
            content_width: self.container.scroll_width() as f32,
            tiles,
        }
    }
}
