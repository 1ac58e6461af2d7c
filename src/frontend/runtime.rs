//! Browser side of [`Motion`].
//!
//! The runtime owns the DOM node behind every [`ElementId`], copies dirty
//! styles onto those nodes, and keeps a single animation frame scheduled
//! while anything is moving. Scroll and resize reach it through one window
//! listener each, shared by every section.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use tracing::{debug, trace};
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlElement, MouseEvent, Node};
use yew::prelude::*;

use crate::motion::stage::style_declarations;
use crate::motion::{
    ElementId, Motion, MotionOptions, PointerSample, Rect, SectionId, SectionSpec, Viewport,
};

const FALLBACK_VIEWPORT_HEIGHT: f64 = 720.0;

/// Page clock in seconds, on the same timeline as animation frame stamps.
pub fn clock() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now() / 1000.0)
        .unwrap_or(0.0)
}

pub fn viewport() -> Viewport {
    let Some(win) = window() else {
        return Viewport::new(0.0, FALLBACK_VIEWPORT_HEIGHT);
    };

    let scroll_y = win.scroll_y().unwrap_or(0.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT_HEIGHT);

    Viewport::new(scroll_y, height)
}

/// Layout box in document coordinates. Walks the offset parents so the
/// transforms written by animations never move a trigger anchor.
fn document_rect(node: &HtmlElement) -> Rect {
    let mut top = 0.0;
    let mut left = 0.0;
    let mut current = Some(node.clone());

    while let Some(element) = current {
        top += f64::from(element.offset_top());
        left += f64::from(element.offset_left());
        current = element
            .offset_parent()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
    }

    Rect::new(
        top,
        left,
        f64::from(node.offset_width()),
        f64::from(node.offset_height()),
    )
}

fn client_rect(node: &HtmlElement) -> Rect {
    let bounds = node.get_bounding_client_rect();
    Rect::new(bounds.top(), bounds.left(), bounds.width(), bounds.height())
}

struct Runtime {
    motion: Motion,
    nodes: HashMap<ElementId, HtmlElement>,
    pointers: HashMap<SectionId, Vec<EventListener>>,
    frame: Option<AnimationFrame>,
}

impl Runtime {
    fn flush(&mut self) {
        for id in self.motion.stage_mut().take_dirty() {
            let node = self.nodes.get(&id);
            let (Some(node), Some(values)) = (node, self.motion.stage().props(id)) else {
                continue;
            };
            let style = node.style();
            for (name, value) in style_declarations(values) {
                let _ = style.set_property(name, &value);
            }
        }
    }
}

#[derive(Clone)]
pub struct MotionRuntime(Rc<RefCell<Runtime>>);

impl PartialEq for MotionRuntime {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl MotionRuntime {
    pub fn new(options: MotionOptions) -> Self {
        let mut motion = Motion::new(options);
        motion.set_viewport(viewport(), clock());

        Self(Rc::new(RefCell::new(Runtime {
            motion,
            nodes: HashMap::new(),
            pointers: HashMap::new(),
            frame: None,
        })))
    }

    fn downgrade(&self) -> Weak<RefCell<Runtime>> {
        Rc::downgrade(&self.0)
    }

    /// Puts a DOM node on the stage, measured where layout placed it.
    pub fn adopt(&self, node: &Element) -> Option<ElementId> {
        let node = node.dyn_ref::<HtmlElement>()?.clone();
        let mut inner = self.0.borrow_mut();
        let id = inner.motion.stage_mut().insert(document_rect(&node));
        inner.nodes.insert(id, node);
        Some(id)
    }

    pub fn adopt_all(&self, nodes: &[Element]) -> Vec<ElementId> {
        nodes.iter().filter_map(|node| self.adopt(node)).collect()
    }

    pub fn mount(&self, spec: SectionSpec) -> SectionId {
        let targets: Vec<ElementId> =
            spec.interactions.iter().map(|(element, _)| *element).collect();
        let weak = self.downgrade();

        let mut inner = self.0.borrow_mut();
        let id = inner.motion.mount(spec, clock());
        inner.flush();

        let listeners: Vec<EventListener> = targets
            .into_iter()
            .filter_map(|element| inner.nodes.get(&element).map(|node| (element, node)))
            .flat_map(|(element, node)| pointer_listeners(&weak, element, node))
            .collect();
        inner.pointers.insert(id, listeners);
        drop(inner);

        self.wake();
        id
    }

    pub fn unmount(&self, id: SectionId) {
        let mut inner = self.0.borrow_mut();
        inner.pointers.remove(&id);
        for element in inner.motion.unmount(id) {
            inner.nodes.remove(&element);
        }
        debug!(census = ?inner.motion.census(), "runtime_unmount");
    }

    /// Hands the current scroll position to every trigger.
    pub fn publish_viewport(&self) -> Viewport {
        let current = viewport();
        let mut inner = self.0.borrow_mut();
        inner.motion.set_viewport(current, clock());
        inner.flush();
        drop(inner);

        self.wake();
        current
    }

    /// Measures every node again, after a resize or a late layout shift.
    pub fn remeasure(&self) {
        let mut inner = self.0.borrow_mut();
        let Runtime { motion, nodes, .. } = &mut *inner;
        for (id, node) in nodes.iter() {
            motion.stage_mut().set_rect(*id, document_rect(node));
        }
        motion.set_viewport(viewport(), clock());
        trace!(elements = nodes.len(), "runtime_remeasure");
        inner.flush();
        drop(inner);

        self.wake();
    }

    /// Starts a smooth scroll to an adopted node. `false` if the node is not
    /// on the stage.
    pub fn glide_to(&self, target: &Element) -> bool {
        let target: &Node = target;
        let mut inner = self.0.borrow_mut();
        let element = inner
            .nodes
            .iter()
            .find(|(_, node)| node.is_same_node(Some(target)))
            .map(|(id, _)| *id);
        let started = element.is_some_and(|element| inner.motion.glide_to(element, clock()));
        drop(inner);

        if started {
            self.wake();
        }
        started
    }

    /// Subscribes the runtime to window scroll, resize and load. The
    /// returned listeners detach when dropped.
    pub fn publish(&self, on_scroll: Callback<f64>) -> Vec<EventListener> {
        let Some(win) = window() else {
            return Vec::new();
        };

        let scroll = {
            let runtime = self.downgrade();
            EventListener::new(&win, "scroll", move |_| {
                if let Some(runtime) = runtime.upgrade() {
                    let viewport = MotionRuntime(runtime).publish_viewport();
                    on_scroll.emit(viewport.scroll_y);
                }
            })
        };
        let remeasure = |event: &'static str| {
            let runtime = self.downgrade();
            EventListener::new(&win, event, move |_| {
                if let Some(runtime) = runtime.upgrade() {
                    MotionRuntime(runtime).remeasure();
                }
            })
        };

        vec![scroll, remeasure("resize"), remeasure("load")]
    }

    fn pointer_enter(&self, element: ElementId) {
        self.0.borrow_mut().motion.pointer_enter(element, clock());
        self.wake();
    }

    fn pointer_leave(&self, element: ElementId) {
        self.0.borrow_mut().motion.pointer_leave(element, clock());
        self.wake();
    }

    fn pointer_move(&self, element: ElementId, event: &MouseEvent) {
        let mut inner = self.0.borrow_mut();
        let Some(node) = inner.nodes.get(&element) else {
            return;
        };
        let sample = PointerSample {
            x: f64::from(event.client_x()),
            y: f64::from(event.client_y()),
            bounds: client_rect(node),
        };
        inner.motion.pointer_move(element, sample, clock());
        drop(inner);

        self.wake();
    }

    fn wake(&self) {
        let mut inner = self.0.borrow_mut();
        if inner.frame.is_none() && inner.motion.is_animating() {
            inner.frame = Some(schedule(self.downgrade()));
        }
    }

    fn frame(&self, now: f64) {
        let scroll = {
            let mut inner = self.0.borrow_mut();
            let scroll = inner.motion.tick(now);
            inner.flush();
            scroll
        };

        if let (Some(y), Some(win)) = (scroll, window()) {
            win.scroll_to_with_x_and_y(0.0, y);
        }

        let mut inner = self.0.borrow_mut();
        inner.frame = if inner.motion.is_animating() {
            Some(schedule(self.downgrade()))
        } else {
            None
        };
    }
}

fn schedule(runtime: Weak<RefCell<Runtime>>) -> AnimationFrame {
    request_animation_frame(move |timestamp| {
        if let Some(runtime) = runtime.upgrade() {
            MotionRuntime(runtime).frame(timestamp / 1000.0);
        }
    })
}

fn pointer_listeners(
    runtime: &Weak<RefCell<Runtime>>,
    element: ElementId,
    node: &HtmlElement,
) -> Vec<EventListener> {
    let listen = |event: &'static str, handler: fn(&MotionRuntime, ElementId, &web_sys::Event)| {
        let runtime = runtime.clone();
        EventListener::new(node, event, move |event| {
            if let Some(runtime) = runtime.upgrade() {
                handler(&MotionRuntime(runtime), element, event);
            }
        })
    };

    vec![
        listen("mouseenter", |runtime, element, _| runtime.pointer_enter(element)),
        listen("mouseleave", |runtime, element, _| runtime.pointer_leave(element)),
        listen("mousemove", |runtime, element, event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                runtime.pointer_move(element, event);
            }
        }),
    ]
}

/// Mounts the section `build` describes once the component's DOM exists,
/// and unmounts it when the component goes away. `build` should resolve
/// every node it needs before adopting any, and return `None` if one is
/// missing.
#[hook]
pub fn use_section<F>(build: F)
where
    F: FnOnce(&MotionRuntime) -> Option<SectionSpec> + 'static,
{
    let runtime = use_context::<MotionRuntime>();
    use_effect_with((), move |_| {
        let mounted = runtime.and_then(|runtime| {
            let spec = build(&runtime)?;
            let id = runtime.mount(spec);
            Some((runtime, id))
        });

        move || {
            if let Some((runtime, id)) = mounted {
                runtime.unmount(id);
            }
        }
    });
}
