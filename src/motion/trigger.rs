//! Scroll-position triggers.
//!
//! A binding watches one anchor element against a start and an end marker.
//! The registry reports phase transitions as events; it never runs callbacks
//! itself, so whoever owns the bindings decides what "enter" and "exit" do.

use std::collections::BTreeMap;

use super::stage::{ElementId, Rect, Stage};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> Self {
        Self { scroll_y, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn of(self, rect: &Rect) -> f64 {
        match self {
            Self::Top => rect.top,
            Self::Center => rect.top + rect.height / 2.0,
            Self::Bottom => rect.bottom(),
        }
    }
}

/// "When `edge` of the anchor meets the line `viewport_fraction` of the way
/// down the viewport."
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub edge: Edge,
    pub viewport_fraction: f64,
}

impl Marker {
    pub fn new(edge: Edge, viewport_fraction: f64) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    /// Parses `"top 80%"`, `"center center"` or `"bottom 20%"`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();
        let edge = match parts.next()? {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            _ => return None,
        };
        let viewport_fraction = match parts.next()? {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            percent => percent.strip_suffix('%')?.trim().parse::<f64>().ok()? / 100.0,
        };
        if parts.next().is_some() {
            return None;
        }

        Some(Self::new(edge, viewport_fraction))
    }

    fn crossed(&self, anchor: &Rect, viewport: Viewport) -> bool {
        viewport.scroll_y + viewport.height * self.viewport_fraction >= self.edge.of(anchor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub start: Marker,
    pub end: Marker,
}

impl Thresholds {
    pub fn new(start: Marker, end: Marker) -> Self {
        Self { start, end }
    }

    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Some(Self::new(Marker::parse(start)?, Marker::parse(end)?))
    }

    /// `"top <start_percent>%"` to `"bottom 20%"`, the window every section
    /// uses.
    pub fn from_top(start_percent: f64) -> Self {
        Self::new(
            Marker::new(Edge::Top, start_percent / 100.0),
            Marker::new(Edge::Bottom, 0.2),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayPolicy {
    Once,
    ReverseOnExit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerPhase {
    Before,
    Active,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Enter,
    Exit,
}

/// `None` marks an inert handle returned for a missing anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TriggerHandle(Option<u32>);

impl TriggerHandle {
    pub fn inert() -> Self {
        Self(None)
    }

    pub fn is_inert(self) -> bool {
        self.0.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerEvent {
    pub handle: TriggerHandle,
    pub transition: Transition,
}

struct Binding {
    anchor: ElementId,
    thresholds: Thresholds,
    policy: ReplayPolicy,
    phase: TriggerPhase,
    played: bool,
}

impl Binding {
    fn phase_for(&self, anchor: &Rect, viewport: Viewport) -> TriggerPhase {
        if !self.thresholds.start.crossed(anchor, viewport) {
            TriggerPhase::Before
        } else if self.thresholds.end.crossed(anchor, viewport) {
            TriggerPhase::After
        } else {
            TriggerPhase::Active
        }
    }
}

#[derive(Default)]
pub struct TriggerRegistry {
    bindings: BTreeMap<u32, Binding>,
    next_id: u32,
}

impl TriggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        stage: &Stage,
        anchor: ElementId,
        thresholds: Thresholds,
        policy: ReplayPolicy,
    ) -> TriggerHandle {
        if !stage.contains(anchor) {
            return TriggerHandle::inert();
        }

        let id = self.next_id;
        self.next_id += 1;
        self.bindings.insert(
            id,
            Binding {
                anchor,
                thresholds,
                policy,
                phase: TriggerPhase::Before,
                played: false,
            },
        );
        TriggerHandle(Some(id))
    }

    pub fn release(&mut self, handle: TriggerHandle) -> bool {
        match handle.0 {
            Some(id) => self.bindings.remove(&id).is_some(),
            None => false,
        }
    }

    pub fn phase(&self, handle: TriggerHandle) -> Option<TriggerPhase> {
        handle
            .0
            .and_then(|id| self.bindings.get(&id))
            .map(|binding| binding.phase)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Recomputes every binding against `viewport` and returns the
    /// transitions that fired, in registration order.
    pub fn evaluate(&mut self, stage: &Stage, viewport: Viewport) -> Vec<TriggerEvent> {
        let mut events = Vec::new();

        for (id, binding) in &mut self.bindings {
            let Some(anchor) = stage.rect(binding.anchor) else {
                continue;
            };
            let next = binding.phase_for(&anchor, viewport);
            let previous = std::mem::replace(&mut binding.phase, next);
            let handle = TriggerHandle(Some(*id));

            match (previous, next) {
                (TriggerPhase::Before, TriggerPhase::Active | TriggerPhase::After) => {
                    let replay = binding.policy == ReplayPolicy::ReverseOnExit;
                    if !binding.played || replay {
                        binding.played = true;
                        events.push(TriggerEvent {
                            handle,
                            transition: Transition::Enter,
                        });
                    }
                }
                (TriggerPhase::Active | TriggerPhase::After, TriggerPhase::Before) => {
                    if binding.policy == ReplayPolicy::ReverseOnExit && binding.played {
                        binding.played = false;
                        events.push(TriggerEvent {
                            handle,
                            transition: Transition::Exit,
                        });
                    }
                }
                _ => {}
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT_HEIGHT: f64 = 1000.0;

    fn anchored_stage() -> (Stage, ElementId) {
        let mut stage = Stage::new();
        let anchor = stage.insert(Rect::new(2000.0, 0.0, 1200.0, 800.0));
        (stage, anchor)
    }

    fn at(scroll_y: f64) -> Viewport {
        Viewport::new(scroll_y, VIEWPORT_HEIGHT)
    }

    fn transitions(events: Vec<TriggerEvent>) -> Vec<Transition> {
        events.into_iter().map(|event| event.transition).collect()
    }

    #[test]
    fn parses_marker_strings() {
        assert_eq!(Marker::parse("top 80%"), Some(Marker::new(Edge::Top, 0.8)));
        assert_eq!(
            Marker::parse("bottom 20%"),
            Some(Marker::new(Edge::Bottom, 0.2))
        );
        assert_eq!(
            Marker::parse("center center"),
            Some(Marker::new(Edge::Center, 0.5))
        );
        assert_eq!(Marker::parse("left 10%"), None);
        assert_eq!(Marker::parse("top"), None);
        assert_eq!(Marker::parse("top 10% extra"), None);
        assert_eq!(
            Thresholds::parse("top 70%", "bottom 20%"),
            Some(Thresholds::from_top(70.0))
        );
    }

    #[test]
    fn enter_fires_when_anchor_top_crosses_the_start_line() {
        let (stage, anchor) = anchored_stage();
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(
            &stage,
            anchor,
            Thresholds::from_top(80.0),
            ReplayPolicy::ReverseOnExit,
        );

        assert!(registry.evaluate(&stage, at(1100.0)).is_empty());
        assert_eq!(registry.phase(handle), Some(TriggerPhase::Before));

        let events = registry.evaluate(&stage, at(1200.0));
        assert_eq!(
            events,
            vec![TriggerEvent {
                handle,
                transition: Transition::Enter
            }]
        );
        assert!(registry.evaluate(&stage, at(1300.0)).is_empty());
    }

    #[test]
    fn reverse_policy_exits_on_the_way_back_and_replays() {
        let (stage, anchor) = anchored_stage();
        let mut registry = TriggerRegistry::new();
        registry.register(
            &stage,
            anchor,
            Thresholds::from_top(80.0),
            ReplayPolicy::ReverseOnExit,
        );

        assert_eq!(transitions(registry.evaluate(&stage, at(1500.0))), vec![Transition::Enter]);
        assert_eq!(transitions(registry.evaluate(&stage, at(500.0))), vec![Transition::Exit]);
        assert_eq!(transitions(registry.evaluate(&stage, at(1500.0))), vec![Transition::Enter]);
    }

    #[test]
    fn leaving_past_the_end_is_silent() {
        let (stage, anchor) = anchored_stage();
        let mut registry = TriggerRegistry::new();
        let handle = registry.register(
            &stage,
            anchor,
            Thresholds::from_top(80.0),
            ReplayPolicy::ReverseOnExit,
        );

        registry.evaluate(&stage, at(1500.0));
        assert!(registry.evaluate(&stage, at(3000.0)).is_empty());
        assert_eq!(registry.phase(handle), Some(TriggerPhase::After));
        assert!(registry.evaluate(&stage, at(1500.0)).is_empty());
    }

    #[test]
    fn jumping_straight_past_the_window_still_enters() {
        let (stage, anchor) = anchored_stage();
        let mut registry = TriggerRegistry::new();
        registry.register(&stage, anchor, Thresholds::from_top(80.0), ReplayPolicy::Once);

        assert_eq!(transitions(registry.evaluate(&stage, at(5000.0))), vec![Transition::Enter]);
    }

    #[test]
    fn once_policy_never_exits_or_replays() {
        let (stage, anchor) = anchored_stage();
        let mut registry = TriggerRegistry::new();
        registry.register(&stage, anchor, Thresholds::from_top(80.0), ReplayPolicy::Once);

        assert_eq!(transitions(registry.evaluate(&stage, at(1500.0))), vec![Transition::Enter]);
        assert!(registry.evaluate(&stage, at(0.0)).is_empty());
        assert!(registry.evaluate(&stage, at(1500.0)).is_empty());
    }

    #[test]
    fn missing_anchor_yields_an_inert_handle() {
        let (mut stage, anchor) = anchored_stage();
        stage.remove(anchor);
        let mut registry = TriggerRegistry::new();

        let handle =
            registry.register(&stage, anchor, Thresholds::from_top(80.0), ReplayPolicy::Once);
        assert!(handle.is_inert());
        assert!(registry.is_empty());
        assert!(!registry.release(handle));
    }

    #[test]
    fn released_bindings_stop_reporting() {
        let (stage, anchor) = anchored_stage();
        let mut registry = TriggerRegistry::new();
        let handle =
            registry.register(&stage, anchor, Thresholds::from_top(80.0), ReplayPolicy::Once);

        assert!(registry.release(handle));
        assert!(!registry.release(handle));
        assert!(registry.evaluate(&stage, at(1500.0)).is_empty());
    }

    #[test]
    fn resize_is_just_another_evaluation() {
        let (stage, anchor) = anchored_stage();
        let mut registry = TriggerRegistry::new();
        registry.register(&stage, anchor, Thresholds::from_top(80.0), ReplayPolicy::Once);

        assert!(registry.evaluate(&stage, Viewport::new(1000.0, 1000.0)).is_empty());
        let taller = Viewport::new(1000.0, 1300.0);
        assert_eq!(transitions(registry.evaluate(&stage, taller)), vec![Transition::Enter]);
    }
}
