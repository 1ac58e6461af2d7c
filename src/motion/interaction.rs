//! Pointer-driven micro-interactions.

use std::collections::BTreeMap;

use super::animator::{Animator, Tween};
use super::ease::Ease;
use super::stage::{ElementId, Property, PropertyMap, Rect, Stage, Value};

pub const MAGNETIC_DAMPING: f64 = 0.1;

/// One short tween, fanned out over `targets` with a linear stagger.
#[derive(Clone, Debug, PartialEq)]
pub struct Reaction {
    pub targets: Vec<ElementId>,
    pub to: PropertyMap,
    pub duration: f64,
    pub ease: Ease,
    pub stagger: f64,
}

impl Reaction {
    pub fn new(target: ElementId, to: PropertyMap, duration: f64, ease: Ease) -> Self {
        Self::many(vec![target], to, duration, ease)
    }

    pub fn many(targets: Vec<ElementId>, to: PropertyMap, duration: f64, ease: Ease) -> Self {
        Self {
            targets,
            to,
            duration,
            ease,
            stagger: 0.0,
        }
    }

    pub fn stagger(mut self, delta: f64) -> Self {
        self.stagger = delta.max(0.0);
        self
    }

    fn play(&self, animator: &mut Animator, stage: &Stage, now: f64) {
        for (index, target) in self.targets.iter().enumerate() {
            if !stage.contains(*target) {
                continue;
            }
            animator.start(Tween::to(
                *target,
                self.to.clone(),
                now + self.stagger * index as f64,
                self.duration,
                self.ease,
            ));
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hover {
    pub on_enter: Vec<Reaction>,
    pub on_leave: Vec<Reaction>,
}

impl Hover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(mut self, reaction: Reaction) -> Self {
        self.on_enter.push(reaction);
        self
    }

    pub fn leave(mut self, reaction: Reaction) -> Self {
        self.on_leave.push(reaction);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Magnetic {
    pub damping: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Default for Magnetic {
    fn default() -> Self {
        Self {
            damping: MAGNETIC_DAMPING,
            duration: 0.3,
            ease: Ease::power_out(2),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    Hover(Hover),
    Magnetic(Magnetic),
}

/// Pointer position in client coordinates together with the bound element's
/// client bounds at the same instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub bounds: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InteractionHandle(Option<u32>);

impl InteractionHandle {
    pub fn inert() -> Self {
        Self(None)
    }

    pub fn is_inert(self) -> bool {
        self.0.is_none()
    }
}

struct Binding {
    element: ElementId,
    interaction: Interaction,
}

#[derive(Default)]
pub struct InteractionResponder {
    bindings: BTreeMap<u32, Binding>,
    next_id: u32,
}

impl InteractionResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(
        &mut self,
        stage: &Stage,
        element: ElementId,
        interaction: Interaction,
    ) -> InteractionHandle {
        if !stage.contains(element) {
            return InteractionHandle::inert();
        }

        let id = self.next_id;
        self.next_id += 1;
        self.bindings.insert(
            id,
            Binding {
                element,
                interaction,
            },
        );
        InteractionHandle(Some(id))
    }

    pub fn unbind(&mut self, handle: InteractionHandle) -> bool {
        match handle.0 {
            Some(id) => self.bindings.remove(&id).is_some(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn is_bound(&self, element: ElementId) -> bool {
        self.bindings
            .values()
            .any(|binding| binding.element == element)
    }

    fn bound_to(&self, element: ElementId) -> impl Iterator<Item = &Interaction> {
        self.bindings
            .values()
            .filter(move |binding| binding.element == element)
            .map(|binding| &binding.interaction)
    }

    pub fn pointer_enter(
        &self,
        element: ElementId,
        animator: &mut Animator,
        stage: &Stage,
        now: f64,
    ) {
        for interaction in self.bound_to(element) {
            if let Interaction::Hover(hover) = interaction {
                for reaction in &hover.on_enter {
                    reaction.play(animator, stage, now);
                }
            }
        }
    }

    pub fn pointer_leave(
        &self,
        element: ElementId,
        animator: &mut Animator,
        stage: &Stage,
        now: f64,
    ) {
        for interaction in self.bound_to(element) {
            match interaction {
                Interaction::Hover(hover) => {
                    for reaction in &hover.on_leave {
                        reaction.play(animator, stage, now);
                    }
                }
                Interaction::Magnetic(magnetic) => {
                    animator.start(Tween::to(
                        element,
                        rest_offset(0.0, 0.0),
                        now,
                        magnetic.duration,
                        magnetic.ease,
                    ));
                }
            }
        }
    }

    /// Pulls magnetic elements toward the pointer by a damped fraction of
    /// its offset from the element's centre.
    pub fn pointer_move(
        &self,
        element: ElementId,
        sample: PointerSample,
        animator: &mut Animator,
        stage: &Stage,
        now: f64,
    ) {
        if !stage.contains(element) {
            return;
        }

        for interaction in self.bound_to(element) {
            if let Interaction::Magnetic(magnetic) = interaction {
                let (center_x, center_y) = sample.bounds.center();
                let dx = (sample.x - center_x) * magnetic.damping;
                let dy = (sample.y - center_y) * magnetic.damping;
                animator.start(Tween::to(
                    element,
                    rest_offset(dx, dy),
                    now,
                    magnetic.duration,
                    magnetic.ease,
                ));
            }
        }
    }
}

fn rest_offset(x: f64, y: f64) -> PropertyMap {
    PropertyMap::from([(Property::X, Value::Number(x)), (Property::Y, Value::Number(y))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::stage::props;

    fn lift_hover(card: ElementId) -> Hover {
        Hover::new()
            .enter(Reaction::new(
                card,
                props([
                    (Property::Y, Value::Number(-15.0)),
                    (Property::Scale, Value::Number(1.05)),
                    (Property::Shadow, Value::from("0 0 30px cyan")),
                ]),
                0.4,
                Ease::power_out(2),
            ))
            .leave(Reaction::new(
                card,
                props([
                    (Property::Y, Value::Number(0.0)),
                    (Property::Scale, Value::Number(1.0)),
                    (Property::Shadow, Value::from("none")),
                ]),
                0.4,
                Ease::power_out(2),
            ))
    }

    #[test]
    fn rapid_enter_leave_settles_on_the_leave_state() {
        let mut stage = Stage::new();
        let card = stage.insert(Rect::default());
        let mut animator = Animator::new();
        let mut responder = InteractionResponder::new();
        responder.bind(&stage, card, Interaction::Hover(lift_hover(card)));

        responder.pointer_enter(card, &mut animator, &stage, 0.0);
        animator.tick(0.1, &mut stage);
        assert!(stage.number(card, Property::Y) < 0.0);

        responder.pointer_leave(card, &mut animator, &stage, 0.15);
        assert_eq!(animator.len(), 1);
        for step in 1..=10 {
            animator.tick(0.15 + f64::from(step) * 0.05, &mut stage);
        }

        assert_eq!(stage.value(card, Property::Y), Value::Number(0.0));
        assert_eq!(stage.value(card, Property::Scale), Value::Number(1.0));
        assert_eq!(stage.value(card, Property::Shadow), Value::from("none"));
        assert!(animator.is_empty());
    }

    #[test]
    fn leave_restarts_from_the_live_value_without_a_jump() {
        let mut stage = Stage::new();
        let card = stage.insert(Rect::default());
        let mut animator = Animator::new();
        let mut responder = InteractionResponder::new();
        responder.bind(&stage, card, Interaction::Hover(lift_hover(card)));

        responder.pointer_enter(card, &mut animator, &stage, 0.0);
        animator.tick(0.2, &mut stage);
        let midway = stage.number(card, Property::Y);

        responder.pointer_leave(card, &mut animator, &stage, 0.2);
        animator.tick(0.2, &mut stage);
        assert_eq!(stage.number(card, Property::Y), midway);
    }

    #[test]
    fn staggered_reactions_fan_out_over_their_targets() {
        let mut stage = Stage::new();
        let card = stage.insert(Rect::default());
        let tags: Vec<ElementId> = (0..3).map(|_| stage.insert(Rect::default())).collect();
        let mut animator = Animator::new();
        let mut responder = InteractionResponder::new();
        let hover = Hover::new().enter(
            Reaction::many(tags.clone(), props([(Property::Y, -5.0)]), 0.4, Ease::back_out(1.7))
                .stagger(0.05),
        );
        responder.bind(&stage, card, Interaction::Hover(hover));

        responder.pointer_enter(card, &mut animator, &stage, 1.0);
        let starts: Vec<f64> = tags
            .iter()
            .map(|tag| animator.begins_at(*tag).expect("scheduled"))
            .collect();
        assert!(starts[0] < starts[1] && starts[1] < starts[2]);
    }

    #[test]
    fn magnetic_button_follows_a_damped_pointer_offset() {
        let mut stage = Stage::new();
        let button = stage.insert(Rect::default());
        let mut animator = Animator::new();
        let mut responder = InteractionResponder::new();
        responder.bind(&stage, button, Interaction::Magnetic(Magnetic::default()));

        let sample = PointerSample {
            x: 150.0,
            y: 60.0,
            bounds: Rect::new(40.0, 50.0, 100.0, 40.0),
        };
        responder.pointer_move(button, sample, &mut animator, &stage, 0.0);
        animator.tick(1.0, &mut stage);
        assert!((stage.number(button, Property::X) - 5.0).abs() < 1e-9);
        assert!(stage.number(button, Property::Y).abs() < 1e-9);

        responder.pointer_leave(button, &mut animator, &stage, 1.0);
        animator.tick(2.0, &mut stage);
        assert_eq!(stage.number(button, Property::X), 0.0);
        assert_eq!(stage.number(button, Property::Y), 0.0);
    }

    #[test]
    fn unbound_elements_ignore_pointer_events() {
        let mut stage = Stage::new();
        let card = stage.insert(Rect::default());
        let mut animator = Animator::new();
        let mut responder = InteractionResponder::new();
        let handle = responder.bind(&stage, card, Interaction::Hover(lift_hover(card)));

        assert!(responder.unbind(handle));
        assert!(!responder.unbind(handle));
        responder.pointer_enter(card, &mut animator, &stage, 0.0);
        assert!(animator.is_empty());
    }

    #[test]
    fn binding_a_missing_element_is_inert() {
        let mut stage = Stage::new();
        let card = stage.insert(Rect::default());
        stage.remove(card);
        let mut responder = InteractionResponder::new();

        let handle = responder.bind(&stage, card, Interaction::Magnetic(Magnetic::default()));
        assert!(handle.is_inert());
        assert!(responder.is_empty());
    }
}
