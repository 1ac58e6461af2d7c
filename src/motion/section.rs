//! Section mount lifecycle.
//!
//! Every page section hands [`Motion`] one [`SectionSpec`]: the elements it
//! owns, the cues that play its entrances and arm its idle loops, and the
//! pointer interactions on its cards. [`Motion::mount`] wires them up in that
//! order and [`Motion::unmount`] tears them down in reverse, leaving nothing
//! behind. Scroll position reaches every section through the single viewport
//! kept here.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::animator::Animator;
use super::idle::{IdleDriver, IdleLoopSpec, LoopHandle};
use super::interaction::{Interaction, InteractionHandle, InteractionResponder, PointerSample};
use super::scroll::{landing_offset, ScrollGlide};
use super::stage::{ElementId, PropertyMap, Stage};
use super::timeline::{Sequence, Timeline};
use super::trigger::{
    ReplayPolicy, Thresholds, Transition, TriggerEvent, TriggerHandle, TriggerRegistry, Viewport,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gate {
    /// Plays as soon as the section mounts.
    OnMount,
    OnScroll {
        anchor: ElementId,
        thresholds: Thresholds,
        policy: ReplayPolicy,
    },
}

/// An entrance and the idle loops that start once it has been cued.
#[derive(Clone, Debug)]
pub struct Cue {
    pub gate: Gate,
    pub timeline: Option<Timeline>,
    pub idle: Vec<IdleLoopSpec>,
}

impl Cue {
    pub fn on_mount() -> Self {
        Self {
            gate: Gate::OnMount,
            timeline: None,
            idle: Vec::new(),
        }
    }

    pub fn on_scroll(anchor: ElementId, thresholds: Thresholds, policy: ReplayPolicy) -> Self {
        Self {
            gate: Gate::OnScroll {
                anchor,
                thresholds,
                policy,
            },
            timeline: None,
            idle: Vec::new(),
        }
    }

    pub fn play(mut self, timeline: impl Into<Timeline>) -> Self {
        self.timeline = Some(timeline.into());
        self
    }

    pub fn idle(mut self, loops: impl IntoIterator<Item = IdleLoopSpec>) -> Self {
        self.idle.extend(loops);
        self
    }
}

#[derive(Clone, Debug)]
pub struct SectionSpec {
    pub name: &'static str,
    pub elements: Vec<ElementId>,
    /// Resting values written at mount, before any cue.
    pub poses: Vec<(ElementId, PropertyMap)>,
    pub cues: Vec<Cue>,
    pub interactions: Vec<(ElementId, Interaction)>,
}

impl SectionSpec {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            elements: Vec::new(),
            poses: Vec::new(),
            cues: Vec::new(),
            interactions: Vec::new(),
        }
    }

    pub fn owns(mut self, elements: impl IntoIterator<Item = ElementId>) -> Self {
        self.elements.extend(elements);
        self
    }

    pub fn pose(mut self, element: ElementId, values: PropertyMap) -> Self {
        self.poses.push((element, values));
        self
    }

    pub fn cue(mut self, cue: Cue) -> Self {
        self.cues.push(cue);
        self
    }

    pub fn interact(mut self, element: ElementId, interaction: Interaction) -> Self {
        self.interactions.push((element, interaction));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionPhase {
    AwaitingEntry,
    Entered,
    Exited,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionOptions {
    /// Entrances jump straight to their settled state and idle loops are
    /// never armed.
    pub reduced_motion: bool,
}

/// Live handle counts, for leak checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    pub triggers: usize,
    pub idle_loops: usize,
    pub interactions: usize,
    pub tweens: usize,
    pub sections: usize,
    pub elements: usize,
}

struct ArmedCue {
    on_mount: bool,
    trigger: TriggerHandle,
    sequence: Option<Sequence>,
    idle: Vec<IdleLoopSpec>,
    loops: Vec<LoopHandle>,
    entered: bool,
}

struct MountedSection {
    name: &'static str,
    elements: Vec<ElementId>,
    cues: Vec<ArmedCue>,
    interactions: Vec<InteractionHandle>,
    ever_entered: bool,
}

impl MountedSection {
    fn phase(&self) -> SectionPhase {
        if self.cues.iter().any(|cue| cue.entered) {
            SectionPhase::Entered
        } else if self.ever_entered {
            SectionPhase::Exited
        } else {
            SectionPhase::AwaitingEntry
        }
    }
}

#[derive(Default)]
pub struct Motion {
    stage: Stage,
    animator: Animator,
    triggers: TriggerRegistry,
    idle: IdleDriver,
    responder: InteractionResponder,
    sections: BTreeMap<SectionId, MountedSection>,
    viewport: Viewport,
    glide: Option<ScrollGlide>,
    options: MotionOptions,
    next_section: u32,
}

impl Motion {
    pub fn new(options: MotionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> MotionOptions {
        self.options
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mount(&mut self, spec: SectionSpec, now: f64) -> SectionId {
        let id = SectionId(self.next_section);
        self.next_section += 1;

        for (element, values) in &spec.poses {
            self.stage.apply(*element, values);
        }

        let mut cues = Vec::with_capacity(spec.cues.len());
        for (index, cue) in spec.cues.into_iter().enumerate() {
            let on_mount = cue.gate == Gate::OnMount;
            let trigger = match cue.gate {
                Gate::OnMount => TriggerHandle::inert(),
                Gate::OnScroll {
                    anchor,
                    thresholds,
                    policy,
                } => self.triggers.register(&self.stage, anchor, thresholds, policy),
            };
            // A scroll cue without an anchor never fires, so its targets
            // start out at their end state instead of hidden.
            let stranded = !on_mount && trigger.is_inert();
            if stranded {
                debug!(section = spec.name, cue = index, "cue_anchor_missing");
            }
            let sequence = cue.timeline.as_ref().map(Timeline::build);
            if let Some(sequence) = &sequence {
                if self.options.reduced_motion || stranded {
                    sequence.finish(&mut self.stage);
                } else {
                    sequence.prime(&mut self.stage);
                }
            }
            cues.push(ArmedCue {
                on_mount,
                trigger,
                sequence,
                idle: cue.idle,
                loops: Vec::new(),
                entered: false,
            });
        }

        let mut section = MountedSection {
            name: spec.name,
            elements: spec.elements,
            cues,
            interactions: Vec::new(),
            ever_entered: false,
        };

        for cue in section.cues.iter_mut().filter(|cue| cue.on_mount) {
            self.enter(cue, now);
            section.ever_entered = true;
        }

        for (element, interaction) in spec.interactions {
            let handle = self.responder.bind(&self.stage, element, interaction);
            if !handle.is_inert() {
                section.interactions.push(handle);
            }
        }

        debug!(
            section = section.name,
            elements = section.elements.len(),
            cues = section.cues.len(),
            interactions = section.interactions.len(),
            "section_mount"
        );
        self.sections.insert(id, section);

        let events = self.triggers.evaluate(&self.stage, self.viewport);
        self.dispatch(events, now);
        id
    }

    /// Releases everything the section registered and removes its elements
    /// from the stage. Returns the removed elements.
    pub fn unmount(&mut self, id: SectionId) -> Vec<ElementId> {
        let Some(section) = self.sections.remove(&id) else {
            return Vec::new();
        };

        for handle in &section.interactions {
            self.responder.unbind(*handle);
        }
        for cue in &section.cues {
            for handle in &cue.loops {
                self.idle.stop(*handle);
            }
        }
        for cue in &section.cues {
            self.triggers.release(cue.trigger);
        }

        let mut removed = Vec::with_capacity(section.elements.len());
        for element in section.elements {
            self.animator.cancel(element);
            self.idle.stop_target(element);
            self.idle.release(element);
            if self.stage.remove(element) {
                removed.push(element);
            }
        }

        debug!(section = section.name, removed = removed.len(), "section_unmount");
        removed
    }

    /// `None` once the section has been unmounted.
    pub fn phase(&self, id: SectionId) -> Option<SectionPhase> {
        self.sections.get(&id).map(MountedSection::phase)
    }

    pub fn census(&self) -> Census {
        Census {
            triggers: self.triggers.len(),
            idle_loops: self.idle.len(),
            interactions: self.responder.len(),
            tweens: self.animator.len(),
            sections: self.sections.len(),
            elements: self.stage.len(),
        }
    }

    /// Publishes a new scroll position or viewport size to every binding.
    pub fn set_viewport(&mut self, viewport: Viewport, now: f64) {
        self.viewport = viewport;
        self.refresh(now);
    }

    /// Re-evaluates triggers after element bounds changed.
    pub fn refresh(&mut self, now: f64) {
        let events = self.triggers.evaluate(&self.stage, self.viewport);
        self.dispatch(events, now);
    }

    /// Advances tweens, idle loops and any scroll glide. Returns the scroll
    /// position the window should move to, while a glide is running.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        let scroll = match self.glide {
            Some(glide) => {
                if glide.is_done(now) {
                    self.glide = None;
                }
                Some(glide.sample(now))
            }
            None => None,
        };

        self.animator.tick(now, &mut self.stage);
        self.idle.tick(now, &mut self.stage, &self.animator);
        scroll
    }

    pub fn is_animating(&self) -> bool {
        self.glide.is_some() || !self.animator.is_empty() || !self.idle.is_empty()
    }

    /// Starts a smooth scroll that lands `element` just below the header.
    pub fn glide_to(&mut self, element: ElementId, now: f64) -> bool {
        let Some(rect) = self.stage.rect(element) else {
            return false;
        };
        let target = landing_offset(rect.top);
        if self.options.reduced_motion {
            self.glide = Some(ScrollGlide {
                duration: 0.0,
                ..ScrollGlide::new(self.viewport.scroll_y, target, now)
            });
        } else {
            self.glide = Some(ScrollGlide::new(self.viewport.scroll_y, target, now));
        }
        true
    }

    pub fn pointer_enter(&mut self, element: ElementId, now: f64) {
        if !self.responder.is_bound(element) {
            return;
        }
        self.idle.hold(element);
        self.responder
            .pointer_enter(element, &mut self.animator, &self.stage, now);
    }

    pub fn pointer_leave(&mut self, element: ElementId, now: f64) {
        if !self.responder.is_bound(element) {
            return;
        }
        self.idle.release(element);
        self.responder
            .pointer_leave(element, &mut self.animator, &self.stage, now);
    }

    pub fn pointer_move(&mut self, element: ElementId, sample: PointerSample, now: f64) {
        self.responder
            .pointer_move(element, sample, &mut self.animator, &self.stage, now);
    }

    fn dispatch(&mut self, events: Vec<TriggerEvent>, now: f64) {
        for event in events {
            let Some((section_id, index)) = self.cue_for(event.handle) else {
                continue;
            };
            let Some(mut section) = self.sections.remove(&section_id) else {
                continue;
            };

            match event.transition {
                Transition::Enter => {
                    self.enter(&mut section.cues[index], now);
                    section.ever_entered = true;
                }
                Transition::Exit => self.exit(&mut section.cues[index], now),
            }
            trace!(
                section = section.name,
                cue = index,
                transition = ?event.transition,
                "section_cue"
            );
            self.sections.insert(section_id, section);
        }
    }

    fn cue_for(&self, handle: TriggerHandle) -> Option<(SectionId, usize)> {
        self.sections.iter().find_map(|(id, section)| {
            section
                .cues
                .iter()
                .position(|cue| cue.trigger == handle)
                .map(|index| (*id, index))
        })
    }

    fn enter(&mut self, cue: &mut ArmedCue, now: f64) {
        cue.entered = true;
        if let Some(sequence) = &cue.sequence {
            if self.options.reduced_motion {
                sequence.finish(&mut self.stage);
            } else {
                sequence.play(&mut self.animator, &mut self.stage, now);
            }
        }
        if self.options.reduced_motion {
            return;
        }
        for spec in &cue.idle {
            let handle = self.idle.start(&self.stage, spec.clone(), now);
            if !handle.is_inert() {
                cue.loops.push(handle);
            }
        }
    }

    fn exit(&mut self, cue: &mut ArmedCue, now: f64) {
        cue.entered = false;
        for handle in cue.loops.drain(..) {
            self.idle.stop(handle);
        }
        if self.options.reduced_motion {
            return;
        }
        if let Some(sequence) = &cue.sequence {
            sequence.reverse(&mut self.animator, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::ease::Ease;
    use crate::motion::interaction::{Hover, Magnetic, Reaction};
    use crate::motion::stage::{props, Property, Rect};
    use crate::motion::timeline::{EntranceSpec, StateSpec};

    const VIEWPORT_HEIGHT: f64 = 1000.0;

    struct Fixture {
        motion: Motion,
        anchor: ElementId,
        cards: Vec<ElementId>,
        button: ElementId,
    }

    fn fixture(options: MotionOptions) -> Fixture {
        let mut motion = Motion::new(options);
        motion.set_viewport(Viewport::new(0.0, VIEWPORT_HEIGHT), 0.0);
        let stage = motion.stage_mut();
        let anchor = stage.insert(Rect::new(2000.0, 0.0, 1200.0, 800.0));
        let cards = (0..3)
            .map(|index| stage.insert(Rect::new(2100.0, f64::from(index) * 300.0, 280.0, 400.0)))
            .collect();
        let button = stage.insert(Rect::new(2600.0, 0.0, 160.0, 48.0));
        Fixture {
            motion,
            anchor,
            cards,
            button,
        }
    }

    fn deck(fixture: &Fixture) -> SectionSpec {
        let entrance = EntranceSpec::new(fixture.cards.clone())
            .from(StateSpec::new().set(Property::Opacity, 0.0).set(Property::Y, 80.0))
            .to(StateSpec::new().set(Property::Opacity, 1.0).set(Property::Y, 0.0))
            .duration(1.0)
            .stagger(0.3)
            .ease(Ease::back_out(2.0));
        let floats = fixture
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| IdleLoopSpec::float(*card, -4.0, 4.0, 2.5 + index as f64 * 0.4));

        let mut spec = SectionSpec::new("deck")
            .owns([fixture.anchor, fixture.button])
            .owns(fixture.cards.iter().copied())
            .cue(
                Cue::on_scroll(
                    fixture.anchor,
                    Thresholds::from_top(70.0),
                    ReplayPolicy::ReverseOnExit,
                )
                .play(entrance)
                .idle(floats),
            )
            .interact(fixture.button, Interaction::Magnetic(Magnetic::default()));
        for card in &fixture.cards {
            let hover = Hover::new()
                .enter(Reaction::new(*card, props([(Property::Y, -10.0)]), 0.4, Ease::power_out(2)))
                .leave(Reaction::new(*card, props([(Property::Y, 0.0)]), 0.4, Ease::power_out(2)));
            spec = spec.interact(*card, Interaction::Hover(hover));
        }
        spec
    }

    fn inside() -> Viewport {
        Viewport::new(1500.0, VIEWPORT_HEIGHT)
    }

    fn outside() -> Viewport {
        Viewport::new(0.0, VIEWPORT_HEIGHT)
    }

    fn starts(motion: &Motion, targets: &[ElementId]) -> Vec<f64> {
        targets
            .iter()
            .map(|target| motion.animator.begins_at(*target).expect("tween scheduled"))
            .collect()
    }

    #[test]
    fn mount_then_unmount_leaves_no_handles() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        let id = fixture.motion.mount(spec, 0.0);
        assert_eq!(fixture.motion.census().triggers, 1);
        assert_eq!(fixture.motion.census().interactions, 4);

        let removed = fixture.motion.unmount(id);
        assert_eq!(removed.len(), 5);
        assert_eq!(fixture.motion.census(), Census::default());
        assert_eq!(fixture.motion.phase(id), None);
    }

    #[test]
    fn unmount_mid_entrance_releases_tweens_and_loops() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        let id = fixture.motion.mount(spec, 0.0);
        fixture.motion.set_viewport(inside(), 0.5);
        fixture.motion.tick(0.9);
        assert!(fixture.motion.census().tweens > 0);
        assert_eq!(fixture.motion.census().idle_loops, 3);

        fixture.motion.unmount(id);
        assert_eq!(fixture.motion.census(), Census::default());
        assert_eq!(fixture.motion.tick(1.5), None);
    }

    #[test]
    fn entrance_waits_hidden_until_scrolled_into_view() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        let id = fixture.motion.mount(spec, 0.0);

        assert_eq!(fixture.motion.phase(id), Some(SectionPhase::AwaitingEntry));
        for card in &fixture.cards {
            assert_eq!(fixture.motion.stage().number(*card, Property::Opacity), 0.0);
        }

        fixture.motion.set_viewport(inside(), 1.0);
        assert_eq!(fixture.motion.phase(id), Some(SectionPhase::Entered));
        fixture.motion.tick(1.0 + 0.6 + 1.0 + 0.01);
        for card in &fixture.cards {
            assert_eq!(fixture.motion.stage().number(*card, Property::Opacity), 1.0);
        }
    }

    #[test]
    fn reentry_replays_with_the_same_stagger_order() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        let id = fixture.motion.mount(spec, 0.0);

        fixture.motion.set_viewport(inside(), 1.0);
        let first: Vec<f64> = starts(&fixture.motion, &fixture.cards)
            .into_iter()
            .map(|start| start - 1.0)
            .collect();
        fixture.motion.tick(5.0);

        fixture.motion.set_viewport(outside(), 6.0);
        assert_eq!(fixture.motion.phase(id), Some(SectionPhase::Exited));
        assert_eq!(fixture.motion.census().idle_loops, 0);
        fixture.motion.tick(10.0);

        fixture.motion.set_viewport(inside(), 11.0);
        assert_eq!(fixture.motion.phase(id), Some(SectionPhase::Entered));
        let second: Vec<f64> = starts(&fixture.motion, &fixture.cards)
            .into_iter()
            .map(|start| start - 11.0)
            .collect();

        assert_eq!(first.len(), second.len());
        for (before, after) in first.iter().zip(&second) {
            assert!((before - after).abs() < 1e-9);
        }
        assert!(second.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn idle_loops_arm_on_entry_only() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        fixture.motion.mount(spec, 0.0);
        assert_eq!(fixture.motion.census().idle_loops, 0);

        fixture.motion.set_viewport(inside(), 1.0);
        assert_eq!(fixture.motion.census().idle_loops, 3);

        fixture.motion.set_viewport(inside(), 2.0);
        assert_eq!(fixture.motion.census().idle_loops, 3);
        for card in &fixture.cards {
            assert_eq!(fixture.motion.idle.loops_on(*card), 1);
        }
    }

    #[test]
    fn hovered_card_keeps_its_pose_over_the_idle_float() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        fixture.motion.mount(spec, 0.0);
        fixture.motion.set_viewport(inside(), 0.0);
        fixture.motion.tick(5.0);

        let card = fixture.cards[0];
        fixture.motion.pointer_enter(card, 5.0);
        fixture.motion.tick(5.5);
        fixture.motion.tick(6.5);
        assert_eq!(fixture.motion.stage().number(card, Property::Y), -10.0);

        fixture.motion.pointer_leave(card, 6.5);
        fixture.motion.tick(7.0);
        assert_eq!(fixture.motion.stage().number(card, Property::Y), 0.0);
    }

    #[test]
    fn magnetic_button_is_driven_through_the_orchestrator() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        fixture.motion.mount(spec, 0.0);

        let sample = PointerSample {
            x: 180.0,
            y: 24.0,
            bounds: Rect::new(0.0, 0.0, 160.0, 48.0),
        };
        fixture.motion.pointer_move(fixture.button, sample, 0.0);
        fixture.motion.tick(1.0);
        assert!((fixture.motion.stage().number(fixture.button, Property::X) - 10.0).abs() < 1e-9);

        fixture.motion.pointer_leave(fixture.button, 1.0);
        fixture.motion.tick(2.0);
        assert_eq!(fixture.motion.stage().number(fixture.button, Property::X), 0.0);
    }

    #[test]
    fn mount_cues_play_immediately() {
        let mut fixture = fixture(MotionOptions::default());
        let entrance = EntranceSpec::new(fixture.cards.clone())
            .from(StateSpec::new().set(Property::Opacity, 0.0))
            .to(StateSpec::new().set(Property::Opacity, 1.0))
            .duration(0.5)
            .stagger(0.1);
        let spec = SectionSpec::new("hero")
            .owns(fixture.cards.iter().copied())
            .cue(Cue::on_mount().play(entrance));

        let id = fixture.motion.mount(spec, 0.0);
        assert_eq!(fixture.motion.phase(id), Some(SectionPhase::Entered));
        assert_eq!(fixture.motion.census().tweens, 3);
    }

    #[test]
    fn reduced_motion_settles_at_once_without_loops() {
        let mut fixture = fixture(MotionOptions {
            reduced_motion: true,
        });
        let spec = deck(&fixture);
        let id = fixture.motion.mount(spec, 0.0);

        for card in &fixture.cards {
            assert_eq!(fixture.motion.stage().number(*card, Property::Opacity), 1.0);
        }
        fixture.motion.set_viewport(inside(), 1.0);
        assert_eq!(fixture.motion.phase(id), Some(SectionPhase::Entered));
        let census = fixture.motion.census();
        assert_eq!(census.tweens, 0);
        assert_eq!(census.idle_loops, 0);
    }

    #[test]
    fn hover_before_a_staggered_entrance_still_reveals_the_card() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        fixture.motion.mount(spec, 0.0);
        fixture.motion.set_viewport(inside(), 1.0);

        let last = fixture.cards[2];
        fixture.motion.pointer_enter(last, 1.1);
        fixture.motion.tick(1.2);
        fixture.motion.pointer_leave(last, 1.3);
        for step in 0..=40 {
            fixture.motion.tick(1.3 + f64::from(step) * 0.1);
        }

        for card in &fixture.cards {
            assert_eq!(fixture.motion.stage().number(*card, Property::Opacity), 1.0);
        }
    }

    #[test]
    fn missing_anchor_never_fires() {
        let mut fixture = fixture(MotionOptions::default());
        let spec = deck(&fixture);
        fixture.motion.stage_mut().remove(fixture.anchor);

        let id = fixture.motion.mount(spec, 0.0);
        fixture.motion.set_viewport(inside(), 1.0);
        fixture.motion.tick(3.0);
        assert_eq!(fixture.motion.census().triggers, 0);
        assert_eq!(fixture.motion.phase(id), Some(SectionPhase::AwaitingEntry));
        for card in &fixture.cards {
            assert_eq!(fixture.motion.stage().number(*card, Property::Opacity), 1.0);
            assert_eq!(fixture.motion.stage().number(*card, Property::Y), 0.0);
        }
        assert_eq!(fixture.motion.unmount(id).len(), 4);
    }

    #[test]
    fn glide_reports_scroll_positions_until_it_lands() {
        let mut fixture = fixture(MotionOptions::default());
        assert!(fixture.motion.glide_to(fixture.anchor, 0.0));

        let midway = fixture.motion.tick(0.75).expect("glide running");
        assert!((midway - 960.0).abs() < 1e-9);
        assert_eq!(fixture.motion.tick(1.5), Some(1920.0));
        assert_eq!(fixture.motion.tick(1.6), None);

        fixture.motion.stage_mut().remove(fixture.anchor);
        assert!(!fixture.motion.glide_to(fixture.anchor, 2.0));
    }
}
