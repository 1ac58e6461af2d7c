//! Per-section motion, built from a handful of shared pieces.
//!
//! A renderer collects the element ids of a section into one of the `*Rig`
//! structs and asks for its [`SectionSpec`]. Letter reveals, card decks,
//! card hovers and floats are parameterised once here; the section
//! functions only choose the numbers.

use super::ease::Ease;
use super::idle::IdleLoopSpec;
use super::interaction::{Hover, Interaction, Magnetic, Reaction};
use super::section::{Cue, SectionSpec};
use super::split::Particle;
use super::stage::{props, ElementId, Property, PropertyMap, Value};
use super::timeline::{EntranceSpec, Position, StateSpec, Timeline};
use super::trigger::{ReplayPolicy, Thresholds};

const CYAN_GLOW: &str = "0 0 30px rgba(6, 182, 212, 0.3), 0 0 60px rgba(6, 182, 212, 0.1)";
const CYAN_HALO: &str = "0 0 25px rgba(6, 182, 212, 0.4), 0 0 50px rgba(6, 182, 212, 0.1)";
const VIOLET_HALO: &str = "0 0 25px rgba(139, 92, 246, 0.4), 0 0 50px rgba(139, 92, 246, 0.1)";
const BUTTON_GLOW: &str = "0 0 20px rgba(6, 182, 212, 0.4)";
const NO_SHADOW: &str = "none";

const BACK_OUT: &str = "back.out(1.7)";
const BACK_OUT_STRONG: &str = "back.out(2)";
const POWER_OUT: &str = "power2.out";

fn curve(name: &str) -> Ease {
    Ease::parse(name).unwrap_or_default()
}

/// A container and the members that animate inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub anchor: ElementId,
    pub members: Vec<ElementId>,
}

impl Group {
    pub fn new(anchor: ElementId, members: Vec<ElementId>) -> Self {
        Self { anchor, members }
    }

    fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::once(self.anchor).chain(self.members.iter().copied())
    }
}

/// A hoverable card and the parts that react with it.
#[derive(Clone, Debug, PartialEq)]
pub struct CardParts {
    pub card: ElementId,
    pub glow: Option<ElementId>,
    pub content: Option<ElementId>,
    pub icon: Option<ElementId>,
    pub image: Option<ElementId>,
    pub particles: Option<ElementId>,
    pub label: Option<ElementId>,
    pub tags: Vec<ElementId>,
    pub buttons: Vec<ElementId>,
}

impl CardParts {
    pub fn new(card: ElementId) -> Self {
        Self {
            card,
            glow: None,
            content: None,
            icon: None,
            image: None,
            particles: None,
            label: None,
            tags: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn elements(&self) -> Vec<ElementId> {
        let mut elements = vec![self.card];
        elements.extend(
            [
                self.glow,
                self.content,
                self.icon,
                self.image,
                self.particles,
                self.label,
            ]
            .into_iter()
            .flatten(),
        );
        elements.extend(self.tags.iter().copied());
        elements.extend(self.buttons.iter().copied());
        elements
    }
}

/// How far a card lifts and what it lights up on hover.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverStyle {
    pub lift: f64,
    pub scale: f64,
    /// `(rotation_y, rotation_x)` in degrees.
    pub tilt: Option<(f64, f64)>,
    pub shadow: &'static str,
    pub duration: f64,
    pub glow_scale: f64,
    pub content_lift: f64,
    pub icon_scale: f64,
}

pub const ABOUT_HOVER: HoverStyle = HoverStyle {
    lift: 15.0,
    scale: 1.05,
    tilt: None,
    shadow: CYAN_GLOW,
    duration: 0.4,
    glow_scale: 1.1,
    content_lift: 5.0,
    icon_scale: 1.2,
};

pub const PROJECT_HOVER: HoverStyle = HoverStyle {
    lift: 15.0,
    scale: 1.05,
    tilt: Some((5.0, 2.0)),
    shadow: NO_SHADOW,
    duration: 0.5,
    glow_scale: 1.1,
    content_lift: 8.0,
    icon_scale: 1.2,
};

pub const SKILL_HOVER: HoverStyle = HoverStyle {
    lift: 10.0,
    scale: 1.1,
    tilt: Some((5.0, 2.0)),
    shadow: CYAN_HALO,
    duration: 0.4,
    glow_scale: 1.2,
    content_lift: 0.0,
    icon_scale: 1.3,
};

pub const CERTIFICATION_HOVER: HoverStyle = HoverStyle {
    lift: 10.0,
    scale: 1.05,
    tilt: Some((5.0, 2.0)),
    shadow: VIOLET_HALO,
    duration: 0.4,
    glow_scale: 1.1,
    content_lift: 5.0,
    icon_scale: 1.2,
};

/// Letters of a heading rising into place from `from`.
pub fn letter_reveal(
    letters: Vec<ElementId>,
    from: StateSpec,
    duration: f64,
    stagger: f64,
) -> EntranceSpec {
    EntranceSpec::new(letters)
        .from(from.set(Property::Opacity, 0.0))
        .to(settled())
        .duration(duration)
        .stagger(stagger)
        .ease(curve(BACK_OUT))
}

/// Cards dealt in one after another with an overshoot.
pub fn card_deck(
    cards: Vec<ElementId>,
    from: StateSpec,
    duration: f64,
    stagger: f64,
) -> EntranceSpec {
    EntranceSpec::new(cards)
        .from(from.set(Property::Opacity, 0.0))
        .to(settled())
        .duration(duration)
        .stagger(stagger)
        .ease(curve(BACK_OUT_STRONG))
}

/// Rest state for every property an entrance may displace.
fn settled() -> StateSpec {
    StateSpec::new()
        .set(Property::X, 0.0)
        .set(Property::Y, 0.0)
        .set(Property::Scale, 1.0)
        .set(Property::Rotation, 0.0)
        .set(Property::RotationX, 0.0)
        .set(Property::RotationY, 0.0)
        .set(Property::Opacity, 1.0)
}

/// One vertical float per target, each starting `step` after the previous.
pub fn floats(
    targets: &[ElementId],
    amplitude: f64,
    period: f64,
    delay: f64,
    step: f64,
) -> Vec<IdleLoopSpec> {
    targets
        .iter()
        .enumerate()
        .map(|(index, target)| {
            IdleLoopSpec::float(*target, amplitude, period, delay + step * index as f64)
        })
        .collect()
}

pub fn drift(target: ElementId, particle: &Particle) -> IdleLoopSpec {
    IdleLoopSpec::drift(
        target,
        particle.drift_x,
        particle.drift_y,
        particle.period,
        particle.delay,
    )
}

fn smooth(target: ElementId, to: PropertyMap, duration: f64) -> Reaction {
    Reaction::new(target, to, duration, curve(POWER_OUT))
}

fn spin(target: ElementId, scale: f64) -> Reaction {
    Reaction::new(
        target,
        props([(Property::Scale, scale), (Property::Rotation, 360.0)]),
        0.6,
        curve(BACK_OUT),
    )
}

pub fn card_hover(parts: &CardParts, style: HoverStyle) -> Hover {
    let duration = style.duration;
    let (tilt_y, tilt_x) = style.tilt.unwrap_or((0.0, 0.0));

    let mut lifted = props([
        (Property::Y, Value::Number(-style.lift)),
        (Property::Scale, Value::Number(style.scale)),
        (Property::Shadow, Value::from(style.shadow)),
    ]);
    let mut grounded = props([
        (Property::Y, Value::Number(0.0)),
        (Property::Scale, Value::Number(1.0)),
        (Property::Shadow, Value::from(NO_SHADOW)),
    ]);
    if style.tilt.is_some() {
        lifted.insert(Property::RotationY, Value::Number(tilt_y));
        lifted.insert(Property::RotationX, Value::Number(tilt_x));
        grounded.insert(Property::RotationY, Value::Number(0.0));
        grounded.insert(Property::RotationX, Value::Number(0.0));
    }

    let mut hover = Hover::new()
        .enter(smooth(parts.card, lifted, duration))
        .leave(smooth(parts.card, grounded, duration));

    if let Some(glow) = parts.glow {
        hover = hover
            .enter(smooth(
                glow,
                props([(Property::Opacity, 1.0), (Property::Scale, style.glow_scale)]),
                duration,
            ))
            .leave(smooth(
                glow,
                props([(Property::Opacity, 0.0), (Property::Scale, 1.0)]),
                duration,
            ));
    }
    if let Some(particles) = parts.particles {
        hover = hover
            .enter(smooth(
                particles,
                props([(Property::Opacity, 1.0), (Property::Scale, 1.0)]),
                duration,
            ))
            .leave(smooth(
                particles,
                props([(Property::Opacity, 0.0), (Property::Scale, 0.8)]),
                duration,
            ));
    }
    if let Some(image) = parts.image {
        hover = hover
            .enter(smooth(
                image,
                props([(Property::Scale, 1.1), (Property::Rotation, 2.0)]),
                duration,
            ))
            .leave(smooth(
                image,
                props([(Property::Scale, 1.0), (Property::Rotation, 0.0)]),
                duration,
            ));
    }
    if let (Some(content), true) = (parts.content, style.content_lift > 0.0) {
        hover = hover
            .enter(smooth(content, props([(Property::Y, -style.content_lift)]), duration))
            .leave(smooth(content, props([(Property::Y, 0.0)]), duration));
    }
    if let Some(icon) = parts.icon {
        hover = hover.enter(spin(icon, style.icon_scale)).leave(smooth(
            icon,
            props([(Property::Scale, 1.0), (Property::Rotation, 0.0)]),
            duration,
        ));
    }
    if let Some(label) = parts.label {
        hover = hover
            .enter(smooth(
                label,
                props([(Property::Opacity, 1.0), (Property::Y, 0.0), (Property::Scale, 1.1)]),
                duration,
            ))
            .leave(smooth(
                label,
                props([(Property::Opacity, 0.0), (Property::Y, 10.0), (Property::Scale, 1.0)]),
                duration,
            ));
    }
    if !parts.tags.is_empty() {
        hover = hover
            .enter(
                Reaction::many(
                    parts.tags.clone(),
                    props([(Property::Y, -5.0), (Property::Scale, 1.1)]),
                    0.4,
                    curve(BACK_OUT),
                )
                .stagger(0.05),
            )
            .leave(Reaction::many(
                parts.tags.clone(),
                props([(Property::Y, 0.0), (Property::Scale, 1.0)]),
                0.4,
                curve(POWER_OUT),
            ));
    }
    if !parts.buttons.is_empty() {
        hover = hover
            .enter(
                Reaction::many(
                    parts.buttons.clone(),
                    props([
                        (Property::Y, Value::Number(-5.0)),
                        (Property::Scale, Value::Number(1.05)),
                        (Property::Shadow, Value::from(BUTTON_GLOW)),
                    ]),
                    0.4,
                    curve(BACK_OUT),
                )
                .stagger(0.1),
            )
            .leave(Reaction::many(
                parts.buttons.clone(),
                props([
                    (Property::Y, Value::Number(0.0)),
                    (Property::Scale, Value::Number(1.0)),
                    (Property::Shadow, Value::from(NO_SHADOW)),
                ]),
                0.4,
                curve(POWER_OUT),
            ));
    }

    hover
}

/// Hidden resting values for card parts that only show on hover.
fn card_poses(spec: SectionSpec, parts: &CardParts) -> SectionSpec {
    let mut spec = spec;
    if let Some(glow) = parts.glow {
        spec = spec.pose(glow, props([(Property::Opacity, 0.0)]));
    }
    if let Some(particles) = parts.particles {
        spec = spec.pose(
            particles,
            props([(Property::Opacity, 0.0), (Property::Scale, 0.8)]),
        );
    }
    if let Some(label) = parts.label {
        spec = spec.pose(label, props([(Property::Opacity, 0.0), (Property::Y, 10.0)]));
    }
    spec
}

fn scroll_cue(anchor: ElementId, start_percent: f64) -> Cue {
    Cue::on_scroll(
        anchor,
        Thresholds::from_top(start_percent),
        ReplayPolicy::ReverseOnExit,
    )
}

/// Everything a section of hoverable, floating cards has in common.
#[derive(Clone, Copy, Debug)]
struct DeckMotion {
    start_percent: f64,
    duration: f64,
    stagger: f64,
    float_amplitude: f64,
    float_period: f64,
    float_delay: f64,
    float_step: f64,
    hover: HoverStyle,
}

fn deck_section(
    spec: SectionSpec,
    anchor: ElementId,
    cards: &[CardParts],
    from: StateSpec,
    motion: DeckMotion,
) -> SectionSpec {
    let faces: Vec<ElementId> = cards.iter().map(|parts| parts.card).collect();
    let entrance = card_deck(faces.clone(), from, motion.duration, motion.stagger);
    let idle = floats(
        &faces,
        motion.float_amplitude,
        motion.float_period,
        motion.float_delay,
        motion.float_step,
    );

    let mut spec = spec.cue(
        scroll_cue(anchor, motion.start_percent)
            .play(entrance)
            .idle(idle),
    );
    for parts in cards {
        spec = card_poses(spec.owns(parts.elements()), parts)
            .interact(parts.card, Interaction::Hover(card_hover(parts, motion.hover)));
    }
    spec
}

/// Every cue of a section fires off the section root; only the start line
/// differs.
fn heading_cue(
    root: ElementId,
    heading: &Group,
    from: StateSpec,
    duration: f64,
    stagger: f64,
) -> Cue {
    let letters = letter_reveal(heading.members.clone(), from, duration, stagger);
    scroll_cue(root, 80.0).play(letters)
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavRig {
    pub bar: ElementId,
    pub items: Vec<ElementId>,
}

pub fn navigation(rig: &NavRig) -> SectionSpec {
    let entrance = EntranceSpec::new(rig.items.clone())
        .from(StateSpec::new().set(Property::Y, -50.0).set(Property::Opacity, 0.0))
        .to(StateSpec::new().set(Property::Y, 0.0).set(Property::Opacity, 1.0))
        .duration(0.8)
        .stagger(0.1)
        .ease(curve(BACK_OUT));

    SectionSpec::new("navigation")
        .owns(std::iter::once(rig.bar))
        .owns(rig.items.iter().copied())
        .cue(Cue::on_mount().play(entrance))
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeroRig {
    pub root: ElementId,
    pub letters: Vec<ElementId>,
    pub title: ElementId,
    pub socials: Vec<ElementId>,
    pub contact_info: Option<ElementId>,
    pub floaters: Vec<(ElementId, Particle)>,
}

/// The intro plays on mount as one timeline: name, then title, then the
/// social icons, each overlapping the tail of the previous batch.
pub fn hero_intro(rig: &HeroRig) -> Timeline {
    let letters = EntranceSpec::new(rig.letters.clone())
        .from(
            StateSpec::new()
                .set(Property::Opacity, 0.0)
                .set(Property::Y, 30.0)
                .set(Property::Scale, 0.8),
        )
        .to(StateSpec::new()
            .set(Property::Opacity, 1.0)
            .set(Property::Y, 0.0)
            .set(Property::Scale, 1.0))
        .duration(0.8)
        .stagger(0.05)
        .ease(curve(BACK_OUT));
    let title = EntranceSpec::new(vec![rig.title])
        .from(
            StateSpec::new()
                .set(Property::Opacity, 0.0)
                .set(Property::Y, 20.0)
                .set(Property::Scale, 0.9),
        )
        .to(StateSpec::new()
            .set(Property::Opacity, 1.0)
            .set(Property::Y, 0.0)
            .set(Property::Scale, 1.0))
        .duration(0.6)
        .ease(curve(POWER_OUT));
    let socials = EntranceSpec::new(rig.socials.clone())
        .from(
            StateSpec::new()
                .set(Property::Opacity, 0.0)
                .set(Property::Scale, 0.0)
                .set(Property::Y, 20.0),
        )
        .to(StateSpec::new()
            .set(Property::Opacity, 1.0)
            .set(Property::Scale, 1.0)
            .set(Property::Y, 0.0))
        .duration(0.5)
        .stagger(0.1)
        .ease(curve(BACK_OUT));

    Timeline::new()
        .then(letters, Position::Start)
        .then(title, Position::Overlap(0.4))
        .then(socials, Position::Overlap(0.2))
}

pub fn hero(rig: &HeroRig) -> SectionSpec {
    let mut idle: Vec<IdleLoopSpec> = rig
        .floaters
        .iter()
        .map(|(target, particle)| drift(*target, particle))
        .collect();
    if let Some(info) = rig.contact_info {
        idle.push(IdleLoopSpec::float(info, -5.0, 3.0, 0.0));
    }

    let mut spec = SectionSpec::new("hero")
        .owns(std::iter::once(rig.root))
        .owns(rig.letters.iter().copied())
        .owns(std::iter::once(rig.title))
        .owns(rig.socials.iter().copied())
        .owns(rig.contact_info)
        .owns(rig.floaters.iter().map(|(target, _)| *target))
        .cue(Cue::on_mount().play(hero_intro(rig)).idle(idle));

    for icon in &rig.socials {
        let hover = Hover::new()
            .enter(smooth(*icon, props([(Property::Scale, 1.2)]), 0.2))
            .leave(smooth(*icon, props([(Property::Scale, 1.0)]), 0.2));
        spec = spec.interact(*icon, Interaction::Hover(hover));
    }
    spec
}

#[derive(Clone, Debug, PartialEq)]
pub struct AboutRig {
    pub root: ElementId,
    pub heading: Group,
    pub text: Group,
    pub cards: Vec<CardParts>,
}

pub fn about(rig: &AboutRig) -> SectionSpec {
    let lines = EntranceSpec::new(rig.text.members.clone())
        .from(
            StateSpec::new()
                .set(Property::Y, 60.0)
                .set(Property::Opacity, 0.0)
                .set(Property::Scale, 0.9)
                .set(Property::RotationX, -10.0),
        )
        .to(settled())
        .duration(1.0)
        .stagger(0.15)
        .ease(curve(BACK_OUT));

    let spec = SectionSpec::new("about")
        .owns(std::iter::once(rig.root))
        .owns(rig.heading.elements())
        .owns(rig.text.elements())
        .cue(heading_cue(
            rig.root,
            &rig.heading,
            StateSpec::new().set(Property::Y, 30.0).set(Property::RotationX, -90.0),
            0.8,
            0.05,
        ))
        .cue(
            scroll_cue(rig.root, 75.0)
                .play(lines)
                .idle(floats(&rig.text.members, -2.0, 4.0, 2.5, 0.2)),
        );

    deck_section(
        spec,
        rig.root,
        &rig.cards,
        StateSpec::new()
            .set_each(Property::Y, |index| 100.0 + index as f64 * 20.0)
            .set(Property::Scale, 0.7)
            .set(Property::RotationX, -15.0),
        DeckMotion {
            start_percent: 70.0,
            duration: 1.2,
            stagger: 0.3,
            float_amplitude: -5.0,
            float_period: 3.0,
            float_delay: 2.0,
            float_step: 0.3,
            hover: ABOUT_HOVER,
        },
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeckRig {
    pub root: ElementId,
    pub heading: Group,
    pub cards: Vec<CardParts>,
}

impl DeckRig {
    fn section(&self, name: &'static str) -> SectionSpec {
        SectionSpec::new(name)
            .owns(std::iter::once(self.root))
            .owns(self.heading.elements())
    }
}

pub fn projects(rig: &DeckRig) -> SectionSpec {
    let spec = rig.section("projects").cue(heading_cue(
        rig.root,
        &rig.heading,
        StateSpec::new().set(Property::Y, 50.0).set(Property::RotationY, -90.0),
        1.0,
        0.08,
    ));

    deck_section(
        spec,
        rig.root,
        &rig.cards,
        StateSpec::new()
            .set(Property::Y, 150.0)
            .set(Property::Scale, 0.6)
            .set(Property::RotationX, -30.0)
            .set(Property::RotationY, 15.0),
        DeckMotion {
            start_percent: 70.0,
            duration: 1.2,
            stagger: 0.3,
            float_amplitude: -4.0,
            float_period: 4.0,
            float_delay: 2.5,
            float_step: 0.4,
            hover: PROJECT_HOVER,
        },
    )
}

pub fn skills(rig: &DeckRig) -> SectionSpec {
    let spec = rig.section("skills").cue(heading_cue(
        rig.root,
        &rig.heading,
        StateSpec::new().set(Property::Y, 40.0).set(Property::Rotation, -10.0),
        0.8,
        0.06,
    ));

    deck_section(
        spec,
        rig.root,
        &rig.cards,
        StateSpec::new()
            .set(Property::Scale, 0.0)
            .set(Property::Y, 80.0)
            .set(Property::RotationX, -30.0)
            .set(Property::RotationY, 15.0),
        DeckMotion {
            start_percent: 75.0,
            duration: 1.0,
            stagger: 0.15,
            float_amplitude: -3.0,
            float_period: 3.5,
            float_delay: 2.0,
            float_step: 0.2,
            hover: SKILL_HOVER,
        },
    )
}

pub fn certifications(rig: &DeckRig) -> SectionSpec {
    let spec = rig.section("certifications").cue(heading_cue(
        rig.root,
        &rig.heading,
        StateSpec::new().set(Property::Y, 40.0).set(Property::Rotation, -10.0),
        0.8,
        0.06,
    ));

    deck_section(
        spec,
        rig.root,
        &rig.cards,
        StateSpec::new()
            .set(Property::Y, 80.0)
            .set(Property::Scale, 0.7)
            .set(Property::RotationX, -15.0),
        DeckMotion {
            start_percent: 70.0,
            duration: 1.0,
            stagger: 0.3,
            float_amplitude: -4.0,
            float_period: 4.0,
            float_delay: 2.5,
            float_step: 0.4,
            hover: CERTIFICATION_HOVER,
        },
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactRig {
    pub root: ElementId,
    pub heading: ElementId,
    pub form: Group,
    pub submit: ElementId,
}

pub fn contact(rig: &ContactRig, magnetic: Magnetic) -> SectionSpec {
    let heading = EntranceSpec::new(vec![rig.heading])
        .from(
            StateSpec::new()
                .set(Property::Opacity, 0.0)
                .set(Property::Y, 50.0)
                .set(Property::Scale, 0.9),
        )
        .to(settled())
        .duration(0.8)
        .ease(curve(POWER_OUT));
    let fields = EntranceSpec::new(rig.form.members.clone())
        .from(
            StateSpec::new()
                .set_each(Property::X, |index| if index % 2 == 0 { -50.0 } else { 50.0 })
                .set(Property::Opacity, 0.0)
                .set(Property::Scale, 0.9),
        )
        .to(settled())
        .duration(0.6)
        .stagger(0.2)
        .ease(curve(POWER_OUT));
    let submit = EntranceSpec::new(vec![rig.submit])
        .from(StateSpec::new().set(Property::Scale, 0.0).set(Property::Opacity, 0.0))
        .to(settled())
        .duration(0.6)
        .ease(curve(BACK_OUT));

    SectionSpec::new("contact")
        .owns([rig.root, rig.heading, rig.submit])
        .owns(rig.form.elements())
        .cue(scroll_cue(rig.root, 80.0).play(heading))
        .cue(scroll_cue(rig.root, 70.0).play(fields))
        .cue(scroll_cue(rig.root, 60.0).play(submit))
        .interact(rig.submit, Interaction::Magnetic(magnetic))
}

pub fn particle_field(root: ElementId, pieces: &[(ElementId, Particle)]) -> SectionSpec {
    let idle = pieces
        .iter()
        .map(|(target, particle)| drift(*target, particle));

    SectionSpec::new("particles")
        .owns(std::iter::once(root))
        .owns(pieces.iter().map(|(target, _)| *target))
        .cue(Cue::on_mount().idle(idle))
}
