//! Staggered entrance sequences.
//!
//! An [`EntranceSpec`] describes a batch of targets moving from one state to
//! another; [`Timeline`] chains several of them with relative positions. Both
//! resolve into a [`Sequence`] of per-target tracks with absolute offsets.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::animator::{Animator, Tween};
use super::ease::Ease;
use super::stage::{ElementId, Property, PropertyMap, Stage, Value};

/// Smallest gap kept between two consecutive starts inside one batch.
pub const MIN_STAGGER_GAP: f64 = 1e-6;

type PerIndex = Rc<dyn Fn(usize) -> f64>;

#[derive(Clone)]
pub enum Setting {
    Fixed(Value),
    PerIndex(PerIndex),
}

impl Setting {
    fn resolve(&self, index: usize) -> Value {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::PerIndex(compute) => Value::Number(compute(index)),
        }
    }
}

impl fmt::Debug for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::PerIndex(_) => f.write_str("PerIndex(..)"),
        }
    }
}

/// Property state where any property may depend on the target's index.
#[derive(Clone, Debug, Default)]
pub struct StateSpec {
    settings: BTreeMap<Property, Setting>,
}

impl StateSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: Property, value: impl Into<Value>) -> Self {
        self.settings.insert(property, Setting::Fixed(value.into()));
        self
    }

    pub fn set_each(
        mut self,
        property: Property,
        compute: impl Fn(usize) -> f64 + 'static,
    ) -> Self {
        self.settings
            .insert(property, Setting::PerIndex(Rc::new(compute)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn resolve(&self, index: usize) -> PropertyMap {
        self.settings
            .iter()
            .map(|(property, setting)| (*property, setting.resolve(index)))
            .collect()
    }
}

#[derive(Clone)]
pub enum Stagger {
    /// Target `i` starts `i * delta` after the batch.
    Each(f64),
    /// Target `i` starts at the returned offset.
    By(PerIndex),
}

impl Stagger {
    pub fn by(offset: impl Fn(usize) -> f64 + 'static) -> Self {
        Self::By(Rc::new(offset))
    }

    fn offset(&self, index: usize) -> f64 {
        match self {
            Self::Each(delta) => delta * index as f64,
            Self::By(offset) => offset(index),
        }
    }
}

impl Default for Stagger {
    fn default() -> Self {
        Self::Each(0.0)
    }
}

impl fmt::Debug for Stagger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Each(delta) => f.debug_tuple("Each").field(delta).finish(),
            Self::By(_) => f.write_str("By(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntranceSpec {
    pub targets: Vec<ElementId>,
    pub from: StateSpec,
    pub to: StateSpec,
    pub duration: f64,
    pub stagger: Stagger,
    pub ease: Ease,
}

impl EntranceSpec {
    pub fn new(targets: Vec<ElementId>) -> Self {
        Self {
            targets,
            from: StateSpec::new(),
            to: StateSpec::new(),
            duration: 0.5,
            stagger: Stagger::default(),
            ease: Ease::default(),
        }
    }

    pub fn from(mut self, from: StateSpec) -> Self {
        self.from = from;
        self
    }

    pub fn to(mut self, to: StateSpec) -> Self {
        self.to = to;
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn stagger(mut self, delta: f64) -> Self {
        self.stagger = Stagger::Each(delta.max(0.0));
        self
    }

    pub fn stagger_by(mut self, offset: impl Fn(usize) -> f64 + 'static) -> Self {
        self.stagger = Stagger::by(offset);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Where a segment starts relative to the timeline built so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    Start,
    AfterPrevious,
    /// Starts this many seconds before the previous segment ends.
    Overlap(f64),
    At(f64),
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    segments: Vec<(EntranceSpec, Position)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, spec: EntranceSpec, position: Position) -> Self {
        self.segments.push((spec, position));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn build(&self) -> Sequence {
        let mut tracks = Vec::new();
        let mut previous_end = 0.0_f64;

        for (spec, position) in &self.segments {
            let segment_start = match *position {
                Position::Start => 0.0,
                Position::AfterPrevious => previous_end,
                Position::Overlap(seconds) => (previous_end - seconds).max(0.0),
                Position::At(seconds) => seconds.max(0.0),
            };
            let segment = resolve_segment(spec, segment_start);
            previous_end = segment
                .iter()
                .map(|track| track.offset + track.duration)
                .fold(segment_start, f64::max);
            tracks.extend(segment);
        }

        Sequence { tracks }
    }
}

impl From<EntranceSpec> for Timeline {
    fn from(spec: EntranceSpec) -> Self {
        Timeline::new().then(spec, Position::Start)
    }
}

pub fn build(spec: EntranceSpec) -> Sequence {
    Timeline::from(spec).build()
}

fn resolve_segment(spec: &EntranceSpec, segment_start: f64) -> Vec<Track> {
    let mut previous: Option<f64> = None;

    spec.targets
        .iter()
        .enumerate()
        .map(|(index, target)| {
            let raw = segment_start + spec.stagger.offset(index).max(0.0);
            let offset = match previous {
                Some(before) if raw <= before => before + MIN_STAGGER_GAP,
                _ => raw,
            };
            previous = Some(offset);

            Track {
                target: *target,
                from: spec.from.resolve(index),
                to: spec.to.resolve(index),
                offset,
                duration: spec.duration,
                ease: spec.ease,
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub target: ElementId,
    pub from: PropertyMap,
    pub to: PropertyMap,
    pub offset: f64,
    pub duration: f64,
    pub ease: Ease,
}

/// A resolved, replayable set of tracks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    tracks: Vec<Track>,
}

impl Sequence {
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.tracks.iter().map(|track| track.target)
    }

    pub fn offsets(&self) -> Vec<(ElementId, f64)> {
        self.tracks
            .iter()
            .map(|track| (track.target, track.offset))
            .collect()
    }

    pub fn duration(&self) -> f64 {
        self.tracks
            .iter()
            .map(|track| track.offset + track.duration)
            .fold(0.0, f64::max)
    }

    /// Puts every target in its pre-entry state.
    pub fn prime(&self, stage: &mut Stage) {
        for track in &self.tracks {
            stage.apply(track.target, &track.from);
        }
    }

    /// Jumps every target to its settled state.
    pub fn finish(&self, stage: &mut Stage) {
        for track in &self.tracks {
            stage.apply(track.target, &track.to);
        }
    }

    pub fn play(&self, animator: &mut Animator, stage: &mut Stage, now: f64) {
        self.prime(stage);
        for track in &self.tracks {
            animator.start(Tween::from_to(
                track.target,
                track.from.clone(),
                track.to.clone(),
                now + track.offset,
                track.duration,
                track.ease,
            ));
        }
    }

    /// Plays the sequence backwards from the live values: the last target to
    /// settle is the first to leave.
    pub fn reverse(&self, animator: &mut Animator, now: f64) {
        let total = self.duration();
        for track in &self.tracks {
            let mirrored = total - (track.offset + track.duration);
            animator.start(Tween::to(
                track.target,
                track.from.clone(),
                now + mirrored.max(0.0),
                track.duration,
                track.ease,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::stage::Rect;

    fn targets(stage: &mut Stage, count: usize) -> Vec<ElementId> {
        (0..count).map(|_| stage.insert(Rect::default())).collect()
    }

    fn fade_up(ids: Vec<ElementId>) -> EntranceSpec {
        EntranceSpec::new(ids)
            .from(StateSpec::new().set(Property::Opacity, 0.0).set(Property::Y, 30.0))
            .to(StateSpec::new().set(Property::Opacity, 1.0).set(Property::Y, 0.0))
            .duration(0.8)
            .stagger(0.05)
            .ease(Ease::back_out(1.7))
    }

    #[test]
    fn linear_stagger_orders_starts_strictly() {
        let mut stage = Stage::new();
        let ids = targets(&mut stage, 6);
        let sequence = build(fade_up(ids.clone()));

        let offsets = sequence.offsets();
        assert_eq!(offsets.len(), 6);
        for (index, (target, offset)) in offsets.iter().enumerate() {
            assert_eq!(*target, ids[index]);
            assert!(*offset >= index as f64 * 0.05 - 1e-12);
            if let Some((_, next)) = offsets.get(index + 1) {
                assert!(offset < next);
            }
        }
    }

    #[test]
    fn per_index_settings_resolve_for_each_target() {
        let mut stage = Stage::new();
        let ids = targets(&mut stage, 4);
        let spec = EntranceSpec::new(ids)
            .from(
                StateSpec::new()
                    .set_each(Property::X, |index| if index % 2 == 0 { -50.0 } else { 50.0 })
                    .set_each(Property::Y, |index| 100.0 + index as f64 * 20.0),
            )
            .to(StateSpec::new().set(Property::X, 0.0).set(Property::Y, 0.0));

        let sequence = build(spec);
        let xs: Vec<f64> = sequence
            .tracks()
            .iter()
            .map(|track| track.from[&Property::X].as_number().unwrap_or_default())
            .collect();
        let ys: Vec<f64> = sequence
            .tracks()
            .iter()
            .map(|track| track.from[&Property::Y].as_number().unwrap_or_default())
            .collect();

        assert_eq!(xs, vec![-50.0, 50.0, -50.0, 50.0]);
        assert_eq!(ys, vec![100.0, 120.0, 140.0, 160.0]);
    }

    #[test]
    fn non_increasing_custom_stagger_is_forced_forward() {
        let mut stage = Stage::new();
        let ids = targets(&mut stage, 3);
        let sequence = build(EntranceSpec::new(ids).stagger_by(|_| 0.2));

        let offsets: Vec<f64> = sequence.offsets().into_iter().map(|(_, offset)| offset).collect();
        assert!(offsets[0] < offsets[1] && offsets[1] < offsets[2]);
        assert!((offsets[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn overlapping_segments_start_before_the_previous_one_ends() {
        let mut stage = Stage::new();
        let letters = targets(&mut stage, 3);
        let title = targets(&mut stage, 1);
        let timeline = Timeline::new()
            .then(fade_up(letters), Position::Start)
            .then(EntranceSpec::new(title.clone()).duration(0.6), Position::Overlap(0.4));

        let sequence = timeline.build();
        let letters_end = 2.0 * 0.05 + 0.8;
        let title_offset = sequence
            .offsets()
            .into_iter()
            .find(|(target, _)| *target == title[0])
            .map(|(_, offset)| offset)
            .expect("title track");

        assert!((title_offset - (letters_end - 0.4)).abs() < 1e-9);
        assert!((sequence.duration() - (title_offset + 0.6)).abs() < 1e-9);
    }

    #[test]
    fn playing_primes_hidden_state_and_settles_on_target() {
        let mut stage = Stage::new();
        let ids = targets(&mut stage, 3);
        let sequence = build(fade_up(ids.clone()));
        let mut animator = Animator::new();

        sequence.play(&mut animator, &mut stage, 10.0);
        for id in &ids {
            assert_eq!(stage.number(*id, Property::Opacity), 0.0);
        }

        animator.tick(10.0 + sequence.duration() + 0.01, &mut stage);
        for id in &ids {
            assert_eq!(stage.number(*id, Property::Opacity), 1.0);
            assert_eq!(stage.number(*id, Property::Y), 0.0);
        }
        assert!(animator.is_empty());
    }

    #[test]
    fn reverse_mirrors_the_stagger() {
        let mut stage = Stage::new();
        let ids = targets(&mut stage, 3);
        let sequence = build(fade_up(ids.clone()));
        let mut animator = Animator::new();

        sequence.reverse(&mut animator, 0.0);
        let first = animator.begins_at(ids[0]).expect("first scheduled");
        let last = animator.begins_at(ids[2]).expect("last scheduled");
        assert!(last < first);
        assert_eq!(last, 0.0);

        animator.tick(sequence.duration() + 0.01, &mut stage);
        for id in &ids {
            assert_eq!(stage.number(*id, Property::Opacity), 0.0);
            assert_eq!(stage.number(*id, Property::Y), 30.0);
        }
    }
}
