//! One-shot tweens with a single writer per element.

use std::collections::BTreeMap;

use super::ease::Ease;
use super::stage::{ElementId, PropertyMap, Stage};

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: ElementId,
    /// Explicit start state. `None` captures the live values when the tween
    /// begins.
    pub from: Option<PropertyMap>,
    pub to: PropertyMap,
    pub begins_at: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn to(
        target: ElementId,
        to: PropertyMap,
        begins_at: f64,
        duration: f64,
        ease: Ease,
    ) -> Self {
        Self {
            target,
            from: None,
            to,
            begins_at,
            duration,
            ease,
        }
    }

    pub fn from_to(
        target: ElementId,
        from: PropertyMap,
        to: PropertyMap,
        begins_at: f64,
        duration: f64,
        ease: Ease,
    ) -> Self {
        Self {
            target,
            from: Some(from),
            to,
            begins_at,
            duration,
            ease,
        }
    }

    pub fn ends_at(&self) -> f64 {
        self.begins_at + self.duration.max(0.0)
    }
}

struct Slot {
    tween: Tween,
    origin: Option<PropertyMap>,
    done: bool,
}

impl Slot {
    /// Drops the properties another writer has taken over.
    fn yield_to(&mut self, taken: &PropertyMap) {
        for property in taken.keys() {
            self.tween.to.remove(property);
            if let Some(from) = self.tween.from.as_mut() {
                from.remove(property);
            }
            if let Some(origin) = self.origin.as_mut() {
                origin.remove(property);
            }
        }
    }
}

/// Owns every in-flight tween. Ownership is per property: a new tween on an
/// element takes over the properties it writes, and whatever the earlier
/// tweens on that element still animate keeps running on its own timing.
/// Values are never blended across writers.
#[derive(Default)]
pub struct Animator {
    slots: BTreeMap<ElementId, Vec<Slot>>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, tween: Tween) {
        let lanes = self.slots.entry(tween.target).or_default();
        for lane in lanes.iter_mut() {
            lane.yield_to(&tween.to);
        }
        lanes.retain(|lane| !lane.tween.to.is_empty());
        lanes.push(Slot {
            tween,
            origin: None,
            done: false,
        });
    }

    pub fn cancel(&mut self, target: ElementId) -> bool {
        self.slots.remove(&target).is_some()
    }

    pub fn is_busy(&self, target: ElementId) -> bool {
        self.slots.contains_key(&target)
    }

    /// Begin time of the latest tween started on `target`.
    pub fn begins_at(&self, target: ElementId) -> Option<f64> {
        self.slots
            .get(&target)
            .and_then(|lanes| lanes.last())
            .map(|slot| slot.tween.begins_at)
    }

    /// Number of in-flight tweens, counting each surviving partial tween.
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Advances every tween that has begun and returns the targets whose
    /// tween began during this call, in begin order.
    pub fn tick(&mut self, now: f64, stage: &mut Stage) -> Vec<ElementId> {
        let mut order: Vec<(f64, ElementId, usize)> = self
            .slots
            .iter()
            .flat_map(|(target, lanes)| {
                lanes
                    .iter()
                    .enumerate()
                    .map(move |(lane, slot)| (slot.tween.begins_at, *target, lane))
            })
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

        let mut begun = Vec::new();

        for (_, target, lane) in order {
            if !stage.contains(target) {
                self.slots.remove(&target);
                continue;
            }
            let Some(slot) = self.slots.get_mut(&target).and_then(|lanes| lanes.get_mut(lane))
            else {
                continue;
            };

            if now < slot.tween.begins_at {
                continue;
            }

            if slot.origin.is_none() {
                let origin = match slot.tween.from.clone() {
                    Some(from) => {
                        stage.apply(target, &from);
                        let mut origin = stage.capture(target, &slot.tween.to);
                        origin.extend(from);
                        origin
                    }
                    None => stage.capture(target, &slot.tween.to),
                };
                if !begun.contains(&target) {
                    begun.push(target);
                }
                slot.origin = Some(origin);
            }
            let Some(origin) = slot.origin.as_ref() else {
                continue;
            };

            let progress = if slot.tween.duration <= 0.0 {
                1.0
            } else {
                ((now - slot.tween.begins_at) / slot.tween.duration).clamp(0.0, 1.0)
            };
            let complete = progress >= 1.0;
            let eased = slot.tween.ease.apply(progress);

            for (property, target_value) in &slot.tween.to {
                let start = origin
                    .get(property)
                    .cloned()
                    .unwrap_or_else(|| property.rest());
                stage.set(target, *property, start.blend(target_value, eased, complete));
            }

            slot.done = complete;
        }

        self.slots.retain(|_, lanes| {
            lanes.retain(|slot| !slot.done);
            !lanes.is_empty()
        });

        begun
    }
}
