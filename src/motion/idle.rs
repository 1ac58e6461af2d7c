//! Endless back-and-forth motion on settled elements.

use std::collections::{BTreeMap, BTreeSet};

use super::animator::Animator;
use super::ease::Ease;
use super::stage::{ElementId, Property, Stage, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct IdleLoopSpec {
    pub target: ElementId,
    /// Offset from the rest position at the far end of each swing.
    pub amplitude: BTreeMap<Property, f64>,
    /// Seconds per half-cycle (one swing out, or one swing back).
    pub period: f64,
    pub start_delay: f64,
    pub ease: Ease,
    /// `false` wraps back to the rest position at the end of every swing.
    pub yoyo: bool,
}

impl IdleLoopSpec {
    /// The gentle vertical float every card and line of text uses.
    pub fn float(target: ElementId, amplitude: f64, period: f64, start_delay: f64) -> Self {
        Self {
            target,
            amplitude: BTreeMap::from([(Property::Y, amplitude)]),
            period,
            start_delay,
            ease: Ease::power_in_out(1),
            yoyo: true,
        }
    }

    /// Linear one-way drift that restarts from the origin.
    pub fn drift(target: ElementId, dx: f64, dy: f64, period: f64, start_delay: f64) -> Self {
        Self {
            target,
            amplitude: BTreeMap::from([(Property::X, dx), (Property::Y, dy)]),
            period,
            start_delay,
            ease: Ease::Linear,
            yoyo: false,
        }
    }

    /// Same loop, starting `seconds` later.
    pub fn delayed(mut self, seconds: f64) -> Self {
        self.start_delay += seconds;
        self
    }

    fn offset_at(&self, elapsed: f64) -> f64 {
        if self.period <= 0.0 {
            return 0.0;
        }
        let swings = elapsed / self.period;
        let swing = swings.floor();
        let within = swings - swing;
        let outbound = !self.yoyo || (swing as u64) % 2 == 0;

        if outbound {
            self.ease.apply(within)
        } else {
            self.ease.apply(1.0 - within)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoopHandle(Option<u32>);

impl LoopHandle {
    pub fn inert() -> Self {
        Self(None)
    }

    pub fn is_inert(self) -> bool {
        self.0.is_none()
    }
}

struct IdleLoop {
    spec: IdleLoopSpec,
    cycle_origin: f64,
    rest: Option<BTreeMap<Property, f64>>,
    yielded: bool,
}

/// Runs at most one loop per target.
#[derive(Default)]
pub struct IdleDriver {
    loops: BTreeMap<u32, IdleLoop>,
    by_target: BTreeMap<ElementId, u32>,
    held: BTreeSet<ElementId>,
    next_id: u32,
}

impl IdleDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a loop, replacing any loop already running on the same target.
    pub fn start(&mut self, stage: &Stage, spec: IdleLoopSpec, now: f64) -> LoopHandle {
        if !stage.contains(spec.target) {
            return LoopHandle::inert();
        }

        self.stop_target(spec.target);

        let id = self.next_id;
        self.next_id += 1;
        self.by_target.insert(spec.target, id);
        self.loops.insert(
            id,
            IdleLoop {
                cycle_origin: now + spec.start_delay.max(0.0),
                spec,
                rest: None,
                yielded: false,
            },
        );
        LoopHandle(Some(id))
    }

    pub fn stop(&mut self, handle: LoopHandle) -> bool {
        let Some(id) = handle.0 else {
            return false;
        };
        let Some(stopped) = self.loops.remove(&id) else {
            return false;
        };
        if self.by_target.get(&stopped.spec.target) == Some(&id) {
            self.by_target.remove(&stopped.spec.target);
        }
        true
    }

    pub fn stop_target(&mut self, target: ElementId) -> bool {
        match self.by_target.remove(&target) {
            Some(id) => self.loops.remove(&id).is_some(),
            None => false,
        }
    }

    pub fn is_running(&self, handle: LoopHandle) -> bool {
        handle.0.is_some_and(|id| self.loops.contains_key(&id))
    }

    pub fn loops_on(&self, target: ElementId) -> usize {
        self.loops
            .values()
            .filter(|running| running.spec.target == target)
            .count()
    }

    /// Pauses the loop on `target` the same way a tween does, until
    /// [`IdleDriver::release`] is called. Used while a pointer rests on an
    /// element whose hover pose would otherwise be overwritten.
    pub fn hold(&mut self, target: ElementId) {
        self.held.insert(target);
    }

    pub fn release(&mut self, target: ElementId) -> bool {
        self.held.remove(&target)
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Writes the current swing of every loop. A loop whose target is held
    /// by a one-shot tween yields; once the tween retires the loop restarts
    /// its swing from the rest position.
    pub fn tick(&mut self, now: f64, stage: &mut Stage, animator: &Animator) {
        let mut orphaned = Vec::new();

        for (id, running) in &mut self.loops {
            let target = running.spec.target;
            if !stage.contains(target) {
                orphaned.push(*id);
                continue;
            }
            if now < running.cycle_origin {
                continue;
            }
            if animator.is_busy(target) || self.held.contains(&target) {
                running.yielded = true;
                continue;
            }
            if running.yielded {
                running.yielded = false;
                running.cycle_origin = now;
            }

            let rest = running.rest.get_or_insert_with(|| {
                running
                    .spec
                    .amplitude
                    .keys()
                    .map(|property| (*property, stage.number(target, *property)))
                    .collect()
            });

            let swing = running.spec.offset_at(now - running.cycle_origin);
            for (property, amplitude) in &running.spec.amplitude {
                let base = rest.get(property).copied().unwrap_or_default();
                stage.set(target, *property, Value::Number(base + amplitude * swing));
            }
        }

        for id in orphaned {
            if let Some(stopped) = self.loops.remove(&id) {
                self.by_target.remove(&stopped.spec.target);
                self.held.remove(&stopped.spec.target);
            }
        }
    }
}
