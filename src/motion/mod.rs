//! Scroll-driven animation orchestration.
//!
//! Everything in here is plain data and arithmetic over a [`Stage`]; nothing
//! touches the DOM. The browser glue in `frontend` feeds scroll, pointer and
//! frame events in and copies dirty styles out.

pub mod animator;
pub mod choreography;
pub mod ease;
pub mod idle;
pub mod interaction;
pub mod scroll;
pub mod section;
pub mod split;
pub mod stage;
pub mod timeline;
pub mod trigger;

pub use animator::{Animator, Tween};
pub use ease::Ease;
pub use idle::{IdleDriver, IdleLoopSpec, LoopHandle};
pub use interaction::{
    Hover, Interaction, InteractionHandle, InteractionResponder, Magnetic, PointerSample, Reaction,
};
pub use section::{Census, Cue, Motion, MotionOptions, SectionId, SectionPhase, SectionSpec};
pub use stage::{ElementId, Property, PropertyMap, Rect, Stage, Value};
pub use timeline::{EntranceSpec, Position, Sequence, StateSpec, Timeline};
pub use trigger::{ReplayPolicy, Thresholds, TriggerHandle, TriggerRegistry, Viewport};
