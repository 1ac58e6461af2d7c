//! Animatable elements and their live property values.

use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

/// Axis-aligned bounds. Anchors are stored in document coordinates; pointer
/// samples carry viewport (client) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    X,
    Y,
    Scale,
    Rotation,
    RotationX,
    RotationY,
    Opacity,
    Shadow,
}

impl Property {
    pub fn rest(self) -> Value {
        match self {
            Self::Scale | Self::Opacity => Value::Number(1.0),
            Self::Shadow => Value::Text("none".to_string()),
            _ => Value::Number(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Numbers blend on the eased progress; anything else holds `self` until
    /// the tween completes.
    pub fn blend(&self, target: &Value, eased: f64, complete: bool) -> Value {
        match (self, target) {
            (Self::Number(from), Self::Number(to)) if !complete => {
                Self::Number(from + (to - from) * eased)
            }
            _ if complete => target.clone(),
            _ => self.clone(),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

pub type PropertyMap = BTreeMap<Property, Value>;

/// Builds a property map from `(property, value)` pairs.
pub fn props<V: Into<Value>>(pairs: impl IntoIterator<Item = (Property, V)>) -> PropertyMap {
    pairs
        .into_iter()
        .map(|(property, value)| (property, value.into()))
        .collect()
}

#[derive(Clone, Debug, Default)]
struct Element {
    rect: Rect,
    props: PropertyMap,
}

#[derive(Default)]
pub struct Stage {
    elements: HashMap<ElementId, Element>,
    dirty: BTreeSet<ElementId>,
    next_id: u32,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rect: Rect) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(
            id,
            Element {
                rect,
                props: PropertyMap::new(),
            },
        );
        id
    }

    pub fn remove(&mut self, id: ElementId) -> bool {
        self.dirty.remove(&id);
        self.elements.remove(&id).is_some()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys().copied()
    }

    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(&id).map(|element| element.rect)
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.rect = rect;
        }
    }

    /// Live value, or the property's rest value when nothing has written it.
    pub fn value(&self, id: ElementId, property: Property) -> Value {
        self.elements
            .get(&id)
            .and_then(|element| element.props.get(&property).cloned())
            .unwrap_or_else(|| property.rest())
    }

    pub fn number(&self, id: ElementId, property: Property) -> f64 {
        self.value(id, property)
            .as_number()
            .or_else(|| property.rest().as_number())
            .unwrap_or(0.0)
    }

    pub fn props(&self, id: ElementId) -> Option<&PropertyMap> {
        self.elements.get(&id).map(|element| &element.props)
    }

    /// Snapshot of the live values for the properties named in `keys`.
    pub fn capture(&self, id: ElementId, keys: &PropertyMap) -> PropertyMap {
        keys.keys()
            .map(|property| (*property, self.value(id, *property)))
            .collect()
    }

    pub fn set(&mut self, id: ElementId, property: Property, value: Value) {
        if let Some(element) = self.elements.get_mut(&id) {
            if element.props.get(&property) != Some(&value) {
                element.props.insert(property, value);
                self.dirty.insert(id);
            }
        }
    }

    pub fn apply(&mut self, id: ElementId, values: &PropertyMap) {
        for (property, value) in values {
            self.set(id, *property, value.clone());
        }
    }

    /// Drains the ids whose properties changed since the last call.
    pub fn take_dirty(&mut self) -> Vec<ElementId> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }
}

/// Renders a property map into CSS declarations. Properties that were never
/// written are left to the stylesheet.
pub fn style_declarations(values: &PropertyMap) -> Vec<(&'static str, String)> {
    let number = |property: Property| values.get(&property).and_then(Value::as_number);
    let mut declarations = Vec::new();
    let mut transform = Vec::new();

    let x = number(Property::X);
    let y = number(Property::Y);
    if x.is_some() || y.is_some() {
        transform.push(format!(
            "translate3d({:.3}px, {:.3}px, 0)",
            x.unwrap_or(0.0),
            y.unwrap_or(0.0)
        ));
    }
    if let Some(scale) = number(Property::Scale) {
        transform.push(format!("scale({scale:.4})"));
    }
    if let Some(degrees) = number(Property::Rotation) {
        transform.push(format!("rotate({degrees:.3}deg)"));
    }
    if let Some(degrees) = number(Property::RotationX) {
        transform.push(format!("rotateX({degrees:.3}deg)"));
    }
    if let Some(degrees) = number(Property::RotationY) {
        transform.push(format!("rotateY({degrees:.3}deg)"));
    }
    if !transform.is_empty() {
        declarations.push(("transform", transform.join(" ")));
    }

    if let Some(opacity) = number(Property::Opacity) {
        declarations.push(("opacity", format!("{:.4}", opacity.clamp(0.0, 1.0))));
    }
    if let Some(Value::Text(shadow)) = values.get(&Property::Shadow) {
        declarations.push(("box-shadow", shadow.clone()));
    }

    declarations
}
