//! Element state model - per-element view state, position and connectors.
//!
//! Every diagram element is one of a closed set of kinds (`canvas`, `shape`,
//! `path`) carrying a flag set, a position and, for shapes, a connector
//! registry. The only mutation path is [`Element::apply`] (reached through
//! `Diagram::update`); it diff-applies the patch to the rendering layer so
//! callers never do their own visual bookkeeping.

use crate::constants::TEXT_CONTENT_ATTR;
use crate::geometry::{Direction, Point};
use crate::presenter::Presenter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Stable element identity. Side tables (center caches, drag bookkeeping)
/// key off this, never off interior references. Ids are handed out
/// monotonically, so ordering doubles as z-order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ElementId(pub u64);

/// Closed tagged union over the element kinds the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Canvas,
    Shape,
    Path,
}

/// Per-element view state flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFlag {
    Selected,
    Hovered,
    Disabled,
    Highlighted,
}

impl StateFlag {
    /// All recognized flags, in sync order.
    pub const ALL: [StateFlag; 4] = [
        StateFlag::Selected,
        StateFlag::Hovered,
        StateFlag::Disabled,
        StateFlag::Highlighted,
    ];

    fn bit(self) -> u8 {
        match self {
            StateFlag::Selected => 1 << 0,
            StateFlag::Hovered => 1 << 1,
            StateFlag::Disabled => 1 << 2,
            StateFlag::Highlighted => 1 << 3,
        }
    }
}

/// A copyable set of state flags. Accessors hand out copies, so the live
/// set can only change through an `update` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<StateFlag>", from = "Vec<StateFlag>")]
pub struct StateSet(u8);

impl StateSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn has(&self, flag: StateFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: StateFlag) {
        self.0 |= flag.bit();
    }

    pub fn remove(&mut self, flag: StateFlag) {
        self.0 &= !flag.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = StateFlag> + '_ {
        StateFlag::ALL.into_iter().filter(|f| self.has(*f))
    }

    /// Convenience constructor for a single-flag set.
    pub fn with(flag: StateFlag) -> Self {
        let mut s = Self::new();
        s.insert(flag);
        s
    }
}

impl From<StateSet> for Vec<StateFlag> {
    fn from(set: StateSet) -> Self {
        set.iter().collect()
    }
}

impl From<Vec<StateFlag>> for StateSet {
    fn from(flags: Vec<StateFlag>) -> Self {
        let mut set = StateSet::new();
        for f in flags {
            set.insert(f);
        }
        set
    }
}

/// A connection point owned by a shape, keyed by a stable string id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    /// Offset within the owning shape
    pub inner_position: Point,
    /// Outward direction
    pub dir: Direction,
    /// Connector-local flags. Inherits `hovered` clearing from the owning
    /// shape, never selection.
    #[serde(default)]
    pub state: StateSet,
}

impl Connector {
    pub fn new(inner_position: Point, dir: Direction) -> Self {
        Self {
            inner_position,
            dir,
            state: StateSet::new(),
        }
    }
}

/// Partial connector update, merged non-destructively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectorPatch {
    pub inner_position: Option<Point>,
    pub dir: Option<Direction>,
}

/// Arbitrary per-sub-element attribute writes: sub-element key -> attribute
/// name -> value. The reserved `textContent` attribute is routed through the
/// text-layout collaborator rather than written raw.
pub type PropMap = BTreeMap<String, BTreeMap<String, Value>>;

/// Patch applied through `Diagram::update`. Each field is independent;
/// absent fields leave their aspect untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatch {
    pub position: Option<Point>,
    pub props: Option<PropMap>,
    pub connectors: Option<BTreeMap<String, ConnectorPatch>>,
    /// Full replacement of the flag set.
    pub state: Option<StateSet>,
}

impl UpdatePatch {
    pub fn position(p: Point) -> Self {
        Self {
            position: Some(p),
            ..Default::default()
        }
    }

    pub fn state(s: StateSet) -> Self {
        Self {
            state: Some(s),
            ..Default::default()
        }
    }
}

/// A single diagram element: canvas, shape or path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    kind: ElementKind,
    position: Point,
    /// Bounding size, used only for pointer target resolution.
    size: (f32, f32),
    state: StateSet,
    connectors: BTreeMap<String, Connector>,
    template_key: Option<String>,
}

impl Element {
    pub fn new(kind: ElementKind, position: Point, size: (f32, f32)) -> Self {
        Self {
            kind,
            position,
            size,
            state: StateSet::new(),
            connectors: BTreeMap::new(),
            template_key: None,
        }
    }

    pub fn with_template_key(mut self, key: impl Into<String>) -> Self {
        self.template_key = Some(key.into());
        self
    }

    pub fn with_connector(mut self, key: impl Into<String>, connector: Connector) -> Self {
        self.connectors.insert(key.into(), connector);
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn template_key(&self) -> Option<&str> {
        self.template_key.as_deref()
    }

    pub fn state_has(&self, flag: StateFlag) -> bool {
        self.state.has(flag)
    }

    /// Copy of the current flag set; mutating it does not touch the element.
    pub fn state_get(&self) -> StateSet {
        self.state
    }

    /// View position for the canvas, canvas-local position for shapes.
    pub fn position_get(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    pub fn connector(&self, key: &str) -> Option<&Connector> {
        self.connectors.get(key)
    }

    pub fn connectors(&self) -> impl Iterator<Item = (&str, &Connector)> {
        self.connectors.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// Apply a patch and sync the visual representation. The presenter
    /// always reflects the last call; there is no other mutation path.
    pub(crate) fn apply(&mut self, id: ElementId, patch: &UpdatePatch, presenter: &mut dyn Presenter) {
        if let Some(position) = patch.position {
            self.position = position;
            presenter.position_set(id, position);
        }

        if let Some(props) = &patch.props {
            for (sub_key, attrs) in props {
                for (attr, value) in attrs {
                    if attr == TEXT_CONTENT_ATTR {
                        let text = match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        let params = presenter.text_params(id, sub_key);
                        presenter.text_draw(id, sub_key, &text, params);
                    } else {
                        presenter.attr_set(id, sub_key, attr, value);
                    }
                }
            }
        }

        if let Some(connectors) = &patch.connectors {
            for (key, connector_patch) in connectors {
                let Some(connector) = self.connectors.get_mut(key) else {
                    tracing::warn!(element = ?id, connector = %key, "connector patch for unknown connector");
                    continue;
                };
                if let Some(inner_position) = connector_patch.inner_position {
                    connector.inner_position = inner_position;
                }
                if let Some(dir) = connector_patch.dir {
                    connector.dir = dir;
                }
            }
        }

        if let Some(state) = patch.state {
            self.state = state;
            for flag in StateFlag::ALL {
                presenter.state_sync(id, None, flag, state.has(flag));
            }

            // Losing hover cascades to every connector in the same call
            if !state.has(StateFlag::Hovered) {
                for (key, connector) in &mut self.connectors {
                    if connector.state.has(StateFlag::Hovered) {
                        connector.state.remove(StateFlag::Hovered);
                        presenter.state_sync(id, Some(key), StateFlag::Hovered, false);
                    }
                }
            }
        }
    }

    /// Set a single flag on a connector, syncing the visual class.
    pub(crate) fn connector_state_set(
        &mut self,
        id: ElementId,
        key: &str,
        flag: StateFlag,
        on: bool,
        presenter: &mut dyn Presenter,
    ) {
        let Some(connector) = self.connectors.get_mut(key) else {
            tracing::warn!(element = ?id, connector = %key, "state change for unknown connector");
            return;
        };
        if on {
            connector.state.insert(flag);
        } else {
            connector.state.remove(flag);
        }
        presenter.state_sync(id, Some(key), flag, on);
    }
}
