//! Box specifications and their expansion into placeable items.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::container::ContainerSpec;
use crate::error::{Error, Result};
use crate::geometry::{self, round2, EPSILON};

/// One line of a packing request: a box type and how many units to place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Box type name, echoed on every placed unit.
    pub name: String,

    /// Extent along the container's length axis (x).
    pub length: f64,

    /// Extent along the container's width axis (y).
    pub width: f64,

    /// Extent along the container's height axis (z).
    pub height: f64,

    /// Weight of one unit. Defaults to 0 when unspecified.
    #[serde(default)]
    pub weight: f64,

    /// Number of units to place.
    #[serde(default = "default_quantity")]
    pub quantity: usize,
}

fn default_quantity() -> usize {
    1
}

impl BoxSpec {
    /// Creates a spec for a single weightless box.
    pub fn new(name: impl Into<String>, length: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            length,
            width,
            height,
            weight: 0.0,
            quantity: 1,
        }
    }

    /// Sets the unit weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the quantity to place.
    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = quantity;
        self
    }

    /// Volume of one unit.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    fn validate(&self, container: &ContainerSpec) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidSpec("box spec with empty name".into()));
        }
        if !(self.length > 0.0) || !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(Error::InvalidSpec(format!(
                "all dimensions for '{}' must be positive",
                self.name
            )));
        }
        if !(self.weight >= 0.0) {
            return Err(Error::InvalidSpec(format!(
                "weight for '{}' cannot be negative",
                self.name
            )));
        }
        if self.quantity == 0 {
            return Err(Error::InvalidSpec(format!(
                "quantity for '{}' must be at least 1",
                self.name
            )));
        }

        // Raw axis-by-axis check against the original container bounds.
        // Rotation is a placement-search concern and does not relax this
        // gate, so a box that only fits rotated is still rejected here.
        let bounds = container.dims();
        if round2(self.length) > bounds.x + EPSILON
            || round2(self.width) > bounds.y + EPSILON
            || round2(self.height) > bounds.z + EPSILON
        {
            return Err(Error::Oversized {
                name: self.name.clone(),
            });
        }

        Ok(())
    }
}

/// Placement state of an item. Set exactly once, by the placement engine;
/// an item never moves after its container closes.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemState {
    /// Not yet assigned to a container.
    Unplaced,
    /// Committed at a position within a container.
    Placed {
        /// Origin corner in container-local coordinates.
        position: Vector3<f64>,
        /// Index into [`geometry::ORIENTATIONS`].
        orientation: usize,
    },
}

/// One physical unit queued for placement.
#[derive(Debug, Clone)]
pub struct Item {
    name: String,
    dims: Vector3<f64>,
    weight: f64,
    state: ItemState,
}

impl Item {
    fn from_spec(spec: &BoxSpec) -> Self {
        Self {
            name: spec.name.clone(),
            dims: Vector3::new(round2(spec.length), round2(spec.width), round2(spec.height)),
            weight: round2(spec.weight),
            state: ItemState::Unplaced,
        }
    }

    /// Box type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base dimensions (length, width, height), before any rotation.
    pub fn dims(&self) -> Vector3<f64> {
        self.dims
    }

    /// Unit weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Unit volume. Invariant under orientation.
    pub fn volume(&self) -> f64 {
        geometry::volume(self.dims)
    }

    /// Current placement state.
    pub fn state(&self) -> &ItemState {
        &self.state
    }

    /// Returns true once the engine has committed this item.
    pub fn is_placed(&self) -> bool {
        matches!(self.state, ItemState::Placed { .. })
    }

    /// The occupied region (origin corner, as-placed dimensions), or `None`
    /// while unplaced.
    pub fn region(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        match &self.state {
            ItemState::Unplaced => None,
            ItemState::Placed {
                position,
                orientation,
            } => Some((*position, geometry::oriented(self.dims, *orientation))),
        }
    }

    pub(crate) fn place(&mut self, position: Vector3<f64>, orientation: usize) {
        debug_assert!(matches!(self.state, ItemState::Unplaced));
        self.state = ItemState::Placed {
            position,
            orientation,
        };
    }
}

/// Validates the specs against the container template and expands them into
/// individual unplaced items, `quantity` copies per spec, in input order.
///
/// When `volume_first` is set the expanded sequence is reordered by
/// descending volume (stable, so ties keep their original relative order)
/// before it reaches the planner. Large items claiming space while most free
/// volume is still contiguous typically reduces fragmentation.
pub fn expand(
    container: &ContainerSpec,
    specs: &[BoxSpec],
    volume_first: bool,
) -> Result<Vec<Item>> {
    if specs.is_empty() {
        return Err(Error::InvalidSpec("no box specifications provided".into()));
    }
    for spec in specs {
        spec.validate(container)?;
    }

    let mut items = Vec::with_capacity(specs.iter().map(|s| s.quantity).sum());
    for spec in specs {
        for _ in 0..spec.quantity {
            items.push(Item::from_spec(spec));
        }
    }

    if volume_first {
        items.sort_by(|a, b| b.volume().total_cmp(&a.volume()));
    }

    Ok(items)
}
