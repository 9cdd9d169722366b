//! Container template and closed container instances.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::catalog::Item;
use crate::error::{Error, Result};
use crate::geometry::{self, round2, EPSILON};

/// Weight capacity applied when a request leaves it unspecified.
pub const DEFAULT_MAX_WEIGHT: f64 = 100_000.0;

/// The container template every spawned container is stamped from. A plan
/// uses one template, not a heterogeneous fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Extent along the x axis.
    pub length: f64,

    /// Extent along the y axis.
    pub width: f64,

    /// Extent along the z axis.
    pub height: f64,

    /// Maximum total weight of placed items.
    #[serde(default = "default_max_weight")]
    pub max_weight: f64,
}

fn default_max_weight() -> f64 {
    DEFAULT_MAX_WEIGHT
}

impl ContainerSpec {
    /// Creates a template with the default weight capacity.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }

    /// Sets the weight capacity.
    pub fn with_max_weight(mut self, max_weight: f64) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Dimensions as a vector, normalised to 2 decimal places.
    pub fn dims(&self) -> Vector3<f64> {
        Vector3::new(round2(self.length), round2(self.width), round2(self.height))
    }

    /// Rejects non-positive dimensions or weight capacity.
    pub fn validate(&self) -> Result<()> {
        if !(self.length > 0.0) || !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(Error::InvalidContainer(
                "all container dimensions must be positive".into(),
            ));
        }
        if !(self.max_weight > 0.0) {
            return Err(Error::InvalidContainer(
                "container max weight must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// One packed container. Created by the planner, filled by the engine, and
/// immutable once closed.
#[derive(Debug, Clone)]
pub struct Container {
    name: String,
    dims: Vector3<f64>,
    max_weight: f64,
    items: Vec<Item>,
}

impl Container {
    pub(crate) fn new(
        name: String,
        dims: Vector3<f64>,
        max_weight: f64,
        items: Vec<Item>,
    ) -> Self {
        Self {
            name,
            dims,
            max_weight,
            items,
        }
    }

    /// Container name (`Container-1`, `Container-2`, ... in creation order).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Container dimensions.
    pub fn dims(&self) -> Vector3<f64> {
        self.dims
    }

    /// Weight capacity.
    pub fn max_weight(&self) -> f64 {
        self.max_weight
    }

    /// Items placed inside, in placement order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Total container volume.
    pub fn volume(&self) -> f64 {
        geometry::volume(self.dims)
    }

    /// Sum of placed item volumes.
    pub fn placed_volume(&self) -> f64 {
        self.items.iter().map(Item::volume).sum()
    }

    /// Sum of placed item weights.
    pub fn placed_weight(&self) -> f64 {
        self.items.iter().map(Item::weight).sum()
    }

    /// Volumetric fill ratio in [0, 1]. A zero-volume container cannot pass
    /// validation, but the division is still guarded.
    pub fn utilization(&self) -> f64 {
        let volume = self.volume();
        if volume > 0.0 {
            self.placed_volume() / volume
        } else {
            0.0
        }
    }

    /// Checks the closed container's invariants: every item carries a
    /// placement, lies within bounds, no two items overlap, and the weight
    /// capacity holds.
    pub(crate) fn verify(&self) -> Result<()> {
        let mut regions = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let Some((position, dims)) = item.region() else {
                return Err(Error::Internal(format!(
                    "item '{}' recorded in {} without a placement",
                    item.name(),
                    self.name
                )));
            };
            if !geometry::fits_within(position, dims, self.dims) {
                return Err(Error::Internal(format!(
                    "item '{}' extends outside {}",
                    item.name(),
                    self.name
                )));
            }
            regions.push((item.name(), position, dims));
        }

        if self.placed_weight() > self.max_weight + EPSILON {
            return Err(Error::Internal(format!(
                "{} exceeds its weight capacity",
                self.name
            )));
        }

        for (i, &(name_a, pos_a, dims_a)) in regions.iter().enumerate() {
            for &(name_b, pos_b, dims_b) in &regions[i + 1..] {
                if geometry::boxes_overlap(pos_a, dims_a, pos_b, dims_b) {
                    return Err(Error::Internal(format!(
                        "items '{name_a}' and '{name_b}' overlap in {}",
                        self.name
                    )));
                }
            }
        }

        Ok(())
    }
}
