//! Utilization reporting and the wire-facing result shape.
//!
//! Dimensions in the report are *as placed* (post-rotation) so a caller can
//! render the layout without re-deriving orientations.

use serde::{Deserialize, Serialize};

use crate::catalog::BoxSpec;
use crate::container::Container;
use crate::planner::Plan;

/// A point in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Offset along the length axis.
    pub x: f64,
    /// Offset along the width axis.
    pub y: f64,
    /// Offset along the height axis.
    pub z: f64,
}

/// Box dimensions on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// One placed item in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedItemReport {
    /// Box type name.
    pub name: String,
    /// Origin corner of the placed region.
    pub position: Position,
    /// Dimensions as placed, post-rotation.
    pub dimensions: Dimensions,
}

/// Per-container section of the plan result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerReport {
    /// Container name in creation order.
    pub name: String,
    /// Volumetric fill as a fixed 2-decimal percentage, e.g. `"87.50%"`.
    pub utilization_percent: String,
    /// Container dimensions.
    pub dimensions: Dimensions,
    /// Placed items in placement order.
    pub placed_items: Vec<PlacedItemReport>,
}

/// Top-level plan output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    /// Packed containers in creation order.
    pub containers: Vec<ContainerReport>,
    /// Number of containers used.
    pub container_count: usize,
    /// Echo of the requested box specs.
    pub input_summary: Vec<BoxSpec>,
    /// Names of items the plan could not place. Empty for a complete plan;
    /// the engine never silently drops items.
    pub unplaced: Vec<String>,
}

impl PlanResult {
    /// Returns true when every requested item was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Assembles the structured result for a finished plan.
pub fn build_result(plan: &Plan, specs: &[BoxSpec]) -> PlanResult {
    PlanResult {
        containers: plan.containers.iter().map(container_report).collect(),
        container_count: plan.containers.len(),
        input_summary: specs.to_vec(),
        unplaced: plan
            .unplaced
            .iter()
            .map(|item| item.name().to_string())
            .collect(),
    }
}

fn container_report(container: &Container) -> ContainerReport {
    let dims = container.dims();
    let placed_items = container
        .items()
        .iter()
        .filter_map(|item| {
            let (position, placed_dims) = item.region()?;
            Some(PlacedItemReport {
                name: item.name().to_string(),
                position: Position {
                    x: position.x,
                    y: position.y,
                    z: position.z,
                },
                dimensions: Dimensions {
                    length: placed_dims.x,
                    width: placed_dims.y,
                    height: placed_dims.z,
                },
            })
        })
        .collect();

    ContainerReport {
        name: container.name().to_string(),
        utilization_percent: format!("{:.2}%", container.utilization() * 100.0),
        dimensions: Dimensions {
            length: dims.x,
            width: dims.y,
            height: dims.z,
        },
        placed_items,
    }
}
