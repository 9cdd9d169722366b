//! The engine's call contract: request shape and entry point.
//!
//! This is the only boundary the surrounding wrapper consumes. A request is
//! a pure function of its input; the engine carries no process-wide state.

use serde::{Deserialize, Serialize};

use crate::catalog::BoxSpec;
use crate::container::ContainerSpec;
use crate::error::Result;
use crate::planner::{Config, Planner};
use crate::report::{self, PlanResult};

/// A complete packing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The container template every spawned container is stamped from.
    pub container: ContainerSpec,

    /// Box types and quantities to place.
    pub box_specs: Vec<BoxSpec>,

    /// Placement options.
    #[serde(default)]
    pub options: Config,
}

/// Plans the request end to end: validate, expand, pack, report.
///
/// Validation failures short-circuit before any container is created. A
/// plan truncated by the container ceiling is still `Ok`; its
/// [`PlanResult::unplaced`] list names what was left over.
pub fn plan(request: &PlanRequest) -> Result<PlanResult> {
    let planner = Planner::new(request.options.clone());
    let plan = planner.plan(&request.container, &request.box_specs)?;
    Ok(report::build_result(&plan, &request.box_specs))
}
