//! # boxlogic
//!
//! Deterministic 3D bin packing: places a multiset of rectangular items into
//! one or more identical rectangular containers using a greedy first-fit
//! search over anchor points (bottom-left-back fill), with optional axis
//! rotation, a descending-volume ordering heuristic, and per-container
//! weight capacities. Overflow spills into freshly created containers up to
//! a fixed ceiling.
//!
//! The heuristic is explainable rather than optimal: identical input and
//! options always produce byte-identical plans.
//!
//! ## Quick start
//!
//! ```
//! use boxlogic::{plan, BoxSpec, Config, ContainerSpec, PlanRequest};
//!
//! let request = PlanRequest {
//!     container: ContainerSpec::new(100.0, 100.0, 100.0),
//!     box_specs: vec![BoxSpec::new("A", 50.0, 50.0, 50.0).with_quantity(9)],
//!     options: Config::default(),
//! };
//!
//! let result = plan(&request)?;
//! assert_eq!(result.container_count, 2);
//! assert_eq!(result.containers[0].utilization_percent, "100.00%");
//! # Ok::<(), boxlogic::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: axis-aligned box math (pure functions)
//! - [`catalog`]: box specs and their expansion into placeable items
//! - [`engine`]: first-fit anchor-point placement within one container
//! - [`planner`]: the multi-container loop and its configuration
//! - [`report`]: utilization figures and the wire-facing result shape
//! - [`api`]: the request shape and the [`plan`] entry point

pub mod api;
pub mod catalog;
pub mod container;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod planner;
pub mod report;

pub use api::{plan, PlanRequest};
pub use catalog::{BoxSpec, Item, ItemState};
pub use container::{Container, ContainerSpec, DEFAULT_MAX_WEIGHT};
pub use error::{Error, Result};
pub use planner::{Config, PackingStrategy, Plan, Planner, CONTAINER_CEILING};
pub use report::{ContainerReport, Dimensions, PlacedItemReport, PlanResult, Position};
