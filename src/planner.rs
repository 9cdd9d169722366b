//! Multi-container planning loop.
//!
//! The planner owns the container lifecycle: it stamps fresh containers from
//! the one template, aims the placement engine at them, and collects what the
//! engine could not place. Containers are processed strictly in sequence
//! because the leftover computation for container N gates what is attempted
//! in container N+1.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, BoxSpec, Item};
use crate::container::{Container, ContainerSpec};
use crate::engine::PackingState;
use crate::error::Result;

/// Upper bound on containers created per plan. A fail-safe against
/// pathological inputs, not a tuning knob: hitting it yields a partial plan,
/// never a silent drop.
pub const CONTAINER_CEILING: usize = 50;

/// Item ordering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingStrategy {
    /// Sort items by descending volume before placement.
    BestFit,
}

/// Planner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Allow all 6 axis orientations per item instead of the fixed one.
    #[serde(default)]
    pub rotation: bool,

    /// Place larger items first (descending volume, stable on ties).
    #[serde(default)]
    pub bigger_first: bool,

    /// Round-robin items across all open containers in a single pass
    /// instead of exhausting each container before opening the next.
    #[serde(default)]
    pub distribute_items: bool,

    /// Optional named strategy. `best_fit` implies the same descending
    /// volume ordering as `bigger_first`.
    #[serde(default)]
    pub packing_strategy: Option<PackingStrategy>,

    /// Containers created before the planner gives up.
    #[serde(default = "default_ceiling")]
    pub container_ceiling: usize,
}

fn default_ceiling() -> usize {
    CONTAINER_CEILING
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rotation: false,
            bigger_first: false,
            distribute_items: false,
            packing_strategy: None,
            container_ceiling: CONTAINER_CEILING,
        }
    }
}

impl Config {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables axis rotation.
    pub fn with_rotation(mut self, rotation: bool) -> Self {
        self.rotation = rotation;
        self
    }

    /// Enables or disables the descending-volume ordering.
    pub fn with_bigger_first(mut self, bigger_first: bool) -> Self {
        self.bigger_first = bigger_first;
        self
    }

    /// Enables or disables the round-robin distribution mode.
    pub fn with_distribute_items(mut self, distribute: bool) -> Self {
        self.distribute_items = distribute;
        self
    }

    /// Sets the named packing strategy.
    pub fn with_packing_strategy(mut self, strategy: PackingStrategy) -> Self {
        self.packing_strategy = Some(strategy);
        self
    }

    /// Overrides the container ceiling.
    pub fn with_container_ceiling(mut self, ceiling: usize) -> Self {
        self.container_ceiling = ceiling;
        self
    }

    fn volume_first(&self) -> bool {
        self.bigger_first || self.packing_strategy == Some(PackingStrategy::BestFit)
    }
}

/// Planner output: closed containers plus whatever could not be placed
/// within the container ceiling.
#[derive(Debug, Clone)]
pub struct Plan {
    /// Closed containers in creation order.
    pub containers: Vec<Container>,

    /// Items left unplaced. Empty for a complete plan; non-empty only when
    /// the container ceiling truncated the run or an item no empty container
    /// accepts remains.
    pub unplaced: Vec<Item>,
}

impl Plan {
    /// Returns true when every requested item landed in a container.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Drives the placement engine across as many containers as needed.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: Config,
}

impl Planner {
    /// Creates a planner with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Validates the request, expands the specs, and packs until every item
    /// is placed or the container ceiling is reached.
    pub fn plan(&self, container: &ContainerSpec, specs: &[BoxSpec]) -> Result<Plan> {
        container.validate()?;
        let items = catalog::expand(container, specs, self.config.volume_first())?;

        if self.config.distribute_items {
            self.plan_distributed(container, items)
        } else {
            self.plan_sequential(container, items)
        }
    }

    /// Exhausts one container before opening the next; leftovers from
    /// container N become the input for container N+1.
    fn plan_sequential(&self, spec: &ContainerSpec, items: Vec<Item>) -> Result<Plan> {
        let mut containers = Vec::new();
        let mut pending = items;

        while !pending.is_empty() {
            if containers.len() >= self.config.container_ceiling {
                warn!(
                    "container ceiling ({}) reached with {} items unplaced",
                    self.config.container_ceiling,
                    pending.len()
                );
                break;
            }

            let mut state =
                PackingState::open(format!("Container-{}", containers.len() + 1), spec);
            let leftover = state.pack(pending, self.config.rotation);

            if state.placed_count() == 0 {
                // A fresh container took nothing; every later one would
                // repeat the result. Stop instead of spinning to the ceiling.
                warn!(
                    "no remaining item fits an empty container; {} left unplaced",
                    leftover.len()
                );
                pending = leftover;
                break;
            }

            debug!(
                "{}: placed {} items, {} left",
                state.name(),
                state.placed_count(),
                leftover.len()
            );
            containers.push(state.close()?);
            pending = leftover;
        }

        Ok(Plan {
            containers,
            unplaced: pending,
        })
    }

    /// Round-robins items across the open containers in a single pass,
    /// opening a new container only when none of the open ones accepts the
    /// item. The first-fit search inside each container is unchanged; only
    /// the targeting differs.
    fn plan_distributed(&self, spec: &ContainerSpec, items: Vec<Item>) -> Result<Plan> {
        let mut open: Vec<PackingState> = Vec::new();
        let mut unplaced = Vec::new();
        let mut cursor = 0;

        'items: for item in items {
            let mut item = item;
            let count = open.len();
            for offset in 0..count {
                let idx = (cursor + offset) % count;
                match open[idx].try_place(item, self.config.rotation) {
                    Ok(()) => {
                        cursor = (idx + 1) % count;
                        continue 'items;
                    }
                    Err(rejected) => item = rejected,
                }
            }

            if open.len() >= self.config.container_ceiling {
                unplaced.push(item);
                continue;
            }

            let mut state = PackingState::open(format!("Container-{}", open.len() + 1), spec);
            match state.try_place(item, self.config.rotation) {
                Ok(()) => {
                    open.push(state);
                    cursor = 0;
                }
                // Not even an empty container accepts it (weight gate);
                // the empty container is discarded, the item reported.
                Err(rejected) => unplaced.push(rejected),
            }
        }

        if !unplaced.is_empty() {
            warn!("{} items could not be distributed", unplaced.len());
        }
        for state in &open {
            debug!("{}: placed {} items", state.name(), state.placed_count());
        }

        let containers = open
            .into_iter()
            .map(PackingState::close)
            .collect::<Result<Vec<_>>>()?;

        Ok(Plan {
            containers,
            unplaced,
        })
    }
}
