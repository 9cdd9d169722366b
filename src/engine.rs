//! Greedy first-fit placement over anchor points.
//!
//! Anchors approximate a bottom-left-back fill: candidates are visited in
//! ascending (z, y, x) order, and every placed item contributes three new
//! anchors at its outward faces. For each item the engine tries every
//! (anchor, orientation) pair in that deterministic order and commits the
//! first one that fits; an item with no feasible pair rolls over to the next
//! container unchanged.

use nalgebra::Vector3;

use crate::catalog::Item;
use crate::container::{Container, ContainerSpec};
use crate::error::Result;
use crate::geometry::{self, EPSILON};

/// An open container being filled. Owns the anchor set and the items placed
/// so far; closing it yields an immutable, verified [`Container`].
///
/// The anchor set and placed-item list never cross container boundaries:
/// each instance belongs to exactly one engine invocation.
#[derive(Debug)]
pub struct PackingState {
    name: String,
    dims: Vector3<f64>,
    max_weight: f64,
    anchors: Vec<Vector3<f64>>,
    items: Vec<Item>,
    placed_weight: f64,
}

impl PackingState {
    /// Opens an empty container stamped from the template. The only initial
    /// anchor is the origin corner.
    pub fn open(name: impl Into<String>, spec: &ContainerSpec) -> Self {
        Self {
            name: name.into(),
            dims: spec.dims(),
            max_weight: spec.max_weight,
            anchors: vec![Vector3::zeros()],
            items: Vec::new(),
            placed_weight: 0.0,
        }
    }

    /// Container name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of items placed so far.
    pub fn placed_count(&self) -> usize {
        self.items.len()
    }

    /// Tries every (anchor, orientation) pair in priority order and commits
    /// the first that fits. On failure the item is handed back unchanged so
    /// the caller can offer it to another container.
    pub fn try_place(&mut self, item: Item, rotation: bool) -> std::result::Result<(), Item> {
        if self.placed_weight + item.weight() > self.max_weight + EPSILON {
            return Err(item);
        }

        for anchor_idx in 0..self.anchors.len() {
            let anchor = self.anchors[anchor_idx];
            for orientation in 0..geometry::orientation_count(rotation) {
                let dims = geometry::oriented(item.dims(), orientation);
                if self.fits_at(anchor, dims) {
                    self.commit(item, anchor_idx, orientation, dims);
                    return Ok(());
                }
            }
        }

        Err(item)
    }

    /// Feeds the items through the first-fit search in order. Returns the
    /// items that did not fit, in their original relative order.
    pub fn pack(&mut self, items: Vec<Item>, rotation: bool) -> Vec<Item> {
        let mut leftover = Vec::new();
        for item in items {
            if let Err(item) = self.try_place(item, rotation) {
                leftover.push(item);
            }
        }
        leftover
    }

    /// Closes the container and verifies its invariants.
    pub fn close(self) -> Result<Container> {
        let container = Container::new(self.name, self.dims, self.max_weight, self.items);
        container.verify()?;
        Ok(container)
    }

    fn fits_at(&self, anchor: Vector3<f64>, dims: Vector3<f64>) -> bool {
        if !geometry::fits_within(anchor, dims, self.dims) {
            return false;
        }
        self.items.iter().all(|placed| match placed.region() {
            Some((pos, placed_dims)) => !geometry::boxes_overlap(anchor, dims, pos, placed_dims),
            None => true,
        })
    }

    fn commit(&mut self, mut item: Item, anchor_idx: usize, orientation: usize, dims: Vector3<f64>) {
        let position = self.anchors.remove(anchor_idx);
        item.place(position, orientation);
        self.placed_weight += item.weight();
        self.items.push(item);

        // Anchors swallowed by the new region are unreachable from now on.
        self.anchors
            .retain(|a| !geometry::strictly_inside(*a, position, dims));

        let max = position + dims;
        self.push_anchor(Vector3::new(max.x, position.y, position.z));
        self.push_anchor(Vector3::new(position.x, max.y, position.z));
        self.push_anchor(Vector3::new(position.x, position.y, max.z));

        self.anchors.sort_by(|a, b| {
            a.z.total_cmp(&b.z)
                .then(a.y.total_cmp(&b.y))
                .then(a.x.total_cmp(&b.x))
        });
    }

    fn push_anchor(&mut self, anchor: Vector3<f64>) {
        // An anchor flush with a container wall has zero residual space.
        if anchor.x >= self.dims.x - EPSILON
            || anchor.y >= self.dims.y - EPSILON
            || anchor.z >= self.dims.z - EPSILON
        {
            return;
        }
        let buried = self.items.iter().any(|item| match item.region() {
            Some((pos, dims)) => geometry::strictly_inside(anchor, pos, dims),
            None => false,
        });
        if buried {
            return;
        }
        if self.anchors.iter().any(|a| (a - anchor).norm() < EPSILON) {
            return;
        }
        self.anchors.push(anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{expand, BoxSpec};

    fn items_for(spec: &ContainerSpec, boxes: &[BoxSpec]) -> Vec<Item> {
        expand(spec, boxes, false).unwrap()
    }

    #[test]
    fn test_first_item_at_origin() {
        let spec = ContainerSpec::new(100.0, 100.0, 100.0);
        let mut state = PackingState::open("Container-1", &spec);
        let items = items_for(&spec, &[BoxSpec::new("A", 20.0, 20.0, 20.0)]);

        let leftover = state.pack(items, false);
        assert!(leftover.is_empty());

        let container = state.close().unwrap();
        let (position, dims) = container.items()[0].region().unwrap();
        assert_eq!(position, Vector3::zeros());
        assert_eq!(dims, Vector3::new(20.0, 20.0, 20.0));
    }

    #[test]
    fn test_exact_fit_fills_container() {
        let spec = ContainerSpec::new(50.0, 40.0, 30.0);
        let mut state = PackingState::open("Container-1", &spec);
        let items = items_for(&spec, &[BoxSpec::new("full", 50.0, 40.0, 30.0)]);

        let leftover = state.pack(items, false);
        assert!(leftover.is_empty());
        assert_eq!(state.placed_count(), 1);
    }

    #[test]
    fn test_eight_cubes_fill_then_ninth_left_over() {
        let spec = ContainerSpec::new(100.0, 100.0, 100.0);
        let mut state = PackingState::open("Container-1", &spec);
        let items = items_for(
            &spec,
            &[BoxSpec::new("A", 50.0, 50.0, 50.0).with_quantity(9)],
        );

        let leftover = state.pack(items, false);
        assert_eq!(state.placed_count(), 8);
        assert_eq!(leftover.len(), 1);
        assert!(!leftover[0].is_placed());

        let container = state.close().unwrap();
        assert!((container.utilization() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bottom_left_back_fill_order() {
        let spec = ContainerSpec::new(100.0, 100.0, 100.0);
        let mut state = PackingState::open("Container-1", &spec);
        let items = items_for(
            &spec,
            &[BoxSpec::new("A", 50.0, 50.0, 50.0).with_quantity(3)],
        );

        state.pack(items, false);
        let container = state.close().unwrap();
        let positions: Vec<Vector3<f64>> = container
            .items()
            .iter()
            .map(|i| i.region().unwrap().0)
            .collect();

        // Second item fills along x before y, third along y before z.
        assert_eq!(positions[0], Vector3::zeros());
        assert_eq!(positions[1], Vector3::new(50.0, 0.0, 0.0));
        assert_eq!(positions[2], Vector3::new(0.0, 50.0, 0.0));
    }

    #[test]
    fn test_rotation_unlocks_placement() {
        // Base orientation (10, 10, 50) exceeds the container height; the
        // (2, 0, 1) permutation lays it down along the length axis.
        let spec = ContainerSpec::new(50.0, 10.0, 10.0);
        let items = vec![{
            let wide = ContainerSpec::new(100.0, 100.0, 100.0);
            items_for(&wide, &[BoxSpec::new("long", 10.0, 10.0, 50.0)]).remove(0)
        }];

        let mut fixed = PackingState::open("Container-1", &spec);
        let leftover = fixed.pack(items.clone(), false);
        assert_eq!(leftover.len(), 1);

        let mut rotated = PackingState::open("Container-1", &spec);
        let leftover = rotated.pack(items, true);
        assert!(leftover.is_empty());

        let container = rotated.close().unwrap();
        let (_, dims) = container.items()[0].region().unwrap();
        assert_eq!(dims, Vector3::new(50.0, 10.0, 10.0));
    }

    #[test]
    fn test_weight_capacity_gates_placement() {
        let spec = ContainerSpec::new(100.0, 100.0, 100.0).with_max_weight(10.0);
        let mut state = PackingState::open("Container-1", &spec);
        let items = items_for(
            &spec,
            &[BoxSpec::new("A", 10.0, 10.0, 10.0)
                .with_weight(6.0)
                .with_quantity(3)],
        );

        let leftover = state.pack(items, false);
        // 6 + 6 exceeds the 10 capacity, so only one unit fits.
        assert_eq!(state.placed_count(), 1);
        assert_eq!(leftover.len(), 2);
    }

    #[test]
    fn test_leftovers_keep_relative_order() {
        let spec = ContainerSpec::new(100.0, 100.0, 100.0);
        let mut state = PackingState::open("Container-1", &spec);
        // Two oversized-for-remaining-space items interleaved with fitting ones.
        let items = items_for(
            &spec,
            &[
                BoxSpec::new("huge-1", 100.0, 100.0, 100.0),
                BoxSpec::new("huge-2", 100.0, 100.0, 100.0),
                BoxSpec::new("huge-3", 100.0, 100.0, 100.0),
            ],
        );

        let leftover = state.pack(items, false);
        assert_eq!(state.placed_count(), 1);
        let names: Vec<&str> = leftover.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["huge-2", "huge-3"]);
    }
}
