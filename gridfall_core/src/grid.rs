//! Voxel container.
//!
//! Authoritative record of filled/empty grid cells plus the layer-clear
//! logic. Cells live in a flat arena indexed `y * x_dim * z_dim + x * z_dim
//! + z`; world-space cube centers convert to indices by adding the per-axis
//! offset and rounding to the nearest integer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::{Mat4, Vec3, Vec4};
use crate::render::ModelHandle;

/// Container cell counts along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl GridDims {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

impl From<(usize, usize, usize)> for GridDims {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self { x, y, z }
    }
}

/// A committed sub-cube: the model to draw and its frozen placement.
#[derive(Debug, Clone)]
pub struct Cell {
    pub model: ModelHandle,
    pub transform: Mat4,
}

/// Fixed-size 3D grid of optional occupied-cell records.
#[derive(Debug, Clone)]
pub struct Container {
    dims: GridDims,
    offsets: Vec3,
    cells: Vec<Option<Cell>>,
}

impl Container {
    pub fn new(dims: GridDims, offsets: Vec3) -> Self {
        let len = dims.x * dims.y * dims.z;
        Self {
            dims,
            offsets,
            cells: vec![None; len],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    fn slot(&self, x: usize, y: usize, z: usize) -> usize {
        y * self.dims.x * self.dims.z + x * self.dims.z + z
    }

    /// Converts a world-space cube center to signed grid indices.
    pub fn indices_of(&self, center: Vec4, transform: &Mat4) -> (i64, i64, i64) {
        let world = transform.transform_vec4(center);
        (
            (world.x + self.offsets.x).round() as i64,
            (world.y + self.offsets.y).round() as i64,
            (world.z + self.offsets.z).round() as i64,
        )
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&Cell> {
        if x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return None;
        }
        self.cells[self.slot(x, y, z)].as_ref()
    }

    /// Whether a piece transformed by `transform` sits entirely in open
    /// space. Cells at or above y_dim count as valid-but-unbounded: a piece
    /// may still be partially above the container while falling in. Bounds
    /// are checked before occupancy so out-of-range coordinates never index
    /// the arena.
    pub fn placement_is_valid(&self, centers: &[Vec4], transform: &Mat4) -> bool {
        for center in centers.iter().copied() {
            let (x, y, z) = self.indices_of(center, transform);

            if x < 0 || x >= self.dims.x as i64 || y < 0 || z < 0 || z >= self.dims.z as i64 {
                return false;
            }

            if y < self.dims.y as i64
                && self.cells[self.slot(x as usize, y as usize, z as usize)].is_some()
            {
                return false;
            }
        }
        true
    }

    /// Commits a piece into the container, freezing a copy of `transform`
    /// into each target cell. All-or-nothing: if any sub-cube lands outside
    /// the grid, nothing is written and `false` is returned.
    pub fn add_piece(&mut self, models: &[ModelHandle], centers: &[Vec4], transform: &Mat4) -> bool {
        debug_assert_eq!(models.len(), centers.len());

        let mut slots = Vec::with_capacity(centers.len());
        for center in centers.iter().copied() {
            let (x, y, z) = self.indices_of(center, transform);

            if x < 0
                || x >= self.dims.x as i64
                || y < 0
                || y >= self.dims.y as i64
                || z < 0
                || z >= self.dims.z as i64
            {
                debug!(x, y, z, "piece commit outside the container");
                return false;
            }

            slots.push(self.slot(x as usize, y as usize, z as usize));
        }

        for (&slot, &model) in slots.iter().zip(models.iter()) {
            self.cells[slot] = Some(Cell {
                model,
                transform: *transform,
            });
        }
        true
    }

    /// Directly fills one cell, bypassing center-point conversion. Used by
    /// the tic-tac-toe board, which addresses cells by index.
    pub fn set_cell(&mut self, x: usize, y: usize, z: usize, cell: Cell) -> bool {
        if x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return false;
        }
        let slot = self.slot(x, y, z);
        self.cells[slot] = Some(cell);
        true
    }

    /// Swaps the model of an occupied cell, keeping its transform.
    pub fn replace_model(&mut self, x: usize, y: usize, z: usize, model: ModelHandle) -> bool {
        if x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return false;
        }
        let slot = self.slot(x, y, z);
        match self.cells[slot].as_mut() {
            Some(cell) => {
                cell.model = model;
                true
            }
            None => false,
        }
    }

    /// Whether every (x, z) position at height `y` holds a cube.
    pub fn layer_is_full(&self, y: usize) -> bool {
        for x in 0..self.dims.x {
            for z in 0..self.dims.z {
                if self.cells[self.slot(x, y, z)].is_none() {
                    return false;
                }
            }
        }
        true
    }

    /// Removes layer `y` by shifting every layer above it down one, leaving
    /// the topmost layer empty. No-op when `y` is the topmost layer.
    pub fn collapse_layer(&mut self, y: usize) {
        if y >= self.dims.y - 1 {
            return;
        }

        for layer in y..self.dims.y - 1 {
            for x in 0..self.dims.x {
                for z in 0..self.dims.z {
                    let above = self.slot(x, layer + 1, z);
                    let here = self.slot(x, layer, z);
                    self.cells[here] = self.cells[above].take();
                }
            }
        }
    }

    /// Clears every full layer, bottom-up, and returns how many were
    /// removed. After a collapse the same height is re-checked, since the
    /// layer that shifted down may itself be full. A full topmost layer has
    /// nothing above it to shift, so it is emptied in place.
    pub fn clear_full_layers(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = 0;
        while y < self.dims.y {
            if !self.layer_is_full(y) {
                y += 1;
                continue;
            }

            cleared += 1;
            if y == self.dims.y - 1 {
                for x in 0..self.dims.x {
                    for z in 0..self.dims.z {
                        let slot = self.slot(x, y, z);
                        self.cells[slot] = None;
                    }
                }
                y += 1;
            } else {
                self.collapse_layer(y);
            }
        }
        cleared
    }

    /// Iterates occupied cells with their grid coordinates.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, usize, &Cell)> {
        let dims = self.dims;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|c| {
                let y = i / (dims.x * dims.z);
                let rem = i % (dims.x * dims.z);
                let x = rem / dims.z;
                let z = rem % dims.z;
                (x, y, z, c)
            })
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
