//! Obstacle grid and its settling cascade
//!
//! Obstacles occupy a fixed `columns × rows` grid (row 0 on the ground).
//! Removing one flags it for replacement; each tick the flag is handed up the
//! column and the cells above slide down visually until they fill the gap.
//! Grid coordinates never change: a fallen obstacle still reports its starting
//! (col, row), only its drawn position moves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::SimError;
use crate::config::{LevelConfig, Tuning};
use crate::consts::{ICE_PADDING, PIGGY_PADDING};

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Hard block, drawn as a square
    Ice,
    /// Soft target, drawn as a pig face
    Piggy,
}

/// One grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Index among obstacles of the same kind
    pub id: u32,
    pub kind: ObstacleKind,
    pub col: u32,
    pub row: u32,
    /// How many cells this obstacle has to fall
    pub replacing: u32,
    /// Pending replacement (set on removal, handed upward by the cascade)
    pub to_replace: bool,
    pub dead: bool,
    /// Bounding circle centre at setup
    pub home: Vec2,
    pub radius: f32,
    /// Distance fallen so far
    pub fall: f32,
}

impl Obstacle {
    fn new(id: u32, kind: ObstacleKind, col: u32, row: u32, start_x: f32, tuning: &Tuning) -> Self {
        let size = tuning.cell_size;
        let cell_center = Vec2::new(
            start_x + size / 2.0 + col as f32 * size,
            tuning.ground_height + size / 2.0 + row as f32 * size,
        );
        let (home, radius) = match kind {
            ObstacleKind::Ice => (cell_center, size / 2.0 - ICE_PADDING),
            // The face sits slightly low in its cell
            ObstacleKind::Piggy => (
                cell_center - Vec2::new(0.0, PIGGY_PADDING),
                size / 2.0 - PIGGY_PADDING,
            ),
        };
        Self {
            id,
            kind,
            col,
            row,
            replacing: 0,
            to_replace: false,
            dead: false,
            home,
            radius,
            fall: 0.0,
        }
    }

    /// Current centre (home shifted down by the fall)
    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.home - Vec2::new(0.0, self.fall)
    }

    /// Advance the fall by `step`, stopping exactly `replacing` cells down
    fn fall_by(&mut self, step: f32, cell_size: f32) {
        let limit = self.replacing as f32 * cell_size;
        if self.fall < limit {
            self.fall = (self.fall + step).min(limit);
        }
    }
}

/// Fixed-size grid of obstacles, at most one per cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleGrid {
    pub columns: u32,
    pub rows: u32,
    pub cell_size: f32,
    /// Column-major: index = col * rows + row
    cells: Vec<Option<Obstacle>>,
}

impl ObstacleGrid {
    /// Empty grid
    pub fn new(columns: u32, rows: u32, cell_size: f32) -> Self {
        Self {
            columns,
            rows,
            cell_size,
            cells: vec![None; columns as usize * rows as usize],
        }
    }

    /// Populate a grid from the level layout
    pub fn build(level: &LevelConfig, tuning: &Tuning) -> Result<Self, SimError> {
        let count = (level.columns as usize).checked_mul(level.rows as usize);
        if count.is_none_or(|count| count > tuning.max_obstacles) {
            return Err(SimError::ObstaclesFull {
                capacity: tuning.max_obstacles,
            });
        }

        let mut grid = Self::new(level.columns, level.rows, tuning.cell_size);
        let (mut ice, mut piggies) = (0, 0);
        for col in 0..level.columns {
            for row in 0..level.rows {
                let kind = level.kind_at(col, row)?;
                let counter = match kind {
                    ObstacleKind::Ice => &mut ice,
                    ObstacleKind::Piggy => &mut piggies,
                };
                let id = *counter;
                *counter += 1;
                grid.insert(Obstacle::new(id, kind, col, row, level.start_x, tuning))?;
            }
        }
        log::debug!(
            "Built {}x{} obstacle grid: {} ice, {} piggies",
            level.columns,
            level.rows,
            ice,
            piggies
        );
        Ok(grid)
    }

    fn slot(&self, col: u32, row: u32) -> Option<usize> {
        (col < self.columns && row < self.rows).then(|| col as usize * self.rows as usize + row as usize)
    }

    /// Place an obstacle in its (col, row) cell
    pub fn insert(&mut self, obstacle: Obstacle) -> Result<(), SimError> {
        let (col, row) = (obstacle.col, obstacle.row);
        let idx = self.slot(col, row).ok_or(SimError::OutOfGrid { col, row })?;
        if self.cells[idx].is_some() {
            return Err(SimError::CellOccupied { col, row });
        }
        self.cells[idx] = Some(obstacle);
        Ok(())
    }

    pub fn cell(&self, col: u32, row: u32) -> Option<&Obstacle> {
        self.slot(col, row).and_then(|idx| self.cells[idx].as_ref())
    }

    pub fn cell_mut(&mut self, col: u32, row: u32) -> Option<&mut Obstacle> {
        self.slot(col, row).and_then(|idx| self.cells[idx].as_mut())
    }

    /// Obstacles in column-major order
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.cells.iter().flatten()
    }

    pub fn find(&self, id: u32, kind: ObstacleKind) -> Option<&Obstacle> {
        self.iter().find(|o| o.id == id && o.kind == kind)
    }

    pub fn live_count(&self) -> usize {
        self.iter().filter(|o| !o.dead).count()
    }

    pub fn live_count_of(&self, kind: ObstacleKind) -> usize {
        self.iter().filter(|o| !o.dead && o.kind == kind).count()
    }

    /// Kill the obstacle with this id and kind and flag it for replacement
    ///
    /// Returns `true` if it was alive. Removing a dead obstacle changes nothing.
    pub fn remove_obstacle(&mut self, id: u32, kind: ObstacleKind) -> bool {
        let Some(obstacle) = self
            .cells
            .iter_mut()
            .flatten()
            .find(|o| o.id == id && o.kind == kind)
        else {
            log::warn!("No {:?} obstacle with id {}", kind, id);
            return false;
        };
        if obstacle.dead {
            return false;
        }
        obstacle.dead = true;
        obstacle.to_replace = true;
        obstacle.replacing = 0;
        log::debug!(
            "{:?} {} at ({}, {}) removed",
            kind,
            id,
            obstacle.col,
            obstacle.row
        );
        true
    }

    /// One tick of the settling cascade
    ///
    /// For every column, each cell (top to bottom, excluding row 0) absorbs the
    /// run of pending-replacement flags directly beneath it, counting one
    /// `replacing` unit per absorbed flag, then falls by `fall_step` toward
    /// `replacing × cell_size`.
    pub fn settle_cascade(&mut self, fall_step: f32) {
        let cell_size = self.cell_size;
        for col in 0..self.columns {
            for row in (1..self.rows).rev() {
                for below in (0..row).rev() {
                    let pending = self
                        .cell_mut(col, below)
                        .filter(|o| o.to_replace)
                        .map(|o| o.to_replace = false)
                        .is_some();
                    if !pending {
                        break;
                    }
                    if let Some(above) = self.cell_mut(col, row) {
                        above.to_replace = true;
                        above.replacing += 1;
                        log::debug!(
                            "Cell ({}, {}) now replacing {} below",
                            col,
                            row,
                            above.replacing
                        );
                    }
                }
                if let Some(obstacle) = self.cell_mut(col, row) {
                    obstacle.fall_by(fall_step, cell_size);
                }
            }
        }
    }
}
