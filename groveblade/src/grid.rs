//! Row-major grid used for layered map layouts.
//!
//! Provides coordinate conversion between grid cells and world pixels, and
//! iteration in a fixed row-then-column order so anything built from a grid
//! gets stable, load-order ids.

use crate::error::LevelError;
use crate::math::Vec2;

/// A cell position in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Grid that stores one value per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cell_size: f32,
    cells: Vec<T>, // Row-major: [y * width + x]
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `default`.
    pub fn new(width: usize, height: usize, cell_size: f32, default: T) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![default; width * height],
        }
    }

    /// Build a grid from rows. Every row must have the same length.
    pub fn from_rows(layer: &str, rows: Vec<Vec<T>>, cell_size: f32) -> Result<Self, LevelError> {
        let width = rows.first().map_or(0, Vec::len);
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(LevelError::RaggedLayer {
                    layer: layer.to_string(),
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            width,
            height,
            cell_size,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Size of each cell in world pixels.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of a cell's top-left corner.
    pub fn grid_to_world_top_left(&self, coord: GridCoord) -> Vec2 {
        Vec2::new(
            coord.x as f32 * self.cell_size,
            coord.y as f32 * self.cell_size,
        )
    }

    pub fn is_valid(&self, coord: &GridCoord) -> bool {
        coord.x >= 0
            && coord.x < self.width as i32
            && coord.y >= 0
            && coord.y < self.height as i32
    }

    /// Returns `None` if the coordinate is out of bounds.
    pub fn get(&self, coord: GridCoord) -> Option<&T> {
        if !self.is_valid(&coord) {
            return None;
        }
        let index = (coord.y as usize) * self.width + (coord.x as usize);
        self.cells.get(index)
    }

    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: GridCoord, value: T) -> bool {
        if !self.is_valid(&coord) {
            return false;
        }
        let index = (coord.y as usize) * self.width + (coord.x as usize);
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over all cells, row by row, with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &T)> {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let coord = GridCoord::new((index % width) as i32, (index / width) as i32);
            (coord, cell)
        })
    }

    /// Copy the cells back out as rows, the inverse of [`Grid::from_rows`].
    pub fn rows(&self) -> Vec<Vec<T>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.cells.chunks(self.width).map(<[T]>::to_vec).collect()
    }
}
