//! Generic square grid for per-cell map data

use crate::core::types::Cell;

/// Square grid with one value per map cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T: Clone + Default> {
    pub size: i32,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            size,
            data: vec![T::default(); (size as usize) * (size as usize)],
        }
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.size && cell.y < self.size
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.y as usize * self.size as usize + cell.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index(cell).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        self.index(cell).map(move |i| &mut self.data[i])
    }

    #[inline]
    pub fn set(&mut self, cell: Cell, value: T) {
        if let Some(i) = self.index(cell) {
            self.data[i] = value;
        }
    }

    /// True if the whole `size`-wide footprint at `origin` is on the map
    pub fn footprint_in_bounds(&self, origin: Cell, size: i32) -> bool {
        self.in_bounds(origin) && self.in_bounds(origin.offset(size - 1, size - 1))
    }

    /// All cells, `x` major then `y`
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |y| Cell::new(x, y)))
    }
}
