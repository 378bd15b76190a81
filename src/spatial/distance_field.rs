//! Multi-source weighted Dijkstra from the three far map corners
//!
//! Crossing a resource costs the time needed to chop through it, every other
//! step costs 1. Uses a best-known-distance grid and a heap that tolerates
//! stale entries instead of removing queued cells.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Write;

use crate::core::types::Cell;
use crate::spatial::grid::Grid;
use crate::spatial::occupancy::OccupancyGrid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    distances: Grid<Option<u32>>,
    settle_order: Vec<Cell>,
}

impl DistanceField {
    /// Every corner except the origin, which is the own base corner
    pub fn sources(map_size: i32) -> Vec<Cell> {
        let far = map_size - 1;
        let mut sources = Vec::with_capacity(3);
        for corner in [Cell::new(far, 0), Cell::new(0, far), Cell::new(far, far)] {
            if !sources.contains(&corner) {
                sources.push(corner);
            }
        }
        sources
    }

    pub fn compute(grid: &OccupancyGrid, resource_step_cost: u32) -> Self {
        let map_size = grid.map_size();
        let mut distances: Grid<Option<u32>> = Grid::new(map_size);
        let mut settled: Grid<bool> = Grid::new(map_size);
        let mut settle_order = Vec::new();

        if map_size == 0 {
            return Self {
                distances,
                settle_order,
            };
        }

        // Key: (distance, x, y) so ties settle in coordinate order
        let mut heap: BinaryHeap<Reverse<(u32, i32, i32)>> = BinaryHeap::new();
        for source in Self::sources(map_size) {
            distances.set(source, Some(0));
            heap.push(Reverse((0, source.x, source.y)));
        }

        while let Some(Reverse((dist, x, y))) = heap.pop() {
            let cell = Cell::new(x, y);
            if settled.get(cell) == Some(&true) || distances.get(cell) != Some(&Some(dist)) {
                continue;
            }
            settled.set(cell, true);
            settle_order.push(cell);

            for next in cell.neighbors() {
                if !grid.in_bounds(next) || settled.get(next) == Some(&true) {
                    continue;
                }
                let step = if grid.is_resource(next) {
                    resource_step_cost
                } else {
                    1
                };
                let candidate = dist.saturating_add(step);
                let improves = match distances.get(next) {
                    Some(Some(best)) => candidate < *best,
                    _ => true,
                };
                if improves {
                    distances.set(next, Some(candidate));
                    heap.push(Reverse((candidate, next.x, next.y)));
                }
            }
        }

        Self {
            distances,
            settle_order,
        }
    }

    /// Distance from the nearest source, `None` if unreachable or off-map
    pub fn get(&self, cell: Cell) -> Option<u32> {
        self.distances.get(cell).copied().flatten()
    }

    pub fn map_size(&self) -> i32 {
        self.distances.size
    }

    /// Cells in the order they were settled
    pub fn settle_order(&self) -> &[Cell] {
        &self.settle_order
    }

    /// Text dump, one row per `y` from the top of the map down
    pub fn render(&self) -> String {
        let mut out = String::new();
        for y in (0..self.map_size()).rev() {
            let row: Vec<String> = (0..self.map_size())
                .map(|x| match self.get(Cell::new(x, y)) {
                    Some(d) => format!("{:>3}", d),
                    None => "  .".to_string(),
                })
                .collect();
            let _ = writeln!(out, "{}", row.join(""));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityId;
    use crate::model::entity::EntityKind;
    use crate::spatial::occupancy::Occupant;

    fn resource(id: u32) -> Occupant {
        Occupant {
            id: EntityId(id),
            kind: EntityKind::Resource,
            movable: false,
        }
    }

    #[test]
    fn test_open_map_is_distance_to_nearest_corner() {
        let grid = OccupancyGrid::new(5);
        let field = DistanceField::compute(&grid, 7);

        assert_eq!(field.get(Cell::new(4, 0)), Some(0));
        assert_eq!(field.get(Cell::new(0, 4)), Some(0));
        assert_eq!(field.get(Cell::new(4, 4)), Some(0));
        // Origin is 4 steps from the two adjacent corners
        assert_eq!(field.get(Cell::new(0, 0)), Some(4));
        assert_eq!(field.get(Cell::new(2, 2)), Some(4));
        assert_eq!(field.get(Cell::new(1, 0)), Some(3));
    }

    #[test]
    fn test_resource_cells_cost_more_to_enter() {
        let mut grid = OccupancyGrid::new(5);
        // Wall of resources on column x = 3
        for y in 0..5 {
            grid.place(resource(y as u32 + 1), Cell::new(3, y), 1).unwrap();
        }
        let field = DistanceField::compute(&grid, 7);

        // (3, 0) is entered from the (4, 0) corner
        assert_eq!(field.get(Cell::new(3, 0)), Some(7));
        // (0, 0) is still reached from the (0, 4) corner around nothing
        assert_eq!(field.get(Cell::new(0, 0)), Some(4));
        // (2, 0): 6 steps from (0, 4) vs 8 through the wall
        assert_eq!(field.get(Cell::new(2, 0)), Some(6));
    }

    #[test]
    fn test_huge_resource_cost_saturates() {
        let mut grid = OccupancyGrid::new(10);
        // Columns x = 3 and x = 6 cut the map into three bands
        for y in 0..10 {
            grid.place(resource(y as u32 + 1), Cell::new(3, y), 1).unwrap();
            grid.place(resource(y as u32 + 11), Cell::new(6, y), 1).unwrap();
        }
        let field = DistanceField::compute(&grid, u32::MAX);

        assert_eq!(field.settle_order().len(), 100);
        assert_eq!(field.get(Cell::new(0, 0)), Some(9));
        assert_eq!(field.get(Cell::new(3, 5)), Some(u32::MAX));
        assert_eq!(field.get(Cell::new(5, 5)), Some(u32::MAX));
        assert_eq!(field.get(Cell::new(7, 5)), Some(2));
    }

    #[test]
    fn test_recompute_is_identical() {
        let mut grid = OccupancyGrid::new(8);
        grid.place(resource(1), Cell::new(4, 4), 1).unwrap();
        grid.place(resource(2), Cell::new(5, 4), 1).unwrap();

        let first = DistanceField::compute(&grid, 7);
        let second = DistanceField::compute(&grid, 7);
        assert_eq!(first, second);
        assert_eq!(first.settle_order(), second.settle_order());
    }

    #[test]
    fn test_every_cell_settled_once() {
        let grid = OccupancyGrid::new(6);
        let field = DistanceField::compute(&grid, 7);
        assert_eq!(field.settle_order().len(), 36);

        let mut seen = std::collections::HashSet::new();
        for cell in field.settle_order() {
            assert!(seen.insert(*cell));
        }
    }

    #[test]
    fn test_settle_order_is_non_decreasing() {
        let mut grid = OccupancyGrid::new(7);
        grid.place(resource(1), Cell::new(3, 3), 1).unwrap();
        let field = DistanceField::compute(&grid, 7);

        let dists: Vec<u32> = field
            .settle_order()
            .iter()
            .map(|c| field.get(*c).unwrap())
            .collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_single_cell_map() {
        let grid = OccupancyGrid::new(1);
        let field = DistanceField::compute(&grid, 7);
        assert_eq!(DistanceField::sources(1), vec![Cell::new(0, 0)]);
        assert_eq!(field.get(Cell::new(0, 0)), Some(0));
    }

    #[test]
    fn test_off_map_has_no_distance() {
        let field = DistanceField::compute(&OccupancyGrid::new(3), 7);
        assert_eq!(field.get(Cell::new(3, 0)), None);
        assert_eq!(field.render().lines().count(), 3);
    }
}
