// src/world_lib/pathfinding.rs

use std::collections::VecDeque;

use crate::world_lib::grid::{Grid, GridPos};

// Cells from start to end inclusive; empty when the end cannot be reached.
pub type PathResult = Vec<GridPos>;

pub struct PathFinder;

impl PathFinder {
    // BFS; the start cell is always traversable. Neighbour order +x, -x, +y, -y breaks ties.
    pub fn find_path(grid: &Grid, start: GridPos, end: GridPos) -> PathResult {
        if grid.get(start).is_none() || grid.get(end).is_none() {
            return Vec::new();
        }
        if start == end {
            return vec![start];
        }

        let cell_count = grid.width() * grid.height();
        let mut visited = vec![false; cell_count];
        let mut previous: Vec<Option<GridPos>> = vec![None; cell_count];
        let mut queue = VecDeque::new();

        visited[grid.index_of(start)] = true;
        queue.push_back(start);

        let mut found = false;
        while let Some(current) = queue.pop_front() {
            if current == end {
                found = true;
                break;
            }
            for next in grid.neighbors4(current) {
                let idx = grid.index_of(next);
                if !visited[idx] && grid.is_floor(next) {
                    visited[idx] = true;
                    previous[idx] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        if !found {
            return Vec::new();
        }

        let mut path = vec![end];
        let mut cursor = end;
        while let Some(prev) = previous[grid.index_of(cursor)] {
            path.push(prev);
            cursor = prev;
        }
        path.reverse();
        path
    }
}
