//! Next-step hint: breadth-first search from the player to the exit.

use std::collections::VecDeque;

use crate::grid::{Dir, Grid};

/// Returns the first move along a shortest path from the player to the
/// exit, or `None` when no path exists. Neighbors expand in the fixed
/// order of [`Dir::ALL`], so ties between equally short paths resolve the
/// same way on every call.
pub fn hint(grid: &Grid) -> Option<Dir> {
    let player = grid.player();
    let exit = grid.exit();
    if player == exit {
        return None;
    }

    // An adjacent exit short-circuits the parent walk entirely.
    for dir in Dir::ALL {
        if step(player, dir) == (exit.0 as isize, exit.1 as isize) {
            return Some(dir);
        }
    }

    let (rows, cols) = (grid.rows(), grid.cols());
    let mut visited = vec![false; rows * cols];
    let mut parent: Vec<Option<(usize, usize)>> = vec![None; rows * cols];
    let idx = |r: usize, c: usize| r * cols + c;

    let mut queue = VecDeque::new();
    visited[idx(player.0, player.1)] = true;
    queue.push_back(player);

    let mut found = false;
    while let Some((r, c)) = queue.pop_front() {
        if (r, c) == exit {
            found = true;
            break;
        }
        for dir in Dir::ALL {
            let (nr, nc) = step((r, c), dir);
            if !grid.is_walkable(nr, nc) {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if !visited[idx(nr, nc)] {
                visited[idx(nr, nc)] = true;
                parent[idx(nr, nc)] = Some((r, c));
                queue.push_back((nr, nc));
            }
        }
    }

    if !found {
        return None;
    }

    // Walk parent links back from the exit until the cell whose parent is
    // the player; that cell is the first step of the path.
    let mut first = exit;
    while let Some(prev) = parent[idx(first.0, first.1)] {
        if prev == player {
            break;
        }
        first = prev;
    }

    Dir::from_delta(
        first.0 as isize - player.0 as isize,
        first.1 as isize - player.1 as isize,
    )
}

fn step((r, c): (usize, usize), dir: Dir) -> (isize, isize) {
    let (dr, dc) = dir.delta();
    (r as isize + dr, c as isize + dc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn straight_corridor_hints_right() {
        let grid = Grid::load(&[
            "#####",
            "#P E#",
            "#####",
            "#####",
            "#####",
        ])
        .unwrap();
        assert_eq!(hint(&grid), Some(Dir::Right));
    }

    #[test]
    fn hint_is_deterministic_across_calls() {
        // Two equally short paths around the center block.
        let grid = Grid::load(&[
            "#######",
            "#P   ##",
            "# # # #",
            "#   E #",
            "#######",
        ])
        .unwrap();
        let first = hint(&grid);
        assert!(first.is_some());
        for _ in 0..10 {
            assert_eq!(hint(&grid), first);
        }
    }

    #[test]
    fn walled_off_exit_yields_no_hint() {
        let grid = Grid::load(&[
            "#######",
            "#P # E#",
            "#######",
        ])
        .unwrap();
        assert_eq!(hint(&grid), None);
    }

    #[test]
    fn adjacent_exit_resolves_to_the_direct_move() {
        let grid = Grid::load(&["####", "#PE#", "####"]).unwrap();
        assert_eq!(hint(&grid), Some(Dir::Right));

        let grid = Grid::load(&["###", "#E#", "#P#", "###"]).unwrap();
        assert_eq!(hint(&grid), Some(Dir::Up));
    }

    #[test]
    fn hint_follows_a_bent_corridor() {
        let grid = Grid::load(&[
            "#####",
            "#P###",
            "# ###",
            "#  E#",
            "#####",
        ])
        .unwrap();
        assert_eq!(hint(&grid), Some(Dir::Down));
    }
}
