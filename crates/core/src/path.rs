//! Path module - turn-limited connection search
//!
//! Two tiles connect when an axis-aligned polyline joins them through empty
//! cells (the border ring counts as empty) using at most `max_turns`
//! direction changes. Among all such routes the search returns one with the
//! fewest turns.
//!
//! The search runs over `(position, direction)` states. Turn costs are 0 or 1,
//! so the frontier is a bucket queue indexed by turn count: buckets are
//! drained in increasing order and each bucket is FIFO, which gives
//! turn-minimal results with discovery-order tie breaking. A state is only
//! (re)queued when it improves the best turn count recorded for it.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::Board;
use crate::types::{Direction, Position, MAX_PATH_POINTS, MAX_TURNS_LIMIT};

/// Corner-compressed route between two tiles.
///
/// Holds the start, every direction change, and the end. Consumed by
/// renderers; game logic only cares whether a path exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionPath {
    points: ArrayVec<Position, MAX_PATH_POINTS>,
}

impl ConnectionPath {
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn start(&self) -> Position {
        self.points[0]
    }

    pub fn end(&self) -> Position {
        self.points[self.points.len() - 1]
    }

    /// Number of direction changes along the path
    pub fn turns(&self) -> usize {
        self.points.len().saturating_sub(2)
    }

    /// Every cell the path passes through, endpoints included.
    pub fn cells(&self) -> Vec<Position> {
        let mut out = Vec::new();
        out.push(self.start());
        for seg in self.points.windows(2) {
            let (from, to) = (seg[0], seg[1]);
            let dx = (to.x - from.x).signum();
            let dy = (to.y - from.y).signum();
            let mut cur = from;
            while cur != to {
                cur = Position::new(cur.x + dx, cur.y + dy);
                out.push(cur);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    pos: Position,
    dir: Direction,
    turns: u8,
    parent: Option<usize>,
}

/// Find a turn-minimal path from `from` to `to`.
///
/// Only the two endpoints may hold tiles; every intermediate cell must be
/// empty. Returns `None` when `from == to`, when either endpoint is off the
/// board, or when no route within `max_turns` exists. `max_turns` is clamped
/// to [`MAX_TURNS_LIMIT`].
pub fn find_path(
    board: &Board,
    from: Position,
    to: Position,
    max_turns: u8,
) -> Option<ConnectionPath> {
    if from == to || !board.in_bounds(from) || !board.in_bounds(to) {
        return None;
    }

    let max_turns = max_turns.min(MAX_TURNS_LIMIT);
    let width = board.width() as usize;
    let cell_index = |p: Position| (p.y as usize) * width + (p.x as usize);

    let mut best = vec![[u8::MAX; 4]; width * board.height() as usize];
    let mut nodes: Vec<Node> = Vec::with_capacity(64);
    let mut buckets: [VecDeque<usize>; MAX_TURNS_LIMIT as usize + 1] = Default::default();

    // First legs out of `from` cost nothing.
    for dir in Direction::ALL {
        let next = from.step(dir);
        if next == to {
            return compress(from, &[to]);
        }
        if board.is_empty(next) {
            best[cell_index(next)][dir.index()] = 0;
            nodes.push(Node {
                pos: next,
                dir,
                turns: 0,
                parent: None,
            });
            buckets[0].push_back(nodes.len() - 1);
        }
    }

    for t in 0..=max_turns as usize {
        while let Some(id) = buckets[t].pop_front() {
            let node = nodes[id];
            if node.pos == to {
                return rebuild(from, &nodes, id);
            }
            if node.turns > best[cell_index(node.pos)][node.dir.index()] {
                // Superseded by a cheaper visit of the same state.
                continue;
            }

            for dir in Direction::ALL {
                if dir == node.dir.opposite() {
                    continue;
                }
                let turns = if dir == node.dir {
                    node.turns
                } else {
                    node.turns + 1
                };
                if turns > max_turns {
                    continue;
                }

                let next = node.pos.step(dir);
                let reached = next == to;
                if !reached && !board.is_empty(next) {
                    continue;
                }
                let slot = &mut best[cell_index(next)][dir.index()];
                if turns >= *slot {
                    continue;
                }
                *slot = turns;
                nodes.push(Node {
                    pos: next,
                    dir,
                    turns,
                    parent: Some(id),
                });
                let next_id = nodes.len() - 1;

                if reached && turns == node.turns {
                    // Nothing queued can beat the bucket being drained.
                    return rebuild(from, &nodes, next_id);
                }
                buckets[turns as usize].push_back(next_id);
            }
        }
    }

    None
}

/// Convenience wrapper: does any legal path exist?
pub fn can_connect(board: &Board, from: Position, to: Position, max_turns: u8) -> bool {
    find_path(board, from, to, max_turns).is_some()
}

fn rebuild(from: Position, nodes: &[Node], goal: usize) -> Option<ConnectionPath> {
    let mut trail = Vec::new();
    let mut cursor = Some(goal);
    while let Some(id) = cursor {
        trail.push(nodes[id].pos);
        cursor = nodes[id].parent;
    }
    trail.reverse();
    compress(from, &trail)
}

/// Drop collinear intermediate points, keeping start, corners and end.
fn compress(from: Position, rest: &[Position]) -> Option<ConnectionPath> {
    let mut points = ArrayVec::new();
    points.try_push(from).ok()?;

    let mut prev = from;
    for (i, &cur) in rest.iter().enumerate() {
        let Some(&next) = rest.get(i + 1) else {
            points.try_push(cur).ok()?;
            break;
        };
        let straight = (prev.x == cur.x && cur.x == next.x) || (prev.y == cur.y && cur.y == next.y);
        if !straight {
            points.try_push(cur).ok()?;
        }
        prev = cur;
    }

    Some(ConnectionPath { points })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i16, y: i16) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_same_cell_never_connects() {
        let board = Board::from_ascii(&["AA"]).unwrap();
        assert!(find_path(&board, p(1, 1), p(1, 1), 3).is_none());
    }

    #[test]
    fn test_adjacent_tiles_connect_straight() {
        let board = Board::from_ascii(&["AA"]).unwrap();
        let path = find_path(&board, p(1, 1), p(2, 1), 3).unwrap();
        assert_eq!(path.points(), &[p(1, 1), p(2, 1)]);
        assert_eq!(path.turns(), 0);
    }

    #[test]
    fn test_straight_line_through_gap_is_compressed() {
        let board = Board::from_ascii(&["A..A"]).unwrap();
        let path = find_path(&board, p(1, 1), p(4, 1), 3).unwrap();
        assert_eq!(path.points(), &[p(1, 1), p(4, 1)]);
        assert_eq!(path.cells(), vec![p(1, 1), p(2, 1), p(3, 1), p(4, 1)]);
    }

    #[test]
    fn test_three_turn_route_respects_limit() {
        // Interior is full, so the only routes wrap around the border ring.
        let board = Board::from_ascii(&["AB", "BA"]).unwrap();
        let path = find_path(&board, p(1, 1), p(2, 2), 3).unwrap();
        assert_eq!(path.turns(), 3);
        assert_eq!(path.points().len(), 5);
        assert!(find_path(&board, p(1, 1), p(2, 2), 2).is_none());
    }

    #[test]
    fn test_single_turn() {
        let board = Board::from_ascii(&["A.", "BA"]).unwrap();
        let path = find_path(&board, p(1, 1), p(2, 2), 3).unwrap();
        assert_eq!(path.points(), &[p(1, 1), p(2, 1), p(2, 2)]);
        assert_eq!(path.turns(), 1);
    }

    #[test]
    fn test_route_over_border_ring() {
        let board = Board::from_ascii(&["ABA"]).unwrap();
        let path = find_path(&board, p(1, 1), p(3, 1), 3).unwrap();
        assert_eq!(path.turns(), 2);
        assert_eq!(path.start(), p(1, 1));
        assert_eq!(path.end(), p(3, 1));
        for cell in &path.cells()[1..path.cells().len() - 1] {
            assert!(!board.is_content(*cell), "{cell:?} should be on the border");
        }
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let board = Board::from_ascii(&["AA"]).unwrap();
        assert!(find_path(&board, p(-1, 1), p(1, 1), 3).is_none());
        assert!(find_path(&board, p(1, 1), p(9, 9), 3).is_none());
    }

    #[test]
    fn test_cells_follow_corners() {
        let board = Board::from_ascii(&["A.", "BA"]).unwrap();
        let path = find_path(&board, p(1, 1), p(2, 2), 3).unwrap();
        assert_eq!(path.cells(), vec![p(1, 1), p(2, 1), p(2, 2)]);
    }
}
