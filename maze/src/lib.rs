//! Solve text mazes with depth-first or breadth-first search.
//!
//! A maze is parsed from text where `A` marks the start, `B` the goal, a space an open cell and
//! anything else a wall. [`PathFinder`] runs the search, [`util::render_img`] and
//! [`Maze::overlay`] draw the result.

pub mod config;
mod find;
mod grid;
pub mod util;

pub use find::{
    EmptyFrontier, Frontier, FrontierPolicy, MapTrait, Node, NodeArena, NodeId, NodeReference,
    PathFinder, SearchError, SearchState, Solution,
};
pub use grid::{Action, MalformedMaze, Maze, Overlay, Point, Tile};

/// A solution through a [`Maze`]
pub type MazeSolution = Solution<Action, Point>;
