use crate::find::{FrontierPolicy, MapTrait, NodeReference, PathFinder};
use std::{collections::HashSet, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell coordinate, row grows downwards
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl NodeReference for Point {}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Moves one cell in the given direction. Returns `None` when the move would go above the
    /// first row or left of the first column.
    pub fn step(self, action: Action) -> Option<Point> {
        let (d_row, d_col) = action.delta();
        Some(Point {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in the order neighbors are generated
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// The (row, col) offset of this action
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Action::Up => "up",
                Action::Down => "down",
                Action::Left => "left",
                Action::Right => "right",
            }
        )
    }
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Action::Up),
            "down" => Ok(Action::Down),
            "left" => Ok(Action::Left),
            "right" => Ok(Action::Right),
            _ => Err(anyhow::anyhow!("Invalid action: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedMaze {
    #[error("maze must have exactly one start point (found {0})")]
    StartCount(usize),
    #[error("maze must have exactly one goal (found {0})")]
    GoalCount(usize),
}

/// What a single cell shows when the maze is drawn
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tile {
    Wall,
    Start,
    Goal,
    Solution,
    Explored,
    Empty,
}

impl Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Tile::Wall => "█",
                Tile::Start => "A",
                Tile::Goal => "B",
                Tile::Solution => "*",
                Tile::Explored => ".",
                Tile::Empty => " ",
            }
        )
    }
}

/// A rectangular grid of walls with a single start and a single goal.
///
/// The grid is fixed once parsed, so it can be shared between any number of searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    height: usize,
    width: usize,
    walls: Vec<Vec<bool>>,
    start: Point,
    goal: Point,
}

impl Maze {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn walls(&self) -> &[Vec<bool>] {
        &self.walls
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.height && point.col < self.width
    }

    /// Points outside of the grid count as walls
    pub fn is_wall(&self, point: Point) -> bool {
        !matches!(
            self.walls.get(point.row).and_then(|row| row.get(point.col)),
            Some(false)
        )
    }

    /// Returns the open cells next to `state`, always in the order up, down, left, right
    pub fn neighbors(&self, state: Point) -> impl Iterator<Item = (Action, Point)> + '_ {
        Action::ALL.into_iter().filter_map(move |action| {
            let next = state.step(action)?;
            (self.contains(next) && !self.is_wall(next)).then_some((action, next))
        })
    }

    /// Create a search over this maze, from its start to its goal
    pub fn path_finder(&self, policy: FrontierPolicy) -> PathFinder<Maze> {
        PathFinder::new(self.start, self.goal, policy)
    }

    pub fn tile_at(
        &self,
        point: Point,
        solution: Option<&HashSet<Point>>,
        explored: Option<&HashSet<Point>>,
    ) -> Tile {
        if self.is_wall(point) {
            Tile::Wall
        } else if point == self.start {
            Tile::Start
        } else if point == self.goal {
            Tile::Goal
        } else if solution.is_some_and(|cells| cells.contains(&point)) {
            Tile::Solution
        } else if explored.is_some_and(|cells| cells.contains(&point)) {
            Tile::Explored
        } else {
            Tile::Empty
        }
    }

    /// Text view of the maze with an optional path and explored set drawn on top
    pub fn overlay<'a>(
        &'a self,
        solution: Option<&[Point]>,
        explored: Option<&'a HashSet<Point>>,
    ) -> Overlay<'a> {
        Overlay {
            maze: self,
            solution: solution.map(|cells| cells.iter().copied().collect()),
            explored,
        }
    }
}

impl FromStr for Maze {
    type Err = MalformedMaze;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let starts = contents.matches('A').count();
        if starts != 1 {
            return Err(MalformedMaze::StartCount(starts));
        }
        let goals = contents.matches('B').count();
        if goals != 1 {
            return Err(MalformedMaze::GoalCount(goals));
        }

        let lines = split_lines(contents);
        let height = lines.len();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);

        let mut start = None;
        let mut goal = None;
        let mut walls = vec![vec![false; width]; height];

        for (row, line) in lines.iter().enumerate() {
            for col in 0..width {
                // cells past the end of a short line stay open
                walls[row][col] = match line.get(col) {
                    Some('A') => {
                        start = Some(Point { row, col });
                        false
                    }
                    Some('B') => {
                        goal = Some(Point { row, col });
                        false
                    }
                    Some(' ') | None => false,
                    Some(_) => true,
                };
            }
        }

        Ok(Maze {
            height,
            width,
            walls,
            start: start.ok_or(MalformedMaze::StartCount(0))?,
            goal: goal.ok_or(MalformedMaze::GoalCount(0))?,
        })
    }
}

/// Splits on every line boundary, `\r\n`, `\n` and a bare `\r` among them. A break at the very
/// end does not start another line.
fn split_lines(contents: &str) -> Vec<Vec<char>> {
    let mut lines = Vec::new();
    let mut line = Vec::new();
    let mut chars = contents.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(
            c,
            '\n' | '\r'
                | '\x0b'
                | '\x0c'
                | '\x1c'
                | '\x1d'
                | '\x1e'
                | '\u{85}'
                | '\u{2028}'
                | '\u{2029}'
        ) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            lines.push(std::mem::take(&mut line));
        } else {
            line.push(c);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.overlay(None, None).fmt(f)
    }
}

/// See [`Maze::overlay`]
pub struct Overlay<'a> {
    maze: &'a Maze,
    solution: Option<HashSet<Point>>,
    explored: Option<&'a HashSet<Point>>,
}

impl Display for Overlay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.maze.height {
            for col in 0..self.maze.width {
                let tile =
                    self.maze
                        .tile_at(Point { row, col }, self.solution.as_ref(), self.explored);
                write!(f, "{}", tile)?;
            }
            write!(f, "\n")?;
        }

        Ok(())
    }
}

impl MapTrait for Maze {
    type Reference = Point;
    type Action = Action;

    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Action, Self::Reference)> {
        self.neighbors(node)
    }
}
