use std::{collections::HashSet, path::Path};

use anyhow::Context;
use image::{Rgba, RgbaImage};

use crate::{config::RenderOptions, Maze, MazeSolution, Point, Tile};

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub fn tile_color(tile: Tile) -> Rgba<u8> {
    match tile {
        Tile::Wall => Rgba([40, 40, 40, 255]),
        Tile::Start => Rgba([255, 0, 0, 255]),
        Tile::Goal => Rgba([0, 171, 28, 255]),
        Tile::Solution => Rgba([220, 235, 113, 255]),
        Tile::Explored => Rgba([212, 97, 85, 255]),
        Tile::Empty => Rgba([237, 240, 252, 255]),
    }
}

/// Read and parse a maze text file
pub fn load_maze(path: impl AsRef<Path>) -> Result<Maze, anyhow::Error> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read maze from {}", path.display()))?;

    let maze = contents
        .parse::<Maze>()
        .with_context(|| format!("invalid maze in {}", path.display()))?;

    log::debug!(
        "loaded {}x{} maze from {}",
        maze.height(),
        maze.width(),
        path.display()
    );
    Ok(maze)
}

/// Draw every cell of the maze as a filled square with a black border around it.
/// The path and the explored cells are only drawn when there is a solution.
pub fn render_img(
    maze: &Maze,
    solution: Option<&MazeSolution>,
    explored: Option<&HashSet<Point>>,
    options: &RenderOptions,
) -> RgbaImage {
    let size = options.cell_size;
    let border = options.cell_border;

    let mut img = RgbaImage::from_pixel(
        maze.width() as u32 * size,
        maze.height() as u32 * size,
        BACKGROUND,
    );

    let path: Option<HashSet<Point>> = solution
        .filter(|_| options.show_solution)
        .map(|s| s.cells.iter().copied().collect());
    let explored = explored.filter(|_| solution.is_some() && options.show_explored);

    for row in 0..maze.height() {
        for col in 0..maze.width() {
            let color = tile_color(maze.tile_at(Point { row, col }, path.as_ref(), explored));

            let (x, y) = (col as u32 * size, row as u32 * size);
            fill_rect(
                &mut img,
                (x + border, y + border),
                ((x + size).saturating_sub(border), (y + size).saturating_sub(border)),
                color,
            );
        }
    }

    img
}

/// Both corners are inclusive, pixels outside of the image are skipped
fn fill_rect(img: &mut RgbaImage, from: (u32, u32), to: (u32, u32), color: Rgba<u8>) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    let x_end = to.0.min(img.width().saturating_sub(1));
    let y_end = to.1.min(img.height().saturating_sub(1));

    for y in from.1..=y_end {
        for x in from.0..=x_end {
            img.put_pixel(x, y, color);
        }
    }
}

pub fn save_img(img: &RgbaImage, path: impl AsRef<Path>) -> Result<(), anyhow::Error> {
    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("failed to write image to {}", path.display()))
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::FrontierPolicy;

    fn small_options() -> RenderOptions {
        RenderOptions {
            cell_size: 4,
            cell_border: 1,
            show_solution: true,
            show_explored: true,
        }
    }

    #[test]
    fn test_render_size_and_borders() {
        let maze: Maze = "A#B".parse().unwrap();
        let img = render_img(&maze, None, None, &RenderOptions::default());

        assert_eq!(img.dimensions(), (150, 50));
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(1, 25), BACKGROUND);
        assert_eq!(*img.get_pixel(2, 2), tile_color(Tile::Start));
        assert_eq!(*img.get_pixel(48, 48), tile_color(Tile::Start));
        assert_eq!(*img.get_pixel(49, 48), BACKGROUND);
        assert_eq!(*img.get_pixel(75, 25), tile_color(Tile::Wall));
        assert_eq!(*img.get_pixel(125, 25), tile_color(Tile::Goal));
    }

    #[test]
    fn test_render_solution_and_explored() {
        let maze: Maze = "A  \n# B".parse().unwrap();
        let mut finder = maze.path_finder(FrontierPolicy::Queue);
        let solution = finder.solve(&maze).unwrap();
        let options = small_options();

        // (1, 1) reaches the goal before (0, 2) gets expanded
        assert_eq!(
            solution.cells,
            vec![Point::new(0, 1), Point::new(1, 1), Point::new(1, 2)]
        );
        assert!(finder.explored().contains(&Point::new(0, 2)));

        let img = render_img(&maze, Some(&solution), Some(finder.explored()), &options);
        assert_eq!(*img.get_pixel(6, 2), tile_color(Tile::Solution));
        assert_eq!(*img.get_pixel(6, 6), tile_color(Tile::Solution));
        assert_eq!(*img.get_pixel(10, 2), tile_color(Tile::Explored));
        assert_eq!(*img.get_pixel(2, 6), tile_color(Tile::Wall));

        let img = render_img(
            &maze,
            Some(&solution),
            Some(finder.explored()),
            &RenderOptions {
                show_solution: false,
                show_explored: false,
                ..options
            },
        );
        assert_eq!(*img.get_pixel(6, 6), tile_color(Tile::Empty));
        assert_eq!(*img.get_pixel(10, 2), tile_color(Tile::Empty));
    }

    #[test]
    fn test_render_explored_needs_solution() {
        let maze: Maze = "A \n#B".parse().unwrap();
        let explored = HashSet::from([Point::new(0, 1)]);

        let img = render_img(&maze, None, Some(&explored), &small_options());
        assert_eq!(*img.get_pixel(6, 2), tile_color(Tile::Empty));
    }

    #[test]
    fn test_load_data_maze() {
        let maze = load_maze(concat!(env!("CARGO_MANIFEST_DIR"), "/data/maze1.txt")).unwrap();
        assert_eq!(maze.start(), Point::new(5, 0));
        assert_eq!(maze.goal(), Point::new(0, 5));

        let solution = maze
            .path_finder(FrontierPolicy::Queue)
            .solve(&maze)
            .unwrap();
        assert_eq!(solution.len(), 10);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_maze("does/not/exist.txt").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.txt"));
    }
}
