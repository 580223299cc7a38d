use std::process::ExitCode;

use log::info;
use maze::{
    config::{Config, ConfigError},
    util::{load_maze, render_img, save_img},
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config =
        match Config::from_args_and_env(std::env::args().skip(1), |key| std::env::var(key).ok()) {
            Ok(config) => config,
            Err(err @ ConfigError::Usage) => {
                eprintln!("{}", err);
                return ExitCode::from(2);
            }
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            }
        };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), anyhow::Error> {
    let maze = load_maze(&config.maze_path)?;

    println!("Maze:");
    println!();
    print!("{}", maze);
    println!();

    println!("Solving...");
    let mut finder = maze.path_finder(config.policy);
    let solution = finder.solve(&maze)?;

    println!("States Explored: {}", finder.num_explored());
    println!("Solution:");
    println!();
    print!("{}", maze.overlay(Some(&solution.cells), None));
    println!();

    let img = render_img(
        &maze,
        Some(&solution),
        Some(finder.explored()),
        &config.render,
    );
    save_img(&img, &config.output)?;
    info!("wrote {}", config.output.display());

    Ok(())
}
