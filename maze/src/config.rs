use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::FrontierPolicy;

pub const USAGE: &str = "Usage: maze <maze.txt>";

/// Environment variable selecting the frontier policy, `stack` or `queue`
pub const ENV_FRONTIER: &str = "MAZE_FRONTIER";
/// Environment variable overriding where the image is written
pub const ENV_OUTPUT: &str = "MAZE_OUTPUT";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Side length of a cell in pixels
    pub cell_size: u32,
    /// Pixels left black on every side of a cell
    pub cell_border: u32,
    pub show_solution: bool,
    pub show_explored: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cell_size: 50,
            cell_border: 2,
            show_solution: true,
            show_explored: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{}", USAGE)]
    Usage,
    #[error("invalid value {value:?} for MAZE_FRONTIER, expected `stack` or `queue`")]
    Policy { value: String },
}

/// Settings of a single command line run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub maze_path: PathBuf,
    pub policy: FrontierPolicy,
    pub output: PathBuf,
    pub render: RenderOptions,
}

impl Config {
    /// `args` are the command line arguments without the program name, `env` looks up
    /// environment variables.
    pub fn from_args_and_env<I, F>(args: I, env: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let (Some(maze_path), None) = (args.next(), args.next()) else {
            return Err(ConfigError::Usage);
        };

        let policy = match env(ENV_FRONTIER) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Policy { value })?,
            None => FrontierPolicy::default(),
        };

        let output = env(ENV_OUTPUT).unwrap_or_else(|| "maze.png".to_string());

        Ok(Self {
            maze_path: maze_path.into(),
            policy,
            output: output.into(),
            render: RenderOptions {
                show_explored: true,
                ..Default::default()
            },
        })
    }
}
