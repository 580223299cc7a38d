use std::{
    path::Path,
    process::{Command, Output},
};

fn run_maze(args: &[&str], output_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_maze"))
        .args(args)
        .env("MAZE_OUTPUT", output_dir.join("maze.png"))
        .env_remove("MAZE_FRONTIER")
        .output()
        .unwrap()
}

fn write_maze(dir: &Path, contents: &str) -> String {
    let path = dir.join("maze.txt");
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn test_usage_exit_code() {
    let dir = tempfile::tempdir().unwrap();

    for args in [vec![], vec!["a.txt", "b.txt"]] {
        let output = run_maze(&args, dir.path());
        assert_eq!(output.status.code(), Some(2));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: maze <maze.txt>"));
    }
}

#[test]
fn test_no_solution_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let maze = write_maze(dir.path(), "A#B\n");

    let output = run_maze(&[maze.as_str()], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no solution"));
    assert!(!dir.path().join("maze.png").exists());
}

#[test]
fn test_malformed_maze_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let maze = write_maze(dir.path(), "A#A\n");

    let output = run_maze(&[maze.as_str()], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("maze must have exactly one start point (found 2)"));
}

#[test]
fn test_solved_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let maze = concat!(env!("CARGO_MANIFEST_DIR"), "/data/maze1.txt");

    let output = run_maze(&[maze], dir.path());
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let maze_at = stdout.find("Maze:").unwrap();
    let solving_at = stdout.find("Solving...").unwrap();
    let explored_at = stdout.find("States Explored: 11").unwrap();
    let solution_at = stdout.find("Solution:").unwrap();
    assert!(maze_at < solving_at && solving_at < explored_at && explored_at < solution_at);

    // the path is drawn after "Solution:" only
    assert!(!stdout[..solution_at].contains('*'));
    assert_eq!(stdout[solution_at..].matches('*').count(), 9);

    let img = image::open(dir.path().join("maze.png")).unwrap();
    assert_eq!((img.width(), img.height()), (350, 300));
}
