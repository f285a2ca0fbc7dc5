//! CLI for maze drawing

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::Context;
use backtrack_maze::canvas::encode_ppm;
use backtrack_maze::maze_generator::MazeGenerator;
use backtrack_maze::render::{RenderOptions, Renderer};
use clap::{error::ErrorKind, CommandFactory, Parser};

/// Draw a random perfect maze and its longest solution as PPM images
///
/// Without --maze and --solution, both images are written to standard output
/// one after another: first the maze alone, then the maze with the solution.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(short = 'x', long = "width", default_value_t = 20, value_parser = parse_dimension)]
    width: usize,

    /// Maze height in cells
    #[arg(short = 'y', long = "height", default_value_t = 20, value_parser = parse_dimension)]
    height: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Row where the maze is entered from the west; random if omitted
    #[arg(long)]
    start_row: Option<usize>,

    /// Cell side in pixels
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..))]
    cell_size: u32,

    /// File for the maze without solution
    #[arg(long)]
    maze: Option<PathBuf>,

    /// File for the maze with solution
    #[arg(long)]
    solution: Option<PathBuf>,
}

/// Cell count along one axis, between 1 and `i32::MAX`
fn parse_dimension(s: &str) -> Result<usize, String> {
    match s.parse::<i32>() {
        Ok(n) if n >= 1 => usize::try_from(n).map_err(|e| e.to_string()),
        Ok(_) => Err("must be at least 1".to_string()),
        Err(_) => Err(format!("`{s}` is not a positive integer")),
    }
}

/// Generate the maze and encode it without and with its solution
fn render_images(args: &Args) -> anyhow::Result<[Vec<u8>; 2]> {
    log::info!("Random seed: {:?}", args.seed);
    let mut gen = MazeGenerator::new(args.seed);
    let maze = match args.start_row {
        Some(row) => gen.generate_maze_from(args.width, args.height, row)?,
        None => gen.generate_maze(args.width, args.height)?,
    };

    let options = RenderOptions {
        cell_size: args.cell_size,
        ..RenderOptions::default()
    };
    let mut renderer = Renderer::new(&maze, options)?;
    renderer.draw_walls(&maze)?;
    let walls = encode_ppm(renderer.canvas())?;
    renderer.draw_path(&maze);
    let solution = encode_ppm(renderer.canvas())?;
    Ok([walls, solution])
}

fn create_output(path: &PathBuf) -> anyhow::Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Write encoded images in order, each to its file or else to `stdout`
///
/// Every file is created before any image is written. If one cannot be
/// created, the files created so far are removed again.
fn emit(
    images: [&[u8]; 2],
    paths: [Option<&PathBuf>; 2],
    stdout: &mut impl Write,
) -> anyhow::Result<()> {
    let mut outputs = Vec::with_capacity(paths.len());
    for path in paths {
        match path.map(create_output).transpose() {
            Ok(output) => outputs.push(output),
            Err(err) => {
                for created in paths.iter().take(outputs.len()).flatten() {
                    let _ = fs::remove_file(created);
                }
                return Err(err);
            }
        }
    }

    for (image, output) in images.into_iter().zip(outputs.iter_mut()) {
        match output {
            Some(file) => {
                file.write_all(image)?;
                file.flush()?;
            }
            None => stdout.write_all(image)?,
        }
    }
    Ok(())
}

/// Generate maze, draw it twice, write both images
fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(
        env_logger::Env::new()
            .filter("MAZE_LOG")
            .write_style("MAZE_LOG_STYLE"),
    );
    let args = Args::parse();

    if let Some(row) = args.start_row {
        if row >= args.height {
            Args::command()
                .error(
                    ErrorKind::ValueValidation,
                    format!("start row {row} must be below height {}", args.height),
                )
                .exit();
        }
    }

    let [walls, solution] = render_images(&args)?;

    let mut stdout = BufWriter::new(io::stdout().lock());
    emit(
        [&walls[..], &solution[..]],
        [args.maze.as_ref(), args.solution.as_ref()],
        &mut stdout,
    )?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use backtrack_maze::canvas::encode_ppm;
    use backtrack_maze::maze_generator::MazeGenerator;
    use backtrack_maze::render::{RenderOptions, Renderer};
    use clap::{error::ErrorKind, Parser};

    use crate::{emit, render_images, Args};

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("backtrack-maze").chain(args.iter().copied()))
    }

    #[test]
    fn dimensions_default_to_twenty() {
        let args = parse(&[]).unwrap();
        assert_eq!((args.width, args.height), (20, 20));
        assert_eq!(args.cell_size, 20);

        let args = parse(&["-x", "7", "-y", "3"]).unwrap();
        assert_eq!((args.width, args.height), (7, 3));
    }

    #[test]
    fn bad_dimensions_are_usage_errors() {
        for bad in [["-x", "0"], ["-y", "0"], ["-x", "abc"], ["-y", "3000000000"]] {
            let err = parse(&bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation, "{bad:?}");
        }
        assert!(parse(&["--width=-3"]).is_err());
        assert!(parse(&["-x", "-3"]).is_err());
        assert!(parse(&["--cell-size", "0"]).is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parse(&["-q"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn images_are_written_walls_first() {
        let args = parse(&["-x", "5", "-y", "4", "--seed", "3"]).unwrap();
        let [walls, solution] = render_images(&args).unwrap();
        assert_ne!(walls, solution);

        // Same seed, drawn by hand up to the walls
        let maze = MazeGenerator::new(Some(3)).generate_maze(5, 4).unwrap();
        let mut renderer = Renderer::new(&maze, RenderOptions::default()).unwrap();
        renderer.draw_walls(&maze).unwrap();
        assert_eq!(walls, encode_ppm(renderer.canvas()).unwrap());

        let mut out = Vec::new();
        emit([&walls[..], &solution[..]], [None, None], &mut out).unwrap();
        assert_eq!(out.len(), walls.len() + solution.len());
        assert_eq!(&out[..walls.len()], &walls[..]);
        assert_eq!(&out[walls.len()..], &solution[..]);
    }

    #[test]
    fn failed_output_leaves_no_files() {
        let dir = env::temp_dir().join(format!("backtrack-maze-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let maze_path = dir.join("maze.ppm");
        let solution_path = dir.join("missing").join("solution.ppm");

        let images = [&b"first"[..], &b"second"[..]];
        let mut out = Vec::new();
        let res = emit(images, [Some(&maze_path), Some(&solution_path)], &mut out);
        assert!(res.is_err());
        assert!(!maze_path.exists());
        assert!(out.is_empty());

        let solution_path = dir.join("solution.ppm");
        emit(images, [Some(&maze_path), Some(&solution_path)], &mut out).unwrap();
        assert_eq!(fs::read(&maze_path).unwrap(), b"first");
        assert_eq!(fs::read(&solution_path).unwrap(), b"second");
        assert!(out.is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }
}
