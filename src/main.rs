// Accessors kept for tests and debugging
#![allow(dead_code)]

mod display;
mod game;
mod geometry;
mod maze;
mod util;

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use display::{Display, InputEvent, MouseButtonKind, RenderTarget, Screen};
use game::{ClickTracker, GameConfig, InputRecord, Outcome, Session, DEFAULT_CONFIG_PATH};
use log::{debug, error, info, warn};
use maze::MazeGenerator;
use util::{Clock, FpsCounter, MonotonicClock};

/// Frames between FPS reports at debug level
const FPS_REPORT_FRAMES: u64 = 2000;

/// Command line overrides on top of the config file
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    difficulty: Option<usize>,
    accent: Option<usize>,
    timing: bool,
    seed: Option<u64>,
    config_path: Option<String>,
    no_vsync: bool,
    help: bool,
}

impl CliArgs {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(accent) = self.accent {
            config.accent = accent;
        }
        if self.timing {
            config.timing = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_vsync {
            config.vsync = false;
        }
    }
}

/// Parse command line arguments (program name first)
fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => cli.no_vsync = true,
            "--timing" | "-t" => cli.timing = true,
            "--help" | "-h" => cli.help = true,
            "--difficulty" | "-d" => {
                cli.difficulty = Some(parse_value(args, i)?);
                i += 1;
            },
            "--accent" | "-a" => {
                cli.accent = Some(parse_value(args, i)?);
                i += 1;
            },
            "--seed" | "-s" => {
                cli.seed = Some(parse_value(args, i)?);
                i += 1;
            },
            "--config" | "-c" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow!("{} needs a path", args[i]))?;
                cli.config_path = Some(path.clone());
                i += 1;
            },
            other => bail!("unknown option {} (try --help)", other),
        }
        i += 1;
    }

    Ok(cli)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize) -> Result<T> {
    let flag = &args[i];
    let value = args.get(i + 1).ok_or_else(|| anyhow!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| anyhow!("invalid value {:?} for {}", value, flag))
}

fn print_help() {
    println!("Usage: mazefacer [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --difficulty N, -d N  Maze size 0-4 (default: 0)");
    println!("  --accent N, -a N      Color accent 0-1 (default: 1)");
    println!("  --timing, -t          Print the solve time on a win");
    println!("  --seed N, -s N        Fixed maze seed");
    println!(
        "  --config PATH, -c PATH  JSON options file (default: {})",
        DEFAULT_CONFIG_PATH
    );
    println!("  --no-vsync            Disable VSync");
    println!("  --help, -h            Show this help message");
}

/// Config file first, then command line overrides
fn load_config(cli: &CliArgs) -> Result<GameConfig> {
    let mut config = if let Some(path) = cli.config_path.as_deref() {
        let config = GameConfig::load(path)?;
        info!("loaded options from {}", path);
        config
    } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
        match GameConfig::load(DEFAULT_CONFIG_PATH) {
            Ok(config) => {
                info!("loaded options from {}", DEFAULT_CONFIG_PATH);
                config
            },
            Err(e) => {
                warn!("{:#}; using defaults", e);
                GameConfig::default()
            },
        }
    } else {
        GameConfig::default()
    };
    cli.apply(&mut config);
    config.validate().context("invalid options")?;
    Ok(config)
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args)?;
    if cli.help {
        print_help();
        return Ok(());
    }
    let config = load_config(&cli)?;
    let difficulty = config.difficulty();
    let (width, height) = (difficulty.window_width, difficulty.window_height);

    let (display, texture_creator) =
        Display::with_options("Maze", width, height, config.vsync).map_err(|e| anyhow!(e))?;
    let target = RenderTarget::with_size(&texture_creator, width, height).map_err(|e| anyhow!(e))?;
    let mut screen = Screen::new(display, target);

    let generator = config
        .seed
        .map_or_else(MazeGenerator::from_time, MazeGenerator::from_seed);
    let mut session = Session::new(&config, generator);
    let clock = MonotonicClock::new();
    let mut clicks = ClickTracker::new(width, height);
    let mut fps = FpsCounter::new(120, clock.now());

    println!("=== mazefacer ===");
    println!(
        "Maze: {}x{} cells, window {}x{}",
        difficulty.maze_width, difficulty.maze_height, width, height
    );
    if config.vsync {
        println!("VSync: ON. Use --no-vsync to turn it off.");
    } else {
        println!("VSync: OFF");
    }
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  WASD / Arrows - Move");
    println!("  Space         - Toggle hint");
    println!("  Return        - New maze");
    println!("  Escape        - Quit");

    session.new_game(clock.now(), &mut screen).map_err(|e| anyhow!(e))?;

    let mut wins = 0u32;
    let mut frames = 0u64;
    'main: loop {
        let now = clock.now();
        let mut record = InputRecord::new();

        let events = screen.display_mut().poll_events();
        for event in events {
            match event {
                InputEvent::Quit => {
                    info!("window closed");
                    break 'main;
                },
                InputEvent::Exposed => session.redraw(&mut screen).map_err(|e| anyhow!(e))?,
                InputEvent::MouseDown {
                    x,
                    y,
                    button: MouseButtonKind::Left,
                } => clicks.button(true, (x as f32, y as f32), now, &mut record),
                InputEvent::MouseUp {
                    x,
                    y,
                    button: MouseButtonKind::Left,
                } => clicks.button(false, (x as f32, y as f32), now, &mut record),
                _ => {},
            }
        }
        clicks.update(now, &mut record);
        if record.single_click || record.double_click {
            debug!(
                "{} click at ({:.3}, {:.3})",
                if record.double_click { "double" } else { "single" },
                record.click_pos.0,
                record.click_pos.1
            );
        }
        screen.display().sample_keys(&mut record);

        match session.tick(now, &record, &mut screen).map_err(|e| anyhow!(e))? {
            Outcome::Won { elapsed } => {
                wins += 1;
                info!("maze {} solved in {:.2}s, starting another", wins, elapsed);
                session.new_game(clock.now(), &mut screen).map_err(|e| anyhow!(e))?;
            },
            Outcome::Quit => break,
            Outcome::Continue | Outcome::Restarted => {},
        }

        let avg_fps = fps.tick(now);
        frames += 1;
        if frames % FPS_REPORT_FRAMES == 0 {
            debug!("{:.0} fps ({:.2} ms/frame)", avg_fps, fps.avg_frame_time_ms());
        }
        thread::sleep(Duration::from_millis(1));
    }

    info!("{} mazes solved", wins);
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("mazefacer")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse_args(&args(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = parse_args(&args(&[
            "--difficulty",
            "3",
            "-a",
            "0",
            "--timing",
            "--seed",
            "42",
            "--config",
            "other.json",
            "--no-vsync",
        ]))
        .unwrap();
        assert_eq!(cli.difficulty, Some(3));
        assert_eq!(cli.accent, Some(0));
        assert!(cli.timing);
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.config_path.as_deref(), Some("other.json"));
        assert!(cli.no_vsync);
        assert!(!cli.help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--difficulty"])).is_err());
        assert!(parse_args(&args(&["--seed", "abc"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = parse_args(&args(&["-d", "2", "--no-vsync"])).unwrap();
        let mut config = GameConfig {
            difficulty: 4,
            timing: true,
            ..GameConfig::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.difficulty, 2);
        assert!(config.timing, "flags that are absent keep the file value");
        assert!(!config.vsync);
        assert_eq!(config.accent, 1);
    }

    #[test]
    fn test_load_config_rejects_bad_index() {
        let cli = parse_args(&args(&["-d", "7"])).unwrap();
        let err = load_config(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("difficulty 7"));
    }

    #[test]
    fn test_explicit_config_must_load() {
        let cli = parse_args(&args(&["-c", "/nonexistent/maze.json"])).unwrap();
        let err = load_config(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/maze.json"));
    }
}
