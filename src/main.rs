use std::io::{self, BufRead};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::{Parser, Subcommand};
use colored::*;
use log::LevelFilter;

mod applier;
mod compositor;
mod config;
mod error;
mod http;
mod info;
mod launcher;
mod local;
mod logger;
mod paths;
mod save;
mod scheduler;
mod session;
mod source;
mod wallhaven;

use compositor::Compositor;
use config::{Config, SourceKind};
use http::ReqwestClient;
use launcher::ShellLauncher;
use scheduler::{Action, Scheduler, Trigger};
use session::Session;

type CliResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

// ============================================================================
// Command Line
// ============================================================================
#[derive(Debug, Parser)]
#[command(version, about = "Fetch a random wallpaper from wallhaven.cc or a local folder and set it with swaybg")]
struct Args {
    /// Config file (default: ~/.config/random-wallpaper/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Also print debug messages
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Keep rotating wallpapers; type r / i / s / q to refresh, show info, save or quit
    Run(Overrides),

    /// Fetch and apply one wallpaper, then print its info
    Refresh(Overrides),

    /// Print the resolved configuration
    Config {
        /// Store the resolved configuration in the config file
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Default, clap::Args)]
struct Overrides {
    /// remote (wallhaven.cc) or local
    #[arg(long)]
    source: Option<SourceKind>,

    /// Directory used by the local source
    #[arg(long)]
    local_path: Option<PathBuf>,

    /// Minutes between refreshes, 0 disables the timer
    #[arg(long, allow_negative_numbers = true)]
    interval: Option<i64>,

    /// Don't refresh right after start
    #[arg(long)]
    no_startup: bool,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(local_path) = self.local_path {
            config.local_path = local_path;
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        if self.no_startup {
            config.refresh_on_startup = false;
        }
    }
}

// ============================================================================
// Main Application
// ============================================================================
struct RandomWallpaperCli {
    config_file: PathBuf,
    config: Config,
}

impl RandomWallpaperCli {
    fn new(config_file: Option<PathBuf>) -> CliResult<Self> {
        let config_file = match config_file {
            Some(path) => path,
            None => paths::config_file().ok_or("Cannot find config directory")?,
        };
        let config = Config::load(&config_file)?;
        log::debug!("Loaded config from {}", config_file.display());
        Ok(RandomWallpaperCli {
            config_file,
            config,
        })
    }

    fn session(&self) -> CliResult<Session> {
        let wallpaper_file = paths::wallpaper_file().ok_or("Cannot find local data directory")?;
        let compositor = Compositor::detect();
        log::debug!("Compositor: {}", compositor);
        Ok(Session::new(
            self.config.clone(),
            wallpaper_file,
            paths::home_dir(),
            Box::new(ReqwestClient::new()?),
            Box::new(ShellLauncher),
            compositor,
        ))
    }

    // Helper function to center text in box headers
    fn center_text(text: &str, width: usize) -> String {
        let text_len = text.chars().count();
        if text_len >= width {
            return text.to_string();
        }
        let padding = width - text_len;
        let left_pad = padding / 2;
        let right_pad = padding - left_pad;
        format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
    }

    fn print_header(title: &str) {
        println!();
        println!("{}", "+------------------------------------------+".cyan());
        println!("{}", format!("| {} |", Self::center_text(title, 40)).cyan().bold());
        println!("{}", "+------------------------------------------+".cyan());
        println!();
    }

    fn source_display(&self) -> String {
        match self.config.source {
            SourceKind::Remote => format!("wallhaven.cc ({})", self.config.query()),
            SourceKind::Local => format!("local ({})", self.config.local_path.display()),
        }
    }

    // ========================================================================
    // RUN Command - startup, periodic and manual refreshes
    // ========================================================================
    fn run(&mut self, overrides: Overrides) -> CliResult<()> {
        overrides.apply(&mut self.config);
        let mut session = self.session()?;
        let scheduler = Scheduler::new(
            self.config.interval_minutes(),
            self.config.refresh_on_startup,
            Instant::now(),
        );

        Self::print_header("Random Wallpaper");
        println!("{}", format!("  Source:   {}", self.source_display()).cyan());
        println!("{}", format!("  Schedule: {}", scheduler.display()).cyan());
        println!("{}", format!("  File:     {}", session.wallpaper_file().display()).cyan());
        if let Some(output) = self.config.output_target() {
            println!("{}", format!("  Output:   {}", output).cyan());
        }
        println!();
        println!(
            "{}",
            "  r) Refresh   i) Image info   s) Save   q) Quit".green()
        );
        println!();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match Action::parse(&line) {
                    Some(action) => {
                        if tx.send(action).is_err() {
                            break;
                        }
                    }
                    None => println!("{}", "  Use r, i, s or q".cyan()),
                }
            }
        });

        scheduler::run_loop(scheduler, rx, |trigger| match trigger {
            Trigger::Startup | Trigger::Periodic | Trigger::Manual(Action::Refresh) => {
                log::debug!("Trigger: {:?}", trigger);
                session.run_cycle()
            }
            Trigger::Manual(Action::Info) => {
                if let Some(current) = session.current() {
                    println!("{}", format!("  Current: {}", current.display()).cyan());
                }
                info::print(session.metadata());
                ControlFlow::Continue(())
            }
            Trigger::Manual(Action::Save) => {
                match session.save() {
                    Ok(path) => println!("{} {}", "✓".green(), format!("Saved to {}", path.display()).green()),
                    Err(e) => log::error!("Failed saving wallpaper: {}", e),
                }
                ControlFlow::Continue(())
            }
            Trigger::Manual(Action::Quit) => {
                log::debug!("Quit requested");
                ControlFlow::Break(())
            }
        });

        println!("{}", "Bye!".cyan());
        Ok(())
    }

    // ========================================================================
    // REFRESH Command - one cycle
    // ========================================================================
    fn refresh(&mut self, overrides: Overrides) -> CliResult<()> {
        overrides.apply(&mut self.config);
        let mut session = self.session()?;
        let path = session.refresh()?;
        println!("{} {}", "✓".green(), format!("Wallpaper applied: {}", path.display()).green().bold());
        if self.config.source == SourceKind::Remote {
            info::print(session.metadata());
        }
        Ok(())
    }

    // ========================================================================
    // CONFIG Command
    // ========================================================================
    fn show_config(&self, write: bool) -> CliResult<()> {
        println!("{}", serde_json::to_string_pretty(&self.config)?);
        if write {
            self.config.save(&self.config_file)?;
            println!("{} {}", "✓".green(), format!("Written to {}", self.config_file.display()).green());
        }
        Ok(())
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================
fn main() {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = logger::init(level, paths::log_file()) {
        eprintln!("{}", format!("[ ERROR ] Cannot set up logging: {}", e).red());
    }

    let result = RandomWallpaperCli::new(args.config).and_then(|mut cli| {
        match args.command.unwrap_or(Command::Run(Overrides::default())) {
            Command::Run(overrides) => cli.run(overrides),
            Command::Refresh(overrides) => cli.refresh(overrides),
            Command::Config { write } => cli.show_config(write),
        }
    });

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
