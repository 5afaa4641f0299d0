// src/main.rs

use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use log::info;
use std::env;
use std::path::{Path, PathBuf};
use std::process;

// Module declarations
mod cli;
mod ui;

use crate::cli::Cli;
use crate::ui::{print_now_playing, view_entries};
use clip_queue::library::load_folder;
use clip_queue::schedule_export::{save_schedule, ScheduleSnapshot};
use clip_queue::{ClipConfiguration, ClipQueue, QueueEvent};

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    if let Err(err) = run_app() {
        eprintln!("\nApplication Error: {}", err);
        process::exit(1);
    }
}

/// Expands `~` and environment variables in a user-supplied folder path.
fn expand_folder(raw: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(PathBuf::from(shellexpand::full(raw)?.into_owned()))
}

fn prompt_folder(theme: &ColorfulTheme) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let raw = Input::<String>::with_theme(theme)
        .with_prompt("Enter the path to the video folder (supports ~ and env vars)")
        .interact_text()?;
    expand_folder(&raw)
}

/// Scans a folder and registers every probed video. Returns how many were added.
fn add_folder(
    clip_queue: &mut ClipQueue,
    folder: &Path,
    recursive: bool,
) -> Result<usize, Box<dyn std::error::Error>> {
    println!("Scanning folder '{}'...", folder.display());
    let records = load_folder(folder, recursive)?;
    let added = records.len();
    for record in records {
        clip_queue.add_file(record);
    }
    Ok(added)
}

/// Fills the queue until every file is exhausted, optionally shuffling the result.
fn fill_queue(clip_queue: &mut ClipQueue, shuffle: bool) {
    let created = clip_queue.generate();
    if shuffle {
        clip_queue.shuffle();
    }
    println!(
        "Scheduled {} new clips ({} pending).",
        created,
        clip_queue.queue().len()
    );
}

fn prompt_bounds(
    theme: &ColorfulTheme,
    current: ClipConfiguration,
) -> Result<ClipConfiguration, Box<dyn std::error::Error>> {
    let min = Input::<u64>::with_theme(theme)
        .with_prompt("Minimum clip length (seconds)")
        .default(current.min)
        .interact_text()?;
    let max = Input::<u64>::with_theme(theme)
        .with_prompt("Maximum clip length (seconds, exclusive)")
        .default(current.max)
        .interact_text()?;
    let config = ClipConfiguration::new(min, max);
    config.validate()?;
    Ok(config)
}

fn remove_file_interactive(
    clip_queue: &mut ClipQueue,
    theme: &ColorfulTheme,
) -> Result<(), Box<dyn std::error::Error>> {
    let ids: Vec<String> = clip_queue.files().iter().map(|f| f.id.clone()).collect();
    if ids.is_empty() {
        println!("No files registered.");
        return Ok(());
    }
    let names: Vec<String> = clip_queue.files().iter().map(|f| f.name.clone()).collect();

    let selection = Select::with_theme(theme)
        .with_prompt("Remove which file? (Esc to cancel)")
        .items(&names)
        .default(0)
        .interact_opt()?;

    if let Some(index) = selection {
        if clip_queue.remove_file(&ids[index]) {
            println!("Removed '{}' and its pending clips.", names[index]);
        }
    }
    Ok(())
}

fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    let cli_args = Cli::parse();
    let theme = ColorfulTheme::default();
    let recursive = !cli_args.non_recursive;
    let shuffle = !cli_args.no_shuffle;

    let config = ClipConfiguration::from_env()?.with_overrides(cli_args.min, cli_args.max);
    config.validate()?;

    let mut clip_queue = match cli_args.seed {
        Some(seed) => ClipQueue::from_seed(config, seed),
        None => ClipQueue::new(config),
    };
    clip_queue.subscribe(|event| {
        if let QueueEvent::Warning(diagnostic) = event {
            println!("Warning: {}", diagnostic);
        }
    });

    let mut folder: Option<PathBuf> = match cli_args
        .folder
        .or_else(|| env::var("DEFAULT_VIDEO_FOLDER").ok())
    {
        Some(raw) => Some(expand_folder(&raw)?),
        None => None,
    };

    // Keep asking until a folder with at least one usable video is loaded.
    loop {
        let path = match folder.take() {
            Some(path) => path,
            None => prompt_folder(&theme)?,
        };
        match add_folder(&mut clip_queue, &path, recursive) {
            Ok(0) => println!("No usable video files found in '{}'.", path.display()),
            Ok(added) => {
                info!("Registered {} files", added);
                break;
            }
            Err(e) => eprintln!("Error scanning folder '{}': {}", path.display(), e),
        }
    }

    fill_queue(&mut clip_queue, shuffle);

    let actions = [
        "Play next clip",
        "Enqueue one clip",
        "Generate until exhausted",
        "Shuffle queue",
        "View queue",
        "View history",
        "Set clip bounds",
        "Add another folder",
        "Remove a file",
        "Export schedule",
        "Quit",
    ];

    loop {
        let config = clip_queue.config();
        println!(
            "\n{} pending, {} played, {} files ({} playable slots), clips {}-{}s",
            clip_queue.queue().len(),
            clip_queue.history().len(),
            clip_queue.files().len(),
            clip_queue.playable().len(),
            config.min,
            config.max
        );

        let choice_idx = Select::with_theme(&theme)
            .with_prompt("What next?")
            .items(&actions)
            .default(0)
            .interact_opt()?
            .unwrap_or(actions.len() - 1);

        match actions.get(choice_idx).copied() {
            Some("Play next clip") => match clip_queue.dequeue() {
                Some(_) => print_now_playing(clip_queue.now_playing()),
                None => println!("The queue is empty. Generate or enqueue more clips."),
            },
            Some("Enqueue one clip") => {
                if let Some(entry) = clip_queue.enqueue().entry() {
                    println!("Enqueued {}", entry);
                }
            }
            Some("Generate until exhausted") => fill_queue(&mut clip_queue, shuffle),
            Some("Shuffle queue") => {
                clip_queue.shuffle();
                println!("Queue shuffled.");
            }
            Some("View queue") => view_entries("Queue", clip_queue.queue().iter(), &theme)?,
            Some("View history") => {
                // Most recent first.
                view_entries("History (recent first)", clip_queue.history().iter().rev(), &theme)?
            }
            Some("Set clip bounds") => match prompt_bounds(&theme, clip_queue.config()) {
                Ok(bounds) => clip_queue.set_config(bounds),
                Err(e) => eprintln!("{}", e),
            },
            Some("Add another folder") => {
                let path = prompt_folder(&theme)?;
                match add_folder(&mut clip_queue, &path, recursive) {
                    Ok(added) => println!("Added {} files.", added),
                    Err(e) => eprintln!("Error scanning folder '{}': {}", path.display(), e),
                }
            }
            Some("Remove a file") => remove_file_interactive(&mut clip_queue, &theme)?,
            Some("Export schedule") => {
                let snapshot = ScheduleSnapshot::capture(&clip_queue);
                match save_schedule(&snapshot, None) {
                    Ok(path) => println!("Schedule exported to '{}'.", path.display()),
                    Err(e) => eprintln!("Failed to export schedule: {}", e),
                }
            }
            Some("Quit") | Some(_) | None => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}
