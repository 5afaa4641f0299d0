// src/ui.rs

use clip_queue::{metadata_retriever::format_duration, queue_entry::QueueEntry};
use dialoguer::{theme::ColorfulTheme, Input, Select};

/// Maximum number of entries listed at once.
const LIST_LIMIT: usize = 20;

/// Prints the currently playing clip, if any.
pub fn print_now_playing(now_playing: Option<&QueueEntry>) {
    match now_playing {
        Some(entry) => println!(
            "\n▶ Now playing: {} ({}s from {})",
            entry.title,
            entry.duration,
            format_duration(entry.from as f64).unwrap_or_else(|| "N/A".into())
        ),
        None => println!("\n▶ Nothing played yet."),
    }
}

/// Lines for a list view, numbered from 1 and capped at `LIST_LIMIT`.
fn list_items<'a>(entries: impl Iterator<Item = &'a QueueEntry>) -> Vec<String> {
    entries
        .take(LIST_LIMIT)
        .enumerate()
        .map(|(i, entry)| format!("{:>2}. {}", i + 1, entry))
        .collect()
}

/// Displays clip entries in an interactive list.
/// Selecting one shows its details; Esc goes back.
///
/// # Errors
///
/// Returns an error if any dialoguer interaction fails.
pub fn view_entries<'a>(
    heading: &str,
    entries: impl Iterator<Item = &'a QueueEntry> + Clone,
    theme: &ColorfulTheme,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = list_items(entries.clone());
    if items.is_empty() {
        println!("\n--- {} is empty ---", heading);
        Input::<String>::with_theme(theme)
            .with_prompt("Press Enter to continue...")
            .allow_empty(true)
            .interact()?;
        return Ok(());
    }

    let selection = Select::with_theme(theme)
        .with_prompt(format!(
            "-- {} (max {}) --\nSelect to view details, Esc to go back:",
            heading, LIST_LIMIT
        ))
        .items(&items)
        .default(0)
        .interact_opt()?;

    if let Some(entry) = selection.and_then(|index| entries.clone().nth(index)) {
        println!("\n--- Clip ---");
        println!("File:     {}", entry.file_id);
        println!("Title:    {}", entry.title);
        println!("Starts:   {}s", entry.from);
        println!("Duration: {}s", entry.duration);
        println!("------------");

        Input::<String>::with_theme(theme)
            .with_prompt("Press Enter to continue...")
            .allow_empty(true)
            .interact()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_items_are_numbered_and_capped() {
        let entries: Vec<QueueEntry> = (0..25)
            .map(|i| QueueEntry {
                file_id: format!("f{}", i),
                title: format!("Clip {}", i),
                from: 10,
                duration: 5,
            })
            .collect();

        let items = list_items(entries.iter());
        assert_eq!(items.len(), LIST_LIMIT);
        assert_eq!(items[0], " 1. Clip 0 [00:10 - 00:15]");
    }
}
