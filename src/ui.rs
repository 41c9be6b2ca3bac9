// UI layer: collects the command input with `dialoguer`, runs the backup
// under an `indicatif` progress bar and prints the outcome.

use std::io::IsTerminal;

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::backup::{run_backup, BackupRequest, Destination, DirStatus, ItemStatus, RunReport};
use crate::cli::Cli;
use crate::config::Config;
use crate::disk::{DirOutcome, DiskClient};
use crate::error::BackupError;
use crate::model::Album;
use crate::vk::VkClient;

/// Fill in whatever the command line left out by prompting for it.
pub fn collect_request(cli: &Cli) -> Result<BackupRequest> {
    let owner_id = match &cli.user {
        Some(user) => user.clone(),
        None => {
            let user: String = Input::new()
                .with_prompt("VK user id")
                .validate_with(|s: &String| {
                    if s.trim().is_empty() {
                        Err("user id cannot be empty")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;
            user
        }
    };

    let count = match cli.count {
        Some(n) => n,
        None => {
            let n: u32 = Input::new()
                .with_prompt("How many photos to copy")
                .default(5)
                .validate_with(|n: &u32| if *n == 0 { Err("enter a positive number") } else { Ok(()) })
                .interact_text()?;
            n
        }
    };

    let album = match cli.album {
        Some(album) => album,
        None => {
            let items: Vec<String> = Album::ALL
                .iter()
                .enumerate()
                .map(|(i, a)| format!("{}: {}", i + 1, a.label()))
                .collect();
            let idx = Select::new()
                .with_prompt("Album to copy from")
                .items(&items)
                .default(1)
                .interact()?;
            Album::ALL[idx]
        }
    };

    Ok(BackupRequest {
        owner_id: owner_id.trim().to_string(),
        album,
        count: count as usize,
    })
}

/// Progress bar for the upload loop, hidden when stdout is not a terminal.
fn create_progress_bar(no_progress_bar: bool) -> ProgressBar {
    if no_progress_bar || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

/// Run one backup with the given configuration and print the result.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let request = collect_request(cli)?;

    let vk = VkClient::new(&config.vk_base_url, &config.vk_token, &config.api_version)
        .context("Failed to build VK client")?;
    let disk = DiskClient::new(&config.disk_base_url, &config.disk_token)
        .context("Failed to build Yandex Disk client")?;
    let dest = Destination {
        directory: &config.directory,
        manifest_path: &config.manifest_path,
    };

    let progress = create_progress_bar(cli.no_progress_bar);
    match run_backup(&vk, &disk, &request, &dest, &progress) {
        Ok(report) => {
            print_report(&report, &config.directory);
            Ok(())
        }
        Err(e @ (BackupError::Fetch(_) | BackupError::NoPhotos)) => {
            println!("{}", format!("Error: {e}").red());
            println!("No data to save");
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(report: &RunReport, directory: &str) {
    match &report.directory {
        DirStatus::Outcome(DirOutcome::Created) => println!("Folder {directory} created"),
        DirStatus::Outcome(DirOutcome::AlreadyExists) => {
            println!("Folder {directory} already exists")
        }
        DirStatus::Outcome(DirOutcome::UnknownError(code)) => println!(
            "{}",
            format!("Could not create folder {directory}, error code {code}").yellow()
        ),
        DirStatus::Failed(e) => println!("{}", format!("Could not create folder {directory}: {e}").yellow()),
    }

    for skipped in &report.skipped {
        println!(
            "{}",
            format!("Skipped photo #{} ({} likes): {}", skipped.index + 1, skipped.likes_count, skipped.reason)
                .yellow()
        );
    }

    for upload in &report.uploads {
        match &upload.status {
            ItemStatus::Accepted => println!(
                "{}",
                format!("File {} uploaded to folder {directory}", upload.filename).green()
            ),
            ItemStatus::Rejected(code) => println!(
                "{}",
                format!("File {} failed, error code {code}", upload.filename).red()
            ),
            ItemStatus::Failed(e) => println!("{}", format!("File {} failed: {e}", upload.filename).red()),
        }
    }

    println!("{}", "-".repeat(15));
    println!(
        "Upload finished: {} accepted, {} failed",
        report.accepted(),
        report.failed()
    );
    println!(
        "Saved {} entries to {}",
        report.manifest_entries,
        report.manifest_path.display()
    );
}
