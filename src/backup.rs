// One backup run: fetch the album listing, select a variant per photo,
// push every selection to the disk and write the manifest.
//
// Idle -> Fetching -> Selecting -> DirectoryEnsuring -> Uploading
//      -> ManifestWriting -> Done
// Fetch failures and an empty selection end the run in Aborted. Upload
// failures are recorded per photo and never stop the batch.

use std::fmt;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use tracing::{debug, error, info, warn};

use crate::disk::{destination_path, DirOutcome, DiskClient, UploadOutcome};
use crate::error::{BackupError, UploadError};
use crate::manifest::{build_manifest, write_manifest};
use crate::model::Album;
use crate::select::{build_selection_set, SkippedRecord};
use crate::vk::VkClient;

/// Command input for one run.
#[derive(Debug, Clone)]
pub struct BackupRequest {
    pub owner_id: String,
    pub album: Album,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Fetching,
    Selecting,
    DirectoryEnsuring,
    Uploading,
    ManifestWriting,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Fetching => "fetching",
            Stage::Selecting => "selecting",
            Stage::DirectoryEnsuring => "directory",
            Stage::Uploading => "uploading",
            Stage::ManifestWriting => "manifest",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Per-photo upload result. Transport errors are kept as text so the
/// report stays cloneable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Accepted,
    Rejected(u16),
    Failed(String),
}

impl ItemStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ItemStatus::Accepted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub filename: String,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirStatus {
    Outcome(DirOutcome),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub directory: DirStatus,
    pub uploads: Vec<UploadReport>,
    pub skipped: Vec<SkippedRecord>,
    pub manifest_path: PathBuf,
    pub manifest_entries: usize,
}

impl RunReport {
    pub fn accepted(&self) -> usize {
        self.uploads.iter().filter(|u| u.status.is_accepted()).count()
    }

    pub fn failed(&self) -> usize {
        self.uploads.len() - self.accepted()
    }
}

/// Where photos go and where the manifest is written.
#[derive(Debug, Clone)]
pub struct Destination<'a> {
    pub directory: &'a str,
    pub manifest_path: &'a Path,
}

fn enter(stage: &mut Stage, next: Stage) {
    debug!(from = %stage, to = %next, "stage");
    *stage = next;
}

/// Run one backup. Returns `Err` when the run is aborted; the error names
/// why. Nothing is uploaded or written in that case.
pub fn run_backup(
    vk: &VkClient,
    disk: &DiskClient,
    request: &BackupRequest,
    dest: &Destination<'_>,
    progress: &ProgressBar,
) -> Result<RunReport, BackupError> {
    let mut stage = Stage::Idle;

    enter(&mut stage, Stage::Fetching);
    let records = vk
        .fetch(&request.owner_id, request.album, request.count)
        .map_err(|e| {
            error!(%stage, "run aborted: {e}");
            BackupError::Fetch(e)
        })?;
    info!(available = records.len(), album = %request.album, "photo list received");

    enter(&mut stage, Stage::Selecting);
    let selection = build_selection_set(&records, request.count);
    if selection.is_empty() {
        warn!(%stage, skipped = selection.skipped.len(), "run aborted: nothing to upload");
        return Err(BackupError::NoPhotos);
    }

    enter(&mut stage, Stage::DirectoryEnsuring);
    let directory = match disk.ensure_directory(dest.directory) {
        Ok(outcome) => {
            match outcome {
                DirOutcome::Created => info!(directory = dest.directory, "folder created"),
                DirOutcome::AlreadyExists => info!(directory = dest.directory, "folder already exists"),
                DirOutcome::UnknownError(code) => {
                    warn!(directory = dest.directory, code, "folder creation failed")
                }
            }
            DirStatus::Outcome(outcome)
        }
        Err(e) => {
            warn!(directory = dest.directory, "folder request failed: {e}");
            DirStatus::Failed(e.to_string())
        }
    };

    enter(&mut stage, Stage::Uploading);
    progress.set_length(selection.photos.len() as u64);
    let mut uploads = Vec::with_capacity(selection.photos.len());
    for photo in &selection.photos {
        progress.set_message(photo.filename.clone());
        let target = destination_path(dest.directory, &photo.filename);
        let status = upload_status(disk.upload_by_url(&target, &photo.url));
        match &status {
            ItemStatus::Accepted => info!(file = %photo.filename, size = %photo.size_label, "upload accepted"),
            ItemStatus::Rejected(code) => warn!(file = %photo.filename, code, "upload rejected"),
            ItemStatus::Failed(e) => warn!(file = %photo.filename, "upload failed: {e}"),
        }
        uploads.push(UploadReport {
            filename: photo.filename.clone(),
            status,
        });
        progress.inc(1);
    }
    progress.finish_and_clear();

    enter(&mut stage, Stage::ManifestWriting);
    let entries = build_manifest(&selection.photos);
    write_manifest(dest.manifest_path, &entries)?;

    enter(&mut stage, Stage::Done);
    Ok(RunReport {
        directory,
        uploads,
        skipped: selection.skipped,
        manifest_path: dest.manifest_path.to_path_buf(),
        manifest_entries: entries.len(),
    })
}

fn upload_status(result: Result<UploadOutcome, UploadError>) -> ItemStatus {
    match result {
        Ok(UploadOutcome::Accepted) => ItemStatus::Accepted,
        Ok(UploadOutcome::UnknownError(code)) => ItemStatus::Rejected(code),
        Err(e) => ItemStatus::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accepted_and_failed() {
        let report = RunReport {
            directory: DirStatus::Outcome(DirOutcome::Created),
            uploads: vec![
                UploadReport {
                    filename: "1.jpg".into(),
                    status: ItemStatus::Accepted,
                },
                UploadReport {
                    filename: "2.jpg".into(),
                    status: ItemStatus::Rejected(507),
                },
                UploadReport {
                    filename: "3.jpg".into(),
                    status: ItemStatus::Failed("connection reset".into()),
                },
            ],
            skipped: vec![],
            manifest_path: PathBuf::from("loaded_photos.json"),
            manifest_entries: 3,
        };
        assert_eq!(report.accepted(), 1);
        assert_eq!(report.failed(), 2);
    }

    #[test]
    fn upload_results_map_to_status() {
        assert_eq!(upload_status(Ok(UploadOutcome::Accepted)), ItemStatus::Accepted);
        assert_eq!(
            upload_status(Ok(UploadOutcome::UnknownError(500))),
            ItemStatus::Rejected(500)
        );
        assert!(matches!(
            upload_status(Err(UploadError::InvalidToken)),
            ItemStatus::Failed(_)
        ));
    }
}
