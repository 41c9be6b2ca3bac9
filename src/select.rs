// Variant selection and filename derivation.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::error::SelectError;
use crate::model::{PhotoRecord, PhotoVariant, SelectedPhoto, SizeSelection};

/// Filename stem of a selected photo. Typed so that a likes count and a
/// likes/date pair can never be confused for one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoKey {
    Simple(u64),
    Composite(u64, i64),
}

impl fmt::Display for PhotoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoKey::Simple(likes) => write!(f, "{likes}"),
            PhotoKey::Composite(likes, date) => write!(f, "{likes}_{date}"),
        }
    }
}

/// A consumed record that could not be turned into a selected photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position in the listing.
    pub index: usize,
    pub likes_count: u64,
    pub upload_date: i64,
    pub reason: SelectError,
}

/// Result of `build_selection_set`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    pub photos: Vec<SelectedPhoto>,
    pub skipped: Vec<SkippedRecord>,
}

impl SelectionSet {
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

/// Pick the largest variant by width + height. The first maximal variant
/// wins ties. Legacy records whose variants are all 0x0 fall back to the
/// first variant tagged "x".
pub fn select_best(variants: &[PhotoVariant]) -> Result<SizeSelection, SelectError> {
    let degenerate = variants.iter().all(|v| v.width == 0 && v.height == 0);
    let chosen = if degenerate {
        variants.iter().find(|v| v.type_tag == "x")
    } else {
        // max_by_key keeps the last maximum, so fold manually.
        variants.iter().fold(None::<&PhotoVariant>, |best, v| match best {
            Some(b) if u64::from(b.width) + u64::from(b.height)
                >= u64::from(v.width) + u64::from(v.height) =>
            {
                Some(b)
            }
            _ => Some(v),
        })
    };
    let chosen = chosen.ok_or(SelectError::NoSizeVariant)?;
    Ok(SizeSelection {
        size_label: format!("{}x{}", chosen.width, chosen.height),
        url: chosen.url.clone(),
    })
}

/// Consume up to `limit` records in listing order and derive unique
/// filenames. The likes count is the stem; a repeated likes count gets
/// `{likes}_{date}` instead. A repeated likes/date pair keeps the first
/// photo; the later one is reported as skipped.
pub fn build_selection_set(records: &[PhotoRecord], limit: usize) -> SelectionSet {
    let mut seen: HashSet<PhotoKey> = HashSet::new();
    let mut set = SelectionSet::default();

    for (index, record) in records.iter().take(limit).enumerate() {
        let simple = PhotoKey::Simple(record.likes_count);
        let key = if seen.contains(&simple) {
            PhotoKey::Composite(record.likes_count, record.upload_date)
        } else {
            simple
        };

        let selected = if seen.contains(&key) {
            Err(SelectError::DuplicateName)
        } else {
            select_best(&record.variants)
        };

        match selected {
            Ok(selection) => {
                debug!(index, %key, size = %selection.size_label, "selected photo");
                seen.insert(key);
                set.photos.push(SelectedPhoto {
                    filename: format!("{key}.jpg"),
                    size_label: selection.size_label,
                    url: selection.url,
                });
            }
            Err(reason) => {
                warn!(index, likes = record.likes_count, "skipping photo: {reason}");
                set.skipped.push(SkippedRecord {
                    index,
                    likes_count: record.likes_count,
                    upload_date: record.upload_date,
                    reason,
                });
            }
        }
    }

    set
}
