// Data shapes shared by the listing client, the selector and the manifest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One rendition of a photo as returned by the listing API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoVariant {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub url: String,
}

/// A photo from the album listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub likes_count: u64,
    /// Upload time, epoch seconds.
    pub upload_date: i64,
    pub variants: Vec<PhotoVariant>,
}

/// The variant picked for upload: its "WxH" label and source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSelection {
    pub size_label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedPhoto {
    pub filename: String,
    pub size_label: String,
    pub url: String,
}

/// What gets written to the output file. Never carries the source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub filename: String,
    #[serde(rename = "size")]
    pub size_label: String,
}

impl From<&SelectedPhoto> for ManifestEntry {
    fn from(photo: &SelectedPhoto) -> Self {
        ManifestEntry {
            filename: photo.filename.clone(),
            size_label: photo.size_label.clone(),
        }
    }
}

/// Album selector accepted by `photos.get`. The menu numbers 1, 2 and 3
/// are accepted on the command line as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Album {
    #[value(alias = "1")]
    Wall,
    #[value(alias = "2")]
    Profile,
    #[value(alias = "3")]
    Saved,
}

impl Album {
    pub const ALL: [Album; 3] = [Album::Wall, Album::Profile, Album::Saved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Album::Wall => "wall",
            Album::Profile => "profile",
            Album::Saved => "saved",
        }
    }

    /// Human-readable menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Album::Wall => "wall photos",
            Album::Profile => "profile photos",
            Album::Saved => "saved photos",
        }
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_entry_serializes_size_field() {
        let photo = SelectedPhoto {
            filename: "3.jpg".into(),
            size_label: "200x200".into(),
            url: "https://example.com/b.jpg".into(),
        };
        let json = serde_json::to_value(ManifestEntry::from(&photo)).unwrap();
        assert_eq!(json, serde_json::json!({"filename": "3.jpg", "size": "200x200"}));
    }

    #[test]
    fn variant_reads_type_tag() {
        let v: PhotoVariant = serde_json::from_str(
            r#"{"width": 604, "height": 403, "type": "x", "url": "https://example.com/x.jpg"}"#,
        )
        .unwrap();
        assert_eq!(v.type_tag, "x");
        assert_eq!(v.width + v.height, 1007);
    }
}
