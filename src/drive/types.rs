//! File metadata model for listing results.

use crate::util::to_human_size;

pub const FOLDER_MIME: &str = "application/vnd.google-apps.folder";
pub const SHORTCUT_MIME: &str = "application/vnd.google-apps.shortcut";

/// One remote file as the browser sees it. Immutable once parsed;
/// owned by the session's accumulated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size: Option<u64>,
    pub icon_link: Option<String>,
}

impl DriveFile {
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME
    }

    pub fn is_shortcut(&self) -> bool {
        self.mime_type == SHORTCUT_MIME
    }

    pub fn is_video_file(&self) -> bool {
        self.mime_type.starts_with("video/")
    }

    /// Size label for list rows. `None` hides the size column.
    pub fn human_size(&self) -> Option<String> {
        self.size.map(to_human_size)
    }

    /// The stock icon link points at a 16px asset; the 128px variant is
    /// the same URL with the size segment swapped.
    pub fn icon_link_128(&self) -> Option<String> {
        self.icon_link.as_ref().map(|link| link.replace("/16/", "/128/"))
    }

    /// Listing query selecting this entry's children.
    pub fn children_query(&self) -> String {
        folder_query(&self.id)
    }
}

/// Listing query for the contents of a folder.
pub fn folder_query(folder_id: &str) -> String {
    format!("'{}' in parents and trashed=false", folder_id)
}

/// One page of listing results. An absent `next_page_token` means this
/// was the last page.
#[derive(Debug, Clone, Default)]
pub struct FilePage {
    pub files: Vec<DriveFile>,
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str) -> DriveFile {
        DriveFile {
            id: "f1".to_string(),
            name: "entry".to_string(),
            mime_type: mime.to_string(),
            size: None,
            icon_link: None,
        }
    }

    #[test]
    fn flags_derive_from_mime_type() {
        assert!(file(FOLDER_MIME).is_folder());
        assert!(file(SHORTCUT_MIME).is_shortcut());
        assert!(file("video/x-matroska").is_video_file());
        assert!(file("video/mp4").is_video_file());

        let doc = file("application/pdf");
        assert!(!doc.is_folder() && !doc.is_shortcut() && !doc.is_video_file());
    }

    #[test]
    fn children_query_uses_parents_filter() {
        assert_eq!(
            folder_query("abc123"),
            "'abc123' in parents and trashed=false"
        );
        assert_eq!(file("x").children_query(), "'f1' in parents and trashed=false");
    }

    #[test]
    fn human_size_is_absent_for_sizeless_entries() {
        let mut entry = file("video/mp4");
        assert_eq!(entry.human_size(), None);

        entry.size = Some(2048);
        assert_eq!(entry.human_size().as_deref(), Some("2.00 KB"));
    }

    #[test]
    fn icon_link_upgrades_to_128px() {
        let mut entry = file("video/mp4");
        entry.icon_link = Some("https://cdn.example/icons/16/video.png".to_string());
        assert_eq!(
            entry.icon_link_128().as_deref(),
            Some("https://cdn.example/icons/128/video.png")
        );
    }
}
