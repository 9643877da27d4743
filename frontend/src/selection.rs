//! Staged file selection.
//!
//! Holds the ordered set of files the user picked for upload. Every
//! selection event replaces the previous one, keeping only names that end
//! in [`ACCEPTED_EXTENSION`]. Files are generic over [`FileHandle`] so the
//! filtering and removal logic runs without a browser.

use crate::ACCEPTED_EXTENSION;

// =============================================================================
// File handles
// =============================================================================

/// Anything that exposes a filename and a byte size.
pub trait FileHandle: Clone {
    fn name(&self) -> String;
    fn size(&self) -> u64;
}

impl FileHandle for web_sys::File {
    fn name(&self) -> String {
        web_sys::File::name(self)
    }

    fn size(&self) -> u64 {
        web_sys::Blob::size(self) as u64
    }
}

/// Whether a filename passes the extension filter.
pub fn is_accepted(name: &str) -> bool {
    name.ends_with(ACCEPTED_EXTENSION)
}

// =============================================================================
// Staged files
// =============================================================================

/// Identity of a staged file, unique for the page lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

/// A file waiting to be uploaded.
#[derive(Clone, Debug)]
pub struct StagedFile<F> {
    id: FileId,
    name: String,
    size: u64,
    handle: F,
}

impl<F> StagedFile<F> {
    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes, informational only.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn handle(&self) -> &F {
        &self.handle
    }
}

/// Result of staging one batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StageOutcome {
    /// Number of files kept
    pub accepted: usize,
    /// Names dropped by the extension filter, in input order
    pub rejected: Vec<String>,
}

impl StageOutcome {
    /// True when the user should be warned about dropped files.
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

// =============================================================================
// Selection state
// =============================================================================

/// Ordered selection of staged files. Duplicates are allowed.
#[derive(Clone, Debug)]
pub struct Selection<F> {
    files: Vec<StagedFile<F>>,
    next_id: u64,
}

impl<F> Default for Selection<F> {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            next_id: 0,
        }
    }
}

impl<F: FileHandle> Selection<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with the accepted part of `batch`.
    ///
    /// Relative order is preserved. Previously staged files are discarded
    /// even when nothing in the batch is accepted.
    pub fn stage(&mut self, batch: impl IntoIterator<Item = F>) -> StageOutcome {
        let mut outcome = StageOutcome::default();
        let mut staged = Vec::new();

        for handle in batch {
            let name = handle.name();
            if !is_accepted(&name) {
                outcome.rejected.push(name);
                continue;
            }
            self.next_id += 1;
            staged.push(StagedFile {
                id: FileId(self.next_id),
                size: handle.size(),
                name,
                handle,
            });
        }

        outcome.accepted = staged.len();
        self.files = staged;
        outcome
    }
}

impl<F> Selection<F> {
    /// Remove the file with the given identity.
    pub fn remove(&mut self, id: FileId) -> Option<StagedFile<F>> {
        let index = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(index))
    }

    /// Remove by position. Later files shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Option<StagedFile<F>> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedFile<F>> {
        self.files.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

impl<F: Clone> Selection<F> {
    /// Clone the underlying handles in selection order.
    pub fn handles(&self) -> Vec<F> {
        self.files.iter().map(|f| f.handle.clone()).collect()
    }
}

/// Format a byte count for the file list.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b < KIB {
        format!("{} B", bytes)
    } else if b < KIB * KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{:.1} MB", b / (KIB * KIB))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory stand-in for a browser `File`.
    #[derive(Clone, Debug, PartialEq)]
    pub(crate) struct FakeFile {
        pub name: &'static str,
        pub size: u64,
    }

    impl FileHandle for FakeFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn size(&self) -> u64 {
            self.size
        }
    }

    pub(crate) fn files(names: &[&'static str]) -> Vec<FakeFile> {
        names.iter().map(|name| FakeFile { name, size: 100 }).collect()
    }

    #[test]
    fn test_filter_keeps_markdown_in_order() {
        let mut selection = Selection::new();
        let outcome = selection.stage(files(&["b.md", "x.png", "a.md", "notes.txt", "c.md"]));

        assert_eq!(selection.names(), vec!["b.md", "a.md", "c.md"]);
        assert_eq!(outcome.accepted, 3);
        assert_eq!(outcome.rejected, vec!["x.png", "notes.txt"]);
        assert!(outcome.has_rejections());
    }

    #[test]
    fn test_no_warning_when_everything_accepted() {
        let mut selection = Selection::new();
        let outcome = selection.stage(files(&["one.md", "two.md"]));
        assert!(!outcome.has_rejections());

        let outcome = selection.stage(Vec::<FakeFile>::new());
        assert!(!outcome.has_rejections());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_suffix_match_is_case_sensitive_and_literal() {
        assert!(is_accepted("README.md"));
        assert!(is_accepted(".md"));
        assert!(!is_accepted("README.MD"));
        assert!(!is_accepted("notes.md.bak"));
        assert!(!is_accepted("notes.markdown"));
        assert!(!is_accepted("md"));
    }

    #[test]
    fn test_stage_replaces_previous_selection() {
        let mut selection = Selection::new();
        selection.stage(files(&["first.md", "second.md"]));
        selection.stage(files(&["third.md", "skip.png"]));
        assert_eq!(selection.names(), vec!["third.md"]);

        let outcome = selection.stage(files(&["only.png"]));
        assert!(selection.is_empty());
        assert_eq!(outcome.accepted, 0);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut selection = Selection::new();
        selection.stage(files(&["same.md", "same.md"]));
        assert_eq!(selection.len(), 2);

        let ids: Vec<_> = selection.iter().map(|f| f.id()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_remove_at_reindexes() {
        let mut selection = Selection::new();
        selection.stage(files(&["a.md", "b.md", "c.md"]));

        let removed = selection.remove_at(1).unwrap();
        assert_eq!(removed.name(), "b.md");
        assert_eq!(selection.names(), vec!["a.md", "c.md"]);

        selection.remove_at(1);
        assert_eq!(selection.names(), vec!["a.md"]);

        assert!(selection.remove_at(5).is_none());
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_remove_by_id_survives_earlier_removals() {
        let mut selection = Selection::new();
        selection.stage(files(&["a.md", "b.md", "c.md"]));
        let ids: Vec<_> = selection.iter().map(|f| f.id()).collect();

        // Both handlers were bound before either removal ran.
        selection.remove(ids[1]);
        selection.remove(ids[2]);
        assert_eq!(selection.names(), vec!["a.md"]);

        assert!(selection.remove(ids[1]).is_none());
    }

    #[test]
    fn test_ids_are_not_reused_across_batches() {
        let mut selection = Selection::new();
        selection.stage(files(&["a.md"]));
        let old = selection.iter().next().unwrap().id();

        selection.stage(files(&["a.md"]));
        assert!(selection.remove(old).is_none());
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_handles_and_sizes() {
        let mut selection = Selection::new();
        selection.stage(vec![
            FakeFile { name: "a.md", size: 10 },
            FakeFile { name: "b.md", size: 32 },
        ]);
        assert_eq!(selection.total_size(), 42);
        assert_eq!(selection.handles().len(), 2);
        assert_eq!(selection.handles()[1].name, "b.md");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
