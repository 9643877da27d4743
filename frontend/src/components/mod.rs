//! UI components for the upload page.
//!
//! - [`UploadSection`] - drop zone, file picker and upload form
//! - [`FileList`] - removable list of staged files
//! - [`ProgressSection`] - upload progress bar
//! - [`NoticeStack`] - transient warning/info toasts

mod upload;
mod file_list;
mod progress;
mod notices;

pub use upload::*;
pub use file_list::*;
pub use progress::*;
pub use notices::*;
