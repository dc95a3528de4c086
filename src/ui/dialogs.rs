use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

/// Native dialogs the viewer needs: a folder picker and message boxes.
pub trait Dialogs {
    /// `None` when the user cancels.
    fn pick_folder(&self) -> Option<PathBuf>;
    fn show_error(&self, title: &str, message: &str);
    fn show_info(&self, title: &str, message: &str);
}

pub struct NativeDialogs;

impl NativeDialogs {
    fn message(level: MessageLevel, title: &str, message: &str) {
        let _ = MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl Dialogs for NativeDialogs {
    fn pick_folder(&self) -> Option<PathBuf> {
        FileDialog::new().set_title("Select Folder").pick_folder()
    }

    fn show_error(&self, title: &str, message: &str) {
        Self::message(MessageLevel::Error, title, message);
    }

    fn show_info(&self, title: &str, message: &str) {
        Self::message(MessageLevel::Info, title, message);
    }
}
