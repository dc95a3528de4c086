use std::path::{Path, PathBuf};

use crate::files::list_images;
use crate::loader::{decode_image, DecodedImage, FittedImage};
use crate::sequence::ImageSequence;
use crate::ui::dialogs::Dialogs;
use crate::ui::render::{
    blit_centered, compute_fit, draw_text_centered, fill_rect, rgb, Rect, BG_COLOR,
    VIEWPORT_COLOR,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const WINDOW_TITLE: &str = "Image Viewer";

const SELECT_PROMPT: &str = "Select a folder to view images";
const NO_IMAGES: &str = "No images found";

/// Height of the control strip at the bottom of the window.
const BUTTON_BAR_H: u32 = 50;
const BUTTON_H: u32 = 30;
const BUTTON_W: u32 = 120;
const WIDE_BUTTON_W: u32 = 180;
const BUTTON_GAP: i32 = 20;
/// Vertical space between the image area and the strip, excluded from the viewport.
const VIEWPORT_PAD: i64 = 20;
const TEXT_SCALE: u32 = 2;

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    SelectFolder,
    Previous,
    Exit,
    Next,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::SelectFolder, Button::Previous, Button::Exit, Button::Next];

    pub fn label(self) -> &'static str {
        match self {
            Button::SelectFolder => "Select Folder",
            Button::Previous => "Previous",
            Button::Exit => "Exit",
            Button::Next => "Next",
        }
    }
}

/// Where each button sits in a framebuffer of the given size.
pub fn button_rect(button: Button, fb_w: u32, fb_h: u32) -> Rect {
    let y = fb_h as i32 - BUTTON_BAR_H as i32 + (BUTTON_BAR_H - BUTTON_H) as i32 / 2;
    let right = |slot: i32| {
        fb_w as i32 - (BUTTON_GAP + BUTTON_W as i32) * (slot + 1)
    };
    match button {
        Button::SelectFolder => Rect::new(BUTTON_GAP, y, WIDE_BUTTON_W, BUTTON_H),
        Button::Next => Rect::new(right(0), y, BUTTON_W, BUTTON_H),
        Button::Exit => Rect::new(right(1), y, BUTTON_W, BUTTON_H),
        Button::Previous => Rect::new(right(2), y, BUTTON_W, BUTTON_H),
    }
}

/// Area above the control strip where the image is drawn.
pub fn image_area(fb_w: u32, fb_h: u32) -> Rect {
    Rect::new(0, 0, fb_w, fb_h.saturating_sub(BUTTON_BAR_H))
}

/// Space available to the image. May be non-positive on tiny windows.
pub fn viewport(fb_w: u32, fb_h: u32) -> (i64, i64) {
    (fb_w as i64, fb_h as i64 - BUTTON_BAR_H as i64 - VIEWPORT_PAD)
}

// ---------------------------------------------------------------------------
// Displayed image slot
// ---------------------------------------------------------------------------

pub struct DisplayedImage {
    pub path: PathBuf,
    pub decoded: DecodedImage,
    pub fitted: Option<FittedImage>,
    /// Viewport `fitted` was computed for.
    pub fitted_for: (i64, i64),
}

impl DisplayedImage {
    fn new(path: PathBuf, decoded: DecodedImage) -> Self {
        Self {
            path,
            decoded,
            fitted: None,
            fitted_for: (0, 0),
        }
    }

    /// Recompute the fitted copy if the viewport changed since the last fit.
    pub fn refit(&mut self, view: (i64, i64)) {
        if self.fitted.is_some() && self.fitted_for == view {
            return;
        }
        let (w, h) = compute_fit(self.decoded.width, self.decoded.height, view.0, view.1);
        let fitted = if w > 0 && h > 0 {
            self.decoded.fitted(w, h)
        } else {
            log::debug!("fit for {:?} degenerate ({}x{}), keeping original size", self.path, w, h);
            self.decoded.original()
        };
        log::debug!(
            "[fit] {}x{} -> {}x{} for viewport {}x{}",
            self.decoded.width, self.decoded.height, fitted.width, fitted.height, view.0, view.1
        );
        self.fitted = Some(fitted);
        self.fitted_for = view;
    }
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

pub struct ViewerState {
    pub sequence: ImageSequence,
    /// Single slot for the image on screen; replacing it drops the previous one.
    pub displayed: Option<DisplayedImage>,
    pub error_message: Option<String>,
    /// Set once a folder has been selected.
    pub folder: Option<PathBuf>,
    pub mouse_pos: (f64, f64),
    /// Button under the cursor when the left mouse button went down.
    pub pressed_button: Option<Button>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            sequence: ImageSequence::new(),
            displayed: None,
            error_message: None,
            folder: None,
            mouse_pos: (0.0, 0.0),
            pressed_button: None,
        }
    }

    pub fn is_enabled(&self, button: Button) -> bool {
        match button {
            Button::Previous => self.sequence.has_previous(),
            Button::Next => self.sequence.has_next(),
            Button::SelectFolder | Button::Exit => true,
        }
    }

    /// Window title naming the entry under the cursor, even if it failed to decode.
    pub fn title(&self) -> String {
        match (self.sequence.current(), self.sequence.position()) {
            (Some(path), Some((pos, total))) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("{} - {} ({}/{})", WINDOW_TITLE, name, pos, total)
            }
            _ => WINDOW_TITLE.to_string(),
        }
    }

    /// Perform the action bound to `button`. Returns true if the app should quit.
    pub fn activate(&mut self, button: Button, dialogs: &dyn Dialogs) -> bool {
        if !self.is_enabled(button) {
            return false;
        }
        match button {
            Button::SelectFolder => self.select_folder(dialogs),
            Button::Previous => self.previous(dialogs),
            Button::Next => self.next(dialogs),
            Button::Exit => return true,
        }
        false
    }

    fn button_at_mouse(&self, fb_w: u32, fb_h: u32) -> Option<Button> {
        let (mx, my) = self.mouse_pos;
        Button::ALL
            .into_iter()
            .find(|&b| button_rect(b, fb_w, fb_h).contains(mx, my))
    }

    /// Left button went down: remember which button, if any, is under the cursor.
    pub fn press(&mut self, fb_w: u32, fb_h: u32) {
        self.pressed_button = self.button_at_mouse(fb_w, fb_h);
    }

    /// Left button came up. Activates a button only when the release lands on
    /// the same button the press started on. Returns true if the app should quit.
    pub fn release(&mut self, fb_w: u32, fb_h: u32, dialogs: &dyn Dialogs) -> bool {
        let Some(pressed) = self.pressed_button.take() else {
            return false;
        };
        if self.button_at_mouse(fb_w, fb_h) != Some(pressed) {
            return false;
        }
        self.activate(pressed, dialogs)
    }

    pub fn select_folder(&mut self, dialogs: &dyn Dialogs) {
        if let Some(folder) = dialogs.pick_folder() {
            self.load_folder(&folder, dialogs);
        }
    }

    pub fn load_folder(&mut self, folder: &Path, dialogs: &dyn Dialogs) {
        let files = match list_images(folder) {
            Ok(files) => files,
            Err(e) => {
                log::error!("Could not access folder: {}", e);
                dialogs.show_error("Error", &format!("Could not access folder: {}", e));
                return;
            }
        };

        self.folder = Some(folder.to_path_buf());
        self.error_message = None;
        self.sequence.load(files);
        log::info!("Loaded {} images from {:?}", self.sequence.len(), folder);

        if self.sequence.is_empty() {
            self.displayed = None;
            dialogs.show_info("No Images", "No supported images found in the selected folder.");
            return;
        }
        self.show_current(dialogs);
    }

    pub fn next(&mut self, dialogs: &dyn Dialogs) {
        if self.sequence.advance() {
            log::debug!("[nav] -> {}", self.sequence.current_index());
            self.show_current(dialogs);
        }
    }

    pub fn previous(&mut self, dialogs: &dyn Dialogs) {
        if self.sequence.retreat() {
            log::debug!("[nav] -> {}", self.sequence.current_index());
            self.show_current(dialogs);
        }
    }

    /// Decode the entry under the cursor into the display slot.
    ///
    /// A decode failure clears the slot and reports the error; the cursor is
    /// left where it is so the user can navigate away.
    pub fn show_current(&mut self, dialogs: &dyn Dialogs) {
        let Some(path) = self.sequence.current().map(Path::to_path_buf) else {
            return;
        };
        match decode_image(&path) {
            Ok(decoded) => {
                self.displayed = Some(DisplayedImage::new(path, decoded));
                self.error_message = None;
            }
            Err(e) => {
                log::warn!("Failed to load image: {}", e);
                self.displayed = None;
                self.error_message = Some(format!("Could not load: {}", e));
                dialogs.show_error("Error", &format!("Failed to load image: {}", e));
            }
        }
    }

    fn placeholder(&self) -> Option<&str> {
        if let Some(ref err) = self.error_message {
            Some(err.as_str())
        } else if self.displayed.is_some() {
            None
        } else if self.folder.is_some() && self.sequence.is_empty() {
            Some(NO_IMAGES)
        } else {
            Some(SELECT_PROMPT)
        }
    }

    /// Render into the softbuffer framebuffer (u32 per pixel, 0x00RRGGBB).
    pub fn render(&mut self, frame: &mut [u32], fb_w: u32, fb_h: u32) {
        frame.fill(rgb(BG_COLOR[0], BG_COLOR[1], BG_COLOR[2]));

        let area = image_area(fb_w, fb_h);
        let [r, g, b, a] = VIEWPORT_COLOR;
        fill_rect(frame, fb_w, fb_h, area, (r, g, b, a));

        if let Some(ref mut shown) = self.displayed {
            shown.refit(viewport(fb_w, fb_h));
            if let Some(ref fit) = shown.fitted {
                blit_centered(frame, fb_w, fb_h, &fit.rgba_bytes, fit.width, fit.height, area);
            }
        }

        if let Some(text) = self.placeholder() {
            let color = if self.error_message.is_some() {
                (255, 80, 80, 255)
            } else {
                (255, 255, 255, 255)
            };
            draw_text_centered(frame, fb_w, fb_h, text, area, TEXT_SCALE, color);
        }

        for button in Button::ALL {
            let rect = button_rect(button, fb_w, fb_h);
            let (face, text) = if self.is_enabled(button) {
                ((70, 70, 70, 255), (255, 255, 255, 255))
            } else {
                ((50, 50, 50, 255), (120, 120, 120, 255))
            };
            fill_rect(frame, fb_w, fb_h, rect, face);
            draw_text_centered(frame, fb_w, fb_h, button.label(), rect, TEXT_SCALE, text);
        }
    }
}
