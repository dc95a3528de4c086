use std::num::NonZeroU32;
use std::path::PathBuf;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};
use softbuffer::Surface;

use crate::ui::dialogs::{Dialogs, NativeDialogs};
use crate::ui::state::{Button, ViewerState, WINDOW_TITLE};

pub mod dialogs;
pub mod render;
pub mod state;

// ---------------------------------------------------------------------------
// Application handler (winit 0.30 style)
// ---------------------------------------------------------------------------

pub struct App {
    pub state: ViewerState,
    pub window: Option<Arc<Window>>,
    pub context: Option<softbuffer::Context<Arc<Window>>>,
    pub surface: Option<Surface<Arc<Window>, Arc<Window>>>,
    pub dialogs: Box<dyn Dialogs>,
    initial_size: LogicalSize<u32>,
    /// Folder given on the command line, loaded once the window exists.
    initial_folder: Option<PathBuf>,
}

impl App {
    pub fn new(state: ViewerState, initial_size: (u32, u32), initial_folder: Option<PathBuf>) -> Self {
        Self {
            state,
            window: None,
            context: None,
            surface: None,
            dialogs: Box::new(NativeDialogs),
            initial_size: LogicalSize::new(initial_size.0, initial_size.1),
            initial_folder,
        }
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        match self.window {
            Some(ref window) => {
                let size = window.inner_size();
                (size.width.max(1), size.height.max(1))
            }
            None => (1, 1),
        }
    }

    /// Push title changes to the window and schedule a repaint.
    fn refresh(&self) {
        if let Some(ref window) = self.window {
            window.set_title(&self.state.title());
            window.request_redraw();
        }
    }

    fn activate(&mut self, event_loop: &ActiveEventLoop, button: Button) {
        if self.state.activate(button, self.dialogs.as_ref()) {
            event_loop.exit();
            return;
        }
        self.refresh();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs).map_err(|e| e.to_string())?);
        let context = softbuffer::Context::new(Arc::clone(&window)).map_err(|e| e.to_string())?;
        let surface = Surface::new(&context, Arc::clone(&window)).map_err(|e| e.to_string())?;

        window.request_redraw();
        self.window = Some(window);
        self.context = Some(context);
        self.surface = Some(surface);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            log::error!("Could not create window: {}", e);
            event_loop.exit();
            return;
        }

        if let Some(folder) = self.initial_folder.take() {
            log::info!("Opening {:?}", folder);
            self.state.load_folder(&folder, self.dialogs.as_ref());
            self.refresh();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(_) => {
                // The surface resize and refit happen on redraw, so a burst of
                // resize events costs one resample per frame.
                if let Some(ref window) = self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let button = match &event.logical_key {
                    Key::Named(NamedKey::ArrowLeft) => Some(Button::Previous),
                    Key::Named(NamedKey::ArrowRight | NamedKey::Space) => Some(Button::Next),
                    Key::Named(NamedKey::Escape) => Some(Button::Exit),
                    Key::Character(s) => match s.chars().next().map(|c| c.to_ascii_lowercase()) {
                        Some('h') => Some(Button::Previous),
                        Some('l') => Some(Button::Next),
                        Some('o') if !event.repeat => Some(Button::SelectFolder),
                        Some('q') => Some(Button::Exit),
                        _ => None,
                    },
                    _ => None,
                };
                if let Some(button) = button {
                    self.activate(event_loop, button);
                }
            }

            WindowEvent::CursorMoved {
                position: PhysicalPosition { x, y },
                ..
            } => {
                self.state.mouse_pos = (x, y);
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let (fb_w, fb_h) = self.framebuffer_size();
                if state == ElementState::Pressed {
                    self.state.press(fb_w, fb_h);
                    return;
                }
                if self.state.release(fb_w, fb_h, self.dialogs.as_ref()) {
                    event_loop.exit();
                    return;
                }
                self.refresh();
            }

            WindowEvent::RedrawRequested => {
                let (fb_w, fb_h) = self.framebuffer_size();
                let Some(ref mut surface) = self.surface else { return };
                if let (Some(w), Some(h)) = (NonZeroU32::new(fb_w), NonZeroU32::new(fb_h)) {
                    if let Err(e) = surface.resize(w, h) {
                        log::error!("Could not resize surface: {}", e);
                        return;
                    }
                }
                match surface.buffer_mut() {
                    Ok(mut buffer) => {
                        self.state.render(&mut buffer, fb_w, fb_h);
                        if let Err(e) = buffer.present() {
                            log::error!("Could not present frame: {}", e);
                        }
                    }
                    Err(e) => log::error!("Could not get frame buffer: {}", e),
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}
