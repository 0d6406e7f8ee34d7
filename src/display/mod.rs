mod pixel_buffer;

pub use pixel_buffer::{PixelBuffer, Rgb, Rgba};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::game::{InputRecord, Key};

/// Anything that can show a finished frame
pub trait Present {
    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), String>;
}

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    staging: Vec<u8>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    /// Window contents were lost and need presenting again
    Exposed,
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseDown {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
    MouseUp {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonKind {
    Left,
    Right,
    Middle,
}

impl Display {
    /// Create display with custom resolution and VSync settings
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self { canvas, event_pump },
            texture_creator,
        ))
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), String> {
        if buffer.width() != target.width || buffer.height() != target.height {
            return Err(format!(
                "frame {}x{} does not match render target {}x{}",
                buffer.width(),
                buffer.height(),
                target.width,
                target.height
            ));
        }
        buffer.write_texture_bytes(&mut target.staging);
        target
            .texture
            .update(None, &target.staging, (buffer.width() * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::Window {
                    win_event: WindowEvent::Exposed,
                    ..
                } => events.push(InputEvent::Exposed),
                Event::MouseMotion { x, y, .. } => events.push(InputEvent::MouseMove { x, y }),
                Event::MouseButtonDown {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseDown { x, y, button });
                    }
                },
                Event::MouseButtonUp {
                    x, y, mouse_btn, ..
                } => {
                    if let Some(button) = map_mouse_button(mouse_btn) {
                        events.push(InputEvent::MouseUp { x, y, button });
                    }
                },
                _ => {},
            }
        }

        events
    }

    /// Record every game key that is currently held down
    pub fn sample_keys(&self, record: &mut InputRecord) {
        let state = self.event_pump.keyboard_state();
        for key in Key::ALL {
            if scancodes(key).iter().any(|&code| state.is_scancode_pressed(code)) {
                record.press(key);
            }
        }
    }
}

impl<'a> RenderTarget<'a> {
    /// Create a streaming texture matching the frame size
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let mut texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| e.to_string())?;
        // Frame alpha is informational only; never blend with the window
        texture.set_blend_mode(BlendMode::None);
        Ok(Self {
            texture,
            staging: Vec::with_capacity((width * height * 4) as usize),
            width,
            height,
        })
    }
}

/// Window plus its render target, presented as one unit
pub struct Screen<'a> {
    display: Display,
    target: RenderTarget<'a>,
}

impl<'a> Screen<'a> {
    pub fn new(display: Display, target: RenderTarget<'a>) -> Self {
        Self { display, target }
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }
}

impl Present for Screen<'_> {
    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), String> {
        self.display.present(&mut self.target, buffer)
    }
}

fn map_mouse_button(btn: MouseButton) -> Option<MouseButtonKind> {
    match btn {
        MouseButton::Left => Some(MouseButtonKind::Left),
        MouseButton::Right => Some(MouseButtonKind::Right),
        MouseButton::Middle => Some(MouseButtonKind::Middle),
        _ => None,
    }
}

fn scancodes(key: Key) -> &'static [Scancode] {
    match key {
        Key::A => &[Scancode::A],
        Key::D => &[Scancode::D],
        Key::S => &[Scancode::S],
        Key::W => &[Scancode::W],
        Key::Up => &[Scancode::Up],
        Key::Left => &[Scancode::Left],
        Key::Down => &[Scancode::Down],
        Key::Right => &[Scancode::Right],
        Key::Space => &[Scancode::Space],
        Key::Return => &[Scancode::Return, Scancode::KpEnter],
        Key::Escape => &[Scancode::Escape],
        Key::Shift => &[Scancode::LShift, Scancode::RShift],
    }
}
