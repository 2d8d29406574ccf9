mod colour_buffer;

pub use colour_buffer::ColourBuffer;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

#[cfg(feature = "viewer")]
pub use viewer::{Display, InputEvent, RenderTarget};

/// SDL2 presentation of a `ColourBuffer`
#[cfg(feature = "viewer")]
mod viewer {
    use super::ColourBuffer;
    use crate::error::{RasterError, RasterResult};

    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;
    use sdl2::pixels::PixelFormatEnum;
    use sdl2::render::{Canvas, Texture, TextureCreator};
    use sdl2::video::{Window, WindowContext};
    use sdl2::EventPump;

    fn display_err(e: impl ToString) -> RasterError {
        RasterError::Display(e.to_string())
    }

    pub struct Display {
        canvas: Canvas<Window>,
        event_pump: EventPump,
        width: u32,
        height: u32,
    }

    pub struct RenderTarget<'a> {
        texture: Texture<'a>,
        width: u32,
        height: u32,
    }

    #[derive(Debug, Clone)]
    pub enum InputEvent {
        Quit,
        KeyDown(Keycode),
    }

    impl Display {
        /// Create a window of the given size with VSync enabled
        pub fn with_size(
            title: &str,
            width: u32,
            height: u32,
        ) -> RasterResult<(Self, TextureCreator<WindowContext>)> {
            let sdl_context = sdl2::init().map_err(display_err)?;
            let video_subsystem = sdl_context.video().map_err(display_err)?;

            let window = video_subsystem
                .window(title, width, height)
                .position_centered()
                .build()
                .map_err(display_err)?;

            let canvas = window
                .into_canvas()
                .accelerated()
                .present_vsync()
                .build()
                .map_err(display_err)?;

            let texture_creator = canvas.texture_creator();
            let event_pump = sdl_context.event_pump().map_err(display_err)?;

            Ok((
                Self {
                    canvas,
                    event_pump,
                    width,
                    height,
                },
                texture_creator,
            ))
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        pub fn present(
            &mut self,
            target: &mut RenderTarget,
            buffer: &ColourBuffer,
        ) -> RasterResult<()> {
            target
                .texture
                .update(None, &buffer.to_abgr8888(), (buffer.width() * 4) as usize)
                .map_err(display_err)?;

            self.canvas
                .copy(&target.texture, None, None)
                .map_err(display_err)?;
            self.canvas.present();
            Ok(())
        }

        pub fn poll_events(&mut self) -> Vec<InputEvent> {
            let mut events = Vec::new();

            for event in self.event_pump.poll_iter() {
                match event {
                    Event::Quit { .. } => events.push(InputEvent::Quit),
                    Event::KeyDown {
                        keycode: Some(k), ..
                    } => events.push(InputEvent::KeyDown(k)),
                    _ => {},
                }
            }

            events
        }
    }

    impl<'a> RenderTarget<'a> {
        pub fn with_size(
            texture_creator: &'a TextureCreator<WindowContext>,
            width: u32,
            height: u32,
        ) -> RasterResult<Self> {
            let texture = texture_creator
                .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
                .map_err(display_err)?;
            Ok(Self {
                texture,
                width,
                height,
            })
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }
    }
}
