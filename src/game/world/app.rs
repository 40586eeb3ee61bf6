use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;
use log::{debug, error, info, warn};

use crate::engine::audio::AudioPlayer;
use crate::engine::graphics::renderer::Renderer;
use crate::engine::input::InputHandler;
use crate::engine::window::WindowManager;
use crate::game::assets::{self, SpriteSheet};
use crate::game::config::GameConfig;
use crate::game::state::{FixedTimestep, GameState};
use crate::game::world::camera::Camera2D;
use crate::game::world::scene;

pub struct App {
    window_manager: WindowManager,
    renderer: Option<Renderer>,
    sprites: Option<SpriteSheet>,
    camera: Camera2D,
    input_handler: InputHandler,
    state: GameState,
    timestep: FixedTimestep,
    audio: AudioPlayer,
    last_frame: Option<Instant>,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let audio = if config.audio.enabled {
            let bank = assets::load_sound_bank(&config.assets);
            AudioPlayer::start(bank, config.audio.volume).unwrap_or_else(|e| {
                warn!("{}, continuing without sound", e);
                AudioPlayer::disabled()
            })
        } else {
            info!("Audio disabled by configuration");
            AudioPlayer::disabled()
        };

        Self {
            window_manager: WindowManager::new(),
            renderer: None,
            sprites: None,
            camera: Camera2D::new(config.screen.width, config.screen.height),
            input_handler: InputHandler::new(),
            timestep: FixedTimestep::new(config.rules.tick_rate),
            state: GameState::new(config),
            audio,
            last_frame: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let config = self.state.config();
        let (width, height) = config.window_size();
        let window = self.window_manager.create_window(event_loop, &config.window.title, width, height)?;

        let sprites = SpriteSheet::load(&config.assets);
        let renderer = pollster::block_on(Renderer::new(window, &sprites.atlas.image))?;

        self.renderer = Some(renderer);
        self.sprites = Some(sprites);
        Ok(())
    }

    /// Runs however many fixed ticks the elapsed time calls for.
    fn update(&mut self) {
        let now = Instant::now();
        let elapsed = self.last_frame.map(|last| now - last).unwrap_or_default();
        self.last_frame = Some(now);

        for _ in 0..self.timestep.advance(elapsed) {
            let input = self.input_handler.snapshot();
            self.input_handler.end_tick();
            for event in self.state.tick(&input) {
                debug!("{:?}", event);
                if !self.audio.is_enabled() {
                    continue;
                }
                if let Some(cue) = assets::sound_for(&event) {
                    self.audio.play(cue);
                }
            }
        }

        self.state.update_frame_count();
        if let Some(fps) = self.state.update_fps_display() {
            debug!("FPS: {}", fps);
        }
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(renderer), Some(sprites)) = (&mut self.renderer, &self.sprites) else {
            return;
        };
        let instances = scene::build_scene(&self.state, sprites);
        match renderer.render(&self.camera, &instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            error!("Failed to initialise graphics: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, high score this session: {}", self.state.high_score);
                event_loop.exit();
            },
            WindowEvent::RedrawRequested => {
                self.update();
                self.draw(event_loop);
                self.window_manager.request_redraw();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    self.input_handler.handle_keyboard_input_event(keycode, pressed);
                }
            }
            WindowEvent::Focused(focused) => {
                self.input_handler.handle_window_focus(focused);
            }
            _ => (),
        }
    }
}
