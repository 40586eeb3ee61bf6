use glam::{Mat4, Vec2};

/// Region of the window the playfield is drawn into, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Orthographic camera over the fixed logical playfield.
pub struct Camera2D {
    pub logical_size: Vec2,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            logical_size: Vec2::new(width, height),
        }
    }

    /// Largest centred viewport that keeps the playfield's aspect ratio.
    pub fn viewport(&self, window_width: u32, window_height: u32) -> Viewport {
        let window = Vec2::new(window_width as f32, window_height as f32);
        let scale = (window.x / self.logical_size.x).min(window.y / self.logical_size.y);
        let size = self.logical_size * scale;
        let offset = (window - size) * 0.5;
        Viewport {
            x: offset.x.floor(),
            y: offset.y.floor(),
            width: size.x.floor().max(1.0),
            height: size.y.floor().max(1.0),
        }
    }

    /// Maps logical coordinates (origin top-left, y down) to clip space.
    pub fn view_proj_mat(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.logical_size.x, self.logical_size.y, 0.0, -1.0, 1.0)
    }

    pub fn create_view_proj(&self) -> [[f32; 4]; 4] {
        self.view_proj_mat().to_cols_array_2d()
    }
}
