//! Fixed camera and letterboxed viewport

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};

/// Maps OpenGL clip depth [-w, w] onto the [0, w] range wgpu keeps
pub const GL_TO_WGPU_DEPTH: Mat4 = Mat4::from_cols(
    Vec4::new(1.0, 0.0, 0.0, 0.0),
    Vec4::new(0.0, 1.0, 0.0, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 0.0),
    Vec4::new(0.0, 0.0, 0.5, 1.0),
);

/// Camera uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Viewport size in pixels, used to size point sprites
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub _padding: f32,
}

/// Viewport rectangle in physical pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Looks straight down the Z axis at the unit disk.
///
/// View and model are identity and the projection only remaps depth, so the
/// disk fills normalized device coordinates and every Z in [-1, 1] is drawn.
/// A fixed aspect ratio letterboxes the image inside the window.
pub struct Camera {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub aspect_ratio: Option<f32>,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(width: u32, height: u32, aspect_ratio: Option<f32>) -> Self {
        Self {
            projection: GL_TO_WGPU_DEPTH,
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            aspect_ratio,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Largest rectangle of the configured aspect ratio centred in the window
    pub fn viewport(&self) -> Viewport {
        let width = self.width as f32;
        let height = self.height as f32;

        let Some(aspect) = self.aspect_ratio else {
            return Viewport {
                x: 0.0,
                y: 0.0,
                width,
                height,
            };
        };

        if width / height > aspect {
            // Window too wide: bars left and right
            let fitted = height * aspect;
            Viewport {
                x: (width - fitted) * 0.5,
                y: 0.0,
                width: fitted,
                height,
            }
        } else {
            let fitted = width / aspect;
            Viewport {
                x: 0.0,
                y: (height - fitted) * 0.5,
                width,
                height: fitted,
            }
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view * self.model
    }

    pub fn to_uniform(&self, point_size: f32) -> CameraUniform {
        let viewport = self.viewport();
        CameraUniform {
            projection: self.projection.to_cols_array_2d(),
            view: self.view.to_cols_array_2d(),
            model: self.model.to_cols_array_2d(),
            viewport: [viewport.width, viewport.height],
            point_size,
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_without_aspect_fills_window() {
        let camera = Camera::new(800, 600, None);
        assert_eq!(
            camera.viewport(),
            Viewport {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0
            }
        );
    }

    #[test]
    fn test_viewport_pillarboxes_wide_window() {
        let camera = Camera::new(2000, 720, Some(16.0 / 9.0));
        let viewport = camera.viewport();
        assert_eq!(viewport.height, 720.0);
        assert!((viewport.width - 1280.0).abs() < 1e-3);
        assert!((viewport.x - 360.0).abs() < 1e-3);
        assert_eq!(viewport.y, 0.0);
    }

    #[test]
    fn test_viewport_letterboxes_tall_window() {
        let mut camera = Camera::new(1280, 720, Some(16.0 / 9.0));
        camera.resize(1280, 1000);
        let viewport = camera.viewport();
        assert_eq!(viewport.width, 1280.0);
        assert!((viewport.height - 720.0).abs() < 1e-3);
        assert!((viewport.y - 140.0).abs() < 1e-3);
    }

    #[test]
    fn test_uniform_matches_wgsl_layout() {
        // 3 * mat4x4 + vec2 + f32 + padding
        assert_eq!(std::mem::size_of::<CameraUniform>(), 208);

        let uniform = Camera::new(1280, 720, None).to_uniform(2.0);
        assert_eq!(uniform.projection, GL_TO_WGPU_DEPTH.to_cols_array_2d());
        assert_eq!(uniform.viewport, [1280.0, 720.0]);
        assert_eq!(uniform.point_size, 2.0);
    }

    #[test]
    fn test_full_height_range_lands_inside_clip_depth() {
        let camera = Camera::new(1280, 720, Some(16.0 / 9.0));
        let view_proj = camera.view_projection();

        for z in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            let clip = view_proj * Vec4::new(0.3, -0.4, z, 1.0);
            assert!(clip.z >= 0.0 && clip.z <= clip.w, "z = {z} clipped: {clip:?}");
            assert_eq!(clip.x, 0.3);
            assert_eq!(clip.y, -0.4);
        }

        assert_eq!((view_proj * Vec4::new(0.0, 0.0, -1.0, 1.0)).z, 0.0);
        assert_eq!((view_proj * Vec4::new(0.0, 0.0, 1.0, 1.0)).z, 1.0);
    }
}
