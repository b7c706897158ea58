use kiss3d::camera::Camera;
use kiss3d::context::Context;
use kiss3d::renderer::Renderer;
use kiss3d::resource::{
    AllocationType, BufferType, Effect, GPUVec, ShaderAttribute, ShaderUniform,
};
use nalgebra::{Point2, Point3, Vector2};

use crate::model::frame::{Rgb, Shape};

const NUM_SEGMENTS: usize = 32;

struct DiscData {
    // Pixels, y pointing down
    pub center: Point2<f32>,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: Point3<f32>,
}

/// Draws filled discs and stroked rings in screen space, in the order they were
/// added. Ignores the 3D camera entirely.
pub struct DiscRenderer {
    // OpenGL stuff
    shader: Effect,
    offset: ShaderAttribute<Point3<f32>>,
    center: ShaderUniform<Point3<f32>>,
    inner_radius: ShaderUniform<f32>,
    outer_radius: ShaderUniform<f32>,
    pixel_scale: ShaderUniform<Vector2<f32>>,
    color: ShaderUniform<Point3<f32>>,
    annulus: GPUVec<Point3<f32>>,
    // Size of the logical screen the shapes were laid out on
    screen_size: Vector2<f32>,
    // Data storage
    discs: Vec<DiscData>,
}

impl DiscRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let mut shader = Effect::new_from_str(VERTEX_SRC, FRAGMENT_SRC);

        shader.use_program();

        DiscRenderer {
            offset: shader
                .get_attrib::<Point3<f32>>("offset")
                .expect("Failed to get shader attribute."),
            center: shader
                .get_uniform::<Point3<f32>>("center")
                .expect("Failed to get shader uniform."),
            inner_radius: shader
                .get_uniform::<f32>("inner_radius")
                .expect("Failed to get shader uniform."),
            outer_radius: shader
                .get_uniform::<f32>("outer_radius")
                .expect("Failed to get shader uniform."),
            pixel_scale: shader
                .get_uniform::<Vector2<f32>>("pixel_scale")
                .expect("Failed to get shader uniform."),
            color: shader
                .get_uniform::<Point3<f32>>("color")
                .expect("Failed to get shader uniform."),
            annulus: GPUVec::new(
                annulus_points(NUM_SEGMENTS),
                BufferType::Array,
                AllocationType::StaticDraw,
            ),
            screen_size: Vector2::new(width as f32, height as f32),
            shader,
            discs: vec![],
        }
    }

    pub fn add_shape(&mut self, shape: &Shape) {
        let disc = match *shape {
            Shape::Disc {
                center,
                radius,
                color,
            } => DiscData {
                center: center.cast(),
                inner_radius: 0.0,
                outer_radius: radius as f32,
                color: to_gl_color(color),
            },
            Shape::Ring {
                center,
                radius,
                width,
                color,
            } => DiscData {
                center: center.cast(),
                inner_radius: (radius - width).max(0.0) as f32,
                outer_radius: radius as f32,
                color: to_gl_color(color),
            },
        };
        self.discs.push(disc);
    }

    fn to_ndc(&self, pixel: &Point2<f32>) -> Point2<f32> {
        Point2::new(
            2.0 * pixel.x / self.screen_size.x - 1.0,
            1.0 - 2.0 * pixel.y / self.screen_size.y,
        )
    }
}

pub fn to_gl_color(color: Rgb) -> Point3<f32> {
    Point3::new(
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
    )
}

/// Each segment of the annulus is two triangles. The z coordinate says whether
/// the vertex sits on the inner (0) or outer (1) edge.
fn annulus_points(n: usize) -> Vec<Point3<f32>> {
    use std::f32::consts::TAU;

    (0..n)
        .flat_map(|i| {
            let theta1 = (i as f32) / (n as f32) * TAU;
            let theta2 = ((i + 1) as f32) / (n as f32) * TAU;
            let (s1, c1) = theta1.sin_cos();
            let (s2, c2) = theta2.sin_cos();
            [
                Point3::new(c1, s1, 0.0),
                Point3::new(c1, s1, 1.0),
                Point3::new(c2, s2, 1.0),
                Point3::new(c1, s1, 0.0),
                Point3::new(c2, s2, 1.0),
                Point3::new(c2, s2, 0.0),
            ]
        })
        .collect()
}

/// Depth for the `i`th of `n` shapes. Strictly decreasing, so that with the
/// depth test on, later shapes always win.
fn layer_depth(i: usize, n: usize) -> f32 {
    0.999 - 1.998 * (i + 1) as f32 / (n + 1) as f32
}

impl Renderer for DiscRenderer {
    fn render(&mut self, _: usize, _: &mut dyn Camera) {
        if self.discs.is_empty() {
            return;
        }

        self.shader.use_program();
        self.offset.enable();

        let pixel_scale = Vector2::new(2.0 / self.screen_size.x, 2.0 / self.screen_size.y);
        self.pixel_scale.upload(&pixel_scale);

        let n = self.discs.len();
        for (i, disc) in self.discs.iter().enumerate() {
            let ndc = self.to_ndc(&disc.center);
            let center = Point3::new(ndc.x, ndc.y, layer_depth(i, n));

            self.offset.bind_sub_buffer(&mut self.annulus, 0, 0);
            self.center.upload(&center);
            self.inner_radius.upload(&disc.inner_radius);
            self.outer_radius.upload(&disc.outer_radius);
            self.color.upload(&disc.color);

            let ctxt = Context::get();
            ctxt.draw_arrays(Context::TRIANGLES, 0, self.annulus.len() as i32);
        }

        self.offset.disable();

        self.discs.clear();
    }
}

/// Vertex shader: pushes each annulus vertex out to the right radius, in pixels.
static VERTEX_SRC: &str = "#version 100
    attribute vec3 offset;
    uniform   vec3 center;
    uniform   float inner_radius;
    uniform   float outer_radius;
    uniform   vec2 pixel_scale;

    void main() {
        float radius = mix(inner_radius, outer_radius, offset.z);
        vec2 position = center.xy + radius * offset.xy * pixel_scale;
        gl_Position = vec4(position, center.z, 1.0);
    }";

/// Fragment shader: flat color.
static FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    uniform vec3 color;
    void main() {
        gl_FragColor = vec4(color, 1.0);
    }";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_depth() {
        let n = 500;
        for i in 0..n {
            let z = layer_depth(i, n);
            assert!(z > -1.0 && z < 1.0);
            assert!(layer_depth(i + 1, n) < z);
        }
    }

    #[test]
    fn test_annulus() {
        let points = annulus_points(4);
        assert_eq!(points.len(), 24);
        for p in points.iter() {
            approx::assert_relative_eq!(p.xy().coords.norm(), 1.0, epsilon = 1e-6);
            assert!(p.z == 0.0 || p.z == 1.0);
        }
    }

    #[test]
    fn test_gl_color() {
        approx::assert_relative_eq!(to_gl_color([255, 0, 51]), Point3::new(1.0, 0.0, 0.2));
    }
}
