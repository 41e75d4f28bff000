use crate::agent::Agent;
use crate::vector::Vector2D;

/// Drawing primitives supplied by the host (canvas, terminal, test recorder).
///
/// `shade` is the agent's speed relative to the speed limit, in `[0, 1]`.
pub trait Surface {
    type Error;

    fn clear(&mut self, width: f32, height: f32) -> Result<(), Self::Error>;

    /// Outlined circle. Used for circular agents and the pointer ring.
    fn draw_circle(&mut self, center: Vector2D, radius: f32, shade: f32)
        -> Result<(), Self::Error>;

    /// Closed polygon through `vertices`.
    fn draw_polygon(&mut self, vertices: &[Vector2D], shade: f32) -> Result<(), Self::Error>;
}

/// Shape used to draw one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    Circle {
        radius: f32,
    },
    /// Isosceles triangle: the tip sits `length` ahead of the agent along its
    /// heading, the two rear corners `length` behind it, `half_angle` off axis.
    Triangle {
        length: f32,
        half_angle: f32,
    },
}

impl Glyph {
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        agent: &Agent,
        shade: f32,
    ) -> Result<(), S::Error> {
        match *self {
            Glyph::Circle { radius } => surface.draw_circle(agent.position, radius, shade),
            Glyph::Triangle { length, half_angle } => {
                let vertices = triangle(agent.position, agent.heading(), length, half_angle);
                surface.draw_polygon(&vertices, shade)
            }
        }
    }
}

/// Corners of a triangle glyph centered on `center` and pointing along `heading`.
pub fn triangle(center: Vector2D, heading: f32, length: f32, half_angle: f32) -> [Vector2D; 3] {
    let back = heading + core::f32::consts::PI;
    [
        center + Vector2D::from_angle(heading) * length,
        center + Vector2D::from_angle(back + half_angle) * length,
        center + Vector2D::from_angle(back - half_angle) * length,
    ]
}
