//! Collision detection and response for axis-aligned geometry
//!
//! The ball is treated as its bounding box. Responses reflect the velocity
//! across the contact normal and move the ball out of the surface it hit.

use glam::Vec2;

use super::geometry::Rect;
use super::state::{Ball, Paddle};
use crate::config::PaddleReflection;

/// A ball/surface contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit surface normal pointing toward the ball
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

/// Which walls the ball bounced off this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce the ball off the left, right and top walls, clamping it back inside.
/// The bottom edge is open: falling past it is a miss, not a bounce.
pub fn bounce_off_walls(ball: &mut Ball, field_width: f32) -> WallHits {
    let r = ball.radius;
    let mut hits = WallHits::default();

    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        ball.vel.x = ball.vel.x.abs();
        hits.left = true;
    } else if ball.pos.x + r > field_width {
        ball.pos.x = field_width - r;
        ball.vel.x = -ball.vel.x.abs();
        hits.right = true;
    }

    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        ball.vel.y = ball.vel.y.abs();
        hits.top = true;
    }

    hits
}

/// True if the ball came down onto the paddle's top face this tick.
///
/// `prev_bottom` is the ball's bottom edge before the tick's move. A ball that
/// was already below the paddle top cannot be caught from the side.
pub fn ball_hits_paddle(prev_bottom: f32, ball: &Ball, paddle: &Paddle) -> bool {
    ball.vel.y > 0.0
        && prev_bottom <= paddle.y
        && ball.bottom() >= paddle.y
        && ball.bounds().overlaps_x(&paddle.rect())
}

/// Send the ball back up off the paddle
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, reflection: &PaddleReflection) {
    ball.pos.y = paddle.y - ball.radius;
    ball.vel.y = -ball.vel.y.abs();

    if let PaddleReflection::Angled { max_dx } = *reflection {
        let half = paddle.width / 2.0;
        let offset = ((ball.pos.x - paddle.center_x()) / half).clamp(-1.0, 1.0);
        ball.vel.x = max_dx * offset;
    }
}

/// Check the ball against a block.
///
/// `prev_bounds` is the ball's bounding box before the tick's move and picks
/// the face that was struck: if the ball already overlapped the block
/// horizontally it came through the top or bottom face, otherwise through a
/// side. Corner entries count as top/bottom.
pub fn ball_block_contact(prev_bounds: &Rect, ball: &Ball, block: &Rect) -> Option<Contact> {
    let bounds = ball.bounds();
    if !bounds.overlaps(block) {
        return None;
    }

    let center = block.center();
    let side_entry = !prev_bounds.overlaps_x(block) && prev_bounds.overlaps_y(block);

    let contact = if side_entry {
        // The side the ball came from, not where its centre ended up
        if prev_bounds.right() <= block.left() {
            Contact {
                normal: Vec2::NEG_X,
                penetration: bounds.right() - block.left(),
            }
        } else {
            Contact {
                normal: Vec2::X,
                penetration: block.right() - bounds.left(),
            }
        }
    } else if ball.pos.y < center.y {
        Contact {
            normal: Vec2::NEG_Y,
            penetration: bounds.bottom() - block.top(),
        }
    } else {
        Contact {
            normal: Vec2::Y,
            penetration: block.bottom() - bounds.top(),
        }
    };

    Some(contact)
}

/// Push the ball out along the contact normal and reflect it if it is still
/// moving into the surface.
pub fn resolve_contact(ball: &mut Ball, contact: &Contact) {
    ball.pos += contact.normal * contact.penetration;
    if ball.vel.dot(contact.normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, contact.normal);
    }
}
