//! Landing detection
//!
//! Only the top band of a platform is solid, and only for a falling ball:
//! rising through a platform from below never collides.

use super::state::{Ball, Platform};

/// Whether the ball's bottom edge sits in the platform's landing band
#[inline]
pub fn in_landing_band(ball: &Ball, platform: &Platform, tolerance: f32) -> bool {
    let overlaps_x =
        ball.pos.x + ball.size.x > platform.pos.x && ball.pos.x < platform.pos.x + platform.size.x;
    let bottom = ball.bottom();
    let in_band =
        bottom >= platform.pos.y && bottom <= platform.pos.y + platform.size.y + tolerance;
    overlaps_x && in_band
}

/// First platform (in iteration order) the descending ball lands on
pub fn find_landing<'a>(
    ball: &Ball,
    platforms: &'a [Platform],
    tolerance: f32,
) -> Option<&'a Platform> {
    if !ball.is_descending() {
        return None;
    }
    platforms.iter().find(|p| in_landing_band(ball, p, tolerance))
}

/// Whether the descending ball lands on any platform
pub fn has_landing(ball: &Ball, platforms: &[Platform], tolerance: f32) -> bool {
    find_landing(ball, platforms, tolerance).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlatformKind;
    use glam::Vec2;

    fn platform(id: u32, x: f32, y: f32) -> Platform {
        Platform::new(
            id,
            Vec2::new(x, y),
            Vec2::new(100.0, 20.0),
            PlatformKind::Static,
            200.0,
        )
    }

    fn ball(x: f32, y: f32, vy: f32) -> Ball {
        let mut ball = Ball::new(Vec2::new(x, y), Vec2::new(40.0, 40.0));
        ball.vel.y = vy;
        ball
    }

    #[test]
    fn test_landing_on_top() {
        let platforms = [platform(1, 150.0, 440.0)];
        assert!(has_landing(&ball(180.0, 400.4, 0.4), &platforms, 5.0));
    }

    #[test]
    fn test_no_landing_while_rising_or_still() {
        let platforms = [platform(1, 150.0, 440.0)];
        for vy in [0.0, -0.1, -15.0] {
            assert!(!has_landing(&ball(180.0, 402.0, vy), &platforms, 5.0), "vy={vy}");
        }
    }

    #[test]
    fn test_band_edges() {
        let platforms = [platform(1, 150.0, 440.0)];
        // Bottom exactly on top edge
        assert!(has_landing(&ball(180.0, 400.0, 1.0), &platforms, 5.0));
        // Bottom at the deepest tolerated point
        assert!(has_landing(&ball(180.0, 425.0, 1.0), &platforms, 5.0));
        // Just past the tolerance
        assert!(!has_landing(&ball(180.0, 425.5, 1.0), &platforms, 5.0));
        // Still above the platform
        assert!(!has_landing(&ball(180.0, 399.5, 1.0), &platforms, 5.0));
    }

    #[test]
    fn test_horizontal_overlap_is_strict() {
        let platforms = [platform(1, 150.0, 440.0)];
        // Touching left edge only
        assert!(!has_landing(&ball(110.0, 400.0, 1.0), &platforms, 5.0));
        // Touching right edge only
        assert!(!has_landing(&ball(250.0, 400.0, 1.0), &platforms, 5.0));
        assert!(has_landing(&ball(111.0, 400.0, 1.0), &platforms, 5.0));
    }

    #[test]
    fn test_first_match_wins() {
        let platforms = [platform(7, 150.0, 440.0), platform(3, 170.0, 438.0)];
        let hit = find_landing(&ball(180.0, 400.0, 2.0), &platforms, 5.0);
        assert_eq!(hit.map(|p| p.id), Some(7));
    }
}
