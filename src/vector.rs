use crate::{Num, Vec2};

/// Polar helpers on top of glam's 2D vector.
///
/// `cross` is the scalar z-component of the 3D cross product. A positive
/// value means `other` lies counter-clockwise of `self`, which is how the
/// rest of the crate decides rotation direction.
pub trait Polar {
    fn from_polar(radius: Num, angle: Num) -> Self;

    /// Angle from the +x axis, `atan2(y, x)`.
    fn polar_angle(self) -> Num;

    fn cross(self, other: Self) -> Num;

    fn rotated(self, angle: Num) -> Self;
}

impl Polar for Vec2 {
    #[inline]
    fn from_polar(radius: Num, angle: Num) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(radius * cos, radius * sin)
    }

    #[inline]
    fn polar_angle(self) -> Num {
        self.y.atan2(self.x)
    }

    #[inline]
    fn cross(self, other: Self) -> Num {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    fn rotated(self, angle: Num) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use test_case::test_case;

    use super::*;
    use crate::constants::tolerance::TIGHT;
    use crate::{vec2, HALF_PI, PI};

    #[test_case(vec2(1.0, 0.0), vec2(0.0, 1.0), 1.0 ; "ccw quarter turn")]
    #[test_case(vec2(0.0, 1.0), vec2(1.0, 0.0), -1.0 ; "cw quarter turn")]
    #[test_case(vec2(2.0, 0.0), vec2(4.0, 0.0), 0.0 ; "parallel")]
    fn cross_sign(a: Vec2, b: Vec2, expected: Num) {
        assert_relative_eq!(a.cross(b), expected);
    }

    #[test]
    fn polar_construction_matches_angle_and_length() {
        let v = Vec2::from_polar(2.0, 0.75 * PI);

        assert_relative_eq!(v.length(), 2.0, epsilon = TIGHT);
        assert_relative_eq!(v.polar_angle(), 0.75 * PI, epsilon = TIGHT);
    }

    #[test]
    fn length_tracks_component_updates() {
        let mut v = vec2(3.0, 4.0);
        assert_relative_eq!(v.length(), 5.0);

        v.x = 0.0;
        assert_relative_eq!(v.length(), 4.0);
    }

    #[test]
    fn rotation_by_half_pi() {
        let v = vec2(1.0, 0.0).rotated(HALF_PI);

        assert_relative_eq!(v.x, 0.0, epsilon = TIGHT);
        assert_relative_eq!(v.y, 1.0, epsilon = TIGHT);
    }
}
