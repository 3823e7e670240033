use gamemath::Vec2;

pub trait Perpendicular {
    fn perpendicular(self: &Self) -> Self;
}

impl<T: std::ops::Neg<Output = T> + Copy> Perpendicular for Vec2<T> {
    fn perpendicular(&self) -> Self {
        Vec2 {
            x: -self.y,
            y: self.x,
        }
    }
}

/// Moves `current` a fixed fraction of the way toward `target`.
pub fn ease_toward(current: Vec2<f32>, target: Vec2<f32>, factor: f32) -> Vec2<f32> {
    Vec2 {
        x: current.x + (target.x - current.x) * factor,
        y: current.y + (target.y - current.y) * factor,
    }
}

pub fn same(a: Vec2<f32>, b: Vec2<f32>) -> bool {
    a.x == b.x && a.y == b.y
}

pub fn clamp01(val: f32) -> f32 {
    val.max(0.0).min(1.0)
}

/// Rounds to `digits` significant digits.
pub fn round_significant(val: f32, digits: i32) -> f32 {
    if val == 0.0 || !val.is_finite() {
        return val;
    }
    let magnitude = val.abs().log10().floor() as i32;
    let scale = 10f64.powi(digits - 1 - magnitude);
    ((val as f64 * scale).round() / scale) as f32
}

/// Absolute value, with zero and NaN replaced by one.
pub fn positive_or_one(val: f32) -> f32 {
    let abs = val.abs();
    if abs == 0.0 || abs.is_nan() {
        1.0
    } else {
        abs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_moves_two_percent() {
        let eased = ease_toward(Vec2::new(0.0, 0.0), Vec2::new(100.0, -50.0), 0.02);
        assert!((eased.x - 2.0).abs() < 1e-6);
        assert!((eased.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn significant_digits() {
        assert_eq!(round_significant(1.23456, 3), 1.23);
        assert_eq!(round_significant(2.999, 3), 3.0);
        assert_eq!(round_significant(1.005001, 3), 1.01);
        assert_eq!(round_significant(0.0, 3), 0.0);
    }

    #[test]
    fn speeds_become_positive() {
        assert_eq!(positive_or_one(-5.0), 5.0);
        assert_eq!(positive_or_one(0.0), 1.0);
        assert_eq!(positive_or_one(-0.0), 1.0);
        assert_eq!(positive_or_one(f32::NAN), 1.0);
        assert_eq!(positive_or_one(3.5), 3.5);
    }

    #[test]
    fn perpendicular_rotates_quarter_turn() {
        let p = Vec2::new(1.0f32, 0.0).perpendicular();
        assert_eq!((p.x, p.y), (0.0, 1.0));
    }
}
