pub trait FloatExt {
    fn approximately_eq(self, other: Self) -> bool;
    fn within(self, other: Self, tolerance: Self) -> bool;
}

impl FloatExt for f32 {
    fn approximately_eq(self, other: Self) -> bool {
        self.within(other, crate::EPSILON as f32)
    }

    fn within(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() <= tolerance
    }
}

impl FloatExt for f64 {
    fn approximately_eq(self, other: Self) -> bool {
        self.within(other, crate::EPSILON)
    }

    fn within(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_approximately_eq() {
        assert!(1.0_f64.approximately_eq(1.0));
        assert!((0.1_f64 + 0.2_f64).approximately_eq(0.3));
        assert!(!1.0_f64.approximately_eq(1.0001));
    }

    #[test]
    fn nan_is_never_equal() {
        assert!(!f64::NAN.approximately_eq(f64::NAN));
        assert!(!f64::NAN.within(0.0, f64::INFINITY));
    }

    #[test]
    fn within_is_inclusive() {
        // pixel tolerances are compared with <=
        assert!(10.0_f64.within(12.0, 2.0));
        assert!(!10.0_f64.within(12.5, 2.0));
        assert!((-3.0_f32).within(-2.0, 1.0));
    }
}
