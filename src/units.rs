use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign, Sum};

/// A length in PDF points (1/72 inch), the unit used for page coordinates,
/// font sizes, and leading.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, AddAssign, Sub, SubAssign, Sum, From,
    Into, Display,
)]
pub struct Pt(pub f32);

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;
    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;
    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl std::ops::Neg for Pt {
    type Output = Pt;
    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

/// 1 inch in points
pub const IN: f32 = 72.0;
/// 1 centimeter in points
pub const CM: f32 = 72.0 / 2.54;
/// 1 millimeter in points
pub const MM: f32 = CM / 10.0;

/// Converts n font units to points, given a font size in points. Font metrics
/// in this crate are always normalized to 1000 units per em.
pub fn fu_to_pt(n: f64, font_size: Pt) -> Pt {
    Pt((n * font_size.0 as f64 / 1000.0) as f32)
}

/// Converts n points to font units, given a font size in points.
pub fn pt_to_fu(n: Pt, font_size: Pt) -> f64 {
    n.0 as f64 * 1000.0 / font_size.0 as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_unit_conversion_round_trips() {
        let size = Pt(12.0);
        let fu = 1500.0;
        let pt = fu_to_pt(fu, size);
        assert_eq!(pt, Pt(18.0));
        assert!((pt_to_fu(pt, size) - fu).abs() < 1e-3);
    }
}
