//! Display unit conversion

/// Convert density-independent pixels to physical pixels, rounding half up
pub fn dip_to_px(density: f32, dp: f32) -> i32 {
    (dp * density + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dip_to_px() {
        assert_eq!(dip_to_px(2.0, 10.0), 20);
        assert_eq!(dip_to_px(1.5, 1.0), 2);
        assert_eq!(dip_to_px(1.0, 0.4), 0);
        assert_eq!(dip_to_px(2.75, 48.0), 132);
        assert_eq!(dip_to_px(3.0, 0.0), 0);
    }
}
