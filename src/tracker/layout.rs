//! Card sizing for the main roster row. Pure arithmetic, no state.

use crate::config::{
    CARD_GAP, MAX_CARD_HEIGHT, MAX_CARD_HEIGHT_FULLSCREEN, MAX_CARD_WIDTH, MIN_CARD_HEIGHT,
    MIN_CARD_WIDTH, RATIO_FULLSCREEN, RATIO_WINDOWED,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub width: f64,
    pub height: f64,
    pub font_size: u32,
}

/// Size `count` cards to share a row `row_width` pixels wide.
pub fn layout(count: usize, row_width: f64, fullscreen: bool) -> CardLayout {
    let total_gap = CARD_GAP * (count as f64 - 1.0);
    let available = row_width - total_gap;
    let width = (available / count.max(1) as f64).clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH);

    let (min_ratio, base_ratio) = if fullscreen { RATIO_FULLSCREEN } else { RATIO_WINDOWED };
    let width_factor = (width - MIN_CARD_WIDTH) / (MAX_CARD_WIDTH - MIN_CARD_WIDTH);
    let ratio = min_ratio + (base_ratio - min_ratio) * width_factor.min(1.0);

    let max_height = if fullscreen { MAX_CARD_HEIGHT_FULLSCREEN } else { MAX_CARD_HEIGHT };
    // Upper bound first, then the floor.
    let height = (width * ratio).min(max_height).max(MIN_CARD_HEIGHT);

    CardLayout {
        width,
        height,
        font_size: name_font_size(count),
    }
}

pub fn name_font_size(count: usize) -> u32 {
    match count {
        0..=4 => 28,
        5..=6 => 24,
        7..=8 => 20,
        9..=10 => 16,
        _ => 11,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn single_card_caps_at_max_width() {
        let l = layout(1, 1000.0, false);
        assert!(close(l.width, 250.0));
        assert!(close(l.height, 375.0));
        assert_eq!(l.font_size, 28);
    }

    #[test]
    fn many_cards_floor_at_min_width() {
        let l = layout(12, 1000.0, false);
        assert!(close(l.width, 130.0));
        assert!(close(l.height, 156.0));
        assert_eq!(l.font_size, 11);
    }

    #[test]
    fn fullscreen_uses_taller_ratio_and_cap() {
        let l = layout(1, 1000.0, true);
        assert!(close(l.width, 250.0));
        assert!(close(l.height, 450.0));

        let l = layout(12, 1000.0, true);
        assert!(close(l.height, 182.0));
    }

    #[test]
    fn ratio_interpolates_between_bounds() {
        // 5 cards on 1000px: (1000 - 40) / 5 = 192
        let l = layout(5, 1000.0, false);
        assert!(close(l.width, 192.0));
        let factor = (192.0 - 130.0) / 120.0;
        let ratio = 1.2 + 0.3 * factor;
        assert!(close(l.height, 192.0 * ratio));
        assert_eq!(l.font_size, 24);
    }

    #[test]
    fn height_floor_applies_after_cap() {
        // Narrow row still produces at least the minimum height.
        let l = layout(3, 100.0, false);
        assert!(close(l.width, 130.0));
        assert!(l.height >= 150.0);
    }

    #[test]
    fn empty_roster_is_sized_like_one() {
        let l = layout(0, 200.0, false);
        assert!(close(l.width, 210.0));
        assert_eq!(l.font_size, 28);
    }

    #[test]
    fn font_steps() {
        assert_eq!(name_font_size(4), 28);
        assert_eq!(name_font_size(6), 24);
        assert_eq!(name_font_size(8), 20);
        assert_eq!(name_font_size(10), 16);
        assert_eq!(name_font_size(11), 11);
    }
}
