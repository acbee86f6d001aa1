//! Named color constants and random selection from the named palette.

use rand::Rng;

use super::Color;

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const LEGO_BLUE: Color = Color::new(0, 50, 150);
    pub const LEGO_ORANGE: Color = Color::new(255, 150, 40);

    pub const VIOLET: Color = Color::new(181, 126, 220);
    pub const ORANGE: Color = Color::new(255, 165, 0);
    pub const GREEN: Color = Color::new(0, 128, 0);
    pub const GRAY: Color = Color::new(128, 128, 128);

    // Extended colors
    pub const IVORY: Color = Color::new(255, 255, 240);
    pub const BEIGE: Color = Color::new(245, 245, 220);
    pub const WHEAT: Color = Color::new(245, 222, 179);
    pub const TAN: Color = Color::new(210, 180, 140);
    pub const KHAKI: Color = Color::new(195, 176, 145);
    pub const SILVER: Color = Color::new(192, 192, 192);
    pub const CHARCOAL: Color = Color::new(70, 70, 70);
    pub const NAVYBLUE: Color = Color::new(0, 0, 128);
    pub const ROYALBLUE: Color = Color::new(8, 76, 158);
    pub const MEDIUMBLUE: Color = Color::new(0, 0, 205);
    pub const AZURE: Color = Color::new(0, 127, 255);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const AQUAMARINE: Color = Color::new(127, 255, 212);
    pub const TEAL: Color = Color::new(0, 128, 128);
    pub const FORESTGREEN: Color = Color::new(34, 139, 34);
    pub const OLIVE: Color = Color::new(128, 128, 0);
    pub const LIME: Color = Color::new(191, 255, 0);
    pub const GOLD: Color = Color::new(255, 215, 0);
    pub const SALMON: Color = Color::new(250, 128, 114);
    pub const HOTPINK: Color = Color::new(252, 15, 192);
    pub const FUCHSIA: Color = Color::new(255, 119, 255);
    pub const PUCE: Color = Color::new(204, 136, 153);
    pub const PLUM: Color = Color::new(132, 49, 121);
    pub const INDIGO: Color = Color::new(75, 0, 130);
    pub const MAROON: Color = Color::new(128, 0, 0);
    pub const CRIMSON: Color = Color::new(220, 20, 60);
    pub const DEFAULT: Color = Color::new(0, 0, 0);

    // Segmentation labels (grab cut, smart blob search)
    pub const BACKGROUND: Color = Color::new(0, 0, 0);
    pub const MAYBE_BACKGROUND: Color = Color::new(64, 64, 64);
    pub const MAYBE_FOREGROUND: Color = Color::new(192, 192, 192);
    pub const FOREGROUND: Color = Color::new(255, 255, 255);
    pub const WATERSHED_FG: Color = Color::new(255, 255, 255);
    pub const WATERSHED_BG: Color = Color::new(128, 128, 128);
    pub const WATERSHED_UNSURE: Color = Color::new(0, 0, 0);

    /// Pick a random named color. BLACK (index 0 of [`NAMED`]) is never chosen.
    pub fn random() -> Color {
        Self::random_with(&mut rand::rng())
    }

    /// Same as [`Color::random`], drawing from the given generator.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Color {
        NAMED[rng.random_range(1..NAMED.len())]
    }
}

/// The ordered palette used by [`Color::random`].
pub static NAMED: [Color; 36] = [
    Color::BLACK,
    Color::WHITE,
    Color::BLUE,
    Color::YELLOW,
    Color::RED,
    Color::VIOLET,
    Color::ORANGE,
    Color::GREEN,
    Color::GRAY,
    Color::IVORY,
    Color::BEIGE,
    Color::WHEAT,
    Color::TAN,
    Color::KHAKI,
    Color::SILVER,
    Color::CHARCOAL,
    Color::NAVYBLUE,
    Color::ROYALBLUE,
    Color::MEDIUMBLUE,
    Color::AZURE,
    Color::CYAN,
    Color::AQUAMARINE,
    Color::TEAL,
    Color::FORESTGREEN,
    Color::OLIVE,
    Color::LIME,
    Color::GOLD,
    Color::SALMON,
    Color::HOTPINK,
    Color::FUCHSIA,
    Color::PUCE,
    Color::PLUM,
    Color::INDIGO,
    Color::MAROON,
    Color::CRIMSON,
    Color::DEFAULT,
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_named_starts_with_black() {
        assert_eq!(NAMED[0], Color::BLACK);
        assert_eq!(NAMED[NAMED.len() - 1], Color::DEFAULT);
    }

    #[test]
    fn test_random_draws_from_named_without_index_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 36];
        for _ in 0..5000 {
            let c = Color::random_with(&mut rng);
            let idx = NAMED[1..]
                .iter()
                .position(|n| *n == c)
                .expect("random color must be a named color");
            seen[idx + 1] = true;
        }
        // Every non-BLACK entry shows up; DEFAULT shares BLACK's value.
        assert!(seen[1..].iter().all(|s| *s));
        assert!(!seen[0]);
    }

    #[test]
    fn test_random_thread_rng_is_named() {
        for _ in 0..100 {
            assert!(NAMED[1..].contains(&Color::random()));
        }
    }
}
