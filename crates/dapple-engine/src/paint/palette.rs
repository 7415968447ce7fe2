use std::fmt;

use rand::Rng;

use super::Color;

/// Categorical fill for gradient circles.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CircleColor {
    Red,
    Green,
    #[default]
    Blue,
    Yellow,
    Purple,
}

impl CircleColor {
    pub const ALL: [CircleColor; 5] = [
        CircleColor::Red,
        CircleColor::Green,
        CircleColor::Blue,
        CircleColor::Yellow,
        CircleColor::Purple,
    ];

    /// Picks a palette entry uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Opaque color the circle shader fades toward at the rim.
    pub fn color(self) -> Color {
        match self {
            CircleColor::Red => Color::from_straight(1.0, 0.0, 0.0, 1.0),
            CircleColor::Green => Color::from_straight(0.0, 1.0, 0.0, 1.0),
            CircleColor::Blue => Color::from_straight(0.0, 0.0, 1.0, 1.0),
            CircleColor::Yellow => Color::from_straight(1.0, 1.0, 0.0, 1.0),
            CircleColor::Purple => Color::from_straight(0.6, 0.0, 1.0, 1.0),
        }
    }
}

impl fmt::Display for CircleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CircleColor::Red => "red",
            CircleColor::Green => "green",
            CircleColor::Blue => "blue",
            CircleColor::Yellow => "yellow",
            CircleColor::Purple => "purple",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn palette_colors_are_opaque() {
        for c in CircleColor::ALL {
            assert_eq!(c.color().a, 1.0, "{c}");
        }
    }

    #[test]
    fn random_stays_in_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            assert!(CircleColor::ALL.contains(&CircleColor::random(&mut rng)));
        }
    }
}
