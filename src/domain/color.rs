use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A symbolic colour tag from the fixed palette.
///
/// Colours group and classify semesters and courses visually. They have no
/// effect on validation or credit computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// No colour assigned.
    #[default]
    Plain,
    /// Red tag.
    Red,
    /// Orange tag.
    Orange,
    /// Yellow tag.
    Yellow,
    /// Green tag.
    Green,
    /// Blue tag.
    Blue,
    /// Purple tag.
    Purple,
    /// Pink tag.
    Pink,
}

impl Color {
    /// Every colour in the palette, in display order.
    pub const PALETTE: [Self; 8] = [
        Self::Plain,
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Pink,
    ];

    /// The lowercase name of the colour.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a colour name is not in the palette.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown colour '{0}'")]
pub struct UnknownColor(String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::PALETTE
            .into_iter()
            .find(|color| color.name() == lower)
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_names() {
        for color in Color::PALETTE {
            assert_eq!(color.name().parse::<Color>().unwrap(), color);
        }
        assert_eq!("Blue".parse::<Color>().unwrap(), Color::Blue);
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            "teal".parse::<Color>(),
            Err(UnknownColor("teal".to_string()))
        );
    }
}
