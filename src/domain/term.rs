use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The part of the academic year a semester falls in.
///
/// Variants are declared in calendar order so that the derived ordering is
/// chronological within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Spring term (`s`).
    #[serde(rename = "s")]
    Spring,
    /// Summer term (`u`).
    #[serde(rename = "u")]
    Summer,
    /// Fall term (`f`).
    #[serde(rename = "f")]
    Fall,
}

impl Season {
    /// The single-letter code used in compact term codes.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Spring => 's',
            Self::Summer => 'u',
            Self::Fall => 'f',
        }
    }

    /// Parse a season from its single-letter code (case-insensitive).
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            's' => Some(Self::Spring),
            'u' => Some(Self::Summer),
            'f' => Some(Self::Fall),
            _ => None,
        }
    }

    /// The human-readable name of the season.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
        }
    }

    /// Parse a season from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Spring, Self::Summer, Self::Fall]
            .into_iter()
            .find(|season| season.name().eq_ignore_ascii_case(name))
    }
}

/// A structured term code identifying when a semester takes place.
///
/// The compact textual form is `{YEAR}{SEASON}`, for example `2024f`,
/// `2025s` or `2025u`. Display uses the long form, e.g. `Fall 2024`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemesterCode {
    /// The calendar year.
    pub year: u16,
    /// The season within the year.
    pub semester: Season,
}

impl SemesterCode {
    /// Create a term code.
    #[must_use]
    pub const fn new(year: u16, semester: Season) -> Self {
        Self { year, semester }
    }

    /// Whether this is a summer term.
    ///
    /// Summer terms have a lower overload threshold.
    #[must_use]
    pub const fn is_summer(self) -> bool {
        matches!(self.semester, Season::Summer)
    }

    /// The term that follows this one: spring, summer, fall, then the next
    /// year's spring.
    #[must_use]
    pub const fn next(self) -> Self {
        match self.semester {
            Season::Spring => Self::new(self.year, Season::Summer),
            Season::Summer => Self::new(self.year, Season::Fall),
            Season::Fall => Self::new(self.year.saturating_add(1), Season::Spring),
        }
    }

    /// Returns the compact representation, e.g. `2024f`.
    #[must_use]
    pub const fn compact(self) -> Compact {
        Compact(self)
    }
}

impl fmt::Display for SemesterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.semester.name(), self.year)
    }
}

/// Formats a [`SemesterCode`] in its compact form.
///
/// Returned by [`SemesterCode::compact`].
#[derive(Debug, Clone, Copy)]
pub struct Compact(SemesterCode);

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0.year, self.0.semester.letter())
    }
}

/// Errors that can occur when parsing a term code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The input does not have the `{YEAR}{SEASON}` shape.
    #[error("Invalid term code '{0}': expected a year followed by f, s or u (e.g. 2024f)")]
    Syntax(String),

    /// The season letter is not recognised.
    #[error("Invalid season '{1}' in term code '{0}': expected f, s or u")]
    Season(String, char),

    /// The year is not a valid number.
    #[error("Invalid year in term code '{0}'")]
    Year(String),
}

impl FromStr for SemesterCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(letter) = s.chars().last() else {
            return Err(Error::Syntax(s.to_string()));
        };
        if letter.is_ascii_digit() || s.len() < 2 {
            return Err(Error::Syntax(s.to_string()));
        }

        let semester =
            Season::from_letter(letter).ok_or_else(|| Error::Season(s.to_string(), letter))?;

        let year_str = &s[..s.len() - letter.len_utf8()];
        if !year_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::Year(s.to_string()));
        }
        let year = year_str
            .parse::<u16>()
            .map_err(|_| Error::Year(s.to_string()))?;

        Ok(Self::new(year, semester))
    }
}

impl TryFrom<&str> for SemesterCode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_codes() {
        assert_eq!(
            "2024f".parse::<SemesterCode>().unwrap(),
            SemesterCode::new(2024, Season::Fall)
        );
        assert_eq!(
            "2025U".parse::<SemesterCode>().unwrap(),
            SemesterCode::new(2025, Season::Summer)
        );
    }

    #[test]
    fn rejects_unknown_season() {
        let err = "2024x".parse::<SemesterCode>().unwrap_err();
        assert_eq!(err, Error::Season("2024x".to_string(), 'x'));
    }

    #[test]
    fn rejects_missing_season() {
        assert!(matches!(
            "2024".parse::<SemesterCode>(),
            Err(Error::Syntax(_))
        ));
        assert!(matches!("".parse::<SemesterCode>(), Err(Error::Syntax(_))));
    }

    #[test]
    fn rejects_bad_year() {
        assert!(matches!(
            "20a4f".parse::<SemesterCode>(),
            Err(Error::Year(_))
        ));
        assert!(matches!("f".parse::<SemesterCode>(), Err(Error::Syntax(_))));
    }

    #[test]
    fn displays_long_and_compact_forms() {
        let code = SemesterCode::new(2024, Season::Fall);
        assert_eq!(code.to_string(), "Fall 2024");
        assert_eq!(code.compact().to_string(), "2024f");
    }

    #[test]
    fn orders_chronologically() {
        let spring = SemesterCode::new(2025, Season::Spring);
        let summer = SemesterCode::new(2025, Season::Summer);
        let fall = SemesterCode::new(2024, Season::Fall);
        let mut codes = vec![summer, spring, fall];
        codes.sort();
        assert_eq!(codes, vec![fall, spring, summer]);
    }

    #[test]
    fn next_walks_the_academic_calendar() {
        let fall = SemesterCode::new(2024, Season::Fall);
        let spring = fall.next();
        assert_eq!(spring, SemesterCode::new(2025, Season::Spring));
        assert_eq!(spring.next(), SemesterCode::new(2025, Season::Summer));
        assert_eq!(spring.next().next(), SemesterCode::new(2025, Season::Fall));
        assert!(fall < spring);
    }

    #[test]
    fn season_names_parse_case_insensitively() {
        assert_eq!(Season::from_name("summer"), Some(Season::Summer));
        assert_eq!(Season::from_name("FALL"), Some(Season::Fall));
        assert_eq!(Season::from_name("winter"), None);
    }

    #[test]
    fn only_summer_is_summer() {
        assert!(SemesterCode::new(2025, Season::Summer).is_summer());
        assert!(!SemesterCode::new(2025, Season::Fall).is_summer());
    }
}
