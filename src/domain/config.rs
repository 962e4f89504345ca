use std::{ops::Range, path::Path};

use serde::{Deserialize, Serialize};

/// Configuration for the planner.
///
/// This struct holds the thresholds used when classifying a semester's
/// credit load and the sizing of the requirement search bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// A non-empty semester below this many credits is underloaded.
    min_credits: u32,

    /// A semester above this many credits is overloaded.
    max_credits: u32,

    /// A summer semester above this many credits is overloaded.
    max_summer_credits: u32,

    /// Credit hours assumed for a course whose catalog code cannot be
    /// parsed when totalling a semester.
    default_credit_hours: u32,

    /// The window of search results shown in the requirement bank.
    bank_window: Range<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_credits: default_min_credits(),
            max_credits: default_max_credits(),
            max_summer_credits: default_max_summer_credits(),
            default_credit_hours: default_credit_hours(),
            bank_window: default_bank_window_start()..default_bank_window_end(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the underload threshold.
    #[must_use]
    pub const fn min_credits(&self) -> u32 {
        self.min_credits
    }

    /// Returns the overload threshold for fall and spring terms.
    #[must_use]
    pub const fn max_credits(&self) -> u32 {
        self.max_credits
    }

    /// Returns the overload threshold for summer terms.
    #[must_use]
    pub const fn max_summer_credits(&self) -> u32 {
        self.max_summer_credits
    }

    /// Returns the credit hours assumed for unparsable catalog codes.
    #[must_use]
    pub const fn default_credit_hours(&self) -> u32 {
        self.default_credit_hours
    }

    /// Returns the search bank's result window.
    #[must_use]
    pub fn bank_window(&self) -> Range<usize> {
        self.bank_window.clone()
    }

    /// Sets the search bank's result window.
    ///
    /// An inverted range is normalised to an empty window at `start`.
    pub fn set_bank_window(&mut self, window: Range<usize>) {
        self.bank_window = normalise_window(window.start, window.end);
    }

    /// Sets the credit thresholds.
    pub const fn set_thresholds(&mut self, min: u32, max: u32, max_summer: u32) {
        self.min_credits = min;
        self.max_credits = max;
        self.max_summer_credits = max_summer;
    }
}

const fn default_min_credits() -> u32 {
    12
}

const fn default_max_credits() -> u32 {
    19
}

const fn default_max_summer_credits() -> u32 {
    15
}

const fn default_credit_hours() -> u32 {
    3
}

const fn default_bank_window_start() -> usize {
    0
}

const fn default_bank_window_end() -> usize {
    5
}

fn default_bank_window() -> [usize; 2] {
    [default_bank_window_start(), default_bank_window_end()]
}

fn normalise_window(start: usize, end: usize) -> Range<usize> {
    start..end.max(start)
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_min_credits")]
        min_credits: u32,

        #[serde(default = "default_max_credits")]
        max_credits: u32,

        #[serde(default = "default_max_summer_credits")]
        max_summer_credits: u32,

        #[serde(default = "default_credit_hours")]
        default_credit_hours: u32,

        /// `[start, end)` of the visible search results.
        #[serde(default = "default_bank_window")]
        bank_window: [usize; 2],
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                min_credits,
                max_credits,
                max_summer_credits,
                default_credit_hours,
                bank_window: [start, end],
            } => Self {
                min_credits,
                max_credits,
                max_summer_credits,
                default_credit_hours,
                bank_window: normalise_window(start, end),
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            min_credits: config.min_credits,
            max_credits: config.max_credits,
            max_summer_credits: config.max_summer_credits,
            default_credit_hours: config.default_credit_hours,
            bank_window: [config.bank_window.start, config.bank_window.end],
        }
    }
}
