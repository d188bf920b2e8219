use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The declared shape of user input for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The user describes a concrete research idea.
    #[default]
    Idea,

    /// The user pastes related literature.
    References,
}

impl Mode {
    /// Every mode, in the order the selection prompt lists them.
    pub const ALL: [Mode; 2] = [Mode::Idea, Mode::References];

    /// Returns the wire value sent in the `mode` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Idea => "idea",
            Mode::References => "references",
        }
    }

    /// Short label shown on the mode-selection control.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idea => "Research idea",
            Mode::References => "Related literature",
        }
    }

    /// The system message describing what to type once this mode is chosen.
    pub fn input_guide(&self) -> &'static str {
        match self {
            Mode::Idea => {
                "Please describe your research idea, including:\n- Research topic\n- Research goals\n- Expected contribution"
            }
            Mode::References => {
                "Please enter the related literature. For each work include:\n- Title\n- Authors\n- Abstract\n- Key findings"
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Parse a mode from its wire value.
    ///
    /// Accepts "idea" or "references" (case-insensitive), plus the numeric
    /// choices "1" and "2" offered by the selection prompt.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "idea" | "1" => Ok(Mode::Idea),
            "references" | "refs" | "2" => Ok(Mode::References),
            _ => Err(format!(
                "Invalid mode: {}. Valid options: idea, references",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_modes() {
        assert_eq!("idea".parse::<Mode>().unwrap(), Mode::Idea);
        assert_eq!("References".parse::<Mode>().unwrap(), Mode::References);
        assert_eq!("2".parse::<Mode>().unwrap(), Mode::References);
        assert!("thesis".parse::<Mode>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::References).unwrap(), "\"references\"");
        assert_eq!(Mode::Idea.to_string(), "idea");
    }

    #[test]
    fn default_is_idea() {
        assert_eq!(Mode::default(), Mode::Idea);
    }
}
