//! Limited-overs match formats

use serde::{Deserialize, Serialize};
use std::fmt;

/// Match format, which fixes the length of a full innings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    T10,
    T20,
    #[serde(rename = "ODI")]
    Odi,
}

impl MatchFormat {
    /// All supported formats, in ascending innings length
    pub const ALL: [MatchFormat; 3] = [MatchFormat::T10, MatchFormat::T20, MatchFormat::Odi];

    /// Balls in a full, uninterrupted innings for this format
    pub fn max_balls(&self) -> u32 {
        match self {
            MatchFormat::T10 => 60,
            MatchFormat::T20 => 120,
            MatchFormat::Odi => 300,
        }
    }

    /// Get format name as string (the wire name)
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchFormat::T10 => "T10",
            MatchFormat::T20 => "T20",
            MatchFormat::Odi => "ODI",
        }
    }

    /// Resolve a wire name back to a format
    pub fn from_name(name: &str) -> Option<MatchFormat> {
        MatchFormat::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_balls_per_format() {
        assert_eq!(MatchFormat::T10.max_balls(), 60);
        assert_eq!(MatchFormat::T20.max_balls(), 120);
        assert_eq!(MatchFormat::Odi.max_balls(), 300);
    }

    #[test]
    fn test_name_round_trip() {
        for format in MatchFormat::ALL {
            assert_eq!(MatchFormat::from_name(format.as_str()), Some(format));
        }
        assert_eq!(MatchFormat::from_name("T30"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&MatchFormat::Odi).unwrap(), "\"ODI\"");
        let parsed: MatchFormat = serde_json::from_str("\"T20\"").unwrap();
        assert_eq!(parsed, MatchFormat::T20);
    }
}
