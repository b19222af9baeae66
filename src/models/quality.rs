//! Recall-quality judgment supplied by the study driver.

use std::fmt;

/// The four judgments a reviewer can give, mapped to SM-2 grades.
///
/// The scheduler itself accepts any integer grade; this enum is the closed
/// set produced by the study loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    Again,
    Hard,
    Good,
    Easy,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Again, Quality::Hard, Quality::Good, Quality::Easy];

    /// SM-2 grade for this judgment: Again=0, Hard=3, Good=4, Easy=5.
    pub fn grade(self) -> i32 {
        match self {
            Quality::Again => 0,
            Quality::Hard => 3,
            Quality::Good => 4,
            Quality::Easy => 5,
        }
    }

    /// Whether this judgment counts as a successful recall.
    pub fn is_success(self) -> bool {
        self.grade() >= 3
    }

    /// Parses a study-loop answer ("1".."4" or the judgment name).
    pub fn parse(input: &str) -> Option<Quality> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "again" => Some(Quality::Again),
            "2" | "hard" => Some(Quality::Hard),
            "3" | "good" => Some(Quality::Good),
            "4" | "easy" => Some(Quality::Easy),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quality::Again => "Again",
            Quality::Hard => "Hard",
            Quality::Good => "Good",
            Quality::Easy => "Easy",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_mapping() {
        assert_eq!(Quality::Again.grade(), 0);
        assert_eq!(Quality::Hard.grade(), 3);
        assert_eq!(Quality::Good.grade(), 4);
        assert_eq!(Quality::Easy.grade(), 5);
    }

    #[test]
    fn test_only_again_fails() {
        assert!(!Quality::Again.is_success());
        assert!(Quality::Hard.is_success());
        assert!(Quality::Good.is_success());
        assert!(Quality::Easy.is_success());
    }

    #[test]
    fn test_parse_accepts_digits_and_names() {
        assert_eq!(Quality::parse("1"), Some(Quality::Again));
        assert_eq!(Quality::parse(" easy "), Some(Quality::Easy));
        assert_eq!(Quality::parse("GOOD"), Some(Quality::Good));
        assert_eq!(Quality::parse("5"), None);
        assert_eq!(Quality::parse(""), None);
    }
}
