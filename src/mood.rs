//! Mood categories driving every mood-dependent visual.
//!
//! Parsing is deliberately permissive: whatever string the mood source hands
//! us, `Mood::parse` produces a value. Anything unrecognized (or absent) is
//! `Mood::Neutral`.

use std::fmt;

/// Closed set of emotion categories reported by the detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Fear,
    Surprise,
    Disgust,
    #[default]
    Neutral,
}

impl Mood {
    /// All moods in table order (index == `Mood::index`).
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Fear,
        Mood::Surprise,
        Mood::Disgust,
        Mood::Neutral,
    ];

    /// Case-insensitive match on the literal name; falls back to `Neutral`.
    pub fn parse(raw: Option<&str>) -> Mood {
        let Some(raw) = raw else {
            return Mood::Neutral;
        };
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(raw))
            .unwrap_or(Mood::Neutral)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Fear => "fear",
            Mood::Surprise => "surprise",
            Mood::Disgust => "disgust",
            Mood::Neutral => "neutral",
        }
    }

    /// Capitalized name for headings ("Happy").
    pub fn title(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Position of this mood in `Mood::ALL`.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Mood {
    fn from(raw: &str) -> Self {
        Mood::parse(Some(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Mood::parse(Some("Happy")), Mood::Happy);
        assert_eq!(Mood::parse(Some("SURPRISE")), Mood::Surprise);
        assert_eq!(Mood::parse(Some("sAd")), Mood::Sad);
    }

    #[test]
    fn padded_name_is_not_a_match() {
        assert_eq!(Mood::parse(Some(" sad ")), Mood::Neutral);
        assert_eq!(Mood::parse(Some("happy\n")), Mood::Neutral);
    }

    #[test]
    fn unknown_and_missing_fall_back_to_neutral() {
        assert_eq!(Mood::parse(None), Mood::Neutral);
        assert_eq!(Mood::parse(Some("")), Mood::Neutral);
        assert_eq!(Mood::parse(Some("contempt")), Mood::Neutral);
        assert_eq!(Mood::from("happyish"), Mood::Neutral);
    }

    #[test]
    fn index_matches_table_order() {
        for (i, m) in Mood::ALL.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn title_capitalizes_first_letter() {
        assert_eq!(Mood::Fear.title(), "Fear");
        assert_eq!(Mood::Neutral.to_string(), "neutral");
    }
}
