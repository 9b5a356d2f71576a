use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Metadata domain backed by one dataset file in the store.
///
/// Known variants keep file names consistent with the published metadata
/// bundle; `Other` lets callers address datasets added after this release.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    Kart,
    Pet,
    Track,
    GameType,
    FlyingPet,
    Character,
    Other(String),
}

impl Category {
    /// Every category shipped in the metadata bundle.
    pub const KNOWN: [Category; 6] = [
        Category::Kart,
        Category::Pet,
        Category::Track,
        Category::GameType,
        Category::FlyingPet,
        Category::Character,
    ];

    /// Dataset stem used for `<store>/<name>.json` and `<store>/<name>/`.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Kart => "kart",
            Category::Pet => "pet",
            Category::Track => "track",
            Category::GameType => "gameType",
            Category::FlyingPet => "flyingPet",
            Category::Character => "character",
            Category::Other(value) => value.as_str(),
        }
    }

    pub fn from_name(value: &str) -> Self {
        match value {
            "kart" => Category::Kart,
            "pet" => Category::Pet,
            "track" => Category::Track,
            "gameType" => Category::GameType,
            "flyingPet" => Category::FlyingPet,
            "character" => Category::Character,
            other => Category::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::from_name(value)
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_name(&value))
    }
}

// Asset ids in the bundle are 64-char hex digests; display names either
// contain a space or are short.
const IDENTIFIER_MIN_LEN: usize = 64;

/// Decide whether `value` should be treated as an asset id or a display name.
///
/// Exact for the published metadata formats, not a general classifier.
pub fn is_identifier(value: &str) -> bool {
    if value.contains(' ') {
        return false;
    }
    value.chars().count() >= IDENTIFIER_MIN_LEN
}
