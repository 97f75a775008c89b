//! Calendar event color tag.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Color tag attached to a calendar event.
///
/// The set is closed: anything outside it is rejected when a request body
/// is deserialized, before any store access. Creation defaults to
/// [`EventColor::Blue`] when the field is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(
    feature = "sqlite",
    derive(sqlx::Type),
    sqlx(rename_all = "lowercase")
)]
pub enum EventColor {
    #[default]
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
    Orange,
    Gray,
}

impl EventColor {
    /// All recognized color names, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Blue,
        Self::Green,
        Self::Red,
        Self::Yellow,
        Self::Purple,
        Self::Orange,
        Self::Gray,
    ];

    /// The wire name of the color.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Gray => "gray",
        }
    }
}

impl fmt::Display for EventColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_blue() {
        assert_eq!(EventColor::default(), EventColor::Blue);
    }

    #[test]
    fn round_trips_every_color() {
        for color in EventColor::ALL {
            let json = serde_json::to_string(&color).unwrap();
            assert_eq!(json, format!("\"{color}\""));
            let back: EventColor = serde_json::from_str(&json).unwrap();
            assert_eq!(back, color);
        }
    }

    #[test]
    fn rejects_unknown_color() {
        assert!(serde_json::from_str::<EventColor>(r#""magenta""#).is_err());
    }
}
