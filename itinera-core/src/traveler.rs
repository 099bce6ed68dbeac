//! Travelers taking part in a trip.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display colours handed out to travelers in order.
pub const PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#42d4f4", "#f032e6", "#9a6324",
];

/// Unique traveler identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct TravelerId(pub String);

impl TravelerId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TravelerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TravelerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A person taking part in the trip.
///
/// # Examples
/// ```
/// use itinera_core::Traveler;
///
/// let ana = Traveler::new("t1", "Ana");
/// assert_eq!(ana.id.0, "t1");
/// assert!(ana.color.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Traveler {
    /// Unique identifier.
    pub id: TravelerId,
    /// Name shown to other travelers.
    pub name: String,
    /// Optional display colour, e.g. `#4363d8`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
}

impl Traveler {
    /// Construct a traveler without a colour.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TravelerId::new(id),
            name: name.into(),
            color: None,
        }
    }
}

/// Reassign display colours from [`PALETTE`], cycling when there are more
/// travelers than colours.
///
/// Call this whenever the traveler list grows or shrinks so colours stay
/// distinct and stable by position.
///
/// # Examples
/// ```
/// use itinera_core::{PALETTE, Traveler, assign_palette};
///
/// let mut travelers = vec![Traveler::new("a", "Ana"), Traveler::new("b", "Ben")];
/// assign_palette(&mut travelers);
/// assert_eq!(travelers[1].color.as_deref(), PALETTE.get(1).copied());
/// ```
pub fn assign_palette(travelers: &mut [Traveler]) {
    for (traveler, colour) in travelers.iter_mut().zip(PALETTE.iter().cycle()) {
        traveler.color = Some((*colour).to_owned());
    }
}
