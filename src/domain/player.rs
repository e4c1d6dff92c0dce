//! Player and team domain models.
//!
//! Both types decode straight from the catalog's wire keys (`playerID`,
//! `teamName`, ...) and are identified by their `id` alone: two fetches of
//! the same player may differ in every other field.

use serde::{Deserialize, Serialize};

/// A football player returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "playerID")]
    pub id: String,
    #[serde(rename = "playerFirstName", default)]
    pub first_name: String,
    #[serde(rename = "playerSecondName", default)]
    pub second_name: String,
    #[serde(rename = "playerNationality", default)]
    pub nationality: String,
    /// Age exactly as the server sends it. See [`Player::age_years`].
    #[serde(rename = "playerAge", default)]
    pub age: String,
    #[serde(rename = "playerClub", default)]
    pub club: String,
}

impl Player {
    /// Parses `age` as a whole number of years.
    ///
    /// The catalog sends ages as strings; anything unparseable yields `None`
    /// rather than an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use football_search::domain::Player;
    ///
    /// let mut player = Player::new("1", "David", "Beckham");
    /// player.age = "47".to_string();
    /// assert_eq!(player.age_years(), Some(47));
    ///
    /// player.age = "unknown".to_string();
    /// assert_eq!(player.age_years(), None);
    /// ```
    #[must_use]
    pub fn age_years(&self) -> Option<u32> {
        self.age.trim().parse().ok()
    }

    /// Name shown in lists: both names, or whichever one is present.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.second_name.is_empty()) {
            (true, _) => self.second_name.clone(),
            (_, true) => self.first_name.clone(),
            _ => format!("{} {}", self.first_name, self.second_name),
        }
    }

    /// Builds a player with only identity and names set.
    pub fn new(id: impl Into<String>, first_name: impl Into<String>, second_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            second_name: second_name.into(),
            nationality: String::new(),
            age: String::new(),
            club: String::new(),
        }
    }
}

/// A football team returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "teamID")]
    pub id: String,
    #[serde(rename = "teamName", default)]
    pub name: String,
    #[serde(rename = "teamStadium", default)]
    pub stadium: String,
    /// Country name, used as the key into the flag directory.
    #[serde(rename = "teamNationality", default)]
    pub nationality: String,
    #[serde(rename = "teamCity", default)]
    pub city: String,
}

impl Team {
    /// Builds a team with only identity, name and nationality set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, nationality: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stadium: String::new(),
            nationality: nationality.into(),
            city: String::new(),
        }
    }
}
