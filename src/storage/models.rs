//! Storage record models for the favorites store.
//!
//! Records are kept separate from the domain [`Player`] so the on-disk shape
//! can carry storage-only fields such as `favorited_at`.

use crate::domain::Player;
use serde::{Deserialize, Serialize};

/// A favorited player as persisted on disk.
///
/// Keyed by `id`. Every other player field is overwritten on upsert, while
/// `favorited_at` keeps the time of the first insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: String,
    pub first_name: String,
    pub second_name: String,
    pub nationality: String,
    pub age: String,
    pub club: String,

    /// Unix timestamp of the first time the player was favorited.
    pub favorited_at: i64,
}

impl FavoriteRecord {
    /// Projects a player into a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use football_search::domain::Player;
    /// use football_search::storage::FavoriteRecord;
    ///
    /// let record = FavoriteRecord::from_player(&Player::new("9", "Alan", "Shearer"));
    /// assert_eq!(record.id, "9");
    /// assert_eq!(record.to_player().display_name(), "Alan Shearer");
    /// ```
    #[must_use]
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            first_name: player.first_name.clone(),
            second_name: player.second_name.clone(),
            nationality: player.nationality.clone(),
            age: player.age.clone(),
            club: player.club.clone(),
            favorited_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Converts the record back into a domain player.
    #[must_use]
    pub fn to_player(&self) -> Player {
        Player {
            id: self.id.clone(),
            first_name: self.first_name.clone(),
            second_name: self.second_name.clone(),
            nationality: self.nationality.clone(),
            age: self.age.clone(),
            club: self.club.clone(),
        }
    }

    /// Case-insensitive substring match on first or second name.
    ///
    /// `needle_lower` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.first_name.to_lowercase().contains(needle_lower)
            || self.second_name.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_either_name_ignoring_case() {
        let record = FavoriteRecord::from_player(&Player::new("1", "David", "Beckham"));
        assert!(record.matches("beck"));
        assert!(record.matches("avi"));
        assert!(!record.matches("rooney"));
    }
}
