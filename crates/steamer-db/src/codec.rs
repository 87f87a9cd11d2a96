//! JSON text codec for the `most_played_games` / `groups` columns.
//!
//! `None` maps to SQL `NULL` and `Some(vec![])` to `"[]"`, so "no data"
//! stays distinguishable from "no entries".

use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode_blob<T: Serialize>(value: Option<&[T]>) -> Result<Option<String>, serde_json::Error> {
    value.map(serde_json::to_string).transpose()
}

pub fn decode_blob<T: DeserializeOwned>(
    text: Option<&str>,
) -> Result<Option<Vec<T>>, serde_json::Error> {
    text.map(serde_json::from_str).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MostPlayedGame, SteamGroup};

    fn game(name: &str) -> MostPlayedGame {
        MostPlayedGame {
            game_name: Some(name.to_string()),
            hours_on_record: Some("12.5".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_none_encodes_to_null() {
        assert_eq!(encode_blob::<MostPlayedGame>(None).unwrap(), None);
        assert_eq!(decode_blob::<MostPlayedGame>(None).unwrap(), None);
    }

    #[test]
    fn test_empty_sequence_is_not_null() {
        let encoded = encode_blob::<SteamGroup>(Some(&[])).unwrap();
        assert_eq!(encoded.as_deref(), Some("[]"));
        let decoded = decode_blob::<SteamGroup>(encoded.as_deref()).unwrap();
        assert_eq!(decoded, Some(vec![]));
    }

    #[test]
    fn test_games_round_trip_preserves_order() {
        let games = vec![game("Half-Life 2"), game("Portal"), MostPlayedGame::default()];
        let encoded = encode_blob(Some(games.as_slice())).unwrap();
        let decoded: Option<Vec<MostPlayedGame>> = decode_blob(encoded.as_deref()).unwrap();
        assert_eq!(decoded, Some(games));
    }

    #[test]
    fn test_groups_round_trip() {
        let groups = vec![SteamGroup {
            is_primary: Some("1".to_string()),
            group_id64: Some("103582791429521408".to_string()),
            group_name: Some("Valve".to_string()),
            ..Default::default()
        }];
        let encoded = encode_blob(Some(groups.as_slice())).unwrap();
        let decoded: Option<Vec<SteamGroup>> = decode_blob(encoded.as_deref()).unwrap();
        assert_eq!(decoded, Some(groups));
    }

    #[test]
    fn test_decode_invalid_text_fails() {
        assert!(decode_blob::<SteamGroup>(Some("not json")).is_err());
    }
}
