//! Wire format of the catalog's `/search` endpoint.
//!
//! Decoding is deliberately lenient in three places, each covered by a test:
//! missing `players` or `teams` arrays decode as empty, a missing or
//! unrecognised `searchType` decodes as `None`, and every metadata field of
//! the envelope is optional.

use crate::domain::{Player, SearchKind, SearchQuery, Team};
use serde::{Deserialize, Deserializer, Serialize};

/// JSON body of `POST <base>/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_string: String,
    pub search_type: Option<SearchKind>,
    pub offset: Option<usize>,
    pub request_order: Option<u64>,
}

impl From<&SearchQuery> for SearchRequest {
    fn from(query: &SearchQuery) -> Self {
        Self {
            search_string: query.text.clone(),
            search_type: query.kind,
            offset: query.offset,
            request_order: query.request_order,
        }
    }
}

/// Top-level response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    pub result: SearchResult,
}

/// The `result` object of the envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub players: Vec<Player>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub teams: Vec<Team>,
    /// Free-form; the server has sent both booleans and strings here.
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_order: Option<u64>,
    #[serde(rename = "searchType", default, deserialize_with = "lenient_kind")]
    pub search_type: Option<SearchKind>,
    #[serde(rename = "searchString", default)]
    pub search_string: Option<String>,
    #[serde(rename = "serverAlert", default)]
    pub server_alert: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_kind<'de, D>(deserializer: D) -> Result<Option<SearchKind>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decodes a response body into its envelope.
///
/// # Errors
///
/// Returns the `serde_json` error when the body is not a valid envelope.
pub fn decode_envelope(body: &[u8]) -> Result<SearchEnvelope, serde_json::Error> {
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_and_nulls() {
        let query = SearchQuery::both("Beck");
        let body = serde_json::to_value(SearchRequest::from(&query)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "searchString": "Beck",
                "searchType": null,
                "offset": 0,
                "requestOrder": null
            })
        );

        let more = SearchQuery::more("Beck", SearchKind::Players, 10).with_request_order(4);
        let body = serde_json::to_value(SearchRequest::from(&more)).unwrap();
        assert_eq!(body["searchType"], "players");
        assert_eq!(body["offset"], 10);
        assert_eq!(body["requestOrder"], 4);
    }

    #[test]
    fn missing_arrays_default_to_empty() {
        let envelope = decode_envelope(br#"{"result": {"searchString": "zz"}}"#).unwrap();
        assert!(envelope.result.players.is_empty());
        assert!(envelope.result.teams.is_empty());
        assert_eq!(envelope.result.search_string.as_deref(), Some("zz"));
    }

    #[test]
    fn null_arrays_default_to_empty() {
        let envelope = decode_envelope(br#"{"result": {"players": null, "teams": null}}"#).unwrap();
        assert!(envelope.result.players.is_empty());
        assert!(envelope.result.teams.is_empty());
    }

    #[test]
    fn invalid_search_type_decodes_as_absent() {
        let envelope = decode_envelope(br#"{"result": {"searchType": "coaches"}}"#).unwrap();
        assert_eq!(envelope.result.search_type, None);

        let envelope = decode_envelope(br#"{"result": {"searchType": 3}}"#).unwrap();
        assert_eq!(envelope.result.search_type, None);

        let envelope = decode_envelope(br#"{"result": {"searchType": "teams"}}"#).unwrap();
        assert_eq!(envelope.result.search_type, Some(SearchKind::Teams));
    }

    #[test]
    fn full_envelope_decodes() {
        let body = br#"{
            "result": {
                "players": [{"playerID": "1", "playerFirstName": "David", "playerSecondName": "Beckham",
                             "playerNationality": "England", "playerAge": "46", "playerClub": "Inter Miami"}],
                "teams": [{"teamID": "t1", "teamName": "Beckenham", "teamStadium": "Eden Park",
                           "teamNationality": "England", "teamCity": "London"}],
                "status": true,
                "message": "ok",
                "request_order": 2,
                "searchType": null,
                "searchString": "beck",
                "serverAlert": ""
            }
        }"#;
        let envelope = decode_envelope(body).unwrap();
        assert_eq!(envelope.result.players[0].club, "Inter Miami");
        assert_eq!(envelope.result.teams[0].city, "London");
        assert_eq!(envelope.result.request_order, Some(2));
    }

    #[test]
    fn missing_result_is_an_error() {
        assert!(decode_envelope(br#"{"players": []}"#).is_err());
        assert!(decode_envelope(b"<html>").is_err());
    }
}
