//! Gemini vision client - turns a post-game scoreboard screenshot into
//! structured match data.
//!
//! One outbound `generateContent` call per `/processgame`: a fixed
//! instruction plus the base64-encoded image. The model is asked for bare
//! JSON but responses wrapped in markdown code fences are tolerated.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::Deserialize;

use crate::prelude::*;

const MODEL: &str = "gemini-2.0-flash";
const ENDPOINT: &str =
  "https://generativelanguage.googleapis.com/v1beta/models";

const EXTRACTION_PROMPT: &str = "\
Your task is to analyze the image of a League of Legends post-game \
scoreboard and extract the data of all 10 players. You must return \
strictly a single valid JSON object, with no text, comments or markdown \
formatting such as ```json before or after.
The JSON structure must be exactly this:
{
  \"result\": \"VICTORY\" or \"DEFEAT\",
  \"team1_players\": [{\"summonerName\": \"...\", \"championName\": \"...\", \"KDA\": \"K/D/A\", \"damage\": 0, \"gold\": 0}],
  \"team2_players\": [{\"summonerName\": \"...\", \"championName\": \"...\", \"KDA\": \"K/D/A\", \"damage\": 0, \"gold\": 0}]
}
Follow these extraction rules with absolute precision:
1. result: find the word \"VICTORY\" or \"DEFEAT\" in the top-left corner.
2. team1_players / team2_players: extract the 5 players of each team into the matching list.
3. summonerName: each player's summoner name.
4. championName: the champion name, shown below the summonerName.
5. KDA: the trio of numbers in the \"K / D / A\" format.
6. damage: the first of the two large numbers to the right of the KDA. Extract only the integer.
7. gold: the second of the two large numbers, to the right of the damage. Extract only the integer.
Be meticulous. Do not invent data. If a value is unreadable, use null.";

/// One extracted scoreboard row. Any field can be unreadable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerData {
  #[serde(default, rename = "summonerName")]
  pub summoner_name: Option<String>,
  #[serde(default, rename = "championName")]
  pub champion_name: Option<String>,
  #[serde(default, rename = "KDA")]
  pub kda: Option<String>,
  #[serde(default)]
  pub damage: Option<i64>,
  #[serde(default)]
  pub gold: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameData {
  #[serde(default)]
  pub result: Option<String>,
  #[serde(default)]
  pub team1_players: Option<Vec<PlayerData>>,
  #[serde(default)]
  pub team2_players: Option<Vec<PlayerData>>,
}

impl GameData {
  pub fn team1(&self) -> &[PlayerData] {
    self.team1_players.as_deref().unwrap_or_default()
  }

  pub fn team2(&self) -> &[PlayerData] {
    self.team2_players.as_deref().unwrap_or_default()
  }

  /// Both teams concatenated, team 1 first.
  pub fn all_players(&self) -> Vec<PlayerData> {
    self.team1().iter().chain(self.team2()).cloned().collect()
  }

  /// VICTORY -> 1, DEFEAT -> 2, anything else is recorded as unknown.
  pub fn winning_team(&self) -> Option<i32> {
    match self.result.as_deref() {
      Some("VICTORY") => Some(1),
      Some("DEFEAT") => Some(2),
      _ => None,
    }
  }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
  #[serde(default)]
  text: Option<String>,
}

impl GenerateResponse {
  fn text(&self) -> Option<String> {
    let content = self.candidates.first()?.content.as_ref()?;
    let text: String =
      content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
    (!text.is_empty()).then_some(text)
  }
}

pub struct Gemini {
  http: Client,
  api_key: String,
}

impl Gemini {
  pub fn new(api_key: String) -> Self {
    Self { http: Client::new(), api_key }
  }

  pub async fn extract_scoreboard(
    &self,
    image: &[u8],
    mime: &str,
  ) -> Result<GameData> {
    let body = json::json!({
      "contents": [{
        "parts": [
          { "text": EXTRACTION_PROMPT },
          { "inline_data": { "mime_type": mime, "data": BASE64.encode(image) } },
        ]
      }]
    });

    let url = format!("{ENDPOINT}/{MODEL}:generateContent");
    let response: GenerateResponse = self
      .http
      .post(&url)
      .query(&[("key", self.api_key.as_str())])
      .json(&body)
      .send()
      .await?
      .error_for_status()?
      .json()
      .await?;

    let text = response.text().ok_or(Error::EmptyExtraction)?;
    parse_game_data(&text)
  }
}

pub fn parse_game_data(text: &str) -> Result<GameData> {
  let cleaned = strip_code_fence(text);
  json::from_str(cleaned).map_err(|err| {
    let head: String = text.chars().take(200).collect();
    warn!("unparseable model output: {head}...");
    Error::MalformedExtraction(err.to_string())
  })
}

fn strip_code_fence(text: &str) -> &str {
  let trimmed = text.trim();
  let trimmed = trimmed
    .strip_prefix("```json")
    .or_else(|| trimmed.strip_prefix("```"))
    .unwrap_or(trimmed);
  let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
  trimmed.trim()
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = r#"{
    "result": "VICTORY",
    "team1_players": [{"summonerName": "Faker", "championName": "Azir", "KDA": "5/1/7", "damage": 21043, "gold": 13220}],
    "team2_players": [{"summonerName": null, "championName": null, "KDA": null, "damage": null, "gold": null}]
  }"#;

  #[test]
  fn parses_bare_json() {
    let data = parse_game_data(SAMPLE).unwrap();
    assert_eq!(data.winning_team(), Some(1));
    assert_eq!(data.team1()[0].summoner_name.as_deref(), Some("Faker"));
    assert_eq!(data.team2()[0].summoner_name, None);
  }

  #[test]
  fn strips_markdown_fences() {
    let fenced = format!("```json\n{SAMPLE}\n```");
    let data = parse_game_data(&fenced).unwrap();
    assert_eq!(data.all_players().len(), 2);

    let plain_fence = format!("```\n{SAMPLE}\n```");
    assert!(parse_game_data(&plain_fence).is_ok());
  }

  #[test]
  fn rejects_non_json() {
    let err = parse_game_data("I could not read the image, sorry!");
    assert!(matches!(err, Err(Error::MalformedExtraction(_))));
  }

  #[test]
  fn unknown_result_is_not_rejected() {
    let data = parse_game_data(r#"{"result": null}"#).unwrap();
    assert_eq!(data.winning_team(), None);
    assert!(data.all_players().is_empty());
  }

  #[test]
  fn missing_team_defaults_to_empty() {
    let data =
      parse_game_data(r#"{"result": "DEFEAT", "team1_players": null}"#)
        .unwrap();
    assert_eq!(data.winning_team(), Some(2));
    assert!(data.team1().is_empty());
  }
}
