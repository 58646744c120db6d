//! Error types for the bot

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("discord api error: {0}")]
  Discord(#[from] serenity::Error),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("nickname must be between 3 and 16 characters")]
  InvalidNickname,

  #[error("attachment is not an image")]
  NotAnImage,

  #[error("extraction produced {0} players, expected 10")]
  NotEnoughPlayers(usize),

  #[error("no usable summoner names in extraction")]
  NoSummonerNames,

  #[error("vision model returned no text")]
  EmptyExtraction,

  #[error("vision model response is not valid JSON: {0}")]
  MalformedExtraction(String),

  #[error("match already registered")]
  DuplicateMatch,

  #[error("user already has linked account `{0}`")]
  AccountLinked(String),

  #[error("summoner name `{0}` already registered")]
  NicknameTaken(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl Error {
  /// Message shown to the member who ran the command. Validation and
  /// conflict outcomes get specific text; external failures collapse into
  /// a generic line and the details stay in the logs.
  pub fn user_message(&self) -> String {
    match self {
      Error::InvalidNickname => {
        "Invalid nickname. It must be between 3 and 16 characters.".into()
      }
      Error::NotAnImage => "Please attach a valid image file.".into(),
      Error::NotEnoughPlayers(n) => format!(
        "Image analysis failed to extract all 10 players (extracted {n})."
      ),
      Error::NoSummonerNames => {
        "Could not extract any valid summoner names from the screenshot."
          .into()
      }
      Error::EmptyExtraction | Error::MalformedExtraction(_) => {
        "The AI did not return valid match data. Try a clearer screenshot."
          .into()
      }
      Error::DuplicateMatch => {
        "This match has already been registered.".into()
      }
      Error::AccountLinked(name) => format!(
        "You already have a linked LoL account (`{name}`). Unlink it before \
         registering a new one."
      ),
      Error::NicknameTaken(name) => {
        format!("The nickname `{name}` is already registered by another user.")
      }
      Error::Database(_)
      | Error::Discord(_)
      | Error::Http(_)
      | Error::Internal(_) => {
        "An error occurred. If the problem persists, contact an \
         administrator."
          .into()
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
