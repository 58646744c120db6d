//! `/ranking` - community leaderboard by win rate or KDA

use serenity::all::{
  CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption,
  CreateEmbed, CreateEmbedFooter, ResolvedOption, ResolvedValue, Timestamp,
};

use crate::{discord::Responder, prelude::*, state::AppState, sv::RankingMode};

pub const NAME: &str = "ranking";

const TOP: usize = 10;
const MIN_GAMES: u32 = 1;

pub fn definition() -> CreateCommand {
  CreateCommand::new(NAME)
    .description("Show the community ranking of registered players.")
    .add_option(
      CreateCommandOption::new(
        CommandOptionType::String,
        "type",
        "The metric to rank by.",
      )
      .required(true)
      .add_string_choice("Win Rate", "WINRATE")
      .add_string_choice("KDA", "KDA"),
    )
}

pub async fn run(
  app: &AppState,
  command: &CommandInteraction,
  responder: &mut Responder<'_>,
) -> Result<()> {
  let options = command.data.options();
  let mode = match options.first() {
    Some(ResolvedOption { value: ResolvedValue::String(value), .. }) => {
      match *value {
        "WINRATE" => RankingMode::WinRate,
        "KDA" => RankingMode::Kda,
        other => {
          return Err(Error::Internal(format!("unknown ranking type {other}")));
        }
      }
    }
    _ => return Err(Error::Internal("missing ranking type option".into())),
  };

  responder.defer(false).await?;

  let users = app.sv().stats.ranking(mode, MIN_GAMES).await?;
  if users.is_empty() {
    return responder
      .send_content(
        "No qualified players yet. Register with `/register` and record \
         matches with `/processgame`.",
      )
      .await;
  }
  info!("ranking ({mode:?}): {} qualified players", users.len());

  let (title, colour) = match mode {
    RankingMode::WinRate => ("🏆 Ranking by Win Rate", 0xFEE75C),
    RankingMode::Kda => ("⚔️ Ranking by KDA", 0xED4245),
  };

  let lines: Vec<String> = users
    .iter()
    .take(TOP)
    .enumerate()
    .map(|(i, user)| {
      let medal = match i {
        0 => "🥇".to_owned(),
        1 => "🥈".to_owned(),
        2 => "🥉".to_owned(),
        n => format!("{}.", n + 1),
      };
      let detail = match mode {
        RankingMode::WinRate => format!(
          "{} ({}W/{}L, {} games)",
          utils::format_win_rate(user.wins, user.games),
          user.wins,
          user.games - user.wins,
          user.games,
        ),
        RankingMode::Kda => format!(
          "{} ({}/{}/{} over {} games)",
          utils::format_kda(user.kills, user.deaths, user.assists),
          user.kills,
          user.deaths,
          user.assists,
          user.games,
        ),
      };
      format!(
        "{medal} **{}** (`{}`) - {detail}",
        user.discord_tag, user.summoner_name
      )
    })
    .collect();

  let embed = CreateEmbed::new()
    .colour(colour)
    .title(title)
    .description(lines.join("\n"))
    .footer(CreateEmbedFooter::new(format!(
      "{} qualified players (min. {MIN_GAMES} game)",
      users.len()
    )))
    .timestamp(Timestamp::now());

  responder.send_embed(embed).await
}
