//! `/profile` - lifetime stats for a registered player

use serenity::all::{
  CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption,
  CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, Timestamp,
};

use crate::{discord::Responder, prelude::*, state::AppState};

pub const NAME: &str = "profile";

pub fn definition() -> CreateCommand {
  CreateCommand::new(NAME)
    .description("Show the LoL stats profile of a user.")
    .add_option(CreateCommandOption::new(
      CommandOptionType::User,
      "user",
      "The user whose profile to view (defaults to you).",
    ))
}

pub async fn run(
  app: &AppState,
  command: &CommandInteraction,
  responder: &mut Responder<'_>,
) -> Result<()> {
  let target = super::target_user(command);
  debug!("profile requested for {} ({})", target.tag(), target.id);

  responder.defer(false).await?;

  let sv = app.sv();
  let Some(account) = sv.accounts.by_owner(target.id.get() as i64).await?
  else {
    return responder
      .send_content(format!(
        "**{}** has no registered LoL account. Use `/register` to link one.",
        target.tag()
      ))
      .await;
  };

  let summary = sv.stats.profile(&account.summoner_name).await?;
  info!(
    "profile for '{}': {} games, {} wins",
    account.summoner_name, summary.games, summary.wins
  );

  let embed = CreateEmbed::new()
    .colour(0x3B82F6)
    .author(
      CreateEmbedAuthor::new(format!("Profile of {}", account.summoner_name))
        .icon_url(target.face()),
    )
    .field("Games Played", summary.games.to_string(), true)
    .field("Wins", summary.wins.to_string(), true)
    .field(
      "Win Rate",
      utils::format_win_rate(summary.wins, summary.games),
      true,
    )
    .field(
      "Average KDA",
      utils::format_kda(summary.kills, summary.deaths, summary.assists),
      true,
    )
    .field(
      "Avg. Damage",
      utils::group_digits(summary.avg_damage()),
      true,
    )
    .field("Avg. Gold", utils::group_digits(summary.avg_gold()), true)
    .field("Total Kills", utils::group_digits(summary.kills), true)
    .field("Total Deaths", utils::group_digits(summary.deaths), true)
    .field("Total Assists", utils::group_digits(summary.assists), true)
    .footer(CreateEmbedFooter::new(format!(
      "Linked to Discord account {}",
      target.tag()
    )))
    .timestamp(Timestamp::now());

  responder.send_embed(embed).await
}
