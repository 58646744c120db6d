//! `/history` - the ten most recent matches of a registered player

use serenity::all::{
  CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption,
  CreateEmbed, CreateEmbedFooter, Timestamp,
};

use crate::{discord::Responder, prelude::*, state::AppState};

pub const NAME: &str = "history";

const HISTORY_LIMIT: u64 = 10;

pub fn definition() -> CreateCommand {
  CreateCommand::new(NAME)
    .description("Show the last 10 recorded matches of a user.")
    .add_option(CreateCommandOption::new(
      CommandOptionType::User,
      "user",
      "The user whose history to view (defaults to you).",
    ))
}

pub async fn run(
  app: &AppState,
  command: &CommandInteraction,
  responder: &mut Responder<'_>,
) -> Result<()> {
  let target = super::target_user(command);
  debug!("history requested for {} ({})", target.tag(), target.id);

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

  let rows =
    sv.stats.history(&account.summoner_name, HISTORY_LIMIT).await?;
  if rows.is_empty() {
    return responder
      .send_content(format!(
        "No matches recorded for `{}` yet. Submit one with `/processgame`.",
        account.summoner_name
      ))
      .await;
  }
  info!("history for '{}': {} rows", account.summoner_name, rows.len());

  let mut embed = CreateEmbed::new()
    .colour(0x5865F2)
    .title(format!("📜 Match History of {}", account.summoner_name))
    .footer(CreateEmbedFooter::new(format!(
      "Linked to Discord account {}",
      target.tag()
    )))
    .timestamp(Timestamp::now());

  for row in &rows {
    let outcome = match row.win {
      Some(true) => "Victory",
      Some(false) => "Defeat",
      None => "??",
    };
    let when = utils::relative_timestamp(row.processed_at.and_utc().timestamp());
    embed = embed.field(
      format!("{} ({outcome}) - {when}", row.champion_name),
      format!(
        "KDA: **{}/{}/{}** | Damage: {} | Gold: {}\nMatch: `{}`",
        row.kills,
        row.deaths,
        row.assists,
        utils::group_digits(row.damage),
        utils::group_digits(row.gold),
        &row.match_hash[..12],
      ),
      false,
    );
  }

  responder.send_embed(embed).await
}
