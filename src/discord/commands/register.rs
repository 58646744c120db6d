//! `/register` - link a LoL summoner name to the caller's Discord account

use serenity::all::{
  CommandInteraction, CommandOptionType, CreateCommand, CreateCommandOption,
  CreateEmbed, ResolvedOption, ResolvedValue, Timestamp,
};

use crate::{discord::Responder, prelude::*, state::AppState, sv};

pub const NAME: &str = "register";

pub fn definition() -> CreateCommand {
  CreateCommand::new(NAME)
    .description("Link your League of Legends account to your Discord (max 1).")
    .add_option(
      CreateCommandOption::new(
        CommandOptionType::String,
        "nickname",
        "Your LoL summoner name (e.g. Example Player).",
      )
      .required(true),
    )
}

pub async fn run(
  app: &AppState,
  command: &CommandInteraction,
  responder: &mut Responder<'_>,
) -> Result<()> {
  let options = command.data.options();
  let raw = match options.first() {
    Some(ResolvedOption { value: ResolvedValue::String(value), .. }) => {
      (*value).to_owned()
    }
    _ => return Err(Error::Internal("missing nickname option".into())),
  };

  let discord_id = command.user.id.get() as i64;
  let discord_tag = command.user.tag();
  info!("register started by {discord_tag} ({discord_id}) for '{raw}'");

  responder.defer(true).await?;

  let nickname = sv::validate_nickname(&raw)?;

  let sv = app.sv();
  sv.users.upsert(discord_id, &discord_tag).await?;

  // Friendly pre-checks; the unique constraints behind `link` remain the
  // authoritative duplicate signal for both races.
  if let Some(existing) = sv.accounts.by_owner(discord_id).await? {
    warn!(
      "{discord_tag} already has account '{}' linked",
      existing.summoner_name
    );
    return Err(Error::AccountLinked(existing.summoner_name));
  }
  if sv.accounts.by_name(nickname).await?.is_some() {
    warn!("nickname '{nickname}' already registered");
    return Err(Error::NicknameTaken(nickname.to_owned()));
  }

  sv.accounts.link(discord_id, nickname).await?;
  info!("account '{nickname}' registered for {discord_tag}");

  let embed = CreateEmbed::new()
    .colour(0x2ECC71)
    .title("✅ Account Registered!")
    .description(format!(
      "The nickname `{nickname}` is now linked to your Discord account \
       (<@{discord_id}>)."
    ))
    .field(
      "Next Steps",
      "Use `/processgame` with your screenshots to record matches, or \
       `/profile` / `/history` to view your stats.",
      false,
    )
    .timestamp(Timestamp::now());

  responder.send_embed(embed).await
}
