//! `/processgame` - extract and save a match from a scoreboard screenshot
//!
//! The only multi-write command: its pipeline lives in `sv::Ingest`; this
//! handler owns the Discord side (attachment validation, deferral, the
//! success embed and the best-effort log-channel relay).

use serenity::all::{
  Attachment, ChannelId, CommandInteraction, CommandOptionType, Context,
  CreateCommand, CreateCommandOption, CreateEmbed, CreateMessage,
  ResolvedOption, ResolvedValue, Timestamp,
};

use crate::{
  discord::Responder, prelude::*, state::AppState, sv::ingest::IngestReport,
};

pub const NAME: &str = "processgame";

pub fn definition() -> CreateCommand {
  CreateCommand::new(NAME)
    .description("Extract and save match data from a LoL scoreboard screenshot.")
    .add_option(
      CreateCommandOption::new(
        CommandOptionType::Attachment,
        "screenshot",
        "The end-of-match scoreboard screenshot.",
      )
      .required(true),
    )
}

pub async fn run(
  app: &AppState,
  ctx: &Context,
  command: &CommandInteraction,
  responder: &mut Responder<'_>,
) -> Result<()> {
  let Some(guild_id) = command.guild_id else {
    warn!("/processgame used outside a guild by {}", command.user.tag());
    return responder
      .send_content("This command can only be used inside a server.")
      .await;
  };

  let options = command.data.options();
  let attachment = match options.first() {
    Some(ResolvedOption {
      value: ResolvedValue::Attachment(attachment), ..
    }) => *attachment,
    _ => return Err(Error::Internal("missing screenshot option".into())),
  };

  responder.defer(false).await?;
  info!(
    "attachment received: {} ({:?})",
    attachment.filename, attachment.content_type
  );

  let mime = attachment
    .content_type
    .as_deref()
    .filter(|ct| ct.starts_with("image/"))
    .ok_or(Error::NotAnImage)?
    .to_owned();

  info!("sending screenshot to Gemini for analysis...");
  let image = attachment.download().await?;
  let data = app.gemini.extract_scoreboard(&image, &mime).await?;
  info!("extraction response parsed");

  let report = app.ingest().run(&data, &attachment.url).await?;

  let short = &report.match_hash[..12];
  let embed = CreateEmbed::new()
    .colour(0x2ECC71)
    .title("✅ Match Recorded!")
    .description(format!("Match `{short}` was analyzed and saved."))
    .field(
      "Linked Players",
      format!(
        "{} of {} players linked to registered accounts.",
        report.linked_summoners.len(),
        report.total_players
      ),
      false,
    )
    .timestamp(Timestamp::now());
  responder.send_embed(embed).await?;

  relay_to_log_channel(app, ctx, command, guild_id.get() as i64, &report, attachment)
    .await;

  Ok(())
}

/// Posts the match summary into the guild's configured log channel.
/// Everything here is best-effort: failures are logged and never fail the
/// command that already succeeded.
async fn relay_to_log_channel(
  app: &AppState,
  ctx: &Context,
  command: &CommandInteraction,
  guild_id: i64,
  report: &IngestReport,
  screenshot: &Attachment,
) {
  let channel = match app.sv().guilds.log_channel(guild_id).await {
    Ok(Some(id)) => ChannelId::new(id as u64),
    Ok(None) => {
      debug!("no log channel configured for guild {guild_id}");
      return;
    }
    Err(err) => {
      error!("failed to resolve log channel for guild {guild_id}: {err}");
      return;
    }
  };

  let affected = if report.linked_summoners.is_empty() {
    "None".to_owned()
  } else {
    report
      .linked_summoners
      .iter()
      .map(|name| format!("`{name}`"))
      .collect::<Vec<_>>()
      .join(", ")
  };

  let embed = CreateEmbed::new()
    .colour(0x2ECC71)
    .title("📄 New Match Processed")
    .description(format!(
      "Match submitted by <@{}> ({})",
      command.user.id,
      command.user.tag()
    ))
    .field("Hash", format!("`{}`", report.match_hash), true)
    .field(
      "Time",
      utils::relative_timestamp(Utc::now().timestamp()),
      true,
    )
    .field("Affected Players", affected, false)
    .image(&screenshot.url)
    .timestamp(Timestamp::now());

  match channel.send_message(&ctx.http, CreateMessage::new().embed(embed)).await
  {
    Ok(_) => info!("log relayed to channel {channel}"),
    Err(err) => error!("failed to relay log to channel {channel}: {err}"),
  }
}
