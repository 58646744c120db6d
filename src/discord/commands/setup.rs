//! `/setup logs` - guild configuration, admin-only

use serenity::all::{
  ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
  CreateCommandOption, CreateEmbed, CreateEmbedFooter, CreateMessage,
  Permissions, ResolvedOption, ResolvedValue, Timestamp,
};

use crate::{discord::Responder, prelude::*, state::AppState};

pub const NAME: &str = "setup";

pub fn definition() -> CreateCommand {
  CreateCommand::new(NAME)
    .description("Configure the bot for this server.")
    .default_member_permissions(Permissions::MANAGE_GUILD)
    .dm_permission(false)
    .add_option(
      CreateCommandOption::new(
        CommandOptionType::SubCommand,
        "logs",
        "Set the channel where processed matches are announced.",
      )
      .add_sub_option(
        CreateCommandOption::new(
          CommandOptionType::Channel,
          "channel",
          "The text channel for match logs.",
        )
        .channel_types(vec![ChannelType::Text])
        .required(true),
      ),
    )
}

pub async fn run(
  app: &AppState,
  ctx: &Context,
  command: &CommandInteraction,
  responder: &mut Responder<'_>,
) -> Result<()> {
  let Some(guild_id) = command.guild_id else {
    warn!("/setup used outside a guild by {}", command.user.tag());
    return responder
      .send_content("This command can only be used inside a server.")
      .await;
  };

  let options = command.data.options();
  let channel = match options.first() {
    Some(ResolvedOption {
      name, value: ResolvedValue::SubCommand(sub), ..
    }) if *name == "logs" => match sub.first() {
      Some(ResolvedOption {
        value: ResolvedValue::Channel(channel), ..
      }) => *channel,
      _ => return Err(Error::Internal("missing channel option".into())),
    },
    _ => return Err(Error::Internal("unknown setup subcommand".into())),
  };

  responder.defer(true).await?;

  app
    .sv()
    .guilds
    .set_log_channel(guild_id.get() as i64, channel.id.get() as i64)
    .await?;
  info!(
    "guild {guild_id}: log channel set to {} by {}",
    channel.id,
    command.user.tag()
  );

  // Confirm in the configured channel so a missing permission shows up
  // now instead of on the first `/processgame`.
  let confirmation = channel
    .id
    .send_message(
      &ctx.http,
      CreateMessage::new()
        .content("✅ This channel will now receive match logs."),
    )
    .await;

  let mut embed = CreateEmbed::new()
    .colour(0x2ECC71)
    .title("✅ Log Channel Configured!")
    .description(format!(
      "Processed matches will be announced in <#{}>.",
      channel.id
    ))
    .timestamp(Timestamp::now());
  if let Err(err) = confirmation {
    warn!("confirmation message to {} failed: {err}", channel.id);
    embed = embed.footer(CreateEmbedFooter::new(
      "⚠️ Could not send a confirmation message there. Check that the bot \
       can write to that channel.",
    ));
  }

  responder.send_embed(embed).await
}
