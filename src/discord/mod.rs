//! Discord surface: slash-command registration and dispatch

mod commands;
mod responder;

use std::sync::Arc;

use serenity::all::{
  Command, Context, CreateCommand, EventHandler, GuildId, Interaction, Ready,
};

use crate::{prelude::*, state::AppState};
pub use responder::Responder;

pub struct Handler {
  app: Arc<AppState>,
}

impl Handler {
  pub fn new(app: Arc<AppState>) -> Self {
    Self { app }
  }
}

fn definitions() -> Vec<CreateCommand> {
  vec![
    commands::register::definition(),
    commands::processgame::definition(),
    commands::profile::definition(),
    commands::history::definition(),
    commands::ranking::definition(),
    commands::setup::definition(),
  ]
}

#[async_trait::async_trait]
impl EventHandler for Handler {
  async fn ready(&self, ctx: Context, ready: Ready) {
    info!("Connected as {}", ready.user.name);

    // Guild-scoped registration propagates instantly; global can take
    // up to an hour.
    let registered = match self.app.config.guild_id {
      Some(guild) => {
        GuildId::new(guild).set_commands(&ctx.http, definitions()).await
      }
      None => Command::set_global_commands(&ctx.http, definitions()).await,
    };

    match registered {
      Ok(commands) => info!("Registered {} slash commands", commands.len()),
      Err(err) => error!("Failed to register slash commands: {err}"),
    }
  }

  async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else { return };

    let name = command.data.name.clone();
    debug!(
      "/{} invoked by {} ({})",
      name,
      command.user.tag(),
      command.user.id
    );

    let mut responder = Responder::new(&ctx, &command);
    let result = match name.as_str() {
      commands::register::NAME => {
        commands::register::run(&self.app, &command, &mut responder).await
      }
      commands::processgame::NAME => {
        commands::processgame::run(&self.app, &ctx, &command, &mut responder)
          .await
      }
      commands::profile::NAME => {
        commands::profile::run(&self.app, &command, &mut responder).await
      }
      commands::history::NAME => {
        commands::history::run(&self.app, &command, &mut responder).await
      }
      commands::ranking::NAME => {
        commands::ranking::run(&self.app, &command, &mut responder).await
      }
      commands::setup::NAME => {
        commands::setup::run(&self.app, &ctx, &command, &mut responder).await
      }
      _ => {
        warn!("unknown command interaction: /{name}");
        return;
      }
    };

    if let Err(err) = result {
      error!("/{name} failed: {err}");
      responder.fail(&err).await;
    }
  }
}
