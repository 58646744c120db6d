//! Interaction response tracking
//!
//! Discord allows exactly one initial response per interaction; anything
//! after that is an edit. Instead of asking the library what already
//! happened, the current position in that lifecycle is an explicit
//! three-state flag threaded through every handler.

use serenity::all::{
  CommandInteraction, Context, CreateEmbed, CreateInteractionResponse,
  CreateInteractionResponseMessage, EditInteractionResponse,
};

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseState {
  /// Nothing sent yet; the 3-second initial window is still open.
  Fresh,
  /// Acknowledged with a deferral; the next send must be an edit.
  Deferred,
  Replied,
}

pub struct Responder<'a> {
  ctx: &'a Context,
  interaction: &'a CommandInteraction,
  state: ResponseState,
}

impl<'a> Responder<'a> {
  pub fn new(ctx: &'a Context, interaction: &'a CommandInteraction) -> Self {
    Self { ctx, interaction, state: ResponseState::Fresh }
  }

  /// Extends the response window past the host's 3-second limit while
  /// the multi-step pipeline runs.
  pub async fn defer(&mut self, ephemeral: bool) -> Result<()> {
    let message =
      CreateInteractionResponseMessage::new().ephemeral(ephemeral);
    self
      .interaction
      .create_response(
        &self.ctx.http,
        CreateInteractionResponse::Defer(message),
      )
      .await?;
    self.state = ResponseState::Deferred;
    Ok(())
  }

  pub async fn send_content(
    &mut self,
    content: impl Into<String>,
  ) -> Result<()> {
    self.send(Some(content.into()), None).await
  }

  pub async fn send_embed(&mut self, embed: CreateEmbed) -> Result<()> {
    self.send(None, Some(embed)).await
  }

  async fn send(
    &mut self,
    content: Option<String>,
    embed: Option<CreateEmbed>,
  ) -> Result<()> {
    match self.state {
      ResponseState::Fresh => {
        let mut message =
          CreateInteractionResponseMessage::new().ephemeral(true);
        if let Some(content) = content {
          message = message.content(content);
        }
        if let Some(embed) = embed {
          message = message.embed(embed);
        }
        self
          .interaction
          .create_response(
            &self.ctx.http,
            CreateInteractionResponse::Message(message),
          )
          .await?;
      }
      ResponseState::Deferred | ResponseState::Replied => {
        let mut edit = EditInteractionResponse::new();
        edit = match content {
          Some(content) => edit.content(content),
          None => edit.content(""),
        };
        // replace, never append, any embeds from a previous edit
        edit = match embed {
          Some(embed) => edit.embeds(vec![embed]),
          None => edit.embeds(Vec::new()),
        };
        self.interaction.edit_response(&self.ctx.http, edit).await?;
      }
    }
    self.state = ResponseState::Replied;
    Ok(())
  }

  /// Last-resort error reporting. Failures while reporting a failure are
  /// logged and swallowed; nothing propagates out of a handler.
  pub async fn fail(&mut self, err: &Error) {
    let content = format!("❌ {}", err.user_message());
    if let Err(report_err) = self.send_content(content).await {
      error!("failed to deliver error response: {report_err}");
    }
  }
}
