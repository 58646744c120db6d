pub mod history;
pub mod processgame;
pub mod profile;
pub mod ranking;
pub mod register;
pub mod setup;

use serenity::all::{
  CommandInteraction, ResolvedOption, ResolvedValue, User,
};

/// The mentioned user if the command carries a user option, the caller
/// otherwise.
fn target_user<'a>(command: &'a CommandInteraction) -> &'a User {
  let options = command.data.options();
  match options.first() {
    Some(ResolvedOption { value: ResolvedValue::User(user, _), .. }) => *user,
    _ => &command.user,
  }
}
