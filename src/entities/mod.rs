//! SeaORM entity definitions
//!
//! Four tables back the bot: Discord users, their linked LoL accounts,
//! ingested matches and the per-player stat rows, plus per-guild settings.

pub mod account;
pub mod guild_setting;
pub mod lol_match;
pub mod player_stat;
pub mod user;
