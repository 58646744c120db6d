//! Read-side aggregation: profile, history and ranking views

use crate::{
  entities::{account, lol_match, player_stat, user},
  prelude::*,
};

/// Everything `/profile` shows, aggregated over a summoner's stat rows.
#[derive(Debug, Default, PartialEq)]
pub struct ProfileSummary {
  pub games: u32,
  pub wins: u32,
  pub kills: i64,
  pub deaths: i64,
  pub assists: i64,
  pub damage: i64,
  pub gold: i64,
}

impl ProfileSummary {
  pub fn avg_damage(&self) -> i64 {
    if self.games == 0 { 0 } else { self.damage / self.games as i64 }
  }

  pub fn avg_gold(&self) -> i64 {
    if self.games == 0 { 0 } else { self.gold / self.games as i64 }
  }
}

/// One `/history` line: a stat row joined with its match's timestamp.
#[derive(Debug, FromQueryResult)]
pub struct HistoryRow {
  pub match_hash: String,
  pub champion_name: String,
  pub win: Option<bool>,
  pub kills: i32,
  pub deaths: i32,
  pub assists: i32,
  pub damage: i64,
  pub gold: i64,
  pub processed_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
  WinRate,
  Kda,
}

#[derive(Debug)]
pub struct RankedUser {
  pub discord_id: i64,
  pub discord_tag: String,
  pub summoner_name: String,
  pub games: u32,
  pub wins: u32,
  pub kills: i64,
  pub deaths: i64,
  pub assists: i64,
  pub win_rate: f64,
  pub kda: f64,
}

#[derive(Debug, FromQueryResult)]
struct LinkedStatRow {
  owner_discord_id: i64,
  summoner_name: String,
  discord_tag: String,
  win: Option<bool>,
  kills: i32,
  deaths: i32,
  assists: i32,
}

pub struct Stats<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Stats<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Aggregates every stat row recorded under a summoner-name snapshot.
  pub async fn profile(&self, snapshot_name: &str) -> Result<ProfileSummary> {
    let rows = player_stat::Entity::find()
      .filter(player_stat::Column::SummonerNameSnapshot.eq(snapshot_name))
      .all(self.db)
      .await?;

    let mut summary = ProfileSummary::default();
    for row in &rows {
      summary.games += 1;
      if row.win == Some(true) {
        summary.wins += 1;
      }
      summary.kills += row.kills as i64;
      summary.deaths += row.deaths as i64;
      summary.assists += row.assists as i64;
      summary.damage += row.damage;
      summary.gold += row.gold;
    }
    Ok(summary)
  }

  /// Most recent `limit` rows for a snapshot name, newest first by the
  /// match's processing timestamp.
  pub async fn history(
    &self,
    snapshot_name: &str,
    limit: u64,
  ) -> Result<Vec<HistoryRow>> {
    let rows = player_stat::Entity::find()
      .filter(player_stat::Column::SummonerNameSnapshot.eq(snapshot_name))
      .join(JoinType::InnerJoin, player_stat::Relation::Match.def())
      .select_only()
      .column(player_stat::Column::MatchHash)
      .column(player_stat::Column::ChampionName)
      .column(player_stat::Column::Win)
      .column(player_stat::Column::Kills)
      .column(player_stat::Column::Deaths)
      .column(player_stat::Column::Assists)
      .column(player_stat::Column::Damage)
      .column(player_stat::Column::Gold)
      .column(lol_match::Column::ProcessedAt)
      .order_by_desc(lol_match::Column::ProcessedAt)
      .limit(limit)
      .into_model::<HistoryRow>()
      .all(self.db)
      .await?;
    Ok(rows)
  }

  /// All qualified users, aggregated per Discord id and sorted for the
  /// requested mode. Only rows that resolve through an account to a user
  /// count (inner joins), so unregistered scoreboard players never rank.
  pub async fn ranking(
    &self,
    mode: RankingMode,
    min_games: u32,
  ) -> Result<Vec<RankedUser>> {
    let rows = player_stat::Entity::find()
      .join(JoinType::InnerJoin, player_stat::Relation::Account.def())
      .join(JoinType::InnerJoin, account::Relation::User.def())
      .select_only()
      .column(player_stat::Column::Win)
      .column(player_stat::Column::Kills)
      .column(player_stat::Column::Deaths)
      .column(player_stat::Column::Assists)
      .column(account::Column::OwnerDiscordId)
      .column(account::Column::SummonerName)
      .column(user::Column::DiscordTag)
      .into_model::<LinkedStatRow>()
      .all(self.db)
      .await?;

    Ok(rank(rows, mode, min_games))
  }
}

/// One user, one account (registration invariant), so aggregation per
/// Discord id and per account are the same grouping.
fn rank(
  rows: Vec<LinkedStatRow>,
  mode: RankingMode,
  min_games: u32,
) -> Vec<RankedUser> {
  let mut by_user: HashMap<i64, RankedUser> = HashMap::new();

  for row in rows {
    let entry =
      by_user.entry(row.owner_discord_id).or_insert_with(|| RankedUser {
        discord_id: row.owner_discord_id,
        discord_tag: row.discord_tag.clone(),
        summoner_name: row.summoner_name.clone(),
        games: 0,
        wins: 0,
        kills: 0,
        deaths: 0,
        assists: 0,
        win_rate: 0.0,
        kda: 0.0,
      });

    entry.games += 1;
    if row.win == Some(true) {
      entry.wins += 1;
    }
    entry.kills += row.kills as i64;
    entry.deaths += row.deaths as i64;
    entry.assists += row.assists as i64;
  }

  let mut users: Vec<RankedUser> = by_user
    .into_values()
    .filter(|u| u.games >= min_games)
    .map(|mut u| {
      u.win_rate = if u.games > 0 {
        u.wins as f64 / u.games as f64
      } else {
        0.0
      };
      u.kda = utils::kda_score(u.kills, u.deaths, u.assists);
      u
    })
    .collect();

  // Fixed three-key tie-break contract per mode.
  match mode {
    RankingMode::WinRate => users.sort_by(|a, b| {
      b.win_rate
        .total_cmp(&a.win_rate)
        .then(b.kda.total_cmp(&a.kda))
        .then(b.games.cmp(&a.games))
    }),
    RankingMode::Kda => users.sort_by(|a, b| {
      b.kda
        .total_cmp(&a.kda)
        .then(b.win_rate.total_cmp(&a.win_rate))
        .then(b.games.cmp(&a.games))
    }),
  }

  users
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    gemini::{GameData, PlayerData},
    sv,
    sv::test_db::setup_test_db,
  };

  fn row(
    id: i64,
    win: Option<bool>,
    kills: i32,
    deaths: i32,
    assists: i32,
  ) -> LinkedStatRow {
    LinkedStatRow {
      owner_discord_id: id,
      summoner_name: format!("Summoner{id}"),
      discord_tag: format!("user{id}#0001"),
      win,
      kills,
      deaths,
      assists,
    }
  }

  #[test]
  fn winrate_tie_breaks_on_kda() {
    // A: 60% winrate, kda 2.0 over 10 games; B: 60% winrate, kda 3.0
    // over 5 games. B must rank above A.
    let mut rows = Vec::new();
    for i in 0..10 {
      rows.push(row(1, Some(i < 6), 2, 2, 2)); // kda (2+2)/2 = 2.0
    }
    for i in 0..5 {
      rows.push(row(2, Some(i < 3), 3, 2, 3)); // kda (3+3)/2 = 3.0
    }

    let ranked = rank(rows, RankingMode::WinRate, 1);
    assert_eq!(ranked[0].discord_id, 2);
    assert_eq!(ranked[1].discord_id, 1);
  }

  #[test]
  fn kda_mode_leads_with_kda() {
    let rows = vec![
      row(1, Some(true), 10, 1, 10), // kda 20, winrate 1.0
      row(2, Some(false), 30, 1, 30), // kda 60, winrate 0.0
    ];

    let ranked = rank(rows, RankingMode::Kda, 1);
    assert_eq!(ranked[0].discord_id, 2);
  }

  #[test]
  fn full_tie_breaks_on_games() {
    let mut rows = vec![row(1, Some(true), 1, 1, 1)];
    rows.push(row(2, Some(true), 1, 1, 1));
    rows.push(row(2, Some(true), 1, 1, 1));

    // both 100% winrate, kda 2.0; user 2 has more games
    let ranked = rank(rows, RankingMode::WinRate, 1);
    assert_eq!(ranked[0].discord_id, 2);
  }

  #[test]
  fn min_games_filters_out_users() {
    let rows = vec![row(1, Some(true), 1, 1, 1)];
    assert!(rank(rows, RankingMode::WinRate, 2).is_empty());
  }

  #[test]
  fn unknown_results_count_as_games_not_wins() {
    let rows = vec![row(1, None, 5, 1, 5), row(1, Some(true), 5, 1, 5)];
    let ranked = rank(rows, RankingMode::WinRate, 1);
    assert_eq!(ranked[0].games, 2);
    assert_eq!(ranked[0].wins, 1);
    assert_eq!(ranked[0].win_rate, 0.5);
  }

  fn scoreboard(names: &[&str], result: &str) -> GameData {
    let players: Vec<PlayerData> = names
      .iter()
      .map(|name| PlayerData {
        summoner_name: Some((*name).into()),
        champion_name: Some("Ahri".into()),
        kda: Some("4/2/6".into()),
        damage: Some(18000),
        gold: Some(12000),
      })
      .collect();
    GameData {
      result: Some(result.into()),
      team1_players: Some(players[..5].to_vec()),
      team2_players: Some(players[5..].to_vec()),
    }
  }

  #[tokio::test]
  async fn profile_aggregates_all_rows() {
    let db = setup_test_db().await;
    sv::Users::new(&db).upsert(1, "one#0001").await.unwrap();
    sv::Accounts::new(&db).link(1, "Hero").await.unwrap();

    let names_a =
      ["Hero", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
    let names_b =
      ["k", "l", "m", "n", "Hero", "p", "q", "r", "s", "t"];
    let ingest = sv::Ingest::new(&db);
    // Hero on team 1 of a VICTORY, then on team 1 of a DEFEAT
    ingest.run(&scoreboard(&names_a, "VICTORY"), "https://cdn/a.png").await.unwrap();
    ingest.run(&scoreboard(&names_b, "DEFEAT"), "https://cdn/b.png").await.unwrap();

    let summary = Stats::new(&db).profile("Hero").await.unwrap();
    assert_eq!(summary.games, 2);
    assert_eq!(summary.wins, 1);
    assert_eq!(summary.kills, 8);
    assert_eq!(summary.deaths, 4);
    assert_eq!(summary.assists, 12);
    assert_eq!(summary.avg_damage(), 18000);
    assert_eq!(summary.avg_gold(), 12000);
  }

  #[tokio::test]
  async fn history_is_newest_first_and_limited() {
    let db = setup_test_db().await;
    let ingest = sv::Ingest::new(&db);

    let boards = [
      ["Hero", "b1", "c1", "d1", "e1", "f1", "g1", "h1", "i1", "j1"],
      ["Hero", "b2", "c2", "d2", "e2", "f2", "g2", "h2", "i2", "j2"],
      ["Hero", "b3", "c3", "d3", "e3", "f3", "g3", "h3", "i3", "j3"],
    ];
    for names in &boards {
      ingest
        .run(&scoreboard(names, "VICTORY"), "https://cdn/x.png")
        .await
        .unwrap();
    }

    let rows = Stats::new(&db).history("Hero", 2).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].processed_at >= rows[1].processed_at);
    assert_eq!(rows[0].champion_name, "Ahri");
    assert_eq!(rows[0].win, Some(true));
  }

  #[tokio::test]
  async fn ranking_ignores_unregistered_players() {
    let db = setup_test_db().await;
    sv::Users::new(&db).upsert(1, "one#0001").await.unwrap();
    sv::Accounts::new(&db).link(1, "Hero").await.unwrap();

    let names = ["Hero", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
    sv::Ingest::new(&db)
      .run(&scoreboard(&names, "VICTORY"), "https://cdn/a.png")
      .await
      .unwrap();

    let ranked =
      Stats::new(&db).ranking(RankingMode::WinRate, 1).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].summoner_name, "Hero");
    assert_eq!(ranked[0].discord_tag, "one#0001");
    assert_eq!(ranked[0].games, 1);
    assert_eq!(ranked[0].wins, 1);
  }
}
