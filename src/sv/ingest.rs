//! Match-ingestion pipeline
//!
//! Canonicalizes the extracted scoreboard into a content fingerprint,
//! rejects duplicates, then performs the two-table write as a manual
//! saga: the match row is the anchor, and every failure after it funnels
//! into a single compensating delete. There is no transaction spanning
//! the inserts; the fingerprint's unique constraint is the only
//! cross-submission consistency mechanism.

use sha2::{Digest, Sha256};

use crate::{
  entities::player_stat,
  gemini::{GameData, PlayerData},
  prelude::*,
  state::Alerts,
  sv,
};

/// Placeholder for unreadable champion/summoner names.
pub const UNKNOWN: &str = "Unknown";

const REQUIRED_PLAYERS: usize = 10;

#[derive(Debug)]
pub struct IngestReport {
  pub match_hash: String,
  pub winning_team: Option<i32>,
  pub total_players: usize,
  /// Snapshot names that resolved to a registered account.
  pub linked_summoners: Vec<String>,
}

/// Canonical fingerprint: players sorted by name (case-sensitive, missing
/// name sorts as empty), `name:KDA` pairs joined with `;`, SHA-256 hex.
/// Identical extractions hash identically regardless of player order.
pub fn fingerprint(players: &[PlayerData]) -> String {
  let mut sorted: Vec<&PlayerData> = players.iter().collect();
  sorted.sort_by(|a, b| {
    let a = a.summoner_name.as_deref().unwrap_or("");
    let b = b.summoner_name.as_deref().unwrap_or("");
    a.cmp(b)
  });

  let canonical = sorted
    .iter()
    .map(|p| {
      format!(
        "{}:{}",
        p.summoner_name.as_deref().unwrap_or(""),
        p.kda.as_deref().unwrap_or("")
      )
    })
    .collect::<Vec<_>>()
    .join(";");

  format!("{:x}", Sha256::digest(canonical.as_bytes()))
}

/// Splits a `K/D/A` string into numbers; unparsable parts default to 0.
pub fn split_kda(kda: Option<&str>) -> (i32, i32, i32) {
  let mut parts = kda.unwrap_or("0/0/0").split('/');
  let mut next =
    || parts.next().and_then(|p| p.trim().parse().ok()).unwrap_or(0);
  (next(), next(), next())
}

pub struct Ingest<'a> {
  db: &'a DatabaseConnection,
  alerts: Option<&'a Alerts>,
}

impl<'a> Ingest<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db, alerts: None }
  }

  /// Critical failures (orphaned match rows) also go to the alert
  /// webhook when one is configured.
  pub fn with_alerts(mut self, alerts: &'a Alerts) -> Self {
    self.alerts = Some(alerts);
    self
  }

  pub async fn run(
    &self,
    data: &GameData,
    screenshot_url: &str,
  ) -> Result<IngestReport> {
    let players = data.all_players();
    if players.len() < REQUIRED_PLAYERS {
      warn!("extraction produced {} players, expected 10", players.len());
      return Err(Error::NotEnoughPlayers(players.len()));
    }

    let hash = fingerprint(&players);
    debug!("match fingerprint {}...", &hash[..12]);

    let matches = sv::Matches::new(self.db);
    if matches.exists(&hash).await? {
      warn!("duplicate match submitted ({}...)", &hash[..12]);
      return Err(Error::DuplicateMatch);
    }

    let winning_team = data.winning_team();
    if winning_team.is_none() {
      warn!("scoreboard result missing, recording winner as unknown");
    }

    // Anchor write. From here on, any failure must delete this row again.
    matches.insert(&hash, winning_team, screenshot_url).await?;
    info!("match {}... inserted", &hash[..12]);

    match self.write_stats(data, &players, &hash, winning_team).await {
      Ok(linked_summoners) => {
        info!(
          "match {}... saved ({}/{} linked players)",
          &hash[..12],
          linked_summoners.len(),
          players.len()
        );
        Ok(IngestReport {
          match_hash: hash,
          winning_team,
          total_players: players.len(),
          linked_summoners,
        })
      }
      Err(err) => {
        warn!("rolling back match {}...: {err}", &hash[..12]);
        if let Err(rollback) = matches.remove(&hash).await {
          error!("compensating delete failed for {hash}: {rollback}");
          if let Some(alerts) = self.alerts {
            alerts
              .critical(&format!(
                "Orphaned match row `{hash}`: compensating delete failed \
                 ({rollback})"
              ))
              .await;
          }
        }
        Err(err)
      }
    }
  }

  async fn write_stats(
    &self,
    data: &GameData,
    players: &[PlayerData],
    hash: &str,
    winning_team: Option<i32>,
  ) -> Result<Vec<String>> {
    let names: Vec<String> = players
      .iter()
      .filter_map(|p| p.summoner_name.clone())
      .filter(|name| !name.is_empty())
      .collect();
    if names.is_empty() {
      return Err(Error::NoSummonerNames);
    }

    let accounts = sv::Accounts::new(self.db).by_names(&names).await?;
    debug!("{} of {} scoreboard names are registered", accounts.len(), names.len());
    let by_name: HashMap<&str, i32> = accounts
      .iter()
      .map(|account| (account.summoner_name.as_str(), account.account_id))
      .collect();

    let mut linked = Vec::new();
    let mut rows = Vec::with_capacity(players.len());
    for player in players {
      let (kills, deaths, assists) = split_kda(player.kda.as_deref());
      // Team membership comes from the original team 1 list, not the
      // sorted copy used for the fingerprint.
      let team = if data.team1().contains(player) { 1 } else { 2 };
      let account_id =
        player.summoner_name.as_deref().and_then(|n| by_name.get(n).copied());

      if account_id.is_some()
        && let Some(name) = player.summoner_name.as_deref()
      {
        linked.push(name.to_owned());
      }

      rows.push(player_stat::ActiveModel {
        match_hash: Set(hash.to_owned()),
        account_id: Set(account_id),
        summoner_name_snapshot: Set(
          player.summoner_name.clone().unwrap_or_else(|| UNKNOWN.into()),
        ),
        champion_name: Set(
          player.champion_name.clone().unwrap_or_else(|| UNKNOWN.into()),
        ),
        win: Set(winning_team.map(|winner| team == winner)),
        team: Set(team),
        kills: Set(kills),
        deaths: Set(deaths),
        assists: Set(assists),
        damage: Set(player.damage.unwrap_or(0)),
        gold: Set(player.gold.unwrap_or(0)),
        ..Default::default()
      });
    }

    sv::Matches::new(self.db).insert_stats(rows).await?;
    Ok(linked)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{entities::lol_match, sv::test_db::setup_test_db};

  fn player(name: Option<&str>, kda: Option<&str>) -> PlayerData {
    PlayerData {
      summoner_name: name.map(Into::into),
      champion_name: Some("Ahri".into()),
      kda: kda.map(Into::into),
      damage: Some(15000),
      gold: Some(11000),
    }
  }

  fn scoreboard(result: Option<&str>) -> GameData {
    let team = |offset: usize| {
      (0..5)
        .map(|i| {
          player(Some(&format!("Player{}", offset + i)), Some("3/1/4"))
        })
        .collect::<Vec<_>>()
    };
    GameData {
      result: result.map(Into::into),
      team1_players: Some(team(0)),
      team2_players: Some(team(5)),
    }
  }

  #[test]
  fn fingerprint_is_order_independent() {
    let players: Vec<_> = (0..10)
      .map(|i| player(Some(&format!("P{i}")), Some("1/2/3")))
      .collect();
    let mut shuffled = players.clone();
    shuffled.reverse();
    shuffled.swap(2, 7);

    assert_eq!(fingerprint(&players), fingerprint(&shuffled));
  }

  #[test]
  fn fingerprint_changes_with_kda() {
    let players: Vec<_> = (0..10)
      .map(|i| player(Some(&format!("P{i}")), Some("1/2/3")))
      .collect();
    let mut other = players.clone();
    other[0].kda = Some("1/2/4".into());

    assert_ne!(fingerprint(&players), fingerprint(&other));
  }

  #[test]
  fn missing_name_sorts_as_empty() {
    let mut players: Vec<_> = (0..9)
      .map(|i| player(Some(&format!("P{i}")), Some("1/2/3")))
      .collect();
    players.push(player(None, None));
    let mut reordered = players.clone();
    reordered.rotate_left(3);

    assert_eq!(fingerprint(&players), fingerprint(&reordered));
  }

  #[test]
  fn kda_split_defaults_to_zero() {
    assert_eq!(split_kda(Some("12/3/8")), (12, 3, 8));
    assert_eq!(split_kda(Some(" 12 / 3 / 8 ")), (12, 3, 8));
    assert_eq!(split_kda(Some("12/x")), (12, 0, 0));
    assert_eq!(split_kda(Some("")), (0, 0, 0));
    assert_eq!(split_kda(None), (0, 0, 0));
  }

  #[tokio::test]
  async fn ingest_writes_match_and_ten_stats() {
    let db = setup_test_db().await;
    let data = scoreboard(Some("VICTORY"));

    let report =
      Ingest::new(&db).run(&data, "https://cdn/shot.png").await.unwrap();
    assert_eq!(report.winning_team, Some(1));
    assert_eq!(report.total_players, 10);
    assert!(report.linked_summoners.is_empty());

    let stats =
      sv::Matches::new(&db).stats_for(&report.match_hash).await.unwrap();
    assert_eq!(stats.len(), 10);
    // team 1 won, team 2 lost
    assert!(stats.iter().filter(|s| s.team == 1).all(|s| s.win == Some(true)));
    assert!(stats.iter().filter(|s| s.team == 2).all(|s| s.win == Some(false)));
  }

  #[tokio::test]
  async fn ingest_links_registered_accounts() {
    let db = setup_test_db().await;
    sv::Users::new(&db).upsert(7, "seven#0001").await.unwrap();
    sv::Accounts::new(&db).link(7, "Player3").await.unwrap();

    let report = Ingest::new(&db)
      .run(&scoreboard(Some("DEFEAT")), "https://cdn/shot.png")
      .await
      .unwrap();

    assert_eq!(report.linked_summoners, vec!["Player3".to_owned()]);
    let stats =
      sv::Matches::new(&db).stats_for(&report.match_hash).await.unwrap();
    assert_eq!(stats.iter().filter(|s| s.account_id.is_some()).count(), 1);
  }

  #[tokio::test]
  async fn second_submission_is_rejected_without_writes() {
    let db = setup_test_db().await;
    let data = scoreboard(Some("VICTORY"));
    let ingest = Ingest::new(&db);

    let report = ingest.run(&data, "https://cdn/a.png").await.unwrap();
    let err = ingest.run(&data, "https://cdn/b.png").await;
    assert!(matches!(err, Err(Error::DuplicateMatch)));

    let matches = lol_match::Entity::find().all(&db).await.unwrap();
    assert_eq!(matches.len(), 1);
    // first submission's screenshot survives untouched
    assert_eq!(matches[0].screenshot_url, "https://cdn/a.png");
    let stats =
      sv::Matches::new(&db).stats_for(&report.match_hash).await.unwrap();
    assert_eq!(stats.len(), 10);
  }

  #[tokio::test]
  async fn short_extraction_writes_nothing() {
    let db = setup_test_db().await;
    let mut data = scoreboard(Some("VICTORY"));
    data.team2_players.as_mut().unwrap().pop();

    let err = Ingest::new(&db).run(&data, "https://cdn/shot.png").await;
    assert!(matches!(err, Err(Error::NotEnoughPlayers(9))));
    assert!(lol_match::Entity::find().all(&db).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn nameless_extraction_rolls_back_the_match_row() {
    let db = setup_test_db().await;
    let nameless: Vec<_> = (0..5).map(|_| player(None, Some("1/1/1"))).collect();
    let data = GameData {
      result: Some("VICTORY".into()),
      team1_players: Some(nameless.clone()),
      team2_players: Some(nameless),
    };

    let err = Ingest::new(&db).run(&data, "https://cdn/shot.png").await;
    assert!(matches!(err, Err(Error::NoSummonerNames)));
    // the anchor row was inserted, then compensated away
    assert!(lol_match::Entity::find().all(&db).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn unknown_result_is_recorded_not_rejected() {
    let db = setup_test_db().await;
    let report = Ingest::new(&db)
      .run(&scoreboard(None), "https://cdn/shot.png")
      .await
      .unwrap();

    assert_eq!(report.winning_team, None);
    let stats =
      sv::Matches::new(&db).stats_for(&report.match_hash).await.unwrap();
    assert!(stats.iter().all(|s| s.win.is_none()));
  }
}
