/// KDA score: (kills + assists) / deaths, or kills + assists when there
/// are no deaths (a "perfect" game, avoids dividing by zero).
pub fn kda_score(kills: i64, deaths: i64, assists: i64) -> f64 {
  if deaths == 0 {
    (kills + assists) as f64
  } else {
    (kills + assists) as f64 / deaths as f64
  }
}

pub fn format_kda(kills: i64, deaths: i64, assists: i64) -> String {
  let score = kda_score(kills, deaths, assists);
  if deaths == 0 {
    format!("{score:.1} KDA (Perfect)")
  } else {
    format!("{score:.2}")
  }
}

pub fn format_win_rate(wins: u32, games: u32) -> String {
  if games == 0 {
    return "N/A (0%)".into();
  }
  format!("{:.1}%", wins as f64 / games as f64 * 100.0)
}

/// Renders an integer with thousands separators for embed fields.
pub fn group_digits(n: i64) -> String {
  let raw = n.abs().to_string();
  let mut out = String::new();
  for (i, digit) in raw.chars().enumerate() {
    if i > 0 && (raw.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(digit);
  }
  if n < 0 { format!("-{out}") } else { out }
}

/// Discord renders `<t:unix:R>` as a live relative timestamp.
pub fn relative_timestamp(unix: i64) -> String {
  format!("<t:{unix}:R>")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kda_score_perfect_game_is_kills_plus_assists() {
    assert_eq!(kda_score(7, 0, 5), 12.0);
  }

  #[test]
  fn kda_score_divides_by_deaths() {
    assert_eq!(kda_score(10, 4, 6), 4.0);
    assert_eq!(format_kda(10, 4, 6), "4.00");
  }

  #[test]
  fn kda_display_marks_perfect() {
    assert_eq!(format_kda(7, 0, 5), "12.0 KDA (Perfect)");
  }

  #[test]
  fn win_rate_zero_games_is_na() {
    assert_eq!(format_win_rate(0, 0), "N/A (0%)");
  }

  #[test]
  fn win_rate_one_decimal_with_suffix() {
    assert_eq!(format_win_rate(2, 3), "66.7%");
    assert_eq!(format_win_rate(3, 3), "100.0%");
  }

  #[test]
  fn digits_grouped_in_threes() {
    assert_eq!(group_digits(0), "0");
    assert_eq!(group_digits(999), "999");
    assert_eq!(group_digits(24150), "24,150");
    assert_eq!(group_digits(1234567), "1,234,567");
  }
}
