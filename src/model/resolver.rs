//! Maps heterogeneous input columns onto the fixed logical schema.
//!
//! Every logical field has an ordered alias list; the first alias present in
//! the row with a usable value wins. Team names and numeric signals share the
//! same lookup helper, differing only in what counts as "usable".

use crate::table::models::{GameRecord, ResolvedSignals};

// ── Alias tables ─────────────────────────────────────────────────────────────

pub const DATE_ALIASES: &[&str] = &["Date"];
pub const HOME_TEAM_ALIASES: &[&str] = &["HomeTeam", "Home Team", "Home"];
pub const AWAY_TEAM_ALIASES: &[&str] = &["AwayTeam", "Away Team", "Away"];
pub const HOME_RATING_ALIASES: &[&str] = &["KenPomHomeScore", "HomeRating", "Home_Power_Rating"];
pub const AWAY_RATING_ALIASES: &[&str] = &["KenPomAwayScore", "AwayRating", "Away_Power_Rating"];
pub const HOME_SPREAD_ALIASES: &[&str] = &["Home_Spread_Point", "HomeSpread", "home_spread"];
pub const AWAY_SPREAD_ALIASES: &[&str] = &["Away_Spread_Point", "AwaySpread", "away_spread"];

/// Which side of the game a team field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

// ── Lookup helper ────────────────────────────────────────────────────────────

/// Walk `aliases` in order and return the first value `accept` maps to `Some`.
/// Empty and whitespace-only cells are skipped before `accept` sees them.
fn first_alias<T>(
    row: &GameRecord,
    aliases: &[&str],
    accept: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    aliases
        .iter()
        .filter_map(|alias| row.get(alias))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .find_map(accept)
}

/// Parse a numeric cell. Non-finite values count as unparseable.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ── Public API ───────────────────────────────────────────────────────────────

pub fn resolve_date(row: &GameRecord) -> String {
    first_alias(row, DATE_ALIASES, |v| Some(v.to_string())).unwrap_or_default()
}

/// Resolve `(home_team, away_team)`. A side is `None` when no alias carries a
/// non-empty value; the caller decides what to do with such a row.
pub fn resolve_teams(row: &GameRecord) -> (Option<String>, Option<String>) {
    let team = |v: &str| Some(v.to_string());
    (
        first_alias(row, HOME_TEAM_ALIASES, team),
        first_alias(row, AWAY_TEAM_ALIASES, team),
    )
}

/// Resolve a numeric pair. Each side is independent: an unparseable candidate
/// falls through to the next alias, and a side with no parseable candidate is
/// `None` regardless of the other side.
pub fn resolve_numeric_pair(
    row: &GameRecord,
    home_aliases: &[&str],
    away_aliases: &[&str],
) -> (Option<f64>, Option<f64>) {
    (
        first_alias(row, home_aliases, parse_number),
        first_alias(row, away_aliases, parse_number),
    )
}

/// Resolve every signal of a row, or report the first missing team side.
pub fn resolve_signals(row: &GameRecord) -> Result<ResolvedSignals, Side> {
    let (home_team, away_team) = resolve_teams(row);
    let home_team = home_team.ok_or(Side::Home)?;
    let away_team = away_team.ok_or(Side::Away)?;
    let (home_rating, away_rating) =
        resolve_numeric_pair(row, HOME_RATING_ALIASES, AWAY_RATING_ALIASES);
    let (home_spread, away_spread) =
        resolve_numeric_pair(row, HOME_SPREAD_ALIASES, AWAY_SPREAD_ALIASES);

    Ok(ResolvedSignals {
        home_team,
        away_team,
        home_rating,
        away_rating,
        home_spread,
        away_spread,
    })
}

/// `"{home}_{away}"`, the key used to join against the spreadsheet.
pub fn home_away_key(home_team: &str, away_team: &str) -> String {
    format!("{}_{}", home_team, away_team)
}

/// Uppercase, then keep only ASCII letters and digits.
pub fn normalize_join_key(s: &str) -> String {
    s.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> GameRecord {
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameRecord::new(2, fields)
    }

    #[test]
    fn teams_first_alias_wins() {
        let r = row(&[("HomeTeam", "Duke"), ("Home", "Other"), ("Away Team", "UNC")]);
        let (home, away) = resolve_teams(&r);
        assert_eq!(home.as_deref(), Some("Duke"));
        assert_eq!(away.as_deref(), Some("UNC"));
    }

    #[test]
    fn empty_team_cell_falls_through() {
        let r = row(&[("HomeTeam", ""), ("Home", "Duke"), ("AwayTeam", "  "), ("Away", "UNC")]);
        let (home, away) = resolve_teams(&r);
        assert_eq!(home.as_deref(), Some("Duke"));
        assert_eq!(away.as_deref(), Some("UNC"));
    }

    #[test]
    fn missing_team_is_none() {
        let r = row(&[("HomeTeam", "Duke")]);
        let (home, away) = resolve_teams(&r);
        assert_eq!(home.as_deref(), Some("Duke"));
        assert_eq!(away, None);
        assert_eq!(resolve_signals(&r), Err(Side::Away));
    }

    #[test]
    fn numeric_unparseable_falls_through_to_next_alias() {
        let r = row(&[
            ("KenPomHomeScore", "n/a"),
            ("HomeRating", " 80.5 "),
            ("AwayRating", "70"),
        ]);
        let (h, a) = resolve_numeric_pair(&r, HOME_RATING_ALIASES, AWAY_RATING_ALIASES);
        assert_eq!(h, Some(80.5));
        assert_eq!(a, Some(70.0));
    }

    #[test]
    fn numeric_sides_resolve_independently() {
        let r = row(&[("HomeSpread", "-5"), ("AwaySpread", "pk")]);
        let (h, a) = resolve_numeric_pair(&r, HOME_SPREAD_ALIASES, AWAY_SPREAD_ALIASES);
        assert_eq!(h, Some(-5.0));
        assert_eq!(a, None);
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn normalize_join_key_strips_and_uppercases() {
        assert_eq!(normalize_join_key("Duke_UNC"), "DUKEUNC");
        assert_eq!(normalize_join_key("St. John's_Texas A&M"), "STJOHNSTEXASAM");
        assert_eq!(normalize_join_key("ucla 2"), "UCLA2");
    }

    #[test]
    fn resolve_signals_collects_all_fields() {
        let r = row(&[
            ("Date", "11/4/2025"),
            ("Home Team", "Duke"),
            ("Away Team", "UNC"),
            ("Home_Power_Rating", "88"),
            ("Away_Power_Rating", "84"),
            ("home_spread", "-3.5"),
            ("away_spread", "3.5"),
        ]);
        let s = resolve_signals(&r).unwrap();
        assert_eq!(resolve_date(&r), "11/4/2025");
        assert_eq!(s.home_team, "Duke");
        assert_eq!(s.away_team, "UNC");
        assert_eq!((s.home_rating, s.away_rating), (Some(88.0), Some(84.0)));
        assert_eq!((s.home_spread, s.away_spread), (Some(-3.5), Some(3.5)));
        assert_eq!(home_away_key(&s.home_team, &s.away_team), "Duke_UNC");
    }
}
