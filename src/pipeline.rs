use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::resolver::{self, Side};
use crate::model::{estimate_win_probability, ModelParams, ProbabilityPolicy};
use crate::table::models::{GameRecord, PredictionRecord};
use crate::table::{read_games, write_predictions};

/// Fatal run errors. Anything row-level that can degrade does so instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("could not find input file {path}")]
    MissingInput { path: String },

    #[error("failed to read {path}: {source}")]
    Read { path: String, source: csv::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: csv::Error },

    #[error("input line {line}: no {side} team in any recognized column")]
    MissingTeam { line: u64, side: Side },
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rows_written: usize,
    pub rows_skipped: usize,
    pub rating_rows: usize,
    pub spread_rows: usize,
    pub neutral_rows: usize,
}

impl RunSummary {
    fn record(&mut self, policy: ProbabilityPolicy) {
        self.rows_written += 1;
        match policy {
            ProbabilityPolicy::Rating => self.rating_rows += 1,
            ProbabilityPolicy::Spread => self.spread_rows += 1,
            ProbabilityPolicy::Neutral => self.neutral_rows += 1,
        }
    }
}

/// Timestamp written to every row of one run, e.g. `2025-11-04T18:30:00Z`.
pub fn format_generated_at(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Transform one input row. Fails only when a team side cannot be resolved.
pub fn predict_row(
    row: &GameRecord,
    params: &ModelParams,
    generated_at: &str,
) -> Result<(PredictionRecord, ProbabilityPolicy), Side> {
    let signals = resolver::resolve_signals(row)?;
    let wp = estimate_win_probability(&signals, params);

    let key = resolver::home_away_key(&signals.home_team, &signals.away_team);
    let key_norm = resolver::normalize_join_key(&key);
    debug!(
        line = row.line,
        policy = ?wp.policy,
        home_prob = wp.home_prob,
        "{} vs {}",
        signals.home_team,
        signals.away_team
    );

    let record = PredictionRecord {
        date: resolver::resolve_date(row),
        favorite_team: wp.favorite_team(&signals).to_string(),
        home_team: signals.home_team,
        away_team: signals.away_team,
        home_away_key: key,
        home_away_key_norm: key_norm,
        home_prob: wp.home_prob,
        away_prob: wp.away_prob,
        favorite_prob: wp.favorite_prob,
        generated_at: generated_at.to_string(),
    };
    Ok((record, wp.policy))
}

/// Transform every row in input order. Rows without both teams are skipped
/// with a warning, or abort the run when `strict_teams` is set.
pub fn predict_all(
    games: &[GameRecord],
    params: &ModelParams,
    strict_teams: bool,
    generated_at: &str,
) -> Result<(Vec<PredictionRecord>, RunSummary), PipelineError> {
    let mut summary = RunSummary::default();
    let mut predictions = Vec::with_capacity(games.len());

    for row in games {
        match predict_row(row, params, generated_at) {
            Ok((record, policy)) => {
                summary.record(policy);
                predictions.push(record);
            }
            Err(side) if strict_teams => {
                return Err(PipelineError::MissingTeam {
                    line: row.line,
                    side,
                });
            }
            Err(side) => {
                warn!("Skipping input line {}: no {} team found", row.line, side);
                summary.rows_skipped += 1;
            }
        }
    }
    Ok((predictions, summary))
}

/// Read the games table, predict every row, write the predictions table.
///
/// Nothing is written unless every row was processed, so a failed run never
/// leaves a partial output behind.
pub fn run(config: &Config) -> Result<RunSummary, PipelineError> {
    let input = Path::new(&config.input);
    let output = Path::new(&config.output);

    if !input.is_file() {
        return Err(PipelineError::MissingInput {
            path: config.input.clone(),
        });
    }

    let games = read_games(input)?;
    info!("Read {} game(s) from {}", games.len(), config.input);
    if games.is_empty() {
        warn!("{} has no data rows; writing header-only output", config.input);
    }

    let generated_at = format_generated_at(Utc::now());
    let (predictions, summary) = predict_all(
        &games,
        &config.model_params(),
        config.strict_teams,
        &generated_at,
    )?;

    write_predictions(output, &predictions)?;
    Ok(summary)
}
