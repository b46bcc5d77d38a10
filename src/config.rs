use clap::Parser;

use crate::model::win_probability::ModelParams;

/// Game-table to win-probability converter
#[derive(Parser, Debug, Clone)]
#[command(name = "make-predictions", version, about)]
pub struct Config {
    /// Input games table (CSV with a header row)
    #[arg(long, env = "INPUT_CSV", default_value = "november_games.csv")]
    pub input: String,

    /// Output predictions table (CSV, overwritten on success)
    #[arg(long, env = "OUTPUT_CSV", default_value = "predictions.csv")]
    pub output: String,

    /// Logistic scale for rating differences (rating points per ~73% win prob)
    #[arg(long, env = "RATING_SCALE", default_value = "10.0")]
    pub rating_scale: f64,

    /// Logistic scale for point spreads
    #[arg(long, env = "SPREAD_SCALE", default_value = "6.0")]
    pub spread_scale: f64,

    /// Fail the run instead of skipping rows with no home or away team
    #[arg(long, env = "STRICT_TEAMS", default_value = "false")]
    pub strict_teams: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.input.trim().is_empty() {
            anyhow::bail!("input path must not be empty");
        }
        if self.output.trim().is_empty() {
            anyhow::bail!("output path must not be empty");
        }
        if self.input == self.output {
            anyhow::bail!("input and output must be different files ({})", self.input);
        }
        if !(self.rating_scale.is_finite() && self.rating_scale > 0.0) {
            anyhow::bail!("rating_scale must be a positive number");
        }
        if !(self.spread_scale.is_finite() && self.spread_scale > 0.0) {
            anyhow::bail!("spread_scale must be a positive number");
        }
        Ok(())
    }

    pub fn model_params(&self) -> ModelParams {
        ModelParams {
            rating_scale: self.rating_scale,
            spread_scale: self.spread_scale,
        }
    }
}
