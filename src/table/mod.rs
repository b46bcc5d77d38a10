use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::pipeline::PipelineError;

pub mod models;
use models::*;

/// Read every data row of the games table, in file order.
///
/// Rows may be ragged; missing trailing cells are simply absent from the
/// record. A UTF-8 BOM on the first header (Excel exports) is stripped.
pub fn read_games(path: &Path) -> Result<Vec<GameRecord>, PipelineError> {
    let read_err = |source: csv::Error| PipelineError::Read {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(read_err)?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if idx == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    debug!("Input columns: {:?}", headers);

    let mut games = Vec::new();
    for result in reader.records() {
        let record = result.map_err(read_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), v.to_string()))
            .collect();
        games.push(GameRecord::new(line, fields));
    }
    Ok(games)
}

/// Write the predictions table: fixed header, then one row per prediction.
/// An empty slice still produces the header line.
pub fn write_predictions(path: &Path, predictions: &[PredictionRecord]) -> Result<(), PipelineError> {
    let write_err = |source: csv::Error| PipelineError::Write {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(|e| write_err(e.into()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(OUTPUT_COLUMNS).map_err(write_err)?;
    for prediction in predictions {
        writer.serialize(prediction).map_err(write_err)?;
    }
    writer.flush().map_err(|e| write_err(e.into()))?;
    Ok(())
}
