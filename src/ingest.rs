//! Reading `user,item,rating` lines into observations.
//!
//! Records carry three comma separated fields and no header. Fields are
//! trimmed and blank lines ignored; anything else that does not parse is a
//! malformed record, handled according to [`MalformedPolicy`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{RecommenderError, Result};
use crate::types::Observation;

/// What to do with a line that is not a valid `user,item,rating` record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort with `MalformedRecord`, naming the line.
    #[default]
    Fail,
    /// Log a warning naming the line and carry on.
    Skip,
}

pub fn read_observations<P: AsRef<Path>>(path: P, policy: MalformedPolicy) -> Result<Vec<Observation>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let observations = parse_observations(file, policy)?;
    tracing::debug!(path = %path.display(), count = observations.len(), "Read observations");

    Ok(observations)
}

pub fn parse_observations<R: Read>(reader: R, policy: MalformedPolicy) -> Result<Vec<Observation>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut observations = Vec::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map(|position| position.line()).unwrap_or(0);

        match parse_record(&record) {
            Ok(observation) => observations.push(observation),
            Err(reason) => match policy {
                MalformedPolicy::Fail => {
                    return Err(RecommenderError::MalformedRecord { line, reason });
                }
                MalformedPolicy::Skip => {
                    tracing::warn!(line, %reason, "Skipping malformed record");
                }
            },
        }
    }

    Ok(observations)
}

fn parse_record(record: &StringRecord) -> std::result::Result<Observation, String> {
    if record.len() != 3 {
        return Err(format!("expected 3 fields, found {}", record.len()));
    }

    let user = record[0].parse::<i64>()
        .map_err(|e| format!("user id {:?}: {}", &record[0], e))?;
    let item = record[1].parse::<i64>()
        .map_err(|e| format!("item id {:?}: {}", &record[1], e))?;
    let rating = record[2].parse::<f64>()
        .map_err(|e| format!("rating {:?}: {}", &record[2], e))?;

    Ok(Observation::new(user, item, rating))
}
