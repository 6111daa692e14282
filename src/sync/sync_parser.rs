use crate::sync::time_table::SyncPoint;
use crate::RockTabError;
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, map, opt};
use nom::number::complete::double;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

// Go PlayAlong sync block: `#`-separated records, each `time_ms;bar;bar_fraction;beat_duration`.
// Whatever comes before the first `#` is not a record.

const RECORD_SEPARATOR: char = '#';
const FIELD_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq)]
pub struct SyncRecord {
    pub time_ms: f64,
    pub bar: f64,
    pub bar_fraction: f64,
    pub beat_duration: Option<f64>,
}

impl SyncRecord {
    pub fn to_sync_point(&self) -> SyncPoint {
        SyncPoint {
            position: self.bar + self.bar_fraction,
            time: self.time_ms / 1000.0,
        }
    }
}

/// Parse a single numeric field surrounded by optional whitespace
fn parse_field(i: &str) -> IResult<&str, f64> {
    delimited(multispace0, double, multispace0).parse(i)
}

fn parse_next_field(i: &str) -> IResult<&str, f64> {
    preceded(char(FIELD_SEPARATOR), parse_field).parse(i)
}

pub fn parse_sync_record(i: &str) -> IResult<&str, SyncRecord> {
    map(
        (
            parse_field,
            parse_next_field,
            parse_next_field,
            opt(parse_next_field),
        ),
        |(time_ms, bar, bar_fraction, beat_duration)| SyncRecord {
            time_ms,
            bar,
            bar_fraction,
            beat_duration,
        },
    )
    .parse(i)
}

/// Decode all records of a sync block
pub fn parse_sync_records(data: &str) -> Result<Vec<SyncRecord>, RockTabError> {
    let mut records = Vec::new();
    for (index, raw) in data.split(RECORD_SEPARATOR).skip(1).enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let (_, record) = all_consuming(parse_sync_record)
            .parse(raw)
            .map_err(|err| {
                RockTabError::InvalidSyncData(format!("record {index} '{}': {err}", raw.trim()))
            })?;
        if !(record.time_ms.is_finite() && record.bar.is_finite() && record.bar_fraction.is_finite())
        {
            return Err(RockTabError::InvalidSyncData(format!(
                "record {index} '{}' is not finite",
                raw.trim()
            )));
        }
        records.push(record);
    }
    log::debug!("Parsed {} sync records", records.len());
    Ok(records)
}

/// Decode a sync block into breakpoints, in input order
pub fn parse_sync_data(data: &str) -> Result<Vec<SyncPoint>, RockTabError> {
    let records = parse_sync_records(data)?;
    Ok(records.iter().map(SyncRecord::to_sync_point).collect())
}
