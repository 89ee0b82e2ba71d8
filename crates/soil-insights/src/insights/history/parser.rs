use super::super::readings::{NutrientPanel, ReadingSnapshot};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ParsedRow {
    pub(crate) line: u64,
    pub(crate) raw_time: String,
    pub(crate) recorded_at: Option<NaiveDateTime>,
    pub(crate) snapshot: ReadingSnapshot,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(index as u64 + 2, |position| position.line());
        let row: ReadingRow = record.deserialize(Some(&headers))?;
        rows.push(row.into_parsed(line));
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct ReadingRow {
    time: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    temperature: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    moisture: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    ph: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    ec: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    nitrogen: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    phosphorus: Option<f64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    potassium: Option<f64>,
}

impl ReadingRow {
    fn into_parsed(self, line: u64) -> ParsedRow {
        ParsedRow {
            line,
            recorded_at: parse_datetime(&self.time),
            raw_time: self.time,
            snapshot: ReadingSnapshot {
                temperature: self.temperature,
                moisture: self.moisture,
                ph: self.ph,
                ec: self.ec,
                nutrients: NutrientPanel {
                    nitrogen: self.nitrogen,
                    phosphorus: self.phosphorus,
                    potassium: self.potassium,
                },
            },
        }
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|err| serde::de::Error::custom(format!("invalid reading '{value}': {err}"))),
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
        return Some(dt);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<NaiveDateTime> {
    parse_datetime(value)
}
