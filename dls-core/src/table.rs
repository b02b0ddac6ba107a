//! DLS resource table and interpolated lookup
//!
//! Global invariants enforced:
//! - Tables are immutable once constructed
//! - The balls axis is stored ascending; lookups never re-sort
//! - Out-of-range lookups clamp to the table boundary, never extrapolate
//! - A missing or malformed external table is a construction error,
//!   never a lookup error

use crate::format::MatchFormat;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Wicket columns in every table: 0 through 9 wickets lost
pub const WICKET_COLUMNS: usize = 10;

/// Canonical T20 resource table (published approximation), as conventionally
/// printed: balls remaining descending, one row per over boundary.
const T20_BALLS: [u32; 21] = [
    120, 114, 108, 102, 96, 90, 84, 78, 72, 66, 60, 54, 48, 42, 36, 30, 24, 18, 12, 6, 0,
];

/// Resource percentages aligned with `T20_BALLS`, one row per wickets lost
const T20_RESOURCES: [[f64; 21]; WICKET_COLUMNS] = [
    [
        100.0, 96.1, 92.2, 88.2, 84.1, 79.9, 75.4, 71.0, 66.4, 61.7, 56.7, 51.8, 46.6, 41.3,
        35.9, 30.4, 24.6, 18.7, 12.7, 6.4, 0.0,
    ],
    [
        96.8, 93.3, 89.6, 85.7, 81.8, 77.9, 73.7, 69.4, 65.0, 60.4, 55.8, 51.1, 45.9, 40.8,
        35.5, 30.0, 24.4, 18.6, 12.5, 6.4, 0.0,
    ],
    [
        92.6, 89.2, 85.9, 82.5, 79.0, 75.3, 71.4, 67.3, 63.3, 59.0, 54.4, 49.8, 45.1, 40.1,
        35.0, 29.7, 24.2, 18.4, 12.5, 6.4, 0.0,
    ],
    [
        86.7, 83.9, 81.1, 77.9, 74.7, 71.6, 68.0, 64.5, 60.6, 56.7, 52.7, 48.4, 43.8, 39.2,
        34.3, 29.2, 23.9, 18.2, 12.4, 6.4, 0.0,
    ],
    [
        78.8, 76.7, 74.2, 71.7, 69.1, 66.4, 63.4, 60.4, 57.1, 53.7, 50.0, 46.1, 42.0, 37.8,
        33.2, 28.4, 23.3, 18.0, 12.4, 6.4, 0.0,
    ],
    [
        68.2, 66.6, 65.0, 63.3, 61.3, 59.2, 56.9, 54.4, 51.9, 49.1, 46.1, 42.8, 39.4, 35.5,
        31.4, 27.2, 22.4, 17.5, 12.0, 6.2, 0.0,
    ],
    [
        54.4, 53.5, 52.7, 51.6, 50.4, 49.1, 47.7, 46.1, 44.3, 42.4, 40.3, 37.8, 35.2, 32.2,
        29.0, 25.3, 21.2, 16.8, 11.7, 6.2, 0.0,
    ],
    [
        37.5, 37.3, 36.9, 36.6, 36.2, 35.7, 35.2, 34.5, 33.6, 32.7, 31.6, 30.2, 28.6, 26.9,
        24.6, 22.1, 18.9, 15.4, 11.0, 6.0, 0.0,
    ],
    [
        21.3, 21.0, 21.0, 21.0, 20.8, 20.8, 20.8, 20.7, 20.5, 20.3, 20.1, 19.8, 19.3, 18.6,
        17.8, 16.6, 14.8, 12.7, 9.7, 5.7, 0.0,
    ],
    [
        8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.3, 8.1, 8.1, 8.0,
        7.4, 6.5, 4.4, 0.0,
    ],
];

/// Resource table construction errors
#[derive(Debug, Error)]
pub enum TableError {
    #[error("no built-in resource table for {0}; load one from a CSV file")]
    NoBuiltin(MatchFormat),
    #[error("failed to read resource table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse resource table: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid resource table: {0}")]
    Invalid(String),
}

/// Resource-percentage table for one match format
///
/// Maps (balls remaining, wickets lost) to the percentage of scoring
/// potential a batting side still has. The balls axis is normalized to
/// ascending order at construction so lookups interpolate directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceTable {
    format: MatchFormat,
    /// Strictly ascending, starting at 0 and ending at the format maximum
    balls: Vec<u32>,
    /// One column per wickets lost (0-9), each aligned with `balls`
    columns: Vec<Vec<f64>>,
}

/// Read-only export of a table for inspection, in printed (descending) order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ResourceTableView {
    pub match_format: MatchFormat,
    pub balls: Vec<u32>,
    pub wickets_lost: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl ResourceTable {
    /// Construct the built-in table for a format
    ///
    /// T20 uses the embedded canonical table. T10 is derived from it by
    /// truncating at 60 balls and rescaling so a full 10-over innings with
    /// no wickets down is 100%. There is no published approximation table
    /// for ODI in this crate; load one with [`ResourceTable::from_csv_path`].
    pub fn builtin(format: MatchFormat) -> Result<Self, TableError> {
        match format {
            MatchFormat::T20 => Self::from_rows(
                MatchFormat::T20,
                T20_BALLS.to_vec(),
                T20_RESOURCES.iter().map(|col| col.to_vec()).collect(),
            ),
            MatchFormat::T10 => Self::derive_truncated(MatchFormat::T10),
            MatchFormat::Odi => Err(TableError::NoBuiltin(MatchFormat::Odi)),
        }
    }

    /// Load a table from a CSV file
    ///
    /// Expected schema: header `balls,0,1,...,9`, one row per breakpoint,
    /// rows in either ascending or descending balls order.
    pub fn from_csv_path<P: AsRef<Path>>(
        format: MatchFormat,
        path: P,
    ) -> Result<Self, TableError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_csv_reader(format, file)
    }

    /// Load a table from any CSV source (see [`ResourceTable::from_csv_path`])
    pub fn from_csv_reader<R: Read>(format: MatchFormat, reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.len() != WICKET_COLUMNS + 1 || &headers[0] != "balls" {
            return Err(TableError::Invalid(format!(
                "expected header 'balls,0,1,...,9', found {} columns",
                headers.len()
            )));
        }
        for (index, header) in headers.iter().skip(1).enumerate() {
            if header != index.to_string() {
                return Err(TableError::Invalid(format!(
                    "expected wicket column '{}', found '{}'",
                    index, header
                )));
            }
        }

        let mut balls = Vec::new();
        let mut columns = vec![Vec::new(); WICKET_COLUMNS];
        for record in csv_reader.records() {
            let record = record?;
            if record.len() != WICKET_COLUMNS + 1 {
                return Err(TableError::Invalid(format!(
                    "expected {} values per row, found {}",
                    WICKET_COLUMNS + 1,
                    record.len()
                )));
            }
            let breakpoint: u32 = record[0].parse().map_err(|_| {
                TableError::Invalid(format!("invalid balls value: '{}'", &record[0]))
            })?;
            balls.push(breakpoint);
            for (wickets, column) in columns.iter_mut().enumerate() {
                let value: f64 = record[wickets + 1].parse().map_err(|_| {
                    TableError::Invalid(format!(
                        "invalid resource value: '{}'",
                        &record[wickets + 1]
                    ))
                })?;
                column.push(value);
            }
        }

        Self::from_rows(format, balls, columns)
    }

    /// Construct from raw rows, normalizing to an ascending axis and
    /// validating the table invariants
    fn from_rows(
        format: MatchFormat,
        mut balls: Vec<u32>,
        mut columns: Vec<Vec<f64>>,
    ) -> Result<Self, TableError> {
        if balls.len() < 2 {
            return Err(TableError::Invalid(
                "table must have at least two breakpoints".to_string(),
            ));
        }
        if columns.len() != WICKET_COLUMNS {
            return Err(TableError::Invalid(format!(
                "expected {} wicket columns, found {}",
                WICKET_COLUMNS,
                columns.len()
            )));
        }
        for column in &columns {
            if column.len() != balls.len() {
                return Err(TableError::Invalid(
                    "wicket column length does not match balls axis".to_string(),
                ));
            }
        }

        // Normalize to ascending order
        if balls.first() > balls.last() {
            balls.reverse();
            for column in &mut columns {
                column.reverse();
            }
        }

        if !balls.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(TableError::Invalid(
                "balls axis must be strictly monotonic with no duplicates".to_string(),
            ));
        }
        if balls[0] != 0 {
            return Err(TableError::Invalid(
                "balls axis must terminate at 0".to_string(),
            ));
        }
        if *balls.last().expect("non-empty axis") != format.max_balls() {
            return Err(TableError::Invalid(format!(
                "balls axis must reach the {} maximum of {} balls",
                format,
                format.max_balls()
            )));
        }

        for (wickets, column) in columns.iter().enumerate() {
            if column[0] != 0.0 {
                return Err(TableError::Invalid(format!(
                    "resource must be 0 at 0 balls remaining (column {})",
                    wickets
                )));
            }
            if column.iter().any(|value| !(0.0..=100.0).contains(value)) {
                return Err(TableError::Invalid(format!(
                    "resource values must lie in [0, 100] (column {})",
                    wickets
                )));
            }
            if !column.windows(2).all(|pair| pair[0] <= pair[1]) {
                return Err(TableError::Invalid(format!(
                    "resource must not decrease as balls remaining increases (column {})",
                    wickets
                )));
            }
        }
        if *columns[0].last().expect("non-empty column") != 100.0 {
            return Err(TableError::Invalid(
                "a full innings with no wickets lost must be 100% resource".to_string(),
            ));
        }

        Ok(ResourceTable {
            format,
            balls,
            columns,
        })
    }

    /// Derive a short-format table by truncating the T20 table and rescaling
    /// every column so the shorter full innings is 100%. Values are rounded
    /// to one decimal, matching the published precision.
    fn derive_truncated(format: MatchFormat) -> Result<Self, TableError> {
        let base = Self::from_rows(
            MatchFormat::T20,
            T20_BALLS.to_vec(),
            T20_RESOURCES.iter().map(|col| col.to_vec()).collect(),
        )?;
        let cutoff = format.max_balls();
        let scale = 100.0 / base.percent_remaining(cutoff, 0);

        let keep: Vec<usize> = (0..base.balls.len())
            .filter(|&index| base.balls[index] <= cutoff)
            .collect();
        let balls: Vec<u32> = keep.iter().map(|&index| base.balls[index]).collect();
        let columns: Vec<Vec<f64>> = base
            .columns
            .iter()
            .map(|column| {
                keep.iter()
                    .map(|&index| ((column[index] * scale * 10.0).round() / 10.0).min(100.0))
                    .collect()
            })
            .collect();

        Self::from_rows(format, balls, columns)
    }

    /// The match format this table was built for
    pub fn format(&self) -> MatchFormat {
        self.format
    }

    /// Balls in a full innings according to this table
    pub fn max_balls(&self) -> u32 {
        *self.balls.last().expect("non-empty axis")
    }

    /// Interpolated resource percentage remaining at a match state
    ///
    /// Wickets lost clamp to 0-9 and balls remaining clamp to the axis range
    /// rather than extrapolating beyond the table.
    pub fn percent_remaining(&self, balls_remaining: u32, wickets_lost: u32) -> f64 {
        let column = &self.columns[wickets_lost.min(WICKET_COLUMNS as u32 - 1) as usize];
        let x = balls_remaining.min(self.max_balls());

        match self.balls.binary_search(&x) {
            Ok(index) => column[index],
            Err(index) => {
                // x lies strictly between two breakpoints: the axis starts
                // at 0 and x is clamped to the last entry, so 0 < index < len
                let x0 = self.balls[index - 1] as f64;
                let x1 = self.balls[index] as f64;
                let y0 = column[index - 1];
                let y1 = column[index];
                y0 + (y1 - y0) * (x as f64 - x0) / (x1 - x0)
            }
        }
    }

    /// Read-only view of the table in conventional printed order
    pub fn view(&self) -> ResourceTableView {
        let mut balls = self.balls.clone();
        balls.reverse();
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let mut column = column.clone();
                column.reverse();
                column
            })
            .collect();

        ResourceTableView {
            match_format: self.format,
            balls,
            wickets_lost: (0..WICKET_COLUMNS).map(|w| w.to_string()).collect(),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn t20() -> ResourceTable {
        ResourceTable::builtin(MatchFormat::T20).unwrap()
    }

    #[test]
    fn test_t20_boundary_values() {
        let table = t20();
        assert_eq!(table.max_balls(), 120);
        assert_eq!(table.percent_remaining(120, 0), 100.0);
        for wickets in 0..10 {
            assert_eq!(table.percent_remaining(0, wickets), 0.0);
        }
    }

    #[test]
    fn test_t20_breakpoint_lookups() {
        let table = t20();
        assert_eq!(table.percent_remaining(90, 0), 79.9);
        assert_eq!(table.percent_remaining(30, 2), 29.7);
        assert_eq!(table.percent_remaining(60, 2), 54.4);
        assert_eq!(table.percent_remaining(12, 4), 12.4);
    }

    #[test]
    fn test_interpolation_between_breakpoints() {
        let table = t20();
        // 93 balls sits halfway between 90 (79.9) and 96 (84.1)
        assert!((table.percent_remaining(93, 0) - 82.0).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_clamps_to_table_boundaries() {
        let table = t20();
        assert_eq!(table.percent_remaining(500, 0), 100.0);
        // Wickets beyond 9 clamp to the last column
        assert_eq!(
            table.percent_remaining(60, 15),
            table.percent_remaining(60, 9)
        );
    }

    #[test]
    fn test_monotonic_in_balls_remaining() {
        let table = t20();
        for wickets in 0..10 {
            let mut previous = 0.0;
            for balls in 0..=120 {
                let value = table.percent_remaining(balls, wickets);
                assert!(
                    value >= previous,
                    "resource decreased at {} balls, {} wickets",
                    balls,
                    wickets
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_monotonic_in_wickets_lost() {
        let table = t20();
        for balls in 0..=120 {
            let mut previous = f64::INFINITY;
            for wickets in 0..10 {
                let value = table.percent_remaining(balls, wickets);
                assert!(
                    value <= previous,
                    "resource increased at {} balls, {} wickets",
                    balls,
                    wickets
                );
                previous = value;
            }
        }
    }

    #[test]
    fn test_t10_derived_table() {
        let table = ResourceTable::builtin(MatchFormat::T10).unwrap();
        assert_eq!(table.max_balls(), 60);
        assert_eq!(table.percent_remaining(60, 0), 100.0);
        for wickets in 0..10 {
            assert_eq!(table.percent_remaining(0, wickets), 0.0);
        }
        // Rescaling preserves the wicket ordering
        for balls in 0..=60 {
            let mut previous = f64::INFINITY;
            for wickets in 0..10 {
                let value = table.percent_remaining(balls, wickets);
                assert!(value <= previous);
                previous = value;
            }
        }
    }

    #[test]
    fn test_odi_has_no_builtin() {
        match ResourceTable::builtin(MatchFormat::Odi) {
            Err(TableError::NoBuiltin(MatchFormat::Odi)) => {}
            other => panic!("expected NoBuiltin error, got {:?}", other),
        }
    }

    #[test]
    fn test_csv_round_trip_via_view() {
        let csv = "balls,0,1,2,3,4,5,6,7,8,9\n\
                   120,100,96.8,92.6,86.7,78.8,68.2,54.4,37.5,21.3,8.3\n\
                   60,56.7,55.8,54.4,52.7,50.0,46.1,40.3,31.6,20.1,8.3\n\
                   0,0,0,0,0,0,0,0,0,0,0\n";
        let table = ResourceTable::from_csv_reader(MatchFormat::T20, csv.as_bytes()).unwrap();
        assert_eq!(table.percent_remaining(120, 0), 100.0);
        assert_eq!(table.percent_remaining(60, 9), 8.3);

        let view = table.view();
        assert_eq!(view.balls, vec![120, 60, 0]);
        assert_eq!(view.columns[0], vec![100.0, 56.7, 0.0]);
        assert_eq!(view.wickets_lost.len(), 10);
    }

    #[test]
    fn test_csv_accepts_ascending_rows() {
        let csv = "balls,0,1,2,3,4,5,6,7,8,9\n\
                   0,0,0,0,0,0,0,0,0,0,0\n\
                   60,56.7,55.8,54.4,52.7,50.0,46.1,40.3,31.6,20.1,8.3\n\
                   120,100,96.8,92.6,86.7,78.8,68.2,54.4,37.5,21.3,8.3\n";
        let table = ResourceTable::from_csv_reader(MatchFormat::T20, csv.as_bytes()).unwrap();
        assert_eq!(table.percent_remaining(120, 0), 100.0);
    }

    #[test]
    fn test_csv_rejects_bad_header() {
        let csv = "overs,0,1,2,3,4,5,6,7,8,9\n0,0,0,0,0,0,0,0,0,0,0\n";
        match ResourceTable::from_csv_reader(MatchFormat::T20, csv.as_bytes()) {
            Err(TableError::Invalid(_)) => {}
            other => panic!("expected Invalid error, got {:?}", other),
        }
    }

    #[test]
    fn test_csv_rejects_decreasing_column() {
        let csv = "balls,0,1,2,3,4,5,6,7,8,9\n\
                   120,100,96.8,92.6,86.7,78.8,68.2,54.4,37.5,21.3,8.3\n\
                   60,99,55.8,54.4,52.7,50.0,46.1,40.3,31.6,20.1,9.9\n\
                   0,0,0,0,0,0,0,0,0,0,0\n";
        // Column 9 decreases from 9.9 to 8.3 as balls increase
        match ResourceTable::from_csv_reader(MatchFormat::T20, csv.as_bytes()) {
            Err(TableError::Invalid(message)) => assert!(message.contains("column 9")),
            other => panic!("expected Invalid error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_csv_file_is_a_construction_error() {
        let missing = std::env::temp_dir().join("no-such-dls-table.csv");
        match ResourceTable::from_csv_path(MatchFormat::Odi, &missing) {
            Err(TableError::Io(_)) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_odi_table_from_csv_file() {
        // A coarse synthetic 50-over table: linear in balls, stepped by wickets
        let mut csv = String::from("balls,0,1,2,3,4,5,6,7,8,9\n");
        for step in (0..=10).rev() {
            let balls = step * 30;
            let base = step as f64 * 10.0;
            let row: Vec<String> = (0..10)
                .map(|wickets| format!("{:.1}", base * (10 - wickets) as f64 / 10.0))
                .collect();
            csv.push_str(&format!("{},{}\n", balls, row.join(",")));
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let table = ResourceTable::from_csv_path(MatchFormat::Odi, file.path()).unwrap();
        assert_eq!(table.max_balls(), 300);
        assert_eq!(table.percent_remaining(300, 0), 100.0);
        assert_eq!(table.percent_remaining(150, 0), 50.0);
        assert_eq!(table.percent_remaining(0, 5), 0.0);
    }
}
