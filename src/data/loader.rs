use super::models::{ShotRecord, REQUIRED_COLUMNS};
use crate::error::AppError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Immutable in-memory shot table.
///
/// Built once at startup and handed by reference to the filter engine;
/// there is no way to mutate rows after loading.
#[derive(Debug, Clone, Default)]
pub struct ShotTable {
    records: Vec<ShotRecord>,
}

impl ShotTable {
    pub fn new(records: Vec<ShotRecord>) -> Self {
        ShotTable { records }
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::IoError(format!("Failed to open {}: {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::SchemaError(format!(
                "missing column(s): {}",
                missing.join(", ")
            )));
        }

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<ShotRecord>().enumerate() {
            // header is line 1
            let line = idx + 2;
            let record = row.map_err(|e| {
                if e.is_io_error() {
                    AppError::CsvError(e.to_string())
                } else {
                    AppError::SchemaError(format!("line {}: {}", line, e))
                }
            })?;

            if !record.on_pitch() {
                return Err(AppError::SchemaError(format!(
                    "line {}: shot at ({}, {}) lies outside the pitch",
                    line, record.x, record.y
                )));
            }
            records.push(record);
        }

        tracing::debug!(rows = records.len(), "shot table loaded");
        Ok(ShotTable::new(records))
    }

    pub fn records(&self) -> &[ShotRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
,competition_name,season_name,team_name,player_name,X,Y,Goal,my_xg
0,La Liga,2019/2020,Barcelona,Lionel Messi,108.2,38.5,True,0.41
1,La Liga,2019/2020,Real Madrid,Karim Benzema,99.0,45.1,False,0.07
2,Serie A,2016/2017,Napoli,Dries Mertens,112.0,41.0,True,0.55
";

    #[test]
    fn loads_rows_in_file_order() {
        let table = ShotTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        let first = &table.records()[0];
        assert_eq!(first.player_name, "Lionel Messi");
        assert!(first.goal);
        assert_eq!(first.x, 108.2);
        assert!(!table.records()[1].goal);
    }

    #[test]
    fn accepts_lowercase_and_numeric_booleans() {
        let csv = "competition_name,season_name,team_name,player_name,X,Y,Goal,my_xg\n\
                   La Liga,2019/2020,Barcelona,A,100,40,true,0.1\n\
                   La Liga,2019/2020,Barcelona,B,100,40,0,0.1\n";
        let table = ShotTable::from_reader(csv.as_bytes()).unwrap();
        assert!(table.records()[0].goal);
        assert!(!table.records()[1].goal);
    }

    #[test]
    fn missing_columns_are_a_schema_error() {
        let csv = "competition_name,season_name,team_name,X,Y\nLa Liga,2019/2020,Barcelona,100,40\n";
        let err = ShotTable::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            AppError::SchemaError(msg) => {
                assert!(msg.contains("player_name"));
                assert!(msg.contains("Goal"));
                assert!(msg.contains("my_xg"));
            }
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn bad_value_reports_line() {
        let csv = "competition_name,season_name,team_name,player_name,X,Y,Goal,my_xg\n\
                   La Liga,2019/2020,Barcelona,A,100,40,True,0.1\n\
                   La Liga,2019/2020,Barcelona,B,far,40,True,0.1\n";
        let err = ShotTable::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            AppError::SchemaError(msg) => assert!(msg.starts_with("line 3")),
            other => panic!("expected schema error, got {:?}", other),
        }
    }

    #[test]
    fn off_pitch_shot_is_rejected() {
        let csv = "competition_name,season_name,team_name,player_name,X,Y,Goal,my_xg\n\
                   La Liga,2019/2020,Barcelona,A,130,40,True,0.1\n";
        let err = ShotTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::SchemaError(_)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let table = ShotTable::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ShotTable::from_path(Path::new("/nonexistent/shots.csv")).unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
