use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{NormalizedRecord, RentalRecord};
use super::normalize::normalize;
use crate::error::DashboardError;

/// Columns every input file must carry. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = ["yr", "season", "weathersit", "casual", "registered", "cnt"];

// ---------------------------------------------------------------------------
// DatasetCache – read once, share read-only
// ---------------------------------------------------------------------------

/// Memoised dataset for one source file.
///
/// The first successful [`DatasetCache::load`] reads the file; every later
/// call returns the same shared slice without touching the disk. A failed
/// read is not cached, so a fixed file can be retried. The labelled view
/// returned by [`DatasetCache::normalized`] is derived once per cache too.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    records: OnceLock<Arc<[RentalRecord]>>,
    normalized: OnceLock<Arc<[NormalizedRecord]>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: OnceLock::new(),
            normalized: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Arc<[RentalRecord]>, DashboardError> {
        if let Some(records) = self.records.get() {
            log::debug!("Dataset cache hit for {}", self.path.display());
            return Ok(Arc::clone(records));
        }

        let loaded: Arc<[RentalRecord]> = load_file(&self.path)
            .map_err(|e| DashboardError::data_source(&self.path, &e))?
            .into();
        log::info!("Loaded {} rental records from {}", loaded.len(), self.path.display());

        Ok(Arc::clone(self.records.get_or_init(|| loaded)))
    }

    /// Labelled records, normalised on first use.
    pub fn normalized(&self) -> Result<Arc<[NormalizedRecord]>, DashboardError> {
        if let Some(records) = self.normalized.get() {
            return Ok(Arc::clone(records));
        }
        let labelled: Arc<[NormalizedRecord]> = normalize(&self.load()?).into();
        Ok(Arc::clone(self.normalized.get_or_init(|| labelled)))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load rental records from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, comma-delimited, column order irrelevant
/// * `.parquet` – integer columns with the same names
pub fn load_file(path: &Path) -> Result<Vec<RentalRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    check_consistency(&records)?;
    Ok(records)
}

/// Every record must satisfy `cnt == casual + registered`, and the `cnt`
/// column must sum within `u64`. Since casual and registered never exceed
/// `cnt`, every downstream sum is then bounded as well.
fn check_consistency(records: &[RentalRecord]) -> Result<()> {
    let mut running: u64 = 0;
    for (i, r) in records.iter().enumerate() {
        let record_no = i + 1;
        if !r.is_consistent() {
            bail!(
                "Record {record_no}: cnt ({}) is not casual ({}) + registered ({})",
                r.total,
                r.casual,
                r.registered
            );
        }
        running = running
            .checked_add(r.total)
            .with_context(|| format!("Record {record_no}: total cnt overflows u64"))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RentalRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("CSV missing '{col}' column");
        }
    }

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    while reader.read_record(&mut row).context("reading CSV record")? {
        let line = row.position().map_or(0, |p| p.line());
        let record: RentalRecord = row
            .deserialize(Some(&headers))
            .with_context(|| format!("CSV line {line}"))?;
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the rental columns.
///
/// Any integer type is accepted for each column; nulls are rejected.
fn load_parquet(path: &Path) -> Result<Vec<RentalRecord>> {
    read_parquet(path, PARQUET_BATCH_SIZE)
}

const PARQUET_BATCH_SIZE: usize = 8192;

fn read_parquet(path: &Path, batch_size: usize) -> Result<Vec<RentalRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?
        .with_batch_size(batch_size);
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let yr = int_column(&batch, "yr")?;
        let season = int_column(&batch, "season")?;
        let weathersit = int_column(&batch, "weathersit")?;
        let casual = int_column(&batch, "casual")?;
        let registered = int_column(&batch, "registered")?;
        let cnt = int_column(&batch, "cnt")?;

        let yr = yr.as_primitive::<Int64Type>();
        let season = season.as_primitive::<Int64Type>();
        let weathersit = weathersit.as_primitive::<Int64Type>();
        let casual = casual.as_primitive::<Int64Type>();
        let registered = registered.as_primitive::<Int64Type>();
        let cnt = cnt.as_primitive::<Int64Type>();

        for row in 0..batch.num_rows() {
            // 1-based position in the file, not in this batch.
            let record_no = records.len() + 1;
            records.push(RentalRecord {
                year_flag: yr.value(row),
                season_code: season.value(row),
                weather_code: weathersit.value(row),
                casual: count(casual.value(row), record_no, "casual")?,
                registered: count(registered.value(row), record_no, "registered")?,
                total: count(cnt.value(row), record_no, "cnt")?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Locate an integer column and widen it to Int64.
fn int_column(batch: &RecordBatch, name: &str) -> Result<ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    let col = batch.column(idx);

    if !col.data_type().is_integer() {
        bail!("Column '{name}' is {:?}, expected an integer type", col.data_type());
    }
    let widened = cast(col, &DataType::Int64)
        .with_context(|| format!("widening column '{name}' to Int64"))?;
    if widened.null_count() > 0 {
        bail!("Column '{name}' contains null values");
    }
    Ok(widened)
}

fn count(value: i64, record_no: usize, col: &str) -> Result<u64> {
    u64::try_from(value).with_context(|| format!("Record {record_no}: '{col}' is negative ({value})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{Int32Array, Int64Array};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_columns_in_any_order_with_extras() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "hour.csv",
            "instant,cnt,registered,casual,weathersit,season,yr,temp\n\
             1,16,13,3,1,1,0,0.24\n\
             2,40,32,8,2,3,1,0.22\n",
        );

        let records = load_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1],
            RentalRecord {
                year_flag: 1,
                season_code: 3,
                weather_code: 2,
                casual: 8,
                registered: 32,
                total: 40,
            }
        );
        assert!(records.iter().all(RentalRecord::is_consistent));
    }

    #[test]
    fn csv_missing_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "hour.csv", "yr,season,casual,registered,cnt\n0,1,1,1,2\n");
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("weathersit"));
    }

    #[test]
    fn inconsistent_total_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "hour.csv",
            "yr,season,weathersit,casual,registered,cnt\n0,1,1,1,1,3\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("cnt (3)"));
    }

    #[test]
    fn negative_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "hour.csv",
            "yr,season,weathersit,casual,registered,cnt\n0,1,1,-1,3,2\n",
        );
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn unknown_codes_survive_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "hour.csv",
            "yr,season,weathersit,casual,registered,cnt\n2,5,9,1,1,2\n",
        );
        let records = load_file(&path).unwrap();
        assert_eq!(records[0].season_code, 5);
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("data.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    fn write_parquet(path: &Path, batches: &[Vec<[i64; 6]>]) {
        let names = ["yr", "season", "weathersit", "casual", "registered", "cnt"];
        let schema = Arc::new(Schema::new(
            names
                .iter()
                .map(|n| Field::new(*n, DataType::Int64, false))
                .collect::<Vec<_>>(),
        ));
        let file = std::fs::File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema.clone(), None).unwrap();
        for rows in batches {
            let columns: Vec<ArrayRef> = (0..names.len())
                .map(|c| Arc::new(Int64Array::from(rows.iter().map(|r| r[c]).collect::<Vec<_>>())) as ArrayRef)
                .collect();
            writer.write(&RecordBatch::try_new(schema.clone(), columns).unwrap()).unwrap();
        }
        writer.close().unwrap();
    }

    #[test]
    fn parquet_error_names_record_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hour.parquet");
        write_parquet(
            &path,
            &[
                vec![[0, 1, 1, 1, 1, 2], [0, 1, 1, 2, 2, 4]],
                vec![[1, 2, 1, 3, 3, 6], [1, 2, 1, -5, 10, 5]],
            ],
        );

        let err = read_parquet(&path, 2).unwrap_err();
        assert!(format!("{err:#}").contains("Record 4: 'casual' is negative"));
        assert_eq!(read_parquet(&path, 3).unwrap_err().to_string(), err.to_string());
    }

    #[test]
    fn csv_error_names_file_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "hour.csv",
            "yr,season,weathersit,casual,registered,cnt\n\
             0,1,1,1,1,2\n\
             0,1,1,x,1,2\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("CSV line 3"));
    }

    #[test]
    fn cnt_total_overflow_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "hour.csv",
            "yr,season,weathersit,casual,registered,cnt\n\
             0,1,1,9223372036854775808,0,9223372036854775808\n\
             1,1,1,9223372036854775808,0,9223372036854775808\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Record 2: total cnt overflows u64"));

        let cache = DatasetCache::new(&path);
        assert!(matches!(cache.load(), Err(DashboardError::DataSource { .. })));
    }

    #[test]
    fn parquet_with_mixed_integer_widths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hour.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("yr", DataType::Int32, false),
            Field::new("season", DataType::Int32, false),
            Field::new("weathersit", DataType::Int32, false),
            Field::new("casual", DataType::Int64, false),
            Field::new("registered", DataType::Int64, false),
            Field::new("cnt", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int32Array::from(vec![0, 1])),
                Arc::new(Int32Array::from(vec![1, 4])),
                Arc::new(Int32Array::from(vec![1, 3])),
                Arc::new(Int64Array::from(vec![10, 50])),
                Arc::new(Int64Array::from(vec![90, 50])),
                Arc::new(Int64Array::from(vec![100, 100])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let records = load_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].season_code, 4);
        assert_eq!(records[1].weather_code, 3);
        assert_eq!(records[0].total, 100);
    }

    #[test]
    fn cache_reads_the_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "hour.csv",
            "yr,season,weathersit,casual,registered,cnt\n0,1,1,10,90,100\n",
        );

        let cache = DatasetCache::new(&path);
        let first = cache.load().unwrap();
        let labelled = cache.normalized().unwrap();

        std::fs::remove_file(&path).unwrap();
        let second = cache.load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
        assert!(Arc::ptr_eq(&labelled, &cache.normalized().unwrap()));
        assert_eq!(labelled[0].raw, first[0]);
    }

    #[test]
    fn cache_reports_missing_file_as_data_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path().join("absent.csv"));
        match cache.load() {
            Err(DashboardError::DataSource { path, .. }) => assert!(path.ends_with("absent.csv")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(cache.normalized().is_err());
    }
}
