//! Integration tests for reading and writing Thiessen NetCDF series.

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use chrono::NaiveDate;
use prbias_calendar::{LeadWindows, RunDate};
use prbias_io::{
    ArchiveLayout, Basin, BasinKind, CorrectedSeries, IoError, NetcdfArchive, SeriesLoader,
    SeriesRequest, SeriesSource, SeriesWriter, ThiessenWriter, Unavailable,
};
use prbias_quantile_map::CorrectionMethod;
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Helper: programmatic NetCDF fixture builder
// ---------------------------------------------------------------------------

/// A 1-D daily Thiessen series to be written as NetCDF.
struct SeriesFixture {
    values: Vec<f64>,
    fill_value: Option<f64>,
    time_units: String,
}

impl SeriesFixture {
    fn new(start: NaiveDate, values: Vec<f64>) -> Self {
        Self {
            values,
            fill_value: None,
            time_units: format!("days since {}", start.format("%Y-%m-%d")),
        }
    }

    fn with_fill_value(mut self, fv: f64) -> Self {
        self.fill_value = Some(fv);
        self
    }

    fn with_time_units(mut self, units: &str) -> Self {
        self.time_units = units.to_string();
        self
    }

    /// Write the fixture to `path`, creating parent directories.
    fn write(&self, path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut file = netcdf::create(path).expect("failed to create NetCDF file");
        let nt = self.values.len();
        file.add_dimension("time", nt).expect("add dim time");
        {
            let offsets: Vec<f64> = (0..nt).map(|t| t as f64).collect();
            let mut var = file
                .add_variable::<f64>("time", &["time"])
                .expect("add var time");
            var.put_values(&offsets, ..).expect("put time values");
            var.put_attribute("units", self.time_units.as_str())
                .expect("add time units");
        }
        {
            let mut var = file
                .add_variable::<f64>("pr", &["time"])
                .expect("add var pr");
            if let Some(fv) = self.fill_value {
                var.put_attribute("_FillValue", fv)
                    .expect("add pr _FillValue");
            }
            var.put_values(&self.values, ..).expect("put pr values");
        }
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn basin() -> Basin {
    Basin::new("jaguaribe", "jaguaribe", "jaguaribe_ce", BasinKind::Macro, None)
}

fn layout(root: &Path) -> ArchiveLayout {
    ArchiveLayout::new(root, "rsm2008")
}

fn request<'a>(basin: &'a Basin, source: SeriesSource, run: RunDate) -> SeriesRequest<'a> {
    SeriesRequest {
        basin,
        source,
        run,
        windows: run.windows().unwrap(),
    }
}

fn fixture_path(layout: &ArchiveLayout, source: SeriesSource, run: RunDate) -> PathBuf {
    let windows: LeadWindows = run.windows().unwrap();
    layout.series_path(source, &basin(), run, &windows)
}

// ---------------------------------------------------------------------------
// Forecast / hindcast files
// ---------------------------------------------------------------------------

#[test]
fn forecast_file_is_truncated_to_lead_span() {
    let dir = tempdir().unwrap();
    let layout = layout(dir.path());
    let run = RunDate::new(2017, 8).unwrap();
    let values: Vec<f64> = (0..95).map(|i| i as f64 * 0.5).collect();
    SeriesFixture::new(ymd(2017, 9, 1), values)
        .write(&fixture_path(&layout, SeriesSource::Forecast, run));

    let b = basin();
    let archive = NetcdfArchive::new(layout);
    let series = archive
        .load(&request(&b, SeriesSource::Forecast, run))
        .unwrap();
    assert_eq!(series.len(), 91);
    assert_eq!(series.start(), ymd(2017, 9, 1));
    assert_eq!(series.end(), Some(ymd(2017, 11, 30)));
    assert_relative_eq!(series.values()[90], 45.0);
}

#[test]
fn fill_values_become_nan() {
    let dir = tempdir().unwrap();
    let layout = layout(dir.path());
    let run = RunDate::new(2017, 8).unwrap();
    let mut values = vec![1.0; 91];
    values[3] = -999.0;
    SeriesFixture::new(ymd(2017, 9, 1), values)
        .with_fill_value(-999.0)
        .write(&fixture_path(&layout, SeriesSource::Forecast, run));

    let b = basin();
    let series = NetcdfArchive::new(layout)
        .load(&request(&b, SeriesSource::Forecast, run))
        .unwrap();
    assert!(series.values()[3].is_nan());
    assert_eq!(series.total().n_missing, 1);
    assert_relative_eq!(series.total().sum, 90.0);
}

#[test]
fn missing_file_is_classified_missing() {
    let dir = tempdir().unwrap();
    let b = basin();
    let run = RunDate::new(2017, 8).unwrap();
    let err = NetcdfArchive::new(layout(dir.path()))
        .load(&request(&b, SeriesSource::Forecast, run))
        .unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
    assert_eq!(err.unavailable(), Unavailable::Missing);
}

#[test]
fn short_file_is_classified_malformed() {
    let dir = tempdir().unwrap();
    let layout = layout(dir.path());
    let run = RunDate::new(1985, 8).unwrap();
    SeriesFixture::new(ymd(1985, 9, 1), vec![1.0; 60])
        .write(&fixture_path(&layout, SeriesSource::Hindcast, run));

    let b = basin();
    let err = NetcdfArchive::new(layout)
        .load(&request(&b, SeriesSource::Hindcast, run))
        .unwrap_err();
    assert!(matches!(
        err,
        IoError::TooShort {
            expected: 91,
            got: 60,
            ..
        }
    ));
    assert_eq!(err.unavailable(), Unavailable::Malformed);
}

// ---------------------------------------------------------------------------
// Observation record
// ---------------------------------------------------------------------------

#[test]
fn observation_record_sliced_by_time_axis() {
    let dir = tempdir().unwrap();
    let layout = layout(dir.path());
    let start = ymd(1981, 1, 1);
    let n = (ymd(1990, 12, 31) - start).num_days() as usize + 1;
    let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let any_run = RunDate::new(1981, 1).unwrap();
    SeriesFixture::new(start, values)
        .write(&fixture_path(&layout, SeriesSource::Observation, any_run));

    // Nov 1987 run covers Dec 1987 .. Feb 1988 (leap year).
    let run = RunDate::new(1987, 11).unwrap();
    let b = basin();
    let series = NetcdfArchive::new(layout)
        .load(&request(&b, SeriesSource::Observation, run))
        .unwrap();
    assert_eq!(series.len(), 31 + 31 + 29);
    let first = (ymd(1987, 12, 1) - start).num_days() as f64;
    assert_relative_eq!(series.values()[0], first);
    let last = (ymd(1988, 2, 29) - start).num_days() as f64;
    assert_relative_eq!(series.values()[series.len() - 1], last);
}

#[test]
fn observation_record_in_hours() {
    let dir = tempdir().unwrap();
    let layout = layout(dir.path());
    // Daily steps expressed as 24-hour offsets.
    let n = 400;
    let path = fixture_path(&layout, SeriesSource::Observation, RunDate::new(2000, 1).unwrap());
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("time", n).unwrap();
        let hours: Vec<f64> = (0..n).map(|t| t as f64 * 24.0).collect();
        let mut t = file.add_variable::<f64>("time", &["time"]).unwrap();
        t.put_values(&hours, ..).unwrap();
        t.put_attribute("units", "hours since 2000-01-01 00:00:00")
            .unwrap();
        let vals = vec![2.0; n];
        let mut v = file.add_variable::<f64>("pr", &["time"]).unwrap();
        v.put_values(&vals, ..).unwrap();
    }

    let run = RunDate::new(2000, 3).unwrap();
    let b = basin();
    let series = NetcdfArchive::new(layout)
        .load(&request(&b, SeriesSource::Observation, run))
        .unwrap();
    assert_eq!(series.start(), ymd(2000, 4, 1));
    assert_eq!(series.len(), 30 + 31 + 30);
}

#[test]
fn observation_outside_record_is_malformed() {
    let dir = tempdir().unwrap();
    let layout = layout(dir.path());
    let run = RunDate::new(2014, 11).unwrap();
    SeriesFixture::new(ymd(2014, 1, 1), vec![1.0; 365])
        .with_time_units("days since 2014-01-01 00:00:00")
        .write(&fixture_path(&layout, SeriesSource::Observation, run));

    let b = basin();
    let err = NetcdfArchive::new(layout)
        .load(&request(&b, SeriesSource::Observation, run))
        .unwrap_err();
    assert!(matches!(err, IoError::OutOfRecord { .. }));
    assert_eq!(err.unavailable(), Unavailable::Malformed);
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

#[test]
fn writer_creates_cor_directory_and_file() {
    let dir = tempdir().unwrap();
    let layout = layout(dir.path());
    let run = RunDate::new(2017, 8).unwrap();
    let windows = run.windows().unwrap();
    let mut values: Vec<f64> = (0..91).map(|i| i as f64 / 10.0).collect();
    values[10] = f64::NAN;
    let b = basin();

    let writer = ThiessenWriter::new(layout.clone());
    let path = writer
        .write(&CorrectedSeries {
            basin: &b,
            run,
            windows,
            method: CorrectionMethod::EqmDes,
            values: &values,
        })
        .unwrap();

    assert_eq!(
        path,
        layout.output_path(&b, run, &windows, "eqmdes")
    );
    assert!(path.exists());
    assert!(path.to_string_lossy().contains("pr_thiessen_cor"));

    let file = netcdf::open(&path).unwrap();
    let pr = file.variable("pr").unwrap().get_values::<f64, _>(..).unwrap();
    assert_eq!(pr.len(), 91);
    assert!(pr[10].is_nan());
    assert_relative_eq!(pr[90], 9.0);
    let time = file.variable("time").unwrap().get_values::<f64, _>(..).unwrap();
    assert_eq!(time[0], 0.0);
    assert_eq!(time[90], 90.0);
}

#[test]
fn writer_rejects_wrong_length() {
    let dir = tempdir().unwrap();
    let run = RunDate::new(2017, 8).unwrap();
    let b = basin();
    let err = ThiessenWriter::new(layout(dir.path()))
        .write(&CorrectedSeries {
            basin: &b,
            run,
            windows: run.windows().unwrap(),
            method: CorrectionMethod::None,
            values: &[1.0; 10],
        })
        .unwrap_err();
    assert!(matches!(err, IoError::TooShort { .. }));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let run = RunDate::new(2017, 8).unwrap();
    let b = basin();
    let values = vec![0.0; 91];
    let path = ThiessenWriter::new(layout(dir.path()))
        .with_dry_run(true)
        .write(&CorrectedSeries {
            basin: &b,
            run,
            windows: run.windows().unwrap(),
            method: CorrectionMethod::EqmDes,
            values: &values,
        })
        .unwrap();
    assert!(!path.exists());
}
