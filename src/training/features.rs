//! Feature engineering: categorical encoding, scaling, and the
//! in-memory training set with stratified splitting.

use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, Result};
use crate::scorer::risk::FDTL_DUTY_HOURS;
use crate::training::dataset::FlightRecord;

/// Model feature columns, in training order.
pub const FEATURE_NAMES: [&str; 13] = [
    "scheduled_departure_hour",
    "delay_minutes",
    "origin_airport",
    "destination_airport",
    "aircraft_type",
    "pilots_available",
    "pilots_required",
    "avg_duty_hours",
    "rest_violation_flag",
    "weather_severity",
    "holiday_flag",
    "pilot_shortage",
    "peak_duty_flag",
];

/// Maps distinct string categories to indices over their sorted order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fits on the distinct values seen, sorted lexicographically.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(String::from).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    /// Encodes one value. Unknown categories are fatal.
    pub fn transform(&self, value: &str) -> Result<f64> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .map(|idx| idx as f64)
            .map_err(|_| OpsError::dataset(format!("unencodable category '{value}'")))
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// The three categorical encoders fitted on the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encoders {
    pub origin: LabelEncoder,
    pub destination: LabelEncoder,
    pub aircraft: LabelEncoder,
}

/// Z-score scaler fitted on the training split only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits per-column mean and population standard deviation.
    pub fn fit(&mut self, x: &Array2<f64>) {
        let n = x.nrows() as f64;
        let n_features = x.ncols();

        self.means = (0..n_features)
            .map(|j| x.column(j).sum() / n)
            .collect();
        self.stds = (0..n_features)
            .map(|j| {
                let mean = self.means[j];
                let var = x.column(j).iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                var.sqrt()
            })
            .collect();
    }

    /// Transforms with the fitted parameters. Constant columns map to 0.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if self.means.is_empty() {
            return Err(OpsError::training("scaler has not been fitted yet"));
        }
        if x.ncols() != self.means.len() {
            return Err(OpsError::training(format!(
                "scaler fitted on {} features, got {}",
                self.means.len(),
                x.ncols()
            )));
        }

        let mut out = x.clone();
        for (j, mut col) in out.columns_mut().into_iter().enumerate() {
            let mean = self.means[j];
            let std = self.stds[j];
            for value in col.iter_mut() {
                *value = if std > 1e-10 { (*value - mean) / std } else { 0.0 };
            }
        }
        Ok(out)
    }

    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x);
        self.transform(x)
    }
}

/// Feature matrix and labels ready for model fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSet {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<f64>,
    pub feature_names: Vec<String>,
}

impl TrainingSet {
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn features_array(&self) -> Array2<f64> {
        let n_samples = self.n_samples();
        let n_features = self.n_features();
        if n_samples == 0 {
            return Array2::zeros((0, n_features));
        }
        Array2::from_shape_fn((n_samples, n_features), |(i, j)| self.features[i][j])
    }

    pub fn labels_array(&self) -> Array1<f64> {
        Array1::from_vec(self.labels.clone())
    }

    /// Copy of this set with features replaced (e.g. by scaled values).
    pub fn with_features(&self, x: &Array2<f64>) -> Result<TrainingSet> {
        if x.nrows() != self.n_samples() || x.ncols() != self.n_features() {
            return Err(OpsError::training(format!(
                "feature matrix shape ({}, {}) does not match set ({}, {})",
                x.nrows(),
                x.ncols(),
                self.n_samples(),
                self.n_features()
            )));
        }
        Ok(TrainingSet {
            features: x.rows().into_iter().map(|row| row.to_vec()).collect(),
            labels: self.labels.clone(),
            feature_names: self.feature_names.clone(),
        })
    }

    pub fn subset(&self, indices: &[usize]) -> TrainingSet {
        TrainingSet {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Random sample with replacement, for bagging.
    pub fn bootstrap_sample(&self, seed: u64) -> TrainingSet {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        self.subset(&indices)
    }

    /// Stratified train/test split: each class contributes `test_ratio`
    /// of its rows to the test set, so class balance is preserved.
    pub fn stratified_split(&self, test_ratio: f64, seed: u64) -> (TrainingSet, TrainingSet) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut positive: Vec<usize> = Vec::new();
        let mut negative: Vec<usize> = Vec::new();
        for (i, &label) in self.labels.iter().enumerate() {
            if label > 0.5 {
                positive.push(i);
            } else {
                negative.push(i);
            }
        }

        let mut train_indices = Vec::new();
        let mut test_indices = Vec::new();
        for class_indices in [&mut positive, &mut negative] {
            class_indices.shuffle(&mut rng);
            let test_size = (class_indices.len() as f64 * test_ratio).round() as usize;
            test_indices.extend_from_slice(&class_indices[..test_size]);
            train_indices.extend_from_slice(&class_indices[test_size..]);
        }

        train_indices.shuffle(&mut rng);
        test_indices.shuffle(&mut rng);

        (self.subset(&train_indices), self.subset(&test_indices))
    }
}

/// Builds the training set from raw records: drops same-route rows,
/// fits the categorical encoders, and appends the engineered
/// `pilot_shortage` and `peak_duty_flag` columns.
///
/// Returns the set, the fitted encoders, and the number of dropped rows.
pub fn build_training_set(records: &[FlightRecord]) -> Result<(TrainingSet, Encoders, usize)> {
    let kept: Vec<&FlightRecord> = records
        .iter()
        .filter(|r| r.origin_airport != r.destination_airport)
        .collect();
    let n_dropped = records.len() - kept.len();

    if kept.is_empty() {
        return Err(OpsError::dataset("no valid rows after route filtering"));
    }

    let encoders = Encoders {
        origin: LabelEncoder::fit(kept.iter().map(|r| r.origin_airport.as_str())),
        destination: LabelEncoder::fit(kept.iter().map(|r| r.destination_airport.as_str())),
        aircraft: LabelEncoder::fit(kept.iter().map(|r| r.aircraft_type.as_str())),
    };

    let mut features = Vec::with_capacity(kept.len());
    let mut labels = Vec::with_capacity(kept.len());

    for record in &kept {
        let pilot_shortage =
            f64::from(record.pilots_required) - f64::from(record.pilots_available);
        let peak_duty_flag = if record.avg_duty_hours > FDTL_DUTY_HOURS {
            1.0
        } else {
            0.0
        };

        features.push(vec![
            f64::from(record.scheduled_departure_hour),
            record.delay_minutes,
            encoders.origin.transform(&record.origin_airport)?,
            encoders.destination.transform(&record.destination_airport)?,
            encoders.aircraft.transform(&record.aircraft_type)?,
            f64::from(record.pilots_available),
            f64::from(record.pilots_required),
            record.avg_duty_hours,
            f64::from(record.rest_violation_flag),
            record.weather_severity,
            f64::from(record.holiday_flag),
            pilot_shortage,
            peak_duty_flag,
        ]);
        labels.push(f64::from(record.cancelled));
    }

    let set = TrainingSet {
        features,
        labels,
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
    };

    Ok((set, encoders, n_dropped))
}
