use log::{debug, warn};
use machine_learning::{
    dataset::Dataset,
    preprocessing::{StandardScaler, train_test_split},
};
use ndarray::Axis;
use serde::{Deserialize, Serialize};

use crate::{data::Table, error::Result, registry::TaskDef};

/// Which rows the scaler's statistics are computed from.
///
/// Fitting on the full dataset lets the test rows leak into the statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerFit {
    #[default]
    FullDataset,
    TrainOnly,
}

/// A task's data, standardized and split.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub scaler: StandardScaler,
    pub train: Dataset,
    pub test: Dataset,
}

/// Extracts a task's features and labels from `table`, standardizes the features and splits the
/// rows into a train and a test set.
///
/// # Arguments
/// * `table` - The table holding the task's columns.
/// * `def` - The task.
/// * `test_fraction` - The portion of rows held out for testing.
/// * `seed` - The seed of the split.
/// * `fit` - The rows the scaler is fitted on.
pub fn prepare(
    table: &Table,
    def: &TaskDef,
    test_fraction: f32,
    seed: u64,
    fit: ScalerFit,
) -> Result<Prepared> {
    let x = table.numeric_matrix(def.features)?;
    let y = table.numeric_matrix(&[def.target])?;

    let split = train_test_split(x.nrows(), test_fraction, seed)?;

    let scaler = match fit {
        ScalerFit::FullDataset => StandardScaler::fit(x.view())?,
        ScalerFit::TrainOnly => StandardScaler::fit(x.select(Axis(0), &split.train).view())?,
    };

    let x = scaler.transform(x.view())?;
    if x.iter().any(|v| !v.is_finite()) {
        warn!("{}: standardized features hold non finite values", def.name);
    }

    let dataset = Dataset::new(x, y)?;
    let train = dataset.select(&split.train);
    let test = dataset.select(&split.test);

    debug!(
        "{}: {} train rows, {} test rows",
        def.name,
        train.len(),
        test.len()
    );

    Ok(Prepared {
        scaler,
        train,
        test,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::Cell, registry::TaskId};

    fn table(rows: usize) -> Table {
        let def = TaskId::Anomaly.def();
        let mut columns: Vec<(&str, Vec<Cell>)> = def
            .features
            .iter()
            .enumerate()
            .map(|(j, &name)| {
                let cells = (0..rows)
                    .map(|i| Cell::Number((i * (j + 1)) as f32))
                    .collect();
                (name, cells)
            })
            .collect();

        let labels = (0..rows).map(|i| Cell::Number((i % 2) as f32)).collect();
        columns.push((def.target, labels));

        Table::from_columns(columns).unwrap()
    }

    #[test]
    fn splits_eighty_twenty() {
        let def = TaskId::Anomaly.def();
        let prepared = prepare(&table(100), def, 0.2, 42, ScalerFit::FullDataset).unwrap();

        assert_eq!(prepared.train.len(), 80);
        assert_eq!(prepared.test.len(), 20);
        assert_eq!(prepared.train.x_size(), 4);
        assert_eq!(prepared.scaler.len(), 4);
    }

    #[test]
    fn full_dataset_fit_standardizes_all_rows() {
        let def = TaskId::Anomaly.def();
        let prepared = prepare(&table(10), def, 0.2, 1, ScalerFit::FullDataset).unwrap();

        let total: f32 = prepared.train.x().sum() + prepared.test.x().sum();
        assert!(total.abs() < 1e-3);
    }

    #[test]
    fn train_only_fit_standardizes_the_train_rows() {
        let def = TaskId::Anomaly.def();
        let prepared = prepare(&table(50), def, 0.2, 3, ScalerFit::TrainOnly).unwrap();

        for col in prepared.train.x().columns() {
            assert!(col.mean().unwrap().abs() < 1e-4);
        }
    }

    #[test]
    fn same_seed_same_split() {
        let def = TaskId::Anomaly.def();
        let a = prepare(&table(30), def, 0.2, 5, ScalerFit::FullDataset).unwrap();
        let b = prepare(&table(30), def, 0.2, 5, ScalerFit::FullDataset).unwrap();

        assert_eq!(a.test.x(), b.test.x());
        assert_eq!(a.train.y(), b.train.y());
    }

    #[test]
    fn missing_feature_column_fails() {
        let def = TaskId::Intrusion.def();
        let result = prepare(&table(10), def, 0.2, 0, ScalerFit::FullDataset);
        assert!(result.is_err());
    }
}
