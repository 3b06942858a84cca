use std::{num::NonZeroUsize, path::PathBuf};

use machine_learning::MlErr;
use threat_detection::{
    DetectErr,
    config::PipelineConfig,
    data::{Cell, Table, load_dataset},
    factory::Architecture,
    inference::Verdict,
    pipeline::{self, Sources, train_task},
    registry::{DATASET_LABEL, TaskId},
};

fn dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/network_traffic.csv")
}

fn config(epochs: usize) -> PipelineConfig {
    PipelineConfig {
        dataset_path: dataset_path(),
        epochs: NonZeroUsize::new(epochs).unwrap(),
        plot: false,
        ..Default::default()
    }
}

fn sources(config: &PipelineConfig) -> Sources {
    Sources::new(Table::default(), config.synthetic_rows, config.seed).unwrap()
}

#[test]
fn synthetic_tasks_stay_at_chance() {
    let config = config(10);
    let sources = sources(&config);

    for id in [TaskId::UserAuth, TaskId::DeviceAuth, TaskId::Threat] {
        let def = id.def();
        let model = train_task(sources.table(def.source), def, &config).unwrap();

        let accuracy = model.history.last_val_accuracy().unwrap();
        assert!(
            (0.35..=0.65).contains(&accuracy),
            "{id} reached {accuracy}, labels are independent of the features"
        );
    }
}

#[test]
fn device_auth_is_reproducible() {
    let config = config(3);
    let def = TaskId::DeviceAuth.def();

    let a = train_task(sources(&config).table(def.source), def, &config).unwrap();
    let b = train_task(sources(&config).table(def.source), def, &config).unwrap();

    assert_eq!(a.history, b.history);
    assert_eq!(a.params, b.params);
}

#[test]
fn deep_architecture_trains() {
    let shallow = config(3);
    let deep = PipelineConfig {
        architecture: Architecture::Deep,
        ..config(3)
    };
    let def = TaskId::DeviceAuth.def();

    let a = train_task(sources(&shallow).table(def.source), def, &shallow).unwrap();
    let b = train_task(sources(&deep).table(def.source), def, &deep).unwrap();

    assert_eq!(b.history.epochs(), 3);
    assert!(b.params.len() > a.params.len());

    let accuracy = b.history.last_val_accuracy().unwrap();
    assert!((0.0..=1.0).contains(&accuracy));
}

#[test]
fn intrusion_learns_from_the_csv() {
    let config = config(30);
    let table = load_dataset(&config.dataset_path, DATASET_LABEL).unwrap();
    let def = TaskId::Intrusion.def();

    let mut model = train_task(&table, def, &config).unwrap();

    let accuracy = model.history.last_val_accuracy().unwrap();
    assert!(accuracy >= 0.75, "val_accuracy {accuracy}");

    let verdict = model.detect(&[5000., 200., 12.5, 340., 3.]).unwrap();
    assert!(matches!(verdict, Verdict::Suspicious | Verdict::Normal));
}

#[test]
fn wrong_feature_count_is_a_size_mismatch() {
    let config = config(1);
    let sources = sources(&config);
    let def = TaskId::Threat.def();
    let mut model = train_task(sources.table(def.source), def, &config).unwrap();

    let res = model.detect(&[1., 2.]);
    assert!(matches!(
        res,
        Err(DetectErr::Ml(MlErr::SizeMismatch {
            got: 2,
            expected: 5,
            ..
        }))
    ));
}

#[test]
fn text_in_a_feature_column_fails() {
    let config = config(1);
    let def = TaskId::Anomaly.def();

    let mut columns: Vec<(&str, Vec<Cell>)> = def
        .features
        .iter()
        .map(|&name| (name, vec![Cell::Number(1.), Cell::Number(2.)]))
        .collect();
    columns[0].1[1] = Cell::Text("fast".into());
    columns.push((DATASET_LABEL, vec![Cell::Number(0.), Cell::Number(1.)]));
    let table = Table::from_columns(columns).unwrap();

    let res = train_task(&table, def, &config);
    assert!(matches!(res, Err(DetectErr::NonNumeric { row: 1, .. })));
}

#[test]
fn full_run_trains_every_task() {
    let config = PipelineConfig {
        synthetic_rows: 200,
        ..config(2)
    };

    let detector = pipeline::run(&config).unwrap();

    let ids: Vec<_> = detector.models().map(|m| m.id).collect();
    assert_eq!(ids, TaskId::ALL);
    assert!(detector.models().all(|m| m.history.epochs() == 2));
}

#[test]
fn missing_dataset_is_an_io_error() {
    let config = PipelineConfig {
        dataset_path: PathBuf::from("does/not/exist.csv"),
        ..config(1)
    };

    assert!(matches!(pipeline::run(&config), Err(DetectErr::Io(_))));
}
