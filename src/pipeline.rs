use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use log::info;
use machine_learning::{
    arch::{Model, Sequential, loss::BinaryCrossEntropy},
    optimization::Adam,
    preprocessing::StandardScaler,
    training::{History, ModelTrainer},
};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::PipelineConfig,
    data::{Table, load_dataset},
    error::Result,
    factory::build_model,
    preprocess::prepare,
    registry::{DATASET_LABEL, Source, Synthetic, TaskDef, TaskId},
    synthetic::generate,
};

/// A task's fitted scaler and model.
#[derive(Debug, Clone)]
pub struct TaskModel {
    pub id: TaskId,
    pub scaler: StandardScaler,
    pub model: Sequential,
    pub params: Vec<f32>,
    pub history: History,
}

/// The tables every task reads its rows from.
#[derive(Debug, Clone)]
pub struct Sources {
    dataset: Table,
    user_auth: Table,
    device_auth: Table,
    threat: Table,
}

impl Sources {
    /// Generates the synthetic tables next to an already loaded dataset.
    ///
    /// # Arguments
    /// * `dataset` - The loaded CSV dataset, its label already binarized.
    /// * `rows` - The amount of rows of each synthetic table.
    /// * `seed` - The seed the synthetic tables are generated from.
    pub fn new(dataset: Table, rows: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);

        Ok(Self {
            dataset,
            user_auth: generate(Synthetic::UserAuth, rows, &mut rng)?,
            device_auth: generate(Synthetic::DeviceAuth, rows, &mut rng)?,
            threat: generate(Synthetic::Threat, rows, &mut rng)?,
        })
    }

    /// Loads the configured dataset and generates the synthetic tables.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        let dataset = load_dataset(&config.dataset_path, DATASET_LABEL)?;
        Self::new(dataset, config.synthetic_rows, config.seed)
    }

    pub fn table(&self, source: Source) -> &Table {
        match source {
            Source::Dataset => &self.dataset,
            Source::Synthetic(Synthetic::UserAuth) => &self.user_auth,
            Source::Synthetic(Synthetic::DeviceAuth) => &self.device_auth,
            Source::Synthetic(Synthetic::Threat) => &self.threat,
        }
    }
}

/// Preprocesses a task's rows and fits a fresh model on them.
///
/// # Arguments
/// * `table` - The table holding the task's columns.
/// * `def` - The task.
/// * `config` - The pipeline's configuration.
///
/// # Returns
/// The fitted scaler and model along with the training history.
pub fn train_task(table: &Table, def: &TaskDef, config: &PipelineConfig) -> Result<TaskModel> {
    let prepared = prepare(
        table,
        def,
        config.test_fraction,
        config.seed,
        config.scaler_fit,
    )?;

    let model = build_model(config.architecture, def.features.len(), config.seed)?;
    let rng = Rc::new(RefCell::new(StdRng::seed_from_u64(config.seed)));
    let mut params = model.init_params(rng)?;

    info!(
        "training {} ({:?}, {} params) on {} rows",
        def.name,
        config.architecture,
        params.len(),
        prepared.train.len()
    );

    let optimizer = Adam::with_defaults(model.size());
    let mut trainer = ModelTrainer::new(
        model,
        optimizer,
        BinaryCrossEntropy::default(),
        config.epochs,
        config.batch_size,
        StdRng::seed_from_u64(config.seed),
    );

    let mut train = prepared.train;
    let history = trainer.train(&mut params, &mut train, &prepared.test)?;

    if let Some(val_accuracy) = history.last_val_accuracy() {
        info!("{}: final val_accuracy {val_accuracy:.4}", def.name);
    }

    Ok(TaskModel {
        id: def.id,
        scaler: prepared.scaler,
        model: trainer.into_model(),
        params,
        history,
    })
}

/// Every task's fitted model, keyed by task.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    models: BTreeMap<TaskId, TaskModel>,
}

impl Detector {
    /// Trains one model per task, in registry order.
    pub fn train(sources: &Sources, config: &PipelineConfig) -> Result<Self> {
        let mut models = BTreeMap::new();

        for id in TaskId::ALL {
            let def = id.def();
            let model = train_task(sources.table(def.source), def, config)?;
            models.insert(id, model);
        }

        Ok(Self { models })
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut TaskModel> {
        self.models.get_mut(&id)
    }

    pub fn models(&self) -> impl Iterator<Item = &TaskModel> {
        self.models.values()
    }
}

/// Loads the data and trains every task.
pub fn run(config: &PipelineConfig) -> Result<Detector> {
    let sources = Sources::load(config)?;
    Detector::train(&sources, config)
}
