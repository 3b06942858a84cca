use anyhow::Result;
use log::{info, warn};
use threat_detection::{config::PipelineConfig, logging, pipeline, registry::TaskId};

/// One raw sample per task, in each task's feature order.
const SAMPLES: [(TaskId, &[f32]); 5] = [
    (TaskId::Intrusion, &[5000., 200., 12.5, 340., 3.]),
    (TaskId::Anomaly, &[0.8, 1200., 85., 3.9]),
    (TaskId::UserAuth, &[45., 0.32, 820., 3., 4.]),
    (TaskId::DeviceAuth, &[-82., 7.5, 0.15, 900., 8.]),
    (TaskId::Threat, &[870., 52000., 7.6, 42., 0.93]),
];

fn main() -> Result<()> {
    logging::init();

    let config = PipelineConfig::from_env()?;
    info!("running with {config:?}");

    let mut detector = pipeline::run(&config)?;

    if config.plot {
        let curves = detector
            .models()
            .map(|m| tui::Curves::new(m.id.to_string(), m.history.clone()))
            .collect();

        if let Err(e) = tui::show(curves) {
            warn!("couldn't plot the training history: {e}");
        }
    }

    for (id, features) in SAMPLES {
        let Some(model) = detector.get_mut(id) else {
            continue;
        };

        let verdict = model.detect(features)?;
        println!("{id}: {verdict}");
    }

    Ok(())
}
