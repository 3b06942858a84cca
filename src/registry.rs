use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The label column of the loaded dataset.
pub const DATASET_LABEL: &str = "label";

/// The detection tasks, one binary classifier each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskId {
    Intrusion,
    Anomaly,
    UserAuth,
    DeviceAuth,
    Threat,
}

/// The synthetic tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Synthetic {
    UserAuth,
    DeviceAuth,
    Threat,
}

/// Where the rows of a task come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Dataset,
    Synthetic(Synthetic),
}

#[derive(Debug)]
pub struct TaskDef {
    pub id: TaskId,
    pub name: &'static str,
    pub features: &'static [&'static str],
    pub target: &'static str,
    pub source: Source,
}

pub static TASKS: [TaskDef; 5] = [
    TaskDef {
        id: TaskId::Intrusion,
        name: "Intrusion Detection",
        features: &[
            "src_bytes",
            "dst_bytes",
            "duration",
            "packet_count",
            "failed_logins",
        ],
        target: DATASET_LABEL,
        source: Source::Dataset,
    },
    TaskDef {
        id: TaskId::Anomaly,
        name: "Anomaly Detection",
        features: &["duration", "packet_count", "connection_rate", "port_entropy"],
        target: DATASET_LABEL,
        source: Source::Dataset,
    },
    TaskDef {
        id: TaskId::UserAuth,
        name: "User Authentication",
        features: &[
            "typing_speed",
            "keystroke_interval",
            "mouse_velocity",
            "login_hour",
            "failed_attempts",
        ],
        target: "is_impostor",
        source: Source::Synthetic(Synthetic::UserAuth),
    },
    TaskDef {
        id: TaskId::DeviceAuth,
        name: "Device Authentication",
        features: &[
            "signal_strength",
            "connection_time",
            "packet_loss",
            "firmware_age_days",
            "auth_attempts",
        ],
        target: "is_rogue",
        source: Source::Synthetic(Synthetic::DeviceAuth),
    },
    TaskDef {
        id: TaskId::Threat,
        name: "Threat Detection",
        features: &[
            "request_rate",
            "payload_size",
            "payload_entropy",
            "port_scan_count",
            "geo_risk",
        ],
        target: "is_threat",
        source: Source::Synthetic(Synthetic::Threat),
    },
];

impl TaskId {
    pub const ALL: [TaskId; 5] = [
        TaskId::Intrusion,
        TaskId::Anomaly,
        TaskId::UserAuth,
        TaskId::DeviceAuth,
        TaskId::Threat,
    ];

    /// Returns the static definition of this task.
    pub fn def(self) -> &'static TaskDef {
        &TASKS[self as usize]
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.def().name)
    }
}
