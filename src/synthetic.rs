use log::info;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::{
    data::{Cell, Table},
    error::Result,
    registry::Synthetic,
};

/// A generated feature column.
#[derive(Debug, Clone, Copy)]
enum Feature {
    /// Uniform over `[low, high)`.
    Real(&'static str, f32, f32),
    /// Uniform over the integers in `[low, high]`.
    Int(&'static str, i32, i32),
}

/// A generated identifier column, never used as a feature.
#[derive(Debug, Clone, Copy)]
enum Ident {
    Username,
    DeviceId,
    IpAddress,
}

struct Schema {
    idents: &'static [(&'static str, Ident)],
    features: &'static [Feature],
    label: &'static str,
}

const USER_AUTH: Schema = Schema {
    idents: &[("username", Ident::Username)],
    features: &[
        Feature::Real("typing_speed", 20., 120.),
        Feature::Real("keystroke_interval", 0.05, 0.5),
        Feature::Real("mouse_velocity", 100., 1500.),
        Feature::Int("login_hour", 0, 23),
        Feature::Int("failed_attempts", 0, 5),
    ],
    label: "is_impostor",
};

const DEVICE_AUTH: Schema = Schema {
    idents: &[
        ("device_id", Ident::DeviceId),
        ("ip_address", Ident::IpAddress),
    ],
    features: &[
        Feature::Real("signal_strength", -90., -30.),
        Feature::Real("connection_time", 0.1, 10.),
        Feature::Real("packet_loss", 0., 0.2),
        Feature::Int("firmware_age_days", 0, 1000),
        Feature::Int("auth_attempts", 1, 10),
    ],
    label: "is_rogue",
};

const THREAT: Schema = Schema {
    idents: &[("source_ip", Ident::IpAddress)],
    features: &[
        Feature::Real("request_rate", 1., 1000.),
        Feature::Real("payload_size", 64., 65535.),
        Feature::Real("payload_entropy", 0., 8.),
        Feature::Int("port_scan_count", 0, 50),
        Feature::Real("geo_risk", 0., 1.),
    ],
    label: "is_threat",
};

const NAMES: [&str; 12] = [
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy", "mallory",
    "oscar",
];

impl Synthetic {
    pub const ALL: [Synthetic; 3] = [Synthetic::UserAuth, Synthetic::DeviceAuth, Synthetic::Threat];

    fn schema(self) -> &'static Schema {
        match self {
            Synthetic::UserAuth => &USER_AUTH,
            Synthetic::DeviceAuth => &DEVICE_AUTH,
            Synthetic::Threat => &THREAT,
        }
    }
}

/// Generates a synthetic table of independent uniform features and fair coin labels.
///
/// # Arguments
/// * `kind` - Which table to generate.
/// * `rows` - The amount of rows.
/// * `rng` - The source of randomness.
///
/// # Returns
/// The generated table, identifier columns first, then the features and the label last.
pub fn generate<R: Rng>(kind: Synthetic, rows: usize, rng: &mut R) -> Result<Table> {
    let schema = kind.schema();
    let width = schema.idents.len() + schema.features.len() + 1;
    let mut columns: Vec<(&str, Vec<Cell>)> = Vec::with_capacity(width);

    for &(name, ident) in schema.idents {
        let cells = (0..rows).map(|_| Cell::Text(fake(ident, rng))).collect();
        columns.push((name, cells));
    }

    for &feature in schema.features {
        let (name, cells) = match feature {
            Feature::Real(name, low, high) => {
                let dist = Uniform::new(low, high)?;
                let cells = (0..rows).map(|_| Cell::Number(dist.sample(rng))).collect();
                (name, cells)
            }
            Feature::Int(name, low, high) => {
                let dist = Uniform::new_inclusive(low, high)?;
                let cells = (0..rows)
                    .map(|_| Cell::Number(dist.sample(rng) as f32))
                    .collect();
                (name, cells)
            }
        };

        columns.push((name, cells));
    }

    let labels = (0..rows)
        .map(|_| Cell::Number(rng.random_bool(0.5) as u8 as f32))
        .collect();
    columns.push((schema.label, labels));

    info!("generated {rows} synthetic {kind:?} rows");
    Table::from_columns(columns)
}

fn fake<R: Rng>(ident: Ident, rng: &mut R) -> String {
    match ident {
        Ident::Username => {
            let name = NAMES[rng.random_range(0..NAMES.len())];
            format!("{name}{}", rng.random_range(10..100))
        }
        Ident::DeviceId => format!("{:012x}", rng.random_range(0..1u64 << 48)),
        Ident::IpAddress => {
            let [a, b, c, d]: [u8; 4] = rng.random();
            format!("{a}.{b}.{c}.{d}")
        }
    }
}
