//! Layer composition helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::ToneShiftConfig;

/// Configuration sources, from lowest to highest precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Defaults,
    File,
    Environment,
    Cli,
}

impl Layer {
    /// Every source in ascending precedence.
    pub const ASCENDING: [Self; 4] = [Self::Defaults, Self::File, Self::Environment, Self::Cli];

    fn push_onto(self, composer: &mut MergeComposer, value: Value) {
        match self {
            Self::Defaults => composer.push_defaults(value),
            Self::File => composer.push_file(value, None),
            Self::Environment => composer.push_environment(value),
            Self::Cli => composer.push_cli(value),
        }
    }
}

/// Merges `layers` in the order given into a [`ToneShiftConfig`].
pub fn compose(layers: &[(Layer, Value)]) -> ToneShiftConfig {
    let mut composer = MergeComposer::new();
    for (layer, value) in layers {
        layer.push_onto(&mut composer, value.clone());
    }

    ToneShiftConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}
