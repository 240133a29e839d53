//! JSON screen definition format.
//!
//! ```json
//! {
//!   "front_width": 150.0,
//!   "front_height": 150.0,
//!   "tilt": 90.0,
//!   "azimuth": 0.0,
//!   "openings": [
//!     { "kind": "square", "width": 130.0, "height": 130.0, "depth": 100.0 }
//!   ],
//!   "config": { "method": "analytic" }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::aperture::{ApertureParams, ApertureSpec, ScreenAssembly};
use crate::sim::config::TransmittanceConfig;

/// One opening of a screen definition. Orientation fields are ignored; openings
/// always follow the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningDefinition {
    pub kind: String,
    #[serde(flatten)]
    pub params: ApertureParams,
}

/// Screen block as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenDefinition {
    /// Front panel width [mm].
    pub front_width: f64,
    /// Front panel height [mm].
    pub front_height: f64,
    #[serde(default = "default_tilt")]
    pub tilt: f64,
    #[serde(default)]
    pub azimuth: f64,
    pub openings: Vec<OpeningDefinition>,
    #[serde(default)]
    pub config: TransmittanceConfig,
}

fn default_tilt() -> f64 {
    90.0
}

impl ScreenDefinition {
    /// Validates every opening and builds the assembly, oriented like the panel.
    pub fn to_assembly(&self) -> Result<ScreenAssembly> {
        let openings = self
            .openings
            .iter()
            .enumerate()
            .map(|(i, o)| {
                ApertureSpec::build(&o.kind, &o.params)
                    .with_context(|| format!("Invalid opening {i} ({})", o.kind))
            })
            .collect::<Result<Vec<_>>>()?;
        let assembly = ScreenAssembly::oriented(
            &openings,
            self.front_width,
            self.front_height,
            self.tilt,
            self.azimuth,
        )
        .context("Invalid screen block")?;
        Ok(assembly)
    }
}

/// Reads a screen definition from a JSON file.
pub fn read_screen_definition(path: &Path) -> Result<ScreenDefinition> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let definition: ScreenDefinition = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize screen from: {}", path.display()))?;

    Ok(definition)
}

/// Writes a screen definition to a JSON file.
pub fn write_screen_definition(path: &Path, definition: &ScreenDefinition) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, definition)
        .with_context(|| format!("Failed to serialize screen to: {}", path.display()))?;

    Ok(())
}

pub fn to_screen_string(definition: &ScreenDefinition) -> Result<String> {
    serde_json::to_string_pretty(definition).context("Failed to serialize screen to string")
}

pub fn from_screen_string(json: &str) -> Result<ScreenDefinition> {
    serde_json::from_str(json).context("Failed to deserialize screen from string")
}
