//! Run-configuration command synthesis.
//!
//! A convergence study launches many simulation instances, each configured
//! at build time through CMake definitions. This module renders a
//! reproducible `cmake -D<KEY>=<value> ...` command line from an ordered set
//! of run options, so the exact configuration of every run can be archived
//! next to its diagnostics.
//!
//! Options come from a TOML file:
//!
//! ```toml
//! # bondi_run.toml
//! [options]
//! rmin_in_au = 10.0
//! rmax_in_au = 100.0
//! ncell = 2700
//! ic = "IC_BONDI"
//! ```
//!
//! or from the built-in Bondi accretion preset ([`RunOptions::bondi_preset`]).

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One `-D` definition value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Integer option (cell counts, snapshot counts).
    Int(i64),
    /// Floating-point option. Large and small magnitudes render in
    /// scientific notation so the command stays readable.
    Float(f64),
    /// Identifier option (compile-time selectors such as `EOS_BONDI`).
    Text(String),
    /// Switch option, rendered as CMake `ON`/`OFF`.
    Bool(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Float(v) => write!(f, "{}", fmt_float(*v)),
            OptionValue::Text(v) => write!(f, "{v}"),
            OptionValue::Bool(v) => write!(f, "{}", if *v { "ON" } else { "OFF" }),
        }
    }
}

fn fmt_float(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e6 || v.abs() < 1e-3) {
        format!("{v:e}")
    } else {
        format!("{v}")
    }
}

/// Ordered simulation options for one run configuration.
///
/// Emission order equals insertion order: the preset keeps its canonical
/// order and a TOML file keeps document order, so the rendered command is
/// reproducible byte for byte.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    options: Vec<(String, OptionValue)>,
}

#[derive(Debug, Default, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    options: toml::map::Map<String, toml::Value>,
}

impl RunOptions {
    /// Load run options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file: {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Parse run options from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: OptionsFile =
            toml::from_str(content).context("Failed to parse TOML options")?;

        let mut run = RunOptions::default();
        for (key, value) in file.options {
            let value = match value {
                toml::Value::Integer(v) => OptionValue::Int(v),
                toml::Value::Float(v) => OptionValue::Float(v),
                toml::Value::String(v) => OptionValue::Text(v),
                toml::Value::Boolean(v) => OptionValue::Bool(v),
                other => anyhow::bail!(
                    "unsupported option type for {key}: {}",
                    other.type_str()
                ),
            };
            run.push(key, value);
        }
        Ok(run)
    }

    /// The canonical Bondi accretion setup.
    pub fn bondi_preset() -> Self {
        let mut run = RunOptions::default();
        run.push("rmin_in_au", OptionValue::Float(10.));
        run.push("rmax_in_au", OptionValue::Float(100.));
        run.push("ncell", OptionValue::Int(2700));
        run.push("gamma", OptionValue::Float(1.001));
        run.push("maxtime_in_yr", OptionValue::Float(40.));
        run.push("number_of_snaps", OptionValue::Int(2000));
        run.push("ic", OptionValue::Text("IC_BONDI".into()));
        run.push("eos", OptionValue::Text("EOS_BONDI".into()));
        run.push("boundaries", OptionValue::Text("BOUNDARIES_BONDI".into()));
        run.push("isothermal_temperature_in_k", OptionValue::Float(500.));
        run.push("potential", OptionValue::Text("POTENTIAL_POINT_MASS".into()));
        run.push("g_internal", OptionValue::Float(1.));
        run.push("mass_point_mass_in_msol", OptionValue::Float(18.));
        run.push("bondi_density_in_si", OptionValue::Float(1.0e-16));
        run.push("bondi_pressure_contrast", OptionValue::Float(32.));
        run.push("initial_ionisation_radius_in_au", OptionValue::Float(100.));
        run.push("unit_mass_in_si", OptionValue::Float(2.479e31));
        run.push("unit_length_in_si", OptionValue::Float(1.2e13));
        run.push(
            "ionisation_mode",
            OptionValue::Text("IONISATION_MODE_CONSTANT".into()),
        );
        run.push(
            "ionisation_transition",
            OptionValue::Text("IONISATION_TRANSITION_SMOOTH".into()),
        );
        run.push("ionisation_transition_width_in_au", OptionValue::Float(5.));
        run.push("courant_factor", OptionValue::Float(0.05));
        run.push(
            "riemannsolver_type",
            OptionValue::Text("RIEMANNSOLVER_TYPE_HLLC".into()),
        );
        run
    }

    /// Append one option. Keys keep their given spelling here and are
    /// upper-cased only at emission time.
    pub fn push(&mut self, key: impl Into<String>, value: OptionValue) {
        self.options.push((key.into(), value));
    }

    /// The options, in emission order.
    pub fn options(&self) -> &[(String, OptionValue)] {
        &self.options
    }

    /// Render the reproducible CMake configuration command.
    pub fn cmake_command(&self) -> String {
        let mut cmd = String::from("cmake");
        for (key, value) in &self.options {
            cmd.push_str(&format!(" -D{}={}", key.to_uppercase(), value));
        }
        cmd
    }
}
