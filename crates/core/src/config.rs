use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::binding::ProjectInputs;
use crate::error::{GenError, GenResult};

pub const DEFAULT_FILESET_NAME: &str = "sources_1";
pub const DEFAULT_SYNTH_NAME: &str = "synth_1";

/// A flag that the required-field policy can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequiredField {
    Part,
    ProjectName,
    TopName,
    /// At least one `--source` or `--library-file`.
    Source,
}

impl RequiredField {
    pub fn flag(&self) -> &'static str {
        match self {
            RequiredField::Part => "part",
            RequiredField::ProjectName => "project-name",
            RequiredField::TopName => "top-name",
            RequiredField::Source => "source",
        }
    }

    fn is_satisfied_by(&self, inputs: &ProjectInputs) -> bool {
        match self {
            RequiredField::Part => !inputs.part.is_empty(),
            RequiredField::ProjectName => !inputs.project_name.is_empty(),
            RequiredField::TopName => !inputs.top_name.is_empty(),
            RequiredField::Source => {
                !inputs.sources.is_empty() || !inputs.library_files.is_empty()
            }
        }
    }
}

/// The set of flags `xprgen` refuses to run without.
///
/// Defaults to part, project name, top name and at least one source. A
/// config file may narrow or widen it; an empty list disables validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredPolicy {
    fields: Vec<RequiredField>,
}

impl Default for RequiredPolicy {
    fn default() -> Self {
        Self::new(vec![
            RequiredField::Part,
            RequiredField::ProjectName,
            RequiredField::TopName,
            RequiredField::Source,
        ])
    }
}

impl RequiredPolicy {
    pub fn new(fields: Vec<RequiredField>) -> Self {
        Self { fields }
    }

    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn fields(&self) -> &[RequiredField] {
        &self.fields
    }

    /// Report the first unmet requirement, in policy order.
    pub fn check(&self, inputs: &ProjectInputs) -> GenResult<()> {
        match self.fields.iter().find(|field| !field.is_satisfied_by(inputs)) {
            Some(field) => Err(GenError::MissingRequired { flag: field.flag().to_string() }),
            None => Ok(()),
        }
    }
}

/// VHDL language revision passed to `read_vhdl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VhdlStandard {
    Vhdl93,
    #[default]
    Vhdl2008,
    Vhdl2019,
}

impl VhdlStandard {
    /// The `read_vhdl` switch selecting this revision; 93 is Vivado's default.
    pub fn read_flag(&self) -> &'static str {
        match self {
            VhdlStandard::Vhdl93 => "",
            VhdlStandard::Vhdl2008 => "-vhdl2008",
            VhdlStandard::Vhdl2019 => "-vhdl2019",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VhdlStandard::Vhdl93 => "1993",
            VhdlStandard::Vhdl2008 => "2008",
            VhdlStandard::Vhdl2019 => "2019",
        }
    }
}

impl fmt::Display for VhdlStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VhdlStandard {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "93" | "1993" => Ok(VhdlStandard::Vhdl93),
            "08" | "2008" => Ok(VhdlStandard::Vhdl2008),
            "19" | "2019" => Ok(VhdlStandard::Vhdl2019),
            other => Err(GenError::InvalidValue {
                flag: "vhdl-standard".to_string(),
                value: other.to_string(),
                reason: "expected one of 1993, 2008, 2019".to_string(),
            }),
        }
    }
}

/// Defaults for `xprgen`, optionally loaded from a JSON or YAML file.
///
/// Explicit flags always win over values from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Fileset that sources and properties are attached to.
    pub fileset_name: String,
    /// VHDL revision, as accepted by `--vhdl-standard`.
    pub vhdl_standard: String,
    /// Name of the synthesis run the scripts launch.
    pub synth_name: String,
    /// Flags that must be present.
    pub required: RequiredPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            fileset_name: DEFAULT_FILESET_NAME.to_string(),
            vhdl_standard: VhdlStandard::default().as_str().to_string(),
            synth_name: DEFAULT_SYNTH_NAME.to_string(),
            required: RequiredPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> GenResult<Self> {
        let body = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        let parsed = if is_json {
            serde_json::from_str(&body).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&body).map_err(|e| e.to_string())
        };
        let config: GeneratorConfig =
            parsed.map_err(|reason| GenError::Config { path: path.to_path_buf(), reason })?;
        log::debug!("loaded generator config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
