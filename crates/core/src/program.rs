//! Binding for `proggen`, which renders a device-programming script from a
//! user template.

use serde::Serialize;

use crate::error::{GenError, GenResult};

/// Inputs of a programming script. All fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgramBinding {
    pub outfile: String,
    pub template_file: String,
    pub run_docker_file: String,
    pub gotopt_file: String,
    pub bit_file: String,
}

impl ProgramBinding {
    /// Check that every field is set, reporting the first missing flag.
    pub fn validate(&self) -> GenResult<()> {
        let checks = [
            ("bitfile", &self.bit_file),
            ("run-docker", &self.run_docker_file),
            ("gotopt2", &self.gotopt_file),
            ("outfile", &self.outfile),
            ("template", &self.template_file),
        ];
        for (flag, value) in checks {
            if value.is_empty() {
                return Err(GenError::MissingRequired { flag: flag.to_string() });
            }
        }
        Ok(())
    }
}
