//! Binding for the `genparams` parameter-override script.

use serde::Serialize;

use crate::error::{GenError, GenResult};
use crate::flags::{KeyValue, KeyValueList};

/// Verilog parameters and VHDL generics to apply to a top-level cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParamsBinding {
    /// VHDL generics. Collected but not yet emitted.
    pub values: Vec<KeyValue>,
    /// Verilog parameters, in command-line order.
    pub params: Vec<KeyValue>,
    pub verilog_top: String,
    pub vhdl_top: String,
}

impl ParamsBinding {
    /// Assemble the binding, refusing a VHDL top since only Verilog
    /// parameter overrides are generated.
    pub fn build(
        generics: KeyValueList,
        params: KeyValueList,
        verilog_top: impl Into<String>,
        vhdl_top: impl Into<String>,
    ) -> GenResult<Self> {
        let vhdl_top = vhdl_top.into();
        if !vhdl_top.is_empty() {
            return Err(GenError::InvalidValue {
                flag: "vhdl-top".to_string(),
                value: vhdl_top,
                reason: "--vhdl-top flag is unimplemented".to_string(),
            });
        }
        Ok(Self {
            values: generics.into_pairs(),
            params: params.into_pairs(),
            verilog_top: verilog_top.into(),
            vhdl_top,
        })
    }
}
