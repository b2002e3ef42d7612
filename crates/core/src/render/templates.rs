//! Built-in Handlebars templates.
//!
//! Block tags are kept on the same line as the text that follows them so the
//! output does not depend on standalone-line trimming. TCL braces around
//! paths come from the `braced` helper rather than literal `{`/`}` next to
//! a mustache.

/// Creates the Vivado project and loads every source into it.
pub const PROJECT: &str = r#"# GENERATED FILE, DO NOT EDIT
# Project TCL file
# Project name: "{{ProjectName}}"
# PWD:          "{{Pwd}}"
# XPR path:     "{{OutXpr}}"

create_project {{ProjectName}} -force

# Verilog defines
{{#if Defines}}set_property verilog_define {{braced (joined Defines)}} [get_filesets {{FilesetName}}]
{{/if}}# VHDL generics
{{#if Generics}}set_property generic {{braced (joined Generics)}} [get_filesets {{FilesetName}}]
{{/if}}# end: properties

# SystemVerilog files
# Ordering is important.
{{#each SystemVerilogFiles}}read_verilog{{#if Library}} -library {{Library}}{{/if}} -sv {{braced Name}}
{{/each}}# end: SystemVerilog files

# Verilog files
# Ordering is important.
{{#each VerilogFiles}}read_verilog{{#if Library}} -library {{Library}}{{/if}} {{braced Name}}
{{/each}}# end: Verilog files

# Verilog headers
# Ordering is important.
{{#each Headers}}read_verilog -sv {{braced this}}
{{/each}}# end: Verilog headers

# VHDL files
# Ordering is important.
{{#each VhdlFiles}}read_vhdl{{#if @root.VhdlFlag}} {{@root.VhdlFlag}}{{/if}}{{#if Library}} -library {{Library}}{{/if}} {{braced Name}}
{{/each}}# end: VHDL files

# Verilog include directories
set_property include_dirs [list{{#each IncludeDirs}} {{braced this}}{{/each}}] [get_filesets {{FilesetName}}]

# Constraints files
# Ordering is important here, too.
{{#each Constraints}}read_xdc {{braced this}}
{{/each}}# end: constraints files

# Other files
{{#each OtherFiles}}add_files -norecurse {{braced Name}}
{{#if Library}}set_property library {{Library}} [get_files {{braced Name}}]
{{/if}}{{/each}}# end: other files

{{#if Part}}set_property part {{Part}} [current_project]
{{/if}}set_property top {{TopName}} [current_fileset]
set_property source_mgmt_mode None [current_project]

# end
"#;

/// Runs synthesis and exits non-zero if it failed.
pub const SYNTH: &str = r#"# GENERATED FILE, DO NOT EDIT
# Project synthesis script
# Project name: "{{ProjectName}}"
# PWD:          "{{Pwd}}"
# XPR path:     "{{OutXpr}}"

launch_runs {{SynthName}}
wait_on_run {{SynthName}}
exit [regexp -nocase -- {synth_design (error|failed)} [get_property STATUS [get_runs {{SynthName}}]] match]

# end
"#;

/// Runs implementation through bitstream generation and copies the result.
pub const PNR: &str = r#"# GENERATED FILE, DO NOT EDIT
# Place and route TCL file
# Project name: "{{ProjectName}}"
# PWD:          "{{Pwd}}"
# XPR path:     "{{OutXpr}}"

set_property STEPS.WRITE_BITSTREAM.ARGS.BIN_FILE true [get_runs impl_1]

if { [get_property PROGRESS [get_runs impl_1]] != "100%"} {
  launch_runs {{SynthName}} -quiet

  launch_runs impl_1 -to_step write_bitstream
  wait_on_run impl_1
  puts "Bitstream generation completed"
} else {
  puts "Bitstream generation already complete"
}

if { [get_property PROGRESS [get_runs impl_1]] != "100%"} {
   puts "ERROR: Implementation and bitstream generation step failed."
   exit 1
}

set vivadoDefaultBitstreamFile [ get_property DIRECTORY [current_run] ]/[ get_property top [current_fileset] ].bit
{{#if Bitstream}}file copy -force $vivadoDefaultBitstreamFile {{braced Bitstream}}
{{else}}file copy -force $vivadoDefaultBitstreamFile [pwd]/[current_project].bit
{{/if}}{{#if NeedsImplDesign}}open_run impl_1
{{/if}}{{#if TimingReport}}report_timing_summary -file {{braced TimingReport}}
{{/if}}{{#if UtilizationReport}}report_utilization -file {{braced UtilizationReport}}
{{/if}}{{#if DrcReport}}report_drc -file {{braced DrcReport}}
{{/if}}{{#if SaveDcp}}write_checkpoint -force {{braced SaveDcp}}
{{/if}}# end
"#;

/// Default for `--custom-filename` when no `--custom-template` is given:
/// the binding exported as TCL variables.
pub const CUSTOM: &str = r#"# GENERATED FILE, DO NOT EDIT
# Project settings
set project_name {{braced ProjectName}}
set fileset_name {{braced FilesetName}}
set top_name {{braced TopName}}
set part {{braced Part}}
set synth_name {{braced SynthName}}
set vhdl_standard {{braced VhdlStandard}}
set pwd {{braced Pwd}}
set out_xpr {{braced OutXpr}}
set load_dcp {{braced LoadDcp}}
set save_dcp {{braced SaveDcp}}
set bitstream {{braced Bitstream}}
set timing_report {{braced TimingReport}}
set utilization_report {{braced UtilizationReport}}
set drc_report {{braced DrcReport}}

# end
"#;

/// Per-cell parameter overrides for `genparams`.
pub const PARAMS: &str = r#"# Generated file do not edit.
# VerilogTop: {{VerilogTop}}

{{#each Params}}set_property PARAMETER.{{Key}} {{Value}} [get_cells {{@root.VerilogTop}}]
{{/each}}# End.
"#;
