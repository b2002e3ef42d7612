use std::fs;

use clap::Parser;
use tempfile::tempdir;
use vivado_gen::commands::{
    collect_project_inputs, load_generator_config, params_binding, write_project_artifacts,
    xprgen_command, ParamsArgs, ProgArgs, XprArgs,
};
use vivado_gen_core::{
    GeneratorConfig, ProgramBinding, ProjectBinding, TemplateRenderer, VhdlStandard,
};

#[test]
fn repeated_flags_keep_command_line_order() {
    let args = XprArgs::try_parse_from([
        "xprgen",
        "--source=z.sv",
        "--define=B",
        "--source=a.sv",
        "--define=A",
        "--generic=N=1",
        "--generic=M=x=y",
    ])
    .expect("parse");

    let inputs = collect_project_inputs(&args, &GeneratorConfig::default()).expect("inputs");
    assert_eq!(inputs.sources.values(), ["z.sv", "a.sv"]);
    assert_eq!(inputs.defines.values(), ["B", "A"]);
    assert_eq!(inputs.generics.to_string(), "N=1;M=x=y");
}

#[test]
fn flags_win_over_config_which_wins_over_defaults() {
    let config = GeneratorConfig {
        fileset_name: "cfg_fs".into(),
        synth_name: "cfg_synth".into(),
        vhdl_standard: "1993".into(),
        ..GeneratorConfig::default()
    };

    let from_config = collect_project_inputs(&XprArgs::default(), &config).expect("inputs");
    assert_eq!(from_config.fileset_name, "cfg_fs");
    assert_eq!(from_config.synth_name, "cfg_synth");
    assert_eq!(from_config.vhdl_standard, VhdlStandard::Vhdl93);

    let args = XprArgs {
        fileset_name: Some("flag_fs".into()),
        vhdl_standard: Some("2019".into()),
        ..XprArgs::default()
    };
    let from_flags = collect_project_inputs(&args, &config).expect("inputs");
    assert_eq!(from_flags.fileset_name, "flag_fs");
    assert_eq!(from_flags.synth_name, "cfg_synth");
    assert_eq!(from_flags.vhdl_standard, VhdlStandard::Vhdl2019);

    let builtin = load_generator_config(None).expect("config");
    let defaults = collect_project_inputs(&XprArgs::default(), &builtin).expect("inputs");
    assert_eq!(defaults.fileset_name, "sources_1");
    assert_eq!(defaults.synth_name, "synth_1");
}

#[test]
fn bad_vhdl_standard_is_rejected() {
    let args = XprArgs { vhdl_standard: Some("87".into()), ..XprArgs::default() };
    let err = collect_project_inputs(&args, &GeneratorConfig::default()).unwrap_err();
    assert!(err.to_string().contains("--vhdl-standard"), "unexpected error: {err}");
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("absent.yaml");
    let err = load_generator_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Failed to load generator config"), "{err:#}");
}

#[test]
fn xprgen_command_writes_to_absolute_outputs() {
    let dir = tempdir().expect("tempdir");
    let out_xpr = dir.path().join("p.tcl");
    let out_pnr = dir.path().join("r.tcl");

    let args = XprArgs {
        sources: vec!["a.sv".into()],
        part: Some("xc7a35t".into()),
        project_name: Some("p".into()),
        top_name: Some("top".into()),
        out_xpr: Some(out_xpr.display().to_string()),
        out_pnr: Some(out_pnr.display().to_string()),
        drc_report: Some("drc.rpt".into()),
        ..XprArgs::default()
    };
    xprgen_command(args).expect("xprgen");

    assert!(fs::read_to_string(&out_xpr).expect("xpr").contains("read_verilog -sv {a.sv}"));
    let pnr = fs::read_to_string(&out_pnr).expect("pnr");
    assert!(pnr.contains("open_run impl_1\nreport_drc -file {drc.rpt}\n"), "{pnr}");
}

#[test]
fn xprgen_command_checks_required_flags_first() {
    let dir = tempdir().expect("tempdir");
    let out_xpr = dir.path().join("p.tcl");
    let args = XprArgs {
        part: Some("xc7a35t".into()),
        out_xpr: Some(out_xpr.display().to_string()),
        ..XprArgs::default()
    };

    let err = xprgen_command(args).unwrap_err();
    assert_eq!(err.to_string(), "param --project-name is required");
    assert!(!out_xpr.exists());
}

#[test]
fn write_project_artifacts_counts_written_files() {
    let dir = tempdir().expect("tempdir");
    let args = XprArgs {
        sources: vec!["a.v".into()],
        out_synth: Some(dir.path().join("s.tcl").display().to_string()),
        custom_filename: Some(dir.path().join("c.tcl").display().to_string()),
        ..XprArgs::default()
    };
    let inputs = collect_project_inputs(&args, &GeneratorConfig::default()).expect("inputs");
    let binding = ProjectBinding::build(inputs, dir.path()).expect("binding");
    let renderer = TemplateRenderer::new().expect("renderer");

    assert_eq!(write_project_artifacts(&renderer, &binding).expect("write"), 2);
    let custom = fs::read_to_string(dir.path().join("c.tcl")).expect("custom");
    assert!(custom.contains("set synth_name {synth_1}\n"), "{custom}");
}

#[test]
fn genparams_cuts_values_at_first_space() {
    let args = ParamsArgs {
        params: vec!["W=8 trailing words".into()],
        generics: vec!["G=1 x".into()],
        verilog_top: Some("top".into()),
        ..ParamsArgs::default()
    };
    let binding = params_binding(&args).expect("binding");
    assert_eq!(binding.params[0].value, "8");
    assert_eq!(binding.values[0].value, "1");
    assert_eq!(binding.verilog_top, "top");
}

#[test]
fn prog_args_map_onto_program_binding() {
    let args = ProgArgs::try_parse_from([
        "proggen",
        "--outfile=o",
        "--template=t",
        "--run-docker=r",
        "--gotopt2=g",
        "--bitfile=b",
    ])
    .expect("parse");
    let binding = ProgramBinding::from(args);
    assert_eq!(binding.run_docker_file, "r");
    assert_eq!(binding.gotopt_file, "g");
    binding.validate().expect("complete");
}
