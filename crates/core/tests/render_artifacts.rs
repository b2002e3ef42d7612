use std::fs;
use std::path::Path;

use tempfile::tempdir;
use vivado_gen_core::{
    GenError, KeyValueList, OutputPaths, ParamsBinding, ProgramBinding, ProjectBinding,
    ProjectInputs, RepeatedValues, Template, TemplateRenderer,
};

fn binding_with(sources: &[&str], outputs: OutputPaths) -> ProjectBinding {
    let inputs = ProjectInputs {
        project_name: "p".into(),
        top_name: "top".into(),
        part: "xc7a35t".into(),
        sources: RepeatedValues::from_values("source", sources.iter().copied()),
        outputs,
        ..ProjectInputs::default()
    };
    ProjectBinding::build(inputs, Path::new("/work")).unwrap()
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack.find(needle).unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
}

#[test]
fn project_script_reads_sources_in_sections_and_order() {
    let renderer = TemplateRenderer::new().unwrap();
    let binding = binding_with(&["a.sv", "b.vhd"], OutputPaths::default());
    let out = renderer.render(Template::Project.name(), &binding).unwrap();

    let create = position(&out, "create_project p -force\n");
    let sv_start = position(&out, "# SystemVerilog files");
    let sv = position(&out, "read_verilog -sv {a.sv}\n");
    let sv_end = position(&out, "# end: SystemVerilog files");
    let vhdl_start = position(&out, "# VHDL files");
    let vhdl = position(&out, "read_vhdl -vhdl2008 {b.vhd}\n");
    let vhdl_end = position(&out, "# end: VHDL files");
    let part = position(&out, "set_property part xc7a35t [current_project]\n");
    let top = position(&out, "set_property top top [current_fileset]\n");

    assert!(create < sv_start && sv_start < sv && sv < sv_end);
    assert!(sv_end < vhdl_start && vhdl_start < vhdl && vhdl < vhdl_end);
    assert!(vhdl_end < part && part < top);
    assert!(out.starts_with("# GENERATED FILE, DO NOT EDIT\n"));
    assert!(out.contains("# PWD:          \"/work\""));
    assert!(!out.contains("verilog_define"), "no defines were given:\n{out}");
}

#[test]
fn library_files_get_a_library_switch() {
    let renderer = TemplateRenderer::new().unwrap();
    let inputs = ProjectInputs {
        project_name: "p".into(),
        top_name: "top".into(),
        library_files: KeyValueList::from_values(
            "library-file",
            ["unisim=prims.vhd", "ip=core.sv", "ip=notes.txt"],
        )
        .unwrap(),
        sources: RepeatedValues::from_values("source", ["top.vhd"]),
        ..ProjectInputs::default()
    };
    let binding = ProjectBinding::build(inputs, Path::new("/work")).unwrap();
    let out = renderer.render(Template::Project.name(), &binding).unwrap();

    assert!(out.contains("read_vhdl -vhdl2008 -library unisim {prims.vhd}\n"), "{out}");
    assert!(out.contains("read_vhdl -vhdl2008 {top.vhd}\n"), "{out}");
    assert!(out.contains("read_verilog -library ip -sv {core.sv}\n"), "{out}");
    assert!(out.contains("add_files -norecurse {notes.txt}\n"), "{out}");
    assert!(out.contains("set_property library ip [get_files {notes.txt}]\n"), "{out}");
    assert!(!out.contains("set_property part"), "empty part is omitted:\n{out}");
}

#[test]
fn defines_generics_and_include_dirs_are_tcl_lists() {
    let renderer = TemplateRenderer::new().unwrap();
    let inputs = ProjectInputs {
        project_name: "p".into(),
        top_name: "top".into(),
        fileset_name: "fs".into(),
        defines: RepeatedValues::from_values("define", ["SIM", "W=8"]),
        generics: KeyValueList::from_values("generic", ["DEPTH=4"]).unwrap(),
        include_dirs: RepeatedValues::from_values("include-dir", ["inc"]),
        headers: RepeatedValues::from_values("header", ["hdr/defs.svh"]),
        dir_depth: 1,
        ..ProjectInputs::default()
    };
    let binding = ProjectBinding::build(inputs, Path::new("/work")).unwrap();
    let out = renderer.render(Template::Project.name(), &binding).unwrap();

    assert!(out.contains("set_property verilog_define {SIM W=8} [get_filesets fs]\n"), "{out}");
    assert!(out.contains("set_property generic {DEPTH=4} [get_filesets fs]\n"), "{out}");
    assert!(out.contains("read_verilog -sv {hdr/defs.svh}\n"), "{out}");
    assert!(
        out.contains("set_property include_dirs [list {../inc} {../hdr}] [get_filesets fs]\n"),
        "{out}"
    );
}

#[test]
fn synth_script_launches_the_named_run() {
    let renderer = TemplateRenderer::new().unwrap();
    let mut binding = binding_with(&["a.sv"], OutputPaths::default());
    binding.synth_name = "synth_fast".into();
    let out = renderer.render(Template::Synth.name(), &binding).unwrap();

    assert!(out.contains("launch_runs synth_fast\nwait_on_run synth_fast\n"), "{out}");
    assert!(out.contains("[get_runs synth_fast]"), "{out}");
}

#[test]
fn pnr_script_copies_bitstream_and_writes_reports() {
    let renderer = TemplateRenderer::new().unwrap();
    let plain = binding_with(&["a.sv"], OutputPaths::default());
    let out = renderer.render(Template::Pnr.name(), &plain).unwrap();
    assert!(out.contains("[pwd]/[current_project].bit\n"), "{out}");
    assert!(!out.contains("open_run"), "{out}");

    let outputs = OutputPaths {
        bitstream: "out/top.bit".into(),
        timing_report: "timing.rpt".into(),
        save_dcp: "routed.dcp".into(),
        ..OutputPaths::default()
    };
    let out = renderer.render(Template::Pnr.name(), &binding_with(&["a.sv"], outputs)).unwrap();
    let copy = position(&out, "file copy -force $vivadoDefaultBitstreamFile {out/top.bit}\n");
    let open = position(&out, "open_run impl_1\n");
    let timing = position(&out, "report_timing_summary -file {timing.rpt}\n");
    let dcp = position(&out, "write_checkpoint -force {routed.dcp}\n");
    assert!(copy < open && open < timing && timing < dcp);
    assert!(!out.contains("report_drc"), "{out}");
}

#[test]
fn empty_output_path_writes_nothing() {
    let dir = tempdir().unwrap();
    let renderer = TemplateRenderer::new().unwrap();
    let binding = binding_with(&["a.sv"], OutputPaths::default());

    let written =
        renderer.write_artifact(Template::Project.name(), &binding, Path::new("")).unwrap();
    assert!(!written);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn rendering_twice_is_byte_identical() {
    let dir = tempdir().unwrap();
    let renderer = TemplateRenderer::new().unwrap();
    let binding = binding_with(&["a.sv", "b.v", "c.vhd", "d.xci"], OutputPaths::default());

    let first = dir.path().join("first.tcl");
    let second = dir.path().join("second.tcl");
    assert!(renderer.write_artifact(Template::Project.name(), &binding, &first).unwrap());
    assert!(renderer.write_artifact(Template::Project.name(), &binding, &second).unwrap());
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn write_artifact_truncates_existing_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("synth.tcl");
    fs::write(&out, "stale contents that are much longer than anything rendered ".repeat(100))
        .unwrap();

    let renderer = TemplateRenderer::new().unwrap();
    let binding = binding_with(&["a.sv"], OutputPaths::default());
    renderer.write_artifact(Template::Synth.name(), &binding, &out).unwrap();

    let body = fs::read_to_string(&out).unwrap();
    assert!(body.starts_with("# GENERATED FILE"));
    assert!(!body.contains("stale"));
}

#[test]
fn write_artifact_reports_unwritable_path() {
    let dir = tempdir().unwrap();
    let renderer = TemplateRenderer::new().unwrap();
    let binding = binding_with(&["a.sv"], OutputPaths::default());
    let out = dir.path().join("missing").join("p.tcl");

    let err = renderer.write_artifact(Template::Project.name(), &binding, &out).unwrap_err();
    assert!(matches!(err, GenError::Io { .. }), "unexpected error: {err}");
}

#[test]
fn custom_template_overrides_builtin_and_can_use_partials() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.tcl.hbs");
    fs::write(&path, "# top is {{TopName}}\n{{> synth}}").unwrap();

    let mut renderer = TemplateRenderer::new().unwrap();
    let binding = binding_with(&["a.sv"], OutputPaths::default());
    let builtin = renderer.render(Template::Custom.name(), &binding).unwrap();
    assert!(builtin.contains("set top_name {top}\n"), "{builtin}");

    renderer.load_custom_template(&path).unwrap();
    let out = renderer.render(Template::Custom.name(), &binding).unwrap();
    assert!(out.starts_with("# top is top\n"), "{out}");
    assert!(out.contains("launch_runs synth_1\n"), "{out}");
}

#[test]
fn broken_custom_template_names_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.hbs");
    fs::write(&path, "{{#if TopName}}never closed").unwrap();

    let mut renderer = TemplateRenderer::new().unwrap();
    let err = renderer.load_custom_template(&path).unwrap_err();
    match err {
        GenError::TemplateParse { name, .. } => assert!(name.ends_with("broken.hbs"), "{name}"),
        other => panic!("unexpected error: {other}"),
    }

    let missing = renderer.load_custom_template(&dir.path().join("nope.hbs")).unwrap_err();
    assert!(matches!(missing, GenError::Io { .. }));
}

#[test]
fn params_script_sets_each_parameter_on_the_top_cell() {
    let renderer = TemplateRenderer::new().unwrap();
    let params = KeyValueList::from_values("param", ["WIDTH=8", "MODE=fast"]).unwrap();
    let binding =
        ParamsBinding::build(KeyValueList::new("generic"), params, "top_i", "").unwrap();
    let out = renderer.render("params", &binding).unwrap();

    let expected = "# Generated file do not edit.\n# VerilogTop: top_i\n\n\
                    set_property PARAMETER.WIDTH 8 [get_cells top_i]\n\
                    set_property PARAMETER.MODE fast [get_cells top_i]\n\
                    # End.\n";
    assert_eq!(out, expected);
}

#[test]
fn vhdl_top_is_refused() {
    let err = ParamsBinding::build(
        KeyValueList::new("generic"),
        KeyValueList::new("param"),
        "",
        "top_e",
    )
    .unwrap_err();
    assert!(err.to_string().contains("--vhdl-top flag is unimplemented"), "{err}");
}

#[test]
fn program_template_is_loaded_from_file_and_rendered() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prog.sh.tpl");
    fs::write(&path, "#!/bin/sh\n{{RunDockerFile}} {{GotoptFile}} -- {{BitFile}}\n").unwrap();

    let binding = ProgramBinding {
        outfile: "prog.sh".into(),
        template_file: path.display().to_string(),
        run_docker_file: "run.sh".into(),
        gotopt_file: "gotopt2".into(),
        bit_file: "top.bit".into(),
    };
    binding.validate().unwrap();

    let mut renderer = TemplateRenderer::new().unwrap();
    let name = renderer.load_template_file(&path).unwrap();
    assert_eq!(name, "prog.sh.tpl");
    assert!(renderer.has_template(&name));
    assert_eq!(renderer.render(&name, &binding).unwrap(), "#!/bin/sh\nrun.sh gotopt2 -- top.bit\n");
}

#[test]
fn program_binding_reports_first_missing_flag() {
    let err = ProgramBinding::default().validate().unwrap_err();
    assert_eq!(err.to_string(), "param --bitfile is required");

    let binding = ProgramBinding {
        bit_file: "b.bit".into(),
        run_docker_file: "r".into(),
        gotopt_file: "g".into(),
        ..ProgramBinding::default()
    };
    assert_eq!(binding.validate().unwrap_err().to_string(), "param --outfile is required");
}
