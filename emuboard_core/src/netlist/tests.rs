// SPDX-License-Identifier: GPL-3.0
// tests.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use super::units::{cap_n, res_k};
use super::*;

static FILTER: SubcircuitDef = SubcircuitDef {
    name: "filter",
    params: &[("C", 10.0), ("R", 1.0)],
    body: filter_body,
};

fn filter_body(s: &mut Scope<'_>) -> Result<()> {
    s.res("R1", res_k(s.param("R")?));
    s.cap("C1", cap_n(s.param("C")?));
    s.alias("INPUT", "R1.1");
    s.alias("OUTPUT", "R1.2");
    s.alias("GND", "C1.2");
    s.net_c(&["OUTPUT", "C1.1"]);
    Ok(())
}

static OUTER: SubcircuitDef = SubcircuitDef {
    name: "outer",
    params: &[],
    body: outer_body,
};

fn outer_body(s: &mut Scope<'_>) -> Result<()> {
    s.submodel(&FILTER, "F", &[])?;
    s.alias("IN", "F.INPUT");
    s.alias("OUT", "F.OUTPUT");
    s.net_c(&["F.GND", "GND"]);
    Ok(())
}

fn build_with<F>(describe: F) -> Result<Netlist>
where
    F: FnOnce(&mut Scope<'_>) -> Result<()>,
{
    let mut builder = NetlistBuilder::new("test");
    describe(&mut builder.root())?;
    builder.build()
}

#[test]
fn two_resistors_in_series_should_share_a_net() {

    let netlist = build_with(|s| {
        s.analog_input("V", 5.0);
        s.res("R1", 1000.0);
        s.res("R2", 1000.0);
        s.net_c(&["V", "R1.1"]);
        s.net_c(&["R1.2", "R2.1"]);
        s.net_c(&["R2.2", "GND"]);
        Ok(())
    })
    .unwrap();

    assert!(netlist.connected("R1.2", "R2.1"));
    assert!(!netlist.connected("R1.1", "R2.2"));
    assert_eq!(netlist.net_of("R2.2").unwrap().name(), "GND");
    assert_eq!(netlist.nets().len(), 3);
}

#[test]
fn connections_should_be_transitive() {

    let netlist = build_with(|s| {
        s.res("R1", 1.0);
        s.res("R2", 1.0);
        s.res("R3", 1.0);
        s.net_c(&["R1.1", "R2.1"]);
        s.net_c(&["R2.1", "R3.1"]);
        s.net_c(&["R1.2", "R2.2", "R3.2", "GND"]);
        Ok(())
    })
    .unwrap();

    assert!(netlist.connected("R1.1", "R3.1"));
    assert_eq!(netlist.net_of("R1.1").unwrap().terminals().len(), 3);
}

#[test]
fn forward_references_should_resolve() {

    let netlist = build_with(|s| {
        s.net_c(&["LATER.1", "GND"]);
        s.net_c(&["LATER.2", "GND"]);
        s.res("LATER", 10.0);
        Ok(())
    })
    .unwrap();

    assert!(netlist.connected("LATER.1", "LATER.2"));
}

#[test]
fn sub_circuit_aliases_should_resolve_from_parent_scope() {

    let netlist = build_with(|s| {
        s.analog_input("V", 5.0);
        s.submodel(&FILTER, "F1", &[])?;
        s.net_c(&["V", "F1.INPUT"]);
        s.net_c(&["F1.GND", "GND"]);
        s.alias("OUT", "F1.OUTPUT");
        Ok(())
    })
    .unwrap();

    assert!(netlist.connected("V", "F1.R1.1"));
    assert!(netlist.connected("OUT", "F1.C1.1"));
    assert!(netlist.connected("F1.C1.2", "GND"));
    assert_eq!(netlist.net_of("F1.R1.2").unwrap().name(), "OUT");
}

#[test]
fn names_should_fall_back_to_the_global_scope() {

    // "GND" inside OUTER.F resolves to the local alias; inside OUTER it
    // walks up to the global ground.
    let netlist = build_with(|s| {
        s.analog_input("V", 5.0);
        s.submodel(&OUTER, "OUTER", &[])?;
        s.net_c(&["V", "OUTER.IN"]);
        s.res("LOAD", 1.0);
        s.net_c(&["OUTER.OUT", "LOAD.1"]);
        s.net_c(&["LOAD.2", "GND"]);
        Ok(())
    })
    .unwrap();

    assert!(netlist.connected("OUTER.F.C1.2", "GND"));
    assert!(netlist.connected("OUTER.OUT", "OUTER.F.R1.2"));
}

#[test]
fn parameter_overrides_should_apply_in_order() {

    let netlist = build_with(|s| {
        s.submodel(&FILTER, "A", &[("C", 22.0), ("C", 47.0)])?;
        s.submodel(&FILTER, "B", &[])?;
        s.net_c(&["A.INPUT", "A.GND", "B.INPUT", "B.GND", "GND"]);
        Ok(())
    })
    .unwrap();

    let a = netlist.instance("A").unwrap();
    assert_eq!(a.param("C"), Some(47.0));
    assert_eq!(a.param("R"), Some(1.0));
    assert_eq!(netlist.instance("B").unwrap().param("C"), Some(10.0));

    match netlist.component("A.C1").unwrap().kind() {
        ComponentKind::Capacitor { farads } => assert!((farads - 47e-9).abs() < 1e-18),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn overriding_an_undeclared_parameter_should_fail() {

    let result = build_with(|s| s.submodel(&FILTER, "A", &[("L", 1.0)]));

    assert_eq!(
        result.unwrap_err(),
        Error::UnknownParameter {
            subcircuit: "filter".to_string(),
            param: "L".to_string()
        }
    );
}

#[test]
fn reading_an_undeclared_parameter_should_fail() {

    let result = build_with(|s| s.param("X").map(|_| ()));

    assert!(matches!(result, Err(Error::UnknownParameter { .. })));
}

#[test]
fn unknown_references_should_fail() {

    let result = build_with(|s| {
        s.res("R1", 1.0);
        s.net_c(&["R1.1", "NOWHERE"]);
        s.net_c(&["R1.2", "GND"]);
        Ok(())
    });

    assert_eq!(
        result.unwrap_err(),
        Error::UnknownReference {
            reference: "NOWHERE".to_string(),
            scope: String::new()
        }
    );
}

#[test]
fn unknown_pins_should_fail() {

    let result = build_with(|s| {
        s.res("R1", 1.0);
        s.net_c(&["R1.3", "GND"]);
        Ok(())
    });

    assert!(matches!(result, Err(Error::UnknownReference { .. })));
}

#[test]
fn duplicate_components_should_fail() {

    let result = build_with(|s| {
        s.res("R1", 1.0);
        s.cap("R1", 1.0);
        Ok(())
    });

    assert_eq!(result.unwrap_err(), Error::DuplicateComponent("R1".to_string()));
}

#[test]
fn duplicate_aliases_should_fail() {

    let result = build_with(|s| {
        s.res("R1", 1.0);
        s.net_c(&["R1.1", "R1.2", "GND"]);
        s.alias("X", "R1.1");
        s.alias("X", "R1.2");
        Ok(())
    });

    assert_eq!(result.unwrap_err(), Error::DuplicateAlias("X".to_string()));
}

#[test]
fn alias_cycles_should_fail() {

    let result = build_with(|s| {
        s.alias("A", "B");
        s.alias("B", "A");
        s.res("R1", 1.0);
        s.net_c(&["R1.1", "A"]);
        s.net_c(&["R1.2", "GND"]);
        Ok(())
    });

    assert!(matches!(result, Err(Error::AliasCycle(_))));
}

#[test]
fn single_terminal_connections_should_fail() {

    let result = build_with(|s| {
        s.res("R1", 1.0);
        s.net_c(&["R1.1"]);
        Ok(())
    });

    assert_eq!(
        result.unwrap_err(),
        Error::ShortConnection(vec!["R1.1".to_string()])
    );
}

#[test]
fn a_terminal_connected_to_itself_should_fail() {

    let result = build_with(|s| {
        s.res("R1", 1.0);
        s.net_c(&["R1.1", "R1.1"]);
        s.net_c(&["R1.2", "GND"]);
        Ok(())
    });

    assert_eq!(result.unwrap_err(), Error::DegenerateNet("R1.1".to_string()));
}

#[test]
fn floating_analog_terminals_should_fail() {

    let result = build_with(|s| {
        s.res("R1", 1.0);
        s.net_c(&["R1.1", "GND"]);
        Ok(())
    });

    assert_eq!(result.unwrap_err(), Error::FloatingTerminal("R1.2".to_string()));
}

#[test]
fn floating_logic_pins_should_be_reported_not_rejected() {

    let netlist = build_with(|s| {
        s.chip("IC1", "7414", 14);
        s.net_c(&["IC1.7", "GND"]);
        s.hint("IC1.3", HintKind::NoConnect);
        Ok(())
    })
    .unwrap();

    assert_eq!(netlist.floating_terminals().len(), 13);
    let hint = &netlist.hints()[0];
    assert_eq!(netlist.terminal_name(hint.terminal), "IC1.3");
    assert_eq!(hint.kind, HintKind::NoConnect);
}

#[test]
fn models_should_resolve_by_name_or_inline() {

    let netlist = build_with(|s| {
        s.net_model("QX NPN(BF=200)");
        s.bjt("Q1", "QX");
        s.mosfet("M1", "NMOS(VTO=-3)");
        s.diode("D1", "1N914");
        s.net_c(&["Q1.B", "Q1.C", "Q1.E", "M1.D", "M1.G", "M1.S", "D1.A", "D1.K", "GND"]);
        Ok(())
    })
    .unwrap();

    assert_eq!(netlist.component("Q1").unwrap().model().unwrap().param("BF"), Some(200.0));
    assert_eq!(netlist.component("M1").unwrap().model().unwrap().param("VTO"), Some(-3.0));
    assert_eq!(netlist.component("D1").unwrap().model().unwrap().kind(), "D");
}

#[test]
fn unknown_models_should_fail() {

    let result = build_with(|s| {
        s.bjt("Q1", "NOPE");
        s.net_c(&["Q1.B", "Q1.C", "Q1.E", "GND"]);
        Ok(())
    });

    assert_eq!(result.unwrap_err(), Error::UnknownModel("NOPE".to_string()));
}

#[test]
fn solver_params_should_be_carried_verbatim() {

    let params = SolverParams {
        frequency: 1000.0,
        dynamic_timestep: true,
        dynamic_min_timestep: 2e-5,
        nr_loops: 300,
        gs_loops: 10,
        parallel: 2,
    };
    let expected = params.clone();

    let netlist = build_with(move |s| {
        s.solver(params);
        Ok(())
    })
    .unwrap();

    assert_eq!(netlist.solver_params(), &expected);
}

#[test]
fn logic_inputs_should_be_listed_in_declaration_order() {

    let netlist = build_with(|s| {
        s.ttl_input("B", false);
        s.analog_input("V", 5.0);
        s.ttl_input("A", false);
        Ok(())
    })
    .unwrap();

    let names: Vec<&str> = netlist.logic_inputs().map(|input| input.name()).collect();
    assert_eq!(names, vec!["B", "A"]);
}
