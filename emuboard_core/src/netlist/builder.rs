// SPDX-License-Identifier: GPL-3.0
// builder.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use indexmap::IndexMap;
use log::{debug, trace};

use super::component::{ComponentKind, TerminalId};
use super::error::{Error, Result};
use super::graph::{self, Netlist, SubcircuitInstance};

/// Parameters handed through to the external nodal solver. They are recorded
/// verbatim and never interpreted here.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    pub frequency: f64,
    pub dynamic_timestep: bool,
    pub dynamic_min_timestep: f64,
    pub nr_loops: u32,
    pub gs_loops: u32,
    pub parallel: u32,
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            frequency: 48000.0,
            dynamic_timestep: false,
            dynamic_min_timestep: 1e-6,
            nr_loops: 250,
            gs_loops: 9,
            parallel: 0,
        }
    }
}

/// Solver hints attached to a single terminal.
#[derive(Clone, Debug, PartialEq)]
pub enum HintKind {
    /// The terminal is deliberately left unconnected.
    NoConnect,

    /// Split the solver matrix at this terminal, modelled as a buffer with
    /// the given input resistance and gain.
    OptimizeFrontier { r_in: f64, gain: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hint {
    pub terminal: TerminalId,
    pub kind: HintKind,
}

/// A reusable sub-circuit: a named body plus its parameters and defaults.
/// The body runs once per instance inside the instance's own namespace.
pub struct SubcircuitDef {
    pub name: &'static str,
    pub params: &'static [(&'static str, f64)],
    pub body: fn(&mut Scope<'_>) -> Result<()>,
}

pub(super) struct Declared {
    pub name: String,
    pub kind: ComponentKind,
}

pub(super) struct PendingAlias {
    pub scope: String,
    pub target: String,
}

pub(super) struct PendingConnection {
    pub scope: String,
    pub refs: Vec<String>,
}

pub(super) struct PendingHint {
    pub scope: String,
    pub reference: String,
    pub kind: HintKind,
}

/// Collects a description. References stay unresolved until `build`, so a
/// description may connect to things it declares further down.
pub struct NetlistBuilder {
    pub(super) name: String,
    pub(super) components: Vec<Declared>,
    pub(super) aliases: IndexMap<String, PendingAlias>,
    pub(super) connections: Vec<PendingConnection>,
    pub(super) models: Vec<String>,
    pub(super) hints: Vec<PendingHint>,
    pub(super) instances: Vec<SubcircuitInstance>,
    pub(super) solver: Option<SolverParams>,
    pub(super) errors: Vec<Error>,
}

impl NetlistBuilder {

    pub fn new(name: &str) -> Self {
        NetlistBuilder {
            name: name.to_string(),
            components: Vec::new(),
            aliases: IndexMap::new(),
            connections: Vec::new(),
            models: Vec::new(),
            hints: Vec::new(),
            instances: Vec::new(),
            solver: None,
            errors: Vec::new(),
        }
    }

    /// Returns the top-level (global) scope.
    pub fn root(&mut self) -> Scope<'_> {
        Scope {
            builder: self,
            prefix: String::new(),
            definition: "",
            params: IndexMap::new(),
        }
    }

    /// Resolves every reference and validates the graph.
    pub fn build(self) -> Result<Netlist> {
        graph::resolve(self)
    }
}

/// A namespace in which a description declares things. Names declared here
/// are qualified with the scope's prefix, e.g. `CALCIO_A.R45`.
pub struct Scope<'a> {
    builder: &'a mut NetlistBuilder,
    prefix: String,
    definition: &'static str,
    params: IndexMap<&'static str, f64>,
}

impl Scope<'_> {

    fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn declare(&mut self, name: &str, kind: ComponentKind) {
        let name = self.qualify(name);
        trace!("declare {name}: {kind:?}");
        self.builder.components.push(Declared { name, kind });
    }

    pub fn res(&mut self, name: &str, ohms: f64) {
        self.declare(name, ComponentKind::Resistor { ohms });
    }

    pub fn cap(&mut self, name: &str, farads: f64) {
        self.declare(name, ComponentKind::Capacitor { farads });
    }

    pub fn diode(&mut self, name: &str, model: &str) {
        self.declare(name, ComponentKind::Diode { model: model.to_string() });
    }

    pub fn bjt(&mut self, name: &str, model: &str) {
        self.declare(name, ComponentKind::Bjt { model: model.to_string() });
    }

    pub fn mosfet(&mut self, name: &str, model: &str) {
        self.declare(name, ComponentKind::Mosfet { model: model.to_string() });
    }

    pub fn opamp(&mut self, name: &str, model: &str) {
        self.declare(name, ComponentKind::OpAmp { model: model.to_string() });
    }

    pub fn vccs(&mut self, name: &str, gain: f64) {
        self.declare(name, ComponentKind::Vccs { gain });
    }

    pub fn afunc(&mut self, name: &str, inputs: usize, expression: &str) {
        self.declare(
            name,
            ComponentKind::AnalogFunction {
                inputs,
                expression: expression.to_string(),
            },
        );
    }

    pub fn analog_input(&mut self, name: &str, volts: f64) {
        self.declare(name, ComponentKind::AnalogInput { volts });
    }

    pub fn ttl_input(&mut self, name: &str, level: bool) {
        self.declare(name, ComponentKind::TtlInput { level });
    }

    pub fn clock(&mut self, name: &str, hz: f64) {
        self.declare(name, ComponentKind::Clock { hz });
    }

    /// Declares a packaged logic or analog IC by part number and pin count.
    pub fn chip(&mut self, name: &str, part: &str, pins: usize) {
        self.declare(
            name,
            ComponentKind::LogicChip {
                part: part.to_string(),
                pins,
            },
        );
    }

    pub fn no_connect(&mut self, name: &str) {
        self.declare(name, ComponentKind::NoConnect);
    }

    /// Registers a named model card. Models are global whatever scope
    /// declares them, and a later declaration of the same name wins.
    pub fn net_model(&mut self, declaration: &str) {
        self.builder.models.push(declaration.to_string());
    }

    /// Joins all the referenced terminals into one net.
    pub fn net_c(&mut self, refs: &[&str]) {
        let refs: Vec<String> = refs.iter().map(|reference| reference.to_string()).collect();
        if refs.len() < 2 {
            self.builder.errors.push(Error::ShortConnection(refs));
            return;
        }
        self.builder.connections.push(PendingConnection {
            scope: self.prefix.clone(),
            refs,
        });
    }

    /// Gives a terminal (or another alias) a name in this scope.
    pub fn alias(&mut self, name: &str, target: &str) {
        let name = self.qualify(name);
        if self.builder.aliases.contains_key(&name) {
            self.builder.errors.push(Error::DuplicateAlias(name));
            return;
        }
        self.builder.aliases.insert(
            name,
            PendingAlias {
                scope: self.prefix.clone(),
                target: target.to_string(),
            },
        );
    }

    pub fn hint(&mut self, reference: &str, kind: HintKind) {
        self.builder.hints.push(PendingHint {
            scope: self.prefix.clone(),
            reference: reference.to_string(),
            kind,
        });
    }

    pub fn optimize_frontier(&mut self, reference: &str, r_in: f64, gain: f64) {
        self.hint(reference, HintKind::OptimizeFrontier { r_in, gain });
    }

    pub fn solver(&mut self, params: SolverParams) {
        self.builder.solver = Some(params);
    }

    /// Reads a parameter of the sub-circuit this scope belongs to.
    pub fn param(&self, name: &str) -> Result<f64> {
        self.params.get(name).copied().ok_or_else(|| Error::UnknownParameter {
            subcircuit: self.definition.to_string(),
            param: name.to_string(),
        })
    }

    /// Instantiates a sub-circuit under `instance`. Overrides are applied in
    /// order on top of the defaults, so a later value for the same parameter
    /// replaces an earlier one.
    pub fn submodel(
        &mut self,
        definition: &SubcircuitDef,
        instance: &str,
        overrides: &[(&str, f64)],
    ) -> Result<()> {
        let mut params: IndexMap<&'static str, f64> = definition.params.iter().copied().collect();
        for (key, value) in overrides {
            match params.get_mut(*key) {
                Some(slot) => *slot = *value,
                None => {
                    return Err(Error::UnknownParameter {
                        subcircuit: definition.name.to_string(),
                        param: key.to_string(),
                    });
                }
            }
        }

        let name = self.qualify(instance);
        debug!("instantiating {} as {name} with {params:?}", definition.name);
        self.builder.instances.push(SubcircuitInstance {
            name: name.clone(),
            definition: definition.name,
            params: params
                .iter()
                .map(|(key, value)| (key.to_string(), *value))
                .collect(),
        });

        let mut child = Scope {
            builder: &mut *self.builder,
            prefix: format!("{name}."),
            definition: definition.name,
            params,
        };
        (definition.body)(&mut child)
    }
}
