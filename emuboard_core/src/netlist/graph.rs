// SPDX-License-Identifier: GPL-3.0
// graph.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use super::builder::{Declared, Hint, NetlistBuilder, PendingAlias, SolverParams};
use super::component::{Component, ComponentKind, TerminalId};
use super::error::{Error, Result};
use super::model::{DeviceModel, BUILTIN_MODELS};

/// The global ground node, always present.
pub const GROUND: &str = "GND";

// Deep enough for any sane chain of aliases through nested sub-circuits.
const MAX_ALIAS_DEPTH: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NetId(usize);

impl NetId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A set of terminals joined together.
#[derive(Clone, Debug)]
pub struct Net {
    id: NetId,
    name: String,
    terminals: Vec<TerminalId>,
}

impl Net {

    pub fn id(&self) -> NetId {
        self.id
    }

    /// Ground's net is called GND. Otherwise nets take the shallowest alias
    /// that lands on them, or failing that the name of their first terminal.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terminals(&self) -> &[TerminalId] {
        &self.terminals
    }
}

/// A record of one sub-circuit instantiation and its effective parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SubcircuitInstance {
    pub(super) name: String,
    pub(super) definition: &'static str,
    pub(super) params: IndexMap<String, f64>,
}

impl SubcircuitInstance {

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &'static str {
        self.definition
    }

    pub fn param(&self, key: &str) -> Option<f64> {
        self.params.get(key).copied()
    }
}

/// Union-find over terminal indices, with path halving and union by rank.
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {

    fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

/// Strips the innermost namespace from a scope prefix, so `A.B.` becomes
/// `A.` and `A.` becomes the global scope.
fn parent_scope(scope: &str) -> &str {
    let trimmed = scope.strip_suffix('.').unwrap_or(scope);
    match trimmed.rfind('.') {
        Some(dot) => &scope[..=dot],
        None => "",
    }
}

/// Finds the terminal a name refers to: an alias, a component with a default
/// terminal, or `device.pin`.
fn lookup_terminal<F>(components: &IndexMap<String, Component>, qualified: &str, mut alias: F) -> Result<Option<TerminalId>>
where
    F: FnMut(&str) -> Option<Result<TerminalId>>,
{
    if let Some(resolved) = alias(qualified) {
        return resolved.map(Some);
    }
    if let Some(component) = components.get(qualified) {
        return Ok(component
            .kind
            .default_terminal()
            .and_then(|pin| component.terminal(pin)));
    }
    if let Some((device, pin)) = qualified.rsplit_once('.') {
        if let Some(component) = components.get(device) {
            return Ok(component.terminal(pin));
        }
    }
    Ok(None)
}

struct Resolver<'a> {
    components: &'a IndexMap<String, Component>,
    aliases: &'a IndexMap<String, PendingAlias>,
}

impl Resolver<'_> {

    /// Looks `reference` up in `scope`, then in each enclosing scope out to
    /// the global one.
    fn resolve(&self, scope: &str, reference: &str) -> Result<TerminalId> {
        self.resolve_from(scope, reference, 0)
    }

    fn resolve_from(&self, scope: &str, reference: &str, depth: usize) -> Result<TerminalId> {
        let mut current = scope;
        loop {
            let qualified = format!("{current}{reference}");
            let found = lookup_terminal(self.components, &qualified, |name| {
                self.aliases.get(name).map(|alias| {
                    if depth >= MAX_ALIAS_DEPTH {
                        return Err(Error::AliasCycle(name.to_string()));
                    }
                    self.resolve_from(&alias.scope, &alias.target, depth + 1)
                })
            })?;
            if let Some(terminal) = found {
                return Ok(terminal);
            }
            if current.is_empty() {
                return Err(Error::UnknownReference {
                    reference: reference.to_string(),
                    scope: scope.to_string(),
                });
            }
            current = parent_scope(current);
        }
    }
}

fn resolve_model(models: &IndexMap<String, DeviceModel>, reference: &str) -> Result<DeviceModel> {
    if reference.contains('(') {
        return DeviceModel::parse(reference);
    }
    models
        .get(reference)
        .cloned()
        .ok_or_else(|| Error::UnknownModel(reference.to_string()))
}

/// Turns a finished description into a validated graph.
pub(super) fn resolve(builder: NetlistBuilder) -> Result<Netlist> {
    let NetlistBuilder {
        name,
        components: declared,
        aliases,
        connections,
        models: model_declarations,
        hints,
        instances,
        solver,
        errors,
    } = builder;

    if let Some(error) = errors.into_iter().next() {
        return Err(error);
    }

    let mut models = IndexMap::new();
    for (model_name, card) in BUILTIN_MODELS {
        models.insert(model_name.to_string(), DeviceModel::parse(card)?);
    }
    for declaration in &model_declarations {
        let (model_name, model) = DeviceModel::parse_named(declaration)?;
        models.insert(model_name, model);
    }

    // Ground is implicit unless the description declares it itself.
    let implicit_ground = (!declared.iter().any(|component| component.name == GROUND)).then(|| Declared {
        name: GROUND.to_string(),
        kind: ComponentKind::Ground,
    });

    let mut components: IndexMap<String, Component> = IndexMap::new();
    let mut owners: Vec<usize> = Vec::new();
    for Declared { name: component_name, kind } in implicit_ground.into_iter().chain(declared) {
        if components.contains_key(&component_name) {
            return Err(Error::DuplicateComponent(component_name));
        }
        let model = match kind.model_ref() {
            Some(reference) => Some(resolve_model(&models, reference)?),
            None => None,
        };
        let index = components.len();
        let terminals = kind
            .terminal_names()
            .into_iter()
            .map(|pin| {
                let id = TerminalId(owners.len());
                owners.push(index);
                (pin, id)
            })
            .collect();
        components.insert(
            component_name.clone(),
            Component {
                name: component_name,
                kind,
                terminals,
                model,
            },
        );
    }

    let resolver = Resolver {
        components: &components,
        aliases: &aliases,
    };

    let mut sets = DisjointSet::new(owners.len());
    let mut connected = vec![false; owners.len()];
    for connection in &connections {
        let terminals = connection
            .refs
            .iter()
            .map(|reference| resolver.resolve(&connection.scope, reference))
            .collect::<Result<Vec<TerminalId>>>()?;
        for pair in terminals.windows(2) {
            sets.union(pair[0].0, pair[1].0);
        }
        for terminal in &terminals {
            connected[terminal.0] = true;
        }
    }

    let mut resolved_aliases = IndexMap::new();
    for (alias_name, alias) in &aliases {
        resolved_aliases.insert(alias_name.clone(), resolver.resolve(&alias.scope, &alias.target)?);
    }

    let resolved_hints = hints
        .into_iter()
        .map(|hint| {
            resolver.resolve(&hint.scope, &hint.reference).map(|terminal| Hint {
                terminal,
                kind: hint.kind,
            })
        })
        .collect::<Result<Vec<Hint>>>()?;

    // Group connected terminals by root, numbering nets in order of their
    // lowest terminal.
    let mut nets: Vec<Net> = Vec::new();
    let mut net_of_root: HashMap<usize, NetId> = HashMap::new();
    let mut net_of_terminal: Vec<Option<NetId>> = vec![None; owners.len()];
    for (index, slot) in net_of_terminal.iter_mut().enumerate() {
        if !connected[index] {
            continue;
        }
        let root = sets.find(index);
        let id = *net_of_root.entry(root).or_insert_with(|| {
            let id = NetId(nets.len());
            nets.push(Net {
                id,
                name: String::new(),
                terminals: Vec::new(),
            });
            id
        });
        nets[id.0].terminals.push(TerminalId(index));
        *slot = Some(id);
    }

    let names = NameTable {
        components: &components,
        owners: &owners,
    };

    if let Some(ground) = components.get(GROUND).and_then(|component| component.terminal("Q")) {
        if let Some(id) = net_of_terminal[ground.0] {
            nets[id.0].name = GROUND.to_string();
        }
    }
    let mut by_depth: Vec<(&String, &TerminalId)> = resolved_aliases.iter().collect();
    by_depth.sort_by_key(|(alias_name, _)| alias_name.matches('.').count());
    for (alias_name, terminal) in by_depth {
        if let Some(id) = net_of_terminal[terminal.0] {
            if nets[id.0].name.is_empty() {
                nets[id.0].name = alias_name.clone();
            }
        }
    }
    for net in &mut nets {
        if net.name.is_empty() {
            net.name = names.terminal_name(net.terminals[0]);
        }
    }

    for net in &nets {
        if net.terminals.len() < 2 {
            return Err(Error::DegenerateNet(net.name.clone()));
        }
    }

    let mut floating = Vec::new();
    for component in components.values() {
        for (_, terminal) in component.terminals() {
            if net_of_terminal[terminal.0].is_some() {
                continue;
            }
            if component.kind.is_analog_element() {
                return Err(Error::FloatingTerminal(names.terminal_name(terminal)));
            }
            floating.push(terminal);
        }
    }

    debug!(
        "netlist {name}: {} components, {} nets, {} floating logic pins",
        components.len(),
        nets.len(),
        floating.len()
    );

    Ok(Netlist {
        name,
        components,
        owners,
        nets,
        net_of_terminal,
        aliases: resolved_aliases,
        models,
        instances,
        hints: resolved_hints,
        solver: solver.unwrap_or_default(),
        floating,
    })
}

struct NameTable<'a> {
    components: &'a IndexMap<String, Component>,
    owners: &'a [usize],
}

impl NameTable<'_> {
    fn terminal_name(&self, terminal: TerminalId) -> String {
        terminal_name(self.components, self.owners, terminal)
    }
}

fn terminal_name(components: &IndexMap<String, Component>, owners: &[usize], terminal: TerminalId) -> String {
    let owner = owners
        .get(terminal.0)
        .and_then(|index| components.get_index(*index))
        .map(|(_, component)| component);
    match owner {
        Some(component) => {
            let pin = component
                .terminals()
                .find(|(_, id)| *id == terminal)
                .map(|(pin, _)| pin)
                .unwrap_or("?");
            format!("{}.{}", component.name(), pin)
        }
        None => format!("#{}", terminal.0),
    }
}

/// A resolved, validated netlist. This is what gets handed to the solver.
#[derive(Clone, Debug)]
pub struct Netlist {
    name: String,
    components: IndexMap<String, Component>,
    owners: Vec<usize>,
    nets: Vec<Net>,
    net_of_terminal: Vec<Option<NetId>>,
    aliases: IndexMap<String, TerminalId>,
    models: IndexMap<String, DeviceModel>,
    instances: Vec<SubcircuitInstance>,
    hints: Vec<Hint>,
    solver: SolverParams,
    floating: Vec<TerminalId>,
}

impl Netlist {

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn net(&self, id: NetId) -> &Net {
        &self.nets[id.0]
    }

    /// Resolves a fully qualified reference as seen from the global scope.
    pub fn resolve(&self, reference: &str) -> Option<TerminalId> {
        lookup_terminal(&self.components, reference, |name| self.aliases.get(name).map(|id| Ok(*id)))
            .ok()
            .flatten()
    }

    pub fn net_of_terminal(&self, terminal: TerminalId) -> Option<&Net> {
        self.net_of_terminal
            .get(terminal.0)
            .copied()
            .flatten()
            .map(|id| &self.nets[id.0])
    }

    pub fn net_of(&self, reference: &str) -> Option<&Net> {
        self.resolve(reference).and_then(|terminal| self.net_of_terminal(terminal))
    }

    /// Whether two references end up on the same net.
    pub fn connected(&self, a: &str, b: &str) -> bool {
        match (self.net_of(a), self.net_of(b)) {
            (Some(net_a), Some(net_b)) => net_a.id == net_b.id,
            _ => false,
        }
    }

    pub fn terminal_name(&self, terminal: TerminalId) -> String {
        terminal_name(&self.components, &self.owners, terminal)
    }

    /// The digital inputs a driver may toggle, in declaration order.
    pub fn logic_inputs(&self) -> impl Iterator<Item = &Component> {
        self.components
            .values()
            .filter(|component| matches!(component.kind(), ComponentKind::TtlInput { .. }))
    }

    /// Logic pins nothing connects to. Analog terminals never appear here
    /// because building fails instead.
    pub fn floating_terminals(&self) -> &[TerminalId] {
        &self.floating
    }

    pub fn model(&self, name: &str) -> Option<&DeviceModel> {
        self.models.get(name)
    }

    pub fn subcircuit_instances(&self) -> &[SubcircuitInstance] {
        &self.instances
    }

    pub fn instance(&self, name: &str) -> Option<&SubcircuitInstance> {
        self.instances.iter().find(|instance| instance.name == name)
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    pub fn solver_params(&self) -> &SolverParams {
        &self.solver
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, TerminalId)> {
        self.aliases.iter().map(|(alias, id)| (alias.as_str(), *id))
    }
}
