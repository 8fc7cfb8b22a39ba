// SPDX-License-Identifier: GPL-3.0
// component.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

use super::model::DeviceModel;

/// Identifies one terminal of one component within a built netlist.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(pub(super) usize);

impl TerminalId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Every kind of element a description can declare. Model-bearing kinds keep
/// the model reference as written; it is resolved when the netlist is built.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentKind {
    Resistor { ohms: f64 },
    Capacitor { farads: f64 },
    Diode { model: String },
    Bjt { model: String },
    Mosfet { model: String },
    OpAmp { model: String },
    Vccs { gain: f64 },
    AnalogFunction { inputs: usize, expression: String },
    AnalogInput { volts: f64 },
    TtlInput { level: bool },
    Clock { hz: f64 },
    LogicChip { part: String, pins: usize },
    NoConnect,
    Ground,
}

impl ComponentKind {

    /// The terminal names of this kind, in declaration order.
    pub fn terminal_names(&self) -> Vec<String> {
        let fixed: &[&str] = match self {
            ComponentKind::Resistor { .. } | ComponentKind::Capacitor { .. } => &["1", "2"],
            ComponentKind::Diode { .. } => &["A", "K"],
            ComponentKind::Bjt { .. } => &["B", "C", "E"],
            ComponentKind::Mosfet { .. } => &["D", "G", "S"],
            ComponentKind::OpAmp { .. } => &["PLUS", "MINUS", "OUT", "VCC", "GND"],
            ComponentKind::Vccs { .. } => &["IP", "IN", "OP", "ON"],
            ComponentKind::AnalogInput { .. }
            | ComponentKind::Ground
            | ComponentKind::NoConnect => &["Q"],
            ComponentKind::TtlInput { .. } | ComponentKind::Clock { .. } => &["Q", "VCC", "GND"],
            ComponentKind::AnalogFunction { inputs, .. } => {
                let mut names: Vec<String> = (0..*inputs).map(|n| format!("A{n}")).collect();
                names.push("Q".to_string());
                return names;
            }
            ComponentKind::LogicChip { pins, .. } => {
                return (1..=*pins).map(|pin| pin.to_string()).collect();
            }
        };
        fixed.iter().map(|name| name.to_string()).collect()
    }

    /// The terminal a bare component name refers to, if it has one.
    pub fn default_terminal(&self) -> Option<&'static str> {
        match self {
            ComponentKind::AnalogInput { .. }
            | ComponentKind::TtlInput { .. }
            | ComponentKind::Clock { .. }
            | ComponentKind::AnalogFunction { .. }
            | ComponentKind::Ground
            | ComponentKind::NoConnect => Some("Q"),
            _ => None,
        }
    }

    /// Analog elements must have every terminal connected to something.
    pub fn is_analog_element(&self) -> bool {
        matches!(
            self,
            ComponentKind::Resistor { .. }
                | ComponentKind::Capacitor { .. }
                | ComponentKind::Diode { .. }
                | ComponentKind::Bjt { .. }
                | ComponentKind::Mosfet { .. }
                | ComponentKind::OpAmp { .. }
                | ComponentKind::Vccs { .. }
        )
    }

    /// The model reference of a model-bearing kind.
    pub fn model_ref(&self) -> Option<&str> {
        match self {
            ComponentKind::Diode { model }
            | ComponentKind::Bjt { model }
            | ComponentKind::Mosfet { model }
            | ComponentKind::OpAmp { model } => Some(model.as_str()),
            _ => None,
        }
    }
}

/// A declared component with its terminals assigned.
#[derive(Clone, Debug)]
pub struct Component {
    pub(super) name: String,
    pub(super) kind: ComponentKind,
    pub(super) terminals: Vec<(String, TerminalId)>,
    pub(super) model: Option<DeviceModel>,
}

impl Component {

    /// The fully qualified name, e.g. `CALCIO_A.R45`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// The resolved device model, for model-bearing kinds.
    pub fn model(&self) -> Option<&DeviceModel> {
        self.model.as_ref()
    }

    pub fn terminal(&self, pin: &str) -> Option<TerminalId> {
        self.terminals
            .iter()
            .find(|(name, _)| name == pin)
            .map(|(_, id)| *id)
    }

    pub fn terminals(&self) -> impl Iterator<Item = (&str, TerminalId)> {
        self.terminals.iter().map(|(name, id)| (name.as_str(), *id))
    }
}
