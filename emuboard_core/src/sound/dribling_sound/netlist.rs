// SPDX-License-Identifier: GPL-3.0
// netlist.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

// Dribbling sound board, taken from the schematics in the operator's manual.
// The PARATA stage stands in for the real JFET circuit: the same topology as
// STOP_PALLA with different values, which gives the higher pitch.

use crate::netlist::units::{cap_n, cap_p, cap_u, res_k, res_m};
use crate::netlist::{HintKind, Netlist, NetlistBuilder, Result, Scope, SolverParams, SubcircuitDef};

/// Added to the crowd noise mixing resistors to bring FOLLA down in the mix.
const ATTENUATE_FOLLA: f64 = 200.0;

const BC239C: &str = "BC239C NPN(IS=1.5813E-15 ISE=4.637E-14 ISC=8.0864E-18 XTI=3 BF=113.32 BR=86.718 IKF=1.4907 IKR=0.03360 XTB=0 VAF=12.331 VAR=31.901 VJE=0.71518 VJC=1.1381 RE=0.22081 RC=0.01636 RB=1.0078 CJE=3.3904E-14 CJC=2.9774E-12 XCJC=0.02899 FC=0.99886 NF=1.0653 NR=1.8047 NE=1.4254 NC=1.8821 MJE=0.36824 MJC=0.31461 TF=2.0691E-11 TR=1.0033E-09 EG=1.11 IRB=0.00083992 RBM=0 XTF=0.31338 VTF=0.10174 ITF=0.0045579 PTF=0 CJS=0 MJS=0 VJS=0.75)";
const BC309: &str = "BC309 PNP(IS=1.0366E-15 ISE=1.6295E-14 ISC=9.4971E-17 XTI=3 BF=80 BR=16.116 IKF=0.47497 IKR=0.012081 XTB=0 VAF=8.486 VAR=9.5149 VJE=0.84456 VJC=1.0282 RE=1.9597 RC=1.1393 RB=3.2133 CJE=2.0636E-14 CJC=2.6904E-12 XCJC=0.075977 FC=0.54298 NF=1.03136 NR=1.2907 NE=1.3702 NC=1.038 MJE=0.68352 MJC=0.5401 TF=5.4303E-11 TR=3.4233E-10 EG=1.11 IRB=0.00046855 RBM=2.0822 XTF=0.27447 VTF=0.19311 ITF=0.0030573 PTF=0 CJS=0 VJS=0.75 MJS=0)";

// 2N3819 JFETs approximated as depletion NMOS.
const Q_2N3819: &str = "NMOS(VTO=-3 KP=0.001 CAPMOD=0)";
const Q_2N3819B: &str = "NMOS(VTO=-3)";

/// Comparator with a behavioural input stage. Pins: 1 non-inverting input,
/// 2 inverting input, 3 positive supply, 4 negative supply, 5 open collector
/// output.
static LM339: SubcircuitDef = SubcircuitDef {
    name: "LM339",
    params: &[],
    body: lm339,
};

/// CALCIO_A and CALCIO_B differ only in their CAP1/CAP2 values.
static CALCIO: SubcircuitDef = SubcircuitDef {
    name: "calcio",
    params: &[("CAP1", 33.0), ("CAP2", 68.0)],
    body: calcio,
};

static STOP_PALLA: SubcircuitDef = SubcircuitDef {
    name: "stop_palla",
    params: &[],
    body: stop_palla,
};

static PARATA: SubcircuitDef = SubcircuitDef {
    name: "parata",
    params: &[],
    body: parata,
};

/// Sallen-Key third-order Butterworth at 15kHz, so the 40kHz idle tone does
/// not alias at a 48kHz output rate.
static OUTPUT_FILTER: SubcircuitDef = SubcircuitDef {
    name: "output_filter",
    params: &[],
    body: output_filter,
};

fn lm339(s: &mut Scope<'_>) -> Result<()> {
    s.net_model("LM339_QO NPN(BF=200)");

    s.afunc("CMP", 2, "min(max(A1 - A0, 0), 1e-6)");
    s.vccs("QB", 80.0);
    s.bjt("QO", "LM339_QO");
    s.analog_input("XGND", 0.0);
    s.res("RDUMMY", res_m(1000.0));

    s.net_c(&["CMP.Q", "QB.IP"]);
    s.net_c(&["QB.OP", "QO.B"]);
    s.net_c(&["XGND", "QB.IN"]);
    s.net_c(&["QB.ON", "QO.E", "RDUMMY.2"]);

    s.alias("1", "CMP.A0");
    s.alias("2", "CMP.A1");
    s.alias("3", "RDUMMY.1");
    s.alias("4", "QO.E");
    s.alias("5", "QO.C");
    Ok(())
}

fn calcio(s: &mut Scope<'_>) -> Result<()> {
    let cap1 = s.param("CAP1")?;
    let cap2 = s.param("CAP2")?;

    s.analog_input("I_V5", 5.0);
    s.analog_input("I_V6", 6.0);
    s.analog_input("I_V12", 12.0);
    s.bjt("Q8", "BC239C");
    s.bjt("Q9", "BC239C");
    s.alias("INPUT", "R45.2");
    s.res("R45", 420.0);
    s.res("R46", res_k(8.2));
    s.res("R48", res_k(220.0));
    s.res("R49", res_k(56.0));
    s.res("R50", res_k(56.0));
    s.res("R51", res_m(1.0));
    s.res("R52", res_k(68.0));
    s.res("R53", res_k(82.0));
    s.res("R54", res_k(1.9)); // pot on the board
    s.res("R55", res_k(10.0));
    s.res("R56", res_k(100.0));
    s.res("R57", res_k(10.0));
    s.res("R58", res_k(3.9));
    s.cap("C29", cap_u(4.2));
    s.cap("C30", cap_n(cap2));
    s.cap("C31", cap_n(150.0));
    s.cap("C32", cap_u(4.7));
    s.cap("C33", cap_n(cap1));
    s.cap("C34", cap_n(cap1));
    s.net_c(&["INPUT", "R46.1"]);
    s.alias("GND", "R45.1");
    s.net_c(&["R46.2", "C33.2", "C34.1"]);
    s.net_c(&["C33.1", "R49.1", "C29.1"]);
    s.net_c(&["C34.2", "R50.2", "R51.1", "Q8.B"]);
    s.net_c(&["R49.2", "C30.2", "R50.1"]);
    s.net_c(&["C30.1", "GND"]);
    s.net_c(&["C29.2", "R52.1", "R51.2", "R53.1", "Q8.C"]);
    s.net_c(&["R52.2", "I_V5"]);
    s.net_c(&["Q8.E", "R54.2"]);
    s.net_c(&["R54.1", "GND"]);
    s.net_c(&["R53.2", "C31.1"]);
    s.net_c(&["C31.2", "R48.1", "R56.2", "Q9.B"]);
    s.net_c(&["R48.2", "I_V5"]);
    s.net_c(&["R56.1", "GND"]);
    s.net_c(&["Q9.C", "R55.1"]);
    s.alias("OUTPUT", "Q9.C");
    s.net_c(&["R55.2", "I_V5"]);
    s.net_c(&["Q9.E", "R57.2", "C32.2"]);
    s.net_c(&["R57.1", "GND"]);
    s.net_c(&["C32.1", "R58.2"]);
    s.net_c(&["R58.1", "GND"]);
    Ok(())
}

fn stop_palla(s: &mut Scope<'_>) -> Result<()> {
    s.analog_input("I_V5", 5.0);
    s.bjt("Q1", "BC309");
    s.res("R5", res_k(1.0));
    s.res("R6", res_k(160.0));
    s.res("R7", res_k(150.0));
    s.res("R8", res_k(10.0));
    s.res("R9", res_k(2.2));
    s.cap("C5", cap_u(1.0));
    s.cap("C6", cap_u(1.0));
    s.diode("D1", "1N914");
    s.submodel(&LM339, "IC_B9", &[])?;
    s.alias("GND", "IC_B9.4");
    s.alias("INPUT", "R5.1");
    s.net_c(&["R5.2", "Q1.B"]);
    s.net_c(&["Q1.E", "I_V5"]);
    s.net_c(&["Q1.C", "C5.2", "R7.2", "R6.1"]);
    s.net_c(&["C5.1", "GND"]);
    s.net_c(&["R7.1", "GND"]);
    s.net_c(&["R6.2", "IC_B9.1", "D1.A"]);
    s.net_c(&["D1.K", "R9.1", "IC_B9.5", "R8.2"]);
    s.net_c(&["IC_B9.2", "C6.2", "R8.1"]);
    s.net_c(&["C6.1", "GND"]);
    s.net_c(&["R9.2", "I_V5"]);
    s.net_c(&["IC_B9.3", "I_V5"]);
    s.alias("OUTPUT", "IC_B9.5");
    Ok(())
}

fn parata(s: &mut Scope<'_>) -> Result<()> {
    s.analog_input("I_V5", 5.0);

    s.bjt("Q1", "BC309");
    s.mosfet("Q2", Q_2N3819);
    s.mosfet("Q3", Q_2N3819B);
    s.res("R5", res_k(1.0));
    s.res("R6", res_k(150.0));
    s.res("R7", res_k(220.0));
    s.res("R9", res_k(2.2));
    s.cap("C5", cap_u(2.2));
    s.cap("C6", cap_u(1.0));
    s.diode("D1", "1N914");
    s.diode("D2", "1N914");
    s.diode("D3", "1N914");

    s.submodel(&LM339, "IC_B9", &[])?;
    s.alias("GND", "IC_B9.4");
    s.alias("INPUT", "R5.1");
    s.net_c(&["R5.2", "Q1.B"]);
    s.net_c(&["Q1.E", "I_V5"]);
    s.net_c(&["Q1.C", "C5.2", "R7.2", "R6.1"]);
    s.net_c(&["C5.1", "GND"]);
    s.net_c(&["R7.1", "GND"]);
    s.net_c(&["R6.2", "IC_B9.1", "D1.A"]);
    s.net_c(&["D1.K", "R9.1", "IC_B9.5", "Q2.G", "Q2.S"]);
    s.net_c(&["IC_B9.2", "C6.2", "Q2.D"]);
    s.net_c(&["C6.1", "GND"]);
    s.net_c(&["R9.2", "I_V5"]);
    s.net_c(&["IC_B9.3", "I_V5"]);
    s.net_c(&["D2.A", "Q2.G"]);
    s.net_c(&["D2.K", "Q2.S"]);

    s.net_c(&["Q2.D", "Q3.G"]);
    s.net_c(&["Q3.D", "I_V5"]);
    s.net_c(&["D3.A", "Q3.G"]);
    s.net_c(&["D3.K", "Q3.S"]);
    s.alias("OUTPUT", "Q3.S");
    s.optimize_frontier("Q3.S", res_k(100.0), 1.0);
    Ok(())
}

fn output_filter(s: &mut Scope<'_>) -> Result<()> {
    s.opamp("AMP", "OPAMP(TYPE=1 FPF=5 RI=1M RO=50 UGF=1M SLEW=1M VLH=0.5 VLL=0.03 DAB=0.0015)");
    s.res("R1", res_k(11.0));
    s.res("R2", res_k(110.0));
    s.res("R3", res_k(33.0));
    s.cap("C1", cap_u(0.001));
    s.cap("C2", cap_p(470.0));
    s.cap("C3", cap_p(68.0));
    s.analog_input("VPLUS", 12.0);
    s.analog_input("VMINUS", -12.0);
    s.net_c(&["VPLUS", "AMP.VCC"]);
    s.net_c(&["VMINUS", "AMP.GND"]);
    s.alias("INPUT", "R1.1");
    s.alias("OUTPUT", "AMP.OUT");
    s.alias("GND", "C1.2");

    s.net_c(&["GND", "C3.2"]);
    s.net_c(&["R1.2", "R2.1", "C1.1"]);
    s.net_c(&["R2.2", "R3.1", "C2.1"]);
    s.net_c(&["R3.2", "C3.1", "AMP.PLUS"]);
    s.net_c(&["OUTPUT", "C2.2", "AMP.MINUS"]);
    Ok(())
}

/// The tone generator: an 8-bit divisor loaded into a pair of 74161s, clocked
/// at 40kHz, toggling a JK flip-flop.
fn tos(s: &mut Scope<'_>) {
    for input in ["I_PB0", "I_PB1", "I_PB2", "I_PB3", "I_PB4", "I_PB5", "I_PB6", "I_PB7"] {
        s.ttl_input(input, false);
    }
    s.net_c(&[
        "GND", "I_PB0.GND", "I_PB1.GND", "I_PB2.GND", "I_PB3.GND", "I_PB4.GND", "I_PB5.GND", "I_PB6.GND",
        "I_PB7.GND", "clk.GND",
    ]);
    s.net_c(&[
        "I_V5", "I_PB0.VCC", "I_PB1.VCC", "I_PB2.VCC", "I_PB3.VCC", "I_PB4.VCC", "I_PB5.VCC", "I_PB6.VCC",
        "I_PB7.VCC", "clk.VCC",
    ]);
    s.cap("C7_1", cap_p(330.0));
    s.cap("C7_2", cap_p(330.0));
    s.chip("IC_D7", "74161", 16);
    s.chip("IC_E7", "74161", 16);
    s.chip("IC_C7", "74LS107", 14);
    s.net_c(&["GND", "IC_C7.7", "IC_D7.8", "IC_E7.8", "C7_1.2"]);
    s.net_c(&["I_V5", "IC_C7.14", "IC_D7.16", "IC_E7.16"]);
    s.net_c(&["I_PB0", "IC_D7.3"]);
    s.net_c(&["I_PB1", "IC_D7.4"]);
    s.net_c(&["I_PB2", "IC_D7.5"]);
    s.net_c(&["I_PB3", "IC_D7.6"]);
    s.net_c(&["I_PB4", "IC_E7.3"]);
    s.net_c(&["I_PB5", "IC_E7.4"]);
    s.net_c(&["I_PB6", "IC_E7.5"]);
    s.net_c(&["I_PB7", "IC_E7.6"]);
    s.net_c(&["IC_E7.1", "IC_D7.1", "I_V5"]); // clear
    s.net_c(&["IC_D7.7", "IC_D7.10", "I_V5"]);
    s.net_c(&["IC_E7.9", "IC_D7.9", "C7_1.1", "IC_L9.4"]);
    s.net_c(&["IC_D7.15", "IC_E7.7", "IC_E7.10"]);
    s.net_c(&["IC_E7.15", "IC_L9.3"]);
    s.net_c(&["IC_L9.6", "IC_E7.2", "IC_D7.2"]);
    s.net_c(&["IC_L9.5", "C7_2.1", "IC_C7.9", "IC_L9.8"]);
    s.net_c(&["GND", "C7_2.2"]);
    s.net_c(&["IC_L9.9", "clk"]);
    s.net_c(&["IC_C7.10", "I_V5"]);
    s.net_c(&["IC_C7.1", "IC_C7.13", "IC_C7.4", "IC_C7.12", "GND.Q"]);
    s.net_c(&["IC_C7.8", "IC_E7.15"]); // flip-flop
    s.net_c(&["IC_C7.11", "IC_E7.15"]);
    s.alias("TOS", "IC_C7.5");
}

/// The referee's whistle: a 556 gated by a 74393 counter.
fn fischio(s: &mut Scope<'_>) {
    s.ttl_input("I_FISCHIO", false);
    s.net_c(&["GND", "I_FISCHIO.GND"]);
    s.net_c(&["I_V5", "I_FISCHIO.VCC"]);
    s.chip("IC_N9", "NE556", 14);
    s.chip("IC_M9", "74393", 14);
    s.net_c(&["IC_L9.7", "GND"]);
    s.net_c(&["IC_L9.14", "I_V5"]);
    s.net_c(&["IC_M9.7", "GND"]);
    s.net_c(&["IC_M9.14", "I_V5"]);
    s.net_c(&["IC_N9.7", "GND"]);
    s.net_c(&["IC_N9.14", "I_V5"]);
    s.res("R1", res_k(6.8));
    s.res("R2", res_k(39.0));
    s.res("R3", res_k(100.0));
    s.res("R4", res_k(47.0));
    s.cap("C42", cap_u(4.2));
    s.cap("C2", cap_n(2.2));
    s.net_c(&["IC_M9.6", "IC_L9.1"]);
    s.net_c(&["IC_N9.4", "IC_L9.2"]);
    s.net_c(&["IC_N9.10", "IC_L9.2"]);
    s.net_c(&["I_V5", "R1.1"]);
    s.net_c(&["I_V5", "R2.1"]);
    s.net_c(&["R1.2", "IC_N9.1", "R3.1", "IC_N9.2", "IC_N9.6", "C42.1"]);
    s.net_c(&["C42.2", "GND"]);
    s.net_c(&["R3.2", "R4.2", "IC_N9.8", "IC_N9.12", "C2.1"]);
    s.net_c(&["R4.1", "R2.2", "IC_N9.13"]);
    s.net_c(&["C2.2", "GND"]);
    s.net_c(&["IC_N9.5", "IC_M9.1"]); // counter tick
    s.net_c(&["I_FISCHIO", "IC_M9.2"]); // counter clear
    s.net_c(&["I_FISCHIO", "IC_M9.12"]);
    s.net_c(&["GND.Q", "IC_L9.11", "IC_L9.13"]);
    s.net_c(&["IC_M9.6", "IC_M9.13"]);
    for pin in ["IC_M9.3", "IC_M9.4", "IC_M9.5", "IC_M9.8", "IC_M9.9", "IC_M9.10", "IC_M9.11"] {
        s.hint(pin, HintKind::NoConnect);
    }
    s.alias("FISCHIO", "IC_N9.9");
}

/// Crowd noise from a pair of 74LS164 shift registers, mixed three ways and
/// band-passed through an LM324.
fn folla(s: &mut Scope<'_>) {
    s.ttl_input("I_FOLLA_A", false);
    s.ttl_input("I_FOLLA_M", false);
    s.ttl_input("I_FOLLA_B", false);
    s.ttl_input("I_CONTRASTO", false);
    s.net_c(&["GND", "I_FOLLA_A.GND", "I_FOLLA_M.GND", "I_FOLLA_B.GND", "I_CONTRASTO.GND"]);
    s.net_c(&["I_V5", "I_FOLLA_A.VCC", "I_FOLLA_M.VCC", "I_FOLLA_B.VCC", "I_CONTRASTO.VCC"]);
    s.net_c(&[
        "GND", "IC_E8.5", "IC_C8.9", "IC_C8.6", "IC_C8.2", "IC_C8.3", "IC_8B.12", "IC_8B.5", "IC_8B.9",
        "IC_7B.12", "IC_7B.10", "IC_7B.2", "IC_7B.8",
    ]);
    s.net_c(&["GND", "IC_8B.4", "IC_C8.5", "IC_7B.8", "IC_8B.10", "IC_8B.13", "IC_C8.10", "IC_E8.4"]);
    s.chip("IC_7A", "74LS164", 14);
    s.chip("IC_7B", "7414", 14);
    s.chip("IC_8A", "74LS164", 14);
    s.chip("IC_8B", "74LS86", 14);
    s.chip("IC_C8", "LM324", 14);
    s.chip("IC_E8", "7408", 14);
    s.net_c(&["I_V5", "IC_7A.14", "IC_7B.14", "IC_8A.14", "IC_8B.14", "IC_E8.14"]);
    s.net_c(&["I_V12", "IC_C8.4"]);
    s.net_c(&["GND", "IC_7A.7", "IC_7B.7", "IC_8A.7", "IC_8B.7", "IC_E8.7", "IC_C8.11"]);
    s.res("R32", res_k(1.0));
    s.res("R33", res_k(220.0 + ATTENUATE_FOLLA));
    s.res("R34", res_k(100.0 + ATTENUATE_FOLLA));
    s.res("R35", res_k(1.0));
    s.res("R36", res_k(56.0 + ATTENUATE_FOLLA));
    s.res("R37", res_k(10.0));
    s.res("R47", res_k(330.0));
    s.cap("C20", cap_n(100.0));
    s.cap("C21", cap_n(10.0));
    s.cap("C22", cap_n(22.0));
    s.cap("C24", cap_u(10.0));
    s.net_c(&["IC_8B.1", "IC_7B.4"]);
    s.net_c(&["IC_8B.2", "IC_8A.3"]);
    s.net_c(&["IC_8B.3", "IC_8A.1", "IC_8A.2"]);
    s.net_c(&["IC_8A.9", "IC_7A.9", "I_V5"]);
    s.net_c(&["IC_8A.8", "IC_7A.8", "R32.1", "IC_7B.6"]);
    s.net_c(&["IC_8A.13", "IC_7A.1", "IC_7A.2"]);
    s.net_c(&["IC_7A.12", "IC_7B.3"]);
    s.net_c(&["R32.2", "IC_7B.5", "C20.2"]);
    s.net_c(&["C20.1", "GND"]);
    s.alias("NOISE", "IC_7A.13");
    s.alias("C_IN", "IC_8A.8");
    s.net_c(&["I_FOLLA_B", "IC_E8.10"]);
    s.net_c(&["I_FOLLA_M", "IC_E8.12"]);
    s.net_c(&["I_FOLLA_A", "IC_E8.1"]);
    s.net_c(&["IC_E8.9", "IC_E8.13", "IC_E8.2", "NOISE"]);
    s.net_c(&["IC_E8.8", "R33.1"]);
    s.net_c(&["IC_E8.11", "R34.1"]);
    s.net_c(&["IC_E8.3", "R36.1"]);
    s.net_c(&["R35.1", "GND"]);
    s.net_c(&["R33.2", "R34.2", "R35.2", "R36.2", "C22.1", "C21.1"]);
    s.net_c(&["C21.2", "R47.2", "IC_C8.14"]);
    s.alias("FOLLA", "IC_C8.14");
    s.net_c(&["R37.2", "I_V5"]);
    s.net_c(&["C22.2", "R47.1", "IC_C8.13"]);
    s.net_c(&["R37.1", "C24.2", "IC_C8.12"]);
    s.net_c(&["C24.1", "GND"]);
}

/// The tackle sound, a second 556.
fn contrasto(s: &mut Scope<'_>) {
    s.chip("IC_Q9", "NE556", 14);
    s.net_c(&["IC_Q9.7", "GND"]);
    s.net_c(&["IC_Q9.14", "I_V5"]);
    s.res("R38", res_m(1.0));
    s.res("R39", res_k(100.0));
    s.cap("C23", cap_u(0.1));
    s.cap("C25", cap_u(0.1));
    s.cap("C26", cap_u(0.47));
    s.net_c(&["R38.1", "I_V5"]);
    s.net_c(&["R39.1", "I_V5"]);
    s.net_c(&["R38.2", "IC_Q9.1", "IC_Q9.2", "C25.1"]);
    s.net_c(&["C25.2", "C26.2", "GND"]);
    s.net_c(&["R39.2", "IC_Q9.13", "IC_Q9.12", "IC_Q9.8", "C26.1"]);
    s.net_c(&["IC_Q9.5", "IC_Q9.10"]);
    s.net_c(&["IC_Q9.9", "C23.1"]);
    s.net_c(&["IC_Q9.4", "I_V5"]);
    s.net_c(&["I_CONTRASTO", "IC_Q9.6"]);
    s.alias("CONT_OUT", "C23.2");
    s.net_c(&["C23.2", "R36.2"]);
}

/// AC coupling into the mixing node, one RC pair per sound.
fn output_coupling(s: &mut Scope<'_>) {
    let stages: [(&str, &str, f64, &str, f64); 7] = [
        ("TOS", "TOS", cap_n(100.0), "R_TOS", res_k(220.0)),
        ("FISCHIO", "FISCHIO", cap_n(1000.0), "R_FISCHIO", res_k(220.0)),
        ("FOLLA", "FOLLA", cap_n(10.0), "R_FOLLA", res_k(100.0)),
        ("CALCIO_A", "CALCIO_A.OUTPUT", cap_u(1.0), "R_CALCIO_A", res_k(10.0)),
        ("CALCIO_B", "CALCIO_B.OUTPUT", cap_u(1.0), "R_CALCIO_B", res_k(10.0)),
        ("STOP_PALLA", "STOP_PALLA.OUTPUT", cap_u(1.0), "R_STOP_PALLA", res_k(100.0)),
        ("PARATA", "PARATA.OUTPUT", cap_u(1.0), "R_PARATA", res_k(100.0)),
    ];

    for (sound, source, farads, resistor, ohms) in stages {
        let capacitor = format!("C_{sound}");
        s.cap(&capacitor, farads);
        s.res(resistor, ohms);
        s.net_c(&[source, format!("{capacitor}.1").as_str()]);
        s.net_c(&[format!("{capacitor}.2").as_str(), format!("{resistor}.1").as_str()]);
    }
}

/// Builds the complete sound board.
fn dribling(s: &mut Scope<'_>) -> Result<()> {
    s.net_model(BC239C);
    s.net_model(BC309);

    s.solver(SolverParams {
        frequency: 1000.0,
        dynamic_timestep: true,
        dynamic_min_timestep: 2e-5,
        nr_loops: 300,
        gs_loops: 10,
        parallel: 2,
    });

    s.clock("clk", 40000.0);
    s.analog_input("I_V5", 5.0);
    s.analog_input("I_V6", 6.0);
    s.analog_input("I_V12", 12.0);

    // Inverter shared by FISCHIO (1-2) and TOS (3-9).
    s.chip("IC_L9", "7414", 14);
    s.no_connect("NC");
    s.net_c(&["IC_L9.10", "GND.Q"]);
    s.net_c(&["IC_L9.12", "GND.Q"]);

    tos(s);
    fischio(s);

    s.ttl_input("I_STOP_PALLA", false);
    s.net_c(&["GND", "I_STOP_PALLA.GND"]);
    s.net_c(&["I_V6", "I_STOP_PALLA.VCC"]);
    s.submodel(&STOP_PALLA, "STOP_PALLA", &[])?;
    s.net_c(&["STOP_PALLA.GND", "GND"]);
    s.net_c(&["STOP_PALLA.INPUT", "I_STOP_PALLA"]);

    s.ttl_input("I_PARATA", false);
    s.net_c(&["GND", "I_PARATA.GND"]);
    s.net_c(&["I_V6", "I_PARATA.VCC"]);
    s.submodel(&PARATA, "PARATA", &[])?;
    s.net_c(&["PARATA.GND", "GND"]);
    s.net_c(&["PARATA.INPUT", "I_PARATA"]);

    // Each instance sets CAP1 twice and leaves CAP2 alone; the second value
    // is the one that takes effect.
    s.ttl_input("I_CALCIO_A", false);
    s.net_c(&["GND", "I_CALCIO_A.GND"]);
    s.net_c(&["I_V5", "I_CALCIO_A.VCC"]);
    s.ttl_input("I_CALCIO_B", false);
    s.net_c(&["GND", "I_CALCIO_B.GND"]);
    s.net_c(&["I_V5", "I_CALCIO_B.VCC"]);
    s.submodel(&CALCIO, "CALCIO_A", &[("CAP1", 22.0), ("CAP1", 47.0)])?;
    s.net_c(&["I_CALCIO_A", "CALCIO_A.INPUT"]);
    s.net_c(&["CALCIO_A.GND", "GND"]);
    s.submodel(&CALCIO, "CALCIO_B", &[("CAP1", 33.0), ("CAP1", 68.0)])?;
    s.net_c(&["I_CALCIO_B", "CALCIO_B.INPUT"]);
    s.net_c(&["CALCIO_B.GND", "GND"]);

    folla(s);
    contrasto(s);
    output_coupling(s);

    // Final mix, the enable transistor and the output filter.
    s.ttl_input("ENABLE_SOUND", false);
    s.net_c(&["ENABLE_SOUND.VCC", "I_V5"]);
    s.net_c(&["ENABLE_SOUND.GND", "GND"]);
    s.bjt("Q_OUT", "BC239C");
    s.res("R_OUT", res_k(2.2));
    s.res("R_PU_OUT", res_k(10.0));
    s.net_c(&["R_PU_OUT.1", "I_V5"]);
    s.net_c(&["ENABLE_SOUND", "R_OUT.1", "R_PU_OUT.2"]);
    s.net_c(&["Q_OUT.B", "R_OUT.2"]);
    s.net_c(&[
        "Q_OUT.C", "R_TOS.2", "R_FISCHIO.2", "R_FOLLA.2", "R_CALCIO_A.2", "R_CALCIO_B.2", "R_STOP_PALLA.2",
        "R_PARATA.2",
    ]);
    s.net_c(&["Q_OUT.E", "GND"]);
    s.submodel(&OUTPUT_FILTER, "OUTPUT_FILTER", &[])?;
    s.net_c(&["OUTPUT_FILTER.INPUT", "Q_OUT.C"]);
    s.net_c(&["OUTPUT_FILTER.GND", "GND"]);

    s.alias("OUTPUT", "OUTPUT_FILTER.OUTPUT");
    Ok(())
}

/// Describes and builds the Dribbling sound netlist.
pub fn build() -> Result<Netlist> {
    let mut builder = NetlistBuilder::new("dribling");
    dribling(&mut builder.root())?;
    builder.build()
}
