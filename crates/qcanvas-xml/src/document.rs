//! Serde model of the circuit document.
//!
//! ```xml
//! <Circuit xmlns="https://cberkstresser.name/QuantumWeb">
//!   <Meta date="2026-10-19T09:30:00+02:00"/>
//!   <InitialState>
//!     <Qubit wire="0" xR="1.0" xI="0.0" yR="0.0" yI="0.0"/>
//!   </InitialState>
//!   <Gates>
//!     <Gate position="0" gateType="H" parameterValue="0.0">
//!       <Wire>0</Wire>
//!     </Gate>
//!   </Gates>
//! </Circuit>
//! ```
//!
//! Numbers are kept as text here so the codec can report exactly which
//! attribute failed to parse.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::DocResult;

/// Namespace of the root element.
pub const NAMESPACE: &str = "https://cberkstresser.name/QuantumWeb";

/// Name of the root element.
pub const ROOT: &str = "Circuit";

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// The whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDocument {
    #[serde(rename = "@xmlns", default)]
    pub xmlns: Option<String>,
    #[serde(rename = "Meta", default)]
    pub meta: Option<Meta>,
    #[serde(rename = "InitialState", default)]
    pub initial_state: Option<InitialState>,
    #[serde(rename = "Gates", default)]
    pub gates: Option<Gates>,
}

/// Save metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "@date", default)]
    pub date: Option<String>,
}

/// One entry per wire, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    #[serde(rename = "Qubit", default)]
    pub qubits: Vec<QubitEntry>,
}

/// Initial amplitudes of one wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QubitEntry {
    #[serde(rename = "@wire")]
    pub wire: String,
    #[serde(rename = "@xR")]
    pub x_re: String,
    #[serde(rename = "@xI")]
    pub x_im: String,
    #[serde(rename = "@yR")]
    pub y_re: String,
    #[serde(rename = "@yI")]
    pub y_im: String,
}

/// Placed gates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gates {
    #[serde(rename = "Gate", default)]
    pub gates: Vec<GateEntry>,
}

/// One placed gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateEntry {
    #[serde(rename = "@position")]
    pub position: String,
    #[serde(rename = "@gateType")]
    pub gate_type: String,
    #[serde(rename = "@parameterValue", default)]
    pub parameter_value: Option<String>,
    /// Wire indices, controls first and target last.
    #[serde(rename = "Wire", default)]
    pub wires: Vec<String>,
}

impl CircuitDocument {
    /// Parse a document.
    pub fn from_xml(xml: &str) -> DocResult<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Render the document with an XML declaration and two-space indentation.
    pub fn to_xml(&self) -> DocResult<String> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::with_root(&mut body, Some(ROOT))?;
        serializer.indent(' ', 2);
        self.serialize(serializer)?;
        Ok(format!("{DECLARATION}\n{body}\n"))
    }

    /// When the document was saved, if the timestamp is readable.
    ///
    /// Accepts RFC 3339 and the zoned form `…+01:00[Europe/Berlin]`.
    pub fn saved_at(&self) -> Option<DateTime<FixedOffset>> {
        let date = self.meta.as_ref()?.date.as_deref()?;
        let date = date.split_once('[').map_or(date, |(head, _)| head);
        DateTime::parse_from_rfc3339(date).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<Circuit xmlns="https://cberkstresser.name/QuantumWeb">
    <Meta date="2020-03-01T12:00:00.123-05:00[America/New_York]"/>
    <InitialState>
        <Qubit wire="0" xI="0.0" xR="1.0" yI="0.0" yR="0.0"/>
        <Qubit wire="1" xI="0.0" xR="0.0" yI="0.0" yR="1.0"/>
    </InitialState>
    <Gates>
        <Gate gateType="CNOT" parameterValue="0.0" position="0">
            <Wire>0</Wire>
            <Wire>1</Wire>
        </Gate>
        <Gate gateType="Rz" parameterValue="1.5" position="1">
            <Wire>1</Wire>
        </Gate>
    </Gates>
</Circuit>
"#;

    #[test]
    fn test_parse_sample() {
        let doc = CircuitDocument::from_xml(SAMPLE).unwrap();

        let qubits = &doc.initial_state.as_ref().unwrap().qubits;
        assert_eq!(qubits.len(), 2);
        assert_eq!(qubits[1].wire, "1");
        assert_eq!(qubits[1].y_re, "1.0");

        let gates = &doc.gates.as_ref().unwrap().gates;
        assert_eq!(gates.len(), 2);
        assert_eq!(gates[0].gate_type, "CNOT");
        assert_eq!(gates[0].wires, vec!["0", "1"]);
        assert_eq!(gates[1].parameter_value.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_saved_at_zoned() {
        let doc = CircuitDocument::from_xml(SAMPLE).unwrap();
        let saved = doc.saved_at().unwrap();
        assert_eq!(saved.to_rfc3339(), "2020-03-01T12:00:00.123-05:00");
    }

    #[test]
    fn test_write_shape() {
        let doc = CircuitDocument {
            xmlns: Some(NAMESPACE.to_string()),
            meta: Some(Meta {
                date: Some("2026-10-19T09:30:00+02:00".to_string()),
            }),
            initial_state: Some(InitialState {
                qubits: vec![QubitEntry {
                    wire: "0".into(),
                    x_re: "1.0".into(),
                    x_im: "0.0".into(),
                    y_re: "0.0".into(),
                    y_im: "0.0".into(),
                }],
            }),
            gates: Some(Gates {
                gates: vec![GateEntry {
                    position: "0".into(),
                    gate_type: "H".into(),
                    parameter_value: Some("0.0".into()),
                    wires: vec!["0".into()],
                }],
            }),
        };

        let xml = doc.to_xml().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<Circuit xmlns="https://cberkstresser.name/QuantumWeb">"#));
        assert!(xml.contains(r#"<Meta date="2026-10-19T09:30:00+02:00""#));
        assert!(xml.contains(r#"<Qubit wire="0" xR="1.0" xI="0.0" yR="0.0" yI="0.0""#));
        assert!(xml.contains(r#"<Gate position="0" gateType="H" parameterValue="0.0">"#));
        assert!(xml.contains("<Wire>0</Wire>"));

        let reparsed = CircuitDocument::from_xml(&xml).unwrap();
        assert_eq!(reparsed.initial_state, doc.initial_state);
        assert_eq!(reparsed.gates, doc.gates);
        assert_eq!(reparsed.saved_at(), doc.saved_at());
    }

    #[test]
    fn test_malformed() {
        assert!(CircuitDocument::from_xml("<Circuit><Gates>").is_err());
    }
}
