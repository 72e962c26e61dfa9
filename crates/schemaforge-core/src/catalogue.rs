//! The fixed catalogue of circuit symbols placed in every scene.
//!
//! Each [`CatalogueEntry`] pairs a stable component identifier with its
//! [`ComponentType`], the circuitikz element key used when drawing it, and the
//! label printed next to the symbol. The catalogue order is also the order in
//! which two-terminal elements are placed.

use serde::Serialize;

/// Electrical symbol types known to the generator.
///
/// Serialized by name (e.g. `"Resistor"`), matching the ground-truth schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentType {
    #[serde(rename = "ACSource")]
    AcSource,
    Battery,
    Capacitor,
    Diode,
    VoltageSource,
    Inductor,
    CurrentSource,
    IdealSwitch,
    RealSwitch,
    Transformer,
    Resistor,
}

impl ComponentType {
    /// Returns the footprint class the placement engine uses for this type
    pub fn footprint(self) -> Footprint {
        match self {
            Self::Transformer => Footprint::Fixed,
            _ => Footprint::TwoTerminal,
        }
    }
}

/// Shape class of a catalogue element as seen by the placement engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Footprint {
    /// Body segment between two terminals plus a lead stub on each end.
    TwoTerminal,
    /// Large fixed-size footprint around a single anchor point.
    Fixed,
}

/// A single catalogue element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    cid: &'static str,
    ctype: ComponentType,
    element: &'static str,
    label: &'static str,
}

impl CatalogueEntry {
    const fn new(
        cid: &'static str,
        ctype: ComponentType,
        element: &'static str,
        label: &'static str,
    ) -> Self {
        Self {
            cid,
            ctype,
            element,
            label,
        }
    }

    /// Unique component identifier within a scene
    pub fn cid(&self) -> &'static str {
        self.cid
    }

    /// Symbol type
    pub fn ctype(&self) -> ComponentType {
        self.ctype
    }

    /// circuitikz element key (`R`, `C`, `sV`, `transformer`, ...)
    pub fn element(&self) -> &'static str {
        self.element
    }

    /// Label text drawn beside the symbol
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Footprint class, derived from the symbol type
    pub fn footprint(&self) -> Footprint {
        self.ctype.footprint()
    }
}

// The real switch is drawn with the same glyph as the ideal one.
const CATALOGUE: [CatalogueEntry; 11] = [
    CatalogueEntry::new("AC1", ComponentType::AcSource, "sV", "AC"),
    CatalogueEntry::new("BAT1", ComponentType::Battery, "battery", "BAT"),
    CatalogueEntry::new("C1", ComponentType::Capacitor, "C", "C1"),
    CatalogueEntry::new("D1", ComponentType::Diode, "D", "D1"),
    CatalogueEntry::new("V1", ComponentType::VoltageSource, "V", "V1"),
    CatalogueEntry::new("L1", ComponentType::Inductor, "L", "L1"),
    CatalogueEntry::new("I1", ComponentType::CurrentSource, "I", "I1"),
    CatalogueEntry::new("SW_ID", ComponentType::IdealSwitch, "switch", "SW"),
    CatalogueEntry::new("SW_R", ComponentType::RealSwitch, "switch", "SWr"),
    CatalogueEntry::new("T1", ComponentType::Transformer, "transformer", "T1"),
    CatalogueEntry::new("R1", ComponentType::Resistor, "R", "R1"),
];

/// Returns the full catalogue in declaration order
pub fn catalogue() -> &'static [CatalogueEntry] {
    &CATALOGUE
}

/// Catalogue elements with a [`Footprint::Fixed`] footprint
pub fn fixed_elements() -> impl Iterator<Item = &'static CatalogueEntry> {
    CATALOGUE
        .iter()
        .filter(|entry| entry.footprint() == Footprint::Fixed)
}

/// Catalogue elements with a [`Footprint::TwoTerminal`] footprint, in catalogue order
pub fn two_terminal_elements() -> impl Iterator<Item = &'static CatalogueEntry> {
    CATALOGUE
        .iter()
        .filter(|entry| entry.footprint() == Footprint::TwoTerminal)
}
