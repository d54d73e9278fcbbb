//! Target languages a generation unit can be bound to.
//!
//! The set is closed and compiled in. Identifiers are matched
//! case-insensitively, so `gui_ri`, `GUI_RI` and `Gui_Ri` all resolve to
//! [`TargetLanguage::GuiRi`].

use std::fmt;
use std::str::FromStr;

/// A modeling or programming environment glue can be generated for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum TargetLanguage {
    C,
    Ada,
    Sdl,
    Og,
    QGenAda,
    Rtds,
    Gui,
    Python,
    QGenC,
    Scade6,
    Simulink,
    Vhdl,
    /// GUI "required interface" (telecommands).
    GuiRi,
    /// GUI "provided interface" (telemetry).
    GuiPi,
    Rhapsody,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 15] = [
        TargetLanguage::C,
        TargetLanguage::Ada,
        TargetLanguage::Sdl,
        TargetLanguage::Og,
        TargetLanguage::QGenAda,
        TargetLanguage::Rtds,
        TargetLanguage::Gui,
        TargetLanguage::Python,
        TargetLanguage::QGenC,
        TargetLanguage::Scade6,
        TargetLanguage::Simulink,
        TargetLanguage::Vhdl,
        TargetLanguage::GuiRi,
        TargetLanguage::GuiPi,
        TargetLanguage::Rhapsody,
    ];

    /// The identifier as written in structural models.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetLanguage::C => "C",
            TargetLanguage::Ada => "Ada",
            TargetLanguage::Sdl => "SDL",
            TargetLanguage::Og => "OG",
            TargetLanguage::QGenAda => "QGenAda",
            TargetLanguage::Rtds => "rtds",
            TargetLanguage::Gui => "gui",
            TargetLanguage::Python => "python",
            TargetLanguage::QGenC => "QGenC",
            TargetLanguage::Scade6 => "Scade6",
            TargetLanguage::Simulink => "Simulink",
            TargetLanguage::Vhdl => "vhdl",
            TargetLanguage::GuiRi => "gui_ri",
            TargetLanguage::GuiPi => "gui_pi",
            TargetLanguage::Rhapsody => "rhapsody",
        }
    }

    /// The target whose codecs the main dispatch path generates for this one.
    ///
    /// GUI, VHDL and Rhapsody glue is built on top of the C codecs, so those
    /// units are dispatched as C units. Every other target maps to itself.
    pub fn codec_target(self) -> TargetLanguage {
        match self {
            TargetLanguage::GuiRi
            | TargetLanguage::GuiPi
            | TargetLanguage::Vhdl
            | TargetLanguage::Rhapsody => TargetLanguage::C,
            TargetLanguage::C
            | TargetLanguage::Ada
            | TargetLanguage::Sdl
            | TargetLanguage::Og
            | TargetLanguage::QGenAda
            | TargetLanguage::Rtds
            | TargetLanguage::Gui
            | TargetLanguage::Python
            | TargetLanguage::QGenC
            | TargetLanguage::Scade6
            | TargetLanguage::Simulink => self,
        }
    }

    /// Targets whose glue links against Ada codecs built by the external
    /// encoder compiler.
    pub fn needs_ada_codecs(self) -> bool {
        matches!(self, TargetLanguage::Ada | TargetLanguage::QGenAda)
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetLanguage {
    type Err = UnsupportedTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TargetLanguage::ALL
            .into_iter()
            .find(|target| target.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnsupportedTargetError {
                identifier: trimmed.to_string(),
            })
    }
}

/// A target identifier outside the compiled-in set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("modeling language '{identifier}' not supported")]
pub struct UnsupportedTargetError {
    pub identifier: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_target_round_trips_through_its_identifier() {
        for target in TargetLanguage::ALL {
            assert_eq!(target.as_str().parse::<TargetLanguage>(), Ok(target));
        }
    }

    #[test]
    fn identifiers_are_case_insensitive() {
        assert_eq!("GUI_RI".parse::<TargetLanguage>(), Ok(TargetLanguage::GuiRi));
        assert_eq!("ada".parse::<TargetLanguage>(), Ok(TargetLanguage::Ada));
        assert_eq!(" Simulink ".parse::<TargetLanguage>(), Ok(TargetLanguage::Simulink));
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = "Lustre".parse::<TargetLanguage>().unwrap_err();
        assert_eq!(err.identifier, "Lustre");
        assert_eq!(err.to_string(), "modeling language 'Lustre' not supported");
    }

    #[test]
    fn gui_vhdl_and_rhapsody_use_c_codecs() {
        let rerouted: Vec<_> = TargetLanguage::ALL
            .into_iter()
            .filter(|t| t.codec_target() != *t)
            .collect();
        assert_eq!(
            rerouted,
            vec![
                TargetLanguage::Vhdl,
                TargetLanguage::GuiRi,
                TargetLanguage::GuiPi,
                TargetLanguage::Rhapsody,
            ]
        );
        assert!(rerouted
            .iter()
            .all(|t| t.codec_target() == TargetLanguage::C));
    }
}
