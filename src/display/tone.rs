//! Semantic color tones for SIP methods.
//!
//! The panel maps each method to a theme token rather than a literal color
//! so the host theme decides the actual palette.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodTone {
    Success,
    Error,
    Warning,
    Info,
    Primary,
    Secondary,
    SuccessBorder,
    WarningBorder,
    InfoBorder,
    PrimaryBorder,
    SecondaryBorder,
    TextPrimary,
    TextSecondary,
}

impl MethodTone {
    /// Tone for a method name, case-insensitive. Unknown methods and
    /// response codes get [`MethodTone::TextSecondary`].
    pub fn for_method(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "INVITE" => MethodTone::Success,
            "BYE" => MethodTone::Error,
            "CANCEL" => MethodTone::Warning,
            "ACK" => MethodTone::Info,
            "REGISTER" => MethodTone::Primary,
            "OPTIONS" => MethodTone::Secondary,
            "PRACK" => MethodTone::SuccessBorder,
            "UPDATE" => MethodTone::WarningBorder,
            "REFER" => MethodTone::InfoBorder,
            "SUBSCRIBE" => MethodTone::PrimaryBorder,
            "NOTIFY" => MethodTone::SecondaryBorder,
            "MESSAGE" => MethodTone::TextPrimary,
            _ => MethodTone::TextSecondary,
        }
    }
}
