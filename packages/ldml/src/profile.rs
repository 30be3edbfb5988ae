//! Output profiles.
//!
//! A profile selects which optional metadata a document carries and how a
//! missing headline is replaced. Every profile is a pure function over the
//! same assemblers; [`ProfileRules`] holds the differences.

use clap::ValueEnum;

use crate::error::Result;
use crate::ldml::{
    build_classification, build_header, build_identification, build_judgment_body,
    build_proprietary, LdmlDocument, Meta,
};
use crate::types::DocumentationUnit;
use crate::validation::validate;

/// Replacement for a missing headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFallback {
    /// The document number.
    DocumentNumber,
    /// `"{court label}, {dd.mm.yyyy}, {first file number}"`.
    CourtDateFileNumber,
}

/// Per-profile switches for optional content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileRules {
    pub documentation_office: bool,
    pub sources: bool,
    /// Publication status and error flag.
    pub status: bool,
    pub legal_effect: bool,
    /// Keywords and fields of law.
    pub classification: bool,
    pub title_fallback: TitleFallback,
}

const FULL: ProfileRules = ProfileRules {
    documentation_office: true,
    sources: true,
    status: true,
    legal_effect: true,
    classification: true,
    title_fallback: TitleFallback::CourtDateFileNumber,
};

const REDUCED: ProfileRules = ProfileRules {
    documentation_office: false,
    sources: false,
    status: false,
    legal_effect: true,
    classification: true,
    title_fallback: TitleFallback::DocumentNumber,
};

const PORTAL: ProfileRules = ProfileRules {
    documentation_office: false,
    sources: false,
    status: false,
    legal_effect: false,
    classification: true,
    title_fallback: TitleFallback::CourtDateFileNumber,
};

const PORTAL_PROTOTYPE: ProfileRules = ProfileRules {
    documentation_office: false,
    sources: false,
    status: false,
    legal_effect: false,
    classification: false,
    title_fallback: TitleFallback::DocumentNumber,
};

/// Output profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Profile {
    /// Internal handover with all metadata.
    #[default]
    Full,
    /// Handover to external partners.
    Reduced,
    /// Public portal.
    Portal,
    /// Public portal prototype with minimal metadata.
    PortalPrototype,
}

impl Profile {
    /// All profiles.
    pub const ALL: [Self; 4] = [
        Self::Full,
        Self::Reduced,
        Self::Portal,
        Self::PortalPrototype,
    ];

    /// Rules of this profile.
    #[must_use]
    pub const fn rules(self) -> ProfileRules {
        match self {
            Self::Full => FULL,
            Self::Reduced => REDUCED,
            Self::Portal => PORTAL,
            Self::PortalPrototype => PORTAL_PROTOTYPE,
        }
    }

    /// Get the string value for log output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Reduced => "reduced",
            Self::Portal => "portal",
            Self::PortalPrototype => "portal-prototype",
        }
    }

    /// Transform a unit with this profile.
    ///
    /// # Errors
    /// See [`transform_full`].
    pub fn transform(self, unit: &DocumentationUnit) -> Result<LdmlDocument> {
        match self {
            Self::Full => transform_full(unit),
            Self::Reduced => transform_reduced(unit),
            Self::Portal => transform_portal(unit),
            Self::PortalPrototype => transform_portal_prototype(unit),
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn assemble(unit: &DocumentationUnit, rules: &ProfileRules) -> Result<LdmlDocument> {
    validate(unit)?;

    let identification = build_identification(unit)?;
    let classification = if rules.classification {
        build_classification(unit)
    } else {
        None
    };
    let proprietary = build_proprietary(unit, rules)?;
    let header = build_header(unit, rules.title_fallback)?;
    let judgment_body = build_judgment_body(unit)?;

    Ok(LdmlDocument {
        meta: Meta {
            identification,
            classification,
            proprietary,
        },
        header,
        judgment_body,
    })
}

/// Transform a unit with all metadata.
///
/// # Errors
/// Returns [`LdmlError::MissingField`](crate::LdmlError::MissingField) for a
/// missing mandatory field, [`LdmlError::EmptyBody`](crate::LdmlError::EmptyBody)
/// if the unit has no body text, and a mapping error for HTML that cannot
/// be repaired.
pub fn transform_full(unit: &DocumentationUnit) -> Result<LdmlDocument> {
    assemble(unit, &FULL)
}

/// Transform a unit for external partners.
///
/// Leaves out documentation office, sources and status.
///
/// # Errors
/// See [`transform_full`].
pub fn transform_reduced(unit: &DocumentationUnit) -> Result<LdmlDocument> {
    assemble(unit, &REDUCED)
}

/// Transform a unit for the public portal.
///
/// # Errors
/// See [`transform_full`].
pub fn transform_portal(unit: &DocumentationUnit) -> Result<LdmlDocument> {
    assemble(unit, &PORTAL)
}

/// Transform a unit for the portal prototype, without classification.
///
/// # Errors
/// See [`transform_full`].
pub fn transform_portal_prototype(unit: &DocumentationUnit) -> Result<LdmlDocument> {
    assemble(unit, &PORTAL_PROTOTYPE)
}
