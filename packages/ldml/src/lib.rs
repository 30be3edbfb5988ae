//! Caselaw LDML - Transform court decisions into Akoma Ntoso judgments.
//!
//! This crate converts the documentation unit of a court decision (core
//! data, short and long texts, indexing) into a LegalDocML (Akoma Ntoso)
//! judgment with a proprietary metadata block.
//!
//! # Example
//!
//! ```
//! use caselaw_ldml::{transform, to_xml_string, DocumentationUnit, Profile};
//!
//! let unit: DocumentationUnit = serde_json::from_str(r#"{
//!     "uuid": "8d3d6a4e-0a4b-4e0c-9a59-3b8f1c2d0e11",
//!     "documentNumber": "XXRE000000001",
//!     "coreData": {
//!         "court": { "type": "LG", "location": "Berlin" },
//!         "documentType": { "label": "Urteil" },
//!         "legalEffect": "Ja",
//!         "fileNumbers": ["3 O 1/20"],
//!         "decisionDate": "2020-01-01"
//!     },
//!     "longTexts": { "tenor": "<p>Die Klage wird abgewiesen.</p>" }
//! }"#).unwrap();
//!
//! let root = transform(&unit, Profile::Full).unwrap();
//! let xml = to_xml_string(&root, false).unwrap();
//! assert!(xml.contains("<akn:p>LG Berlin, 01.01.2020, 3 O 1/20</akn:p>"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Namespaces, FRBR conventions and validation helpers
//! - [`types`]: Input data types (DocumentationUnit, CoreData, ...)
//! - [`error`]: Error types and Result alias
//! - [`fragment`]: HTML fragment repair and parsing
//! - [`grouping`]: Norm grouping and ranking
//! - [`validation`]: Mandatory-field checks
//! - [`ldml`]: Typed document parts and their assemblers
//! - [`profile`]: Output profiles
//! - [`xml`]: Output tree, serialization and parse helpers
//! - [`cli`]: Command-line interface
//! - [`transformer`]: Main transformation service

pub mod cli;
pub mod config;
pub mod error;
pub mod fragment;
pub mod grouping;
pub mod ldml;
pub mod profile;
pub mod transformer;
pub mod types;
pub mod validation;
pub mod xml;

// Re-export main functions
pub use transformer::{load_documentation_unit, transform, transform_file, transform_to_string};

// Re-export commonly used items
pub use error::{FailureKind, LdmlError, Result};
pub use ldml::LdmlDocument;
pub use profile::Profile;
pub use types::DocumentationUnit;
pub use xml::{to_xml_string, Element, Node};
