//! XML output tree, serialization and parsing helpers.

mod node;
pub mod utils;
mod writer;

pub use node::{wrap_non_empty, Attribute, Element, Namespace, Node};
pub use utils::{find_by_path, find_child, find_children, get_tag_name, get_text};
pub use writer::{save_document, to_xml_string};
