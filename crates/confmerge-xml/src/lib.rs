//! Element tree and XML reading/writing for confmerge.
//!
//! Configuration documents are held as plain [`Element`] trees: a name,
//! attributes in document order, child elements in document order and the
//! element's own text. This crate turns XML text into such a tree with
//! [`parse`] and back into XML with [`to_xml_string`], both built on
//! [`quick-xml`](https://docs.rs/quick-xml).
//!
//! # Example
//!
//! ```rust
//! use confmerge_xml::{WriteOptions, parse, to_xml_string};
//!
//! let root = parse(r#"<configuration>
//!   <add key="timeout" value="30"/>
//!   <include>shared/db.xml</include>
//! </configuration>"#).unwrap();
//!
//! let adds: Vec<_> = root.children_named("add").collect();
//! assert_eq!(adds.len(), 1);
//! assert_eq!(adds[0].get_attribute("value"), Some("30"));
//!
//! let xml = to_xml_string(&root, &WriteOptions::default()).unwrap();
//! assert_eq!(
//!     xml,
//!     r#"<configuration><add key="timeout" value="30"/><include>shared/db.xml</include></configuration>"#
//! );
//! ```
//!
//! Comments, processing instructions and whitespace between elements are not
//! part of the tree, so a parse/write cycle normalizes them away.

pub mod element;
pub mod error;
pub mod parser;
pub mod writer;

pub use element::{Attribute, Element};
pub use error::{Error, Result};
pub use parser::parse;
pub use writer::{WriteOptions, to_xml_string};
