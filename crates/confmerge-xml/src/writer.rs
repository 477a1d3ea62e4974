//! Serialization of [`Element`] trees back to XML text.

use crate::{Element, Error, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Options controlling [`to_xml_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Indent nested elements by this many spaces. `None` writes everything on one line.
    pub indent: Option<usize>,

    /// Emit an `<?xml version="1.0" encoding="utf-8"?>` declaration first.
    pub declaration: bool,
}

impl WriteOptions {
    /// Pretty-printed output with the given indent width and a declaration.
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            declaration: true,
        }
    }
}

/// Serialize an element tree to an XML string.
///
/// Elements with neither children nor text are written self-closing.
/// Attribute values and text are escaped.
///
/// ```rust
/// use confmerge_xml::{Element, WriteOptions, to_xml_string};
///
/// let root = Element::new("configuration")
///     .with_child(Element::new("add").with_attribute("key", "a<b"));
///
/// let xml = to_xml_string(&root, &WriteOptions::default()).unwrap();
/// assert_eq!(xml, r#"<configuration><add key="a&lt;b"/></configuration>"#);
/// ```
pub fn to_xml_string(root: &Element, options: &WriteOptions) -> Result<String> {
    let mut writer = match options.indent {
        Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
        None => Writer::new(Vec::new()),
    };

    if options.declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(write_error)?;
    }

    write_element(&mut writer, root)?;

    let bytes = writer.into_inner();
    String::from_utf8(bytes).map_err(write_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    if element.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_error);
    }

    writer.write_event(Event::Start(start)).map_err(write_error)?;

    if let Some(text) = &element.text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(write_error)?;
    }

    for child in &element.children {
        write_element(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_error)
}

fn write_error(err: impl std::fmt::Display) -> Error {
    Error::Write {
        message: err.to_string(),
    }
}
