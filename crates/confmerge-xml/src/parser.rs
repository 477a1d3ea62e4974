//! XML parser that builds [`Element`] trees.

use crate::{Attribute, Element, Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// Parse an XML document into its root [`Element`].
///
/// Comments, processing instructions, the XML declaration and DOCTYPE are
/// skipped. Whitespace-only text is dropped; other text and CDATA sections
/// are concatenated into the owning element's `text`.
///
/// # Example
///
/// ```rust
/// use confmerge_xml::parse;
///
/// let root = parse(r#"<configuration env="prod">
///   <include>shared/logging.xml</include>
/// </configuration>"#).unwrap();
///
/// assert_eq!(root.name, "configuration");
/// assert_eq!(root.get_attribute("env"), Some("prod"));
/// assert_eq!(root.children[0].text_payload(), Some("shared/logging.xml"));
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed, has no root element, has more
/// than one root element, or repeats an attribute name within one tag.
pub fn parse(content: &str) -> Result<Element> {
    let mut parser = XmlParser::new(content);
    parser.parse()
}

/// Internal parser state.
struct XmlParser<'a> {
    reader: Reader<&'a [u8]>,

    /// Stack of elements being built.
    stack: Vec<BuildNode>,
}

/// A node being constructed during parsing.
struct BuildNode {
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Element>,
    text: Option<String>,
}

impl BuildNode {
    fn finish(self) -> Element {
        Element {
            name: self.name,
            attributes: self.attributes,
            children: self.children,
            text: self.text,
        }
    }
}

impl<'a> XmlParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            stack: Vec::new(),
        }
    }

    fn parse(&mut self) -> Result<Element> {
        let mut root: Option<Element> = None;

        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    self.handle_start(&e)?;
                }
                Ok(Event::End(e)) => {
                    let element = self.handle_end(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Empty(e)) => {
                    let element = self.handle_empty(&e)?;
                    self.attach(element, &mut root)?;
                }
                Ok(Event::Text(e)) => {
                    self.handle_text(&e)?;
                }
                Ok(Event::CData(e)) => {
                    self.handle_cdata(&e);
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        if let Some(node) = self.stack.last() {
            return Err(Error::UnexpectedEof {
                expected: format!("closing tag </{}>", node.name),
            });
        }

        root.ok_or(Error::EmptyDocument)
    }

    /// Hand a completed element to its parent, or make it the root.
    fn attach(&mut self, element: Element, root: &mut Option<Element>) -> Result<()> {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_some() => return Err(Error::MultipleRoots),
            None => *root = Some(element),
        }
        Ok(())
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) -> Result<()> {
        let name = element_name(e);
        let attributes = parse_attributes(e)?;

        self.stack.push(BuildNode {
            name,
            attributes,
            children: Vec::new(),
            text: None,
        });

        Ok(())
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>) -> Result<Element> {
        let end_name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let node = self.stack.pop().ok_or_else(|| Error::InvalidStructure {
            message: format!("Unexpected closing tag </{}>", end_name),
        })?;

        if node.name != end_name {
            return Err(Error::MismatchedEndTag {
                expected: node.name,
                found: end_name,
            });
        }

        Ok(node.finish())
    }

    fn handle_empty(&mut self, e: &BytesStart<'_>) -> Result<Element> {
        Ok(Element {
            name: element_name(e),
            attributes: parse_attributes(e)?,
            children: Vec::new(),
            text: None,
        })
    }

    fn handle_text(&mut self, e: &BytesText<'_>) -> Result<()> {
        let text = e.unescape().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid text content: {}", err),
            position: Some(self.reader.buffer_position()),
        })?;

        if text.trim().is_empty() {
            return Ok(());
        }

        if let Some(node) = self.stack.last_mut() {
            node.text.get_or_insert_with(String::new).push_str(&text);
        }
        Ok(())
    }

    fn handle_cdata(&mut self, e: &BytesCData<'_>) {
        let text = String::from_utf8_lossy(e.as_ref());
        if let Some(node) = self.stack.last_mut() {
            node.text.get_or_insert_with(String::new).push_str(&text);
        }
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Collect attributes in document order.
///
/// quick-xml's attribute checks are left on, so a repeated attribute name is
/// reported as an error instead of silently picking one of the values.
fn parse_attributes(e: &BytesStart<'_>) -> Result<Vec<Attribute>> {
    let mut attributes = Vec::new();

    for attr_result in e.attributes() {
        let attr = attr_result?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid value for attribute '{}': {}", name, err),
            position: None,
        })?;

        attributes.push(Attribute {
            name,
            value: value.into_owned(),
        });
    }

    Ok(attributes)
}
