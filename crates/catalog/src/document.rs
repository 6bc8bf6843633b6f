// crates/catalog/src/document.rs
//! Owned, mutable XML tree for the reader's catalog file
//!
//! The catalog is small enough to hold in memory, and the rewrite needs to
//! touch attributes all over the tree, so the event stream from `quick-xml`
//! is folded into a plain element tree and written back out afterwards.
//! Text, comments and CDATA are kept in their original escaped form so that
//! everything the engine does not touch is reproduced as it was read.

use crate::error::{CatalogError, CatalogResult};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Encoding written into the XML declaration of every serialized catalog
pub const OUTPUT_ENCODING: &str = "utf-8";

/// A node in the catalog tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data, still escaped
    Text(String),
    /// `<![CDATA[...]]>` content
    CData(String),
    /// `<!--...-->` content
    Comment(String),
    /// `<?...?>` content, target included
    ProcessingInstruction(String),
    /// `<!DOCTYPE ...>` content
    DocType(String),
}

/// An XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Returns the qualified element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unescaped value of an attribute, or `None` if it is absent.
    ///
    /// An attribute that is present but empty yields `Some("")`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if the attribute is present
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Sets an attribute, keeping its position if it already exists
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Removes an attribute and returns its previous value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Iterates over attributes in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns all child nodes
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Appends a child element
    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Appends an arbitrary child node
    pub fn push_node(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Iterates over direct child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Removes every direct child element with the given name, returning
    /// them in document order. Other nodes are left in place.
    pub fn remove_children_named(&mut self, name: &str) -> Vec<Element> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.children.len());

        for node in self.children.drain(..) {
            match node {
                Node::Element(el) if el.name == name => removed.push(el),
                other => kept.push(other),
            }
        }

        self.children = kept;
        removed
    }

    /// Finds the first element named `name`, searching this element and its
    /// descendants in document order
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find(name))
    }

    /// Mutable variant of [`Element::find`]
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        if self.name == name {
            return Some(self);
        }
        for node in &mut self.children {
            if let Node::Element(child) = node {
                if let Some(found) = child.find_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Collects every element named `name` in document order
    pub fn elements_named<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        if self.name == name {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_named(name, found);
        }
    }

    /// Calls `f` on every element named `name` in document order
    pub fn for_each_named_mut<F>(&mut self, name: &str, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        if self.name == name {
            f(self);
        }
        for node in &mut self.children {
            if let Node::Element(child) = node {
                child.for_each_named_mut(name, f);
            }
        }
    }
}

/// A parsed catalog document
///
/// Exactly one root element, with whatever comments, processing instructions
/// or doctype surrounded it in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl Document {
    /// Wraps a root element in a new document
    pub fn new(root: Element) -> Self {
        Self {
            prolog: Vec::new(),
            root,
            epilog: Vec::new(),
        }
    }

    /// Returns the root element
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the root element mutably
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Parses a document from a buffered reader
    pub fn parse<R: BufRead>(input: R) -> CatalogResult<Self> {
        let mut reader = Reader::from_reader(input);
        let mut buf = Vec::new();

        let mut stack: Vec<Element> = Vec::new();
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| CatalogError::xml(reader.buffer_position(), e))?;
            let position = u64::try_from(reader.buffer_position()).unwrap_or(u64::MAX);

            let node = match event {
                Event::Start(e) => {
                    stack.push(element_from_start(&e, position)?);
                    None
                }
                Event::Empty(e) => Some(Node::Element(element_from_start(&e, position)?)),
                Event::End(_) => match stack.pop() {
                    Some(el) => Some(Node::Element(el)),
                    None => return Err(CatalogError::xml(position, "unexpected closing tag")),
                },
                Event::Text(e) => Some(Node::Text(utf8(&e, position)?)),
                Event::CData(e) => Some(Node::CData(utf8(&e, position)?)),
                Event::Comment(e) => Some(Node::Comment(utf8(&e, position)?)),
                Event::PI(e) => Some(Node::ProcessingInstruction(utf8(&e, position)?)),
                Event::DocType(e) => Some(Node::DocType(utf8(&e, position)?)),
                // The declaration is regenerated on output with a fixed encoding.
                Event::Decl(_) => None,
                Event::Eof => break,
            };
            buf.clear();

            let Some(node) = node else { continue };
            if let Some(parent) = stack.last_mut() {
                parent.push_node(node);
                continue;
            }
            match node {
                Node::Element(el) => {
                    if root.is_some() {
                        return Err(CatalogError::xml(position, "multiple root elements"));
                    }
                    root = Some(el);
                }
                // Whitespace between top-level constructs carries no content.
                Node::Text(text) if text.trim().is_empty() => {}
                Node::Text(_) | Node::CData(_) => {
                    return Err(CatalogError::xml(position, "text outside the root element"));
                }
                other if root.is_some() => epilog.push(other),
                other => prolog.push(other),
            }
        }

        if let Some(open) = stack.last() {
            return Err(CatalogError::xml(
                reader.buffer_position(),
                format!("unclosed element <{}>", open.name()),
            ));
        }

        let root = root.ok_or(CatalogError::EmptyDocument)?;
        Ok(Self {
            prolog,
            root,
            epilog,
        })
    }

    /// Serializes the document as UTF-8 XML
    pub fn write_to<W: Write>(&self, output: W) -> CatalogResult<()> {
        let mut writer = Writer::new(output);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some(OUTPUT_ENCODING), None)))
            .map_err(CatalogError::serialize)?;
        writer
            .write_event(Event::Text(BytesText::from_escaped("\n")))
            .map_err(CatalogError::serialize)?;

        for node in &self.prolog {
            write_node(&mut writer, node)?;
        }
        write_element(&mut writer, &self.root)?;
        for node in &self.epilog {
            write_node(&mut writer, node)?;
        }

        writer.into_inner().flush()?;
        Ok(())
    }

    /// Serializes the document into a string
    pub fn to_xml_string(&self) -> CatalogResult<String> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        String::from_utf8(out).map_err(CatalogError::serialize)
    }
}

impl FromStr for Document {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

fn utf8(bytes: &[u8], position: u64) -> CatalogResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| CatalogError::xml(position, e))
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> CatalogResult<Element> {
    let mut element = Element::new(utf8(start.name().as_ref(), position)?);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| CatalogError::xml(position, e))?;
        let key = utf8(attr.key.as_ref(), position)?;
        let raw = utf8(&attr.value, position)?;
        let value = quick_xml::escape::unescape(&raw)
            .map_err(|e| CatalogError::xml(position, e))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> CatalogResult<()> {
    let event = match node {
        Node::Element(el) => return write_element(writer, el),
        Node::Text(text) => Event::Text(BytesText::from_escaped(text.as_str())),
        Node::CData(text) => Event::CData(BytesCData::new(text.as_str())),
        Node::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
        Node::ProcessingInstruction(text) => Event::PI(BytesPI::new(text.as_str())),
        Node::DocType(text) => Event::DocType(BytesText::from_escaped(text.as_str())),
    };
    writer.write_event(event).map_err(CatalogError::serialize)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> CatalogResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(CatalogError::serialize);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(CatalogError::serialize)?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(CatalogError::serialize)
}
