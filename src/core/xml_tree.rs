use crate::utils::error::{ExportError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// An owned XML element: name, attributes, concatenated text, children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    /// Parse a whole document into its root element.
    pub fn parse(document: &str) -> Result<XmlElement> {
        let mut reader = Reader::from_str(document);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event()?;
            match event {
                Event::Start(start) => stack.push(Self::from_start(&reader, &start)?),
                Event::Empty(start) => {
                    let element = Self::from_start(&reader, &start)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| ExportError::StructureError {
                        message: format!(
                            "unexpected closing tag at byte {}",
                            reader.buffer_position()
                        ),
                    })?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let decoded = reader
                            .decoder()
                            .decode(&text)
                            .map_err(quick_xml::Error::from)?;
                        let unescaped = quick_xml::escape::unescape(&decoded)
                            .map_err(quick_xml::Error::from)?;
                        current.text.push_str(&unescaped);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::GeneralRef(reference) => {
                    if let Some(current) = stack.last_mut() {
                        let name = reader
                            .decoder()
                            .decode(&reference)
                            .map_err(quick_xml::Error::from)?;
                        current.text.push_str(&resolve_reference(&name));
                    }
                }
                Event::Eof => break,
                // 宣告、註解、處理指令、DOCTYPE
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ExportError::StructureError {
                message: format!("document ended inside <{}>", open.name),
            });
        }

        root.ok_or_else(|| ExportError::StructureError {
            message: "document has no root element".to_string(),
        })
    }

    fn from_start(reader: &Reader<&[u8]>, start: &BytesStart) -> Result<XmlElement> {
        let decoder = reader.decoder();
        let name = decoder
            .decode(start.name().as_ref())
            .map_err(quick_xml::Error::from)?
            .into_owned();

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = decoder
                .decode(attribute.key.as_ref())
                .map_err(quick_xml::Error::from)?
                .into_owned();
            let value = attribute.decode_and_unescape_value(decoder)?.into_owned();
            attributes.push((key, value));
        }

        Ok(XmlElement {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => {
                return Err(ExportError::StructureError {
                    message: format!("second root element <{}>", element.name),
                })
            }
        }
        Ok(())
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text content exactly as written; `None` when empty or whitespace-only.
    pub fn text(&self) -> Option<&str> {
        (!self.text.trim().is_empty()).then_some(self.text.as_str())
    }

    /// Text of the named child, if both exist.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(XmlElement::text)
    }
}

/// Resolve a general entity or character reference (name without `&`/`;`).
/// Unknown entities are kept literally.
fn resolve_reference(name: &str) -> String {
    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        if let Some(ch) = parsed.and_then(char::from_u32) {
            return ch.to_string();
        }
    }

    match name {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        other => format!("&{};", other),
    }
}
