// ── XML <-> JSON bridge ──
//
// The device speaks XML; everything above the transport works on a JSON
// rendition of it. Attributes become `@`-prefixed keys, child elements
// become keys named after their tag, repeated children become arrays
// (a lone child stays a bare value), and text-only elements become
// strings. An element with neither text nor children reads as `{}`.

use std::io::Cursor;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde_json::{Map, Value};

use crate::error::Error;

/// Key holding the text of an element that also has attributes or children.
pub const TEXT_KEY: &str = "#text";

struct Frame {
    tag: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, body: &str) -> Result<Self, Error> {
        let tag = utf8(start.name().as_ref(), body)?.to_owned();
        let mut fields = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| malformed(&e, body))?;
            let key = utf8(attr.key.as_ref(), body)?;
            let value = attr.unescape_value().map_err(|e| malformed(&e, body))?;
            fields.insert(format!("@{key}"), Value::String(value.into_owned()));
        }
        Ok(Self {
            tag,
            fields,
            text: String::new(),
        })
    }

    fn close(mut self) -> (String, Value) {
        let text = self.text.trim();
        let value = if self.fields.is_empty() {
            if text.is_empty() {
                Value::Object(Map::new())
            } else {
                Value::String(text.to_owned())
            }
        } else {
            if !text.is_empty() {
                self.fields
                    .insert(TEXT_KEY.to_owned(), Value::String(text.to_owned()));
            }
            Value::Object(self.fields)
        };
        (self.tag, value)
    }
}

/// Add a child under `tag`, turning a repeated tag into an array.
fn insert_child(fields: &mut Map<String, Value>, tag: String, value: Value) {
    match fields.get_mut(&tag) {
        None => {
            fields.insert(tag, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// Parse an XML document into `{"<root tag>": <root value>}`.
pub fn to_value(body: &str) -> Result<Value, Error> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root = Map::new();

    loop {
        match reader.read_event().map_err(|e| malformed(&e, body))? {
            Event::Start(start) => stack.push(Frame::open(&start, body)?),
            Event::Empty(start) => {
                let (tag, value) = Frame::open(&start, body)?.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.fields, tag, value),
                    None => insert_child(&mut root, tag, value),
                }
            }
            Event::End(_) => {
                let Some(frame) = stack.pop() else {
                    return Err(malformed(&"unbalanced closing tag", body));
                };
                let (tag, value) = frame.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.fields, tag, value),
                    None => insert_child(&mut root, tag, value),
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| malformed(&e, body))?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(utf8(&data, body)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(malformed(&"unclosed element", body));
    }
    if root.is_empty() {
        return Err(malformed(&"no root element", body));
    }
    Ok(Value::Object(root))
}

/// Render a JSON element as XML text, one sibling per top-level key.
pub fn to_xml(element: &Value) -> Result<String, Error> {
    let Value::Object(fields) = element else {
        return Err(Error::Encoding {
            message: format!("element must be an object, got {element}"),
        });
    };

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    for (tag, value) in fields {
        write_node(&mut writer, tag, value)?;
    }
    String::from_utf8(writer.into_inner().into_inner()).map_err(|e| Error::Encoding {
        message: e.to_string(),
    })
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, value: &Value) -> Result<(), Error> {
    match value {
        Value::Null => Ok(()),
        Value::Array(items) => items
            .iter()
            .try_for_each(|item| write_node(writer, tag, item)),
        Value::Object(fields) => {
            let mut start = BytesStart::new(tag);
            let mut text = None;
            let mut children = Vec::new();
            for (key, child) in fields {
                if let Some(attr) = key.strip_prefix('@') {
                    start.push_attribute((attr, scalar(child)?.as_str()));
                } else if key == TEXT_KEY {
                    text = Some(scalar(child)?);
                } else {
                    children.push((key, child));
                }
            }

            if text.is_none() && children.is_empty() {
                return emit(writer, Event::Empty(start));
            }
            emit(writer, Event::Start(start))?;
            if let Some(text) = text {
                emit(writer, Event::Text(BytesText::new(&text)))?;
            }
            for (key, child) in children {
                write_node(writer, key, child)?;
            }
            emit(writer, Event::End(BytesEnd::new(tag)))
        }
        scalar_value => {
            let text = scalar(scalar_value)?;
            emit(writer, Event::Start(BytesStart::new(tag)))?;
            emit(writer, Event::Text(BytesText::new(&text)))?;
            emit(writer, Event::End(BytesEnd::new(tag)))
        }
    }
}

fn emit(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<(), Error> {
    writer.write_event(event).map_err(|e| Error::Encoding {
        message: e.to_string(),
    })
}

fn scalar(value: &Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::Encoding {
            message: format!("expected text, got {other}"),
        }),
    }
}

fn utf8<'a>(bytes: &'a [u8], body: &str) -> Result<&'a str, Error> {
    std::str::from_utf8(bytes).map_err(|e| malformed(&e, body))
}

fn malformed(reason: &impl std::fmt::Display, body: &str) -> Error {
    Error::Deserialization {
        message: format!("invalid XML: {reason}"),
        body: body.to_owned(),
    }
}
