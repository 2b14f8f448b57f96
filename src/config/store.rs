//! Path-addressed access to the compositor's rc.xml document.
//!
//! Elements are addressed with slash-separated paths rooted at the document
//! element, e.g. `/labwc_config/theme/titlebar/layout`. A segment may carry
//! an attribute predicate, `font[@place='ActiveWindow']`, which restricts the
//! match to elements with that attribute value. Element names are matched
//! ASCII case-insensitively, so `theme/cornerradius` finds `<cornerRadius>`.

use log::{info, warn};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Document element of a labwc configuration file.
pub const ROOT_ELEMENT: &str = "labwc_config";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: quick_xml::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone)]
enum Node {
    Element(Element),
    Comment(String),
}

#[derive(Debug, Clone, Default)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Node>,
}

impl Element {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn matches(&self, segment: &Segment<'_>) -> bool {
        if !self.name.eq_ignore_ascii_case(segment.name) {
            return false;
        }
        match segment.attr {
            Some((key, value)) => self
                .attrs
                .iter()
                .any(|(k, v)| k.eq_ignore_ascii_case(key) && v == value),
            None => true,
        }
    }

    fn child(&self, segment: &Segment<'_>) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Element(el) if el.matches(segment) => Some(el),
            _ => None,
        })
    }

    /// Find a matching child, creating one (with the predicate attribute)
    /// when none exists yet.
    fn ensure_child(&mut self, segment: &Segment<'_>) -> &mut Element {
        let pos = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(el) if el.matches(segment)));
        let idx = match pos {
            Some(idx) => idx,
            None => {
                let mut el = Element::named(segment.name);
                if let Some((key, value)) = segment.attr {
                    el.attrs.push((key.to_string(), value.to_string()));
                }
                self.children.push(Node::Element(el));
                self.children.len() - 1
            }
        };
        match &mut self.children[idx] {
            Node::Element(el) => el,
            Node::Comment(_) => unreachable!("position matched an element"),
        }
    }
}

/// One path segment: an element name plus an optional attribute predicate.
#[derive(Debug, PartialEq, Eq)]
struct Segment<'a> {
    name: &'a str,
    attr: Option<(&'a str, &'a str)>,
}

fn parse_segment(raw: &str) -> Segment<'_> {
    if let Some(start) = raw.find("[@") {
        let name = &raw[..start];
        let rest = &raw[start + 2..];
        if let Some(eq) = rest.find("='") {
            if let Some(value) = rest[eq + 2..].strip_suffix("']") {
                return Segment {
                    name,
                    attr: Some((&rest[..eq], value)),
                };
            }
        }
    }
    Segment {
        name: raw,
        attr: None,
    }
}

fn parse_path(path: &str) -> Vec<Segment<'_>> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(parse_segment)
        .collect()
}

/// C `atoi` semantics: optional sign, leading digits, 0 on anything else.
fn leading_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().map(|v| sign * v).unwrap_or(0)
}

/// In-memory rc.xml document bound to the file it was loaded from.
///
/// All operations are synchronous and run on the UI thread; `save` rewrites
/// the whole file, once per edit.
pub struct ConfigStore {
    path: PathBuf,
    root: Element,
}

impl ConfigStore {
    /// Load the document at `path`. A missing file yields an empty
    /// `<labwc_config/>` tree bound to the same location.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            info!("no configuration at {}, starting empty", path.display());
            return Ok(Self::empty(path));
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let root = parse_document(&content).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;
        Ok(Self { path, root })
    }

    /// An empty document bound to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: Element::named(ROOT_ELEMENT),
        }
    }

    /// File this store reads from and writes to.
    pub fn file(&self) -> &Path {
        &self.path
    }

    /// Text of the first element matching `path`, document order.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.lookup(path).map(|el| el.text.as_str())
    }

    /// Integer value of an element, 0 when absent or non-numeric.
    pub fn get_int(&self, path: &str) -> i32 {
        self.get(path).map(leading_int).unwrap_or(0)
    }

    /// Boolean value of an element: `yes`, `true` or `1` count as true,
    /// everything else (including an absent element) as false.
    pub fn get_bool(&self, path: &str) -> bool {
        self.get(path).is_some_and(|v| {
            let v = v.trim();
            v.eq_ignore_ascii_case("yes") || v.eq_ignore_ascii_case("true") || v == "1"
        })
    }

    /// Replace the text of the element at `path`, creating missing elements
    /// along the way. A predicate segment creates the attribute with it.
    pub fn set(&mut self, path: &str, value: &str) {
        let segments = parse_path(path);
        let mut iter = segments.iter();
        let Some(first) = iter.next() else {
            return;
        };
        if !self.root.matches(first) {
            warn!("config path {} does not start at /{}", path, self.root.name);
            return;
        }
        let mut current = &mut self.root;
        for segment in iter {
            current = current.ensure_child(segment);
        }
        current.text = value.to_string();
    }

    /// Serialize the document back to its file.
    pub fn save(&self) -> Result<(), StoreError> {
        let bytes = write_document(&self.root).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::Other, e),
        })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, bytes).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn lookup(&self, path: &str) -> Option<&Element> {
        let segments = parse_path(path);
        let mut iter = segments.iter();
        let first = iter.next()?;
        if !self.root.matches(first) {
            return None;
        }
        let mut current = &self.root;
        for segment in iter {
            current = current.child(segment)?;
        }
        Some(current)
    }
}

fn parse_document(input: &str) -> Result<Element, quick_xml::Error> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let el = element_from_start(&start)?;
                attach(&mut stack, &mut root, Node::Element(el));
            }
            Event::End(_) => {
                if let Some(done) = stack.pop() {
                    attach(&mut stack, &mut root, Node::Element(done));
                }
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    let text = text.unescape()?;
                    let text = text.trim();
                    if !text.is_empty() {
                        if !current.text.is_empty() {
                            current.text.push(' ');
                        }
                        current.text.push_str(text);
                    }
                }
            }
            Event::Comment(comment) => {
                let text = String::from_utf8_lossy(comment.as_ref()).into_owned();
                attach(&mut stack, &mut root, Node::Comment(text));
            }
            Event::Eof => break,
            // declaration, doctype, processing instructions, CDATA
            _ => {}
        }
    }
    Ok(root.unwrap_or_else(|| Element::named(ROOT_ELEMENT)))
}

/// Hand a finished node to its parent, or promote it to document element.
/// Comments outside the document element are dropped.
fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if let Node::Element(el) = node {
        if root.is_none() {
            *root = Some(el);
        }
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, quick_xml::Error> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut el = Element::named(&name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        el.attrs.push((key, value));
    }
    Ok(el)
}

fn write_document(root: &Element) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    write_element(&mut writer, root)?;
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_node<W: io::Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), quick_xml::Error> {
    match node {
        Node::Element(el) => write_element(writer, el),
        Node::Comment(text) => {
            writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
        }
    }
}

fn write_element<W: io::Write>(
    writer: &mut Writer<W>,
    el: &Element,
) -> Result<(), quick_xml::Error> {
    let mut start = BytesStart::new(el.name.as_str());
    for (key, value) in &el.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if el.text.is_empty() && el.children.is_empty() {
        return writer.write_event(Event::Empty(start));
    }
    writer.write_event(Event::Start(start))?;
    if !el.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&el.text)))?;
    }
    for child in &el.children {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(el.name.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<labwc_config>
  <!-- theme settings -->
  <theme>
    <name>Clearlooks</name>
    <cornerRadius>8</cornerRadius>
    <dropShadows>yes</dropShadows>
    <titlebar>
      <layout>icon:iconify,max,close</layout>
      <showTitle>no</showTitle>
    </titlebar>
    <font place="ActiveWindow">
      <name>Noto Sans</name>
      <size>11</size>
    </font>
  </theme>
  <placement>
    <policy>Center</policy>
  </placement>
  <core>
    <gap>4</gap>
  </core>
</labwc_config>
"#;

    fn sample_store() -> ConfigStore {
        ConfigStore {
            path: PathBuf::from("/nonexistent/rc.xml"),
            root: parse_document(SAMPLE).expect("sample parses"),
        }
    }

    fn temp_rc(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("labwc-tweaks-store-{}-{}.xml", std::process::id(), name))
    }

    #[test]
    fn test_get_walks_path() {
        let store = sample_store();
        assert_eq!(
            store.get("/labwc_config/theme/titlebar/layout"),
            Some("icon:iconify,max,close")
        );
        assert_eq!(store.get("/labwc_config/theme/name"), Some("Clearlooks"));
        assert_eq!(store.get("/labwc_config/theme/missing"), None);
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let store = sample_store();
        assert_eq!(store.get("/labwc_config/theme/cornerradius"), Some("8"));
        assert_eq!(store.get_int("/labwc_config/THEME/cornerRadius"), 8);
    }

    #[test]
    fn test_predicate_selects_scoped_element() {
        let store = sample_store();
        assert_eq!(
            store.get("/labwc_config/theme/font[@place='ActiveWindow']/name"),
            Some("Noto Sans")
        );
        assert_eq!(
            store.get("/labwc_config/theme/font[@place='InactiveWindow']/name"),
            None
        );
    }

    #[test]
    fn test_bare_segment_matches_first_element() {
        // Without a predicate the first font element wins, attributes or not.
        let store = sample_store();
        assert_eq!(store.get("/labwc_config/theme/font/name"), Some("Noto Sans"));
    }

    #[test]
    fn test_get_int_atoi_semantics() {
        let store = sample_store();
        assert_eq!(store.get_int("/labwc_config/core/gap"), 4);
        // "Center" is not a number
        assert_eq!(store.get_int("/labwc_config/placement/policy"), 0);
        assert_eq!(store.get_int("/labwc_config/nothing/here"), 0);
    }

    #[test]
    fn test_get_bool_variants() {
        let mut store = sample_store();
        assert!(store.get_bool("/labwc_config/theme/dropShadows"));
        assert!(!store.get_bool("/labwc_config/theme/titlebar/showTitle"));
        assert!(!store.get_bool("/labwc_config/absent"));
        store.set("/labwc_config/core/adaptiveSync", "TRUE");
        assert!(store.get_bool("/labwc_config/core/adaptiveSync"));
        store.set("/labwc_config/core/adaptiveSync", "1");
        assert!(store.get_bool("/labwc_config/core/adaptiveSync"));
    }

    #[test]
    fn test_set_replaces_existing() {
        let mut store = sample_store();
        store.set("/labwc_config/theme/name", "Onyx");
        assert_eq!(store.get("/labwc_config/theme/name"), Some("Onyx"));
    }

    #[test]
    fn test_set_creates_missing_path() {
        let mut store = sample_store();
        store.set("/labwc_config/focus/followMouse", "yes");
        assert!(store.get_bool("/labwc_config/focus/followMouse"));
    }

    #[test]
    fn test_set_creates_predicate_attribute() {
        let mut store = sample_store();
        store.set(
            "/labwc_config/theme/font[@place='InactiveWindow']/weight",
            "bold",
        );
        assert_eq!(
            store.get("/labwc_config/theme/font[@place='InactiveWindow']/weight"),
            Some("bold")
        );
        // The existing ActiveWindow scope is untouched.
        assert_eq!(
            store.get("/labwc_config/theme/font[@place='ActiveWindow']/name"),
            Some("Noto Sans")
        );
    }

    #[test]
    fn test_save_then_reload() {
        let path = temp_rc("reload");
        let mut store = sample_store();
        store.path = path.clone();
        store.set("/labwc_config/theme/cornerradius", "12");
        store.save().expect("save");

        let reloaded = ConfigStore::load(&path).expect("load");
        assert_eq!(reloaded.get_int("/labwc_config/theme/cornerRadius"), 12);
        assert_eq!(
            reloaded.get("/labwc_config/theme/font[@place='ActiveWindow']/size"),
            Some("11")
        );

        let written = fs::read_to_string(&path).expect("read back");
        assert!(written.contains("<!-- theme settings -->"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_yields_empty_document() {
        let path = temp_rc("missing");
        let _ = fs::remove_file(&path);
        let store = ConfigStore::load(&path).expect("load");
        assert_eq!(store.get("/labwc_config/theme/name"), None);
        assert_eq!(store.file(), path.as_path());
    }

    #[test]
    fn test_segment_parsing() {
        assert_eq!(
            parse_segment("font[@place='ActiveWindow']"),
            Segment {
                name: "font",
                attr: Some(("place", "ActiveWindow")),
            }
        );
        assert_eq!(
            parse_segment("theme"),
            Segment {
                name: "theme",
                attr: None,
            }
        );
        // A malformed predicate falls back to a literal name match.
        assert_eq!(parse_segment("font[@place=").name, "font[@place=");
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("42"), 42);
        assert_eq!(leading_int("  -3"), -3);
        assert_eq!(leading_int("12px"), 12);
        assert_eq!(leading_int("Center"), 0);
        assert_eq!(leading_int(""), 0);
    }
}
