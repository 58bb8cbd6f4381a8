//! Minimal owned element tree for OME-XML documents
//!
//! OME metadata documents are small (a handful of `Image` elements with
//! attribute-only children), but series extraction is deferred until the
//! caller asks for each record. The pull events from quick-xml are therefore
//! materialized once into a tiny owned tree that supports namespace-qualified
//! child lookup, ElementTree-style: element tags are stored in the
//! `{namespace-uri}LocalName` form and lookups take `prefix:Local` paths
//! resolved through a prefix map.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::OmeError;

/// Prefix → namespace-URI map used for qualified child lookups.
pub type Namespaces = HashMap<String, String>;

/// One XML element: qualified tag, attributes in document order, children in
/// document order. Text content is not retained (the OME elements modeled
/// here are attribute-only).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified tag, `{namespace-uri}LocalName` when the element is bound
    /// to a namespace, bare local name otherwise
    pub tag: String,
    /// Attribute name/value pairs in document order (xmlns declarations
    /// excluded)
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Look up an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child matching a `prefix:Local` path, resolved through
    /// the namespace map.
    pub fn find(&self, path: &str, ns: &Namespaces) -> Option<&Element> {
        let tag = qualify(path, ns);
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All direct children matching a `prefix:Local` path, in document order.
    pub fn find_all<'a>(&'a self, path: &str, ns: &Namespaces) -> Vec<&'a Element> {
        let tag = qualify(path, ns);
        self.children
            .iter()
            .filter(|child| child.tag == tag)
            .collect()
    }

    /// Consume the element, keeping only the direct children matching a
    /// `prefix:Local` path, in document order.
    pub fn into_children(self, path: &str, ns: &Namespaces) -> Vec<Element> {
        let tag = qualify(path, ns);
        self.children
            .into_iter()
            .filter(|child| child.tag == tag)
            .collect()
    }
}

/// Resolve a `prefix:Local` path against the namespace map. Paths without a
/// prefix, or with a prefix the map does not know, are matched verbatim.
fn qualify(path: &str, ns: &Namespaces) -> String {
    match path.split_once(':') {
        Some((prefix, local)) => match ns.get(prefix) {
            Some(uri) => format!("{{{uri}}}{local}"),
            None => path.to_string(),
        },
        None => path.to_string(),
    }
}

/// Derive the document's namespace map from its root element.
///
/// The primary (`ome`) URI is taken from the root's qualified tag by
/// stripping the leading `{` and splitting at the first `}`. The structured
/// annotation (`sa`) URI is derived from it by replacing every occurrence of
/// `"OME"` with `"SA"`. The OME schema family names its sibling namespaces
/// this way; the substitution assumes that convention and does not verify
/// that the derived URI exists.
pub fn resolve_namespaces(root: &Element) -> Namespaces {
    let ome = root
        .tag
        .strip_prefix('{')
        .and_then(|rest| rest.split_once('}'))
        .map(|(uri, _)| uri)
        .unwrap_or(&root.tag);
    let sa = ome.replace("OME", "SA");

    let mut ns = Namespaces::new();
    ns.insert("ome".to_string(), ome.to_string());
    ns.insert("sa".to_string(), sa);
    ns
}

/// Parse an XML document into its root [`Element`].
///
/// Single pass over the quick-xml event stream. Fails with
/// [`OmeError::Xml`] on ill-formed markup and with
/// [`OmeError::InvalidStructure`] on truncated or rootless input.
pub fn parse(xml: &str) -> Result<Element, OmeError> {
    let mut reader = NsReader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_resolved_event()? {
            (resolution, Event::Start(ref e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(OmeError::InvalidStructure(
                        "content after document root".to_string(),
                    ));
                }
                stack.push(element_from_event(&resolution, e)?);
            }
            (resolution, Event::Empty(ref e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(OmeError::InvalidStructure(
                        "content after document root".to_string(),
                    ));
                }
                let element = element_from_event(&resolution, e)?;
                attach(&mut stack, &mut root, element);
            }
            (_, Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    OmeError::InvalidStructure("unbalanced end tag".to_string())
                })?;
                attach(&mut stack, &mut root, element);
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(OmeError::InvalidStructure(
            "unexpected end of document".to_string(),
        ));
    }
    root.ok_or_else(|| OmeError::InvalidStructure("document has no root element".to_string()))
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn element_from_event(
    resolution: &ResolveResult,
    e: &BytesStart,
) -> Result<Element, OmeError> {
    let local = std::str::from_utf8(e.local_name().as_ref())?.to_string();
    let tag = match resolution {
        ResolveResult::Bound(Namespace(uri)) => {
            format!("{{{}}}{}", std::str::from_utf8(uri)?, local)
        }
        _ => local,
    };

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| OmeError::Xml(quick_xml::Error::from(e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = std::str::from_utf8(&attr.value)?.to_string();
        attributes.push((key.to_string(), value));
    }

    Ok(Element {
        tag,
        attributes,
        children: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const OME_NS: &str = "http://www.openmicroscopy.org/Schemas/OME/2016-06";

    fn sample(body: &str) -> String {
        format!(r#"<OME xmlns="{OME_NS}">{body}</OME>"#)
    }

    #[test]
    fn parses_qualified_tags_and_attributes() {
        let root = parse(&sample(r#"<Image ID="Image:0" Name="decon.dv"/>"#)).unwrap();
        assert_eq!(root.tag, format!("{{{OME_NS}}}OME"));
        assert_eq!(root.children.len(), 1);

        let image = &root.children[0];
        assert_eq!(image.tag, format!("{{{OME_NS}}}Image"));
        assert_eq!(image.get("ID"), Some("Image:0"));
        assert_eq!(image.get("Name"), Some("decon.dv"));
        assert_eq!(image.get("Missing"), None);
    }

    #[test]
    fn xmlns_declarations_are_not_attributes() {
        let root = parse(&sample("")).unwrap();
        assert!(root.attributes.is_empty());
    }

    #[test]
    fn namespace_map_derives_sa_by_substitution() {
        let root = parse(&sample("")).unwrap();
        let ns = resolve_namespaces(&root);
        assert_eq!(ns.get("ome").map(String::as_str), Some(OME_NS));
        assert_eq!(
            ns.get("sa").map(String::as_str),
            Some("http://www.openmicroscopy.org/Schemas/SA/2016-06")
        );
    }

    #[test]
    fn find_all_preserves_document_order() {
        let root = parse(&sample(
            r#"<Image ID="Image:0"/><Other/><Image ID="Image:1"/>"#,
        ))
        .unwrap();
        let ns = resolve_namespaces(&root);

        let images = root.find_all("ome:Image", &ns);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].get("ID"), Some("Image:0"));
        assert_eq!(images[1].get("ID"), Some("Image:1"));
        assert!(root.find("ome:Image", &ns).is_some());
        assert!(root.find("ome:Pixels", &ns).is_none());
    }

    #[test]
    fn truncated_document_is_rejected() {
        let err = parse(r#"<OME xmlns="urn:x"><Image ID="Image:0">"#).unwrap_err();
        assert!(matches!(err, OmeError::InvalidStructure(_) | OmeError::Xml(_)));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            parse(""),
            Err(OmeError::InvalidStructure(_))
        ));
    }
}
