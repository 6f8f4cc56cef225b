/// Owned, walkable XML tree. Descriptor and metadata documents are small, so
/// the whole tree is materialized up front and shared behind an `Arc` by the
/// document cache.
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    root: Option<XmlElement>,
}

#[derive(Debug, Clone)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlDocument {
    /// Parses XML text. Malformed input yields an empty document rather than
    /// an error; callers treat "no matching elements" and "unparsable" the
    /// same way.
    pub fn parse(text: &str) -> XmlDocument {
        match roxmltree::Document::parse(text) {
            Ok(doc) => XmlDocument {
                root: Some(convert(doc.root_element())),
            },
            Err(_) => XmlDocument::empty(),
        }
    }

    pub fn empty() -> XmlDocument {
        XmlDocument { root: None }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// All elements matching an absolute path, root element name included,
    /// e.g. `["project", "dependencies", "dependency"]`. Document order.
    pub fn all(&self, path: &[&str]) -> Vec<&XmlElement> {
        let root = match &self.root {
            Some(root) if !path.is_empty() && root.name == path[0] => root,
            _ => return Vec::new(),
        };

        let mut current = vec![root];
        for segment in &path[1..] {
            let mut next = Vec::new();
            for element in current {
                for child in &element.children {
                    if child.name == *segment {
                        next.push(child);
                    }
                }
            }
            current = next;
        }
        current
    }

    /// First element matching an absolute path, in document order.
    pub fn first(&self, path: &[&str]) -> Option<&XmlElement> {
        self.all(path).into_iter().next()
    }
}

impl XmlElement {
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text content of a direct child element. `None` when the child is
    /// absent or carries nested elements instead of text.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        let child = self.child(name)?;
        if child.has_element_children() {
            return None;
        }
        Some(child.text.as_str())
    }

    pub fn has_element_children(&self) -> bool {
        !self.children.is_empty()
    }
}

fn convert(node: roxmltree::Node<'_, '_>) -> XmlElement {
    let mut text = String::new();
    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(convert(child));
        } else if child.is_text() {
            if let Some(t) = child.text() {
                text.push_str(t);
            }
        }
    }

    XmlElement {
        name: node.tag_name().name().to_string(),
        text: text.trim().to_string(),
        children,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_and_walk() {
        let doc = XmlDocument::parse(
            "<project><dependencies>\
                <dependency><groupId>org</groupId><artifactId>a</artifactId></dependency>\
                <dependency><groupId>org</groupId><artifactId>b</artifactId></dependency>\
             </dependencies></project>",
        );

        let deps = doc.all(&["project", "dependencies", "dependency"]);
        assert_eq!(deps.len(), 2);
        assert_eq!(deps[0].child_text("artifactId"), Some("a"));
        assert_eq!(deps[1].child_text("artifactId"), Some("b"));
        assert_eq!(deps[0].child_text("version"), None);
    }

    #[test]
    fn test_malformed_input_yields_empty_document() {
        let doc = XmlDocument::parse("<project><unclosed>");
        assert!(doc.is_empty());
        assert!(doc.all(&["project"]).is_empty());
        assert!(doc.first(&["project", "parent"]).is_none());
    }

    #[test]
    fn test_child_with_nested_elements_has_no_text() {
        let doc = XmlDocument::parse(
            "<project><properties><nested><inner>x</inner></nested><plain>y</plain></properties></project>",
        );
        let props = doc.first(&["project", "properties"]).unwrap();
        assert_eq!(props.child_text("nested"), None);
        assert_eq!(props.child_text("plain"), Some("y"));
    }

    #[test]
    fn test_wrong_root_matches_nothing() {
        let doc = XmlDocument::parse("<metadata><versioning/></metadata>");
        assert!(doc.first(&["project", "versioning"]).is_none());
        assert!(doc.first(&["metadata", "versioning"]).is_some());
    }
}
