// API command sentences
//
// A command is a menu path followed by attribute words. The device protocol
// encodes every attribute as `=name=value`; flags are attributes with an empty
// value (`=once=`). Property lists go through the `.proplist` attribute.

use std::fmt;

/// Attribute used to restrict which properties a reply carries.
pub const PROPLIST: &str = ".proplist";

/// Attribute used to address a single item by id or name.
pub const ID: &str = ".id";

/// One command sentence: a menu path plus ordered attribute words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    path: String,
    attributes: Vec<(String, String)>,
}

impl Command {
    /// Start a command for the given menu path (e.g. `/interface/lte/print`).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: Vec::new(),
        }
    }

    /// Append a valueless flag, encoded as `=name=`.
    pub fn flag(self, name: impl Into<String>) -> Self {
        self.attribute(name, "")
    }

    /// Append an attribute, encoded as `=name=value`.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Restrict the reply to the listed properties.
    pub fn proplist<S: AsRef<str>>(self, props: &[S]) -> Self {
        let joined = props
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        self.attribute(PROPLIST, joined)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up an attribute value. Flags return `Some("")`.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The properties requested via `.proplist`, if any.
    pub fn requested_properties(&self) -> Option<Vec<&str>> {
        self.attribute_value(PROPLIST)
            .map(|list| list.split(',').filter(|p| !p.is_empty()).collect())
    }

    /// Encode the full sentence, path first.
    pub fn words(&self) -> Vec<String> {
        std::iter::once(self.path.clone())
            .chain(self.attributes.iter().map(|(k, v)| format!("={k}={v}")))
            .collect()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words().join(" "))
    }
}
