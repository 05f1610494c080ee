//! Declarative description of a model exposed in the admin.

use serde::Serialize;

/// How a field is rendered and read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKind {
    String,
    Number,
    /// Pre-rendered markup, display only
    Html,
    /// Write-only; a blank submission keeps the stored value
    Password,
}

/// Field override attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub name: String,
    pub kind: MetaKind,
}

impl Meta {
    pub fn new(name: impl Into<String>, kind: MetaKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A model registered in the admin, with the fields shown on each page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub menu: Vec<String>,
    pub index_attrs: Vec<String>,
    pub edit_attrs: Vec<String>,
    pub new_attrs: Vec<String>,
    pub metas: Vec<Meta>,
    #[serde(skip)]
    attrs: Vec<String>,
}

impl Resource {
    /// Every page starts out showing all of `attrs`.
    pub fn new(name: impl Into<String>, path: impl Into<String>, attrs: &[&str]) -> Self {
        let attrs: Vec<String> = attrs.iter().map(|a| a.to_string()).collect();
        Self {
            name: name.into(),
            path: path.into(),
            menu: Vec::new(),
            index_attrs: attrs.clone(),
            edit_attrs: attrs.clone(),
            new_attrs: attrs.clone(),
            metas: Vec::new(),
            attrs,
        }
    }

    pub fn menu(mut self, menu: &[&str]) -> Self {
        self.menu = menu.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn index_attrs(mut self, attrs: &[&str]) -> Self {
        self.index_attrs = self.select(attrs);
        self
    }

    pub fn edit_attrs(mut self, attrs: &[&str]) -> Self {
        self.edit_attrs = self.select(attrs);
        self
    }

    pub fn new_attrs(mut self, attrs: &[&str]) -> Self {
        self.new_attrs = self.select(attrs);
        self
    }

    /// Add a meta, replacing any previous one with the same name.
    pub fn meta(mut self, meta: Meta) -> Self {
        self.metas.retain(|m| m.name != meta.name);
        self.metas.push(meta);
        self
    }

    pub fn find_meta(&self, name: &str) -> Option<&Meta> {
        self.metas.iter().find(|m| m.name == name)
    }

    /// Resolve an attribute selection.
    ///
    /// Plain names are taken as given, in order. A `-Name` entry removes
    /// that attribute; when the selection only has removals they apply to
    /// the full attribute list.
    fn select(&self, requested: &[&str]) -> Vec<String> {
        let excluded: Vec<&str> = requested
            .iter()
            .filter_map(|attr| attr.strip_prefix('-'))
            .collect();
        let included: Vec<&str> = requested
            .iter()
            .copied()
            .filter(|attr| !attr.starts_with('-'))
            .collect();

        let base: Vec<&str> = if included.is_empty() {
            self.attrs.iter().map(String::as_str).collect()
        } else {
            included
        };

        base.into_iter()
            .filter(|attr| !excluded.contains(attr))
            .map(str::to_string)
            .collect()
    }
}
