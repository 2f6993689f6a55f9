//! Reference host
//!
//! A small in-memory content tree loaded from a JSON or TOML document. It does
//! the host-side work the gate expects to be done already: resolving schema
//! fields and materializing each page's ancestor chain by walking parent links.

mod record;

pub use record::{FieldValue, PageRecord, ViewerRecord};

use crate::error::SiteError;
use crate::node::{AncestorRef, Node, Viewer};
use crate::types::NodeId;
use crate::window::{FieldNames, ReleaseWindow};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// Serialized form of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDocument {
    #[serde(default)]
    pub pages: Vec<PageRecord>,
    #[serde(default)]
    pub viewers: Vec<ViewerRecord>,
    /// Viewer used when a check names no viewer.
    #[serde(default)]
    pub current_viewer: Option<String>,
}

impl SiteDocument {
    /// Read a document, choosing the parser from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, SiteError> {
        let raw = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&raw)?),
            Some("toml") => Ok(toml::from_str(&raw)?),
            other => Err(SiteError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

pub struct Site {
    pages: BTreeMap<NodeId, PageRecord>,
    viewers: BTreeMap<String, Viewer>,
    current: Viewer,
    fields: FieldNames,
}

impl Site {
    pub fn load(path: &Path, fields: &FieldNames) -> Result<Self, SiteError> {
        let document = SiteDocument::from_path(path)?;
        debug!(
            path = %path.display(),
            pages = document.pages.len(),
            viewers = document.viewers.len(),
            "Site document loaded"
        );
        Self::from_document(document, fields)
    }

    /// Index a document. Rejects duplicate page ids and viewer names, and
    /// window fields whose values cannot be read as datetimes or checkboxes.
    pub fn from_document(document: SiteDocument, fields: &FieldNames) -> Result<Self, SiteError> {
        let mut pages = BTreeMap::new();
        for page in document.pages {
            let invalid = |field: &str, reason: String| SiteError::InvalidField {
                page: page.id,
                field: field.to_string(),
                reason,
            };
            for field in [&fields.start, &fields.end] {
                if let Some(Some(value)) = page.fields.get(field.as_str()) {
                    value.as_timestamp().map_err(|reason| invalid(field.as_str(), reason))?;
                }
            }
            for field in [&fields.start_activate, &fields.end_activate] {
                if let Some(Some(value)) = page.fields.get(field.as_str()) {
                    value.parse_flag().map_err(|reason| invalid(field.as_str(), reason))?;
                }
            }
            let id = page.id;
            if pages.insert(id, page).is_some() {
                return Err(SiteError::DuplicatePage(id));
            }
        }

        let mut viewers = BTreeMap::new();
        for record in &document.viewers {
            if viewers
                .insert(record.name.clone(), Viewer::from(record))
                .is_some()
            {
                return Err(SiteError::DuplicateViewer(record.name.clone()));
            }
        }

        let current = match &document.current_viewer {
            Some(name) => viewers
                .get(name)
                .cloned()
                .ok_or_else(|| SiteError::ViewerNotFound(name.clone()))?,
            None => Viewer::default(),
        };

        Ok(Self {
            pages,
            viewers,
            current,
            fields: fields.clone(),
        })
    }

    pub fn page(&self, id: NodeId) -> Result<&PageRecord, SiteError> {
        self.pages.get(&id).ok_or(SiteError::PageNotFound(id))
    }

    pub fn pages(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.values()
    }

    pub fn viewer(&self, name: &str) -> Result<&Viewer, SiteError> {
        self.viewers
            .get(name)
            .ok_or_else(|| SiteError::ViewerNotFound(name.to_string()))
    }

    /// The ambient viewer for checks that name none.
    pub fn current_viewer(&self) -> &Viewer {
        &self.current
    }

    pub fn window(&self, page: &PageRecord) -> ReleaseWindow {
        ReleaseWindow::from_fields(page, &self.fields)
    }

    /// Materialize a page as a [`Node`], nearest ancestor first.
    ///
    /// A parent id that is not in the site becomes an unresolved entry and
    /// ends the walk.
    pub fn node(&self, id: NodeId) -> Result<Node, SiteError> {
        let page = self.page(id)?;
        let mut visited = HashSet::from([id]);
        let mut ancestors = Vec::new();
        let mut next = page.parent;

        while let Some(parent_id) = next {
            if !visited.insert(parent_id) {
                return Err(SiteError::ParentCycle(parent_id));
            }
            match self.pages.get(&parent_id) {
                Some(parent) => {
                    ancestors.push(AncestorRef::persisted(parent_id, self.window(parent)));
                    next = parent.parent;
                }
                None => {
                    warn!(page = %id, parent = %parent_id, "Parent page missing from site");
                    ancestors.push(AncestorRef::Unresolved);
                    next = None;
                }
            }
        }

        Ok(Node::new(id, self.window(page)).with_ancestors(ancestors))
    }
}
