use super::LocationViewTab;
use crate::localize;
use ahash::HashSet;
use backoffice_core::{datetime::DateTime, extension::JsonObjectExt, JsonValue, Map, SharedString};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use unic_langid::LanguageIdentifier;

/// Status of a content version.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionStatus {
    /// A version being edited.
    #[default]
    Draft,
    /// The published version.
    Published,
    /// A previously published version.
    Archived,
}

impl From<VersionStatus> for JsonValue {
    #[inline]
    fn from(value: VersionStatus) -> Self {
        value.as_ref().into()
    }
}

/// Information about a content version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    /// Version id.
    pub id: String,
    /// Version number.
    pub version_no: u32,
    /// Status.
    pub status: VersionStatus,
    /// Language codes of the translations.
    #[serde(default)]
    pub language_codes: Vec<String>,
    /// Modification date.
    pub modification_date: DateTime,
    /// Id of the creator.
    #[serde(default)]
    pub creator_id: String,
}

impl VersionInfo {
    /// Creates a new instance modified just now.
    pub fn new(id: impl Into<String>, version_no: u32, status: VersionStatus) -> Self {
        Self {
            id: id.into(),
            version_no,
            status,
            language_codes: Vec::new(),
            modification_date: DateTime::now(),
            creator_id: String::new(),
        }
    }
}

/// Events fired by the versions tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VersionsTabEvent {
    /// Loads the versions of the content.
    LoadVersions {
        /// Content id.
        content_id: String,
    },
    /// Creates a draft from an archived version.
    CreateDraft {
        /// Content id.
        content_id: String,
        /// Number of the archived version.
        version_no: u32,
    },
    /// Deletes the draft versions.
    DeleteVersionDraft {
        /// Drafts to be deleted.
        versions: Vec<VersionInfo>,
    },
}

/// State of the versions tab.
#[derive(Debug, Clone)]
pub struct VersionsTab {
    content_id: String,
    locale: LanguageIdentifier,
    archived: Vec<VersionInfo>,
    published: Vec<VersionInfo>,
    draft: Vec<VersionInfo>,
    checked: HashSet<String>,
    checkboxes_disabled: bool,
    loading_error: bool,
}

impl VersionsTab {
    /// Tab identifier.
    pub const IDENTIFIER: &'static str = "versions";

    /// Creates a new instance for the content.
    pub fn new(content_id: impl Into<String>, locale: LanguageIdentifier) -> Self {
        Self {
            content_id: content_id.into(),
            locale,
            archived: Vec::new(),
            published: Vec::new(),
            draft: Vec::new(),
            checked: HashSet::default(),
            checkboxes_disabled: false,
            loading_error: false,
        }
    }

    /// Returns the content id.
    #[inline]
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// Returns the event to load the versions.
    #[inline]
    pub fn load_versions(&self) -> VersionsTabEvent {
        VersionsTabEvent::LoadVersions {
            content_id: self.content_id.clone(),
        }
    }

    /// Replaces the versions and clears the selection.
    pub fn set_versions(&mut self, versions: Vec<VersionInfo>) {
        self.archived.clear();
        self.published.clear();
        self.draft.clear();
        for version in versions {
            match version.status {
                VersionStatus::Archived => self.archived.push(version),
                VersionStatus::Published => self.published.push(version),
                VersionStatus::Draft => self.draft.push(version),
            }
        }
        self.checked.clear();
        self.checkboxes_disabled = false;
        self.loading_error = false;
        tracing::debug!(
            content_id = self.content_id.as_str(),
            archived = self.archived.len(),
            published = self.published.len(),
            draft = self.draft.len(),
            "versions loaded"
        );
    }

    /// Sets the `loading_error` flag.
    #[inline]
    pub fn set_loading_error(&mut self, loading_error: bool) {
        self.loading_error = loading_error;
    }

    /// Returns the versions with the status.
    #[inline]
    pub fn versions(&self, status: VersionStatus) -> &[VersionInfo] {
        match status {
            VersionStatus::Archived => &self.archived,
            VersionStatus::Published => &self.published,
            VersionStatus::Draft => &self.draft,
        }
    }

    /// Returns `true` if the checkboxes are disabled.
    #[inline]
    pub fn checkboxes_disabled(&self) -> bool {
        self.checkboxes_disabled
    }

    /// Checks or unchecks the checkbox of an archived or a draft version.
    /// Returns `false` if the checkbox is disabled or does not exist.
    pub fn set_checked(&mut self, version_id: &str, checked: bool) -> bool {
        if self.checkboxes_disabled {
            return false;
        }

        let has_checkbox = self
            .archived
            .iter()
            .chain(self.draft.iter())
            .any(|version| version.id == version_id);
        if !has_checkbox {
            tracing::debug!(version_id, "no checkbox for the version");
            return false;
        }
        if checked {
            self.checked.insert(version_id.to_owned());
        } else {
            self.checked.remove(version_id);
        }
        true
    }

    /// Returns the checked archived versions.
    pub fn selected_archived(&self) -> Vec<&VersionInfo> {
        self.archived
            .iter()
            .filter(|version| self.checked.contains(&version.id))
            .collect()
    }

    /// Returns the checked draft versions.
    pub fn selected_drafts(&self) -> Vec<&VersionInfo> {
        self.draft
            .iter()
            .filter(|version| self.checked.contains(&version.id))
            .collect()
    }

    /// Returns `true` if exactly one archived version is checked.
    #[inline]
    pub fn can_create_draft_from_archived(&self) -> bool {
        self.selected_archived().len() == 1
    }

    /// Returns `true` if at least one draft is checked.
    #[inline]
    pub fn can_delete_drafts(&self) -> bool {
        !self.selected_drafts().is_empty()
    }

    /// Returns the event to create a draft from the checked archived version,
    /// and disables the checkboxes.
    pub fn create_draft_from_archived(&mut self) -> Option<VersionsTabEvent> {
        let version_no = match self.selected_archived().as_slice() {
            [version] => version.version_no,
            _ => return None,
        };
        self.checkboxes_disabled = true;
        Some(VersionsTabEvent::CreateDraft {
            content_id: self.content_id.clone(),
            version_no,
        })
    }

    /// Returns the event to delete the checked drafts, and disables the checkboxes.
    pub fn delete_drafts(&mut self) -> Option<VersionsTabEvent> {
        let versions = self
            .selected_drafts()
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        if versions.is_empty() {
            return None;
        }
        self.checkboxes_disabled = true;
        Some(VersionsTabEvent::DeleteVersionDraft { versions })
    }

    /// Handles the result of deleting the drafts.
    /// Returns the event to reload the versions if any of them has been removed.
    pub fn after_delete_versions(&mut self, removed: bool) -> Option<VersionsTabEvent> {
        if removed {
            Some(self.load_versions())
        } else {
            self.checkboxes_disabled = false;
            None
        }
    }
}

impl LocationViewTab for VersionsTab {
    #[inline]
    fn identifier(&self) -> &'static str {
        Self::IDENTIFIER
    }

    #[inline]
    fn title(&self) -> SharedString {
        localize(&self.locale, "versions-tab-title", None)
    }

    fn variables(&self) -> Map {
        let mut map = Map::from_entry("archivedVersions", versions_to_json(&self.archived));
        map.upsert("publishedVersions", versions_to_json(&self.published));
        map.upsert("draftVersions", versions_to_json(&self.draft));
        map.upsert("hasArchived", !self.archived.is_empty());
        map.upsert("hasPublished", !self.published.is_empty());
        map.upsert("hasDraft", !self.draft.is_empty());
        map.upsert("loadingError", self.loading_error);
        map
    }
}

/// Converts the versions into a JSON array.
fn versions_to_json(versions: &[VersionInfo]) -> JsonValue {
    serde_json::to_value(versions).unwrap_or_else(|err| {
        tracing::error!("fail to serialize the versions: {err}");
        JsonValue::Array(Vec::new())
    })
}
