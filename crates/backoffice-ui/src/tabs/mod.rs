//! Tabs of the content location view.

use backoffice_core::{Map, SharedString};

mod versions;

pub use versions::{VersionInfo, VersionStatus, VersionsTab, VersionsTabEvent};

/// Common interfaces of the location view tabs.
pub trait LocationViewTab {
    /// Returns the tab identifier.
    fn identifier(&self) -> &'static str;

    /// Returns the localized tab title.
    fn title(&self) -> SharedString;

    /// Returns the variables for the tab template.
    fn variables(&self) -> Map;
}
