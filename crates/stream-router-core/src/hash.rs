// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hash-change events and fragment extraction.

/// A hash-change notification, real or synthesized by `start()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChangeEvent {
    /// URL after the change. Only the part after the first `#` is routed.
    pub new_url: String,
    /// URL before the change, when the source reports it.
    pub old_url: Option<String>,
}

impl HashChangeEvent {
    /// Event carrying only the new URL.
    pub fn new(new_url: impl Into<String>) -> Self {
        Self {
            new_url: new_url.into(),
            old_url: None,
        }
    }

    /// Attach the previous URL.
    pub fn with_old_url(mut self, old_url: impl Into<String>) -> Self {
        self.old_url = Some(old_url.into());
        self
    }

    /// The routed path carried by this event.
    pub fn path(&self) -> &str {
        hash_path(&self.new_url)
    }
}

/// Everything after the first `#`, verbatim. Later `#` characters stay part
/// of the path; a URL without `#` routes as the empty path.
pub fn hash_path(url: &str) -> &str {
    url.split_once('#').map_or("", |(_, fragment)| fragment)
}
