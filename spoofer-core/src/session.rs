//! Front-end session state.
//!
//! The export engine never reads mutable state; it receives a
//! [`RotationMap`] snapshot and an immutable options record. This reducer is
//! where a front end keeps per-file rotations, the selected file and the
//! preview mirror toggle between user actions.

use crate::processing::rotation::{Rotation, RotationDelta};

use std::collections::BTreeMap;

/// Rotation per input file name.
pub type RotationMap = BTreeMap<String, Rotation>;

/// Mutable state of one editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSession {
    uploads: Vec<String>,
    rotations: RotationMap,
    selected: Option<String>,
    mirror_preview: bool,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current upload list.
    ///
    /// A list that differs from the previous one resets every rotation to 0
    /// and selects the first file. Returns whether a reset happened.
    pub fn observe_uploads<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names == self.uploads {
            return false;
        }

        log::debug!("Upload set changed ({} files), resetting rotations", names.len());
        self.rotations = names
            .iter()
            .map(|name| (name.clone(), Rotation::R0))
            .collect();
        self.selected = names.first().cloned();
        self.uploads = names;
        true
    }

    /// Applies a rotation step to one file and returns its new angle.
    pub fn rotate(&mut self, name: &str, delta: RotationDelta) -> Rotation {
        let rotation = self.rotations.entry(name.to_string()).or_default();
        *rotation = rotation.apply(delta);
        *rotation
    }

    /// Flips the single-state mirror toggle and returns the new value.
    pub fn toggle_mirror(&mut self) -> bool {
        self.mirror_preview = !self.mirror_preview;
        self.mirror_preview
    }

    pub fn mirror_preview(&self) -> bool {
        self.mirror_preview
    }

    /// Selects an uploaded file. Unknown names are ignored.
    pub fn select(&mut self, name: &str) -> bool {
        if self.uploads.iter().any(|upload| upload == name) {
            self.selected = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn uploads(&self) -> &[String] {
        &self.uploads
    }

    /// Rotation of a file, 0 if it was never rotated.
    pub fn rotation_of(&self, name: &str) -> Rotation {
        self.rotations.get(name).copied().unwrap_or_default()
    }

    /// Snapshot handed to the export engine.
    pub fn rotation_map(&self) -> RotationMap {
        self.rotations.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uploads_reset_state() {
        let mut session = ExportSession::new();
        assert!(session.observe_uploads(["a.mp4", "b.mov"]));
        assert_eq!(session.selected(), Some("a.mp4"));

        session.rotate("b.mov", RotationDelta::Clockwise);
        session.select("b.mov");
        assert!(!session.observe_uploads(["a.mp4", "b.mov"]));
        assert_eq!(session.rotation_of("b.mov"), Rotation::R90);
        assert_eq!(session.selected(), Some("b.mov"));

        assert!(session.observe_uploads(["b.mov", "a.mp4"]));
        assert_eq!(session.rotation_of("b.mov"), Rotation::R0);
        assert_eq!(session.selected(), Some("b.mov"));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut session = ExportSession::new();
        session.observe_uploads(["clip.mp4"]);
        assert_eq!(session.rotate("clip.mp4", RotationDelta::CounterClockwise), Rotation::R270);
        assert_eq!(session.rotate("clip.mp4", RotationDelta::HalfTurn), Rotation::R90);
        assert_eq!(session.rotate("clip.mp4", RotationDelta::Clockwise), Rotation::R180);
        assert_eq!(session.rotate("clip.mp4", RotationDelta::HalfTurn), Rotation::R0);
    }

    #[test]
    fn test_select_and_mirror_toggle() {
        let mut session = ExportSession::new();
        session.observe_uploads(["a.mp4"]);
        assert!(!session.select("missing.mp4"));
        assert_eq!(session.selected(), Some("a.mp4"));
        assert!(session.toggle_mirror());
        assert!(!session.toggle_mirror());
    }

    #[test]
    fn test_rotation_map_snapshot() {
        let mut session = ExportSession::new();
        session.observe_uploads(["a.mp4", "b.mp4"]);
        session.rotate("a.mp4", RotationDelta::Clockwise);
        let snapshot = session.rotation_map();
        session.rotate("a.mp4", RotationDelta::Clockwise);
        assert_eq!(snapshot.get("a.mp4"), Some(&Rotation::R90));
        assert_eq!(snapshot.get("b.mp4"), Some(&Rotation::R0));
        assert_eq!(session.rotation_of("a.mp4"), Rotation::R180);
    }
}
