//! In-memory overlay layer standing in for the document's callout root

use std::collections::BTreeMap;

use showcase_annotations::{OverlayElement, OverlayHost, OverlayId, ScreenPlacement};
use showcase_core::{Error, Result};

/// Mounted text callouts keyed by handle
#[derive(Debug)]
pub struct OverlayLayer {
    attached: bool,
    next_id: u64,
    elements: BTreeMap<OverlayId, OverlayElement>,
}

impl OverlayLayer {
    /// A layer with a mount point
    pub fn new() -> Self {
        Self {
            attached: true,
            next_id: 0,
            elements: BTreeMap::new(),
        }
    }

    /// A layer whose mount point is missing; every mount fails
    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::new()
        }
    }

    pub fn get(&self, id: OverlayId) -> Option<&OverlayElement> {
        self.elements.get(&id)
    }

    pub fn elements(&self) -> impl Iterator<Item = (OverlayId, &OverlayElement)> {
        self.elements.iter().map(|(id, e)| (*id, e))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Top-left corner of a visible element of the given pixel size, with its
    /// readability offset applied
    pub fn screen_position(&self, id: OverlayId, width: f32, height: f32) -> Option<(f32, f32)> {
        let placement = self.elements.get(&id)?.placement;
        if !placement.visible {
            return None;
        }
        let (dx, dy) = placement.offset.resolve(width, height);
        Some((placement.x + dx, placement.y + dy))
    }
}

impl Default for OverlayLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayHost for OverlayLayer {
    fn mount(&mut self, element: OverlayElement) -> Result<OverlayId> {
        if !self.attached {
            return Err(Error::ResourceUnavailable("overlay layer has no mount point".to_string()));
        }
        self.next_id += 1;
        let id = OverlayId(self.next_id);
        self.elements.insert(id, element);
        Ok(id)
    }

    fn unmount(&mut self, overlay: OverlayId) {
        self.elements.remove(&overlay);
    }

    fn set_placement(&mut self, overlay: OverlayId, placement: ScreenPlacement) {
        if let Some(element) = self.elements.get_mut(&overlay) {
            element.placement = placement;
        }
    }

    fn set_body(&mut self, overlay: OverlayId, revealed: &str) {
        if let Some(element) = self.elements.get_mut(&overlay) {
            element.body.clear();
            element.body.push_str(revealed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use showcase_annotations::OverlayOffset;

    fn element() -> OverlayElement {
        OverlayElement {
            title: "Battery".to_string(),
            highlight: Some("40h".to_string()),
            body: String::new(),
            placement: ScreenPlacement::hidden(),
        }
    }

    #[test]
    fn test_mount_update_unmount() {
        let mut layer = OverlayLayer::new();
        let id = layer.mount(element()).expect("attached layer");
        layer.set_body(id, "Lasts");
        layer.set_placement(id, ScreenPlacement::at(100.0, 200.0, OverlayOffset::default()));

        let mounted = layer.get(id).expect("mounted");
        assert_eq!(mounted.body, "Lasts");
        assert!(mounted.placement.visible);

        layer.unmount(id);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_detached_layer_rejects_mounts() {
        let mut layer = OverlayLayer::detached();
        assert!(matches!(layer.mount(element()), Err(Error::ResourceUnavailable(_))));
        assert!(layer.is_empty());
    }

    #[test]
    fn test_screen_position_applies_offset() {
        let mut layer = OverlayLayer::new();
        let id = layer.mount(element()).expect("attached layer");
        assert!(layer.screen_position(id, 200.0, 60.0).is_none());

        layer.set_placement(id, ScreenPlacement::at(100.0, 200.0, OverlayOffset::default()));
        let (x, y) = layer.screen_position(id, 200.0, 60.0).expect("visible");
        assert_relative_eq!(x, 120.0);
        assert_relative_eq!(y, 170.0);
    }
}
