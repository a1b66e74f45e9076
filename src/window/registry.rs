//! Panel records, lifecycle transitions, z-order and element bindings.
//!
//! Every method tolerates unknown ids by returning `false`/`None`; nothing
//! here can fail.

use std::collections::BTreeMap;

use super::{
    ControlAction, ElementId, FullscreenMode, Panel, PanelEvent, PanelEventKind, PanelId,
    PanelSpec, ResizeController, Visibility,
};

#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: BTreeMap<PanelId, Panel>,
    // bottom-most first; contains every registered panel, open or not
    z_order: Vec<PanelId>,
    triggers: BTreeMap<ElementId, PanelId>,
    controls: BTreeMap<ElementId, (PanelId, ControlAction)>,
    events: Vec<PanelEvent>,
    next_seq: usize,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a panel. Returns `false` if the id is already registered; the
    /// existing record is left untouched.
    pub fn insert(&mut self, spec: PanelSpec) -> bool {
        if self.panels.contains_key(&spec.id) {
            tracing::debug!(panel = %spec.id, "panel already registered");
            return false;
        }
        let order = self.next_seq;
        self.next_seq = order.saturating_add(1);
        let id = spec.id.clone();
        tracing::debug!(panel = %id, seq = order, "registered panel");
        self.panels.insert(id.clone(), Panel::from_spec(spec, order));
        self.z_order.push(id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.panels.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Panel> {
        self.panels.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Panel> {
        self.panels.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Panels from bottom-most to top-most.
    pub fn iter_z(&self) -> impl Iterator<Item = &Panel> {
        self.z_order.iter().filter_map(|id| self.panels.get(id))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Panel> {
        self.panels.values_mut()
    }

    pub fn z_order(&self) -> &[PanelId] {
        &self.z_order
    }

    /// The top-most open panel.
    pub fn topmost_open(&self) -> Option<&PanelId> {
        self.z_order
            .iter()
            .rev()
            .find(|id| self.panels.get(*id).is_some_and(Panel::is_open))
    }

    pub fn bring_to_front(&mut self, id: &str) -> bool {
        let Some(pos) = self.z_order.iter().position(|x| x.as_str() == id) else {
            return false;
        };
        let item = self.z_order.remove(pos);
        self.z_order.push(item);
        true
    }

    pub fn send_to_back(&mut self, id: &str) -> bool {
        let Some(pos) = self.z_order.iter().position(|x| x.as_str() == id) else {
            return false;
        };
        let item = self.z_order.remove(pos);
        self.z_order.insert(0, item);
        true
    }

    /// Closed/Minimized → Open. Re-opening an open panel re-applies the
    /// offset reset and emits another `Opened`.
    pub fn open(&mut self, id: &str) -> bool {
        let Some(panel) = self.panels.get_mut(id) else {
            return false;
        };
        panel.visibility = Visibility::Open;
        if let Some(drag) = panel.drag.as_mut() {
            drag.reset();
        }
        let id = panel.id.clone();
        tracing::debug!(panel = %id, "opened panel");
        self.bring_to_front(id.as_str());
        self.events.push(PanelEvent::new(id, PanelEventKind::Opened));
        true
    }

    /// Hide the panel and request teardown. Closing a closed panel is a no-op.
    pub fn close(&mut self, id: &str) -> bool {
        let Some(panel) = self.panels.get_mut(id) else {
            return false;
        };
        if panel.visibility == Visibility::Closed {
            return false;
        }
        panel.visibility = Visibility::Closed;
        end_gestures(panel);
        tracing::debug!(panel = %panel.id, "closed panel");
        self.events
            .push(PanelEvent::new(panel.id.clone(), PanelEventKind::Closed));
        true
    }

    /// Open → Minimized, no teardown.
    pub fn minimize(&mut self, id: &str) -> bool {
        let Some(panel) = self.panels.get_mut(id) else {
            return false;
        };
        if panel.visibility != Visibility::Open {
            return false;
        }
        panel.visibility = Visibility::Minimized;
        end_gestures(panel);
        tracing::debug!(panel = %panel.id, "minimized panel");
        self.events
            .push(PanelEvent::new(panel.id.clone(), PanelEventKind::Minimized));
        true
    }

    pub(crate) fn set_fullscreen(&mut self, id: &str, mode: FullscreenMode) -> bool {
        let Some(panel) = self.panels.get_mut(id) else {
            return false;
        };
        if panel.fullscreen == mode {
            return false;
        }
        panel.fullscreen = mode;
        self.events.push(PanelEvent::new(
            panel.id.clone(),
            PanelEventKind::Fullscreen(mode),
        ));
        true
    }

    /// Give the panel a resize grip. Returns `false` if it already has one or
    /// the id is unknown.
    pub fn attach_resize(&mut self, id: &str) -> bool {
        let Some(panel) = self.panels.get_mut(id) else {
            return false;
        };
        if panel.resize.is_some() {
            return false;
        }
        panel.resize = Some(ResizeController::new());
        tracing::debug!(panel = %panel.id, "attached resize handle");
        true
    }

    pub fn bind_trigger(&mut self, element: impl Into<ElementId>, panel: impl Into<PanelId>) {
        self.triggers.insert(element.into(), panel.into());
    }

    pub fn bind_control(
        &mut self,
        element: impl Into<ElementId>,
        panel: impl Into<PanelId>,
        action: ControlAction,
    ) {
        self.controls.insert(element.into(), (panel.into(), action));
    }

    pub fn trigger_target(&self, element: &str) -> Option<&PanelId> {
        self.triggers.get(element)
    }

    pub fn control_target(&self, element: &str) -> Option<&(PanelId, ControlAction)> {
        self.controls.get(element)
    }

    pub(crate) fn push_event(&mut self, event: PanelEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }
}

fn end_gestures(panel: &mut Panel) {
    if let Some(drag) = panel.drag.as_mut() {
        drag.end();
    }
    if let Some(resize) = panel.resize.as_mut() {
        resize.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PanelRegistry {
        let mut reg = PanelRegistry::new();
        reg.insert(PanelSpec::new("a", "A"));
        reg.insert(PanelSpec::new("b", "B"));
        reg
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut reg = registry();
        assert!(!reg.insert(PanelSpec::new("a", "Other")));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get("a").map(Panel::title), Some("A"));
    }

    #[test]
    fn lifecycle_transitions() {
        let mut reg = registry();
        assert!(!reg.minimize("a"), "closed panels cannot minimize");
        assert!(reg.open("a"));
        assert!(reg.minimize("a"));
        assert_eq!(reg.get("a").map(Panel::visibility), Some(Visibility::Minimized));
        assert!(reg.open("a"));
        assert!(reg.close("a"));
        assert!(!reg.close("a"));
        let kinds: Vec<PanelEventKind> = reg.take_events().into_iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PanelEventKind::Opened,
                PanelEventKind::Minimized,
                PanelEventKind::Opened,
                PanelEventKind::Closed,
            ]
        );
    }

    #[test]
    fn open_raises_panel() {
        let mut reg = registry();
        reg.open("b");
        reg.open("a");
        assert_eq!(reg.topmost_open().map(PanelId::as_str), Some("a"));
        reg.send_to_back("a");
        assert_eq!(reg.topmost_open().map(PanelId::as_str), Some("b"));
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut reg = registry();
        assert!(!reg.open("missing"));
        assert!(!reg.close("missing"));
        assert!(!reg.bring_to_front("missing"));
        assert!(!reg.attach_resize("missing"));
        assert!(reg.take_events().is_empty());
    }

    #[test]
    fn attach_resize_once() {
        let mut reg = registry();
        assert!(reg.attach_resize("a"));
        assert!(!reg.attach_resize("a"));
    }
}
