use crate::config::WindowConfig;
use crate::constants::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::geometry::{FloatRect, Point, Size, clamp_span};

use super::{
    AddedNode, ControlAction, ElementId, FullscreenMode, FullscreenPlatform, GrantingPlatform,
    Panel, PanelEvent, PanelEventKind, PanelId, PanelRegistry, PanelSpec, ResizeLimits,
};

/// What the host's hit-test found under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Drag region of a panel, outside any embedded control.
    Header(PanelId),
    /// A bound control (close, minimize, fullscreen button).
    Control(ElementId),
    ResizeHandle(PanelId),
    /// A trigger element such as a desktop icon.
    Trigger(ElementId),
    Body(PanelId),
    Desktop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Gesture {
    Drag(PanelId),
    Resize(PanelId),
}

/// Composes drag, resize and lifecycle for every registered panel.
///
/// All pointer moves and releases go through one dispatcher, which routes
/// them to the active gesture sessions by panel id.
#[derive(Debug)]
pub struct WindowManager {
    registry: PanelRegistry,
    config: WindowConfig,
    viewport: Size,
    platform: Box<dyn FullscreenPlatform>,
    // panel currently presented through the platform's native fullscreen
    native_holder: Option<PanelId>,
    gestures: Vec<Gesture>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    pub fn new() -> Self {
        Self::with_config(WindowConfig::default())
    }

    pub fn with_config(config: WindowConfig) -> Self {
        Self {
            registry: PanelRegistry::new(),
            config,
            viewport: Size::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            platform: Box::new(GrantingPlatform),
            native_holder: None,
            gestures: Vec::new(),
        }
    }

    pub fn set_fullscreen_platform(&mut self, platform: Box<dyn FullscreenPlatform>) {
        self.platform = platform;
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Register a panel present at setup. Duplicate ids are ignored.
    pub fn register(&mut self, spec: PanelSpec) -> bool {
        let node = AddedNode {
            id: spec.id.clone(),
            kind: spec.kind,
        };
        if !self.registry.insert(spec) {
            return false;
        }
        self.observe_added([node]);
        true
    }

    /// Register a panel created after setup and open it.
    pub fn spawn(&mut self, spec: PanelSpec) -> bool {
        let id = spec.id.clone();
        if !self.register(spec) {
            return false;
        }
        self.open(id.as_str())
    }

    /// Structural observation: give every eligible newly added node a resize
    /// handle the first time it is seen. Returns how many handles were attached.
    pub fn observe_added(&mut self, nodes: impl IntoIterator<Item = AddedNode>) -> usize {
        let mut attached = 0;
        for node in nodes {
            if !node.is_resizable() {
                continue;
            }
            if self.registry.attach_resize(node.id.as_str()) {
                attached += 1;
            }
        }
        attached
    }

    pub fn bind_trigger(&mut self, element: impl Into<ElementId>, panel: impl Into<PanelId>) {
        self.registry.bind_trigger(element, panel);
    }

    pub fn bind_control(
        &mut self,
        element: impl Into<ElementId>,
        panel: impl Into<PanelId>,
        action: ControlAction,
    ) {
        self.registry.bind_control(element, panel, action);
    }

    /// Run whatever is bound to `element`. Unbound elements are ignored.
    pub fn activate(&mut self, element: &str) -> bool {
        if let Some(panel) = self.registry.trigger_target(element).cloned() {
            return self.open(panel.as_str());
        }
        let Some((panel, action)) = self.registry.control_target(element).cloned() else {
            tracing::debug!(element, "activated unbound element");
            return false;
        };
        match action {
            ControlAction::Close => self.close(panel.as_str()),
            ControlAction::Minimize => self.minimize(panel.as_str()),
            ControlAction::ToggleFullscreen => self.toggle_fullscreen(panel.as_str()),
        }
    }

    pub fn open(&mut self, id: &str) -> bool {
        self.cancel_gestures(id);
        self.registry.open(id)
    }

    pub fn close(&mut self, id: &str) -> bool {
        self.exit_fullscreen(id);
        self.cancel_gestures(id);
        self.registry.close(id)
    }

    pub fn minimize(&mut self, id: &str) -> bool {
        if !self.registry.get(id).is_some_and(Panel::is_open) {
            return false;
        }
        self.exit_fullscreen(id);
        self.cancel_gestures(id);
        self.registry.minimize(id)
    }

    /// Enter or leave fullscreen. Panels that are not open are left alone.
    ///
    /// A refused platform request falls back to the inset presentation; the
    /// refusal itself is never reported.
    pub fn toggle_fullscreen(&mut self, id: &str) -> bool {
        let Some(panel) = self.registry.get(id) else {
            return false;
        };
        if !panel.is_open() {
            return false;
        }
        if panel.fullscreen().is_fullscreen() {
            return self.exit_fullscreen(id);
        }
        let panel_id = panel.id().clone();

        let holders: Vec<PanelId> = self
            .registry
            .iter_z()
            .filter(|p| p.fullscreen().is_fullscreen())
            .map(|p| p.id().clone())
            .collect();
        for holder in holders {
            self.exit_fullscreen(holder.as_str());
        }
        self.cancel_gestures(id);

        let mode = match self.platform.request(&panel_id) {
            Ok(()) => {
                self.native_holder = Some(panel_id.clone());
                FullscreenMode::Native
            }
            Err(err) => {
                tracing::debug!(panel = %panel_id, %err, "native fullscreen refused; using inset");
                FullscreenMode::Inset
            }
        };
        self.registry.bring_to_front(id);
        self.registry.set_fullscreen(id, mode)
    }

    fn exit_fullscreen(&mut self, id: &str) -> bool {
        let Some(panel) = self.registry.get(id) else {
            return false;
        };
        let panel_id = panel.id().clone();
        match panel.fullscreen() {
            FullscreenMode::Windowed => return false,
            FullscreenMode::Native => {
                self.platform.exit(&panel_id);
                if self.native_holder.as_ref() == Some(&panel_id) {
                    self.native_holder = None;
                }
            }
            FullscreenMode::Inset => {}
        }
        self.registry.set_fullscreen(id, FullscreenMode::Windowed)
    }

    pub fn bring_to_front(&mut self, id: &str) -> bool {
        self.registry.bring_to_front(id)
    }

    /// Top-most open panel.
    pub fn focused(&self) -> Option<&PanelId> {
        self.registry.topmost_open()
    }

    /// Rotate focus through open panels by restacking them.
    pub fn cycle_focus(&mut self, forward: bool) -> Option<PanelId> {
        let open: Vec<PanelId> = self
            .registry
            .iter_z()
            .filter(|panel| panel.is_open())
            .map(|panel| panel.id().clone())
            .collect();
        if open.len() < 2 {
            return open.first().cloned();
        }
        if forward {
            // bottom-most open panel comes up
            self.registry.bring_to_front(open[0].as_str());
        } else if let Some(top) = open.last() {
            self.registry.send_to_back(top.as_str());
        }
        self.focused().cloned()
    }

    /// Pointer pressed over `target`. Returns `true` when the press was
    /// consumed by the window manager.
    pub fn pointer_down(&mut self, target: &PointerTarget, pointer: Point) -> bool {
        match target {
            PointerTarget::Header(id) => self.begin_drag(id.as_str(), pointer),
            PointerTarget::ResizeHandle(id) => self.begin_resize(id.as_str(), pointer),
            PointerTarget::Control(element) | PointerTarget::Trigger(element) => {
                self.activate(element.as_str())
            }
            PointerTarget::Body(id) => self.registry.bring_to_front(id.as_str()),
            PointerTarget::Desktop => false,
        }
    }

    fn begin_drag(&mut self, id: &str, pointer: Point) -> bool {
        let Some(panel) = self.registry.get_mut(id) else {
            return false;
        };
        if !panel.is_open() || panel.fullscreen.is_fullscreen() {
            return false;
        }
        let Some(drag) = panel.drag.as_mut() else {
            return false;
        };
        if !drag.begin(pointer) {
            return false;
        }
        let gesture = Gesture::Drag(panel.id.clone());
        self.gestures.push(gesture);
        self.registry.bring_to_front(id);
        true
    }

    fn begin_resize(&mut self, id: &str, pointer: Point) -> bool {
        let limits = ResizeLimits::new(&self.config, self.viewport);
        let Some(panel) = self.registry.get_mut(id) else {
            return false;
        };
        if !panel.is_open() || panel.fullscreen.is_fullscreen() {
            return false;
        }
        let rendered = panel.rendered_size();
        let start = Size::new(
            clamp_span(rendered.width as i64, limits.min.width, limits.max.width),
            clamp_span(rendered.height as i64, limits.min.height, limits.max.height),
        );
        let Some(resize) = panel.resize.as_mut() else {
            return false;
        };
        if !resize.begin(pointer, start) {
            return false;
        }
        panel.pin_size(start);
        let gesture = Gesture::Resize(panel.id.clone());
        self.gestures.push(gesture);
        if start != rendered {
            self.registry
                .push_event(PanelEvent::new(id.into(), PanelEventKind::Resized(start)));
        }
        self.registry.bring_to_front(id);
        true
    }

    /// Route a pointer move to every active session.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let limits = ResizeLimits::new(&self.config, self.viewport);
        let mut changed = false;
        for gesture in &self.gestures {
            match gesture {
                Gesture::Drag(id) => {
                    if let Some(panel) = self.registry.get_mut(id.as_str())
                        && let Some(drag) = panel.drag.as_mut()
                    {
                        changed |= drag.update(pointer).is_some();
                    }
                }
                Gesture::Resize(id) => {
                    let Some(panel) = self.registry.get_mut(id.as_str()) else {
                        continue;
                    };
                    let Some(size) = panel
                        .resize
                        .as_mut()
                        .and_then(|resize| resize.update(pointer, limits))
                    else {
                        continue;
                    };
                    panel.pin_size(size);
                    self.registry
                        .push_event(PanelEvent::new(id.clone(), PanelEventKind::Resized(size)));
                    changed = true;
                }
            }
        }
        changed
    }

    /// End every active session. Releases land anywhere, not just on the
    /// element that started the gesture.
    pub fn pointer_up(&mut self) -> bool {
        let gestures = std::mem::take(&mut self.gestures);
        let ended = !gestures.is_empty();
        for gesture in gestures {
            self.end_gesture(&gesture);
        }
        ended
    }

    pub fn is_gesture_active(&self) -> bool {
        !self.gestures.is_empty()
    }

    fn end_gesture(&mut self, gesture: &Gesture) {
        match gesture {
            Gesture::Drag(id) => {
                if let Some(drag) = self
                    .registry
                    .get_mut(id.as_str())
                    .and_then(|panel| panel.drag.as_mut())
                {
                    drag.end();
                }
            }
            Gesture::Resize(id) => {
                if let Some(resize) = self
                    .registry
                    .get_mut(id.as_str())
                    .and_then(|panel| panel.resize.as_mut())
                {
                    resize.end();
                }
            }
        }
    }

    fn cancel_gestures(&mut self, id: &str) {
        let (ended, kept): (Vec<Gesture>, Vec<Gesture>) = std::mem::take(&mut self.gestures)
            .into_iter()
            .partition(|gesture| match gesture {
                Gesture::Drag(panel) | Gesture::Resize(panel) => panel.as_str() == id,
            });
        self.gestures = kept;
        for gesture in &ended {
            self.end_gesture(gesture);
        }
    }

    /// Drop every panel's pinned size that no longer fits the viewport.
    ///
    /// Called after the host viewport shrinks; sizes are clamped the same
    /// way a resize gesture would clamp them.
    pub fn clamp_to_viewport(&mut self) {
        let limits = ResizeLimits::new(&self.config, self.viewport);
        let mut resized = Vec::new();
        for panel in self.registry.iter_mut() {
            let Some(size) = panel.explicit_size else {
                continue;
            };
            let clamped = Size::new(
                size.width.clamp(limits.min.width, limits.max.width),
                size.height.clamp(limits.min.height, limits.max.height),
            );
            if clamped != size {
                panel.explicit_size = Some(clamped);
                resized.push(PanelEvent::new(
                    panel.id.clone(),
                    PanelEventKind::Resized(clamped),
                ));
            }
        }
        for event in resized {
            self.registry.push_event(event);
        }
    }

    pub fn set_title(&mut self, id: &str, title: impl Into<String>) -> bool {
        let Some(panel) = self.registry.get_mut(id) else {
            return false;
        };
        panel.set_title(title);
        true
    }

    pub fn take_events(&mut self) -> Vec<PanelEvent> {
        self.registry.take_events()
    }

    pub fn panel(&self, id: &str) -> Option<&Panel> {
        self.registry.get(id)
    }

    /// Panels from bottom-most to top-most.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.registry.iter_z()
    }

    pub fn z_order(&self) -> &[PanelId] {
        self.registry.z_order()
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    /// Where the panel is drawn: the whole viewport when fullscreen, its
    /// windowed rectangle otherwise.
    pub fn rendered_rect(&self, id: &str) -> Option<FloatRect> {
        let panel = self.registry.get(id)?;
        if panel.fullscreen().is_fullscreen() {
            return Some(FloatRect::from_origin(Point::default(), self.viewport));
        }
        Some(panel.rect())
    }
}
