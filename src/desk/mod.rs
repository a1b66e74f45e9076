//! The terminal desk: projects the window manager onto a ratatui surface.
//!
//! Desktop-local coordinates equal terminal cells. The bottom row belongs to
//! the taskbar; everything above it is the viewport the window manager
//! clamps against. Each frame reads the panel records and draws them; no
//! state lives in the drawn cells.

pub mod content;
pub mod icons;
pub mod taskbar;

use std::collections::BTreeMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::config::WindowConfig;
use crate::event_loop::ControlFlow;
use crate::geometry::{FloatRect, Point, Size};
use crate::keybindings::{Action, KeyBindings};
use crate::log_buffer::{self, LogHandle};
use crate::settings::{DesktopSettings, KvStore, load_settings, save_settings};
use crate::theme;
use crate::ui::{UiFrame, float_rect};
use crate::window::decorator::{Chrome, DeskDecorator, HeaderAction, WindowDecorator};
use crate::window::{
    ControlAction, ElementId, FullscreenMode, NodeKind, Panel, PanelEvent, PanelEventKind,
    PanelId, PanelSpec, PointerTarget, UnsupportedPlatform, WindowManager,
};

use content::{
    AccessGate, AsAny, ContentContext, ContentRequest, EmbedView, HelpView, LogView, MediaView,
    NoteView, PanelContent, SettingsView, WalkieView,
};
use icons::{DesktopIcon, DesktopIcons};
use taskbar::{Taskbar, TaskbarEntry};

pub const CAMERAS: &str = "cameras";
pub const MOVIES: &str = "movies";
pub const WALKIE: &str = "walkie";
pub const SETTINGS: &str = "settings";
pub const HELP: &str = "help";
pub const SYSLOG: &str = "syslog";
pub const ACCESS_GATE: &str = "access-modal";

pub const MOVIES_HOME: &str = "https://vidlo-idk.pages.dev/";

/// Assumed until the first frame reports the real terminal size.
const INITIAL_VIEWPORT: Size = Size::new(80, 23);

const NUDGE_X: i32 = 2;
const NUDGE_Y: i32 = 1;

const CONTROLS: [(&str, ControlAction); 3] = [
    ("close", ControlAction::Close),
    ("minimize", ControlAction::Minimize),
    ("fullscreen", ControlAction::ToggleFullscreen),
];

/// Element id of a panel's chrome control, e.g. `close-cameras`.
pub fn control_element(action: ControlAction, panel: &PanelId) -> ElementId {
    let prefix = CONTROLS
        .iter()
        .find(|(_, a)| *a == action)
        .map(|(prefix, _)| *prefix)
        .unwrap_or("close");
    ElementId::new(format!("{prefix}-{panel}"))
}

#[derive(Debug, Clone)]
pub struct DeskOptions {
    pub config: WindowConfig,
    /// Whether the host grants native fullscreen. When refused, panels use
    /// the inset presentation that fills the desktop area.
    pub native_fullscreen: bool,
    /// Buffer shown in the system-log panel.
    pub log: Option<LogHandle>,
}

impl Default for DeskOptions {
    fn default() -> Self {
        Self {
            config: WindowConfig::terminal(),
            native_fullscreen: true,
            log: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DeskHit {
    Pointer(PointerTarget),
    TaskbarWindow(PanelId),
    Start,
}

pub struct DeskApp {
    wm: WindowManager,
    contents: BTreeMap<PanelId, Box<dyn PanelContent>>,
    decorator: Box<dyn WindowDecorator>,
    settings: DesktopSettings,
    store: Box<dyn KvStore>,
    keybindings: KeyBindings,
    icons: DesktopIcons,
    taskbar: Taskbar,
    screen: Rect,
    bell_pending: bool,
    next_note: usize,
}

impl DeskApp {
    pub fn new(store: Box<dyn KvStore>, options: DeskOptions) -> Self {
        let settings = load_settings(store.as_ref());
        theme::set_high_contrast(settings.high_contrast);

        let mut wm = WindowManager::with_config(options.config);
        if !options.native_fullscreen {
            wm.set_fullscreen_platform(Box::new(UnsupportedPlatform));
        }
        wm.set_viewport(INITIAL_VIEWPORT);

        let log = options
            .log
            .or_else(log_buffer::global_log)
            .unwrap_or_default();

        let mut app = Self {
            wm,
            contents: BTreeMap::new(),
            decorator: Box::new(DeskDecorator),
            settings,
            store,
            keybindings: KeyBindings::default(),
            icons: DesktopIcons::new(vec![
                DesktopIcon::new(CAMERAS, "◉", "Cameras"),
                DesktopIcon::new(MOVIES, "▶", "Movies"),
                DesktopIcon::new(WALKIE, "☏", "Walkie"),
                DesktopIcon::new(SETTINGS, "⚙", "Settings"),
                DesktopIcon::new(HELP, "?", "Help"),
                DesktopIcon::new(SYSLOG, "≣", "Log"),
            ]),
            taskbar: Taskbar::new(),
            screen: Rect::new(
                0,
                0,
                INITIAL_VIEWPORT.width as u16,
                INITIAL_VIEWPORT.height as u16 + 1,
            ),
            bell_pending: false,
            next_note: 0,
        };
        app.install_panels(log);
        if app.settings.require_access {
            app.wm.open(ACCESS_GATE);
        }
        app
    }

    fn install_panels(&mut self, log: LogHandle) {
        let catalog: Vec<(PanelSpec, Box<dyn PanelContent>)> = vec![
            (
                PanelSpec::new(CAMERAS, "Cameras")
                    .with_anchor(14, 1)
                    .with_size(46, 14)
                    .with_max_size(56, 16),
                Box::new(MediaView::new()),
            ),
            (
                PanelSpec::new(MOVIES, "Movies")
                    .with_anchor(18, 3)
                    .with_size(48, 12),
                Box::new(EmbedView::new(MOVIES_HOME)),
            ),
            (
                PanelSpec::new(WALKIE, "Walkie-Talkie")
                    .with_anchor(22, 4)
                    .with_size(34, 10),
                Box::new(WalkieView::new()),
            ),
            (
                PanelSpec::new(SETTINGS, "Settings")
                    .with_anchor(16, 2)
                    .with_size(48, 11),
                Box::new(SettingsView::new()),
            ),
            (
                PanelSpec::new(HELP, "Help")
                    .with_anchor(12, 1)
                    .with_size(58, 18)
                    .with_max_size(64, 20),
                Box::new(HelpView::from_embedded()),
            ),
            (
                PanelSpec::new(SYSLOG, "System Log")
                    .with_anchor(13, 8)
                    .with_size(64, 12),
                Box::new(LogView::new(log)),
            ),
            (
                PanelSpec::new(ACCESS_GATE, "Access")
                    .with_anchor(17, 6)
                    .with_size(48, 9)
                    .without_header()
                    .overlay(),
                Box::new(AccessGate::new()),
            ),
        ];
        for (spec, content) in catalog {
            self.add_panel(spec, content, false);
        }
        for icon in self.icons.icons() {
            self.wm
                .bind_trigger(icon.element.clone(), icon.panel.clone());
        }
    }

    /// Register a panel with its content and bind its chrome controls.
    /// `spawn` opens it straight away.
    pub fn add_panel(
        &mut self,
        spec: PanelSpec,
        content: Box<dyn PanelContent>,
        spawn: bool,
    ) -> bool {
        let id = spec.id.clone();
        let overlay = spec.kind == NodeKind::Overlay;
        // content first so the Opened from a spawn finds it
        self.contents.insert(id.clone(), content);
        let added = if spawn {
            self.wm.spawn(spec)
        } else {
            self.wm.register(spec)
        };
        if !added {
            return false;
        }
        if !overlay {
            for (_, action) in CONTROLS {
                self.wm
                    .bind_control(control_element(action, &id), id.clone(), action);
            }
        }
        true
    }

    /// Open a fresh note panel.
    pub fn spawn_note(&mut self) -> Option<PanelId> {
        self.next_note += 1;
        let n = self.next_note;
        let id = PanelId::new(format!("note-{n}"));
        let step = ((n - 1) % 6) as i32;
        let spec = PanelSpec::new(id.clone(), format!("Note {n}"))
            .with_anchor(24 + step * 2, 3 + step)
            .with_size(30, 8);
        self.add_panel(spec, Box::new(NoteView::new()), true)
            .then_some(id)
    }

    pub fn window_manager(&self) -> &WindowManager {
        &self.wm
    }

    pub fn window_manager_mut(&mut self) -> &mut WindowManager {
        &mut self.wm
    }

    pub fn settings(&self) -> &DesktopSettings {
        &self.settings
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        self.icons.icons()
    }

    /// Concrete content hosted by panel `id`.
    pub fn content<T: PanelContent + 'static>(&self, id: &str) -> Option<&T> {
        let hosted = self.contents.get(id)?;
        <dyn PanelContent as AsAny>::as_any(hosted.as_ref()).downcast_ref::<T>()
    }

    /// Whether a click sound is owed since the last call.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    fn gate_open(&self) -> bool {
        self.wm.panel(ACCESS_GATE).is_some_and(Panel::is_open)
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => return self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
        ControlFlow::Continue
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        if self.gate_open() {
            if self.keybindings.matches(Action::Quit, key) {
                return ControlFlow::Quit;
            }
            self.dispatch_key(ACCESS_GATE, key);
            return ControlFlow::Continue;
        }
        if let Some(action) = self.keybindings.action_for_key(key) {
            return self.run_action(action);
        }
        let Some(focused) = self.wm.focused().cloned() else {
            return ControlFlow::Continue;
        };
        if !self.dispatch_key(focused.as_str(), key)
            && self.keybindings.matches(Action::LeaveFullscreen, key)
        {
            self.leave_fullscreen(focused.as_str());
        }
        ControlFlow::Continue
    }

    fn dispatch_key(&mut self, id: &str, key: &KeyEvent) -> bool {
        let Some(content) = self.contents.get_mut(id) else {
            return false;
        };
        let ctx = ContentContext::new(&self.settings).with_focus(true);
        content.handle_key(key, &ctx)
    }

    fn leave_fullscreen(&mut self, id: &str) {
        if self
            .wm
            .panel(id)
            .is_some_and(|p| p.fullscreen().is_fullscreen())
        {
            self.wm.toggle_fullscreen(id);
        }
    }

    fn run_action(&mut self, action: Action) -> ControlFlow {
        let focused = self.wm.focused().cloned();
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::FocusNext => {
                self.wm.cycle_focus(true);
            }
            Action::FocusPrev => {
                self.wm.cycle_focus(false);
            }
            Action::ClosePanel => {
                if let Some(id) = focused {
                    self.wm.close(id.as_str());
                }
            }
            Action::MinimizePanel => {
                if let Some(id) = focused {
                    self.wm.minimize(id.as_str());
                }
            }
            Action::ToggleFullscreen => {
                if let Some(id) = focused {
                    self.wm.toggle_fullscreen(id.as_str());
                }
            }
            Action::LeaveFullscreen => {
                if let Some(id) = focused {
                    self.leave_fullscreen(id.as_str());
                }
            }
            Action::NewNote => {
                self.spawn_note();
            }
            Action::OpenHelp => {
                self.wm.open(HELP);
            }
            Action::OpenLog => {
                self.wm.open(SYSLOG);
            }
            Action::Launch(n) => {
                if let Some(icon) = self.icons.get(n as usize) {
                    let element = icon.element.clone();
                    self.wm.activate(element.as_str());
                }
            }
            Action::MoveLeft => self.nudge(focused, false, -NUDGE_X, 0),
            Action::MoveRight => self.nudge(focused, false, NUDGE_X, 0),
            Action::MoveUp => self.nudge(focused, false, 0, -NUDGE_Y),
            Action::MoveDown => self.nudge(focused, false, 0, NUDGE_Y),
            Action::GrowWidth => self.nudge(focused, true, NUDGE_X, 0),
            Action::ShrinkWidth => self.nudge(focused, true, -NUDGE_X, 0),
            Action::GrowHeight => self.nudge(focused, true, 0, NUDGE_Y),
            Action::ShrinkHeight => self.nudge(focused, true, 0, -NUDGE_Y),
        }
        ControlFlow::Continue
    }

    /// Keyboard move or resize, played through the same gesture path as
    /// the pointer so clamping and notifications are identical.
    fn nudge(&mut self, panel: Option<PanelId>, resize: bool, dx: i32, dy: i32) {
        let Some(id) = panel else {
            return;
        };
        if self.wm.is_gesture_active() {
            return;
        }
        let target = if resize {
            PointerTarget::ResizeHandle(id)
        } else {
            PointerTarget::Header(id)
        };
        if self.wm.pointer_down(&target, Point::default()) {
            self.wm.pointer_move(Point::new(dx, dy));
            self.wm.pointer_up();
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let point = Point::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.hit_test(mouse.column, mouse.row);
                self.press(hit, point);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.wm.pointer_move(point);
            }
            MouseEventKind::Up(_) => {
                self.wm.pointer_up();
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let code = if mouse.kind == MouseEventKind::ScrollUp {
                    KeyCode::Up
                } else {
                    KeyCode::Down
                };
                if let Some(id) = self.wm.focused().cloned() {
                    self.dispatch_key(id.as_str(), &KeyEvent::new(code, KeyModifiers::NONE));
                }
            }
            _ => {}
        }
    }

    fn press(&mut self, hit: DeskHit, point: Point) {
        if self.gate_open() {
            // the gate is modal; only desktop shortcuts get past it
            let allowed = match &hit {
                DeskHit::Pointer(PointerTarget::Trigger(_)) => true,
                DeskHit::Pointer(PointerTarget::Body(id)) => id.as_str() == ACCESS_GATE,
                _ => false,
            };
            if !allowed {
                return;
            }
        }
        match hit {
            DeskHit::Start => {
                self.wm.open(HELP);
            }
            DeskHit::TaskbarWindow(id) => self.taskbar_click(&id),
            DeskHit::Pointer(target) => {
                self.wm.pointer_down(&target, point);
                if self.gate_open() {
                    self.wm.bring_to_front(ACCESS_GATE);
                }
            }
        }
    }

    fn taskbar_click(&mut self, id: &PanelId) {
        let Some(panel) = self.wm.panel(id.as_str()) else {
            return;
        };
        if panel.is_minimized() {
            self.wm.open(id.as_str());
        } else if self.wm.focused() == Some(id) {
            self.wm.minimize(id.as_str());
        } else {
            self.wm.bring_to_front(id.as_str());
        }
    }

    /// Where `panel` is drawn on screen.
    fn screen_rect(&self, panel: &Panel) -> FloatRect {
        match panel.fullscreen() {
            FullscreenMode::Native => float_rect(self.screen),
            FullscreenMode::Inset => self
                .wm
                .rendered_rect(panel.id().as_str())
                .unwrap_or_else(|| panel.rect()),
            FullscreenMode::Windowed => panel.rect(),
        }
    }

    fn chrome_for<'a>(panel: &'a Panel, focused: bool) -> Chrome<'a> {
        Chrome {
            title: panel.title(),
            focused,
            header: panel.has_header(),
            grip: panel.has_resize_handle() && !panel.fullscreen().is_fullscreen(),
        }
    }

    fn panel_hit(&self, panel: &Panel, point: Point) -> Option<PointerTarget> {
        let rect = self.screen_rect(panel);
        let focused = self.wm.focused() == Some(panel.id());
        let chrome = Self::chrome_for(panel, focused);
        let id = panel.id().clone();
        let target = match self.decorator.hit_test(rect, point, &chrome)? {
            HeaderAction::Drag => PointerTarget::Header(id),
            HeaderAction::Resize => PointerTarget::ResizeHandle(id),
            HeaderAction::Minimize => {
                PointerTarget::Control(control_element(ControlAction::Minimize, &id))
            }
            HeaderAction::ToggleFullscreen => {
                PointerTarget::Control(control_element(ControlAction::ToggleFullscreen, &id))
            }
            HeaderAction::Close => {
                PointerTarget::Control(control_element(ControlAction::Close, &id))
            }
            HeaderAction::Body => PointerTarget::Body(id),
        };
        Some(target)
    }

    /// Resolve a cell to what is drawn there, top-most first.
    fn hit_test(&self, column: u16, row: u16) -> DeskHit {
        let point = Point::new(column as i32, row as i32);
        let open: Vec<&Panel> = self.wm.panels().filter(|p| p.is_open()).collect();

        for panel in open.iter().rev() {
            if panel.fullscreen() == FullscreenMode::Native
                && let Some(target) = self.panel_hit(panel, point)
            {
                return DeskHit::Pointer(target);
            }
        }
        if self.taskbar.contains(column, row) {
            if self.taskbar.hit_test_start(column, row) {
                return DeskHit::Start;
            }
            if let Some(id) = self.taskbar.hit_test_window(column, row) {
                return DeskHit::TaskbarWindow(id.clone());
            }
            return DeskHit::Pointer(PointerTarget::Desktop);
        }
        for panel in open.iter().rev() {
            if panel.fullscreen() != FullscreenMode::Native
                && let Some(target) = self.panel_hit(panel, point)
            {
                return DeskHit::Pointer(target);
            }
        }
        if let Some(icon) = self.icons.hit_test(column, row) {
            return DeskHit::Pointer(PointerTarget::Trigger(icon.element.clone()));
        }
        DeskHit::Pointer(PointerTarget::Desktop)
    }

    /// Apply queued content requests and panel notifications, then advance
    /// animations by one frame.
    pub fn tick(&mut self) {
        if log_buffer::take_panic_pending() {
            self.wm.open(SYSLOG);
        }
        self.apply_requests();
        self.drain_events();

        let focused = self.wm.focused().cloned();
        for (id, content) in self.contents.iter_mut() {
            if !self.wm.panel(id.as_str()).is_some_and(Panel::is_open) {
                continue;
            }
            let ctx = ContentContext::new(&self.settings).with_focus(focused.as_ref() == Some(id));
            content.tick(&ctx);
        }
    }

    fn apply_requests(&mut self) {
        let mut requests = Vec::new();
        for (id, content) in self.contents.iter_mut() {
            while let Some(request) = content.take_request() {
                requests.push((id.clone(), request));
            }
        }
        for (id, request) in requests {
            match request {
                ContentRequest::SaveSettings(next) => self.apply_settings(next),
                ContentRequest::Dismiss => {
                    self.wm.close(id.as_str());
                }
            }
        }
    }

    fn apply_settings(&mut self, next: DesktopSettings) {
        if next == self.settings {
            return;
        }
        theme::set_high_contrast(next.high_contrast);
        self.settings = next;
        save_settings(self.store.as_mut(), &self.settings);
        if self.settings.sound {
            self.bell_pending = true;
        }
        tracing::debug!(settings = ?self.settings, "settings applied");
    }

    fn drain_events(&mut self) {
        loop {
            let events = self.wm.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.apply_panel_event(event);
            }
        }
    }

    fn apply_panel_event(&mut self, event: PanelEvent) {
        tracing::debug!(panel = %event.id, kind = ?event.kind, "panel event");
        if let Some(content) = self.contents.get_mut(event.id.as_str()) {
            content.on_panel_event(&event.kind);
        }
        match event.kind {
            PanelEventKind::Opened | PanelEventKind::Closed | PanelEventKind::Minimized => {
                if self.settings.sound {
                    self.bell_pending = true;
                }
            }
            PanelEventKind::Resized(_) | PanelEventKind::Fullscreen(_) => {}
        }
        // the cameras shortcut bypasses the access gate
        if event.kind == PanelEventKind::Opened && event.id.as_str() == CAMERAS {
            self.wm.close(ACCESS_GATE);
        }
    }

    pub fn render(&mut self, mut frame: UiFrame<'_>) {
        let area = frame.area();
        self.screen = area;
        let (desktop, _) = self.taskbar.split_area(area);
        let viewport = Size::new(desktop.width as u32, desktop.height as u32);
        if viewport != self.wm.viewport() {
            self.wm.set_viewport(viewport);
            self.wm.clamp_to_viewport();
        }

        render_desktop(&mut frame, desktop);
        self.icons.render(&mut frame, desktop);

        let focused = self.wm.focused().cloned();
        let order: Vec<PanelId> = self.wm.z_order().to_vec();
        let mut native = Vec::new();
        for id in &order {
            let Some(panel) = self.wm.panel(id.as_str()) else {
                continue;
            };
            if !panel.is_open() {
                continue;
            }
            if panel.fullscreen() == FullscreenMode::Native {
                native.push(id.clone());
                continue;
            }
            self.render_panel(&mut frame, id, focused.as_ref() == Some(id));
        }

        let entries = self.taskbar_entries(focused.as_ref());
        self.taskbar
            .render(&mut frame, &entries, chrono::Local::now());

        for id in &native {
            self.render_panel(&mut frame, id, focused.as_ref() == Some(id));
        }
    }

    fn render_panel(&mut self, frame: &mut UiFrame<'_>, id: &PanelId, focused: bool) {
        let Some(panel) = self.wm.panel(id.as_str()) else {
            return;
        };
        let rect = self.screen_rect(panel);
        let chrome = Self::chrome_for(panel, focused);
        self.decorator.render_window(frame, rect, &chrome);
        let inner = self.decorator.content_rect(rect);
        let Some(visible) = frame.visible(inner) else {
            return;
        };
        if let Some(content) = self.contents.get_mut(id.as_str()) {
            let ctx = ContentContext::new(&self.settings).with_focus(focused);
            content.render(frame, visible, &ctx);
        }
    }

    fn taskbar_entries(&self, focused: Option<&PanelId>) -> Vec<TaskbarEntry> {
        let mut panels: Vec<&Panel> = self
            .wm
            .panels()
            .filter(|p| p.kind() == NodeKind::Panel && (p.is_open() || p.is_minimized()))
            .collect();
        panels.sort_by_key(|p| p.creation_order());
        panels
            .into_iter()
            .map(|p| TaskbarEntry {
                id: p.id().clone(),
                label: p.title().to_string(),
                focused: focused == Some(p.id()),
                minimized: p.is_minimized(),
            })
            .collect()
    }
}

fn render_desktop(frame: &mut UiFrame<'_>, desktop: Rect) {
    frame.fill(desktop, Style::default().bg(theme::desktop_bg()));
    let grid = Style::default()
        .fg(theme::desktop_grid())
        .bg(theme::desktop_bg());
    for y in (desktop.y..desktop.y.saturating_add(desktop.height)).step_by(2) {
        for x in (desktop.x..desktop.x.saturating_add(desktop.width)).step_by(4) {
            frame.set_string(desktop, x, y, "·", grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemoryStore;
    use crossterm::event::KeyModifiers;
    use ratatui::buffer::Buffer;

    fn app_with(settings: DesktopSettings) -> DeskApp {
        let mut store = MemoryStore::new();
        save_settings(&mut store, &settings);
        DeskApp::new(Box::new(store), DeskOptions::default())
    }

    fn open_desk() -> DeskApp {
        app_with(DesktopSettings {
            require_access: false,
            sound: false,
            ..DesktopSettings::default()
        })
    }

    fn draw(app: &mut DeskApp, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        app.render(UiFrame::from_parts(area, &mut buf));
        buf
    }

    fn key(code: KeyCode, mods: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, mods))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn control_elements_are_named_by_action() {
        let id = PanelId::from("cameras");
        assert_eq!(control_element(ControlAction::Close, &id).as_str(), "close-cameras");
        assert_eq!(
            control_element(ControlAction::ToggleFullscreen, &id).as_str(),
            "fullscreen-cameras"
        );
    }

    #[test]
    fn gate_opens_on_start_when_required() {
        let app = app_with(DesktopSettings {
            sound: false,
            ..DesktopSettings::default()
        });
        assert!(app.gate_open());
        let app = open_desk();
        assert!(!app.gate_open());
    }

    #[test]
    fn every_regular_panel_gets_a_grip_but_the_gate_does_not() {
        let app = open_desk();
        let wm = app.window_manager();
        for id in [CAMERAS, MOVIES, WALKIE, SETTINGS, HELP, SYSLOG] {
            assert!(wm.panel(id).is_some_and(Panel::has_resize_handle), "{id}");
        }
        assert!(!wm.panel(ACCESS_GATE).is_some_and(Panel::has_resize_handle));
    }

    #[test]
    fn icon_click_opens_panel_and_applies_side_effects() {
        let mut app = open_desk();
        draw(&mut app, 80, 24);
        // first icon occupies rows 1-2 at the left edge
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 2, 1));
        assert!(app.window_manager().panel(CAMERAS).is_some_and(Panel::is_open));
        app.tick();
        let media = app.content::<MediaView>(CAMERAS).expect("media view");
        assert!(media.is_playing());
    }

    #[test]
    fn cameras_shortcut_bypasses_the_gate() {
        let mut app = app_with(DesktopSettings {
            sound: false,
            ..DesktopSettings::default()
        });
        draw(&mut app, 80, 24);
        app.handle_event(&key(KeyCode::Char('1'), KeyModifiers::ALT));
        // keyboard shortcuts are blocked by the gate
        assert!(!app.window_manager().panel(CAMERAS).is_some_and(Panel::is_open));
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        app.tick();
        assert!(app.window_manager().panel(CAMERAS).is_some_and(Panel::is_open));
        assert!(!app.gate_open());
    }

    #[test]
    fn gate_accepts_the_printed_code() {
        let mut app = app_with(DesktopSettings {
            sound: false,
            ..DesktopSettings::default()
        });
        for c in crate::constants::ACCESS_CODE.chars() {
            app.handle_event(&key(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.handle_event(&key(KeyCode::Enter, KeyModifiers::NONE));
        app.tick();
        assert!(!app.gate_open());
    }

    #[test]
    fn header_drag_moves_panel_with_the_pointer() {
        let mut app = open_desk();
        app.window_manager_mut().open(WALKIE);
        draw(&mut app, 80, 24);
        let rect = app.window_manager().panel(WALKIE).map(Panel::rect).expect("walkie");
        let (x, y) = (rect.x as u16 + 2, rect.y as u16);
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), x + 5, y + 3));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), x + 5, y + 3));
        let moved = app.window_manager().panel(WALKIE).map(Panel::rect).expect("walkie");
        assert_eq!((moved.x, moved.y), (rect.x + 5, rect.y + 3));
    }

    #[test]
    fn close_control_blanks_the_embed() {
        let mut app = open_desk();
        app.window_manager_mut().open(MOVIES);
        app.tick();
        assert_eq!(
            app.content::<EmbedView>(MOVIES).map(EmbedView::source),
            Some(MOVIES_HOME)
        );
        draw(&mut app, 80, 24);
        let rect = app.window_manager().panel(MOVIES).map(Panel::rect).expect("movies");
        let close_x = (rect.right() - 2) as u16;
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), close_x, rect.y as u16));
        app.tick();
        assert!(!app.window_manager().panel(MOVIES).is_some_and(Panel::is_open));
        assert!(app.content::<EmbedView>(MOVIES).is_some_and(EmbedView::is_blank));
    }

    #[test]
    fn keyboard_nudges_use_the_gesture_path() {
        let mut app = open_desk();
        app.window_manager_mut().open(SETTINGS);
        app.tick();
        let before = app.window_manager().panel(SETTINGS).map(Panel::rect).expect("settings");
        app.handle_event(&key(KeyCode::Right, KeyModifiers::ALT));
        app.handle_event(&key(
            KeyCode::Down,
            KeyModifiers::ALT | KeyModifiers::SHIFT,
        ));
        let after = app.window_manager().panel(SETTINGS).map(Panel::rect).expect("settings");
        assert_eq!(after.x, before.x + NUDGE_X);
        assert_eq!(after.height, before.height + NUDGE_Y as u32);
        let events = app.window_manager_mut().take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e.kind, PanelEventKind::Resized(_))));
    }

    #[test]
    fn settings_changes_are_applied_and_persisted() {
        let mut app = open_desk();
        app.window_manager_mut().open(SETTINGS);
        app.tick();
        // Display tab, second row: high contrast
        app.handle_event(&key(KeyCode::Right, KeyModifiers::NONE));
        app.handle_event(&key(KeyCode::Down, KeyModifiers::NONE));
        app.handle_event(&key(KeyCode::Char(' '), KeyModifiers::NONE));
        app.tick();
        assert!(app.settings().high_contrast);
        let stored = crate::settings::try_load_settings(app.store.as_ref()).expect("stored");
        assert!(stored.high_contrast);
    }

    #[test]
    fn sound_setting_controls_the_bell() {
        let mut app = app_with(DesktopSettings {
            require_access: false,
            ..DesktopSettings::default()
        });
        app.window_manager_mut().open(HELP);
        app.tick();
        assert!(app.take_bell());
        assert!(!app.take_bell());

        let mut quiet = open_desk();
        quiet.window_manager_mut().open(HELP);
        quiet.tick();
        assert!(!quiet.take_bell());
    }

    #[test]
    fn new_note_spawns_with_a_grip_and_taskbar_entry() {
        let mut app = open_desk();
        app.handle_event(&key(KeyCode::Char('n'), KeyModifiers::CONTROL));
        let wm = app.window_manager();
        let note = wm.panel("note-1").expect("note");
        assert!(note.is_open());
        assert!(note.has_resize_handle());
        let entries = app.taskbar_entries(wm.focused());
        assert_eq!(entries.len(), 1);
        assert!(entries[0].focused);
    }

    #[test]
    fn native_fullscreen_covers_the_taskbar_and_inset_does_not() {
        let mut app = open_desk();
        app.window_manager_mut().open(HELP);
        app.handle_event(&key(KeyCode::F(11), KeyModifiers::NONE));
        draw(&mut app, 80, 24);
        let help = app.window_manager().panel(HELP).expect("help");
        assert_eq!(help.fullscreen(), FullscreenMode::Native);
        assert_eq!(app.screen_rect(help), FloatRect::new(0, 0, 80, 24));

        let mut inset = DeskApp::new(
            Box::new({
                let mut store = MemoryStore::new();
                save_settings(
                    &mut store,
                    &DesktopSettings {
                        require_access: false,
                        ..DesktopSettings::default()
                    },
                );
                store
            }),
            DeskOptions {
                native_fullscreen: false,
                ..DeskOptions::default()
            },
        );
        inset.window_manager_mut().open(HELP);
        inset.handle_event(&key(KeyCode::F(11), KeyModifiers::NONE));
        draw(&mut inset, 80, 24);
        let help = inset.window_manager().panel(HELP).expect("help");
        assert_eq!(help.fullscreen(), FullscreenMode::Inset);
        assert_eq!(inset.screen_rect(help), FloatRect::new(0, 0, 80, 23));

        inset.handle_event(&key(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(
            inset.window_manager().panel(HELP).map(Panel::fullscreen),
            Some(FullscreenMode::Windowed)
        );
    }

    #[test]
    fn taskbar_click_restores_minimized_panel() {
        let mut app = open_desk();
        app.window_manager_mut().open(WALKIE);
        app.window_manager_mut().minimize(WALKIE);
        draw(&mut app, 80, 24);
        // first window-list entry follows the start label
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 8, 23));
        assert!(app.window_manager().panel(WALKIE).is_some_and(Panel::is_open));
    }

    #[test]
    fn quit_works_behind_the_gate() {
        let mut app = app_with(DesktopSettings::default());
        assert_eq!(
            app.handle_event(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            ControlFlow::Quit
        );
    }
}
