//! Fullscreen state machine
//!
//! Browsers expose fullscreen under up to three vendor spellings. The
//! controller probes them once, in priority order, and from then on talks to
//! a single `FullscreenApi`. State is never cached: every query goes back to
//! the platform, so a change made outside the controller (Escape key) is seen
//! on the next change event.

use crate::layout::ChromeSlot;

/// Vendor variants of the fullscreen API, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenApi {
    Standard,
    Moz,
    Webkit,
}

impl FullscreenApi {
    pub const PRIORITY: [FullscreenApi; 3] = [
        FullscreenApi::Standard,
        FullscreenApi::Moz,
        FullscreenApi::Webkit,
    ];

    /// `document` property telling whether fullscreen may be requested
    pub fn enabled_property(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenEnabled",
            FullscreenApi::Moz => "mozFullScreenEnabled",
            FullscreenApi::Webkit => "webkitFullscreenEnabled",
        }
    }

    /// `document` property that is truthy while fullscreen is active
    pub fn active_property(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenElement",
            FullscreenApi::Moz => "mozFullScreen",
            FullscreenApi::Webkit => "webkitIsFullScreen",
        }
    }

    /// Method on `document.documentElement`
    pub fn request_method(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "requestFullscreen",
            FullscreenApi::Moz => "mozRequestFullScreen",
            FullscreenApi::Webkit => "webkitRequestFullScreen",
        }
    }

    /// Method on `document`
    pub fn exit_method(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "exitFullscreen",
            FullscreenApi::Moz => "mozCancelFullScreen",
            FullscreenApi::Webkit => "webkitCancelFullScreen",
        }
    }

    pub fn change_event(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenchange",
            FullscreenApi::Moz => "mozfullscreenchange",
            FullscreenApi::Webkit => "webkitfullscreenchange",
        }
    }

    /// Map any vendor change event name back to its API
    pub fn from_change_event(name: &str) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|api| api.change_event() == name)
    }
}

/// Fullscreen primitives a platform provides
pub trait FullscreenPlatform {
    /// Whether this vendor variant exists at all
    fn has_api(&self, api: FullscreenApi) -> bool;
    /// Whether the page is allowed to go fullscreen
    fn is_enabled(&self, api: FullscreenApi) -> bool;
    fn is_active(&self, api: FullscreenApi) -> bool;
    fn request(&mut self, api: FullscreenApi);
    fn exit(&mut self, api: FullscreenApi);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenState {
    Normal,
    Fullscreen,
}

type Listener = Box<dyn FnMut(FullscreenState)>;

/// Normalized fullscreen interface over a platform
pub struct FullscreenController<P: FullscreenPlatform> {
    platform: P,
    /// Resolved once at construction
    api: Option<FullscreenApi>,
    listeners: Vec<Listener>,
}

impl<P: FullscreenPlatform> FullscreenController<P> {
    pub fn new(platform: P) -> Self {
        let api = FullscreenApi::PRIORITY
            .into_iter()
            .find(|&api| platform.has_api(api));
        match api {
            Some(api) => log::info!("Fullscreen API: {:?}", api),
            None => log::warn!("No fullscreen API, toggle buttons stay hidden"),
        }
        Self {
            platform,
            api,
            listeners: Vec::new(),
        }
    }

    pub fn api(&self) -> Option<FullscreenApi> {
        self.api
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn is_fullscreen_enabled(&self) -> bool {
        self.api.is_some_and(|api| self.platform.is_enabled(api))
    }

    /// Current state, queried from the platform
    pub fn state(&self) -> FullscreenState {
        match self.api {
            Some(api) if self.platform.is_active(api) => FullscreenState::Fullscreen,
            _ => FullscreenState::Normal,
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state() == FullscreenState::Fullscreen
    }

    /// Ask the platform to enter fullscreen. Returns whether a primitive was
    /// invoked; missing-API, disallowed and already-fullscreen calls do nothing.
    pub fn request_fullscreen(&mut self) -> bool {
        let Some(api) = self.api else {
            return false;
        };
        if !self.platform.is_enabled(api) {
            log::debug!("Fullscreen request ignored: not allowed");
            return false;
        }
        if self.is_fullscreen() {
            log::debug!("Fullscreen request ignored: already fullscreen");
            return false;
        }
        self.platform.request(api);
        true
    }

    /// Ask the platform to leave fullscreen. Returns whether a primitive was invoked.
    pub fn exit_fullscreen(&mut self) -> bool {
        let Some(api) = self.api else {
            return false;
        };
        if !self.is_fullscreen() {
            log::debug!("Fullscreen exit ignored: not fullscreen");
            return false;
        }
        self.platform.exit(api);
        true
    }

    /// Register a callback fired with the re-queried state on every change event
    pub fn subscribe(&mut self, listener: impl FnMut(FullscreenState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Feed a platform event. Any vendor change event re-queries the state and
    /// notifies subscribers; other names are ignored.
    pub fn handle_change_event(&mut self, name: &str) -> Option<FullscreenState> {
        FullscreenApi::from_change_event(name)?;
        let state = self.state();
        log::debug!("{} -> {:?}", name, state);
        for listener in &mut self.listeners {
            listener(state);
        }
        Some(state)
    }
}

/// Which toggle button should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleVisibility {
    pub enter: bool,
    pub exit: bool,
}

impl ToggleVisibility {
    pub fn new(enabled: bool, state: FullscreenState) -> Self {
        Self {
            enter: enabled && state == FullscreenState::Normal,
            exit: enabled && state == FullscreenState::Fullscreen,
        }
    }

    pub fn of<P: FullscreenPlatform>(controller: &FullscreenController<P>) -> Self {
        Self::new(controller.is_fullscreen_enabled(), controller.state())
    }

    /// Visibility for a chrome slot; the title is always shown
    pub fn for_slot(&self, slot: ChromeSlot) -> bool {
        match slot {
            ChromeSlot::Title => true,
            ChromeSlot::EnterFullscreen => self.enter,
            ChromeSlot::ExitFullscreen => self.exit,
        }
    }
}
