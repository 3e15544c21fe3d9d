//! In-memory platform for the native build and tests
//!
//! Behaves like a browser that honours fullscreen requests synchronously and
//! then queues the matching change event, which the caller dispatches.

use crate::fullscreen::{FullscreenApi, FullscreenPlatform};

/// A primitive invocation recorded by the headless platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenCall {
    Request(FullscreenApi),
    Exit(FullscreenApi),
}

#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    apis: Vec<FullscreenApi>,
    enabled: bool,
    active: bool,
    calls: Vec<FullscreenCall>,
    pending: Vec<&'static str>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    /// Every vendor variant present and fullscreen allowed
    pub fn new() -> Self {
        Self::with_apis(&FullscreenApi::PRIORITY)
    }

    pub fn with_apis(apis: &[FullscreenApi]) -> Self {
        Self {
            apis: apis.to_vec(),
            enabled: true,
            active: false,
            calls: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// No fullscreen API at all
    pub fn unsupported() -> Self {
        Self::with_apis(&[])
    }

    /// API present but the page may not use it (e.g. sandboxed iframe)
    pub fn disallowed() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Primitive invocations so far
    pub fn requests(&self) -> &[FullscreenCall] {
        &self.calls
    }

    /// Take the change events queued since the last call
    pub fn drain_events(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.pending)
    }

    /// Fullscreen entered outside the app (browser menu, F11)
    pub fn user_enter(&mut self) {
        self.set_active(true);
    }

    /// Fullscreen left outside the app (Escape)
    pub fn user_exit(&mut self) {
        self.set_active(false);
    }

    fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if let Some(api) = FullscreenApi::PRIORITY
            .into_iter()
            .find(|a| self.apis.contains(a))
        {
            self.pending.push(api.change_event());
        }
    }
}

impl FullscreenPlatform for HeadlessPlatform {
    fn has_api(&self, api: FullscreenApi) -> bool {
        self.apis.contains(&api)
    }

    fn is_enabled(&self, api: FullscreenApi) -> bool {
        self.enabled && self.has_api(api)
    }

    fn is_active(&self, api: FullscreenApi) -> bool {
        self.active && self.has_api(api)
    }

    fn request(&mut self, api: FullscreenApi) {
        self.calls.push(FullscreenCall::Request(api));
        if self.is_enabled(api) {
            self.set_active(true);
        }
    }

    fn exit(&mut self, api: FullscreenApi) {
        self.calls.push(FullscreenCall::Exit(api));
        self.set_active(false);
    }
}
