//! Browser bindings
//!
//! Vendor-prefixed fullscreen members are looked up by name through
//! `js_sys::Reflect`, since web-sys only binds the standard ones.

use glam::Vec2;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, Window};

use super::{DomPlacement, Viewport};
use crate::app::ChromeSizes;
use crate::error::SplashError;
use crate::fullscreen::{FullscreenApi, FullscreenPlatform};
use crate::layout::{ChromeHandles, ChromeSlot};
use crate::render_loop::FrameClock;
use crate::scene::Stage;
use crate::settings::Settings;

/// `Element.ALLOW_KEYBOARD_INPUT`, accepted by the old webkit request
const ALLOW_KEYBOARD_INPUT: u32 = 1;

/// Class that hides a chrome image
const HIDDEN_CLASS: &str = "hidden";

pub fn window() -> Result<Window, SplashError> {
    web_sys::window().ok_or_else(|| SplashError::Platform("no window".to_string()))
}

pub fn document() -> Result<Document, SplashError> {
    window()?
        .document()
        .ok_or_else(|| SplashError::Platform("no document".to_string()))
}

pub fn canvas(document: &Document) -> Result<HtmlCanvasElement, SplashError> {
    document
        .get_element_by_id("canvas")
        .ok_or_else(|| SplashError::Platform("no #canvas element".to_string()))?
        .dyn_into()
        .map_err(|_| SplashError::Platform("#canvas is not a canvas".to_string()))
}

/// Inner window size in CSS pixels
pub fn current_viewport(window: &Window) -> Viewport {
    let dimension = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32
    };
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
        .with_pixel_ratio(window.device_pixel_ratio() as f32)
}

/// Size the canvas backing store to the viewport
pub fn size_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) {
    let (width, height) = viewport.physical_size();
    canvas.set_width(width);
    canvas.set_height(height);
}

/// Settings from the canvas `data-settings` attribute; defaults if absent or invalid
pub fn read_settings(canvas: &HtmlCanvasElement) -> Settings {
    Settings::from_json_or_default(canvas.get_attribute("data-settings").as_deref())
}

/// Rendered size of a chrome image; zero until it has loaded and been laid out
pub fn measure_chrome(document: &Document, slot: ChromeSlot) -> Vec2 {
    document
        .get_element_by_id(slot.dom_id())
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            Vec2::new(rect.width() as f32, rect.height() as f32)
        })
        .unwrap_or(Vec2::ZERO)
}

/// Rendered sizes of the chrome images
pub fn read_chrome_sizes(document: &Document) -> ChromeSizes {
    let size_of = |slot: ChromeSlot| measure_chrome(document, slot);
    ChromeSizes {
        title: size_of(ChromeSlot::Title),
        enter_fullscreen: size_of(ChromeSlot::EnterFullscreen),
        exit_fullscreen: size_of(ChromeSlot::ExitFullscreen),
    }
}

/// Mirror chrome sprite placement and visibility onto the DOM images
pub fn sync_chrome_dom(stage: &Stage, chrome: &ChromeHandles, document: &Document) {
    for slot in ChromeSlot::ALL {
        let Some(el) = chrome.get(slot).and_then(|id| stage.get(id)) else {
            continue;
        };
        let Some(node) = document
            .get_element_by_id(slot.dom_id())
            .and_then(|n| n.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };

        let placement = DomPlacement::of(el);
        let style = node.style();
        let styled = style
            .set_property("left", &format!("{}px", placement.left))
            .and_then(|_| style.set_property("top", &format!("{}px", placement.top)))
            .and_then(|_| style.set_property("transform", &placement.transform()));

        let classes = node.class_list();
        let toggled = if el.visible {
            classes.remove_1(HIDDEN_CLASS)
        } else {
            classes.add_1(HIDDEN_CLASS)
        };

        if let Err(e) = styled.and(toggled) {
            log::warn!("Could not update #{}: {:?}", slot.dom_id(), e);
        }
    }
}

/// iOS Safari keeps a scroll offset after rotating to landscape
pub fn fix_ios_landscape_scroll(window: &Window, document: &Document) {
    let orientation = Reflect::get(window, &JsValue::from_str("orientation"))
        .ok()
        .and_then(|v| v.as_f64());
    if matches!(orientation, Some(o) if o.abs() == 90.0) {
        if let Some(body) = document.body() {
            body.set_scroll_top(0);
        }
    }
}

/// Attach a listener for the page's lifetime; failures are logged
pub fn listen(
    target: &web_sys::EventTarget,
    name: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) {
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    match target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
        Ok(()) => closure.forget(),
        Err(e) => log::error!("Could not listen for {}: {:?}", name, e),
    }
}

/// requestAnimationFrame as a frame clock
pub struct RafClock {
    window: Window,
}

impl RafClock {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameClock for RafClock {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64)>) {
        let closure = Closure::once(move |time: f64| callback(time));
        let _ = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Document-backed fullscreen primitives
pub struct WebFullscreen {
    document: Document,
}

impl WebFullscreen {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn property(&self, name: &str) -> Option<JsValue> {
        Reflect::get(&self.document, &JsValue::from_str(name))
            .ok()
            .filter(|v| !v.is_undefined())
    }

    fn call(target: &JsValue, method: &str, args: &[JsValue]) {
        let function = Reflect::get(target, &JsValue::from_str(method))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok());
        let Some(function) = function else {
            log::warn!("{} is not callable", method);
            return;
        };
        let result = match args {
            [a] => function.call1(target, a),
            _ => function.call0(target),
        };
        match result {
            Ok(value) => {
                // The standard methods report refusal through a rejected promise
                if let Ok(promise) = value.dyn_into::<Promise>() {
                    let method = method.to_string();
                    let on_reject = Closure::<dyn FnMut(JsValue)>::new(move |e: JsValue| {
                        log::warn!("{} rejected: {:?}", method, e);
                    });
                    let _ = promise.catch(&on_reject);
                    on_reject.forget();
                }
            }
            Err(e) => log::warn!("{} failed: {:?}", method, e),
        }
    }

    fn root(&self) -> Option<Element> {
        self.document.document_element()
    }
}

impl FullscreenPlatform for WebFullscreen {
    fn has_api(&self, api: FullscreenApi) -> bool {
        self.property(api.enabled_property()).is_some()
    }

    fn is_enabled(&self, api: FullscreenApi) -> bool {
        self.property(api.enabled_property())
            .is_some_and(|v| v.is_truthy())
    }

    fn is_active(&self, api: FullscreenApi) -> bool {
        self.property(api.active_property())
            .is_some_and(|v| v.is_truthy())
    }

    fn request(&mut self, api: FullscreenApi) {
        let Some(root) = self.root() else {
            log::warn!("No document element to make fullscreen");
            return;
        };
        let args = match api {
            FullscreenApi::Webkit => vec![JsValue::from(ALLOW_KEYBOARD_INPUT)],
            FullscreenApi::Standard | FullscreenApi::Moz => Vec::new(),
        };
        Self::call(&root, api.request_method(), &args);
    }

    fn exit(&mut self, api: FullscreenApi) {
        Self::call(&self.document, api.exit_method(), &[]);
    }
}
