//! Rain Splash - an animated splash screen
//!
//! Core modules:
//! - `anim`: Drop trajectories, tweens and the repeating drop scheduler
//! - `fullscreen`: Vendor-normalized fullscreen state machine
//! - `layout`: Corner-anchored chrome placement
//! - `scene`: Stage and visual elements
//! - `render_loop`: Frame clock driven render tick
//! - `renderer`: WebGPU painter for the stage
//! - `platform`: Browser/headless platform abstraction
//! - `app`: Context object owning the scene and handling platform events

pub mod anim;
pub mod app;
pub mod error;
pub mod fullscreen;
pub mod layout;
pub mod platform;
pub mod render_loop;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use app::SplashApp;
pub use error::SplashError;
pub use settings::Settings;

/// Splash configuration constants
pub mod consts {
    /// Bar colors, one falling bar per entry
    pub const PALETTE: [u32; 18] = [
        0x1abc9c, 0x16a085, //
        0x2ecc71, 0x27ae60, //
        0x3498db, 0x2980b9, //
        0x9b59b6, 0x8e44ad, //
        0xf1c40f, 0xf39c12, //
        0xe67e22, 0xd35400, //
        0xe74c3c, 0xc0392b, //
        0xecf0f1, 0xbdc3c7, //
        0x95a5a6, 0x7f8c8d,
    ];

    /// Stage clear color
    pub const BACKGROUND: u32 = 0x263332;

    /// Bar rectangle relative to the element position
    pub const BAR_OFFSET: [f32; 2] = [-5.0, 0.0];
    pub const BAR_SIZE: [f32; 2] = [5.0, 100.0];

    /// Distance of chrome elements from the viewport edges
    pub const CHROME_MARGIN: f32 = 20.0;

    /// dt used for the very first frame (no previous timestamp)
    pub const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    /// Upper bound on dt so a backgrounded tab does not replay minutes of rain
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Frames averaged for the FPS estimate
    pub const FPS_WINDOW: usize = 60;
}

/// Convert a 0xRRGGBB color to linear-ish RGBA floats
#[inline]
pub fn hex_to_rgba(color: u32, alpha: f32) -> [f32; 4] {
    let r = ((color >> 16) & 0xff) as f32 / 255.0;
    let g = ((color >> 8) & 0xff) as f32 / 255.0;
    let b = (color & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}
