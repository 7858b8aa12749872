// What you SEE now:
// • Type anywhere: blocky letters appear top-left (after a short autofocus delay).
// • Hover the window: a soft white circle blooms over every letter; leave and they shrink away.
// • Ctrl/Cmd+K clears, Ctrl/Cmd+V pastes plain text, ESC stops typing (click to type again).
// • Mouse wheel dims the scene like scrolling past the section. Close the window to quit.
// • Optional config: `typing-circles settings.toml` (see config.rs for the keys).

use std::path::PathBuf;
use std::time::{Duration, Instant};

use minifb::Key;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use typing_circles::config::Config;
use typing_circles::draw::{Canvas, Drawer, draw_line, draw_text_5x7, draw_text_block, glyph_scale};
use typing_circles::fade::ScrollFade;
use typing_circles::gamma::Blender;
use typing_circles::pattern;
use typing_circles::typing::TypingArea;
use typing_circles::{Error, FrameBuffer, Playground, Rgba, Surface, TextStyle};

const BACKGROUND: u32 = 0x00_0A_0A_0A; // near-black page
const TEXT_COLOR: u32 = 0x00_FF_FF_FF;
const HUD_COLOR: u32 = 0x00_B0_B0_B0;
const CURSOR_RADIUS: f32 = 10.0; // 20 px ring
const CURSOR_BORDER: f32 = 2.0;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    /* --- Config ---
       First CLI argument is an optional TOML file; everything else is defaulted. */
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let cfg = Config::load(config_path.as_deref())?;
    let style = cfg.text_style();
    info!(
        width = cfg.width,
        height = cfg.height,
        font_size = style.font_size,
        padding = style.padding,
        seeded = cfg.seed.is_some(),
        "starting typing playground"
    );

    /* --- Window + canvas ---
       Visual: a dark window; the canvas always matches its client size. */
    let mut drawer = Drawer::new("Typing Circles", cfg.width, cfg.height, cfg.target_fps)?;
    let (w, h) = drawer.size();
    let mut canvas = Canvas::new(w, h);

    /* --- Pattern backdrop (rebuilt on resize) ---
       Visual: faint white bars behind the text. */
    let mut pattern_rng = make_rng(cfg.seed, 1);
    let mut backdrop = FrameBuffer::new(w, h);
    paint_backdrop(&mut backdrop, canvas.blender(), &cfg, &mut pattern_rng);
    if let Some(path) = &cfg.pattern_png {
        match pattern::export_png(&backdrop, path) {
            Ok(()) => info!(path = %path.display(), "pattern background exported"),
            Err(e) => warn!(error = %e, "pattern export failed"),
        }
    }

    /* --- Core: text region + circle playground --- */
    let mut typing = TypingArea::new(&cfg.initial_text);
    let mut playground = Playground::new(style, make_rng(cfg.seed, 0));
    playground.on_text_changed(typing.text());
    playground.start();

    let mut fade = ScrollFade::new(h as f32);
    let mut base_dirty = true; // base layer (backdrop + text) needs repainting

    let started = Instant::now();
    let autofocus = Duration::from_millis(cfg.autofocus_ms);
    let mut autofocus_pending = true;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        let now = Instant::now();

        /* 1) Follow the window size. */
        let (w, h) = drawer.size();
        if (w, h) != canvas.size() {
            debug!(w, h, "canvas resized");
            canvas.resize(w, h);
            backdrop.resize(w, h);
            paint_backdrop(&mut backdrop, canvas.blender(), &cfg, &mut pattern_rng);
            fade.set_section_height(h as f32);
            base_dirty = true;
        }

        /* 2) Focus: autofocus once, click to focus, ESC to blur. */
        let was_focused = typing.is_focused();
        if autofocus_pending && now.duration_since(started) >= autofocus {
            typing.focus();
            autofocus_pending = false;
        }
        let pointer = drawer.pointer();
        if pointer.is_some() && drawer.left_click() {
            typing.focus();
            autofocus_pending = false;
        }
        if drawer.pressed(Key::Escape) {
            typing.blur();
        }
        base_dirty |= was_focused != typing.is_focused();

        /* 3) Text input. Any change resyncs the circles right away. */
        let mut changed = false;
        let typed = drawer.drain_typed();
        if drawer.modifier_down() {
            if drawer.pressed(Key::K) {
                changed |= typing.clear();
            }
            if drawer.pressed(Key::V) {
                changed |= paste_clipboard(&mut typing);
            }
        } else {
            for ch in typed {
                changed |= typing.insert_char(ch);
            }
        }
        if drawer.pressed_repeat(Key::Enter) || drawer.pressed_repeat(Key::NumPadEnter) {
            changed |= typing.newline();
        }
        if drawer.pressed_repeat(Key::Backspace) {
            changed |= typing.backspace();
        }
        if changed {
            playground.on_text_changed(typing.text());
            base_dirty = true;
        }

        /* 4) Hover flag + scroll dim. */
        playground.set_hovering(pointer.is_some());
        fade.scroll(drawer.scroll_delta());

        /* 5) Base layer: backdrop + text + caret, only when something under the circles changed. */
        if base_dirty {
            paint_base(canvas.base_mut(), &backdrop, &typing, &style);
            base_dirty = false;
        }

        /* 6) Animation frame: clear to base, tick, draw circles. */
        if !playground.frame(&mut canvas) {
            break;
        }

        /* 7) Cursor ring, HUD, scroll dim. */
        if let Some(p) = pointer {
            canvas.stroke_ring(p, CURSOR_RADIUS, CURSOR_BORDER, Rgba::white(0.5));
        }
        if cfg.show_hud {
            let hud = format!("CTRL+K: CLEAR | CTRL+V: PASTE | ESC: BLUR | {hud_fps_text}");
            draw_text_5x7(canvas.screen_mut(), 8, h as i32 - 14, &hud, HUD_COLOR);
        }
        canvas.dim(fade.opacity());

        /* 8) Present (a minimized window has nothing to show, but still needs its events pumped). */
        if canvas.screen().is_empty() {
            drawer.update();
        } else {
            drawer.present(canvas.screen())?;
        }

        /* 9) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!(fps, circles = playground.field().len(), "frame rate");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    playground.stop();
    info!("window closed");
    Ok(())
}

/// Seeded runs get one independent stream per consumer; unseeded runs use OS entropy.
fn make_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_entropy(),
    }
}

fn paint_backdrop(backdrop: &mut FrameBuffer, blender: &Blender, cfg: &Config, rng: &mut StdRng) {
    backdrop.pixels.fill(BACKGROUND);
    let rects = pattern::generate(backdrop.width, backdrop.height, cfg.pattern_rects, rng);
    pattern::paint(backdrop, blender, &rects, cfg.pattern_opacity);
}

fn paint_base(base: &mut FrameBuffer, backdrop: &FrameBuffer, typing: &TypingArea, style: &TextStyle) {
    base.pixels.copy_from_slice(&backdrop.pixels);
    let (cx, cy) = draw_text_block(base, typing.text(), style, TEXT_COLOR);
    if typing.is_focused() {
        let scale = glyph_scale(style);
        draw_line(base, cx + scale, cy, cx + scale, cy + 7 * scale, TEXT_COLOR);
    }
}

fn paste_clipboard(typing: &mut TypingArea) -> bool {
    match read_clipboard() {
        Ok(text) => typing.paste(&text),
        Err(e) => {
            warn!(error = %e, "paste failed");
            false
        }
    }
}

fn read_clipboard() -> Result<String, Error> {
    Ok(arboard::Clipboard::new()?.get_text()?)
}
