// What you SEE:
// • Live camera is always the base image; your painting sits on top of it.
// • Pinch (index + middle fingertip together) to draw, open to just move the cursor.
//   Without a hand detector the mouse stands in: hold Left Mouse to "pinch".
// • Pinch on the toolbar at the top to pick color / tool / width, clear or save.
// • C clears, S saves a PNG, ESC or Q quits.

mod camera;
mod draw;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use air_painter::config::DEFAULT_CONFIG_FILE;
use air_painter::hud::{draw_crosshair, draw_text_5x7};
use air_painter::painter::GestureState;
use air_painter::tracker::{HandTracker, PointerTracker};
use air_painter::{Color, Error, FrameBuffer, PaintSession, PainterConfig, export};
use camera::VideoSource;
use draw::Drawer;
use log::{error, info};

const CURSOR_IDLE: Color = Color::bgr(0x33, 0xCC, 0xFF); // yellow

fn main() -> Result<(), Error> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = PainterConfig::load_from_file(&config_path);

    /* --- Camera + window setup --- */
    let mut video = VideoSource::open(config.camera_index, config.frame_width, config.frame_height);
    let (w, h) = video.resolution();
    info!("Air painter v{} at {w}x{h}", env!("CARGO_PKG_VERSION"));
    let mut drawer = Drawer::new("Air Painter", w, h)?;

    /* --- Session: canvas, tools, gesture state, smoothing --- */
    let mut session = PaintSession::new(&config, w, h);
    let mut tracker = PointerTracker::new(config.pinch_threshold_for_width(w));
    let save_dir = PathBuf::from(&config.save_dir);

    /* --- Reusable screen buffer (what you actually see each frame) --- */
    let mut screen = FrameBuffer::black(w, h);

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.quit_pressed() {
        let now = Instant::now();

        // 1) Fresh live frame (or a black placeholder if the camera hiccuped).
        let live = video.next_frame();

        // 2) Keyboard shortcuts.
        if drawer.c_pressed_once() {
            session.clear();
        }
        let mut save = drawer.s_pressed_once();

        // 3) Tracker -> session (smoothing, pinch, toolbar, state machine).
        tracker.update(drawer.mouse_pos(), drawer.left_mouse_down());
        let hand = tracker.track(&live);
        let report = session.step(hand, now);
        save |= report.save_requested;

        if save {
            if let Err(e) = export::save_painting(session.canvas().raster(), &save_dir) {
                error!("{e}");
            }
        }

        // 4) Paint layer over video.
        session.compose_into(&live, &mut screen)?;

        // 5) Toolbar, cursor, HUD on top.
        session.toolbar().render(&mut screen, session.tools());

        if let Some(cursor) = report.cursor {
            let color = if session.gesture_state() == GestureState::Idle {
                CURSOR_IDLE
            } else {
                session.tools().color()
            };
            draw_crosshair(&mut screen, cursor, 12, color);
        }

        let tools = session.tools();
        let mode = if report.pinch { "DRAW" } else { "MOVE" };
        let hud = format!("{} | {} | WIDTH {} | {}", mode, tools.tool().label(), tools.width(), hud_fps_text);
        draw_text_5x7(&mut screen, 8, h as i32 - 16, &hud, Color::WHITE);

        // 6) Present to the window.
        drawer.present(&screen)?;

        // 7) FPS counter (HUD, refreshed once per second).
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            log::debug!("FPS: {fps:.1}");
            hud_fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
