//! Terminal demo host (default binary).
//!
//! Runs a tiny spinning scene with the Konsoul console on top. Press `~` to
//! open the console, Escape to close it, Ctrl+C to quit. While the console
//! is closed, Space reverses the spin, Up/Down change its speed and P plays
//! a sound.

use std::cell::{Cell as StdCell, RefCell};
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::LevelFilter;

use phantom::audio::{Audio, NullBackend, SoundInfo, Tween};
use phantom::core::{
    level_from_env, BootLog, Canvas, CommandError, CommandRegistry, ConsoleConfig, ConsoleOverlay,
    ConsoleSettings, Diagnostics, DiagnosticsLogger, InputCapture, SimpleRng, Tooltip,
    TooltipStyle,
};
use phantom::input::{should_quit, InputDevice, TerminalKeyboard};
use phantom::term::{Cell, CellFont, FrameBuffer, FrameCanvas, TerminalRenderer};
use phantom::types::{Key, Rgb, Vec2, TICK_MS};

const CONFIG_FILE: &str = "phantom.toml";
const POINT_COUNT: usize = 24;

type Console = ConsoleOverlay<CellFont, CommandRegistry>;
type SharedAudio = Rc<RefCell<Audio<NullBackend>>>;

fn main() -> Result<()> {
    let diagnostics = Diagnostics::new();
    DiagnosticsLogger::new(diagnostics.clone(), level_from_env(LevelFilter::Info)).init()?;

    // Collect startup logs until the console exists.
    let boot = BootLog::capture(&diagnostics);

    let settings = ConsoleSettings::from_config(load_config())?;
    let audio: SharedAudio = Rc::new(RefCell::new(Audio::new(NullBackend::new())));
    register_sounds(&mut audio.borrow_mut());

    let quit = Rc::new(StdCell::new(false));
    let early = boot.finish();
    let mut console = ConsoleOverlay::new(CellFont, settings, &diagnostics, CommandRegistry::new());
    for line in &early {
        console.write_line(line);
    }
    register_commands(&mut console, &diagnostics, &audio, &quit);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut console, &audio, &quit);

    // Always try to restore terminal state.
    let _ = term.exit();
    console.dispose();
    result
}

fn load_config() -> ConsoleConfig {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        return ConsoleConfig::load_or_default(path);
    }
    // Terminal cells are large; the pixel-oriented padding would waste rows.
    ConsoleConfig {
        padding: 1.0,
        background: Rgb::new(12, 16, 40),
        foreground: Rgb::new(200, 230, 200),
        ..ConsoleConfig::default()
    }
}

fn register_sounds(audio: &mut Audio<NullBackend>) {
    audio.register(SoundInfo::new("blip", "sfx/blip.wav").with_volume(0.6).with_limit(4));
    audio.register(SoundInfo::new("hum", "sfx/hum.ogg").with_volume(0.3).with_limit(1));
}

fn register_commands(
    console: &mut Console,
    diagnostics: &Diagnostics,
    audio: &SharedAudio,
    quit: &Rc<StdCell<bool>>,
) {
    let lines = console.lines();
    let echo = diagnostics.clone();
    let quit = Rc::clone(quit);
    let play_audio = Rc::clone(audio);
    let stop_audio = Rc::clone(audio);

    let registry = console.dispatcher_mut();
    registry.register("clear", "clear the scrollback", move |_| {
        lines.clear();
        Ok(())
    });
    registry.register("echo", "print the arguments", move |args| {
        echo.write_line(&args[1..].join(" "));
        Ok(())
    });
    registry.register("play", "play <sound> [fade seconds]", move |args| {
        let name = args
            .get(1)
            .ok_or_else(|| CommandError::Usage("play <sound> [fade seconds]".into()))?;
        let mut audio = play_audio.borrow_mut();
        let started = match args.get(2) {
            Some(secs) => {
                let secs: f32 = secs
                    .parse()
                    .map_err(|_| CommandError::Usage("fade must be a number".into()))?;
                audio.fade_in(name, false, secs, Tween::EaseOut, None)
            }
            None => audio.play(name, None, 0.0),
        };
        started.map_err(|e| CommandError::Failed(e.to_string()))?;
        log::info!("playing {name}");
        Ok(())
    });
    registry.register("stop", "fade out every sound", move |_| {
        stop_audio.borrow_mut().fade_out_all(0.5, Tween::Linear);
        Ok(())
    });
    registry.register("quit", "leave the demo", move |_| {
        quit.set(true);
        Ok(())
    });

    let mut help = registry.help_lines();
    help.push("help - list commands".to_string());
    help.sort();
    let out = diagnostics.clone();
    registry.register("help", "list commands", move |_| {
        for line in &help {
            out.write_line(line);
        }
        Ok(())
    });
}

fn run(
    term: &mut TerminalRenderer,
    console: &mut Console,
    audio: &SharedAudio,
    quit: &StdCell<bool>,
) -> Result<()> {
    let mut keyboard = TerminalKeyboard::new();
    let mut scene = Scene::new(1);
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let dt = TICK_MS as f32 / 1000.0;
    let mut last_tick = Instant::now();

    while !quit.get() {
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    keyboard.handle_event(key);
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() < tick_duration {
            continue;
        }
        last_tick = Instant::now();

        if console.update(dt, &keyboard) == InputCapture::PassThrough {
            scene.handle_input(&keyboard, &mut audio.borrow_mut());
        }
        scene.update(dt);
        audio.borrow_mut().update(dt);
        keyboard.begin_frame();

        let (w, h) = TerminalRenderer::size().unwrap_or((80, 24));
        fb.resize(w, h);
        fb.clear(Cell::default());
        {
            let mut canvas = FrameCanvas::new(&mut fb);
            scene.render(&mut canvas);
            console.render(&mut canvas);
        }
        term.present(&mut fb)?;
    }
    Ok(())
}

/// Points orbiting the screen center, with a tooltip on the first one.
struct Scene {
    points: Vec<Vec2>,
    angle: f32,
    speed: f32,
    tooltip: Tooltip,
}

impl Scene {
    fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let points = (0..POINT_COUNT)
            .map(|_| {
                let p = rng.random_vec3().flatten();
                Vec2::new(p.x * 2.0 - 1.0, p.y * 2.0 - 1.0)
            })
            .collect();

        let mut tooltip = Tooltip::new(TooltipStyle {
            offset: 2.0,
            ..TooltipStyle::default()
        });
        tooltip.set_text("phantom", Some(&CellFont));

        Self {
            points,
            angle: 0.0,
            speed: 0.8,
            tooltip,
        }
    }

    fn handle_input(&mut self, input: &impl InputDevice, audio: &mut Audio<NullBackend>) {
        if input.is_pressed(Key::Space) {
            self.speed = -self.speed;
        }
        if input.is_pressed(Key::Up) {
            self.speed *= 1.25;
        }
        if input.is_pressed(Key::Down) {
            self.speed *= 0.8;
        }
        if input.is_pressed(Key::P) {
            if let Err(e) = audio.play("blip", None, 0.0) {
                log::warn!("{e}");
            }
        }
    }

    fn update(&mut self, dt: f32) {
        self.angle = (self.angle + self.speed * dt).rem_euclid(std::f32::consts::TAU);
    }

    fn render(&mut self, canvas: &mut impl Canvas) {
        let viewport = canvas.viewport();
        let center = Vec2::new(viewport.width * 0.5, viewport.height * 0.5);
        let radius = (viewport.height * 0.45).max(1.0);

        let mut first = None;
        for p in &self.points {
            let r = p.rotate_by(self.angle) * radius;
            // Cells are roughly twice as tall as they are wide.
            let pos = center + Vec2::new(r.x * 2.0, r.y);
            canvas.draw_text("*", pos, Rgb::new(255, 200, 80));
            first.get_or_insert(pos);
        }

        if let Some(anchor) = first {
            self.tooltip.set_position(anchor, viewport);
            self.tooltip.render(canvas);
        }
        canvas.draw_text(
            "~ console   space reverse   up/down speed   p sound   ctrl+c quit",
            Vec2::new(0.0, viewport.height - 1.0),
            Rgb::new(120, 120, 120),
        );
    }
}
