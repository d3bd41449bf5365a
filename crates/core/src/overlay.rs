//! The developer console overlay.
//!
//! The host calls [`ConsoleOverlay::update`] once per frame with the elapsed
//! time and the keyboard, then [`ConsoleOverlay::render`] with a canvas.
//!
//! While closed the overlay only watches for the open key and lets the game
//! have the keyboard. While open it consumes every key:
//!
//! | Input | Effect |
//! |-------|--------|
//! | open key / Escape | close |
//! | Shift+Up / Shift+Down | scroll one line back / forward |
//! | PageUp / PageDown | scroll one page back / forward |
//! | Shift+PageUp / Shift+PageDown | oldest / newest line |
//! | Ctrl+Up / Ctrl+Down | shrink / grow the panel (Shift: 5 lines) |
//! | Left / Right / Home / End | move the cursor |
//! | Backspace / Delete | edit |
//! | Enter | run the command line |

use std::sync::Arc;

use phantom_input::{InputDevice, KeyMap};

use crate::blink::BlinkTimer;
use crate::command::{CommandDispatcher, CommandOutcome, CommandRegistry};
use crate::diagnostics::{Diagnostics, SinkRegistration};
use crate::editor::InputEditor;
use crate::line_buffer::{LineBuffer, SharedLines};
use crate::render::{Canvas, Font, Viewport};
use crate::scroll::ScrollController;
use crate::settings::ConsoleSettings;
use crate::types::{Key, Modifier, Vec2, RESIZE_STEP, RESIZE_STEP_FAST};
use crate::wrap::wrap;

/// First line written to every new console.
pub const BANNER: &str = "] Konsoul initialized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleState {
    #[default]
    Closed,
    Open,
}

/// Whether the console took the keyboard this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCapture {
    Consumed,
    PassThrough,
}

pub struct ConsoleOverlay<F: Font, D: CommandDispatcher = CommandRegistry> {
    font: F,
    settings: ConsoleSettings,
    state: ConsoleState,
    keymap: KeyMap,
    lines: SharedLines,
    editor: InputEditor,
    scroll: ScrollController,
    blink: BlinkTimer,
    diagnostics: Diagnostics,
    registration: Option<SinkRegistration>,
    dispatcher: D,
    viewport: Option<Viewport>,
}

impl<F: Font, D: CommandDispatcher> ConsoleOverlay<F, D> {
    /// Build a closed console and attach its scrollback to `diagnostics`.
    pub fn new(font: F, settings: ConsoleSettings, diagnostics: &Diagnostics, dispatcher: D) -> Self {
        let lines = SharedLines::new(LineBuffer::with_limit(settings.scrollback_limit()));
        let registration = diagnostics.register(Arc::new(lines.clone()));
        lines.write_line(BANNER);
        log::debug!(
            "console ready: {} lines, scrollback {}",
            settings.line_count(),
            settings.scrollback_limit()
        );

        Self {
            font,
            settings,
            state: ConsoleState::Closed,
            keymap: KeyMap::new(),
            lines,
            editor: InputEditor::new(),
            scroll: ScrollController::new(),
            blink: BlinkTimer::new(),
            diagnostics: diagnostics.clone(),
            registration: Some(registration),
            dispatcher,
            viewport: None,
        }
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConsoleState::Open
    }

    pub fn open(&mut self) {
        self.state = ConsoleState::Open;
        self.blink.reset();
    }

    pub fn close(&mut self) {
        self.state = ConsoleState::Closed;
    }

    pub fn settings(&self) -> &ConsoleSettings {
        &self.settings
    }

    pub fn editor(&self) -> &InputEditor {
        &self.editor
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    /// Handle to the scrollback, e.g. for commands that clear it.
    pub fn lines(&self) -> SharedLines {
        self.lines.clone()
    }

    pub fn write(&self, text: &str) {
        self.lines.write(text);
    }

    pub fn write_line(&self, text: &str) {
        self.lines.write_line(text);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll.to_bottom();
    }

    /// Whether the scrollback still receives diagnostics.
    pub fn is_attached(&self) -> bool {
        self.registration.as_ref().is_some_and(SinkRegistration::is_active)
    }

    /// Detach from diagnostics. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if let Some(mut registration) = self.registration.take() {
            registration.release();
            log::debug!("console detached from diagnostics");
        }
    }

    /// Largest line count that still fits the last drawn viewport.
    pub fn max_line_count(&self) -> Option<usize> {
        let spacing = self.font.line_spacing();
        let viewport = self.viewport?;
        if spacing <= 0.0 || !spacing.is_finite() {
            return None;
        }
        Some(((viewport.height / spacing).floor() as usize).saturating_sub(1))
    }

    /// Change the visible line count, capped to the viewport, and re-clamp
    /// the scroll offset against it.
    pub fn set_line_count(&mut self, count: usize) {
        let count = match self.max_line_count() {
            Some(max) => count.min(max),
            None => count,
        };
        self.settings.set_line_count(count);
        let total = self.lines.len();
        self.scroll.clamp(total, count);
    }

    /// Per-frame input handling.
    pub fn update(&mut self, elapsed: f32, input: &impl InputDevice) -> InputCapture {
        let open_key = self.settings.open_key();

        if self.state == ConsoleState::Closed {
            if input.is_pressed(open_key) {
                self.open();
                return InputCapture::Consumed;
            }
            return InputCapture::PassThrough;
        }

        if input.is_pressed(open_key) || input.is_pressed(self.settings.cancel_key()) {
            self.close();
            return InputCapture::Consumed;
        }

        self.blink.advance(elapsed);

        let shift = input.shift();
        let ctrl = input.ctrl();

        self.handle_scroll_and_resize(input, shift, ctrl);

        let mut reblink = false;
        if input.is_pressed(Key::Left) {
            reblink |= self.editor.move_left();
        }
        if input.is_pressed(Key::Right) {
            reblink |= self.editor.move_right();
        }
        if input.is_pressed(Key::Home) {
            reblink |= self.editor.home();
        }
        if input.is_pressed(Key::End) {
            reblink |= self.editor.end();
        }

        if !ctrl {
            let modifier = Modifier::from_shift(shift);
            for key in input.newly_pressed() {
                if let Some(c) = self.keymap.decode(key, modifier) {
                    self.editor.insert(c);
                    reblink = true;
                }
            }
        }

        if input.is_pressed(Key::Backspace) {
            reblink |= self.editor.backspace();
        }
        if input.is_pressed(Key::Delete) {
            reblink |= self.editor.delete();
        }

        if input.is_pressed(Key::Enter) {
            self.submit();
            reblink = true;
        }

        if reblink {
            self.blink.reset();
        }
        InputCapture::Consumed
    }

    fn handle_scroll_and_resize(&mut self, input: &impl InputDevice, shift: bool, ctrl: bool) {
        let line_count = self.settings.line_count();

        if ctrl {
            let step = if shift { RESIZE_STEP_FAST } else { RESIZE_STEP };
            if input.is_pressed(Key::Up) {
                self.set_line_count(line_count.saturating_sub(step));
            }
            if input.is_pressed(Key::Down) {
                self.set_line_count(line_count.saturating_add(step));
            }
            return;
        }

        if shift {
            if input.is_pressed(Key::Up) {
                self.scroll.scroll_up(1);
            }
            if input.is_pressed(Key::Down) {
                self.scroll.scroll_down(1);
            }
            if input.is_pressed(Key::PageUp) {
                self.scroll.to_top();
            }
            if input.is_pressed(Key::PageDown) {
                self.scroll.to_bottom();
            }
        } else {
            if input.is_pressed(Key::PageUp) {
                self.scroll.page_up(line_count);
            }
            if input.is_pressed(Key::PageDown) {
                self.scroll.page_down(line_count);
            }
        }
    }

    fn submit(&mut self) {
        let echo = format!("{}{}", self.settings.prompt(), self.editor.text());
        let Some(argv) = self.editor.submit() else {
            return;
        };
        self.lines.write_line(&echo);
        self.scroll.to_bottom();

        match self.dispatcher.dispatch(&argv) {
            CommandOutcome::Executed => {}
            CommandOutcome::Unknown => {
                self.diagnostics
                    .write_line(&format!("unknown command: `{}'", argv[0]));
            }
            CommandOutcome::Failed(message) => {
                self.diagnostics
                    .write_line(&format!("{}: {message}", argv[0]));
            }
        }
    }

    /// Draw the console. Nothing is drawn while closed.
    pub fn render(&mut self, canvas: &mut impl Canvas) {
        let viewport = canvas.viewport();
        self.viewport = Some(viewport);
        if self.state == ConsoleState::Closed {
            return;
        }

        let pad = self.settings.padding();
        let spacing = self.font.line_spacing();
        let line_count = self.settings.line_count();
        let fg = self.settings.foreground();

        let panel_height = pad * 2.0 + spacing * (line_count as f32 + 1.0);
        canvas.fill_rect(
            Vec2::ZERO,
            Vec2::new(viewport.width, panel_height),
            self.settings.background(),
            self.settings.alpha(),
        );

        // Copy the visible lines out so the buffer is not locked while
        // measuring and drawing.
        let visible: Vec<String> = {
            let buffer = self.lines.lock();
            let offset = self.scroll.clamp(buffer.len(), line_count);
            buffer
                .newest_first()
                .skip(offset)
                .take(line_count)
                .map(str::to_string)
                .collect()
        };

        let max_width = viewport.width - pad * 2.0;
        let mut row = line_count;
        'lines: for line in &visible {
            for segment in wrap(line, max_width, &self.font).into_iter().rev() {
                if row == 0 {
                    break 'lines;
                }
                row -= 1;
                canvas.draw_text(segment, Vec2::new(pad, pad + spacing * row as f32), fg);
            }
            if line.is_empty() {
                row = row.saturating_sub(1);
            }
        }

        let prompt_y = pad + spacing * line_count as f32;
        let prompt = self.settings.prompt();
        canvas.draw_text(prompt, Vec2::new(pad, prompt_y), fg);
        let input_x = pad + self.font.measure(prompt).x;
        if !self.editor.is_empty() {
            canvas.draw_text(self.editor.text(), Vec2::new(input_x, prompt_y), fg);
        }

        if self.blink.visible() {
            let x = input_x + self.font.measure(self.editor.text_before_cursor()).x;
            canvas.draw_line(
                Vec2::new(x, prompt_y),
                Vec2::new(x, prompt_y + spacing),
                fg,
            );
        }
    }
}

impl<F: Font, D: CommandDispatcher> Drop for ConsoleOverlay<F, D> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::NoCommands;
    use crate::line_buffer::BootLog;
    use crate::render::test_support::{MonoFont, RecordingCanvas};
    use crate::settings::ConsoleConfig;
    use phantom_input::{KeySet, KeyboardState};

    fn settings(line_count: usize) -> ConsoleSettings {
        ConsoleSettings::from_config(ConsoleConfig {
            padding: 0.0,
            line_count,
            ..ConsoleConfig::default()
        })
        .unwrap()
    }

    fn console(line_count: usize) -> ConsoleOverlay<MonoFont, NoCommands> {
        ConsoleOverlay::new(
            MonoFont::new(1.0, 1.0),
            settings(line_count),
            &Diagnostics::new(),
            NoCommands,
        )
    }

    fn keys(keys: &[Key]) -> KeySet {
        keys.iter().copied().collect()
    }

    fn tap(keys_down: &[Key]) -> KeyboardState {
        KeyboardState::from_sets(KeySet::EMPTY, keys(keys_down))
    }

    fn type_text<Fo: Font, D: CommandDispatcher>(console: &mut ConsoleOverlay<Fo, D>, text: &str) {
        let map = KeyMap::new();
        for c in text.chars() {
            let (key, modifier) = map.find(c).unwrap();
            let mut down = vec![key];
            if modifier == Modifier::Shift {
                down.push(Key::LeftShift);
            }
            console.update(0.0, &tap(&down));
        }
    }

    #[test]
    fn open_key_toggles_and_consumes_nothing_else() {
        let mut c = console(5);
        assert_eq!(c.update(0.0, &tap(&[Key::A])), InputCapture::PassThrough);

        assert_eq!(c.update(0.0, &tap(&[Key::Tilde, Key::A])), InputCapture::Consumed);
        assert!(c.is_open());
        assert!(c.editor().is_empty());

        assert_eq!(c.update(0.0, &tap(&[Key::Tilde])), InputCapture::Consumed);
        assert!(!c.is_open());

        c.update(0.0, &tap(&[Key::Tilde]));
        c.update(0.0, &tap(&[Key::Escape, Key::B]));
        assert_eq!(c.state(), ConsoleState::Closed);
        assert!(c.editor().is_empty());
    }

    #[test]
    fn held_key_types_once() {
        let mut c = console(5);
        c.open();
        c.update(0.0, &tap(&[Key::H]));
        let held = KeyboardState::from_sets(keys(&[Key::H]), keys(&[Key::H]));
        c.update(0.0, &held);
        assert_eq!(c.editor().text(), "h");
    }

    #[test]
    fn shift_selects_upper_case_and_symbols() {
        let mut c = console(5);
        c.open();
        c.update(0.0, &tap(&[Key::A, Key::LeftShift]));
        c.update(0.0, &tap(&[Key::D1, Key::RightShift]));
        c.update(0.0, &tap(&[Key::A]));
        assert_eq!(c.editor().text(), "A!a");
    }

    #[test]
    fn ctrl_suppresses_typing() {
        let mut c = console(5);
        c.open();
        c.update(0.0, &tap(&[Key::A, Key::LeftControl]));
        assert!(c.editor().is_empty());
    }

    #[test]
    fn submit_echoes_and_reports_unknown_commands() {
        let diagnostics = Diagnostics::new();
        let mut c = ConsoleOverlay::new(MonoFont::new(1.0, 1.0), settings(5), &diagnostics, NoCommands);
        c.open();
        type_text(&mut c, "foo bar");
        c.update(0.0, &tap(&[Key::Enter]));

        let lines = c.lines().snapshot();
        assert_eq!(
            lines,
            vec![
                BANNER.to_string(),
                "] foo bar".to_string(),
                "unknown command: `foo'".to_string()
            ]
        );
        assert!(c.editor().is_empty());
    }

    #[test]
    fn blank_submit_dispatches_nothing() {
        let mut calls = 0;
        {
            let mut c = ConsoleOverlay::new(
                MonoFont::new(1.0, 1.0),
                settings(5),
                &Diagnostics::new(),
                |_: &[String]| {
                    calls += 1;
                    CommandOutcome::Executed
                },
            );
            c.open();
            c.update(0.0, &tap(&[Key::Space]));
            c.update(0.0, &tap(&[Key::Enter]));
            assert!(c.editor().is_empty());
            assert_eq!(c.lines().len(), 1);
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn render_places_newest_line_above_prompt() {
        let mut c = console(3);
        for line in ["one", "two", "three", "four"] {
            c.write_line(line);
        }
        c.open();
        let mut canvas = RecordingCanvas::new(40.0, 20.0);
        c.render(&mut canvas);

        let texts = canvas.texts();
        assert_eq!(
            texts,
            vec![
                ("four".to_string(), 2.0),
                ("three".to_string(), 1.0),
                ("two".to_string(), 0.0),
                ("] ".to_string(), 3.0),
            ]
        );
    }

    #[test]
    fn closed_console_draws_nothing() {
        let mut c = console(3);
        let mut canvas = RecordingCanvas::new(40.0, 20.0);
        c.render(&mut canvas);
        assert!(canvas.cmds.is_empty());
    }

    #[test]
    fn zero_lines_draws_only_the_prompt() {
        let mut c = console(0);
        c.write_line("hidden");
        c.open();
        let mut canvas = RecordingCanvas::new(40.0, 20.0);
        c.render(&mut canvas);
        assert_eq!(canvas.texts(), vec![("] ".to_string(), 0.0)]);
    }

    #[test]
    fn more_lines_than_written_is_fine() {
        let mut c = console(10);
        c.clear();
        c.write_line("only");
        c.open();
        let mut canvas = RecordingCanvas::new(40.0, 20.0);
        c.render(&mut canvas);
        assert_eq!(canvas.texts()[0], ("only".to_string(), 9.0));
    }

    #[test]
    fn wrapped_rows_are_clipped_to_line_count() {
        let mut c = console(2);
        c.write_line("aaaaaaaaaabbbbbbbbbbcccccccccc");
        c.open();
        let mut canvas = RecordingCanvas::new(10.0, 20.0);
        c.render(&mut canvas);
        let texts = canvas.texts();
        assert_eq!(texts[0], ("cccccccccc".to_string(), 1.0));
        assert_eq!(texts[1], ("bbbbbbbbbb".to_string(), 0.0));
        assert_eq!(texts.len(), 3);
    }

    #[test]
    fn cursor_follows_text_before_cursor() {
        let mut c = console(1);
        c.open();
        type_text(&mut c, "ab");
        c.update(0.0, &tap(&[Key::Left]));
        let mut canvas = RecordingCanvas::new(40.0, 20.0);
        c.render(&mut canvas);
        // prompt "] " is 2 wide, one char before the cursor
        assert_eq!(canvas.lines(), vec![(Vec2::new(3.0, 1.0), Vec2::new(3.0, 2.0))]);

        c.update(1.5, &KeyboardState::new());
        let mut canvas = RecordingCanvas::new(40.0, 20.0);
        c.render(&mut canvas);
        assert!(canvas.lines().is_empty());
    }

    #[test]
    fn scrolling_keys() {
        let mut c = console(2);
        for i in 0..10 {
            c.write_line(&i.to_string());
        }
        c.open();

        c.update(0.0, &tap(&[Key::PageUp]));
        assert_eq!(c.scroll().offset(), 2);
        c.update(0.0, &tap(&[Key::Up, Key::LeftShift]));
        assert_eq!(c.scroll().offset(), 3);
        c.update(0.0, &tap(&[Key::PageUp, Key::LeftShift]));
        let mut canvas = RecordingCanvas::new(40.0, 20.0);
        c.render(&mut canvas);
        // 11 lines with the banner, 2 visible
        assert_eq!(c.scroll().offset(), 9);
        assert_eq!(canvas.texts()[1], (BANNER.to_string(), 0.0));

        c.update(0.0, &tap(&[Key::PageDown, Key::LeftShift]));
        assert_eq!(c.scroll().offset(), 0);
    }

    #[test]
    fn ctrl_arrows_resize_within_viewport() {
        let mut c = console(3);
        c.open();
        let mut canvas = RecordingCanvas::new(40.0, 8.0);
        c.render(&mut canvas);

        c.update(0.0, &tap(&[Key::Down, Key::LeftControl]));
        assert_eq!(c.settings().line_count(), 4);
        c.update(0.0, &tap(&[Key::Down, Key::LeftControl, Key::LeftShift]));
        assert_eq!(c.settings().line_count(), 7);
        c.update(0.0, &tap(&[Key::Up, Key::LeftControl, Key::LeftShift]));
        assert_eq!(c.settings().line_count(), 2);
        c.update(0.0, &tap(&[Key::Up, Key::LeftControl, Key::LeftShift]));
        assert_eq!(c.settings().line_count(), 0);
        assert_eq!(c.scroll().offset(), 0);
    }

    #[test]
    fn diagnostics_reach_console_until_disposed() {
        let diagnostics = Diagnostics::new();
        let mut c = ConsoleOverlay::new(MonoFont::new(1.0, 1.0), settings(3), &diagnostics, NoCommands);
        diagnostics.write("partial ");
        diagnostics.write("line\n");
        assert_eq!(c.lines().snapshot().last().map(String::as_str), Some("partial line"));

        c.dispose();
        c.dispose();
        assert!(!c.is_attached());
        assert_eq!(diagnostics.sink_count(), 0);
        diagnostics.write_line("lost");
        assert_eq!(c.lines().len(), 2);
    }

    #[test]
    fn resize_reclamps_scroll_offset() {
        let mut c = console(2);
        for i in 0..10 {
            c.write_line(&format!("line {i}"));
        }
        c.open();
        c.update(0.0, &tap(&[Key::PageUp, Key::LeftShift]));
        let mut canvas = RecordingCanvas::new(40.0, 10.0);
        c.render(&mut canvas);
        assert_eq!(c.scroll().offset(), 9);

        c.update(0.0, &tap(&[Key::Down, Key::LeftControl, Key::LeftShift]));
        assert_eq!(c.settings().line_count(), 7);
        assert_eq!(c.scroll().offset(), 4);

        c.set_line_count(1);
        assert_eq!(c.scroll().offset(), 4);
    }

    #[test]
    fn boot_lines_are_replayed_once() {
        let diagnostics = Diagnostics::new();
        let boot = BootLog::capture(&diagnostics);
        diagnostics.write_line("config loaded");
        let early = boot.finish();

        let c = ConsoleOverlay::new(MonoFont::new(1.0, 1.0), settings(3), &diagnostics, NoCommands);
        diagnostics.write_line("console ready");
        for line in &early {
            c.write_line(line);
        }
        assert_eq!(c.lines().snapshot(), vec![BANNER, "console ready", "config loaded"]);
        assert_eq!(diagnostics.sink_count(), 1);
    }

    #[test]
    fn drop_detaches() {
        let diagnostics = Diagnostics::new();
        {
            let _c = ConsoleOverlay::new(MonoFont::new(1.0, 1.0), settings(3), &diagnostics, NoCommands);
            assert_eq!(diagnostics.sink_count(), 1);
        }
        assert_eq!(diagnostics.sink_count(), 0);
    }
}
