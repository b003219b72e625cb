use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cybermd_engine::{
    Document, EditorSession, PassExecutor, StyleMap, Theme, diff, schedule::PassLimits,
};
use std::{
    ops::Range,
    path::{Path, PathBuf},
    time::Instant,
};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An action that throws the buffer away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Quit,
    New,
}

/// Question shown on the status line; keys go to it until it is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Collecting a file name, then running `then` once the file is written.
    SaveAs { name: String, then: Option<Pending> },
    /// The buffer has unsaved changes: `y` saves first, `n` discards.
    Unsaved(Pending),
}

impl Prompt {
    pub fn text(&self) -> String {
        match self {
            Prompt::SaveAs { name, .. } => format!("Save as: {name}"),
            Prompt::Unsaved(Pending::Quit) => {
                "Save changes before quitting? (y/n, Esc cancels)".to_string()
            }
            Prompt::Unsaved(Pending::New) => {
                "Save changes before starting a new file? (y/n, Esc cancels)".to_string()
            }
        }
    }
}

pub struct App<E: PassExecutor> {
    pub path: Option<PathBuf>,
    pub document: Document,
    pub session: EditorSession<E>,
    pub view: StyleMap,
    pub theme: Theme,
    /// Byte offset into the document, always on a char boundary.
    pub cursor: usize,
    pub show_outline: bool,
    /// First visible line.
    pub scroll: usize,
    pub saved_version: u64,
    pub message: Option<String>,
    pub prompt: Option<Prompt>,
}

impl<E: PassExecutor> App<E> {
    pub fn new(session: EditorSession<E>, theme: Theme, path: Option<PathBuf>) -> Result<Self> {
        let text = match &path {
            Some(path) if path.exists() => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            _ => String::new(),
        };
        let document = Document::from_text(&text);
        let mut app = Self {
            path,
            view: StyleMap::new(document.len()),
            saved_version: document.version(),
            document,
            session,
            theme,
            cursor: 0,
            show_outline: false,
            scroll: 0,
            message: None,
            prompt: None,
        };
        // Highlight the loaded text without waiting for an edit.
        app.session
            .on_text_changed(app.document.snapshot(), Instant::now());
        Ok(app)
    }

    pub fn is_dirty(&self) -> bool {
        self.document.version() != self.saved_version
    }

    /// Lets the session deliver finished passes into the view.
    ///
    /// A delivered pass for the current text repaints the whole view from
    /// its ranges. Ranges from an older version are in that version's
    /// offsets, so the spliced view stays until the pending pass lands.
    pub fn tick(&mut self, now: Instant) {
        let before = self.session.highlight_version();
        self.session.tick(now);
        let delivered = self.session.highlight_version();
        if delivered != before && delivered == Some(self.document.version()) {
            self.repaint();
        }
    }

    fn repaint(&mut self) {
        self.view = StyleMap::new(self.document.len());
        self.view.apply(&diff(&[], self.session.highlights()));
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<Flow> {
        self.message = None;
        if let Some(prompt) = self.prompt.take() {
            return Ok(self.answer(prompt, key, now));
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => return Ok(self.request(Pending::Quit, now)),
                KeyCode::Char('n') => return Ok(self.request(Pending::New, now)),
                KeyCode::Char('s') => {
                    self.save_or_ask(None);
                }
                KeyCode::Char('w') => {
                    let name = self
                        .path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    self.prompt = Some(Prompt::SaveAs { name, then: None });
                }
                KeyCode::Char('o') => self.show_outline = !self.show_outline,
                _ => {}
            }
            return Ok(Flow::Continue);
        }
        match key.code {
            KeyCode::Char(c) => self.insert(&c.to_string(), now),
            KeyCode::Tab => self.insert("    ", now),
            KeyCode::Enter => self.insert("\n", now),
            KeyCode::Backspace => self.backspace(now),
            KeyCode::Delete => self.delete_forward(now),
            KeyCode::Left => self.cursor = self.prev_boundary(),
            KeyCode::Right => self.cursor = self.next_boundary(),
            KeyCode::Up => self.move_vertical(-1),
            KeyCode::Down => self.move_vertical(1),
            KeyCode::Home => self.cursor = self.line_range(self.cursor_line()).start,
            KeyCode::End => self.cursor = self.line_range(self.cursor_line()).end,
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn insert(&mut self, text: &str, now: Instant) {
        self.document.insert(self.cursor, text);
        self.view.splice(self.cursor..self.cursor, text.len());
        self.cursor += text.len();
        self.edited(now);
    }

    fn backspace(&mut self, now: Instant) {
        let start = self.prev_boundary();
        if start < self.cursor {
            self.remove(start..self.cursor, now);
            self.cursor = start;
        }
    }

    fn delete_forward(&mut self, now: Instant) {
        let end = self.next_boundary();
        if end > self.cursor {
            self.remove(self.cursor..end, now);
        }
    }

    fn remove(&mut self, range: Range<usize>, now: Instant) {
        self.document.delete(range.clone());
        self.view.splice(range, 0);
        self.edited(now);
    }

    fn edited(&mut self, now: Instant) {
        self.session.on_text_changed(self.document.snapshot(), now);
    }

    /// Runs `action` now, or asks first when there are unsaved changes.
    fn request(&mut self, action: Pending, now: Instant) -> Flow {
        if self.is_dirty() {
            self.prompt = Some(Prompt::Unsaved(action));
            return Flow::Continue;
        }
        self.perform(action, now)
    }

    fn perform(&mut self, action: Pending, now: Instant) -> Flow {
        match action {
            Pending::Quit => Flow::Quit,
            Pending::New => {
                self.new_buffer(now);
                Flow::Continue
            }
        }
    }

    fn answer(&mut self, prompt: Prompt, key: KeyEvent, now: Instant) -> Flow {
        match prompt {
            Prompt::Unsaved(action) => match key.code {
                KeyCode::Char('y' | 'Y') => {
                    if self.save_or_ask(Some(action)) {
                        return self.perform(action, now);
                    }
                }
                KeyCode::Char('n' | 'N') => return self.perform(action, now),
                KeyCode::Esc => self.message = Some("Cancelled".to_string()),
                _ => self.prompt = Some(Prompt::Unsaved(action)),
            },
            Prompt::SaveAs { mut name, then } => match key.code {
                KeyCode::Enter => {
                    let trimmed = name.trim();
                    if trimmed.is_empty() {
                        self.message = Some("No file name given".to_string());
                        return Flow::Continue;
                    }
                    let path = PathBuf::from(trimmed);
                    if self.write_to(&path) {
                        self.path = Some(path);
                        if let Some(action) = then {
                            return self.perform(action, now);
                        }
                    }
                }
                KeyCode::Esc => self.message = Some("Save cancelled".to_string()),
                KeyCode::Backspace => {
                    name.pop();
                    self.prompt = Some(Prompt::SaveAs { name, then });
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    name.push(c);
                    self.prompt = Some(Prompt::SaveAs { name, then });
                }
                _ => self.prompt = Some(Prompt::SaveAs { name, then }),
            },
        }
        Flow::Continue
    }

    /// Empties the buffer and forgets its file. The version keeps counting
    /// so late passes for the old text are refused.
    fn new_buffer(&mut self, now: Instant) {
        self.document.replace_all("");
        self.view = StyleMap::new(0);
        self.path = None;
        self.cursor = 0;
        self.scroll = 0;
        self.saved_version = self.document.version();
        self.edited(now);
        self.message = Some("New file".to_string());
    }

    /// Writes to the current file, or asks for a name (then running
    /// `then`). True once the text is on disk.
    fn save_or_ask(&mut self, then: Option<Pending>) -> bool {
        match self.path.clone() {
            Some(path) => self.write_to(&path),
            None => {
                self.prompt = Some(Prompt::SaveAs {
                    name: String::new(),
                    then,
                });
                false
            }
        }
    }

    /// Saves to `path`, reporting the outcome on the status line.
    fn write_to(&mut self, path: &Path) -> bool {
        match self.save_to(path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e:#}");
                self.message = Some(format!("{e:#}"));
                false
            }
        }
    }

    pub fn save_to(&mut self, path: &Path) -> Result<()> {
        std::fs::write(path, self.document.text())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("saved {} at v{}", path.display(), self.document.version());
        self.saved_version = self.document.version();
        self.message = Some(format!("Saved {}", path.display()));
        Ok(())
    }

    pub fn cursor_line(&self) -> usize {
        self.document.line_of_offset(self.cursor)
    }

    /// Zero-based column of the cursor, in chars.
    pub fn cursor_column(&self) -> usize {
        let text = self.document.text();
        let start = self.line_range(self.cursor_line()).start;
        text[start..self.cursor].chars().count()
    }

    /// Byte range of `line`, without its newline.
    pub fn line_range(&self, line: usize) -> Range<usize> {
        let start = self.document.offset_of_line(line);
        let end = if line + 1 < self.document.line_count() {
            self.document.offset_of_line(line + 1) - 1
        } else {
            self.document.len()
        };
        start..end
    }

    fn prev_boundary(&self) -> usize {
        let text = self.document.text();
        text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        let text = self.document.text();
        text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    fn move_vertical(&mut self, delta: isize) {
        let line = self.cursor_line();
        let Some(target) = line.checked_add_signed(delta) else {
            return;
        };
        if target >= self.document.line_count() {
            return;
        }
        let column = self.cursor_column();
        let range = self.line_range(target);
        let text = self.document.text();
        self.cursor = text[range.clone()]
            .char_indices()
            .nth(column)
            .map_or(range.end, |(i, _)| range.start + i);
    }

    /// Keeps the cursor line inside a viewport of `height` lines.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        let line = self.cursor_line();
        if line < self.scroll {
            self.scroll = line;
        } else if height > 0 && line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }
}

/// Limits for passes run by the editor, taken from the config.
pub fn pass_limits(config: &cybermd_config::Config) -> PassLimits {
    PassLimits {
        max_document_bytes: config.max_document_bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use cybermd_engine::{InlineExecutor, StyleTag};
    use std::time::Duration;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn app_with(text: &str, path: Option<PathBuf>) -> App<InlineExecutor> {
        let session = EditorSession::new(InlineExecutor::default(), Duration::ZERO);
        let mut app = App::new(session, Theme::Dark, path).unwrap();
        if !text.is_empty() {
            app.insert(text, Instant::now());
            app.cursor = 0;
        }
        app
    }

    fn type_str(app: &mut App<InlineExecutor>, s: &str) {
        for c in s.chars() {
            let code = if c == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(c)
            };
            app.handle_key(key(code), Instant::now()).unwrap();
        }
    }

    #[test]
    fn typing_then_ticking_highlights() {
        let mut app = app_with("", None);
        type_str(&mut app, "# Hi");
        app.tick(Instant::now());
        assert_eq!(app.document.text(), "# Hi");
        assert_eq!(app.view.style_at(2), Some(StyleTag::Heading1));
        assert!(app.is_dirty());
    }

    #[test]
    fn backspace_and_delete_respect_char_boundaries() {
        let mut app = app_with("aé", None);
        app.handle_key(key(KeyCode::End), Instant::now()).unwrap();
        assert_eq!(app.cursor, 3);
        app.handle_key(key(KeyCode::Backspace), Instant::now()).unwrap();
        assert_eq!(app.document.text(), "a");
        app.handle_key(key(KeyCode::Home), Instant::now()).unwrap();
        app.handle_key(key(KeyCode::Delete), Instant::now()).unwrap();
        assert_eq!(app.document.text(), "");
        app.handle_key(key(KeyCode::Backspace), Instant::now()).unwrap();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn vertical_moves_keep_the_column() {
        let mut app = app_with("abcd\nx\nlonger", None);
        app.handle_key(key(KeyCode::End), Instant::now()).unwrap();
        app.handle_key(key(KeyCode::Down), Instant::now()).unwrap();
        assert_eq!((app.cursor_line(), app.cursor_column()), (1, 1));
        app.handle_key(key(KeyCode::Down), Instant::now()).unwrap();
        assert_eq!((app.cursor_line(), app.cursor_column()), (2, 1));
        app.handle_key(key(KeyCode::Down), Instant::now()).unwrap();
        assert_eq!(app.cursor_line(), 2);
        app.handle_key(key(KeyCode::Up), Instant::now()).unwrap();
        app.handle_key(key(KeyCode::Up), Instant::now()).unwrap();
        app.handle_key(key(KeyCode::Up), Instant::now()).unwrap();
        assert_eq!(app.cursor, 1);
    }

    fn press(app: &mut App<InlineExecutor>, key: KeyEvent) -> Flow {
        app.handle_key(key, Instant::now()).unwrap()
    }

    fn all_plain(app: &App<InlineExecutor>) -> bool {
        (0..app.view.len()).all(|i| app.view.style_at(i).is_none())
    }

    #[test]
    fn control_keys() {
        let mut app = app_with("", None);
        assert_eq!(press(&mut app, ctrl('o')), Flow::Continue);
        assert!(app.show_outline);
        press(&mut app, ctrl('s'));
        assert_eq!(
            app.prompt,
            Some(Prompt::SaveAs {
                name: String::new(),
                then: None
            })
        );
        press(&mut app, key(KeyCode::Esc));
        assert_eq!(app.prompt, None);
        assert_eq!(app.message.as_deref(), Some("Save cancelled"));
        assert_eq!(press(&mut app, ctrl('q')), Flow::Quit);
        assert_eq!(app.document.text(), "");
    }

    #[test]
    fn save_writes_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        std::fs::write(&path, "# Old\n").unwrap();

        let mut app = app_with("", Some(path.clone()));
        assert_eq!(app.document.text(), "# Old\n");
        assert!(!app.is_dirty());
        app.handle_key(key(KeyCode::Char('#')), Instant::now()).unwrap();
        assert!(app.is_dirty());
        app.handle_key(ctrl('s'), Instant::now()).unwrap();
        assert!(!app.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "## Old\n");
    }

    #[test]
    fn styles_follow_text_between_passes() {
        let mut app = app_with("a `b`", None);
        app.tick(Instant::now());
        assert_eq!(app.view.style_at(2), Some(StyleTag::InlineCode));
        app.handle_key(key(KeyCode::Char('x')), Instant::now()).unwrap();
        assert_eq!(app.view.style_at(3), Some(StyleTag::InlineCode));
    }

    #[test]
    fn edit_inside_code_span_is_restyled_after_pass() {
        let mut app = app_with("`ab`", None);
        app.tick(Instant::now());
        assert_eq!(app.view.style_at(1), Some(StyleTag::InlineCode));

        press(&mut app, key(KeyCode::Right));
        press(&mut app, key(KeyCode::Delete));
        press(&mut app, key(KeyCode::Right));
        press(&mut app, key(KeyCode::Char('z')));
        app.tick(Instant::now());

        assert_eq!(app.document.text(), "`bz`");
        for i in 0..4 {
            assert_eq!(app.view.style_at(i), Some(StyleTag::InlineCode), "byte {i}");
        }
    }

    #[test]
    fn styles_are_dropped_when_a_pass_finds_none() {
        let mut app = app_with("`b`", None);
        app.tick(Instant::now());
        assert_eq!(app.view.style_at(1), Some(StyleTag::InlineCode));

        type_str(&mut app, "zzzz`");
        app.tick(Instant::now());

        assert_eq!(app.document.text(), "zzzz``b`");
        assert!(app.session.highlights().is_empty());
        assert!(all_plain(&app));
    }

    #[test]
    fn new_on_clean_buffer_starts_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        std::fs::write(&path, "# Kept\n").unwrap();
        let mut app = app_with("", Some(path.clone()));
        app.tick(Instant::now());

        assert_eq!(press(&mut app, ctrl('n')), Flow::Continue);
        assert_eq!(app.prompt, None);
        assert_eq!(app.document.text(), "");
        assert_eq!(app.path, None);
        assert!(!app.is_dirty());
        app.tick(Instant::now());
        assert!(app.session.outline().is_empty());
        assert!(all_plain(&app));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Kept\n");
    }

    #[test]
    fn new_on_dirty_buffer_asks_first() {
        let mut app = app_with("draft", None);
        press(&mut app, ctrl('n'));
        assert_eq!(app.prompt, Some(Prompt::Unsaved(Pending::New)));
        press(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.prompt, Some(Prompt::Unsaved(Pending::New)));
        assert_eq!(app.document.text(), "draft");

        press(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.prompt, None);
        assert_eq!(app.document.text(), "");
        assert!(!app.is_dirty());
    }

    #[test]
    fn quit_on_dirty_buffer_asks_first() {
        let mut app = app_with("draft", None);
        assert_eq!(press(&mut app, ctrl('q')), Flow::Continue);
        assert_eq!(app.prompt, Some(Prompt::Unsaved(Pending::Quit)));

        press(&mut app, key(KeyCode::Esc));
        assert_eq!(app.prompt, None);
        assert_eq!(app.document.text(), "draft");

        press(&mut app, ctrl('q'));
        assert_eq!(press(&mut app, key(KeyCode::Char('n'))), Flow::Quit);
    }

    #[test]
    fn quit_with_save_writes_then_quits() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.md");
        let mut app = app_with("", Some(path.clone()));
        type_str(&mut app, "hi");

        press(&mut app, ctrl('q'));
        assert_eq!(press(&mut app, key(KeyCode::Char('y'))), Flow::Quit);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hi");
    }

    #[test]
    fn save_without_name_prompts_for_one() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.md");
        let mut app = app_with("# A", None);

        press(&mut app, ctrl('s'));
        for c in path.display().to_string().chars() {
            press(&mut app, key(KeyCode::Char(c)));
        }
        press(&mut app, key(KeyCode::Char('x')));
        press(&mut app, key(KeyCode::Backspace));
        press(&mut app, key(KeyCode::Enter));

        assert_eq!(app.prompt, None);
        assert_eq!(app.path.as_deref(), Some(path.as_path()));
        assert!(!app.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# A");
    }

    #[test]
    fn save_as_prefills_current_name_and_writes_copy() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.md");
        std::fs::write(&first, "one").unwrap();
        let mut app = app_with("", Some(first.clone()));

        press(&mut app, ctrl('w'));
        let Some(Prompt::SaveAs { name, .. }) = &app.prompt else {
            panic!("expected a save-as prompt, got {:?}", app.prompt);
        };
        assert_eq!(name, &first.display().to_string());

        for _ in 0..4 {
            press(&mut app, key(KeyCode::Backspace));
        }
        type_str(&mut app, "b.md");
        press(&mut app, key(KeyCode::Enter));

        let second = dir.path().join("b.md");
        assert_eq!(app.path.as_deref(), Some(second.as_path()));
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "one");
    }

    #[test]
    fn failed_save_keeps_buffer_dirty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("note.md");
        let mut app = app_with("text", None);

        press(&mut app, ctrl('q'));
        press(&mut app, key(KeyCode::Char('y')));
        assert!(matches!(
            app.prompt,
            Some(Prompt::SaveAs {
                then: Some(Pending::Quit),
                ..
            })
        ));
        for c in path.display().to_string().chars() {
            press(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(press(&mut app, key(KeyCode::Enter)), Flow::Continue);

        assert!(app.is_dirty());
        assert_eq!(app.path, None);
        assert!(
            app.message
                .as_deref()
                .unwrap_or("")
                .starts_with("Failed to write")
        );
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut app = app_with("1\n2\n3\n4\n5", None);
        app.cursor = app.document.len();
        app.scroll_to_cursor(2);
        assert_eq!(app.scroll, 3);
        app.cursor = 0;
        app.scroll_to_cursor(2);
        assert_eq!(app.scroll, 0);
    }
}
