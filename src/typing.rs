// The editable text region.
// Visual: whatever you type here is drawn big in the window, and every visible
// character gets a circle. Every edit reports whether the text actually changed
// so the caller can resync the circles.

#[derive(Debug, Default)]
pub struct TypingArea {
    text: String,
    focused: bool,
}

impl TypingArea {
    pub fn new(initial: &str) -> Self {
        Self { text: sanitize_paste(initial), focused: false }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Printable characters only; control characters from the char callback are dropped.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !self.focused || ch.is_control() {
            return false;
        }
        self.text.push(ch);
        true
    }

    pub fn newline(&mut self) -> bool {
        if !self.focused {
            return false;
        }
        self.text.push('\n');
        true
    }

    pub fn backspace(&mut self) -> bool {
        self.focused && self.text.pop().is_some()
    }

    /// Ctrl+K. Works while blurred too, like the page shortcut.
    pub fn clear(&mut self) -> bool {
        let changed = !self.text.is_empty();
        self.text.clear();
        changed
    }

    /// Insert clipboard contents as plain text.
    pub fn paste(&mut self, raw: &str) -> bool {
        if !self.focused {
            return false;
        }
        let clean = sanitize_paste(raw);
        self.text.push_str(&clean);
        !clean.is_empty()
    }
}

/// Keep text only: normalize line endings to `\n`, keep tabs, drop every other control char.
pub fn sanitize_paste(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\n' | '\t' => out.push(ch),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
