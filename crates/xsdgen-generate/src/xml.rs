use std::fmt::Write as _;

const INDENT: &str = "  ";

/// Minimal indenting XML writer backing every emitter in this crate.
///
/// Elements with an empty body self-close; attribute and text values are
/// escaped. Output is deterministic for identical call sequences, which is
/// what makes generation idempotent.
#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_depth(depth: usize) -> Self {
        Self {
            buf: String::new(),
            depth,
        }
    }

    /// Write the document prologue with a declared UTF-8 encoding.
    pub fn prologue(&mut self) {
        self.buf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    /// Write an element whose body is produced by `body`. An empty body
    /// collapses to a self-closing tag.
    pub fn element<F>(&mut self, name: &str, attrs: &[(&str, &str)], body: F)
    where
        F: FnOnce(&mut XmlWriter),
    {
        let mut child = XmlWriter::at_depth(self.depth + 1);
        body(&mut child);

        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, value) in attrs {
            let _ = write!(self.buf, " {key}=\"{}\"", escape(value));
        }

        if child.buf.is_empty() {
            self.buf.push_str("/>\n");
        } else {
            self.buf.push_str(">\n");
            self.buf.push_str(&child.buf);
            self.indent();
            let _ = write!(self.buf, "</{name}>\n");
        }
    }

    /// Write a childless element.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.element(name, attrs, |_| {});
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
