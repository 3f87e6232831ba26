//! Open documents and the words under the cursor.

use std::collections::HashMap;

use ropey::Rope;
use tower_lsp::lsp_types::{Position, Url};

/// Text of the documents the editor has open, synced in full on every change.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<Url, Rope>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, uri: Url, text: &str) {
        self.documents.insert(uri, Rope::from_str(text));
    }

    pub fn close(&mut self, uri: &Url) {
        self.documents.remove(uri);
    }

    pub fn get(&self, uri: &Url) -> Option<&Rope> {
        self.documents.get(uri)
    }

    /// The whole word touching `position`, if any.
    pub fn word_at(&self, uri: &Url, position: Position) -> Option<String> {
        let (line, character) = self.select_line(uri, position)?;
        word_at(&line, character)
    }

    /// The part of the word left of `position`; empty when the cursor is not
    /// right after a word character.
    pub fn word_before(&self, uri: &Url, position: Position) -> Option<String> {
        let (line, character) = self.select_line(uri, position)?;
        Some(word_before(&line, character))
    }

    fn select_line(&self, uri: &Url, position: Position) -> Option<(Vec<char>, usize)> {
        let rope = self.documents.get(uri)?;
        let line = position.line as usize;
        if line >= rope.len_lines() {
            return None;
        }

        let chars: Vec<char> = rope
            .line(line)
            .chars()
            .take_while(|c| *c != '\n' && *c != '\r')
            .collect();
        let character = (position.character as usize).min(chars.len());
        Some((chars, character))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn word_start(line: &[char], character: usize) -> usize {
    line[..character]
        .iter()
        .rposition(|c| !is_word_char(*c))
        .map_or(0, |index| index + 1)
}

pub fn word_at(line: &[char], character: usize) -> Option<String> {
    let character = character.min(line.len());
    let start = word_start(line, character);
    let end = line[character..]
        .iter()
        .position(|c| !is_word_char(*c))
        .map_or(line.len(), |offset| character + offset);

    (start < end).then(|| line[start..end].iter().collect())
}

pub fn word_before(line: &[char], character: usize) -> String {
    let character = character.min(line.len());
    line[word_start(line, character)..character].iter().collect()
}
