use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use smallvec::SmallVec;

use crate::{WordId, MAX_SLOT_LENGTH};

/// A struct representing a word that can be chosen for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: &str) -> Word {
        Word {
            string: string.to_string(),
            glyphs: string.chars().collect(),
        }
    }

    /// The number of cells this word occupies, which is its number of chars rather than bytes.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// The vocabulary available to a fill. Entries are trimmed, deduplicated, and sorted, so a
/// `WordId` depends only on the set of words and not on the order they were supplied in.
#[derive(Clone, Default)]
pub struct WordList {
    words: Vec<Word>,
    ids_by_string: HashMap<String, WordId>,
}

impl Debug for WordList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordList")
            .field("words", &format!("({} entries)", self.words.len()))
            .finish()
    }
}

impl WordList {
    pub fn new<I, S>(words: I) -> WordList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut strings: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();
        strings.sort();
        strings.dedup();

        let words: Vec<Word> = strings.iter().map(|string| Word::new(string)).collect();
        let ids_by_string = strings
            .into_iter()
            .enumerate()
            .map(|(word_id, string)| (string, word_id))
            .collect();

        WordList { words, ids_by_string }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    pub fn id_of(&self, string: &str) -> Option<WordId> {
        self.ids_by_string.get(string).copied()
    }

    /// The letter at `cell_idx` of the given word, if the word is long enough to have one.
    pub fn glyph(&self, word_id: WordId, cell_idx: usize) -> Option<char> {
        self.words[word_id].glyphs.get(cell_idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> + '_ {
        self.words.iter().enumerate()
    }
}
