use std::error::Error;
use std::fmt;

use bit_vec::BitVec;

use alphabet::{ASCII_LOWERCASE, FIRST_TERMINATOR, SECOND_TERMINATOR};

/// The two input strings, validated and concatenated into the single buffer
/// the builder works on. `boundary` is the length of the first string,
/// terminator included.
#[derive(Debug)]
pub struct TextPair {
    text: Vec<u8>,
    boundary: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty { word: u8 },
    BadTerminator { word: u8, expected: char },
    StrayCharacter { word: u8, character: char },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InputError::Empty { word } => {
                write!(f, "{} string is empty", word_name(word))
            }
            InputError::BadTerminator { word, expected } => {
                write!(f, "{} string must end with '{}'", word_name(word), expected)
            }
            InputError::StrayCharacter { word, character } => {
                write!(f, "{} string contains unexpected character '{}'", word_name(word), character)
            }
        }
    }
}

impl Error for InputError {}

fn word_name(word: u8) -> &'static str {
    if word == 0 { "first" } else { "second" }
}

impl TextPair {
    /// Validates the two lines and assembles the concatenated text. Each
    /// line must consist of lowercase ASCII letters followed by its
    /// designated terminator; that alone guarantees both terminators are
    /// unique in the concatenation. The builder itself assumes well-formed
    /// input, so everything malformed must be rejected here.
    pub fn from_lines(first: &str, second: &str) -> Result<TextPair, InputError> {
        let allowed = allowed_bytes();
        validate_word(first.as_bytes(), 0, FIRST_TERMINATOR, &allowed)?;
        validate_word(second.as_bytes(), 1, SECOND_TERMINATOR, &allowed)?;

        let mut text = Vec::with_capacity(first.len() + second.len());
        text.extend_from_slice(first.as_bytes());
        text.extend_from_slice(second.as_bytes());

        Ok(TextPair {
            text,
            boundary: first.len(),
        })
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn boundary(&self) -> usize {
        self.boundary
    }

    pub fn first_len(&self) -> usize {
        self.boundary
    }

    pub fn second_len(&self) -> usize {
        self.text.len() - self.boundary
    }
}

fn allowed_bytes() -> BitVec {
    BitVec::from_fn(256, |byte| ASCII_LOWERCASE.contains(byte as u8))
}

fn validate_word(word: &[u8], index: u8, terminator: u8, allowed: &BitVec) -> Result<(), InputError> {
    let body = match word.split_last() {
        Some((&last, body)) if last == terminator => body,
        Some(_) => {
            return Err(InputError::BadTerminator {
                word: index,
                expected: terminator as char,
            })
        }
        None => return Err(InputError::Empty { word: index }),
    };

    for &symbol in body {
        if !allowed.get(symbol as usize).unwrap_or(false) {
            return Err(InputError::StrayCharacter {
                word: index,
                character: symbol as char,
            });
        }
    }

    Ok(())
}
