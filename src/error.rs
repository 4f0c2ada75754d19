// Copyright (C) 2020-2026 Andy Kurnia.

pub struct MyError {
    s: String,
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for MyError {}

pub fn new(s: String) -> MyError {
    MyError { s }
}

pub type BoxAnyError = Box<dyn std::error::Error>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}

// Failures while constructing the automaton. All of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("alphabet has no letters")]
    EmptyAlphabet,
    #[error("input is not sorted, {word:?} cannot come after {prev:?}")]
    Unsorted { prev: Box<[u8]>, word: Box<[u8]> },
    #[error("letter {letter} in {word:?} is not in the alphabet")]
    InvalidLetter { letter: u8, word: Box<[u8]> },
    #[error("node {node} is already registered")]
    DuplicateRegistration { node: u32 },
    #[error("node {node} is frozen and cannot gain edge {letter}")]
    FrozenNode { node: u32, letter: u8 },
    #[error("node {node} already has an edge for letter {letter}")]
    DuplicateEdge { node: u32, letter: u8 },
    #[error("this format cannot have {0} nodes")]
    TooManyNodes(usize),
}

// Board content that disagrees with the automaton. Never a user error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("board word {word:?} ending before square {square} is not in the lexicon")]
    BoardWordRejected { square: usize, word: Box<[u8]> },
}
