//! Board file I/O.
//!
//! # Format
//!
//! ```text
//! 0,0,3,0,2,0,6,0,0
//! 9,0,0,3,0,5,0,0,1
//! ...
//! ```
//!
//! Nine lines of nine comma-separated digits, `0` for a blank. Reading skips
//! commas and carriage returns and stops after the 81st digit; anything after
//! it is ignored. Writing emits the same layout followed by a blank line.

use std::fs;
use std::path::{Path, PathBuf};

use arbor_kernel::sections::CELL_COUNT;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardFileError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A byte other than a digit, comma, or line break. `line` is 1-based.
    #[error("unexpected character {character:?} on line {line}")]
    UnexpectedCharacter { character: char, line: usize },
    #[error("unexpected end of input after {values_read} of 81 values")]
    UnexpectedEof { values_read: usize },
}

/// Parse the first 81 digits of `text`.
///
/// # Errors
///
/// Returns [`BoardFileError::UnexpectedCharacter`] for a stray character
/// before the 81st digit and [`BoardFileError::UnexpectedEof`] if fewer than
/// 81 digits are present.
pub fn parse_board(text: &str) -> Result<[u8; CELL_COUNT], BoardFileError> {
    let mut cells = [0u8; CELL_COUNT];
    let mut read = 0;
    let mut line = 1;
    for character in text.chars() {
        if read == CELL_COUNT {
            break;
        }
        match character {
            ',' | '\r' => {}
            '\n' => line += 1,
            '0'..='9' => {
                cells[read] = character as u8 - b'0';
                read += 1;
            }
            _ => return Err(BoardFileError::UnexpectedCharacter { character, line }),
        }
    }
    if read < CELL_COUNT {
        return Err(BoardFileError::UnexpectedEof { values_read: read });
    }
    Ok(cells)
}

/// Render nine comma-separated rows and a trailing blank line.
#[must_use]
pub fn format_board(cells: &[u8; CELL_COUNT]) -> String {
    let mut out = String::with_capacity(CELL_COUNT * 2 + 10);
    for row in cells.chunks(9) {
        for (col, digit) in row.iter().enumerate() {
            if col > 0 {
                out.push(',');
            }
            out.push(char::from(b'0' + digit));
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// # Errors
///
/// Returns [`BoardFileError::Read`] if the file cannot be read, or a parse
/// error from [`parse_board`].
pub fn read_board_file(path: &Path) -> Result<[u8; CELL_COUNT], BoardFileError> {
    let text = fs::read_to_string(path).map_err(|source| BoardFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_board(&text)
}

/// # Errors
///
/// Returns [`BoardFileError::Write`] if the file cannot be written.
pub fn write_board_file(path: &Path, cells: &[u8; CELL_COUNT]) -> Result<(), BoardFileError> {
    fs::write(path, format_board(cells)).map_err(|source| BoardFileError::Write {
        path: path.to_path_buf(),
        source,
    })
}
