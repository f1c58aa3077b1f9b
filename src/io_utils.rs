//! Format resolution, delimiter detection, and input decoding.
//!
//! All file access for reading flows through this module:
//!
//! - **Format resolution**: the case-sensitive extension selects the
//!   delimited-text or spreadsheet path; anything else is rejected.
//! - **Delimiter resolution**: an explicit delimiter always wins, `.tsv`
//!   defaults to tab, and `.csv`/`.txt` are sniffed from the header line. A
//!   header without any candidate is a single column; a tie between
//!   candidates is ambiguous.
//! - **Decoding**: input bytes are decoded via `encoding_rs` (UTF-8 unless a
//!   label is supplied) with any leading byte-order mark removed.

use std::{
    fs,
    path::{Path, PathBuf},
};

use encoding_rs::{Encoding, UTF_8};
use itertools::Itertools;

use crate::error::{Result, TableError};

pub const DEFAULT_TSV_DELIMITER: &str = "\t";

/// Splits nothing: lines never contain a newline, so each line is one field.
pub const WHOLE_LINE: &str = "\n";

/// Candidate delimiters for sniffing.
pub const SNIFF_CANDIDATES: &[char] = &[',', '\t', ';', '|'];

/// Outcome of sniffing a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniffed {
    Delimiter(char),
    /// No candidate occurs at all.
    SingleColumn,
    /// Several candidates share the highest count.
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Csv,
    Tsv,
    Txt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited(TextKind),
    Spreadsheet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    pub path: PathBuf,
    pub format: SourceFormat,
    /// File stem plus extension, used in error messages.
    pub file_name: String,
}

/// Extension and stem, taken after the last separator. No extension yields
/// an empty string.
pub fn split_file_name(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    (stem, extension)
}

fn display_name(stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}.{extension}")
    }
}

pub fn text_kind_for_extension(extension: &str) -> Option<TextKind> {
    match extension {
        "csv" => Some(TextKind::Csv),
        "tsv" => Some(TextKind::Tsv),
        "txt" => Some(TextKind::Txt),
        _ => None,
    }
}

pub fn resolve_source(path: &Path) -> Result<ResolvedSource> {
    if !path.is_file() {
        return Err(TableError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let (stem, extension) = split_file_name(path);
    let format = match text_kind_for_extension(&extension) {
        Some(kind) => SourceFormat::Delimited(kind),
        None if extension == "xlsx" => SourceFormat::Spreadsheet,
        None => {
            return Err(TableError::UnsupportedFormat {
                file: display_name(&stem, &extension),
            });
        }
    };
    Ok(ResolvedSource {
        path: path.to_path_buf(),
        format,
        file_name: display_name(&stem, &extension),
    })
}

/// Validates an output path for the writer and returns the column separator
/// its extension calls for.
pub fn resolve_output_separator(path: &Path) -> Result<u8> {
    let (stem, extension) = split_file_name(path);
    match text_kind_for_extension(&extension) {
        Some(TextKind::Tsv) => Ok(b'\t'),
        Some(TextKind::Csv | TextKind::Txt) => Ok(b';'),
        None => Err(TableError::UnsupportedFormat {
            file: display_name(&stem, &extension),
        }),
    }
}

pub fn resolve_input_delimiter(
    source: &ResolvedSource,
    kind: TextKind,
    provided: Option<&str>,
    header_line: &str,
) -> Result<String> {
    if let Some(delimiter) = provided {
        if delimiter.is_empty() {
            return Err(TableError::AmbiguousDelimiter {
                file: source.file_name.clone(),
            });
        }
        return Ok(delimiter.to_string());
    }
    match kind {
        TextKind::Tsv => Ok(DEFAULT_TSV_DELIMITER.to_string()),
        TextKind::Csv | TextKind::Txt => match sniff_delimiter(header_line) {
            Sniffed::Delimiter(delimiter) => Ok(delimiter.to_string()),
            Sniffed::SingleColumn => Ok(WHOLE_LINE.to_string()),
            Sniffed::Tie => Err(TableError::AmbiguousDelimiter {
                file: source.file_name.clone(),
            }),
        },
    }
}

/// Picks the most frequent candidate delimiter in a header line.
pub fn sniff_delimiter(header_line: &str) -> Sniffed {
    let leaders = SNIFF_CANDIDATES
        .iter()
        .map(|&candidate| (candidate, header_line.matches(candidate).count()))
        .filter(|&(_, count)| count > 0)
        .max_set_by_key(|&(_, count)| count);
    match leaders.as_slice() {
        [] => Sniffed::SingleColumn,
        [(delimiter, _)] => Sniffed::Delimiter(*delimiter),
        _ => Sniffed::Tie,
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes()).ok_or_else(|| {
            TableError::io("Resolving input encoding", format!("unknown encoding '{value}'"))
        }),
        None => Ok(UTF_8),
    }
}

/// Reads and decodes a whole text file, dropping a leading byte-order mark.
pub fn read_text(path: &Path, encoding: &'static Encoding) -> Result<String> {
    let bytes =
        fs::read(path).map_err(|err| TableError::io(format!("Reading {path:?}"), err))?;
    let (text, had_errors) = encoding.decode_with_bom_removal(&bytes);
    if had_errors {
        return Err(TableError::io(
            format!("Decoding {path:?}"),
            format!("invalid {} byte sequence", encoding.name()),
        ));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_prefers_most_frequent_candidate() {
        assert_eq!(sniff_delimiter("SR,NAME,AGE"), Sniffed::Delimiter(','));
        assert_eq!(sniff_delimiter("a;b;c,d"), Sniffed::Delimiter(';'));
        assert_eq!(sniff_delimiter("a|b"), Sniffed::Delimiter('|'));
        assert_eq!(sniff_delimiter("a\tb\tc"), Sniffed::Delimiter('\t'));
    }

    #[test]
    fn sniff_tie_is_reported_not_guessed() {
        assert_eq!(sniff_delimiter("a;b,c"), Sniffed::Tie);
        assert_eq!(sniff_delimiter("a|b\tc;d"), Sniffed::Tie);
    }

    #[test]
    fn sniff_without_candidates_is_single_column() {
        assert_eq!(sniff_delimiter("distance.km"), Sniffed::SingleColumn);
        assert_eq!(sniff_delimiter(""), Sniffed::SingleColumn);
    }

    #[test]
    fn sniffed_csv_resolves_whole_line_or_ambiguity() {
        let source = ResolvedSource {
            path: PathBuf::from("data.csv"),
            format: SourceFormat::Delimited(TextKind::Csv),
            file_name: "data.csv".to_string(),
        };
        let resolved = resolve_input_delimiter(&source, TextKind::Csv, None, "amount").unwrap();
        assert_eq!(resolved, WHOLE_LINE);
        match resolve_input_delimiter(&source, TextKind::Csv, None, "a;b,c") {
            Err(TableError::AmbiguousDelimiter { file }) => assert_eq!(file, "data.csv"),
            other => panic!("Expected ambiguous delimiter, got {other:?}"),
        }
    }

    #[test]
    fn output_separator_follows_extension() {
        assert_eq!(resolve_output_separator(Path::new("out.csv")).unwrap(), b';');
        assert_eq!(resolve_output_separator(Path::new("out.txt")).unwrap(), b';');
        assert_eq!(resolve_output_separator(Path::new("out.tsv")).unwrap(), b'\t');
        match resolve_output_separator(Path::new("dir/out.py")) {
            Err(TableError::UnsupportedFormat { file }) => assert_eq!(file, "out.py"),
            other => panic!("Expected unsupported format, got {other:?}"),
        }
    }

    #[test]
    fn extensions_are_case_sensitive() {
        assert_eq!(text_kind_for_extension("csv"), Some(TextKind::Csv));
        assert_eq!(text_kind_for_extension("CSV"), None);
    }

    #[test]
    fn explicit_delimiter_overrides_tsv_default() {
        let source = ResolvedSource {
            path: PathBuf::from("data.tsv"),
            format: SourceFormat::Delimited(TextKind::Tsv),
            file_name: "data.tsv".to_string(),
        };
        let resolved = resolve_input_delimiter(&source, TextKind::Tsv, None, "a,b").unwrap();
        assert_eq!(resolved, "\t");
        let resolved =
            resolve_input_delimiter(&source, TextKind::Tsv, Some("::"), "a::b").unwrap();
        assert_eq!(resolved, "::");
    }

    #[test]
    fn unknown_encoding_label_is_an_io_failure() {
        assert!(matches!(
            resolve_encoding(Some("klingon")),
            Err(TableError::IOFailure { .. })
        ));
        assert_eq!(resolve_encoding(None).unwrap(), UTF_8);
    }
}
