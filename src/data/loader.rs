use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::model::{ClassEdge, ClassGraph, IdToLabel, Keywords, LabelToId, Pid2Text, Results};
use crate::error::{DecodeErrorKind, LoadError, Result};

// ---------------------------------------------------------------------------
// Line-oriented formats
// ---------------------------------------------------------------------------

/// Every line of a plain text file, without its line terminator.
/// Blank lines come back as empty strings.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for_each_line(path, |line| {
        lines.push(line.to_string());
        Ok(())
    })?;
    log::debug!("Loaded {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// `pid<TAB>text` → pid → text.
///
/// Only the first tab separates, so the text may contain tabs. Lines without
/// any tab are skipped rather than rejected; this is the one loader that
/// tolerates malformed lines.
pub fn load_pid2text(path: &Path) -> Result<Pid2Text> {
    let mut pid2text = Pid2Text::new();
    let mut skipped = 0usize;
    for_each_line(path, |line| {
        match line.split_once('\t') {
            Some((pid, text)) => {
                pid2text.insert(pid.to_string(), text.to_string());
            }
            None => {
                log::trace!("{}: skipping line without tab: {line:?}", path.display());
                skipped += 1;
            }
        }
        Ok(())
    })?;
    log::debug!(
        "Loaded {} pids from {} ({skipped} lines skipped)",
        pid2text.len(),
        path.display()
    );
    Ok(pid2text)
}

/// `int_id<TAB>label` → id → label.
pub fn load_classes_int(path: &Path) -> Result<IdToLabel> {
    let mut classes = IdToLabel::new();
    for_each_line(path, |line| {
        let (id, label) = parse_class_line(line)?;
        classes.insert(id, label.to_string());
        Ok(())
    })?;
    log::debug!("Loaded {} classes from {}", classes.len(), path.display());
    Ok(classes)
}

/// `int_id<TAB>label` → label → id.
pub fn load_classes_str(path: &Path) -> Result<LabelToId> {
    let mut classes = LabelToId::new();
    for_each_line(path, |line| {
        let (id, label) = parse_class_line(line)?;
        classes.insert(label.to_string(), id);
        Ok(())
    })?;
    log::debug!("Loaded {} classes from {}", classes.len(), path.display());
    Ok(classes)
}

/// `key:item1,item2,...` → key → items.
///
/// The key ends at the first colon. Items are split on every comma and kept
/// verbatim: no trimming, no escaping, empty items included.
pub fn load_keywords(path: &Path) -> Result<Keywords> {
    let mut keywords = Keywords::new();
    for_each_line(path, |line| {
        let (key, items) = line
            .split_once(':')
            .ok_or(DecodeErrorKind::MissingDelimiter(':'))?;
        let items: Vec<String> = items.split(',').map(str::to_string).collect();
        keywords.insert(key.to_string(), items);
        Ok(())
    })?;
    log::debug!("Loaded {} keyword groups from {}", keywords.len(), path.display());
    Ok(keywords)
}

/// `parent_id<TAB>child_id` → edge list in file order.
pub fn load_class_graph(path: &Path) -> Result<ClassGraph> {
    let mut edges = ClassGraph::new();
    for_each_line(path, |line| {
        let [parent, child] = split_fields::<2>(line)?;
        edges.push(ClassEdge {
            parent: parse_int(parent)?,
            child: parse_int(child)?,
        });
        Ok(())
    })?;
    log::debug!("Loaded {} edges from {}", edges.len(), path.display());
    Ok(edges)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Any JSON document, untouched.
pub fn load_json(path: &Path) -> Result<JsonValue> {
    load_json_as(path)
}

/// JSON decoded straight into `T`. A document of the wrong shape is reported
/// the same way as malformed JSON.
pub fn load_json_as<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(open(path)?);
    serde_json::from_reader(reader).map_err(|source| {
        if source.is_io() {
            LoadError::Io {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            LoadError::Json {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Per-epoch training curves, see [`Results`].
pub fn load_results(path: &Path) -> Result<Results> {
    let results: Results = load_json_as(path)?;
    log::debug!(
        "Loaded results for splits {:?} from {}",
        results.keys().collect::<Vec<_>>(),
        path.display()
    );
    Ok(results)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => LoadError::NotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Feed each line to `f` with its terminator stripped. `\n`, `\r\n` and a
/// lone `\r` all end a line.
/// The first decode failure aborts the read and is tagged with its line number.
fn for_each_line<F>(path: &Path, mut f: F) -> Result<()>
where
    F: FnMut(&str) -> std::result::Result<(), DecodeErrorKind>,
{
    let mut reader = BufReader::new(open(path)?);
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        if n == 0 {
            return Ok(());
        }

        // A chunk ends at `\n` or EOF, so a trailing `\r` is either half of
        // `\r\n` or the last terminator in the file.
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        let chunk = match std::str::from_utf8(&buf) {
            Ok(chunk) => chunk,
            Err(_) => {
                return Err(LoadError::Decode {
                    path: path.to_path_buf(),
                    line: line_no + 1,
                    kind: DecodeErrorKind::InvalidUtf8,
                })
            }
        };

        for line in chunk.split('\r') {
            line_no += 1;
            f(line).map_err(|kind| LoadError::Decode {
                path: path.to_path_buf(),
                line: line_no,
                kind,
            })?;
        }
    }
}

fn split_fields<const N: usize>(line: &str) -> std::result::Result<[&str; N], DecodeErrorKind> {
    let fields: Vec<&str> = line.split('\t').collect();
    let found = fields.len();
    fields
        .try_into()
        .map_err(|_| DecodeErrorKind::FieldCount { expected: N, found })
}

fn parse_int(field: &str) -> std::result::Result<i64, DecodeErrorKind> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|source| DecodeErrorKind::InvalidInteger {
            field: field.to_string(),
            source,
        })
}

fn parse_class_line(line: &str) -> std::result::Result<(i64, &str), DecodeErrorKind> {
    let [id, label] = split_fields::<2>(line)?;
    Ok((parse_int(id)?, label))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
