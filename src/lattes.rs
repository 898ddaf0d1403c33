//! Lattes resume extraction.
//!
//! A Lattes export is one XML document per professor. The full name lives
//! on the first `DADOS-GERAIS` element; each `AREA-DE-ATUACAO` element
//! contributes exactly one specialty string, resolved from its attributes
//! most-specific-first. Everything else in the document is ignored.

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{MatchError, Result};
use crate::models::{ResumeFile, ResumeRecord, SpecialtyMap};

const GENERAL_DATA_TAG: &[u8] = b"DADOS-GERAIS";
const EXPERTISE_AREA_TAG: &[u8] = b"AREA-DE-ATUACAO";
const FULL_NAME_ATTR: &str = "NOME-COMPLETO";

/// Attribute fallback chain for one expertise area, most specific first.
/// The last entry is taken verbatim even when empty, so one area node
/// always yields one specialty entry.
const SPECIALTY_ATTRS: [&str; 3] = [
    "NOME-DA-ESPECIALIDADE",
    "NOME-DA-SUB-AREA-DO-CONHECIMENTO",
    "NOME-DA-AREA-DO-CONHECIMENTO",
];

/// Parses one Lattes document into a `ResumeRecord`.
///
/// The elements are matched at any nesting depth, in both `<X ...>` and
/// `<X .../>` forms. A document without a `DADOS-GERAIS` element is
/// malformed; a missing or empty name attribute is not.
pub fn parse_resume(file: &ResumeFile) -> Result<ResumeRecord> {
    let mut reader = Reader::from_reader(file.data.as_slice());
    let mut buf = Vec::new();
    let mut professor_name: Option<String> = None;
    let mut specialties = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == GENERAL_DATA_TAG {
                    // First DADOS-GERAIS wins.
                    if professor_name.is_none() {
                        let name = read_attr(&reader, &e, FULL_NAME_ATTR, file)?;
                        professor_name = Some(name.unwrap_or_default());
                    }
                } else if e.local_name().as_ref() == EXPERTISE_AREA_TAG {
                    specialties.push(resolve_specialty(&reader, &e, file)?);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(MatchError::malformed(
                    &file.name,
                    format!("XML error at byte {}: {e}", reader.buffer_position()),
                ));
            }
        }
        buf.clear();
    }

    let professor_name = professor_name
        .ok_or_else(|| MatchError::malformed(&file.name, "no DADOS-GERAIS element found"))?;

    debug!(
        "parsed resume '{}': professor '{professor_name}', {} expertise area(s)",
        file.name,
        specialties.len()
    );

    Ok(ResumeRecord {
        professor_name,
        specialties,
    })
}

/// Parses every document and folds the records into one `SpecialtyMap`.
///
/// Fails on the first malformed document; a professor appearing in several
/// documents ends up with the concatenation of their specialty lists.
pub fn extract(files: &[ResumeFile]) -> Result<SpecialtyMap> {
    let mut map = SpecialtyMap::new();
    for file in files {
        map.merge_record(parse_resume(file)?);
    }
    Ok(map)
}

/// Loads every `*.xml` file in `dir` (non-recursive, extension matched
/// case-insensitively), sorted by file name.
pub fn read_resume_dir(dir: impl AsRef<Path>) -> Result<Vec<ResumeFile>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_xml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("xml"))
            .unwrap_or(false);
        if !is_xml || !path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        files.push(ResumeFile::new(name, fs::read(&path)?));
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("loaded {} resume file(s) from {}", files.len(), dir.display());
    Ok(files)
}

/// Reads one attribute off `element`, decoded with the document's declared
/// encoding. `None` when the attribute is absent.
fn read_attr<B>(
    reader: &Reader<B>,
    element: &BytesStart<'_>,
    name: &str,
    file: &ResumeFile,
) -> Result<Option<String>> {
    match element.try_get_attribute(name) {
        Ok(Some(attr)) => {
            let value = attr.decode_and_unescape_value(reader).map_err(|e| {
                MatchError::malformed(&file.name, format!("bad {name} attribute: {e}"))
            })?;
            Ok(Some(value.into_owned()))
        }
        Ok(None) => Ok(None),
        Err(e) => Err(MatchError::malformed(
            &file.name,
            format!(
                "bad attributes on <{}>: {e}",
                String::from_utf8_lossy(element.name().as_ref())
            ),
        )),
    }
}

/// Resolves the specialty string for one `AREA-DE-ATUACAO` element.
/// Absent and empty attributes both fall through to the next level.
fn resolve_specialty<B>(
    reader: &Reader<B>,
    element: &BytesStart<'_>,
    file: &ResumeFile,
) -> Result<String> {
    let mut specialty = String::new();
    for attr in SPECIALTY_ATTRS {
        specialty = read_attr(reader, element, attr, file)?.unwrap_or_default();
        if !specialty.is_empty() {
            break;
        }
    }
    Ok(specialty)
}
