use std::io::{Cursor, Read};

use quick_xml::{Reader as XmlReader, events::Event};
use zip::ZipArchive;

use super::ExtractionError;

/// Pull the raw text out of `word/document.xml`, separating paragraphs with a blank line.
pub(super) fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|error| ExtractionError::Docx(format!("failed to open archive: {error}")))?;

    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|error| ExtractionError::Docx(format!("missing word/document.xml: {error}")))?;

    let mut xml = String::new();
    document
        .read_to_string(&mut xml)
        .map_err(|error| ExtractionError::Docx(format!("failed to read document XML: {error}")))?;

    let mut reader = XmlReader::from_str(&xml);
    let mut buf = Vec::new();
    let mut output = String::new();
    let mut in_text_node = false;
    let mut run_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:p" => start_paragraph(&mut output),
                b"w:r" => run_depth += 1,
                b"w:t" => in_text_node = true,
                name => push_run_break(&mut output, name, run_depth),
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:p" => start_paragraph(&mut output),
                name => push_run_break(&mut output, name, run_depth),
            },
            Ok(Event::Text(e)) if in_text_node => {
                let value = e
                    .unescape()
                    .map_err(|error| ExtractionError::Docx(error.to_string()))?;
                output.push_str(&value);
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:t" => in_text_node = false,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:r" => {
                run_depth = run_depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(error) => {
                return Err(ExtractionError::Docx(format!(
                    "failed to parse document XML: {error}"
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(output.trim().to_string())
}

/// Tabs and breaks only count inside a run; `w:tab` also appears in tab-stop definitions.
fn push_run_break(output: &mut String, name: &[u8], run_depth: usize) {
    if run_depth == 0 {
        return;
    }
    match name {
        b"w:tab" => output.push('\t'),
        b"w:br" => output.push('\n'),
        _ => {}
    }
}

fn start_paragraph(output: &mut String) {
    if !output.is_empty() {
        output.push_str("\n\n");
    }
}
