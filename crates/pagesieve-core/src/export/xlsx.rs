use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::SieveError;
use crate::model::{CellValue, NormalizedTable};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";

/// Excel caps sheet names at 31 characters.
const MAX_SHEET_NAME: usize = 31;

/// Serialize tables into an in-memory xlsx workbook, one sheet per table.
///
/// Numeric cells are written as numbers, text cells as inline strings, so
/// no shared-strings or styles part is needed.
pub fn write_workbook(tables: &[NormalizedTable]) -> Result<Vec<u8>, SieveError> {
    if tables.is_empty() {
        return Err(SieveError::Export("workbook needs at least one table".into()));
    }
    for table in tables {
        validate_sheet_name(&table.name)?;
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    add_part(&mut zip, options, "[Content_Types].xml", &content_types_xml(tables.len())?)?;
    add_part(&mut zip, options, "_rels/.rels", &root_rels_xml()?)?;
    add_part(&mut zip, options, "xl/workbook.xml", &workbook_xml(tables)?)?;
    add_part(
        &mut zip,
        options,
        "xl/_rels/workbook.xml.rels",
        &workbook_rels_xml(tables.len())?,
    )?;
    for (i, table) in tables.iter().enumerate() {
        let path = format!("xl/worksheets/sheet{}.xml", i + 1);
        add_part(&mut zip, options, &path, &worksheet_xml(table)?)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Spreadsheet column letters for a 0-based index: 0 -> "A", 25 -> "Z", 26 -> "AA".
pub fn column_letters(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

fn validate_sheet_name(name: &str) -> Result<(), SieveError> {
    if name.is_empty() || name.chars().count() > MAX_SHEET_NAME {
        return Err(SieveError::Export(format!(
            "sheet name '{name}' must be 1-{MAX_SHEET_NAME} characters"
        )));
    }
    if name.contains(['[', ']', ':', '*', '?', '/', '\\']) {
        return Err(SieveError::Export(format!(
            "sheet name '{name}' contains a character Excel does not allow"
        )));
    }
    Ok(())
}

fn add_part(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    path: &str,
    data: &[u8],
) -> Result<(), SieveError> {
    zip.start_file(path, options)?;
    zip.write_all(data)?;
    Ok(())
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), SieveError> {
    writer
        .write_event(event)
        .map_err(|e| SieveError::Export(format!("xml write failed: {e}")))
}

fn new_part() -> Result<Writer<Vec<u8>>, SieveError> {
    let mut writer = Writer::new(Vec::new());
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )?;
    Ok(writer)
}

fn content_types_xml(sheets: usize) -> Result<Vec<u8>, SieveError> {
    let mut w = new_part()?;
    emit(
        &mut w,
        Event::Start(BytesStart::new("Types").with_attributes([("xmlns", NS_CONTENT_TYPES)])),
    )?;
    emit(
        &mut w,
        Event::Empty(
            BytesStart::new("Default").with_attributes([("Extension", "rels"), ("ContentType", CT_RELS)]),
        ),
    )?;
    emit(
        &mut w,
        Event::Empty(
            BytesStart::new("Default")
                .with_attributes([("Extension", "xml"), ("ContentType", "application/xml")]),
        ),
    )?;
    emit(
        &mut w,
        Event::Empty(
            BytesStart::new("Override")
                .with_attributes([("PartName", "/xl/workbook.xml"), ("ContentType", CT_WORKBOOK)]),
        ),
    )?;
    for i in 1..=sheets {
        let part = format!("/xl/worksheets/sheet{i}.xml");
        emit(
            &mut w,
            Event::Empty(
                BytesStart::new("Override")
                    .with_attributes([("PartName", part.as_str()), ("ContentType", CT_WORKSHEET)]),
            ),
        )?;
    }
    emit(&mut w, Event::End(BytesEnd::new("Types")))?;
    Ok(w.into_inner())
}

fn root_rels_xml() -> Result<Vec<u8>, SieveError> {
    let mut w = new_part()?;
    emit(
        &mut w,
        Event::Start(BytesStart::new("Relationships").with_attributes([("xmlns", NS_PKG_REL)])),
    )?;
    emit(
        &mut w,
        Event::Empty(BytesStart::new("Relationship").with_attributes([
            ("Id", "rId1"),
            ("Type", REL_OFFICE_DOCUMENT),
            ("Target", "xl/workbook.xml"),
        ])),
    )?;
    emit(&mut w, Event::End(BytesEnd::new("Relationships")))?;
    Ok(w.into_inner())
}

fn workbook_xml(tables: &[NormalizedTable]) -> Result<Vec<u8>, SieveError> {
    let mut w = new_part()?;
    emit(
        &mut w,
        Event::Start(
            BytesStart::new("workbook").with_attributes([("xmlns", NS_MAIN), ("xmlns:r", NS_REL)]),
        ),
    )?;
    emit(&mut w, Event::Start(BytesStart::new("sheets")))?;
    for (i, table) in tables.iter().enumerate() {
        let sheet_id = (i + 1).to_string();
        let rel_id = format!("rId{}", i + 1);
        emit(
            &mut w,
            Event::Empty(BytesStart::new("sheet").with_attributes([
                ("name", table.name.as_str()),
                ("sheetId", sheet_id.as_str()),
                ("r:id", rel_id.as_str()),
            ])),
        )?;
    }
    emit(&mut w, Event::End(BytesEnd::new("sheets")))?;
    emit(&mut w, Event::End(BytesEnd::new("workbook")))?;
    Ok(w.into_inner())
}

fn workbook_rels_xml(sheets: usize) -> Result<Vec<u8>, SieveError> {
    let mut w = new_part()?;
    emit(
        &mut w,
        Event::Start(BytesStart::new("Relationships").with_attributes([("xmlns", NS_PKG_REL)])),
    )?;
    for i in 1..=sheets {
        let rel_id = format!("rId{i}");
        let target = format!("worksheets/sheet{i}.xml");
        emit(
            &mut w,
            Event::Empty(BytesStart::new("Relationship").with_attributes([
                ("Id", rel_id.as_str()),
                ("Type", REL_WORKSHEET),
                ("Target", target.as_str()),
            ])),
        )?;
    }
    emit(&mut w, Event::End(BytesEnd::new("Relationships")))?;
    Ok(w.into_inner())
}

fn worksheet_xml(table: &NormalizedTable) -> Result<Vec<u8>, SieveError> {
    let mut w = new_part()?;
    emit(
        &mut w,
        Event::Start(BytesStart::new("worksheet").with_attributes([("xmlns", NS_MAIN)])),
    )?;
    emit(&mut w, Event::Start(BytesStart::new("sheetData")))?;

    for (r, row) in table.rows.iter().enumerate() {
        let row_ref = (r + 1).to_string();
        emit(
            &mut w,
            Event::Start(BytesStart::new("row").with_attributes([("r", row_ref.as_str())])),
        )?;
        for (c, value) in row.iter().enumerate() {
            let cell_ref = format!("{}{}", column_letters(c), r + 1);
            write_cell(&mut w, &cell_ref, value)?;
        }
        emit(&mut w, Event::End(BytesEnd::new("row")))?;
    }

    emit(&mut w, Event::End(BytesEnd::new("sheetData")))?;
    emit(&mut w, Event::End(BytesEnd::new("worksheet")))?;
    Ok(w.into_inner())
}

fn write_cell(w: &mut Writer<Vec<u8>>, cell_ref: &str, value: &CellValue) -> Result<(), SieveError> {
    match value {
        CellValue::Number(n) => {
            let text = n.to_string();
            emit(
                w,
                Event::Start(BytesStart::new("c").with_attributes([("r", cell_ref)])),
            )?;
            emit(w, Event::Start(BytesStart::new("v")))?;
            emit(w, Event::Text(BytesText::new(&text)))?;
            emit(w, Event::End(BytesEnd::new("v")))?;
            emit(w, Event::End(BytesEnd::new("c")))?;
        }
        // Empty text cells are left out of the sheet entirely.
        CellValue::Text(s) if s.is_empty() => {}
        CellValue::Text(s) => {
            emit(
                w,
                Event::Start(
                    BytesStart::new("c").with_attributes([("r", cell_ref), ("t", "inlineStr")]),
                ),
            )?;
            emit(w, Event::Start(BytesStart::new("is")))?;
            let mut t = BytesStart::new("t");
            if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                t.push_attribute(("xml:space", "preserve"));
            }
            emit(w, Event::Start(t))?;
            let escaped = escape_cell_text(s);
            emit(w, Event::Text(BytesText::new(&escaped)))?;
            emit(w, Event::End(BytesEnd::new("t")))?;
            emit(w, Event::End(BytesEnd::new("is")))?;
            emit(w, Event::End(BytesEnd::new("c")))?;
        }
    }
    Ok(())
}

/// Encode characters XML 1.0 cannot carry as OOXML `_xHHHH_` escapes.
///
/// Control characters other than tab, newline and carriage return are
/// escaped. A literal `_xHHHH_` already in the text gets its underscore
/// escaped as `_x005F_` so readers do not decode it.
pub fn escape_cell_text(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());

    for (i, c) in s.char_indices() {
        let illegal = (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r'))
            || matches!(c, '\u{FFFE}' | '\u{FFFF}');
        if illegal {
            out.push_str(&format!("_x{:04X}_", c as u32));
        } else if c == '_' && is_ooxml_escape(&bytes[i..]) {
            out.push_str("_x005F_");
        } else {
            out.push(c);
        }
    }

    out
}

fn is_ooxml_escape(bytes: &[u8]) -> bool {
    bytes.len() >= 7
        && bytes[0] == b'_'
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}
