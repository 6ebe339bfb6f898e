//! Two-sheet xlsx export: the raw roster and the per-class summary.
//! An xlsx file is a zip of XML parts; the package is assembled by hand
//! the same way workspace bundles are, with inline-string worksheets and
//! no shared-string table.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::roster::Roster;
use crate::stats::ClassSummary;

pub const SHEET_RAW: &str = "Date brute";
pub const SHEET_SUMMARY: &str = "Statistica pe clase";

#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub sheets: Vec<String>,
    pub bytes: u64,
}

enum Cell {
    Text(String),
    Num(f64),
    Int(usize),
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn push_row(xml: &mut String, cells: &[Cell]) {
    xml.push_str("<row>");
    for cell in cells {
        match cell {
            Cell::Text(s) => {
                xml.push_str("<c t=\"inlineStr\"><is><t>");
                xml.push_str(&xml_escape(s));
                xml.push_str("</t></is></c>");
            }
            Cell::Num(v) => {
                xml.push_str("<c><v>");
                xml.push_str(&v.to_string());
                xml.push_str("</v></c>");
            }
            Cell::Int(v) => {
                xml.push_str("<c><v>");
                xml.push_str(&v.to_string());
                xml.push_str("</v></c>");
            }
        }
    }
    xml.push_str("</row>");
}

fn worksheet_xml(rows: &[Vec<Cell>]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <worksheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\
         <sheetData>",
    );
    for row in rows {
        push_row(&mut xml, row);
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

fn raw_sheet_rows(roster: &Roster) -> Vec<Vec<Cell>> {
    let mut rows = vec![vec![
        Cell::Text("Nume".into()),
        Cell::Text("Clasa".into()),
        Cell::Text("Ea".into()),
        Cell::Text("Ec".into()),
        Cell::Text("Ed".into()),
        Cell::Text("Media".into()),
        Cell::Text("Status".into()),
    ]];
    for s in &roster.students {
        rows.push(vec![
            Cell::Text(s.name.clone()),
            Cell::Text(s.class_label.clone()),
            Cell::Num(s.ea),
            Cell::Num(s.ec),
            Cell::Num(s.ed),
            Cell::Num(s.media),
            Cell::Text(s.status.as_str().to_string()),
        ]);
    }
    rows
}

fn summary_sheet_rows(summaries: &[ClassSummary]) -> Vec<Vec<Cell>> {
    let mut rows = vec![vec![
        Cell::Text("Clasa".into()),
        Cell::Text("Număr elevi".into()),
        Cell::Text("Media Ea".into()),
        Cell::Text("Media Ec".into()),
        Cell::Text("Media Ed".into()),
        Cell::Text("Reușiți".into()),
        Cell::Text("Nereușiți".into()),
    ]];
    for row in summaries {
        rows.push(vec![
            Cell::Text(row.class.clone()),
            Cell::Int(row.student_count),
            Cell::Num(row.mean_ea),
            Cell::Num(row.mean_ec),
            Cell::Num(row.mean_ed),
            Cell::Int(row.pass_count),
            Cell::Int(row.fail_count),
        ]);
    }
    rows
}

const CONTENT_TYPES: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
<Override PartName=\"/xl/worksheets/sheet1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\
<Override PartName=\"/xl/worksheets/sheet2.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>\
<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
</Types>";

const ROOT_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"xl/workbook.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
</Relationships>";

const WORKBOOK_RELS: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet1.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet\" Target=\"worksheets/sheet2.xml\"/>\
</Relationships>";

fn workbook_xml() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <workbook xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\" \
         xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\">\
         <sheets>\
         <sheet name=\"{}\" sheetId=\"1\" r:id=\"rId1\"/>\
         <sheet name=\"{}\" sheetId=\"2\" r:id=\"rId2\"/>\
         </sheets></workbook>",
        xml_escape(SHEET_RAW),
        xml_escape(SHEET_SUMMARY)
    )
}

fn core_props_xml() -> String {
    let created = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:creator>{}</dc:creator>\
         <dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>\
         </cp:coreProperties>",
        env!("CARGO_PKG_NAME"),
        created
    )
}

pub fn write_report<W: Write + Seek>(
    roster: &Roster,
    summaries: &[ClassSummary],
    writer: W,
) -> anyhow::Result<W> {
    let mut zip = ZipWriter::new(writer);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let entries: [(&str, String); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("docProps/core.xml", core_props_xml()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", worksheet_xml(&raw_sheet_rows(roster))),
        (
            "xl/worksheets/sheet2.xml",
            worksheet_xml(&summary_sheet_rows(summaries)),
        ),
    ];

    for (name, body) in entries {
        zip.start_file(name, opts)
            .with_context(|| format!("failed to start entry {}", name))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("failed to write entry {}", name))?;
    }

    zip.finish().context("failed to finalize xlsx package")
}

pub fn export_report(
    roster: &Roster,
    summaries: &[ClassSummary],
    out_path: &Path,
) -> anyhow::Result<ReportSummary> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create directory {}", parent.to_string_lossy())
            })?;
        }
    }
    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;

    let mut file = write_report(roster, summaries, out_file)?;
    file.flush().context("failed to flush xlsx package")?;
    let bytes = file
        .metadata()
        .context("failed to stat xlsx package")?
        .len();

    Ok(ReportSummary {
        sheets: vec![SHEET_RAW.to_string(), SHEET_SUMMARY.to_string()],
        bytes,
    })
}
