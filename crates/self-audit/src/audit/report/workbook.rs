use rust_xlsxwriter::{
    Chart, ChartType, Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use tracing::debug;

use super::super::domain::Band;
use super::document::{Cell, ReportDocument, Row, Section, SectionKind};
use super::ReportError;

const PERCENT_FORMAT: &str = "0.0\"%\"";
const SCORE_FORMAT: &str = "0.0";
const BANNER_COLOR: u32 = 0x1F_3A_5F;
const HEADER_COLOR: u32 = 0xD9_E1_F2;

/// Serializes `document` into an in-memory `.xlsx` workbook with a single worksheet.
///
/// The workbook and worksheet are owned locally and dropped on every early
/// return, so a failure never leaves a partially written buffer behind.
pub fn render_workbook(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    document.validate()?;

    let mut worksheet = Worksheet::new();
    worksheet.set_name(&document.sheet_name)?;
    for (column, width) in document.column_widths.iter().enumerate() {
        worksheet.set_column_width(column as u16, *width)?;
    }

    let columns = document.column_widths.len() as u16;
    let mut row: u32 = 0;
    for section in &document.sections {
        let first_data_row = write_section(&mut worksheet, section, row, columns)?;
        let next_row = first_data_row + section.rows.len() as u32;

        if section.kind == SectionKind::ChartData && !section.rows.is_empty() {
            insert_chart(
                &mut worksheet,
                document,
                section,
                row,
                first_data_row,
                next_row - 1,
                columns,
            )?;
        }

        debug!(
            section = ?section.kind,
            start_row = row,
            rows = section.rows.len(),
            "report section written"
        );
        row = next_row + 1;
    }

    let mut workbook = Workbook::new();
    workbook.push_worksheet(worksheet);

    let sheets = workbook.worksheets().len();
    if sheets != 1 {
        return Err(ReportError::StructuralIntegrity(format!(
            "report must contain exactly one worksheet, found {sheets}"
        )));
    }

    Ok(workbook.save_to_buffer()?)
}

/// Writes title, header and data rows; returns the index of the first data row.
fn write_section(
    worksheet: &mut Worksheet,
    section: &Section,
    start_row: u32,
    columns: u16,
) -> Result<u32, ReportError> {
    let banner = banner_format(section.kind);
    worksheet.write_string_with_format(start_row, 0, &section.title, &banner)?;
    for column in 1..columns {
        worksheet.write_blank(start_row, column, &banner)?;
    }

    let header_row = start_row + 1;
    let header = header_format();
    for column in 0..columns {
        match section.header.get(usize::from(column)) {
            Some(label) => worksheet.write_string_with_format(header_row, column, label, &header)?,
            None => worksheet.write_blank(header_row, column, &header)?,
        };
    }

    let first_data_row = header_row + 1;
    for (offset, data) in section.rows.iter().enumerate() {
        write_row(worksheet, first_data_row + offset as u32, data, columns)?;
    }

    Ok(first_data_row)
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    data: &Row,
    columns: u16,
) -> Result<(), ReportError> {
    for column in 0..columns {
        let cell = data.cells.get(usize::from(column)).unwrap_or(&Cell::Empty);
        let format = cell_format(cell, data);
        match cell {
            Cell::Text(value) => worksheet.write_string_with_format(row, column, value, &format)?,
            Cell::Percent(value) | Cell::Score(value) => {
                worksheet.write_number_with_format(row, column, *value, &format)?
            }
            Cell::Empty if data.band.is_some() => worksheet.write_blank(row, column, &format)?,
            Cell::Empty => continue,
        };
    }
    Ok(())
}

fn insert_chart(
    worksheet: &mut Worksheet,
    document: &ReportDocument,
    section: &Section,
    anchor_row: u32,
    first_row: u32,
    last_row: u32,
    columns: u16,
) -> Result<(), ReportError> {
    let series_name = section.header.get(1).map(String::as_str).unwrap_or_default();
    let sheet = document.sheet_name.as_str();

    let mut chart = Chart::new(ChartType::Bar);
    chart.title().set_name(section.title.as_str());
    chart.legend().set_hidden();
    chart
        .add_series()
        .set_name(series_name)
        .set_categories((sheet, first_row, 0, last_row, 0))
        .set_values((sheet, first_row, 1, last_row, 1));

    worksheet.insert_chart(anchor_row, columns + 1, &chart)?;
    Ok(())
}

fn banner_format(kind: SectionKind) -> Format {
    let format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(BANNER_COLOR));
    if kind == SectionKind::Title {
        format.set_font_size(16)
    } else {
        format.set_font_size(12)
    }
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_COLOR))
        .set_border_bottom(FormatBorder::Thin)
}

fn cell_format(cell: &Cell, row: &Row) -> Format {
    let mut format = match cell {
        Cell::Percent(_) => Format::new()
            .set_num_format(PERCENT_FORMAT)
            .set_align(FormatAlign::Right),
        Cell::Score(_) => Format::new()
            .set_num_format(SCORE_FORMAT)
            .set_align(FormatAlign::Right),
        Cell::Text(_) | Cell::Empty => Format::new().set_text_wrap(),
    }
    .set_align(FormatAlign::Top);

    if let Some(band) = row.band {
        format = format.set_background_color(band_color(band));
    }
    if row.strong {
        format = format.set_bold();
    }
    format
}

fn band_color(band: Band) -> Color {
    Color::RGB(band.rgb())
}
