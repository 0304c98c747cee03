use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::models::Hotel;

pub const WORKSHEET_NAME: &str = "Hotels";

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header and width of every exported column, in sheet order
pub const COLUMNS: [(&str, f64); 7] = [
    ("Name", 30.0),
    ("Address", 50.0),
    ("Website URL", 50.0),
    ("Rating", 10.0),
    ("Place ID", 20.0),
    ("Photo URL", 50.0),
    ("Email", 30.0),
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

/// Project a record onto the columns of [`COLUMNS`]
pub fn row(hotel: &Hotel) -> [Cell<'_>; 7] {
    [
        Cell::Text(&hotel.name),
        Cell::Text(&hotel.address),
        Cell::Text(&hotel.website_url),
        Cell::Number(hotel.rating),
        Cell::Text(&hotel.place_id),
        Cell::Text(&hotel.photo_url),
        Cell::Text(&hotel.email),
    ]
}

/// `{city}_hotels.xlsx`, with anything but ASCII letters, digits, `-` and `_`
/// in the city replaced so the name stays inside the export directory
pub fn export_file_name(city: &str) -> String {
    let safe: String = city
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{}_hotels.xlsx", safe)
}

/// Unique on-disk location for one export of `file_name` inside `dir`.
///
/// Concurrent requests for the same city share a download name but never a
/// file.
pub fn scratch_path(dir: &Path, file_name: &str) -> PathBuf {
    let stem = file_name.strip_suffix(".xlsx").unwrap_or(file_name);
    dir.join(format!("{}.{}.xlsx", stem, Uuid::new_v4().simple()))
}

pub fn write_workbook(path: &Path, hotels: &[Hotel]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    for (col, (header, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)?;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
    }

    for (idx, hotel) in hotels.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row(hotel).iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => worksheet.write_string(row_num, col, *text)?,
                Cell::Number(number) => worksheet.write_number(row_num, col, *number)?,
            };
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write spreadsheet {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn hotel() -> Hotel {
        Hotel {
            name: "Le Petit Hostel".to_string(),
            address: "3 Rue Oberkampf, Paris".to_string(),
            website_url: "https://petit-hostel.fr".to_string(),
            rating: 4.5,
            place_id: "ChIJ-petit".to_string(),
            photo_url: "https://example.test/photo".to_string(),
            email: "null".to_string(),
            city: "Paris".to_string(),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn column_order_is_fixed() {
        let headers: Vec<&str> = COLUMNS.iter().map(|(h, _)| *h).collect();
        assert_eq!(
            headers,
            vec!["Name", "Address", "Website URL", "Rating", "Place ID", "Photo URL", "Email"]
        );
    }

    #[test]
    fn row_follows_column_order() {
        let hotel = hotel();
        assert_eq!(
            row(&hotel),
            [
                Cell::Text("Le Petit Hostel"),
                Cell::Text("3 Rue Oberkampf, Paris"),
                Cell::Text("https://petit-hostel.fr"),
                Cell::Number(4.5),
                Cell::Text("ChIJ-petit"),
                Cell::Text("https://example.test/photo"),
                Cell::Text("null"),
            ]
        );
    }

    #[test]
    fn file_name_is_sanitized() {
        assert_eq!(export_file_name("Paris"), "Paris_hotels.xlsx");
        assert_eq!(export_file_name("Saint-Malo"), "Saint-Malo_hotels.xlsx");
        assert_eq!(export_file_name("../etc/passwd"), "___etc_passwd_hotels.xlsx");
        assert_eq!(export_file_name("Aix en Provence"), "Aix_en_Provence_hotels.xlsx");
    }

    #[test]
    fn scratch_paths_are_distinct_and_stay_in_dir() {
        let dir = Path::new("/srv/exports");
        let first = scratch_path(dir, "Paris_hotels.xlsx");
        let second = scratch_path(dir, "Paris_hotels.xlsx");

        assert_ne!(first, second);
        assert_eq!(first.parent(), Some(dir));
        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("Paris_hotels."));
        assert!(name.ends_with(".xlsx"));
    }

    #[test]
    fn writes_an_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_file_name("Paris"));

        write_workbook(&path, &[hotel(), hotel()]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_export_still_has_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_file_name("Nowhere"));

        write_workbook(&path, &[]).unwrap();
        assert!(path.exists());
    }
}
