use crate::admin::error::AdminError;
use crate::admin::error::AdminError::{CantWriteCsv, CantWriteXlsx};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator};
use dto::listing::ApplicationOverview;
use rust_xlsxwriter::Workbook;
use std::str::FromStr;

const BYTE_ORDER_MARK: &str = "\u{feff}";
const DATE_FORMAT: &str = "%d/%m/%Y";
pub const SHEET_NAME: &str = "Membres";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Missing means CSV.
    pub fn parse(value: Option<&str>) -> Result<Self, AdminError> {
        value.map_or(Ok(ExportFormat::default()), ExportFormat::from_str)
    }
}

impl FromStr for ExportFormat {
    type Err = AdminError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(AdminError::invalid_filter("format", value)),
        }
    }
}

pub const HEADERS: [&str; 21] = [
    "Prénom",
    "Nom",
    "Email",
    "Téléphone",
    "Date de naissance",
    "Adresse",
    "Code postal",
    "Ville",
    "Contact urgence",
    "Téléphone urgence",
    "Licence FFG",
    "Index Golf",
    "Lieu de naissance",
    "Type adhésion",
    "Type licence",
    "Adhésion payée",
    "Licence payée",
    "Statut membre",
    "Traité",
    "Rôle",
    "Date création",
];

pub fn export_file_name(today: &NaiveDate, format: ExportFormat) -> String {
    format!(
        "membres_agse_{}.{}",
        today.format("%Y-%m-%d"),
        format.extension()
    )
}

fn yes_or_no(value: bool) -> String {
    let answer = if value { "Oui" } else { "Non" };
    answer.to_owned()
}

fn to_record(overview: &ApplicationOverview) -> [String; 21] {
    let info = overview.personal_info();
    let application = overview.application();
    let payment = overview.payment().as_ref();
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    [
        text(info.firstname()),
        text(info.lastname()),
        overview.email().clone(),
        text(info.phone()),
        info.birthdate()
            .map(|birthdate| birthdate.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        text(info.address()),
        text(info.postalcode()),
        text(info.city()),
        text(info.emergencycontact()),
        text(info.emergencyphone()),
        text(info.ffglicense()),
        info.golfindex()
            .map(|index| index.to_string())
            .unwrap_or_default(),
        text(info.birthplace()),
        application.membership_type().label().to_owned(),
        application.license_type().label().to_owned(),
        yes_or_no(payment.is_some_and(|payment| *payment.membership_paid())),
        yes_or_no(payment.is_some_and(|payment| *payment.license_paid())),
        payment
            .and_then(|payment| *payment.member_type())
            .map(|member_type| member_type.code().to_owned())
            .unwrap_or_else(|| "-".to_owned()),
        yes_or_no(payment.is_some_and(|payment| *payment.validated())),
        overview.role().code().to_owned(),
        application.created_at().format(DATE_FORMAT).to_string(),
    ]
}

/// Write the applications as a spreadsheet-friendly CSV: every field quoted, UTF-8 BOM first.
pub fn export_csv(overviews: &[ApplicationOverview]) -> Result<String, AdminError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(BYTE_ORDER_MARK.as_bytes().to_vec());

    writer
        .write_record(HEADERS)
        .map_err(|e| CantWriteCsv(e.to_string()))?;
    for overview in overviews {
        writer
            .write_record(to_record(overview))
            .map_err(|e| CantWriteCsv(e.to_string()))?;
    }

    let content = writer
        .into_inner()
        .map_err(|e| CantWriteCsv(e.to_string()))?;
    String::from_utf8(content).map_err(|e| CantWriteCsv(e.to_string()))
}

/// Each column is as wide as its longest value, header included.
fn column_widths(records: &[[String; 21]]) -> [usize; 21] {
    let mut widths = HEADERS.map(|header| header.chars().count());
    for record in records {
        for (width, value) in widths.iter_mut().zip(record) {
            *width = (*width).max(value.chars().count());
        }
    }

    widths
}

/// Write the applications into a workbook holding a single `Membres` sheet.
pub fn export_xlsx(overviews: &[ApplicationOverview]) -> Result<Vec<u8>, AdminError> {
    let records = overviews.iter().map(to_record).collect::<Vec<_>>();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| CantWriteXlsx(e.to_string()))?;

    for (column, header) in (0u16..).zip(HEADERS) {
        worksheet
            .write_string(0, column, header)
            .map_err(|e| CantWriteXlsx(e.to_string()))?;
    }
    for (row, record) in (1u32..).zip(&records) {
        for (column, value) in (0u16..).zip(record) {
            worksheet
                .write_string(row, column, value)
                .map_err(|e| CantWriteXlsx(e.to_string()))?;
        }
    }
    for (column, width) in (0u16..).zip(column_widths(&records)) {
        worksheet
            .set_column_width(column, width as f64)
            .map_err(|e| CantWriteXlsx(e.to_string()))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| CantWriteXlsx(e.to_string()))
}

pub fn export(
    overviews: &[ApplicationOverview],
    format: ExportFormat,
) -> Result<Vec<u8>, AdminError> {
    match format {
        ExportFormat::Csv => export_csv(overviews).map(String::into_bytes),
        ExportFormat::Xlsx => export_xlsx(overviews),
    }
}

#[cfg(test)]
mod tests {
    mod export_file_name {
        use crate::admin::export::{ExportFormat, export_file_name};
        use crate::tools::test::tests::date;

        #[test]
        fn success() {
            assert_eq!(
                "membres_agse_2025-03-07.csv",
                export_file_name(&date(2025, 3, 7), ExportFormat::Csv)
            );
            assert_eq!(
                "membres_agse_2025-03-07.xlsx",
                export_file_name(&date(2025, 3, 7), ExportFormat::Xlsx)
            );
        }
    }

    mod export_format {
        use crate::admin::error::AdminError;
        use crate::admin::export::ExportFormat;

        #[test]
        fn should_default_to_csv() {
            assert_eq!(Ok(ExportFormat::Csv), ExportFormat::parse(None));
            assert_eq!(Ok(ExportFormat::Xlsx), ExportFormat::parse(Some("xlsx")));
        }

        #[test]
        fn fail_when_unknown_format() {
            assert_eq!(
                Err(AdminError::invalid_filter("format", "pdf")),
                ExportFormat::parse(Some("pdf"))
            );
        }
    }

    mod export_xlsx {
        use crate::admin::export::{HEADERS, SHEET_NAME, column_widths, export_xlsx, to_record};
        use crate::admin::listing::tests::get_test_overviews;
        use calamine::{Reader, Xlsx, open_workbook_from_rs};
        use std::io::Cursor;

        fn read_rows(content: Vec<u8>) -> (Vec<String>, Vec<Vec<String>>) {
            let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(content)).unwrap();
            let sheet_names = workbook.sheet_names();
            let range = workbook.worksheet_range(SHEET_NAME).unwrap();
            let rows = range
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect();

            (sheet_names, rows)
        }

        #[test]
        fn should_write_header_and_one_row_per_application() {
            let overviews = get_test_overviews();

            let (sheet_names, rows) = read_rows(export_xlsx(&overviews).unwrap());

            assert_eq!(vec![SHEET_NAME.to_owned()], sheet_names);
            assert_eq!(5, rows.len());
            assert_eq!(HEADERS.map(str::to_owned).to_vec(), rows[0]);
            assert_eq!(to_record(&overviews[0]).to_vec(), rows[1]);
        }

        #[test]
        fn should_only_write_headers_when_empty() {
            let (sheet_names, rows) = read_rows(export_xlsx(&[]).unwrap());

            assert_eq!(vec!["Membres".to_owned()], sheet_names);
            assert_eq!(vec![HEADERS.map(str::to_owned).to_vec()], rows);
        }

        #[test]
        fn should_size_columns_after_longest_value() {
            let records = get_test_overviews()
                .iter()
                .map(to_record)
                .collect::<Vec<_>>();

            let widths = column_widths(&records);

            assert_eq!("Jonette".len(), widths[0]);
            assert_eq!("anonymous@golf.fr".len(), widths[2]);
            assert_eq!("Licence FFG Jeune adulte (19-25 ans)".chars().count(), widths[14]);
        }
    }

    mod export_csv {
        use crate::admin::export::{HEADERS, export_csv};
        use crate::admin::listing::tests::get_test_overviews;

        fn header_line() -> String {
            HEADERS
                .iter()
                .map(|header| format!("\"{header}\""))
                .collect::<Vec<_>>()
                .join(",")
        }

        #[test]
        fn should_only_write_headers_when_empty() {
            let result = export_csv(&[]).unwrap();

            assert_eq!(format!("\u{feff}{}\n", header_line()), result);
        }

        #[test]
        fn should_write_one_line_per_application() {
            let result = export_csv(&get_test_overviews()).unwrap();

            let lines = result.lines().collect::<Vec<_>>();
            assert_eq!(5, lines.len());
            assert!(lines[0].starts_with('\u{feff}'));
            assert_eq!(
                "\"Jon\",\"Doe\",\"jon@doe.com\",\"0612345678\",\"01/02/1980\",\"1 rue du Green\",\"75001\",\"Paris\",\"\",\"\",\"123456\",\"18.4\",\"Lyon\",\"GOLF\",\"Licence FFG Adulte\",\"Oui\",\"Oui\",\"AGSE\",\"Non\",\"user\",\"10/09/2025\"",
                lines[1]
            );
        }

        #[test]
        fn should_write_defaults_when_no_payment() {
            let result = export_csv(&get_test_overviews()).unwrap();

            let elodie = result.lines().nth(3).unwrap();
            assert!(elodie.starts_with("\"Élodie\",\"Martin\""));
            assert!(elodie.ends_with("\"Non\",\"Non\",\"-\",\"Non\",\"user\",\"01/03/2025\""));
        }

        #[test]
        fn should_quote_fields_containing_quotes() {
            let mut overviews = get_test_overviews();
            overviews.truncate(1);
            let overview = overviews.remove(0);
            let overview = dto::listing::ApplicationOverview::new(
                overview.application().clone(),
                "jon \"the putter\"@doe.com".to_owned(),
                *overview.role(),
                overview.personal_info().clone(),
                *overview.membership_year(),
                overview.payment().clone(),
            );

            let result = export_csv(&[overview]).unwrap();

            assert!(result.contains(",\"jon \"\"the putter\"\"@doe.com\","));
        }
    }
}
