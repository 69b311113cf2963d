mod common;

use chklst_reports::{ReportFormat, StatisticsMapping};
use common::fixtures::{march_2025, monthly_stats};
use common::{GeneratedPdf, GeneratedXlsx, TestResult, fixed_generator};

#[test]
fn test_statistics_workbook_lists_entries_in_order() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let bytes =
        fixed_generator().render_statistics(ReportFormat::Spreadsheet, &monthly_stats(), march_2025())?;
    let mut xlsx = GeneratedXlsx::from_bytes(bytes)?;
    assert_eq!(xlsx.sheet_names(), vec!["Statistics"]);

    let sheet = xlsx.sheet("Statistics")?;
    assert_cell_text!(sheet, (0, 0), "Deployment Statistics - March 2025");
    assert_cell_text!(sheet, (2, 0), "Total Deployments");
    assert_cell_text!(sheet, (2, 1), "12");
    assert_cell_text!(sheet, (3, 0), "Success Rate");
    assert_cell_text!(sheet, (3, 1), "0.92");
    Ok(())
}

#[test]
fn test_statistics_document_shows_both_entries() -> TestResult {
    let bytes =
        fixed_generator().render_statistics(ReportFormat::Document, &monthly_stats(), march_2025())?;
    let pdf = GeneratedPdf::from_bytes(bytes)?;

    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "Deployment Statistics - March 2025");
    assert_pdf_contains_text!(pdf, "Total Deployments");
    assert_pdf_contains_text!(pdf, "12");
    assert_pdf_contains_text!(pdf, "Success Rate");
    assert_pdf_contains_text!(pdf, "0.92");

    let text = common::pdf_assertions::extract_text(&pdf.doc);
    let total = text.find("Total Deployments");
    let rate = text.find("Success Rate");
    assert!(total < rate, "entries should keep their input order");
    Ok(())
}

#[test]
fn test_key_order_follows_the_input_not_the_alphabet() -> TestResult {
    let stats: StatisticsMapping =
        serde_json::from_str(r#"{"zeta_count": 1, "alpha_count": 2, "mid_ratio": "n/a"}"#)?;
    let bytes = fixed_generator().render_statistics(ReportFormat::Spreadsheet, &stats, march_2025())?;
    let mut xlsx = GeneratedXlsx::from_bytes(bytes)?;
    let sheet = xlsx.sheet("Statistics")?;
    assert_cell_text!(sheet, (2, 0), "Zeta Count");
    assert_cell_text!(sheet, (3, 0), "Alpha Count");
    assert_cell_text!(sheet, (4, 0), "Mid Ratio");
    assert_cell_text!(sheet, (4, 1), "n/a");
    Ok(())
}

#[test]
fn test_empty_statistics_still_render() -> TestResult {
    let stats = StatisticsMapping::new();
    for format in ReportFormat::ALL {
        let bytes = fixed_generator().render_statistics(format, &stats, march_2025())?;
        assert!(!bytes.is_empty());
    }
    Ok(())
}
