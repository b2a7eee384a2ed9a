//! Integration tests for snapshot ingestion and Bronze construction.

use fda_ingest::{IngestError, build_bronze, read_snapshot};
use fda_model::{SourceFiles, SourceTable};

const PRODUCTS: &str = "ApplNo\tProductNo\tForm\tStrength\tReferenceDrug\tDrugName\tActiveIngredient\tReferenceStandard\r\n\
000004\t004\tSOLUTION/DROPS;OPHTHALMIC\t1%\t0\tPAREDRINE\tHYDROXYAMPHETAMINE HYDROBROMIDE\t0\r\n\
000159\t001\tTABLET;ORAL\t500MG\t0\tSULFAPYRIDINE\tSULFAPYRIDINE\r\n";

const SUBMISSIONS: &str = "ApplNo\tSubmissionClassCodeID\tSubmissionType\tSubmissionNo\tSubmissionStatus\tSubmissionStatusDate\n\
000004\t7\tORIG\t1\tAP\tApproved prior to Jan 1, 1982\n";

fn minimal_files() -> SourceFiles {
    SourceFiles::new()
        .with_file("Products.txt", PRODUCTS.as_bytes().to_vec())
        .with_file("Submissions.txt", SUBMISSIONS.as_bytes().to_vec())
}

#[test]
fn reads_publisher_headers_as_snake_case() {
    let snapshot = read_snapshot(&minimal_files()).expect("read snapshot");
    let products = &snapshot.products;
    assert_eq!(products.height(), 2);
    assert!(products.has_column("active_ingredient"));
    assert!(products.has_column("reference_standard"));
    assert_eq!(products.value("drug_name", 0), "PAREDRINE");
    // The short second row is padded to the header width.
    assert_eq!(products.value("reference_standard", 1), "");
    assert_eq!(
        snapshot.submissions.value("submission_status_date", 0),
        "Approved prior to Jan 1, 1982"
    );
}

#[test]
fn missing_auxiliary_tables_are_substituted() {
    let snapshot = read_snapshot(&minimal_files()).expect("read snapshot");
    for table in [
        SourceTable::Applications,
        SourceTable::MarketingStatus,
        SourceTable::MarketingStatusLookup,
        SourceTable::Te,
        SourceTable::Exclusivity,
    ] {
        let batch = snapshot.batch(table);
        assert!(batch.is_substituted(), "{table} should be substituted");
        assert_eq!(batch.height(), 0);
    }
}

#[test]
fn missing_products_is_fatal() {
    let files = SourceFiles::new().with_file("Submissions.txt", SUBMISSIONS.as_bytes().to_vec());
    let err = read_snapshot(&files).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingTable {
            table: SourceTable::Products,
            ..
        }
    ));
}

#[test]
fn missing_required_column_is_schema_mismatch() {
    let files = minimal_files().with_file("TE.txt", b"ApplNo\tProductNo\n000004\t004\n".to_vec());
    let err = read_snapshot(&files).unwrap_err();
    assert!(matches!(
        err,
        IngestError::MissingColumn {
            table: SourceTable::Te,
            column: "te_code"
        }
    ));
}

#[test]
fn bronze_mirrors_present_members_only() {
    let snapshot = read_snapshot(&minimal_files()).expect("read snapshot");
    let bronze = build_bronze(&snapshot);
    let names: Vec<&str> = bronze.iter().map(|table| table.name.as_str()).collect();
    assert_eq!(names, vec!["bronze_products", "bronze_submissions"]);
    assert_eq!(bronze[0].height(), 2);
    assert_eq!(bronze[0].source_file, "Products.txt");
}

#[test]
fn windows_1252_members_decode() {
    let bytes = b"ApplNo\tApplType\tApplPublicNotes\tSponsorName\n000004\tN\t\tSOCI\xC9T\xC9\n".to_vec();
    let files = minimal_files().with_file("Applications.txt", bytes);
    let snapshot = read_snapshot(&files).expect("read snapshot");
    assert_eq!(
        snapshot.applications.value("sponsor_name", 0),
        "SOCI\u{c9}T\u{c9}"
    );
}
