use fairsharing::{FairsharingExtractor, LicenseGroup, MetadataExtractor, MetadataRecord};

const URL: &str = "https://fairsharing.org/biodbcore-000340";

fn chembl() -> MetadataRecord {
    let markup = include_str!("fixtures/chembl.html");
    FairsharingExtractor::new().unwrap().extract(URL, markup).unwrap()
}

#[test]
fn test_title() {
    let rec = chembl();
    assert_eq!(rec.source, URL);
    assert_eq!(rec.title, "ChEMBL: a large-scale bioactivity database for drug discovery");
    assert_eq!(rec.dataset_id(), "ChEMBLalargescalebioactivitydatabasefordrugdiscoveryDataset");
}

#[test]
fn test_scope_and_data_types_only_domain_tags() {
    assert_eq!(
        chembl().scope_and_data_types,
        vec!["Approved drug", "Bioactivity", "Chemical entity"]
    );
}

#[test]
fn test_terminology_artifacts_trimmed() {
    assert_eq!(
        chembl().terminology_artifacts,
        vec![
            "Chemical Entities of Biological Interest",
            "PSI Molecular Interaction Controlled Vocabulary",
        ]
    );
}

#[test]
fn test_license_groups_in_document_order() {
    let rec = chembl();
    assert_eq!(
        rec.license_groups,
        vec![
            LicenseGroup::new(
                "Applies to: Data use",
                vec!["Creative Commons Attribution (CC-BY) 3.0 International".to_string()],
            ),
            LicenseGroup::new(
                "Applies to: Database software",
                vec!["Apache License 2.0".to_string(), "Custom terms, no link".to_string()],
            ),
            // heading without a list is kept
            LicenseGroup::new("Applies to: Documentation", vec![]),
        ]
    );
}

#[test]
fn test_license_string_for_page() {
    assert_eq!(
        chembl().license_string(),
        "Applies to: Data use = {Creative Commons Attribution (CC-BY) 3.0 International}; \
         Applies to: Database software = {Apache License 2.0; Custom terms, no link}; \
         Applies to: Documentation = {}"
    );
}

#[test]
fn test_record_serializes_to_json() {
    let json = serde_json::to_value(chembl()).unwrap();
    assert_eq!(json["license_groups"][1]["licenses"][0], "Apache License 2.0");
}
