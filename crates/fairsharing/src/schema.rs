use serde::{Deserialize, Serialize};

/// Separator used when a list of scraped values is flattened into one string.
pub const LIST_SEP: &str = "; ";

/// Licenses listed under one "Applies to" heading of a record's conditions of use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseGroup {
    pub applies_to: String,
    pub licenses: Vec<String>,
}

impl LicenseGroup {
    pub fn new(applies_to: impl Into<String>, licenses: Vec<String>) -> Self {
        Self { applies_to: applies_to.into(), licenses }
    }

    /// `"<applies-to> = {<lic1>; <lic2>}"`
    pub fn render(&self) -> String {
        format!("{} = {{{}}}", self.applies_to, self.licenses.join(LIST_SEP))
    }
}

/// Metadata scraped from one catalog page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub source: String,             // page url the record was scraped from
    pub title: String,
    pub scope_and_data_types: Vec<String>,
    pub terminology_artifacts: Vec<String>,
    pub license_groups: Vec<LicenseGroup>,
}

impl MetadataRecord {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        scope_and_data_types: Vec<String>,
        terminology_artifacts: Vec<String>,
        license_groups: Vec<LicenseGroup>,
    ) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            scope_and_data_types,
            terminology_artifacts,
            license_groups,
        }
    }

    pub fn scope_and_data_types_string(&self) -> String {
        self.scope_and_data_types.join(LIST_SEP)
    }

    pub fn terminology_artifacts_string(&self) -> String {
        self.terminology_artifacts.join(LIST_SEP)
    }

    /// All license groups flattened into the textual convention downstream
    /// consumers read, e.g. `"Data use = {CC-BY 3.0}; Software = {Apache-2.0}"`.
    pub fn license_string(&self) -> String {
        self.license_groups
            .iter()
            .map(LicenseGroup::render)
            .collect::<Vec<_>>()
            .join(LIST_SEP)
    }

    /// Local identifier for the dataset node: the title's alphanumeric
    /// characters followed by `Dataset`.
    pub fn dataset_id(&self) -> String {
        dataset_id_from_title(&self.title)
    }
}

pub fn dataset_id_from_title(title: &str) -> String {
    let mut id: String = title.chars().filter(|c| c.is_alphanumeric()).collect();
    id.push_str("Dataset");
    id
}
