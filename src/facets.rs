//! Facet filtering over fetched listings.
//!
//! A facet is one filter dimension (year, month, service type, status). Its
//! candidate values are derived from an unfiltered listing, narrowed by the
//! autocomplete query, and the chosen values are turned into the remote query
//! the backend understands.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::feedback::Feedback;
use crate::domain::invoice::Invoice;
use crate::domain::notice::Notice;
use crate::domain::service_request::{RequestStatus, ServiceRequest, ServiceType};

/// One selectable option of a facet.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FacetValue {
    pub label: String,
    pub value: String,
}

impl FacetValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

/// Projects distinct, non-empty values out of `listing` in first-seen order.
pub fn derive_facet_values<T, K, F>(listing: &[T], mut key_fn: F) -> Vec<FacetValue>
where
    F: FnMut(&T) -> Option<K>,
    K: Into<String>,
{
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for item in listing {
        let Some(key) = key_fn(item) else {
            continue;
        };
        let key = key.into().trim().to_string();
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        values.push(FacetValue::new(key.clone(), key));
    }
    values
}

/// Case-insensitive substring match on the label. A blank query keeps everything.
pub fn narrow_facet_values(candidates: &[FacetValue], query: &str) -> Vec<FacetValue> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return candidates.to_vec();
    }
    candidates
        .iter()
        .filter(|candidate| candidate.label.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Candidate set of one facet.
///
/// The master set only changes through [`FacetCatalog::replace`]; narrowing
/// always starts from it, so no query can shrink the option pool.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct FacetCatalog {
    master: Vec<FacetValue>,
    visible: Vec<FacetValue>,
}

impl FacetCatalog {
    pub fn new(master: Vec<FacetValue>) -> Self {
        Self {
            visible: master.clone(),
            master,
        }
    }

    pub fn from_listing<T, K, F>(listing: &[T], key_fn: F) -> Self
    where
        F: FnMut(&T) -> Option<K>,
        K: Into<String>,
    {
        Self::new(derive_facet_values(listing, key_fn))
    }

    pub fn master(&self) -> &[FacetValue] {
        &self.master
    }

    /// Options currently offered by the autocomplete.
    pub fn visible(&self) -> &[FacetValue] {
        &self.visible
    }

    pub fn narrow(&mut self, query: &str) -> &[FacetValue] {
        self.visible = narrow_facet_values(&self.master, query);
        &self.visible
    }

    pub fn replace(&mut self, master: Vec<FacetValue>) {
        self.visible = master.clone();
        self.master = master;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetDimension {
    Year,
    Month,
    Service,
    Status,
}

impl FacetDimension {
    pub const ALL: [FacetDimension; 4] = [
        FacetDimension::Year,
        FacetDimension::Month,
        FacetDimension::Service,
        FacetDimension::Status,
    ];
}

/// Listing items that expose values for some facet dimensions.
pub trait Faceted {
    fn facet_value(&self, dimension: FacetDimension) -> Option<String>;
}

impl Faceted for Invoice {
    fn facet_value(&self, dimension: FacetDimension) -> Option<String> {
        match dimension {
            FacetDimension::Year => Some(self.year.clone()),
            FacetDimension::Month => Some(self.month.clone()),
            FacetDimension::Status => self.status.clone(),
            FacetDimension::Service => None,
        }
    }
}

impl Faceted for Notice {
    fn facet_value(&self, dimension: FacetDimension) -> Option<String> {
        match dimension {
            FacetDimension::Year => Some(self.year.clone()),
            FacetDimension::Month => Some(self.month.clone()),
            FacetDimension::Service | FacetDimension::Status => None,
        }
    }
}

impl Faceted for ServiceRequest {
    fn facet_value(&self, dimension: FacetDimension) -> Option<String> {
        match dimension {
            FacetDimension::Service => Some(self.service_type.label().to_string()),
            FacetDimension::Status => Some(self.status.label().to_string()),
            FacetDimension::Year | FacetDimension::Month => None,
        }
    }
}

impl Faceted for Feedback {
    fn facet_value(&self, dimension: FacetDimension) -> Option<String> {
        match dimension {
            FacetDimension::Service => self.service_type.clone(),
            _ => None,
        }
    }
}

/// Chosen value per dimension; an empty string means nothing is chosen.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FacetSelection {
    pub year: String,
    pub month: String,
    pub service: String,
    pub status: String,
}

impl FacetSelection {
    fn slot(&mut self, dimension: FacetDimension) -> &mut String {
        match dimension {
            FacetDimension::Year => &mut self.year,
            FacetDimension::Month => &mut self.month,
            FacetDimension::Service => &mut self.service,
            FacetDimension::Status => &mut self.status,
        }
    }

    /// The chosen value, or `None` when the dimension is unset.
    pub fn get(&self, dimension: FacetDimension) -> Option<&str> {
        let value = match dimension {
            FacetDimension::Year => &self.year,
            FacetDimension::Month => &self.month,
            FacetDimension::Service => &self.service,
            FacetDimension::Status => &self.status,
        };
        let value = value.trim();
        (!value.is_empty()).then_some(value)
    }

    pub fn set(&mut self, dimension: FacetDimension, value: impl Into<String>) {
        *self.slot(dimension) = value.into();
    }

    pub fn unset(&mut self, dimension: FacetDimension) {
        self.slot(dimension).clear();
    }

    /// Resets every dimension; searches are one-shot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FacetDimension::ALL.iter().all(|d| self.get(*d).is_none())
    }
}

/// Local narrowing of a listing by every chosen dimension.
pub fn filter_listing<T: Faceted + Clone>(listing: &[T], selection: &FacetSelection) -> Vec<T> {
    listing
        .iter()
        .filter(|item| {
            FacetDimension::ALL.iter().all(|dimension| {
                match selection.get(*dimension) {
                    None => true,
                    Some(chosen) => item
                        .facet_value(*dimension)
                        .is_some_and(|value| value.trim().eq_ignore_ascii_case(chosen)),
                }
            })
        })
        .cloned()
        .collect()
}

/// Remote query for period-filtered listings (invoices and notices).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeriodQuery {
    All,
    Year(String),
    YearMonth { year: String, month: String },
}

/// Maps a year/month selection to the remote query. A month without a year
/// is never sent and falls back to the unfiltered listing.
pub fn apply_selection(selection: &FacetSelection) -> PeriodQuery {
    match (
        selection.get(FacetDimension::Year),
        selection.get(FacetDimension::Month),
    ) {
        (Some(year), Some(month)) => PeriodQuery::YearMonth {
            year: year.to_string(),
            month: month.to_string(),
        },
        (Some(year), None) => PeriodQuery::Year(year.to_string()),
        (None, Some(month)) => {
            log::debug!("Month `{month}` selected without a year; querying everything");
            PeriodQuery::All
        }
        (None, None) => PeriodQuery::All,
    }
}

/// Remote query for the service request listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestQuery {
    /// The caller's own listing (all requests for staff, own requests for residents).
    Unfiltered,
    TypeStatus {
        service: ServiceType,
        status: RequestStatus,
    },
}

/// Service and status must both be chosen for a type/status search.
pub fn apply_request_selection(selection: &FacetSelection) -> RequestQuery {
    let service = selection
        .get(FacetDimension::Service)
        .and_then(|s| s.parse::<ServiceType>().ok());
    let status = selection
        .get(FacetDimension::Status)
        .and_then(|s| s.parse::<RequestStatus>().ok());

    match (service, status) {
        (Some(service), Some(status)) => RequestQuery::TypeStatus { service, status },
        _ => RequestQuery::Unfiltered,
    }
}

/// Fixed candidates for the service facet.
pub fn service_facet_values() -> Vec<FacetValue> {
    ServiceType::OFFERED
        .iter()
        .map(|service| FacetValue::from(service.label()))
        .collect()
}

/// Fixed candidates for the status facet.
pub fn status_facet_values() -> Vec<FacetValue> {
    RequestStatus::ALL
        .iter()
        .map(|status| FacetValue::from(status.label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(year: &str, month: &str) -> Invoice {
        Invoice {
            id: None,
            amount: 100.0,
            month: month.into(),
            year: year.into(),
            status: None,
            resident_name: None,
            flat: None,
        }
    }

    #[test]
    fn derives_distinct_values_in_first_seen_order() {
        let listing = vec![
            invoice("2024", "March"),
            invoice("2023", "March"),
            invoice("2024", "April"),
            invoice(" ", "May"),
        ];
        let years = derive_facet_values(&listing, |i| Some(i.year.clone()));
        assert_eq!(years, vec![FacetValue::from("2024"), FacetValue::from("2023")]);
    }

    #[test]
    fn blank_query_restores_the_full_set() {
        let mut catalog = FacetCatalog::new(vec!["Electrician".into(), "Plumber".into()]);
        assert_eq!(catalog.narrow("PLU").len(), 1);
        assert!(catalog.narrow("xyz").is_empty());
        assert_eq!(catalog.narrow("  ").len(), 2);
        assert_eq!(catalog.master().len(), 2);
    }

    #[test]
    fn period_query_follows_year_and_month() {
        let mut selection = FacetSelection::default();
        assert_eq!(apply_selection(&selection), PeriodQuery::All);

        selection.set(FacetDimension::Month, "March");
        assert_eq!(apply_selection(&selection), PeriodQuery::All);

        selection.set(FacetDimension::Year, "2024");
        assert_eq!(
            apply_selection(&selection),
            PeriodQuery::YearMonth {
                year: "2024".into(),
                month: "March".into()
            }
        );

        selection.unset(FacetDimension::Month);
        assert_eq!(apply_selection(&selection), PeriodQuery::Year("2024".into()));
    }

    #[test]
    fn request_query_needs_both_service_and_status() {
        let mut selection = FacetSelection::default();
        selection.set(FacetDimension::Service, "Plumber");
        assert_eq!(apply_request_selection(&selection), RequestQuery::Unfiltered);

        selection.set(FacetDimension::Status, "Pending");
        assert_eq!(
            apply_request_selection(&selection),
            RequestQuery::TypeStatus {
                service: ServiceType::Plumber,
                status: RequestStatus::Pending
            }
        );

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn local_filter_matches_every_chosen_dimension() {
        let listing = vec![
            invoice("2024", "March"),
            invoice("2024", "April"),
            invoice("2023", "March"),
        ];
        let mut selection = FacetSelection::default();
        selection.set(FacetDimension::Year, "2024");
        assert_eq!(filter_listing(&listing, &selection).len(), 2);

        selection.set(FacetDimension::Month, "march");
        let filtered = filter_listing(&listing, &selection);
        assert_eq!(filtered, vec![invoice("2024", "March")]);
        assert_eq!(listing.len(), 3);
    }
}
