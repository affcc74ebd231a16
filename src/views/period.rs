//! Listing with year/month facets, shared by the invoices and notices pages.

use serde::Serialize;

use crate::facets::{
    FacetCatalog, FacetDimension, FacetSelection, FacetValue, Faceted, PeriodQuery,
    apply_selection,
};

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct PeriodListing<T> {
    listing: Vec<T>,
    year_facet: FacetCatalog,
    month_facet: FacetCatalog,
    pub selection: FacetSelection,
}

impl<T: Faceted> PeriodListing<T> {
    pub fn new(listing: Vec<T>) -> Self {
        let mut period = Self {
            listing: Vec::new(),
            year_facet: FacetCatalog::default(),
            month_facet: FacetCatalog::default(),
            selection: FacetSelection::default(),
        };
        period.replace(listing);
        period
    }

    /// Swaps in an unfiltered listing and re-derives the facet candidates.
    pub fn replace(&mut self, listing: Vec<T>) {
        self.year_facet = FacetCatalog::from_listing(&listing, |item| {
            item.facet_value(FacetDimension::Year)
        });
        self.month_facet = FacetCatalog::from_listing(&listing, |item| {
            item.facet_value(FacetDimension::Month)
        });
        self.listing = listing;
    }

    /// Displays a search result; the candidates stay those of the last full listing.
    pub fn show(&mut self, listing: Vec<T>) {
        self.listing = listing;
    }

    pub fn listing(&self) -> &[T] {
        &self.listing
    }

    pub fn year_facet(&self) -> &FacetCatalog {
        &self.year_facet
    }

    pub fn month_facet(&self) -> &FacetCatalog {
        &self.month_facet
    }

    pub fn narrow_years(&mut self, query: &str) -> &[FacetValue] {
        self.year_facet.narrow(query)
    }

    pub fn narrow_months(&mut self, query: &str) -> &[FacetValue] {
        self.month_facet.narrow(query)
    }

    pub fn query(&self) -> PeriodQuery {
        apply_selection(&self.selection)
    }
}
