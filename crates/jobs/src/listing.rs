//! Boundary to the presentation layer.
//!
//! Rendering itself lives outside this crate; it receives ordered postings
//! for a named container and must show a zero-state when the slice is empty.

use crate::job::JobRecord;
use crate::search::SearchResults;

/// Where a list of postings is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListContainer {
    JobsList,
    FeaturedList,
}

impl ListContainer {
    pub fn element_id(&self) -> &'static str {
        match self {
            ListContainer::JobsList => "jobs-list",
            ListContainer::FeaturedList => "featured-list",
        }
    }
}

/// Presentation adapter.
pub trait ListingRenderer {
    fn render(&mut self, container: ListContainer, jobs: &[JobRecord]);
}

impl<R: ListingRenderer + ?Sized> ListingRenderer for &mut R {
    fn render(&mut self, container: ListContainer, jobs: &[JobRecord]) {
        (**self).render(container, jobs)
    }
}

pub fn count_label(count: usize) -> String {
    format!("{count} jobs found")
}

/// Hand a pipeline result to the renderer: the full list, then the featured strip.
pub fn publish<R: ListingRenderer + ?Sized>(results: &SearchResults, renderer: &mut R) {
    renderer.render(ListContainer::JobsList, &results.jobs);
    renderer.render(ListContainer::FeaturedList, results.featured());
}
