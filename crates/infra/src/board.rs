//! Everything a page needs, wired over one repository.

use afgjobs_auth::Identity;
use afgjobs_core::Clock;
use afgjobs_jobs::{publish, BoardStats, JobRecord, ListingRenderer, NewJob, QueryState, SearchResults};

use crate::job_store::{DeleteError, JobRecordStore, PostJobError};
use crate::repository::Repository;
use crate::settings_store::SettingsStore;
use crate::submissions::SubmissionStore;
use crate::users::UserDirectory;

#[derive(Debug, Clone)]
pub struct JobBoard<R, C> {
    jobs: JobRecordStore<R, C>,
    settings: SettingsStore<R>,
    users: UserDirectory<R>,
    submissions: SubmissionStore<R, C>,
}

impl<R, C> JobBoard<R, C>
where
    R: Repository + Clone,
    C: Clock + Clone,
{
    pub fn new(repo: R, clock: C) -> Self {
        Self {
            jobs: JobRecordStore::new(repo.clone(), clock.clone()),
            settings: SettingsStore::new(repo.clone()),
            users: UserDirectory::new(repo.clone()),
            submissions: SubmissionStore::new(repo, clock),
        }
    }

    pub fn jobs(&self) -> &JobRecordStore<R, C> {
        &self.jobs
    }

    pub fn settings(&self) -> &SettingsStore<R> {
        &self.settings
    }

    pub fn users(&self) -> &UserDirectory<R> {
        &self.users
    }

    pub fn submissions(&self) -> &SubmissionStore<R, C> {
        &self.submissions
    }

    /// Query state for a freshly loaded list page.
    pub fn initial_query(&self, url_query: Option<&str>, controls: &QueryState) -> QueryState {
        QueryState::resolve(url_query, controls, &self.settings.load().query_defaults())
    }

    pub fn search(&self, state: &QueryState) -> SearchResults {
        SearchResults::run(&self.jobs.load_all(), state)
    }

    /// Re-run the query and hand both lists to the renderer.
    pub fn refresh<L>(&self, state: &QueryState, renderer: &mut L) -> SearchResults
    where
        L: ListingRenderer + ?Sized,
    {
        let results = self.search(state);
        publish(&results, renderer);
        results
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats::compute(&self.jobs.load_all(), &self.users.users())
    }

    /// An empty posting form prefilled from settings.
    pub fn new_job_draft(&self) -> NewJob {
        self.settings.load().posting_defaults().apply_to(NewJob::default())
    }

    /// Post as the signed-in user.
    pub fn post_job(&self, draft: NewJob) -> Result<JobRecord, PostJobError> {
        self.jobs.post_job(self.current_user().as_ref(), draft)
    }

    /// Delete as the signed-in user.
    pub fn delete_job(&self, id: &str) -> Result<JobRecord, DeleteError> {
        self.jobs.delete_by_id(id, self.current_user().as_ref())
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.users.current_user()
    }
}
