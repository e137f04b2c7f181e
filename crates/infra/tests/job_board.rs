//! End-to-end behaviour of the job board over real repositories.

use std::io;
use std::sync::Arc;

use afgjobs_auth::Identity;
use afgjobs_core::FixedClock;
use afgjobs_infra::{
    keys, FileRepository, InMemoryRepository, JobBoard, JobRecordStore, Repository, RepositoryError,
};
use afgjobs_jobs::{JobRecord, ListContainer, ListingRenderer, NewJob, QueryState, SortKey};

const NOW: i64 = 1_768_500_000_000;

fn memory_board() -> (Arc<InMemoryRepository>, JobBoard<Arc<InMemoryRepository>, FixedClock>) {
    afgjobs_observability::init();
    let repo = Arc::new(InMemoryRepository::new());
    let board = JobBoard::new(Arc::clone(&repo), FixedClock::at_millis(NOW));
    (repo, board)
}

fn ids(jobs: &[JobRecord]) -> Vec<i64> {
    jobs.iter().map(|j| j.id.value()).collect()
}

fn legacy_json(titles: &[&str]) -> String {
    let records: Vec<JobRecord> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            NewJob {
                title: title.to_string(),
                category: "Design".into(),
                price: 10.0,
                ..NewJob::default()
            }
            .into_record(afgjobs_core::JobId::new(100 + i as i64), FixedClock::at_millis(NOW).0)
        })
        .collect();
    serde_json::to_string(&records).unwrap()
}

fn sign_in(repo: &InMemoryRepository, id: i64, email: &str) {
    let user = Identity::new(id, email, "Poster");
    repo.set(keys::CURRENT_USER, &serde_json::to_string(&user).unwrap())
        .unwrap();
}

fn draft() -> NewJob {
    NewJob {
        title: "Shop sign painter".into(),
        category: "Design".into(),
        description: "Paint a two metre shop sign in Dari and English.".into(),
        location: "Herat".into(),
        contact: "+93 799 000 111".into(),
        poster_type: "Business".into(),
        price: 75.0,
        ..NewJob::default()
    }
}

#[test]
fn load_all_is_idempotent() {
    let (_, board) = memory_board();
    let first = board.jobs().load_all();
    let second = board.jobs().load_all();
    assert_eq!(first, second);
    assert_eq!(ids(&first), vec![-1, -2, -3]);
}

#[test]
fn legacy_migration_happens_exactly_once() {
    let (repo, board) = memory_board();
    repo.set(keys::LEGACY_JOBS, &legacy_json(&["Old A", "Old B"])).unwrap();

    let migrated = board.jobs().load_all();
    assert_eq!(ids(&migrated), vec![100, 101]);

    repo.set(keys::LEGACY_JOBS, &legacy_json(&["Changed later"])).unwrap();
    let again = board.jobs().load_all();
    assert_eq!(again, migrated);
    assert!(repo.get(keys::LEGACY_JOBS).unwrap().is_some());
}

#[test]
fn empty_legacy_list_installs_samples() {
    let (repo, board) = memory_board();
    repo.set(keys::LEGACY_JOBS, "[]").unwrap();
    assert_eq!(ids(&board.jobs().load_all()), vec![-1, -2, -3]);
}

#[test]
fn unreadable_storage_yields_empty_collection() {
    struct Unreadable;

    impl Repository for Unreadable {
        fn get(&self, _key: &str) -> Result<Option<String>, RepositoryError> {
            Err(io::Error::other("disk unplugged").into())
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), RepositoryError> {
            Err(io::Error::other("disk unplugged").into())
        }
        fn remove(&self, _key: &str) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    let store = JobRecordStore::new(Unreadable, FixedClock::at_millis(NOW));
    assert!(store.load_all().is_empty());
    assert!(!store.create(draft()));
}

#[test]
fn created_job_is_first_with_fresh_id_and_timestamp() {
    let (repo, board) = memory_board();
    sign_in(&repo, 42, "poster@example.com");

    let record = board.post_job(draft()).unwrap();
    let jobs = board.jobs().load_all();

    assert_eq!(jobs[0], record);
    assert_eq!(record.id.value(), NOW);
    assert!(record.created_at_millis() >= NOW);
    assert_eq!(ids(&jobs[1..]), vec![-1, -2, -3]);
}

#[test]
fn posting_requires_a_signed_in_user() {
    let (_, board) = memory_board();
    let err = board.post_job(draft()).unwrap_err();
    assert_eq!(err.user_message(), "Please sign in to post a job");
    assert_eq!(board.jobs().load_all().len(), 3);
}

#[test]
fn delete_respects_ownership_by_id_and_email() {
    let (repo, board) = memory_board();
    sign_in(&repo, 42, "Poster@Example.com");
    let by_id = board.post_job(draft()).unwrap();
    let by_email = board.post_job(draft()).unwrap();

    sign_in(&repo, 7, "other@example.com");
    let err = board.delete_job(&by_id.id.to_string()).unwrap_err();
    assert_eq!(err.reason(), "not-owner");
    assert_eq!(board.jobs().load_all().len(), 5);

    // Same email in a different case, different id.
    sign_in(&repo, 99, "poster@example.com");
    board.delete_job(&by_email.id.to_string()).unwrap();
    assert_eq!(ids(&board.jobs().load_all()), vec![by_id.id.value(), -1, -2, -3]);

    sign_in(&repo, 42, "new-address@example.com");
    board.delete_job(&by_id.id.to_string()).unwrap();
    assert_eq!(ids(&board.jobs().load_all()), vec![-1, -2, -3]);

    assert_eq!(board.delete_job("12345").unwrap_err().reason(), "not-found");
}

#[test]
fn quota_failure_leaves_collection_unchanged() {
    afgjobs_observability::init();
    let seeded = serde_json::to_string(&afgjobs_jobs::default_jobs()).unwrap();
    let repo = Arc::new(InMemoryRepository::with_quota(keys::JOBS.len() + seeded.len() + 50));
    let store = JobRecordStore::new(Arc::clone(&repo), FixedClock::at_millis(NOW));

    let before = store.load_all();
    assert!(!store.create(draft()));
    assert_eq!(store.load_all(), before);
}

#[test]
fn seeded_scenarios() {
    let (_, board) = memory_board();

    let translators = board.search(&QueryState::new("", "Translator", SortKey::Newest));
    assert_eq!(ids(&translators.jobs), vec![-2]);
    assert_eq!(translators.jobs[0].title, "Arabic to Dari Translator Needed");

    let bakery = board.search(&QueryState::new("BaKeRy", "All", SortKey::Newest));
    assert_eq!(ids(&bakery.jobs), vec![-1]);

    let cheapest = board.search(&QueryState::new("", "All", SortKey::BudgetLow));
    assert_eq!(ids(&cheapest.jobs), vec![-3, -2, -1]);
    assert_eq!(cheapest.count_label(), "3 jobs found");
}

#[test]
fn stored_settings_shape_the_initial_query() {
    let (repo, board) = memory_board();
    repo.set(keys::SETTINGS, r#"{"jobCategory": "Tutor", "jobSort": "budget-high"}"#)
        .unwrap();

    let controls = QueryState::cleared();
    let state = board.initial_query(None, &controls);
    assert_eq!(state.category, "Tutor");
    assert_eq!(state.sort, SortKey::BudgetHigh);

    let from_url = board.initial_query(Some("?search=math+tutor"), &controls);
    assert_eq!(from_url.search_text, "math tutor");
    assert_eq!(from_url.category, "All");

    assert_eq!(ids(&board.search(&state).jobs), vec![-3]);
}

#[test]
fn refresh_renders_full_and_featured_lists() {
    #[derive(Default)]
    struct Recorder(Vec<(ListContainer, usize)>);

    impl ListingRenderer for Recorder {
        fn render(&mut self, container: ListContainer, jobs: &[JobRecord]) {
            self.0.push((container, jobs.len()));
        }
    }

    let (repo, board) = memory_board();
    sign_in(&repo, 1, "a@example.com");
    board.post_job(draft()).unwrap();

    let mut recorder = Recorder::default();
    let results = board.refresh(&QueryState::cleared(), &mut recorder);
    assert_eq!(results.len(), 4);
    assert_eq!(
        recorder.0,
        vec![(ListContainer::JobsList, 4), (ListContainer::FeaturedList, 3)]
    );
}

#[test]
fn stats_and_draft_defaults() {
    let (repo, board) = memory_board();
    repo.set(
        keys::USERS,
        r#"[{"id": 1, "email": "a@example.com"}, {"email": "B@example.com"}]"#,
    )
    .unwrap();
    repo.set(keys::SETTINGS, r#"{"defaultCurrency": "AFN", "defaultOnline": true}"#)
        .unwrap();

    let stats = board.stats();
    assert_eq!(stats.jobs_posted, 3);
    assert_eq!(stats.categories, 3);
    // Two users plus three named sample posters.
    assert_eq!(stats.freelancers_active, 5);

    let draft = board.new_job_draft();
    assert_eq!(draft.currency, "AFN");
    assert_eq!(draft.poster_type, "Company");
    assert!(draft.is_online);
}

#[test]
fn file_backed_board_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::at_millis(NOW);
    let user = Identity::new(5_i64, "file@example.com", "File User");

    let created = {
        let repo = Arc::new(FileRepository::open(dir.path(), None).unwrap());
        let store = JobRecordStore::new(repo, clock);
        store.post_job(Some(&user), draft()).unwrap()
    };

    let repo = Arc::new(FileRepository::open(dir.path(), None).unwrap());
    let store = JobRecordStore::new(repo, clock);
    let jobs = store.load_all();
    assert_eq!(jobs.len(), 4);
    assert_eq!(jobs[0].id, created.id);
    assert_eq!(store.get_by_id(&created.id.to_string()).unwrap().title, "Shop sign painter");
}
