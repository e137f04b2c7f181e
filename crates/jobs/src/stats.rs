//! Headline counters shown on the landing page.

use std::collections::HashSet;

use serde::Serialize;

use afgjobs_auth::Identity;

use crate::job::JobRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub jobs_posted: usize,
    pub freelancers_active: usize,
    pub categories: usize,
}

impl BoardStats {
    /// Active freelancers are registered users plus distinct posters, each
    /// keyed by id, else email, else (postings only) display name.
    pub fn compute(jobs: &[JobRecord], users: &[Identity]) -> Self {
        let categories: HashSet<&str> = jobs
            .iter()
            .map(|job| job.category.trim())
            .filter(|c| !c.is_empty())
            .collect();

        let mut freelancers: HashSet<String> = HashSet::new();
        for user in users {
            if let Some(id) = user.user_id() {
                freelancers.insert(format!("id:{id}"));
            } else if let Some(email) = user.normalized_email() {
                freelancers.insert(format!("email:{email}"));
            }
        }
        for job in jobs {
            if let Some(id) = job.poster_id.as_ref().filter(|id| !id.is_blank()) {
                freelancers.insert(format!("id:{id}"));
            } else if let Some(email) = non_blank(job.posted_by.as_deref()) {
                freelancers.insert(format!("email:{}", email.to_lowercase()));
            } else if let Some(name) = non_blank(job.posted_by_name.as_deref()) {
                freelancers.insert(format!("name:{}", name.to_lowercase()));
            }
        }

        Self {
            jobs_posted: jobs.len(),
            freelancers_active: freelancers.len(),
            categories: categories.len(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
