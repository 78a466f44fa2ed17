use serde::Serialize;

use crate::domain::model::Job;

/// Wire representation of a job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDto {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

impl From<Job> for JobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            description: job.description,
        }
    }
}

/// `GET /jobs` success body. `jobs` is always an array, never `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobsListDto {
    pub jobs: Vec<JobDto>,
    pub count: usize,
}

impl From<Vec<Job>> for JobsListDto {
    fn from(jobs: Vec<Job>) -> Self {
        let jobs: Vec<JobDto> = jobs.into_iter().map(JobDto::from).collect();
        Self {
            count: jobs.len(),
            jobs,
        }
    }
}

/// `GET /` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthDto {
    pub message: String,
    pub status: String,
}

/// Body of every error response. Carries a fixed message only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDto {
    pub error: String,
}
