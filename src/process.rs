use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::{
    sync::Semaphore,
    task::{spawn_blocking, JoinSet},
};
use tracing::{error, warn};

use crate::output::write_records;
use crate::parse::parse_score_table;
use crate::record::ScoreRecord;
use crate::request::{request_score_page, score_url};
use crate::{info_time, Result, DEFAULT_BASE_URL, DEFAULT_THREADS, DEFAULT_YEAR, FILE_PATH};

/// Everything a scraping run needs.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub start: u64,
    /// Inclusive.
    pub end: u64,
    pub threads: usize,
    pub year: u16,
    pub base_url: String,
    pub output: PathBuf,
}

impl ScrapeOptions {
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            threads: DEFAULT_THREADS,
            year: DEFAULT_YEAR,
            base_url: DEFAULT_BASE_URL.to_string(),
            output: PathBuf::from(FILE_PATH),
        }
    }
}

/// Scrapes every id in `start..=end` and writes the successful records to the output file.
/// Returns the number of rows written.
pub async fn process_range(opts: &ScrapeOptions) -> Result<usize> {
    let start_time = Local::now();
    let client = Client::builder().build()?;

    if opts.start > opts.end {
        warn!(
            start = opts.start,
            end = opts.end,
            "start is past end, nothing to fetch"
        );
    }
    info_time!(
        "Started scraping ids {}..={} with {} workers",
        opts.start,
        opts.end,
        opts.threads
    );

    let base_url: Arc<str> = Arc::from(opts.base_url.as_str());
    let year = opts.year;
    let records = collect_records(opts.start..=opts.end, opts.threads, move |id| {
        let client = client.clone();
        let base_url = base_url.clone();
        async move { lookup_score(&client, &base_url, year, id).await }
    })
    .await;
    info_time!(start_time, "Finished PROCESSING ALL ids.");

    let local_now = Local::now();
    write_records(&opts.output, &records)?;
    info_time!(
        local_now,
        "Wrote {} records to file: {}",
        records.len(),
        opts.output.display()
    );

    Ok(records.len())
}

/// Fetches, parses and normalizes the score page of a single id.
pub async fn lookup_score(client: &Client, base_url: &str, year: u16, id: u64) -> Result<ScoreRecord> {
    let html = request_score_page(client, &score_url(base_url, id, year)).await?;

    // `Html` is not `Send`, parse on the blocking pool.
    let scores = spawn_blocking(move || parse_score_table(&html)).await??;
    ScoreRecord::normalize(id, scores.into_iter().map(|(subject, score)| (subject, Some(score))))
}

/// Runs `lookup` for every id with at most `workers` lookups in flight.
/// Failed lookups are logged and dropped. Records come back in completion order.
pub async fn collect_records<I, F, Fut>(ids: I, workers: usize, lookup: F) -> Vec<ScoreRecord>
where
    I: IntoIterator<Item = u64>,
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<ScoreRecord>> + Send + 'static,
{
    let permits = Arc::new(Semaphore::new(workers.max(1)));
    let mut task_set = JoinSet::new();

    for id in ids {
        let permits = permits.clone();
        let lookup = lookup(id);
        task_set.spawn(async move {
            // The semaphore is never closed.
            let _permit = permits.acquire_owned().await.ok();
            (id, lookup.await)
        });
    }

    let total = task_set.len();
    let progress = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}]") {
        progress.set_style(style);
    }

    let mut records = Vec::with_capacity(total);
    while let Some(task) = task_set.join_next().await {
        match task {
            Ok((_, Ok(record))) => records.push(record),
            Ok((id, Err(e))) => progress.suspend(|| warn!(id, error = %e, "no record for id")),
            Err(e) => progress.suspend(|| error!(error = %e, "lookup task failed")),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    records
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::Error;

    fn math_record(id: u64) -> Result<ScoreRecord> {
        ScoreRecord::normalize(id, [("Toán", Some(format!("{}.0", id % 10)))])
    }

    #[tokio::test]
    async fn single_id_range_processes_exactly_one() {
        let calls = Arc::new(AtomicUsize::new(0));
        let records = collect_records(5..=5, 10, {
            let calls = calls.clone();
            move |id| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move { math_record(id) }
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 5);
    }

    #[tokio::test]
    async fn failures_do_not_affect_siblings() {
        let records = collect_records(1..=10, 3, |id| async move {
            if id % 3 == 0 {
                Err(Error::MissingTable("table.e-table".into()))
            } else {
                math_record(id)
            }
        })
        .await;

        let mut ids = records.iter().map(|r| r.id).collect::<Vec<_>>();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 4, 5, 7, 8, 10]);
    }

    #[tokio::test]
    async fn panicking_task_is_dropped() {
        let records = collect_records(1..=4, 2, |id| async move {
            if id == 2 {
                panic!("boom");
            }
            math_record(id)
        })
        .await;
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.id != 2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn in_flight_lookups_are_bounded() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let records = collect_records(1..=20, 3, {
            let active = active.clone();
            let peak = peak.clone();
            move |id| {
                let active = active.clone();
                let peak = peak.clone();
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                    math_record(id)
                }
            }
        })
        .await;

        assert_eq!(records.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn empty_range_yields_nothing() {
        #[allow(clippy::reversed_empty_ranges)]
        let records = collect_records(10..=9, 4, |id| async move { math_record(id) }).await;
        assert!(records.is_empty());
    }
}
