use crate::aggregate::Aggregator;
use crate::config::{FameConfig, IdentityMode};
use crate::error::Result;
use crate::filter::FileFilter;
use crate::git::{GitCli, GitRepo, HistorySource};
use crate::languages::LanguageTable;
use crate::model::{AuthorStats, FileTask, RepoContext};
use crate::parse::{parse_history, OwnershipParser};
use crate::pool::WorkerPool;
use crate::rank::rank;
use crate::report::write_report;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufWriter};
use std::sync::Arc;

pub fn exec(config: &FameConfig) -> anyhow::Result<()> {
    let languages = LanguageTable::from_optional_path(config.languages_file.as_deref())
        .context("Failed to load language table")?;
    let filter = FileFilter::from_config(config, &languages).context("Invalid file filter")?;

    let repo = GitRepo::open(Some(&config.repository)).context("Failed to open git repository")?;
    let commit = repo
        .resolve_revision(&config.revision)
        .context("Failed to resolve revision")?;
    let files = repo
        .list_files(&commit)
        .context("Failed to list files at revision")?;

    let context = Arc::new(RepoContext::new(repo.path(), commit));
    let tasks = select_tasks(files, &filter, &context);
    tracing::info!(
        files = tasks.len(),
        workers = config.workers,
        revision = %context.revision,
        "collecting ownership"
    );

    let stats = collect_stats(&tasks, &GitCli::new(), config)
        .context("Failed to collect statistics")?;
    let ranked = rank(stats, config.sort_key);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&mut out, &ranked, config.format).context("Failed to write report")?;
    Ok(())
}

pub fn select_tasks(
    files: Vec<String>,
    filter: &FileFilter,
    context: &Arc<RepoContext>,
) -> Vec<FileTask> {
    files
        .into_iter()
        .filter(|path| !path.trim().is_empty())
        .filter(|path| {
            let keep = filter.qualifies(path);
            if !keep {
                tracing::debug!(%path, "filtered out");
            }
            keep
        })
        .map(|path| FileTask::new(path, Arc::clone(context)))
        .collect()
}

/// Runs every task on the worker pool and returns the unranked per-author totals.
pub fn collect_stats(
    tasks: &[FileTask],
    source: &dyn HistorySource,
    config: &FameConfig,
) -> Result<Vec<AuthorStats>> {
    let pool = WorkerPool::new(config.workers)?;
    let aggregator = Aggregator::new();
    let pb = progress_bar(tasks.len(), config.progress);

    let outcome = pool.run(tasks, |task| {
        process_file(task, source, config.identity, &aggregator)?;
        pb.inc(1);
        Ok(())
    });
    pb.finish_and_clear();
    outcome?;

    Ok(aggregator.into_stats())
}

/// Fetches and parses one file, folding its events into `aggregator`.
pub fn process_file(
    task: &FileTask,
    source: &dyn HistorySource,
    identity: IdentityMode,
    aggregator: &Aggregator,
) -> Result<()> {
    let span = tracing::debug_span!("file", path = %task.path);
    let _enter = span.enter();

    let ownership = source.ownership(task)?;
    if ownership.trim().is_empty() {
        let log = source.history(task)?;
        let mut file = aggregator.begin_file();
        if let Some(event) = parse_history(&log, identity) {
            file.apply(&event);
        }
        file.finish();
        return Ok(());
    }

    let mut parser = OwnershipParser::new(identity);
    for line in ownership.lines() {
        parser.push_line(line);
    }
    if parser.skipped_lines() > 0 {
        tracing::warn!(lines = parser.skipped_lines(), "lines left unattributed");
    }

    let mut file = aggregator.begin_file();
    for event in parser.finish() {
        file.apply(&event);
    }
    tracing::debug!(authors = file.touched(), "file done");
    file.finish();
    Ok(())
}

fn progress_bar(len: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} files")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}
