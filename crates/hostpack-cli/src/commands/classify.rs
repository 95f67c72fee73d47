//! `hostpack classify` — Classify candidate bundle files.
//!
//! Each file is checked against the target's exclusion rules and then
//! sniffed for a native image header. Files are spread over a pool of
//! worker threads; each worker opens its own handles.

use std::path::{Path, PathBuf};

use anyhow::Context;
use crossbeam::channel;
use hostpack_bundle::TargetInfo;

use super::TargetArgs;
use crate::output::{resolve_color_choice, StyledOutput};

/// A file to classify, with its path relative to the bundle root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    pub relative: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Excluded,
    Native,
    Other,
}

impl Classification {
    fn label(self) -> &'static str {
        match self {
            Classification::Excluded => "excluded",
            Classification::Native => "native",
            Classification::Other => "other",
        }
    }
}

pub fn execute(
    paths: Vec<String>,
    args: TargetArgs,
    jobs: Option<usize>,
    color: &str,
) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let info = args.resolve(&cwd)?;

    let mut candidates = Vec::new();
    for path in &paths {
        candidates.extend(collect_candidates(Path::new(path))?);
    }
    candidates.sort();

    let jobs = jobs.unwrap_or_else(num_cpus::get).max(1);
    tracing::debug!(files = candidates.len(), jobs, policy = %info, "classifying");
    let results = classify_all(&info, candidates, jobs)?;

    let mut out = StyledOutput::new(resolve_color_choice(color));
    out.bold(&info.to_string());
    out.newline();

    let (mut native, mut other, mut excluded) = (0usize, 0usize, 0usize);
    for (candidate, class) in &results {
        let label = format!("{:<9}", class.label());
        match class {
            Classification::Native => {
                native += 1;
                out.success(&label);
            }
            Classification::Excluded => {
                excluded += 1;
                out.warning(&label);
            }
            Classification::Other => {
                other += 1;
                out.plain(&label);
            }
        }
        out.plain(&candidate.relative);
        out.newline();
    }

    out.info(&format!(
        "{} files: {} native, {} other, {} excluded (alignment {})",
        results.len(),
        native,
        other,
        excluded,
        info.assembly_alignment()
    ));
    out.newline();
    out.flush();

    Ok(())
}

/// Expand `path` into candidates. A directory contributes every file below
/// it, relative to the directory; a file contributes its own name.
pub fn collect_candidates(path: &Path) -> anyhow::Result<Vec<Candidate>> {
    if path.is_file() {
        let relative = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Ok(vec![Candidate {
            relative,
            path: path.to_path_buf(),
        }]);
    }

    if !path.is_dir() {
        anyhow::bail!("No such file or directory: {}", path.display());
    }

    let pattern = format!(
        "{}/**/*",
        glob::Pattern::escape(&path.to_string_lossy())
    );
    let mut candidates = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("Invalid path: {}", path.display()))? {
        let file = match entry {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !file.is_file() {
            continue;
        }
        let relative = file
            .strip_prefix(path)
            .unwrap_or(&file)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        candidates.push(Candidate {
            relative,
            path: file,
        });
    }
    Ok(candidates)
}

/// Classify `candidates` on `jobs` worker threads, preserving input order.
pub fn classify_all(
    info: &TargetInfo,
    candidates: Vec<Candidate>,
    jobs: usize,
) -> anyhow::Result<Vec<(Candidate, Classification)>> {
    classify_with(candidates, jobs, |candidate| classify_one(info, candidate))
}

/// Run `classify` over `candidates` on `jobs` worker threads. Fails if any
/// worker panics.
fn classify_with<F>(
    candidates: Vec<Candidate>,
    jobs: usize,
    classify: F,
) -> anyhow::Result<Vec<(Candidate, Classification)>>
where
    F: Fn(&Candidate) -> Classification + Sync,
{
    let total = candidates.len();
    let (job_tx, job_rx) = channel::unbounded::<(usize, Candidate)>();
    let (result_tx, result_rx) = channel::unbounded();

    for job in candidates.into_iter().enumerate() {
        // The receiver is alive until the scope below ends.
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    let scoped = crossbeam::scope(|scope| {
        for _ in 0..jobs.min(total.max(1)) {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let classify = &classify;
            scope.spawn(move |_| {
                for (index, candidate) in job_rx.iter() {
                    let class = classify(&candidate);
                    let _ = result_tx.send((index, candidate, class));
                }
            });
        }
    });
    drop(result_tx);
    if scoped.is_err() {
        anyhow::bail!("classification worker panicked");
    }

    let mut results: Vec<(usize, Candidate, Classification)> = result_rx.iter().collect();
    results.sort_by_key(|(index, _, _)| *index);
    Ok(results
        .into_iter()
        .map(|(_, candidate, class)| (candidate, class))
        .collect())
}

fn classify_one(info: &TargetInfo, candidate: &Candidate) -> Classification {
    if info.should_exclude(&candidate.relative) {
        Classification::Excluded
    } else if info.is_native_binary(&candidate.path) {
        Classification::Native
    } else {
        Classification::Other
    }
}
