use anyhow::{Context, Result};
use clap::Parser;
use memmap2::Mmap;
use std::fs::File;
use std::ops::Range;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use logxform::{PipelineMetadata, config, input, normalizer, output};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize newline-delimited JSON log records", long_about = None)]
struct Args {
    /// JSON file mapping plugin ids to {type, name, version}.
    #[arg(short, long)]
    pipelines: Option<PathBuf>,

    /// `stdout`, `json`, or a .json/.jsonl/.ndjson path.
    #[arg(short, long, default_value = "stdout")]
    output: String,

    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Approximate bytes of input per batch.
    #[arg(long, default_value = "8388608")]
    batch_bytes: usize,

    #[arg(long)]
    benchmark: bool,

    /// Log at info level (RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let start_time = Instant::now();

    let pipelines = args
        .pipelines
        .as_deref()
        .map(config::load_pipelines)
        .transpose()?;

    let file = File::open(&args.file)
        .with_context(|| format!("opening {}", args.file.display()))?;
    let file_size = file
        .metadata()
        .with_context(|| format!("reading metadata of {}", args.file.display()))?
        .len();
    // SAFETY: the input is treated as read-only for the lifetime of the map.
    let mmap = match file_size {
        0 => None,
        _ => Some(unsafe { Mmap::map(&file)? }),
    };
    let data: &[u8] = mmap.as_deref().unwrap_or_default();

    let batches = input::line_aligned_ranges(data, args.batch_bytes);
    tracing::info!(file = %args.file.display(), batches = batches.len(), "processing input");

    // channel for handing normalized batches to the writer
    let (tx, rx) = crossbeam::channel::unbounded::<Vec<logxform::LogRecord>>();

    let writer = output::create_writer(&args.output)?;
    let writer_handle = std::thread::spawn(move || -> Result<()> {
        let mut writer = writer;
        for batch in rx {
            writer.write_batch(&batch)?;
        }
        writer.finish()
    });

    let process = |batch: &Range<usize>| -> (usize, usize) {
        let decoded = process_batch(&data[batch.clone()], batch.start, pipelines.as_ref());
        let counts = (decoded.records.len(), decoded.rejected.len());
        // a closed channel means the writer failed; its error is reported on join
        let _ = tx.send(decoded.records);
        counts
    };

    #[cfg(feature = "parallel")]
    let (total_records, total_rejected) = batches
        .par_iter()
        .map(process)
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    #[cfg(not(feature = "parallel"))]
    let (total_records, total_rejected) = batches
        .iter()
        .map(process)
        .fold((0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    // close channel so the writer thread can finish
    drop(tx);
    writer_handle
        .join()
        .map_err(|_| anyhow::anyhow!("writer thread panicked"))??;

    if total_rejected > 0 {
        tracing::warn!(rejected = total_rejected, "some lines could not be decoded");
    }
    tracing::info!(records = total_records, "done");

    if args.benchmark {
        print_benchmark_results(file_size, total_records, total_rejected, start_time.elapsed());
    }

    Ok(())
}

fn process_batch(batch: &[u8], offset: usize, pipelines: Option<&PipelineMetadata>) -> input::Decoded {
    let mut decoded = input::decode_at(batch, offset);
    normalizer::normalize_all(&mut decoded.records, pipelines);
    decoded
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn print_benchmark_results(file_size: u64, total_records: usize, total_rejected: usize, duration: Duration) {
    let duration_secs = duration.as_secs_f64();
    let file_size_mb = file_size as f64 / (1024.0 * 1024.0);
    let total_lines = total_records + total_rejected;

    eprintln!("\n=== BENCHMARK RESULTS ===");
    eprintln!("File size: {:.2} MB", file_size_mb);
    eprintln!("Normalized records: {}", total_records);
    eprintln!("Rejected lines: {}", total_rejected);
    eprintln!("Processing time: {:.3}s", duration_secs);
    eprintln!("Throughput: {:.2} MB/s", file_size_mb / duration_secs);
    eprintln!("Throughput: {:.0} records/s", total_records as f64 / duration_secs);
    if total_lines > 0 {
        eprintln!(
            "Decode success rate: {:.1}%",
            (total_records as f64 / total_lines as f64) * 100.0
        );
    }
}
