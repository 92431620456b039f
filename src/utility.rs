use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(
            " {msg} {wide_bar} {human_pos}/{human_len} {per_sec} {elapsed_precise}/{duration_precise}",
        )
        .unwrap(),
    );
    bar
}

pub fn get_progressspinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(job_name.to_string());
    spinner.set_style(ProgressStyle::with_template(" {spinner} {msg} {human_pos} settled").unwrap());
    spinner
}

/// Observer for the searches that advances `spinner` once per settled vertex.
pub fn spinner_observer<'a, V: 'a>(spinner: &'a ProgressBar) -> impl FnMut(&V, &V) + 'a {
    move |_: &V, _: &V| spinner.inc(1)
}

/// Logs to stderr, filtered by `RUST_LOG` and `info` if that is not set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
