use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use unpack_extract::ProgressSink;

const PB_STYLE: &str = "{msg:.green} {wide_bar:.cyan/blue} {percent:>3}% {eta} {spinner:.blue}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

const MESSAGE: &str = "Unpacking...";

static PB_TEMPLATE: Lazy<ProgressStyle> = Lazy::new(|| {
    ProgressStyle::with_template(PB_STYLE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_chars(TICK)
        .progress_chars(PB_CHARS)
});

/// Archive-count progress bar on stderr.
///
/// Draws nothing when stderr is not a terminal.
pub struct ProgressTracker {
    pb: ProgressBar,
}

impl ProgressTracker {
    pub fn new(len: u64) -> Self {
        let pb = ProgressBar::new(len);
        pb.set_style(PB_TEMPLATE.clone());
        pb.set_message(MESSAGE);
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        ProgressTracker { pb }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.pb
    }

    pub fn finish(&self, msg: Option<String>) {
        match msg {
            Some(msg) => self.pb.finish_with_message(msg),
            None => self.pb.finish(),
        }
    }
}

impl ProgressSink for ProgressTracker {
    fn set_total(&self, total: u64) {
        self.pb.set_length(total);
    }

    fn increment(&self) {
        self.pb.inc(1);
    }
}
