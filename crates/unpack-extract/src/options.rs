use std::path::PathBuf;

/// Copy buffer size per archive task.
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 20;

#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Directory extracted entries are written into.
    pub output_dir: PathBuf,
    /// Maximum number of archives processed at once.
    pub concurrency: usize,
    pub buffer_size: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            concurrency: num_cpus::get(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ExtractOptions {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit;
        self
    }

    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    /// The limit actually applied; never zero.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    pub(crate) fn allocate_buffer(&self) -> Vec<u8> {
        vec![0u8; self.buffer_size.max(1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.output_dir, PathBuf::from("."));
        assert_eq!(options.buffer_size, DEFAULT_BUFFER_SIZE);
        assert!(options.concurrency >= 1);
    }

    #[test]
    fn builder_overrides() {
        let options = ExtractOptions::default()
            .output_dir("/tmp/out")
            .concurrency(3)
            .buffer_size(4096);
        assert_eq!(options.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(options.concurrency, 3);
        assert_eq!(options.allocate_buffer().len(), 4096);
    }

    #[test]
    fn zero_limits_are_clamped() {
        let options = ExtractOptions::default().concurrency(0).buffer_size(0);
        assert_eq!(options.effective_concurrency(), 1);
        assert_eq!(options.allocate_buffer().len(), 1);
    }
}
