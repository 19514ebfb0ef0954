use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes `level: message` to stderr so `info`/`bestmove` stay clean on
/// stdout for the GUI. Good enough for a default; downstream users who want
/// structured logging can install their own `log::Log` before `main` runs.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(LevelFilter::Info))
        .ok();

    zero_chess::uci::run_uci_loop();
}
