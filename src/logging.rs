use env_logger::{Env, Target};
use log::{Level, Log, Metadata, Record, SetLoggerError};

/// Status lines go to stdout, failures (warn and above) to stderr
pub struct SplitLogger<O, E> {
    out: O,
    err: E,
}

impl<O: Log, E: Log> SplitLogger<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    fn pick(&self, level: Level) -> &dyn Log {
        if level <= Level::Warn {
            &self.err
        } else {
            &self.out
        }
    }
}

impl<O: Log, E: Log> Log for SplitLogger<O, E> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.pick(metadata.level()).enabled(metadata)
    }

    fn log(&self, record: &Record) {
        self.pick(record.level()).log(record)
    }

    fn flush(&self) {
        self.out.flush();
        self.err.flush();
    }
}

/// Both halves honor `RUST_LOG`, defaulting to `info`
pub fn setup() -> Result<(), SetLoggerError> {
    let env = || Env::default().default_filter_or("info");
    let out = env_logger::Builder::from_env(env())
        .target(Target::Stdout)
        .build();
    let err = env_logger::Builder::from_env(env())
        .target(Target::Stderr)
        .build();

    let max_level = out.filter().max(err.filter());
    log::set_boxed_logger(Box::new(SplitLogger::new(out, err)))?;
    log::set_max_level(max_level);
    Ok(())
}
