use chrono::{DateTime, Local};
use simplelog::*;
use std::fs::File;

/// Where log records go and how verbose they are
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LevelFilter,
    pub console: bool,
    /// log file name; a `{timestamp}` placeholder is replaced by the start time
    pub file: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: LevelFilter::Warn,
            console: true,
            file: None,
        }
    }
}

/// `calc_{timestamp}.log` -> `calc_2026-10-18_08-37-00.log`
pub fn expand_log_file_name(name: &str, now: DateTime<Local>) -> String {
    let date_and_time = now.format("%Y-%m-%d_%H-%M-%S").to_string();
    name.replace("{timestamp}", &date_and_time)
}

/// Initialize the global logger from the settings.
///
/// Console records go to stderr so they never mix with the calculator display.
/// Returns false when no logger was installed: nothing enabled, or a logger was
/// already set by an earlier call.
pub fn init_logger(settings: &LogSettings) -> bool {
    let level = settings.level;
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    if settings.console {
        loggers.push(TermLogger::new(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    // File logger
    if let Some(ref filename) = settings.file {
        let name = expand_log_file_name(filename, Local::now());
        match File::create(&name) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(e) => eprintln!("cannot create log file {}: {}", name, e),
        }
    }

    if loggers.is_empty() {
        return false;
    }
    CombinedLogger::init(loggers).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expand_log_file_name() {
        let now = Local.with_ymd_and_hms(2026, 10, 18, 8, 37, 5).unwrap();
        assert_eq!(
            expand_log_file_name("calc_{timestamp}.log", now),
            "calc_2026-10-18_08-37-05.log"
        );
        assert_eq!(expand_log_file_name("calc.log", now), "calc.log");
    }

    #[test]
    fn test_nothing_enabled_installs_nothing() {
        let settings = LogSettings {
            level: LevelFilter::Info,
            console: false,
            file: None,
        };
        assert!(!init_logger(&settings));
    }
}
