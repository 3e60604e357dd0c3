use std::fs;
use std::sync::Arc;

use chrono::Local;
use lantern::logger::{DailyLogger, LogSink};
use tempfile::TempDir;

#[test]
fn test_logger_creates_directory_and_dated_file() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("nested/logs");

    let logger = DailyLogger::open(&log_dir).unwrap();
    logger.log("127.0.0.1 GET /");

    let today = Local::now().date_naive();
    let path = logger.path_for(today);
    assert_eq!(path, log_dir.join(format!("{}.log", today.format("%Y-%m-%d"))));

    let content = fs::read_to_string(&path).unwrap();
    let line = content.lines().next().unwrap();
    assert!(line.starts_with('['));
    assert!(line.ends_with("] 127.0.0.1 GET /"));
    // [YYYY-MM-DD HH:MM:SS.fff]
    assert_eq!(line.find(']'), Some(24));
}

#[test]
fn test_logger_appends_across_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let logger = DailyLogger::open(dir.path()).unwrap();
        logger.log("first");
    }
    let logger = DailyLogger::open(dir.path()).unwrap();
    logger.log("second");

    let path = logger.path_for(Local::now().date_naive());
    let content = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("first"));
    assert!(lines[1].ends_with("second"));
}

#[test]
fn test_logger_concurrent_lines_stay_whole() {
    let dir = TempDir::new().unwrap();
    let logger: Arc<dyn LogSink> = Arc::new(DailyLogger::open(dir.path()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            std::thread::spawn(move || {
                for i in 0..50 {
                    logger.log(&format!("thread-{}-line-{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let path = dir
        .path()
        .join(format!("{}.log", Local::now().format("%Y-%m-%d")));
    let content = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 400);
    assert!(lines.iter().all(|l| l.contains("] thread-")));
}
