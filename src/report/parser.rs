//! Line-oriented parser that segments a Ginkgo text log into test cases.

use std::fmt::Write as _;
use std::io::{self, BufRead};

use chrono::Local;
use tracing::{debug, trace};

use super::{TestCase, TestReport, TestStatus};

/// A line containing this run of dashes separates two test cases.
pub const SEPARATOR: &str = "------------------------------";
/// Marks a skipped test case.
pub const SKIPPED_MARKER: &str = "[SKIPPED]";
/// Marks a failed test case.
pub const FAILED_MARKER: &str = "[FAILED]";
/// Marks the start of the test body; later lines are never part of the title.
pub const ENTRY_MARKER: &str = "> Enter";
/// Starts the trailing summary block, whose segments are not test cases.
pub const SUMMARIZING_MARKER: &str = "Summarizing";

/// Default `generated_at` format.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where the scan is in the log. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanPhase {
    /// Before the first separator; lines are run configuration.
    Preamble,
    /// Collecting test cases.
    Cases,
    /// Inside the trailing summary; segments are dropped.
    Summarizing,
}

/// Whether lines may still contribute to the segment title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TitleCollection {
    #[default]
    Collecting,
    Closed,
}

/// A test case under construction.
#[derive(Debug, Default)]
struct Segment {
    log: String,
    title_lines: Vec<String>,
    status: Option<TestStatus>,
    title: TitleCollection,
}

impl Segment {
    fn push_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');

        if line.contains(SKIPPED_MARKER) {
            self.status = Some(TestStatus::Skip);
        } else if line.contains(FAILED_MARKER) {
            self.status = Some(TestStatus::Fail);
        }

        if line.contains(ENTRY_MARKER) {
            self.title = TitleCollection::Closed;
        }

        // Lines with a '/' are file paths or stack frames.
        if self.title == TitleCollection::Collecting
            && !line.is_empty()
            && !line.contains(SKIPPED_MARKER)
            && !line.contains('/')
        {
            self.title_lines.push(line.to_string());
        }
    }

    /// Build the finished case. The status is `None` when no marker was seen.
    fn finish(self) -> (TestCase, Option<TestStatus>) {
        let case = TestCase {
            title: self.title_lines.join(", "),
            status: self.status.unwrap_or_default(),
            log_content: self.log,
            has_enter: self.title == TitleCollection::Closed,
        };
        (case, self.status)
    }
}

/// Incremental scan state over one log.
struct Scan {
    phase: ScanPhase,
    current: Option<Segment>,
    report: TestReport,
    /// Cases finalized without any status marker.
    unmarked: usize,
}

impl Scan {
    fn new(generated_at: String) -> Self {
        Self {
            phase: ScanPhase::Preamble,
            current: None,
            report: TestReport::new(generated_at),
            unmarked: 0,
        }
    }

    fn feed(&mut self, line: &str) {
        if self.phase == ScanPhase::Preamble {
            if line.contains(SEPARATOR) {
                debug!("preamble ended, scanning test cases");
                self.phase = ScanPhase::Cases;
                self.current = Some(Segment::default());
            }
            return;
        }

        if self.phase == ScanPhase::Cases && line.contains(SUMMARIZING_MARKER) {
            debug!(
                cases = self.report.test_cases.len(),
                "entered summarizing section, remaining segments are dropped"
            );
            self.phase = ScanPhase::Summarizing;
        }

        if line.contains(SEPARATOR) {
            self.close_segment();
            self.current = Some(Segment::default());
            return;
        }

        if let Some(segment) = self.current.as_mut() {
            segment.push_line(line);
        }
    }

    fn close_segment(&mut self) {
        let Some(segment) = self.current.take() else {
            return;
        };
        if self.phase == ScanPhase::Summarizing {
            return;
        }

        let (case, marked) = segment.finish();
        trace!(title = %case.title, status = %case.status, "finalized test case");
        match marked {
            Some(status) => self.report.record(status),
            None => self.unmarked += 1,
        }
        self.report.test_cases.push(case);
    }

    fn finish(mut self) -> TestReport {
        self.close_segment();

        // Unmarked cases already carry the default status; count them as passed.
        self.report.passed_tests += self.unmarked;
        self.report.reconcile();

        debug!(
            total = self.report.total_tests,
            passed = self.report.passed_tests,
            failed = self.report.failed_tests,
            skipped = self.report.skipped_tests,
            "parsed test log"
        );
        self.report
    }
}

/// Parses Ginkgo text output into a [`TestReport`].
///
/// Parsing never fails: lines without any recognised marker are kept as log
/// payload, and a case with no marker defaults to [`TestStatus::Pass`].
#[derive(Debug, Clone)]
pub struct LogParser {
    timestamp_format: String,
}

impl LogParser {
    /// Create a parser stamping reports with the default timestamp format.
    pub fn new() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    /// Use a custom `strftime` format for `generated_at`.
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Parse a sequence of lines (without trailing newlines).
    pub fn parse<I, S>(&self, lines: I) -> TestReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse_at(lines, self.timestamp())
    }

    /// Parse a sequence of lines with a fixed `generated_at` value.
    pub fn parse_at<I, S>(&self, lines: I, generated_at: impl Into<String>) -> TestReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scan = Scan::new(generated_at.into());
        for line in lines {
            scan.feed(line.as_ref());
        }
        scan.finish()
    }

    /// Parse a whole log held in memory.
    pub fn parse_str(&self, text: &str) -> TestReport {
        self.parse(text.lines())
    }

    /// Parse lines read from `reader`.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD. Only a
    /// failure of the reader itself is reported.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> io::Result<TestReport> {
        let mut scan = Scan::new(self.timestamp());
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            scan.feed(&String::from_utf8_lossy(strip_line_ending(&buf)));
        }
        Ok(scan.finish())
    }

    fn timestamp(&self) -> String {
        let now = Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.timestamp_format)).is_err() {
            out = now.format(DEFAULT_TIMESTAMP_FORMAT).to_string();
        }
        out
    }
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => line,
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&str]) -> TestReport {
        LogParser::new().parse_at(lines.iter().copied(), "2024-01-01 00:00:00")
    }

    #[test]
    fn test_no_separator_yields_no_cases() {
        let report = parse(&["Running Suite: Demo", "Random Seed: 42", "[FAILED] nope"]);
        assert!(report.test_cases.is_empty());
        assert_eq!(report.total_tests, 0);
        assert_eq!(report.passed_tests, 0);
        assert_eq!(report.failed_tests, 0);
        assert_eq!(report.skipped_tests, 0);
    }

    #[test]
    fn test_preamble_is_discarded() {
        let report = parse(&["Suite config", "Will run 1 of 1 specs", SEPARATOR, "Case A"]);
        assert_eq!(report.test_cases.len(), 1);
        assert_eq!(report.test_cases[0].title, "Case A");
        assert_eq!(report.test_cases[0].log_content, "Case A\n");
    }

    #[test]
    fn test_status_classification() {
        let report = parse(&[
            SEPARATOR,
            "Fails",
            "  [FAILED] expected true",
            SEPARATOR,
            "Skips",
            "  [SKIPPED] not today",
            SEPARATOR,
            "Passes",
        ]);
        let statuses: Vec<_> = report.test_cases.iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![TestStatus::Fail, TestStatus::Skip, TestStatus::Pass]
        );
        assert_eq!(report.failed_tests, 1);
        assert_eq!(report.skipped_tests, 1);
        assert_eq!(report.passed_tests, 1);
        assert_eq!(report.total_tests, 3);
    }

    #[test]
    fn test_last_marker_line_wins() {
        let report = parse(&[SEPARATOR, "[SKIPPED] first", "[FAILED] second"]);
        assert_eq!(report.test_cases[0].status, TestStatus::Fail);

        let report = parse(&[SEPARATOR, "[FAILED] first", "[SKIPPED] second"]);
        assert_eq!(report.test_cases[0].status, TestStatus::Skip);
    }

    #[test]
    fn test_skip_wins_within_a_line() {
        let report = parse(&[SEPARATOR, "[FAILED] and [SKIPPED]"]);
        assert_eq!(report.test_cases[0].status, TestStatus::Skip);
        assert_eq!(report.skipped_tests, 1);
    }

    #[test]
    fn test_title_skips_path_lines() {
        let report = parse(&[
            SEPARATOR,
            "Alpha",
            "path/to/file",
            "Beta",
            "> Enter [It] works",
        ]);
        assert_eq!(report.test_cases[0].title, "Alpha, Beta");
        assert!(report.test_cases[0].has_enter);
    }

    #[test]
    fn test_title_closed_after_entry_marker() {
        let report = parse(&[SEPARATOR, "X", "> Enter", "Y"]);
        assert_eq!(report.test_cases[0].title, "X");
    }

    #[test]
    fn test_title_excludes_empty_and_skipped_lines() {
        let report = parse(&[SEPARATOR, "", "Suite", "[SKIPPED] later", "", "It"]);
        assert_eq!(report.test_cases[0].title, "Suite, It");
        assert_eq!(report.test_cases[0].status, TestStatus::Skip);
    }

    #[test]
    fn test_failed_line_with_location_has_empty_title() {
        let report = parse(&[SEPARATOR, "[FAILED] in [It] - /src/suite_test.go:42"]);
        assert_eq!(report.test_cases[0].title, "");
        assert_eq!(report.test_cases[0].status, TestStatus::Fail);
    }

    #[test]
    fn test_empty_segment() {
        let report = parse(&[SEPARATOR, SEPARATOR, "Next"]);
        assert_eq!(report.test_cases.len(), 2);
        let empty = &report.test_cases[0];
        assert_eq!(empty.title, "");
        assert_eq!(empty.status, TestStatus::Pass);
        assert_eq!(empty.log_content, "");
        assert!(!empty.has_enter);
        assert_eq!(report.passed_tests, 2);
    }

    #[test]
    fn test_trailing_separator_yields_empty_case() {
        let report = parse(&[SEPARATOR, "Only", SEPARATOR]);
        assert_eq!(report.test_cases.len(), 2);
        assert_eq!(report.test_cases[1].log_content, "");
    }

    #[test]
    fn test_summarizing_drops_later_segments() {
        let report = parse(&[
            SEPARATOR,
            "One",
            SEPARATOR,
            "Two",
            "[FAILED] boom",
            SEPARATOR,
            "Three",
            SEPARATOR,
            "Summarizing 1 Failure:",
            "  [FAIL] Two",
            SEPARATOR,
            "Four",
            "[FAILED] after summary",
        ]);
        assert_eq!(report.test_cases.len(), 3);
        let titles: Vec<_> = report.test_cases.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two, [FAILED] boom", "Three"]);
        assert_eq!(report.failed_tests, 1);
        assert_eq!(report.passed_tests, 2);
        assert_eq!(report.total_tests, 3);
    }

    #[test]
    fn test_summarizing_on_separator_line_drops_open_segment() {
        let summary = format!("Summarizing {SEPARATOR}");
        let report = parse(&[SEPARATOR, "One", summary.as_str()]);
        assert!(report.test_cases.is_empty());
    }

    #[test]
    fn test_log_content_is_verbatim() {
        let report = parse(&[SEPARATOR, "  indented\ttab", "", "<b>&</b>  "]);
        assert_eq!(
            report.test_cases[0].log_content,
            "  indented\ttab\n\n<b>&</b>  \n"
        );
    }

    #[test]
    fn test_parse_reader_matches_parse() {
        let text = format!("pre\n{SEPARATOR}\nA\n[FAILED] x\n{SEPARATOR}\r\nB\r\n");
        let parser = LogParser::new();
        let from_reader = parser.parse_reader(text.as_bytes()).unwrap();
        let from_lines = parser.parse_at(text.lines(), from_reader.generated_at.clone());
        assert_eq!(from_reader, from_lines);
        assert_eq!(from_reader.test_cases[1].log_content, "B\n");
    }

    #[test]
    fn test_parse_reader_replaces_invalid_utf8() {
        let mut bytes = format!("pre\n{SEPARATOR}\nSuite\nworks\n").into_bytes();
        bytes.extend_from_slice(b"binary output: \xff\xfe\n[FAILED] boom\n");

        let report = LogParser::new().parse_reader(bytes.as_slice()).unwrap();

        assert_eq!(report.test_cases.len(), 1);
        let case = &report.test_cases[0];
        assert_eq!(case.status, TestStatus::Fail);
        assert!(case.title.starts_with("Suite, works"));
        assert!(case.log_content.contains("binary output: \u{FFFD}\u{FFFD}\n"));
        assert_eq!(report.failed_tests, 1);
        assert_eq!(report.total_tests, 1);
    }

    #[test]
    fn test_parse_reader_last_line_without_newline() {
        let text = format!("{SEPARATOR}\nA\r\nB");
        let report = LogParser::new().parse_reader(text.as_bytes()).unwrap();
        assert_eq!(report.test_cases[0].log_content, "A\nB\n");
        assert_eq!(report.test_cases[0].title, "A, B");
    }

    struct BrokenReader;

    impl io::Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_parse_reader_propagates_read_failure() {
        let err = LogParser::new()
            .parse_reader(io::BufReader::new(BrokenReader))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(err.to_string(), "device gone");
    }

    #[test]
    fn test_custom_timestamp_format() {
        let report = LogParser::new()
            .with_timestamp_format("%Y")
            .parse_str("no cases here");
        assert_eq!(report.generated_at.len(), 4);
        assert!(report.generated_at.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back() {
        let report = LogParser::new()
            .with_timestamp_format("%Q")
            .parse_str("");
        assert_eq!(report.generated_at.len(), "2024-01-01 00:00:00".len());
    }
}
