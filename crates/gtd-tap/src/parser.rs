//! TAP stream parsing
//!
//! This module reads Test Anything Protocol output, as produced by `tape` and
//! similar runners, one line at a time and folds it into a [`ParseResult`].
//!
//! The parser is lenient: lines it does not understand are skipped, so a
//! runner that interleaves `console.log` noise with its TAP output still
//! produces a usable result.
//!
//! # Example
//!
//! ```
//! use gtd_tap::parser::parse_str;
//!
//! let tap = "TAP version 13\nok 1 - adds\nnot ok 2 - subtracts\n1..2\n";
//! let result = parse_str(tap);
//! assert_eq!(result.count, 2);
//! assert_eq!(result.failures[0].id, 1);
//! ```

use std::io::BufRead;

use tracing::{debug, trace, warn};

use crate::error::TapError;
use crate::result::{Diagnostics, FailureRecord, ParseResult, Plan};

// ============================================================================
// Test Points
// ============================================================================

/// A single `ok` / `not ok` line together with its diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPoint {
    /// Whether the line started with `ok`
    pub ok: bool,
    /// 1-based test number (explicit, or the next in sequence)
    pub number: usize,
    /// Description with the leading `- ` removed
    pub name: String,
    /// SKIP / TODO directive, if present
    pub directive: Option<Directive>,
    /// Parsed YAML diagnostics block
    pub diagnostics: Diagnostics,
}

impl TestPoint {
    /// A failure is a `not ok` point without a SKIP or TODO directive
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.ok && self.directive.is_none()
    }

    /// 0-based index of this point in the test sequence
    #[must_use]
    pub fn id(&self) -> usize {
        self.number.saturating_sub(1)
    }
}

/// Directive trailing a test point description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `# SKIP reason`
    Skip(String),
    /// `# TODO reason`
    Todo(String),
}

// ============================================================================
// Line Classification
// ============================================================================

/// A recognised top-level TAP line
#[derive(Debug, PartialEq, Eq)]
enum Line {
    TestPoint {
        ok: bool,
        number: Option<usize>,
        name: String,
        directive: Option<Directive>,
    },
    Plan(Plan),
    BailOut(String),
}

fn classify(line: &str) -> Option<Line> {
    if let Some(reason) = line.strip_prefix("Bail out!") {
        return Some(Line::BailOut(reason.trim().to_string()));
    }
    parse_test_point(line).or_else(|| parse_plan(line).map(Line::Plan))
}

fn parse_test_point(line: &str) -> Option<Line> {
    let (ok, rest) = if let Some(rest) = line.strip_prefix("not ok") {
        (false, rest)
    } else if let Some(rest) = line.strip_prefix("ok") {
        (true, rest)
    } else {
        return None;
    };

    // "okay" is not a test point
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let rest = rest.trim_start();
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let number = rest[..digits].parse().ok();
    let rest = rest[digits..].trim_start();

    let (description, directive) = split_directive(rest);
    let name = description
        .strip_prefix("- ")
        .or_else(|| description.strip_prefix('-'))
        .unwrap_or(description)
        .trim()
        .to_string();

    Some(Line::TestPoint {
        ok,
        number,
        name,
        directive,
    })
}

fn split_directive(description: &str) -> (&str, Option<Directive>) {
    let Some(idx) = description.rfind('#') else {
        return (description, None);
    };

    let comment = description[idx + 1..].trim_start();
    let keyword = comment.get(..4).map(str::to_ascii_uppercase);
    let reason = || comment.get(4..).unwrap_or_default().trim().to_string();
    let directive = match keyword.as_deref() {
        Some("SKIP") => Directive::Skip(reason()),
        Some("TODO") => Directive::Todo(reason()),
        _ => return (description, None),
    };

    (description[..idx].trim_end(), Some(directive))
}

fn parse_plan(line: &str) -> Option<Plan> {
    let (range, comment) = match line.split_once('#') {
        Some((range, comment)) => (range.trim(), Some(comment.trim())),
        None => (line.trim(), None),
    };
    let (start, end) = range.split_once("..")?;
    let start: usize = start.parse().ok()?;
    let end: usize = end.parse().ok()?;

    let skip_reason = if end == 0 {
        comment
            .map(|c| c.strip_prefix("SKIP").or(c.strip_prefix("skip")).unwrap_or(c))
            .map(|c| c.trim().to_string())
    } else {
        None
    };

    Some(Plan {
        start,
        end,
        skip_reason,
    })
}

/// Byte length of the leading whitespace
fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Strip the block indentation from a YAML line
fn dedent(line: &str, indent: usize) -> &str {
    let strip = line
        .char_indices()
        .take_while(|&(i, c)| i < indent && c.is_whitespace())
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    &line[strip..]
}

// ============================================================================
// Streaming Parser
// ============================================================================

/// A YAML diagnostics block being collected
#[derive(Debug)]
struct YamlBlock {
    indent: usize,
    lines: Vec<String>,
}

/// A streaming parser for TAP output
///
/// Feed lines with [`TapParser::process_line`] and call
/// [`TapParser::finish`] once the input ends.
#[derive(Debug, Default)]
pub struct TapParser {
    result: ParseResult,
    next_number: usize,
    pending: Option<TestPoint>,
    yaml: Option<YamlBlock>,
    bailed_out: bool,
}

impl TapParser {
    /// Create a new streaming parser
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a single line of output
    ///
    /// Returns the test point completed by this line, if any. A test point
    /// is only complete once the line after it shows it has no (further)
    /// diagnostics, so results lag one line behind the input.
    pub fn process_line(&mut self, line: &str) -> Option<TestPoint> {
        let line = line.trim_end_matches(['\r', '\n']);
        if self.bailed_out {
            trace!(line, "Ignoring line after bail out");
            return None;
        }

        if let Some(block) = self.yaml.as_ref() {
            // Only `...` at the indent of the opening `---` ends the block
            if line.trim() == "..." && indent_of(line) == block.indent {
                return self.close_yaml();
            }
            if let Some(block) = self.yaml.as_mut() {
                block.lines.push(dedent(line, block.indent).to_string());
            }
            return None;
        }

        if self.pending.is_some() && line.trim() == "---" && line.starts_with(char::is_whitespace)
        {
            self.yaml = Some(YamlBlock {
                indent: indent_of(line),
                lines: Vec::new(),
            });
            return None;
        }

        let Some(parsed) = classify(line) else {
            trace!(line, "Ignoring unrecognised line");
            return None;
        };

        let completed = self.flush_pending();
        match parsed {
            Line::TestPoint {
                ok,
                number,
                name,
                directive,
            } => {
                let number = number.unwrap_or(self.next_number.saturating_add(1));
                self.next_number = number;
                self.pending = Some(TestPoint {
                    ok,
                    number,
                    name,
                    directive,
                    diagnostics: Diagnostics::default(),
                });
            }
            Line::Plan(plan) => {
                debug!(start = plan.start, end = plan.end, "Plan");
                self.result.plan = Some(plan);
            }
            Line::BailOut(reason) => {
                warn!(reason = %reason, "Bail out");
                self.result.bailout = Some(reason);
                self.bailed_out = true;
            }
        }
        completed
    }

    /// Number of test points completed so far
    #[must_use]
    pub fn count(&self) -> usize {
        self.result.count
    }

    /// Failures recorded so far
    #[must_use]
    pub fn failures(&self) -> &[FailureRecord] {
        &self.result.failures
    }

    /// Finalize and return the parse result
    ///
    /// An unterminated diagnostics block is parsed as if it had been closed.
    #[must_use]
    pub fn finish(mut self) -> ParseResult {
        if self.yaml.is_some() {
            self.close_yaml();
        } else {
            self.flush_pending();
        }
        debug!(
            count = self.result.count,
            failures = self.result.failures.len(),
            "Finished parsing TAP"
        );
        self.result
    }

    fn close_yaml(&mut self) -> Option<TestPoint> {
        let block = self.yaml.take()?;
        if let Some(point) = self.pending.as_mut() {
            match Diagnostics::from_yaml(&block.lines.join("\n")) {
                Ok(diagnostics) => point.diagnostics = diagnostics,
                Err(e) => warn!(test = point.number, error = %e, "Skipping diagnostics block"),
            }
        }
        self.flush_pending()
    }

    fn flush_pending(&mut self) -> Option<TestPoint> {
        let point = self.pending.take()?;
        let result = &mut self.result;
        result.count += 1;

        match point.directive {
            Some(Directive::Skip(_)) => result.skip += 1,
            Some(Directive::Todo(_)) => result.todo += 1,
            None => {}
        }
        if point.ok {
            result.pass += 1;
        } else {
            result.fail += 1;
        }

        if point.is_failure() {
            result.failures.push(FailureRecord::new(
                point.id(),
                point.name.clone(),
                point.diagnostics.clone(),
            ));
        }

        debug!(number = point.number, ok = point.ok, name = %point.name, "Test point");
        Some(point)
    }
}

// ============================================================================
// Parsing Functions
// ============================================================================

/// Parse a complete TAP document held in memory
#[must_use]
pub fn parse_str(input: &str) -> ParseResult {
    let mut parser = TapParser::new();
    for line in input.lines() {
        parser.process_line(line);
    }
    parser.finish()
}

/// Parse a TAP stream until end of input
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Errors
///
/// Returns `TapError::Io` if reading from the stream fails.
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<ParseResult, TapError> {
    let mut parser = TapParser::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        parser.process_line(&String::from_utf8_lossy(&buf));
    }

    Ok(parser.finish())
}
