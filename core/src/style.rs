use std::path::Path;

use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;
use strum::IntoEnumIterator;

use crate::testing::{CaseOutcome, CaseResult, RunSummary, TestReport, Verdict};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

const BOLD_LINE: &str = "━";
const THIN_LINE: &str = "─";

pub fn is_truecolor_supported() -> bool {
    let Ok(v) = std::env::var("COLORTERM") else {
        return false
    };
    matches!(v.as_str(), "truecolor" | "24bit")
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for Verdict {
    fn color(&self) -> Color {
        use Verdict::*;
        if !self::is_truecolor_supported() {
            return match self {
                AC => Color::Green,
                WA => Color::Yellow,
                TLE => Color::Red,
                RE => Color::Magenta,
                CE => Color::Blue,
                SKIP => Color::BrightBlack,
            };
        }

        match self {
            AC => Color::TrueColor {
                r: 30,
                g: 180,
                b: 40,
            },
            WA => Color::TrueColor {
                r: 210,
                g: 138,
                b: 4,
            },
            TLE => Color::TrueColor {
                r: 220,
                g: 42,
                b: 42,
            },
            RE => Color::TrueColor {
                r: 171,
                g: 40,
                b: 200,
            },
            CE => Color::TrueColor {
                r: 40,
                g: 100,
                b: 220,
            },
            SKIP => Color::TrueColor {
                r: 110,
                g: 110,
                b: 110,
            },
        }
    }
}

pub fn judge_icon(judge: Verdict) -> ColoredString {
    let fg = if is_truecolor_supported() {
        Color::TrueColor {
            r: 255,
            g: 255,
            b: 255,
        }
    } else {
        Color::BrightBlack
    };
    format!(" {} ", judge)
        .on_color(judge.color())
        .bold()
        .color(fg)
}

fn terminal_cols() -> usize {
    terminal::size().map(|(c, _)| c as usize).unwrap_or(40)
}

/// `Testcase #1 ... AC  [12ms]`
pub fn case_line(res: &CaseOutcome) -> String {
    let judge = res.verdict();
    let time = match res.execution_time {
        Some(t) if judge != Verdict::TLE => format!(" [{}ms]", t.as_millis()),
        Some(t) => format!(" [>{}ms]", t.as_millis()),
        None => String::new(),
    };
    format!(
        "Testcase {} ... {}{}{}",
        res.case.id,
        judge_icon(judge),
        " ".repeat(4usize.saturating_sub(judge.to_string().len())),
        time,
    )
}

pub fn print_compile_error(diagnostic: &str) {
    let bold_bar = BOLD_LINE.repeat(terminal_cols()).blue().bold();
    println!("{} {}", judge_icon(Verdict::CE), "Compile error".bright_red().bold());
    println!("{}", bold_bar);
    print!("{}", diagnostic);
    if !diagnostic.ends_with('\n') {
        println!();
    }
    println!("{}", bold_bar);
}

pub fn print_report(report: &TestReport) {
    match report {
        TestReport::CompileError { diagnostic } => print_compile_error(diagnostic),
        TestReport::NoTestcases { dir } => println!(
            "{} {}",
            "No test cases found in".bright_red(),
            dir.to_string_lossy()
        ),
        TestReport::Judged { outcomes, summary } => {
            outcomes
                .iter()
                .filter(|x| x.verdict() != Verdict::AC)
                .for_each(print_case_detail);
            print_summary(summary);
        }
    }
}

pub fn print_summary(summary: &RunSummary) {
    let bar = "-".repeat(5);
    print!("{} ", bar);

    let num_total_test = summary.total;
    let num_passed = summary.count(Verdict::AC);
    let num_failed = num_total_test - num_passed;

    if summary.is_all_accepted() {
        let msg = format!("All {} tests passed ✨", num_total_test);
        print!("{}", msg.green());
    } else {
        let summary_msg = if num_passed > 0 {
            format!("{}/{} tests failed 💣", num_failed, num_total_test)
        } else {
            format!("All {} tests failed 💀", num_total_test)
        };

        let detail_msg = Verdict::iter()
            .filter(|&judge| {
                matches!(judge, Verdict::AC | Verdict::WA | Verdict::RE) || summary.count(judge) > 0
            })
            .map(|judge| {
                format!(
                    "{}{}{}",
                    self::judge_icon(judge),
                    "x".dimmed(),
                    summary.count(judge).to_string().bold().bright_white(),
                )
            })
            .collect::<Vec<String>>()
            .join(", ");

        print!("{} ({})", summary_msg.bright_red(), detail_msg);
    }

    println!(" {}", bar);
}

pub fn print_case_detail(res: &CaseOutcome) {
    let cols = terminal_cols();
    let bold_bar = BOLD_LINE.repeat(cols).blue().bold();

    let title_color = Color::BrightYellow;
    println!(
        "\n{}: {}\n{}",
        res.case.id.to_string().color(title_color).bold(),
        self::judge_icon(res.verdict()),
        bold_bar,
    );

    fn print_sub_title(s: &str, cols: usize) {
        println!(
            "{}{}",
            s.cyan().bold(),
            THIN_LINE.repeat(cols.saturating_sub(s.len() + 1)).bright_black(),
        )
    }

    fn print_lines(text: &str) {
        if text.is_empty() {
            println!("{}", "<EMPTY>".magenta().dimmed());
            return;
        }
        for line in text.lines() {
            let trimmed = line.trim_end();
            print!("{}", trimmed);

            let num_trailling_whitespace = line.len() - trimmed.len();
            if num_trailling_whitespace > 0 {
                print!(
                    "{}{}",
                    " ".repeat(num_trailling_whitespace).on_red(),
                    "(Trailling whitespace)".bright_red().bold()
                );
            }
            println!();
        }
    }

    fn print_file(title: &str, path: &Path, cols: usize) {
        print_sub_title(&format!("[{}] {}", title, path.to_string_lossy()), cols);
        match fsutil::read_to_string(path) {
            Ok(text) => print_lines(&text),
            Err(e) => println!("{}", e.to_string().bright_red()),
        }
    }

    match &res.result {
        CaseResult::Accepted => {}
        CaseResult::WrongAnswer { actual, expected } => {
            print_file("expected", expected, cols);
            print_file("actual", actual, cols);
        }
        CaseResult::RuntimeError {
            exit_code,
            diagnostic,
        } => {
            let code = exit_code.map_or_else(|| "none".to_owned(), |c| c.to_string());
            print_sub_title(&format!("[stderr] exitcode={}", code), cols);
            print!("{}", diagnostic);
            if !diagnostic.is_empty() && !diagnostic.ends_with('\n') {
                println!();
            }
        }
        CaseResult::TimeLimitExceeded { limit } => {
            println!("Killed after {}ms", limit.as_millis());
        }
        CaseResult::Skipped { missing } => {
            println!("Missing fixture: {}", missing.to_string_lossy());
        }
    }

    println!("{}", bold_bar);
}
