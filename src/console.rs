//! Terminal output for the CLI: numbered stages, the run summary and
//! failure reports.
//!
//! Colors are used only when stdout is a terminal and `NO_COLOR` is unset.

use crate::error::{OutputError, PipelineError};
use crate::pipeline::RunSummary;
use std::cell::Cell;
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy)]
enum Tone {
    Heading,
    Stage,
    Good,
    Warn,
    Bad,
}

impl Tone {
    /// ANSI SGR parameters, always bold.
    fn code(self) -> &'static str {
        match self {
            Tone::Heading => "1;35",
            Tone::Stage => "1;36",
            Tone::Good => "1;32",
            Tone::Warn => "1;33",
            Tone::Bad => "1;31",
        }
    }
}

/// Prints progress through a fixed number of stages.
#[derive(Debug)]
pub struct Console {
    colors_enabled: bool,
    total_stages: usize,
    current_stage: Cell<usize>,
}

impl Console {
    pub fn new(total_stages: usize) -> Self {
        let colors_enabled = std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self::with_colors(total_stages, colors_enabled)
    }

    pub fn with_colors(total_stages: usize, colors_enabled: bool) -> Self {
        Self {
            colors_enabled,
            total_stages,
            current_stage: Cell::new(0),
        }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if self.colors_enabled {
            format!("\x1b[{}m{}\x1b[0m", tone.code(), text)
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, title: &str) {
        println!("{}", self.paint(title, Tone::Heading));
    }

    /// Advances to the next stage and returns its `[n/total]` line.
    fn next_stage(&self, message: &str) -> String {
        let stage = self.current_stage.get() + 1;
        self.current_stage.set(stage);
        let counter = format!("[{}/{}]", stage, self.total_stages);
        format!("{} {}", self.paint(&counter, Tone::Stage), message)
    }

    pub fn stage(&self, message: &str) {
        println!("{}", self.next_stage(message));
    }

    /// Indented line under the current stage.
    pub fn detail(&self, message: &str) {
        println!("      {}", message);
    }

    pub fn warning(&self, message: &str) {
        println!("      {} {}", self.paint("warning:", Tone::Warn), message);
    }

    fn summary_line(&self, summary: &RunSummary) -> String {
        format!(
            "{} {} titles, {} nouns, {} pairs written to {}",
            self.paint("done:", Tone::Good),
            summary.titles,
            summary.nouns,
            summary.pairs,
            summary.output_file.display()
        )
    }

    pub fn summary(&self, summary: &RunSummary) {
        if summary.nouns == 0 {
            self.warning("no nouns found, the output file is empty");
        }
        println!("{}", self.summary_line(summary));
    }

    /// What a failed run did to the output file. Only a failed write can
    /// leave it truncated, since the file is opened after every translation.
    fn failure_message(error: &PipelineError) -> &'static str {
        match error {
            PipelineError::SourceUnavailable(_) => {
                "could not download post titles, output file left unchanged"
            }
            PipelineError::TranslationFailure { .. } => {
                "translation failed, output file left unchanged"
            }
            PipelineError::Filesystem(OutputError::CreateDir { .. }) => {
                "could not create the output directory, output file left unchanged"
            }
            PipelineError::Filesystem(OutputError::Write { .. }) => {
                "could not write the output file, it may be missing or incomplete"
            }
        }
    }

    pub fn failure(&self, error: &PipelineError) {
        eprintln!(
            "{} {}",
            self.paint("error:", Tone::Bad),
            Self::failure_message(error)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SourceError, TranslationError};
    use std::path::PathBuf;

    fn summary(nouns: usize) -> RunSummary {
        RunSummary {
            titles: 2,
            nouns,
            pairs: nouns,
            output_file: PathBuf::from("out/pairs.txt"),
        }
    }

    #[test]
    fn test_stages_are_numbered() {
        let console = Console::with_colors(3, false);
        assert_eq!(console.next_stage("Loading configuration"), "[1/3] Loading configuration");
        assert_eq!(console.next_stage("Loading dictionary"), "[2/3] Loading dictionary");
    }

    #[test]
    fn test_colored_stage() {
        let console = Console::with_colors(1, true);
        let line = console.next_stage("Run");
        assert!(line.starts_with("\x1b[1;36m[1/1]\x1b[0m"));
        assert!(line.ends_with(" Run"));
    }

    #[test]
    fn test_summary_line() {
        let console = Console::with_colors(4, false);
        assert_eq!(
            console.summary_line(&summary(4)),
            "done: 2 titles, 4 nouns, 4 pairs written to out/pairs.txt"
        );
    }

    #[test]
    fn test_failure_message_depends_on_stage() {
        let source = PipelineError::SourceUnavailable(SourceError::Unauthorized("401".to_string()));
        assert!(Console::failure_message(&source).ends_with("left unchanged"));

        let translation = PipelineError::TranslationFailure {
            word: "dog".to_string(),
            source: TranslationError::Refused("Empty response".to_string()),
        };
        assert!(Console::failure_message(&translation).ends_with("left unchanged"));

        let create_dir = PipelineError::Filesystem(OutputError::CreateDir {
            path: PathBuf::from("out"),
            source: io::Error::other("read-only"),
        });
        assert!(Console::failure_message(&create_dir).ends_with("left unchanged"));

        let write = PipelineError::Filesystem(OutputError::Write {
            path: PathBuf::from("out/pairs.txt"),
            source: io::Error::other("disk full"),
        });
        assert!(Console::failure_message(&write).contains("incomplete"));
    }
}
