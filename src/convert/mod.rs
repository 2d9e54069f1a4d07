//! Render passes run on finished ms source.
//!
//! A pass is an opaque byte-in/byte-out transform. The built-in passes shell
//! out to the usual troff toolchain, and a [`Pipeline`] chains them so macro
//! text can be turned into PostScript or PDF.
//!
//! # Example
//!
//! ```no_run
//! use troffdown::convert::Pipeline;
//!
//! fn main() -> troffdown::Result<()> {
//!     let ms = troffdown::to_troff("# Hello\n\nWorld\n")?;
//!     let pdf = Pipeline::pdf().run(ms.as_bytes())?;
//!     std::fs::write("hello.pdf", pdf)?;
//!     Ok(())
//! }
//! ```

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{Error, Result};

/// Environment variable that overrides the troff program.
pub const TROFF_ENV: &str = "TROFF";

/// Trait for render passes.
pub trait RenderPass: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Transform `input` into the pass output.
    fn run(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// A pass that runs an external program, feeding input on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPass {
    /// Program to execute
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,
}

impl ToolPass {
    /// Create a pass for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// `troff -Tutf -ms -mpictures`, honoring `$TROFF`.
    pub fn troff() -> Self {
        let program = std::env::var(TROFF_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "troff".to_string());
        Self::new(program).arg("-Tutf").arg("-ms").arg("-mpictures")
    }

    /// `tr2post`, troff output to PostScript.
    pub fn tr2post() -> Self {
        Self::new("tr2post")
    }

    /// `ps2pdf - -`, PostScript on stdin to PDF on stdout.
    pub fn ps2pdf() -> Self {
        Self::new("ps2pdf").arg("-").arg("-")
    }
}

impl RenderPass for ToolPass {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, input: &[u8]) -> Result<Vec<u8>> {
        log::debug!("Running {} {:?} on {} bytes", self.program, self.args, input.len());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from another thread so a full stdout pipe cannot deadlock us.
        let stdin = child.stdin.take();
        let data = input.to_vec();
        let feeder = thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(&data)?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;
        let fed = feeder
            .join()
            .map_err(|_| Error::Other(format!("{}: stdin writer panicked", self.program)))?;

        if !output.status.success() {
            return Err(Error::Tool {
                tool: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        // A tool may exit successfully without reading all of its input.
        if let Err(e) = fed {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        log::debug!("{} produced {} bytes", self.program, output.stdout.len());
        Ok(output.stdout)
    }
}

/// An ordered chain of render passes.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn RenderPass>>,
}

impl Pipeline {
    /// Create an empty pipeline. Running it returns the input unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// troff, then tr2post, then ps2pdf.
    pub fn pdf() -> Self {
        Self::new()
            .then(ToolPass::troff())
            .then(ToolPass::tr2post())
            .then(ToolPass::ps2pdf())
    }

    /// Append a pass.
    pub fn then(mut self, pass: impl RenderPass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Names of the passes, in order.
    pub fn names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the pipeline has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    /// Run every pass in order, each on the previous output.
    pub fn run(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut data = input.to_vec();
        for pass in &self.passes {
            data = pass.run(&data)?;
        }
        Ok(data)
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("passes", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl RenderPass for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn run(&self, input: &[u8]) -> Result<Vec<u8>> {
            Ok(input.to_ascii_uppercase())
        }
    }

    #[test]
    fn test_tool_constructors() {
        assert_eq!(ToolPass::tr2post().args, Vec::<String>::new());
        assert_eq!(ToolPass::ps2pdf().args, vec!["-", "-"]);
        assert_eq!(
            &ToolPass::troff().args[..],
            &["-Tutf".to_string(), "-ms".into(), "-mpictures".into()][..]
        );
    }

    #[test]
    fn test_pdf_pipeline_order() {
        let pipeline = Pipeline::pdf();
        assert_eq!(pipeline.len(), 3);
        assert_eq!(&pipeline.names()[1..], &["tr2post", "ps2pdf"]);
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.run(b".PP\n").unwrap(), b".PP\n");
    }

    #[test]
    fn test_in_process_pass() {
        let pipeline = Pipeline::new().then(Upper);
        assert_eq!(pipeline.run(b".pp\nhi\n").unwrap(), b".PP\nHI\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_pass_pipes_stdin_to_stdout() {
        let pipeline = Pipeline::new().then(ToolPass::new("cat")).then(Upper);
        assert_eq!(pipeline.run(b"abc").unwrap(), b"ABC");
    }

    #[cfg(unix)]
    #[test]
    fn test_tool_failure_is_reported() {
        let err = ToolPass::new("false").run(b"x").unwrap_err();
        match err {
            Error::Tool { tool, status, .. } => {
                assert_eq!(tool, "false");
                assert!(!status.success());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_tool_is_io_error() {
        let err = ToolPass::new("troffdown-no-such-tool").run(b"").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
