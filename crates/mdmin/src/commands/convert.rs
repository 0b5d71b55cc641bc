//! Markdown to HTML page conversion.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use mdmin_config::{CliSettings, Config};
use mdmin_page::PageRenderer;
use mdmin_renderer::{Converter, MenuMode};

use crate::error::CliError;
use crate::output::Output;

/// Path meaning stdin for input and stdout for output.
const STDIO_PATH: &str = "-";

/// Arguments for a conversion.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert, or `-` to read from stdin.
    input: PathBuf,

    /// Output file (default: input with `.html` extension, stdout for stdin input).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Heading level listed in the menu: h1-h6, or `none` to disable the menu.
    #[arg(short, long, env = "MDMIN_LEVEL")]
    level: Option<MenuMode>,

    /// Enable GitHub-flavored markdown extensions.
    #[arg(long)]
    gfm: bool,

    /// Fail on tokens the rewriter does not recognize.
    #[arg(long)]
    strict: bool,

    /// Page template file (overrides config).
    #[arg(long)]
    template: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdmin.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Convert the input and write the page.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let destination = self.destination()?;
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let markdown = read_input(&self.input)?;
        let page = Converter::new(config.convert_options()).convert(&markdown)?;
        if config.mode.is_enabled() && page.headings == 0 {
            output.warning(&format!("No {} headings found, menu is empty", config.mode));
        }

        let renderer = match &config.template {
            Some(path) => PageRenderer::from_path(path)?,
            None => PageRenderer::new()?,
        };
        let html = renderer.render(&page)?;

        match destination {
            Some(path) => {
                std::fs::write(&path, html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            level: self.level,
            strict: self.strict.then_some(true),
            gfm: self.gfm.then_some(true),
            template: self.template.clone(),
        }
    }

    /// Output file, or `None` for stdout.
    fn destination(&self) -> Result<Option<PathBuf>, CliError> {
        let path = match &self.output {
            Some(path) if path.as_os_str() == STDIO_PATH => return Ok(None),
            Some(path) => path.clone(),
            None if is_stdio(&self.input) => return Ok(None),
            None => self.input.with_extension("html"),
        };
        if path == self.input {
            return Err(CliError::Validation(format!(
                "Output would overwrite input: {}",
                path.display()
            )));
        }
        Ok(Some(path))
    }
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if is_stdio(path) {
        let mut markdown = String::new();
        std::io::stdin().lock().read_to_string(&mut markdown)?;
        return Ok(markdown);
    }
    std::fs::read_to_string(path)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use mdmin_renderer::HeadingTag;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ConvertArgs,
    }

    fn parse(argv: &[&str]) -> ConvertArgs {
        TestCli::try_parse_from(std::iter::once("mdmin").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_default_destination_replaces_extension() {
        let args = parse(&["docs/guide.md"]);
        assert_eq!(
            args.destination().unwrap(),
            Some(PathBuf::from("docs/guide.html"))
        );
    }

    #[test]
    fn test_stdin_defaults_to_stdout() {
        assert_eq!(parse(&["-"]).destination().unwrap(), None);
    }

    #[test]
    fn test_explicit_stdout() {
        assert_eq!(parse(&["a.md", "-o", "-"]).destination().unwrap(), None);
    }

    #[test]
    fn test_explicit_output() {
        let args = parse(&["-", "--output", "out/page.html"]);
        assert_eq!(
            args.destination().unwrap(),
            Some(PathBuf::from("out/page.html"))
        );
    }

    #[test]
    fn test_refuses_to_overwrite_input() {
        let args = parse(&["page.html"]);
        assert!(matches!(args.destination(), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_cli_settings() {
        let args = parse(&["a.md", "-l", "H2", "--gfm", "--template", "t.html"]);
        let settings = args.cli_settings();
        assert_eq!(settings.level, Some(MenuMode::Track(HeadingTag::H2)));
        assert_eq!(settings.gfm, Some(true));
        assert_eq!(settings.strict, None);
        assert_eq!(settings.template, Some(PathBuf::from("t.html")));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let result = TestCli::try_parse_from(["mdmin", "a.md", "--level", "h9"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mdmin.toml");
        std::fs::write(&config, "[menu]\nlevel = \"h2\"\n").unwrap();
        let input = dir.path().join("doc.md");
        std::fs::write(&input, "# Doc\n\n## Setup\n\ntext\n").unwrap();

        let args = parse(&[input.to_str().unwrap(), "-c", config.to_str().unwrap()]);
        args.execute(&Output::new()).unwrap();

        let html = std::fs::read_to_string(dir.path().join("doc.html")).unwrap();
        assert!(html.contains(r#"<h2 id="id-h2-1">Setup</h2>"#));
        assert!(html.contains(r##"<a href="#id-h2-1">Setup</a>"##));
    }

    #[test]
    fn test_execute_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("mdmin.toml");
        std::fs::write(&config, "").unwrap();
        let input = dir.path().join("missing.md");

        let args = parse(&[input.to_str().unwrap(), "-c", config.to_str().unwrap()]);
        assert!(matches!(args.execute(&Output::new()), Err(CliError::Io(_))));
    }
}
