mod test_runner;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use regex::Regex;
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

use dicer_interpreter::ExpandError;

const SUBCOMMANDS: &[&str] = &["expand", "test", "help"];

#[derive(Parser)]
#[command(name = "dicer", version, about = "Build strings from numbered inputs with dicer templates")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log more (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand a template against inputs
    Expand(ExpandArgs),

    /// Run .test.toml fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct ExpandArgs {
    /// Template, e.g. "%[1.-$]"
    template: String,

    /// Parse only, don't expand (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the parsed template
    #[arg(long)]
    ast: bool,

    /// Read stdin line by line and expand once per matching line, using the
    /// capture groups as inputs
    #[arg(short, long, value_name = "PATTERN")]
    regex: Option<String>,

    /// Inputs, referenced as %1, %2, ... (after --)
    #[arg(last = true)]
    inputs: Vec<String>,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.toml file or directory containing them
    path: String,

    /// Run only fixtures in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    // `dicer 'tmpl' -- a b` is shorthand for `dicer expand 'tmpl' -- a b`.
    let mut args: Vec<String> = std::env::args().collect();
    let first_pos = args
        .iter()
        .enumerate()
        .skip(1)
        .take_while(|(_, a)| a.as_str() != "--")
        .find(|(_, a)| !a.starts_with('-'))
        .map(|(i, a)| (i, SUBCOMMANDS.contains(&a.as_str())));
    if let Some((pos, false)) = first_pos {
        args.insert(pos, "expand".to_string());
    }

    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose, cli.no_color);

    match cli.command {
        Command::Expand(expand_args) => do_expand(expand_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn init_logging(verbose: u8, no_color: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(verbose >= 2)
        .init();

    trace!("args: {:?}", std::env::args().collect::<Vec<_>>());
}

/// Diagnostic output for one template.
struct Reporter {
    files: SimpleFiles<String, String>,
    file_id: usize,
    writer: StandardStream,
    config: term::Config,
}

impl Reporter {
    fn new(template: &str, no_color: bool) -> Self {
        let color_choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        let mut files = SimpleFiles::new();
        let file_id = files.add("<template>".to_string(), template.to_string());
        Reporter {
            files,
            file_id,
            writer: StandardStream::stderr(color_choice),
            config: term::Config::default(),
        }
    }

    fn emit(&self, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit_to_write_style(
            &mut self.writer.lock(),
            &self.config,
            &self.files,
            diagnostic,
        );
    }

    fn error(&self, error: &ExpandError) {
        if error.span().is_some() {
            self.emit(&error.to_diagnostic(self.file_id));
        } else {
            eprintln!("error: {}", error);
        }
    }
}

fn do_expand(args: ExpandArgs, no_color: bool) {
    let reporter = Reporter::new(&args.template, no_color);

    // --check: structural errors only, normalization can't introduce any
    if args.check {
        let parser = dicer::parser::Parser::new(&args.template, reporter.file_id);
        if let Err(error) = parser.parse() {
            reporter.emit(&error.to_diagnostic(reporter.file_id));
            process::exit(1);
        }
        eprintln!("ok: template parsed successfully");
        return;
    }

    // --ast: dump the normalized, parsed template
    if args.ast {
        match dicer_interpreter::prepare(&args.template, reporter.file_id) {
            Ok(template) => println!("{:#?}", template),
            Err(error) => {
                reporter.emit(&error.to_diagnostic(reporter.file_id));
                process::exit(1);
            }
        }
        return;
    }

    if let Some(pattern) = &args.regex {
        expand_lines(&args.template, pattern, &reporter);
        return;
    }

    debug!(inputs = args.inputs.len(), "expanding from command line");
    match dicer_interpreter::expand(&args.template, &args.inputs) {
        Ok(output) => println!("{}", output),
        Err(error) => {
            reporter.error(&error);
            process::exit(1);
        }
    }
}

/// Expand the template once for every stdin line that matches `pattern`.
fn expand_lines(template: &str, pattern: &str, reporter: &Reporter) {
    let regex = match Regex::new(pattern) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: invalid pattern: {}", e);
            process::exit(1);
        }
    };

    let prepared = match dicer_interpreter::prepare(template, reporter.file_id) {
        Ok(t) => t,
        Err(error) => {
            reporter.emit(&error.to_diagnostic(reporter.file_id));
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (i, line) in io::stdin().lock().lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error: cannot read standard input: {}", e);
                process::exit(1);
            }
        };

        let Some(inputs) = capture_inputs(&regex, &line) else {
            trace!(line = i + 1, "no match");
            continue;
        };

        match dicer_interpreter::render(&prepared, &inputs) {
            Ok(expanded) => {
                // stdout closed (e.g. piped into `head`)
                if writeln!(out, "{}", expanded).is_err() {
                    return;
                }
            }
            Err(error) => {
                let diagnostic = error
                    .to_diagnostic(reporter.file_id)
                    .with_notes(vec![format!("while expanding input line {}", i + 1)]);
                reporter.emit(&diagnostic);
                process::exit(1);
            }
        }
    }
}

/// Capture groups 1.. become the inputs; unmatched optional groups are empty.
/// A pattern without groups contributes the whole match.
fn capture_inputs<'h>(regex: &Regex, line: &'h str) -> Option<Vec<&'h str>> {
    let captures = regex.captures(line)?;
    if captures.len() == 1 {
        return captures.get(0).map(|m| vec![m.as_str()]);
    }
    Some(
        captures
            .iter()
            .skip(1)
            .map(|m| m.map_or("", |m| m.as_str()))
            .collect(),
    )
}
