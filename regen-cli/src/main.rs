//! # REGEN CLI
//!
//! Terminal front end for the REGEN code workbench.
//!
//! Usage:
//!   regen generate <prompt>...
//!   regen run <file> [--input TEXT]
//!   regen languages
//!   regen health
//!   regen [shell]
//!
//! Examples:
//!   regen generate "read two numbers and print their sum"
//!   regen -l rust generate --sanitize "fizzbuzz up to 15"
//!   regen -l python run sum.py --input "3\n4"
//!   regen --base-url http://10.0.0.5:8000 shell

use clap::{Parser, Subcommand};
use regen_client::{
    Bounds, Divider, Error, HttpCodeService, Language, Result, ServiceConfig,
};
use regen_workbench::{Phase, Workbench, WorkbenchConfig};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "regen")]
#[command(author, version, about = "REGEN - generate, edit and run code from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides REGEN_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Target language
    #[arg(short, long, global = true, default_value = "python")]
    language: Language,

    /// Generation timeout in seconds (overrides REGEN_GENERATE_TIMEOUT_SECS)
    #[arg(long, global = true)]
    generate_timeout: Option<u64>,

    /// Execution timeout in seconds (overrides REGEN_EXECUTE_TIMEOUT_SECS)
    #[arg(long, global = true)]
    execute_timeout: Option<u64>,

    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only print results
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate code from a description
    Generate {
        /// What the code should do
        #[arg(trailing_var_arg = true, required = true)]
        prompt: Vec<String>,

        /// Existing code to send along as context
        #[arg(long)]
        code_file: Option<PathBuf>,

        /// Print only the sanitized code, as it would land in the editor
        #[arg(long)]
        sanitize: bool,
    },
    /// Execute a source file
    Run {
        /// Path to the source file
        file: PathBuf,

        /// Text fed to stdin; `\n` separates lines
        #[arg(long, conflicts_with = "input_file")]
        input: Option<String>,

        /// File whose contents are fed to stdin
        #[arg(long)]
        input_file: Option<PathBuf>,
    },
    /// List languages supported by the backend
    Languages,
    /// Check that the backend is up
    Health,
    /// Interactive workbench (default)
    Shell,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn service_config(cli: &Cli) -> Result<ServiceConfig> {
    let mut config = ServiceConfig::from_env()?;
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(secs) = cli.generate_timeout {
        config = config.with_generate_timeout(secs);
    }
    if let Some(secs) = cli.execute_timeout {
        config = config.with_execute_timeout(secs);
    }
    Ok(config)
}

fn open_workbench(cli: &Cli) -> Result<Workbench<HttpCodeService>> {
    let service = HttpCodeService::new(service_config(cli)?)?;
    let config = WorkbenchConfig {
        language: cli.language,
        ..WorkbenchConfig::default()
    };
    Ok(Workbench::with_config(service, config))
}

/// Read a source or stdin file
fn load_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::from(e)
            .with_operation("cli::load_source")
            .with_context("path", path.display().to_string())
    })
}

/// Turn the two-character sequence `\n` into a newline
fn decode_input(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

fn report(err: &Error) {
    eprintln!("Error: {}", err.message());
    eprintln!("  {}", err.kind().remediation());
}

fn fail(err: Error) -> ! {
    report(&err);
    std::process::exit(1);
}

async fn generate(cli: &Cli, prompt: &str, code_file: Option<&Path>, sanitize: bool) {
    let mut bench = open_workbench(cli).unwrap_or_else(|e| fail(e));

    if let Some(path) = code_file {
        let code = load_source(path).unwrap_or_else(|e| fail(e));
        bench.set_editor_buffer(code).unwrap_or_else(|e| fail(e));
    }

    if !cli.quiet {
        eprintln!("Generating {} code...", cli.language.display_name());
    }

    let text = match bench.submit_generation(prompt, cli.language).await {
        Ok(text) => text.to_string(),
        Err(e) => fail(e),
    };

    if sanitize {
        match bench.transfer_to_editor() {
            Ok(code) => println!("{}", code),
            Err(e) => fail(e),
        }
    } else {
        println!("{}", text);
    }
}

async fn run_file(cli: &Cli, file: &Path, input: Option<&str>, input_file: Option<&Path>) {
    let mut bench = open_workbench(cli).unwrap_or_else(|e| fail(e));

    let code = load_source(file).unwrap_or_else(|e| fail(e));
    bench.set_editor_buffer(code).unwrap_or_else(|e| fail(e));

    let stdin = match (input, input_file) {
        (Some(text), _) => decode_input(text),
        (None, Some(path)) => load_source(path).unwrap_or_else(|e| fail(e)),
        (None, None) => String::new(),
    };

    if !cli.quiet {
        eprintln!("Running {} ({})...", file.display(), cli.language.display_name());
    }

    match bench.submit_execution(&stdin).await {
        Ok(output) => println!("{}", output.trim_end_matches('\n')),
        Err(e) => fail(e),
    }
}

async fn list_languages(cli: &Cli) {
    let bench = open_workbench(cli).unwrap_or_else(|e| fail(e));

    let languages = match bench.languages().await {
        Ok(languages) => languages,
        Err(e) => {
            warn!(error = %e, "falling back to the built-in language list");
            if !cli.quiet {
                eprintln!("Backend unavailable, showing built-in languages.");
            }
            Language::ALL.to_vec()
        }
    };

    for language in languages {
        println!("  {:<12} {}", language.id(), language.display_name());
    }
}

async fn check_health(cli: &Cli) {
    let bench = open_workbench(cli).unwrap_or_else(|e| fail(e));
    let url = bench.service().config().base_url.clone();

    match bench.health().await {
        Ok(true) => println!("{} is up", url),
        Ok(false) => {
            println!("{} answered with an error status", url);
            std::process::exit(1);
        }
        Err(e) => fail(e),
    }
}

// =============================================================================
// Interactive shell
// =============================================================================

const SHELL_HELP: &str = "\
Commands:
  gen <prompt>          generate code for the current language
  lang [name]           show or change the language
  show                  print the session state
  transfer              move the generated code into the editor
  edit [file]           load a file into the editor, or type code ending with a lone '.'
  input <text>          set stdin for the next run (\\n separates lines)
  run [text]            execute the editor (optionally with new stdin)
  clear                 reset editor, stdin and output
  dismiss               acknowledge the last error
  hide                  close the generated-code panel
  close                 clear and close the terminal panel
  drag <panel> <y>...   drag the generator|terminal divider through pointer positions
  layout [height]       show panel heights, or resize the container
  help                  show this help
  quit                  leave the shell";

#[derive(Debug, PartialEq)]
enum ShellCommand {
    Generate(String),
    Language(Option<String>),
    Show,
    Transfer,
    Edit(Option<PathBuf>),
    Input(String),
    Run(Option<String>),
    Clear,
    Dismiss,
    Hide,
    Close,
    Drag(Divider, Vec<f64>),
    Layout(Option<f64>),
    Help,
    Quit,
}

impl ShellCommand {
    fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let command = match word {
            "gen" | "generate" => ShellCommand::Generate(rest.to_string()),
            "lang" | "language" => ShellCommand::Language(arg),
            "show" => ShellCommand::Show,
            "transfer" => ShellCommand::Transfer,
            "edit" => ShellCommand::Edit(arg.map(PathBuf::from)),
            "input" => ShellCommand::Input(decode_input(rest)),
            "run" => ShellCommand::Run(arg.map(|a| decode_input(&a))),
            "clear" => ShellCommand::Clear,
            "dismiss" => ShellCommand::Dismiss,
            "hide" => ShellCommand::Hide,
            "close" => ShellCommand::Close,
            "drag" => {
                let mut parts = rest.split_whitespace();
                let divider = match parts.next() {
                    Some("generator" | "gen" | "output") => Divider::GeneratorOutput,
                    Some("terminal" | "term") => Divider::Terminal,
                    _ => return Err("usage: drag <generator|terminal> <y>...".to_string()),
                };
                let moves = parts
                    .map(|p| p.parse::<f64>().map_err(|_| format!("not a number: {}", p)))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                ShellCommand::Drag(divider, moves)
            }
            "layout" => match arg {
                Some(h) => ShellCommand::Layout(Some(
                    h.parse::<f64>().map_err(|_| format!("not a number: {}", h))?,
                )),
                None => ShellCommand::Layout(None),
            },
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };
        Ok(command)
    }
}

type Lines = tokio::io::Lines<BufReader<tokio::io::Stdin>>;

async fn print_prompt(text: &str) {
    let mut stdout = tokio::io::stdout();
    let _ = stdout.write_all(text.as_bytes()).await;
    let _ = stdout.flush().await;
}

/// Read code lines until a lone `.` or end of input
async fn read_block(lines: &mut Lines) -> String {
    let mut code = Vec::new();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim() == "." {
            break;
        }
        code.push(line);
    }
    code.join("\n")
}

fn print_layout(bench: &Workbench<HttpCodeService>) {
    let geometry = bench.geometry();
    println!(
        "container {:.0}px | generator output {:.0}px | terminal {:.0}px",
        geometry.container_bounds().height,
        geometry.generator_output_height(),
        geometry.terminal_height()
    );
}

fn print_state(bench: &Workbench<HttpCodeService>) {
    let session = bench.session();
    println!("phase:     {}", session.phase());
    println!("language:  {}", session.target_language().display_name());
    if !session.prompt().is_empty() {
        println!("prompt:    {}", truncate(session.prompt(), 60));
    }
    if session.show_generated() {
        println!("--- generated ---\n{}", session.generated_text());
    }
    println!("--- editor ---\n{}", session.editor_buffer());
    if !session.stdin_text().is_empty() {
        println!("--- stdin ---\n{}", session.stdin_text());
    }
    if session.show_terminal() {
        println!("--- terminal ---\n{}", session.output_text());
    }
    if let Some(err) = session.last_error() {
        println!("--- error ({:?}) ---\n{}\n{}", err.raised_during, err.message, err.remediation());
    }
}

async fn shell(cli: &Cli) {
    let mut bench = open_workbench(cli).unwrap_or_else(|e| fail(e));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !cli.quiet {
        println!(
            "REGEN workbench - {} at {}",
            bench.session().target_language().display_name(),
            bench.service().config().base_url
        );
        println!("Type 'help' for commands.\n");
    }

    loop {
        let marker = if bench.session().phase() == Phase::Error { "!" } else { "" };
        print_prompt(&format!("regen{}> ", marker)).await;

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                report(&Error::from(e).with_operation("cli::shell"));
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };

        let result: Result<()> = match command {
            ShellCommand::Generate(prompt) => {
                let language = bench.session().target_language();
                bench
                    .submit_generation(&prompt, language)
                    .await
                    .map(|text| println!("{}", text))
            }
            ShellCommand::Language(None) => {
                println!("{}", bench.session().target_language().display_name());
                Ok(())
            }
            ShellCommand::Language(Some(name)) => name
                .parse::<Language>()
                .and_then(|language| bench.set_language(language)),
            ShellCommand::Show => {
                print_state(&bench);
                Ok(())
            }
            ShellCommand::Transfer => bench.transfer_to_editor().map(|code| println!("{}", code)),
            ShellCommand::Edit(Some(path)) => {
                load_source(&path).and_then(|code| bench.set_editor_buffer(code))
            }
            ShellCommand::Edit(None) => {
                println!("Enter code, finish with a line containing only '.'");
                let code = read_block(&mut lines).await;
                bench.set_editor_buffer(code)
            }
            ShellCommand::Input(text) => {
                bench.set_stdin(text);
                Ok(())
            }
            ShellCommand::Run(stdin) => {
                let stdin = stdin.unwrap_or_else(|| bench.session().stdin_text().to_string());
                bench
                    .submit_execution(&stdin)
                    .await
                    .map(|output| println!("{}", output.trim_end_matches('\n')))
            }
            ShellCommand::Clear => bench.clear(),
            ShellCommand::Dismiss => {
                println!("back to {}", bench.dismiss_error());
                Ok(())
            }
            ShellCommand::Hide => {
                bench.hide_generated();
                Ok(())
            }
            ShellCommand::Close => bench.close_terminal(),
            ShellCommand::Drag(divider, moves) => {
                let geometry = bench.geometry_mut();
                if geometry.drag_start(divider) {
                    for y in moves {
                        geometry.drag_move(y);
                    }
                }
                geometry.drag_end();
                print_layout(&bench);
                Ok(())
            }
            ShellCommand::Layout(height) => {
                if let Some(height) = height {
                    bench.geometry_mut().set_container(Bounds::new(0.0, height));
                }
                print_layout(&bench);
                Ok(())
            }
            ShellCommand::Help => {
                println!("{}", SHELL_HELP);
                Ok(())
            }
            ShellCommand::Quit => break,
        };

        if let Err(e) = result {
            report(&e);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match &cli.command {
        Some(Commands::Generate {
            prompt,
            code_file,
            sanitize,
        }) => {
            generate(&cli, &prompt.join(" "), code_file.as_deref(), *sanitize).await;
        }
        Some(Commands::Run {
            file,
            input,
            input_file,
        }) => {
            run_file(&cli, file, input.as_deref(), input_file.as_deref()).await;
        }
        Some(Commands::Languages) => list_languages(&cli).await,
        Some(Commands::Health) => check_health(&cli).await,
        Some(Commands::Shell) | None => shell(&cli).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regen_client::ErrorKind;
    use std::io::Write;

    #[test]
    fn test_load_source_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "print(input())").unwrap();

        let code = load_source(file.path()).unwrap();
        assert_eq!(code, "print(input())\n");
    }

    #[test]
    fn test_load_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(&dir.path().join("missing.py")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.context().iter().any(|(k, v)| *k == "path" && v.ends_with("missing.py")));
    }

    #[test]
    fn test_decode_input() {
        assert_eq!(decode_input("3\\n4"), "3\n4");
        assert_eq!(decode_input("plain"), "plain");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("héllo wörld", 5), "héllo…");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_parse_shell_commands() {
        assert_eq!(
            ShellCommand::parse("gen  a fizzbuzz  ").unwrap(),
            ShellCommand::Generate("a fizzbuzz".into())
        );
        assert_eq!(ShellCommand::parse("lang").unwrap(), ShellCommand::Language(None));
        assert_eq!(
            ShellCommand::parse("run 1\\n2").unwrap(),
            ShellCommand::Run(Some("1\n2".into()))
        );
        assert_eq!(ShellCommand::parse("run").unwrap(), ShellCommand::Run(None));
        assert_eq!(
            ShellCommand::parse("drag terminal 500 400.5").unwrap(),
            ShellCommand::Drag(Divider::Terminal, vec![500.0, 400.5])
        );
        assert_eq!(ShellCommand::parse("layout 600").unwrap(), ShellCommand::Layout(Some(600.0)));
        assert_eq!(ShellCommand::parse("exit").unwrap(), ShellCommand::Quit);
    }

    #[test]
    fn test_parse_shell_errors() {
        assert!(ShellCommand::parse("frobnicate").is_err());
        assert!(ShellCommand::parse("drag sideways 10").is_err());
        assert!(ShellCommand::parse("drag terminal up").is_err());
        assert!(ShellCommand::parse("layout tall").is_err());
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from(["regen", "-l", "rust", "--base-url", "http://h:1", "languages"]).unwrap();
        assert_eq!(cli.language, Language::Rust);
        assert_eq!(cli.base_url.as_deref(), Some("http://h:1"));
        assert!(matches!(cli.command, Some(Commands::Languages)));

        let cli = Cli::try_parse_from(["regen"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.language, Language::Python);

        assert!(Cli::try_parse_from(["regen", "-l", "cobol", "health"]).is_err());
        assert!(Cli::try_parse_from(["regen", "run", "a.py", "--input", "x", "--input-file", "y"]).is_err());
    }
}
