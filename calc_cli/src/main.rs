//! # Sci-Calc CLI
//!
//! Terminal front end for `calc_core`. With an expression argument it
//! evaluates once and exits; otherwise it runs a line-oriented prompt.
//!
//! ```text
//! $ calc_cli "2^10"
//! = 1024
//! $ calc_cli --json --angle-mode rad "sin(pi/2)"
//! { "success": true, "result": 1.0 }
//! ```

mod commands;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use calc_core::api::{ConvertRequest, EvaluateRequest, FunctionRequest, MemoryRequest};
use calc_core::constants::constants;
use calc_core::errors::{CalcError, CalcResult};
use calc_core::units::UnitCategory;
use calc_core::{AngleMode, MemoryAction, Notation, Session, Settings};

use commands::{parse_line, Command, HELP};

#[derive(Parser, Debug)]
#[command(name = "calc_cli", version, about = "Sci-Calc - scientific calculator")]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, env = "CALC_CONFIG")]
    config: Option<PathBuf>,

    /// Angle mode: deg, rad or grad
    #[arg(short, long)]
    angle_mode: Option<String>,

    /// Notation: normal, sci or eng
    #[arg(short, long)]
    notation: Option<String>,

    /// Print JSON responses instead of formatted values
    #[arg(long)]
    json: bool,

    /// Expression (or :command) to run once; omit for the prompt
    expression: Vec<String>,
}

fn load_settings(cli: &Cli) -> CalcResult<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(mode) = &cli.angle_mode {
        settings.angle_mode = AngleMode::from_name(mode)?;
    }
    if let Some(notation) = &cli.notation {
        settings.notation = Notation::from_name(notation)?;
    }
    Ok(settings)
}

/// RUST_LOG wins over the configured level. Logs go to stderr so stdout
/// stays clean for results.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    init_logging(&settings.log_level);

    let mut repl = Repl::new(Session::new(settings), cli.json);
    if cli.expression.is_empty() {
        return repl.run_interactive();
    }

    match repl.run_line(&cli.expression.join(" ")) {
        Flow::Failed => ExitCode::FAILURE,
        Flow::Continue | Flow::Quit => ExitCode::SUCCESS,
    }
}

// ============================================================================
// REPL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Failed,
    Quit,
}

struct Repl {
    session: Session,
    json: bool,
    /// Last displayed value, the implicit operand of :fn and memory commands
    last: f64,
}

impl Repl {
    fn new(session: Session, json: bool) -> Self {
        Repl {
            session,
            json,
            last: 0.0,
        }
    }

    fn run_interactive(&mut self) -> ExitCode {
        println!("Sci-Calc - Scientific Calculator");
        println!("================================");
        println!(
            "Angle: {}  Notation: {}  (:help for commands, :quit to exit)",
            self.session.angle_mode(),
            self.session.notation()
        );
        println!();

        let stdin = io::stdin();
        loop {
            print!("{}> ", self.session.angle_mode());
            if io::stdout().flush().is_err() {
                break;
            }

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "failed to read input");
                    return ExitCode::FAILURE;
                }
            }

            if self.run_line(&line) == Flow::Quit {
                break;
            }
        }
        ExitCode::SUCCESS
    }

    fn run_line(&mut self, line: &str) -> Flow {
        match parse_line(line).and_then(|command| self.execute(command)) {
            Ok(flow) => flow,
            Err(e) => {
                self.report(&e);
                Flow::Failed
            }
        }
    }

    fn execute(&mut self, command: Command) -> CalcResult<Flow> {
        tracing::trace!(?command, "execute");
        match command {
            Command::Empty => {}
            Command::Evaluate(expression) => {
                if self.json {
                    let request = EvaluateRequest {
                        expression,
                        angle_mode: None,
                    };
                    let response = self.session.handle_evaluate(&request);
                    self.print_json(&response)?;
                    return Ok(self.settle(response.success, response.result));
                }
                let value = self.session.evaluate(&expression)?;
                self.show(value);
            }
            Command::Function { name, value } => {
                let value = self.operand(value.as_deref())?;
                if self.json {
                    let request = FunctionRequest {
                        function: name,
                        value,
                        angle_mode: None,
                    };
                    let response = self.session.handle_function(&request);
                    self.print_json(&response)?;
                    return Ok(self.settle(response.success, response.result));
                }
                let result = self.session.apply(&name, value)?;
                self.show(result);
            }
            Command::Convert {
                category,
                from,
                to,
                value,
            } => {
                let value = self.operand(value.as_deref())?;
                let request = ConvertRequest {
                    category,
                    from_unit: from,
                    to_unit: to,
                    value,
                };
                let response = self.session.handle_convert(&request);
                if self.json {
                    self.print_json(&response)?;
                    return Ok(self.settle(response.success, Some(response.result)));
                }
                match (response.success, response.error) {
                    (true, _) => {
                        println!(
                            "{} {} = {} {}",
                            self.session.format(value),
                            request.from_unit,
                            self.session.format(response.result),
                            request.to_unit
                        );
                        self.last = response.result;
                    }
                    (false, error) => {
                        eprintln!("Error: {}", error.unwrap_or_default());
                        return Ok(Flow::Failed);
                    }
                }
            }
            Command::Memory { action, slot, value } => {
                let value = match action {
                    MemoryAction::Store | MemoryAction::Add | MemoryAction::Subtract => {
                        Some(self.operand(value.as_deref())?)
                    }
                    MemoryAction::Recall | MemoryAction::Clear => None,
                };
                if self.json {
                    let request = MemoryRequest {
                        action: action.code().to_string(),
                        slot,
                        value,
                    };
                    let response = self.session.handle_memory(&request);
                    self.print_json(&response)?;
                    return Ok(self.settle(response.success, None));
                }

                let result = self.session.memory().execute(action, &slot, value)?;
                match (action, result) {
                    (MemoryAction::Recall, Some(v)) => self.show(v),
                    (MemoryAction::Clear, _) => println!("{} cleared", slot),
                    (_, Some(v)) => println!("{} = {}", slot, self.session.format(v)),
                    (_, None) => {}
                }
            }
            Command::ShowMemory => {
                let snapshot = self.session.memory().snapshot();
                if self.json {
                    self.print_json(&snapshot)?;
                } else if snapshot.is_empty() {
                    println!("(memory empty)");
                } else {
                    for (slot, value) in &snapshot {
                        println!("  {:<4} {}", slot, self.session.format(*value));
                    }
                }
            }
            Command::SetAngleMode(mode) => {
                let mode = mode.unwrap_or_else(|| self.session.angle_mode().next());
                self.session.set_angle_mode(mode);
                println!("Angle mode: {}", mode);
            }
            Command::SetNotation(notation) => {
                let notation = notation.unwrap_or_else(|| self.session.notation().next());
                self.session.set_notation(notation);
                println!("Notation: {}", notation);
            }
            Command::Constants => {
                if self.json {
                    self.print_json(&self.session.handle_constants())?;
                } else {
                    for c in constants() {
                        println!("  {:<3} {:<28} {:<14e} {}", c.symbol, c.name, c.value, c.unit);
                    }
                }
            }
            Command::Units(None) => {
                for category in UnitCategory::ALL {
                    let symbols: Vec<&str> = category.units().iter().map(|u| u.symbol).collect();
                    println!("  {:<12} {}", category.name(), symbols.join(", "));
                }
            }
            Command::Units(Some(category)) => {
                for unit in category.units() {
                    println!("  {:<6} {}", unit.symbol, unit.name);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Explicit operand text, or the last result
    fn operand(&self, text: Option<&str>) -> CalcResult<f64> {
        match text {
            Some(text) => self.session.evaluate(text),
            None => Ok(self.last),
        }
    }

    fn show(&mut self, value: f64) {
        self.last = value;
        println!("= {}", self.session.format(value));
    }

    fn settle(&mut self, success: bool, result: Option<f64>) -> Flow {
        if let Some(value) = result.filter(|_| success) {
            self.last = value;
        }
        if success {
            Flow::Continue
        } else {
            Flow::Failed
        }
    }

    fn print_json<T: Serialize>(&self, value: &T) -> CalcResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", text);
        Ok(())
    }

    fn report(&self, e: &CalcError) {
        if self.json {
            let body = serde_json::json!({
                "success": false,
                "error": e.to_string(),
                "code": e.error_code(),
            });
            println!("{}", body);
        } else {
            eprintln!("Error: {}", e);
        }
    }
}
