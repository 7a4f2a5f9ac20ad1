//! REPL command parsing.
//!
//! Lines starting with `:` are commands; anything else is an expression.
//! Numeric arguments are kept as expression text and evaluated later in the
//! session's angle mode, so `:fn sin pi/6` works.

use calc_core::angle::AngleMode;
use calc_core::errors::{CalcError, CalcResult};
use calc_core::format::Notation;
use calc_core::memory::{MemoryAction, DEFAULT_SLOT};
use calc_core::units::UnitCategory;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Evaluate(String),
    Function {
        name: String,
        /// Defaults to the last result
        value: Option<String>,
    },
    Convert {
        category: String,
        from: String,
        to: String,
        value: Option<String>,
    },
    Memory {
        action: MemoryAction,
        slot: String,
        value: Option<String>,
    },
    ShowMemory,
    /// `None` cycles to the next mode
    SetAngleMode(Option<AngleMode>),
    SetNotation(Option<Notation>),
    Constants,
    Units(Option<UnitCategory>),
    Help,
    Quit,
}

pub const HELP: &str = "\
Expressions:   2+3*4   (1+2)^2   sqrt(16)   √9   sin(30)   5!   50%   2*pi
Commands:
  :fn NAME [X]              apply a function (sin, ln, x², n!, ...) to X or the last result
  :conv CAT FROM TO [X]     convert units, e.g. :conv temperature c f 100
  :ms [SLOT] [X]            store X (default: last result) in SLOT (default: M1)
  :m+ [SLOT] [X]            add to SLOT
  :m- [SLOT] [X]            subtract from SLOT
  :mr [SLOT]                recall SLOT
  :mc [SLOT]                clear SLOT
  :mem                      show all memory slots
  :mode [deg|rad|grad]      set or cycle the angle mode
  :notation [normal|sci|eng] set or cycle the notation
  :consts                   list constants
  :units [CATEGORY]         list unit categories or units
  :help                     this text
  :quit                     exit";

/// Parse one input line
pub fn parse_line(line: &str) -> CalcResult<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Evaluate(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = words.collect();

    match name.as_str() {
        "fn" | "f" => {
            let (function, value) = match args.as_slice() {
                [function] => (function, None),
                [function, value @ ..] => (function, Some(value.join(" "))),
                [] => return Err(usage(":fn NAME [X]")),
            };
            Ok(Command::Function {
                name: function.to_string(),
                value,
            })
        }
        "conv" | "convert" => match args.as_slice() {
            [category, from, to, value @ ..] => Ok(Command::Convert {
                category: category.to_string(),
                from: from.to_string(),
                to: to.to_string(),
                value: (!value.is_empty()).then(|| value.join(" ")),
            }),
            _ => Err(usage(":conv CATEGORY FROM TO [X]")),
        },
        "ms" | "m+" | "m-" | "mr" | "mc" => {
            let action = MemoryAction::from_code(&name)?;
            let (slot, value) = memory_args(&args);
            if value.is_some() && matches!(action, MemoryAction::Recall | MemoryAction::Clear) {
                return Err(usage(":mr [SLOT] / :mc [SLOT]"));
            }
            Ok(Command::Memory { action, slot, value })
        }
        "mem" | "memory" => Ok(Command::ShowMemory),
        "mode" | "angle" => match args.as_slice() {
            [] => Ok(Command::SetAngleMode(None)),
            [mode] => Ok(Command::SetAngleMode(Some(AngleMode::from_name(mode)?))),
            _ => Err(usage(":mode [deg|rad|grad]")),
        },
        "notation" | "nota" => match args.as_slice() {
            [] => Ok(Command::SetNotation(None)),
            [notation] => Ok(Command::SetNotation(Some(Notation::from_name(notation)?))),
            _ => Err(usage(":notation [normal|sci|eng]")),
        },
        "consts" | "constants" => Ok(Command::Constants),
        "units" => match args.as_slice() {
            [] => Ok(Command::Units(None)),
            [category] => Ok(Command::Units(Some(UnitCategory::from_name(category, "")?))),
            _ => Err(usage(":units [CATEGORY]")),
        },
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => Err(CalcError::invalid_input("command", format!(":{}", name), "unknown command, try :help")),
    }
}

/// `[SLOT] [X...]`; a lone argument is a slot only if it looks like one (M1, m2)
fn memory_args(args: &[&str]) -> (String, Option<String>) {
    match args {
        [] => (DEFAULT_SLOT.to_string(), None),
        [single] if is_slot_name(single) => (single.to_uppercase(), None),
        [slot, value @ ..] if is_slot_name(slot) => (slot.to_uppercase(), Some(value.join(" "))),
        value => (DEFAULT_SLOT.to_string(), Some(value.join(" "))),
    }
}

fn is_slot_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some('M' | 'm')) && {
        let digits = chars.as_str();
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
    }
}

fn usage(text: &str) -> CalcError {
    CalcError::invalid_input("command", text, "wrong arguments")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_lines() {
        assert_eq!(parse_line("  ").unwrap(), Command::Empty);
        assert_eq!(parse_line(" 2 + 3 ").unwrap(), Command::Evaluate("2 + 3".to_string()));
    }

    #[test]
    fn test_function_command() {
        assert_eq!(
            parse_line(":fn sin pi / 6").unwrap(),
            Command::Function {
                name: "sin".to_string(),
                value: Some("pi / 6".to_string()),
            }
        );
        assert_eq!(
            parse_line(":fn n!").unwrap(),
            Command::Function {
                name: "n!".to_string(),
                value: None,
            }
        );
        assert!(parse_line(":fn").is_err());
    }

    #[test]
    fn test_convert_command() {
        assert_eq!(
            parse_line(":conv temperature c f 100").unwrap(),
            Command::Convert {
                category: "temperature".to_string(),
                from: "c".to_string(),
                to: "f".to_string(),
                value: Some("100".to_string()),
            }
        );
        assert!(matches!(
            parse_line(":conv length m ft").unwrap(),
            Command::Convert { value: None, .. }
        ));
        assert!(parse_line(":conv length m").is_err());
    }

    #[test]
    fn test_memory_commands() {
        assert_eq!(
            parse_line(":ms").unwrap(),
            Command::Memory {
                action: MemoryAction::Store,
                slot: "M1".to_string(),
                value: None,
            }
        );
        assert_eq!(
            parse_line(":m+ m3 2*4").unwrap(),
            Command::Memory {
                action: MemoryAction::Add,
                slot: "M3".to_string(),
                value: Some("2*4".to_string()),
            }
        );
        assert_eq!(
            parse_line(":ms 42").unwrap(),
            Command::Memory {
                action: MemoryAction::Store,
                slot: "M1".to_string(),
                value: Some("42".to_string()),
            }
        );
        assert!(matches!(
            parse_line(":MR M2").unwrap(),
            Command::Memory { action: MemoryAction::Recall, .. }
        ));
        assert!(parse_line(":mr M2 5").is_err());
    }

    #[test]
    fn test_mode_commands() {
        assert_eq!(parse_line(":mode").unwrap(), Command::SetAngleMode(None));
        assert_eq!(
            parse_line(":mode rad").unwrap(),
            Command::SetAngleMode(Some(AngleMode::Radians))
        );
        assert_eq!(
            parse_line(":notation eng").unwrap(),
            Command::SetNotation(Some(Notation::Engineering))
        );
        assert!(parse_line(":mode turns").is_err());
    }

    #[test]
    fn test_misc_commands() {
        assert_eq!(parse_line(":q").unwrap(), Command::Quit);
        assert_eq!(parse_line(":consts").unwrap(), Command::Constants);
        assert_eq!(
            parse_line(":units mass").unwrap(),
            Command::Units(Some(UnitCategory::Mass))
        );
        assert_eq!(parse_line(":bogus").unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_slot_names() {
        assert!(is_slot_name("M1"));
        assert!(is_slot_name("m12"));
        assert!(!is_slot_name("M"));
        assert!(!is_slot_name("max"));
        assert!(!is_slot_name("5"));
    }
}
