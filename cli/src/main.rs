mod highlighter;

use bumpalo::Bump;
use ceval::{Environment, Error, Language, Value, render_error};
use ceval_core::{evaluator, parser};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::io::BufRead;
use std::io::BufReader;
use thiserror::Error as ThisError;
use tracing::debug;

/// ceval - evaluate C-like expressions
#[derive(Parser, Debug)]
#[command(name = "ceval")]
#[command(about = "Evaluate C-like expressions against variable bindings", long_about = None)]
struct Args {
    /// Bind a variable, e.g. `--var x=1` or `--var arr=[1,2,3]` (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, Value)>,

    /// Source language of the expression
    #[arg(long, default_value = "c")]
    language: Language,

    /// Print the parse tree before evaluating (for debugging)
    #[arg(long)]
    debug_tree: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

#[derive(Debug, ThisError)]
enum BindingError {
    #[error("expected NAME=VALUE, got '{0}'")]
    MissingEquals(String),
    #[error("'{0}' is not a valid variable name")]
    InvalidName(String),
    #[error("invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

fn parse_binding(arg: &str) -> Result<(String, Value), BindingError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| BindingError::MissingEquals(arg.to_string()))?;
    let name = name.trim();

    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(BindingError::InvalidName(name.to_string()));
    }

    let value = value.parse::<Value>().map_err(|e| BindingError::InvalidValue {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok((name.to_string(), value))
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline(env: &Environment) -> (Reedline, DefaultPrompt) {
    // Complete on bound variable names.
    let mut names: Vec<String> = env.iter().map(|(name, _)| name.to_string()).collect();
    names.extend(["true".to_string(), "false".to_string()]);
    names.sort();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['_']);
        completions.insert(names);
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(highlighter::Highlighter))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("ceval".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

fn interpret_input(input: &str, env: &Environment, args: &Args) {
    if input.trim().is_empty() {
        return;
    }

    if !args.debug_tree {
        match ceval::eval(input, env, args.language) {
            Ok(value) => println!("{}", value),
            Err(e) => render_error(&e),
        }
        return;
    }

    let arena = Bump::new();
    let parsed = match args.language {
        Language::C => parser::parse(&arena, input),
    };
    let tree = match parsed {
        Ok(tree) => tree,
        Err(e) => {
            render_error(&e.into());
            return;
        }
    };

    println!("=== Parse Tree ===");
    print!("{}", tree);
    println!();

    match evaluator::evaluate_tree(&tree, env) {
        Ok(value) => println!("{}", value),
        Err(error) => render_error(&Error::Eval {
            error,
            input: input.to_string(),
        }),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let env: Environment = args.vars.iter().cloned().collect();
    debug!(variables = env.len(), language = %args.language, "Starting");

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        interpret_input(expr, &env, &args);
        return Ok(());
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        // Interactive REPL mode
        let (mut line_editor, prompt) = setup_reedline(&env);

        println!("ceval REPL - Type expressions to evaluate (Ctrl+D or Ctrl+C to exit)");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => interpret_input(&buffer, &env, &args),
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line.into_diagnostic()?;
            interpret_input(&line, &env, &args);
        }
    }

    Ok(())
}
