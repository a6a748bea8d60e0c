use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use reckon::{Engine, Environment, Expression, ExpressionOptions, render_error};
use reckon_core::stdlib::builtin_names;
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    ExampleHighlighter, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use std::io::BufRead;
use std::io::BufReader;

/// Reckon - evaluate formula-style expressions
#[derive(Parser, Debug)]
#[command(name = "reckon")]
#[command(about = "Evaluate reckon expressions", long_about = None)]
struct Args {
    /// Bind a parameter to an expression, e.g. `--param rate=0.2` (repeatable)
    #[arg(long = "param", value_name = "NAME=EXPR", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Use fixed-point decimal literals and arithmetic
    #[arg(long)]
    decimal: bool,

    /// Report overflow and division by zero as errors
    #[arg(long)]
    overflow_protection: bool,

    /// Never treat values of different types as equal
    #[arg(long)]
    strict: bool,

    /// Make `+` always concatenate text
    #[arg(long)]
    string_concat: bool,

    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

impl Args {
    fn options(&self) -> ExpressionOptions {
        let mut options = ExpressionOptions::empty();
        options.set(ExpressionOptions::DECIMAL_AS_DEFAULT, self.decimal);
        options.set(ExpressionOptions::OVERFLOW_PROTECTION, self.overflow_protection);
        options.set(ExpressionOptions::STRICT_TYPE_MATCHING, self.strict);
        options.set(ExpressionOptions::STRING_CONCAT, self.string_concat);
        options
    }
}

fn parse_param(text: &str) -> Result<(String, String), String> {
    match text.split_once('=') {
        Some((name, expr)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), expr.to_string()))
        }
        _ => Err(format!("expected NAME=EXPR, got '{text}'")),
    }
}

/// Binds every `--param` as a lazily evaluated expression parameter.
fn build_environment(engine: &Engine, args: &Args) -> Result<Environment> {
    let base = Environment::new().with_options(args.options());
    let mut env = base.clone();
    for (name, text) in &args.params {
        let expression: Expression = engine.compile(text, base.clone()).map_err(|e| {
            render_error(&e);
            miette!("invalid expression for parameter '{name}'")
        })?;
        tracing::debug!(name = %name, text = %text, "Bound parameter expression");
        env = env.with_expression_parameter(name, expression);
    }
    Ok(env)
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

fn setup_reedline() -> (Reedline, DefaultPrompt) {
    let functions: Vec<String> = builtin_names().map(str::to_string).collect();

    let completer = Box::new({
        let mut completions = DefaultCompleter::with_inclusions(&['_']);
        completions.insert(functions.clone());
        completions
    });

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

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let line_editor = Reedline::create()
        .with_highlighter(Box::new(ExampleHighlighter::new(functions)))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(Box::new(ide_menu)))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    let prompt = DefaultPrompt::new(DefaultPromptSegment::Empty, DefaultPromptSegment::Empty);

    (line_editor, prompt)
}

fn interpret_input(engine: &Engine, env: &Environment, input: &str, debug_parse: bool) {
    let input = input.trim();
    if input.is_empty() {
        return;
    }

    let expression = match engine.compile(input, env.clone()) {
        Ok(expression) => expression,
        Err(e) => {
            render_error(&e);
            return;
        }
    };

    if debug_parse {
        println!("=== Parsed AST ===");
        println!("{}", expression.ast());
        println!("{:#?}", expression.ast());
        println!();
    }

    match expression.evaluate() {
        Ok(value) => println!("{value}"),
        Err(e) => render_error(&e),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the log level; default to WARN if not set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let engine = Engine::new();
    let env = build_environment(&engine, &args)?;

    if let Some(expr) = &args.expression {
        interpret_input(&engine, &env, expr, args.debug_parse);
        return Ok(());
    }

    if atty::is(atty::Stream::Stdin) {
        let (mut line_editor, prompt) = setup_reedline();

        println!("Reckon REPL - Type expressions to evaluate (Ctrl+D or Ctrl+C to exit)");

        loop {
            match line_editor.read_line(&prompt).into_diagnostic()? {
                Signal::Success(buffer) => {
                    interpret_input(&engine, &env, &buffer, args.debug_parse);
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    }

    let stdin = std::io::stdin();
    let reader = BufReader::new(stdin.lock());
    for line in reader.lines() {
        let line = line.into_diagnostic()?;
        interpret_input(&engine, &env, &line, args.debug_parse);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("rate = 0.2"),
            Ok(("rate".to_string(), " 0.2".to_string()))
        );
        assert_eq!(
            parse_param("a=b=c"),
            Ok(("a".to_string(), "b=c".to_string()))
        );
        assert!(parse_param("=1").is_err());
        assert!(parse_param("rate").is_err());
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = Args::parse_from(["reckon", "--decimal", "--strict", "1 + 1"]);
        assert_eq!(
            args.options(),
            ExpressionOptions::DECIMAL_AS_DEFAULT | ExpressionOptions::STRICT_TYPE_MATCHING
        );
        assert_eq!(args.expression.as_deref(), Some("1 + 1"));
    }

    #[test]
    fn test_params_are_bound_as_expressions() {
        let args = Args::parse_from(["reckon", "--param", "x=2 * 3", "--param", "y=x + 1", "y"]);
        let engine = Engine::new();
        let env = build_environment(&engine, &args).unwrap();
        let value = engine.evaluate("y * 2", &env).unwrap();
        assert_eq!(value.to_string(), "14");
    }
}
