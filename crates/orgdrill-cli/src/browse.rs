//! Interactive drill-down loop

use std::io::{self, BufRead, Write};

use orgdrill::{ActivePath, NavAction, NavView, Navigator};

use crate::render::render_view;

const HELP: &str = "Commands: N = open child N, aN = jump to ancestor N, .. = up one level, r = reset, q = quit";

/// One line of user input, resolved against the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Apply(NavAction),
    Help,
    Quit,
}

/// Resolve an input line. Numbers refer to the listing printed for `view`.
pub fn parse_command(input: &str, view: &NavView<'_>, path: &ActivePath) -> Result<Command, String> {
    let input = input.trim();
    match input {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "?" | "h" | "help" => return Ok(Command::Help),
        "r" | "reset" => return Ok(Command::Apply(NavAction::Reset)),
        ".." => {
            return match path.len() {
                0 => Err("already at the top level".to_string()),
                1 => Ok(Command::Apply(NavAction::Reset)),
                n => Ok(Command::Apply(NavAction::SelectAncestor(n - 2))),
            }
        }
        _ => {}
    }

    let (buttons, digits) = match input.strip_prefix('a') {
        Some(rest) => (&view.ancestors, rest),
        None => (&view.children, input),
    };
    let n: usize = digits
        .parse()
        .map_err(|_| format!("unknown command '{}'", input))?;

    n.checked_sub(1)
        .and_then(|i| buttons.get(i))
        .map(|button| Command::Apply(button.action.clone()))
        .ok_or_else(|| format!("no entry numbered {}", input))
}

/// Run the loop until `q` or end of input. Rejected commands are reported and skipped.
pub fn run<R: BufRead, W: Write>(
    nav: &Navigator<'_>,
    path: &mut ActivePath,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    let headers = nav.table().headers();

    loop {
        let view = nav.view(path);
        write!(out, "\n{}> ", render_view(&view, headers))?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match parse_command(&line, &view, path) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(out, "{}", HELP)?,
            Ok(Command::Apply(action)) => {
                tracing::debug!("Applying {:?} at '{}'", action, path);
                if let Err(e) = nav.apply(path, &action) {
                    writeln!(out, "error: {}", e)?;
                }
            }
            Err(message) => writeln!(out, "error: {}", message)?,
        }
    }

    Ok(())
}
